//! Constants used throughout the library. Each is a lazily computed [`Float`] at the working
//! precision.

use once_cell::sync::Lazy;
use rug::Float;
use super::primitive::float;

/// Euler's number.
pub static E: Lazy<Float> = Lazy::new(|| float(1).exp());

/// The golden ratio.
pub static PHI: Lazy<Float> = Lazy::new(|| (float(1) + float(5).sqrt()) / float(2));

pub static PI: Lazy<Float> = Lazy::new(|| float(-1).acos());

pub static TAU: Lazy<Float> = Lazy::new(|| float(2) * &*PI);
