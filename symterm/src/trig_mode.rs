use std::fmt::{self, Display, Formatter};

#[cfg(feature = "serde")]
use serde_repr::{Deserialize_repr, Serialize_repr};

/// The angle unit assumed for the parameter of a [`Function`](crate::Function). In degrees, the
/// solved parameter is converted to radians before the function is applied.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize_repr, Deserialize_repr))]
#[repr(u8)]
pub enum TrigMode {
    /// Use radians.
    #[default]
    Radians,

    /// Use degrees.
    Degrees,
}

impl Display for TrigMode {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        match self {
            TrigMode::Radians => write!(f, "radians"),
            TrigMode::Degrees => write!(f, "degrees"),
        }
    }
}
