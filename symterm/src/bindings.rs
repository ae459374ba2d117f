//! Values bound to names while solving.

use std::collections::HashMap;
use crate::consts::{E, PHI, PI, TAU};
use crate::node::Node;

/// A mapping of names to the values they take while solving.
///
/// A value can be any [`Node`], so a name can be bound to another unknown or to a whole
/// expression; solving substitutes it once and does not solve the substituted value again.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Bindings {
    values: HashMap<String, Node>,
}

impl Bindings {
    /// Creates an empty set of bindings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates bindings with the constants `pi`, `e`, `tau` and `phi` already bound.
    pub fn with_constants() -> Self {
        Self::new()
            .with("pi", PI.clone())
            .with("e", E.clone())
            .with("tau", TAU.clone())
            .with("phi", PHI.clone())
    }

    /// Binds `name` to `value`, returning the updated bindings.
    pub fn with(mut self, name: impl Into<String>, value: impl Into<Node>) -> Self {
        self.insert(name, value);
        self
    }

    /// Binds `name` to `value`, returning the value it was previously bound to, if any.
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<Node>) -> Option<Node> {
        self.values.insert(name.into(), value.into())
    }

    /// Returns the value bound to `name`.
    pub fn get(&self, name: &str) -> Option<&Node> {
        self.values.get(name)
    }

    /// Removes the binding for `name`, returning its value.
    pub fn remove(&mut self, name: &str) -> Option<Node> {
        self.values.remove(name)
    }

    /// Returns true if `name` is bound.
    pub fn contains(&self, name: &str) -> bool {
        self.values.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Iterates over the bindings in arbitrary order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Node)> {
        self.values.iter().map(|(name, value)| (name.as_str(), value))
    }
}

impl<K: Into<String>, V: Into<Node>> FromIterator<(K, V)> for Bindings {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut bindings = Self::new();
        for (name, value) in iter {
            bindings.insert(name, value);
        }
        bindings
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use super::*;

    #[test]
    fn builder_and_lookup() {
        let mut bindings = Bindings::new().with("x", 3).with("y", "z");
        assert_eq!(bindings.len(), 2);
        assert_eq!(bindings.get("x"), Some(&Node::from(3)));
        assert_eq!(bindings.get("y"), Some(&Node::from("z")));

        assert_eq!(bindings.insert("x", 4), Some(Node::from(3)));
        assert_eq!(bindings.remove("y"), Some(Node::from("z")));
        assert!(!bindings.contains("y"));
    }

    #[test]
    fn constants() {
        let bindings = Bindings::with_constants();
        let Some(Node::Number(pi)) = bindings.get("pi") else {
            panic!("pi is not bound to a number");
        };
        assert!((pi.to_f64() - std::f64::consts::PI).abs() < 1e-12);
        assert!(bindings.contains("e"));
        assert!(bindings.contains("tau"));
        assert!(bindings.contains("phi"));
    }

    #[test]
    fn collect() {
        let bindings = [("a", 1), ("b", 2)].into_iter().collect::<Bindings>();
        assert_eq!(bindings.get("b"), Some(&Node::from(2)));
    }
}
