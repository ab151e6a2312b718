//! Dynamically typed configuration values
//!
//! Resolution produces one [`Value`] per declared field. The variants cover
//! the cast targets the crate supports; anything richer lives on the YAML
//! side as a `serde_yaml::Value` subtree projected into user types.

use serde::{Serialize, Serializer};
use std::fmt;
use std::path::{Path, PathBuf};

/// A resolved configuration value
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// Declared optional, absent from the source, no default given
    None,
    Bool(bool),
    Int(i64),
    Float(f64),
    Str(String),
    Path(PathBuf),
}

impl Value {
    pub fn is_none(&self) -> bool {
        matches!(self, Value::None)
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_int(&self) -> Option<i64> {
        match self {
            Value::Int(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_float(&self) -> Option<f64> {
        match self {
            Value::Float(f) => Some(*f),
            Value::Int(n) => Some(*n as f64),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Str(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_path(&self) -> Option<&Path> {
        match self {
            Value::Path(p) => Some(p),
            _ => None,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::None => write!(f, "none"),
            Value::Bool(b) => write!(f, "{}", b),
            Value::Int(n) => write!(f, "{}", n),
            Value::Float(x) => write!(f, "{}", x),
            Value::Str(s) => write!(f, "{}", s),
            Value::Path(p) => write!(f, "{}", p.display()),
        }
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Value::Int(n)
    }
}

impl From<f64> for Value {
    fn from(x: f64) -> Self {
        Value::Float(x)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Str(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Str(s)
    }
}

impl From<PathBuf> for Value {
    fn from(p: PathBuf) -> Self {
        Value::Path(p)
    }
}

// Resolved configurations are exported as plain YAML scalars, so each
// variant serializes to its natural scalar form rather than a tagged enum.
impl Serialize for Value {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            Value::None => serializer.serialize_none(),
            Value::Bool(b) => serializer.serialize_bool(*b),
            Value::Int(n) => serializer.serialize_i64(*n),
            Value::Float(x) => serializer.serialize_f64(*x),
            Value::Str(s) => serializer.serialize_str(s),
            Value::Path(p) => serializer.serialize_str(&p.display().to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_forms() {
        assert_eq!(Value::Str("hello".into()).to_string(), "hello");
        assert_eq!(Value::Int(42).to_string(), "42");
        assert_eq!(Value::Bool(false).to_string(), "false");
        assert_eq!(Value::None.to_string(), "none");
        assert_eq!(Value::Path(PathBuf::from("/tmp/data")).to_string(), "/tmp/data");
    }

    #[test]
    fn test_accessors_are_type_strict() {
        let v = Value::Int(8000);
        assert_eq!(v.as_int(), Some(8000));
        assert_eq!(v.as_str(), None);
        assert_eq!(v.as_bool(), None);
        // Ints widen to float for convenience
        assert_eq!(v.as_float(), Some(8000.0));
    }

    #[test]
    fn test_from_conversions() {
        assert_eq!(Value::from("x"), Value::Str("x".to_string()));
        assert_eq!(Value::from(1i64), Value::Int(1));
        assert_eq!(Value::from(true), Value::Bool(true));
    }

    #[test]
    fn test_serializes_as_plain_scalars() {
        let yaml = serde_yaml::to_string(&Value::Int(5)).unwrap();
        assert_eq!(yaml.trim(), "5");
        let yaml = serde_yaml::to_string(&Value::Str("hi".into())).unwrap();
        assert_eq!(yaml.trim(), "hi");
    }
}
