//! Field declarations: casters and the fluent [`FieldSpec`] builder

use crate::error::{ConfigError, ConfigResult};
use crate::value::Value;
use std::path::PathBuf;

/// String-to-typed-value conversion applied during resolution
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cast {
    /// Identity: the raw string unchanged
    Str,
    Int,
    Float,
    /// Case-insensitive allow-list for false: "false", "0", "no" and the
    /// empty string; every other non-empty string is true
    Bool,
    /// Wrap as a filesystem path, no existence check
    Path,
}

impl Cast {
    /// Target type name used in cast error messages
    pub fn target_type(&self) -> &'static str {
        match self {
            Cast::Str => "str",
            Cast::Int => "int",
            Cast::Float => "float",
            Cast::Bool => "bool",
            Cast::Path => "path",
        }
    }

    /// Convert a raw source string into a typed value
    pub fn apply(&self, key: &str, raw: &str) -> ConfigResult<Value> {
        match self {
            Cast::Str => Ok(Value::Str(raw.to_string())),
            Cast::Int => raw
                .parse::<i64>()
                .map(Value::Int)
                .map_err(|_| self.cast_error(key, raw)),
            Cast::Float => raw
                .parse::<f64>()
                .map(Value::Float)
                .map_err(|_| self.cast_error(key, raw)),
            Cast::Bool => {
                let falsy = matches!(
                    raw.to_ascii_lowercase().as_str(),
                    "false" | "0" | "no" | ""
                );
                Ok(Value::Bool(!falsy))
            }
            Cast::Path => Ok(Value::Path(PathBuf::from(raw))),
        }
    }

    fn cast_error(&self, key: &str, raw: &str) -> ConfigError {
        ConfigError::Cast {
            key: key.to_string(),
            raw: raw.to_string(),
            target: self.target_type(),
        }
    }
}

/// Declared description of one configuration entry
///
/// Built once, immutable thereafter. The builder keeps the invariant that a
/// required field never carries a default: `default` clears the required
/// flag and `optional` leaves the default empty.
#[derive(Debug, Clone)]
pub struct FieldSpec {
    key: String,
    required: bool,
    default: Option<Value>,
    cast: Cast,
}

impl FieldSpec {
    /// Declare a required string field
    pub fn new(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            required: true,
            default: None,
            cast: Cast::Str,
        }
    }

    /// Set the caster applied to a raw source value
    pub fn cast(mut self, cast: Cast) -> Self {
        self.cast = cast;
        self
    }

    /// Provide an already-typed default, making the field optional
    pub fn default(mut self, value: impl Into<Value>) -> Self {
        self.default = Some(value.into());
        self.required = false;
        self
    }

    /// Mark the field optional with no default; absence resolves to
    /// [`Value::None`]
    pub fn optional(mut self) -> Self {
        self.required = false;
        self.default = None;
        self
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn is_required(&self) -> bool {
        self.required
    }

    pub fn default_value(&self) -> Option<&Value> {
        self.default.as_ref()
    }

    pub fn caster(&self) -> Cast {
        self.cast
    }

    /// Group heading for display: the leading token up to the first `_`,
    /// or the whole key when it has none
    pub fn group(&self) -> &str {
        match self.key.split_once('_') {
            Some((prefix, _)) => prefix,
            None => &self.key,
        }
    }

    /// Resolve this field against a source lookup result
    pub(crate) fn resolve(&self, raw: Option<&str>) -> ConfigResult<Value> {
        match raw {
            Some(raw) => self.cast.apply(&self.key, raw),
            None if self.required => Err(ConfigError::MissingRequired {
                key: self.key.clone(),
            }),
            // Defaults are already typed; no cast is applied to them
            None => Ok(self.default.clone().unwrap_or(Value::None)),
        }
    }
}
