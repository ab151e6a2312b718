//! Configuration profiles
//!
//! A profile is a plain record of key/value overrides selected by name
//! (dev, prod, ...). It is layered *under* the environment during
//! resolution: a variable that is actually set always wins, and field
//! defaults sit under both. No inheritance, no dispatch.

/// A named set of raw key/value overrides
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProfileValues {
    name: String,
    values: Vec<(String, String)>,
}

impl ProfileValues {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            values: Vec::new(),
        }
    }

    /// Add one override; later entries win on duplicate keys
    pub fn set(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.values.push((key.into(), value.into()));
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Raw value for a key, if this profile overrides it
    pub fn value(&self, key: &str) -> Option<&str> {
        self.values
            .iter()
            .rev()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// Select a profile by environment name
///
/// Unknown names produce an empty profile so resolution falls back to
/// environment values and field defaults alone. Applications with their own
/// profile tables can ignore this and build [`ProfileValues`] directly.
pub fn select_profile(env_name: &str) -> ProfileValues {
    match env_name.to_lowercase().as_str() {
        "dev" | "development" => ProfileValues::new("dev")
            .set("LOG_LEVEL", "debug")
            .set("ENABLE_DEBUG", "true"),
        "prod" | "production" => ProfileValues::new("prod")
            .set("LOG_LEVEL", "warn")
            .set("ENABLE_DEBUG", "false"),
        "test" | "testing" => ProfileValues::new("test")
            .set("LOG_LEVEL", "debug")
            .set("ENABLE_CACHE", "false"),
        other => ProfileValues::new(other),
    }
}
