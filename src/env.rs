//! Environment-backed configuration resolution
//!
//! An [`EnvConfig`] is declared as an ordered list of [`FieldSpec`]s and
//! resolved in one explicit pass: lookup, cast, default, fail fast. The
//! resolved mapping lives behind a single lock so [`EnvConfig::reload`] can
//! swap it atomically while readers keep working.

use crate::error::{ConfigError, ConfigResult};
use crate::field::FieldSpec;
use crate::profiles::ProfileValues;
use crate::render;
use crate::value::Value;
use log::debug;
use std::collections::BTreeMap;
use std::fmt;
use std::sync::RwLock;

/// A resolved, environment-backed configuration
pub struct EnvConfig {
    name: String,
    fields: Vec<FieldSpec>,
    values: RwLock<BTreeMap<String, Value>>,
}

/// Process-environment lookup used by the default resolution entry points
fn env_lookup(key: &str) -> Option<String> {
    std::env::var(key).ok()
}

/// Resolve every field against a lookup, in declaration order, failing on
/// the first missing-required or cast error. Nothing is exposed on failure.
fn resolve_map<F>(fields: &[FieldSpec], lookup: F) -> ConfigResult<BTreeMap<String, Value>>
where
    F: Fn(&str) -> Option<String>,
{
    let mut values = BTreeMap::new();
    for field in fields {
        let raw = lookup(field.key());
        let value = field.resolve(raw.as_deref())?;
        values.insert(field.key().to_string(), value);
    }
    Ok(values)
}

impl EnvConfig {
    /// Resolve the declared fields against the process environment
    pub fn resolve(name: impl Into<String>, fields: Vec<FieldSpec>) -> ConfigResult<Self> {
        Self::resolve_with(name, fields, env_lookup)
    }

    /// Resolve against an injected lookup function
    pub fn resolve_with<F>(
        name: impl Into<String>,
        fields: Vec<FieldSpec>,
        lookup: F,
    ) -> ConfigResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let name = name.into();
        let values = resolve_map(&fields, lookup)?;
        debug!("resolved {} fields for {}", values.len(), name);
        Ok(Self {
            name,
            fields,
            values: RwLock::new(values),
        })
    }

    /// Resolve with a profile layered under the process environment
    ///
    /// Lookup order per key: environment, then the profile's values, then
    /// the field's own default.
    pub fn resolve_with_profile(
        name: impl Into<String>,
        fields: Vec<FieldSpec>,
        profile: &ProfileValues,
    ) -> ConfigResult<Self> {
        let layered = |key: &str| env_lookup(key).or_else(|| profile.value(key).map(String::from));
        Self::resolve_with(name, fields, layered)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn fields(&self) -> &[FieldSpec] {
        &self.fields
    }

    /// Re-resolve from the process environment, replacing the mapping in one
    /// atomic swap. On error the previous mapping stays intact.
    pub fn reload(&self) -> ConfigResult<()> {
        self.reload_with(env_lookup)
    }

    /// Re-resolve against an injected lookup (see [`EnvConfig::reload`])
    pub fn reload_with<F>(&self, lookup: F) -> ConfigResult<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        // Build the replacement fully before taking the write guard so
        // readers only ever observe the old or the new mapping.
        let fresh = resolve_map(&self.fields, lookup)?;
        let mut guard = self.values.write().unwrap_or_else(|e| e.into_inner());
        *guard = fresh;
        debug!("reloaded {} fields for {}", guard.len(), self.name);
        Ok(())
    }

    /// Typed value for a resolved key, if present
    pub fn get(&self, key: &str) -> Option<Value> {
        let guard = self.values.read().unwrap_or_else(|e| e.into_inner());
        guard.get(key).cloned()
    }

    /// Typed value for a key, or the given fallback when absent
    pub fn get_or(&self, key: &str, fallback: impl Into<Value>) -> Value {
        self.get(key).unwrap_or_else(|| fallback.into())
    }

    /// Whether a key was resolved (present in the mapping, even as `None`)
    pub fn has(&self, key: &str) -> bool {
        let guard = self.values.read().unwrap_or_else(|e| e.into_inner());
        guard.contains_key(key)
    }

    /// Explicit dynamic-update path; the only way to mutate a resolved value
    pub fn set(&self, key: impl Into<String>, value: impl Into<Value>) {
        let mut guard = self.values.write().unwrap_or_else(|e| e.into_inner());
        guard.insert(key.into(), value.into());
    }

    /// Every resolved field with its typed value, unmasked
    pub fn to_dict(&self) -> BTreeMap<String, Value> {
        let guard = self.values.read().unwrap_or_else(|e| e.into_inner());
        guard.clone()
    }

    /// Display groups: heading is the key prefix up to the first `_`, group
    /// order follows first appearance, members keep declaration order
    pub fn groups(&self) -> Vec<(String, Vec<String>)> {
        let mut groups: Vec<(String, Vec<String>)> = Vec::new();
        for field in &self.fields {
            let heading = field.group();
            match groups.iter_mut().find(|(name, _)| name == heading) {
                Some((_, members)) => members.push(field.key().to_string()),
                None => groups.push((heading.to_string(), vec![field.key().to_string()])),
            }
        }
        groups
    }

    /// Grouped, secret-masked rendering of the resolved configuration
    pub fn render(&self) -> String {
        let guard = self.values.read().unwrap_or_else(|e| e.into_inner());
        let groups: Vec<(String, Vec<(String, String)>)> = self
            .groups()
            .into_iter()
            .map(|(heading, members)| {
                let members = members
                    .into_iter()
                    .map(|key| {
                        let rendered = guard
                            .get(&key)
                            .map(|v| v.to_string())
                            .unwrap_or_else(|| "none".to_string());
                        (key, rendered)
                    })
                    .collect();
                (heading, members)
            })
            .collect();
        render::render_grouped(&self.name, &groups)
    }

    /// Export the resolved mapping (unmasked) as a YAML document
    pub fn to_yaml(&self) -> ConfigResult<String> {
        serde_yaml::to_string(&self.to_dict()).map_err(|e| ConfigError::Export(e.to_string()))
    }
}

impl fmt::Display for EnvConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.render())
    }
}

impl fmt::Debug for EnvConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Debug goes through the masked renderer so secrets never land in
        // logs by way of {:?}
        write!(f, "{}", self.render())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::field::Cast;
    use std::collections::HashMap;

    fn table(entries: &[(&str, &str)]) -> HashMap<String, String> {
        entries
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    fn lookup_in(table: HashMap<String, String>) -> impl Fn(&str) -> Option<String> {
        move |key| table.get(key).cloned()
    }

    fn sample_fields() -> Vec<FieldSpec> {
        vec![
            FieldSpec::new("DATABASE_HOST").default("localhost"),
            FieldSpec::new("DATABASE_PORT").cast(Cast::Int).default(5432i64),
            FieldSpec::new("API_TIMEOUT").cast(Cast::Int).default(30i64),
            FieldSpec::new("SECRET_API_KEY"),
        ]
    }

    #[test]
    fn test_resolution_casts_and_defaults() {
        let lookup = lookup_in(table(&[
            ("DATABASE_PORT", "6000"),
            ("SECRET_API_KEY", "sk_live_abc123"),
        ]));
        let config = EnvConfig::resolve_with("test", sample_fields(), lookup).unwrap();

        assert_eq!(config.get("DATABASE_PORT"), Some(Value::Int(6000)));
        assert_eq!(config.get("DATABASE_HOST"), Some(Value::Str("localhost".into())));
        assert_eq!(config.get("API_TIMEOUT"), Some(Value::Int(30)));
    }

    #[test]
    fn test_missing_required_fails_whole_pass() {
        let lookup = lookup_in(table(&[("DATABASE_PORT", "6000")]));
        let err = EnvConfig::resolve_with("test", sample_fields(), lookup).unwrap_err();
        match err {
            ConfigError::MissingRequired { key } => assert_eq!(key, "SECRET_API_KEY"),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_first_error_in_declaration_order_wins() {
        // Both the port cast and the missing secret are invalid; the port
        // is declared first so its error surfaces
        let lookup = lookup_in(table(&[("DATABASE_PORT", "not-a-number")]));
        let err = EnvConfig::resolve_with("test", sample_fields(), lookup).unwrap_err();
        match err {
            ConfigError::Cast { key, .. } => assert_eq!(key, "DATABASE_PORT"),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_get_has_to_dict_round_trip() {
        let lookup = lookup_in(table(&[("SECRET_API_KEY", "sk_live_abc123")]));
        let config = EnvConfig::resolve_with("test", sample_fields(), lookup).unwrap();

        assert!(config.has("DATABASE_HOST"));
        assert!(!config.has("UNKNOWN"));
        assert_eq!(config.get_or("UNKNOWN", "fallback"), Value::Str("fallback".into()));

        let dict = config.to_dict();
        for key in ["DATABASE_HOST", "DATABASE_PORT", "API_TIMEOUT", "SECRET_API_KEY"] {
            assert_eq!(dict.get(key).cloned(), config.get(key), "mismatch for {key}");
        }
        // The dict is unmasked
        assert_eq!(
            dict.get("SECRET_API_KEY"),
            Some(&Value::Str("sk_live_abc123".into()))
        );
    }

    #[test]
    fn test_grouping_by_prefix() {
        let lookup = lookup_in(table(&[("SECRET_API_KEY", "sk_live_abc123")]));
        let config = EnvConfig::resolve_with("test", sample_fields(), lookup).unwrap();

        let groups = config.groups();
        let headings: Vec<&str> = groups.iter().map(|(h, _)| h.as_str()).collect();
        assert_eq!(headings, vec!["DATABASE", "API", "SECRET"]);
        assert_eq!(groups[0].1, vec!["DATABASE_HOST", "DATABASE_PORT"]);
        assert_eq!(groups[1].1, vec!["API_TIMEOUT"]);
    }

    #[test]
    fn test_render_masks_secret_and_groups() {
        let lookup = lookup_in(table(&[("SECRET_API_KEY", "sk_live_abc123")]));
        let config = EnvConfig::resolve_with("MyService", sample_fields(), lookup).unwrap();

        let out = config.render();
        assert!(out.contains("MYSERVICE"));
        assert!(out.contains("▶ DATABASE"));
        assert!(out.contains("DATABASE_HOST = localhost"));
        assert!(out.contains("SECRET_API_KEY = sk_...23 (hidden)"));
        assert!(!out.contains("sk_live_abc123"));
        assert_eq!(out, config.to_string());
    }

    #[test]
    fn test_set_updates_value() {
        let lookup = lookup_in(table(&[("SECRET_API_KEY", "sk_live_abc123")]));
        let config = EnvConfig::resolve_with("test", sample_fields(), lookup).unwrap();

        config.set("API_TIMEOUT", 99i64);
        assert_eq!(config.get("API_TIMEOUT"), Some(Value::Int(99)));
    }

    #[test]
    fn test_reload_swaps_atomically() {
        let config = EnvConfig::resolve_with(
            "test",
            sample_fields(),
            lookup_in(table(&[("SECRET_API_KEY", "first-key-value")])),
        )
        .unwrap();
        assert_eq!(config.get("DATABASE_PORT"), Some(Value::Int(5432)));

        config
            .reload_with(lookup_in(table(&[
                ("SECRET_API_KEY", "second-key-value"),
                ("DATABASE_PORT", "9000"),
            ])))
            .unwrap();
        assert_eq!(config.get("DATABASE_PORT"), Some(Value::Int(9000)));
        assert_eq!(
            config.get("SECRET_API_KEY"),
            Some(Value::Str("second-key-value".into()))
        );
    }

    #[test]
    fn test_failed_reload_keeps_old_values() {
        let config = EnvConfig::resolve_with(
            "test",
            sample_fields(),
            lookup_in(table(&[("SECRET_API_KEY", "first-key-value")])),
        )
        .unwrap();

        // Missing required key: reload must fail and change nothing
        let err = config.reload_with(lookup_in(table(&[]))).unwrap_err();
        assert!(matches!(err, ConfigError::MissingRequired { .. }));
        assert_eq!(
            config.get("SECRET_API_KEY"),
            Some(Value::Str("first-key-value".into()))
        );
    }

    #[test]
    fn test_to_yaml_exports_unmasked() {
        let lookup = lookup_in(table(&[("SECRET_API_KEY", "sk_live_abc123")]));
        let config = EnvConfig::resolve_with("test", sample_fields(), lookup).unwrap();

        let yaml = config.to_yaml().unwrap();
        assert!(yaml.contains("DATABASE_PORT: 5432"));
        assert!(yaml.contains("sk_live_abc123"));
    }

    #[test]
    fn test_render_masks_absent_secret_placeholder() {
        // An optional secret with no source entry resolves to None; its
        // display still goes through the masker, so not even the absence
        // placeholder shows under a secret key
        let fields = vec![
            FieldSpec::new("REDIS_HOST").default("localhost"),
            FieldSpec::new("REDIS_PASSWORD").optional(),
        ];
        let config = EnvConfig::resolve_with("test", fields, |_| None).unwrap();

        assert_eq!(config.get("REDIS_PASSWORD"), Some(Value::None));
        let out = config.render();
        assert!(out.contains("REDIS_PASSWORD = ****"));
        assert!(out.contains("REDIS_HOST = localhost"));
    }

    #[test]
    fn test_optional_field_resolves_to_none() {
        let fields = vec![FieldSpec::new("REDIS_PASSWORD").optional()];
        let config = EnvConfig::resolve_with("test", fields, |_| None).unwrap();

        assert!(config.has("REDIS_PASSWORD"));
        assert_eq!(config.get("REDIS_PASSWORD"), Some(Value::None));
    }
}
