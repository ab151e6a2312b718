//! Validation hook and reusable checks
//!
//! Validation never runs automatically: the caller invokes it after
//! resolution, typically once at startup. Layered configurations call their
//! inner layer's `validate` first so checks chain across layers.

use crate::error::{ConfigError, ConfigResult};

/// User-overridable validation hook for cross-field invariants
///
/// The default implementation accepts everything.
pub trait Validatable {
    fn validate(&self) -> ConfigResult<()> {
        Ok(())
    }
}

/// Validate that a string field is non-empty
pub fn validate_required_string(value: &str, field_name: &str) -> ConfigResult<()> {
    if value.is_empty() {
        return Err(ConfigError::validation(format!(
            "{} cannot be empty",
            field_name
        )));
    }
    Ok(())
}

/// Validate a strictly positive number
pub fn validate_positive<T>(value: T, field_name: &str) -> ConfigResult<()>
where
    T: PartialOrd + Default + std::fmt::Display,
{
    if value <= T::default() {
        return Err(ConfigError::validation(format!(
            "{} must be greater than 0, got {}",
            field_name, value
        )));
    }
    Ok(())
}

/// Validate a port number; reserved ports pass with a warning
pub fn validate_port_range(port: u16, field_name: &str) -> ConfigResult<()> {
    if port == 0 {
        return Err(ConfigError::validation(format!(
            "{} cannot be 0",
            field_name
        )));
    }

    // Ports 1-1023 are typically reserved for system services
    if port <= 1023 {
        log::warn!("{} port {} is in the reserved range (1-1023)", field_name, port);
    }

    Ok(())
}

/// Validate URL well-formedness
pub fn validate_url(url: &str, field_name: &str) -> ConfigResult<()> {
    validate_required_string(url, field_name)?;

    url::Url::parse(url).map_err(|e| {
        ConfigError::validation(format!("{} has invalid URL format: {}", field_name, e))
    })?;

    Ok(())
}

/// Validate a value against a fixed set of choices, case-insensitively
pub fn validate_enum_choice<T>(value: &str, valid_choices: &[T], field_name: &str) -> ConfigResult<()>
where
    T: AsRef<str>,
{
    let valid: Vec<&str> = valid_choices.iter().map(|c| c.as_ref()).collect();

    if !valid.iter().any(|&v| v.eq_ignore_ascii_case(value)) {
        return Err(ConfigError::validation(format!(
            "{} has invalid value '{}'. Valid choices: {}",
            field_name,
            value,
            valid.join(", ")
        )));
    }

    Ok(())
}
