//! Secret detection and masking for displayed configuration
//!
//! Masking is a display convenience, not access control: `to_dict` and the
//! typed accessors always hand back the real values.

/// Key-name substring patterns that mark a field as secret-bearing
pub const SECRET_PATTERNS: [&str; 5] = ["SECRET", "API_KEY", "PASSWORD", "TOKEN", "CREDENTIAL"];

/// Whether a field name indicates a secret value
///
/// The key is uppercased before matching so lowercase YAML-derived keys
/// such as `api_secret_key` are caught as well.
pub fn is_secret(key: &str) -> bool {
    let upper = key.to_ascii_uppercase();
    SECRET_PATTERNS.iter().any(|p| upper.contains(p))
}

/// Partially redact a value for display
///
/// Long values keep the first three and last two characters with a
/// `(hidden)` marker. Values of five characters or fewer are fully masked;
/// the partial form would expose all of them.
pub fn mask(value: &str) -> String {
    let chars: Vec<char> = value.chars().collect();
    if chars.len() <= 5 {
        return "****".to_string();
    }
    let head: String = chars[..3].iter().collect();
    let tail: String = chars[chars.len() - 2..].iter().collect();
    format!("{}...{} (hidden)", head, tail)
}

/// Mask `rendered` when the key names a secret, pass it through otherwise
pub fn mask_if_secret(key: &str, rendered: &str) -> String {
    if is_secret(key) {
        mask(rendered)
    } else {
        rendered.to_string()
    }
}
