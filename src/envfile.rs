//! `.env`-style file loading
//!
//! Line-oriented `KEY=value` files pre-populate the process environment
//! before resolution. Malformed lines are skipped, a missing file is not an
//! error, and variables already set in the environment are never
//! overridden. Progress is reported at debug level; turn up the log backend
//! to watch what gets loaded.

use log::debug;
use std::path::Path;

/// Load a `.env`-style file into the process environment
///
/// Returns the number of variables actually set.
pub fn load_env_file(path: impl AsRef<Path>) -> usize {
    let path = path.as_ref();
    let content = match std::fs::read_to_string(path) {
        Ok(content) => content,
        Err(_) => {
            debug!("no env file at {}, skipping", path.display());
            return 0;
        }
    };

    let mut loaded = 0;
    for (key, value) in parse_env_lines(&content) {
        if std::env::var(&key).is_ok() {
            debug!("{} already set, keeping environment value", key);
            continue;
        }
        debug!("{} loaded from {}", key, path.display());
        std::env::set_var(&key, &value);
        loaded += 1;
    }
    loaded
}

/// Parse `KEY=value` lines, stripping quotes and inline comments
fn parse_env_lines(content: &str) -> Vec<(String, String)> {
    let mut vars = Vec::new();

    for (line_num, line) in content.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        let Some((key, value)) = line.split_once('=') else {
            debug!("skipping malformed line {}", line_num + 1);
            continue;
        };

        let key = key.trim();
        if key.is_empty() {
            debug!("skipping empty key at line {}", line_num + 1);
            continue;
        }

        let value = value.trim();
        let value = if (value.starts_with('"') && value.ends_with('"') && value.len() >= 2)
            || (value.starts_with('\'') && value.ends_with('\'') && value.len() >= 2)
        {
            value[1..value.len() - 1].to_string()
        } else {
            // Inline comments only apply outside quotes
            value.split('#').next().unwrap_or("").trim().to_string()
        };

        vars.push((key.to_string(), value));
    }

    vars
}
