//! Human-readable configuration rendering
//!
//! All display paths go through this module so secret masking cannot be
//! bypassed by accident. Programmatic access (`get`, `to_dict`) stays
//! unmasked.

use crate::secret::mask_if_secret;

const FRAME_WIDTH: usize = 60;

/// Draw the shared frame around pre-built body lines
pub(crate) fn frame(title: &str, lines: &[String]) -> String {
    let mut out = String::new();
    let title = format!(" {} ", title.to_uppercase());
    let fill = FRAME_WIDTH.saturating_sub(title.chars().count());
    let left = fill / 2;
    let right = fill - left;
    out.push('╔');
    out.push_str(&"═".repeat(left));
    out.push_str(&title);
    out.push_str(&"═".repeat(right));
    out.push('\n');
    for line in lines {
        out.push_str("║ ");
        out.push_str(line);
        out.push('\n');
    }
    out.push('╚');
    // Bottom border matches the top's total width
    out.push_str(&"═".repeat(left + title.chars().count() + right));
    out
}

/// Render grouped fields under `▶` headings, masking secret keys
///
/// `groups` is (heading, members) with members as (key, rendered value);
/// ordering is whatever the resolver produced.
pub fn render_grouped(title: &str, groups: &[(String, Vec<(String, String)>)]) -> String {
    let mut lines = Vec::new();
    for (heading, members) in groups {
        lines.push(format!("▶ {}", heading));
        for (key, value) in members {
            lines.push(format!("  {} = {}", key, mask_if_secret(key, value)));
        }
    }
    frame(title, &lines)
}

/// Render a flat field list with secret masking, no grouping
///
/// Public so user-projected structs can print themselves with the same
/// frame and masking rules as the built-in loaders.
pub fn render_fields(title: &str, fields: &[(String, String)]) -> String {
    let lines: Vec<String> = fields
        .iter()
        .map(|(key, value)| format!("{} = {}", key, mask_if_secret(key, value)))
        .collect();
    frame(title, &lines)
}
