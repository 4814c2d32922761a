// SPDX-License-Identifier: BSD-3-Clause
// Copyright (c) 2026 Aleksandr Ptakhin

//! Input cleaning helpers shared by the form handlers.
//!
//! Every function here is total: no panics, no errors, any input produces
//! a usable value.

use serde_json::Value;

/// Remove leading and trailing whitespace.
pub fn trim(value: &str) -> &str {
    value.trim()
}

/// Permissive syntactic email check: `one-or-more non-space/non-@`, `@`,
/// `one-or-more non-space/non-@`, `.`, `one-or-more non-space`.
/// Equivalent to `^[^\s@]+@[^\s@]+\.[^\s@]+$` on the trimmed value.
/// No MX lookup or RFC-grade parsing.
pub fn is_email(value: &str) -> bool {
    let value = value.trim();
    if value.contains(char::is_whitespace) {
        return false;
    }
    let Some((local, domain)) = value.split_once('@') else {
        return false;
    };
    if local.is_empty() || domain.contains('@') {
        return false;
    }
    // The domain needs a dot that is neither its first nor last character.
    let chars: Vec<char> = domain.chars().collect();
    chars.len() >= 3 && chars[1..chars.len() - 1].contains(&'.')
}

/// Coerce a JSON value to a number and bound it to `[min, max]`.
/// Numeric strings are accepted; anything non-numeric collapses to `min`.
/// Infinities are ordinary out-of-range values and clamp to the bounds.
pub fn clamp(value: &Value, min: f64, max: f64) -> f64 {
    let number = match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    };
    match number {
        Some(n) if !n.is_nan() => n.clamp(min, max),
        _ => min,
    }
}

/// Replace the five HTML-reserved characters with entities. Used only when
/// interpolating user text into the HTML email body; the plain-text body
/// stays untouched.
pub fn escape_html(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_trim_removes_surrounding_whitespace() {
        assert_eq!(trim("  hello  "), "hello");
        assert_eq!(trim("\tworld\n"), "world");
        assert_eq!(trim(""), "");
    }

    #[test]
    fn test_trim_is_idempotent() {
        for s in ["  a b  ", "x", "   ", "a\u{a0}b"] {
            assert_eq!(trim(trim(s)), trim(s));
        }
    }

    #[test]
    fn test_is_email_accepts_basic_addresses() {
        assert!(is_email("a@b.com"));
        assert!(is_email("first.last@sub.example.co.uk"));
        assert!(is_email(" a@b.co "), "trimmed before matching");
    }

    #[test]
    fn test_is_email_rejects_malformed_addresses() {
        assert!(!is_email("not-an-email"));
        assert!(!is_email("a@b"));
        assert!(!is_email("@b.com"));
        assert!(!is_email("a@.com"));
        assert!(!is_email("a b@c.com"));
        assert!(!is_email("a@b@c.com"));
        assert!(!is_email(""));
    }

    #[test]
    fn test_clamp_in_range_is_identity() {
        assert_eq!(clamp(&json!(3), 1.0, 5.0), 3.0);
        assert_eq!(clamp(&json!(4.5), 1.0, 5.0), 4.5);
    }

    #[test]
    fn test_clamp_snaps_to_bounds() {
        assert_eq!(clamp(&json!(9), 1.0, 5.0), 5.0);
        assert_eq!(clamp(&json!(-2), 1.0, 5.0), 1.0);
    }

    #[test]
    fn test_clamp_non_numeric_returns_min() {
        assert_eq!(clamp(&json!("abc"), 1.0, 5.0), 1.0);
        assert_eq!(clamp(&json!(null), 1.0, 5.0), 1.0);
        assert_eq!(clamp(&json!([1, 2]), 1.0, 5.0), 1.0);
    }

    #[test]
    fn test_clamp_accepts_numeric_strings() {
        assert_eq!(clamp(&json!("4"), 1.0, 5.0), 4.0);
        assert_eq!(clamp(&json!(" 2.5 "), 1.0, 5.0), 2.5);
    }

    #[test]
    fn test_clamp_infinities_snap_to_bounds() {
        // JSON numbers cannot encode infinities, but string coercion can
        // produce them; they clamp like any out-of-range value.
        assert_eq!(clamp(&json!("Infinity"), 1.0, 5.0), 5.0);
        assert_eq!(clamp(&json!("-Infinity"), 1.0, 5.0), 1.0);
        assert_eq!(clamp(&json!("NaN"), 1.0, 5.0), 1.0);
    }

    #[test]
    fn test_escape_html_replaces_all_reserved_characters() {
        assert_eq!(escape_html("<b>&'\""), "&lt;b&gt;&amp;&#39;&quot;");
        assert_eq!(escape_html("no specials"), "no specials");
    }
}
