use std::sync::LazyLock;

use regex::Regex;

static EMAIL_RE: LazyLock<Regex> =
	LazyLock::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email pattern compiles"));

/// Trims and lowercases an address the way the subscription endpoint stores it.
pub fn normalize_email(raw: &str) -> String {
	raw.trim().to_lowercase()
}

/// Loose shape check: something, `@`, something, `.`, something.
pub fn is_plausible_email(value: &str) -> bool {
	EMAIL_RE.is_match(value)
}
