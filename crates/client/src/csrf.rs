//! CSRF token discovery.

use std::fmt;

/// Header the server checks on mutating requests.
pub const CSRF_HEADER: &str = "X-CSRFToken";

/// Anti-forgery token attached to every mutating request.
#[derive(Clone, PartialEq, Eq)]
pub struct CsrfToken(String);

impl CsrfToken {
	/// Wraps a token read from a hidden form field.
	///
	/// Returns `None` for an empty value.
	pub fn from_form_field(value: &str) -> Option<Self> {
		let value = value.trim();
		(!value.is_empty()).then(|| Self(value.to_string()))
	}

	/// Reads the token from a `Cookie` header value such as
	/// `"sessionid=abc; csrftoken=xyz"`.
	///
	/// The first cookie named `name` wins; its value is percent-decoded.
	pub fn from_cookie_header(header: &str, name: &str) -> Option<Self> {
		header
			.split(';')
			.map(str::trim)
			.find_map(|cookie| cookie.strip_prefix(name)?.strip_prefix('='))
			.map(|raw| urlencoding::decode(raw).map(|s| s.into_owned()).unwrap_or_else(|_| raw.to_string()))
			.filter(|value| !value.is_empty())
			.map(Self)
	}

	/// Token value to place in the [`CSRF_HEADER`] header.
	pub fn as_str(&self) -> &str {
		&self.0
	}
}

impl fmt::Debug for CsrfToken {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str("CsrfToken(..)")
	}
}
