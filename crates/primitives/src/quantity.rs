/// Interpretation of a raw quantity entered by the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuantityInput {
	/// A positive quantity to apply.
	Set(u32),
	/// Zero, negative or unparseable input; treated as a removal request.
	Remove,
}

impl QuantityInput {
	/// Coerces raw input text.
	///
	/// Leading whitespace and an optional sign are accepted, then leading
	/// digits are read; trailing garbage is ignored. Anything that does not
	/// yield an integer of at least 1 becomes [`QuantityInput::Remove`].
	pub fn parse(raw: &str) -> Self {
		match parse_leading_int(raw) {
			Some(n) if n >= 1 => Self::Set(u32::try_from(n).unwrap_or(u32::MAX)),
			_ => Self::Remove,
		}
	}

	/// Coerces an already-numeric value.
	pub fn from_signed(n: i64) -> Self {
		if n >= 1 {
			Self::Set(u32::try_from(n).unwrap_or(u32::MAX))
		} else {
			Self::Remove
		}
	}
}

/// Reads an optionally signed integer prefix, saturating on overflow.
///
/// Returns `None` when no digit follows the optional sign.
pub fn parse_leading_int(raw: &str) -> Option<i64> {
	let s = raw.trim_start();
	let (negative, rest) = match s.as_bytes().first() {
		Some(b'-') => (true, &s[1..]),
		Some(b'+') => (false, &s[1..]),
		_ => (false, s),
	};

	let digits: &str = rest.split(|c: char| !c.is_ascii_digit()).next().unwrap_or("");
	if digits.is_empty() {
		return None;
	}

	let magnitude = digits
		.bytes()
		.fold(0i64, |acc, b| acc.saturating_mul(10).saturating_add(i64::from(b - b'0')));
	Some(if negative { -magnitude } else { magnitude })
}

/// Strips every non-digit character, mirroring the live input filter on
/// quantity fields.
pub fn sanitize_digits(raw: &str) -> String {
	raw.chars().filter(char::is_ascii_digit).collect()
}
