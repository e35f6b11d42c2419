use std::fmt;
use std::ops::{Add, Sub};

use serde::de::{self, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use thiserror::Error;

/// Errors from parsing a currency amount.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MoneyError {
	/// The input was empty after trimming the currency sign.
	#[error("empty amount")]
	Empty,
	/// The input was not a finite decimal number.
	#[error("invalid amount: {0:?}")]
	Invalid(String),
}

/// A currency amount in integer cents.
///
/// Server payloads carry amounts either as JSON numbers or as decimal strings
/// (`"49.95"`); both deserialize into the same value. Rendering always uses two
/// decimal places.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Money(i64);

impl Money {
	/// Zero amount.
	pub const ZERO: Self = Self(0);

	/// Creates an amount from integer cents.
	pub const fn from_cents(cents: i64) -> Self {
		Self(cents)
	}

	/// Returns the amount in integer cents.
	pub const fn cents(self) -> i64 {
		self.0
	}

	/// Converts a floating amount, rounding to the nearest cent.
	///
	/// Returns `None` for NaN, infinities and amounts whose cents do not fit
	/// in an `i64`.
	pub fn from_f64(value: f64) -> Option<Self> {
		// 2^63; `i64::MAX as f64` rounds up to it, so the upper bound is exclusive.
		const LIMIT: f64 = 9_223_372_036_854_775_808.0;
		let cents = (value * 100.0).round();
		(-LIMIT..LIMIT).contains(&cents).then(|| Self(cents as i64))
	}

	/// Parses `"12.50"`, `"$12.50"` or `" 12 "`.
	pub fn parse(input: &str) -> Result<Self, MoneyError> {
		let trimmed = input.trim();
		let (negative, rest) = match trimmed.strip_prefix('-') {
			Some(rest) => (true, rest.trim_start()),
			None => (false, trimmed),
		};
		let digits = rest.strip_prefix('$').unwrap_or(rest).trim();
		if digits.is_empty() {
			return Err(MoneyError::Empty);
		}
		let value: f64 = digits.parse().map_err(|_| MoneyError::Invalid(input.to_string()))?;
		let amount = Self::from_f64(value).ok_or_else(|| MoneyError::Invalid(input.to_string()))?;
		Ok(if negative { Self(-amount.0) } else { amount })
	}

	/// Returns true for amounts strictly greater than zero.
	pub const fn is_positive(self) -> bool {
		self.0 > 0
	}

	/// Renders the amount without a currency sign, e.g. `"49.95"`.
	pub fn format_plain(self) -> String {
		let sign = if self.0 < 0 { "-" } else { "" };
		let abs = self.0.unsigned_abs();
		format!("{sign}{}.{:02}", abs / 100, abs % 100)
	}
}

impl fmt::Display for Money {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		if self.0 < 0 {
			write!(f, "-${}", Self(-self.0).format_plain())
		} else {
			write!(f, "${}", self.format_plain())
		}
	}
}

impl Add for Money {
	type Output = Self;

	fn add(self, rhs: Self) -> Self {
		Self(self.0.saturating_add(rhs.0))
	}
}

impl Sub for Money {
	type Output = Self;

	fn sub(self, rhs: Self) -> Self {
		Self(self.0.saturating_sub(rhs.0))
	}
}

impl Serialize for Money {
	fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
		serializer.serialize_str(&self.format_plain())
	}
}

impl<'de> Deserialize<'de> for Money {
	fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
		deserializer.deserialize_any(MoneyVisitor)
	}
}

struct MoneyVisitor;

impl Visitor<'_> for MoneyVisitor {
	type Value = Money;

	fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str("a currency amount as a number or decimal string")
	}

	fn visit_i64<E: de::Error>(self, v: i64) -> Result<Money, E> {
		v.checked_mul(100).map(Money).ok_or_else(|| E::custom("amount out of range"))
	}

	fn visit_u64<E: de::Error>(self, v: u64) -> Result<Money, E> {
		let v = i64::try_from(v).map_err(|_| E::custom("amount out of range"))?;
		self.visit_i64(v)
	}

	fn visit_f64<E: de::Error>(self, v: f64) -> Result<Money, E> {
		Money::from_f64(v).ok_or_else(|| E::custom("amount is not finite or out of range"))
	}

	fn visit_str<E: de::Error>(self, v: &str) -> Result<Money, E> {
		Money::parse(v).map_err(E::custom)
	}
}
