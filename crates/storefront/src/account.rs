//! Client-side checks for the login, registration and profile forms.
//!
//! A field carries an ordered list of [`FieldRule`]s; the first rule that
//! fails decides the message shown under the field. Values are trimmed before
//! checking. The server repeats every check, so these only spare a round trip.

use std::collections::BTreeMap;

use bricky_primitives::is_plausible_email;
use thiserror::Error;

/// Shortest accepted password.
pub const MIN_PASSWORD_CHARS: usize = 8;

/// Largest accepted profile picture.
pub const MAX_AVATAR_BYTES: u64 = 5 * 1024 * 1024;

/// Message shown under a field that failed a rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum FieldError {
	#[error("This field is required")]
	Required,
	#[error("Please enter a valid email address")]
	InvalidEmail,
	#[error("Password must be at least 8 characters long")]
	PasswordTooShort,
	#[error("Passwords do not match")]
	PasswordMismatch,
	#[error("Please select an image file")]
	NotAnImage,
	#[error("File size must be less than 5MB")]
	FileTooLarge,
}

/// A single check on a field value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldRule {
	/// Value must be non-empty.
	Required,
	/// A non-empty value must look like an email address.
	Email,
	/// A non-empty value must be at least [`MIN_PASSWORD_CHARS`] long.
	Password,
	/// Value must equal the named field's value.
	Matches(&'static str),
}

impl FieldRule {
	fn check(self, value: &str, values: &BTreeMap<String, String>) -> Result<(), FieldError> {
		match self {
			Self::Required if value.is_empty() => Err(FieldError::Required),
			Self::Email if !value.is_empty() && !is_plausible_email(value) => Err(FieldError::InvalidEmail),
			Self::Password if !value.is_empty() && value.chars().count() < MIN_PASSWORD_CHARS => {
				Err(FieldError::PasswordTooShort)
			}
			Self::Matches(other) => {
				let other = values.get(other).map_or("", |v| v.trim());
				if other == value { Ok(()) } else { Err(FieldError::PasswordMismatch) }
			}
			_ => Ok(()),
		}
	}
}

/// Rules for every field of one form.
#[derive(Debug, Clone, Default)]
pub struct FormValidator {
	fields: Vec<(&'static str, Vec<FieldRule>)>,
}

impl FormValidator {
	pub fn new() -> Self {
		Self::default()
	}

	/// Adds a field checked by `rules`, in order.
	pub fn field(mut self, name: &'static str, rules: impl IntoIterator<Item = FieldRule>) -> Self {
		self.fields.push((name, rules.into_iter().collect()));
		self
	}

	/// Username and password.
	pub fn login() -> Self {
		Self::new()
			.field("username", [FieldRule::Required])
			.field("password", [FieldRule::Required, FieldRule::Password])
	}

	/// Account creation form.
	pub fn registration() -> Self {
		Self::new()
			.field("username", [FieldRule::Required])
			.field("email", [FieldRule::Required, FieldRule::Email])
			.field("password", [FieldRule::Required, FieldRule::Password])
			.field("confirm_password", [FieldRule::Required, FieldRule::Matches("password")])
	}

	/// Checks one field, as done when it loses focus. Unknown fields pass.
	pub fn validate_field(&self, name: &str, values: &BTreeMap<String, String>) -> Result<(), FieldError> {
		let Some((_, rules)) = self.fields.iter().find(|(field, _)| *field == name) else {
			return Ok(());
		};
		let value = values.get(name).map_or("", |v| v.trim());
		rules.iter().try_for_each(|rule| rule.check(value, values))
	}

	/// Checks every field, as done on submit. An empty map means the form may
	/// be sent.
	pub fn validate(&self, values: &BTreeMap<String, String>) -> BTreeMap<&'static str, FieldError> {
		self.fields
			.iter()
			.filter_map(|(name, _)| self.validate_field(name, values).err().map(|err| (*name, err)))
			.collect()
	}
}

/// Checks a picked profile picture before it is previewed.
pub fn validate_avatar(mime_type: &str, size_bytes: u64) -> Result<(), FieldError> {
	if !mime_type.starts_with("image/") {
		return Err(FieldError::NotAnImage);
	}
	if size_bytes > MAX_AVATAR_BYTES {
		return Err(FieldError::FileTooLarge);
	}
	Ok(())
}

#[cfg(test)]
mod tests {
	use pretty_assertions::assert_eq;

	use super::*;

	fn form(pairs: &[(&str, &str)]) -> BTreeMap<String, String> {
		pairs.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect()
	}

	#[test]
	fn test_registration_reports_first_failure_per_field() {
		let values = form(&[
			("username", "  "),
			("email", "jane@example"),
			("password", "short"),
			("confirm_password", "shorter"),
		]);

		let errors = FormValidator::registration().validate(&values);

		assert_eq!(
			errors,
			BTreeMap::from([
				("confirm_password", FieldError::PasswordMismatch),
				("email", FieldError::InvalidEmail),
				("password", FieldError::PasswordTooShort),
				("username", FieldError::Required),
			])
		);
	}

	#[test]
	fn test_valid_registration_passes() {
		let values = form(&[
			("username", "jane"),
			("email", " jane@example.com "),
			("password", "correct horse"),
			("confirm_password", "correct horse "),
		]);
		assert!(FormValidator::registration().validate(&values).is_empty());
	}

	#[test]
	fn test_optional_email_only_checked_when_present() {
		let validator = FormValidator::new().field("email", [FieldRule::Email]);
		assert_eq!(validator.validate_field("email", &form(&[])), Ok(()));
		assert_eq!(
			validator.validate_field("email", &form(&[("email", "nope")])),
			Err(FieldError::InvalidEmail)
		);
		assert_eq!(validator.validate_field("nickname", &form(&[])), Ok(()));
	}

	#[test]
	fn test_messages() {
		assert_eq!(FieldError::Required.to_string(), "This field is required");
		assert_eq!(FieldError::PasswordTooShort.to_string(), "Password must be at least 8 characters long");
	}

	#[test]
	fn test_avatar_checks() {
		assert_eq!(validate_avatar("image/png", 1024), Ok(()));
		assert_eq!(validate_avatar("application/pdf", 1024), Err(FieldError::NotAnImage));
		assert_eq!(validate_avatar("image/jpeg", MAX_AVATAR_BYTES + 1), Err(FieldError::FileTooLarge));
	}
}
