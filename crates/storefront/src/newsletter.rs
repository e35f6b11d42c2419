//! Newsletter subscription form.
//!
//! The same controller serves every subscription form on the site; each call
//! names the form it acts on.

use std::sync::Arc;
use std::time::Duration;

use bricky_cart::{Navigator, Outcome};
use bricky_client::{Envelope, Error, ErrorCategory, Result, StorefrontClient, Transport};
use bricky_notify::Level;
use bricky_primitives::{is_plausible_email, normalize_email};

use crate::{Disposer, Timers};

pub(crate) const INVALID_EMAIL: &str = "Please enter a valid email address.";
pub(crate) const SUBSCRIBED: &str = "Successfully subscribed to our newsletter!";
pub(crate) const SUBSCRIBE_FAILED: &str = "An error occurred. Please try again.";
pub(crate) const THANK_YOU: &str = "Thank you for subscribing!";
pub(crate) const UNSUBSCRIBED: &str = "You have been unsubscribed.";

/// Page the visitor lands on after subscribing.
pub const SUCCESS_PAGE: &str = "/newsletter/success/";

const REDIRECT_DELAY: Duration = Duration::from_secs(2);
const ERROR_CLEAR_DELAY: Duration = Duration::from_secs(5);

/// One subscription form: an email input, a submit button and an inline
/// message element.
pub trait NewsletterForm: Send + Sync {
	/// Current input value, untrimmed.
	fn email(&self) -> String;

	/// Disables the button and swaps its label for `"Subscribing..."`, or
	/// restores both.
	fn set_submitting(&self, submitting: bool);

	/// Empties the input and replaces its placeholder.
	fn clear_email(&self, placeholder: &str);

	/// Shows `text` in the inline message element styled for `level`.
	fn show_message(&self, level: Level, text: &str);

	/// Empties the inline message element.
	fn clear_message(&self);
}

struct SubmittingGuard<'a>(&'a dyn NewsletterForm);

impl Drop for SubmittingGuard<'_> {
	fn drop(&mut self) {
		self.0.set_submitting(false);
	}
}

/// Newsletter controller.
pub struct Newsletter<T> {
	client: Arc<StorefrontClient<T>>,
	navigator: Arc<dyn Navigator>,
	timers: Timers,
}

impl<T: Transport> Newsletter<T> {
	/// Wires the controller; dropping the returned [`Disposer`] cancels the
	/// pending redirect and message clears.
	pub fn setup(client: Arc<StorefrontClient<T>>, navigator: Arc<dyn Navigator>) -> (Self, Disposer) {
		let timers = Timers::new();
		let disposer = timers.disposer();
		(
			Self {
				client,
				navigator,
				timers,
			},
			disposer,
		)
	}

	/// Submits `form`.
	///
	/// The address is trimmed and lowercased before sending. Only emptiness is
	/// checked locally; the server validates the format. Errors clear
	/// themselves after five seconds; a success empties the input and
	/// redirects to [`SUCCESS_PAGE`] two seconds later.
	pub async fn subscribe(&self, form: &Arc<dyn NewsletterForm>) -> Outcome {
		let email = normalize_email(&form.email());
		if email.is_empty() {
			self.show_error(form, INVALID_EMAIL);
			return Outcome::Invalid;
		}

		form.set_submitting(true);
		let _submitting = SubmittingGuard(form.as_ref());

		match self.client.subscribe_newsletter(&email).await {
			Ok(response) if response.success => {
				let message = response.message.filter(|m| !m.is_empty());
				form.show_message(Level::Success, message.as_deref().unwrap_or(SUBSCRIBED));
				form.clear_email(THANK_YOU);
				tracing::info!("newsletter subscription accepted");

				let navigator = self.navigator.clone();
				self.timers.after(REDIRECT_DELAY, move || navigator.redirect(SUCCESS_PAGE));
				Outcome::Applied
			}
			Ok(response) => {
				let message = response.message.filter(|m| !m.is_empty());
				self.show_error(form, message.as_deref().unwrap_or(SUBSCRIBE_FAILED));
				Outcome::Failed(ErrorCategory::Business)
			}
			Err(error) => {
				tracing::warn!(%error, "newsletter subscription failed");
				self.show_error(form, SUBSCRIBE_FAILED);
				Outcome::Failed(error.category())
			}
		}
	}

	/// Removes `email` from the list and returns the confirmation text.
	pub async fn unsubscribe(&self, email: &str) -> Result<String> {
		let email = normalize_email(email);
		if !is_plausible_email(&email) {
			return Err(Error::Validation(INVALID_EMAIL.to_string()));
		}
		let response = self.client.unsubscribe_newsletter(&email).await?.into_result()?;
		Ok(response
			.message
			.filter(|m| !m.is_empty())
			.unwrap_or_else(|| UNSUBSCRIBED.to_string()))
	}

	fn show_error(&self, form: &Arc<dyn NewsletterForm>, text: &str) {
		form.show_message(Level::Error, text);
		let form = form.clone();
		self.timers.after(ERROR_CLEAR_DELAY, move || form.clear_message());
	}
}
