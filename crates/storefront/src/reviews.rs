//! Product review widget: star input, submission and helpfulness votes.

use std::collections::BTreeMap;
use std::sync::Arc;
use std::time::Duration;

use bricky_cart::{Navigator, Outcome};
use bricky_client::{Error, ErrorCategory, FeedbackAction, ReviewSubmission, StorefrontClient, Transport};
use bricky_notify::Notifier;
use bricky_primitives::{ProductId, ReviewId};
use parking_lot::Mutex;

use crate::{Disposer, Timers};

pub(crate) const RATING_REQUIRED: &str = "Please select a rating";
pub(crate) const AWAITING_MODERATION: &str = "Thank you! Your review has been submitted and is awaiting moderation.";
pub(crate) const FIX_ERRORS: &str = "Please fix the errors below.";
pub(crate) const SUBMIT_REJECTED: &str = "Failed to submit review";
pub(crate) const SUBMIT_FAILED: &str = "An error occurred while submitting your review";
pub(crate) const FEEDBACK_FAILED: &str = "Failed to record your feedback";

const RELOAD_DELAY: Duration = Duration::from_secs(3);

/// Star rating input.
///
/// Tracks the committed choice separately from what is lit, so hovering can
/// preview a rating and leaving the widget falls back to the committed one.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RatingState {
	selected: Option<u8>,
	lit: u8,
}

impl RatingState {
	/// Highest rating.
	pub const MAX: u8 = 5;

	/// Commits `rating`, clamped to `1..=MAX`. Returns the stars to light.
	pub fn select(&mut self, rating: u8) -> u8 {
		let rating = rating.clamp(1, Self::MAX);
		self.selected = Some(rating);
		self.lit = rating;
		rating
	}

	/// Lights `rating` stars without committing.
	pub fn preview(&mut self, rating: u8) -> u8 {
		self.lit = rating.min(Self::MAX);
		self.lit
	}

	/// Drops any preview; lights the committed rating, or nothing.
	pub fn reset(&mut self) -> u8 {
		self.lit = self.selected.unwrap_or(0);
		self.lit
	}

	/// Forgets the committed rating.
	pub fn clear(&mut self) {
		*self = Self::default();
	}

	pub fn selected(&self) -> Option<u8> {
		self.selected
	}

	pub fn lit(&self) -> u8 {
		self.lit
	}
}

/// Rendering side of the review widget.
pub trait ReviewView: Send + Sync {
	/// Lights the first `lit` stars and dims the rest.
	fn show_stars(&self, lit: u8);

	/// Shows server-side validation errors next to their fields.
	fn show_field_errors(&self, errors: &BTreeMap<String, Vec<String>>);

	/// Empties the review form.
	fn reset_form(&self);

	/// Writes the new vote count on a review's feedback button.
	fn set_feedback_count(&self, review: ReviewId, action: FeedbackAction, count: u64);

	/// Disables a review's feedback button.
	fn disable_feedback(&self, review: ReviewId, action: FeedbackAction);
}

/// Review controller for one product page.
pub struct ReviewPage<T> {
	product: ProductId,
	client: Arc<StorefrontClient<T>>,
	view: Arc<dyn ReviewView>,
	notifier: Arc<dyn Notifier>,
	navigator: Arc<dyn Navigator>,
	rating: Mutex<RatingState>,
	timers: Timers,
}

impl<T: Transport> ReviewPage<T> {
	/// Wires the widget for `product`. Dropping the [`Disposer`] cancels a
	/// pending post-submit reload.
	pub fn setup(
		product: ProductId,
		client: Arc<StorefrontClient<T>>,
		view: Arc<dyn ReviewView>,
		notifier: Arc<dyn Notifier>,
		navigator: Arc<dyn Navigator>,
	) -> (Self, Disposer) {
		let timers = Timers::new();
		let disposer = timers.disposer();
		let page = Self {
			product,
			client,
			view,
			notifier,
			navigator,
			rating: Mutex::new(RatingState::default()),
			timers,
		};
		(page, disposer)
	}

	pub fn rating(&self) -> RatingState {
		*self.rating.lock()
	}

	pub fn select_rating(&self, rating: u8) {
		let lit = self.rating.lock().select(rating);
		self.view.show_stars(lit);
	}

	pub fn preview_rating(&self, rating: u8) {
		let lit = self.rating.lock().preview(rating);
		self.view.show_stars(lit);
	}

	pub fn leave_rating(&self) {
		let lit = self.rating.lock().reset();
		self.view.show_stars(lit);
	}

	/// Submits a review with the committed rating.
	///
	/// Without a rating nothing is sent. Once the server accepts the review
	/// the form is emptied and the page reloads three seconds later so the
	/// moderated list can be fetched again.
	pub async fn submit(&self, title: &str, content: &str) -> Outcome {
		let selected = self.rating.lock().selected();
		let Some(rating) = selected else {
			self.notifier.error(RATING_REQUIRED);
			return Outcome::Invalid;
		};

		let submission = ReviewSubmission {
			product_id: self.product.clone(),
			rating,
			title: title.to_string(),
			content: content.to_string(),
		};
		match self.client.submit_review(&submission).await {
			Ok(response) if response.success => {
				let message = response.message.filter(|m| !m.is_empty());
				self.notifier.success(message.as_deref().unwrap_or(AWAITING_MODERATION));
				self.view.reset_form();
				self.rating.lock().clear();
				self.view.show_stars(0);
				tracing::info!(product_id = %self.product, rating, "review submitted");

				let navigator = self.navigator.clone();
				self.timers.after(RELOAD_DELAY, move || navigator.reload());
				Outcome::Applied
			}
			Ok(response) => {
				let message = response.message.filter(|m| !m.is_empty());
				if response.errors.is_empty() {
					self.notifier.error(message.as_deref().unwrap_or(SUBMIT_REJECTED));
				} else {
					self.notifier.error(message.as_deref().unwrap_or(FIX_ERRORS));
					self.view.show_field_errors(&response.errors);
				}
				Outcome::Failed(ErrorCategory::Business)
			}
			Err(Error::AuthRequired { login_url }) => {
				self.navigator.redirect(&login_url);
				Outcome::LoginRequired
			}
			Err(error) => {
				tracing::warn!(product_id = %self.product, %error, "review submission failed");
				self.notifier.error(SUBMIT_FAILED);
				Outcome::Failed(error.category())
			}
		}
	}

	/// Records a helpful or unhelpful vote on `review`.
	///
	/// The button shows the server's new count and stays disabled afterwards.
	/// A vote the server declines changes nothing on the page.
	pub async fn feedback(&self, review: ReviewId, action: FeedbackAction) -> Outcome {
		match self.client.review_feedback(review, action).await {
			Ok(response) if response.success => {
				let count = match action {
					FeedbackAction::Helpful => response.helpful_count,
					FeedbackAction::Unhelpful => response.unhelpful_count,
				};
				if let Some(count) = count {
					self.view.set_feedback_count(review, action, count);
				}
				self.view.disable_feedback(review, action);
				Outcome::Applied
			}
			Ok(response) => {
				tracing::debug!(review_id = %review, message = ?response.message, "feedback declined");
				Outcome::Failed(ErrorCategory::Business)
			}
			Err(Error::AuthRequired { login_url }) => {
				self.navigator.redirect(&login_url);
				Outcome::LoginRequired
			}
			Err(error) => {
				tracing::warn!(review_id = %review, %error, "review feedback failed");
				self.notifier.error(FEEDBACK_FAILED);
				Outcome::Failed(error.category())
			}
		}
	}
}
