//! Page controllers outside the cart.
//!
//! Each interactive page area is set up once and hands back a [`Disposer`].
//! Delayed page actions (clearing an inline error, the post-subscribe
//! redirect, the reload after a review lands) are owned by the controller's
//! timers and cancelled when the disposer goes away, so a torn-down page never
//! receives a late write.
//!
//! - [`Newsletter`]: subscription form with inline status message.
//! - [`ReviewPage`]: star rating input, review submission and feedback votes.
//! - [`Autocomplete`]: search-as-you-type suggestions.
//! - [`checkout`] and [`account`]: synchronous form checks.

pub mod account;
pub mod checkout;
mod newsletter;
mod reviews;
mod search;
#[cfg(test)]
mod testing;
mod timers;

pub use account::{FieldError, FieldRule, FormValidator, validate_avatar};
pub use checkout::{TermsNotAccepted, card_details_visible, validate_terms};
pub use newsletter::{Newsletter, NewsletterForm, SUCCESS_PAGE};
pub use reviews::{RatingState, ReviewPage, ReviewView};
pub use search::{
	Autocomplete, Lookup, MIN_QUERY_CHARS, Section, SuggestionKind, SuggestionView, category_url, sections, slugify,
};
pub use timers::{Disposer, Timers};
