//! Cart synchronization for the storefront pages.
//!
//! The page is reached only through the traits in [`view`]; the server only
//! through a [`bricky_client::StorefrontClient`]. Every flow follows the same
//! shape: validate locally, apply the change to the view optimistically, send
//! one request, then reconcile with the server's figures or roll back.
//!
//! - [`CartSync`]: quantity updates, removal and clearing on the cart page.
//! - [`AddToCart`]: the add button on product and category pages.
//! - [`ShippingSelector`]: shipping method selection on the cart page.
//! - [`QuantityStepper`]: stock-bounded +/- controls on product pages.
//! - [`summary`]: subtotal, shipping and grand total derivation.

use bricky_client::ErrorCategory;

mod add;
pub mod invariants;
mod shipping;
mod stepper;
pub mod summary;
mod sync;
#[cfg(test)]
mod testing;
pub mod view;

pub use add::AddToCart;
pub use shipping::ShippingSelector;
pub use stepper::{QuantityStepper, Stepped};
pub use summary::{CartSummary, DEFAULT_SHIPPING_FEE, SummaryInput, recompute, with_shipping};
pub use sync::{CartSync, StalePolicy};
pub use view::{CartHost, CartView, Navigator, ProductView, Prompt, ViewError};

/// A convenient type alias for `Result` with `E` = [`ViewError`].
pub type Result<T, E = ViewError> = std::result::Result<T, E>;

/// How a cart flow ended.
///
/// Failures are already reported to the user through the notifier by the time
/// an outcome is returned; the value exists for hosts and tests.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
	/// The requested value equals what is displayed; nothing was sent.
	Unchanged,
	/// The user declined the confirmation prompt.
	Declined,
	/// Local validation rejected the input; nothing was sent.
	Invalid,
	/// The server accepted the change and the view shows its figures.
	Applied,
	/// A newer request for the same line was issued; this response was ignored.
	Superseded,
	/// The request failed and the optimistic change was undone.
	Failed(ErrorCategory),
	/// The user was sent to the login page.
	LoginRequired,
	/// The page was asked to reload.
	Reloaded,
}
