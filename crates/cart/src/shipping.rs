//! Shipping method selection on the cart page.

use std::sync::Arc;

use bricky_client::{Envelope, StorefrontClient, Transport};
use bricky_primitives::Money;

use crate::{CartSummary, CartView, Result, with_shipping};

/// Applies a shipping choice to the summary, then persists it.
pub struct ShippingSelector<T> {
	client: Arc<StorefrontClient<T>>,
	view: Arc<dyn CartView>,
}

impl<T: Transport> ShippingSelector<T> {
	pub fn new(client: Arc<StorefrontClient<T>>, view: Arc<dyn CartView>) -> Self {
		Self { client, view }
	}

	/// Selects `method` at `cost`.
	///
	/// The summary is recomputed from the rendered subtotal before the request
	/// is sent. Persisting the choice is best effort: failures are logged and
	/// the displayed summary stays as selected.
	pub async fn select(&self, method: &str, cost: Money) -> Result<CartSummary> {
		let subtotal = self.view.subtotal()?;
		let summary = with_shipping(subtotal, cost);
		self.view.set_summary(&summary);

		match self.client.set_shipping(method, cost).await.and_then(Envelope::into_result) {
			Ok(_) => tracing::debug!(method, cost = %cost, "shipping method saved"),
			Err(error) => tracing::warn!(method, %error, "failed to save shipping method"),
		}
		Ok(summary)
	}
}
