//! Add-to-cart button on product detail and category pages.

use std::sync::Arc;

use bricky_client::{Error, StorefrontClient, Transport};
use bricky_notify::Notifier;
use bricky_primitives::{ProductId, QuantityInput};

use crate::{Navigator, Outcome, ProductView, Result};

const LOGIN_TO_ADD: &str = "Please log in or register to add items to cart";
const INVALID_QUANTITY: &str = "Please enter a valid quantity";
const ADDED: &str = "Item added to cart";
const ADD_REJECTED: &str = "Failed to add item to cart";
const ADD_FAILED: &str = "Error adding to cart. Please try again.";

/// Restores the add button however the flow ends.
struct AddingGuard<'a> {
	view: &'a dyn ProductView,
	product: &'a ProductId,
}

impl Drop for AddingGuard<'_> {
	fn drop(&mut self) {
		self.view.set_adding(self.product, false);
	}
}

/// Add-to-cart controller.
pub struct AddToCart<T> {
	client: Arc<StorefrontClient<T>>,
	view: Arc<dyn ProductView>,
	notifier: Arc<dyn Notifier>,
	navigator: Arc<dyn Navigator>,
}

impl<T: Transport> AddToCart<T> {
	pub fn new(
		client: Arc<StorefrontClient<T>>,
		view: Arc<dyn ProductView>,
		notifier: Arc<dyn Notifier>,
		navigator: Arc<dyn Navigator>,
	) -> Self {
		Self {
			client,
			view,
			notifier,
			navigator,
		}
	}

	/// Adds the quantity entered for `product`.
	///
	/// Anonymous visitors are sent to the login page without a request.
	/// On success the badge shows the server's count and the quantity input
	/// goes back to 1.
	pub async fn add(&self, product: &ProductId) -> Result<Outcome> {
		if !self.view.is_authenticated() {
			self.login_redirect(self.client.login_url());
			return Ok(Outcome::LoginRequired);
		}

		let raw = self.view.quantity_input(product)?;
		let QuantityInput::Set(quantity) = QuantityInput::parse(&raw) else {
			self.notifier.warning(INVALID_QUANTITY);
			return Ok(Outcome::Invalid);
		};

		let view = &*self.view;
		view.set_adding(product, true);
		let _adding = AddingGuard { view, product };
		tracing::debug!(product_id = %product, quantity, "adding to cart");

		match self.client.add_to_cart(product, quantity).await {
			Ok(response) if response.success => {
				let message = response.message.filter(|m| !m.is_empty());
				self.notifier.success(message.as_deref().unwrap_or(ADDED));
				if let Some(count) = response.cart_count {
					view.set_cart_count(count);
				}
				view.reset_quantity(product);
				Ok(Outcome::Applied)
			}
			Ok(response) => {
				let message = response.message.filter(|m| !m.is_empty());
				self.notifier.error(message.as_deref().unwrap_or(ADD_REJECTED));
				Ok(Outcome::Failed(bricky_client::ErrorCategory::Business))
			}
			Err(Error::AuthRequired { login_url }) => {
				self.login_redirect(login_url);
				Ok(Outcome::LoginRequired)
			}
			Err(error) => {
				self.notifier.error(&error.user_message(ADD_FAILED));
				Ok(Outcome::Failed(error.category()))
			}
		}
	}

	fn login_redirect(&self, url: String) {
		self.notifier.info(LOGIN_TO_ADD);
		self.navigator.redirect(&url);
	}
}
