//! Seams between the cart flows and the page hosting them.
//!
//! Methods take `&self` because several flows may be in flight at once and
//! each writes to the page when its response arrives. Lookups that a flow
//! cannot proceed without return [`ViewError`]; cosmetic writes do not.

use std::sync::Arc;

use bricky_notify::Notifier;
use bricky_primitives::{ItemId, Money, ProductId};

use crate::CartSummary;

/// A page element a flow needed was absent or unreadable.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ViewError {
	#[error("missing view element: {0}")]
	MissingElement(String),
	#[error("unreadable value in {element}: {value:?}")]
	Unreadable { element: String, value: String },
}

impl ViewError {
	pub fn missing(element: impl Into<String>) -> Self {
		Self::MissingElement(element.into())
	}
}

/// The rendered cart page.
pub trait CartView: Send + Sync {
	/// Quantity currently displayed for the line.
	fn quantity(&self, item: &ItemId) -> Result<u32, ViewError>;

	/// Writes a quantity into the line's input.
	fn set_quantity(&self, item: &ItemId, quantity: u32) -> Result<(), ViewError>;

	/// Dims the line and disables its controls, or restores them.
	fn set_line_busy(&self, item: &ItemId, busy: bool);

	/// Writes the line total.
	fn set_line_total(&self, item: &ItemId, total: Money) -> Result<(), ViewError>;

	/// Starts the line's exit animation.
	fn begin_exit(&self, item: &ItemId);

	/// Plays the exit animation backwards, re-inserting the line visually.
	fn revert_exit(&self, item: &ItemId);

	/// Removes the line from the page.
	fn remove_line(&self, item: &ItemId) -> Result<(), ViewError>;

	/// Number of lines still rendered.
	fn line_count(&self) -> usize;

	/// Updates every cart count badge on the page.
	fn set_cart_count(&self, count: u32);

	/// Rendered subtotal.
	fn subtotal(&self) -> Result<Money, ViewError>;

	/// Writes subtotal, shipping and grand total.
	fn set_summary(&self, summary: &CartSummary);

	/// Dims the whole cart table and disables it, or restores it.
	fn set_table_busy(&self, busy: bool);
}

/// A page with add-to-cart controls (product detail, category listing).
pub trait ProductView: Send + Sync {
	/// Whether the page was rendered for a logged-in user.
	fn is_authenticated(&self) -> bool;

	/// Raw text of the quantity input for `product`.
	fn quantity_input(&self, product: &ProductId) -> Result<String, ViewError>;

	/// Puts the quantity input back to 1.
	fn reset_quantity(&self, product: &ProductId);

	/// Disables the add button with a progress label, or restores it.
	fn set_adding(&self, product: &ProductId, adding: bool);

	/// Updates the cart count badge.
	fn set_cart_count(&self, count: u32);
}

/// Blocking yes/no question.
pub trait Prompt: Send + Sync {
	fn confirm(&self, message: &str) -> bool;
}

/// Page-level navigation.
pub trait Navigator: Send + Sync {
	fn redirect(&self, url: &str);
	fn reload(&self);
}

/// Host services shared by the cart flows.
#[derive(Clone)]
pub struct CartHost {
	pub view: Arc<dyn CartView>,
	pub notifier: Arc<dyn Notifier>,
	pub prompt: Arc<dyn Prompt>,
	pub navigator: Arc<dyn Navigator>,
}
