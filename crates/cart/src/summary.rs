//! Cart summary derivation.
//!
//! Shipping is a flat fee on any non-empty cart. The server does not send
//! shipping or grand totals with cart mutations, so both are derived here from
//! whatever subtotal the response carried.

use bricky_client::CartResponse;
use bricky_primitives::Money;

/// Flat shipping fee applied to any cart with a positive subtotal.
pub const DEFAULT_SHIPPING_FEE: Money = Money::from_cents(1000);

/// Subtotal source accepted by [`recompute`].
///
/// Cart mutations echo the subtotal as `cart_total`, some pages send
/// `grand_total` instead, and callers that already hold a number pass it
/// directly. The server contract should settle on one shape; until then both
/// are accepted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SummaryInput {
	/// A bare subtotal.
	Amount(Money),
	/// Totals echoed by a cart response; either may be missing.
	Response {
		cart_total: Option<Money>,
		grand_total: Option<Money>,
	},
}

impl SummaryInput {
	/// Subtotal to derive from: `cart_total`, else `grand_total`, else zero.
	pub fn subtotal(self) -> Money {
		match self {
			Self::Amount(amount) => amount,
			Self::Response {
				cart_total,
				grand_total,
			} => cart_total.or(grand_total).unwrap_or(Money::ZERO),
		}
	}
}

impl From<Money> for SummaryInput {
	fn from(amount: Money) -> Self {
		Self::Amount(amount)
	}
}

impl From<&CartResponse> for SummaryInput {
	fn from(response: &CartResponse) -> Self {
		Self::Response {
			cart_total: response.cart_total,
			grand_total: response.grand_total,
		}
	}
}

/// The three figures of the cart summary panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CartSummary {
	pub subtotal: Money,
	pub shipping: Money,
	pub grand_total: Money,
}

impl CartSummary {
	/// Display strings for subtotal, shipping and grand total, e.g. `"$49.95"`.
	pub fn display(&self) -> [String; 3] {
		[self.subtotal.to_string(), self.shipping.to_string(), self.grand_total.to_string()]
	}
}

/// Derives the summary with a flat `shipping_fee`, charged only when the
/// subtotal is positive.
pub fn recompute(input: impl Into<SummaryInput>, shipping_fee: Money) -> CartSummary {
	let subtotal = input.into().subtotal();
	let shipping = if subtotal.is_positive() { shipping_fee } else { Money::ZERO };
	with_shipping(subtotal, shipping)
}

/// Summary for an explicitly selected shipping cost.
pub fn with_shipping(subtotal: Money, shipping: Money) -> CartSummary {
	CartSummary {
		subtotal,
		shipping,
		grand_total: subtotal + shipping,
	}
}
