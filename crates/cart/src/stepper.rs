//! Stock-bounded quantity controls on product pages.

use bricky_primitives::parse_leading_int;

/// Result of a stepper action.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Stepped {
	/// Quantity to show in the input.
	pub quantity: u32,
	/// True when the stock limit stopped the change; hosts show
	/// [`QuantityStepper::limit_message`] as a warning.
	pub limited: bool,
}

impl Stepped {
	const fn to(quantity: u32) -> Self {
		Self {
			quantity,
			limited: false,
		}
	}
}

/// +/- controls and free-text entry bounded to `1..=max_stock`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QuantityStepper {
	max_stock: u32,
}

impl QuantityStepper {
	/// A stepper for a product with `max_stock` units; at least 1.
	pub fn new(max_stock: u32) -> Self {
		Self {
			max_stock: max_stock.max(1),
		}
	}

	pub fn max_stock(&self) -> u32 {
		self.max_stock
	}

	pub fn increase(&self, current: u32) -> Stepped {
		if current < self.max_stock {
			Stepped::to(current + 1)
		} else {
			Stepped {
				quantity: current,
				limited: true,
			}
		}
	}

	pub fn decrease(&self, current: u32) -> Stepped {
		Stepped::to(if current > 1 { current - 1 } else { current })
	}

	/// Normalizes free-text input when the field changes: unreadable or
	/// non-positive values become 1, values above stock become the stock.
	pub fn clamp(&self, raw: &str) -> Stepped {
		match parse_leading_int(raw) {
			Some(n) if n > i64::from(self.max_stock) => Stepped {
				quantity: self.max_stock,
				limited: true,
			},
			Some(n) if n >= 1 => Stepped::to(n as u32),
			_ => Stepped::to(1),
		}
	}

	pub fn limit_message(&self) -> String {
		format!("Maximum {} items available", self.max_stock)
	}
}
