//! Response envelopes returned by the storefront endpoints.
//!
//! Fields are lenient on purpose: amounts may arrive as numbers or strings,
//! optional domain fields may be missing or `null`, and unknown fields are
//! ignored.

use std::collections::BTreeMap;

use bricky_primitives::{Money, ProductId};
use serde::{Deserialize, Deserializer, Serialize};

use crate::{Error, Result};

/// Common envelope accessors.
pub trait Envelope: Sized {
	/// Whether the server reported success.
	fn success(&self) -> bool;

	/// Server-provided message, if any.
	fn message(&self) -> Option<&str>;

	/// Converts `success: false` into [`Error::Rejected`].
	fn into_result(self) -> Result<Self> {
		if self.success() {
			Ok(self)
		} else {
			Err(Error::Rejected {
				message: self.message().unwrap_or_default().to_string(),
			})
		}
	}
}

/// Response from the cart mutation endpoints (add, update, remove, clear).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartResponse {
	#[serde(default)]
	pub success: bool,
	#[serde(default)]
	pub message: Option<String>,
	/// Total number of units in the cart.
	#[serde(default)]
	pub cart_count: Option<u32>,
	/// Cart subtotal.
	#[serde(default)]
	pub cart_total: Option<Money>,
	/// Total for the updated line (update endpoint only).
	#[serde(default)]
	pub item_total: Option<Money>,
	/// Grand total; some pages echo this instead of `cart_total`.
	#[serde(default)]
	pub grand_total: Option<Money>,
	#[serde(default)]
	pub requires_login: bool,
}

impl Envelope for CartResponse {
	fn success(&self) -> bool {
		self.success
	}

	fn message(&self) -> Option<&str> {
		self.message.as_deref()
	}
}

/// Plain `{success, message}` response (newsletter, shipping selection).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusResponse {
	#[serde(default)]
	pub success: bool,
	#[serde(default)]
	pub message: Option<String>,
}

impl Envelope for StatusResponse {
	fn success(&self) -> bool {
		self.success
	}

	fn message(&self) -> Option<&str> {
		self.message.as_deref()
	}
}

/// Review submission form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReviewSubmission {
	pub product_id: ProductId,
	/// Star rating, 1 through 5.
	pub rating: u8,
	pub title: String,
	pub content: String,
}

/// Response from the review submission endpoint.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReviewResponse {
	#[serde(default)]
	pub success: bool,
	#[serde(default)]
	pub message: Option<String>,
	/// Per-field validation errors.
	#[serde(default)]
	pub errors: BTreeMap<String, Vec<String>>,
}

impl Envelope for ReviewResponse {
	fn success(&self) -> bool {
		self.success
	}

	fn message(&self) -> Option<&str> {
		self.message.as_deref()
	}
}

/// Review feedback vote.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FeedbackAction {
	Helpful,
	Unhelpful,
}

impl FeedbackAction {
	/// Form value expected by the feedback endpoint.
	pub const fn as_str(self) -> &'static str {
		match self {
			Self::Helpful => "helpful",
			Self::Unhelpful => "unhelpful",
		}
	}
}

/// Response from the review feedback endpoint.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeedbackResponse {
	#[serde(default)]
	pub success: bool,
	#[serde(default)]
	pub message: Option<String>,
	#[serde(default)]
	pub helpful_count: Option<u64>,
	#[serde(default)]
	pub unhelpful_count: Option<u64>,
}

impl Envelope for FeedbackResponse {
	fn success(&self) -> bool {
		self.success
	}

	fn message(&self) -> Option<&str> {
		self.message.as_deref()
	}
}

/// Autocomplete suggestions.
///
/// Accepts both the flat `{products, categories}` shape and the nested
/// `{suggestions: {products, categories}}` shape.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SearchSuggestions {
	pub products: Vec<String>,
	pub categories: Vec<String>,
}

impl SearchSuggestions {
	/// Returns true when neither section has entries.
	pub fn is_empty(&self) -> bool {
		self.products.is_empty() && self.categories.is_empty()
	}
}

#[derive(Deserialize)]
struct FlatSuggestions {
	#[serde(default)]
	products: Vec<String>,
	#[serde(default)]
	categories: Vec<String>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum SuggestionShape {
	Nested { suggestions: FlatSuggestions },
	Flat(FlatSuggestions),
}

impl<'de> Deserialize<'de> for SearchSuggestions {
	fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
		let flat = match SuggestionShape::deserialize(deserializer)? {
			SuggestionShape::Nested { suggestions } => suggestions,
			SuggestionShape::Flat(flat) => flat,
		};
		Ok(Self {
			products: flat.products,
			categories: flat.categories,
		})
	}
}
