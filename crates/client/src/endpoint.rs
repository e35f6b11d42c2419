//! Endpoint table and request description.

use bricky_primitives::ReviewId;
use serde::{Deserialize, Serialize};

/// Storefront endpoints reachable from the client.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Endpoint {
	AddToCart,
	UpdateQuantity,
	RemoveItem,
	ClearCart,
	SetShipping,
	NewsletterSubscribe,
	NewsletterUnsubscribe,
	ReviewSubmit,
	ReviewFeedback(ReviewId),
	Autocomplete,
}

impl Endpoint {
	/// Whether the endpoint changes server state and therefore needs the CSRF header.
	pub const fn is_mutating(self) -> bool {
		!matches!(self, Self::Autocomplete)
	}
}

/// HTTP method.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
	Get,
	Post,
}

/// Request payload.
#[derive(Debug, Clone, PartialEq)]
pub enum Body {
	Empty,
	/// Form-encoded fields, in order.
	Form(Vec<(String, String)>),
	Json(serde_json::Value),
}

impl Body {
	/// Builds a form body from borrowed pairs.
	pub fn form<'a>(fields: impl IntoIterator<Item = (&'a str, String)>) -> Self {
		Self::Form(fields.into_iter().map(|(k, v)| (k.to_string(), v)).collect())
	}

	/// Looks up a form field by name.
	pub fn form_value(&self, name: &str) -> Option<&str> {
		match self {
			Self::Form(fields) => fields.iter().find(|(k, _)| k == name).map(|(_, v)| v.as_str()),
			_ => None,
		}
	}
}

/// A fully resolved request, ready for a [`crate::Transport`].
#[derive(Debug, Clone, PartialEq)]
pub struct Request {
	pub endpoint: Endpoint,
	pub method: Method,
	/// Path relative to the storefront origin, e.g. `/orders/cart/update/`.
	pub path: String,
	pub query: Vec<(String, String)>,
	pub body: Body,
}

/// Endpoint paths, relative to the storefront origin.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct Endpoints {
	pub add_to_cart: String,
	pub update_quantity: String,
	pub remove_item: String,
	pub clear_cart: String,
	pub set_shipping: String,
	pub newsletter_subscribe: String,
	pub newsletter_unsubscribe: String,
	pub review_submit: String,
	/// Path template; `{id}` is replaced with the review identifier.
	pub review_feedback: String,
	pub autocomplete: String,
}

impl Default for Endpoints {
	fn default() -> Self {
		Self {
			add_to_cart: "/orders/cart/add/".into(),
			update_quantity: "/orders/cart/update/".into(),
			remove_item: "/orders/cart/remove/".into(),
			clear_cart: "/orders/cart/clear/".into(),
			set_shipping: "/orders/checkout/".into(),
			newsletter_subscribe: "/notifications/newsletter/subscribe/".into(),
			newsletter_unsubscribe: "/notifications/newsletter/unsubscribe/".into(),
			review_submit: "/review/create/".into(),
			review_feedback: "/review/{id}/helpful/".into(),
			autocomplete: "/api/search/".into(),
		}
	}
}

impl Endpoints {
	/// Resolves the path for an endpoint.
	pub fn path(&self, endpoint: Endpoint) -> String {
		match endpoint {
			Endpoint::AddToCart => self.add_to_cart.clone(),
			Endpoint::UpdateQuantity => self.update_quantity.clone(),
			Endpoint::RemoveItem => self.remove_item.clone(),
			Endpoint::ClearCart => self.clear_cart.clone(),
			Endpoint::SetShipping => self.set_shipping.clone(),
			Endpoint::NewsletterSubscribe => self.newsletter_subscribe.clone(),
			Endpoint::NewsletterUnsubscribe => self.newsletter_unsubscribe.clone(),
			Endpoint::ReviewSubmit => self.review_submit.clone(),
			Endpoint::ReviewFeedback(id) => self.review_feedback.replace("{id}", &id.to_string()),
			Endpoint::Autocomplete => self.autocomplete.clone(),
		}
	}
}
