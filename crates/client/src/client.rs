//! Typed storefront operations over a [`Transport`].

use std::time::Duration;

use bricky_primitives::{ItemId, Money, ProductId, ReviewId};
use serde::de::DeserializeOwned;
use serde_json::json;

use crate::{
	Body, CartResponse, Endpoint, Endpoints, Error, FeedbackAction, FeedbackResponse, Method,
	RawResponse, Request, Result, ReviewResponse, ReviewSubmission, SearchSuggestions,
	StatusResponse, Transport,
};

/// Builds the login redirect target, carrying `next` as the return path.
pub fn login_url(login_path: &str, next: &str) -> String {
	format!("{login_path}?next={}", urlencoding::encode(next))
}

/// Storefront API client.
///
/// Every operation resolves to either the decoded envelope or an [`Error`].
/// A decoded envelope may still report `success: false`; callers that only
/// care about success use [`crate::Envelope::into_result`].
pub struct StorefrontClient<T> {
	transport: T,
	endpoints: Endpoints,
	login_path: String,
	page_path: String,
	timeout: Option<Duration>,
}

impl<T: Transport> StorefrontClient<T> {
	/// Creates a client with no timeout, login at `/users/login/` and `/` as
	/// the current page.
	pub fn new(transport: T, endpoints: Endpoints) -> Self {
		Self {
			transport,
			endpoints,
			login_path: "/users/login/".into(),
			page_path: "/".into(),
			timeout: None,
		}
	}

	/// Sets the login page path.
	pub fn with_login_path(mut self, path: impl Into<String>) -> Self {
		self.login_path = path.into();
		self
	}

	/// Sets the page the user returns to after logging in.
	pub fn with_page_path(mut self, path: impl Into<String>) -> Self {
		self.page_path = path.into();
		self
	}

	/// Sets the per-request timeout. `None` waits forever.
	pub fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
		self.timeout = timeout;
		self
	}

	/// Login URL for the current page.
	pub fn login_url(&self) -> String {
		login_url(&self.login_path, &self.page_path)
	}

	/// Underlying transport.
	pub fn transport(&self) -> &T {
		&self.transport
	}

	/// Endpoint table in use.
	pub fn endpoints(&self) -> &Endpoints {
		&self.endpoints
	}

	pub async fn add_to_cart(&self, product: &ProductId, quantity: u32) -> Result<CartResponse> {
		let body = Body::form([("product_id", product.to_string()), ("quantity", quantity.to_string())]);
		self.cart_call(self.post(Endpoint::AddToCart, body)).await
	}

	pub async fn update_quantity(&self, item: &ItemId, quantity: u32) -> Result<CartResponse> {
		let body = Body::form([("cart_item_id", item.to_string()), ("quantity", quantity.to_string())]);
		self.cart_call(self.post(Endpoint::UpdateQuantity, body)).await
	}

	pub async fn remove_item(&self, item: &ItemId) -> Result<CartResponse> {
		let body = Body::form([("cart_item_id", item.to_string())]);
		self.cart_call(self.post(Endpoint::RemoveItem, body)).await
	}

	pub async fn clear_cart(&self) -> Result<CartResponse> {
		self.cart_call(self.post(Endpoint::ClearCart, Body::Empty)).await
	}

	/// Persists the selected shipping method and its cost.
	pub async fn set_shipping(&self, method: &str, cost: Money) -> Result<StatusResponse> {
		let body = Body::form([("shipping_method", method.to_string()), ("shipping_cost", cost.format_plain())]);
		self.call(self.post(Endpoint::SetShipping, body)).await
	}

	pub async fn subscribe_newsletter(&self, email: &str) -> Result<StatusResponse> {
		self.call(self.post(Endpoint::NewsletterSubscribe, Body::Json(json!({ "email": email }))))
			.await
	}

	pub async fn unsubscribe_newsletter(&self, email: &str) -> Result<StatusResponse> {
		self.call(self.post(Endpoint::NewsletterUnsubscribe, Body::Json(json!({ "email": email }))))
			.await
	}

	pub async fn submit_review(&self, review: &ReviewSubmission) -> Result<ReviewResponse> {
		let body = Body::form([
			("product_id", review.product_id.to_string()),
			("rating", review.rating.to_string()),
			("title", review.title.clone()),
			("content", review.content.clone()),
		]);
		self.call(self.post(Endpoint::ReviewSubmit, body)).await
	}

	pub async fn review_feedback(&self, review: ReviewId, action: FeedbackAction) -> Result<FeedbackResponse> {
		let body = Body::form([("action", action.as_str().to_string())]);
		self.call(self.post(Endpoint::ReviewFeedback(review), body)).await
	}

	/// Fetches search suggestions for `query`.
	pub async fn autocomplete(&self, query: &str) -> Result<SearchSuggestions> {
		let request = Request {
			endpoint: Endpoint::Autocomplete,
			method: Method::Get,
			path: self.endpoints.path(Endpoint::Autocomplete),
			query: vec![("q".into(), query.to_string()), ("type".into(), "autocomplete".into())],
			body: Body::Empty,
		};
		self.call(request).await
	}

	fn post(&self, endpoint: Endpoint, body: Body) -> Request {
		Request {
			endpoint,
			method: Method::Post,
			path: self.endpoints.path(endpoint),
			query: Vec::new(),
			body,
		}
	}

	async fn cart_call(&self, request: Request) -> Result<CartResponse> {
		let response: CartResponse = self.call(request).await?;
		if response.requires_login {
			return Err(Error::AuthRequired {
				login_url: self.login_url(),
			});
		}
		Ok(response)
	}

	async fn call<R: DeserializeOwned>(&self, request: Request) -> Result<R> {
		let endpoint = request.endpoint;
		let path = request.path.clone();
		let result = match self.exchange(request).await {
			Ok(raw) => self.interpret(raw),
			Err(e) => Err(e),
		};
		match &result {
			Err(Error::AuthRequired { .. }) => tracing::info!(?endpoint, %path, "login required"),
			Err(e) => tracing::warn!(?endpoint, %path, error = %e, "storefront request failed"),
			Ok(_) => tracing::debug!(?endpoint, %path, "storefront request complete"),
		}
		result
	}

	async fn exchange(&self, request: Request) -> Result<RawResponse> {
		let send = self.transport.send(request);
		match self.timeout {
			Some(limit) => tokio::time::timeout(limit, send)
				.await
				.map_err(|_| Error::Timeout(limit))?,
			None => send.await,
		}
	}

	fn interpret<R: DeserializeOwned>(&self, raw: RawResponse) -> Result<R> {
		if raw.is_login_redirect() {
			return Err(Error::AuthRequired {
				login_url: self.login_url(),
			});
		}
		match serde_json::from_str(&raw.body) {
			Ok(value) => Ok(value),
			Err(_) if !(200..300).contains(&raw.status) => {
				Err(Error::Transport(format!("HTTP status {}", raw.status)))
			}
			Err(e) => Err(Error::Decode(e.to_string())),
		}
	}
}
