//! Transport seam.

use async_trait::async_trait;

use crate::{Request, Result};

/// Raw HTTP outcome, before envelope decoding.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawResponse {
	pub status: u16,
	/// True when the transport followed a redirect to reach this response.
	pub redirected: bool,
	pub body: String,
}

impl RawResponse {
	/// Convenience constructor for a JSON body.
	pub fn json(status: u16, body: impl Into<String>) -> Self {
		Self {
			status,
			redirected: false,
			body: body.into(),
		}
	}

	/// Returns true for statuses the server uses to demand a login.
	pub fn is_login_redirect(&self) -> bool {
		self.redirected || matches!(self.status, 300..=399 | 401 | 403)
	}
}

/// Sends storefront requests.
///
/// Implementations only move bytes. They report network failures as
/// [`crate::Error::Transport`] and return every HTTP response, whatever its
/// status, as a [`RawResponse`].
#[async_trait]
pub trait Transport: Send + Sync {
	/// Sends one request and waits for the raw response.
	async fn send(&self, request: Request) -> Result<RawResponse>;
}

#[async_trait]
impl<T: Transport + ?Sized> Transport for std::sync::Arc<T> {
	async fn send(&self, request: Request) -> Result<RawResponse> {
		(**self).send(request).await
	}
}
