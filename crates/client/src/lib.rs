//! Client side of the storefront's JSON endpoints.
//!
//! The server owns all cart math, authentication and validation. This crate
//! only knows how to reach it and how to read what it says back:
//!
//! - [`Transport`]: the seam every request goes through. [`HttpTransport`] is
//!   the reqwest implementation; tests script their own.
//! - [`StorefrontClient`]: typed operations over a transport, applying the
//!   shared response rules (login redirects, undecodable bodies, timeouts).
//! - [`wire`]: response envelopes. Every envelope carries `success` and an
//!   optional `message`; domain fields vary per endpoint.
//!
//! # Error taxonomy
//!
//! | class | variant | handling |
//! |---|---|---|
//! | validation | [`Error::Validation`] | detected locally, never sent |
//! | login required | [`Error::AuthRequired`] | info notice plus redirect |
//! | business rule | [`Error::Rejected`] | server message shown verbatim, local state rolled back |
//! | transport | [`Error::Transport`], [`Error::Decode`], [`Error::Timeout`] | generic message, local state rolled back |
//!
//! Nothing is retried.

use std::time::Duration;

mod client;
pub mod csrf;
pub mod endpoint;
mod http;
#[cfg(any(test, feature = "test-support"))]
pub mod test_support;
pub mod transport;
pub mod wire;

pub use client::{StorefrontClient, login_url};
pub use csrf::CsrfToken;
pub use endpoint::{Body, Endpoint, Endpoints, Method, Request};
pub use http::HttpTransport;
pub use transport::{RawResponse, Transport};
pub use wire::{
	CartResponse, Envelope, FeedbackAction, FeedbackResponse, ReviewResponse, ReviewSubmission,
	SearchSuggestions, StatusResponse,
};

/// A convenient type alias for `Result` with `E` = [`enum@crate::Error`].
pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Failure classes surfaced to controllers.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
	/// Input rejected before any request was made.
	#[error("{0}")]
	Validation(String),
	/// The server answered with a login redirect, 401 or 403.
	#[error("login required")]
	AuthRequired {
		/// Where to send the user, including the return path.
		login_url: String,
	},
	/// The server answered `success: false`.
	#[error("{message}")]
	Rejected {
		/// Server-provided message, possibly empty.
		message: String,
	},
	/// Network failure before a response arrived.
	#[error("transport error: {0}")]
	Transport(String),
	/// The response body was not the expected JSON.
	#[error("invalid response: {0}")]
	Decode(String),
	/// No response within the configured timeout.
	#[error("request timed out after {0:?}")]
	Timeout(Duration),
}

/// Coarse error class, one per row of the taxonomy table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
	/// Client-detected invalid input.
	Validation,
	/// Authentication required; not a failure.
	AuthRequired,
	/// Server-side rule rejected the request.
	Business,
	/// Network, timeout or parse failure.
	Transport,
}

impl Error {
	/// Returns the error's class.
	pub fn category(&self) -> ErrorCategory {
		match self {
			Self::Validation(_) => ErrorCategory::Validation,
			Self::AuthRequired { .. } => ErrorCategory::AuthRequired,
			Self::Rejected { .. } => ErrorCategory::Business,
			Self::Transport(_) | Self::Decode(_) | Self::Timeout(_) => ErrorCategory::Transport,
		}
	}

	/// Text to show the user.
	///
	/// Server and validation messages are shown verbatim; transport failures and
	/// empty server messages fall back to `fallback`.
	pub fn user_message(&self, fallback: &str) -> String {
		match self {
			Self::Validation(message) | Self::Rejected { message } if !message.is_empty() => {
				message.clone()
			}
			_ => fallback.to_string(),
		}
	}
}
