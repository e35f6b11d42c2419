//! reqwest-backed transport.

use async_trait::async_trait;
use reqwest::header::{ACCEPT, CONTENT_TYPE, COOKIE};
use reqwest::{Client, redirect};

use crate::csrf::CSRF_HEADER;
use crate::{Body, CsrfToken, Error, Method, RawResponse, Request, Result, Transport};

/// Sends requests to a storefront origin over HTTP.
///
/// Redirects are not followed: a 3xx answer to an XHR-style request means the
/// session expired, and the client turns it into a login redirect.
#[derive(Clone)]
pub struct HttpTransport {
	client: Client,
	base_url: String,
	cookies: Option<String>,
	csrf: Option<CsrfToken>,
}

impl HttpTransport {
	/// Creates a transport for `base_url` (scheme and host, no trailing slash needed).
	pub fn new(base_url: impl Into<String>) -> Result<Self> {
		let client = Client::builder()
			.redirect(redirect::Policy::none())
			.build()
			.map_err(|e| Error::Transport(e.to_string()))?;
		Ok(Self {
			client,
			base_url: base_url.into().trim_end_matches('/').to_string(),
			cookies: None,
			csrf: None,
		})
	}

	/// Sends `header` as the `Cookie` header and reads the CSRF token from the
	/// cookie named `csrf_cookie`.
	pub fn with_cookies(mut self, header: impl Into<String>, csrf_cookie: &str) -> Self {
		let header = header.into();
		self.csrf = CsrfToken::from_cookie_header(&header, csrf_cookie).or(self.csrf);
		self.cookies = Some(header);
		self
	}

	/// Overrides the CSRF token, e.g. with one scraped from a form field.
	pub fn with_csrf(mut self, token: CsrfToken) -> Self {
		self.csrf = Some(token);
		self
	}

	/// Origin requests are sent to.
	pub fn base_url(&self) -> &str {
		&self.base_url
	}

	fn url(&self, request: &Request) -> String {
		let mut url = format!("{}{}", self.base_url, request.path);
		if !request.query.is_empty() {
			url.push('?');
			url.push_str(&encode_pairs(&request.query));
		}
		url
	}
}

fn encode_pairs(pairs: &[(String, String)]) -> String {
	pairs
		.iter()
		.map(|(k, v)| format!("{}={}", urlencoding::encode(k), urlencoding::encode(v)))
		.collect::<Vec<_>>()
		.join("&")
}

#[async_trait]
impl Transport for HttpTransport {
	async fn send(&self, request: Request) -> Result<RawResponse> {
		let url = self.url(&request);
		let mut builder = match request.method {
			Method::Get => self.client.get(&url),
			Method::Post => self.client.post(&url),
		}
		.header(ACCEPT, "application/json")
		.header("X-Requested-With", "XMLHttpRequest");

		if let Some(cookies) = &self.cookies {
			builder = builder.header(COOKIE, cookies);
		}
		if request.endpoint.is_mutating() {
			match &self.csrf {
				Some(token) => builder = builder.header(CSRF_HEADER, token.as_str()),
				None => tracing::debug!(path = %request.path, "no CSRF token available"),
			}
		}

		builder = match &request.body {
			Body::Empty => builder,
			Body::Form(fields) => builder
				.header(CONTENT_TYPE, "application/x-www-form-urlencoded")
				.body(encode_pairs(fields)),
			Body::Json(value) => builder.json(value),
		};

		let response = builder.send().await.map_err(|e| Error::Transport(e.to_string()))?;
		let status = response.status().as_u16();
		let body = response.text().await.map_err(|e| Error::Transport(e.to_string()))?;

		Ok(RawResponse {
			status,
			redirected: false,
			body,
		})
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::Endpoint;

	#[test]
	fn test_url_encodes_query() {
		let transport = HttpTransport::new("https://shop.example/").unwrap();
		let request = Request {
			endpoint: Endpoint::Autocomplete,
			method: Method::Get,
			path: "/api/search/".into(),
			query: vec![("q".into(), "red brick".into()), ("type".into(), "autocomplete".into())],
			body: Body::Empty,
		};
		assert_eq!(transport.url(&request), "https://shop.example/api/search/?q=red%20brick&type=autocomplete");
	}

	#[test]
	fn test_cookies_supply_csrf() {
		let transport = HttpTransport::new("http://localhost:8000")
			.unwrap()
			.with_cookies("sessionid=1; csrftoken=abc", "csrftoken");
		assert_eq!(transport.csrf.as_ref().map(CsrfToken::as_str), Some("abc"));
	}
}
