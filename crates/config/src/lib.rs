//! Configuration for the storefront client.
//!
//! Configuration is written in TOML. Every key is optional; anything left out
//! takes the default shown below.
//!
//! # Configuration Files
//!
//! The first of these wins:
//!
//! 1. the path passed on the command line (`--config`), which must exist
//! 2. `$XDG_CONFIG_HOME/bricky/config.toml` (or the platform equivalent)
//! 3. built-in defaults
//!
//! Afterwards `BRICKY_BASE_URL` and `BRICKY_TIMEOUT_SECS` override the file.
//!
//! ```toml
//! base_url = "https://shop.example.com"
//! login_path = "/users/login/"
//! csrf_cookie = "csrftoken"
//! shipping_fee = "10.00"
//! request_timeout_secs = 15   # 0 disables the timeout
//! stale_responses = "drop"    # or "last-wins"
//! # storage_path = "/home/jane/.local/share/bricky/storage.json"
//!
//! [endpoints]
//! update-quantity = "/orders/cart/update/"
//! ```

pub mod error;

use std::path::{Path, PathBuf};
use std::time::Duration;

use bricky_cart::{DEFAULT_SHIPPING_FEE, StalePolicy};
use bricky_client::Endpoints;
use bricky_primitives::Money;
use serde::{Deserialize, Serialize};

pub use error::{ConfigError, Result};

/// Overrides [`Config::base_url`].
pub const ENV_BASE_URL: &str = "BRICKY_BASE_URL";
/// Overrides [`Config::request_timeout_secs`].
pub const ENV_TIMEOUT_SECS: &str = "BRICKY_TIMEOUT_SECS";

/// Parsed client configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
	/// Storefront origin, without a trailing slash.
	pub base_url: String,
	/// Login page that anonymous visitors are sent to.
	pub login_path: String,
	/// Cookie carrying the CSRF token.
	pub csrf_cookie: String,
	/// Endpoint path table.
	pub endpoints: Endpoints,
	/// Flat shipping fee added to every non-empty cart summary; never negative.
	pub shipping_fee: Money,
	/// Per-request timeout in seconds; 0 waits forever.
	pub request_timeout_secs: u64,
	/// Treatment of out-of-order cart responses.
	pub stale_responses: StalePolicy,
	/// Consent preference file. `None` uses the platform data directory.
	pub storage_path: Option<PathBuf>,
}

impl Default for Config {
	fn default() -> Self {
		Self {
			base_url: "http://127.0.0.1:8000".into(),
			login_path: "/users/login/".into(),
			csrf_cookie: "csrftoken".into(),
			endpoints: Endpoints::default(),
			shipping_fee: DEFAULT_SHIPPING_FEE,
			request_timeout_secs: 15,
			stale_responses: StalePolicy::default(),
			storage_path: None,
		}
	}
}

impl Config {
	/// Parses TOML text. `origin` only labels errors.
	pub fn parse(input: &str, origin: &Path) -> Result<Self> {
		let config: Self = toml::from_str(input).map_err(|error| ConfigError::Parse {
			path: origin.to_path_buf(),
			error,
		})?;
		if config.shipping_fee < Money::ZERO {
			return Err(ConfigError::InvalidValue {
				path: origin.to_path_buf(),
				key: "shipping_fee",
				reason: format!("must not be negative, got {}", config.shipping_fee),
			});
		}
		Ok(config)
	}

	/// Loads configuration from a file.
	pub fn load(path: impl AsRef<Path>) -> Result<Self> {
		let path = path.as_ref();
		let content = std::fs::read_to_string(path).map_err(|error| ConfigError::Io {
			path: path.to_path_buf(),
			error,
		})?;
		Self::parse(&content, path)
	}

	/// `$XDG_CONFIG_HOME/bricky/config.toml`, if a config directory is known.
	pub fn default_path() -> Option<PathBuf> {
		dirs::config_dir().map(|dir| dir.join("bricky").join("config.toml"))
	}

	/// Resolves the effective configuration for this process.
	///
	/// An explicit path must exist. The default path may be missing, in which
	/// case built-in defaults apply. Environment overrides are applied last.
	pub fn discover(explicit: Option<&Path>) -> Result<Self> {
		let mut config = match explicit {
			Some(path) => Self::load(path)?,
			None => match Self::default_path().filter(|path| path.is_file()) {
				Some(path) => Self::load(path)?,
				None => {
					tracing::debug!("no config file found, using defaults");
					Self::default()
				}
			},
		};
		config.apply_env(|var| std::env::var(var).ok())?;
		Ok(config)
	}

	/// Applies `BRICKY_*` overrides read through `lookup`.
	pub fn apply_env(&mut self, lookup: impl Fn(&str) -> Option<String>) -> Result<()> {
		if let Some(url) = lookup(ENV_BASE_URL).filter(|v| !v.trim().is_empty()) {
			self.base_url = url.trim().to_string();
		}
		if let Some(raw) = lookup(ENV_TIMEOUT_SECS) {
			self.request_timeout_secs = raw.trim().parse().map_err(|_| ConfigError::InvalidEnv {
				var: ENV_TIMEOUT_SECS,
				value: raw.clone(),
			})?;
		}
		Ok(())
	}

	/// Request timeout, or `None` when disabled.
	pub fn request_timeout(&self) -> Option<Duration> {
		(self.request_timeout_secs > 0).then(|| Duration::from_secs(self.request_timeout_secs))
	}
}
