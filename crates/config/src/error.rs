//! Error types for configuration loading.

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur when loading configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
	/// Error reading a configuration file.
	#[error("I/O error reading {path}: {error}")]
	Io {
		/// Path to the file that failed to read.
		path: PathBuf,
		/// The underlying I/O error.
		error: std::io::Error,
	},

	/// The file is not valid TOML or does not match the schema.
	#[error("invalid configuration in {path}: {error}")]
	Parse {
		/// Path to the offending file.
		path: PathBuf,
		/// The underlying parse error.
		error: toml::de::Error,
	},

	/// A key parsed but holds a value outside its allowed range.
	#[error("invalid value for {key} in {path}: {reason}")]
	InvalidValue {
		/// Path to the offending file.
		path: PathBuf,
		/// Offending key.
		key: &'static str,
		/// What the value must satisfy.
		reason: String,
	},

	/// An override variable holds a value of the wrong shape.
	#[error("invalid value {value:?} for {var}")]
	InvalidEnv {
		/// Variable name.
		var: &'static str,
		/// Raw value found in the environment.
		value: String,
	},
}

/// Result type for configuration operations.
pub type Result<T> = std::result::Result<T, ConfigError>;
