//! Cookie consent preferences.
//!
//! Three independent flags, one per [`ConsentCategory`], stored as the
//! literal strings `"true"` / `"false"` under fixed keys in a
//! [`KeyValueStore`]. A missing key, or any other value, reads as `false`.
//! Every write also stores a versioned [`ConsentRecord`] next to the flags.

use std::path::PathBuf;

mod controller;
mod record;
mod store;

pub use controller::{ConsentController, ConsentToggles, Dialog};
pub use record::{CONSENT_RECORD_KEY, ConsentRecord, RECORD_VERSION};
pub use store::{FileStore, KeyValueStore, MemoryStore};

/// A convenient type alias for `Result` with `E` = [`ConsentError`].
pub type Result<T, E = ConsentError> = std::result::Result<T, E>;

/// Storage failures.
#[derive(Debug, thiserror::Error)]
pub enum ConsentError {
	#[error("failed to access {path}: {source}")]
	Io {
		path: PathBuf,
		#[source]
		source: std::io::Error,
	},
	#[error("corrupt storage file {path}: {source}")]
	Corrupt {
		path: PathBuf,
		#[source]
		source: serde_json::Error,
	},
	#[error("failed to encode consent record: {0}")]
	Encode(#[from] serde_json::Error),
}

/// Optional cookie categories. Essential cookies are not optional and not listed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ConsentCategory {
	Analytics,
	Marketing,
	Preference,
}

impl ConsentCategory {
	pub const ALL: [Self; 3] = [Self::Analytics, Self::Marketing, Self::Preference];

	/// Storage key holding the flag.
	pub const fn key(self) -> &'static str {
		match self {
			Self::Analytics => "analytics_cookies",
			Self::Marketing => "marketing_cookies",
			Self::Preference => "preference_cookies",
		}
	}

	/// Short name, as used for the toggle elements and on the command line.
	pub const fn as_str(self) -> &'static str {
		match self {
			Self::Analytics => "analytics",
			Self::Marketing => "marketing",
			Self::Preference => "preference",
		}
	}
}

impl std::str::FromStr for ConsentCategory {
	type Err = String;

	fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
		Self::ALL
			.into_iter()
			.find(|c| c.as_str().eq_ignore_ascii_case(s) || c.key() == s)
			.ok_or_else(|| format!("unknown consent category {s:?}"))
	}
}

/// One flag per category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ConsentPreferences {
	pub analytics: bool,
	pub marketing: bool,
	pub preference: bool,
}

impl ConsentPreferences {
	/// Every category set to `granted`.
	pub const fn all(granted: bool) -> Self {
		Self {
			analytics: granted,
			marketing: granted,
			preference: granted,
		}
	}

	pub const fn get(&self, category: ConsentCategory) -> bool {
		match category {
			ConsentCategory::Analytics => self.analytics,
			ConsentCategory::Marketing => self.marketing,
			ConsentCategory::Preference => self.preference,
		}
	}

	pub fn set(&mut self, category: ConsentCategory, granted: bool) {
		match category {
			ConsentCategory::Analytics => self.analytics = granted,
			ConsentCategory::Marketing => self.marketing = granted,
			ConsentCategory::Preference => self.preference = granted,
		}
	}

	/// Reads the flags from `store`; anything but `"true"` is `false`.
	pub fn load(store: &impl KeyValueStore) -> Self {
		let mut prefs = Self::default();
		for category in ConsentCategory::ALL {
			prefs.set(category, store.get(category.key()).as_deref() == Some("true"));
		}
		prefs
	}
}
