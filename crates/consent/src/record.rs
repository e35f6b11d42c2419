use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::ConsentPreferences;

/// Storage key of the versioned record.
pub const CONSENT_RECORD_KEY: &str = "consent_record";

/// Current record schema version.
pub const RECORD_VERSION: u32 = 1;

/// Versioned snapshot of the consent flags, written alongside the plain keys.
///
/// The plain keys remain what startup reads; the record adds a schema version
/// and a timestamp for auditing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConsentRecord {
	pub version: u32,
	pub analytics: bool,
	pub marketing: bool,
	pub preference: bool,
	pub updated_at: DateTime<Utc>,
}

impl ConsentRecord {
	pub fn new(prefs: ConsentPreferences, updated_at: DateTime<Utc>) -> Self {
		Self {
			version: RECORD_VERSION,
			analytics: prefs.analytics,
			marketing: prefs.marketing,
			preference: prefs.preference,
			updated_at,
		}
	}

	pub fn preferences(&self) -> ConsentPreferences {
		ConsentPreferences {
			analytics: self.analytics,
			marketing: self.marketing,
			preference: self.preference,
		}
	}
}
