//! Consent settings page controller.

use std::sync::Arc;

use chrono::Utc;

use crate::{CONSENT_RECORD_KEY, ConsentCategory, ConsentPreferences, ConsentRecord, KeyValueStore, Result};

const ACCEPTED_ALL: &str = "All cookies accepted. Thank you!";
const REJECTED_ALL: &str = "Non-essential cookies rejected.";
const SAVED: &str = "Your cookie preferences have been saved!";

/// The three toggle switches on the settings page.
pub trait ConsentToggles: Send + Sync {
	fn is_active(&self, category: ConsentCategory) -> bool;
	fn set_active(&self, category: ConsentCategory, active: bool);
}

/// Blocking acknowledgement dialog.
pub trait Dialog: Send + Sync {
	fn alert(&self, message: &str);
}

/// Wires the toggles, the buttons and the store together.
pub struct ConsentController<S> {
	store: S,
	toggles: Arc<dyn ConsentToggles>,
	dialog: Arc<dyn Dialog>,
}

impl<S: KeyValueStore> ConsentController<S> {
	pub fn new(store: S, toggles: Arc<dyn ConsentToggles>, dialog: Arc<dyn Dialog>) -> Self {
		Self { store, toggles, dialog }
	}

	pub fn store(&self) -> &S {
		&self.store
	}

	/// Flips one toggle. Nothing is stored until [`Self::save`].
	pub fn toggle(&self, category: ConsentCategory) {
		let active = !self.toggles.is_active(category);
		self.toggles.set_active(category, active);
	}

	/// Activates every toggle, stores the grant and confirms with a dialog.
	pub fn accept_all(&mut self) -> Result<()> {
		self.apply_all(true)?;
		self.dialog.alert(ACCEPTED_ALL);
		Ok(())
	}

	/// Deactivates every toggle, stores the refusal and confirms with a dialog.
	pub fn reject_all(&mut self) -> Result<()> {
		self.apply_all(false)?;
		self.dialog.alert(REJECTED_ALL);
		Ok(())
	}

	/// Stores the toggles as currently shown.
	pub fn save(&mut self) -> Result<()> {
		let mut prefs = ConsentPreferences::default();
		for category in ConsentCategory::ALL {
			prefs.set(category, self.toggles.is_active(category));
		}
		self.persist(prefs)?;
		self.dialog.alert(SAVED);
		Ok(())
	}

	/// Activates the toggles whose stored flag is `"true"`; others are left as rendered.
	pub fn load_on_startup(&self) -> ConsentPreferences {
		let prefs = ConsentPreferences::load(&self.store);
		for category in ConsentCategory::ALL {
			if prefs.get(category) {
				self.toggles.set_active(category, true);
			}
		}
		prefs
	}

	/// Versioned record from the last write, if any and readable.
	pub fn record(&self) -> Option<ConsentRecord> {
		let raw = self.store.get(CONSENT_RECORD_KEY)?;
		serde_json::from_str(&raw)
			.inspect_err(|error| tracing::warn!(%error, "ignoring unreadable consent record"))
			.ok()
	}

	fn apply_all(&mut self, granted: bool) -> Result<()> {
		for category in ConsentCategory::ALL {
			self.toggles.set_active(category, granted);
		}
		self.persist(ConsentPreferences::all(granted))
	}

	fn persist(&mut self, prefs: ConsentPreferences) -> Result<()> {
		let record = serde_json::to_string(&ConsentRecord::new(prefs, Utc::now()))?;
		let mut entries: Vec<(&str, String)> = ConsentCategory::ALL
			.into_iter()
			.map(|category| (category.key(), prefs.get(category).to_string()))
			.collect();
		entries.push((CONSENT_RECORD_KEY, record));
		self.store.set_many(&entries)?;
		tracing::info!(
			analytics = prefs.analytics,
			marketing = prefs.marketing,
			preference = prefs.preference,
			"consent preferences stored"
		);
		Ok(())
	}
}
