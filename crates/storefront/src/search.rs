//! Search-as-you-type suggestions.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use bricky_client::{SearchSuggestions, StorefrontClient, Transport};

use crate::{Disposer, Timers};

/// Shortest trimmed query that is sent.
pub const MIN_QUERY_CHARS: usize = 2;

const BLUR_CLOSE_DELAY: Duration = Duration::from_millis(200);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SuggestionKind {
	Category,
	Product,
}

impl SuggestionKind {
	/// Section heading.
	pub const fn title(self) -> &'static str {
		match self {
			Self::Category => "Categories",
			Self::Product => "Products",
		}
	}
}

/// One headed group in the dropdown.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Section {
	pub kind: SuggestionKind,
	pub items: Vec<String>,
}

/// Groups suggestions for display: categories first, empty groups omitted.
pub fn sections(suggestions: &SearchSuggestions) -> Vec<Section> {
	[
		(SuggestionKind::Category, &suggestions.categories),
		(SuggestionKind::Product, &suggestions.products),
	]
	.into_iter()
	.filter(|(_, items)| !items.is_empty())
	.map(|(kind, items)| Section {
		kind,
		items: items.clone(),
	})
	.collect()
}

/// Lowercase, hyphen-separated form of a category name.
///
/// Runs of whitespace and hyphens collapse to one hyphen; other punctuation is
/// dropped.
pub fn slugify(name: &str) -> String {
	let mut slug = String::with_capacity(name.len());
	let mut gap = false;
	for c in name.chars() {
		if c.is_alphanumeric() || c == '_' {
			if gap && !slug.is_empty() {
				slug.push('-');
			}
			gap = false;
			slug.extend(c.to_lowercase());
		} else if c.is_whitespace() || c == '-' {
			gap = true;
		}
	}
	slug.trim_matches('_').to_string()
}

/// Listing URL for a category suggestion.
pub fn category_url(name: &str) -> String {
	format!("/?category={}", urlencoding::encode(&slugify(name)))
}

/// The search box and its dropdown.
pub trait SuggestionView: Send + Sync {
	fn show_suggestions(&self, sections: &[Section]);
	fn clear_suggestions(&self);
	/// Replaces the search box text.
	fn set_query(&self, text: &str);
	/// Submits the search form.
	fn submit_search(&self);
}

/// What a keystroke led to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Lookup {
	/// The query was too short; the dropdown was closed.
	TooShort,
	/// The server had nothing to suggest.
	Empty,
	/// The dropdown shows this many suggestions.
	Shown(usize),
	/// A later keystroke overtook this one; its response was ignored.
	Stale,
	/// The lookup failed; the dropdown stays closed.
	Failed,
}

/// Autocomplete controller.
///
/// Each keystroke takes a ticket from a counter. Only the response holding the
/// newest ticket may touch the dropdown, so slow responses for earlier
/// prefixes are discarded.
pub struct Autocomplete<T> {
	client: Arc<StorefrontClient<T>>,
	view: Arc<dyn SuggestionView>,
	latest: AtomicU64,
	timers: Timers,
}

impl<T: Transport> Autocomplete<T> {
	pub fn setup(client: Arc<StorefrontClient<T>>, view: Arc<dyn SuggestionView>) -> (Self, Disposer) {
		let timers = Timers::new();
		let disposer = timers.disposer();
		let autocomplete = Self {
			client,
			view,
			latest: AtomicU64::new(0),
			timers,
		};
		(autocomplete, disposer)
	}

	/// Handles the search box's new contents.
	pub async fn input(&self, raw: &str) -> Lookup {
		let ticket = self.latest.fetch_add(1, Ordering::AcqRel) + 1;
		self.view.clear_suggestions();

		let query = raw.trim();
		if query.chars().count() < MIN_QUERY_CHARS {
			return Lookup::TooShort;
		}

		let result = self.client.autocomplete(query).await;
		if self.latest.load(Ordering::Acquire) != ticket {
			tracing::debug!(ticket, query, "dropping stale suggestions");
			return Lookup::Stale;
		}

		match result {
			Ok(suggestions) if suggestions.is_empty() => Lookup::Empty,
			Ok(suggestions) => {
				let sections = sections(&suggestions);
				self.view.show_suggestions(&sections);
				Lookup::Shown(sections.iter().map(|s| s.items.len()).sum())
			}
			Err(error) => {
				tracing::warn!(query, %error, "autocomplete failed");
				Lookup::Failed
			}
		}
	}

	/// Puts the chosen suggestion in the search box and submits.
	pub fn choose(&self, label: &str) {
		self.latest.fetch_add(1, Ordering::AcqRel);
		self.view.set_query(label);
		self.view.clear_suggestions();
		self.view.submit_search();
	}

	/// Closes the dropdown shortly after focus leaves, leaving time for a
	/// click on a suggestion to land first.
	pub fn blur(&self) {
		let view = self.view.clone();
		self.timers.after(BLUR_CLOSE_DELAY, move || view.clear_suggestions());
	}
}

#[cfg(test)]
mod tests;
