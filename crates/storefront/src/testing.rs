//! Page doubles shared by the controller tests.

use std::collections::BTreeMap;
use std::sync::Arc;

use bricky_cart::Navigator;
use bricky_client::test_support::ScriptedTransport;
use bricky_client::{Endpoints, FeedbackAction, StorefrontClient};
use bricky_notify::{Level, RecordingNotifier};
use bricky_primitives::ReviewId;
use parking_lot::Mutex;

use crate::{NewsletterForm, ReviewView, Section, SuggestionView};

pub(crate) type TestClient = Arc<StorefrontClient<Arc<ScriptedTransport>>>;

pub(crate) fn client(transport: &Arc<ScriptedTransport>) -> TestClient {
	Arc::new(StorefrontClient::new(transport.clone(), Endpoints::default()).with_page_path("/products/7/"))
}

#[derive(Debug, Default)]
pub(crate) struct RecordingNavigator {
	redirects: Mutex<Vec<String>>,
	reloads: Mutex<usize>,
}

impl RecordingNavigator {
	pub(crate) fn redirects(&self) -> Vec<String> {
		self.redirects.lock().clone()
	}

	pub(crate) fn reloads(&self) -> usize {
		*self.reloads.lock()
	}
}

impl Navigator for RecordingNavigator {
	fn redirect(&self, url: &str) {
		self.redirects.lock().push(url.to_string());
	}

	fn reload(&self) {
		*self.reloads.lock() += 1;
	}
}

#[derive(Debug, Default)]
struct FormState {
	email: String,
	placeholder: String,
	submitting: bool,
	submit_history: Vec<bool>,
	message: Option<(Level, String)>,
}

/// Newsletter form backed by plain data.
#[derive(Debug, Default)]
pub(crate) struct FakeForm {
	state: Mutex<FormState>,
}

impl FakeForm {
	pub(crate) fn with_email(email: &str) -> Arc<Self> {
		let form = Self::default();
		form.state.lock().email = email.to_string();
		Arc::new(form)
	}

	pub(crate) fn email_value(&self) -> String {
		self.state.lock().email.clone()
	}

	pub(crate) fn placeholder(&self) -> String {
		self.state.lock().placeholder.clone()
	}

	pub(crate) fn submitting(&self) -> bool {
		self.state.lock().submitting
	}

	pub(crate) fn submit_history(&self) -> Vec<bool> {
		self.state.lock().submit_history.clone()
	}

	pub(crate) fn message(&self) -> Option<(Level, String)> {
		self.state.lock().message.clone()
	}
}

impl NewsletterForm for FakeForm {
	fn email(&self) -> String {
		self.state.lock().email.clone()
	}

	fn set_submitting(&self, submitting: bool) {
		let mut state = self.state.lock();
		state.submitting = submitting;
		state.submit_history.push(submitting);
	}

	fn clear_email(&self, placeholder: &str) {
		let mut state = self.state.lock();
		state.email.clear();
		state.placeholder = placeholder.to_string();
	}

	fn show_message(&self, level: Level, text: &str) {
		self.state.lock().message = Some((level, text.to_string()));
	}

	fn clear_message(&self) {
		self.state.lock().message = None;
	}
}

#[derive(Debug, Default)]
struct ReviewState {
	stars: Vec<u8>,
	field_errors: BTreeMap<String, Vec<String>>,
	resets: usize,
	counts: BTreeMap<(ReviewId, &'static str), u64>,
	disabled: Vec<(ReviewId, &'static str)>,
}

/// Review widget backed by plain data.
#[derive(Debug, Default)]
pub(crate) struct FakeReviews {
	state: Mutex<ReviewState>,
}

impl FakeReviews {
	/// Every star count rendered so far.
	pub(crate) fn stars(&self) -> Vec<u8> {
		self.state.lock().stars.clone()
	}

	pub(crate) fn field_errors(&self) -> BTreeMap<String, Vec<String>> {
		self.state.lock().field_errors.clone()
	}

	pub(crate) fn resets(&self) -> usize {
		self.state.lock().resets
	}

	pub(crate) fn count(&self, review: ReviewId, action: FeedbackAction) -> Option<u64> {
		self.state.lock().counts.get(&(review, action.as_str())).copied()
	}

	pub(crate) fn disabled(&self) -> Vec<(ReviewId, &'static str)> {
		self.state.lock().disabled.clone()
	}
}

impl ReviewView for FakeReviews {
	fn show_stars(&self, lit: u8) {
		self.state.lock().stars.push(lit);
	}

	fn show_field_errors(&self, errors: &BTreeMap<String, Vec<String>>) {
		self.state.lock().field_errors = errors.clone();
	}

	fn reset_form(&self) {
		self.state.lock().resets += 1;
	}

	fn set_feedback_count(&self, review: ReviewId, action: FeedbackAction, count: u64) {
		self.state.lock().counts.insert((review, action.as_str()), count);
	}

	fn disable_feedback(&self, review: ReviewId, action: FeedbackAction) {
		self.state.lock().disabled.push((review, action.as_str()));
	}
}

#[derive(Debug, Default)]
struct SearchState {
	shown: Option<Vec<Section>>,
	query: String,
	submits: usize,
}

/// Search box and dropdown backed by plain data.
#[derive(Debug, Default)]
pub(crate) struct FakeSearch {
	state: Mutex<SearchState>,
}

impl FakeSearch {
	pub(crate) fn shown(&self) -> Option<Vec<Section>> {
		self.state.lock().shown.clone()
	}

	pub(crate) fn query(&self) -> String {
		self.state.lock().query.clone()
	}

	pub(crate) fn submits(&self) -> usize {
		self.state.lock().submits
	}
}

impl SuggestionView for FakeSearch {
	fn show_suggestions(&self, sections: &[Section]) {
		self.state.lock().shown = Some(sections.to_vec());
	}

	fn clear_suggestions(&self) {
		self.state.lock().shown = None;
	}

	fn set_query(&self, text: &str) {
		self.state.lock().query = text.to_string();
	}

	fn submit_search(&self) {
		self.state.lock().submits += 1;
	}
}

pub(crate) fn notifier() -> (RecordingNotifier, Arc<RecordingNotifier>) {
	let notifier = RecordingNotifier::new();
	let shared = Arc::new(notifier.clone());
	(notifier, shared)
}
