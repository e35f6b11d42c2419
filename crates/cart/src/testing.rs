//! In-memory page and host doubles for the cart flows.

use std::collections::BTreeMap;
use std::sync::Arc;

use bricky_client::test_support::ScriptedTransport;
use bricky_client::{Endpoints, StorefrontClient};
use bricky_notify::RecordingNotifier;
use bricky_primitives::{ItemId, Money, ProductId};
use parking_lot::Mutex;

use crate::{CartHost, CartSummary, CartView, Navigator, ProductView, Prompt, ViewError};

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Event {
	Quantity(ItemId, u32),
	Busy(ItemId, bool),
	LineTotal(ItemId, Money),
	ExitStarted(ItemId),
	ExitReverted(ItemId),
	Removed(ItemId),
	Count(u32),
	Summary(CartSummary),
	TableBusy(bool),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Line {
	pub(crate) quantity: u32,
	pub(crate) total: Money,
	pub(crate) busy: bool,
	pub(crate) exiting: bool,
}

#[derive(Debug, Default)]
struct PageState {
	lines: BTreeMap<ItemId, Line>,
	subtotal: Option<Money>,
	cart_count: Option<u32>,
	summary: Option<CartSummary>,
	table_busy: bool,
	authenticated: bool,
	product_quantity: String,
	adding: bool,
	events: Vec<Event>,
}

/// Cart and product page backed by plain data.
#[derive(Debug, Default)]
pub(crate) struct FakePage {
	state: Mutex<PageState>,
}

impl FakePage {
	pub(crate) fn with_lines(lines: &[(&str, u32, i64)]) -> Self {
		let page = Self::default();
		{
			let mut state = page.state.lock();
			for &(id, quantity, total) in lines {
				state.lines.insert(
					ItemId::new(id),
					Line {
						quantity,
						total: Money::from_cents(total),
						busy: false,
						exiting: false,
					},
				);
			}
			state.authenticated = true;
			state.product_quantity = "1".into();
		}
		page
	}

	pub(crate) fn line(&self, id: &str) -> Option<Line> {
		self.state.lock().lines.get(&ItemId::new(id)).cloned()
	}

	pub(crate) fn events(&self) -> Vec<Event> {
		self.state.lock().events.clone()
	}

	pub(crate) fn cart_count(&self) -> Option<u32> {
		self.state.lock().cart_count
	}

	pub(crate) fn summary(&self) -> Option<CartSummary> {
		self.state.lock().summary
	}

	pub(crate) fn table_busy(&self) -> bool {
		self.state.lock().table_busy
	}

	pub(crate) fn set_subtotal(&self, subtotal: Option<Money>) {
		self.state.lock().subtotal = subtotal;
	}

	pub(crate) fn set_authenticated(&self, authenticated: bool) {
		self.state.lock().authenticated = authenticated;
	}

	pub(crate) fn set_product_quantity(&self, raw: &str) {
		self.state.lock().product_quantity = raw.into();
	}

	pub(crate) fn product_quantity(&self) -> String {
		self.state.lock().product_quantity.clone()
	}

	pub(crate) fn adding(&self) -> bool {
		self.state.lock().adding
	}
}

impl CartView for FakePage {
	fn quantity(&self, item: &ItemId) -> Result<u32, ViewError> {
		self.state
			.lock()
			.lines
			.get(item)
			.map(|line| line.quantity)
			.ok_or_else(|| ViewError::missing(format!("line {item}")))
	}

	fn set_quantity(&self, item: &ItemId, quantity: u32) -> Result<(), ViewError> {
		let mut state = self.state.lock();
		let line = state.lines.get_mut(item).ok_or_else(|| ViewError::missing(format!("line {item}")))?;
		line.quantity = quantity;
		state.events.push(Event::Quantity(item.clone(), quantity));
		Ok(())
	}

	fn set_line_busy(&self, item: &ItemId, busy: bool) {
		let mut state = self.state.lock();
		if let Some(line) = state.lines.get_mut(item) {
			line.busy = busy;
		}
		state.events.push(Event::Busy(item.clone(), busy));
	}

	fn set_line_total(&self, item: &ItemId, total: Money) -> Result<(), ViewError> {
		let mut state = self.state.lock();
		let line = state.lines.get_mut(item).ok_or_else(|| ViewError::missing(format!("line {item}")))?;
		line.total = total;
		state.events.push(Event::LineTotal(item.clone(), total));
		Ok(())
	}

	fn begin_exit(&self, item: &ItemId) {
		let mut state = self.state.lock();
		if let Some(line) = state.lines.get_mut(item) {
			line.exiting = true;
		}
		state.events.push(Event::ExitStarted(item.clone()));
	}

	fn revert_exit(&self, item: &ItemId) {
		let mut state = self.state.lock();
		if let Some(line) = state.lines.get_mut(item) {
			line.exiting = false;
		}
		state.events.push(Event::ExitReverted(item.clone()));
	}

	fn remove_line(&self, item: &ItemId) -> Result<(), ViewError> {
		let mut state = self.state.lock();
		state.lines.remove(item).ok_or_else(|| ViewError::missing(format!("line {item}")))?;
		state.events.push(Event::Removed(item.clone()));
		Ok(())
	}

	fn line_count(&self) -> usize {
		self.state.lock().lines.len()
	}

	fn set_cart_count(&self, count: u32) {
		let mut state = self.state.lock();
		state.cart_count = Some(count);
		state.events.push(Event::Count(count));
	}

	fn subtotal(&self) -> Result<Money, ViewError> {
		self.state.lock().subtotal.ok_or_else(|| ViewError::missing("subtotal"))
	}

	fn set_summary(&self, summary: &CartSummary) {
		let mut state = self.state.lock();
		state.summary = Some(*summary);
		state.subtotal = Some(summary.subtotal);
		state.events.push(Event::Summary(*summary));
	}

	fn set_table_busy(&self, busy: bool) {
		let mut state = self.state.lock();
		state.table_busy = busy;
		state.events.push(Event::TableBusy(busy));
	}
}

impl ProductView for FakePage {
	fn is_authenticated(&self) -> bool {
		self.state.lock().authenticated
	}

	fn quantity_input(&self, _product: &ProductId) -> Result<String, ViewError> {
		Ok(self.state.lock().product_quantity.clone())
	}

	fn reset_quantity(&self, _product: &ProductId) {
		self.state.lock().product_quantity = "1".into();
	}

	fn set_adding(&self, _product: &ProductId, adding: bool) {
		self.state.lock().adding = adding;
	}

	fn set_cart_count(&self, count: u32) {
		self.state.lock().cart_count = Some(count);
	}
}

/// Answers every prompt the same way and records the questions.
#[derive(Debug)]
pub(crate) struct FixedPrompt {
	answer: bool,
	asked: Mutex<Vec<String>>,
}

impl FixedPrompt {
	pub(crate) fn new(answer: bool) -> Self {
		Self {
			answer,
			asked: Mutex::new(Vec::new()),
		}
	}

	pub(crate) fn asked(&self) -> Vec<String> {
		self.asked.lock().clone()
	}
}

impl Prompt for FixedPrompt {
	fn confirm(&self, message: &str) -> bool {
		self.asked.lock().push(message.to_string());
		self.answer
	}
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

/// Everything a cart flow test touches.
pub(crate) struct Harness {
	pub(crate) transport: Arc<ScriptedTransport>,
	pub(crate) client: Arc<StorefrontClient<Arc<ScriptedTransport>>>,
	pub(crate) page: Arc<FakePage>,
	pub(crate) notifier: RecordingNotifier,
	pub(crate) prompt: Arc<FixedPrompt>,
	pub(crate) navigator: Arc<RecordingNavigator>,
}

impl Harness {
	pub(crate) fn new(page: FakePage) -> Self {
		Self::with_prompt(page, true)
	}

	pub(crate) fn with_prompt(page: FakePage, answer: bool) -> Self {
		let transport = Arc::new(ScriptedTransport::new());
		let client = Arc::new(
			StorefrontClient::new(transport.clone(), Endpoints::default()).with_page_path("/orders/cart/"),
		);
		Self {
			transport,
			client,
			page: Arc::new(page),
			notifier: RecordingNotifier::new(),
			prompt: Arc::new(FixedPrompt::new(answer)),
			navigator: Arc::new(RecordingNavigator::default()),
		}
	}

	pub(crate) fn host(&self) -> CartHost {
		CartHost {
			view: self.page.clone(),
			notifier: Arc::new(self.notifier.clone()),
			prompt: self.prompt.clone(),
			navigator: self.navigator.clone(),
		}
	}
}
