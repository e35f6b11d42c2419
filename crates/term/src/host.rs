//! Terminal stand-ins for the page elements the controllers drive.
//!
//! A terminal has no page, so each view holds the handful of values the
//! command line seeded it with and prints every change the controllers make.

use std::collections::BTreeMap;
use std::io::{BufRead, Write};

use bricky_cart::{CartSummary, CartView, Navigator, ProductView, Prompt, ViewError};
use bricky_consent::{ConsentCategory, ConsentPreferences, ConsentToggles, Dialog};
use bricky_notify::{Level, Notifier, TracingNotifier};
use bricky_primitives::{ItemId, Money, ProductId};
use bricky_storefront::{NewsletterForm, Section, SuggestionKind, SuggestionView, category_url};
use parking_lot::Mutex;

/// Prints notifications and mirrors them to the log.
pub(crate) struct TermNotifier;

impl Notifier for TermNotifier {
	fn show(&self, message: &str, level: Level) {
		TracingNotifier.show(message, level);
		println!("{:>7}: {message}", level.as_str());
	}
}

/// Confirms on stdin, or answers yes to everything.
pub(crate) struct TermPrompt {
	pub(crate) assume_yes: bool,
}

impl Prompt for TermPrompt {
	fn confirm(&self, message: &str) -> bool {
		if self.assume_yes {
			println!("{message} [y/N] y");
			return true;
		}
		print!("{message} [y/N] ");
		if std::io::stdout().flush().is_err() {
			return false;
		}
		let mut answer = String::new();
		match std::io::stdin().lock().read_line(&mut answer) {
			Ok(_) => is_yes(&answer),
			Err(error) => {
				tracing::warn!(%error, "could not read confirmation");
				false
			}
		}
	}
}

fn is_yes(answer: &str) -> bool {
	matches!(answer.trim().to_ascii_lowercase().as_str(), "y" | "yes")
}

/// Prints where the browser would have gone.
pub(crate) struct TermNavigator;

impl Navigator for TermNavigator {
	fn redirect(&self, url: &str) {
		println!("-> {url}");
	}

	fn reload(&self) {
		println!("-> reload");
	}
}

pub(crate) struct TermDialog;

impl Dialog for TermDialog {
	fn alert(&self, message: &str) {
		println!("{message}");
	}
}

/// Consent switches held in memory for one invocation.
#[derive(Default)]
pub(crate) struct TermToggles {
	state: Mutex<ConsentPreferences>,
}

impl TermToggles {
	pub(crate) fn current(&self) -> ConsentPreferences {
		*self.state.lock()
	}
}

impl ConsentToggles for TermToggles {
	fn is_active(&self, category: ConsentCategory) -> bool {
		self.state.lock().get(category)
	}

	fn set_active(&self, category: ConsentCategory, active: bool) {
		self.state.lock().set(category, active);
	}
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct TermLine {
	quantity: u32,
	total: Money,
}

#[derive(Debug, Default)]
struct CartState {
	lines: BTreeMap<ItemId, TermLine>,
	others: usize,
	subtotal: Option<Money>,
	authenticated: bool,
	product_quantity: String,
}

/// Cart table, summary and product quantity box.
#[derive(Debug, Default)]
pub(crate) struct TermCart {
	state: Mutex<CartState>,
}

impl TermCart {
	/// A cart showing `item` plus `others` lines the terminal knows nothing about.
	pub(crate) fn with_line(item: ItemId, quantity: u32, total: Money, others: usize) -> Self {
		let cart = Self::default();
		{
			let mut state = cart.state.lock();
			state.lines.insert(item, TermLine { quantity, total });
			state.others = others;
		}
		cart
	}

	pub(crate) fn with_subtotal(self, subtotal: Money) -> Self {
		self.state.lock().subtotal = Some(subtotal);
		self
	}

	pub(crate) fn for_product(authenticated: bool, quantity: &str) -> Self {
		let cart = Self::default();
		{
			let mut state = cart.state.lock();
			state.authenticated = authenticated;
			state.product_quantity = quantity.to_string();
		}
		cart
	}

	pub(crate) fn quantity_of(&self, item: &ItemId) -> Option<u32> {
		self.state.lock().lines.get(item).map(|line| line.quantity)
	}

	fn with_line_mut<R>(&self, item: &ItemId, f: impl FnOnce(&mut TermLine) -> R) -> Result<R, ViewError> {
		let mut state = self.state.lock();
		let line = state
			.lines
			.get_mut(item)
			.ok_or_else(|| ViewError::missing(format!("cart line {item}")))?;
		Ok(f(line))
	}
}

impl CartView for TermCart {
	fn quantity(&self, item: &ItemId) -> Result<u32, ViewError> {
		self.with_line_mut(item, |line| line.quantity)
	}

	fn set_quantity(&self, item: &ItemId, quantity: u32) -> Result<(), ViewError> {
		self.with_line_mut(item, |line| line.quantity = quantity)?;
		println!("  item {item}: quantity {quantity}");
		Ok(())
	}

	fn set_line_busy(&self, item: &ItemId, busy: bool) {
		tracing::debug!(item_id = %item, busy, "line busy");
	}

	fn set_line_total(&self, item: &ItemId, total: Money) -> Result<(), ViewError> {
		self.with_line_mut(item, |line| line.total = total)?;
		println!("  item {item}: total {total}");
		Ok(())
	}

	fn begin_exit(&self, item: &ItemId) {
		tracing::debug!(item_id = %item, "line leaving");
	}

	fn revert_exit(&self, item: &ItemId) {
		tracing::debug!(item_id = %item, "line restored");
	}

	fn remove_line(&self, item: &ItemId) -> Result<(), ViewError> {
		self.state
			.lock()
			.lines
			.remove(item)
			.ok_or_else(|| ViewError::missing(format!("cart line {item}")))?;
		println!("  item {item}: removed");
		Ok(())
	}

	fn line_count(&self) -> usize {
		let state = self.state.lock();
		state.lines.len() + state.others
	}

	fn set_cart_count(&self, count: u32) {
		println!("  cart: {count} item(s)");
	}

	fn subtotal(&self) -> Result<Money, ViewError> {
		self.state.lock().subtotal.ok_or_else(|| ViewError::missing("cart subtotal"))
	}

	fn set_summary(&self, summary: &CartSummary) {
		self.state.lock().subtotal = Some(summary.subtotal);
		let [subtotal, shipping, total] = summary.display();
		println!("  subtotal {subtotal}  shipping {shipping}  total {total}");
	}

	fn set_table_busy(&self, busy: bool) {
		tracing::debug!(busy, "cart table busy");
	}
}

impl ProductView for TermCart {
	fn is_authenticated(&self) -> bool {
		self.state.lock().authenticated
	}

	fn quantity_input(&self, _product: &ProductId) -> Result<String, ViewError> {
		Ok(self.state.lock().product_quantity.clone())
	}

	fn reset_quantity(&self, _product: &ProductId) {
		self.state.lock().product_quantity = "1".into();
	}

	fn set_adding(&self, product: &ProductId, adding: bool) {
		tracing::debug!(product_id = %product, adding, "add button");
	}

	fn set_cart_count(&self, count: u32) {
		println!("  cart: {count} item(s)");
	}
}

/// Newsletter form fed from the command line.
pub(crate) struct TermNewsletterForm {
	pub(crate) email: String,
}

impl NewsletterForm for TermNewsletterForm {
	fn email(&self) -> String {
		self.email.clone()
	}

	fn set_submitting(&self, submitting: bool) {
		if submitting {
			println!("Subscribing...");
		}
	}

	fn clear_email(&self, placeholder: &str) {
		println!("{placeholder}");
	}

	fn show_message(&self, level: Level, text: &str) {
		println!("{:>7}: {text}", level.as_str());
	}

	fn clear_message(&self) {}
}

/// Prints the suggestion dropdown.
pub(crate) struct TermSuggestions;

impl SuggestionView for TermSuggestions {
	fn show_suggestions(&self, sections: &[Section]) {
		for section in sections {
			println!("{}", section.kind.title());
			for item in &section.items {
				match section.kind {
					SuggestionKind::Category => println!("  {item}  ({})", category_url(item)),
					SuggestionKind::Product => println!("  {item}"),
				}
			}
		}
	}

	fn clear_suggestions(&self) {}

	fn set_query(&self, text: &str) {
		println!("search: {text}");
	}

	fn submit_search(&self) {}
}
