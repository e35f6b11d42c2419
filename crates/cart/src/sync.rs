//! Optimistic quantity updates, removal and clearing for the cart page.
//!
//! An update runs in a fixed order: capture the displayed quantity, write the
//! requested one, mark the line busy, send the request, then either reconcile
//! the line total and summary with the server's figures or restore the
//! captured quantity. The busy marker is owned by a drop guard; it is
//! released on every path out of the flow, including early returns.
//!
//! # Overlapping requests
//!
//! Nothing stops a second edit to a line while the first is in flight. Each
//! line carries a sequence number, and [`StalePolicy`] decides what happens
//! to responses that are no longer the newest for their line. Under the
//! default policy a settled line always shows a quantity the server accepted,
//! together with that request's figures.

use std::collections::HashMap;
use std::sync::Arc;

use bricky_client::{CartResponse, Envelope, Error, StorefrontClient, Transport};
use bricky_primitives::{ItemId, Money, QuantityInput};
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};

use crate::view::CartView;
use crate::{CartHost, DEFAULT_SHIPPING_FEE, Outcome, Result, recompute};

const UPDATED: &str = "Cart updated successfully";
const UPDATE_FAILED: &str = "Error updating quantity";
const REMOVED: &str = "Item removed from cart";
const REMOVE_FAILED: &str = "Error removing item from cart";
const CLEARED: &str = "Cart cleared successfully";
const CLEAR_FAILED: &str = "Error clearing cart";
pub(crate) const LOGIN_REQUIRED: &str = "Please log in to continue";
pub(crate) const CONFIRM_REMOVE: &str = "Are you sure you want to remove this item from your cart?";
pub(crate) const CONFIRM_CLEAR: &str =
	"Are you sure you want to clear your entire cart? This action cannot be undone.";

/// Treatment of responses that arrive after a newer request for the same line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum StalePolicy {
	/// Only the newest request's response touches the view. An older success
	/// is held back and shown if the newest request fails, or shown at once
	/// if the newest request has already failed. Older failures are ignored.
	#[default]
	#[serde(rename = "drop")]
	DropStale,
	/// Every response is applied in arrival order, and each failure restores
	/// the quantity its own request started from.
	#[serde(rename = "last-wins")]
	LastResponseWins,
}

#[derive(Debug, Clone, Copy)]
struct Ticket {
	seq: u64,
	restore: u32,
}

/// A stale success kept until the newest request on its line settles.
#[derive(Debug)]
struct Accepted {
	seq: u64,
	quantity: u32,
	response: CartResponse,
}

/// What a successful response may do to the view.
#[derive(Debug, PartialEq, Eq)]
enum Settle {
	Ignore,
	/// Write the response figures, and the quantity when given.
	Apply { quantity: Option<u32> },
}

/// What a failed response restores.
#[derive(Debug)]
struct Restore {
	quantity: u32,
	/// Figures of an earlier success that the server still holds.
	accepted: Option<CartResponse>,
}

#[derive(Debug)]
struct LineState {
	latest: u64,
	in_flight: usize,
	/// Quantity the newest request falls back to on failure.
	restore: u32,
	accepted: Option<Accepted>,
	/// Request whose server figures the line shows; 0 before any.
	shown: u64,
	latest_settled: bool,
	/// The line left the page; responses no longer touch it.
	retired: bool,
}

impl LineState {
	fn newest_accepted(&self) -> u64 {
		self.accepted.as_ref().map_or(self.shown, |a| a.seq.max(self.shown))
	}
}

/// Per-line request bookkeeping. Entries exist only while requests are in flight.
#[derive(Debug, Default)]
struct Lines(HashMap<ItemId, LineState>);

impl Lines {
	fn begin(&mut self, item: &ItemId, displayed: u32, policy: StalePolicy) -> Ticket {
		let state = self.0.entry(item.clone()).or_insert(LineState {
			latest: 0,
			in_flight: 0,
			restore: displayed,
			accepted: None,
			shown: 0,
			latest_settled: true,
			retired: false,
		});
		if state.latest_settled {
			state.restore = displayed;
		}
		state.latest += 1;
		state.in_flight += 1;
		state.latest_settled = false;
		let restore = match policy {
			StalePolicy::DropStale => state.restore,
			StalePolicy::LastResponseWins => displayed,
		};
		Ticket {
			seq: state.latest,
			restore,
		}
	}

	/// Records a successful response for `quantity`.
	fn confirm(
		&mut self,
		item: &ItemId,
		seq: u64,
		quantity: u32,
		response: &CartResponse,
		policy: StalePolicy,
	) -> Settle {
		let Some(state) = self.0.get_mut(item).filter(|state| !state.retired) else {
			return Settle::Ignore;
		};
		match policy {
			StalePolicy::LastResponseWins => Settle::Apply { quantity: None },
			StalePolicy::DropStale if seq == state.latest => {
				state.restore = quantity;
				state.shown = seq;
				state.accepted = None;
				state.latest_settled = true;
				Settle::Apply { quantity: None }
			}
			StalePolicy::DropStale if seq <= state.newest_accepted() => Settle::Ignore,
			// The newest request already failed, so this is the server's state.
			StalePolicy::DropStale if state.latest_settled => {
				state.restore = quantity;
				state.shown = seq;
				Settle::Apply { quantity: Some(quantity) }
			}
			StalePolicy::DropStale => {
				state.restore = quantity;
				state.accepted = Some(Accepted {
					seq,
					quantity,
					response: response.clone(),
				});
				Settle::Ignore
			}
		}
	}

	/// Records a failed response; returns what to restore, if anything.
	fn fail(&mut self, item: &ItemId, ticket: Ticket, policy: StalePolicy) -> Option<Restore> {
		let state = self.0.get_mut(item).filter(|state| !state.retired)?;
		match policy {
			StalePolicy::LastResponseWins => Some(Restore {
				quantity: ticket.restore,
				accepted: None,
			}),
			StalePolicy::DropStale if ticket.seq == state.latest => {
				state.latest_settled = true;
				let accepted = state.accepted.take().map(|accepted| {
					state.shown = accepted.seq;
					state.restore = accepted.quantity;
					accepted.response
				});
				Some(Restore {
					quantity: state.restore,
					accepted,
				})
			}
			StalePolicy::DropStale => None,
		}
	}

	/// Stops responses still in flight for `item` from touching the view.
	fn retire(&mut self, item: &ItemId) {
		if let Some(state) = self.0.get_mut(item) {
			state.retired = true;
		}
	}

	fn retire_all(&mut self) {
		for state in self.0.values_mut() {
			state.retired = true;
		}
	}

	/// Releases one in-flight request; returns true once the line is idle.
	fn finish(&mut self, item: &ItemId) -> bool {
		let Some(state) = self.0.get_mut(item) else {
			return true;
		};
		state.in_flight = state.in_flight.saturating_sub(1);
		if state.in_flight == 0 {
			self.0.remove(item);
			true
		} else {
			false
		}
	}

	fn in_flight(&self, item: &ItemId) -> usize {
		self.0.get(item).map_or(0, |state| state.in_flight)
	}
}

/// Clears a line's busy marker when the last request on it settles.
struct BusyGuard<'a> {
	lines: &'a Mutex<Lines>,
	view: &'a dyn CartView,
	item: &'a ItemId,
}

impl Drop for BusyGuard<'_> {
	fn drop(&mut self) {
		let idle = self.lines.lock().finish(self.item);
		if idle {
			self.view.set_line_busy(self.item, false);
		}
	}
}

enum Notice {
	Success(String),
	Error(String),
	Login(String),
}

/// Cart page controller.
pub struct CartSync<T> {
	client: Arc<StorefrontClient<T>>,
	host: CartHost,
	shipping_fee: Money,
	stale: StalePolicy,
	lines: Mutex<Lines>,
}

impl<T: Transport> CartSync<T> {
	pub fn new(client: Arc<StorefrontClient<T>>, host: CartHost) -> Self {
		Self {
			client,
			host,
			shipping_fee: DEFAULT_SHIPPING_FEE,
			stale: StalePolicy::default(),
			lines: Mutex::new(Lines::default()),
		}
	}

	pub fn with_shipping_fee(mut self, fee: Money) -> Self {
		self.shipping_fee = fee;
		self
	}

	pub fn with_stale_policy(mut self, policy: StalePolicy) -> Self {
		self.stale = policy;
		self
	}

	/// Returns true while any request for `item` is in flight.
	pub fn is_busy(&self, item: &ItemId) -> bool {
		self.lines.lock().in_flight(item) > 0
	}

	/// Applies raw quantity input to a line.
	///
	/// Input that does not read as a quantity of at least 1 is a removal
	/// request and goes through [`Self::remove_from_cart`], confirmation
	/// included.
	pub async fn update_quantity(&self, item: &ItemId, raw: &str) -> Result<Outcome> {
		match QuantityInput::parse(raw) {
			QuantityInput::Set(quantity) => self.set_quantity(item, quantity).await,
			QuantityInput::Remove => self.remove_from_cart(item).await,
		}
	}

	/// Steps a line's quantity by `delta` (the +/- buttons). Stepping below 1
	/// is a removal request.
	pub async fn nudge(&self, item: &ItemId, delta: i64) -> Result<Outcome> {
		let current = self.host.view.quantity(item)?;
		match QuantityInput::from_signed(i64::from(current).saturating_add(delta)) {
			QuantityInput::Set(quantity) => self.set_quantity(item, quantity).await,
			QuantityInput::Remove => self.remove_from_cart(item).await,
		}
	}

	/// Sets a line to `requested` units.
	pub async fn set_quantity(&self, item: &ItemId, requested: u32) -> Result<Outcome> {
		let view = &*self.host.view;
		let current = view.quantity(item)?;
		if requested == current {
			tracing::debug!(item_id = %item, quantity = current, "quantity unchanged");
			return Ok(Outcome::Unchanged);
		}

		view.set_quantity(item, requested)?;
		let ticket = self.lines.lock().begin(item, current, self.stale);
		let busy = BusyGuard {
			lines: &self.lines,
			view,
			item,
		};
		view.set_line_busy(item, true);
		tracing::debug!(item_id = %item, seq = ticket.seq, from = current, to = requested, "updating quantity");

		let result = self.client.update_quantity(item, requested).await;
		let (outcome, notice) = match result.and_then(CartResponse::into_result) {
			Ok(response) => self.reconcile(item, requested, ticket, &response),
			Err(error) => self.roll_back(item, ticket, error),
		};
		drop(busy);
		if let Some(notice) = notice {
			self.announce(notice);
		}
		Ok(outcome)
	}

	fn reconcile(
		&self,
		item: &ItemId,
		requested: u32,
		ticket: Ticket,
		response: &CartResponse,
	) -> (Outcome, Option<Notice>) {
		let settle = self.lines.lock().confirm(item, ticket.seq, requested, response, self.stale);
		let Settle::Apply { quantity } = settle else {
			tracing::debug!(item_id = %item, seq = ticket.seq, "stale update response not shown");
			return (Outcome::Superseded, None);
		};
		if let Some(quantity) = quantity {
			tracing::debug!(item_id = %item, seq = ticket.seq, quantity, "applying late update response");
			soft(self.host.view.set_quantity(item, quantity));
		}
		self.show_figures(item, response);
		(Outcome::Applied, Some(Notice::Success(UPDATED.into())))
	}

	fn roll_back(&self, item: &ItemId, ticket: Ticket, error: Error) -> (Outcome, Option<Notice>) {
		let Some(restore) = self.lines.lock().fail(item, ticket, self.stale) else {
			tracing::debug!(item_id = %item, seq = ticket.seq, error = %error, "dropping stale update failure");
			return (Outcome::Superseded, None);
		};
		soft(self.host.view.set_quantity(item, restore.quantity));
		if let Some(accepted) = &restore.accepted {
			self.show_figures(item, accepted);
		}
		tracing::debug!(
			item_id = %item,
			seq = ticket.seq,
			restored = restore.quantity,
			accepted = restore.accepted.is_some(),
			"rolled back quantity"
		);
		match error {
			Error::AuthRequired { login_url } => (Outcome::LoginRequired, Some(Notice::Login(login_url))),
			error => (
				Outcome::Failed(error.category()),
				Some(Notice::Error(error.user_message(UPDATE_FAILED))),
			),
		}
	}

	/// Writes the line total, summary and badge from a successful update.
	fn show_figures(&self, item: &ItemId, response: &CartResponse) {
		let view = &*self.host.view;
		if let Some(total) = response.item_total {
			soft(view.set_line_total(item, total));
		}
		view.set_summary(&recompute(response, self.shipping_fee));
		if let Some(count) = response.cart_count {
			view.set_cart_count(count);
		}
	}

	/// Removes a line after confirmation.
	///
	/// Updates still in flight for the line settle normally unless the
	/// removal succeeds, after which they no longer touch the page. When the
	/// last line goes, the page reloads instead of patching the summary.
	pub async fn remove_from_cart(&self, item: &ItemId) -> Result<Outcome> {
		let view = &*self.host.view;
		view.quantity(item)?;
		if !self.host.prompt.confirm(CONFIRM_REMOVE) {
			return Ok(Outcome::Declined);
		}
		view.begin_exit(item);

		match self.client.remove_item(item).await.and_then(CartResponse::into_result) {
			Ok(response) => {
				self.lines.lock().retire(item);
				soft(view.remove_line(item));
				if let Some(count) = response.cart_count {
					view.set_cart_count(count);
				}
				view.set_summary(&recompute(&response, self.shipping_fee));
				let message = response.message.filter(|m| !m.is_empty());
				self.announce(Notice::Success(message.unwrap_or_else(|| REMOVED.into())));
				if view.line_count() == 0 {
					tracing::info!("cart emptied, reloading");
					self.host.navigator.reload();
					return Ok(Outcome::Reloaded);
				}
				Ok(Outcome::Applied)
			}
			Err(Error::AuthRequired { login_url }) => {
				view.revert_exit(item);
				self.announce(Notice::Login(login_url));
				Ok(Outcome::LoginRequired)
			}
			Err(error) => {
				view.revert_exit(item);
				self.announce(Notice::Error(error.user_message(REMOVE_FAILED)));
				Ok(Outcome::Failed(error.category()))
			}
		}
	}

	/// Empties the cart after confirmation and reloads the page.
	pub async fn clear_cart(&self) -> Result<Outcome> {
		if !self.host.prompt.confirm(CONFIRM_CLEAR) {
			return Ok(Outcome::Declined);
		}
		let view = &*self.host.view;
		view.set_table_busy(true);

		match self.client.clear_cart().await.and_then(CartResponse::into_result) {
			Ok(_) => {
				self.lines.lock().retire_all();
				self.announce(Notice::Success(CLEARED.into()));
				self.host.navigator.reload();
				Ok(Outcome::Reloaded)
			}
			Err(Error::AuthRequired { login_url }) => {
				view.set_table_busy(false);
				self.announce(Notice::Login(login_url));
				Ok(Outcome::LoginRequired)
			}
			Err(error) => {
				view.set_table_busy(false);
				self.announce(Notice::Error(error.user_message(CLEAR_FAILED)));
				Ok(Outcome::Failed(error.category()))
			}
		}
	}

	fn announce(&self, notice: Notice) {
		let notifier = &self.host.notifier;
		match notice {
			Notice::Success(message) => notifier.success(&message),
			Notice::Error(message) => notifier.error(&message),
			Notice::Login(url) => {
				notifier.info(LOGIN_REQUIRED);
				self.host.navigator.redirect(&url);
			}
		}
	}
}

fn soft(result: Result<()>) {
	if let Err(error) = result {
		tracing::warn!(%error, "view update skipped");
	}
}
