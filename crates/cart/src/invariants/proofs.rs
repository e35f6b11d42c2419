//! Proofs for the cart synchronization invariants.

use std::future::Future;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use bricky_client::test_support::ScriptedTransport;
use bricky_client::{Error, ErrorCategory};
use bricky_notify::Level;
use bricky_primitives::{ItemId, Money};
use proptest::prelude::*;
use tokio::sync::Notify;

use crate::testing::{Event, FakePage, Harness};
use crate::{CartSync, DEFAULT_SHIPPING_FEE, Outcome, StalePolicy, recompute};

fn engine(h: &Harness) -> CartSync<Arc<ScriptedTransport>> {
	CartSync::new(h.client.clone(), h.host())
}

fn block_on<F: Future>(future: F) -> F::Output {
	tokio::runtime::Builder::new_current_thread()
		.enable_time()
		.build()
		.unwrap()
		.block_on(future)
}

/// Scripts one response of the given kind.
fn push_response(transport: &ScriptedTransport, kind: u8) {
	match kind {
		0 => transport.push_json(200, r#"{"success": true, "item_total": "10.00", "cart_count": 1, "cart_total": "10.00"}"#),
		1 => transport.push_json(400, r#"{"success": false, "message": "Only 1 items available in stock"}"#),
		2 => transport.push_json(200, "not json"),
		3 => transport.push_json(500, "<h1>Server Error</h1>"),
		4 => transport.push_json(401, ""),
		_ => transport.push_error(Error::Transport("connection reset".into())),
	};
}

/// Verifies the optimistic write, busy marker, request, reconcile, release order.
#[cfg_attr(test, tokio::test)]
pub(crate) async fn test_update_side_effect_order() {
	let h = Harness::new(FakePage::with_lines(&[("12", 2, 1998)]));
	h.transport.push_json(
		200,
		r#"{"success": true, "item_total": 49.95, "cart_count": 7, "cart_total": "84.90"}"#,
	);

	engine(&h).update_quantity(&ItemId::new("12"), "5").await.unwrap();

	let item = ItemId::new("12");
	assert_eq!(
		h.page.events(),
		vec![
			Event::Quantity(item.clone(), 5),
			Event::Busy(item.clone(), true),
			Event::LineTotal(item.clone(), Money::from_cents(4995)),
			Event::Summary(recompute(Money::from_cents(8490), DEFAULT_SHIPPING_FEE)),
			Event::Count(7),
			Event::Busy(item, false),
		]
	);
	assert_eq!(h.notifier.messages(Level::Success).len(), 1);
}

proptest! {
	/// A successful update shows exactly the server's line total, summary and count.
	#[test]
	fn test_success_shows_server_figures(
		prior in 1u32..60,
		requested in 1u32..120,
		item_cents in 0i64..1_000_000,
		cart_cents in 0i64..10_000_000,
		count in 0u32..500
	) {
		prop_assume!(prior != requested);
		let h = Harness::new(FakePage::with_lines(&[("1", prior, 500)]));
		let item_total = Money::from_cents(item_cents);
		let cart_total = Money::from_cents(cart_cents);
		h.transport.push_json(200, format!(
			r#"{{"success": true, "item_total": "{}", "cart_count": {count}, "cart_total": "{}"}}"#,
			item_total.format_plain(),
			cart_total.format_plain(),
		));

		let outcome = block_on(engine(&h).set_quantity(&ItemId::new("1"), requested)).unwrap();

		prop_assert_eq!(outcome, Outcome::Applied);
		let line = h.page.line("1").unwrap();
		prop_assert_eq!((line.quantity, line.total), (requested, item_total));
		prop_assert_eq!(h.page.summary(), Some(recompute(cart_total, DEFAULT_SHIPPING_FEE)));
		prop_assert_eq!(h.page.cart_count(), Some(count));
	}

	/// Every failure kind restores the pre-request quantity.
	#[test]
	fn test_failure_restores_prior_quantity(prior in 1u32..60, requested in 1u32..120, kind in 1u8..6) {
		prop_assume!(prior != requested);
		let h = Harness::new(FakePage::with_lines(&[("1", prior, 500)]));
		push_response(&h.transport, kind);

		let outcome = block_on(engine(&h).set_quantity(&ItemId::new("1"), requested)).unwrap();

		prop_assert!(matches!(outcome, Outcome::Failed(_) | Outcome::LoginRequired));
		let line = h.page.line("1").unwrap();
		prop_assert_eq!(line.quantity, prior);
		prop_assert_eq!(line.total, Money::from_cents(500));
	}

	/// Requesting the displayed quantity is a no-op.
	#[test]
	fn test_unchanged_quantity_sends_nothing(quantity in 1u32..10_000) {
		let h = Harness::new(FakePage::with_lines(&[("1", quantity, 500)]));

		let outcome = block_on(engine(&h).update_quantity(&ItemId::new("1"), &quantity.to_string())).unwrap();

		prop_assert_eq!(outcome, Outcome::Unchanged);
		prop_assert_eq!(h.transport.request_count(), 0);
		prop_assert!(h.page.events().is_empty());
		prop_assert!(h.notifier.shown().is_empty());
	}

	/// The line is interactive again after every settle.
	#[test]
	fn test_busy_cleared_on_every_path(prior in 1u32..20, requested in 1u32..40, kind in 0u8..6) {
		prop_assume!(prior != requested);
		let h = Harness::new(FakePage::with_lines(&[("1", prior, 500)]));
		push_response(&h.transport, kind);
		let sync = engine(&h);

		block_on(sync.set_quantity(&ItemId::new("1"), requested)).unwrap();

		prop_assert!(!h.page.line("1").unwrap().busy);
		prop_assert!(!sync.is_busy(&ItemId::new("1")));
		let events = h.page.events();
		prop_assert_eq!(events.last(), Some(&Event::Busy(ItemId::new("1"), false)));
	}
}

/// Verifies that an older success arriving last does not overwrite a newer edit.
#[cfg_attr(test, tokio::test)]
pub(crate) async fn test_stale_response_is_dropped() {
	let h = Harness::new(FakePage::with_lines(&[("12", 2, 1998)]));
	let first = Arc::new(Notify::new());
	let second = Arc::new(Notify::new());
	h.transport
		.push_gated(first.clone(), 200, r#"{"success": true, "item_total": "29.97", "cart_count": 3, "cart_total": "29.97"}"#)
		.push_gated(second.clone(), 200, r#"{"success": true, "item_total": "39.96", "cart_count": 4, "cart_total": "39.96"}"#);
	let sync = engine(&h).with_stale_policy(StalePolicy::DropStale);
	let item = ItemId::new("12");

	let release = async {
		second.notify_one();
		while h.page.cart_count() != Some(4) {
			tokio::task::yield_now().await;
		}
		assert!(h.page.line("12").unwrap().busy, "line stays busy while the older request is pending");
		first.notify_one();
	};
	let (a, b, ()) = tokio::join!(sync.set_quantity(&item, 3), sync.set_quantity(&item, 4), release);

	assert_eq!((a.unwrap(), b.unwrap()), (Outcome::Superseded, Outcome::Applied));
	let line = h.page.line("12").unwrap();
	assert_eq!((line.quantity, line.total, line.busy), (4, Money::from_cents(3996), false));
	assert_eq!(h.page.cart_count(), Some(4));
	let releases = h.page.events().iter().filter(|e| **e == Event::Busy(item.clone(), false)).count();
	assert_eq!(releases, 1);
	assert_eq!(h.notifier.messages(Level::Success).len(), 1);
}

const ACCEPTED_THREE: &str = r#"{"success": true, "item_total": "29.97", "cart_count": 3, "cart_total": "29.97"}"#;
const REJECTED_FOUR: &str = r#"{"success": false, "message": "Only 3 items available in stock"}"#;

/// Verifies that a newest-request failure restores the last server-accepted
/// quantity together with that request's figures.
#[cfg_attr(test, tokio::test)]
pub(crate) async fn test_stale_success_advances_restore_point() {
	let h = Harness::new(FakePage::with_lines(&[("12", 2, 1998)]));
	let first = Arc::new(Notify::new());
	let second = Arc::new(Notify::new());
	h.transport
		.push_gated(first.clone(), 200, ACCEPTED_THREE)
		.push_gated(second.clone(), 400, REJECTED_FOUR);
	let sync = engine(&h);
	let item = ItemId::new("12");

	let first_done = AtomicBool::new(false);

	let older = async {
		let outcome = sync.set_quantity(&item, 3).await;
		first_done.store(true, Ordering::SeqCst);
		outcome
	};
	let release = async {
		first.notify_one();
		while !first_done.load(Ordering::SeqCst) {
			tokio::task::yield_now().await;
		}
		assert_eq!(h.page.line("12").unwrap().quantity, 4, "newer edit stays on screen while pending");
		assert_eq!(h.page.cart_count(), None);
		second.notify_one();
	};
	let (a, b, ()) = tokio::join!(older, sync.set_quantity(&item, 4), release);

	assert_eq!((a.unwrap(), b.unwrap()), (Outcome::Superseded, Outcome::Failed(ErrorCategory::Business)));
	let line = h.page.line("12").unwrap();
	assert_eq!((line.quantity, line.total, line.busy), (3, Money::from_cents(2997), false));
	assert_eq!(h.page.cart_count(), Some(3));
	assert_eq!(h.page.summary(), Some(recompute(Money::from_cents(2997), DEFAULT_SHIPPING_FEE)));
	assert_eq!(h.notifier.messages(Level::Error), vec!["Only 3 items available in stock".to_string()]);
}

/// Verifies that an older success arriving after the newest request failed
/// is shown, since the server holds that quantity.
#[cfg_attr(test, tokio::test)]
pub(crate) async fn test_late_success_after_newest_failure_is_shown() {
	let h = Harness::new(FakePage::with_lines(&[("12", 2, 1998)]));
	let first = Arc::new(Notify::new());
	let second = Arc::new(Notify::new());
	h.transport
		.push_gated(first.clone(), 200, ACCEPTED_THREE)
		.push_gated(second.clone(), 400, REJECTED_FOUR);
	let sync = engine(&h);
	let item = ItemId::new("12");

	let release = async {
		second.notify_one();
		while h.notifier.messages(Level::Error).is_empty() {
			tokio::task::yield_now().await;
		}
		let line = h.page.line("12").unwrap();
		assert_eq!((line.quantity, line.busy), (2, true), "rolled back, older request still pending");
		first.notify_one();
	};
	let (a, b, ()) = tokio::join!(sync.set_quantity(&item, 3), sync.set_quantity(&item, 4), release);

	assert_eq!((a.unwrap(), b.unwrap()), (Outcome::Applied, Outcome::Failed(ErrorCategory::Business)));
	let line = h.page.line("12").unwrap();
	assert_eq!((line.quantity, line.total, line.busy), (3, Money::from_cents(2997), false));
	assert_eq!(h.page.cart_count(), Some(3));
	assert_eq!(h.page.summary(), Some(recompute(Money::from_cents(2997), DEFAULT_SHIPPING_FEE)));
}

/// Verifies the full reload after the last line is removed.
#[cfg_attr(test, tokio::test)]
pub(crate) async fn test_emptied_cart_reloads() {
	let h = Harness::new(FakePage::with_lines(&[("12", 2, 1998)]));
	h.transport.push_json(200, r#"{"success": true, "message": "Red Brick removed from cart", "cart_count": 0, "cart_total": "0.00"}"#);

	let outcome = engine(&h).remove_from_cart(&ItemId::new("12")).await.unwrap();

	assert_eq!(outcome, Outcome::Reloaded);
	assert_eq!(h.navigator.reloads(), 1);
}

/// Verifies that declining the prompt leaves the page and server untouched.
#[cfg_attr(test, tokio::test)]
pub(crate) async fn test_view_writes_never_happen_after_declined_prompt() {
	let h = Harness::with_prompt(FakePage::with_lines(&[("12", 2, 1998)]), false);
	let sync = engine(&h);

	assert_eq!(sync.remove_from_cart(&ItemId::new("12")).await.unwrap(), Outcome::Declined);
	assert_eq!(sync.clear_cart().await.unwrap(), Outcome::Declined);

	assert!(h.page.events().is_empty());
	assert_eq!(h.transport.request_count(), 0);
	assert!(h.notifier.shown().is_empty());
}
