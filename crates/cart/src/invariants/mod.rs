//! Invariants of the cart flows, each with the test that proves it.

pub(crate) mod catalog;

/// Stubs for rustdoc link targets.
#[cfg(doc)]
pub(crate) mod stubs {
	pub fn test_update_side_effect_order() {}
	pub fn test_success_shows_server_figures() {}
	pub fn test_failure_restores_prior_quantity() {}
	pub fn test_unchanged_quantity_sends_nothing() {}
	pub fn test_busy_cleared_on_every_path() {}
	pub fn test_stale_response_is_dropped() {}
	pub fn test_stale_success_advances_restore_point() {}
	pub fn test_late_success_after_newest_failure_is_shown() {}
	pub fn test_emptied_cart_reloads() {}
	pub fn test_view_writes_never_happen_after_declined_prompt() {}
}

#[cfg(doc)]
pub(crate) use stubs::*;

#[cfg(test)]
mod proofs;

#[cfg(test)]
#[allow(unused_imports)]
pub(crate) use proofs::*;
