//! Catalog of cart synchronization invariants.

#![allow(dead_code)]

/// - Optimistic Order: a quantity update writes the requested quantity, then
///   marks the line busy, then sends the request; reconciliation writes the
///   line total, the summary and the badge before the line is released and
///   the notification is shown.
///   - Enforced in: [`crate::CartSync::set_quantity`]
///   - Tested by: [`crate::invariants::test_update_side_effect_order`]
///   - Failure symptom: the user sees the old quantity while the request is
///     pending, or a success toast over a still-dimmed line.
pub(crate) const OPTIMISTIC_ORDER: () = ();

/// - Server Figures: a successful update leaves the line total, summary and
///   badge at exactly the figures the server returned.
///   - Enforced in: `CartSync::reconcile`
///   - Tested by: [`crate::invariants::test_success_shows_server_figures`]
///   - Failure symptom: totals drift from what checkout will charge.
pub(crate) const SERVER_FIGURES: () = ();

/// - Rollback: when the newest request for a line fails for any reason, the
///   line shows the quantity it had before the edit.
///   - Enforced in: `CartSync::roll_back`
///   - Tested by: [`crate::invariants::test_failure_restores_prior_quantity`]
///   - Failure symptom: the page shows a quantity the server never accepted.
pub(crate) const ROLLBACK_ON_FAILURE: () = ();

/// - Idempotent Update: requesting the displayed quantity sends no request and
///   touches nothing.
///   - Enforced in: [`crate::CartSync::set_quantity`]
///   - Tested by: [`crate::invariants::test_unchanged_quantity_sends_nothing`]
///   - Failure symptom: redundant requests and toasts on blur or Enter.
pub(crate) const IDEMPOTENT_UPDATE: () = ();

/// - Busy Always Cleared: once every request on a line has settled, the line
///   is interactive again, whatever the outcome (success, rejection, transport
///   failure, timeout, login redirect, view error).
///   - Enforced in: `BusyGuard::drop`
///   - Tested by: [`crate::invariants::test_busy_cleared_on_every_path`]
///   - Failure symptom: a line stays dimmed and unclickable until reload.
pub(crate) const BUSY_ALWAYS_CLEARED: () = ();

/// - Stale Responses Dropped: under `StalePolicy::DropStale`, only the newest
///   request for a line may write to it while it is pending. An older success
///   is held back with its figures; if the newest request then fails, the line
///   shows that success instead of the pre-edit state. An older success that
///   arrives after the newest request failed is shown at once. Older failures
///   are ignored.
///   - Enforced in: `Lines::confirm`, `Lines::fail`
///   - Tested by: [`crate::invariants::test_stale_response_is_dropped`],
///     [`crate::invariants::test_stale_success_advances_restore_point`],
///     [`crate::invariants::test_late_success_after_newest_failure_is_shown`]
///   - Failure symptom: a slow early response overwrites the figures of a
///     later edit, or the line settles on a quantity or total the server does
///     not hold.
pub(crate) const STALE_RESPONSES_DROPPED: () = ();

/// - Empty Cart Reloads: a removal that leaves no lines reloads the page
///   instead of patching the summary.
///   - Enforced in: [`crate::CartSync::remove_from_cart`]
///   - Tested by: [`crate::invariants::test_emptied_cart_reloads`]
///   - Failure symptom: an empty cart table with a stale summary panel.
pub(crate) const EMPTY_CART_RELOADS: () = ();

/// - Retired Lines: once a removal or clear succeeds, updates still in flight
///   for the affected lines no longer touch the page. A failed removal leaves
///   them to settle normally.
///   - Enforced in: `Lines::retire`, `Lines::retire_all`
///   - Tested by: `sync::tests::test_update_after_successful_removal_is_ignored`,
///     `sync::tests::test_failed_removal_lets_pending_update_settle`
///   - Failure symptom: a late update response rewrites the summary of a cart
///     that no longer holds the line, or a line stays on its optimistic quantity.
pub(crate) const RETIRED_LINES: () = ();

/// - Confirmation Gate: removal and clearing write nothing to the page and
///   send nothing unless the user confirms.
///   - Enforced in: [`crate::CartSync::remove_from_cart`], [`crate::CartSync::clear_cart`]
///   - Tested by: [`crate::invariants::test_view_writes_never_happen_after_declined_prompt`]
///   - Failure symptom: items vanish after the user pressed Cancel.
pub(crate) const CONFIRMATION_GATE: () = ();
