//! Auto-dismissing toast stack.

use std::time::Duration;

use crate::{AutoDismiss, Notification};

/// A notification that has been pushed onto a [`ToastStack`].
#[derive(Debug, Clone)]
pub struct Toast {
	/// Stack-assigned identifier, unique for the stack's lifetime.
	pub id: u64,
	/// Displayed notification.
	pub notification: Notification,
	/// Time since the toast was pushed.
	elapsed: Duration,
}

impl Toast {
	/// Returns true once the dismissal timer has run out.
	pub fn is_expired(&self) -> bool {
		match self.notification.auto_dismiss {
			AutoDismiss::Never => false,
			AutoDismiss::After(ttl) => self.elapsed >= ttl,
		}
	}

	/// Time left before dismissal, `None` for sticky toasts.
	pub fn remaining(&self) -> Option<Duration> {
		match self.notification.auto_dismiss {
			AutoDismiss::Never => None,
			AutoDismiss::After(ttl) => Some(ttl.saturating_sub(self.elapsed)),
		}
	}
}

/// Ordered stack of visible toasts.
///
/// Toasts are kept in creation order. Identical messages are never merged.
#[derive(Debug, Default)]
pub struct ToastStack {
	toasts: Vec<Toast>,
	next_id: u64,
	/// Maximum number of visible toasts (None = unlimited). Oldest are dropped first.
	max_visible: Option<usize>,
}

impl ToastStack {
	/// Creates an empty, unbounded stack.
	pub fn new() -> Self {
		Self::default()
	}

	/// Sets the maximum number of visible toasts.
	#[must_use]
	pub fn max_visible(mut self, max: Option<usize>) -> Self {
		self.max_visible = max;
		self
	}

	/// Adds a toast and returns its ID.
	pub fn push(&mut self, notification: Notification) -> u64 {
		let id = self.next_id;
		self.next_id = self.next_id.wrapping_add(1);

		if let Some(max) = self.max_visible {
			let overflow = (self.toasts.len() + 1).saturating_sub(max.max(1));
			self.toasts.drain(..overflow.min(self.toasts.len()));
		}

		self.toasts.push(Toast {
			id,
			notification,
			elapsed: Duration::ZERO,
		});
		id
	}

	/// Removes a toast by ID. Returns true if it existed.
	pub fn dismiss(&mut self, id: u64) -> bool {
		let before = self.toasts.len();
		self.toasts.retain(|t| t.id != id);
		self.toasts.len() != before
	}

	/// Advances every dismissal timer and drops expired toasts.
	pub fn tick(&mut self, delta: Duration) {
		for toast in &mut self.toasts {
			toast.elapsed = toast.elapsed.saturating_add(delta);
		}
		self.toasts.retain(|t| !t.is_expired());
	}

	/// Visible toasts, oldest first.
	pub fn visible(&self) -> &[Toast] {
		&self.toasts
	}

	/// Clears all toasts.
	pub fn clear(&mut self) {
		self.toasts.clear();
	}

	/// Returns the number of visible toasts.
	pub fn len(&self) -> usize {
		self.toasts.len()
	}

	/// Returns true if there are no toasts.
	pub fn is_empty(&self) -> bool {
		self.toasts.is_empty()
	}
}
