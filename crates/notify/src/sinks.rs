use std::sync::Arc;

use parking_lot::Mutex;

use crate::{Level, Notification, Notifier, ToastStack};

/// [`Notifier`] that pushes onto a shared [`ToastStack`], for hosts that
/// redraw on a frame clock and expire toasts with [`ToastStack::tick`].
#[derive(Debug, Clone, Default)]
pub struct SharedToasts {
	stack: Arc<Mutex<ToastStack>>,
}

impl SharedToasts {
	/// Wraps an existing stack.
	pub fn new(stack: ToastStack) -> Self {
		Self {
			stack: Arc::new(Mutex::new(stack)),
		}
	}

	/// Runs `f` with the stack locked.
	pub fn with<R>(&self, f: impl FnOnce(&mut ToastStack) -> R) -> R {
		f(&mut self.stack.lock())
	}
}

impl Notifier for SharedToasts {
	fn show(&self, message: &str, level: Level) {
		self.stack.lock().push(Notification::new(level, message));
	}
}

/// [`Notifier`] that writes notifications to the log.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingNotifier;

impl Notifier for TracingNotifier {
	fn show(&self, message: &str, level: Level) {
		match level {
			Level::Error => tracing::error!(target: "bricky::notify", "{message}"),
			Level::Warning => tracing::warn!(target: "bricky::notify", "{message}"),
			Level::Success | Level::Info => {
				tracing::info!(target: "bricky::notify", level = level.as_str(), "{message}")
			}
		}
	}
}

/// [`Notifier`] that records every notification in order.
#[derive(Debug, Clone, Default)]
pub struct RecordingNotifier {
	shown: Arc<Mutex<Vec<Notification>>>,
}

impl RecordingNotifier {
	/// Creates an empty recorder.
	pub fn new() -> Self {
		Self::default()
	}

	/// Snapshot of everything shown so far.
	pub fn shown(&self) -> Vec<Notification> {
		self.shown.lock().clone()
	}

	/// Messages shown at `level`, in order.
	pub fn messages(&self, level: Level) -> Vec<String> {
		self.shown
			.lock()
			.iter()
			.filter(|n| n.level == level)
			.map(|n| n.message.clone())
			.collect()
	}

	/// Returns the most recent notification.
	pub fn last(&self) -> Option<Notification> {
		self.shown.lock().last().cloned()
	}
}

impl Notifier for RecordingNotifier {
	fn show(&self, message: &str, level: Level) {
		self.shown.lock().push(Notification::new(level, message));
	}
}
