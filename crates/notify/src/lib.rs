//! Notification presenter.
//!
//! Controllers report outcomes through the [`Notifier`] trait and never wait on
//! it. Hosts decide how a notification is shown:
//!
//! - [`ToastStack`] and [`SharedToasts`] are for frame-rendering hosts. The
//!   host pushes through [`SharedToasts`], calls [`ToastStack::tick`] once per
//!   frame and draws [`ToastStack::visible`]. Line-oriented hosts such as the
//!   `bricky` binary have no frames to tick and print each notification as it
//!   arrives instead.
//! - [`TracingNotifier`] forwards to the log.
//!
//! Notifications are not deduplicated. Two identical messages produce two
//! toasts, stacked in arrival order.

use std::sync::Arc;
use std::time::Duration;

mod sinks;
mod stack;

pub use sinks::{RecordingNotifier, SharedToasts, TracingNotifier};
pub use stack::{Toast, ToastStack};

/// Severity level for notifications.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Level {
	/// Operation succeeded.
	Success,
	/// Operation failed.
	Error,
	/// Input was rejected or a limit was hit.
	Warning,
	/// Informational message (default).
	#[default]
	Info,
}

impl Level {
	/// Stable lowercase name, used as a style key by hosts.
	pub const fn as_str(self) -> &'static str {
		match self {
			Self::Success => "success",
			Self::Error => "error",
			Self::Warning => "warning",
			Self::Info => "info",
		}
	}
}

/// Controls automatic dismissal of notifications.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AutoDismiss {
	/// Notification remains visible until manually dismissed.
	Never,
	/// Notification automatically dismisses after the given duration.
	After(Duration),
}

impl AutoDismiss {
	/// Default auto-dismiss duration (3 seconds).
	pub const DEFAULT: Self = Self::After(Duration::from_secs(3));
}

impl Default for AutoDismiss {
	fn default() -> Self {
		Self::DEFAULT
	}
}

/// A notification ready to display.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
	/// Severity level.
	pub level: Level,
	/// Message text, shown verbatim.
	pub message: String,
	/// Auto-dismiss behavior.
	pub auto_dismiss: AutoDismiss,
}

impl Notification {
	/// Creates a notification with the default dismissal timer.
	pub fn new(level: Level, message: impl Into<String>) -> Self {
		Self {
			level,
			message: message.into(),
			auto_dismiss: AutoDismiss::DEFAULT,
		}
	}

	/// Overrides the dismissal behavior.
	#[must_use]
	pub fn auto_dismiss(mut self, auto_dismiss: AutoDismiss) -> Self {
		self.auto_dismiss = auto_dismiss;
		self
	}
}

/// Fire-and-forget sink for user-visible status messages.
pub trait Notifier: Send + Sync {
	/// Shows `message` at `level`.
	fn show(&self, message: &str, level: Level);

	/// Shows a success message.
	fn success(&self, message: &str) {
		self.show(message, Level::Success);
	}

	/// Shows an error message.
	fn error(&self, message: &str) {
		self.show(message, Level::Error);
	}

	/// Shows a warning message.
	fn warning(&self, message: &str) {
		self.show(message, Level::Warning);
	}

	/// Shows an informational message.
	fn info(&self, message: &str) {
		self.show(message, Level::Info);
	}
}

impl<N: Notifier + ?Sized> Notifier for Arc<N> {
	fn show(&self, message: &str, level: Level) {
		(**self).show(message, level);
	}
}

impl<N: Notifier + ?Sized> Notifier for &N {
	fn show(&self, message: &str, level: Level) {
		(**self).show(message, level);
	}
}
