use std::time::Duration;

use tokio_util::sync::CancellationToken;

/// Delayed actions scoped to one page controller.
///
/// Every action scheduled through the same `Timers` shares a cancellation
/// token. Cancelling it (through [`Disposer`]) drops all pending actions.
#[derive(Debug, Clone, Default)]
pub struct Timers {
	cancel: CancellationToken,
}

impl Timers {
	pub fn new() -> Self {
		Self::default()
	}

	/// Runs `action` after `delay` unless the timers are disposed first.
	///
	/// Must be called from within a tokio runtime.
	pub fn after(&self, delay: Duration, action: impl FnOnce() + Send + 'static) {
		let cancel = self.cancel.clone();
		tokio::spawn(async move {
			tokio::select! {
				() = cancel.cancelled() => {}
				() = tokio::time::sleep(delay) => action(),
			}
		});
	}

	/// Returns true once the owning page was torn down.
	pub fn is_disposed(&self) -> bool {
		self.cancel.is_cancelled()
	}

	/// Handle that cancels every pending action when disposed or dropped.
	pub fn disposer(&self) -> Disposer {
		Disposer {
			cancel: self.cancel.clone(),
		}
	}
}

/// Tears down a page controller's pending timers.
#[must_use = "dropping the disposer cancels the controller's timers immediately"]
#[derive(Debug)]
pub struct Disposer {
	cancel: CancellationToken,
}

impl Disposer {
	/// Cancels pending actions now.
	pub fn dispose(self) {}
}

impl Drop for Disposer {
	fn drop(&mut self) {
		self.cancel.cancel();
	}
}
