//! Scripted transport for exercising controllers without a server.

use std::collections::VecDeque;
use std::sync::Arc;

use async_trait::async_trait;
use parking_lot::Mutex;
use tokio::sync::Notify;

use crate::{Error, RawResponse, Request, Result, Transport};

struct Step {
	gate: Option<Arc<Notify>>,
	result: Result<RawResponse>,
}

/// Replays queued responses in order and records every request.
///
/// A step may be gated on a [`Notify`]; its response is held back until the
/// gate is notified, which lets tests settle overlapping requests in any order.
#[derive(Default)]
pub struct ScriptedTransport {
	steps: Mutex<VecDeque<Step>>,
	requests: Mutex<Vec<Request>>,
}

impl ScriptedTransport {
	pub fn new() -> Self {
		Self::default()
	}

	/// Queues a response with the given status and body.
	pub fn push_json(&self, status: u16, body: impl Into<String>) -> &Self {
		self.push(None, Ok(RawResponse::json(status, body)))
	}

	/// Queues a transport-level failure.
	pub fn push_error(&self, error: Error) -> &Self {
		self.push(None, Err(error))
	}

	/// Queues a response released only once `gate` is notified.
	pub fn push_gated(&self, gate: Arc<Notify>, status: u16, body: impl Into<String>) -> &Self {
		self.push(Some(gate), Ok(RawResponse::json(status, body)))
	}

	/// Queues a request that never completes.
	pub fn push_hang(&self) -> &Self {
		self.push(Some(Arc::new(Notify::new())), Err(Error::Transport("unreachable".into())))
	}

	fn push(&self, gate: Option<Arc<Notify>>, result: Result<RawResponse>) -> &Self {
		self.steps.lock().push_back(Step { gate, result });
		self
	}

	/// Requests sent so far, in send order.
	pub fn requests(&self) -> Vec<Request> {
		self.requests.lock().clone()
	}

	pub fn request_count(&self) -> usize {
		self.requests.lock().len()
	}
}

#[async_trait]
impl Transport for ScriptedTransport {
	async fn send(&self, request: Request) -> Result<RawResponse> {
		self.requests.lock().push(request);
		let step = self.steps.lock().pop_front();
		let Some(step) = step else {
			return Err(Error::Transport("no scripted response".into()));
		};
		if let Some(gate) = step.gate {
			gate.notified().await;
		}
		step.result
	}
}
