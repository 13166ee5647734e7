//! In-memory transport for tests.
//!
//! Replies are served in FIFO order; every call is recorded, including the
//! ones that fail, so tests can assert both the wire arguments and that no
//! call was made at all.

use std::collections::VecDeque;
use std::sync::{Mutex, MutexGuard};

use super::{Transport, TransportError};
use crate::protocol::Value;

/// A call observed by [`MockTransport`].
#[derive(Debug, Clone, PartialEq)]
pub struct RecordedCall {
    /// Method name.
    pub method: String,
    /// Arguments exactly as handed to the transport.
    pub args: Option<Vec<Value>>,
}

/// Transport serving queued replies and recording calls.
#[derive(Debug, Default)]
pub struct MockTransport {
    replies: Mutex<VecDeque<Result<Value, TransportError>>>,
    calls: Mutex<Vec<RecordedCall>>,
}

impl MockTransport {
    /// Create a mock with no queued replies.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a mock answering the first call with `reply`.
    pub fn with_reply(reply: impl Into<Value>) -> Self {
        let mock = Self::new();
        mock.push_reply(reply);
        mock
    }

    /// Queue a successful reply.
    pub fn push_reply(&self, reply: impl Into<Value>) {
        lock(&self.replies).push_back(Ok(reply.into()));
    }

    /// Queue a transport failure.
    pub fn push_error(&self, err: TransportError) {
        lock(&self.replies).push_back(Err(err));
    }

    /// All calls observed so far, in order.
    pub fn calls(&self) -> Vec<RecordedCall> {
        lock(&self.calls).clone()
    }

    /// Number of calls observed so far.
    pub fn call_count(&self) -> usize {
        lock(&self.calls).len()
    }

    /// The most recent call, if any.
    pub fn last_call(&self) -> Option<RecordedCall> {
        lock(&self.calls).last().cloned()
    }
}

impl Transport for MockTransport {
    fn call(&self, method: &str, args: Option<&[Value]>) -> Result<Value, TransportError> {
        lock(&self.calls).push(RecordedCall {
            method: method.to_string(),
            args: args.map(<[Value]>::to_vec),
        });

        lock(&self.replies)
            .pop_front()
            .unwrap_or_else(|| Err(TransportError::Other(format!("no reply queued for {method}"))))
    }
}

/// Lock ignoring poisoning; a panicking test must not hide later assertions.
fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}
