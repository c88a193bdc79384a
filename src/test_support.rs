//! Test utilities shared across the crate.
//!
//! This module is only compiled during tests (`#[cfg(test)]`).

use std::sync::mpsc::{self, Receiver};
use std::sync::{Arc, Mutex};

use crate::core::state::Chat;
use crate::transport::{
    Channel, Endpoint, EventSink, Transport, TransportError, TransportEvent,
};

#[derive(Default)]
struct Recorded {
    sent: Vec<String>,
    close_requested: bool,
}

#[derive(Clone, Copy, PartialEq)]
enum Mode {
    Working,
    Unsupported,
    FailingSends,
}

/// A transport that never touches the network and records what it is asked to do.
pub struct MockTransport {
    mode: Mode,
    recorded: Arc<Mutex<Recorded>>,
}

impl MockTransport {
    pub fn new() -> Self {
        Self::with_mode(Mode::Working)
    }

    /// Reports the transport primitive as unavailable.
    pub fn unsupported() -> Self {
        Self::with_mode(Mode::Unsupported)
    }

    /// Opens fine, but every send fails after the fact.
    pub fn failing_sends() -> Self {
        Self::with_mode(Mode::FailingSends)
    }

    fn with_mode(mode: Mode) -> Self {
        Self {
            mode,
            recorded: Arc::new(Mutex::new(Recorded::default())),
        }
    }

    pub fn sent(&self) -> Vec<String> {
        self.recorded.lock().unwrap().sent.clone()
    }

    pub fn close_requested(&self) -> bool {
        self.recorded.lock().unwrap().close_requested
    }
}

impl Transport for MockTransport {
    fn name(&self) -> &str {
        "mock"
    }

    fn open(
        &self,
        _endpoint: &Endpoint,
        _events: EventSink,
    ) -> Result<Box<dyn Channel>, TransportError> {
        if self.mode == Mode::Unsupported {
            return Err(TransportError::Unsupported("mock".to_string()));
        }
        Ok(Box::new(MockChannel {
            failing: self.mode == Mode::FailingSends,
            recorded: self.recorded.clone(),
        }))
    }
}

struct MockChannel {
    failing: bool,
    recorded: Arc<Mutex<Recorded>>,
}

impl Channel for MockChannel {
    fn send(&mut self, text: &str) -> Result<(), TransportError> {
        if self.failing {
            return Err(TransportError::Closed);
        }
        self.recorded.lock().unwrap().sent.push(text.to_string());
        Ok(())
    }

    fn close(&mut self) {
        self.recorded.lock().unwrap().close_requested = true;
    }
}

pub fn test_endpoint() -> Endpoint {
    Endpoint::new("localhost:8080", "/ws").unwrap()
}

/// Creates a test Chat on the given transport. Keep the receiver alive for
/// as long as the transport might report events.
pub fn test_chat(transport: &MockTransport) -> (Chat, Receiver<TransportEvent>) {
    let (tx, rx) = mpsc::channel();
    (Chat::connect(transport, test_endpoint(), tx), rx)
}
