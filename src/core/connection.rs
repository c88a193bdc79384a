//! # Connection Lifecycle
//!
//! `ConnectionState` is an explicit three-state machine; `ConnectionManager`
//! owns the single channel and applies transitions when transport events
//! arrive. Every real transition yields a system notice for the log.
//!
//! ```text
//!  Connecting ──Opened──▶ Open ──Closed──▶ Closed
//!       │                                    ▲
//!       └──────────────Closed────────────────┘
//! ```
//!
//! `Closed` is terminal. There is no reconnect: retrying means building a new
//! manager.

use log::{debug, info, warn};

use crate::core::unit::DisplayUnit;
use crate::transport::{Channel, Endpoint, EventSink, Transport, TransportError};

pub const NOTICE_UNSUPPORTED: &str = "WebSocket transport is not supported in this environment.";
pub const NOTICE_ESTABLISHED: &str = "Connection established";
pub const NOTICE_CLOSED: &str = "Connection closed";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConnectionState {
    Connecting,
    Open,
    Closed,
}

impl ConnectionState {
    /// Next state after the handshake completes, or `None` if ignored here.
    pub fn opened(self) -> Option<Self> {
        match self {
            ConnectionState::Connecting => Some(ConnectionState::Open),
            ConnectionState::Open | ConnectionState::Closed => None,
        }
    }

    /// Next state after the channel terminates, or `None` if already closed.
    pub fn closed(self) -> Option<Self> {
        match self {
            ConnectionState::Connecting | ConnectionState::Open => Some(ConnectionState::Closed),
            ConnectionState::Closed => None,
        }
    }
}

pub struct ConnectionManager {
    state: ConnectionState,
    channel: Option<Box<dyn Channel>>,
}

impl ConnectionManager {
    /// Open a channel to `endpoint`. The returned notice, if any, must be
    /// appended to the log (the transport is unavailable).
    pub fn open(
        transport: &dyn Transport,
        endpoint: &Endpoint,
        events: EventSink,
    ) -> (Self, Option<DisplayUnit>) {
        match transport.open(endpoint, events) {
            Ok(channel) => {
                info!("Connecting to {} via {}", endpoint, transport.name());
                let manager = Self {
                    state: ConnectionState::Connecting,
                    channel: Some(channel),
                };
                (manager, None)
            }
            Err(TransportError::Unsupported(reason)) => {
                warn!("{} transport unavailable: {}", transport.name(), reason);
                (Self::disconnected(), Some(DisplayUnit::system(NOTICE_UNSUPPORTED)))
            }
            Err(e) => {
                warn!("Failed to open {}: {}", endpoint, e);
                (Self::disconnected(), None)
            }
        }
    }

    fn disconnected() -> Self {
        Self {
            state: ConnectionState::Closed,
            channel: None,
        }
    }

    pub fn state(&self) -> ConnectionState {
        self.state
    }

    /// A channel exists and the handshake has completed.
    pub fn is_live(&self) -> bool {
        self.channel.is_some() && self.state == ConnectionState::Open
    }

    pub fn on_open(&mut self) -> Option<DisplayUnit> {
        let Some(next) = self.state.opened() else {
            debug!("Ignoring open event in state {:?}", self.state);
            return None;
        };
        self.state = next;
        info!("Connection established");
        Some(DisplayUnit::system(NOTICE_ESTABLISHED))
    }

    pub fn on_close(&mut self) -> Option<DisplayUnit> {
        let Some(next) = self.state.closed() else {
            debug!("Ignoring close event in state {:?}", self.state);
            return None;
        };
        self.state = next;
        self.channel = None;
        info!("Connection closed");
        Some(DisplayUnit::system(NOTICE_CLOSED))
    }

    /// Forward `text` verbatim. Returns `false` without doing anything when the
    /// connection is not live or `text` is empty. Delivery is not confirmed.
    pub fn send(&mut self, text: &str) -> bool {
        if text.is_empty() || !self.is_live() {
            return false;
        }
        let Some(channel) = self.channel.as_mut() else {
            return false;
        };
        if let Err(e) = channel.send(text) {
            warn!("Frame dropped after send: {}", e);
        }
        true
    }

    /// Ask the channel to shut down; the `Closed` event does the bookkeeping.
    pub fn close(&mut self) {
        if let Some(channel) = self.channel.as_mut() {
            info!("Closing connection");
            channel.close();
        }
    }
}
