//! # Transport
//!
//! The seam between the chat core and the wire. A [`Transport`] opens a
//! [`Channel`] to an [`Endpoint`]; lifecycle and inbound frames come back
//! asynchronously as [`TransportEvent`]s on an [`EventSink`].
//!
//! ```text
//! ConnectionManager ──open()──▶ Transport ──▶ Box<dyn Channel> ──send()──▶ wire
//!        ▲                                                              │
//!        └──────────── TransportEvent (Opened / Frame / Closed) ◀──────┘
//! ```
//!
//! Events are delivered over a `std::sync::mpsc` channel so the UI loop can
//! drain them with `try_recv` between redraws, the same way it drains terminal
//! events.

pub mod endpoint;
pub mod websocket;

use std::fmt;
use std::sync::mpsc::Sender;

pub use endpoint::Endpoint;
pub use websocket::WebSocketTransport;

/// Something that happened on an open (or opening) channel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TransportEvent {
    /// The connection handshake completed.
    Opened,
    /// One inbound UTF-8 text frame, untouched.
    Frame(String),
    /// The channel terminated, whether requested, remote, or failed.
    Closed,
}

/// Where transports report their events.
pub type EventSink = Sender<TransportEvent>;

/// Errors surfaced by transports.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TransportError {
    /// The transport primitive is not available in this environment.
    Unsupported(String),
    /// Host/path do not form a usable endpoint URL.
    InvalidEndpoint(String),
    /// The channel is gone; nothing can be sent anymore.
    Closed,
}

impl fmt::Display for TransportError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TransportError::Unsupported(msg) => write!(f, "transport unsupported: {msg}"),
            TransportError::InvalidEndpoint(msg) => write!(f, "invalid endpoint: {msg}"),
            TransportError::Closed => write!(f, "channel closed"),
        }
    }
}

impl std::error::Error for TransportError {}

/// Opens channels. Implementations must not block: the handshake happens in
/// the background and is reported through the sink.
pub trait Transport {
    fn name(&self) -> &str;

    fn open(
        &self,
        endpoint: &Endpoint,
        events: EventSink,
    ) -> Result<Box<dyn Channel>, TransportError>;
}

/// The outbound half of an open channel.
pub trait Channel: Send {
    /// Queue one text frame, verbatim.
    fn send(&mut self, text: &str) -> Result<(), TransportError>;

    /// Request an orderly shutdown. A `Closed` event follows.
    fn close(&mut self);
}
