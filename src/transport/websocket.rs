//! WebSocket transport built on `tokio-tungstenite`.
//!
//! `open()` returns immediately. One background task per channel performs the
//! handshake, then multiplexes outbound text (from [`WebSocketChannel`]) and
//! inbound frames (to the [`EventSink`]) until either side goes away. Exactly
//! one `Closed` event is emitted when the task ends, including when the
//! handshake itself fails.

use std::time::Duration;

use futures::{SinkExt, Stream, StreamExt};
use log::{debug, info, warn};
use tokio::sync::mpsc::{UnboundedReceiver, UnboundedSender, unbounded_channel};
use tokio_tungstenite::connect_async;
use tokio_tungstenite::tungstenite::{self, Message};

use super::{Channel, Endpoint, EventSink, Transport, TransportError, TransportEvent};

/// How long a local close waits for the hub to answer the close frame.
const CLOSE_ACK_TIMEOUT: Duration = Duration::from_millis(400);

enum Outgoing {
    Text(String),
    Close,
}

/// Opens WebSocket channels on the ambient tokio runtime.
#[derive(Debug, Default, Clone, Copy)]
pub struct WebSocketTransport;

impl WebSocketTransport {
    pub fn new() -> Self {
        Self
    }
}

impl Transport for WebSocketTransport {
    fn name(&self) -> &str {
        "websocket"
    }

    fn open(
        &self,
        endpoint: &Endpoint,
        events: EventSink,
    ) -> Result<Box<dyn Channel>, TransportError> {
        // The socket needs a runtime to live on; without one there is no transport
        let runtime = tokio::runtime::Handle::try_current()
            .map_err(|e| TransportError::Unsupported(e.to_string()))?;

        let (outbound_tx, outbound_rx) = unbounded_channel();
        let url = endpoint.as_str().to_string();
        info!("Opening WebSocket channel to {}", url);
        runtime.spawn(drive_socket(url, outbound_rx, events));

        Ok(Box::new(WebSocketChannel {
            outbound: outbound_tx,
        }))
    }
}

/// Outbound handle for a socket driven by a background task.
pub struct WebSocketChannel {
    outbound: UnboundedSender<Outgoing>,
}

impl Channel for WebSocketChannel {
    fn send(&mut self, text: &str) -> Result<(), TransportError> {
        self.outbound
            .send(Outgoing::Text(text.to_string()))
            .map_err(|_| TransportError::Closed)
    }

    fn close(&mut self) {
        if self.outbound.send(Outgoing::Close).is_err() {
            debug!("Close requested on a socket task that already ended");
        }
    }
}

async fn drive_socket(
    url: String,
    mut outbound: UnboundedReceiver<Outgoing>,
    events: EventSink,
) {
    let stream = match connect_async(url.as_str()).await {
        Ok((stream, _response)) => stream,
        Err(e) => {
            warn!("WebSocket handshake with {} failed: {}", url, e);
            let _ = events.send(TransportEvent::Closed);
            return;
        }
    };

    info!("WebSocket connected to {}", url);
    if events.send(TransportEvent::Opened).is_err() {
        warn!("Dropping WebSocket to {}: event receiver gone", url);
        return;
    }

    let (mut ws_tx, mut ws_rx) = stream.split();
    let mut sent = 0usize;
    let mut received = 0usize;

    loop {
        tokio::select! {
            out = outbound.recv() => match out {
                Some(Outgoing::Text(text)) => {
                    debug!("Sending frame (len={})", text.len());
                    if let Err(e) = ws_tx.send(Message::Text(text)).await {
                        warn!("WebSocket send failed: {}", e);
                        break;
                    }
                    sent += 1;
                }
                Some(Outgoing::Close) | None => {
                    debug!("Closing WebSocket to {}", url);
                    match ws_tx.send(Message::Close(None)).await {
                        Ok(()) => await_close_ack(&mut ws_rx).await,
                        Err(e) => debug!("Close frame not delivered: {}", e),
                    }
                    break;
                }
            },
            inbound = ws_rx.next() => match inbound {
                Some(Ok(Message::Text(text))) => {
                    received += 1;
                    if events.send(TransportEvent::Frame(text)).is_err() {
                        warn!("Event receiver gone, closing WebSocket");
                        break;
                    }
                }
                Some(Ok(Message::Binary(data))) => {
                    debug!("Ignoring binary frame ({} bytes)", data.len());
                }
                Some(Ok(Message::Close(frame))) => {
                    info!("Server closed WebSocket: {:?}", frame);
                    // tungstenite queued the close reply; push it out
                    if let Err(e) = ws_tx.close().await {
                        debug!("Close reply not delivered: {}", e);
                    }
                    break;
                }
                // Ping/pong are answered by tungstenite itself
                Some(Ok(_)) => {}
                Some(Err(e)) => {
                    warn!("WebSocket receive failed: {}", e);
                    break;
                }
                None => break,
            },
        }
    }

    info!(
        "WebSocket to {} ended: {} frames sent, {} received",
        url, sent, received
    );
    let _ = events.send(TransportEvent::Closed);
}

/// Read until the hub answers our close frame (or the socket ends), so the
/// hub sees a completed close handshake. Frames arriving meanwhile are dropped.
async fn await_close_ack<S>(ws_rx: &mut S)
where
    S: Stream<Item = Result<Message, tungstenite::Error>> + Unpin,
{
    let drain = async {
        while let Some(Ok(msg)) = ws_rx.next().await {
            if msg.is_close() {
                break;
            }
        }
    };
    if tokio::time::timeout(CLOSE_ACK_TIMEOUT, drain).await.is_err() {
        debug!("No close acknowledgement within {:?}", CLOSE_ACK_TIMEOUT);
    }
}
