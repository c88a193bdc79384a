use std::future::Future;
use std::sync::mpsc::{self, Receiver};
use std::time::{Duration, Instant};

use futures::{SinkExt, StreamExt};
use hubchat::core::action::{Action, Effect, update};
use hubchat::core::connection::{
    ConnectionState, NOTICE_CLOSED, NOTICE_ESTABLISHED, NOTICE_UNSUPPORTED,
};
use hubchat::core::state::Chat;
use hubchat::core::unit::DisplayUnit;
use hubchat::transport::{Endpoint, TransportEvent, WebSocketTransport};
use tokio::net::{TcpListener, TcpStream};
use tokio::sync::oneshot;
use tokio_tungstenite::tungstenite::Message;
use tokio_tungstenite::{WebSocketStream, accept_async};

const TIMEOUT: Duration = Duration::from_secs(5);

// ============================================================================
// Helper Functions
// ============================================================================

/// Starts a one-connection hub on an ephemeral port and returns its
/// `host:port`. `handler` drives the accepted socket.
async fn spawn_hub<F, Fut>(handler: F) -> String
where
    F: FnOnce(WebSocketStream<TcpStream>) -> Fut + Send + 'static,
    Fut: Future<Output = ()> + Send + 'static,
{
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let host = listener.local_addr().unwrap().to_string();
    tokio::spawn(async move {
        let (stream, _) = listener.accept().await.unwrap();
        let ws = accept_async(stream).await.unwrap();
        handler(ws).await;
    });
    host
}

/// Hub behaviour: every text frame is broadcast back prefixed with the
/// sender's assigned name.
async fn echo_as(name: &'static str, mut ws: WebSocketStream<TcpStream>) {
    while let Some(Ok(msg)) = ws.next().await {
        if let Message::Text(text) = msg
            && ws.send(Message::Text(format!("{name}:{text}"))).await.is_err()
        {
            return;
        }
    }
}

fn connect(host: &str) -> (Chat, Receiver<TransportEvent>) {
    let (tx, rx) = mpsc::channel();
    let endpoint = Endpoint::new(host, "/ws").unwrap();
    (Chat::connect(&WebSocketTransport::new(), endpoint, tx), rx)
}

/// Applies transport events to `chat` until `done` holds or the timeout hits.
async fn pump_until(
    chat: &mut Chat,
    rx: &Receiver<TransportEvent>,
    done: impl Fn(&Chat) -> bool,
) -> bool {
    let deadline = Instant::now() + TIMEOUT;
    while Instant::now() < deadline {
        while let Ok(event) = rx.try_recv() {
            update(chat, event.into());
        }
        if done(chat) {
            return true;
        }
        tokio::time::sleep(Duration::from_millis(10)).await;
    }
    false
}

fn is_open(chat: &Chat) -> bool {
    chat.connection.state() == ConnectionState::Open
}

fn is_closed(chat: &Chat) -> bool {
    chat.connection.state() == ConnectionState::Closed
}

// ============================================================================
// Lifecycle
// ============================================================================

#[tokio::test]
async fn test_batched_frame_becomes_ordered_entries() {
    let host = spawn_hub(|mut ws| async move {
        ws.send(Message::Text("alice:hi\nbob:yo".to_string()))
            .await
            .unwrap();
        while ws.next().await.is_some() {}
    })
    .await;

    let (mut chat, rx) = connect(&host);
    assert_eq!(chat.connection.state(), ConnectionState::Connecting);
    assert!(pump_until(&mut chat, &rx, |c| c.log.len() == 3).await);

    assert_eq!(
        chat.log.units(),
        &[
            DisplayUnit::system(NOTICE_ESTABLISHED),
            DisplayUnit::user("alice", "hi"),
            DisplayUnit::user("bob", "yo"),
        ]
    );
    assert!(is_open(&chat));
}

#[tokio::test]
async fn test_submit_reaches_hub_and_comes_back_named() {
    let host = spawn_hub(|ws| echo_as("guest1", ws)).await;

    let (mut chat, rx) = connect(&host);
    assert!(pump_until(&mut chat, &rx, is_open).await);

    let effect = update(&mut chat, Action::Submit("hello: world".to_string()));
    assert_eq!(effect, Effect::ClearInput);

    assert!(pump_until(&mut chat, &rx, |c| c.log.len() == 2).await);
    assert_eq!(
        chat.log.units().last(),
        Some(&DisplayUnit::user("guest1", "hello: world"))
    );
}

#[tokio::test]
async fn test_server_close_ends_session() {
    let host = spawn_hub(|mut ws| async move {
        ws.close(None).await.unwrap();
        while ws.next().await.is_some() {}
    })
    .await;

    let (mut chat, rx) = connect(&host);
    assert!(pump_until(&mut chat, &rx, is_closed).await);

    assert_eq!(
        chat.log.units(),
        &[
            DisplayUnit::system(NOTICE_ESTABLISHED),
            DisplayUnit::system(NOTICE_CLOSED),
        ]
    );
    assert_eq!(
        update(&mut chat, Action::Submit("anyone?".to_string())),
        Effect::None
    );
    assert_eq!(chat.log.len(), 2);
}

#[tokio::test]
async fn test_refused_connection_reports_closed_only() {
    // Reserve a port, then free it so nothing is listening
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let host = listener.local_addr().unwrap().to_string();
    drop(listener);

    let (mut chat, rx) = connect(&host);
    assert!(pump_until(&mut chat, &rx, is_closed).await);

    assert_eq!(chat.log.units(), &[DisplayUnit::system(NOTICE_CLOSED)]);
}

#[tokio::test]
async fn test_quit_sends_close_frame() {
    let (close_tx, close_rx) = oneshot::channel();
    let host = spawn_hub(move |mut ws| async move {
        while let Some(Ok(msg)) = ws.next().await {
            if let Message::Close(_) = msg {
                let _ = close_tx.send(());
                return;
            }
        }
    })
    .await;

    let (mut chat, rx) = connect(&host);
    assert!(pump_until(&mut chat, &rx, is_open).await);

    assert_eq!(update(&mut chat, Action::Quit), Effect::Quit);

    let received = tokio::time::timeout(TIMEOUT, close_rx).await;
    assert!(matches!(received, Ok(Ok(()))));
    assert!(pump_until(&mut chat, &rx, is_closed).await);
}

/// Hub that reports whether its socket ended without a protocol error.
async fn report_clean_end(mut ws: WebSocketStream<TcpStream>, done: oneshot::Sender<bool>) {
    let mut clean = true;
    while let Some(msg) = ws.next().await {
        if msg.is_err() {
            clean = false;
            break;
        }
    }
    let _ = done.send(clean);
}

#[tokio::test]
async fn test_server_close_is_answered() {
    let (done_tx, done_rx) = oneshot::channel();
    let host = spawn_hub(move |mut ws| async move {
        ws.close(None).await.unwrap();
        report_clean_end(ws, done_tx).await;
    })
    .await;

    let (mut chat, rx) = connect(&host);
    assert!(pump_until(&mut chat, &rx, is_closed).await);

    let clean = tokio::time::timeout(TIMEOUT, done_rx).await;
    assert!(matches!(clean, Ok(Ok(true))));
}

#[tokio::test]
async fn test_quit_waits_for_close_acknowledgement() {
    let delay = Duration::from_millis(150);
    let (done_tx, done_rx) = oneshot::channel();
    let host = spawn_hub(move |mut ws| async move {
        while let Some(Ok(msg)) = ws.next().await {
            if msg.is_close() {
                // The reply goes out on the next read
                tokio::time::sleep(delay).await;
                break;
            }
        }
        report_clean_end(ws, done_tx).await;
    })
    .await;

    let (mut chat, rx) = connect(&host);
    assert!(pump_until(&mut chat, &rx, is_open).await);

    let quit_at = Instant::now();
    update(&mut chat, Action::Quit);
    assert!(pump_until(&mut chat, &rx, is_closed).await);
    assert!(quit_at.elapsed() >= Duration::from_millis(100));

    let clean = tokio::time::timeout(TIMEOUT, done_rx).await;
    assert!(matches!(clean, Ok(Ok(true))));
}

// ============================================================================
// Capability
// ============================================================================

#[test]
fn test_no_runtime_means_unsupported() {
    let (chat, _rx) = connect("localhost:8080");

    assert_eq!(chat.log.units(), &[DisplayUnit::system(NOTICE_UNSUPPORTED)]);
    assert!(is_closed(&chat));
}
