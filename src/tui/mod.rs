//! # TUI Adapter
//!
//! The ratatui-specific layer. Handles terminal I/O, renders the UI,
//! and translates keyboard events into core::Action values.
//!
//! This is the only module that knows about ratatui and crossterm.
//!
//! ## Event Loop
//!
//! One thread, two event sources, processed serially:
//!
//! - terminal events (keys, paste, mouse wheel, resize) from crossterm
//! - `TransportEvent`s drained from the std mpsc channel the WebSocket task
//!   writes to
//!
//! After every batch the log view is synced with the chat log, then the frame
//! is redrawn if anything changed. Idle iterations block in `poll` for up to
//! 100ms so transport events are picked up promptly.

mod component;
pub mod components;
mod event;
mod ui;

use log::{debug, info, warn};
use std::io::stdout;
use std::sync::mpsc::{self, Receiver, RecvTimeoutError};
use std::time::{Duration, Instant};

use crossterm::cursor::{SetCursorStyle, Show};
use crossterm::event::{
    DisableBracketedPaste, DisableMouseCapture, EnableBracketedPaste, EnableMouseCapture,
};
use crossterm::execute;

use crate::core::action::{Action, Effect, update};
use crate::core::state::Chat;
use crate::transport::{Endpoint, TransportEvent, WebSocketTransport};
use crate::tui::component::EventHandler;
use crate::tui::components::{InputBox, InputEvent, LogViewState, StatusBar};
use crate::tui::event::{TuiEvent, poll_event_immediate, poll_event_timeout};

const IDLE_POLL: Duration = Duration::from_millis(100);

/// How long shutdown waits for the close handshake before giving up.
const CLOSE_GRACE: Duration = Duration::from_millis(500);

/// Modal input mode: determines how keyboard events are interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputMode {
    /// Arrow keys scroll the log. Typing auto-switches to Input.
    Log,
    /// Text editing in the input box. Esc switches to Log.
    Input,
}

/// TUI-specific presentation state (not part of core business logic)
pub struct TuiState {
    pub log_view: LogViewState,
    pub input_box: InputBox,
    pub status_bar: StatusBar,
    pub input_mode: InputMode,
}

impl TuiState {
    pub fn new(endpoint: &Endpoint) -> Self {
        Self {
            log_view: LogViewState::new(),
            input_box: InputBox::new(),
            status_bar: StatusBar::new(endpoint.to_string()),
            input_mode: InputMode::Input, // User expects to type immediately
        }
    }
}

struct TerminalModeGuard;

impl TerminalModeGuard {
    fn new() -> std::io::Result<Self> {
        execute!(
            stdout(),
            EnableMouseCapture,
            EnableBracketedPaste,
            Show,
            SetCursorStyle::SteadyBlock
        )?;
        info!("Terminal modes enabled (mouse, bracketed paste, steady block cursor)");
        Ok(Self)
    }
}

impl Drop for TerminalModeGuard {
    fn drop(&mut self) {
        let _ = execute!(
            stdout(),
            DisableMouseCapture,
            DisableBracketedPaste,
            SetCursorStyle::DefaultUserShape
        );
    }
}

pub fn run(endpoint: Endpoint) -> std::io::Result<()> {
    // Transport task → UI loop
    let (tx, rx) = mpsc::channel();
    let mut chat = Chat::connect(&WebSocketTransport::new(), endpoint, tx);
    let mut tui = TuiState::new(&chat.endpoint);

    let mut terminal = ratatui::init();
    let terminal_mode_guard = TerminalModeGuard::new();
    if let Err(e) = &terminal_mode_guard {
        warn!("Failed to enable terminal modes: {}", e);
    }

    let mut needs_redraw = true; // Force first frame

    loop {
        if needs_redraw {
            terminal.draw(|f| ui::draw_ui(f, &chat, &mut tui))?;
            needs_redraw = false;
        }

        let first_event = poll_event_timeout(IDLE_POLL);
        if first_event.is_some() {
            needs_redraw = true;
        }

        // Process first event + drain ALL pending events before next draw
        let mut should_quit = false;
        for event in first_event
            .into_iter()
            .chain(std::iter::from_fn(poll_event_immediate))
        {
            if handle_terminal_event(&mut chat, &mut tui, &event) == Effect::Quit {
                should_quit = true;
                break;
            }
        }

        if should_quit {
            break;
        }

        while let Ok(event) = rx.try_recv() {
            debug!("Event loop received: {:?}", event);
            update(&mut chat, event.into());
            needs_redraw = true;
        }

        tui.log_view.sync(chat.log.units());
    }

    drop(terminal_mode_guard);
    ratatui::restore();

    await_close(&rx);
    Ok(())
}

/// Route one terminal event through the focused component and the core.
fn handle_terminal_event(chat: &mut Chat, tui: &mut TuiState, event: &TuiEvent) -> Effect {
    match event {
        // Resize just needs a redraw
        TuiEvent::Resize => return Effect::None,
        // Ctrl+C always quits regardless of mode
        TuiEvent::ForceQuit => return update(chat, Action::Quit),
        // Scrolling always goes to the log regardless of mode
        TuiEvent::ScrollUp
        | TuiEvent::ScrollDown
        | TuiEvent::ScrollPageUp
        | TuiEvent::ScrollPageDown
        | TuiEvent::ScrollToBottom => {
            tui.log_view.handle_event(event);
            return Effect::None;
        }
        _ => {}
    }

    match tui.input_mode {
        InputMode::Input => {
            if matches!(event, TuiEvent::Escape) {
                tui.input_mode = InputMode::Log;
                return Effect::None;
            }
            if let Some(InputEvent::Submit(text)) = tui.input_box.handle_event(event) {
                let effect = update(chat, Action::Submit(text));
                if effect == Effect::ClearInput {
                    tui.input_box.clear();
                }
                return effect;
            }
            Effect::None
        }
        InputMode::Log => {
            match event {
                // Typing auto-switches to Input mode and forwards the event
                TuiEvent::InputChar(_) | TuiEvent::Paste(_) => {
                    tui.input_mode = InputMode::Input;
                    tui.input_box.handle_event(event);
                }
                // Enter switches to Input mode without submitting
                TuiEvent::Submit => tui.input_mode = InputMode::Input,
                TuiEvent::CursorEnd => tui.log_view.scroll_to_bottom(),
                TuiEvent::CursorHome => tui.log_view.scroll_to_top(),
                _ => {}
            }
            Effect::None
        }
    }
}

/// Give the transport task a moment to finish the close handshake.
fn await_close(rx: &Receiver<TransportEvent>) {
    let deadline = Instant::now() + CLOSE_GRACE;
    loop {
        let remaining = deadline.saturating_duration_since(Instant::now());
        match rx.recv_timeout(remaining) {
            Ok(TransportEvent::Closed) => {
                debug!("Connection closed cleanly on shutdown");
                return;
            }
            Ok(_) => continue,
            Err(RecvTimeoutError::Timeout) => {
                warn!("Close handshake did not finish within {:?}", CLOSE_GRACE);
                return;
            }
            Err(RecvTimeoutError::Disconnected) => return,
        }
    }
}
