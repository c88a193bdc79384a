//! # Actions
//!
//! Everything that can happen in hubchat becomes an `Action`.
//! User presses Enter? That's `Action::Submit(text)`.
//! The hub sends a frame? That's `Action::Transport(TransportEvent::Frame(raw))`.
//!
//! `update()` applies an action to the `Chat` and returns an `Effect` telling
//! the UI what it has to do that the core cannot (clear the input, quit).
//!
//! ```text
//! Chat + Action  →  update()  →  Chat' + Effect
//! ```
//!
//! Sending is the one piece of I/O reached from here, and it only queues a
//! frame on the channel; it never blocks.

use log::debug;

use crate::core::input;
use crate::core::parser;
use crate::core::state::Chat;
use crate::transport::TransportEvent;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    Transport(TransportEvent),
    Submit(String),
    Quit,
}

impl From<TransportEvent> for Action {
    fn from(event: TransportEvent) -> Self {
        Action::Transport(event)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    None,
    ClearInput,
    Quit,
}

pub fn update(chat: &mut Chat, action: Action) -> Effect {
    match action {
        Action::Transport(TransportEvent::Opened) => {
            if let Some(unit) = chat.connection.on_open() {
                chat.log.append(unit);
            }
            Effect::None
        }
        Action::Transport(TransportEvent::Closed) => {
            if let Some(unit) = chat.connection.on_close() {
                chat.log.append(unit);
            }
            Effect::None
        }
        Action::Transport(TransportEvent::Frame(raw)) => {
            let units = parser::parse(&raw);
            debug!("Frame decoded into {} unit(s)", units.len());
            chat.log.extend(units);
            Effect::None
        }
        Action::Submit(text) => match input::submit(&mut chat.connection, &text) {
            Ok(()) => Effect::ClearInput,
            Err(reason) => {
                debug!("Submission suppressed: {}", reason);
                Effect::None
            }
        },
        Action::Quit => {
            chat.connection.close();
            Effect::Quit
        }
    }
}
