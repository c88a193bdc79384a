//! # Submission
//!
//! Decides what happens when the user presses Enter. Preconditions are
//! checked in order: a live connection, then non-empty text. A rejected
//! submission has no visible effect; the input stays as typed.

use std::fmt;

use crate::core::connection::ConnectionManager;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rejection {
    NotConnected,
    EmptyInput,
}

impl fmt::Display for Rejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Rejection::NotConnected => write!(f, "not connected"),
            Rejection::EmptyInput => write!(f, "empty input"),
        }
    }
}

/// Send `text` through `connection`. On `Ok` the caller clears the input.
pub fn submit(connection: &mut ConnectionManager, text: &str) -> Result<(), Rejection> {
    if !connection.is_live() {
        return Err(Rejection::NotConnected);
    }
    if text.is_empty() {
        return Err(Rejection::EmptyInput);
    }
    if connection.send(text) {
        Ok(())
    } else {
        Err(Rejection::NotConnected)
    }
}
