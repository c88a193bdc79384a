//! # Display Units
//!
//! One renderable chat-log entry. Either a message someone sent through the
//! hub (`User`, with a sender) or a notice about the connection (`System`).
//! Units are immutable once built; the log only ever appends them.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnitKind {
    User,
    System,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisplayUnit {
    kind: UnitKind,
    sender: Option<String>,
    body: String,
}

impl DisplayUnit {
    pub fn user(sender: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            kind: UnitKind::User,
            sender: Some(sender.into()),
            body: body.into(),
        }
    }

    pub fn system(text: impl Into<String>) -> Self {
        Self {
            kind: UnitKind::System,
            sender: None,
            body: text.into(),
        }
    }

    pub fn kind(&self) -> UnitKind {
        self.kind
    }

    /// Sender name. Always `Some` for user units, `None` for system notices.
    pub fn sender(&self) -> Option<&str> {
        self.sender.as_deref()
    }

    pub fn body(&self) -> &str {
        &self.body
    }

    pub fn is_system(&self) -> bool {
        self.kind == UnitKind::System
    }
}
