//! # Chat State
//!
//! Everything the core knows about one session, bundled into a single
//! context so several independent sessions can exist side by side (tests do
//! exactly that). Presentation state lives in the `tui` module.
//!
//! ```text
//! Chat
//! ├── connection: ConnectionManager   // channel + ConnectionState
//! ├── log: ChatLog                    // every DisplayUnit, arrival order
//! └── endpoint: Endpoint              // where the channel points
//! ```
//!
//! State changes only happen through `update(chat, action)` in action.rs.

use crate::core::chat_log::ChatLog;
use crate::core::connection::ConnectionManager;
use crate::transport::{Endpoint, EventSink, Transport};

pub struct Chat {
    pub connection: ConnectionManager,
    pub log: ChatLog,
    pub endpoint: Endpoint,
}

impl Chat {
    /// Open the connection and seed the log with any startup notice.
    pub fn connect(transport: &dyn Transport, endpoint: Endpoint, events: EventSink) -> Self {
        let (connection, notice) = ConnectionManager::open(transport, &endpoint, events);
        let mut log = ChatLog::new();
        if let Some(unit) = notice {
            log.append(unit);
        }
        Self {
            connection,
            log,
            endpoint,
        }
    }
}
