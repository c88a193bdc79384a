//! # TUI Components
//!
//! This module contains all UI components for the terminal interface.
//!
//! ## Component Architecture
//!
//! ### Stateless Components (Props-Based Rendering)
//!
//! - `Entry`: one log line (system notice or user message)
//! - `StatusBar`: endpoint plus connection status
//!
//! ### Stateful Components (Event-Driven)
//!
//! - `InputBox`: single-line message field
//! - `LogView`: scrollable log with layout caching and auto-scroll
//!
//! Components receive external data as props (struct fields or
//! constructor arguments), never by reaching into `Chat` themselves.
//!
//! ## Module Structure
//!
//! ```text
//! components/
//! ├── mod.rs         (this file)
//! ├── entry.rs       (single log entry renderer)
//! ├── log_view.rs    (scrollable log container)
//! ├── status_bar.rs  (top status line)
//! └── input_box/     (message field)
//! ```

pub mod entry;
pub mod input_box;
pub mod log_view;
pub mod status_bar;

pub use entry::Entry;
pub use input_box::{InputBox, InputEvent};
pub use log_view::{LogView, LogViewState};
pub use status_bar::StatusBar;
