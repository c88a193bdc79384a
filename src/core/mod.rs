//! # Core Chat Logic
//!
//! This module contains hubchat's business logic.
//! It knows nothing about any specific UI technology.
//!
//! ```text
//!                    ┌─────────────────────────┐
//!                    │         CORE            │
//!                    │  (this module)          │
//!                    │                         │
//!                    │  • Chat (context)       │
//!                    │  • Action (events)      │
//!                    │  • update() (reducer)   │
//!                    │                         │
//!                    │  No rendering.          │
//!                    └───────────┬─────────────┘
//!                                │
//!                ┌───────────────┴───────────────┐
//!                ▼                               ▼
//!         ┌────────────┐                  ┌────────────┐
//!         │    TUI     │                  │ Transport  │
//!         │  Adapter   │                  │ (WebSocket)│
//!         │ (ratatui)  │                  │            │
//!         └────────────┘                  └────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`state`]: `Chat`, the per-session context
//! - [`action`]: `Action`, `Effect` and the `update()` reducer
//! - [`connection`]: connection state machine and channel ownership
//! - [`parser`]: inbound frame → display units
//! - [`input`]: submission preconditions
//! - [`chat_log`]: the append-only chat log
//! - [`unit`]: `DisplayUnit`
//! - [`config`]: settings and their resolution

pub mod action;
pub mod chat_log;
pub mod config;
pub mod connection;
pub mod input;
pub mod parser;
pub mod state;
pub mod unit;
