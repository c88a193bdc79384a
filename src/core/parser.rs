//! # Frame Parser
//!
//! Turns one inbound text frame into display units. The hub batches queued
//! messages into a single frame joined by `\n`, and prefixes each with the
//! sender's name: `name:text`.
//!
//! ```text
//! "alice:hi\nbob:a:b\nnoColon"
//!   → User{alice, "hi"}, User{bob, "a:b"}, User{noColon, ""}
//! ```
//!
//! Every line becomes a unit, empty ones included. Only the first `:` splits;
//! a line without one is all sender and no body.

use crate::core::unit::DisplayUnit;

pub fn parse(raw: &str) -> Vec<DisplayUnit> {
    raw.split('\n').map(parse_line).collect()
}

fn parse_line(line: &str) -> DisplayUnit {
    let (sender, body) = line.split_once(':').unwrap_or((line, ""));
    DisplayUnit::user(sender, body)
}
