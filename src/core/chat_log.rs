//! # Chat Log
//!
//! Append-only record of everything shown this session, in arrival order.
//! No removal, no reordering, no deduplication.

use crate::core::unit::DisplayUnit;

#[derive(Debug, Default, Clone)]
pub struct ChatLog {
    units: Vec<DisplayUnit>,
}

impl ChatLog {
    pub fn new() -> Self {
        Self { units: Vec::new() }
    }

    pub fn append(&mut self, unit: DisplayUnit) {
        self.units.push(unit);
    }

    pub fn extend(&mut self, units: impl IntoIterator<Item = DisplayUnit>) {
        self.units.extend(units);
    }

    pub fn units(&self) -> &[DisplayUnit] {
        &self.units
    }

    pub fn len(&self) -> usize {
        self.units.len()
    }

    pub fn is_empty(&self) -> bool {
        self.units.is_empty()
    }
}
