//! # LogView Component
//!
//! Scrollable view of the chat log.
//!
//! ## Responsibilities
//!
//! - Display every log entry in arrival order
//! - Keep the view pinned to the newest entry, unless the user scrolled away
//! - Cache entry heights so layout and scrolling never re-measure the log
//!
//! ## Auto-scroll
//!
//! Each append first checks whether the view is at the bottom (offset within
//! one row of the maximum). Only then does it follow the new entry; a user
//! reading history keeps their position while messages keep arriving.
//!
//! ## Architecture
//!
//! `LogView` is a transient component (created each frame) that wraps
//! `&'a mut LogViewState` (persistent state) and the log units (props).
//! The event loop calls [`LogViewState::sync`] after every core update, so
//! each unit is appended to the view exactly once, in order.
//!
//! Rows are counted in `u32`: a session may run long past what a terminal
//! coordinate can address. Only the entries intersecting the viewport are
//! drawn, straight into the frame; an entry cut by the top edge is scrolled
//! by the rows that are hidden.

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::widgets::{Scrollbar, ScrollbarOrientation, ScrollbarState};

use crate::core::unit::DisplayUnit;
use crate::tui::component::{Component, EventHandler};
use crate::tui::components::entry::Entry;
use crate::tui::event::TuiEvent;

/// Layout and scroll state for the log.
/// Must be persisted in the parent TuiState.
pub struct LogViewState {
    /// First content row shown at the top of the viewport
    offset: u32,
    /// Cached layout measurements, one height per synced unit
    pub(crate) layout: LayoutCache,
    /// Last known viewport height
    pub viewport_height: u16,
    /// An entry arrived below the visible area and has not been scrolled to
    unseen_content: bool,
}

impl Default for LogViewState {
    fn default() -> Self {
        Self::new()
    }
}

impl LogViewState {
    pub fn new() -> Self {
        Self {
            offset: 0,
            layout: LayoutCache::new(),
            viewport_height: 0,
            unseen_content: false,
        }
    }

    pub fn offset(&self) -> u32 {
        self.offset
    }

    pub fn max_offset(&self) -> u32 {
        self.layout
            .total_height()
            .saturating_sub(u32::from(self.viewport_height))
    }

    /// Within one row of the bottom.
    pub fn is_at_bottom(&self) -> bool {
        self.offset.saturating_add(1) > self.max_offset()
    }

    pub fn has_unseen_content(&self) -> bool {
        self.unseen_content
    }

    /// Append one unit, following it only if the view was at the bottom.
    pub fn append(&mut self, unit: &DisplayUnit) {
        let pinned = self.is_at_bottom();
        let height = Entry::calculate_height(unit, self.layout.content_width);
        self.layout.push(height);
        if pinned {
            self.scroll_to_bottom();
        } else {
            self.unseen_content = true;
        }
    }

    /// Append every unit of `units` not seen yet.
    pub fn sync(&mut self, units: &[DisplayUnit]) {
        for unit in units.iter().skip(self.layout.len()) {
            self.append(unit);
        }
    }

    /// Adapt to a new viewport. Heights are re-measured when the width
    /// changes; a view at the bottom stays there.
    pub fn resize(&mut self, content_width: u16, viewport_height: u16, units: &[DisplayUnit]) {
        if content_width == self.layout.content_width && viewport_height == self.viewport_height {
            return;
        }

        let pinned = self.is_at_bottom();
        if content_width != self.layout.content_width {
            let synced = self.layout.len().min(units.len());
            self.layout.rebuild(&units[..synced], content_width);
        }
        self.viewport_height = viewport_height;

        if pinned {
            self.scroll_to_bottom();
        } else {
            self.clamp_scroll();
        }
    }

    pub fn scroll_to_top(&mut self) {
        self.set_offset(0);
    }

    pub fn scroll_to_bottom(&mut self) {
        self.set_offset(self.max_offset());
    }

    /// Move by `delta` rows, clamped to the content.
    pub fn scroll_by(&mut self, delta: i64) {
        let target = (i64::from(self.offset) + delta).clamp(0, i64::from(self.max_offset()));
        self.set_offset(u32::try_from(target).unwrap_or(0));
    }

    /// Clamp scroll offset so it never exceeds the content bounds.
    pub fn clamp_scroll(&mut self) {
        let max_y = self.max_offset();
        if self.offset > max_y {
            self.set_offset(max_y);
        }
    }

    fn set_offset(&mut self, y: u32) {
        self.offset = y;
        if self.is_at_bottom() {
            self.unseen_content = false;
        }
    }
}

/// Scrollable log component.
/// Created fresh each frame with references to state and data.
pub struct LogView<'a> {
    pub state: &'a mut LogViewState,
    pub units: &'a [DisplayUnit],
}

impl<'a> LogView<'a> {
    pub fn new(state: &'a mut LogViewState, units: &'a [DisplayUnit]) -> Self {
        Self { state, units }
    }

    fn render_scrollbar(&self, frame: &mut Frame, area: Rect) {
        let max_offset = self.state.max_offset();
        if max_offset == 0 {
            return;
        }

        // ScrollbarState content_length is max scrollable position, not total rows
        let mut scrollbar_state = ScrollbarState::default()
            .content_length(max_offset as usize)
            .position(self.state.offset() as usize);

        frame.render_stateful_widget(
            Scrollbar::new(ScrollbarOrientation::VerticalRight),
            area,
            &mut scrollbar_state,
        );
    }
}

impl<'a> Component for LogView<'a> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let content_width = area.width.saturating_sub(1); // -1 for scrollbar

        self.state.resize(content_width, area.height, self.units);
        self.state.sync(self.units);

        let offset = self.state.offset();
        let view_bottom = offset.saturating_add(u32::from(area.height));

        for i in self.state.layout.visible_range(offset, area.height) {
            let top = self.state.layout.top_of(i);
            let bottom = top.saturating_add(self.state.layout.heights[i]);
            let hidden_above = offset.saturating_sub(top);
            let first_row = top.max(offset);
            let last_row = bottom.min(view_bottom);
            if last_row <= first_row {
                continue;
            }

            // Both differences are bounded by the viewport height
            let y = area.y + (first_row - offset) as u16;
            let rows = (last_row - first_row) as u16;
            let skip = u16::try_from(hidden_above).unwrap_or(u16::MAX);

            let paragraph = Entry::new(&self.units[i]).paragraph().scroll((skip, 0));
            frame.render_widget(paragraph, Rect::new(area.x, y, content_width, rows));
        }

        self.render_scrollbar(frame, area);
    }
}

/// Implemented on the state: it persists across frames, `LogView` does not.
impl EventHandler for LogViewState {
    type Event = ();

    fn handle_event(&mut self, event: &TuiEvent) -> Option<Self::Event> {
        let page = i64::from(self.viewport_height.max(1));
        match event {
            TuiEvent::ScrollUp => self.scroll_by(-1),
            TuiEvent::ScrollDown => self.scroll_by(1),
            TuiEvent::ScrollPageUp => self.scroll_by(-page),
            TuiEvent::ScrollPageDown => self.scroll_by(page),
            TuiEvent::ScrollToBottom => self.scroll_to_bottom(),
            _ => {}
        }
        None
    }
}

/// Cached layout measurements
pub(crate) struct LayoutCache {
    pub heights: Vec<u32>,
    pub prefix_heights: Vec<u32>,
    content_width: u16,
}

impl LayoutCache {
    pub fn new() -> Self {
        Self {
            heights: Vec::new(),
            prefix_heights: Vec::new(),
            content_width: 0,
        }
    }

    pub fn len(&self) -> usize {
        self.heights.len()
    }

    pub fn total_height(&self) -> u32 {
        self.prefix_heights.last().copied().unwrap_or(0)
    }

    /// Row at which entry `index` starts.
    pub fn top_of(&self, index: usize) -> u32 {
        if index == 0 {
            0
        } else {
            self.prefix_heights.get(index - 1).copied().unwrap_or(0)
        }
    }

    pub fn push(&mut self, height: u32) {
        let top = self.total_height();
        self.heights.push(height);
        self.prefix_heights.push(top.saturating_add(height));
    }

    pub fn rebuild(&mut self, units: &[DisplayUnit], content_width: u16) {
        self.content_width = content_width;
        self.heights.clear();
        self.prefix_heights.clear();
        for unit in units {
            self.push(Entry::calculate_height(unit, content_width));
        }
    }

    /// Entries intersecting the rows `offset..offset + viewport_height`.
    pub fn visible_range(&self, offset: u32, viewport_height: u16) -> std::ops::Range<usize> {
        let view_end = offset.saturating_add(u32::from(viewport_height));
        let start = self.prefix_heights.partition_point(|&end| end <= offset);
        let end = self.prefix_heights.partition_point(|&end| end < view_end);
        let end = end.saturating_add(1).min(self.prefix_heights.len());

        start..end.max(start)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    fn units(n: usize) -> Vec<DisplayUnit> {
        (0..n)
            .map(|i| DisplayUnit::user(format!("u{i}"), "hi"))
            .collect()
    }

    /// 20 columns, 3 rows; every test unit is one row tall.
    fn sized_state() -> LogViewState {
        let mut state = LogViewState::new();
        state.resize(20, 3, &[]);
        state
    }

    #[test]
    fn test_appends_at_bottom_stay_pinned() {
        let mut state = sized_state();
        for unit in &units(10) {
            state.append(unit);
            assert!(state.is_at_bottom());
        }
        assert_eq!(state.offset(), 7);
        assert_eq!(state.max_offset(), 7);
        assert!(!state.has_unseen_content());
    }

    #[test]
    fn test_append_while_scrolled_away_keeps_position() {
        let mut state = sized_state();
        state.sync(&units(10));

        state.handle_event(&TuiEvent::ScrollUp);
        state.handle_event(&TuiEvent::ScrollUp);
        assert_eq!(state.offset(), 5);

        state.append(&DisplayUnit::system("Connection closed"));
        assert_eq!(state.offset(), 5);
        assert_eq!(state.max_offset(), 8);
        assert!(state.has_unseen_content());
    }

    #[test]
    fn test_one_row_above_bottom_is_not_pinned() {
        let mut state = sized_state();
        state.sync(&units(10));
        state.scroll_by(-1);
        assert!(!state.is_at_bottom());

        state.append(&DisplayUnit::user("late", "msg"));
        assert_eq!(state.offset(), 6);
    }

    #[test]
    fn test_returning_to_bottom_repins() {
        let mut state = sized_state();
        state.sync(&units(10));
        state.handle_event(&TuiEvent::ScrollPageUp);
        state.append(&DisplayUnit::user("x", "y"));
        assert!(state.has_unseen_content());

        state.handle_event(&TuiEvent::ScrollToBottom);
        assert!(!state.has_unseen_content());
        state.append(&DisplayUnit::user("x", "z"));
        assert_eq!(state.offset(), state.max_offset());
    }

    #[test]
    fn test_sync_appends_each_unit_once() {
        let mut state = sized_state();
        let mut log = units(4);
        state.sync(&log);
        state.sync(&log);
        assert_eq!(state.layout.len(), 4);

        log.push(DisplayUnit::user("u4", "hi"));
        state.sync(&log);
        assert_eq!(state.layout.len(), 5);
    }

    #[test]
    fn test_scroll_is_clamped() {
        let mut state = sized_state();
        state.sync(&units(5));
        state.scroll_by(100);
        assert_eq!(state.offset(), 2);
        state.scroll_by(-100);
        assert_eq!(state.offset(), 0);
    }

    #[test]
    fn test_resize_keeps_pinned_view_at_bottom() {
        let mut state = sized_state();
        let log = units(10);
        state.sync(&log);

        state.resize(20, 5, &log);
        assert_eq!(state.offset(), 5);

        // Narrow enough that "uN: hi" wraps to two rows
        state.resize(4, 5, &log);
        assert_eq!(state.layout.total_height(), 20);
        assert_eq!(state.offset(), 15);
    }

    #[test]
    fn test_short_log_never_scrolls() {
        let mut state = sized_state();
        state.sync(&units(2));
        assert_eq!(state.offset(), 0);
        assert!(state.is_at_bottom());
    }

    #[test]
    fn test_visible_range_covers_viewport() {
        let mut cache = LayoutCache::new();
        for _ in 0..20 {
            cache.push(1);
        }
        let range = cache.visible_range(10, 4);
        assert!(range.start <= 10);
        assert!(range.end >= 14);
        assert!(range.end <= 20);
    }

    fn render_to_text(state: &mut LogViewState, log: &[DisplayUnit]) -> String {
        let backend = TestBackend::new(21, 3);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal
            .draw(|f| {
                let area = f.area();
                LogView::new(state, log).render(f, area);
            })
            .unwrap();
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|c| c.symbol())
            .collect()
    }

    #[test]
    fn test_log_taller_than_u16_keeps_showing_newest() {
        let mut state = sized_state();
        let mut log = units(65_540);
        render_to_text(&mut state, &log);
        assert_eq!(state.layout.total_height(), 65_540);

        log.push(DisplayUnit::user("newest", "visible"));
        let text = render_to_text(&mut state, &log);

        assert_eq!(state.layout.top_of(65_540), 65_540);
        assert_eq!(state.offset(), state.max_offset());
        assert_eq!(state.max_offset(), 65_538);
        assert!(text.contains("newest: visible"));
    }

    #[test]
    fn test_render_clips_entry_cut_by_top_edge() {
        let mut state = sized_state();
        let log = vec![
            DisplayUnit::user("a", "0123456789 0123456789 0123456789"),
            DisplayUnit::user("b", "end"),
        ];
        state.sync(&log);
        let text = render_to_text(&mut state, &log);

        // The first entry spans several rows; only its tail fits above "b: end"
        assert!(text.contains("b: end"));
        assert!(!text.contains("a: "));
        assert!(text.contains("0123456789"));
    }

    #[test]
    fn test_render_shows_newest_entries() {
        let backend = TestBackend::new(21, 3);
        let mut terminal = Terminal::new(backend).unwrap();
        let mut state = LogViewState::new();
        let log = vec![
            DisplayUnit::system("Connection established"),
            DisplayUnit::user("alice", "one"),
            DisplayUnit::user("bob", "two"),
            DisplayUnit::user("carol", "three"),
        ];

        terminal
            .draw(|f| {
                let area = f.area();
                LogView::new(&mut state, &log).render(f, area);
            })
            .unwrap();

        let text: String = terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|c| c.symbol())
            .collect();
        // The notice wraps to two rows at width 20 and scrolls out of view
        assert!(text.contains("carol: three"));
        assert!(text.contains("alice: one"));
        assert!(!text.contains("Connection"));
        assert_eq!(state.offset(), 2);
    }
}
