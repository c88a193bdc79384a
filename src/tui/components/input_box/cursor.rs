//! Cursor position tracking and horizontal scrolling for the InputBox.
//!
//! `CursorState` owns the cursor byte offset and the first visible display
//! column. All methods accept `buffer: &str` explicitly; the text itself is
//! owned by `InputBox`.

use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

/// Cursor and scroll state, separated from the text buffer.
pub(super) struct CursorState {
    /// Cursor position as byte offset in buffer (0..=buffer.len())
    pub pos: usize,
    /// Display column shown at the left edge of the box
    pub scroll: usize,
}

impl CursorState {
    pub fn new() -> Self {
        Self { pos: 0, scroll: 0 }
    }

    /// Reset cursor to start (used after a sent message clears the buffer).
    pub fn reset(&mut self) {
        self.pos = 0;
        self.scroll = 0;
    }

    pub fn move_left(&mut self, buffer: &str) {
        if self.pos > 0 {
            self.pos = prev_char_boundary(buffer, self.pos);
        }
    }

    pub fn move_right(&mut self, buffer: &str) {
        if self.pos < buffer.len() {
            self.pos = next_char_boundary(buffer, self.pos);
        }
    }

    /// Display column of the cursor within the whole buffer.
    pub fn column(&self, buffer: &str) -> usize {
        buffer[..self.pos].width()
    }

    /// Scroll horizontally so the cursor stays inside `width` columns.
    pub fn update_scroll(&mut self, buffer: &str, width: usize) {
        if width == 0 {
            self.scroll = 0;
            return;
        }
        let column = self.column(buffer);
        if column < self.scroll {
            self.scroll = column;
        } else if column >= self.scroll + width {
            self.scroll = column + 1 - width;
        }
    }

    /// The part of `buffer` visible from the current scroll column.
    pub fn visible<'a>(&self, buffer: &'a str, width: usize) -> &'a str {
        let mut skipped = 0;
        let mut start = buffer.len();
        for (i, c) in buffer.char_indices() {
            if skipped >= self.scroll {
                start = i;
                break;
            }
            skipped += c.width().unwrap_or(0);
        }

        let rest = &buffer[start..];
        let mut used = 0;
        let mut end = rest.len();
        for (i, c) in rest.char_indices() {
            let w = c.width().unwrap_or(0);
            if used + w > width {
                end = i;
                break;
            }
            used += w;
        }
        &rest[..end]
    }
}

/// Find the byte offset of the previous character boundary before `pos` in `text`.
pub(super) fn prev_char_boundary(text: &str, pos: usize) -> usize {
    text[..pos]
        .char_indices()
        .next_back()
        .map(|(i, _)| i)
        .unwrap_or(0)
}

/// Find the byte offset of the next character boundary after `pos` in `text`.
pub(super) fn next_char_boundary(text: &str, pos: usize) -> usize {
    text[pos..]
        .char_indices()
        .nth(1)
        .map(|(i, _)| pos + i)
        .unwrap_or(text.len())
}
