//! # InputBox Component
//!
//! Single-line message field under the log.
//!
//! ## Responsibilities
//!
//! - Capture text input
//! - Handle editing (backspace, delete, cursor movement, paste)
//! - Emit submission on Enter without clearing; the parent clears the field
//!   only once the message was actually sent
//! - Scroll horizontally when the text is wider than the box
//!
//! ## State Management
//!
//! The buffer is internal state. `focused` is a prop from the parent.
//! Cursor position and scroll state are encapsulated in `CursorState`.

mod cursor;

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::widgets::{Block, BorderType, Paragraph};

use crate::tui::component::{Component, EventHandler};
use crate::tui::event::TuiEvent;

use cursor::{CursorState, next_char_boundary, prev_char_boundary};

/// Rows taken by the box including its border.
pub const HEIGHT: u16 = 3;

/// Columns taken by the left and right border.
const HORIZONTAL_OVERHEAD: u16 = 2;

/// High-level events emitted by the InputBox. Editing is handled
/// internally and emits nothing.
#[derive(Debug, Clone, PartialEq)]
pub enum InputEvent {
    /// User pressed Enter; carries the current text
    Submit(String),
}

/// Text input component.
///
/// # Props
///
/// - `focused`: whether keystrokes are routed here (from TuiState)
///
/// # State
///
/// - `buffer`: Current text being typed
/// - `cursor`: Cursor position and horizontal scroll (see `CursorState`)
pub struct InputBox {
    /// Text buffer (Internal State)
    pub buffer: String,
    /// Focus flag (Prop)
    pub focused: bool,
    cursor: CursorState,
}

impl Default for InputBox {
    fn default() -> Self {
        Self::new()
    }
}

impl InputBox {
    /// A focused, empty field.
    pub fn new() -> Self {
        Self {
            buffer: String::new(),
            focused: true,
            cursor: CursorState::new(),
        }
    }

    /// Empty the field after a successful send.
    pub fn clear(&mut self) {
        self.buffer.clear();
        self.cursor.reset();
    }

    pub fn cursor_pos(&self) -> usize {
        self.cursor.pos
    }

    fn insert(&mut self, text: &str) {
        // Single-line field: line breaks never enter the buffer
        let text: String = text.chars().filter(|c| *c != '\n' && *c != '\r').collect();
        self.buffer.insert_str(self.cursor.pos, &text);
        self.cursor.pos += text.len();
    }
}

impl Component for InputBox {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let width = area.width.saturating_sub(HORIZONTAL_OVERHEAD) as usize;
        self.cursor.update_scroll(&self.buffer, width);

        let (border_style, text_style) = if self.focused {
            (Style::default().fg(Color::Cyan), Style::default())
        } else {
            let dim = Style::default().add_modifier(Modifier::DIM);
            (dim, dim)
        };

        let block = Block::bordered()
            .border_type(BorderType::Rounded)
            .border_style(border_style)
            .title("Message");

        let visible = self.cursor.visible(&self.buffer, width);
        frame.render_widget(Paragraph::new(visible).style(text_style).block(block), area);

        if self.focused && width > 0 {
            let column = self.cursor.column(&self.buffer) - self.cursor.scroll;
            frame.set_cursor_position((area.x + 1 + column as u16, area.y + 1));
        }
    }
}

impl EventHandler for InputBox {
    type Event = InputEvent;

    fn handle_event(&mut self, event: &TuiEvent) -> Option<Self::Event> {
        match event {
            TuiEvent::InputChar(c) => self.insert(c.encode_utf8(&mut [0; 4])),
            TuiEvent::Paste(text) => self.insert(text),
            TuiEvent::Backspace => {
                if self.cursor.pos > 0 {
                    let prev = prev_char_boundary(&self.buffer, self.cursor.pos);
                    self.buffer.drain(prev..self.cursor.pos);
                    self.cursor.pos = prev;
                }
            }
            TuiEvent::Delete => {
                if self.cursor.pos < self.buffer.len() {
                    let next = next_char_boundary(&self.buffer, self.cursor.pos);
                    self.buffer.drain(self.cursor.pos..next);
                }
            }
            TuiEvent::CursorLeft => self.cursor.move_left(&self.buffer),
            TuiEvent::CursorRight => self.cursor.move_right(&self.buffer),
            TuiEvent::CursorHome => self.cursor.pos = 0,
            TuiEvent::CursorEnd => self.cursor.pos = self.buffer.len(),
            TuiEvent::Submit => return Some(InputEvent::Submit(self.buffer.clone())),
            _ => {}
        }
        None
    }
}
