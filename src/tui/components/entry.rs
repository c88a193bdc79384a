use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Paragraph, Widget, Wrap};

use crate::core::unit::{DisplayUnit, UnitKind};

/// Appended after the sender name on user entries.
pub const SENDER_SEPARATOR: &str = ": ";

/// A stateless component that renders one log entry.
///
/// # Styling
///
/// - **System** notices: one flat dim italic line.
/// - **User** messages: a bold cyan `sender: ` label followed by the body in
///   the default style. The label is drawn even when the body is empty.
///
/// # Height Calculation
///
/// [`calculate_height`](Self::calculate_height) asks the same `Paragraph`
/// the widget renders for its wrapped line count, so the log can lay out and
/// scroll without rendering every entry.
#[derive(Clone, Copy)]
pub struct Entry<'a> {
    pub unit: &'a DisplayUnit,
}

impl<'a> Entry<'a> {
    pub fn new(unit: &'a DisplayUnit) -> Self {
        Self { unit }
    }

    /// Rows needed to show `unit` at `width` columns. Never less than 1.
    pub fn calculate_height(unit: &DisplayUnit, width: u16) -> u32 {
        if width == 0 {
            return 1;
        }

        let rows = Entry::new(unit).paragraph().line_count(width);
        u32::try_from(rows).unwrap_or(u32::MAX).max(1)
    }

    /// The wrapped paragraph this entry renders as.
    pub fn paragraph(&self) -> Paragraph<'a> {
        Paragraph::new(self.line()).wrap(Wrap { trim: false })
    }

    fn line(&self) -> Line<'a> {
        match self.unit.kind() {
            UnitKind::System => Line::from(Span::styled(self.unit.body(), system_style())),
            UnitKind::User => {
                let sender = self.unit.sender().unwrap_or_default();
                Line::from(vec![
                    Span::styled(format!("{sender}{SENDER_SEPARATOR}"), sender_style()),
                    Span::styled(self.unit.body(), body_style()),
                ])
            }
        }
    }
}

/// The entry as it reads on screen, without styling.
pub fn plain_text(unit: &DisplayUnit) -> String {
    match unit.kind() {
        UnitKind::System => unit.body().to_string(),
        UnitKind::User => format!(
            "{}{SENDER_SEPARATOR}{}",
            unit.sender().unwrap_or_default(),
            unit.body()
        ),
    }
}

pub fn system_style() -> Style {
    Style::default()
        .fg(Color::DarkGray)
        .add_modifier(Modifier::ITALIC)
}

pub fn sender_style() -> Style {
    Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)
}

pub fn body_style() -> Style {
    Style::default()
}

impl<'a> Widget for Entry<'a> {
    fn render(self, area: Rect, buf: &mut ratatui::buffer::Buffer) {
        self.paragraph().render(area, buf);
    }
}
