//! # StatusBar Component
//!
//! Top line showing where we are connected and whether the link is up.
//!
//! ## Responsibilities
//!
//! - Display the endpoint URL
//! - Display the connection status as a label plus a matching style
//! - Show a "↓ New" indicator when entries arrived below the scroll position
//!
//! The status is two-valued: `Connecting` renders exactly like `Closed`
//! ("Disconnected"). Only an open connection shows "Connected".
//!
//! ```text
//! hubchat ws://localhost:8080/ws | Connected | ↓ New
//! ```

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};

use crate::core::connection::ConnectionState;
use crate::tui::component::Component;

/// The two visual states of the indicator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusClass {
    Connected,
    Disconnected,
}

impl StatusClass {
    pub fn label(self) -> &'static str {
        match self {
            StatusClass::Connected => "Connected",
            StatusClass::Disconnected => "Disconnected",
        }
    }

    pub fn style(self) -> Style {
        match self {
            StatusClass::Connected => Style::default()
                .fg(Color::Green)
                .add_modifier(Modifier::BOLD),
            StatusClass::Disconnected => Style::default()
                .fg(Color::Red)
                .add_modifier(Modifier::BOLD),
        }
    }
}

impl From<ConnectionState> for StatusClass {
    fn from(state: ConnectionState) -> Self {
        match state {
            ConnectionState::Open => StatusClass::Connected,
            ConnectionState::Connecting | ConnectionState::Closed => StatusClass::Disconnected,
        }
    }
}

/// Top status bar.
///
/// `class` is updated from the connection state each frame; `endpoint` and
/// `has_unseen_content` are props from the parent.
pub struct StatusBar {
    pub endpoint: String,
    pub has_unseen_content: bool,
    class: StatusClass,
}

impl StatusBar {
    pub fn new(endpoint: String) -> Self {
        Self {
            endpoint,
            has_unseen_content: false,
            class: StatusClass::Disconnected,
        }
    }

    pub fn update(&mut self, state: ConnectionState) {
        self.class = state.into();
    }

    pub fn class(&self) -> StatusClass {
        self.class
    }

    pub fn label(&self) -> &'static str {
        self.class.label()
    }
}

impl Component for StatusBar {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let mut spans = vec![
            Span::styled("hubchat ", Style::default().add_modifier(Modifier::BOLD)),
            Span::raw(self.endpoint.as_str()),
            Span::raw(" | "),
            Span::styled(self.label(), self.class.style()),
        ];
        if self.has_unseen_content {
            spans.push(Span::raw(" | "));
            spans.push(Span::styled("↓ New", Style::default().fg(Color::Yellow)));
        }

        frame.render_widget(Line::from(spans), area);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    fn render_to_text(bar: &mut StatusBar) -> String {
        let backend = TestBackend::new(60, 1);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal
            .draw(|f| {
                let area = f.area();
                bar.render(f, area);
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
    fn test_starts_disconnected() {
        let bar = StatusBar::new("ws://localhost:8080/ws".to_string());
        assert_eq!(bar.class(), StatusClass::Disconnected);
        assert_eq!(bar.label(), "Disconnected");
    }

    #[test]
    fn test_update_is_two_valued() {
        let mut bar = StatusBar::new(String::new());

        bar.update(ConnectionState::Open);
        assert_eq!(bar.label(), "Connected");
        assert_eq!(bar.class(), StatusClass::Connected);

        bar.update(ConnectionState::Connecting);
        assert_eq!(bar.label(), "Disconnected");

        bar.update(ConnectionState::Closed);
        assert_eq!(bar.class(), StatusClass::Disconnected);
    }

    #[test]
    fn test_render_shows_endpoint_and_status() {
        let mut bar = StatusBar::new("ws://localhost:8080/ws".to_string());
        bar.update(ConnectionState::Open);

        let text = render_to_text(&mut bar);
        assert!(text.contains("hubchat"));
        assert!(text.contains("ws://localhost:8080/ws"));
        assert!(text.contains("Connected"));
        assert!(!text.contains("↓ New"));
    }

    #[test]
    fn test_render_unseen_indicator() {
        let mut bar = StatusBar::new("ws://h/ws".to_string());
        bar.has_unseen_content = true;

        let text = render_to_text(&mut bar);
        assert!(text.contains("Disconnected"));
        assert!(text.contains("↓ New"));
    }
}
