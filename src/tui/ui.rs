use ratatui::Frame;
use ratatui::layout::{Constraint, Layout};

use crate::core::state::Chat;
use crate::tui::TuiState;
use crate::tui::component::Component;
use crate::tui::components::LogView;
use crate::tui::components::input_box;

/// Lay out and draw one frame:
///
/// ```text
/// ┌──────────────────────────────────────┐
/// │ status bar (1 row)                   │
/// ├──────────────────────────────────────┤
/// │ log view (rest)                      │
/// ├──────────────────────────────────────┤
/// │ input box (3 rows)                   │
/// └──────────────────────────────────────┘
/// ```
pub fn draw_ui(frame: &mut Frame, chat: &Chat, tui: &mut TuiState) {
    use Constraint::{Length, Min};
    let layout = Layout::vertical([Length(1), Min(0), Length(input_box::HEIGHT)]);
    let [status_area, log_area, input_area] = layout.areas(frame.area());

    // The log goes first: rendering may move the scroll position, and the
    // status bar reports whether anything is left below it
    LogView::new(&mut tui.log_view, chat.log.units()).render(frame, log_area);

    tui.status_bar.update(chat.connection.state());
    tui.status_bar.has_unseen_content = tui.log_view.has_unseen_content();
    tui.status_bar.render(frame, status_area);

    tui.input_box.focused = tui.input_mode == crate::tui::InputMode::Input;
    tui.input_box.render(frame, input_area);
}
