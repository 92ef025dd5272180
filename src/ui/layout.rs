//! Layout components (content area, status bar)

use crate::app::App;
use crate::platform::{BACK_SHORTCUT, NEXT_SHORTCUT, REMOVE_SHORTCUT, SUBMIT_SHORTCUT};
use crate::state::{Outcome, View};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

/// Create the main layout, reserving the bottom line for the status bar
pub fn create_layout(area: Rect) -> Rect {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(0),    // Content
            Constraint::Length(1), // Status bar
        ])
        .split(area);

    chunks[0]
}

/// Draw the status bar
pub fn draw_status_bar(frame: &mut Frame, app: &App) {
    let area = frame.area();
    let status_area = Rect {
        x: 0,
        y: area.height.saturating_sub(1),
        width: area.width,
        height: 1,
    };

    let mut spans = vec![Span::raw(" ")];

    // View-specific hints
    let failed = matches!(app.state.outcome, Some(Outcome::Failed { .. }));
    let hints = get_view_hints(app.state.current_view, failed);
    spans.push(Span::styled(hints, Style::default().fg(Color::Gray)));

    // Rejected navigation and other hints
    if let Some(msg) = &app.state.status_message {
        spans.push(Span::raw(" | "));
        spans.push(Span::styled(msg, Style::default().fg(Color::Yellow)));
    }

    let quit_hint = " ^C:quit ";

    let status = Paragraph::new(Line::from(spans)).style(Style::default().bg(Color::DarkGray));
    frame.render_widget(status, status_area);

    // Render quit hint on the right
    let quit_area = Rect {
        x: area.width.saturating_sub(quit_hint.len() as u16),
        y: area.height.saturating_sub(1),
        width: (quit_hint.len() as u16).min(area.width),
        height: 1,
    };
    let quit_widget =
        Paragraph::new(quit_hint).style(Style::default().bg(Color::DarkGray).fg(Color::Gray));
    frame.render_widget(quit_widget, quit_area);
}

/// Get keyboard hints for the current view
fn get_view_hints(view: View, failed: bool) -> String {
    match view {
        View::Home => "j/k:nav  Enter:start  q:quit".to_string(),
        View::Wizard => format!(
            "Tab:field  Space:toggle  {NEXT_SHORTCUT}:next  {BACK_SHORTCUT}:back  \
             {REMOVE_SHORTCUT}:remove  {SUBMIT_SHORTCUT}:submit  Esc:home"
        ),
        View::Done if failed => "r:retry  Enter:home  q:quit".to_string(),
        View::Done => "Enter:home  q:quit".to_string(),
    }
}
