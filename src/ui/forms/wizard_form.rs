//! Step view of a running wizard

use super::field_renderer::{draw_field_with_value, row_line};
use crate::app::App;
use crate::state::{FieldRow, FormState, RowKind, WizardSession};
use crate::ui::components::{render_action_button, BUTTON_HEIGHT};
use crate::ui::widgets::render_scrollable_list;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, Paragraph},
    Frame,
};

/// Draw the current step with its action panel
pub fn draw_wizard(frame: &mut Frame, area: Rect, app: &App) {
    let Some(session) = app.state.session.as_ref() else {
        return;
    };

    // Split into form (left) and action panel (right)
    let main_chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Min(40),    // Form area
            Constraint::Length(20), // Action panel
        ])
        .split(area);

    draw_step(frame, main_chunks[0], app, session);
    draw_action_panel(frame, main_chunks[1], session);
}

fn draw_step(frame: &mut Frame, area: Rect, app: &App, session: &WizardSession) {
    let rows = app.state.current_rows();
    let active = app.state.cursor.active_row;
    let active_row = rows.get(active);
    let editor_height = match active_row {
        Some(row) if row.is_multiline() => 8,
        _ => 3,
    };

    let (step, total) = session.progress();
    let block = Block::default()
        .title(format!(" {} ", session.current_step().title))
        .title_bottom(format!(" Step {step} of {total} "))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),             // Progress
            Constraint::Min(3),                // Rows
            Constraint::Length(editor_height), // Active field
        ])
        .split(inner);

    frame.render_widget(Paragraph::new(progress_line(session)), chunks[0]);

    let state = session.state();
    let draft = app.state.cursor.draft.as_str();
    let items: Vec<ListItem> = rows
        .iter()
        .enumerate()
        .map(|(idx, row)| ListItem::new(row_line(row, state, draft, idx == active)))
        .collect();
    render_scrollable_list(frame, chunks[1], List::new(items), active);

    if let Some(row) = active_row {
        draw_editor(frame, chunks[2], row, state, draft);
    }
}

/// Step titles with the current one highlighted, plus readiness
fn progress_line(session: &WizardSession) -> Line<'static> {
    let mut spans = Vec::new();
    for (idx, step) in session.steps().iter().enumerate() {
        if idx > 0 {
            spans.push(Span::styled(" → ", Style::default().fg(Color::DarkGray)));
        }
        let style = match idx.cmp(&session.current_step_index()) {
            std::cmp::Ordering::Less => Style::default().fg(Color::Green),
            std::cmp::Ordering::Equal => Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
            std::cmp::Ordering::Greater => Style::default().fg(Color::DarkGray),
        };
        spans.push(Span::styled(step.title.clone(), style));
    }

    let (label, color) = if session.is_current_step_ready() {
        ("  ● ready", Color::Green)
    } else {
        ("  ○ incomplete", Color::Yellow)
    };
    spans.push(Span::styled(label, Style::default().fg(color)));
    Line::from(spans)
}

/// Full value of the active row, or how to operate it
fn draw_editor(frame: &mut Frame, area: Rect, row: &FieldRow, state: &FormState, draft: &str) {
    if row.accepts_text() {
        let value = row.display(state, draft);
        draw_field_with_value(frame, area, &row.label, &value, true, row.is_multiline());
        return;
    }

    let help = match row.kind {
        RowKind::Option(_) => "Space: toggle this option",
        RowKind::Select(_) => "Space: next choice",
        RowKind::AddRecord(_) => "Enter: add a new entry",
        _ => "",
    };
    let paragraph = Paragraph::new(Span::styled(help, Style::default().fg(Color::DarkGray)))
        .block(
            Block::default()
                .title(format!(" {} ", row.label))
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::DarkGray)),
        );
    frame.render_widget(paragraph, area);
}

/// Buttons mirror the shortcuts; they light up when the move is allowed
fn draw_action_panel(frame: &mut Frame, area: Rect, session: &WizardSession) {
    let block = Block::default()
        .title(" Actions ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::DarkGray));
    let inner_area = block.inner(area);
    frame.render_widget(block, area);

    let button_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(BUTTON_HEIGHT), // Next or Submit
            Constraint::Length(BUTTON_HEIGHT), // Back
            Constraint::Min(0),
        ])
        .split(inner_area);

    let ready = session.is_current_step_ready();
    let (primary, accent) = if session.is_last() {
        ("Submit", Color::Green)
    } else {
        ("Next", Color::Blue)
    };
    render_action_button(frame, button_chunks[0], primary, ready, ready, Some(accent));

    let can_go_back = !session.is_first();
    render_action_button(
        frame,
        button_chunks[1],
        "Back",
        false,
        can_go_back,
        Some(Color::Gray),
    );
}
