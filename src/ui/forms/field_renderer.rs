//! Field rendering utilities for forms

use crate::state::{FieldRow, FormState, RowKind};
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

/// Widest value shown inline in the row list
const INLINE_VALUE_WIDTH: usize = 40;

/// One line of the row list
pub fn row_line(row: &FieldRow, state: &FormState, draft: &str, is_active: bool) -> Line<'static> {
    let indent = "  ".repeat(row.depth as usize);
    let marker = if is_active { "▸ " } else { "  " };
    let label_style = if is_active {
        Style::default()
            .fg(Color::Cyan)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default()
    };

    let label = Span::styled(format!("{marker}{indent}{}", row.label), label_style);
    let value = row.display(state, draft);

    match row.kind {
        RowKind::Option(_) => Line::from(vec![
            Span::styled(
                format!("{marker}{indent}{value} "),
                Style::default().fg(if value == "[x]" {
                    Color::Green
                } else {
                    Color::DarkGray
                }),
            ),
            Span::styled(row.label.clone(), label_style),
        ]),
        RowKind::AddRecord(_) => Line::from(Span::styled(
            format!("{marker}{indent}{}", row.label),
            label_style.fg(Color::Green),
        )),
        _ => Line::from(vec![
            label,
            Span::raw(": "),
            Span::styled(
                inline_value(&value),
                Style::default().fg(if value.is_empty() {
                    Color::DarkGray
                } else {
                    Color::White
                }),
            ),
        ]),
    }
}

/// Single-line preview of a value
fn inline_value(value: &str) -> String {
    if value.is_empty() {
        return "(empty)".to_string();
    }
    let flat = value.replace('\n', " ⏎ ");
    if flat.chars().count() > INLINE_VALUE_WIDTH {
        let cut: String = flat.chars().take(INLINE_VALUE_WIDTH - 1).collect();
        format!("{cut}…")
    } else {
        flat
    }
}

/// Draw a form field with a custom display value
pub fn draw_field_with_value(
    frame: &mut Frame,
    area: Rect,
    label: &str,
    value: &str,
    is_active: bool,
    is_multiline: bool,
) {
    let style = if is_active {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default().fg(Color::DarkGray)
    };

    let border_style = if is_active {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default().fg(Color::DarkGray)
    };

    let display_value = if value.is_empty() && !is_active {
        "(empty)"
    } else {
        value
    };

    let cursor = if is_active { "▌" } else { "" };

    let content = if is_multiline {
        let mut lines: Vec<Line> = display_value
            .split('\n')
            .map(|l| Line::from(l.to_string()))
            .collect();
        if is_active {
            if let Some(last) = lines.last_mut() {
                last.spans
                    .push(Span::styled(cursor, Style::default().fg(Color::Cyan)));
            }
        }
        Paragraph::new(lines)
    } else {
        Paragraph::new(Line::from(vec![
            Span::styled(display_value, style),
            Span::styled(cursor, Style::default().fg(Color::Cyan)),
        ]))
    };

    let block = Block::default()
        .title(format!(" {} ", label))
        .borders(Borders::ALL)
        .border_style(border_style);

    frame.render_widget(content.wrap(Wrap { trim: false }).block(block), area);
}
