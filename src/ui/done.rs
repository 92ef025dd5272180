//! Done view: result of the last submission

use crate::app::App;
use crate::state::Outcome;
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

pub fn draw(frame: &mut Frame, area: Rect, app: &App) {
    let label = Style::default().fg(Color::DarkGray);

    let (title, color, lines) = match &app.state.outcome {
        Some(Outcome::Delivered { flow, receipt }) => (
            " Submitted ",
            Color::Green,
            vec![
                Line::from(Span::styled(
                    "Thanks! Your registration was received.",
                    Style::default().add_modifier(Modifier::BOLD),
                )),
                Line::from(""),
                Line::from(vec![Span::styled("Flow:     ", label), Span::raw(flow.clone())]),
                Line::from(vec![
                    Span::styled("Id:       ", label),
                    Span::raw(receipt.id.to_string()),
                ]),
                Line::from(vec![
                    Span::styled("Received: ", label),
                    Span::raw(receipt.submitted_at.format("%Y-%m-%d %H:%M:%S UTC").to_string()),
                ]),
                Line::from(vec![
                    Span::styled("Saved to: ", label),
                    Span::raw(receipt.location.clone()),
                ]),
            ],
        ),
        Some(Outcome::Failed { submission }) => (
            " Not delivered ",
            Color::Red,
            vec![
                Line::from(Span::styled(
                    format!("The {} registration could not be saved.", submission.flow),
                    Style::default().add_modifier(Modifier::BOLD),
                )),
                Line::from(""),
                Line::from("Press r to try again. Leaving this screen discards it."),
            ],
        ),
        None => (" Done ", Color::DarkGray, vec![Line::from("Nothing submitted yet.")]),
    };

    let block = Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_style(Style::default().fg(color));

    frame.render_widget(
        Paragraph::new(lines)
            .wrap(Wrap { trim: false })
            .block(block),
        area,
    );
}
