//! Home view: pick a registration flow

use super::widgets::render_scrollable_list;
use crate::app::App;
use crate::state::FlowKind;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, Paragraph},
    Frame,
};

/// Draw the flow picker
pub fn draw(frame: &mut Frame, area: Rect, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Intro
            Constraint::Min(0),    // Flows
        ])
        .margin(1)
        .split(area);

    let block = Block::default()
        .title(" Registration ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));
    frame.render_widget(block, area);

    let intro = Paragraph::new(vec![
        Line::from("Choose who is registering."),
        Line::from(Span::styled(
            "Progress is kept until you submit or press Esc.",
            Style::default().fg(Color::DarkGray),
        )),
    ]);
    frame.render_widget(intro, chunks[0]);

    let items: Vec<ListItem> = FlowKind::ALL
        .iter()
        .enumerate()
        .map(|(idx, flow)| {
            let is_selected = idx == app.state.selected_index;
            let marker = if is_selected { "▸ " } else { "  " };
            let label_style = if is_selected {
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default()
            };
            let steps = flow.steps();
            let titles: Vec<&str> = steps.iter().map(|step| step.title.as_str()).collect();

            ListItem::new(vec![
                Line::from(vec![
                    Span::raw(marker),
                    Span::styled(flow.label(), label_style),
                ]),
                Line::from(Span::styled(
                    format!("    {} steps: {}", steps.len(), titles.join(" → ")),
                    Style::default().fg(Color::DarkGray),
                )),
            ])
        })
        .collect();

    let list = List::new(items);
    render_scrollable_list(frame, chunks[1], list, app.state.selected_index);
}
