//! Sidebar form with one row per ride attribute.

use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Paragraph},
};

use crate::tui::app::{App, Field};

pub fn draw_form(frame: &mut Frame, area: Rect, app: &App) {
    let mut lines: Vec<Line> = Vec::with_capacity(Field::all().len() + 2);

    for field in Field::all() {
        if field.starts_charges() {
            lines.push(Line::from(""));
            lines.push(Line::from(Span::styled(
                "Additional Charges",
                Style::default().add_modifier(Modifier::BOLD),
            )));
        }

        let selected = *field == app.selected_field;
        let marker = if selected { "▶ " } else { "  " };
        let text = format!(
            "{}{:<26}{:>14}",
            marker,
            field.label(),
            field.display(&app.ride)
        );
        let style = if selected {
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::White)
        };
        lines.push(Line::from(text).style(style));
    }

    let form = Paragraph::new(lines).block(
        Block::default()
            .borders(Borders::ALL)
            .title(" Ride Information "),
    );
    frame.render_widget(form, area);
}
