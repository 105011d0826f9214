//! Header bar widget.

use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Paragraph},
};

use crate::report::{SUBTITLE, TITLE};
use crate::tui::app::App;

/// Draw the header bar with title and the model in use.
pub fn draw_header(frame: &mut Frame, area: Rect, app: &App) {
    let model = match app.model.model() {
        Some(m) => format!("{} model", m.kind()),
        None => "formula".to_string(),
    };
    let lines = vec![
        Line::from(format!("{}  ({})", TITLE, model))
            .style(Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)),
        Line::from(SUBTITLE).style(Style::default().fg(Color::Gray)),
    ];
    let title = Paragraph::new(lines)
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::BOTTOM));

    frame.render_widget(title, area);
}
