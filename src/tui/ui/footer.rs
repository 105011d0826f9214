//! Footer bar widget with keyboard shortcuts.

use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Paragraph},
};

use crate::tui::app::App;

const HELP: &str =
    "[↑↓] Field  [←→] Adjust  [PgUp/PgDn] x10  [Tab/1-3] Chart  [r] Reset  [q] Quit";

/// Draw the footer bar with help and any status message.
pub fn draw_footer(frame: &mut Frame, area: Rect, app: &App) {
    let display_text = if let Some((status, _)) = &app.status_message {
        format!("{} | {}", status, HELP)
    } else {
        HELP.to_string()
    };

    let footer = Paragraph::new(display_text)
        .style(Style::default().fg(Color::DarkGray))
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::TOP));

    frame.render_widget(footer, area);
}
