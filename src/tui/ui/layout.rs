//! Main layout for the TUI.

use ratatui::prelude::*;

use super::charts::draw_charts;
use super::fare::{draw_breakdown, draw_prediction, draw_tips};
use super::footer::draw_footer;
use super::form::draw_form;
use super::header::draw_header;
use crate::tui::app::App;

/// Draw the main UI layout.
pub fn draw_ui(frame: &mut Frame, app: &App) {
    let size = frame.area();

    // header, body, footer
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(20),
            Constraint::Length(2),
        ])
        .split(size);

    draw_header(frame, chunks[0], app);

    // sidebar form | results
    let body = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Length(46), Constraint::Min(40)])
        .split(chunks[1]);

    draw_form(frame, body[0], app);

    let main = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(6),  // Prediction
            Constraint::Length(11), // Breakdown
            Constraint::Min(10),    // Charts
            Constraint::Length(9),  // Tips
        ])
        .split(body[1]);

    draw_prediction(frame, main[0], app);
    draw_breakdown(frame, main[1], app);
    draw_charts(frame, main[2], app);
    draw_tips(frame, main[3]);

    draw_footer(frame, chunks[2], app);
}
