//! Prediction headline, fare breakdown and rider tips.

use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Paragraph, Row, Table, Wrap},
};

use crate::charts::{DISCLAIMER, TIPS};
use crate::estimate::{self, dollars, EstimateSource, Notice, NoticeLevel};
use crate::tui::app::App;

fn notice_line(n: &Notice) -> Line<'_> {
    let color = match n.level {
        NoticeLevel::Success => Color::Green,
        NoticeLevel::Warning => Color::Yellow,
        NoticeLevel::Error => Color::Red,
    };
    Line::from(n.message.as_str()).style(Style::default().fg(color))
}

pub fn draw_prediction(frame: &mut Frame, area: Rect, app: &App) {
    let mut lines = vec![notice_line(&app.model.notice)];
    lines.extend(app.estimate.notices.iter().map(notice_line));

    let color = match app.estimate.source {
        EstimateSource::Model => Color::Green,
        EstimateSource::Formula => Color::Cyan,
    };
    lines.push(Line::from(""));
    lines.push(
        Line::from(app.estimate.headline()).style(
            Style::default()
                .fg(color)
                .add_modifier(Modifier::BOLD),
        ),
    );

    let prediction = Paragraph::new(lines)
        .block(Block::default().borders(Borders::ALL).title(" Prediction "));
    frame.render_widget(prediction, area);
}

pub fn draw_breakdown(frame: &mut Frame, area: Rect, app: &App) {
    let rows: Vec<Row> = estimate::breakdown(&app.ride)
        .into_iter()
        .map(|line| Row::new(vec![line.item.to_string(), dollars(line.amount)]))
        .collect();

    let table = Table::new(rows, [Constraint::Length(30), Constraint::Length(10)]).block(
        Block::default()
            .borders(Borders::ALL)
            .title(" Fare Breakdown "),
    );
    frame.render_widget(table, area);
}

pub fn draw_tips(frame: &mut Frame, area: Rect) {
    let mut lines: Vec<Line> = TIPS.iter().map(|t| Line::from(format!("• {}", t))).collect();
    lines.push(Line::from(DISCLAIMER).style(Style::default().fg(Color::DarkGray)));

    let tips = Paragraph::new(lines)
        .wrap(Wrap { trim: true })
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(" Tips for Taxi Users "),
        );
    frame.render_widget(tips, area);
}
