//! Chart tabs: fare by distance, fare by hour, payment mix.

use ratatui::{
    prelude::*,
    symbols::Marker,
    widgets::{
        Axis, Bar, BarChart, BarGroup, Block, Borders, Chart, Dataset, Gauge, GraphType, Tabs,
    },
};

use crate::charts::{fare_by_distance, fare_by_hour, payment_mix, MAX_CHART_DISTANCE};
use crate::tui::app::{App, ChartTab};

pub fn draw_charts(frame: &mut Frame, area: Rect, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(3), Constraint::Min(5)])
        .split(area);

    draw_tab_bar(frame, chunks[0], app);

    match app.current_tab {
        ChartTab::Distance => draw_distance_chart(frame, chunks[1], app),
        ChartTab::Time => draw_hourly_chart(frame, chunks[1], app),
        ChartTab::Payment => draw_payment_chart(frame, chunks[1]),
    }
}

fn draw_tab_bar(frame: &mut Frame, area: Rect, app: &App) {
    let titles: Vec<Line> = ChartTab::all()
        .iter()
        .enumerate()
        .map(|(i, tab)| Line::from(format!(" {} {} ", i + 1, tab.name())))
        .collect();

    let tabs = Tabs::new(titles)
        .block(Block::default().borders(Borders::ALL).title(" Data Visualization "))
        .select(app.current_tab.index())
        .style(Style::default().fg(Color::White))
        .highlight_style(
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        )
        .divider("|");

    frame.render_widget(tabs, area);
}

fn draw_distance_chart(frame: &mut Frame, area: Rect, app: &App) {
    let series = fare_by_distance(&app.ride);
    let highlight = [series.highlight];

    let y_min = series.points.first().map_or(0.0, |p| p.1);
    let y_max = series.points.last().map_or(1.0, |p| p.1);

    let datasets = vec![
        Dataset::default()
            .name("Fare")
            .marker(Marker::Braille)
            .graph_type(GraphType::Line)
            .style(Style::default().fg(Color::Cyan))
            .data(&series.points),
        Dataset::default()
            .name("Your trip")
            .marker(Marker::Block)
            .graph_type(GraphType::Scatter)
            .style(Style::default().fg(Color::Red))
            .data(&highlight),
    ];

    let chart = Chart::new(datasets)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(" Fare vs Distance "),
        )
        .x_axis(
            Axis::default()
                .title("Trip Distance (miles)")
                .style(Style::default().fg(Color::Gray))
                .bounds([0.0, MAX_CHART_DISTANCE])
                .labels(vec![
                    Span::raw("0"),
                    Span::raw(format!("{}", MAX_CHART_DISTANCE / 2.0)),
                    Span::raw(format!("{}", MAX_CHART_DISTANCE)),
                ]),
        )
        .y_axis(
            Axis::default()
                .title("Fare Amount ($)")
                .style(Style::default().fg(Color::Gray))
                .bounds([y_min, y_max])
                .labels(vec![
                    Span::raw(format!("{:.1}", y_min)),
                    Span::raw(format!("{:.1}", (y_min + y_max) / 2.0)),
                    Span::raw(format!("{:.1}", y_max)),
                ]),
        );

    frame.render_widget(chart, area);
}

fn draw_hourly_chart(frame: &mut Frame, area: Rect, app: &App) {
    let series = fare_by_hour(app.ride.hour);

    let bars: Vec<Bar> = series
        .fares
        .iter()
        .enumerate()
        .map(|(h, fare)| {
            let color = if h == series.highlight_hour as usize {
                Color::Red
            } else {
                Color::Blue
            };
            Bar::default()
                // cents, BarChart only takes integers
                .value((fare * 100.0).round() as u64)
                .text_value(format!("{:.0}", fare))
                .label(Line::from(h.to_string()))
                .style(Style::default().fg(color))
        })
        .collect();

    let chart = BarChart::default()
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(" Average Fare by Hour of Day "),
        )
        .bar_width(3)
        .bar_gap(1)
        .data(BarGroup::default().bars(&bars));

    frame.render_widget(chart, area);
}

fn draw_payment_chart(frame: &mut Frame, area: Rect) {
    let mix = payment_mix();

    let block = Block::default()
        .borders(Borders::ALL)
        .title(" Payment Type Distribution ");
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints(mix.iter().map(|_| Constraint::Length(1)))
        .split(inner);

    for (slice, row) in mix.iter().zip(rows.iter()) {
        let gauge = Gauge::default()
            .gauge_style(Style::default().fg(Color::Magenta))
            .ratio(slice.percent / 100.0)
            .label(format!("{} {:.1}%", slice.label, slice.percent));
        frame.render_widget(gauge, *row);
    }
}
