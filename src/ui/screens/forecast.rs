use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    symbols,
    text::{Line, Span},
    widgets::{Axis, Block, Borders, Chart, Dataset, GraphType, Paragraph},
    Frame,
};
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;

use crate::forecast::HORIZON_DAYS;
use crate::ui::app::App;
use crate::ui::theme;
use crate::ui::util::format_amount;

pub(crate) fn render(f: &mut Frame, area: Rect, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(7), // Summary cards
            Constraint::Length(4), // Wallet & goal panel
            Constraint::Min(10),   // Balance chart
        ])
        .split(area);

    render_summary_cards(f, chunks[0], app);
    render_wallet_panel(f, chunks[1], app);
    render_balance_chart(f, chunks[2], app);
}

fn render_summary_cards(f: &mut Frame, area: Rect, app: &App) {
    let cards = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(33),
            Constraint::Percentage(34),
            Constraint::Percentage(33),
        ])
        .split(area);

    let forecast = &app.forecast;
    let months = HORIZON_DAYS / 30;

    let end_label = forecast
        .series
        .last()
        .map(|d| format!("on {}", d.date.format("%d %b %Y")));
    render_amount_card(
        f,
        cards[0],
        &format!("Balance in {months} mo."),
        forecast.final_balance,
        if forecast.final_balance >= Decimal::ZERO {
            theme::GREEN
        } else {
            theme::RED
        },
        end_label,
    );

    render_amount_card(
        f,
        cards[1],
        "Lowest Point",
        forecast.min_balance,
        if forecast.is_safe() {
            theme::GREEN
        } else {
            theme::RED
        },
        None,
    );

    let (verdict, subtitle) = match forecast.first_shortfall {
        Some(date) => (
            format!("Shortfall on {}", date.format("%d %b")),
            "this goal does not fit".to_string(),
        ),
        None => (
            "Safe budget".to_string(),
            format!("buffer of {}", format_amount(forecast.min_balance)),
        ),
    };
    render_text_card(f, cards[2], "Verdict", &verdict, subtitle, forecast.is_safe());
}

fn render_amount_card(
    f: &mut Frame,
    area: Rect,
    title: &str,
    amount: Decimal,
    color: ratatui::style::Color,
    subtitle: Option<String>,
) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme::OVERLAY))
        .title(Span::styled(format!(" {title} "), theme::title_style()));

    let sub_text = subtitle.unwrap_or_default();

    let text = Paragraph::new(vec![
        Line::from(""),
        Line::from(Span::styled(
            format_amount(amount),
            Style::default().fg(color).add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(sub_text, theme::dim_style())),
    ])
    .centered()
    .block(block);

    f.render_widget(text, area);
}

fn render_text_card(
    f: &mut Frame,
    area: Rect,
    title: &str,
    body: &str,
    subtitle: String,
    safe: bool,
) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme::OVERLAY))
        .title(Span::styled(format!(" {title} "), theme::title_style()));

    let text = Paragraph::new(vec![
        Line::from(""),
        Line::from(Span::styled(body.to_string(), theme::verdict_style(safe))),
        Line::from(Span::styled(subtitle, theme::dim_style())),
    ])
    .centered()
    .block(block);

    f.render_widget(text, area);
}

fn render_wallet_panel(f: &mut Frame, area: Rect, app: &App) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme::OVERLAY))
        .title(Span::styled(" Wallet & Goal ", theme::title_style()));

    let goal_when = if app.goal.day_offset >= HORIZON_DAYS {
        "beyond the horizon".to_string()
    } else {
        let date = app.today + chrono::Duration::days(i64::from(app.goal.day_offset));
        format!("{}", date.format("%d %b %Y"))
    };

    let lines = vec![
        Line::from(vec![
            Span::styled("Balance ", theme::dim_style()),
            Span::styled(
                format_amount(app.wallet.starting_balance),
                theme::normal_style(),
            ),
            Span::styled("   Salary ", theme::dim_style()),
            Span::styled(
                format_amount(app.wallet.salary_amount),
                theme::normal_style(),
            ),
            Span::styled(
                format!(" on day {}", app.wallet.salary_day),
                theme::dim_style(),
            ),
        ]),
        Line::from(vec![
            Span::styled("Goal    ", theme::dim_style()),
            Span::styled(format_amount(app.goal.cost), theme::normal_style()),
            Span::styled(
                format!(" in {} days → {goal_when}", app.goal.day_offset),
                theme::dim_style(),
            ),
        ]),
    ];

    f.render_widget(Paragraph::new(lines).block(block), area);
}

fn render_balance_chart(f: &mut Frame, area: Rect, app: &App) {
    let series = &app.forecast.series;
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme::OVERLAY))
        .title(Span::styled(
            format!(" {HORIZON_DAYS}-Day Projection "),
            theme::title_style(),
        ));

    if series.is_empty() {
        let msg = Paragraph::new(Line::from(Span::styled(
            "Nothing to project yet",
            theme::dim_style(),
        )))
        .centered()
        .block(block);
        f.render_widget(msg, area);
        return;
    }

    let data: Vec<(f64, f64)> = series
        .iter()
        .enumerate()
        .map(|(i, d)| (i as f64, d.balance.to_f64().unwrap_or(0.0)))
        .collect();

    let x_max = (series.len() - 1) as f64;
    let y_min_raw = data.iter().map(|(_, y)| *y).fold(f64::INFINITY, f64::min);
    let y_max_raw = data
        .iter()
        .map(|(_, y)| *y)
        .fold(f64::NEG_INFINITY, f64::max);
    let padding = (y_max_raw - y_min_raw).abs().max(1.0) * 0.1;
    // Keep the zero line in frame so a dip below it is always visible
    let y_min = (y_min_raw - padding).min(0.0);
    let y_max = y_max_raw + padding;

    let color = if app.forecast.is_safe() {
        theme::GREEN
    } else {
        theme::RED
    };

    let dataset = Dataset::default()
        .name("balance")
        .marker(symbols::Marker::Braille)
        .graph_type(GraphType::Line)
        .style(Style::default().fg(color))
        .data(&data);

    let mid_idx = series.len() / 2;
    let x_labels = vec![
        Span::raw(series[0].date.format("%d %b").to_string()),
        Span::raw(series[mid_idx].date.format("%d %b").to_string()),
        Span::raw(series[series.len() - 1].date.format("%d %b").to_string()),
    ];
    let y_labels = vec![
        Span::raw(format!("{y_min:.0}")),
        Span::raw(format!("{:.0}", (y_min + y_max) / 2.0)),
        Span::raw(format!("{y_max:.0}")),
    ];

    let chart = Chart::new(vec![dataset])
        .block(block)
        .x_axis(
            Axis::default()
                .style(theme::dim_style())
                .bounds([0.0, x_max.max(1.0)])
                .labels(x_labels),
        )
        .y_axis(
            Axis::default()
                .style(theme::dim_style())
                .bounds([y_min, y_max])
                .labels(y_labels),
        );

    f.render_widget(chart, area);
}
