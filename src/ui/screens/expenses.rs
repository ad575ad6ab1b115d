use ratatui::{
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, Paragraph},
    Frame,
};

use crate::ui::app::App;
use crate::ui::theme;
use crate::ui::util::{format_amount, truncate};

pub(crate) fn render(f: &mut Frame, area: Rect, app: &App) {
    if app.expenses.is_empty() {
        render_empty(f, area);
        return;
    }

    let items: Vec<ListItem> = app
        .expenses
        .iter()
        .enumerate()
        .skip(app.expense_scroll)
        .take(area.height.saturating_sub(2) as usize)
        .map(|(i, expense)| {
            let style = if i == app.expense_index {
                theme::selected_style()
            } else if !expense.is_active {
                theme::dim_style()
            } else if i % 2 == 0 {
                theme::alt_row_style()
            } else {
                theme::normal_style()
            };

            let marker = if expense.is_active { "[x]" } else { "[ ]" };
            let due = if expense.is_variable() {
                "daily".to_string()
            } else {
                format!("day {}", expense.day_of_month)
            };
            let name = truncate(&expense.name, 24);

            ListItem::new(Line::from(vec![
                Span::styled(format!(" {marker} "), style),
                Span::styled(format!("{name:<25}"), style),
                Span::styled(
                    format!("{:>12}", format_amount(expense.amount)),
                    if expense.is_active && i != app.expense_index {
                        Style::default().fg(theme::YELLOW)
                    } else {
                        style
                    },
                ),
                Span::styled(format!("  {due:<7}"), style),
            ]))
        })
        .collect();

    let active = app.expenses.iter().filter(|e| e.is_active).count();
    let list = List::new(items).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(theme::OVERLAY))
            .title(Span::styled(
                format!(" Monthly Expenses ({active}/{} on) ", app.expenses.len()),
                theme::title_style(),
            )),
    );
    f.render_widget(list, area);
}

fn render_empty(f: &mut Frame, area: Rect) {
    let msg = Paragraph::new(vec![
        Line::from(""),
        Line::from(Span::styled("No expenses yet", theme::dim_style())),
        Line::from(""),
        Line::from(Span::styled(
            "Use :add <name> <amount> <day> — day 0 means daily spending",
            theme::dim_style(),
        )),
    ])
    .centered()
    .block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(theme::OVERLAY))
            .title(Span::styled(" Monthly Expenses ", theme::title_style())),
    );
    f.render_widget(msg, area);
}
