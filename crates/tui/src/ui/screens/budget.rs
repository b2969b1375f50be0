use ratatui::{
    Frame,
    layout::{Constraint, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Cell, Paragraph, Row, Table, TableState},
};

use engine::{LineItem, LineKind};

use crate::{
    app::AppState,
    ui::{
        components::{
            card::{Card, StatCard},
            money,
        },
        theme::Theme,
    },
};

pub fn render(frame: &mut Frame<'_>, area: Rect, state: &AppState, theme: &Theme) {
    let [totals, tables] =
        Layout::vertical([Constraint::Length(4), Constraint::Min(0)]).areas(area);
    render_totals(frame, totals, state, theme);

    let [income, expense] =
        Layout::horizontal([Constraint::Percentage(50), Constraint::Percentage(50)])
            .areas(tables);
    render_table(frame, income, state, LineKind::Income, theme);
    render_table(frame, expense, state, LineKind::Expense, theme);
}

fn render_totals(frame: &mut Frame<'_>, area: Rect, state: &AppState, theme: &Theme) {
    let totals = state.session.totals();
    let [income, expense, net] = Layout::horizontal([
        Constraint::Ratio(1, 3),
        Constraint::Ratio(1, 3),
        Constraint::Ratio(1, 3),
    ])
    .areas(area);

    StatCard::new("Toplam Gelir", money::amount(totals.income, theme), theme).render(frame, income);
    StatCard::new("Toplam Gider", money::amount(totals.expense, theme), theme)
        .render(frame, expense);

    let pending = state.session.plan().pending_count();
    let status = totals.status().label();
    let subtitle = if pending > 0 {
        format!("{status} · {pending} kaydedilmemiş")
    } else {
        status.to_string()
    };
    let net_card =
        StatCard::new("Net", money::signed_amount(totals.net, theme), theme).subtitle(subtitle);
    net_card.render(frame, net);
}

fn render_table(
    frame: &mut Frame<'_>,
    area: Rect,
    state: &AppState,
    kind: LineKind,
    theme: &Theme,
) {
    let items = state.session.plan().items(kind);
    let focused = state.focus == kind;
    let title = format!("{} ({})", section_title(kind), items.len());
    let card = Card::new(title, theme).focused(focused);

    if items.is_empty() {
        let empty = Paragraph::new(Line::from(Span::styled(
            "Kalem yok. a ile ekleyin.",
            Style::default().fg(theme.dim),
        )));
        card.render_with(frame, area, empty);
        return;
    }

    let header = Row::new(["Kategori", "Kalem", "Tutar", ""])
        .style(Style::default().fg(theme.dim).add_modifier(Modifier::BOLD));
    let rows = items.iter().map(|item| line_row(item, theme));
    let widths = [
        Constraint::Percentage(35),
        Constraint::Percentage(35),
        Constraint::Percentage(22),
        Constraint::Length(2),
    ];

    let highlight = if focused {
        Style::default()
            .fg(theme.accent)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default()
    };
    let table = Table::new(rows, widths)
        .header(header)
        .block(card.block())
        .row_highlight_style(highlight)
        .highlight_symbol("» ");

    let mut table_state = TableState::default();
    table_state.select(Some(state.selected(kind)));
    frame.render_stateful_widget(table, area, &mut table_state);
}

fn line_row(item: &LineItem, theme: &Theme) -> Row<'static> {
    // Unsaved lines are marked until the next successful save.
    let marker = if item.is_pending() {
        Span::styled("*", Style::default().fg(theme.warning))
    } else {
        Span::raw("")
    };
    Row::new([
        Cell::from(item.category.clone()),
        Cell::from(item.label.clone()),
        Cell::from(money::amount(item.amount, theme)),
        Cell::from(marker),
    ])
}

fn section_title(kind: LineKind) -> &'static str {
    match kind {
        LineKind::Income => "Gelirler",
        LineKind::Expense => "Giderler",
    }
}
