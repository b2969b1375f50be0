use ratatui::{
    Frame,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
};

use crate::{
    app::{AppState, form},
    ui::{components::card::Card, theme::Theme},
};

pub const HEIGHT: u16 = 6;

/// The add-item mini-form, one line per field.
pub fn render(frame: &mut Frame<'_>, area: Rect, state: &AppState, theme: &Theme) {
    let draft = &state.session.plan().draft;

    let lines = form::FormField::ALL
        .iter()
        .map(|field| {
            let active = *field == state.form_field;
            let value = form::value(draft, *field);
            let value = if value.is_empty() { "—" } else { value };

            let label_style = if active {
                Style::default()
                    .fg(theme.accent)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(theme.dim)
            };
            let cursor = if active { "› " } else { "  " };
            Line::from(vec![
                Span::styled(cursor, label_style),
                Span::styled(format!("{:<9}", field.label()), label_style),
                Span::styled(value.to_string(), Style::default().fg(theme.text)),
            ])
        })
        .collect::<Vec<_>>();

    Card::new("Kalem Ekle", theme)
        .focused(true)
        .render_with(frame, area, Paragraph::new(lines));
}
