use ratatui::{
    Frame,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
};

use engine::YearRange;

use crate::ui::theme::Theme;

/// Renders the selectable years; years with a saved budget carry a dot.
pub fn render(
    frame: &mut Frame<'_>,
    area: Rect,
    range: YearRange,
    selected: i32,
    has_data: impl Fn(i32) -> bool,
    theme: &Theme,
) {
    let mut spans = vec![Span::raw(" ")];

    for (i, year) in range.iter().enumerate() {
        if i > 0 {
            spans.push(Span::raw("  "));
        }

        let label = if has_data(year) {
            format!("{year}•")
        } else {
            year.to_string()
        };
        if year == selected {
            spans.push(Span::styled("[", Style::default().fg(theme.accent)));
            spans.push(Span::styled(
                label,
                Style::default()
                    .fg(theme.accent)
                    .add_modifier(Modifier::BOLD),
            ));
            spans.push(Span::styled("]", Style::default().fg(theme.accent)));
        } else {
            spans.push(Span::styled(label, Style::default().fg(theme.dim)));
        }
    }

    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}
