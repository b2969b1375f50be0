use engine::Money;
use ratatui::{style::Style, text::Span};

use crate::ui::theme::Theme;

/// Plain amount, neutral color. Used for table cells.
#[must_use]
pub fn amount(value: Money, theme: &Theme) -> Span<'static> {
    Span::styled(value.to_string(), Style::default().fg(theme.text))
}

/// Amount colored by its sign, with `+` for positive values.
#[must_use]
pub fn signed_amount(value: Money, theme: &Theme) -> Span<'static> {
    let (color, prefix) = if value.is_negative() {
        (theme.negative, "")
    } else if value.is_zero() {
        (theme.text, "")
    } else {
        (theme.positive, "+")
    };
    Span::styled(format!("{prefix}{value}"), Style::default().fg(color))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn signed_amount_prefixes_positive_values() {
        let theme = Theme::default();
        assert_eq!(signed_amount(Money::new(60_000), &theme).content, "+600.00 TL");
        assert_eq!(signed_amount(Money::new(-150), &theme).content, "-1.50 TL");
        assert_eq!(signed_amount(Money::ZERO, &theme).content, "0.00 TL");
    }
}
