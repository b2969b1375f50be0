use ratatui::{style::Style, text::Span};

use crate::ui::theme::Theme;

/// A keyboard hint consisting of a key and its action.
#[derive(Debug, Clone, Copy)]
pub struct KeyHint {
    pub key: &'static str,
    pub action: &'static str,
}

impl KeyHint {
    pub const fn new(key: &'static str, action: &'static str) -> Self {
        Self { key, action }
    }
}

pub fn hints_to_spans(hints: &[KeyHint], theme: &Theme) -> Vec<Span<'static>> {
    let mut spans = Vec::new();

    for (i, hint) in hints.iter().enumerate() {
        if i > 0 {
            spans.push(Span::raw("  "));
        }
        spans.push(Span::styled(hint.key, Style::default().fg(theme.accent)));
        spans.push(Span::raw(format!(" {}", hint.action)));
    }

    spans
}

pub const BROWSE: &[KeyHint] = &[
    KeyHint::new("←→", "yıl"),
    KeyHint::new("Tab", "tablo"),
    KeyHint::new("↑↓", "seç"),
    KeyHint::new("a", "ekle"),
    KeyHint::new("d", "sil"),
    KeyHint::new("s", "kaydet"),
    KeyHint::new("n", "yeni plan"),
    KeyHint::new("r", "yenile"),
    KeyHint::new("q", "çıkış"),
];

pub const FORM: &[KeyHint] = &[
    KeyHint::new("Tab", "alan"),
    KeyHint::new("←→", "seçenek"),
    KeyHint::new("Enter", "ekle"),
    KeyHint::new("Esc", "kapat"),
];

pub const CONFIRM: &[KeyHint] = &[KeyHint::new("y", "evet"), KeyHint::new("n", "vazgeç")];
