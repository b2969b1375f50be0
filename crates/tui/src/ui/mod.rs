pub mod components;
pub mod keymap;
pub mod screens;

mod terminal;
mod theme;

use ratatui::{
    Frame,
    layout::{Constraint, Layout, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{Block, Paragraph},
};

use client::FetchStatus;

use crate::app::{AppState, Mode};

pub use terminal::{AppTerminal as Terminal, restore_terminal, setup_terminal};
use theme::Theme;

pub fn render(frame: &mut Frame<'_>, state: &AppState) {
    let theme = Theme::default();
    let area = frame.area();
    frame.render_widget(
        Block::default().style(Style::default().bg(theme.background)),
        area,
    );

    let form_height = if state.mode == Mode::AddItem {
        screens::add_item::HEIGHT
    } else {
        0
    };
    let [info, years, content, form, bottom] = Layout::vertical([
        Constraint::Length(1),
        Constraint::Length(1),
        Constraint::Min(0),
        Constraint::Length(form_height),
        Constraint::Length(1),
    ])
    .areas(area);

    render_info_bar(frame, info, state, &theme);
    components::year_strip::render(
        frame,
        years,
        state.session.range(),
        state.session.year(),
        |year| state.session.has_data(year),
        &theme,
    );
    screens::budget::render(frame, content, state, &theme);
    if state.mode == Mode::AddItem {
        screens::add_item::render(frame, form, state, &theme);
    }
    render_bottom_bar(frame, bottom, state, &theme);

    if state.mode == Mode::ConfirmNewPlan {
        components::modal::render_confirm(
            frame,
            area,
            "Yeni Plan",
            &format!(
                "{} bütçesi sunucudan tamamen silinecek. Emin misiniz?",
                state.session.year()
            ),
            &theme,
        );
    }
    components::toast::render(frame, area, state.toast.as_ref(), &theme);
}

fn render_info_bar(frame: &mut Frame<'_>, area: Rect, state: &AppState, theme: &Theme) {
    let (status, status_style) = match (state.busy, state.session.status()) {
        (Some(busy), _) => (busy.label().to_string(), Style::default().fg(theme.warning)),
        (None, FetchStatus::Idle) => ("-".to_string(), Style::default().fg(theme.dim)),
        (None, FetchStatus::Loading) => {
            ("Yükleniyor…".to_string(), Style::default().fg(theme.warning))
        }
        (None, FetchStatus::Ready) => ("OK".to_string(), Style::default().fg(theme.positive)),
        (None, FetchStatus::Failed(_)) => (
            "HATA (r: tekrar dene)".to_string(),
            Style::default().fg(theme.error),
        ),
    };

    let line = Line::from(vec![
        Span::styled("Sunucu", Style::default().fg(theme.dim)),
        Span::raw(format!(": {}  ", state.base_url)),
        Span::styled("Yıl", Style::default().fg(theme.dim)),
        Span::raw(format!(": {}  ", state.session.year())),
        Span::styled(status, status_style),
    ]);

    frame.render_widget(Paragraph::new(line), area);
}

fn render_bottom_bar(frame: &mut Frame<'_>, area: Rect, state: &AppState, theme: &Theme) {
    let hints = match state.mode {
        Mode::Browse => components::hints::BROWSE,
        Mode::AddItem => components::hints::FORM,
        Mode::ConfirmNewPlan => components::hints::CONFIRM,
    };
    let bar = Paragraph::new(Line::from(components::hints::hints_to_spans(hints, theme)));
    frame.render_widget(bar, area);
}
