pub mod form;

use std::time::{Duration, Instant};

use chrono::Datelike;
use client::{BudgetSession, Client, ClientError, SessionError, StaticToken};
use crossterm::event::{self, Event, KeyEventKind};
use engine::{DeletePlan, EngineError, LineKind, NewPlanAction, YearRange};
use uuid::Uuid;

use crate::{
    config::AppConfig,
    error::{AppError, Result},
    local_state::LocalState,
    ui::{
        self,
        keymap::{AppAction, map_key},
    },
};

use form::FormField;

const TOAST_TTL: Duration = Duration::from_secs(4);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Browse,
    AddItem,
    ConfirmNewPlan,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastLevel {
    Info,
    Success,
    Error,
}

#[derive(Debug, Clone)]
pub struct ToastState {
    pub message: String,
    pub level: ToastLevel,
    pub expires_at: Instant,
}

/// Network operation currently running.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Busy {
    Loading,
    Saving,
    Deleting,
    Resetting,
}

impl Busy {
    pub fn label(self) -> &'static str {
        match self {
            Self::Loading => "Yükleniyor…",
            Self::Saving => "Kaydediliyor…",
            Self::Deleting => "Siliniyor…",
            Self::Resetting => "Plan siliniyor…",
        }
    }
}

/// Work a key press asks for that needs the network.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Refresh,
    SelectYear(i32),
    Save,
    DeleteItem(Uuid),
    ConfirmNewPlan,
}

impl Command {
    fn busy(self) -> Busy {
        match self {
            Self::Refresh | Self::SelectYear(_) => Busy::Loading,
            Self::Save => Busy::Saving,
            Self::DeleteItem(_) => Busy::Deleting,
            Self::ConfirmNewPlan => Busy::Resetting,
        }
    }
}

pub struct AppState {
    pub base_url: String,
    pub session: BudgetSession<Client>,
    pub mode: Mode,
    pub focus: LineKind,
    pub income_selected: usize,
    pub expense_selected: usize,
    pub form_field: FormField,
    pub toast: Option<ToastState>,
    pub busy: Option<Busy>,
    pub should_quit: bool,
}

impl AppState {
    pub fn new(session: BudgetSession<Client>, base_url: String) -> Self {
        Self {
            base_url,
            session,
            mode: Mode::Browse,
            focus: LineKind::Income,
            income_selected: 0,
            expense_selected: 0,
            form_field: FormField::default(),
            toast: None,
            busy: None,
            should_quit: false,
        }
    }

    pub fn selected(&self, kind: LineKind) -> usize {
        match kind {
            LineKind::Income => self.income_selected,
            LineKind::Expense => self.expense_selected,
        }
    }

    fn selected_mut(&mut self, kind: LineKind) -> &mut usize {
        match kind {
            LineKind::Income => &mut self.income_selected,
            LineKind::Expense => &mut self.expense_selected,
        }
    }

    fn select_next(&mut self) {
        let len = self.session.plan().items(self.focus).len();
        if len == 0 {
            return;
        }
        let selected = self.selected_mut(self.focus);
        *selected = (*selected + 1).min(len - 1);
    }

    fn select_prev(&mut self) {
        let selected = self.selected_mut(self.focus);
        *selected = selected.saturating_sub(1);
    }

    /// Keeps both selections inside their tables after lines were removed.
    fn clamp_selection(&mut self) {
        for kind in [LineKind::Income, LineKind::Expense] {
            let len = self.session.plan().items(kind).len();
            let selected = self.selected_mut(kind);
            *selected = (*selected).min(len.saturating_sub(1));
        }
    }

    fn selected_line(&self) -> Option<Uuid> {
        self.session
            .plan()
            .items(self.focus)
            .get(self.selected(self.focus))
            .map(|item| item.local_id)
    }

    pub fn toast(&mut self, level: ToastLevel, message: impl Into<String>) {
        self.toast = Some(ToastState {
            message: message.into(),
            level,
            expires_at: Instant::now() + TOAST_TTL,
        });
    }

    fn expire_toast(&mut self, now: Instant) {
        if self
            .toast
            .as_ref()
            .is_some_and(|toast| toast.expires_at <= now)
        {
            self.toast = None;
        }
    }

    /// Applies a key press. Local edits happen here; anything that needs the
    /// server is returned as a [`Command`].
    pub fn handle_action(&mut self, action: AppAction) -> Option<Command> {
        if action == AppAction::Interrupt {
            self.should_quit = true;
            return None;
        }
        match self.mode {
            Mode::Browse => self.handle_browse(action),
            Mode::AddItem => {
                self.handle_form(action);
                None
            }
            Mode::ConfirmNewPlan => self.handle_confirm(action),
        }
    }

    fn handle_browse(&mut self, action: AppAction) -> Option<Command> {
        match action {
            AppAction::Quit => self.should_quit = true,
            AppAction::NextField => self.focus = self.focus.other(),
            AppAction::Up | AppAction::Input('k') => self.select_prev(),
            AppAction::Down | AppAction::Input('j') => self.select_next(),
            AppAction::Left | AppAction::Right => {
                let range = self.session.range();
                let year = self.session.year();
                let target = if action == AppAction::Left {
                    range.prev(year)
                } else {
                    range.next(year)
                };
                if target != year {
                    return Some(Command::SelectYear(target));
                }
            }
            AppAction::Input('a') => {
                self.mode = Mode::AddItem;
                self.form_field = FormField::default();
                let focus = self.focus;
                let draft = &mut self.session.plan_mut().draft;
                if draft.kind != focus {
                    draft.kind = focus;
                    draft.clear_fields();
                }
            }
            AppAction::Input('d') => return self.delete_selected(),
            AppAction::Input('s') => return Some(Command::Save),
            AppAction::Input('r') => return Some(Command::Refresh),
            AppAction::Input('n') => match self.session.request_new_plan() {
                NewPlanAction::ResetImmediately => {
                    self.clamp_selection();
                    self.toast(ToastLevel::Info, "Plan zaten boş.");
                }
                NewPlanAction::RequiresConfirmation => self.mode = Mode::ConfirmNewPlan,
            },
            _ => {}
        }
        None
    }

    fn delete_selected(&mut self) -> Option<Command> {
        let local_id = self.selected_line()?;
        match self.session.plan().delete_plan(local_id) {
            Ok(DeletePlan::Remote(_)) => Some(Command::DeleteItem(local_id)),
            Ok(DeletePlan::LocalOnly) => {
                self.session.plan_mut().remove(local_id);
                self.clamp_selection();
                self.toast(ToastLevel::Success, "Kaydedilmemiş kalem kaldırıldı.");
                None
            }
            Err(err) => {
                self.toast(ToastLevel::Error, message_for_error(&err.into()));
                None
            }
        }
    }

    fn handle_form(&mut self, action: AppAction) {
        let field = self.form_field;
        match action {
            AppAction::Cancel => self.mode = Mode::Browse,
            AppAction::NextField => self.form_field = field.next(),
            AppAction::Left => form::cycle(&mut self.session.plan_mut().draft, field, false),
            AppAction::Right => form::cycle(&mut self.session.plan_mut().draft, field, true),
            AppAction::Backspace => form::backspace(&mut self.session.plan_mut().draft, field),
            AppAction::Input(ch) => {
                form::push_char(&mut self.session.plan_mut().draft, field, ch);
            }
            AppAction::Submit => match self.session.submit_draft() {
                Ok(_) => {
                    let kind = self.session.plan().draft.kind;
                    self.focus = kind;
                    let last = self.session.plan().items(kind).len().saturating_sub(1);
                    *self.selected_mut(kind) = last;
                    self.form_field = FormField::Category;
                    self.toast(ToastLevel::Success, "Kalem eklendi (kaydedilmedi).");
                }
                Err(err) => self.toast(ToastLevel::Error, message_for_error(&err)),
            },
            _ => {}
        }
    }

    fn handle_confirm(&mut self, action: AppAction) -> Option<Command> {
        match action {
            AppAction::Input('y') | AppAction::Submit => {
                self.mode = Mode::Browse;
                Some(Command::ConfirmNewPlan)
            }
            AppAction::Input('n') | AppAction::Cancel => {
                self.mode = Mode::Browse;
                None
            }
            _ => None,
        }
    }

    /// Runs `command` against the server and reports the outcome as a toast.
    pub async fn run_command(&mut self, command: Command) {
        match command {
            Command::Refresh => match self.session.refresh().await {
                Ok(report) if report.discarded_pending > 0 => self.toast(
                    ToastLevel::Info,
                    format!(
                        "{} kaydedilmemiş kalem sunucu verisiyle değiştirildi.",
                        report.discarded_pending
                    ),
                ),
                Ok(_) => {}
                Err(err) => self.toast(ToastLevel::Error, message_for_error(&err)),
            },
            Command::SelectYear(year) => match self.session.select_year(year).await {
                Ok(_) => {
                    self.income_selected = 0;
                    self.expense_selected = 0;
                }
                Err(err) => self.toast(ToastLevel::Error, message_for_error(&err)),
            },
            Command::Save => match self.session.save().await {
                Ok(report) if report.refreshed => self.toast(
                    ToastLevel::Success,
                    format!("{} kalem kaydedildi.", report.lines),
                ),
                Ok(_) => self.toast(
                    ToastLevel::Info,
                    "Kaydedildi ancak yenilenemedi; r ile tekrar deneyin.",
                ),
                Err(err) => self.toast(ToastLevel::Error, message_for_error(&err)),
            },
            Command::DeleteItem(local_id) => match self.session.delete_item(local_id).await {
                Ok(()) => self.toast(ToastLevel::Success, "Kalem silindi."),
                Err(err) => self.toast(ToastLevel::Error, message_for_error(&err)),
            },
            Command::ConfirmNewPlan => match self.session.confirm_new_plan().await {
                Ok(()) => self.toast(ToastLevel::Success, "Yeni plan başlatıldı."),
                Err(err) => self.toast(ToastLevel::Error, message_for_error(&err)),
            },
        }
        self.clamp_selection();
    }
}

pub struct App {
    config: AppConfig,
    local_state: LocalState,
    pub state: AppState,
}

impl App {
    pub fn new(config: AppConfig) -> Result<Self> {
        let client = Client::new(
            &config.base_url,
            config.request_timeout(),
            StaticToken::new(config.token.clone()),
        )?;
        let base_url = client.base_url().to_string();

        let local_state = LocalState::load(&config.state_file).unwrap_or_else(|err| {
            tracing::warn!("ignoring unreadable state file {}: {err}", config.state_file);
            LocalState::default()
        });

        let current = chrono::Local::now().year();
        let range = YearRange::around(current);
        let year = config
            .year
            .or_else(|| local_state.last_year(&base_url))
            .filter(|year| range.contains(*year))
            .unwrap_or(current);

        let session = BudgetSession::new(client, range, year);
        Ok(Self {
            config,
            local_state,
            state: AppState::new(session, base_url),
        })
    }

    pub async fn run(&mut self) -> Result<()> {
        let mut terminal = ui::setup_terminal()?;
        let result = self.event_loop(&mut terminal).await;
        ui::restore_terminal(&mut terminal)?;
        self.remember_year();
        result
    }

    async fn event_loop(&mut self, terminal: &mut ui::Terminal) -> Result<()> {
        let tick_rate = Duration::from_millis(200);

        self.execute(terminal, Command::Refresh).await?;
        while !self.state.should_quit {
            self.state.expire_toast(Instant::now());
            self.draw(terminal)?;

            if event::poll(tick_rate)?
                && let Event::Key(key) = event::read()?
                && key.kind == KeyEventKind::Press
                && let Some(command) = self.state.handle_action(map_key(key))
            {
                self.execute(terminal, command).await?;
            }
        }

        Ok(())
    }

    /// Shows the busy marker, runs `command`, then drops keys typed meanwhile.
    async fn execute(&mut self, terminal: &mut ui::Terminal, command: Command) -> Result<()> {
        self.state.busy = Some(command.busy());
        self.draw(terminal)?;
        self.state.run_command(command).await;
        self.state.busy = None;

        while event::poll(Duration::ZERO)? {
            event::read()?;
        }
        if matches!(command, Command::SelectYear(_)) {
            self.remember_year();
        }
        Ok(())
    }

    fn draw(&self, terminal: &mut ui::Terminal) -> Result<()> {
        terminal
            .draw(|frame| ui::render(frame, &self.state))
            .map_err(|err| AppError::Terminal(err.to_string()))?;
        Ok(())
    }

    fn remember_year(&mut self) {
        self.local_state
            .set_last_year(&self.state.base_url, self.state.session.year());
        if let Err(err) = self.local_state.save(&self.config.state_file) {
            tracing::warn!("failed to save state file: {err}");
        }
    }
}

/// Turns an operation failure into the text shown to the user.
pub fn message_for_error(err: &SessionError) -> String {
    match err {
        SessionError::Engine(err) => match err {
            EngineError::MissingField("category") => "Kategori seçin.".to_string(),
            EngineError::MissingField("label") => "Kalem seçin.".to_string(),
            EngineError::MissingField("amount") => "Tutar girin.".to_string(),
            EngineError::MissingField(field) => format!("Eksik alan: {field}"),
            EngineError::InvalidAmount(value) => format!("Geçersiz tutar: {value}"),
            EngineError::UnknownCategory(_) | EngineError::UnknownLabel { .. } => {
                "Seçim bu türe ait değil.".to_string()
            }
            EngineError::InvalidYear(year) => format!("{year} yılı seçilemez."),
            EngineError::KeyNotFound(_) => "Kalem bulunamadı.".to_string(),
        },
        SessionError::Client(err) => match err {
            ClientError::Unauthorized | ClientError::Forbidden => {
                "Bu işlem için yetkiniz yok.".to_string()
            }
            ClientError::NotFound => "Kayıt sunucuda bulunamadı.".to_string(),
            ClientError::Conflict(message) => format!("Çakışma: {message}"),
            ClientError::Validation(message) => format!("Doğrulama hatası: {message}"),
            ClientError::Server(message) => format!("Sunucu hatası: {message}"),
            ClientError::Rejected(message) => message.clone(),
            ClientError::Timeout => "İstek zaman aşımına uğradı.".to_string(),
            ClientError::Transport(_) => "Sunucuya ulaşılamıyor.".to_string(),
            ClientError::Decode(_) => "Sunucudan beklenmeyen yanıt alındı.".to_string(),
            ClientError::InvalidUrl(url) => format!("Geçersiz sunucu adresi: {url}"),
        },
    }
}
