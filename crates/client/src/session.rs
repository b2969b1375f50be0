//! The budget page controller.
//!
//! `BudgetSession` owns the editable [`BudgetPlan`] of the selected year and
//! runs every operation of the planner against a [`BudgetApi`]. Failed calls
//! leave the local state as it was; nothing is applied optimistically.
//!
//! Operations are not serialized against each other at the server: a save
//! and an item delete for the same year may race, and whichever response is
//! applied last wins locally.

use api_types::budget::{BudgetYear, BudgetYears};
use engine::{
    BudgetPlan, DeletePlan, HydrateReport, LineKind, NewPlanAction, Totals, YearRange,
};
use uuid::Uuid;

use crate::{
    BudgetApi, ResultSession,
    cache::{DEFAULT_DEDUPE_INTERVAL, QueryCache},
    mapping,
};

/// Lifecycle of the budget fetch for the selected year.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchStatus {
    Idle,
    Loading,
    Ready,
    Failed(String),
}

/// Result of a successful bulk save.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SaveReport {
    pub lines: usize,
    /// `false` when the save went through but the follow-up fetch failed.
    pub refreshed: bool,
}

pub struct BudgetSession<A> {
    api: A,
    cache: QueryCache<i32, BudgetYear>,
    range: YearRange,
    year: i32,
    plan: BudgetPlan,
    years: BudgetYears,
    status: FetchStatus,
}

impl<A: BudgetApi> BudgetSession<A> {
    /// Creates a session positioned on `year`. Nothing is fetched until
    /// [`refresh`](Self::refresh) or [`select_year`](Self::select_year).
    pub fn new(api: A, range: YearRange, year: i32) -> Self {
        Self {
            api,
            cache: QueryCache::new(DEFAULT_DEDUPE_INTERVAL),
            range,
            year,
            plan: BudgetPlan::new(year),
            years: Vec::new(),
            status: FetchStatus::Idle,
        }
    }

    pub fn api(&self) -> &A {
        &self.api
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn range(&self) -> YearRange {
        self.range
    }

    pub fn plan(&self) -> &BudgetPlan {
        &self.plan
    }

    /// Mutable access for editing the add-item draft.
    pub fn plan_mut(&mut self) -> &mut BudgetPlan {
        &mut self.plan
    }

    /// Years that already have a budget on the server.
    pub fn years(&self) -> &[i32] {
        &self.years
    }

    pub fn has_data(&self, year: i32) -> bool {
        self.years.contains(&year)
    }

    pub fn status(&self) -> &FetchStatus {
        &self.status
    }

    pub fn totals(&self) -> Totals {
        self.plan.totals()
    }

    /// Fetches `year` and switches to it once the fetch succeeded. On failure
    /// the session stays on the previous year with its lines untouched.
    pub async fn select_year(&mut self, year: i32) -> ResultSession<HydrateReport> {
        let year = self.range.check(year)?;
        let previous = self.status.clone();
        match self.load(year).await {
            Ok(report) => {
                self.year = year;
                Ok(report)
            }
            Err(err) => {
                self.status = previous;
                Err(err)
            }
        }
    }

    /// Fetches the selected year's budget and the list of years with data,
    /// then replaces the local lines with the server's.
    ///
    /// Unsaved lines are dropped by the replacement.
    pub async fn refresh(&mut self) -> ResultSession<HydrateReport> {
        self.load(self.year).await
    }

    async fn load(&mut self, year: i32) -> ResultSession<HydrateReport> {
        self.status = FetchStatus::Loading;

        let api = &self.api;
        let fetched = self
            .cache
            .fetch(year, || api.budget_get(year))
            .await
            .and_then(|budget| mapping::lines_from_budget(&budget));

        let lines = match fetched {
            Ok(lines) => lines,
            Err(err) => {
                tracing::error!("failed to load budget {year}: {err}");
                self.status = FetchStatus::Failed(err.to_string());
                return Err(err.into());
            }
        };

        self.refresh_years().await;

        let report = self.plan.hydrate(year, lines);
        if report.discarded_pending > 0 {
            tracing::warn!(
                "load of {year} discarded {} unsaved line(s)",
                report.discarded_pending
            );
        }
        self.status = FetchStatus::Ready;
        Ok(report)
    }

    /// Years failing to load is not fatal: the previous list is kept.
    async fn refresh_years(&mut self) {
        match self.api.budget_years().await {
            Ok(mut years) => {
                years.sort_unstable();
                years.dedup();
                self.years = years;
            }
            Err(err) => tracing::warn!("failed to load budget years: {err}"),
        }
    }

    /// Appends a pending line. No network call.
    pub fn add_item(
        &mut self,
        kind: LineKind,
        category: &str,
        label: &str,
        amount: &str,
    ) -> ResultSession<Uuid> {
        let local_id = self.plan.add_item(kind, category, label, amount)?.local_id;
        Ok(local_id)
    }

    /// Appends the line described by the add-item draft. No network call.
    pub fn submit_draft(&mut self) -> ResultSession<Uuid> {
        Ok(self.plan.submit_draft()?)
    }

    /// Deletes one line. Persisted lines are deleted on the server first and
    /// removed locally only once the server acknowledged it; pending lines
    /// are dropped without a network call.
    pub async fn delete_item(&mut self, local_id: Uuid) -> ResultSession<()> {
        match self.plan.delete_plan(local_id)? {
            DeletePlan::Remote(remote_id) => {
                self.api.budget_item_delete(remote_id).await?;
                self.cache.invalidate(&self.year);
                tracing::info!("deleted budget line {remote_id} of {}", self.year);
            }
            DeletePlan::LocalOnly => {}
        }
        self.plan.remove(local_id);
        Ok(())
    }

    /// Sends every line of both kinds to the bulk save endpoint, then fetches
    /// the year and the year list again.
    pub async fn save(&mut self) -> ResultSession<SaveReport> {
        let year = self.year;
        let payload = mapping::save_payload(year, &self.plan.save_lines());
        let lines = payload.items.len();

        self.api.budget_save(&payload).await?;
        tracing::info!("saved {lines} budget line(s) for {year}");

        self.cache.invalidate(&year);
        let refreshed = match self.refresh().await {
            Ok(_) => true,
            Err(err) => {
                tracing::warn!("budget {year} saved but reload failed: {err}");
                false
            }
        };
        Ok(SaveReport { lines, refreshed })
    }

    /// First step of "new plan". An empty plan is reset at once, without a
    /// network call; otherwise the caller must confirm and call
    /// [`confirm_new_plan`](Self::confirm_new_plan).
    pub fn request_new_plan(&mut self) -> NewPlanAction {
        let action = self.plan.new_plan_action();
        if action == NewPlanAction::ResetImmediately {
            self.plan.clear();
        }
        action
    }

    /// Deletes the whole selected year on the server and clears the plan.
    pub async fn confirm_new_plan(&mut self) -> ResultSession<()> {
        let year = self.year;
        self.api.budget_delete(year).await?;
        tracing::info!("deleted budget {year}");

        self.cache.invalidate(&year);
        self.plan.clear();
        self.refresh_years().await;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::sync::{
        Mutex,
        atomic::{AtomicBool, Ordering},
    };

    use api_types::budget::{
        BudgetSave, BudgetSection, BudgetSummary, CategoryEntry, CategoryGroup,
    };
    use engine::{Money, RemoteId};

    use super::*;
    use crate::{ClientError, SessionError};

    const DUES_CATEGORY: &str = "A. Temel ve Düzenli Gelirler";
    const DUES_LABEL: &str = "Üyelik Aidatları (Yıllık)";
    const STAFF_CATEGORY: &str = "1. Personel Giderleri";
    const STAFF_LABEL: &str = "Maaş ve Ücretler";

    /// Records every call and answers from a fixed budget.
    #[derive(Default)]
    struct FakeApi {
        calls: Mutex<Vec<String>>,
        fail_mutations: AtomicBool,
        unreachable_year: Mutex<Option<i32>>,
        budget: Mutex<Option<BudgetYear>>,
        saved: Mutex<Option<BudgetSave>>,
    }

    impl FakeApi {
        fn with_budget(budget: BudgetYear) -> Self {
            let api = Self::default();
            *api.budget.lock().unwrap() = Some(budget);
            api
        }

        fn calls(&self) -> Vec<String> {
            self.calls.lock().unwrap().clone()
        }

        fn record(&self, call: String) {
            self.calls.lock().unwrap().push(call);
        }

        fn mutation_result(&self) -> Result<(), ClientError> {
            if self.fail_mutations.load(Ordering::SeqCst) {
                Err(ClientError::Server("boom".to_string()))
            } else {
                Ok(())
            }
        }
    }

    impl BudgetApi for FakeApi {
        async fn budget_get(&self, year: i32) -> Result<BudgetYear, ClientError> {
            self.record(format!("GET budget/{year}"));
            if *self.unreachable_year.lock().unwrap() == Some(year) {
                return Err(ClientError::Timeout);
            }
            Ok(self
                .budget
                .lock()
                .unwrap()
                .clone()
                .filter(|budget| budget.year == year)
                .unwrap_or_else(|| empty_budget(year)))
        }

        async fn budget_years(&self) -> Result<BudgetYears, ClientError> {
            self.record("GET budget/years".to_string());
            Ok(self
                .budget
                .lock()
                .unwrap()
                .as_ref()
                .map(|budget| vec![budget.year])
                .unwrap_or_default())
        }

        async fn budget_save(&self, payload: &BudgetSave) -> Result<(), ClientError> {
            self.record(format!("PUT budget {}", payload.year));
            self.mutation_result()?;
            *self.saved.lock().unwrap() = Some(payload.clone());
            Ok(())
        }

        async fn budget_delete(&self, year: i32) -> Result<(), ClientError> {
            self.record(format!("DELETE budget/{year}"));
            self.mutation_result()
        }

        async fn budget_item_delete(&self, id: RemoteId) -> Result<(), ClientError> {
            self.record(format!("DELETE budget-item/{id}"));
            self.mutation_result()
        }
    }

    fn empty_budget(year: i32) -> BudgetYear {
        BudgetYear {
            year,
            items: Vec::new(),
            income: BudgetSection::default(),
            expense: BudgetSection::default(),
            summary: BudgetSummary::default(),
        }
    }

    fn stored_budget(year: i32) -> BudgetYear {
        BudgetYear {
            income: BudgetSection {
                categories: vec![CategoryGroup {
                    category: DUES_CATEGORY.to_string(),
                    items: vec![CategoryEntry {
                        id: 11,
                        item: DUES_LABEL.to_string(),
                        amount: 1000.0,
                    }],
                }],
                total: 1000.0,
            },
            expense: BudgetSection {
                categories: vec![CategoryGroup {
                    category: STAFF_CATEGORY.to_string(),
                    items: vec![CategoryEntry {
                        id: 12,
                        item: STAFF_LABEL.to_string(),
                        amount: 400.0,
                    }],
                }],
                total: 400.0,
            },
            ..empty_budget(year)
        }
    }

    fn session(api: FakeApi) -> BudgetSession<FakeApi> {
        BudgetSession::new(api, YearRange::around(2025), 2025)
    }

    #[tokio::test]
    async fn refresh_hydrates_and_loads_years() {
        let mut session = session(FakeApi::with_budget(stored_budget(2025)));
        session.refresh().await.unwrap();

        assert_eq!(session.status(), &FetchStatus::Ready);
        assert_eq!(session.plan().len(), 2);
        assert_eq!(session.years(), &[2025]);
        assert_eq!(session.totals().net, Money::new(60_000));
    }

    #[tokio::test]
    async fn add_item_makes_no_network_call() {
        let mut session = session(FakeApi::default());
        session
            .add_item(LineKind::Income, DUES_CATEGORY, DUES_LABEL, "1000")
            .unwrap();
        assert_eq!(session.plan().items(LineKind::Income).len(), 1);
        assert!(session.api().calls().is_empty());
    }

    #[tokio::test]
    async fn add_item_validation_error_surfaces() {
        let mut session = session(FakeApi::default());
        let err = session
            .add_item(LineKind::Income, DUES_CATEGORY, "", "10")
            .unwrap_err();
        assert!(matches!(err, SessionError::Engine(_)));
        assert!(session.plan().is_empty());
    }

    #[tokio::test]
    async fn deleting_pending_line_skips_network() {
        let mut session = session(FakeApi::default());
        let local_id = session
            .add_item(LineKind::Expense, STAFF_CATEGORY, STAFF_LABEL, "5")
            .unwrap();
        session.delete_item(local_id).await.unwrap();
        assert!(session.plan().is_empty());
        assert!(session.api().calls().is_empty());
    }

    #[tokio::test]
    async fn deleting_persisted_line_calls_server_first() {
        let mut session = session(FakeApi::with_budget(stored_budget(2025)));
        session.refresh().await.unwrap();
        let target = session.plan().items(LineKind::Expense)[0].local_id;

        session.delete_item(target).await.unwrap();
        assert_eq!(session.plan().len(), 1);
        assert_eq!(
            session.api().calls().last().map(String::as_str),
            Some("DELETE budget-item/12")
        );
    }

    #[tokio::test]
    async fn failed_remote_delete_keeps_line() {
        let mut session = session(FakeApi::with_budget(stored_budget(2025)));
        session.refresh().await.unwrap();
        session.api().fail_mutations.store(true, Ordering::SeqCst);
        let target = session.plan().items(LineKind::Income)[0].local_id;

        assert!(session.delete_item(target).await.is_err());
        assert!(session.plan().find(target).is_some());
        assert_eq!(session.plan().len(), 2);
    }

    #[tokio::test]
    async fn save_sends_every_line_and_reloads() {
        let mut session = session(FakeApi::default());
        session
            .add_item(LineKind::Income, DUES_CATEGORY, DUES_LABEL, "1000")
            .unwrap();
        session
            .add_item(LineKind::Expense, STAFF_CATEGORY, STAFF_LABEL, "400")
            .unwrap();

        let report = session.save().await.unwrap();
        assert_eq!(report.lines, 2);
        assert!(report.refreshed);

        let saved = session.api().saved.lock().unwrap().clone().unwrap();
        assert_eq!(saved.year, 2025);
        assert_eq!(saved.items.len(), 2);
        assert_eq!(saved.items[0].item, DUES_LABEL);
        assert_eq!(saved.items[1].amount, 400.0);

        let calls = session.api().calls();
        assert_eq!(calls[0], "PUT budget 2025");
        assert!(calls.contains(&"GET budget/2025".to_string()));
        assert!(calls.contains(&"GET budget/years".to_string()));
    }

    #[tokio::test]
    async fn failed_save_leaves_lines_untouched() {
        let api = FakeApi::default();
        api.fail_mutations.store(true, Ordering::SeqCst);
        let mut session = session(api);
        session
            .add_item(LineKind::Income, DUES_CATEGORY, DUES_LABEL, "1000")
            .unwrap();

        assert!(matches!(
            session.save().await,
            Err(SessionError::Client(ClientError::Server(_)))
        ));
        assert_eq!(session.plan().pending_count(), 1);
        assert_eq!(session.api().calls(), vec!["PUT budget 2025".to_string()]);
    }

    #[tokio::test]
    async fn new_plan_on_empty_state_resets_without_network() {
        let mut session = session(FakeApi::default());
        session.plan_mut().draft.amount = "12".to_string();
        assert_eq!(session.request_new_plan(), NewPlanAction::ResetImmediately);
        assert!(session.plan().draft.amount.is_empty());
        assert!(session.api().calls().is_empty());
    }

    #[tokio::test]
    async fn confirmed_new_plan_clears_state() {
        let mut session = session(FakeApi::with_budget(stored_budget(2025)));
        session.refresh().await.unwrap();
        assert_eq!(
            session.request_new_plan(),
            NewPlanAction::RequiresConfirmation
        );
        assert_eq!(session.plan().len(), 2);

        session.confirm_new_plan().await.unwrap();
        assert!(session.plan().is_empty());
        assert!(
            session
                .api()
                .calls()
                .contains(&"DELETE budget/2025".to_string())
        );
    }

    #[tokio::test]
    async fn failed_new_plan_keeps_state() {
        let mut session = session(FakeApi::with_budget(stored_budget(2025)));
        session.refresh().await.unwrap();
        session.api().fail_mutations.store(true, Ordering::SeqCst);

        assert!(session.confirm_new_plan().await.is_err());
        assert_eq!(session.plan().len(), 2);
    }

    #[tokio::test]
    async fn select_year_fetches_that_year() {
        let mut session = session(FakeApi::with_budget(stored_budget(2026)));
        session.refresh().await.unwrap();
        assert!(session.plan().is_empty());

        session.select_year(2026).await.unwrap();
        assert_eq!(session.year(), 2026);
        assert_eq!(session.plan().year(), 2026);
        assert_eq!(session.plan().len(), 2);
        assert!(
            session
                .api()
                .calls()
                .contains(&"GET budget/2026".to_string())
        );
    }

    #[tokio::test]
    async fn failed_year_switch_stays_on_previous_year() {
        let api = FakeApi::with_budget(stored_budget(2025));
        *api.unreachable_year.lock().unwrap() = Some(2026);
        let mut session = session(api);
        session.refresh().await.unwrap();

        assert!(matches!(
            session.select_year(2026).await,
            Err(SessionError::Client(ClientError::Timeout))
        ));
        assert_eq!(session.year(), 2025);
        assert_eq!(session.plan().year(), 2025);
        assert_eq!(session.plan().len(), 2);
        assert_eq!(session.status(), &FetchStatus::Ready);

        session.save().await.unwrap();
        let saved = session.api().saved.lock().unwrap().clone().unwrap();
        assert_eq!(saved.year, 2025);

        session.confirm_new_plan().await.unwrap();
        assert!(
            session
                .api()
                .calls()
                .contains(&"DELETE budget/2025".to_string())
        );
        assert!(
            !session
                .api()
                .calls()
                .contains(&"DELETE budget/2026".to_string())
        );
    }

    #[tokio::test]
    async fn select_year_outside_range_is_rejected() {
        let mut session = session(FakeApi::default());
        assert!(matches!(
            session.select_year(2040).await,
            Err(SessionError::Engine(engine::EngineError::InvalidYear(2040)))
        ));
        assert_eq!(session.year(), 2025);
        assert!(session.api().calls().is_empty());
    }

    #[tokio::test]
    async fn refresh_drops_unsaved_lines() {
        let mut session = session(FakeApi::with_budget(stored_budget(2025)));
        session
            .add_item(LineKind::Income, DUES_CATEGORY, DUES_LABEL, "1")
            .unwrap();
        let report = session.refresh().await.unwrap();
        assert_eq!(report.discarded_pending, 1);
        assert_eq!(session.plan().pending_count(), 0);
    }
}
