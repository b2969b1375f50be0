//! Local, editable state of one yearly budget.
//!
//! The plan holds the two ordered collections (income, expense) that the
//! user edits between fetches. Nothing here talks to the network: callers
//! decide when to hydrate from the server and when to push
//! [`BudgetPlan::save_lines`] back.

use uuid::Uuid;

use crate::{EngineError, LineItem, LineKind, Money, RemoteId, ResultEngine, SaveLine, taxonomy};

/// What deleting a given line requires.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeletePlan {
    /// The line exists on the server and must be deleted there first.
    Remote(RemoteId),
    /// The line was never saved; dropping it locally is enough.
    LocalOnly,
}

/// What "new plan" requires given the current state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NewPlanAction {
    ResetImmediately,
    RequiresConfirmation,
}

/// Outcome of [`BudgetPlan::hydrate`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct HydrateReport {
    /// `false` when the server data matched the local state and nothing was
    /// replaced.
    pub replaced: bool,
    /// Unsaved local lines dropped by the replacement.
    pub discarded_pending: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BalanceStatus {
    Surplus,
    Deficit,
    Balanced,
}

impl BalanceStatus {
    pub fn label(self) -> &'static str {
        match self {
            Self::Surplus => "Fazla",
            Self::Deficit => "Açık",
            Self::Balanced => "Denk",
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Totals {
    pub income: Money,
    pub expense: Money,
    pub net: Money,
}

impl Totals {
    pub fn status(&self) -> BalanceStatus {
        if self.net.is_zero() {
            BalanceStatus::Balanced
        } else if self.net.is_negative() {
            BalanceStatus::Deficit
        } else {
            BalanceStatus::Surplus
        }
    }
}

/// The add-item mini-form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Draft {
    pub kind: LineKind,
    pub category: String,
    pub label: String,
    pub amount: String,
}

impl Default for Draft {
    fn default() -> Self {
        Self {
            kind: LineKind::Income,
            category: String::new(),
            label: String::new(),
            amount: String::new(),
        }
    }
}

impl Draft {
    /// Clears the field values, keeping the selected kind.
    pub fn clear_fields(&mut self) {
        self.category.clear();
        self.label.clear();
        self.amount.clear();
    }
}

#[derive(Debug, Clone)]
pub struct BudgetPlan {
    year: i32,
    income: Vec<LineItem>,
    expense: Vec<LineItem>,
    pub draft: Draft,
}

impl BudgetPlan {
    pub fn new(year: i32) -> Self {
        Self {
            year,
            income: Vec::new(),
            expense: Vec::new(),
            draft: Draft::default(),
        }
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn items(&self, kind: LineKind) -> &[LineItem] {
        match kind {
            LineKind::Income => &self.income,
            LineKind::Expense => &self.expense,
        }
    }

    fn items_mut(&mut self, kind: LineKind) -> &mut Vec<LineItem> {
        match kind {
            LineKind::Income => &mut self.income,
            LineKind::Expense => &mut self.expense,
        }
    }

    pub fn len(&self) -> usize {
        self.income.len() + self.expense.len()
    }

    pub fn is_empty(&self) -> bool {
        self.income.is_empty() && self.expense.is_empty()
    }

    pub fn pending_count(&self) -> usize {
        self.income
            .iter()
            .chain(self.expense.iter())
            .filter(|item| item.is_pending())
            .count()
    }

    pub fn find(&self, local_id: Uuid) -> Option<&LineItem> {
        self.income
            .iter()
            .chain(self.expense.iter())
            .find(|item| item.local_id == local_id)
    }

    /// Replaces the local state with the flattened server data for `year`.
    ///
    /// When `year` is the current year and the data equals the local state
    /// (local keys aside), the collections are left untouched. Otherwise any
    /// pending line is lost: there is no merge with unsaved local work.
    pub fn hydrate(&mut self, year: i32, items: Vec<LineItem>) -> HydrateReport {
        let (income, expense): (Vec<_>, Vec<_>) = items
            .into_iter()
            .partition(|item| item.kind == LineKind::Income);

        if year == self.year
            && same_lines(&self.income, &income)
            && same_lines(&self.expense, &expense)
        {
            return HydrateReport::default();
        }

        let discarded_pending = self.pending_count();
        self.year = year;
        self.income = income;
        self.expense = expense;
        HydrateReport {
            replaced: true,
            discarded_pending,
        }
    }

    /// Validates the fields and appends a pending line to `kind`.
    pub fn add_item(
        &mut self,
        kind: LineKind,
        category: &str,
        label: &str,
        amount: &str,
    ) -> ResultEngine<&LineItem> {
        let (category, label) = taxonomy::resolve(kind, category, label)?;
        if amount.trim().is_empty() {
            return Err(EngineError::MissingField("amount"));
        }
        let amount = Money::parse_non_negative(amount)?;

        let items = self.items_mut(kind);
        items.push(LineItem::pending(kind, category, label, amount));
        let last = items.len() - 1;
        Ok(&items[last])
    }

    /// Adds the line described by the draft and clears the draft's fields on
    /// success. On failure the draft is kept for correction.
    pub fn submit_draft(&mut self) -> ResultEngine<Uuid> {
        let Draft {
            kind,
            category,
            label,
            amount,
        } = self.draft.clone();
        let local_id = self.add_item(kind, &category, &label, &amount)?.local_id;
        self.draft.clear_fields();
        Ok(local_id)
    }

    pub fn delete_plan(&self, local_id: Uuid) -> ResultEngine<DeletePlan> {
        let item = self
            .find(local_id)
            .ok_or_else(|| EngineError::KeyNotFound(local_id.to_string()))?;
        Ok(match item.remote_id() {
            Some(remote_id) => DeletePlan::Remote(remote_id),
            None => DeletePlan::LocalOnly,
        })
    }

    /// Drops the line with `local_id`. Returns the removed line, if any.
    pub fn remove(&mut self, local_id: Uuid) -> Option<LineItem> {
        for kind in [LineKind::Income, LineKind::Expense] {
            let items = self.items_mut(kind);
            if let Some(pos) = items.iter().position(|item| item.local_id == local_id) {
                return Some(items.remove(pos));
            }
        }
        None
    }

    /// Both collections flattened for the bulk save: income first, then
    /// expense, each in display order.
    pub fn save_lines(&self) -> Vec<SaveLine> {
        self.income
            .iter()
            .chain(self.expense.iter())
            .map(SaveLine::from)
            .collect()
    }

    pub fn new_plan_action(&self) -> NewPlanAction {
        if self.is_empty() {
            NewPlanAction::ResetImmediately
        } else {
            NewPlanAction::RequiresConfirmation
        }
    }

    /// Empties both collections and the add-item draft.
    pub fn clear(&mut self) {
        self.income.clear();
        self.expense.clear();
        self.draft.clear_fields();
    }

    pub fn totals(&self) -> Totals {
        let income: Money = self.income.iter().map(|item| item.amount).sum();
        let expense: Money = self.expense.iter().map(|item| item.amount).sum();
        Totals {
            income,
            expense,
            net: income - expense,
        }
    }
}

fn same_lines(current: &[LineItem], incoming: &[LineItem]) -> bool {
    current.len() == incoming.len()
        && current
            .iter()
            .zip(incoming)
            .all(|(left, right)| left.same_content(right))
}
