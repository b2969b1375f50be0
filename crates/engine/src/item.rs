use std::fmt;

use uuid::Uuid;

use crate::Money;

/// Income (`gelir`) or expense (`gider`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LineKind {
    Income,
    Expense,
}

impl LineKind {
    pub fn label(self) -> &'static str {
        match self {
            Self::Income => "Gelir",
            Self::Expense => "Gider",
        }
    }

    #[must_use]
    pub fn other(self) -> Self {
        match self {
            Self::Income => Self::Expense,
            Self::Expense => Self::Income,
        }
    }
}

/// Server-assigned key of a persisted line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RemoteId(pub i64);

impl fmt::Display for RemoteId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Whether a line exists on the server.
///
/// `Persisted` lines came from a fetch; `Pending` lines were added locally
/// and only reach the server with the next bulk save.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Persistence {
    Persisted { remote_id: RemoteId },
    Pending,
}

/// One category/label/amount record of a yearly budget.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineItem {
    /// Local key, stable for the lifetime of the line in the planner.
    pub local_id: Uuid,
    pub persistence: Persistence,
    pub kind: LineKind,
    pub category: String,
    pub label: String,
    pub amount: Money,
}

impl LineItem {
    pub fn persisted(
        remote_id: RemoteId,
        kind: LineKind,
        category: impl Into<String>,
        label: impl Into<String>,
        amount: Money,
    ) -> Self {
        Self {
            local_id: Uuid::new_v4(),
            persistence: Persistence::Persisted { remote_id },
            kind,
            category: category.into(),
            label: label.into(),
            amount,
        }
    }

    pub fn pending(
        kind: LineKind,
        category: impl Into<String>,
        label: impl Into<String>,
        amount: Money,
    ) -> Self {
        Self {
            local_id: Uuid::new_v4(),
            persistence: Persistence::Pending,
            kind,
            category: category.into(),
            label: label.into(),
            amount,
        }
    }

    pub fn remote_id(&self) -> Option<RemoteId> {
        match self.persistence {
            Persistence::Persisted { remote_id } => Some(remote_id),
            Persistence::Pending => None,
        }
    }

    pub fn is_pending(&self) -> bool {
        matches!(self.persistence, Persistence::Pending)
    }

    /// Compares everything except the local key.
    pub(crate) fn same_content(&self, other: &LineItem) -> bool {
        self.persistence == other.persistence
            && self.kind == other.kind
            && self.category == other.category
            && self.label == other.label
            && self.amount == other.amount
    }
}

/// A line as sent to the bulk save endpoint: identifiers are dropped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SaveLine {
    pub kind: LineKind,
    pub category: String,
    pub label: String,
    pub amount: Money,
}

impl From<&LineItem> for SaveLine {
    fn from(item: &LineItem) -> Self {
        Self {
            kind: item.kind,
            category: item.category.clone(),
            label: item.label.clone(),
            amount: item.amount,
        }
    }
}
