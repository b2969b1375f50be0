use serde::{Deserialize, Serialize};

/// Response envelope shared by every endpoint of the association API.
///
/// `data` is always present on success. When `success` is `false` the server
/// may still answer with a 2xx status; `message` then carries the reason.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Envelope<T> {
    pub success: bool,
    pub data: T,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl<T> Envelope<T> {
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            data,
            message: None,
        }
    }
}

/// The `success`/`message` pair of an envelope, without `data`.
///
/// Error statuses (4xx/5xx) carry only this part, when they carry a body at all.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EnvelopeStatus {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub message: Option<String>,
}

pub mod budget {
    use super::*;

    /// Line kind as spelled on the wire.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
    pub enum BudgetLineKind {
        #[serde(rename = "gelir")]
        Income,
        #[serde(rename = "gider")]
        Expense,
    }

    /// Flat row of `GET /budget/{year}` (`data.items`).
    #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
    pub struct BudgetEntry {
        pub id: i64,
        pub year: i32,
        #[serde(rename = "type")]
        pub kind: BudgetLineKind,
        pub category: String,
        pub item: String,
        pub amount: f64,
    }

    /// A persisted line inside a [`CategoryGroup`].
    #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
    pub struct CategoryEntry {
        pub id: i64,
        pub item: String,
        pub amount: f64,
    }

    #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
    pub struct CategoryGroup {
        pub category: String,
        pub items: Vec<CategoryEntry>,
    }

    #[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
    pub struct BudgetSection {
        pub categories: Vec<CategoryGroup>,
        pub total: f64,
    }

    #[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct BudgetSummary {
        pub total_income: f64,
        pub total_expense: f64,
        pub balance: f64,
        pub status: String,
        pub status_text: String,
    }

    /// Payload of `GET /budget/{year}`.
    ///
    /// The categorized sections are the source used to hydrate the planner;
    /// `items` is the same set in flat form.
    #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
    pub struct BudgetYear {
        pub year: i32,
        pub items: Vec<BudgetEntry>,
        pub income: BudgetSection,
        pub expense: BudgetSection,
        pub summary: BudgetSummary,
    }

    /// One line of the bulk save request.
    #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
    pub struct BudgetSaveItem {
        #[serde(rename = "type")]
        pub kind: BudgetLineKind,
        pub category: String,
        pub item: String,
        pub amount: f64,
    }

    /// Body of `PUT /budget`. The server replaces the whole year with `items`.
    #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
    pub struct BudgetSave {
        pub year: i32,
        pub items: Vec<BudgetSaveItem>,
    }

    /// Payload of `GET /budget/years`.
    pub type BudgetYears = Vec<i32>;
}
