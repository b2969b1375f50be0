//! Domain core of the yearly budget planner.
//!
//! The crate is pure: no I/O, no clocks. Network calls and the current date
//! are the caller's business.

pub use error::EngineError;
pub use item::{LineItem, LineKind, Persistence, RemoteId, SaveLine};
pub use money::Money;
pub use plan::{BalanceStatus, BudgetPlan, DeletePlan, Draft, HydrateReport, NewPlanAction, Totals};
pub use year::YearRange;

pub mod taxonomy;

mod error;
mod item;
mod money;
mod plan;
mod year;

pub type ResultEngine<T> = Result<T, EngineError>;
