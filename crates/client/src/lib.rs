//! HTTP client and page controller for the yearly budget planner.
//!
//! [`Client`] speaks the budget REST API; [`BudgetSession`] drives a
//! [`engine::BudgetPlan`] against any [`BudgetApi`] implementation.

mod api;
mod auth;
mod cache;
mod error;
mod http;
mod mapping;
mod session;

pub use api::BudgetApi;
pub use auth::{StaticToken, TokenProvider};
pub use cache::{DEFAULT_DEDUPE_INTERVAL, QueryCache};
pub use error::{ClientError, ResultSession, SessionError};
pub use http::{Client, DEFAULT_TIMEOUT};
pub use session::{BudgetSession, FetchStatus, SaveReport};
