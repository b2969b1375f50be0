use std::future::Future;

use api_types::budget::{BudgetSave, BudgetYear, BudgetYears};
use engine::RemoteId;

use crate::ClientError;

/// The five calls of the remote budget store used by the planner.
///
/// [`Client`](crate::Client) implements it over HTTP; tests provide their own.
pub trait BudgetApi {
    /// `GET /budget/{year}`
    fn budget_get(&self, year: i32) -> impl Future<Output = Result<BudgetYear, ClientError>> + Send;

    /// `GET /budget/years`
    fn budget_years(&self) -> impl Future<Output = Result<BudgetYears, ClientError>> + Send;

    /// `PUT /budget`
    fn budget_save(
        &self,
        payload: &BudgetSave,
    ) -> impl Future<Output = Result<(), ClientError>> + Send;

    /// `DELETE /budget/{year}`
    fn budget_delete(&self, year: i32) -> impl Future<Output = Result<(), ClientError>> + Send;

    /// `DELETE /budget-item/{id}`
    fn budget_item_delete(
        &self,
        id: RemoteId,
    ) -> impl Future<Output = Result<(), ClientError>> + Send;
}
