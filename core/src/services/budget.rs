use serde_json::{json, Value};
use std::sync::Arc;

use super::models::{BudgetPeriod, BudgetSheet, NewBudget};
use super::paths;
use crate::error::ApiError;
use crate::transport::{decode_body, ApiRequest, ApiTransport};
use crate::validation;

/// Categories offered when adding a budget target.
pub const BUDGET_CATEGORIES: &[&str] = &[
    "Food",
    "Transportation",
    "Entertainment",
    "Shopping",
    "Bills",
    "Healthcare",
];

#[derive(Clone)]
pub struct BudgetService {
    transport: Arc<dyn ApiTransport>,
}

impl BudgetService {
    pub fn new(transport: Arc<dyn ApiTransport>) -> Self {
        Self { transport }
    }

    /// Budget categories for one month. `Ok(None)` when the server has no
    /// budget for the period.
    pub async fn list(&self, period: BudgetPeriod) -> Result<Option<BudgetSheet>, ApiError> {
        validation::validate_period(period)?;
        let path = format!(
            "{}?year={}&month={}",
            paths::BUDGET,
            period.year,
            period.month
        );
        tracing::debug!(
            target: "finora.budget",
            stage = "budget.list.in",
            year = period.year,
            month = period.month
        );
        let body = self.transport.send(ApiRequest::get(path.as_str())).await?;
        if body.is_null() {
            return Ok(None);
        }
        let sheet: BudgetSheet = decode_body(&path, body)?;
        tracing::debug!(
            target: "finora.budget",
            stage = "budget.list.out",
            categories = sheet.categories.len()
        );
        Ok(Some(sheet))
    }

    /// Create or append category targets for a month.
    pub async fn add(&self, budget: NewBudget) -> Result<Value, ApiError> {
        validation::validate_new_budget(&budget)?;
        tracing::debug!(
            target: "finora.budget",
            stage = "budget.add.in",
            year = budget.year,
            month = budget.month,
            categories = budget.categories.len()
        );
        self.transport
            .send(ApiRequest::post(paths::BUDGET, json!(budget)))
            .await
    }
}
