use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::session::User;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoginPayload {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegisterPayload {
    pub name: String,
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VerifyTokenPayload {
    pub token: String,
}

/// `{token, user}` body returned by login and register.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AuthPayload {
    #[serde(default)]
    pub token: Option<String>,
    #[serde(default)]
    pub user: Option<User>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IncomeExpenseSources {
    pub income_sources: Vec<String>,
    pub expense_sources: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BudgetPeriod {
    pub year: i32,
    pub month: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BudgetCategory {
    #[serde(rename = "_id", default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub name: String,
    pub target: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BudgetSheet {
    #[serde(default)]
    pub categories: Vec<BudgetCategory>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl BudgetSheet {
    pub fn total_target(&self) -> f64 {
        self.categories.iter().map(|c| c.target).sum()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewBudgetCategory {
    pub name: String,
    pub target: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewBudget {
    pub year: i32,
    pub month: u32,
    pub categories: Vec<NewBudgetCategory>,
}

impl NewBudget {
    /// One category target for the given period.
    pub fn single(period: BudgetPeriod, name: impl Into<String>, target: f64) -> Self {
        Self {
            year: period.year,
            month: period.month,
            categories: vec![NewBudgetCategory {
                name: name.into(),
                target,
            }],
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Expense {
    #[serde(rename = "_id", default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub amount: f64,
    #[serde(default)]
    pub date: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthlyReport {
    #[serde(default)]
    pub total_amount: f64,
    #[serde(default)]
    pub expenses: Vec<Expense>,
}

/// The report endpoint answers `{ "data": { totalAmount, expenses } }`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ReportEnvelope {
    pub data: Option<MonthlyReport>,
}

impl MonthlyReport {
    /// Spend per category, sorted by category name.
    pub fn totals_by_category(&self) -> Vec<(String, f64)> {
        let mut totals = std::collections::BTreeMap::<String, f64>::new();
        for expense in &self.expenses {
            *totals.entry(expense.category.clone()).or_default() += expense.amount;
        }
        totals.into_iter().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn test_sources_wire_names() {
        let payload = IncomeExpenseSources {
            income_sources: vec!["Freelancer".to_string()],
            expense_sources: vec!["Housing".to_string()],
        };
        assert_eq!(
            serde_json::to_value(&payload).unwrap(),
            json!({"incomeSources": ["Freelancer"], "expenseSources": ["Housing"]})
        );
    }

    #[test]
    fn test_budget_sheet_decodes_mongo_ids() {
        let sheet: BudgetSheet = serde_json::from_value(json!({
            "year": 2026,
            "month": 10,
            "categories": [
                {"_id": "c1", "name": "Food", "target": 300.0},
                {"_id": "c2", "name": "Bills", "target": 120.5}
            ]
        }))
        .unwrap();
        assert_eq!(sheet.categories[0].id.as_deref(), Some("c1"));
        assert_eq!(sheet.total_target(), 420.5);
        assert_eq!(sheet.extra.get("year"), Some(&json!(2026)));
    }

    #[test]
    fn test_report_totals_by_category() {
        let report: MonthlyReport = serde_json::from_value(json!({
            "totalAmount": 60.0,
            "expenses": [
                {"_id": "e1", "category": "Food", "description": "lunch", "amount": 15.0, "date": "2026-10-01"},
                {"_id": "e2", "category": "Bills", "description": "power", "amount": 30.0, "date": "2026-10-02"},
                {"_id": "e3", "category": "Food", "description": "dinner", "amount": 15.0, "date": "2026-10-03"}
            ]
        }))
        .unwrap();
        assert_eq!(
            report.totals_by_category(),
            vec![("Bills".to_string(), 30.0), ("Food".to_string(), 30.0)]
        );
    }
}
