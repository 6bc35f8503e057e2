//! Operations against the Finora API, each one network call through an
//! [`ApiTransport`](crate::transport::ApiTransport).

pub mod auth;
pub mod budget;
pub mod models;
pub mod onboarding;
pub mod report;

pub use auth::{AuthService, ResumeOutcome};
pub use budget::{BudgetService, BUDGET_CATEGORIES};
pub use models::{
    AuthPayload, BudgetCategory, BudgetPeriod, BudgetSheet, Expense, IncomeExpenseSources,
    LoginPayload, MonthlyReport, NewBudget, NewBudgetCategory, RegisterPayload,
    ReportEnvelope, VerifyTokenPayload,
};
pub use onboarding::{
    OnboardingOption, OnboardingSelection, OnboardingStep, SourceKind, ONBOARDING_STEPS,
};
pub use report::ReportService;

pub mod paths {
    pub const LOGIN: &str = "/user/login";
    pub const REGISTER: &str = "/user/register";
    pub const VERIFY_TOKEN: &str = "/user/verify-token";
    pub const UPDATE_SOURCES: &str = "/user/update-income-and-expense-sources";
    pub const BUDGET: &str = "/budget";
    pub const EXPENSE_REPORT: &str = "/expenses/report";
}
