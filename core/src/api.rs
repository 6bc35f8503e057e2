//! Stable re-exports for consumers (`cli`, `plugins`, and external crates).
//!
//! Prefer importing from `finora_core::api` instead of reaching into internal modules.

pub use crate::config::{
    get_finora_data_dir, load_default, load_from_path, ApiConfig, AppConfig, LoggingConfig,
    SessionStoreConfig, API_URL_ENV,
};
pub use crate::error::{ApiError, ApiErrorKind, CliError, ValidationError, ValidationErrors};
pub use crate::services::{
    paths, AuthPayload, AuthService, BudgetCategory, BudgetPeriod, BudgetService, BudgetSheet,
    Expense, IncomeExpenseSources, LoginPayload, MonthlyReport, NewBudget, NewBudgetCategory,
    OnboardingOption, OnboardingSelection, OnboardingStep, RegisterPayload, ReportEnvelope,
    ReportService,
    ResumeOutcome, SourceKind, VerifyTokenPayload, BUDGET_CATEGORIES, ONBOARDING_STEPS,
};
pub use crate::session::{
    PersistedRecord, Session, SessionAction, SessionContainer, SessionEvent, SessionPersistence,
    SessionPhase, SessionTransition, TransitionError, User,
};
pub use crate::transport::{decode_body, ApiRequest, ApiTransport, HttpMethod, TokenProvider};
pub use crate::validation::{validate_login, validate_signup, MIN_PASSWORD_LEN};
