//! Client-side form checks run before any network call.

use regex::Regex;
use std::sync::OnceLock;

use crate::error::{ValidationError, ValidationErrors};
use crate::services::{BudgetPeriod, NewBudget};

pub const MIN_PASSWORD_LEN: usize = 6;

static EMAIL_RE: OnceLock<Regex> = OnceLock::new();

fn email_re() -> &'static Regex {
    EMAIL_RE.get_or_init(|| Regex::new(r"\S+@\S+\.\S+").expect("email regex"))
}

pub fn check_email(email: &str) -> Option<ValidationError> {
    if email.is_empty() {
        Some(ValidationError::EmailRequired)
    } else if !email_re().is_match(email) {
        Some(ValidationError::InvalidEmail)
    } else {
        None
    }
}

pub fn check_password(password: &str) -> Option<ValidationError> {
    if password.is_empty() {
        Some(ValidationError::PasswordRequired)
    } else if password.chars().count() < MIN_PASSWORD_LEN {
        Some(ValidationError::PasswordTooShort {
            min: MIN_PASSWORD_LEN,
        })
    } else {
        None
    }
}

pub fn validate_login(email: &str, password: &str) -> Result<(), ValidationErrors> {
    let mut errors = ValidationErrors::new();
    errors.extend(check_email(email));
    errors.extend(check_password(password));
    errors.into_result()
}

/// Registration payload checks (name, email, password).
pub fn validate_registration(
    name: &str,
    email: &str,
    password: &str,
) -> Result<(), ValidationErrors> {
    let mut errors = ValidationErrors::new();
    if name.trim().is_empty() {
        errors.push(ValidationError::NameRequired);
    }
    errors.extend(check_email(email));
    errors.extend(check_password(password));
    errors.into_result()
}

/// Full signup form, including the confirmation field.
pub fn validate_signup(
    name: &str,
    email: &str,
    password: &str,
    confirm_password: &str,
) -> Result<(), ValidationErrors> {
    let mut errors = match validate_registration(name, email, password) {
        Ok(()) => ValidationErrors::new(),
        Err(errors) => errors,
    };
    if confirm_password.is_empty() {
        errors.push(ValidationError::ConfirmRequired);
    } else if password != confirm_password {
        errors.push(ValidationError::PasswordMismatch);
    }
    errors.into_result()
}

pub fn check_period(period: BudgetPeriod) -> Option<ValidationError> {
    if (1..=12).contains(&period.month) {
        None
    } else {
        Some(ValidationError::InvalidMonth(period.month))
    }
}

pub fn validate_period(period: BudgetPeriod) -> Result<(), ValidationErrors> {
    let mut errors = ValidationErrors::new();
    errors.extend(check_period(period));
    errors.into_result()
}

/// Month range, non-empty names and finite positive targets.
pub fn validate_new_budget(budget: &NewBudget) -> Result<(), ValidationErrors> {
    let mut errors = ValidationErrors::new();
    errors.extend(check_period(BudgetPeriod {
        year: budget.year,
        month: budget.month,
    }));
    if budget.categories.is_empty() {
        errors.push(ValidationError::CategoryRequired);
    }
    for category in &budget.categories {
        if category.name.trim().is_empty() {
            errors.push(ValidationError::CategoryRequired);
        }
        if !category.target.is_finite() || category.target <= 0.0 {
            errors.push(ValidationError::InvalidTarget(category.target));
        }
    }
    errors.into_result()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_login_accepts_valid_credentials() {
        assert!(validate_login("a@b.com", "secret1").is_ok());
    }

    #[test]
    fn test_login_reports_every_field() {
        let errors = validate_login("", "123").unwrap_err();
        assert_eq!(
            errors.errors(),
            &[
                ValidationError::EmailRequired,
                ValidationError::PasswordTooShort { min: 6 }
            ]
        );
        assert_eq!(
            errors.for_field("password").map(|e| e.to_string()),
            Some("Password must be at least 6 characters".to_string())
        );
    }

    #[test]
    fn test_email_shape() {
        assert_eq!(check_email("not-an-email"), Some(ValidationError::InvalidEmail));
        assert_eq!(check_email("a@b"), Some(ValidationError::InvalidEmail));
        assert_eq!(check_email("first.last@mail.example.org"), None);
    }

    #[test]
    fn test_signup_mismatch() {
        let errors = validate_signup("A", "a@b.com", "secret1", "secret2").unwrap_err();
        assert_eq!(errors.errors(), &[ValidationError::PasswordMismatch]);
        assert_eq!(errors.errors()[0].field(), "confirmPassword");
    }

    #[test]
    fn test_signup_requires_name_and_confirmation() {
        let errors = validate_signup("  ", "a@b.com", "secret1", "").unwrap_err();
        assert_eq!(
            errors.errors(),
            &[ValidationError::NameRequired, ValidationError::ConfirmRequired]
        );
    }

    #[test]
    fn test_budget_checks() {
        let period = BudgetPeriod {
            year: 2026,
            month: 13,
        };
        assert_eq!(check_period(period), Some(ValidationError::InvalidMonth(13)));

        let budget = NewBudget::single(
            BudgetPeriod {
                year: 2026,
                month: 10,
            },
            " ",
            f64::NAN,
        );
        let errors = validate_new_budget(&budget).unwrap_err();
        assert_eq!(errors.errors().len(), 2);
        assert_eq!(errors.errors()[0], ValidationError::CategoryRequired);
        assert_eq!(errors.errors()[1].field(), "target");

        let ok = NewBudget::single(
            BudgetPeriod {
                year: 2026,
                month: 10,
            },
            "Food",
            250.0,
        );
        assert!(validate_new_budget(&ok).is_ok());
    }
}
