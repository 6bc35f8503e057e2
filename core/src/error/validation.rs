use std::fmt;

use thiserror::Error;

/// Client-side form errors. These never reach the HTTP client.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ValidationError {
    #[error("Full name is required")]
    NameRequired,
    #[error("Email is required")]
    EmailRequired,
    #[error("Invalid email format")]
    InvalidEmail,
    #[error("Password is required")]
    PasswordRequired,
    #[error("Password must be at least {min} characters")]
    PasswordTooShort { min: usize },
    #[error("Please confirm your password")]
    ConfirmRequired,
    #[error("Passwords do not match")]
    PasswordMismatch,
    #[error("Month must be between 1 and 12, got {0}")]
    InvalidMonth(u32),
    #[error("Category name is required")]
    CategoryRequired,
    #[error("Budget target must be a positive amount, got {0}")]
    InvalidTarget(f64),
    #[error("Unknown onboarding option: {0}")]
    UnknownOption(String),
}

impl ValidationError {
    /// Form field the error belongs to, for inline display.
    pub fn field(&self) -> &'static str {
        match self {
            Self::NameRequired => "fullName",
            Self::EmailRequired | Self::InvalidEmail => "email",
            Self::PasswordRequired | Self::PasswordTooShort { .. } => "password",
            Self::ConfirmRequired | Self::PasswordMismatch => "confirmPassword",
            Self::InvalidMonth(_) => "month",
            Self::CategoryRequired => "category",
            Self::InvalidTarget(_) => "target",
            Self::UnknownOption(_) => "option",
        }
    }
}

/// Every field error found in one form, in field order.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ValidationErrors {
    errors: Vec<ValidationError>,
}

impl ValidationErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, err: ValidationError) {
        self.errors.push(err);
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn errors(&self) -> &[ValidationError] {
        &self.errors
    }

    /// First error reported for `field`, if any.
    pub fn for_field(&self, field: &str) -> Option<&ValidationError> {
        self.errors.iter().find(|e| e.field() == field)
    }

    pub fn into_result(self) -> Result<(), ValidationErrors> {
        if self.errors.is_empty() {
            Ok(())
        } else {
            Err(self)
        }
    }
}

impl From<Vec<ValidationError>> for ValidationErrors {
    fn from(errors: Vec<ValidationError>) -> Self {
        Self { errors }
    }
}

impl Extend<ValidationError> for ValidationErrors {
    fn extend<I: IntoIterator<Item = ValidationError>>(&mut self, iter: I) {
        self.errors.extend(iter);
    }
}

impl From<ValidationError> for ValidationErrors {
    fn from(err: ValidationError) -> Self {
        Self { errors: vec![err] }
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (idx, err) in self.errors.iter().enumerate() {
            if idx > 0 {
                f.write_str("; ")?;
            }
            write!(f, "{err}")?;
        }
        Ok(())
    }
}

impl std::error::Error for ValidationErrors {}
