#[allow(clippy::module_inception)]
pub mod error;
pub mod api;
pub mod validation;

pub use api::{ApiError, ApiErrorKind};
pub use error::CliError;
pub use validation::{ValidationError, ValidationErrors};
