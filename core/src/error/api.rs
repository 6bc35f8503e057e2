use std::fmt;

use thiserror::Error;

use super::validation::ValidationErrors;
use crate::session::TransitionError;

/// Stable classification of an [`ApiError`], used as a log field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApiErrorKind {
    Timeout,
    NetworkUnreachable,
    Server,
    Decode,
    Validation,
    Busy,
    Registration,
    Transition,
}

impl ApiErrorKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Timeout => "timeout",
            Self::NetworkUnreachable => "network_unreachable",
            Self::Server => "server",
            Self::Decode => "decode",
            Self::Validation => "validation",
            Self::Busy => "busy",
            Self::Registration => "registration",
            Self::Transition => "transition",
        }
    }
}

impl fmt::Display for ApiErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Failures surfaced by the transport and the API operations.
///
/// The first four variants come from the HTTP client; the rest are raised
/// by the operations themselves before or after the network call.
#[derive(Error, Debug)]
pub enum ApiError {
    #[error("request timed out after {timeout_ms}ms: {url}")]
    Timeout { url: String, timeout_ms: u64 },

    #[error("network unreachable: {url}: {message}")]
    NetworkUnreachable { url: String, message: String },

    #[error("server error status={status}: {body}")]
    ServerError { status: u16, body: String },

    #[error("failed to decode response from {url}: {message}")]
    Decode {
        status: Option<u16>,
        url: String,
        message: String,
    },

    #[error("{0}")]
    Validation(#[from] ValidationErrors),

    #[error("another request is already in flight")]
    Busy,

    #[error("registration failed")]
    RegistrationFailed,

    #[error("session transition rejected: {0}")]
    Transition(#[from] TransitionError),
}

impl ApiError {
    pub fn kind(&self) -> ApiErrorKind {
        match self {
            Self::Timeout { .. } => ApiErrorKind::Timeout,
            Self::NetworkUnreachable { .. } => ApiErrorKind::NetworkUnreachable,
            Self::ServerError { .. } => ApiErrorKind::Server,
            Self::Decode { .. } => ApiErrorKind::Decode,
            Self::Validation(_) => ApiErrorKind::Validation,
            Self::Busy => ApiErrorKind::Busy,
            Self::RegistrationFailed => ApiErrorKind::Registration,
            Self::Transition(_) => ApiErrorKind::Transition,
        }
    }

    /// HTTP status of the response, when one was received.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::ServerError { status, .. } => Some(*status),
            Self::Decode { status, .. } => *status,
            _ => None,
        }
    }

    /// True when the failure happened before any response arrived.
    pub fn is_transport(&self) -> bool {
        matches!(self, Self::Timeout { .. } | Self::NetworkUnreachable { .. })
    }
}
