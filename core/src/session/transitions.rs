//! Session transition rules

use super::types::SessionPhase;
use std::fmt;
use thiserror::Error;

/// The four named transitions a session accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionAction {
    RequestStarted,
    Succeeded,
    Failed,
    Logout,
}

impl SessionAction {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::RequestStarted => "request-started",
            Self::Succeeded => "succeeded",
            Self::Failed => "failed",
            Self::Logout => "logout",
        }
    }
}

impl fmt::Display for SessionAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransitionError {
    #[error("a request is already in flight")]
    AlreadyLoading,
    #[error("invalid transition {action} from {from}")]
    InvalidTransition {
        from: SessionPhase,
        action: SessionAction,
    },
}

pub struct SessionTransition;

impl SessionTransition {
    /// Check `action` against the current phase and return the phase it leads to.
    pub fn validate(
        from: SessionPhase,
        action: SessionAction,
    ) -> Result<SessionPhase, TransitionError> {
        match (from, action) {
            // one request at a time
            (SessionPhase::Loading, SessionAction::RequestStarted) => {
                Err(TransitionError::AlreadyLoading)
            }
            (_, SessionAction::RequestStarted) => Ok(SessionPhase::Loading),

            (SessionPhase::Loading, SessionAction::Succeeded) => Ok(SessionPhase::Authenticated),
            (SessionPhase::Loading, SessionAction::Failed) => Ok(SessionPhase::Error),

            (SessionPhase::Loading, SessionAction::Logout) => {
                Err(TransitionError::InvalidTransition { from, action })
            }
            (_, SessionAction::Logout) => Ok(SessionPhase::Idle),

            _ => Err(TransitionError::InvalidTransition { from, action }),
        }
    }

    pub fn phase_description(phase: SessionPhase) -> &'static str {
        match phase {
            SessionPhase::Idle => "signed out",
            SessionPhase::Loading => "request in flight",
            SessionPhase::Authenticated => "signed in",
            SessionPhase::Error => "last request failed",
        }
    }
}
