//! Session data model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;

/// Identity/profile record returned by the server.
///
/// Unknown fields are kept in `extra` so a persisted user round-trips
/// without losing anything the server sent.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct User {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl User {
    /// Best label for logs and prompts: name, then email, then id.
    pub fn display_name(&self) -> String {
        if let Some(name) = self.name.as_deref().filter(|s| !s.trim().is_empty()) {
            return name.to_string();
        }
        if let Some(email) = self.email.as_deref().filter(|s| !s.trim().is_empty()) {
            return email.to_string();
        }
        match &self.id {
            Some(Value::String(s)) => s.clone(),
            Some(other) => other.to_string(),
            None => "<unknown>".to_string(),
        }
    }
}

/// State-machine phase derived from a [`Session`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionPhase {
    Idle,
    Loading,
    Authenticated,
    Error,
}

impl SessionPhase {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Loading => "loading",
            Self::Authenticated => "authenticated",
            Self::Error => "error",
        }
    }
}

impl fmt::Display for SessionPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Client-held authentication state.
///
/// Fields are private: only the container mutates a session, and only
/// through its transitions, so `token` and `user` are always set or
/// cleared together. The token is left out of the serialized form; only
/// [`PersistedRecord`] carries it.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Session {
    #[serde(skip_serializing)]
    token: Option<String>,
    user: Option<User>,
    is_loading: bool,
    last_error: Option<String>,
}

impl Session {
    /// Session rebuilt from its durable projection.
    ///
    /// A half-populated record (token without user or the reverse) is
    /// treated as empty.
    pub fn from_record(record: PersistedRecord) -> Self {
        match (record.token, record.user) {
            (Some(token), Some(user)) => Self {
                token: Some(token),
                user: Some(user),
                is_loading: false,
                last_error: None,
            },
            _ => Self::default(),
        }
    }

    /// Durable projection: token and user only.
    pub fn to_record(&self) -> PersistedRecord {
        PersistedRecord {
            token: self.token.clone(),
            user: self.user.clone(),
        }
    }

    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    pub fn user(&self) -> Option<&User> {
        self.user.as_ref()
    }

    pub fn is_loading(&self) -> bool {
        self.is_loading
    }

    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    pub fn is_authenticated(&self) -> bool {
        self.phase() == SessionPhase::Authenticated
    }

    pub fn phase(&self) -> SessionPhase {
        if self.is_loading {
            SessionPhase::Loading
        } else if self.last_error.is_some() {
            SessionPhase::Error
        } else if self.token.is_some() {
            SessionPhase::Authenticated
        } else {
            SessionPhase::Idle
        }
    }

    pub(crate) fn begin_request(&mut self) {
        self.is_loading = true;
        self.last_error = None;
    }

    pub(crate) fn authenticate(&mut self, token: String, user: User) {
        self.is_loading = false;
        self.last_error = None;
        self.token = Some(token);
        self.user = Some(user);
    }

    pub(crate) fn fail(&mut self, message: String) {
        self.is_loading = false;
        self.last_error = Some(message);
        self.token = None;
        self.user = None;
    }

    pub(crate) fn clear(&mut self) {
        *self = Self::default();
    }
}

/// The durable projection of a session, stored under one namespace.
///
/// Absent values serialise as `null` so a cleared record is explicit.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PersistedRecord {
    #[serde(default)]
    pub token: Option<String>,
    #[serde(default)]
    pub user: Option<User>,
}

impl PersistedRecord {
    pub fn is_empty(&self) -> bool {
        self.token.is_none() && self.user.is_none()
    }

    /// Canonical byte form written by every store.
    pub fn to_bytes(&self) -> serde_json::Result<Vec<u8>> {
        serde_json::to_vec_pretty(self)
    }

    pub fn from_bytes(bytes: &[u8]) -> serde_json::Result<Self> {
        serde_json::from_slice(bytes)
    }
}

/// Notifications broadcast after each committed transition.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum SessionEvent {
    RequestStarted {
        from: SessionPhase,
        timestamp: DateTime<Utc>,
    },
    Authenticated {
        user: String,
        timestamp: DateTime<Utc>,
    },
    Failed {
        error: String,
        timestamp: DateTime<Utc>,
    },
    LoggedOut {
        from: SessionPhase,
        timestamp: DateTime<Utc>,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn user() -> User {
        serde_json::from_value(json!({"id": 1, "name": "A", "currency": "USD"})).unwrap()
    }

    #[test]
    fn test_phase_derivation() {
        let mut session = Session::default();
        assert_eq!(session.phase(), SessionPhase::Idle);

        session.begin_request();
        assert_eq!(session.phase(), SessionPhase::Loading);

        session.authenticate("abc".to_string(), user());
        assert_eq!(session.phase(), SessionPhase::Authenticated);

        session.begin_request();
        session.fail("boom".to_string());
        assert_eq!(session.phase(), SessionPhase::Error);
        assert!(session.token().is_none());
        assert!(session.user().is_none());
    }

    #[test]
    fn test_begin_request_clears_error() {
        let mut session = Session::default();
        session.begin_request();
        session.fail("Request failed with status code 401".to_string());
        session.begin_request();
        assert!(session.last_error().is_none());
        assert!(session.is_loading());
    }

    #[test]
    fn test_half_record_is_dropped() {
        let record = PersistedRecord {
            token: Some("abc".to_string()),
            user: None,
        };
        assert_eq!(Session::from_record(record), Session::default());
    }

    #[test]
    fn test_user_keeps_unknown_fields() {
        let u = user();
        assert_eq!(u.extra.get("currency"), Some(&json!("USD")));
        let back = serde_json::to_value(&u).unwrap();
        assert_eq!(back, json!({"id": 1, "name": "A", "currency": "USD"}));
    }

    #[test]
    fn test_cleared_record_serialises_nulls() {
        let bytes = PersistedRecord::default().to_bytes().unwrap();
        let v: Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(v, json!({"token": null, "user": null}));
    }

    #[test]
    fn test_serialized_session_omits_token() {
        let session = Session::from_record(PersistedRecord {
            token: Some("abc".to_string()),
            user: Some(user()),
        });
        assert!(session.is_authenticated());
        let v = serde_json::to_value(&session).unwrap();
        assert!(v.get("token").is_none());
        assert_eq!(v["user"]["name"], json!("A"));
    }

    #[test]
    fn test_display_name_fallbacks() {
        let mut u = User {
            id: Some(json!("64f0")),
            ..Default::default()
        };
        assert_eq!(u.display_name(), "64f0");
        u.email = Some("a@b.com".to_string());
        assert_eq!(u.display_name(), "a@b.com");
        u.name = Some("A".to_string());
        assert_eq!(u.display_name(), "A");
    }
}
