//! Session state container
//!
//! Single owner of the in-memory [`Session`]. Every mutation goes through
//! one of the named transitions, is mirrored into the persistence store,
//! and is broadcast to subscribers.

use super::persist::SessionPersistence;
use super::transitions::{SessionAction, SessionTransition, TransitionError};
use super::types::{PersistedRecord, Session, SessionEvent, SessionPhase, User};
use crate::transport::TokenProvider;
use async_trait::async_trait;
use chrono::Utc;
use std::sync::Arc;
use tokio::sync::{broadcast, Mutex, RwLock};

const EVENT_CHANNEL_CAPACITY: usize = 64;

#[derive(Clone)]
pub struct SessionContainer {
    inner: Arc<SessionContainerInner>,
}

struct SessionContainerInner {
    session: RwLock<Session>,
    store: Arc<dyn SessionPersistence>,
    /// Held from the in-memory commit until the matching store write ends,
    /// so the store sees writes in the same order as memory.
    persist_lock: Mutex<()>,
    event_tx: broadcast::Sender<SessionEvent>,
}

/// What the persistence step of a transition must do.
enum PersistOp {
    Save(PersistedRecord),
    Clear,
}

impl SessionContainer {
    /// Build a container populated from the store.
    ///
    /// The record is read before the container exists, so nothing can
    /// observe the session ahead of rehydration. Load failures are logged
    /// and leave the session empty.
    pub async fn rehydrate(store: Arc<dyn SessionPersistence>) -> Self {
        let session = match store.load().await {
            Ok(Some(record)) => Session::from_record(record),
            Ok(None) => Session::default(),
            Err(err) => {
                tracing::warn!(
                    target: "finora.session",
                    stage = "session.rehydrate",
                    store = store.name(),
                    error = %err,
                    "failed to load persisted session, starting signed out"
                );
                Session::default()
            }
        };
        tracing::debug!(
            target: "finora.session",
            stage = "session.rehydrate",
            store = store.name(),
            phase = %session.phase()
        );
        Self::with_session(store, session)
    }

    /// Empty container that does not read the store.
    pub fn empty(store: Arc<dyn SessionPersistence>) -> Self {
        Self::with_session(store, Session::default())
    }

    fn with_session(store: Arc<dyn SessionPersistence>, session: Session) -> Self {
        let (event_tx, _) = broadcast::channel(EVENT_CHANNEL_CAPACITY);
        Self {
            inner: Arc::new(SessionContainerInner {
                session: RwLock::new(session),
                store,
                persist_lock: Mutex::new(()),
                event_tx,
            }),
        }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<SessionEvent> {
        self.inner.event_tx.subscribe()
    }

    pub async fn snapshot(&self) -> Session {
        self.inner.session.read().await.clone()
    }

    pub async fn token(&self) -> Option<String> {
        self.inner.session.read().await.token().map(str::to_string)
    }

    pub async fn phase(&self) -> SessionPhase {
        self.inner.session.read().await.phase()
    }

    pub async fn is_loading(&self) -> bool {
        self.inner.session.read().await.is_loading()
    }

    /// `Idle | Error | Authenticated -> Loading`, clearing the last error.
    pub async fn request_started(&self) -> Result<(), TransitionError> {
        let mut session = self.inner.session.write().await;
        let from = session.phase();
        SessionTransition::validate(from, SessionAction::RequestStarted)?;
        session.begin_request();
        drop(session);

        self.emit(SessionEvent::RequestStarted {
            from,
            timestamp: Utc::now(),
        });
        Ok(())
    }

    /// `Loading -> Authenticated`, persisting `{token, user}`.
    pub async fn succeeded(&self, token: String, user: User) -> Result<(), TransitionError> {
        let label = user.display_name();
        self.commit(SessionAction::Succeeded, |session| {
            session.authenticate(token, user);
            PersistOp::Save(session.to_record())
        })
        .await?;

        self.emit(SessionEvent::Authenticated {
            user: label,
            timestamp: Utc::now(),
        });
        Ok(())
    }

    /// `Loading -> Error`, clearing and persisting the cleared token/user.
    pub async fn failed(&self, message: impl Into<String>) -> Result<(), TransitionError> {
        let message = message.into();
        let error = message.clone();
        self.commit(SessionAction::Failed, |session| {
            session.fail(message);
            PersistOp::Save(session.to_record())
        })
        .await?;

        self.emit(SessionEvent::Failed {
            error,
            timestamp: Utc::now(),
        });
        Ok(())
    }

    /// `failed` for a request whose future was dropped before it recorded
    /// an outcome. Runs on a spawned task since it is called from `Drop`.
    /// If the session already left `Loading` the transition is rejected and
    /// only logged.
    pub(crate) fn cancel_request(&self, message: &str) {
        let Ok(handle) = tokio::runtime::Handle::try_current() else {
            tracing::warn!(
                target: "finora.session",
                stage = "session.cancel",
                "no runtime to release the cancelled request"
            );
            return;
        };
        let container = self.clone();
        let message = message.to_string();
        handle.spawn(async move {
            if let Err(err) = container.failed(message).await {
                tracing::debug!(
                    target: "finora.session",
                    stage = "session.cancel",
                    error = %err,
                    "cancelled request had already settled"
                );
            }
        });
    }

    /// Back to `Idle` and remove the persisted record. Rejected while a
    /// request is in flight.
    pub async fn logout(&self) -> Result<(), TransitionError> {
        let from = self
            .commit(SessionAction::Logout, |session| {
                session.clear();
                PersistOp::Clear
            })
            .await?;

        self.emit(SessionEvent::LoggedOut {
            from,
            timestamp: Utc::now(),
        });
        Ok(())
    }

    /// Validate, mutate under the write lock, then run the store write in
    /// commit order. Returns the phase the session left.
    async fn commit<F>(
        &self,
        action: SessionAction,
        f: F,
    ) -> Result<SessionPhase, TransitionError>
    where
        F: FnOnce(&mut Session) -> PersistOp,
    {
        let mut session = self.inner.session.write().await;
        let from = session.phase();
        let to = SessionTransition::validate(from, action)?;
        let op = f(&mut *session);
        let _ordered = self.inner.persist_lock.lock().await;
        drop(session);

        tracing::debug!(
            target: "finora.session",
            stage = "session.transition",
            action = %action,
            from = %from,
            to = %to
        );

        let result = match &op {
            PersistOp::Save(record) => self.inner.store.save(record).await,
            PersistOp::Clear => self.inner.store.clear().await,
        };
        if let Err(err) = result {
            // in-memory state stays authoritative
            tracing::warn!(
                target: "finora.session",
                stage = "session.persist",
                store = self.inner.store.name(),
                action = %action,
                error = %err,
                "failed to persist session"
            );
        }

        Ok(from)
    }

    fn emit(&self, event: SessionEvent) {
        let _ = self.inner.event_tx.send(event);
    }
}

#[async_trait]
impl TokenProvider for SessionContainer {
    async fn current_token(&self) -> Option<String> {
        self.token().await
    }
}
