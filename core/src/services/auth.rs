//! Account operations: verify, login, register, onboarding sources.
//!
//! The three session operations report failure differently:
//! - `verify_token` propagates the transport error and never touches the
//!   session;
//! - `login` records the outcome in the session container and swallows
//!   transport errors (`Ok(None)`);
//! - `register` never authenticates and replaces any failure with
//!   [`ApiError::RegistrationFailed`].

use serde_json::{json, Value};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use super::models::{
    AuthPayload, IncomeExpenseSources, LoginPayload, RegisterPayload, VerifyTokenPayload,
};
use super::paths;
use crate::error::ApiError;
use crate::session::{SessionContainer, TransitionError};
use crate::transport::{decode_body, ApiRequest, ApiTransport};
use crate::validation;

/// Result of checking a rehydrated session against the server.
#[derive(Debug)]
pub enum ResumeOutcome {
    /// No persisted token; nothing was sent.
    SignedOut,
    /// Server confirmed the token.
    Verified(Value),
    /// Server refused the token (401/403); the session has been cleared.
    Rejected(ApiError),
    /// No answer, or an answer that says nothing about the token (5xx,
    /// undecodable body); the session is kept as is.
    Unverified(ApiError),
}

#[derive(Clone)]
pub struct AuthService {
    transport: Arc<dyn ApiTransport>,
    session: SessionContainer,
    registering: Arc<AtomicBool>,
}

/// Clears its flag on drop.
struct InFlight<'a>(&'a AtomicBool);

impl<'a> InFlight<'a> {
    fn acquire(flag: &'a AtomicBool) -> Option<Self> {
        flag.compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()
            .map(|_| Self(flag))
    }
}

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

/// Fails the session's pending request if dropped before `settle`.
struct PendingLogin<'a> {
    session: &'a SessionContainer,
    armed: bool,
}

impl<'a> PendingLogin<'a> {
    fn arm(session: &'a SessionContainer) -> Self {
        Self {
            session,
            armed: true,
        }
    }

    fn settle(mut self) {
        self.armed = false;
    }
}

impl Drop for PendingLogin<'_> {
    fn drop(&mut self) {
        if self.armed {
            tracing::warn!(
                target: "finora.auth",
                stage = "auth.login.cancelled",
                "login dropped before completion"
            );
            self.session.cancel_request(LOGIN_CANCELLED);
        }
    }
}

const LOGIN_CANCELLED: &str = "login cancelled";

impl AuthService {
    pub fn new(transport: Arc<dyn ApiTransport>, session: SessionContainer) -> Self {
        Self {
            transport,
            session,
            registering: Arc::new(AtomicBool::new(false)),
        }
    }

    pub fn session(&self) -> &SessionContainer {
        &self.session
    }

    /// True while a login or registration is in flight.
    pub async fn is_loading(&self) -> bool {
        self.registering.load(Ordering::Acquire) || self.session.is_loading().await
    }

    #[tracing::instrument(name = "auth.verify_token", skip_all)]
    pub async fn verify_token(&self, payload: VerifyTokenPayload) -> Result<Value, ApiError> {
        let req = ApiRequest::post(paths::VERIFY_TOKEN, json!(payload));
        match self.transport.send(req).await {
            Ok(body) => {
                tracing::debug!(target: "finora.auth", stage = "auth.verify.out", ok = true);
                Ok(body)
            }
            Err(err) => {
                tracing::debug!(
                    target: "finora.auth",
                    stage = "auth.verify.out",
                    ok = false,
                    kind = %err.kind()
                );
                Err(err)
            }
        }
    }

    /// Exchange credentials for a session.
    ///
    /// Returns `Ok(None)` when the call failed; the reason is in the
    /// session's `last_error`. `Err` is only returned for client-side
    /// validation, a login already in flight, or a rejected transition.
    /// Dropping the future before it settles fails the request with
    /// `"login cancelled"` so the session does not stay `Loading`.
    #[tracing::instrument(name = "auth.login", skip_all)]
    pub async fn login(&self, payload: LoginPayload) -> Result<Option<AuthPayload>, ApiError> {
        validation::validate_login(&payload.email, &payload.password)?;

        match self.session.request_started().await {
            Ok(()) => {}
            Err(TransitionError::AlreadyLoading) => return Err(ApiError::Busy),
            Err(err) => return Err(err.into()),
        }

        let pending = PendingLogin::arm(&self.session);
        let outcome = self.exchange_credentials(payload).await;
        pending.settle();
        outcome
    }

    /// The part of `login` that runs with the session in `Loading`. Every
    /// path ends in `succeeded` or `failed`.
    async fn exchange_credentials(
        &self,
        payload: LoginPayload,
    ) -> Result<Option<AuthPayload>, ApiError> {
        tracing::debug!(target: "finora.auth", stage = "auth.login.in");
        let req = ApiRequest::post(paths::LOGIN, json!(payload)).unauthenticated();
        let body = match self.transport.send(req).await {
            Ok(body) => body,
            Err(err) => {
                tracing::warn!(
                    target: "finora.auth",
                    stage = "auth.login.out",
                    kind = %err.kind(),
                    error = %err,
                    "login failed"
                );
                self.session.failed(err.to_string()).await?;
                return Ok(None);
            }
        };

        let auth: AuthPayload = match decode_body(paths::LOGIN, body) {
            Ok(auth) => auth,
            Err(err) => {
                self.session.failed(err.to_string()).await?;
                return Ok(None);
            }
        };

        let token = auth.token.clone().filter(|t| !t.is_empty());
        match (token, auth.user.clone()) {
            (Some(token), Some(user)) => {
                self.session.succeeded(token, user).await?;
                tracing::debug!(target: "finora.auth", stage = "auth.login.out", ok = true);
                Ok(Some(auth))
            }
            _ => {
                self.session
                    .failed("malformed login response: missing token or user")
                    .await?;
                Ok(None)
            }
        }
    }

    /// Create an account. The returned payload is not applied to the session.
    #[tracing::instrument(name = "auth.register", skip_all)]
    pub async fn register(&self, payload: RegisterPayload) -> Result<AuthPayload, ApiError> {
        validation::validate_registration(&payload.name, &payload.email, &payload.password)?;
        let _guard = InFlight::acquire(&self.registering).ok_or(ApiError::Busy)?;

        let req = ApiRequest::post(paths::REGISTER, json!(payload)).unauthenticated();
        let body = self.transport.send(req).await.map_err(|err| {
            tracing::warn!(
                target: "finora.auth",
                stage = "auth.register.out",
                kind = %err.kind(),
                error = %err,
                "registration failed"
            );
            ApiError::RegistrationFailed
        })?;

        decode_body(paths::REGISTER, body).map_err(|_| ApiError::RegistrationFailed)
    }

    #[tracing::instrument(name = "auth.update_sources", skip_all)]
    pub async fn update_income_and_expense_sources(
        &self,
        payload: IncomeExpenseSources,
    ) -> Result<Value, ApiError> {
        tracing::debug!(
            target: "finora.auth",
            stage = "auth.sources.in",
            income = payload.income_sources.len(),
            expense = payload.expense_sources.len()
        );
        let req = ApiRequest::put(paths::UPDATE_SOURCES, json!(payload));
        self.transport.send(req).await
    }

    pub async fn logout(&self) -> Result<(), ApiError> {
        self.session.logout().await?;
        Ok(())
    }

    /// Confirm a rehydrated token with the server.
    ///
    /// Only a 401/403 answer logs the session out. Transport failures and
    /// any other error status leave it untouched so the caller can decide.
    pub async fn resume(&self) -> Result<ResumeOutcome, ApiError> {
        let Some(token) = self.session.token().await else {
            return Ok(ResumeOutcome::SignedOut);
        };

        match self.verify_token(VerifyTokenPayload { token }).await {
            Ok(body) => Ok(ResumeOutcome::Verified(body)),
            Err(err) if err.is_transport() => Ok(ResumeOutcome::Unverified(err)),
            Err(err @ ApiError::ServerError { status: 401 | 403, .. }) => {
                self.session.logout().await?;
                Ok(ResumeOutcome::Rejected(err))
            }
            Err(err) => Ok(ResumeOutcome::Unverified(err)),
        }
    }
}
