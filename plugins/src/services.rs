//! Wires the session container, HTTP client and API operations from config.
use anyhow::Result;
use std::sync::Arc;

use finora_core::api::{
    ApiTransport, AppConfig, AuthService, BudgetService, ReportService, SessionContainer,
    SessionPersistence,
};

use crate::factory;

#[derive(Clone)]
pub struct FinoraServices {
    pub session: SessionContainer,
    pub auth: AuthService,
    pub budgets: BudgetService,
    pub reports: ReportService,
}

impl FinoraServices {
    pub async fn from_config(cfg: &AppConfig) -> Result<Self> {
        let store = factory::build_store(cfg)?;
        Self::with_store(cfg, store).await
    }

    /// Rehydrates the session from `store` before any operation is built,
    /// then hands the container to the HTTP client as its token source.
    pub async fn with_store(cfg: &AppConfig, store: Arc<dyn SessionPersistence>) -> Result<Self> {
        let session = SessionContainer::rehydrate(store).await;
        let transport: Arc<dyn ApiTransport> = Arc::new(factory::build_http_client(
            cfg,
            Arc::new(session.clone()),
        )?);
        Ok(Self {
            auth: AuthService::new(transport.clone(), session.clone()),
            budgets: BudgetService::new(transport.clone()),
            reports: ReportService::new(transport),
            session,
        })
    }
}
