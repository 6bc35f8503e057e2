use anyhow::Result;
use std::sync::Arc;

use finora_core::api::{AppConfig, SessionPersistence, TokenProvider};

use crate::http_client::HttpClient;
use crate::persist::{FileSessionStore, MemorySessionStore};

/// File-backed store when a session directory is configured, in-memory otherwise.
pub fn build_store(cfg: &AppConfig) -> Result<Arc<dyn SessionPersistence>> {
    let namespace = cfg.session.namespace.trim();
    if namespace.is_empty() || namespace.contains(|c| c == '/' || c == '\\') {
        anyhow::bail!("invalid session namespace: {:?}", cfg.session.namespace);
    }

    let dir = cfg
        .session
        .directory
        .as_deref()
        .map(str::trim)
        .filter(|d| !d.is_empty());
    let store: Arc<dyn SessionPersistence> = match dir {
        Some(dir) => Arc::new(FileSessionStore::new(dir, namespace)),
        None => Arc::new(MemorySessionStore::new()),
    };
    tracing::debug!(
        target: "finora.factory",
        stage = "factory.store",
        store = store.name(),
        namespace = %namespace
    );
    Ok(store)
}

pub fn build_http_client(cfg: &AppConfig, tokens: Arc<dyn TokenProvider>) -> Result<HttpClient> {
    if cfg.api.base_url.trim().is_empty() {
        anyhow::bail!("api.base_url is empty");
    }
    HttpClient::new(cfg.api.base_url.trim(), cfg.api.timeout_ms, tokens)
}
