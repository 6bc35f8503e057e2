use async_trait::async_trait;

use super::types::PersistedRecord;

/// Durable key-value mirror of the session, written only by the container.
#[async_trait]
pub trait SessionPersistence: Send + Sync {
    fn name(&self) -> &str;

    /// `Ok(None)` when nothing has been persisted under the namespace yet.
    async fn load(&self) -> anyhow::Result<Option<PersistedRecord>>;

    async fn save(&self, record: &PersistedRecord) -> anyhow::Result<()>;

    async fn clear(&self) -> anyhow::Result<()>;
}
