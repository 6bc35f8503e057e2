use async_trait::async_trait;
use finora_core::api::{PersistedRecord, SessionPersistence};
use tokio::sync::Mutex;

/// Process-local store; nothing survives a restart.
#[derive(Default)]
pub struct MemorySessionStore {
    record: Mutex<Option<PersistedRecord>>,
}

impl MemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_record(record: PersistedRecord) -> Self {
        Self {
            record: Mutex::new(Some(record)),
        }
    }

    pub async fn current(&self) -> Option<PersistedRecord> {
        self.record.lock().await.clone()
    }
}

#[async_trait]
impl SessionPersistence for MemorySessionStore {
    fn name(&self) -> &str {
        "memory"
    }

    async fn load(&self) -> anyhow::Result<Option<PersistedRecord>> {
        Ok(self.record.lock().await.clone())
    }

    async fn save(&self, record: &PersistedRecord) -> anyhow::Result<()> {
        *self.record.lock().await = Some(record.clone());
        Ok(())
    }

    async fn clear(&self) -> anyhow::Result<()> {
        *self.record.lock().await = None;
        Ok(())
    }
}
