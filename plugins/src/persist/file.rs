use async_trait::async_trait;
use finora_core::api::{PersistedRecord, SessionPersistence};
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

/// Stores the record as pretty JSON at `<dir>/<namespace>.json`.
///
/// Writes go to a sibling temp file first and are renamed into place, so a
/// crash mid-write leaves the previous record intact.
pub struct FileSessionStore {
    path: PathBuf,
}

impl FileSessionStore {
    pub fn new(dir: impl AsRef<Path>, namespace: &str) -> Self {
        Self {
            path: dir.as_ref().join(format!("{}.json", namespace)),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl SessionPersistence for FileSessionStore {
    fn name(&self) -> &str {
        "file"
    }

    async fn load(&self) -> anyhow::Result<Option<PersistedRecord>> {
        let bytes = match tokio::fs::read(&self.path).await {
            Ok(bytes) => bytes,
            Err(err) if err.kind() == ErrorKind::NotFound => return Ok(None),
            Err(err) => return Err(err.into()),
        };
        let record = PersistedRecord::from_bytes(&bytes).map_err(|err| {
            anyhow::anyhow!("corrupt session record {}: {}", self.path.display(), err)
        })?;
        tracing::debug!(
            target: "finora.persist",
            stage = "persist.file.load",
            path = %self.path.display(),
            empty = record.is_empty()
        );
        Ok(Some(record))
    }

    async fn save(&self, record: &PersistedRecord) -> anyhow::Result<()> {
        if let Some(parent) = self.path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }
        let bytes = record.to_bytes()?;
        let tmp = self.path.with_extension("json.tmp");
        tokio::fs::write(&tmp, &bytes).await?;
        tokio::fs::rename(&tmp, &self.path).await?;
        tracing::debug!(
            target: "finora.persist",
            stage = "persist.file.save",
            path = %self.path.display(),
            bytes = bytes.len()
        );
        Ok(())
    }

    async fn clear(&self) -> anyhow::Result<()> {
        match tokio::fs::remove_file(&self.path).await {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(()),
            Err(err) => Err(err.into()),
        }
    }
}
