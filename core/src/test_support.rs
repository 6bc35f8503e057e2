//! In-memory doubles shared by the unit tests of this crate.

use async_trait::async_trait;
use serde_json::Value;
use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use crate::error::ApiError;
use crate::session::{PersistedRecord, SessionPersistence};
use crate::transport::{ApiRequest, ApiTransport};

pub(crate) struct RecordingStore {
    record: Mutex<Option<PersistedRecord>>,
    writes: AtomicUsize,
    fail: bool,
}

impl RecordingStore {
    pub(crate) fn new() -> Arc<Self> {
        Arc::new(Self {
            record: Mutex::new(None),
            writes: AtomicUsize::new(0),
            fail: false,
        })
    }

    pub(crate) fn with_record(record: PersistedRecord) -> Arc<Self> {
        Arc::new(Self {
            record: Mutex::new(Some(record)),
            writes: AtomicUsize::new(0),
            fail: false,
        })
    }

    pub(crate) fn failing() -> Arc<Self> {
        Arc::new(Self {
            record: Mutex::new(None),
            writes: AtomicUsize::new(0),
            fail: true,
        })
    }

    pub(crate) fn current(&self) -> Option<PersistedRecord> {
        self.record.lock().unwrap().clone()
    }

    pub(crate) fn writes(&self) -> usize {
        self.writes.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl SessionPersistence for RecordingStore {
    fn name(&self) -> &str {
        "recording"
    }

    async fn load(&self) -> anyhow::Result<Option<PersistedRecord>> {
        if self.fail {
            anyhow::bail!("store offline");
        }
        Ok(self.current())
    }

    async fn save(&self, record: &PersistedRecord) -> anyhow::Result<()> {
        self.writes.fetch_add(1, Ordering::SeqCst);
        if self.fail {
            anyhow::bail!("store offline");
        }
        *self.record.lock().unwrap() = Some(record.clone());
        Ok(())
    }

    async fn clear(&self) -> anyhow::Result<()> {
        self.writes.fetch_add(1, Ordering::SeqCst);
        if self.fail {
            anyhow::bail!("store offline");
        }
        *self.record.lock().unwrap() = None;
        Ok(())
    }
}

/// Transport that replays queued responses and records every request.
pub(crate) struct ScriptedTransport {
    responses: Mutex<VecDeque<Result<Value, ApiError>>>,
    requests: Mutex<Vec<ApiRequest>>,
}

impl ScriptedTransport {
    pub(crate) fn new(responses: Vec<Result<Value, ApiError>>) -> Arc<Self> {
        Arc::new(Self {
            responses: Mutex::new(responses.into()),
            requests: Mutex::new(Vec::new()),
        })
    }

    pub(crate) fn requests(&self) -> Vec<ApiRequest> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl ApiTransport for ScriptedTransport {
    async fn send(&self, request: ApiRequest) -> Result<Value, ApiError> {
        let url = request.path.clone();
        self.requests.lock().unwrap().push(request);
        self.responses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or(Err(ApiError::NetworkUnreachable {
                url,
                message: "no scripted response".to_string(),
            }))
    }
}

/// Transport whose calls never complete.
pub(crate) struct StalledTransport;

#[async_trait]
impl ApiTransport for StalledTransport {
    async fn send(&self, _request: ApiRequest) -> Result<Value, ApiError> {
        std::future::pending().await
    }
}
