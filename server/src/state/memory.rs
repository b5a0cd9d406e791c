use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use super::{LastSeenStore, StateError};

/// In-process store. Clones share the same cell.
///
/// Counts saves and can be switched into a failing mode, which makes it the
/// store of choice for tests.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    inner: Arc<Inner>,
}

#[derive(Debug, Default)]
struct Inner {
    id: Mutex<String>,
    saves: AtomicUsize,
    fail_saves: AtomicBool,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store that already holds `id`.
    pub fn with_id(id: impl Into<String>) -> Self {
        let store = Self::default();
        if let Ok(mut current) = store.inner.id.lock() {
            *current = id.into();
        }
        store
    }

    /// Current id without going through the async trait.
    pub fn current(&self) -> String {
        self.inner
            .id
            .lock()
            .map(|id| id.clone())
            .unwrap_or_default()
    }

    /// Number of successful saves so far.
    pub fn save_count(&self) -> usize {
        self.inner.saves.load(Ordering::SeqCst)
    }

    /// Make every following save fail.
    pub fn fail_saves(&self, fail: bool) {
        self.inner.fail_saves.store(fail, Ordering::SeqCst);
    }
}

#[async_trait]
impl LastSeenStore for MemoryStore {
    async fn load(&self) -> Result<String, StateError> {
        self.inner
            .id
            .lock()
            .map(|id| id.clone())
            .map_err(|e| StateError::Unavailable(e.to_string()))
    }

    async fn save(&self, id: &str) -> Result<(), StateError> {
        if self.inner.fail_saves.load(Ordering::SeqCst) {
            return Err(StateError::Unavailable("saves disabled".into()));
        }
        let mut current = self
            .inner
            .id
            .lock()
            .map_err(|e| StateError::Unavailable(e.to_string()))?;
        *current = id.to_string();
        self.inner.saves.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}
