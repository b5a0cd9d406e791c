//! Last-Seen State Store
//!
//! Durable cursor holding the id of the most recently notified event. The
//! store holds at most one id: no history, no expiry.

mod file;
mod memory;

use async_trait::async_trait;

pub use file::FileStore;
pub use memory::MemoryStore;

/// Errors from reading or writing the last-seen id.
#[derive(Debug, thiserror::Error)]
pub enum StateError {
    #[error("state I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("state store unavailable: {0}")]
    Unavailable(String),
}

/// Load/save capability for the last notified event id.
#[async_trait]
pub trait LastSeenStore: Send + Sync {
    /// The persisted id, or an empty string if none has been saved.
    async fn load(&self) -> Result<String, StateError>;

    /// Overwrite the persisted id.
    async fn save(&self, id: &str) -> Result<(), StateError>;
}
