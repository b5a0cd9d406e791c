use std::io::ErrorKind;
use std::path::PathBuf;

use async_trait::async_trait;

use super::{LastSeenStore, StateError};

/// Stores the last-seen id as raw text in a single file.
#[derive(Debug, Clone)]
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait]
impl LastSeenStore for FileStore {
    async fn load(&self) -> Result<String, StateError> {
        match tokio::fs::read_to_string(&self.path).await {
            Ok(contents) => Ok(contents.trim().to_string()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(String::new()),
            Err(e) => Err(e.into()),
        }
    }

    async fn save(&self, id: &str) -> Result<(), StateError> {
        tokio::fs::write(&self.path, id).await?;
        Ok(())
    }
}
