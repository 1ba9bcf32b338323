use std::path::{Path, PathBuf};

use serde_json::Value;

use crate::domain::config::Config;
use crate::domain::snapshot::Snapshot;

pub mod json;
#[cfg(test)]
pub mod memory;

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("failed to access {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("{} is not valid JSON: {source}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("failed to serialize document: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// Read-write access to the watch-list document.
pub trait ConfigStore {
    /// Returns the default document when nothing has been saved yet.
    fn load(&self) -> Result<Config, StoreError>;
    fn save(&mut self, config: &Config) -> Result<(), StoreError>;
    fn location(&self) -> Option<&Path>;
}

/// Read-only access to the fetcher's last snapshot.
pub trait SnapshotSource {
    /// `None` means the fetcher has not produced any data yet.
    fn load(&self) -> Result<Option<Snapshot>, StoreError>;
    fn load_raw(&self) -> Result<Option<Value>, StoreError>;
    fn location(&self) -> Option<&Path>;
}
