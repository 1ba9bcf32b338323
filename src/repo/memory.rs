use std::path::Path;

use serde_json::Value;

use super::{ConfigStore, SnapshotSource, StoreError};
use crate::domain::config::Config;
use crate::domain::snapshot::Snapshot;

#[derive(Default)]
pub struct InMemoryConfigStore {
    config: Option<Config>,
    saves: usize,
}

impl InMemoryConfigStore {
    pub fn with_watched(urls: impl IntoIterator<Item = impl Into<String>>) -> Self {
        let config = Config {
            watched_prs: urls.into_iter().map(Into::into).collect(),
            ..Config::default()
        };
        Self {
            config: Some(config),
            saves: 0,
        }
    }

    pub fn saves(&self) -> usize {
        self.saves
    }
}

impl ConfigStore for InMemoryConfigStore {
    fn load(&self) -> Result<Config, StoreError> {
        Ok(self.config.clone().unwrap_or_default())
    }

    fn save(&mut self, config: &Config) -> Result<(), StoreError> {
        self.config = Some(config.clone());
        self.saves += 1;
        Ok(())
    }

    fn location(&self) -> Option<&Path> {
        None
    }
}

/// Snapshot held as raw JSON so `load_raw` returns exactly what was seeded.
#[derive(Default)]
pub struct InMemorySnapshot {
    raw: Option<Value>,
}

impl InMemorySnapshot {
    pub fn with_json(raw: Value) -> Self {
        Self { raw: Some(raw) }
    }
}

impl SnapshotSource for InMemorySnapshot {
    fn load(&self) -> Result<Option<Snapshot>, StoreError> {
        self.raw
            .clone()
            .map(serde_json::from_value)
            .transpose()
            .map_err(StoreError::Serialize)
    }

    fn load_raw(&self) -> Result<Option<Value>, StoreError> {
        Ok(self.raw.clone())
    }

    fn location(&self) -> Option<&Path> {
        None
    }
}
