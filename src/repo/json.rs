use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

use anyhow::Context;
use log::debug;
use serde::de::DeserializeOwned;
use serde_json::Value;
use tempfile::NamedTempFile;

use super::{ConfigStore, SnapshotSource, StoreError};
use crate::domain::config::Config;
use crate::domain::snapshot::Snapshot;

pub const CONFIG_FILE: &str = "config.json";
pub const SNAPSHOT_FILE: &str = "prs.json";
pub const DATA_DIR_NAME: &str = ".pr-watch";

pub fn default_data_dir() -> anyhow::Result<PathBuf> {
    let home = dirs::home_dir().context("failed to resolve home dir")?;
    Ok(home.join(DATA_DIR_NAME))
}

pub struct JsonConfigStore {
    path: PathBuf,
}

impl JsonConfigStore {
    pub fn open(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn in_dir(dir: &Path) -> Self {
        Self::open(dir.join(CONFIG_FILE))
    }
}

impl ConfigStore for JsonConfigStore {
    fn load(&self) -> Result<Config, StoreError> {
        let cfg = read_json::<Config>(&self.path)?.unwrap_or_default();
        debug!("loaded config from {}", self.path.display());
        Ok(cfg)
    }

    fn save(&mut self, config: &Config) -> Result<(), StoreError> {
        let body = serde_json::to_string_pretty(config)?;
        atomic_write(&self.path, body.as_bytes())?;
        debug!("saved config to {}", self.path.display());
        Ok(())
    }

    fn location(&self) -> Option<&Path> {
        Some(&self.path)
    }
}

pub struct JsonSnapshotReader {
    path: PathBuf,
}

impl JsonSnapshotReader {
    pub fn open(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn in_dir(dir: &Path) -> Self {
        Self::open(dir.join(SNAPSHOT_FILE))
    }
}

impl SnapshotSource for JsonSnapshotReader {
    fn load(&self) -> Result<Option<Snapshot>, StoreError> {
        read_json(&self.path)
    }

    fn load_raw(&self) -> Result<Option<Value>, StoreError> {
        read_json(&self.path)
    }

    fn location(&self) -> Option<&Path> {
        Some(&self.path)
    }
}

fn read_json<T: DeserializeOwned>(path: &Path) -> Result<Option<T>, StoreError> {
    let body = match std::fs::read_to_string(path) {
        Ok(body) => body,
        Err(e) if e.kind() == ErrorKind::NotFound => {
            debug!("{} does not exist yet", path.display());
            return Ok(None);
        }
        Err(source) => {
            return Err(StoreError::Io {
                path: path.to_path_buf(),
                source,
            });
        }
    };
    serde_json::from_str(&body)
        .map(Some)
        .map_err(|source| StoreError::Parse {
            path: path.to_path_buf(),
            source,
        })
}

// Writes through a symlink to its target and keeps the existing file's mode.
// The temp file lives next to the target so the rename never crosses filesystems.
fn atomic_write(path: &Path, data: &[u8]) -> Result<(), StoreError> {
    let io_err = |source: std::io::Error| StoreError::Io {
        path: path.to_path_buf(),
        source,
    };
    let target = match std::fs::symlink_metadata(path) {
        Ok(meta) if meta.file_type().is_symlink() => std::fs::canonicalize(path).map_err(io_err)?,
        _ => path.to_path_buf(),
    };
    let dir = match target.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };
    std::fs::create_dir_all(dir).map_err(io_err)?;

    let mut tmp = NamedTempFile::new_in(dir).map_err(io_err)?;
    tmp.write_all(data).map_err(io_err)?;
    tmp.write_all(b"\n").map_err(io_err)?;
    match std::fs::metadata(&target) {
        Ok(meta) => tmp
            .as_file()
            .set_permissions(meta.permissions())
            .map_err(io_err)?,
        Err(e) if e.kind() == ErrorKind::NotFound => {}
        Err(e) => return Err(io_err(e)),
    }
    tmp.as_file().sync_all().map_err(io_err)?;
    tmp.persist(&target).map_err(|e| io_err(e.error))?;
    Ok(())
}
