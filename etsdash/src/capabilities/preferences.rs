//! Preference storage capability

use async_trait::async_trait;
use etsdash_core::{DashError, Result};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use tokio::fs;
use tokio::sync::Mutex;
use tracing::debug;

/// Async string key/value persistence.
#[async_trait]
pub trait PreferenceStore: Send + Sync {
    /// Fetch the value stored under `key`, `None` if nothing was stored.
    async fn fetch(&self, key: &str) -> Result<Option<String>>;

    /// Store `value` under `key`, replacing any previous value.
    async fn store(&self, key: &str, value: &str) -> Result<()>;
}

/// Preference store that remembers nothing.
#[derive(Debug, Clone, Copy, Default)]
pub struct InertPreferenceStore;

#[async_trait]
impl PreferenceStore for InertPreferenceStore {
    async fn fetch(&self, _key: &str) -> Result<Option<String>> {
        Ok(None)
    }

    async fn store(&self, _key: &str, _value: &str) -> Result<()> {
        Ok(())
    }
}

/// Preference store persisting a flat string map in a TOML file.
///
/// The file and its parent directory are created on the first store.
#[derive(Debug)]
pub struct FilePreferenceStore {
    path: PathBuf,
    /// Serializes read-modify-write cycles within the process
    write_lock: Mutex<()>,
}

impl FilePreferenceStore {
    /// Create a store backed by the file at `path`.
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            write_lock: Mutex::new(()),
        }
    }

    /// Path of the backing file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn read_all(&self) -> Result<BTreeMap<String, String>> {
        if !self.path.exists() {
            return Ok(BTreeMap::new());
        }

        let content = fs::read_to_string(&self.path).await.map_err(|e| {
            DashError::Preference(format!(
                "Failed to read preferences '{}': {}",
                self.path.display(),
                e
            ))
        })?;

        toml::from_str(&content).map_err(|e| {
            DashError::Preference(format!(
                "Failed to parse preferences '{}': {}",
                self.path.display(),
                e
            ))
        })
    }
}

#[async_trait]
impl PreferenceStore for FilePreferenceStore {
    async fn fetch(&self, key: &str) -> Result<Option<String>> {
        let values = self.read_all().await?;
        Ok(values.get(key).cloned())
    }

    async fn store(&self, key: &str, value: &str) -> Result<()> {
        let _guard = self.write_lock.lock().await;

        let mut values = self.read_all().await?;
        values.insert(key.to_string(), value.to_string());

        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).await.map_err(|e| {
                DashError::Preference(format!(
                    "Failed to create preferences directory '{}': {}",
                    parent.display(),
                    e
                ))
            })?;
        }

        let content = toml::to_string_pretty(&values)?;
        fs::write(&self.path, content).await.map_err(|e| {
            DashError::Preference(format!(
                "Failed to write preferences '{}': {}",
                self.path.display(),
                e
            ))
        })?;

        debug!("Stored preference '{}' in {}", key, self.path.display());
        Ok(())
    }
}
