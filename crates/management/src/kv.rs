//! String key-value storage, the persistence medium under the campaign store.
//!
//! The file backend keeps one file per key inside a data directory and
//! replaces it atomically on write. The memory backend is for tests and
//! throwaway servers.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use campaign_core::error::{CampaignError, CampaignResult};
use dashmap::DashMap;
use tracing::{debug, info};

pub trait KeyValueStore: Send + Sync {
    fn get(&self, key: &str) -> CampaignResult<Option<String>>;
    fn set(&self, key: &str, value: &str) -> CampaignResult<()>;
    /// Removing a missing key is not an error.
    fn remove(&self, key: &str) -> CampaignResult<()>;
}

#[derive(Debug, Default)]
pub struct MemoryKeyValueStore {
    entries: DashMap<String, String>,
}

impl MemoryKeyValueStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryKeyValueStore {
    fn get(&self, key: &str) -> CampaignResult<Option<String>> {
        Ok(self.entries.get(key).map(|r| r.value().clone()))
    }

    fn set(&self, key: &str, value: &str) -> CampaignResult<()> {
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> CampaignResult<()> {
        self.entries.remove(key);
        Ok(())
    }
}

#[derive(Debug, Clone)]
pub struct FileKeyValueStore {
    dir: PathBuf,
}

impl FileKeyValueStore {
    /// Open (creating if needed) a data directory.
    pub fn open(dir: impl AsRef<Path>) -> CampaignResult<Self> {
        let dir = dir.as_ref().to_path_buf();
        fs::create_dir_all(&dir).map_err(|e| {
            CampaignError::Storage(format!("cannot open data directory {}: {e}", dir.display()))
        })?;
        info!(dir = %dir.display(), "file key-value store opened");
        Ok(Self { dir })
    }

    fn path_for(&self, key: &str) -> PathBuf {
        let file_name: String = key
            .chars()
            .map(|c| if c.is_ascii_alphanumeric() || c == '-' || c == '_' { c } else { '_' })
            .collect();
        self.dir.join(format!("{file_name}.json"))
    }
}

impl KeyValueStore for FileKeyValueStore {
    fn get(&self, key: &str) -> CampaignResult<Option<String>> {
        match fs::read_to_string(self.path_for(key)) {
            Ok(raw) => Ok(Some(raw)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn set(&self, key: &str, value: &str) -> CampaignResult<()> {
        let path = self.path_for(key);
        let staging = path.with_extension("json.tmp");
        fs::write(&staging, value)?;
        fs::rename(&staging, &path)?;
        debug!(key, bytes = value.len(), "key written");
        Ok(())
    }

    fn remove(&self, key: &str) -> CampaignResult<()> {
        match fs::remove_file(self.path_for(key)) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}
