//! Key-value persistence for the catalogue.
use std::{
    collections::HashMap,
    io::Write as _,
    path::{Path, PathBuf},
    sync::{Arc, Mutex},
};

/// A synchronous key-value store holding serialized blobs.
pub trait KeyValueStore: Send {
    /// Returns the value stored under `key`, or `None` if there isn't one.
    /// Read failures are reported as absence.
    fn load(&self, key: &str) -> Option<String>;
    /// Replaces the value stored under `key`.
    fn save(&mut self, key: &str, value: &str) -> std::io::Result<()>;
}

/// Stores each key as `<dir>/<key>.json`.
pub struct FileStore {
    dir: PathBuf,
}
impl FileStore {
    const DIR_NAME: &str = "cinestream";

    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// The platform data directory for cinestream, if one can be determined.
    pub fn default_dir() -> Option<PathBuf> {
        use etcetera::BaseStrategy as _;
        match etcetera::choose_base_strategy() {
            Ok(strategy) => Some(strategy.data_dir().join(Self::DIR_NAME)),
            Err(e) => {
                tracing::warn!("could not determine data directory: {e}");
                None
            }
        }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{key}.json"))
    }
}
impl KeyValueStore for FileStore {
    fn load(&self, key: &str) -> Option<String> {
        let path = self.path_for(key);
        match std::fs::read_to_string(&path) {
            Ok(contents) => Some(contents),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => None,
            Err(e) => {
                tracing::warn!("failed to read {}: {e}", path.display());
                None
            }
        }
    }

    fn save(&mut self, key: &str, value: &str) -> std::io::Result<()> {
        std::fs::create_dir_all(&self.dir)?;
        let path = self.path_for(key);
        // Write beside the target, then rename over it.
        let mut tmp = tempfile::NamedTempFile::new_in(&self.dir)?;
        tmp.write_all(value.as_bytes())?;
        tmp.flush()?;
        tmp.as_file().sync_all()?;
        tmp.persist(&path)?;
        tracing::debug!("saved {} bytes to {}", value.len(), path.display());
        Ok(())
    }
}

/// An in-memory store. Clones share the same contents.
#[derive(Clone, Default)]
pub struct MemoryStore {
    inner: Arc<Mutex<MemoryStoreInner>>,
}
#[derive(Default)]
struct MemoryStoreInner {
    values: HashMap<String, String>,
    save_count: usize,
}
impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// A store that already holds `value` under `key`.
    pub fn with_value(key: &str, value: impl Into<String>) -> Self {
        let store = Self::new();
        store.lock().values.insert(key.to_string(), value.into());
        store
    }

    /// The number of times [`KeyValueStore::save`] has been called.
    pub fn save_count(&self) -> usize {
        self.lock().save_count
    }

    pub fn get(&self, key: &str) -> Option<String> {
        self.lock().values.get(key).cloned()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, MemoryStoreInner> {
        self.inner.lock().unwrap_or_else(|e| e.into_inner())
    }
}
impl KeyValueStore for MemoryStore {
    fn load(&self, key: &str) -> Option<String> {
        self.get(key)
    }

    fn save(&mut self, key: &str, value: &str) -> std::io::Result<()> {
        let mut inner = self.lock();
        inner.values.insert(key.to_string(), value.to_string());
        inner.save_count += 1;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn file_store_round_trips() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = FileStore::new(dir.path().join("nested"));
        assert_eq!(store.load("movies"), None);

        store.save("movies", "[1,2,3]").unwrap();
        assert_eq!(store.load("movies").as_deref(), Some("[1,2,3]"));
        assert!(dir.path().join("nested").join("movies.json").exists());

        store.save("movies", "[]").unwrap();
        assert_eq!(store.load("movies").as_deref(), Some("[]"));
    }

    #[test]
    fn file_store_leaves_only_the_saved_file() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = FileStore::new(dir.path());
        for blob in ["[1]", "[1,2]", "[1,2,3]"] {
            store.save("movies", blob).unwrap();
        }

        let names: Vec<_> = std::fs::read_dir(dir.path())
            .unwrap()
            .map(|e| e.unwrap().file_name())
            .collect();
        assert_eq!(names, ["movies.json"]);
        assert_eq!(store.load("movies").as_deref(), Some("[1,2,3]"));
    }

    #[test]
    fn memory_store_clones_share_contents() {
        let store = MemoryStore::new();
        let mut writer = store.clone();
        writer.save("k", "v").unwrap();
        assert_eq!(store.get("k").as_deref(), Some("v"));
        assert_eq!(store.save_count(), 1);
    }
}
