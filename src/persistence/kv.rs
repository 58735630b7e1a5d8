use super::files::{atomic_write, read_file};
use anyhow::Result;
use std::path::{Path, PathBuf};
use tracing::warn;

/// String key-value persistence collaborator
pub trait KeyValueStore {
    /// Stored value for `key`, or `None` when missing or unreadable
    fn get(&self, key: &str) -> Option<String>;

    fn set(&mut self, key: &str, value: &str) -> Result<()>;
}

/// Stores each key as `<dir>/<key>.json`
#[derive(Debug, Clone)]
pub struct FileKvStore {
    dir: PathBuf,
}

impl FileKvStore {
    pub fn new<P: AsRef<Path>>(dir: P) -> Self {
        Self {
            dir: dir.as_ref().to_path_buf(),
        }
    }

    fn path(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{}.json", key))
    }
}

impl KeyValueStore for FileKvStore {
    fn get(&self, key: &str) -> Option<String> {
        match read_file(self.path(key)) {
            Ok(content) => content,
            Err(e) => {
                warn!("Failed to read record '{}': {:#}", key, e);
                None
            }
        }
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        atomic_write(self.path(key), value)
    }
}

#[cfg(test)]
pub use memory::MemoryKvStore;


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_file_store_round_trip() {
        let temp_dir = tempfile::tempdir().unwrap();
        let mut store = FileKvStore::new(temp_dir.path());

        assert_eq!(store.get("tasks"), None);
        store.set("tasks", "[]").unwrap();
        assert_eq!(store.get("tasks").as_deref(), Some("[]"));
        assert!(temp_dir.path().join("tasks.json").exists());
    }

    #[test]
    fn test_file_store_write_into_missing_dir_fails() {
        let temp_dir = tempfile::tempdir().unwrap();
        let mut store = FileKvStore::new(temp_dir.path().join("missing"));
        assert!(store.set("tasks", "[]").is_err());
    }

    #[test]
    fn test_memory_store_shares_state() {
        let store = MemoryKvStore::default();
        let mut handle = store.clone();
        handle.set("streak", "{}").unwrap();
        assert_eq!(store.get("streak").as_deref(), Some("{}"));
        assert_eq!(store.write_count(), 1);
        assert!(MemoryKvStore::failing().set("streak", "{}").is_err());
    }
}
