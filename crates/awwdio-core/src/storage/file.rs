use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use tracing::debug;

use super::{DurableStore, Result, StorageError};

/// Stores each key as its own file inside a directory.
///
/// The directory is created on first write, so constructing a `FileStore`
/// never touches the filesystem.
#[derive(Debug, Clone)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn entry_path(&self, key: &str) -> Result<PathBuf> {
        let valid = !key.is_empty()
            && key != "."
            && key != ".."
            && !key.contains(|c| c == '/' || c == '\\');
        if !valid {
            return Err(StorageError::InvalidKey(key.to_string()));
        }
        Ok(self.dir.join(key))
    }

    fn io_error(key: &str, source: std::io::Error) -> StorageError {
        StorageError::Io {
            key: key.to_string(),
            source,
        }
    }
}

impl DurableStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        let path = self.entry_path(key)?;
        match std::fs::read_to_string(&path) {
            Ok(contents) => Ok(Some(contents)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(Self::io_error(key, e)),
        }
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        let path = self.entry_path(key)?;
        std::fs::create_dir_all(&self.dir).map_err(|e| Self::io_error(key, e))?;
        std::fs::write(&path, value).map_err(|e| Self::io_error(key, e))?;
        debug!(path = %path.display(), "Stored entry");
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<()> {
        let path = self.entry_path(key)?;
        match std::fs::remove_file(&path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(Self::io_error(key, e)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_file_store_round_trips_entries() {
        let tmp = tempfile::tempdir().unwrap();
        let store = FileStore::new(tmp.path().join("nested"));

        assert_eq!(store.get("user").unwrap(), None);
        store.set("user", r#"{"channel":"email"}"#).unwrap();
        assert_eq!(
            store.get("user").unwrap().as_deref(),
            Some(r#"{"channel":"email"}"#)
        );
        assert!(tmp.path().join("nested").join("user").exists());

        store.remove("user").unwrap();
        assert_eq!(store.get("user").unwrap(), None);
    }

    #[test]
    fn test_file_store_remove_missing_is_ok() {
        let tmp = tempfile::tempdir().unwrap();
        let store = FileStore::new(tmp.path());
        store.remove("token").unwrap();
    }

    #[test]
    fn test_file_store_rejects_path_like_keys() {
        let tmp = tempfile::tempdir().unwrap();
        let store = FileStore::new(tmp.path());
        for key in ["", "..", "../user", "a/b", "a\\b"] {
            assert!(matches!(
                store.set(key, "x"),
                Err(StorageError::InvalidKey(_))
            ));
        }
    }

    #[test]
    fn test_file_store_survives_new_instance() {
        let tmp = tempfile::tempdir().unwrap();
        FileStore::new(tmp.path()).set("token", "abc").unwrap();
        let reopened = FileStore::new(tmp.path());
        assert_eq!(reopened.get("token").unwrap().as_deref(), Some("abc"));
    }
}
