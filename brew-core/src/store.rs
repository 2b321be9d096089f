//! Key-value persistence port and its implementations.

use crate::error::{BrewError, Result};
use std::collections::HashMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

pub const STORE_DIR_ENV: &str = "BREW_RATIO_DIR";

/// Synchronous string store keyed by name, the shape of browser local storage.
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>>;
    fn set(&mut self, key: &str, value: &str) -> Result<()>;
    fn remove(&mut self, key: &str) -> Result<()>;
}

#[derive(Debug, Default, Clone)]
pub struct MemoryStore {
    entries: HashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<()> {
        self.entries.remove(key);
        Ok(())
    }
}

/// One `<key>.json` file per key inside `dir`.
#[derive(Debug, Clone)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// `$BREW_RATIO_DIR`, else the platform data dir, else `./.brew-ratio`.
    pub fn default_dir() -> PathBuf {
        if let Some(dir) = std::env::var_os(STORE_DIR_ENV) {
            return PathBuf::from(dir);
        }
        dirs::data_dir()
            .map(|d| d.join("brew-ratio"))
            .unwrap_or_else(|| PathBuf::from(".brew-ratio"))
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{key}.json"))
    }
}

fn io_err(path: &Path, e: io::Error) -> BrewError {
    BrewError::FileIO(path.display().to_string(), e)
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        let path = self.path_for(key);
        match fs::read_to_string(&path) {
            Ok(txt) => Ok(Some(txt)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(io_err(&path, e)),
        }
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        fs::create_dir_all(&self.dir).map_err(|e| io_err(&self.dir, e))?;
        let path = self.path_for(key);
        let tmp = self.dir.join(format!(".{key}.json.tmp"));
        fs::write(&tmp, value).map_err(|e| io_err(&tmp, e))?;
        fs::rename(&tmp, &path).map_err(|e| {
            let _ = fs::remove_file(&tmp);
            io_err(&path, e)
        })
    }

    fn remove(&mut self, key: &str) -> Result<()> {
        let path = self.path_for(key);
        match fs::remove_file(&path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(io_err(&path, e)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn memory_store_roundtrip() {
        let mut store = MemoryStore::new();
        assert_eq!(store.get("k").unwrap(), None);
        store.set("k", "v1").unwrap();
        store.set("k", "v2").unwrap();
        assert_eq!(store.get("k").unwrap().as_deref(), Some("v2"));
        store.remove("k").unwrap();
        assert_eq!(store.get("k").unwrap(), None);
    }

    #[test]
    fn file_store_creates_dir_and_replaces_value() {
        let tmp = tempfile::tempdir().unwrap();
        let dir = tmp.path().join("nested").join("store");
        let mut store = FileStore::new(&dir);

        assert_eq!(store.get("recipes").unwrap(), None);
        store.set("recipes", "[1]").unwrap();
        store.set("recipes", "[2]").unwrap();
        assert_eq!(store.get("recipes").unwrap().as_deref(), Some("[2]"));
        assert!(dir.join("recipes.json").exists());
        assert!(!dir.join(".recipes.json.tmp").exists());
    }

    #[test]
    fn file_store_remove_is_idempotent() {
        let tmp = tempfile::tempdir().unwrap();
        let mut store = FileStore::new(tmp.path());
        store.remove("missing").unwrap();
        store.set("k", "v").unwrap();
        store.remove("k").unwrap();
        assert_eq!(store.get("k").unwrap(), None);
    }

    #[test]
    fn failed_rename_leaves_no_temp_file() {
        let tmp = tempfile::tempdir().unwrap();
        let mut store = FileStore::new(tmp.path());
        // a non-empty directory at the target path makes the rename fail
        let target = tmp.path().join("k.json");
        fs::create_dir(&target).unwrap();
        fs::write(target.join("keep"), "x").unwrap();

        let err = store.set("k", "v").unwrap_err();
        assert!(matches!(err, BrewError::FileIO(..)));
        assert!(!tmp.path().join(".k.json.tmp").exists());
    }

    #[test]
    fn file_store_reports_unwritable_dir() {
        let tmp = tempfile::tempdir().unwrap();
        let blocker = tmp.path().join("not-a-dir");
        fs::write(&blocker, "x").unwrap();
        let mut store = FileStore::new(blocker.join("store"));
        let err = store.set("k", "v").unwrap_err();
        assert!(matches!(err, BrewError::FileIO(..)));
    }
}
