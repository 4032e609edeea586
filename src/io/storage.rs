use std::collections::{BTreeMap, HashMap};
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;

/// Error type for storage operations
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("could not read {path}: {source}")]
    ReadError { path: PathBuf, source: io::Error },
    #[error("could not write {path}: {source}")]
    WriteError { path: PathBuf, source: io::Error },
    #[error("could not encode storage: {0}")]
    EncodeError(#[from] serde_json::Error),
}

/// A string-keyed persistent store holding string values.
pub trait Storage {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError>;
}

/// In-memory storage, used by tests and as a fallback when no data
/// directory is available.
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    values: HashMap<String, String>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Raw write that bypasses any encoding, for seeding corrupt state
    pub fn insert(&mut self, key: &str, value: &str) {
        self.values.insert(key.to_string(), value.to_string());
    }
}

impl Storage for MemoryStorage {
    fn get(&self, key: &str) -> Option<String> {
        self.values.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        self.values.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// All keys live in one JSON object file, rewritten atomically on every set.
#[derive(Debug)]
pub struct FileStorage {
    path: PathBuf,
    values: BTreeMap<String, String>,
}

impl FileStorage {
    /// Name of the storage file inside the data directory
    pub const FILE_NAME: &'static str = "storage.json";

    /// Open (or lazily create) the storage file in `data_dir`.
    /// A missing or unreadable file starts out empty.
    pub fn open(data_dir: &Path) -> Result<Self, StorageError> {
        fs::create_dir_all(data_dir).map_err(|e| StorageError::WriteError {
            path: data_dir.to_path_buf(),
            source: e,
        })?;
        let path = data_dir.join(Self::FILE_NAME);
        let values = match fs::read_to_string(&path) {
            Ok(content) => match serde_json::from_str(&content) {
                Ok(values) => values,
                Err(e) => {
                    log::warn!(
                        "event=storage_parse status=fallback path={} error={}",
                        path.display(),
                        e
                    );
                    BTreeMap::new()
                }
            },
            Err(e) if e.kind() == io::ErrorKind::NotFound => BTreeMap::new(),
            Err(e) => return Err(StorageError::ReadError { path, source: e }),
        };
        Ok(FileStorage { path, values })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Storage for FileStorage {
    fn get(&self, key: &str) -> Option<String> {
        self.values.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        if self.values.get(key).map(String::as_str) == Some(value) {
            return Ok(());
        }
        self.values.insert(key.to_string(), value.to_string());
        let content = serde_json::to_string_pretty(&self.values)?;
        atomic_write(&self.path, content.as_bytes()).map_err(|e| StorageError::WriteError {
            path: self.path.clone(),
            source: e,
        })
    }
}

/// Write `content` to `path` atomically using a temp file + rename.
pub fn atomic_write(path: &Path, content: &[u8]) -> io::Result<()> {
    let dir = path.parent().unwrap_or(Path::new("."));
    let mut tmp = NamedTempFile::new_in(dir)?;
    tmp.write_all(content)?;
    tmp.flush()?;
    tmp.persist(path).map_err(|e| e.error)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_memory_storage_get_set() {
        let mut storage = MemoryStorage::new();
        assert_eq!(storage.get("title"), None);
        storage.set("title", "Groceries").unwrap();
        assert_eq!(storage.get("title").as_deref(), Some("Groceries"));
    }

    #[test]
    fn test_file_storage_round_trip() {
        let tmp = TempDir::new().unwrap();
        {
            let mut storage = FileStorage::open(tmp.path()).unwrap();
            storage.set("title", "Groceries").unwrap();
            storage.set("notes", "[]").unwrap();
        }
        let storage = FileStorage::open(tmp.path()).unwrap();
        assert_eq!(storage.get("title").as_deref(), Some("Groceries"));
        assert_eq!(storage.get("notes").as_deref(), Some("[]"));
    }

    #[test]
    fn test_file_storage_missing_file_is_empty() {
        let tmp = TempDir::new().unwrap();
        let storage = FileStorage::open(&tmp.path().join("nested")).unwrap();
        assert_eq!(storage.get("notes"), None);
        assert!(!storage.path().exists());
    }

    #[test]
    fn test_file_storage_malformed_file_is_empty() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join(FileStorage::FILE_NAME), "not json {{{").unwrap();
        let storage = FileStorage::open(tmp.path()).unwrap();
        assert_eq!(storage.get("notes"), None);
    }

    #[test]
    fn test_atomic_write_replaces_content() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("out.json");
        atomic_write(&path, b"one").unwrap();
        atomic_write(&path, b"two").unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "two");
    }
}
