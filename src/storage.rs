use serde::Serialize;
use serde::de::DeserializeOwned;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::warn;

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Failed to create data directory: {0}")]
    DirectoryError(String),
    #[error("Failed to write {key}: {source}")]
    WriteError {
        key: String,
        source: std::io::Error,
    },
    #[error("Failed to serialize {key}: {source}")]
    SerializeError {
        key: String,
        source: serde_json::Error,
    },
}

/// File-backed key/value storage for entity collections. Each key maps to one
/// JSON file under the data directory, holding the serialized list of records
/// for that entity. There is no schema version; stored records are trusted
/// as-is.
#[derive(Debug, Clone)]
pub struct Storage {
    root: PathBuf,
}

impl Storage {
    /// Open storage rooted at the given directory, creating it if missing.
    pub fn new(root: impl Into<PathBuf>) -> Result<Self, StorageError> {
        let root = root.into();
        if !root.exists() {
            fs::create_dir_all(&root).map_err(|e| StorageError::DirectoryError(e.to_string()))?;
        }
        Ok(Self { root })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.root.join(format!("{}.json", key))
    }

    /// Read a collection. `Ok(None)` means the key has never been written.
    /// Malformed data is logged and reported as `None` so callers fall back
    /// to their defaults; it is never surfaced to the user.
    pub fn read<T: DeserializeOwned>(&self, key: &str) -> Option<Vec<T>> {
        let path = self.path_for(key);
        let contents = match fs::read_to_string(&path) {
            Ok(contents) => contents,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => return None,
            Err(err) => {
                warn!(key, error = %err, "failed to read stored collection");
                return None;
            }
        };

        match serde_json::from_str(&contents) {
            Ok(records) => Some(records),
            Err(err) => {
                warn!(key, error = %err, "failed to parse stored collection, discarding");
                None
            }
        }
    }

    /// Write the full collection for a key. Called after every mutation,
    /// never batched.
    pub fn write<T: Serialize>(&self, key: &str, records: &[T]) -> Result<(), StorageError> {
        let data = serde_json::to_string(records).map_err(|e| StorageError::SerializeError {
            key: key.to_string(),
            source: e,
        })?;
        fs::write(self.path_for(key), data).map_err(|e| StorageError::WriteError {
            key: key.to_string(),
            source: e,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Client;
    use tempfile::TempDir;

    #[test]
    fn missing_key_reads_as_none() {
        let dir = TempDir::new().unwrap();
        let storage = Storage::new(dir.path()).unwrap();

        let records: Option<Vec<Client>> = storage.read("clients");
        assert!(records.is_none());
    }

    #[test]
    fn write_then_read_round_trips() {
        let dir = TempDir::new().unwrap();
        let storage = Storage::new(dir.path()).unwrap();

        let clients = vec![
            Client::new("Ana Ruiz".into(), "ana@x.com".into(), "5551234".into()),
            Client::new("Richar Vasques".into(), "richar@hotmail.com".into(), "3106667777".into()),
        ];
        storage.write("clients", &clients).unwrap();

        let restored: Vec<Client> = storage.read("clients").unwrap();
        assert_eq!(restored, clients);
    }

    #[test]
    fn malformed_data_reads_as_none() {
        let dir = TempDir::new().unwrap();
        let storage = Storage::new(dir.path()).unwrap();
        std::fs::write(dir.path().join("clients.json"), "{not valid json").unwrap();

        let records: Option<Vec<Client>> = storage.read("clients");
        assert!(records.is_none());
    }

    #[test]
    fn keys_do_not_collide() {
        let dir = TempDir::new().unwrap();
        let storage = Storage::new(dir.path()).unwrap();

        let clients = vec![Client::new("Ana".into(), "ana@x.com".into(), "1".into())];
        storage.write("clients", &clients).unwrap();
        storage.write("appointments_schedules", &Vec::<Client>::new()).unwrap();

        let restored: Vec<Client> = storage.read("clients").unwrap();
        assert_eq!(restored.len(), 1);
    }
}
