//! JsonFileStore - all keys persisted together in one JSON document on disk.

use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::{Arc, RwLock};

use serde_json::{Map, Value};
use tempfile::NamedTempFile;

use super::{KeyValueStore, StorageError};

/// File-backed store. The whole map is rewritten on every `set`, through a
/// uniquely named sibling temp file renamed over the target, so a crash
/// mid-write leaves the previous document intact.
///
/// Single writer per file: each handle from [`JsonFileStore::open`] keeps its
/// own copy of the document, so two handles opened separately on one path
/// (for example in two processes) overwrite each other's keys. Share one
/// handle by cloning it instead.
#[derive(Clone)]
pub struct JsonFileStore {
    path: PathBuf,
    entries: Arc<RwLock<Map<String, Value>>>,
}

impl JsonFileStore {
    /// Open the document at `path`. A missing file opens as an empty store.
    ///
    /// The returned handle assumes it is the only writer of `path`.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, StorageError> {
        let path = path.into();
        let entries = match fs::read_to_string(&path) {
            Ok(text) if text.trim().is_empty() => Map::new(),
            Ok(text) => match serde_json::from_str::<Value>(&text)
                .map_err(|e| StorageError::Serde(e.to_string()))?
            {
                Value::Object(map) => map,
                other => {
                    return Err(StorageError::Serde(format!(
                        "expected a JSON object in {}, found {}",
                        path.display(),
                        type_name(&other)
                    )))
                }
            },
            Err(e) if e.kind() == io::ErrorKind::NotFound => Map::new(),
            Err(e) => return Err(StorageError::Io(e.to_string())),
        };

        Ok(Self {
            path,
            entries: Arc::new(RwLock::new(entries)),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn flush(&self, entries: &Map<String, Value>) -> Result<(), StorageError> {
        let bytes = serde_json::to_vec_pretty(entries)
            .map_err(|e| StorageError::Serde(e.to_string()))?;

        let dir = match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };

        let mut tmp = NamedTempFile::new_in(dir).map_err(|e| StorageError::Io(e.to_string()))?;
        tmp.write_all(&bytes)
            .map_err(|e| StorageError::Io(e.to_string()))?;
        tmp.persist(&self.path)
            .map_err(|e| StorageError::Io(e.error.to_string()))?;
        Ok(())
    }
}

impl KeyValueStore for JsonFileStore {
    fn get(&self, key: &str) -> Result<Option<Value>, StorageError> {
        let entries = self
            .entries
            .read()
            .map_err(|_| StorageError::LockPoisoned("read"))?;
        Ok(entries.get(key).cloned())
    }

    fn set(&self, key: &str, value: Value) -> Result<(), StorageError> {
        let mut entries = self
            .entries
            .write()
            .map_err(|_| StorageError::LockPoisoned("write"))?;

        let mut next = entries.clone();
        next.insert(key.to_string(), value);
        self.flush(&next)?;
        *entries = next;
        Ok(())
    }
}

fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
