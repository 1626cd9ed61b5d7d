//! Key/value file - a JSON object of string keys to string values.
//!
//! Every write rewrites the whole file through a temporary sibling and a rename, so a
//! crash mid-write leaves the previous contents intact.

use std::collections::BTreeMap;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{Result, StorageError};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
struct Entries(BTreeMap<String, String>);

#[derive(Debug, Clone)]
pub struct KeyValueFile {
    path: PathBuf,
    entries: Entries,
}

impl KeyValueFile {
    /// Open `path`; a missing file is an empty store.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let entries = match fs::read_to_string(&path) {
            Ok(text) if text.trim().is_empty() => Entries::default(),
            Ok(text) => serde_json::from_str(&text).map_err(|source| StorageError::Corrupt {
                path: path.clone(),
                source,
            })?,
            Err(e) if e.kind() == ErrorKind::NotFound => Entries::default(),
            Err(source) => return Err(StorageError::Read { path, source }),
        };
        Ok(Self { path, entries })
    }

    /// An empty store at `path` that ignores whatever is on disk.
    pub fn empty(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            entries: Entries::default(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries.0.get(key).map(String::as_str)
    }

    /// Set `key` and write the file.
    pub fn set(&mut self, key: &str, value: impl Into<String>) -> Result<()> {
        self.entries.0.insert(key.to_string(), value.into());
        self.flush()
    }

    fn flush(&self) -> Result<()> {
        let text = serde_json::to_string_pretty(&self.entries)
            .map_err(|source| StorageError::Encode { source })?;

        if let Some(dir) = self.path.parent().filter(|d| !d.as_os_str().is_empty()) {
            fs::create_dir_all(dir).map_err(|source| StorageError::Write {
                path: dir.to_path_buf(),
                source,
            })?;
        }

        let tmp = self.path.with_extension("tmp");
        fs::write(&tmp, text).map_err(|source| StorageError::Write {
            path: tmp.clone(),
            source,
        })?;
        fs::rename(&tmp, &self.path).map_err(|source| StorageError::Write {
            path: self.path.clone(),
            source,
        })
    }
}
