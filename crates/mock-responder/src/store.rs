//! Mock Value Stores
//!
//! Override values and the DTC flag live in an external key-value source.
//! The emulator setup uses one small text file per key; tests and the CLI's
//! in-memory mode use [`MemoryStore`].
//!
//! Values are handled as raw bytes. Only override text is decoded, and only
//! after it has been read.

use parking_lot::Mutex;
use std::collections::HashMap;
use std::fs::{File, OpenOptions};
use std::io::{self, BufRead, BufReader, Read};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::debug;

/// Longest first line read from a store, in bytes
pub const MAX_LINE_BYTES: u64 = 256;

/// Key-value source holding override values and flags
pub trait MockStore: Send + Sync {
    /// Read the first line stored under `key` as raw bytes, newline included
    ///
    /// At most [`MAX_LINE_BYTES`] are returned. Returns `Ok(None)` when
    /// nothing is stored under the key.
    fn read_line(&self, key: &str) -> io::Result<Option<Vec<u8>>>;

    /// Empty the value under `key`, creating it if its location exists
    ///
    /// Returns `Ok(false)` when the location itself is missing.
    fn truncate(&self, key: &str) -> io::Result<bool>;

    /// Whether the value under `key` has any content, whatever its encoding
    ///
    /// Returns `Ok(None)` when nothing is stored under the key.
    fn is_non_empty(&self, key: &str) -> io::Result<Option<bool>> {
        Ok(self.read_line(key)?.map(|line| !line.is_empty()))
    }
}

/// Shared handle to a store
pub type SharedStore = Arc<dyn MockStore>;

/// Store backed by one file per key inside a responses directory
#[derive(Debug, Clone)]
pub struct FileStore {
    root: PathBuf,
}

impl FileStore {
    /// Create a store rooted at `root`
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Directory holding the mock files
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Full path for a key
    pub fn path_for(&self, key: &str) -> PathBuf {
        self.root.join(key)
    }
}

impl MockStore for FileStore {
    fn read_line(&self, key: &str) -> io::Result<Option<Vec<u8>>> {
        let path = self.path_for(key);
        let file = match File::open(&path) {
            Ok(file) => file,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e),
        };

        let mut line = Vec::new();
        BufReader::new(file.take(MAX_LINE_BYTES)).read_until(b'\n', &mut line)?;
        debug!(path = %path.display(), bytes = line.len(), "Read mock file");
        Ok(Some(line))
    }

    fn truncate(&self, key: &str) -> io::Result<bool> {
        let path = self.path_for(key);
        match OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(true)
            .open(&path)
        {
            Ok(_) => Ok(true),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(false),
            Err(e) => Err(e),
        }
    }
}

/// In-memory store with injectable I/O faults
#[derive(Debug, Default)]
pub struct MemoryStore {
    values: Mutex<HashMap<String, Vec<u8>>>,
    faults: Mutex<HashMap<String, io::ErrorKind>>,
}

impl MemoryStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Store a value under `key`
    pub fn insert(&self, key: impl Into<String>, value: impl Into<Vec<u8>>) {
        self.values.lock().insert(key.into(), value.into());
    }

    /// Remove the value under `key`
    pub fn remove(&self, key: &str) -> Option<Vec<u8>> {
        self.values.lock().remove(key)
    }

    /// Current value under `key`
    pub fn get(&self, key: &str) -> Option<Vec<u8>> {
        self.values.lock().get(key).cloned()
    }

    /// Make every access to `key` fail with `kind`
    pub fn fail_with(&self, key: impl Into<String>, kind: io::ErrorKind) {
        self.faults.lock().insert(key.into(), kind);
    }

    fn check_fault(&self, key: &str) -> io::Result<()> {
        match self.faults.lock().get(key) {
            Some(kind) => Err(io::Error::new(*kind, format!("injected fault for {}", key))),
            None => Ok(()),
        }
    }
}

impl MockStore for MemoryStore {
    fn read_line(&self, key: &str) -> io::Result<Option<Vec<u8>>> {
        self.check_fault(key)?;
        Ok(self.values.lock().get(key).map(|value| {
            let limit = value.len().min(MAX_LINE_BYTES as usize);
            let value = &value[..limit];
            let end = value
                .iter()
                .position(|&b| b == b'\n')
                .map_or(value.len(), |i| i + 1);
            value[..end].to_vec()
        }))
    }

    fn truncate(&self, key: &str) -> io::Result<bool> {
        self.check_fault(key)?;
        self.values.lock().insert(key.to_string(), Vec::new());
        Ok(true)
    }
}
