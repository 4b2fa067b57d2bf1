//! Durable client-side storage
//!
//! A minimal string-keyed-by-file store, the desktop stand-in for browser
//! local storage. Writes are synchronous; read failures surface as `None` so
//! callers can fall back to a fresh state.

use std::fs;
use std::io;
use std::path::PathBuf;

/// Durable local store for one serialized value
pub trait LocalStore: Send + Sync {
    /// Load the persisted payload, `None` when absent or unreadable
    fn load(&self) -> Option<String>;

    /// Persist the payload, replacing any previous value
    fn save(&self, payload: &str) -> io::Result<()>;
}

/// File-backed store holding a single JSON document
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl LocalStore for JsonFileStore {
    fn load(&self) -> Option<String> {
        fs::read_to_string(&self.path).ok()
    }

    fn save(&self, payload: &str) -> io::Result<()> {
        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent)?;
        }
        fs::write(&self.path, payload)
    }
}
