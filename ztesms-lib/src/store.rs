//! Durable storage for the change-detection fingerprint.
//!
//! The protocol needs exactly one named string slot that survives process
//! restarts. The trait keeps the backend swappable; the default is one file
//! per slot under the OS data directory.

use crate::error::RouterError;
use directories::ProjectDirs;
use std::collections::HashMap;
use std::fs;
use std::io;
use std::path::PathBuf;

/// Named string slots, get/set, durable across invocations.
pub trait FingerprintStore {
    fn get(&self, name: &str) -> io::Result<Option<String>>;
    fn set(&mut self, name: &str, value: &str) -> io::Result<()>;
}

/// File-backed store: one file per slot name inside a directory.
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    /// Opens the store in the per-user data directory for this tool.
    pub fn open_default() -> Result<Self, RouterError> {
        let dirs = ProjectDirs::from("", "", "ztesms").ok_or(RouterError::NoStateDir)?;
        Self::open(dirs.data_dir())
    }

    /// Opens the store in an explicit directory, creating it if needed.
    pub fn open(dir: impl Into<PathBuf>) -> Result<Self, RouterError> {
        let dir = dir.into();
        fs::create_dir_all(&dir)?;
        Ok(Self { dir })
    }
}

impl FingerprintStore for FileStore {
    fn get(&self, name: &str) -> io::Result<Option<String>> {
        match fs::read_to_string(self.dir.join(name)) {
            Ok(value) => Ok(Some(value.trim_end().to_string())),
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(err) => Err(err),
        }
    }

    fn set(&mut self, name: &str, value: &str) -> io::Result<()> {
        fs::write(self.dir.join(name), value)
    }
}

/// In-memory store, mainly for tests and embedding.
#[derive(Debug, Default)]
pub struct MemoryStore {
    slots: HashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl FingerprintStore for MemoryStore {
    fn get(&self, name: &str) -> io::Result<Option<String>> {
        Ok(self.slots.get(name).cloned())
    }

    fn set(&mut self, name: &str, value: &str) -> io::Result<()> {
        self.slots.insert(name.to_string(), value.to_string());
        Ok(())
    }
}
