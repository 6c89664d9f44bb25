// src/store/mod.rs

//! Persistence of the last successful backup time.
//!
//! The job only needs opaque get/set of one value that survives restarts;
//! the default backend is a plain file next to the script. Only the
//! orchestration path ever writes, and only on a successful run.

use std::fs;
use std::io::ErrorKind;
use std::path::PathBuf;

use anyhow::Context;
use parking_lot::Mutex;

use crate::errors::Result;

/// Durable storage for the last-successful-backup timestamp.
pub trait TimestampStore: Send + Sync {
    /// The stored value, or `None` if no backup has ever succeeded.
    fn get(&self) -> Result<Option<String>>;
    fn set(&self, value: &str) -> Result<()>;
}

/// File-backed store: one timestamp string in one file.
#[derive(Debug)]
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }
}

impl TimestampStore for FileStore {
    fn get(&self) -> Result<Option<String>> {
        match fs::read_to_string(&self.path) {
            Ok(contents) => {
                let value = contents.trim();
                Ok(if value.is_empty() {
                    None
                } else {
                    Some(value.to_string())
                })
            }
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(None),
            Err(err) => {
                Err(err).with_context(|| format!("reading last-backup file at {:?}", self.path))
            }
        }
    }

    fn set(&self, value: &str) -> Result<()> {
        fs::write(&self.path, format!("{value}\n"))
            .with_context(|| format!("writing last-backup file at {:?}", self.path))
    }
}

/// In-memory store; handy for tests and for running without persistence.
#[derive(Debug, Default)]
pub struct MemoryStore {
    value: Mutex<Option<String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl TimestampStore for MemoryStore {
    fn get(&self) -> Result<Option<String>> {
        Ok(self.value.lock().clone())
    }

    fn set(&self, value: &str) -> Result<()> {
        *self.value.lock() = Some(value.to_string());
        Ok(())
    }
}
