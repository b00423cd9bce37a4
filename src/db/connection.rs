use crate::errors::Result;
use rusqlite::Connection;
use std::path::PathBuf;

/// Handle to a SQLite file. Cheap to clone (path only); connections are
/// opened per call.
#[derive(Debug, Clone)]
pub struct Database {
    path: PathBuf,
}

impl Database {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Provides a mutable connection to the closure.
    pub fn with_conn<F, T>(&self, f: F) -> Result<T>
    where
        F: FnOnce(&mut Connection) -> Result<T>,
    {
        let mut conn = Connection::open(&self.path)?;
        f(&mut conn)
    }
}
