//! Storage for the last used expression.
//!
//! Front ends remember the expression the user worked with last, so it can
//! be offered again on the next start. The library only defines the
//! capability; where the value lives is up to the implementation.

use std::cell::RefCell;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use log::{debug, warn};

/// Expression offered when nothing has been stored yet.
pub const DEFAULT_EXPRESSION: &str = "(A AND B) OR (NOT C)";

/// Default file name used by [`FileStore`].
pub const DEFAULT_STORE_FILE: &str = ".last_expr";

/// Error type for store operations.
#[derive(Debug)]
pub enum StoreError {
    /// File I/O error.
    Io(io::Error),
}

impl From<io::Error> for StoreError {
    fn from(e: io::Error) -> Self {
        StoreError::Io(e)
    }
}

impl std::fmt::Display for StoreError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StoreError::Io(e) => write!(f, "I/O error: {}", e),
        }
    }
}

impl std::error::Error for StoreError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            StoreError::Io(e) => Some(e),
        }
    }
}

pub trait ExpressionStore {
    /// Returns the stored expression, or `None` if nothing was stored.
    fn load(&self) -> Result<Option<String>, StoreError>;

    fn save(&self, expression: &str) -> Result<(), StoreError>;

    /// Returns the stored expression, falling back to [`DEFAULT_EXPRESSION`]
    /// when nothing (or only whitespace) is stored or the store is unreadable.
    fn load_or_default(&self) -> String {
        match self.load() {
            Ok(Some(expression)) if !expression.trim().is_empty() => expression,
            Ok(_) => DEFAULT_EXPRESSION.to_string(),
            Err(e) => {
                warn!("Could not load last expression: {}", e);
                DEFAULT_EXPRESSION.to_string()
            }
        }
    }
}

/// Keeps the expression in a single text file.
#[derive(Debug, Clone)]
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    pub fn new<P: Into<PathBuf>>(path: P) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Default for FileStore {
    fn default() -> Self {
        FileStore::new(DEFAULT_STORE_FILE)
    }
}

impl ExpressionStore for FileStore {
    fn load(&self) -> Result<Option<String>, StoreError> {
        match fs::read_to_string(&self.path) {
            Ok(content) => {
                debug!("Loaded last expression from {}", self.path.display());
                Ok(Some(content.trim().to_string()))
            }
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn save(&self, expression: &str) -> Result<(), StoreError> {
        fs::write(&self.path, expression)?;
        debug!("Saved last expression to {}", self.path.display());
        Ok(())
    }
}

/// Keeps the expression in memory.
#[derive(Debug, Default)]
pub struct MemoryStore {
    expression: RefCell<Option<String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl ExpressionStore for MemoryStore {
    fn load(&self) -> Result<Option<String>, StoreError> {
        Ok(self.expression.borrow().clone())
    }

    fn save(&self, expression: &str) -> Result<(), StoreError> {
        *self.expression.borrow_mut() = Some(expression.to_string());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use test_log::test;

    fn temp_path(name: &str) -> PathBuf {
        std::env::temp_dir().join(format!("logic-sim-{}-{}", name, std::process::id()))
    }

    #[test]
    fn test_memory_store() {
        let store = MemoryStore::new();
        assert_eq!(store.load().unwrap(), None);
        assert_eq!(store.load_or_default(), DEFAULT_EXPRESSION);
        store.save("A XOR B").unwrap();
        assert_eq!(store.load().unwrap().as_deref(), Some("A XOR B"));
        assert_eq!(store.load_or_default(), "A XOR B");
    }

    #[test]
    fn test_file_store_missing_file() {
        let store = FileStore::new(temp_path("missing"));
        assert_eq!(store.load().unwrap(), None);
        assert_eq!(store.load_or_default(), DEFAULT_EXPRESSION);
    }

    #[test]
    fn test_file_store_round_trip() {
        let path = temp_path("round-trip");
        let store = FileStore::new(&path);
        store.save("NOT A NOR B").unwrap();
        assert_eq!(store.load().unwrap().as_deref(), Some("NOT A NOR B"));
        fs::write(&path, "  A OR B \n").unwrap();
        assert_eq!(store.load().unwrap().as_deref(), Some("A OR B"));
        fs::remove_file(&path).unwrap();
    }

    #[test]
    fn test_blank_falls_back_to_default() {
        let store = MemoryStore::new();
        store.save("   ").unwrap();
        assert_eq!(store.load_or_default(), DEFAULT_EXPRESSION);
    }

    #[test]
    fn test_unreadable_falls_back_to_default() {
        // A directory cannot be read as a file.
        let store = FileStore::new(std::env::temp_dir());
        assert!(store.load().is_err());
        assert_eq!(store.load_or_default(), DEFAULT_EXPRESSION);
    }
}
