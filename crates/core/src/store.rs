//! Single-slot storage for the current session token.
//!
//! - [`MemorySessionStore`] -- in-process slot, lost when the process exits.
//! - [`FileSessionStore`] -- slot persisted as a file so it survives restarts.

use std::path::{Path, PathBuf};
use std::sync::RwLock;

/// Key under which the session token is stored.
pub const TOKEN_KEY: &str = "token";

#[derive(Debug, thiserror::Error)]
pub enum SessionStoreError {
    #[error("Session store I/O failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("Session store lock poisoned")]
    Poisoned,
}

/// Holds at most one session token. Writes overwrite; last writer wins.
pub trait SessionStore: Send + Sync {
    fn get(&self) -> Result<Option<String>, SessionStoreError>;
    fn set(&self, token: &str) -> Result<(), SessionStoreError>;
    fn clear(&self) -> Result<(), SessionStoreError>;
}

impl<S: SessionStore + ?Sized> SessionStore for std::sync::Arc<S> {
    fn get(&self) -> Result<Option<String>, SessionStoreError> {
        (**self).get()
    }

    fn set(&self, token: &str) -> Result<(), SessionStoreError> {
        (**self).set(token)
    }

    fn clear(&self) -> Result<(), SessionStoreError> {
        (**self).clear()
    }
}

// ---------------------------------------------------------------------------
// In-memory
// ---------------------------------------------------------------------------

#[derive(Debug, Default)]
pub struct MemorySessionStore {
    slot: RwLock<Option<String>>,
}

impl MemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store pre-populated with `token`.
    pub fn with_token(token: impl Into<String>) -> Self {
        Self {
            slot: RwLock::new(Some(token.into())),
        }
    }
}

impl SessionStore for MemorySessionStore {
    fn get(&self) -> Result<Option<String>, SessionStoreError> {
        let slot = self.slot.read().map_err(|_| SessionStoreError::Poisoned)?;
        Ok(slot.clone())
    }

    fn set(&self, token: &str) -> Result<(), SessionStoreError> {
        let mut slot = self.slot.write().map_err(|_| SessionStoreError::Poisoned)?;
        *slot = Some(token.to_string());
        Ok(())
    }

    fn clear(&self) -> Result<(), SessionStoreError> {
        let mut slot = self.slot.write().map_err(|_| SessionStoreError::Poisoned)?;
        *slot = None;
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// File-backed
// ---------------------------------------------------------------------------

/// Persists the token as `<dir>/token`.
#[derive(Debug, Clone)]
pub struct FileSessionStore {
    path: PathBuf,
}

impl FileSessionStore {
    /// Store rooted at `dir`. The directory is created on first write.
    pub fn new(dir: impl AsRef<Path>) -> Self {
        Self {
            path: dir.as_ref().join(TOKEN_KEY),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl SessionStore for FileSessionStore {
    fn get(&self) -> Result<Option<String>, SessionStoreError> {
        match std::fs::read_to_string(&self.path) {
            Ok(contents) => {
                let token = contents.trim();
                Ok((!token.is_empty()).then(|| token.to_string()))
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn set(&self, token: &str) -> Result<(), SessionStoreError> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(&self.path, token)?;
        tracing::debug!(path = %self.path.display(), "Session token stored");
        Ok(())
    }

    fn clear(&self) -> Result<(), SessionStoreError> {
        match std::fs::remove_file(&self.path) {
            Ok(()) => {
                tracing::debug!(path = %self.path.display(), "Session token removed");
                Ok(())
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}
