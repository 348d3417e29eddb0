//! Bearer token storage.
//!
//! The token is read on every request, so a logout or a token written by
//! another process takes effect immediately.

use std::fmt;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::RwLock;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum TokenError {
    #[error("Failed to access token file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Token store lock poisoned")]
    Poisoned,
}

/// Local persistent storage for the session token.
pub trait TokenStore: Send + Sync + fmt::Debug {
    /// Current token; `None` when signed out.
    fn token(&self) -> Result<Option<String>, TokenError>;

    fn save(&self, token: &str) -> Result<(), TokenError>;

    /// Removes the token. Clearing an empty store is not an error.
    fn clear(&self) -> Result<(), TokenError>;
}

/// Token kept as a single line in a file.
#[derive(Debug, Clone)]
pub struct FileTokenStore {
    path: PathBuf,
}

impl FileTokenStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn io_error(&self, source: io::Error) -> TokenError {
        TokenError::Io {
            path: self.path.clone(),
            source,
        }
    }
}

impl TokenStore for FileTokenStore {
    fn token(&self) -> Result<Option<String>, TokenError> {
        match std::fs::read_to_string(&self.path) {
            Ok(content) => {
                let token = content.trim();
                Ok((!token.is_empty()).then(|| token.to_string()))
            }
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(self.io_error(e)),
        }
    }

    fn save(&self, token: &str) -> Result<(), TokenError> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(|e| self.io_error(e))?;
        }
        std::fs::write(&self.path, format!("{}\n", token.trim())).map_err(|e| self.io_error(e))
    }

    fn clear(&self) -> Result<(), TokenError> {
        match std::fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(self.io_error(e)),
        }
    }
}

/// Token held in memory, for tests and one-off runs.
#[derive(Debug, Default)]
pub struct MemoryTokenStore {
    token: RwLock<Option<String>>,
}

impl MemoryTokenStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_token(token: impl Into<String>) -> Self {
        Self {
            token: RwLock::new(Some(token.into())),
        }
    }
}

impl TokenStore for MemoryTokenStore {
    fn token(&self) -> Result<Option<String>, TokenError> {
        self.token
            .read()
            .map(|t| t.clone())
            .map_err(|_| TokenError::Poisoned)
    }

    fn save(&self, token: &str) -> Result<(), TokenError> {
        let mut slot = self.token.write().map_err(|_| TokenError::Poisoned)?;
        *slot = Some(token.to_string());
        Ok(())
    }

    fn clear(&self) -> Result<(), TokenError> {
        let mut slot = self.token.write().map_err(|_| TokenError::Poisoned)?;
        *slot = None;
        Ok(())
    }
}
