use client::{ClientError, TokenError};
use thiserror::Error;

use crate::config::ConfigValidationError;

/// Startup and session failures of the console.
#[derive(Debug, Error)]
pub enum ConsoleError {
    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),

    #[error(transparent)]
    InvalidConfig(#[from] ConfigValidationError),

    #[error("Client setup failed: {0}")]
    Client(#[from] ClientError),

    #[error("Session error: {0}")]
    Session(#[from] TokenError),

    #[error("Terminal I/O failed: {0}")]
    Io(#[from] std::io::Error),
}
