//! Domain services for the fleet admin console.
//!
//! Services are the seams between screens and the outside world: entity data
//! access, multi-select option lookup and user notifications.

pub mod conflict;
pub mod memory;
pub mod notification;

use thiserror::Error;

use crate::forms::{OptionSource, SelectOption};
use crate::models::Entity;

pub use conflict::{detect_conflict, Conflict};
pub use memory::{InMemoryEntityService, InMemoryOptionProvider};
pub use notification::{
    failure_message, success_message, CrudAction, Notifier, Toast, ToastKind, ToastQueue,
};

/// Failure of a data access call.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ServiceError {
    #[error("Network error: {0}")]
    Network(String),

    #[error("Request failed with status {status}")]
    Status {
        status: u16,
        message: Option<String>,
    },

    #[error("Unexpected response: {0}")]
    Decode(String),

    #[error("Not signed in")]
    Unauthenticated,
}

impl ServiceError {
    /// Message supplied by the backend, when there is one.
    pub fn server_message(&self) -> Option<&str> {
        match self {
            ServiceError::Status {
                message: Some(message),
                ..
            } if !message.trim().is_empty() => Some(message.as_str()),
            _ => None,
        }
    }

    pub fn status(message: impl Into<String>, status: u16) -> Self {
        ServiceError::Status {
            status,
            message: Some(message.into()),
        }
    }
}

/// CRUD access to one entity collection.
#[async_trait::async_trait]
pub trait EntityService<E: Entity>: Send + Sync {
    /// Fetches the full collection.
    async fn list(&self) -> Result<Vec<E>, ServiceError>;

    /// Creates a record and returns it with its assigned id.
    async fn create(&self, entity: &E) -> Result<E, ServiceError>;

    async fn update(&self, id: i64, entity: &E) -> Result<E, ServiceError>;

    async fn delete(&self, id: i64) -> Result<(), ServiceError>;

    /// Server-side search. An empty query lists everything.
    async fn search(&self, query: &str) -> Result<Vec<E>, ServiceError>;
}

/// Lookup of selectable values for drawer multi-selects.
#[async_trait::async_trait]
pub trait OptionProvider: Send + Sync {
    async fn options(&self, source: OptionSource) -> Result<Vec<SelectOption>, ServiceError>;
}
