//! Toast notifications shown after user actions.
//!
//! Screens push toasts through a [`Notifier`]; the renderer drains them after
//! each command.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Mutex;
use uuid::Uuid;

use super::conflict::detect_conflict;
use super::ServiceError;
use crate::models::{Entity, User};

/// Toast category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ToastKind {
    Success,
    Error,
    Info,
}

impl fmt::Display for ToastKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ToastKind::Success => write!(f, "success"),
            ToastKind::Error => write!(f, "error"),
            ToastKind::Info => write!(f, "info"),
        }
    }
}

/// A transient notification.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Toast {
    pub id: Uuid,
    pub kind: ToastKind,
    pub message: String,
    pub created_at: DateTime<Utc>,
}

impl Toast {
    pub fn new(kind: ToastKind, message: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            kind,
            message: message.into(),
            created_at: Utc::now(),
        }
    }

    pub fn success(message: impl Into<String>) -> Self {
        Self::new(ToastKind::Success, message)
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self::new(ToastKind::Error, message)
    }

    pub fn info(message: impl Into<String>) -> Self {
        Self::new(ToastKind::Info, message)
    }
}

/// Sink for toasts.
pub trait Notifier: Send + Sync {
    fn notify(&self, toast: Toast);
}

/// Queue of toasts waiting to be shown.
#[derive(Debug, Default)]
pub struct ToastQueue {
    pending: Mutex<Vec<Toast>>,
}

impl ToastQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Removes and returns all pending toasts, oldest first.
    pub fn drain(&self) -> Vec<Toast> {
        match self.pending.lock() {
            Ok(mut pending) => std::mem::take(&mut *pending),
            Err(poisoned) => std::mem::take(&mut *poisoned.into_inner()),
        }
    }

    pub fn len(&self) -> usize {
        self.pending.lock().map(|p| p.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Notifier for ToastQueue {
    fn notify(&self, toast: Toast) {
        tracing::debug!(kind = %toast.kind, message = %toast.message, "Toast queued");
        match self.pending.lock() {
            Ok(mut pending) => pending.push(toast),
            Err(poisoned) => poisoned.into_inner().push(toast),
        }
    }
}

/// User action a toast reports on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CrudAction {
    Load,
    Search,
    Create,
    Update,
    Delete,
}

impl CrudAction {
    pub fn verb(&self) -> &'static str {
        match self {
            CrudAction::Load => "load",
            CrudAction::Search => "search",
            CrudAction::Create => "create",
            CrudAction::Update => "update",
            CrudAction::Delete => "delete",
        }
    }

    pub fn past_tense(&self) -> &'static str {
        match self {
            CrudAction::Load => "loaded",
            CrudAction::Search => "searched",
            CrudAction::Create => "created",
            CrudAction::Update => "updated",
            CrudAction::Delete => "deleted",
        }
    }
}

/// "Customer group created successfully".
pub fn success_message(action: CrudAction, entity: &str) -> String {
    format!("{} {} successfully", entity, action.past_tense())
}

/// Toast text for a failed action.
///
/// Duplicate username/email errors on user saves get a tailored text;
/// otherwise the server message is shown when present, else a generic one.
pub fn failure_message(action: CrudAction, entity: &str, error: &ServiceError) -> String {
    let Some(message) = error.server_message() else {
        return format!("Failed to {} {}", action.verb(), entity.to_lowercase());
    };
    let saving_user =
        entity == User::NAME && matches!(action, CrudAction::Create | CrudAction::Update);
    if let (true, ServiceError::Status { status, .. }) = (saving_user, error) {
        if let Some(conflict) = detect_conflict(message, *status) {
            return conflict.message().to_string();
        }
    }
    message.to_string()
}
