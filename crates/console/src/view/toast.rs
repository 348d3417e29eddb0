//! Toast rendering.

use domain::services::{Toast, ToastKind};

fn marker(kind: ToastKind) -> &'static str {
    match kind {
        ToastKind::Success => "[ok]",
        ToastKind::Error => "[error]",
        ToastKind::Info => "[info]",
    }
}

/// One line per toast, oldest first.
pub fn render_toasts(toasts: &[Toast]) -> String {
    toasts
        .iter()
        .map(|toast| format!("{} {}", marker(toast.kind), toast.message))
        .collect::<Vec<_>>()
        .join("\n")
}
