//! User-facing notices.
//!
//! Outcomes that the user must be told about are pushed through a
//! [`Notifier`]; how they are shown (dialog, toast, log line) is up to the
//! embedding UI.

use serde::{Deserialize, Serialize};
use std::sync::Mutex;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Notice {
    /// Media library access was refused.
    PermissionDenied,
    /// The activity was created.
    Created,
    /// The server was reached but declined the request.
    Rejected,
    /// The request never completed.
    Failed,
}

impl Notice {
    pub fn title(&self) -> &'static str {
        match self {
            Self::PermissionDenied => "Notice",
            Self::Created => "Success",
            Self::Rejected => "Failed",
            Self::Failed => "Error",
        }
    }

    pub fn message(&self) -> &'static str {
        match self {
            Self::PermissionDenied => "Permission to access the media library was denied.",
            Self::Created => "The activity was created successfully.",
            Self::Rejected => "The activity could not be created.",
            Self::Failed => "An error occurred while creating the activity.",
        }
    }
}

/// Sink for user-facing notices.
pub trait Notifier: Send + Sync {
    fn notify(&self, notice: Notice);
}

/// Notifier that only logs.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingNotifier;

impl Notifier for TracingNotifier {
    fn notify(&self, notice: Notice) {
        tracing::info!("[Notice] {}: {}", notice.title(), notice.message());
    }
}

/// Notifier that keeps every notice, for assertions and headless use.
#[derive(Debug, Default)]
pub struct RecordingNotifier {
    notices: Mutex<Vec<Notice>>,
}

impl RecordingNotifier {
    pub fn notices(&self) -> Vec<Notice> {
        self.notices
            .lock()
            .map(|notices| notices.clone())
            .unwrap_or_default()
    }
}

impl Notifier for RecordingNotifier {
    fn notify(&self, notice: Notice) {
        if let Ok(mut notices) = self.notices.lock() {
            notices.push(notice);
        }
    }
}
