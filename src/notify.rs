//! Blocking user notifications and confirmations.
//!
//! In a browser these are `alert()` and `confirm()`. Handlers only talk to the
//! `Notifier` trait so tests and binaries can supply their own.

use std::fmt;
use std::sync::{Mutex, PoisonError};
use tracing::{error, info};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationKind {
    Info,
    Success,
    Error,
}

impl fmt::Display for NotificationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            NotificationKind::Info => "INFO",
            NotificationKind::Success => "SUCCESS",
            NotificationKind::Error => "ERROR",
        };
        f.write_str(label)
    }
}

pub trait Notifier: Send + Sync {
    /// Show a message the user has to acknowledge.
    fn notify(&self, message: &str, kind: NotificationKind);

    /// Ask a yes/no question. `false` means the action must not run.
    fn confirm(&self, message: &str) -> bool;
}

/// Writes notifications to the log and answers confirmations with a fixed value.
#[derive(Debug, Clone, Copy)]
pub struct LogNotifier {
    pub auto_confirm: bool,
}

impl Notifier for LogNotifier {
    fn notify(&self, message: &str, kind: NotificationKind) {
        match kind {
            NotificationKind::Error => error!("{}: {}", kind, message),
            _ => info!("{}: {}", kind, message),
        }
    }

    fn confirm(&self, message: &str) -> bool {
        info!("CONFIRM: {} -> {}", message, self.auto_confirm);
        self.auto_confirm
    }
}

/// Records everything it is shown; answers confirmations from a preset.
#[derive(Debug, Default)]
pub struct RecordingNotifier {
    confirm_answer: bool,
    notifications: Mutex<Vec<(NotificationKind, String)>>,
    prompts: Mutex<Vec<String>>,
}

impl RecordingNotifier {
    pub fn new(confirm_answer: bool) -> Self {
        Self {
            confirm_answer,
            ..Default::default()
        }
    }

    pub fn notifications(&self) -> Vec<(NotificationKind, String)> {
        self.notifications
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn prompts(&self) -> Vec<String> {
        self.prompts
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn last(&self) -> Option<(NotificationKind, String)> {
        self.notifications().pop()
    }
}

impl Notifier for RecordingNotifier {
    fn notify(&self, message: &str, kind: NotificationKind) {
        self.notifications
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push((kind, message.to_string()));
    }

    fn confirm(&self, message: &str) -> bool {
        self.prompts
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(message.to_string());
        self.confirm_answer
    }
}
