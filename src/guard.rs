//! Per-action in-flight flags.
//!
//! A handler takes a guard for its action before the first remote call. While
//! the guard is alive, a second trigger of the same action is rejected with
//! `Error::InFlight` instead of racing the first one. Dropping the guard
//! (on success, failure or early return) clears the flag.

use crate::error::{Error, Result};
use std::collections::HashSet;
use std::fmt;
use std::sync::{Arc, Mutex, PoisonError};

/// User-triggered actions that talk to the backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    Login,
    Logout,
    SubmitContact,
    SaveLanguage,
    LoadPost,
    SavePost,
    DeletePost,
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Action::Login => "login",
            Action::Logout => "logout",
            Action::SubmitContact => "contact submission",
            Action::SaveLanguage => "language update",
            Action::LoadPost => "post loading",
            Action::SavePost => "save post",
            Action::DeletePost => "delete post",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, Default)]
pub struct InFlight {
    active: Arc<Mutex<HashSet<Action>>>,
}

impl InFlight {
    pub fn new() -> Self {
        Self::default()
    }

    /// Mark `action` as running, or fail if it already is.
    pub fn begin(&self, action: Action) -> Result<InFlightGuard> {
        let mut active = self.active.lock().unwrap_or_else(PoisonError::into_inner);
        if !active.insert(action) {
            return Err(Error::InFlight(action));
        }
        Ok(InFlightGuard {
            action,
            active: Arc::clone(&self.active),
        })
    }

    pub fn is_active(&self, action: Action) -> bool {
        self.active
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .contains(&action)
    }
}

/// Clears its action's flag when dropped.
#[derive(Debug)]
pub struct InFlightGuard {
    action: Action,
    active: Arc<Mutex<HashSet<Action>>>,
}

impl Drop for InFlightGuard {
    fn drop(&mut self) {
        self.active
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(&self.action);
    }
}
