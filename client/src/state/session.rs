//! Session store for the current browser user.
//!
//! SYSTEM CONTEXT
//! ==============
//! Holds a single user id. The navigation guard reads it to decide redirects,
//! the HTTP interceptor rewrites it after every exchange, and the nav bar
//! renders from it. Every mutation is snapshotted to storage so a reload
//! restores the same identity.
//!
//! DESIGN
//! ======
//! The store is an owned value injected via Leptos context rather than a
//! module-level global. It exposes reads and one update action only.

#[cfg(test)]
#[path = "session_test.rs"]
mod session_test;

use leptos::prelude::*;
use serde::{Deserialize, Serialize};

use crate::util::storage::{SharedStorage, StorageError, load_json, save_json};

/// Storage key for the persisted session snapshot.
pub const SESSION_STORAGE_KEY: &str = "hp_session";

/// Persisted session snapshot. An empty `user_id` means logged out.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionState {
    #[serde(rename = "userID")]
    pub user_id: String,
}

impl SessionState {
    pub fn is_logged_out(&self) -> bool {
        self.user_id.is_empty()
    }
}

#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    #[error("failed to persist session: {0}")]
    Persist(#[from] StorageError),
}

/// Reactive, persisted session store.
#[derive(Clone)]
pub struct SessionStore {
    state: RwSignal<SessionState>,
    storage: SharedStorage,
}

impl SessionStore {
    /// Store starting logged out.
    pub fn new(storage: SharedStorage) -> Self {
        Self { state: RwSignal::new(SessionState::default()), storage }
    }

    /// Rehydrate from the last snapshot in `storage`.
    ///
    /// Missing or unreadable snapshots start logged out.
    pub fn restore(storage: SharedStorage) -> Self {
        let initial = match load_json::<SessionState>(storage.as_ref(), SESSION_STORAGE_KEY) {
            Ok(state) => state.unwrap_or_default(),
            Err(e) => {
                leptos::logging::warn!("discarding stored session: {e}");
                SessionState::default()
            }
        };
        Self { state: RwSignal::new(initial), storage }
    }

    /// Current user id, tracked by the reactive graph.
    pub fn user(&self) -> String {
        self.state.with(|s| s.user_id.clone())
    }

    /// Current user id without subscribing.
    pub fn user_untracked(&self) -> String {
        self.state.with_untracked(|s| s.user_id.clone())
    }

    pub fn is_logged_in(&self) -> bool {
        self.state.with(|s| !s.is_logged_out())
    }

    /// Replace the user id and snapshot the new state.
    ///
    /// Pass an empty string to log out. Subscribers are only notified when
    /// the id actually changes; the snapshot is written either way.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::Persist`] if the snapshot cannot be written.
    /// The in-memory value is updated regardless.
    #[allow(clippy::unused_async)]
    pub async fn update_user(&self, user_id: impl Into<String>) -> Result<(), SessionError> {
        let user_id = user_id.into();
        if self.state.with_untracked(|s| s.user_id != user_id) {
            self.state.update(|s| s.user_id = user_id);
        }
        let snapshot = self.state.get_untracked();
        save_json(self.storage.as_ref(), SESSION_STORAGE_KEY, &snapshot)?;
        Ok(())
    }
}
