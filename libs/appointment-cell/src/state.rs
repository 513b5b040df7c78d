use std::collections::HashSet;
use std::sync::{Arc, Mutex, PoisonError};

use shared_config::AppConfig;

/// Router state: configuration plus the set of users with a save or delete
/// outstanding. Pages are rebuilt per request, so this set is what keeps a
/// second submit from reaching the backend while the first is in flight.
#[derive(Clone)]
pub struct AppointmentState {
    pub config: Arc<AppConfig>,
    pending: Arc<Mutex<HashSet<String>>>,
}

impl AppointmentState {
    pub fn new(config: Arc<AppConfig>) -> Self {
        Self {
            config,
            pending: Arc::new(Mutex::new(HashSet::new())),
        }
    }

    /// Marks the user busy. `None` when a save or delete of theirs is
    /// already outstanding.
    pub fn claim(&self, subject: &str) -> Option<PendingGuard> {
        let mut pending = self.pending.lock().unwrap_or_else(PoisonError::into_inner);
        if !pending.insert(subject.to_string()) {
            return None;
        }
        Some(PendingGuard {
            pending: Arc::clone(&self.pending),
            subject: subject.to_string(),
        })
    }

    pub fn is_pending(&self, subject: &str) -> bool {
        self.pending
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .contains(subject)
    }
}

/// Clears the user's entry when the request finishes, however it finishes.
pub struct PendingGuard {
    pending: Arc<Mutex<HashSet<String>>>,
    subject: String,
}

impl Drop for PendingGuard {
    fn drop(&mut self) {
        self.pending
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(&self.subject);
    }
}
