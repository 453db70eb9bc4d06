//! Observable scan status view
//!
//! Holds the latest status lines and scan state, and notifies every
//! subscriber when either changes.

use std::sync::{Mutex, MutexGuard, PoisonError};

use crate::scan::ScanState;

/// Lines shown before any scan has run
pub const WELCOME_MESSAGE: &str = "Welcome to Intrucept Scans";

/// Snapshot delivered to subscribers
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusUpdate {
    pub state: ScanState,
    pub lines: Vec<String>,
}

type Listener = Box<dyn Fn(&StatusUpdate) + Send + Sync>;

/// Change-notification publisher for scan status
pub struct StatusView {
    current: Mutex<StatusUpdate>,
    listeners: Mutex<Vec<Listener>>,
}

impl Default for StatusView {
    fn default() -> Self {
        Self::new()
    }
}

impl StatusView {
    pub fn new() -> Self {
        Self {
            current: Mutex::new(StatusUpdate {
                state: ScanState::Idle,
                lines: vec![WELCOME_MESSAGE.to_string()],
            }),
            listeners: Mutex::new(Vec::new()),
        }
    }

    /// Register a listener called on every change
    pub fn subscribe<F>(&self, listener: F)
    where
        F: Fn(&StatusUpdate) + Send + Sync + 'static,
    {
        lock(&self.listeners).push(Box::new(listener));
    }

    /// Replace the state and status lines
    pub fn publish(&self, state: ScanState, lines: Vec<String>) {
        let update = StatusUpdate { state, lines };
        *lock(&self.current) = update.clone();
        self.fire(&update);
    }

    /// Change the state, keeping the current lines
    pub fn transition(&self, state: ScanState) {
        let update = {
            let mut current = lock(&self.current);
            current.state = state;
            current.clone()
        };
        self.fire(&update);
    }

    #[cfg(test)]
    pub fn current(&self) -> StatusUpdate {
        lock(&self.current).clone()
    }

    fn fire(&self, update: &StatusUpdate) {
        for listener in lock(&self.listeners).iter() {
            listener(update);
        }
    }
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}
