use dashmap::DashSet;
use std::sync::{Mutex, PoisonError};

// --- Visited Set ---

/// Paths claimed during one traversal. Entries are never removed.
#[derive(Debug, Default)]
pub struct VisitedSet {
    paths: DashSet<String>,
}

impl VisitedSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Atomically inserts `path` if absent.
    /// Returns true for exactly one caller per distinct path.
    pub fn claim(&self, path: &str) -> bool {
        if self.paths.contains(path) {
            return false;
        }
        self.paths.insert(path.to_string())
    }

    pub fn len(&self) -> usize {
        self.paths.len()
    }

    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }
}

// --- Result Aggregator ---

/// Append-only collection of the messages found during one traversal.
#[derive(Debug, Default)]
pub struct MessageStore {
    messages: Mutex<Vec<String>>,
}

impl MessageStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn append(&self, message: impl Into<String>) {
        self.messages
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(message.into());
    }

    pub fn len(&self) -> usize {
        self.messages
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Takes every appended message, sorted ascending. Duplicates are kept.
    pub fn drain_sorted(&self) -> Vec<String> {
        let mut messages = std::mem::take(
            &mut *self
                .messages
                .lock()
                .unwrap_or_else(PoisonError::into_inner),
        );
        messages.sort_unstable();
        messages
    }
}
