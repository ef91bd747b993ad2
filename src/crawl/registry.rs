// src/crawl/registry.rs
// =============================================================================
// The visited registry: the single source of truth for "has anyone already
// started fetching this URL?".
//
// Every crawl task calls claim() before fetching. The first caller for a URL
// wins and gets `true`; everybody after that gets `false` and stops.
//
// The lock is only held for the check-and-insert, never while fetching, so a
// slow server never blocks other tasks from claiming their URLs.
// =============================================================================

use std::collections::HashSet;
use std::sync::{Mutex, MutexGuard, PoisonError};

#[derive(Debug, Default)]
pub struct VisitedRegistry {
    visited: Mutex<HashSet<String>>,
}

impl VisitedRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Atomically marks `url` as visited.
    ///
    /// Returns `true` if this call claimed it, `false` if it was already
    /// claimed. URLs are compared as exact strings.
    pub fn claim(&self, url: &str) -> bool {
        let mut visited = self.lock();
        if visited.contains(url) {
            return false;
        }
        visited.insert(url.to_string())
    }

    pub fn is_visited(&self, url: &str) -> bool {
        self.lock().contains(url)
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    // A panic can't happen halfway through an insert, so a poisoned set is
    // still consistent.
    fn lock(&self) -> MutexGuard<'_, HashSet<String>> {
        self.visited.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
