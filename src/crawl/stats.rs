// src/crawl/stats.rs
// =============================================================================
// Counters describing how every crawl task ended.
//
// Each task ends in exactly one terminal state:
// - fetched:          page was fetched and emitted
// - duplicate:        someone else already claimed the URL
// - depth exhausted:  no depth budget left
// - fetch failed:     the fetcher returned an error
//
// Atomics let all tasks bump counters without a lock.
// =============================================================================

use std::sync::atomic::{AtomicUsize, Ordering};

use serde::Serialize;

#[derive(Debug, Default)]
pub struct CrawlStats {
    pages_fetched: AtomicUsize,
    duplicates: AtomicUsize,
    depth_exhausted: AtomicUsize,
    fetch_failures: AtomicUsize,
    links_discovered: AtomicUsize,
}

/// A point-in-time copy of [`CrawlStats`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct StatsSnapshot {
    pub pages_fetched: usize,
    pub duplicates: usize,
    pub depth_exhausted: usize,
    pub fetch_failures: usize,
    pub links_discovered: usize,
}

impl CrawlStats {
    pub fn record_fetched(&self, links: usize) {
        self.pages_fetched.fetch_add(1, Ordering::Relaxed);
        self.links_discovered.fetch_add(links, Ordering::Relaxed);
    }

    pub fn record_duplicate(&self) {
        self.duplicates.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_depth_exhausted(&self) {
        self.depth_exhausted.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_failure(&self) {
        self.fetch_failures.fetch_add(1, Ordering::Relaxed);
    }

    pub fn snapshot(&self) -> StatsSnapshot {
        StatsSnapshot {
            pages_fetched: self.pages_fetched.load(Ordering::Relaxed),
            duplicates: self.duplicates.load(Ordering::Relaxed),
            depth_exhausted: self.depth_exhausted.load(Ordering::Relaxed),
            fetch_failures: self.fetch_failures.load(Ordering::Relaxed),
            links_discovered: self.links_discovered.load(Ordering::Relaxed),
        }
    }
}

impl StatsSnapshot {
    /// Total number of crawl tasks that ran (one per terminal state).
    pub fn tasks(&self) -> usize {
        self.pages_fetched + self.duplicates + self.depth_exhausted + self.fetch_failures
    }
}
