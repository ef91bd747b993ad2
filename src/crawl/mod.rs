// src/crawl/mod.rs
// =============================================================================
// This module handles crawling.
//
// Features:
// - Concurrent crawling: one tokio task per discovered page
// - Depth limit: each link hop costs one unit of depth
// - Every URL is fetched at most once (shared visited registry)
// - Results stream back as they are found, in discovery order per subtree
// - Optional cap on simultaneous fetches
//
// Submodules:
// - registry: the shared "already visited" set
// - engine: the recursive crawl task and the fan-out/fan-in channel tree
// - stats: counters for how each task ended
// =============================================================================

mod engine;
mod registry;
mod stats;

use serde::Serialize;

pub use engine::{start, Crawl, CrawlOptions};
pub use registry::VisitedRegistry;
pub use stats::{CrawlStats, StatsSnapshot};

/// One successfully fetched page, emitted exactly once per URL.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Page {
    pub url: String,
    pub body: String,
}
