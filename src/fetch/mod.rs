// src/fetch/mod.rs
// =============================================================================
// This module defines how the crawler gets documents.
//
// The crawl engine never talks to the network directly. It only knows about
// the `Fetcher` trait: "give me a URL, I give you back the page body and the
// list of URLs it links to (or an error)".
//
// Implementations:
// - graph: an in-memory canned graph (great for tests and demos)
// - http: real HTTP requests with reqwest + link extraction with scraper
//
// Rust concepts:
// - Traits: Shared behaviour that many types can implement
// - Trait objects (dyn Fetcher): Pick the implementation at runtime
// - thiserror: Derive std::error::Error for our own error enums
// =============================================================================

mod graph;
mod http;

pub use graph::StaticFetcher;
pub use http::{extract_links, HttpFetcher};

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A fetched document: its body and the URLs it references, in page order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Document {
    pub body: String,
    #[serde(default)]
    pub links: Vec<String>,
}

impl Document {
    pub fn new(body: impl Into<String>, links: Vec<String>) -> Self {
        Self {
            body: body.into(),
            links,
        }
    }
}

/// Everything that can go wrong while fetching a single document.
#[derive(Debug, Error)]
pub enum FetchError {
    /// The document does not exist (canned graphs)
    #[error("not found: {0}")]
    NotFound(String),

    /// The server answered with a non-success status code
    #[error("HTTP {status} for {url}")]
    Status { url: String, status: u16 },

    /// The URL could not be parsed
    #[error("invalid URL '{url}': {reason}")]
    InvalidUrl { url: String, reason: String },

    /// Network / transport level failure
    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),
}

/// The one recoverable crawl error: fetching `url` failed.
///
/// It only ever ends the task that hit it. The crawl keeps going everywhere
/// else and the failure never shows up in the result stream.
#[derive(Debug, Error)]
#[error("failed to fetch {url}: {source}")]
pub struct FetchFailed {
    pub url: String,
    #[source]
    pub source: FetchError,
}

// The capability the crawl engine consumes.
//
// Implementations must be safe to call from many tasks at once
// (Send + Sync), because every crawl task calls fetch() concurrently.
#[async_trait]
pub trait Fetcher: Send + Sync {
    async fn fetch(&self, url: &str) -> Result<Document, FetchError>;
}
