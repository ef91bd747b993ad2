// src/fetch/graph.rs
// =============================================================================
// An in-memory "web": a map from URL to (body, links).
//
// Useful for:
// - Tests (fully deterministic, no network)
// - The `demo` and `graph` subcommands
//
// Graph files are JSON objects keyed by URL:
//
//   {
//     "https://a.example/": { "body": "Page A", "links": ["https://b.example/"] },
//     "https://b.example/": { "body": "Page B" }
//   }
//
// Any URL that is not a key in the map fails with FetchError::NotFound.
// =============================================================================

use std::collections::HashMap;
use std::path::Path;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use anyhow::{Context, Result};
use async_trait::async_trait;

use super::{Document, FetchError, Fetcher};

#[derive(Debug, Default)]
pub struct StaticFetcher {
    pages: HashMap<String, Document>,
    // Artificial delay applied to every fetch, to make concurrency visible
    latency: Option<Duration>,
    // How many times fetch() has been called (hits and misses)
    calls: AtomicUsize,
}

impl StaticFetcher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds (or replaces) a page in the graph.
    pub fn with_page(mut self, url: &str, body: &str, links: &[&str]) -> Self {
        let links = links.iter().map(|l| l.to_string()).collect();
        self.pages.insert(url.to_string(), Document::new(body, links));
        self
    }

    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = Some(latency);
        self
    }

    /// Parses a graph from its JSON representation.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        let pages: HashMap<String, Document> = serde_json::from_str(json)?;
        Ok(Self {
            pages,
            ..Self::default()
        })
    }

    /// Loads a graph from a JSON file on disk.
    pub fn load(path: &Path) -> Result<Self> {
        let json = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read graph file {}", path.display()))?;
        Self::from_json(&json)
            .with_context(|| format!("invalid graph file {}", path.display()))
    }

    /// The small Go documentation graph used by the `demo` subcommand.
    ///
    /// Note that https://golang.org/cmd/ is linked but missing, so a crawl
    /// of this graph always reports exactly one fetch failure.
    pub fn golang_tour() -> Self {
        Self::new()
            .with_page(
                "https://golang.org/",
                "The Go Programming Language",
                &["https://golang.org/pkg/", "https://golang.org/cmd/"],
            )
            .with_page(
                "https://golang.org/pkg/",
                "Packages",
                &[
                    "https://golang.org/",
                    "https://golang.org/cmd/",
                    "https://golang.org/pkg/fmt/",
                    "https://golang.org/pkg/os/",
                ],
            )
            .with_page(
                "https://golang.org/pkg/fmt/",
                "Package fmt",
                &["https://golang.org/", "https://golang.org/pkg/"],
            )
            .with_page(
                "https://golang.org/pkg/os/",
                "Package os",
                &["https://golang.org/", "https://golang.org/pkg/"],
            )
    }

    pub fn len(&self) -> usize {
        self.pages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pages.is_empty()
    }

    pub fn fetch_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl Fetcher for StaticFetcher {
    async fn fetch(&self, url: &str) -> Result<Document, FetchError> {
        self.calls.fetch_add(1, Ordering::SeqCst);

        if let Some(latency) = self.latency {
            tokio::time::sleep(latency).await;
        }

        self.pages
            .get(url)
            .cloned()
            .ok_or_else(|| FetchError::NotFound(url.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_fetch_known_page() {
        let fetcher = StaticFetcher::golang_tour();
        let doc = fetcher.fetch("https://golang.org/pkg/fmt/").await.unwrap();
        assert_eq!(doc.body, "Package fmt");
        assert_eq!(
            doc.links,
            vec!["https://golang.org/", "https://golang.org/pkg/"]
        );
    }

    #[tokio::test]
    async fn test_fetch_missing_page() {
        let fetcher = StaticFetcher::golang_tour();
        let err = fetcher.fetch("https://golang.org/cmd/").await.unwrap_err();
        assert!(matches!(err, FetchError::NotFound(ref url) if url == "https://golang.org/cmd/"));
        assert_eq!(err.to_string(), "not found: https://golang.org/cmd/");
        assert_eq!(fetcher.fetch_count(), 1);
    }

    #[test]
    fn test_from_json() {
        let json = r#"{
            "a": { "body": "Page A", "links": ["b", "c"] },
            "b": { "body": "Page B" }
        }"#;
        let fetcher = StaticFetcher::from_json(json).unwrap();
        assert_eq!(fetcher.len(), 2);
    }

    #[test]
    fn test_from_json_rejects_garbage() {
        assert!(StaticFetcher::from_json("[1, 2, 3]").is_err());
    }

    #[test]
    fn test_load_missing_file() {
        let err = StaticFetcher::load(Path::new("/definitely/not/here.json")).unwrap_err();
        assert!(err.to_string().contains("failed to read graph file"));
    }
}
