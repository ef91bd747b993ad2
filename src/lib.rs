// src/lib.rs
// =============================================================================
// link-crawler: a concurrent, depth-bounded link crawler.
//
// The library is split in two halves:
// - fetch: how a single document is obtained (canned graph or real HTTP)
// - crawl: how the whole graph is explored and streamed back
//
// Example:
//
//   let fetcher = Arc::new(StaticFetcher::golang_tour());
//   let mut crawl = crawl::start("https://golang.org/", CrawlOptions::new(4), fetcher);
//   while let Some(page) = crawl.next_page().await {
//       println!("found: {} {:?}", page.body, page.url);
//   }
// =============================================================================

pub mod crawl;
pub mod fetch;
pub mod logging;

pub use crawl::{start, Crawl, CrawlOptions, Page, StatsSnapshot};
pub use fetch::{Document, FetchError, FetchFailed, Fetcher, HttpFetcher, StaticFetcher};
