// src/crawl/engine.rs
// =============================================================================
// The concurrent crawl engine.
//
// How it works:
// 1. start() spawns a root crawl task for the seed URL
// 2. Each task claims its URL, fetches it and sends its own page upstream
// 3. Then it spawns one child task per link (depth - 1), each with its own
//    channel, without waiting for any of them
// 4. Then it drains the children's channels one after the other, forwarding
//    every page to its own channel
// 5. When the last child channel closes, the task returns and its own
//    channel closes
//
// The channels form a tree that mirrors the discovery tree, so the root
// channel only closes once every reachable task has finished.
//
// Rust concepts:
// - Dropping a Sender closes the channel: no matter how a task exits
//   (early return, fetch error, normal completion), its channel is closed
//   exactly once
// - BoxFuture: A recursive async function needs a boxed, named future type
// - Arc: Shares the registry/fetcher/stats between all tasks
// =============================================================================

use std::num::NonZeroUsize;
use std::sync::Arc;

use futures::future::{BoxFuture, FutureExt};
use futures::stream::{self, Stream};
use tokio::sync::{mpsc, Semaphore};

use super::registry::VisitedRegistry;
use super::stats::{CrawlStats, StatsSnapshot};
use super::Page;
use crate::fetch::{FetchFailed, Fetcher};

/// Tuning knobs for a single crawl.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CrawlOptions {
    /// Depth 1 = only the seed, depth 2 = the seed and the pages it links to,
    /// etc. Depth 0 crawls nothing.
    pub max_depth: usize,
    /// Upper bound on simultaneous fetch calls. `None` means unbounded.
    pub max_concurrent_fetches: Option<NonZeroUsize>,
}

impl CrawlOptions {
    pub fn new(max_depth: usize) -> Self {
        Self {
            max_depth,
            max_concurrent_fetches: None,
        }
    }

    pub fn with_fetch_limit(mut self, limit: NonZeroUsize) -> Self {
        self.max_concurrent_fetches = Some(limit);
        self
    }
}

// State shared by every task of one crawl
struct Shared {
    registry: VisitedRegistry,
    fetcher: Arc<dyn Fetcher>,
    stats: CrawlStats,
    fetch_limit: Option<Semaphore>,
}

/// A running crawl: the receiving end of the root task's channel.
///
/// Pages arrive while the crawl is still going. `next_page()` returns `None`
/// once every task has finished.
pub struct Crawl {
    pages: mpsc::Receiver<Page>,
    shared: Arc<Shared>,
}

impl Crawl {
    pub async fn next_page(&mut self) -> Option<Page> {
        self.pages.recv().await
    }

    pub fn stats(&self) -> StatsSnapshot {
        self.shared.stats.snapshot()
    }

    /// Number of URLs claimed so far.
    pub fn visited(&self) -> usize {
        self.shared.registry.len()
    }

    /// Waits for the crawl to finish and returns every page in arrival order.
    pub async fn collect(mut self) -> Vec<Page> {
        let mut pages = Vec::new();
        while let Some(page) = self.next_page().await {
            pages.push(page);
        }
        pages
    }

    pub fn into_stream(self) -> impl Stream<Item = Page> {
        stream::unfold(self, |mut crawl| async move {
            crawl.next_page().await.map(|page| (page, crawl))
        })
    }
}

/// Starts crawling from `seed`.
///
/// Must be called from inside a tokio runtime. Dropping the returned
/// [`Crawl`] closes the channel tree from the root down: tasks waiting on
/// their children give up at once, and tasks still fetching spawn no
/// children once their send fails.
pub fn start(seed: impl Into<String>, options: CrawlOptions, fetcher: Arc<dyn Fetcher>) -> Crawl {
    let seed = seed.into();

    let shared = Arc::new(Shared {
        registry: VisitedRegistry::new(),
        fetcher,
        stats: CrawlStats::default(),
        fetch_limit: options
            .max_concurrent_fetches
            .map(|limit| Semaphore::new(limit.get())),
    });

    tracing::info!(
        seed = %seed,
        max_depth = options.max_depth,
        fetch_limit = ?options.max_concurrent_fetches,
        "starting crawl"
    );

    let (tx, rx) = mpsc::channel(1);
    tokio::spawn(crawl_task(seed, options.max_depth, Arc::clone(&shared), tx));

    Crawl { pages: rx, shared }
}

// One crawl task. `out` is owned by this task and is closed (dropped) when
// the returned future completes.
fn crawl_task(
    url: String,
    depth: usize,
    shared: Arc<Shared>,
    out: mpsc::Sender<Page>,
) -> BoxFuture<'static, ()> {
    async move {
        if depth == 0 {
            tracing::debug!(url = %url, "depth exhausted");
            shared.stats.record_depth_exhausted();
            return;
        }

        if !shared.registry.claim(&url) {
            tracing::debug!(url = %url, "already visited");
            shared.stats.record_duplicate();
            return;
        }

        // The permit (if any) is released as soon as the fetch returns
        let fetched = {
            let _permit = match &shared.fetch_limit {
                Some(limit) => limit.acquire().await.ok(),
                None => None,
            };
            shared.fetcher.fetch(&url).await
        };

        let document = match fetched {
            Ok(document) => document,
            Err(source) => {
                let failure = FetchFailed { url, source };
                tracing::warn!("{}", failure);
                shared.stats.record_failure();
                return;
            }
        };

        tracing::debug!(url = %url, depth, links = document.links.len(), "fetched");
        shared.stats.record_fetched(document.links.len());

        let page = Page {
            url,
            body: document.body,
        };
        if out.send(page).await.is_err() {
            tracing::debug!("result receiver dropped, not following links");
            return;
        }

        // Fan out: every child runs concurrently
        let children: Vec<mpsc::Receiver<Page>> = document
            .links
            .into_iter()
            .map(|link| {
                let (tx, rx) = mpsc::channel(1);
                tokio::spawn(crawl_task(link, depth - 1, Arc::clone(&shared), tx));
                rx
            })
            .collect();

        // Fan in: drain children in discovery order. If our own reader goes
        // away meanwhile, return right away so the children's receivers are
        // dropped too.
        for mut child in children {
            loop {
                let next = tokio::select! {
                    page = child.recv() => page,
                    _ = out.closed() => {
                        tracing::debug!("result receiver dropped, abandoning children");
                        return;
                    }
                };
                let Some(page) = next else { break };
                if out.send(page).await.is_err() {
                    return;
                }
            }
        }
    }
    .boxed()
}
