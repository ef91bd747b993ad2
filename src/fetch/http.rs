// src/fetch/http.rs
// =============================================================================
// A Fetcher that talks to real web servers.
//
// How it works:
// 1. GET the URL with a shared reqwest Client
// 2. Treat any non-2xx status as a failure
// 3. Parse the HTML and pull out every <a href="..."> link
// 4. Resolve relative links against the URL that was finally served (after
//    redirects), drop fragments
// 5. Optionally keep only links on the same host as the seed
//
// Rust concepts:
// - Client reuse: reqwest::Client holds a connection pool, clone is cheap
// - Option<String>: The host restriction is either set or not
// =============================================================================

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use scraper::{Html, Selector};
use url::Url;

use super::{Document, FetchError, Fetcher};

#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: Client,
    // When set, only links on this host are returned. Hosts are compared as
    // strings, so IP-address seeds work too.
    same_host: Option<String>,
}

impl HttpFetcher {
    // Creates an HTTP fetcher with a per-request timeout
    pub fn new(timeout: Duration) -> Result<Self, FetchError> {
        let client = Client::builder()
            .timeout(timeout)
            .redirect(reqwest::redirect::Policy::limited(5))
            .user_agent(concat!("link-crawler/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            client,
            same_host: None,
        })
    }

    /// Restricts discovered links to the host of `seed` (a domain or an IP).
    pub fn restrict_to_host_of(mut self, seed: &str) -> Result<Self, FetchError> {
        let parsed = Url::parse(seed).map_err(|e| FetchError::InvalidUrl {
            url: seed.to_string(),
            reason: e.to_string(),
        })?;
        let host = parsed.host_str().ok_or_else(|| FetchError::InvalidUrl {
            url: seed.to_string(),
            reason: "URL has no host".to_string(),
        })?;
        self.same_host = Some(host.to_string());
        Ok(self)
    }
}

#[async_trait]
impl Fetcher for HttpFetcher {
    async fn fetch(&self, url: &str) -> Result<Document, FetchError> {
        let response = self.client.get(url).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        // Relative links are relative to where we ended up, not to `url`
        let page_url = response.url().clone();
        let html = response.text().await?;

        let mut links = extract_links(&html, page_url.as_str());
        if let Some(host) = &self.same_host {
            links.retain(|link| {
                Url::parse(link)
                    .map(|parsed| parsed.host_str() == Some(host.as_str()))
                    .unwrap_or(false)
            });
        }

        tracing::debug!(url, links = links.len(), "extracted links");

        Ok(Document { body: html, links })
    }
}

/// Extracts every http(s) link from an HTML page, in document order.
///
/// Relative links are resolved against `page_url` and fragments are removed,
/// so `/docs#intro` on `https://example.com/` becomes `https://example.com/docs`.
/// Duplicates are kept; deduplication is the crawler's job.
pub fn extract_links(html: &str, page_url: &str) -> Vec<String> {
    let mut links = Vec::new();

    let base = match Url::parse(page_url) {
        Ok(url) => url,
        Err(_) => return links,
    };

    let Ok(selector) = Selector::parse("a[href]") else {
        return links;
    };

    let document = Html::parse_document(html);

    for element in document.select(&selector) {
        if let Some(href) = element.value().attr("href") {
            if let Some(absolute) = resolve_link(&base, href) {
                links.push(absolute);
            }
        }
    }

    links
}

// Resolves a (possibly relative) href into an absolute http(s) URL
fn resolve_link(base: &Url, href: &str) -> Option<String> {
    // Skip anchors and special protocols
    if href.starts_with('#')
        || href.starts_with("mailto:")
        || href.starts_with("tel:")
        || href.starts_with("javascript:")
    {
        return None;
    }

    let mut url = base.join(href).ok()?;
    if url.scheme() != "http" && url.scheme() != "https" {
        return None;
    }
    url.set_fragment(None);

    Some(url.to_string())
}
