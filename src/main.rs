// src/main.rs
// =============================================================================
// This is the entry point of our CLI application.
//
// What happens here:
// 1. Parse command-line arguments using clap
// 2. Set up logging (stderr)
// 3. Build the right Fetcher for the subcommand and start the crawl
// 4. Print every page the moment it arrives
// 5. Exit with proper code (0 = all fetched, 1 = some fetches failed, 2 = error)
// =============================================================================

mod cli;

use std::num::NonZeroUsize;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use cli::{Cli, Commands, OutputArgs};
use link_crawler::logging::init_logging;
use link_crawler::{start, CrawlOptions, Fetcher, HttpFetcher, Page, StaticFetcher, StatsSnapshot};

// How much of a page body to show in text mode
const SNIPPET_CHARS: usize = 60;

#[tokio::main]
async fn main() {
    let exit_code = match run().await {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            2
        }
    };

    std::process::exit(exit_code);
}

async fn run() -> Result<i32> {
    let cli = Cli::parse();
    init_logging(&cli.log_level)?;

    match cli.command {
        Commands::Site {
            url,
            same_domain,
            timeout,
            max_depth,
            output,
        } => {
            let mut fetcher = HttpFetcher::new(Duration::from_secs(timeout))
                .context("failed to create HTTP client")?;
            if same_domain {
                fetcher = fetcher.restrict_to_host_of(&url)?;
            }
            run_crawl(&url, max_depth, output, Arc::new(fetcher)).await
        }
        Commands::Graph {
            file,
            seed,
            max_depth,
            output,
        } => {
            let fetcher = StaticFetcher::load(&file)?;
            tracing::info!(pages = fetcher.len(), file = %file.display(), "loaded graph");
            run_crawl(&seed, max_depth, output, Arc::new(fetcher)).await
        }
        Commands::Demo { max_depth, output } => {
            run_crawl(
                "https://golang.org/",
                max_depth,
                output,
                Arc::new(StaticFetcher::golang_tour()),
            )
            .await
        }
    }
}

// Runs one crawl, printing pages as they stream in
async fn run_crawl(
    seed: &str,
    max_depth: usize,
    output: OutputArgs,
    fetcher: Arc<dyn Fetcher>,
) -> Result<i32> {
    let mut options = CrawlOptions::new(max_depth);
    if let Some(limit) = output.max_concurrent_fetches {
        options = options.with_fetch_limit(limit);
    }

    if !output.json {
        println!("🔍 Crawling {} (max depth {})", seed, max_depth);
    }

    let mut crawl = start(seed, options, fetcher);
    while let Some(page) = crawl.next_page().await {
        print_page(&page, output.json)?;
    }

    let stats = crawl.stats();
    print_summary(&stats, output.json)?;

    if stats.fetch_failures > 0 {
        Ok(1)
    } else {
        Ok(0)
    }
}

fn print_page(page: &Page, json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string(page)?);
    } else {
        println!("{}", found_line(page));
    }
    Ok(())
}

// Text-mode line: the body snippet, then the quoted URL
fn found_line(page: &Page) -> String {
    format!("found: {} {:?}", snippet(&page.body), page.url)
}

fn print_summary(stats: &StatsSnapshot, json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string(&serde_json::json!({ "stats": stats }))?);
        return Ok(());
    }

    println!();
    println!("📊 Summary:");
    println!("   ✅ Fetched: {}", stats.pages_fetched);
    println!("   ❌ Failed: {}", stats.fetch_failures);
    println!("   🔁 Already visited: {}", stats.duplicates);
    println!("   📏 Beyond max depth: {}", stats.depth_exhausted);
    println!("   🔗 Links discovered: {}", stats.links_discovered);
    Ok(())
}

// First SNIPPET_CHARS characters of a body, with an ellipsis if cut
fn snippet(body: &str) -> String {
    let mut chars = body.chars();
    let mut out: String = chars.by_ref().take(SNIPPET_CHARS).collect();
    if chars.next().is_some() {
        out.push('…');
    }
    out
}
