// src/cli.rs
// =============================================================================
// This file defines our command-line interface using the `clap` crate.
//
// We use the "derive" API which lets us define the CLI structure using
// Rust structs and attributes (the #[...] things).
//
// Subcommands:
// - site:  crawl a real website over HTTP
// - graph: crawl a canned graph stored in a JSON file
// - demo:  crawl the built-in Go documentation graph
// =============================================================================

use std::num::NonZeroUsize;
use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(
    name = "link-crawler",
    version,
    about = "Concurrently crawl a link graph up to a maximum depth",
    long_about = "link-crawler starts from a seed URL, follows every link it finds up to \
                  --max-depth hops, fetches each page at most once and prints pages as \
                  soon as they are found."
)]
pub struct Cli {
    /// Log level used when RUST_LOG is not set (error, warn, info, debug, trace)
    #[arg(long, global = true, default_value = "info")]
    pub log_level: String,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Crawl a website over HTTP
    ///
    /// Example: link-crawler site https://example.com --max-depth 2 --same-domain
    Site {
        /// Seed URL (e.g., https://example.com)
        url: String,

        /// Only follow links on the seed's host (domain or IP address)
        #[arg(long)]
        same_domain: bool,

        /// Per-request timeout in seconds
        #[arg(long, default_value_t = 10)]
        timeout: u64,

        /// Depth 1 = just the seed page, depth 2 = seed + pages it links to, etc.
        #[arg(long, default_value_t = 2)]
        max_depth: usize,

        #[command(flatten)]
        output: OutputArgs,
    },

    /// Crawl a canned link graph loaded from a JSON file
    ///
    /// Example: link-crawler graph site.json https://a.example/ --max-depth 3
    Graph {
        /// JSON file mapping each URL to {"body": ..., "links": [...]}
        file: PathBuf,

        /// Seed URL (must be a key in the graph to produce any output)
        seed: String,

        /// Maximum crawl depth
        #[arg(long, default_value_t = 4)]
        max_depth: usize,

        #[command(flatten)]
        output: OutputArgs,
    },

    /// Crawl the built-in Go documentation graph
    Demo {
        /// Maximum crawl depth
        #[arg(long, default_value_t = 4)]
        max_depth: usize,

        #[command(flatten)]
        output: OutputArgs,
    },
}

// Flags shared by every subcommand
#[derive(Args, Debug, Clone, Copy)]
pub struct OutputArgs {
    /// Print one JSON object per page (plus a final stats object)
    #[arg(long)]
    pub json: bool,

    /// Cap on simultaneous fetches, at least 1 (default: unbounded)
    #[arg(long)]
    pub max_concurrent_fetches: Option<NonZeroUsize>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_site_defaults() {
        let cli = Cli::parse_from(["link-crawler", "site", "https://example.com"]);
        assert_eq!(cli.log_level, "info");
        match cli.command {
            Commands::Site {
                url,
                same_domain,
                timeout,
                max_depth,
                output,
            } => {
                assert_eq!(url, "https://example.com");
                assert!(!same_domain);
                assert_eq!(timeout, 10);
                assert_eq!(max_depth, 2);
                assert!(!output.json);
                assert_eq!(output.max_concurrent_fetches, None);
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_parse_graph_with_flags() {
        let cli = Cli::parse_from([
            "link-crawler",
            "graph",
            "graph.json",
            "A",
            "--max-depth",
            "1",
            "--json",
            "--max-concurrent-fetches",
            "8",
            "--log-level",
            "debug",
        ]);
        assert_eq!(cli.log_level, "debug");
        match cli.command {
            Commands::Graph {
                file,
                seed,
                max_depth,
                output,
            } => {
                assert_eq!(file, PathBuf::from("graph.json"));
                assert_eq!(seed, "A");
                assert_eq!(max_depth, 1);
                assert!(output.json);
                assert_eq!(output.max_concurrent_fetches, NonZeroUsize::new(8));
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_zero_fetch_limit_is_rejected() {
        let result = Cli::try_parse_from([
            "link-crawler",
            "demo",
            "--max-concurrent-fetches",
            "0",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn test_missing_subcommand_is_an_error() {
        assert!(Cli::try_parse_from(["link-crawler"]).is_err());
    }
}
