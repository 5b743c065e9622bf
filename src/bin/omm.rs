//! omm CLI - build an OpenStreetMap file for an astronomical body
//!
//! Fetches Wikidata features located on the body (cached on disk), merges
//! any extra hand-made node files and writes OSM XML.

// Exclude from coverage - CLI binary tested via integration tests
#![cfg_attr(tarpaulin, ignore)]

use anyhow::{Context, Result};
use clap::Parser;
use omm::core::Item;
use omm::{build_map, EntityRef, FileCache, MapConfig, WikidataClient};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Open Moon Map: OpenStreetMap data from Wikidata for the Moon and beyond.
#[derive(Parser, Debug)]
#[command(name = "omm")]
#[command(version = omm::VERSION)]
#[command(about = "Build an OSM XML map of an astronomical body from Wikidata")]
#[command(after_help = "EXAMPLES:
  # Map the Moon
  omm -b 405 -o moon.osm

  # Map Mars with hand-made landing sites
  omm -b 111 -o mars.osm -e landers.json

Responses are cached in ./cache; delete a file there to refetch it.
")]
struct Cli {
    /// Astronomical body Wikidata id without Q (e.g. 405 for Moon)
    #[arg(short = 'b', long = "body", value_name = "INTEGER", default_value_t = Item::Moon.id())]
    body: u64,

    /// Output OSM XML file path
    #[arg(short = 'o', long = "output", value_name = "PATH")]
    output: PathBuf,

    /// Extra JSON data with node descriptions
    #[arg(short = 'e', long = "extra", value_name = "PATH", num_args = 0..)]
    extra: Vec<PathBuf>,

    /// Cache directory for query responses
    #[arg(long = "cache", value_name = "DIR")]
    cache: Option<PathBuf>,

    /// Config file path (JSON)
    #[arg(short = 'c', long = "config", value_name = "FILE")]
    config: Option<PathBuf>,

    /// Maximum absolute latitude of accepted features
    #[arg(long = "max-latitude", value_name = "DEGREES")]
    max_latitude: Option<f64>,

    /// Label language for names
    #[arg(long = "language", value_name = "CODE")]
    language: Option<String>,

    /// Debug logging (overridden by RUST_LOG)
    #[arg(short = 'v', long = "verbose")]
    verbose: bool,
}

impl Cli {
    /// File config with command-line overrides applied
    fn map_config(&self) -> Result<MapConfig> {
        let mut config = match &self.config {
            Some(path) => MapConfig::load(path)
                .with_context(|| format!("loading config {}", path.display()))?,
            None => MapConfig::default(),
        };
        if let Some(cache) = &self.cache {
            config.cache_dir = cache.clone();
        }
        if let Some(max_latitude) = self.max_latitude {
            config.max_latitude = max_latitude;
        }
        if let Some(language) = &self.language {
            config.language = language.clone();
        }
        config.validate()?;
        Ok(config)
    }
}

fn init_logging(verbose: bool) {
    let default_filter = if verbose { "omm=debug,info" } else { "info" };
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| default_filter.into()))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn run(cli: Cli) -> Result<()> {
    let config = cli.map_config()?;
    if cli.body == 0 {
        anyhow::bail!("body id must be a positive integer");
    }
    let body = EntityRef(cli.body);

    let cache = FileCache::new(&config.cache_dir);
    let client = WikidataClient::new(&config).context("creating HTTP client")?;

    let stats = build_map(&cache, &client, body, &cli.output, &cli.extra, &config)
        .with_context(|| format!("building map of {}", body))?;

    tracing::info!(nodes = stats.total_nodes(), "Done");
    Ok(())
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    if let Err(e) = run(cli) {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}
