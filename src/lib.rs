pub mod cli;
pub mod config;
pub mod core;
pub mod fetch;
pub mod providers;
pub mod store;

use crate::cli::rates::RateArgs;
use crate::config::AppConfig;
use crate::core::cache::{FeedCache, FeedStore};
use crate::fetch::HttpFetcher;
use crate::providers::ecb::EcbProvider;
use crate::store::{FjallStore, MemoryStore};
use anyhow::Result;
use chrono::NaiveDate;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info, warn};

pub enum AppCommand {
    Latest,
    Historical { date: NaiveDate },
}

/// Query parameters supplied on the command line. Symbols fall back to the
/// configured default target set when absent.
pub struct QueryArgs {
    pub base: String,
    pub symbols: Option<Vec<String>>,
    pub amount: Option<f64>,
}

fn build_store(config: &AppConfig) -> Arc<dyn FeedStore> {
    let dir = config
        .cache
        .dir
        .clone()
        .map(Ok)
        .unwrap_or_else(AppConfig::default_cache_dir);

    match dir.and_then(|dir| FjallStore::new(&dir)) {
        Ok(store) => Arc::new(store),
        Err(e) => {
            warn!("Disk store unavailable, falling back to memory: {e}");
            Arc::new(MemoryStore::new())
        }
    }
}

pub async fn run_command(
    command: AppCommand,
    args: QueryArgs,
    config_path: Option<&str>,
) -> Result<()> {
    info!("ecbfx starting...");

    let config = match config_path {
        Some(path) => AppConfig::load_from_path(path)?,
        None => AppConfig::load()?,
    };
    debug!("Loaded config: {config:#?}");

    let store = build_store(&config);
    let fetcher = Arc::new(HttpFetcher::new()?);
    let cache = FeedCache::new(&config.provider.base_url, store, fetcher)
        .with_freshness(Duration::from_secs(config.cache.freshness_secs));
    let provider = EcbProvider::new(cache);

    let rate_args = RateArgs {
        base: args.base,
        targets: args.symbols.unwrap_or(config.targets),
        amount: args.amount,
    };

    match command {
        AppCommand::Latest => cli::rates::run_latest(&provider, &rate_args).await,
        AppCommand::Historical { date } => {
            cli::rates::run_historical(&provider, date, &rate_args).await
        }
    }
}
