//! Debut Replay: runs a candle history through the plugin lifecycle.
//!
//! Loads configuration, registers the built-in plugins and drives them the
//! way a strategy engine would: `onInit`, `onStart`, then `onTick` →
//! `onCandle` → `onAfterCandle` per candle, and finally `onDispose`.

use std::path::PathBuf;
use std::sync::Arc;

use clap::Parser;
use parking_lot::RwLock;
use tracing_subscriber::{EnvFilter, fmt};

use debut_core::config::{AppConfig, LoggingConfig};
use debut_core::error::{AppError, ErrorKind};
use debut_core::traits::DebutCore;
use debut_core::types::{Candle, ExecutedOrder};
use debut_plugin::{AsyncHook, Plugin, PluginDriver, SkipHook, SyncHook};
use plugin_stats::{StatsApi, StatsPlugin};
use plugin_tick_filter::TickFilterPlugin;

/// Replay a JSON candle history through the Debut plugin driver.
#[derive(Debug, Parser)]
#[command(name = "debut-replay", version)]
struct Args {
    /// JSON file holding an array of candles.
    candles: PathBuf,

    /// Instrument ticker reported to plugins.
    #[arg(long, default_value = "BTCUSDT")]
    ticker: String,

    /// Configuration environment overlay (`config/{env}.toml`).
    #[arg(long, default_value = "development")]
    env: String,

    /// Configuration directory.
    #[arg(long, default_value = "config")]
    config_dir: String,

    /// Ticks with volume at or below this are filtered out.
    #[arg(long, default_value_t = 0.0)]
    min_volume: f64,
}

/// Strategy stand-in that only tracks the last processed candle.
#[derive(Debug)]
struct ReplayCore {
    ticker: String,
    current: RwLock<Option<Candle>>,
}

impl ReplayCore {
    fn new(ticker: String) -> Self {
        Self {
            ticker,
            current: RwLock::new(None),
        }
    }

    fn set_current(&self, candle: Candle) {
        *self.current.write() = Some(candle);
    }
}

impl DebutCore for ReplayCore {
    fn ticker(&self) -> &str {
        &self.ticker
    }

    fn orders(&self) -> Vec<ExecutedOrder> {
        Vec::new()
    }

    fn current_candle(&self) -> Option<Candle> {
        *self.current.read()
    }

    fn is_sandbox(&self) -> bool {
        true
    }
}

#[tokio::main]
async fn main() {
    let args = Args::parse();

    let config = match AppConfig::load_from(&args.config_dir, &args.env) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Failed to load configuration: {}", e);
            std::process::exit(1);
        }
    };

    init_logging(&config.logging);

    if let Err(e) = run(args, config).await {
        tracing::error!("Replay failed: {}", e);
        std::process::exit(1);
    }
}

/// Initialize tracing/logging
fn init_logging(config: &LoggingConfig) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.level));

    match config.format.as_str() {
        "json" => {
            fmt()
                .json()
                .with_env_filter(filter)
                .with_target(true)
                .with_thread_ids(true)
                .init();
        }
        _ => {
            fmt()
                .pretty()
                .with_env_filter(filter)
                .with_target(true)
                .init();
        }
    }
}

async fn run(args: Args, config: AppConfig) -> Result<(), AppError> {
    tracing::info!(
        version = env!("CARGO_PKG_VERSION"),
        ticker = %args.ticker,
        "Starting Debut replay"
    );

    let raw = tokio::fs::read_to_string(&args.candles).await.map_err(|e| {
        AppError::with_source(
            ErrorKind::Io,
            format!("Failed to read {}", args.candles.display()),
            e,
        )
    })?;
    let candles: Vec<Candle> = serde_json::from_str(&raw)?;
    tracing::info!(count = candles.len(), "Candles loaded");

    let core = Arc::new(ReplayCore::new(args.ticker));
    let driver = PluginDriver::with_config(Arc::clone(&core) as Arc<dyn DebutCore>, config.plugins);

    driver.register(vec![
        Arc::new(StatsPlugin::new()) as Arc<dyn Plugin>,
        Arc::new(TickFilterPlugin::new(args.min_volume)) as Arc<dyn Plugin>,
    ])?;

    driver.sync_reduce(SyncHook::OnInit)?;
    driver.async_reduce(AsyncHook::OnStart).await?;

    let mut processed = 0_usize;
    let mut skipped = 0_usize;

    for candle in &candles {
        let outcome = driver.async_skip_reduce(SkipHook::OnTick(candle)).await?;
        if outcome.is_skip() {
            skipped += 1;
            tracing::debug!(
                time = candle.time,
                by = outcome.skipped_by.as_deref().unwrap_or(""),
                "Tick skipped"
            );
            continue;
        }

        core.set_current(*candle);
        driver.async_reduce(AsyncHook::OnCandle(candle)).await?;
        driver.async_reduce(AsyncHook::OnAfterCandle(candle)).await?;
        processed += 1;
    }

    // Disposing clears the driver, keep the published APIs around.
    let public_api = driver.get_public_api();
    driver.async_reduce(AsyncHook::OnDispose).await?;

    tracing::info!(processed, skipped, "Replay finished");

    match public_api.get::<StatsApi>(StatsPlugin::NAME) {
        Some(stats) => println!("{}", serde_json::to_string_pretty(&stats.snapshot())?),
        None => tracing::warn!("Stats plugin disabled, no summary"),
    }

    Ok(())
}
