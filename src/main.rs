//! smc-analyst - candle analysis from the command line
//!
//! Fetches candles from Binance (or a local CSV file) and prints a
//! structure/momentum report.
//!
//! # Usage
//! ```sh
//! smc-analyst analyze ETHUSDT --timeframe 4h
//! smc-analyst ict --csv data/btc_1h.csv
//! RUST_LOG=debug smc-analyst multi SOLUSDT
//! ```
//!
//! # Environment Variables
//! See [`smc_analyst::config`]; a `.env` file in the working directory is
//! loaded first.

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use smc_analyst::application::analysis::{Confluence, MarketAnalyst};
use smc_analyst::config::Config;
use smc_analyst::domain::market::Timeframe;
use smc_analyst::domain::market::symbol::normalize_symbol;
use smc_analyst::domain::ports::CandleSource;
use smc_analyst::infrastructure::{BinanceMarketDataService, CsvCandleSource};
use smc_analyst::interfaces::report_view;
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;
use tracing::{Level, error, info};
use tracing_subscriber::prelude::*;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Full report: trend, momentum, levels and every signal
    Analyze(TargetArgs),
    /// Market-structure shifts and order blocks
    Smc(TargetArgs),
    /// Fair value gaps and breaks of structure
    Ict(TargetArgs),
    /// Support, resistance and liquidity levels
    Levels(TargetArgs),
    /// Trend confluence across 1h, 4h and 1d
    Multi(MultiArgs),
}

#[derive(Args)]
struct SourceArgs {
    /// Number of candles to fetch (defaults to CANDLE_LIMIT)
    #[arg(short, long)]
    limit: Option<usize>,

    /// Analyse a local CSV file (timestamp,open,high,low,close,volume) instead of Binance
    #[arg(long)]
    csv: Option<PathBuf>,
}

#[derive(Args)]
struct TargetArgs {
    /// Trading pair, e.g. ETHUSDT (defaults to DEFAULT_SYMBOL)
    symbol: Option<String>,

    /// Candle interval: 1m, 5m, 15m, 1h, 4h, 1d
    #[arg(short, long)]
    timeframe: Option<Timeframe>,

    #[command(flatten)]
    source: SourceArgs,
}

#[derive(Args)]
struct MultiArgs {
    symbol: Option<String>,

    #[command(flatten)]
    source: SourceArgs,
}

#[tokio::main]
async fn main() -> ExitCode {
    dotenvy::dotenv().ok();

    // Logs go to stderr so the report on stdout stays clean
    let stderr_layer = tracing_subscriber::fmt::layer()
        .with_target(false)
        .with_writer(std::io::stderr);

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::from_default_env().add_directive(Level::INFO.into()))
        .with(stderr_layer)
        .init();

    let cli = Cli::parse();

    match run(cli).await {
        Ok(report) => {
            println!("{}", report);
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!("{:#}", e);
            eprintln!("Error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> Result<String> {
    let config = Config::from_env().context("Failed to load configuration")?;
    let market_data = &config.market_data;

    let (symbol, source_args) = match &cli.command {
        Command::Analyze(args)
        | Command::Smc(args)
        | Command::Ict(args)
        | Command::Levels(args) => (args.symbol.as_deref(), &args.source),
        Command::Multi(args) => (args.symbol.as_deref(), &args.source),
    };
    let symbol = normalize_symbol(symbol, &market_data.default_symbol);

    let source: Arc<dyn CandleSource> = match &source_args.csv {
        Some(path) => Arc::new(CsvCandleSource::from_path(path)),
        None => Arc::new(BinanceMarketDataService::from_config(market_data)),
    };
    let limit = source_args.limit.unwrap_or(market_data.candle_limit);

    info!(
        "smc-analyst {}: {} via {} ({} candles)",
        env!("CARGO_PKG_VERSION"),
        symbol,
        source.name(),
        limit
    );

    let analyst = MarketAnalyst::new(source, config.analysis.clone(), limit);
    let timeframe_of =
        |args: &TargetArgs| args.timeframe.unwrap_or(market_data.default_timeframe);

    let report = match &cli.command {
        Command::Analyze(args) => {
            report_view::render_analysis(&analyst.analyze(&symbol, timeframe_of(args)).await?)
        }
        Command::Smc(args) => {
            report_view::render_smc(&analyst.analyze(&symbol, timeframe_of(args)).await?)
        }
        Command::Ict(args) => {
            report_view::render_ict(&analyst.analyze(&symbol, timeframe_of(args)).await?)
        }
        Command::Levels(args) => {
            report_view::render_levels(&analyst.analyze(&symbol, timeframe_of(args)).await?)
        }
        Command::Multi(_) => {
            let report = analyst.analyze_multi(&symbol).await;
            if report.confluence == Confluence::Unavailable {
                anyhow::bail!(
                    "Multi-timeframe analysis failed for {}:\n{}",
                    symbol,
                    report_view::render_multi(&report)
                );
            }
            report_view::render_multi(&report)
        }
    };

    Ok(report)
}
