//! Screener CLI binary.
//!
//! Provides the command-line interface for the stock screener.

mod cmd;
mod config;
mod data;

use anyhow::Result;
use clap::{Parser, Subcommand};
use screener_traits::Phase;
use std::path::PathBuf;
use std::process;
use tracing_subscriber::EnvFilter;

use crate::cmd::{score::ScoreArgs, screen::ScreenArgs};
use crate::config::ScreenerConfig;

/// Crates whose debug output is connection noise.
const NOISY_MODULES: &[&str] = &["hyper", "hyper_util", "reqwest", "rustls", "h2"];

#[derive(Parser)]
#[command(name = "screener")]
#[command(about = "Fundamentals-based stock screener", long_about = None)]
#[command(version)]
struct Cli {
    /// Configuration file (TOML)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Log at debug level
    #[arg(short = 'v', long = "debug", global = true)]
    debug: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List the built-in scoring presets
    Presets {
        /// Show each preset's criteria
        #[arg(long)]
        verbose: bool,
    },

    /// Score companies and log the scores
    Score {
        /// Ticker symbols (defaults to the configured list)
        symbols: Vec<String>,

        /// Scoring preset name or alias
        #[arg(short, long)]
        preset: Option<String>,

        /// Date to log the scores under (YYYY-MM-DD)
        #[arg(short, long)]
        date: Option<String>,

        /// Do not write the score history
        #[arg(long)]
        no_log: bool,

        /// Print the scored records as JSON
        #[arg(long)]
        json: bool,
    },

    /// Screen the configured tickers
    Screen {
        /// Minimum score, inclusive
        #[arg(short, long)]
        min_score: Option<f64>,

        /// Keep only these phases (growth, stable, value)
        #[arg(long = "phase")]
        phases: Vec<Phase>,

        /// Keep only these sectors
        #[arg(long = "sector")]
        sectors: Vec<String>,

        /// Keep only these exchange codes (USA, PR, L, ...)
        #[arg(long = "exchange")]
        exchanges: Vec<String>,

        /// Scoring preset name or alias
        #[arg(short, long)]
        preset: Option<String>,

        /// Do not write the score history
        #[arg(long)]
        no_log: bool,
    },

    /// Show one ticker's details and score breakdown
    Show {
        /// Ticker symbol
        ticker: String,

        /// Scoring preset name or alias
        #[arg(short, long)]
        preset: Option<String>,
    },

    /// Show the logged scores for a ticker
    History {
        /// Ticker symbol
        ticker: String,
    },
}

#[tokio::main]
async fn main() {
    // A missing .env file is fine
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();
    init_tracing(cli.debug);

    if let Err(e) = run(cli).await {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}

fn init_tracing(debug: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        let mut directives = String::from(if debug { "debug" } else { "warn" });
        for module in NOISY_MODULES {
            directives.push_str(&format!(",{module}=warn"));
        }
        EnvFilter::new(directives)
    });

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

async fn run(cli: Cli) -> Result<()> {
    let config = ScreenerConfig::load(cli.config.as_deref())?;

    match cli.command {
        Commands::Presets { verbose } => {
            cmd::presets::list_presets(verbose)?;
        }
        Commands::Score {
            symbols,
            preset,
            date,
            no_log,
            json,
        } => {
            let args = ScoreArgs {
                symbols,
                preset,
                date,
                no_log,
                json,
            };
            cmd::score::show_scores(&config, args).await?;
        }
        Commands::Screen {
            min_score,
            phases,
            sectors,
            exchanges,
            preset,
            no_log,
        } => {
            let args = ScreenArgs {
                min_score,
                phases,
                sectors,
                exchanges,
                preset,
                no_log,
            };
            cmd::screen::run_screen(&config, args).await?;
        }
        Commands::Show { ticker, preset } => {
            cmd::show::show_ticker(&config, &ticker, preset.as_deref()).await?;
        }
        Commands::History { ticker } => {
            cmd::history::show_history(&config, &ticker)?;
        }
    }

    Ok(())
}
