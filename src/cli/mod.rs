//! CLI interface for yieldscope
//!
//! Provides subcommands for:
//! - `score`: Protocol risk scores with factor breakdown
//! - `yield`: Fee-adjusted yield for a single position
//! - `classify`: Score, price and bucket a batch of opportunities
//! - `inflow`: Likelihood of continued capital inflow
//! - `config`: Show effective configuration

mod classify;
mod inflow;
mod score;
mod yield_calc;

pub use classify::{load_batch, ClassifyArgs};
pub use inflow::InflowArgs;
pub use score::ScoreArgs;
pub use yield_calc::YieldArgs;

use clap::{Parser, Subcommand, ValueEnum};
use serde::Serialize;

#[derive(Parser, Debug)]
#[command(name = "yieldscope")]
#[command(about = "Risk scoring, fee-adjusted yield and risk/reward quadrants for DeFi opportunities")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Path to configuration file
    #[arg(short, long, default_value = "config.toml")]
    pub config: String,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Show protocol risk scores
    Score(ScoreArgs),
    /// Calculate fee-adjusted yield for a position
    Yield(YieldArgs),
    /// Classify a batch of opportunities into risk/reward quadrants
    Classify(ClassifyArgs),
    /// Estimate the likelihood of continued capital inflow
    Inflow(InflowArgs),
    /// Show effective configuration
    Config,
}

/// Output format for computing commands
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Table,
    Json,
}

pub(crate) fn print_json<T: Serialize>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
