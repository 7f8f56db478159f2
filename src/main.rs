use clap::Parser;
use yieldscope::cli::{Cli, Commands};
use yieldscope::config::Config;

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Load configuration
    let config = Config::load(&cli.config).unwrap_or_else(|e| {
        eprintln!("Warning: Could not load config from {}: {}", cli.config, e);
        eprintln!("Using default configuration");
        Config::default()
    });

    // Initialize telemetry
    yieldscope::telemetry::init_telemetry(&config.telemetry)?;

    match cli.command {
        Commands::Score(args) => args.execute(&config)?,
        Commands::Yield(args) => args.execute(&config)?,
        Commands::Classify(args) => args.execute(&config)?,
        Commands::Inflow(args) => args.execute()?,
        Commands::Config => {
            let a = &config.analytics;
            println!("Current configuration:");
            println!(
                "  Position: ${} for {} days",
                a.default_investment_usd, a.default_holding_period_days
            );
            println!(
                "  Quadrants: basis={:?}, threshold={}",
                a.yield_basis, a.quadrant_threshold
            );
            println!("  Warn on fallback: {}", a.warn_on_fallback);
            println!(
                "  Risk table: {}",
                config
                    .reference
                    .risk_table
                    .as_ref()
                    .map_or("built-in".to_string(), |p| p.display().to_string())
            );
            println!(
                "  Fee schedule: {}",
                config
                    .reference
                    .fee_schedule
                    .as_ref()
                    .map_or("built-in".to_string(), |p| p.display().to_string())
            );
            println!(
                "  Logging: {} ({:?})",
                config.telemetry.log_level, config.telemetry.log_format
            );
        }
    }

    Ok(())
}
