//! Route Rescue - end-of-shift rescue calculator for delivery routes
//!
//! Reads an itinerary export, projects each driver's finish time against
//! the shift deadline, and flags routes that need rescue.

mod cli;
mod config;
mod defaults;
mod report;
mod services;
mod types;

use anyhow::Result;
use chrono::Local;
use clap::Parser;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use cli::{AnalyzeArgs, Cli, Command};
use services::rescue_plan::RescuePlanClient;
use services::{calculator, ingest};
use types::CalculationResult;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "warn,route_rescue=info".into()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();
    match cli.command {
        Command::Analyze(args) => run(args, false).await,
        Command::Plan(args) => run(args, true).await,
    }
}

async fn run(args: AnalyzeArgs, with_plan: bool) -> Result<()> {
    let rows = ingest::load_rows(&args.file, args.delimiter as u8)?;
    info!("Loaded {} rows from {}", rows.len(), args.file.display());

    // The only ambient input: read the clock exactly once.
    let now = Local::now().naive_local();
    let result = calculator::calculate_driver_stats(&rows, &args.to_params(), now);
    info!(
        "Computed {} driver records, {} needing rescue",
        result.summary.total_drivers, result.summary.total_rescue_needed
    );

    print!("{}", report::render_report(&result));

    if with_plan {
        println!("\n=== Rescue plan ===");
        println!("{}", fetch_plan(&result).await);
    }

    Ok(())
}

/// Fetch the AI rescue plan, degrading to an advisory string on any
/// failure. The computed results are never affected.
async fn fetch_plan(result: &CalculationResult) -> String {
    let config = match config::Config::from_env() {
        Ok(config) => config,
        Err(e) => return format!("AI plan unavailable: {:#}", e),
    };

    let Some(api_key) = config.gemini_api_key else {
        return "AI plan unavailable: GEMINI_API_KEY is not set.".to_string();
    };

    let behind: Vec<_> = result
        .drivers
        .iter()
        .filter(|d| d.needs_rescue())
        .cloned()
        .collect();
    let on_pace: Vec<_> = result
        .drivers
        .iter()
        .filter(|d| !d.needs_rescue())
        .cloned()
        .collect();

    let client = RescuePlanClient::new(&config.gemini_api_url, &api_key);
    match client
        .generate_plan(&behind, &on_pace, &result.summary, result.meta.hours_remaining)
        .await
    {
        Ok(plan) => plan,
        Err(e) => {
            warn!("Rescue plan request failed: {:#}", e);
            format!("AI plan unavailable: {:#}", e)
        }
    }
}
