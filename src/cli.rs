//! CLI argument parsing for the route-rescue binary.

use std::path::PathBuf;

use chrono::NaiveTime;
use clap::{Args, Parser, Subcommand};

use crate::defaults;
use crate::types::CalculationParams;

#[derive(Parser)]
#[command(name = "route-rescue", about = "End-of-shift rescue calculator for delivery routes")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Analyze an itinerary file and print the rescue report
    Analyze(AnalyzeArgs),
    /// Analyze and additionally request an AI rescue plan
    Plan(AnalyzeArgs),
}

#[derive(Args)]
pub struct AnalyzeArgs {
    /// Itinerary export (.csv)
    #[arg(long)]
    pub file: PathBuf,

    /// Shift end time (HH:MM)
    #[arg(long, value_parser = parse_shift_end, default_value = "20:05")]
    pub end_time: NaiveTime,

    /// Default pace in stops per hour
    #[arg(long, default_value_t = defaults::DEFAULT_PACE)]
    pub pace: f64,

    /// Buffer before shift end, in minutes
    #[arg(long, default_value_t = defaults::DEFAULT_BUFFER_MINUTES)]
    pub buffer: u32,

    /// Use per-driver pace values from the file when present
    #[arg(long)]
    pub individual_pace: bool,

    /// Disable the late-shift pace penalty
    #[arg(long)]
    pub no_smart: bool,

    /// Cell delimiter of the itinerary file
    #[arg(long, default_value_t = ',')]
    pub delimiter: char,
}

impl AnalyzeArgs {
    pub fn to_params(&self) -> CalculationParams {
        CalculationParams {
            shift_end_time: self.end_time,
            default_pace: self.pace,
            buffer_minutes: self.buffer,
            use_individual_pace: self.individual_pace,
            smart_adjustment: !self.no_smart,
        }
    }
}

fn parse_shift_end(s: &str) -> Result<NaiveTime, String> {
    NaiveTime::parse_from_str(s, "%H:%M")
        .map_err(|e| format!("invalid shift end time '{}': {}", s, e))
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[test]
    fn test_cli_analyze_defaults() {
        let cli = Cli::parse_from(["route-rescue", "analyze", "--file", "itinerary.csv"]);
        let Command::Analyze(args) = cli.command else {
            panic!("expected analyze command");
        };

        let params = args.to_params();
        assert_eq!(params.shift_end_time, defaults::default_shift_end());
        assert_eq!(params.default_pace, defaults::DEFAULT_PACE);
        assert_eq!(params.buffer_minutes, defaults::DEFAULT_BUFFER_MINUTES);
        assert!(!params.use_individual_pace);
        assert!(params.smart_adjustment);
        assert_eq!(args.delimiter, ',');
    }

    #[test]
    fn test_cli_plan_with_overrides() {
        let cli = Cli::parse_from([
            "route-rescue",
            "plan",
            "--file",
            "day.csv",
            "--end-time",
            "18:30",
            "--pace",
            "25",
            "--buffer",
            "15",
            "--individual-pace",
            "--no-smart",
            "--delimiter",
            ";",
        ]);
        let Command::Plan(args) = cli.command else {
            panic!("expected plan command");
        };

        let params = args.to_params();
        assert_eq!(params.shift_end_time, NaiveTime::from_hms_opt(18, 30, 0).unwrap());
        assert_eq!(params.default_pace, 25.0);
        assert_eq!(params.buffer_minutes, 15);
        assert!(params.use_individual_pace);
        assert!(!params.smart_adjustment);
        assert_eq!(args.delimiter, ';');
    }

    #[test]
    fn test_cli_rejects_malformed_end_time() {
        let parsed = Cli::try_parse_from([
            "route-rescue",
            "analyze",
            "--file",
            "day.csv",
            "--end-time",
            "25:99",
        ]);
        assert!(parsed.is_err());
    }
}
