//! Crowdsight CLI — Command-line interface for stream analysis and reports.
//!
//! Usage:
//!   crowdsight analyze <STREAM>    Fuse a recorded observation stream into a report
//!   crowdsight info <REPORT>       Show per-person statistics from a saved report

use std::path::PathBuf;

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(
    name = "crowdsight",
    about = "Per-person identity, emotion, and activity statistics from video",
    version,
    author
)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Fuse a recorded observation stream into an aggregate report
    Analyze {
        /// Path to the observation stream (JSONL)
        stream: PathBuf,

        /// Report output path (default: <reports_dir>/report.json)
        #[arg(short, long)]
        report: Option<PathBuf>,

        /// Run perception on one of every N frames (default from config)
        #[arg(long)]
        frame_skip: Option<u32>,

        /// Knee angle below which both legs mean sitting (degrees)
        #[arg(long, default_value = "130.0")]
        sitting_threshold: f64,

        /// Knee angle above which both legs mean standing (degrees)
        #[arg(long, default_value = "160.0")]
        standing_threshold: f64,
    },

    /// Show per-person statistics from a saved report
    Info {
        /// Path to the report JSON
        report: PathBuf,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let log_level = if cli.verbose { "debug" } else { "info" };
    crowdsight_common::logging::init_with_level(log_level);

    match cli.command {
        Commands::Analyze {
            stream,
            report,
            frame_skip,
            sitting_threshold,
            standing_threshold,
        } => commands::analyze::run(
            stream,
            report,
            frame_skip,
            sitting_threshold,
            standing_threshold,
        ),
        Commands::Info { report } => commands::info::run(report),
    }
}
