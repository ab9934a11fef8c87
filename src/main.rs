//! CLI entry point for the match event analyzer.
//!
//! Provides subcommands for printing a full match report, exporting processed
//! data and summary statistics, and printing derived team metrics.

use anyhow::{Result, bail};
use clap::{Parser, Subcommand};
use match_analyzer::{
    aggregate::{MatchSummary, aggregate},
    fetch::load_source,
    metrics::{all_team_metrics, team_metrics},
    output::{export_csv, write_report_file, write_summary_json},
    parser::parse_events,
    report::write_report,
};
use std::ffi::OsStr;
use std::path::Path;
use tracing::info;
use tracing_subscriber::{
    EnvFilter, Layer,
    fmt::{self, format::FmtSpan},
    layer::SubscriberExt,
    util::SubscriberInitExt,
};

#[derive(Parser)]
#[command(name = "match_analyzer")]
#[command(about = "A tool to analyze football match event logs", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print a full match report from an event log file or URL
    Analyze {
        /// Path to file or URL to fetch
        #[arg(value_name = "FILE_OR_URL")]
        source: String,

        /// Number of entries in the top-event-type and top-player listings
        #[arg(short, long, default_value_t = 20)]
        top: usize,

        /// Optional: also write the report to a text file
        #[arg(short, long)]
        report: Option<String>,
    },
    /// Export processed event data and summary statistics
    Export {
        /// Path to file or URL to fetch
        #[arg(value_name = "FILE_OR_URL")]
        source: String,

        /// Directory to write processed_match_data.csv and summary_statistics.json
        #[arg(short, long, default_value = "output")]
        output_dir: String,
    },
    /// Print derived per-team metrics as JSON
    Metrics {
        /// Path to file or URL to fetch
        #[arg(value_name = "FILE_OR_URL")]
        source: String,

        /// Only show metrics for this team
        #[arg(long)]
        team: Option<String>,
    },
}

fn main() -> Result<()> {
    dotenvy::dotenv().ok(); // Load .env file

    // Logging setup: colored stderr + JSON rolling log file
    let log_file_path =
        std::env::var("LOG_FILE_PATH").unwrap_or_else(|_| "logs/match_analyzer.log".to_string());
    let log_dir = Path::new(&log_file_path)
        .parent()
        .unwrap_or(Path::new("logs"));
    let log_file_name = Path::new(&log_file_path)
        .file_name()
        .unwrap_or(OsStr::new("match_analyzer.log"));

    let file_appender = tracing_appender::rolling::daily(log_dir, log_file_name);
    let (non_blocking_file, _file_guard) = tracing_appender::non_blocking(file_appender);

    let stderr_layer = fmt::layer()
        .with_target(true)
        .with_span_events(FmtSpan::CLOSE)
        .with_ansi(true)
        .with_writer(std::io::stderr)
        .with_filter(EnvFilter::from_env("RUST_LOG").add_directive("info".parse().unwrap()));

    let json_layer = fmt::layer()
        .json()
        .with_current_span(true)
        .with_span_list(true)
        .with_writer(non_blocking_file)
        .with_filter(EnvFilter::from_env("RUST_LOG_JSON").add_directive("debug".parse().unwrap()));

    tracing_subscriber::registry()
        .with(stderr_layer)
        .with(json_layer)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Analyze {
            source,
            top,
            report,
        } => {
            let summary = load_and_aggregate(&source)?;

            let stdout = std::io::stdout();
            write_report(&mut stdout.lock(), &summary, top)?;

            if let Some(report_path) = report {
                write_report_file(Path::new(&report_path), &summary, top)?;
            }
        }
        Commands::Export { source, output_dir } => {
            let bytes = load_source(&source)?;
            let events = parse_events(&bytes)?;
            info!(events = events.len(), "Event document parsed");

            let summary = aggregate(&events);

            std::fs::create_dir_all(&output_dir)?;
            let dir = Path::new(&output_dir);
            export_csv(&dir.join("processed_match_data.csv"), &events)?;
            write_summary_json(&dir.join("summary_statistics.json"), &summary)?;

            info!(output_dir = %output_dir, "Export complete");
        }
        Commands::Metrics { source, team } => {
            let summary = load_and_aggregate(&source)?;

            match team {
                Some(team) => {
                    if !summary.team_event_counts.contains_key(&team) {
                        bail!("team '{team}' does not appear in the event log");
                    }
                    let metrics = team_metrics(&summary, &team);
                    println!("{}", serde_json::to_string_pretty(&metrics)?);
                }
                None => {
                    let metrics = all_team_metrics(&summary);
                    println!("{}", serde_json::to_string_pretty(&metrics)?);
                }
            }
        }
    }

    Ok(())
}

/// Loads a source, parses the event document, and runs the aggregation pass.
#[tracing::instrument(fields(source = %source))]
fn load_and_aggregate(source: &str) -> Result<MatchSummary> {
    let bytes = load_source(source)?;
    let events = parse_events(&bytes)?;
    info!(events = events.len(), "Event document parsed");

    Ok(aggregate(&events))
}
