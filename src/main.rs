use anyhow::Context;
use chrono::Utc;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{info, warn};

use gig_grouper::app::GroupingUseCase;
use gig_grouper::config::Config;
use gig_grouper::constants;
use gig_grouper::infra::{GroupedOutputAdapter, JsonRecordSource, OutputFormat};
use gig_grouper::logging;
use gig_grouper::observability;
use gig_grouper::text::are_strings_similar;
use gig_grouper::timezone::{resolve_offset, resolve_timezone};
use gig_grouper::upcoming::is_upcoming_occurrence;

#[derive(Parser)]
#[command(name = "gig_grouper")]
#[command(about = "Groups live-event listings into one event per real occurrence")]
#[command(version = "0.1.0")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Group a JSON or NDJSON file of raw records
    Group {
        /// Input file (JSON array or NDJSON)
        #[arg(long)]
        input: PathBuf,
        /// Output directory, overrides config
        #[arg(long)]
        output: Option<PathBuf>,
        /// Write NDJSON instead of a JSON array
        #[arg(long)]
        ndjson: bool,
        /// Keep occurrences that are already past
        #[arg(long)]
        keep_past: bool,
    },
    /// Check whether an occurrence is still upcoming at a location
    Upcoming {
        /// ISO date, date-time, or "first last" range
        occurrence: String,
        #[arg(long, default_value = "")]
        location: String,
    },
    /// Compare two strings with the fuzzy similarity rule
    Similar { a: String, b: String },
}

fn init_metrics_from_env() {
    let Ok(port) = std::env::var(constants::METRICS_PORT_ENV) else {
        return;
    };
    match port.parse::<u16>() {
        Ok(port) => observability::init_metrics(port),
        Err(e) => warn!("Ignoring {}={}: {}", constants::METRICS_PORT_ENV, port, e),
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let mut config = Config::load().context("Failed to load configuration")?;
    let _log_guard = logging::init_logging(&config.logging);
    init_metrics_from_env();

    match cli.command {
        Commands::Group {
            input,
            output,
            ndjson,
            keep_past,
        } => {
            if let Some(dir) = output {
                config.output.dir = dir;
            }
            if keep_past {
                config.timezone.filter_past = false;
            }
            let format = if ndjson {
                OutputFormat::Ndjson
            } else {
                OutputFormat::Json {
                    pretty: config.output.pretty,
                }
            };

            let source = Arc::new(JsonRecordSource::new(input));
            let sink = Arc::new(GroupedOutputAdapter::new(config.output.dir.clone(), format));
            let use_case = GroupingUseCase::new(source, sink, config);

            info!("Starting grouping run");
            let result = use_case.run(Utc::now()).await?;
            println!("📊 Grouping results:");
            println!("   Records loaded: {}", result.records_loaded);
            println!("   Rejected: {}", result.records_rejected);
            println!("   Duplicate URLs: {}", result.duplicate_urls);
            println!("   Past clusters dropped: {}", result.past_clusters_dropped);
            println!("   Clusters: {}", result.clusters);
            println!("   Output file: {}", result.output.display());
        }
        Commands::Upcoming {
            occurrence,
            location,
        } => {
            let upcoming = is_upcoming_occurrence(&occurrence, &location, Utc::now());
            println!(
                "{} ({} {})",
                if upcoming { "upcoming" } else { "past" },
                resolve_timezone(&location),
                resolve_offset(&occurrence, &location)
            );
        }
        Commands::Similar { a, b } => {
            println!("{}", are_strings_similar(&a, &b));
        }
    }
    Ok(())
}
