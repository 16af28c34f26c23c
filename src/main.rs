//! CLI entry point for the trip calculator.
//!
//! Splits a device's location log into trips and writes one CSV and one JSON
//! summary per trip, plus a combined GeoJSON overlay.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::ffi::OsStr;
use std::io::{BufRead, Write};
use std::path::{Path, PathBuf};
use tracing::{info, warn};
use tracing_subscriber::{
    EnvFilter, Layer,
    fmt::{self, format::FmtSpan},
    layer::SubscriberExt,
    util::SubscriberInitExt,
};
use trip_calculator::{
    input::read_records,
    logging::{REJECTS_FILE, rejects_layer},
    output::{emit_all, print_json},
    pipeline::run,
    segmenter::SegmenterConfig,
    validate::{TracingSink, validate_all},
};

#[derive(Parser)]
#[command(name = "trip_calculator")]
#[command(about = "Split a GPS location log into trips", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Segment a CSV of location records into trip files
    Generate {
        /// CSV file to process (prompted for when omitted)
        #[arg(value_name = "FILE")]
        source: Option<String>,

        /// Directory to write trip_N.csv, trip_N.json and trips.geojson into
        #[arg(short, long, default_value = ".")]
        output_dir: String,

        /// JSON file with segmentation thresholds
        #[arg(short, long)]
        config: Option<String>,

        /// Distance from the trip anchor, in km, beyond which a trip ends
        #[arg(long)]
        max_distance_km: Option<f64>,

        /// Minutes since the trip anchor beyond which a trip ends
        #[arg(long)]
        max_gap_minutes: Option<f64>,
    },
    /// Validate a CSV of location records without writing trips
    Validate {
        /// CSV file to check (prompted for when omitted)
        #[arg(value_name = "FILE")]
        source: Option<String>,

        /// File to write rejected records to
        #[arg(short, long, default_value = REJECTS_FILE)]
        rejects_log: String,
    },
}

impl Commands {
    /// Where this run writes its rejected records.
    fn rejects_log_path(&self) -> PathBuf {
        match self {
            Commands::Generate { output_dir, .. } => Path::new(output_dir).join(REJECTS_FILE),
            Commands::Validate { rejects_log, .. } => PathBuf::from(rejects_log),
        }
    }
}

fn main() -> Result<()> {
    dotenvy::dotenv().ok(); // Load .env file

    let cli = Cli::parse();

    // Logging setup: colored stderr + JSON rolling log file + rejects file
    let log_file_path =
        std::env::var("LOG_FILE_PATH").unwrap_or_else(|_| "logs/trip_calculator.log".to_string());
    let log_dir = Path::new(&log_file_path)
        .parent()
        .unwrap_or(Path::new("logs"));
    let log_file_name = Path::new(&log_file_path)
        .file_name()
        .unwrap_or(OsStr::new("trip_calculator.log"));

    let file_appender = tracing_appender::rolling::daily(log_dir, log_file_name);
    let (non_blocking_file, _file_guard) = tracing_appender::non_blocking(file_appender);

    let stderr_layer = fmt::layer()
        .with_target(true)
        .with_span_events(FmtSpan::CLOSE)
        .with_ansi(true)
        .with_writer(std::io::stderr)
        .with_filter(EnvFilter::from_env("RUST_LOG").add_directive("info".parse()?));

    let json_layer = fmt::layer()
        .json()
        .with_current_span(true)
        .with_span_list(true)
        .with_writer(non_blocking_file)
        .with_filter(EnvFilter::from_env("RUST_LOG_JSON").add_directive("debug".parse()?));

    let rejects_path = cli.command.rejects_log_path();
    if let Some(dir) = rejects_path.parent().filter(|d| !d.as_os_str().is_empty()) {
        std::fs::create_dir_all(dir)?;
    }
    let (rejects_file_layer, _rejects_guard) = rejects_layer(&rejects_path)
        .with_context(|| format!("failed to create {}", rejects_path.display()))?;

    tracing_subscriber::registry()
        .with(stderr_layer)
        .with(json_layer)
        .with(rejects_file_layer)
        .init();

    match cli.command {
        Commands::Generate {
            source,
            output_dir,
            config,
            max_distance_km,
            max_gap_minutes,
        } => {
            let config = match config {
                Some(path) => SegmenterConfig::load(&path)
                    .with_context(|| format!("failed to load config {path}"))?,
                None => SegmenterConfig::default(),
            }
            .with_overrides(max_distance_km, max_gap_minutes);

            let source = resolve_source(source)?;
            generate(&source, Path::new(&output_dir), &config)?;
        }
        Commands::Validate { source, .. } => {
            let source = resolve_source(source)?;
            let records = read_records(&source)?;
            let mut sink = TracingSink::default();
            let points = validate_all(&records, &mut sink);

            info!(
                total = records.len(),
                accepted = points.len(),
                rejected = sink.count,
                "Validation summary"
            );
        }
    }

    Ok(())
}

/// Uses the given path, or asks for one on stdin.
fn resolve_source(source: Option<String>) -> Result<String> {
    if let Some(source) = source {
        return Ok(source);
    }

    print!("Input CSV filename: ");
    std::io::stdout().flush()?;

    let mut line = String::new();
    std::io::stdin().lock().read_line(&mut line)?;
    let source = line.trim().to_string();
    anyhow::ensure!(!source.is_empty(), "no input file given");
    Ok(source)
}

/// Reads, validates and segments `source`, then writes all trip files.
#[tracing::instrument(skip(config), fields(max_distance_km = config.max_displacement_km, max_gap_minutes = config.max_gap_minutes))]
fn generate(source: &str, output_dir: &Path, config: &SegmenterConfig) -> Result<()> {
    let records = read_records(source)?;

    let mut sink = TracingSink::default();
    let report = run(&records, config, &mut sink);

    if report.trips.is_empty() {
        warn!("No valid records, no trips produced");
    }

    for trip in &report.trips {
        if trip.summary().avg_speed_kmh.is_none() {
            warn!(trip = trip.number, "Trip has zero duration, average speed undefined");
        }
        print_json(trip)?;
    }

    emit_all(output_dir, &report.trips)
        .with_context(|| format!("failed to write trips to {}", output_dir.display()))?;

    info!(
        trips = report.trips.len(),
        accepted = report.accepted,
        rejected = report.rejected,
        "Finished processing"
    );
    Ok(())
}
