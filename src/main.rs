//! CLI entry point for the Express Entry trend extractor.
//!
//! Provides subcommands for extracting trends from a local file or URL, for
//! a single fetch → extract → upload pass, and for running that pass daily.

use std::ffi::OsStr;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::Utc;
use clap::{Parser, Subcommand};
use express_entry_trends::config::AppConfig;
use express_entry_trends::fetch::{BasicClient, fetch_bytes};
use express_entry_trends::output::{print_json, write_artifacts};
use express_entry_trends::schedule::next_run_after;
use express_entry_trends::upload::upload_artifacts;
use express_entry_trends::{Extraction, extract_from_slice};
use tracing::{error, info, warn};
use tracing_subscriber::{
    EnvFilter, Layer,
    fmt::{self, format::FmtSpan},
    layer::SubscriberExt,
    util::SubscriberInitExt,
};

#[derive(Parser)]
#[command(name = "express_entry_trends")]
#[command(about = "Derive CRS, pool and draw-size trends from Express Entry rounds", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Extract trends from a rounds document on disk or at a URL
    Extract {
        /// Path to file or URL to fetch
        #[arg(value_name = "FILE_OR_URL")]
        source: String,

        /// Directory to write artifacts to (defaults to OUTPUT_DIR)
        #[arg(short, long)]
        output_dir: Option<PathBuf>,

        /// Also log the full trend set as JSON
        #[arg(long, default_value_t = false)]
        json: bool,
    },
    /// Fetch from DATA_FETCH_URL, extract, write artifacts and upload them once
    Run {
        /// S3 bucket to upload artifacts to (defaults to S3_BUCKET)
        #[arg(long)]
        s3_bucket: Option<String>,

        /// Gzip artifacts before uploading
        #[arg(long, default_value_t = false)]
        gzip: bool,
    },
    /// Run the fetch → extract → upload pass every day at a fixed UTC time
    Schedule {
        #[arg(long, default_value_t = 3)]
        hour: u32,

        #[arg(long, default_value_t = 0)]
        minute: u32,

        /// S3 bucket to upload artifacts to (defaults to S3_BUCKET)
        #[arg(long)]
        s3_bucket: Option<String>,

        /// Gzip artifacts before uploading
        #[arg(long, default_value_t = false)]
        gzip: bool,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok(); // Load .env file

    // Logging setup: colored stderr + JSON rolling log file
    let log_file_path = std::env::var("LOG_FILE_PATH")
        .unwrap_or_else(|_| "logs/express_entry_trends.log".to_string());
    let log_dir = Path::new(&log_file_path)
        .parent()
        .unwrap_or(Path::new("logs"));
    let log_file_name = Path::new(&log_file_path)
        .file_name()
        .unwrap_or(OsStr::new("express_entry_trends.log"));

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

    tracing_subscriber::registry()
        .with(stderr_layer)
        .with(json_layer)
        .init();

    let cli = Cli::parse();
    let config = AppConfig::from_env();

    match cli.command {
        Commands::Extract {
            source,
            output_dir,
            json,
        } => {
            let bytes = fetcher(&source).await?;
            let extraction = extract_from_slice(&bytes)?;
            report_warnings(&extraction);

            let output_dir = output_dir.unwrap_or_else(|| config.output_dir.clone());
            write_artifacts(&output_dir, &extraction.trends)?;
            if json {
                print_json(&extraction.trends)?;
            }
        }
        Commands::Run { s3_bucket, gzip } => {
            run_pass(&config, s3_bucket.as_deref(), gzip).await?;
        }
        Commands::Schedule {
            hour,
            minute,
            s3_bucket,
            gzip,
        } => loop {
            let now = Utc::now();
            let next = next_run_after(now, hour, minute)?;
            info!(next_run = %next, "Waiting for next scheduled pass");
            tokio::time::sleep((next - now).to_std()?).await;

            if let Err(e) = run_pass(&config, s3_bucket.as_deref(), gzip).await {
                error!(error = %e, "Scheduled pass failed");
            }
        },
    }

    Ok(())
}

/// Loads the rounds document from a local file path or fetches it over HTTP.
#[tracing::instrument(fields(source = %source))]
async fn fetcher(source: &str) -> Result<Vec<u8>> {
    let bytes = if source.starts_with("http") {
        let client = BasicClient::new()?;
        fetch_bytes(&client, source).await?
    } else {
        std::fs::read(source).with_context(|| format!("reading {source}"))?
    };
    Ok(bytes)
}

/// Fetches the published document, snapshots it, writes artifacts and
/// uploads them when a bucket is configured.
#[tracing::instrument(skip(config))]
async fn run_pass(config: &AppConfig, s3_bucket: Option<&str>, gzip: bool) -> Result<()> {
    let url = config.fetch_url()?;
    info!(url, "Fetching rounds document");
    let client = BasicClient::new()?;
    let bytes = fetch_bytes(&client, url).await?;

    let snapshot = config.input_snapshot_path();
    std::fs::create_dir_all(&config.output_dir)?;
    std::fs::write(&snapshot, &bytes)
        .with_context(|| format!("writing {}", snapshot.display()))?;
    info!(path = %snapshot.display(), "Input snapshot written");

    let extraction = extract_from_slice(&bytes)?;
    report_warnings(&extraction);
    write_artifacts(&config.output_dir, &extraction.trends)?;

    match s3_bucket.or(config.s3_bucket.as_deref()) {
        Some(bucket) => {
            let aws = aws_config::load_from_env().await;
            let s3 = aws_sdk_s3::Client::new(&aws);
            upload_artifacts(&s3, bucket, &config.s3_prefix, &config.output_dir, gzip).await?;
        }
        None => info!("S3 bucket not specified, skipping upload"),
    }

    Ok(())
}

fn report_warnings(extraction: &Extraction) {
    if extraction.warnings.is_empty() {
        return;
    }
    warn!(
        skipped = extraction.warnings.len(),
        rounds_read = extraction.rounds_read,
        rounds_used = extraction.rounds_used,
        "Some rounds were skipped during extraction"
    );
}
