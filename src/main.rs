//! CLI entry point for the resort rater.
//!
//! Loads the latest analysis results document, ranks the resorts by their
//! composite condition score, and prints or republishes the ranking.

use anyhow::{Context, Result, bail};
use clap::{Args, Parser, Subcommand};
use resort_rater::document::ResultsDocument;
use resort_rater::output::{write_json_file, write_json_to_s3};
use resort_rater::report::{RankingReport, ResortReport, format_score};
use resort_rater::scoring::{CompositePolicy, RankedDocument, rank_document};
use resort_rater::source::{DocumentSource, RetryPolicy, load_document};
use std::ffi::OsStr;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::{error, info};
use tracing_subscriber::{
    EnvFilter, Layer,
    fmt::{self, format::FmtSpan},
    layer::SubscriberExt,
    util::SubscriberInitExt,
};

#[derive(Parser)]
#[command(name = "resort_rater")]
#[command(about = "Rank ski resorts by webcam-rated conditions", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the resort ranking
    Rank {
        #[command(flatten)]
        input: InputArgs,

        /// Only show the best N resorts
        #[arg(short, long)]
        top: Option<usize>,
    },
    /// Print one resort's scores and camera results
    Resort {
        #[command(flatten)]
        input: InputArgs,

        /// Resort key (e.g., "stevens_pass")
        #[arg(short, long)]
        key: String,
    },
    /// Write the ranked document as JSON to a file or S3
    Export {
        #[command(flatten)]
        input: InputArgs,

        /// Local file to write the ranked JSON to
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// S3 bucket to upload the ranked JSON to (e.g., "my-bucket")
        #[arg(long, env = "S3_BUCKET")]
        s3_bucket: Option<String>,

        /// Object key for the S3 upload
        #[arg(long, env = "RANKED_S3_KEY", default_value = "ranked_results.json")]
        s3_key: String,

        /// Gzip compress the JSON before uploading to S3
        #[arg(long, default_value_t = false)]
        gzip: bool,
    },
}

#[derive(Args)]
struct InputArgs {
    /// Results document: file path, http(s) URL, or s3://bucket/key
    #[arg(
        short,
        long,
        env = "RESULTS_SOURCE",
        default_value = ".analysis_results.json"
    )]
    source: String,

    /// Extra fields to leave out of the composite score (snow depth always is)
    #[arg(long, env = "COMPOSITE_EXCLUDE", value_delimiter = ',')]
    exclude_from_composite: Vec<String>,

    /// Attempts to retrieve the results document before giving up
    #[arg(long, default_value_t = 3)]
    retries: u32,

    /// Delay between retrieval attempts, in milliseconds
    #[arg(long, default_value_t = 1000)]
    retry_delay_ms: u64,
}

impl InputArgs {
    fn policy(&self) -> CompositePolicy {
        self.exclude_from_composite
            .iter()
            .map(|field| field.trim())
            .filter(|field| !field.is_empty())
            .fold(CompositePolicy::default(), |policy, field| {
                policy.with_excluded(field)
            })
    }

    fn retry(&self) -> RetryPolicy {
        RetryPolicy {
            attempts: self.retries,
            delay: Duration::from_millis(self.retry_delay_ms),
        }
    }

    async fn load(&self) -> Result<ResultsDocument> {
        let source: DocumentSource = self.source.parse()?;
        match load_document(&source, &self.retry()).await {
            Ok(document) => Ok(document),
            Err(e) => {
                error!(source = %source, error = %format!("{e:#}"), "Results document unavailable");
                Err(e)
            }
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok(); // Load .env file

    // Logging setup: colored stderr + JSON rolling log file
    let log_file_path =
        std::env::var("LOG_FILE_PATH").unwrap_or_else(|_| "logs/resort_rater.log".to_string());
    let log_dir = Path::new(&log_file_path)
        .parent()
        .unwrap_or(Path::new("logs"));
    let log_file_name = Path::new(&log_file_path)
        .file_name()
        .unwrap_or(OsStr::new("resort_rater.log"));

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

    match cli.command {
        Commands::Rank { input, top } => {
            let document = input.load().await?;
            let ranked = rank_document(&document, &input.policy());

            let report = match top {
                Some(n) => RankingReport::new(&ranked).top(n),
                None => RankingReport::new(&ranked),
            };
            print!("{report}");
            log_summary(&ranked);
        }
        Commands::Resort { input, key } => {
            let document = input.load().await?;
            let ranked = rank_document(&document, &input.policy());

            let Some(resort) = ranked.find(&key) else {
                bail!(
                    "Resort '{key}' is not in the results document ({} resorts available)",
                    ranked.resorts.len()
                );
            };
            print!("{}", ResortReport(resort));
        }
        Commands::Export {
            input,
            output,
            s3_bucket,
            s3_key,
            gzip,
        } => {
            if output.is_none() && s3_bucket.is_none() {
                bail!("Nothing to export to: pass --output and/or --s3-bucket");
            }

            let document = input.load().await?;
            let ranked = rank_document(&document, &input.policy());

            if let Some(path) = output {
                write_json_file(&path, &ranked)?;
            }

            if let Some(bucket) = s3_bucket {
                let config = aws_config::load_from_env().await;
                let s3 = aws_sdk_s3::Client::new(&config);
                write_json_to_s3(&s3, &bucket, &s3_key, &ranked, gzip)
                    .await
                    .with_context(|| format!("Failed to publish ranking to s3://{bucket}/{s3_key}"))?;
                info!(path = %format!("s3://{bucket}/{s3_key}"), "Ranking published");
            }

            log_summary(&ranked);
        }
    }

    Ok(())
}

/// Logs the headline numbers of a ranking run.
fn log_summary(ranked: &RankedDocument<'_>) {
    match ranked.top() {
        Some(best) => info!(
            resorts_analyzed = ranked.resorts.len(),
            top_resort = %best.resort.resort_name,
            top_score = %format_score(best.averages.composite()),
            "Ranking complete"
        ),
        None => info!(resorts_analyzed = 0, "Ranking complete, no resorts in document"),
    }
}
