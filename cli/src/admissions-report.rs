//! # Admissions Report CLI
//!
//! Command-line front end over `lib_admissions`: fetches the analytics
//! snapshot or a single metric, renders a text summary, or prints a synthetic
//! seed snapshot. Output goes to stdout, logs go to stderr (and optionally a
//! JSON log directory).

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use serde::Serialize;
use tracing::{debug, info};

use lib_admissions::admissions::insights::default_range;
use lib_admissions::admissions::report::build_summary;
use lib_admissions::admissions::synthetic::{SyntheticGenerator, today_utc};
use lib_admissions::admissions::{AdmissionsApi, AnalyticsSnapshot, generate_seed};
use lib_admissions::configs::{AdmissionsConfig, load_config};
use lib_admissions::loggers::setup_logging;

/// Admissions analytics from the configured endpoint, with a synthetic fallback.
#[derive(Parser, Debug)]
#[command(
    version,
    about,
    long_about = "Fetches admissions analytics from the configured endpoint. When the endpoint is unreachable, answers with an error status or returns malformed JSON, a synthetic snapshot tagged local_fallback is reported instead."
)]
struct Args {
    /// JSON config file. Defaults to ./admissions.conf when present.
    #[arg(short, long, env = "ADMISSIONS_CONFIG", global = true)]
    config: Option<PathBuf>,

    #[command(flatten)]
    settings: AdmissionsConfig,

    /// Pretty-print JSON output.
    #[arg(short, long, global = true)]
    pretty: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the analytics envelope.
    Analytics {
        /// First day of the trend window (YYYY-MM-DD).
        #[arg(long)]
        from: Option<String>,
        /// Last day of the trend window (YYYY-MM-DD).
        #[arg(long)]
        to: Option<String>,
        /// Use the dashboard's initial window: the last 30 days through today.
        #[arg(long, conflicts_with_all = ["from", "to"])]
        default_range: bool,
    },
    /// Print a single metric envelope.
    Metric {
        /// totalApplicants, verifiedApplicants or rejectedApplicants.
        key: String,
    },
    /// Print a human-readable summary of the current snapshot.
    Summary,
    /// Print a synthetic snapshot without contacting the endpoint.
    Seed {
        /// RNG seed. Falls back to the configured fallback seed, then random.
        #[arg(long)]
        seed: Option<u64>,
    },
}

fn print_json<T: Serialize>(value: &T, pretty: bool) -> Result<()> {
    let out = if pretty {
        serde_json::to_string_pretty(value)
    } else {
        serde_json::to_string(value)
    }
    .context("Failed to serialize output")?;
    println!("{out}");
    Ok(())
}

fn client(config: &AdmissionsConfig) -> Result<AdmissionsApi> {
    let api = AdmissionsApi::new(config).context("Failed to build analytics client")?;
    info!(endpoint = api.endpoint(), "Querying admissions analytics");
    Ok(api)
}

/// Synthetic snapshot for the `seed` command. An explicit `--seed` wins over
/// the configured fallback seed.
fn seed_snapshot(seed: Option<u64>, config: &AdmissionsConfig) -> AnalyticsSnapshot {
    match seed.or(config.fallback_seed) {
        Some(seed) => SyntheticGenerator::seeded(seed).snapshot(),
        None => generate_seed(),
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    let args = Args::parse();

    let config = load_config(args.config.as_deref(), args.settings)
        .context("Failed to load admissions configuration")?;

    // Keep the guard alive so the file writer flushes on exit.
    let _log_guard = setup_logging(
        "admissions-report",
        config.log_level(),
        config.log_dir.as_deref(),
    )
    .context("Failed to initialize logging")?;

    debug!(
        endpoint = config.endpoint(),
        timeout_secs = config.timeout().as_secs(),
        max_retries = config.max_retries(),
        "Configuration resolved"
    );

    match args.command {
        Command::Analytics {
            from,
            to,
            default_range: use_default,
        } => {
            let api = client(&config)?;
            let envelope = if use_default {
                api.fetch_analytics(Some(default_range(today_utc()))).await
            } else {
                api.fetch_admissions_analytics(from.as_deref(), to.as_deref())
                    .await
            };
            print_json(&envelope, args.pretty)?;
        }
        Command::Metric { key } => {
            let envelope = client(&config)?.fetch_metric(&key).await;
            print_json(&envelope, args.pretty)?;
        }
        Command::Summary => {
            let envelope = client(&config)?.fetch_analytics(None).await;
            print!("{}", build_summary(&envelope));
        }
        Command::Seed { seed } => {
            print_json(&seed_snapshot(seed, &config), args.pretty)?;
        }
    }

    Ok(())
}
