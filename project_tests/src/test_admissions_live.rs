//! # Admissions Analytics Live Test
//!
//! Resolves the configuration the same way the CLI does (`admissions.conf`
//! plus `ADMISSIONS_*` variables or the matching flags), hits the real
//! endpoint and checks the guarantees every caller relies on, whichever source
//! answered.

use clap::Parser;

use lib_admissions::admissions::insights::default_range;
use lib_admissions::admissions::synthetic::today_utc;
use lib_admissions::admissions::{AdmissionsApi, AnalyticsSnapshot};
use lib_admissions::configs::{load_config, AdmissionsConfig};
use lib_admissions::loggers::setup_logging;

fn check_consistency(label: &str, snapshot: &AnalyticsSnapshot) -> Result<(), String> {
    let expected = snapshot
        .total_applicants
        .saturating_sub(snapshot.verified_applicants)
        .saturating_sub(snapshot.rejected_applicants);
    if snapshot.pending_applications != expected {
        return Err(format!(
            "{label}: pending {} != {}",
            snapshot.pending_applications, expected
        ));
    }
    Ok(())
}

/// Executes the live analytics fetch.
///
/// Prints each envelope to stdout and exits non-zero on a broken guarantee.
#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    dotenvy::dotenv().ok();

    // // Statement: Flags and ADMISSIONS_* variables form the override layer
    let config = load_config(None, AdmissionsConfig::parse())?;
    let _guard = setup_logging("admissions_live_test", config.log_level(), None)?;

    let api = AdmissionsApi::new(&config)?;
    println!("[*] Requesting live analytics from {}", api.endpoint());

    // // Statement: Full snapshot, unfiltered
    let full = api.fetch_admissions_analytics(None, None).await;
    println!("\n[RESULT] source = {}", full.source);
    println!("{}", serde_json::to_string_pretty(&full)?);

    // // Statement: Dashboard default window
    let range = default_range(today_utc());
    let windowed = api.fetch_analytics(Some(range)).await;
    let outside = windowed
        .data
        .application_trends
        .iter()
        .filter(|t| t.calendar_date().is_none_or(|d| !range.contains(d)))
        .count();
    println!(
        "[INFO] {} trend entries in {}..={}, {} outside",
        windowed.data.application_trends.len(),
        range.from,
        range.to,
        outside
    );

    // // Statement: Metric endpoint
    let metric = api.fetch_metric("verifiedApplicants").await;
    println!("[INFO] verifiedApplicants = {}", metric.data.value);

    let mut failures = Vec::new();
    for (label, snapshot) in [("full", &full.data), ("windowed", &windowed.data)] {
        if let Err(e) = check_consistency(label, snapshot) {
            failures.push(e);
        }
    }
    if outside > 0 {
        failures.push(format!("{outside} trend entries outside the requested range"));
    }
    if !full.success || !metric.success {
        failures.push("an envelope reported success = false".to_string());
    }

    if failures.is_empty() {
        println!("\n[SUCCESS] All live checks passed.");
    } else {
        eprintln!("\n[ERROR] Live checks failed:");
        for failure in &failures {
            eprintln!(">>> {failure}");
        }
        std::process::exit(1);
    }

    Ok(())
}
