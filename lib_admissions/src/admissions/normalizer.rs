//! # Analytics Normalizer
//!
//! Reshapes the loosely-typed analytics payload into an [`AnalyticsSnapshot`].
//!
//! ## Field presence
//! A numeric field counts as present when it holds a JSON integer or an
//! integral float. `null`, strings, booleans, objects and fractional numbers
//! are treated as absent. A present `0` is a real zero: it is kept and never
//! replaced by an alternate key or a derived default.
//!
//! ## Defaults
//! - `total`: `totalApplicants`, then `total`, then `0`.
//! - `verified` / `rejected`: the `*Applicants` key, then the short key, then
//!   `round(total * 0.75)` / `round(total * 0.15)`.
//! - programs: `applicationsPerProgram`, then `programs`, then a synthetic
//!   distribution (not reconciled with `total`).
//! - trends: when `applicationTrends` is an array every entry is remapped and
//!   missing per-day `verified` / `rejected` become `0` (no ratio derivation,
//!   unlike the top-level fields). Anything else yields a synthetic 31-day series.

use rand::Rng;
use serde_json::Value;

use crate::admissions::filter::format_iso_date;
use crate::admissions::model::{AnalyticsSnapshot, ProgramCount, TrendPoint};
use crate::admissions::synthetic::{SyntheticGenerator, REJECTED_RATIO, VERIFIED_RATIO};

/// Normalizes `raw` using an OS-seeded generator for any synthetic gaps.
///
/// `None` and JSON `null` both produce a complete synthetic snapshot.
pub fn normalize(raw: Option<&Value>) -> AnalyticsSnapshot {
    normalize_with(raw, &mut SyntheticGenerator::from_entropy())
}

/// Normalizes `raw`, drawing synthetic gaps and the "today" default from `generator`.
pub fn normalize_with<R: Rng>(
    raw: Option<&Value>,
    generator: &mut SyntheticGenerator<R>,
) -> AnalyticsSnapshot {
    let raw = match raw {
        Some(value) if !value.is_null() => value,
        _ => return generator.snapshot(),
    };

    let total = first_integer(raw, &["totalApplicants", "total"]).unwrap_or(0);
    let verified = first_integer(raw, &["verifiedApplicants", "verified"])
        .unwrap_or_else(|| round_share(total, VERIFIED_RATIO));
    let rejected = first_integer(raw, &["rejectedApplicants", "rejected"])
        .unwrap_or_else(|| round_share(total, REJECTED_RATIO));

    let programs = first_array(raw, &["applicationsPerProgram", "programs"])
        .map(|items| items.iter().map(program_entry).collect())
        .unwrap_or_else(|| generator.programs());

    let trends = match raw.get("applicationTrends").and_then(Value::as_array) {
        Some(items) => {
            let today = format_iso_date(generator.today());
            items.iter().map(|item| trend_entry(item, &today)).collect()
        }
        None => generator.trends(),
    };

    AnalyticsSnapshot::from_parts(total, verified, rejected, programs, trends)
}

/// Smallest float above the `i64` range (2^63).
const I64_FLOAT_LIMIT: f64 = 9_223_372_036_854_775_808.0;

/// Reads a present integer from a JSON value.
///
/// Integers beyond `i64` (large `u64`) and integral floats outside
/// `[-2^63, 2^63)` are absent rather than clamped.
fn as_integer(value: &Value) -> Option<i64> {
    match value {
        Value::Number(n) => n.as_i64().or_else(|| {
            if n.is_u64() {
                return None;
            }
            n.as_f64()
                .filter(|f| f.fract() == 0.0 && (-I64_FLOAT_LIMIT..I64_FLOAT_LIMIT).contains(f))
                .map(|f| f as i64)
        }),
        _ => None,
    }
}

fn first_integer(raw: &Value, keys: &[&str]) -> Option<i64> {
    keys.iter().find_map(|key| raw.get(*key).and_then(as_integer))
}

fn first_array<'a>(raw: &'a Value, keys: &[&str]) -> Option<&'a Vec<Value>> {
    keys.iter().find_map(|key| raw.get(*key).and_then(Value::as_array))
}

fn first_text<'a>(raw: &'a Value, keys: &[&str]) -> Option<&'a str> {
    keys.iter()
        .find_map(|key| raw.get(*key).and_then(Value::as_str).filter(|s| !s.is_empty()))
}

fn round_share(total: i64, ratio: f64) -> i64 {
    (total as f64 * ratio).round() as i64
}

fn program_entry(item: &Value) -> ProgramCount {
    ProgramCount {
        program: item
            .get("program")
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_string(),
        count: first_integer(item, &["count"]).unwrap_or(0),
    }
}

fn trend_entry(item: &Value, today: &str) -> TrendPoint {
    TrendPoint {
        date: first_text(item, &["date", "day"]).unwrap_or(today).to_string(),
        applications: first_integer(item, &["applications", "count"]).unwrap_or(0),
        verified: first_integer(item, &["verified"]).unwrap_or(0),
        rejected: first_integer(item, &["rejected"]).unwrap_or(0),
    }
}
