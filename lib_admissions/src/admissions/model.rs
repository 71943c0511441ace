//! # Admissions Data Model
//!
//! The canonical snapshot handed to the dashboard and the envelopes that wrap
//! it. All types serialize with the camelCase keys the dashboard consumes.

use std::fmt;

use chrono::{NaiveDate, SecondsFormat, Utc};
use serde::Serialize;

use crate::admissions::filter::parse_iso_date;

/// # Analytics Snapshot
///
/// A normalized admissions record. It is rebuilt on every fetch and never
/// persisted.
///
/// `pending_applications` is always `total - verified - rejected`. Build
/// snapshots through [`AnalyticsSnapshot::from_parts`] so that it stays
/// derived; it is not clamped and goes negative on inconsistent inputs.
/// Arithmetic saturates at the `i64` bounds.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyticsSnapshot {
    pub total_applicants: i64,
    pub verified_applicants: i64,
    pub rejected_applicants: i64,
    pub pending_applications: i64,
    pub applications_per_program: Vec<ProgramCount>,
    /// Daily series, oldest first.
    pub application_trends: Vec<TrendPoint>,
}

impl AnalyticsSnapshot {
    pub fn from_parts(
        total: i64,
        verified: i64,
        rejected: i64,
        programs: Vec<ProgramCount>,
        trends: Vec<TrendPoint>,
    ) -> Self {
        Self {
            total_applicants: total,
            verified_applicants: verified,
            rejected_applicants: rejected,
            pending_applications: total.saturating_sub(verified).saturating_sub(rejected),
            applications_per_program: programs,
            application_trends: trends,
        }
    }

    /// Extracts one scalar. [`MetricType::Unknown`] is always `0`.
    pub fn metric(&self, metric: MetricType) -> i64 {
        match metric {
            MetricType::TotalApplicants => self.total_applicants,
            MetricType::VerifiedApplicants => self.verified_applicants,
            MetricType::RejectedApplicants => self.rejected_applicants,
            MetricType::Unknown => 0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProgramCount {
    pub program: String,
    pub count: i64,
}

/// One day of the application trend series.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TrendPoint {
    /// `YYYY-MM-DD` as received or generated.
    pub date: String,
    pub applications: i64,
    pub verified: i64,
    pub rejected: i64,
}

impl TrendPoint {
    /// The calendar date of this entry, `None` if `date` is not `YYYY-MM-DD`.
    pub fn calendar_date(&self) -> Option<NaiveDate> {
        parse_iso_date(&self.date)
    }
}

/// Provenance of a snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Source {
    ExternalApi,
    LocalFallback,
}

impl Source {
    pub fn as_str(&self) -> &'static str {
        match self {
            Source::ExternalApi => "external_api",
            Source::LocalFallback => "local_fallback",
        }
    }
}

impl fmt::Display for Source {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The scalar metrics `fetch_metric` can extract.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MetricType {
    TotalApplicants,
    VerifiedApplicants,
    RejectedApplicants,
    /// Any unrecognized key.
    Unknown,
}

impl MetricType {
    /// Maps a dashboard metric key. Matching is exact and case-sensitive.
    pub fn from_key(key: &str) -> Self {
        match key {
            "totalApplicants" => MetricType::TotalApplicants,
            "verifiedApplicants" => MetricType::VerifiedApplicants,
            "rejectedApplicants" => MetricType::RejectedApplicants,
            _ => MetricType::Unknown,
        }
    }
}

impl From<&str> for MetricType {
    fn from(key: &str) -> Self {
        MetricType::from_key(key)
    }
}

/// Result of an analytics fetch. `success` is always `true`; `source` is the
/// only signal that fallback data was served.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AnalyticsEnvelope {
    pub success: bool,
    pub source: Source,
    pub data: AnalyticsSnapshot,
    pub timestamp: String,
}

impl AnalyticsEnvelope {
    pub fn new(source: Source, data: AnalyticsSnapshot) -> Self {
        Self {
            success: true,
            source,
            data,
            timestamp: current_timestamp(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct MetricValue {
    pub value: i64,
}

/// Result of a single-metric fetch. Carries no provenance.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MetricEnvelope {
    pub success: bool,
    pub data: MetricValue,
    pub timestamp: String,
}

impl MetricEnvelope {
    pub fn new(value: i64) -> Self {
        Self {
            success: true,
            data: MetricValue { value },
            timestamp: current_timestamp(),
        }
    }
}

/// Current UTC time as RFC 3339 with millisecond precision and a `Z` suffix.
pub fn current_timestamp() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn snapshot() -> AnalyticsSnapshot {
        AnalyticsSnapshot::from_parts(
            1200,
            900,
            180,
            vec![ProgramCount {
                program: "Civil".into(),
                count: 1200,
            }],
            vec![TrendPoint {
                date: "2026-10-01".into(),
                applications: 80,
                verified: 40,
                rejected: 10,
            }],
        )
    }

    #[test]
    fn pending_is_derived_and_not_clamped() {
        assert_eq!(snapshot().pending_applications, 120);

        let inconsistent = AnalyticsSnapshot::from_parts(10, 8, 5, vec![], vec![]);
        assert_eq!(inconsistent.pending_applications, -3);
    }

    #[test]
    fn pending_saturates_at_integer_bounds() {
        let high = AnalyticsSnapshot::from_parts(i64::MAX, -1, 0, vec![], vec![]);
        assert_eq!(high.pending_applications, i64::MAX);

        let low = AnalyticsSnapshot::from_parts(i64::MIN, 1, 1, vec![], vec![]);
        assert_eq!(low.pending_applications, i64::MIN);
    }

    #[test]
    fn metric_keys_map_to_fields() {
        let snap = snapshot();
        assert_eq!(snap.metric("totalApplicants".into()), 1200);
        assert_eq!(snap.metric("verifiedApplicants".into()), 900);
        assert_eq!(snap.metric("rejectedApplicants".into()), 180);
        assert_eq!(snap.metric("pendingApplications".into()), 0);
        assert_eq!(snap.metric("TotalApplicants".into()), 0);
    }

    #[test]
    fn snapshot_serializes_with_dashboard_keys() {
        let value = serde_json::to_value(snapshot()).unwrap();
        assert_eq!(value["totalApplicants"], json!(1200));
        assert_eq!(value["pendingApplications"], json!(120));
        assert_eq!(value["applicationsPerProgram"][0]["program"], json!("Civil"));
        assert_eq!(value["applicationTrends"][0]["date"], json!("2026-10-01"));
    }

    #[test]
    fn envelope_carries_provenance_tag() {
        let envelope = AnalyticsEnvelope::new(Source::LocalFallback, snapshot());
        let value = serde_json::to_value(&envelope).unwrap();
        assert_eq!(value["success"], json!(true));
        assert_eq!(value["source"], json!("local_fallback"));
        assert_eq!(Source::ExternalApi.to_string(), "external_api");
    }

    #[test]
    fn timestamp_is_rfc3339_utc() {
        let ts = current_timestamp();
        assert!(ts.ends_with('Z'));
        assert!(chrono::DateTime::parse_from_rfc3339(&ts).is_ok());
    }
}
