//! # Dashboard Insights
//!
//! Derived views the dashboard shows next to the raw snapshot: the initial
//! date window, the status breakdown, per-program shares and the severity
//! level attached to each headline metric.

use chrono::{Days, NaiveDate};
use serde::Serialize;

use crate::admissions::filter::DateRange;
use crate::admissions::model::AnalyticsSnapshot;
use crate::admissions::synthetic::TREND_WINDOW_DAYS;

/// The dashboard's initial window: the 30 days before `today` plus today.
pub fn default_range(today: NaiveDate) -> DateRange {
    let from = today
        .checked_sub_days(Days::new(TREND_WINDOW_DAYS))
        .unwrap_or(NaiveDate::MIN);
    DateRange::new(from, today)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ApplicationStatus {
    Verified,
    Rejected,
    Pending,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct StatusSlice {
    pub status: ApplicationStatus,
    pub value: i64,
}

/// Verified, rejected and pending counts, in that order.
pub fn status_breakdown(snapshot: &AnalyticsSnapshot) -> [StatusSlice; 3] {
    [
        StatusSlice {
            status: ApplicationStatus::Verified,
            value: snapshot.verified_applicants,
        },
        StatusSlice {
            status: ApplicationStatus::Rejected,
            value: snapshot.rejected_applicants,
        },
        StatusSlice {
            status: ApplicationStatus::Pending,
            value: snapshot.pending_applications,
        },
    ]
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProgramShare {
    pub program: String,
    pub count: i64,
    /// Percentage of the summed program counts, one decimal place.
    pub percent: f64,
}

/// Each program's share of the program total (not of `totalApplicants`,
/// which the upstream may report independently). All shares are `0.0` when
/// the program total is zero.
pub fn program_shares(snapshot: &AnalyticsSnapshot) -> Vec<ProgramShare> {
    let total: i64 = snapshot
        .applications_per_program
        .iter()
        .fold(0i64, |acc, p| acc.saturating_add(p.count));

    snapshot
        .applications_per_program
        .iter()
        .map(|p| ProgramShare {
            program: p.program.clone(),
            count: p.count,
            percent: if total == 0 {
                0.0
            } else {
                (p.count as f64 / total as f64 * 1000.0).round() / 10.0
            },
        })
        .collect()
}

/// Severity band of a headline metric.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MetricLevel {
    Normal,
    Elevated,
    High,
}

pub fn metric_level(value: i64) -> MetricLevel {
    match value {
        v if v > 1000 => MetricLevel::High,
        v if v > 500 => MetricLevel::Elevated,
        _ => MetricLevel::Normal,
    }
}
