//! # Trend Date Filtering
//!
//! Restricts a trend series to an inclusive calendar-date window. Dates are
//! compared as `NaiveDate`, never as strings.

use chrono::NaiveDate;
use tracing::warn;

use crate::admissions::model::TrendPoint;

const ISO_DATE_FORMAT: &str = "%Y-%m-%d";

/// Parses a strict `YYYY-MM-DD` date. Any other shape yields `None`.
pub fn parse_iso_date(value: &str) -> Option<NaiveDate> {
    // chrono accepts single-digit months and days; the wire format does not.
    if value.len() != 10 {
        return None;
    }
    NaiveDate::parse_from_str(value, ISO_DATE_FORMAT).ok()
}

pub fn format_iso_date(date: NaiveDate) -> String {
    date.format(ISO_DATE_FORMAT).to_string()
}

/// An inclusive `[from, to]` window. `from > to` is allowed and matches nothing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateRange {
    pub from: NaiveDate,
    pub to: NaiveDate,
}

impl DateRange {
    pub fn new(from: NaiveDate, to: NaiveDate) -> Self {
        Self { from, to }
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.from <= date && date <= self.to
    }
}

/// What to do with a trend series once the snapshot is built.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrendFilter {
    /// Keep every entry.
    Unfiltered,
    /// Keep entries whose date parses and falls inside the range.
    Range(DateRange),
    /// Both bounds were supplied but at least one did not parse: nothing can
    /// fall inside such a window, so every entry is dropped.
    Invalid,
}

impl TrendFilter {
    /// Builds the filter from optional string bounds.
    ///
    /// Filtering only happens when both bounds are supplied and non-empty; an
    /// omitted or empty bound leaves the series untouched.
    pub fn from_bounds(from: Option<&str>, to: Option<&str>) -> Self {
        let (from, to) = match (from, to) {
            (Some(f), Some(t)) if !f.is_empty() && !t.is_empty() => (f, t),
            _ => return TrendFilter::Unfiltered,
        };

        match (parse_iso_date(from), parse_iso_date(to)) {
            (Some(from), Some(to)) => TrendFilter::Range(DateRange::new(from, to)),
            _ => {
                warn!(from, to, "Ignoring trend entries: date bounds are not YYYY-MM-DD");
                TrendFilter::Invalid
            }
        }
    }

    pub fn apply(&self, trends: Vec<TrendPoint>) -> Vec<TrendPoint> {
        match self {
            TrendFilter::Unfiltered => trends,
            TrendFilter::Range(range) => filter_trends(trends, range),
            TrendFilter::Invalid => Vec::new(),
        }
    }
}

impl From<Option<DateRange>> for TrendFilter {
    fn from(range: Option<DateRange>) -> Self {
        range.map_or(TrendFilter::Unfiltered, TrendFilter::Range)
    }
}

/// Keeps entries inside `range`, preserving order. Entries whose own date does
/// not parse are dropped.
pub fn filter_trends(trends: Vec<TrendPoint>, range: &DateRange) -> Vec<TrendPoint> {
    trends
        .into_iter()
        .filter(|t| t.calendar_date().is_some_and(|d| range.contains(d)))
        .collect()
}
