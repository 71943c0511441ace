//! # Synthetic Fallback Data
//!
//! Generates plausible-looking admissions data to keep the dashboard populated
//! when the analytics endpoint is unavailable. The values carry no meaning;
//! only the shape is guaranteed:
//!
//! - one entry per program of [`PROGRAM_CATALOGUE`], count in `[200, 1000)`
//! - 31 trend entries, today-30 through today, oldest first, with
//!   `applications` in `[50, 200)`, `verified` in `[20, 120)` and `rejected`
//!   in `[5, 55)`, all independent of each other
//! - totals derived from the program counts with floored ratios
//!
//! All randomness goes through the single `Rng` owned by
//! [`SyntheticGenerator`], so a seeded `StdRng` makes the output reproducible.

use chrono::{Days, NaiveDate, Utc};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::admissions::filter::format_iso_date;
use crate::admissions::model::{AnalyticsSnapshot, ProgramCount, TrendPoint};

pub const PROGRAM_CATALOGUE: [&str; 6] = [
    "Science",
    "Electrical",
    "Mechanical",
    "Civil",
    "Business",
    "Data Science",
];

/// Days before today covered by the trend window; the window holds one more
/// entry than this because today is included.
pub const TREND_WINDOW_DAYS: u64 = 30;

/// Share of the total assumed verified when no figure is available.
pub const VERIFIED_RATIO: f64 = 0.75;
/// Share of the total assumed rejected when no figure is available.
pub const REJECTED_RATIO: f64 = 0.15;

/// Today's calendar date in UTC.
pub fn today_utc() -> NaiveDate {
    Utc::now().date_naive()
}

pub struct SyntheticGenerator<R: Rng> {
    rng: R,
    today: NaiveDate,
}

impl SyntheticGenerator<StdRng> {
    /// OS-seeded generator anchored at today's UTC date.
    pub fn from_entropy() -> Self {
        Self::new(StdRng::from_os_rng(), today_utc())
    }

    /// Reproducible generator anchored at today's UTC date.
    pub fn seeded(seed: u64) -> Self {
        Self::new(StdRng::seed_from_u64(seed), today_utc())
    }
}

impl<R: Rng> SyntheticGenerator<R> {
    pub fn new(rng: R, today: NaiveDate) -> Self {
        Self { rng, today }
    }

    /// The last day of the generated trend window.
    pub fn today(&self) -> NaiveDate {
        self.today
    }

    pub fn programs(&mut self) -> Vec<ProgramCount> {
        PROGRAM_CATALOGUE
            .iter()
            .map(|program| ProgramCount {
                program: (*program).to_string(),
                count: self.rng.random_range(200..1000),
            })
            .collect()
    }

    pub fn trends(&mut self) -> Vec<TrendPoint> {
        (0..=TREND_WINDOW_DAYS)
            .rev()
            .map(|days_back| {
                let date = self
                    .today
                    .checked_sub_days(Days::new(days_back))
                    .unwrap_or(NaiveDate::MIN);
                TrendPoint {
                    date: format_iso_date(date),
                    applications: self.rng.random_range(50..200),
                    verified: self.rng.random_range(20..120),
                    rejected: self.rng.random_range(5..55),
                }
            })
            .collect()
    }

    /// A complete fallback snapshot.
    pub fn snapshot(&mut self) -> AnalyticsSnapshot {
        let programs = self.programs();
        let trends = self.trends();

        let total: i64 = programs.iter().map(|p| p.count).sum();
        let verified = floor_share(total, VERIFIED_RATIO);
        let rejected = floor_share(total, REJECTED_RATIO);

        AnalyticsSnapshot::from_parts(total, verified, rejected, programs, trends)
    }
}

fn floor_share(total: i64, ratio: f64) -> i64 {
    (total as f64 * ratio).floor() as i64
}

/// A fresh fallback snapshot from an OS-seeded generator.
pub fn generate_seed() -> AnalyticsSnapshot {
    SyntheticGenerator::from_entropy().snapshot()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fixed_day() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 3, 15).unwrap()
    }

    fn generator(seed: u64) -> SyntheticGenerator<StdRng> {
        SyntheticGenerator::new(StdRng::seed_from_u64(seed), fixed_day())
    }

    #[test]
    fn programs_follow_catalogue_and_range() {
        let programs = generator(1).programs();
        let names: Vec<&str> = programs.iter().map(|p| p.program.as_str()).collect();
        assert_eq!(names, PROGRAM_CATALOGUE.to_vec());
        assert!(programs.iter().all(|p| (200..1000).contains(&p.count)));
    }

    #[test]
    fn trends_cover_thirty_one_ascending_days_ending_today() {
        let trends = generator(2).trends();
        assert_eq!(trends.len(), 31);
        assert_eq!(trends.first().unwrap().date, "2026-02-13");
        assert_eq!(trends.last().unwrap().date, "2026-03-15");

        let days: Vec<NaiveDate> = trends.iter().map(|t| t.calendar_date().unwrap()).collect();
        assert!(days.windows(2).all(|w| w[1] == w[0].succ_opt().unwrap()));

        for t in &trends {
            assert!((50..200).contains(&t.applications));
            assert!((20..120).contains(&t.verified));
            assert!((5..55).contains(&t.rejected));
        }
    }

    #[test]
    fn totals_are_floored_shares_of_program_sum() {
        let snap = generator(3).snapshot();
        let sum: i64 = snap.applications_per_program.iter().map(|p| p.count).sum();

        assert_eq!(snap.total_applicants, sum);
        assert_eq!(snap.verified_applicants, (sum as f64 * 0.75).floor() as i64);
        assert_eq!(snap.rejected_applicants, (sum as f64 * 0.15).floor() as i64);
        assert_eq!(
            snap.pending_applications,
            snap.total_applicants - snap.verified_applicants - snap.rejected_applicants
        );
    }

    #[test]
    fn floor_share_truncates() {
        assert_eq!(floor_share(1001, VERIFIED_RATIO), 750);
        assert_eq!(floor_share(1001, REJECTED_RATIO), 150);
    }

    #[test]
    fn same_seed_same_snapshot() {
        assert_eq!(generator(99).snapshot(), generator(99).snapshot());
    }

    #[test]
    fn unseeded_generations_share_a_shape() {
        let a = generate_seed();
        let b = generate_seed();
        assert_eq!(
            a.applications_per_program.len(),
            b.applications_per_program.len()
        );
        assert_eq!(a.application_trends.len(), b.application_trends.len());
        assert_eq!(
            serde_json::to_value(&a).unwrap().as_object().unwrap().len(),
            serde_json::to_value(&b).unwrap().as_object().unwrap().len()
        );
    }
}
