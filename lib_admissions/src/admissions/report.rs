use std::fmt::Write;

use crate::admissions::insights::{metric_level, program_shares, status_breakdown};
use crate::admissions::model::AnalyticsEnvelope;

/// Renders an envelope as a plain-text summary for terminals and logs.
pub fn build_summary(envelope: &AnalyticsEnvelope) -> String {
    let data = &envelope.data;
    let mut output = String::new();

    let _ = writeln!(output, "# Admission Analytics");
    let _ = writeln!(
        output,
        "Source: {} (generated {})",
        envelope.source, envelope.timestamp
    );
    let _ = writeln!(output);
    let _ = writeln!(output, "## Headline Metrics");

    for (label, value) in [
        ("Total applicants", data.total_applicants),
        ("Verified applicants", data.verified_applicants),
        ("Rejected applicants", data.rejected_applicants),
        ("Pending applications", data.pending_applications),
    ] {
        let _ = writeln!(
            output,
            "- {}: {} ({:?})",
            label,
            value,
            metric_level(value)
        );
    }

    let _ = writeln!(output);
    let _ = writeln!(output, "## Status Breakdown");
    for slice in status_breakdown(data) {
        let _ = writeln!(output, "- {:?}: {}", slice.status, slice.value);
    }

    let _ = writeln!(output);
    let _ = writeln!(output, "## Applications per Program");
    let shares = program_shares(data);
    if shares.is_empty() {
        let _ = writeln!(output, "No program data available.");
    } else {
        for share in shares.iter() {
            let _ = writeln!(
                output,
                "- {}: {} ({:.1}%)",
                share.program, share.count, share.percent
            );
        }
    }

    let _ = writeln!(output);
    let _ = writeln!(output, "## Application Trends");
    let trends = &data.application_trends;
    match (trends.first(), trends.last()) {
        (Some(first), Some(last)) => {
            let applications = trends
                .iter()
                .fold(0i64, |acc, t| acc.saturating_add(t.applications));
            let _ = writeln!(
                output,
                "{} days from {} to {}, {} applications",
                trends.len(),
                first.date,
                last.date,
                applications
            );
        }
        _ => {
            let _ = writeln!(output, "No trend entries in this window.");
        }
    }

    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::admissions::model::{
        AnalyticsSnapshot, ProgramCount, Source, TrendPoint,
    };

    fn envelope(trends: Vec<TrendPoint>) -> AnalyticsEnvelope {
        AnalyticsEnvelope::new(
            Source::ExternalApi,
            AnalyticsSnapshot::from_parts(
                1200,
                600,
                100,
                vec![
                    ProgramCount { program: "Civil".into(), count: 300 },
                    ProgramCount { program: "Business".into(), count: 900 },
                ],
                trends,
            ),
        )
    }

    #[test]
    fn summary_lists_metrics_and_shares() {
        let report = build_summary(&envelope(vec![
            TrendPoint { date: "2026-10-01".into(), applications: 10, verified: 0, rejected: 0 },
            TrendPoint { date: "2026-10-02".into(), applications: 15, verified: 0, rejected: 0 },
        ]));

        assert!(report.contains("Source: external_api"));
        assert!(report.contains("- Total applicants: 1200 (High)"));
        assert!(report.contains("- Verified applicants: 600 (Elevated)"));
        assert!(report.contains("- Pending: 500"));
        assert!(report.contains("- Business: 900 (75.0%)"));
        assert!(report.contains("2 days from 2026-10-01 to 2026-10-02, 25 applications"));
    }

    #[test]
    fn summary_handles_empty_trend_window() {
        let report = build_summary(&envelope(vec![]));
        assert!(report.contains("No trend entries in this window."));
    }
}
