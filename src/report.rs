//! Plain-text and JSON rendering of benchmark results

use std::fmt::Write;

use serde::Serialize;

use crate::bench::{format_duration, Comparison, Scoreboard};
use crate::config::SideLabels;
use crate::types::{DeepRunSummary, PairedResult, Winner};

fn winner_label<'a>(winner: Winner, labels: &'a SideLabels) -> &'a str {
    match winner {
        Winner::SideA => &labels.a,
        Winner::SideB => &labels.b,
        Winner::Tie => "Tie",
    }
}

fn diff_label(cmp: &Comparison) -> String {
    match cmp.percentage_diff {
        Some(pct) => format!("{}%", pct),
        None => "-".to_string(),
    }
}

/// "Drizzle was 22% faster", or `None` for ties and degenerate zero timings
pub fn headline(cmp: &Comparison, labels: &SideLabels) -> Option<String> {
    match (cmp.winner, cmp.percentage_diff) {
        (Winner::Tie, _) | (_, None) => None,
        (winner, Some(pct)) => Some(format!(
            "{} was {}% faster",
            winner_label(winner, labels),
            pct
        )),
    }
}

/// Results table with a totals row
pub fn render_results(results: &[PairedResult], labels: &SideLabels) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "{:<24} | {:>12} | {:>12} | {:>6} | {}",
        "Operation", labels.a, labels.b, "Diff", "Winner"
    );
    let _ = writeln!(out, "{}", "-".repeat(72));

    for result in results {
        let cmp = result.comparison();
        let _ = writeln!(
            out,
            "{:<24} | {:>12} | {:>12} | {:>6} | {}",
            result.operation,
            format_duration(result.side_a.time_ms),
            format_duration(result.side_b.time_ms),
            diff_label(&cmp),
            winner_label(cmp.winner, labels),
        );
    }

    if let Some(board) = Scoreboard::from_results(results) {
        let overall = match board.overall.winner {
            Winner::SideA => format!("{} ({}/{})", labels.a, board.wins_a, board.count),
            Winner::SideB => format!("{} ({}/{})", labels.b, board.wins_b, board.count),
            Winner::Tie => "Tie".to_string(),
        };
        let _ = writeln!(out, "{}", "-".repeat(72));
        let _ = writeln!(
            out,
            "{:<24} | {:>12} | {:>12} | {:>6} | {}",
            "Total",
            format_duration(board.total_a_ms),
            format_duration(board.total_b_ms),
            diff_label(&board.overall),
            overall,
        );
    }

    out
}

/// Per-side percentile summaries of deep runs
pub fn render_deep_summaries(summaries: &[DeepRunSummary], labels: &SideLabels) -> String {
    let mut out = String::new();
    for summary in summaries {
        let _ = writeln!(
            out,
            "{} ({}/{} runs)",
            summary.operation, summary.runs, summary.requested
        );
        let _ = writeln!(out, "  {:<10} {}", labels.a, summary.side_a);
        let _ = writeln!(out, "  {:<10} {}", labels.b, summary.side_b);
    }
    out
}

/// Pretty JSON export of any result record
pub fn to_json<T: Serialize>(value: &T) -> anyhow::Result<String> {
    Ok(serde_json::to_string_pretty(value)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bench::compare;
    use crate::types::{AggregateStatistics, TimedSample};
    use serde_json::Value;

    fn labels() -> SideLabels {
        SideLabels {
            a: "Prisma".to_string(),
            b: "Drizzle".to_string(),
        }
    }

    fn paired(name: &str, a: f64, b: f64) -> PairedResult {
        PairedResult {
            operation: name.to_string(),
            side_a: TimedSample { data: Value::Null, time_ms: a },
            side_b: TimedSample { data: Value::Null, time_ms: b },
            captured_at_ms: 1,
        }
    }

    #[test]
    fn test_headline() {
        assert_eq!(
            headline(&compare(12.34, 15.0), &labels()).as_deref(),
            Some("Prisma was 22% faster")
        );
        assert_eq!(headline(&compare(10.0, 10.0), &labels()), None);
        assert_eq!(headline(&compare(3.0, 0.0), &labels()), None);
    }

    #[test]
    fn test_results_table() {
        let table = render_results(
            &[paired("CRUD Operations", 12.34, 15.0), paired("Bulk Operations", 90.0, 30.0)],
            &labels(),
        );

        assert!(table.contains("CRUD Operations"));
        assert!(table.contains("12.34ms"));
        assert!(table.contains("22%"));
        assert!(table.contains("200%"));
        assert!(table.contains("Drizzle (1/2)"));
    }

    #[test]
    fn test_empty_table_has_no_total() {
        let table = render_results(&[], &labels());
        assert!(!table.contains("Total"));
    }

    #[test]
    fn test_deep_summaries_and_json() {
        let summary = DeepRunSummary {
            operation: "Joins".to_string(),
            side_a: AggregateStatistics::from_samples(&[1.0, 2.0]),
            side_b: AggregateStatistics::default(),
            runs: 2,
            requested: 10,
        };

        let text = render_deep_summaries(std::slice::from_ref(&summary), &labels());
        assert!(text.contains("Joins (2/10 runs)"));
        assert!(text.contains("1.50ms"));

        let json = to_json(&summary).unwrap();
        let parsed: Value = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed["runs"], 2);
        assert_eq!(parsed["side_a"]["p95"], 2.0);
    }
}
