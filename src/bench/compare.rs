//! Head-to-head comparison of paired timings

use serde::Serialize;

use crate::types::{PairedResult, Winner};

/// Winner and relative difference of one comparison
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Comparison {
    pub winner: Winner,
    /// How much longer the loser took, in percent of the winner's time.
    /// `None` when the winner measured exactly zero and the loser did not.
    pub percentage_diff: Option<u64>,
}

/// Compare side A against side B
pub fn compare(a_ms: f64, b_ms: f64) -> Comparison {
    let winner = if a_ms < b_ms {
        Winner::SideA
    } else if b_ms < a_ms {
        Winner::SideB
    } else {
        Winner::Tie
    };

    if winner == Winner::Tie {
        return Comparison { winner, percentage_diff: Some(0) };
    }

    let fastest = a_ms.min(b_ms);
    let percentage_diff = if fastest == 0.0 {
        None
    } else {
        Some(((a_ms - b_ms).abs() / fastest * 100.0).round() as u64)
    };

    Comparison { winner, percentage_diff }
}

impl PairedResult {
    pub fn comparison(&self) -> Comparison {
        compare(self.side_a.time_ms, self.side_b.time_ms)
    }
}

/// Aggregate over many paired results.
///
/// The total-time winner and the per-operation win counts are independent: a
/// side can win more operations and still lose on total time.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Scoreboard {
    pub count: usize,
    pub total_a_ms: f64,
    pub total_b_ms: f64,
    pub average_a_ms: f64,
    pub average_b_ms: f64,
    pub wins_a: usize,
    pub wins_b: usize,
    pub ties: usize,
    pub overall: Comparison,
}

impl Scoreboard {
    /// `None` when there is nothing to score
    pub fn from_results<'a, I>(results: I) -> Option<Self>
    where
        I: IntoIterator<Item = &'a PairedResult>,
    {
        let mut count = 0usize;
        let mut total_a_ms = 0.0;
        let mut total_b_ms = 0.0;
        let mut wins_a = 0usize;
        let mut wins_b = 0usize;
        let mut ties = 0usize;

        for result in results {
            count += 1;
            total_a_ms += result.side_a.time_ms;
            total_b_ms += result.side_b.time_ms;
            match result.comparison().winner {
                Winner::SideA => wins_a += 1,
                Winner::SideB => wins_b += 1,
                Winner::Tie => ties += 1,
            }
        }

        if count == 0 {
            return None;
        }

        Some(Self {
            count,
            total_a_ms,
            total_b_ms,
            average_a_ms: total_a_ms / count as f64,
            average_b_ms: total_b_ms / count as f64,
            wins_a,
            wins_b,
            ties,
            overall: compare(total_a_ms, total_b_ms),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::TimedSample;
    use serde_json::Value;

    fn paired(name: &str, a: f64, b: f64) -> PairedResult {
        PairedResult {
            operation: name.to_string(),
            side_a: TimedSample { data: Value::Null, time_ms: a },
            side_b: TimedSample { data: Value::Null, time_ms: b },
            captured_at_ms: 0,
        }
    }

    #[test]
    fn test_side_a_wins() {
        let cmp = compare(12.34, 15.00);
        assert_eq!(cmp.winner, Winner::SideA);
        assert_eq!(cmp.percentage_diff, Some(22));
    }

    #[test]
    fn test_side_b_wins_asymmetric() {
        // loser took three times as long: 200% longer, not clamped
        let cmp = compare(30.0, 10.0);
        assert_eq!(cmp.winner, Winner::SideB);
        assert_eq!(cmp.percentage_diff, Some(200));
    }

    #[test]
    fn test_tie() {
        let tie = Comparison { winner: Winner::Tie, percentage_diff: Some(0) };
        assert_eq!(compare(10.0, 10.0), tie);
        assert_eq!(compare(0.0, 0.0), tie);
    }

    #[test]
    fn test_zero_winner_has_no_percentage() {
        let cmp = compare(0.0, 4.0);
        assert_eq!(cmp.winner, Winner::SideA);
        assert_eq!(cmp.percentage_diff, None);
    }

    #[test]
    fn test_scoreboard_wins_and_totals_are_independent() {
        // A wins two of three operations but loses badly on the third
        let results = vec![
            paired("crud", 10.0, 11.0),
            paired("joins", 20.0, 21.0),
            paired("bulk", 100.0, 50.0),
        ];
        let board = Scoreboard::from_results(&results).unwrap();

        assert_eq!(board.count, 3);
        assert_eq!(board.wins_a, 2);
        assert_eq!(board.wins_b, 1);
        assert_eq!(board.ties, 0);
        assert_eq!(board.total_a_ms, 130.0);
        assert_eq!(board.total_b_ms, 82.0);
        assert_eq!(board.overall.winner, Winner::SideB);
        assert_eq!(board.overall.percentage_diff, Some(59));
    }

    #[test]
    fn test_scoreboard_empty() {
        assert!(Scoreboard::from_results(&Vec::<PairedResult>::new()).is_none());
    }
}
