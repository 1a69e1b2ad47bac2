//! Percentile and aggregate reduction of repeated timing samples

use crate::bench::timer::round2;
use crate::types::AggregateStatistics;

fn sorted_copy(values: &[f64]) -> Vec<f64> {
    let mut sorted = values.to_vec();
    sorted.sort_by(|a, b| a.total_cmp(b));
    sorted
}

/// Nearest-rank index into a sorted sequence of `len` values
#[inline]
fn rank_index(p: f64, len: usize) -> usize {
    let rank = (p * len as f64).ceil() as i64 - 1;
    rank.clamp(0, len as i64 - 1) as usize
}

/// Nearest-rank percentile, `p` in (0, 1]. Empty input yields 0.
pub fn percentile(values: &[f64], p: f64) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    let sorted = sorted_copy(values);
    sorted[rank_index(p, sorted.len())]
}

impl AggregateStatistics {
    /// Reduce raw samples. Empty input yields all zeros.
    pub fn from_samples(values: &[f64]) -> Self {
        if values.is_empty() {
            return Self::default();
        }

        let sorted = sorted_copy(values);
        let len = sorted.len();
        let total: f64 = sorted.iter().sum();

        Self {
            p95: sorted[rank_index(0.95, len)],
            p90: sorted[rank_index(0.90, len)],
            average: round2(total / len as f64),
            minimum: sorted[0],
            maximum: sorted[len - 1],
        }
    }
}

impl std::fmt::Display for AggregateStatistics {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "avg: {:>10} | p90: {:>10} | p95: {:>10} | min: {:>10} | max: {:>10}",
            crate::bench::format_duration(self.average),
            crate::bench::format_duration(self.p90),
            crate::bench::format_duration(self.p95),
            crate::bench::format_duration(self.minimum),
            crate::bench::format_duration(self.maximum),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_reference_samples() {
        let samples = [10.0, 20.0, 30.0, 40.0, 50.0, 60.0, 70.0, 80.0, 90.0, 100.0];
        let stats = AggregateStatistics::from_samples(&samples);

        assert_eq!(stats.average, 55.0);
        assert_eq!(stats.minimum, 10.0);
        assert_eq!(stats.maximum, 100.0);
        assert_eq!(stats.p90, 90.0);
        assert_eq!(stats.p95, 100.0);
    }

    #[test]
    fn test_unsorted_input_is_not_mutated() {
        let samples = vec![30.0, 10.0, 20.0];
        let stats = AggregateStatistics::from_samples(&samples);

        assert_eq!(samples, vec![30.0, 10.0, 20.0]);
        assert_eq!(stats.minimum, 10.0);
        assert_eq!(stats.maximum, 30.0);
        assert_eq!(stats.average, 20.0);
    }

    #[test]
    fn test_empty_is_all_zero() {
        assert_eq!(AggregateStatistics::from_samples(&[]), AggregateStatistics::default());
        assert_eq!(percentile(&[], 0.95), 0.0);
    }

    #[test]
    fn test_single_sample() {
        let stats = AggregateStatistics::from_samples(&[4.2]);
        assert_eq!(stats.p90, 4.2);
        assert_eq!(stats.p95, 4.2);
        assert_eq!(stats.minimum, 4.2);
        assert_eq!(stats.maximum, 4.2);
        assert_eq!(stats.average, 4.2);
    }

    #[test]
    fn test_two_samples() {
        // ceil(0.9 * 2) - 1 == 1 and ceil(0.95 * 2) - 1 == 1
        let stats = AggregateStatistics::from_samples(&[8.0, 3.0]);
        assert_eq!(stats.p90, 8.0);
        assert_eq!(stats.p95, 8.0);
        assert_eq!(stats.average, 5.5);
    }

    #[test]
    fn test_average_rounding() {
        let stats = AggregateStatistics::from_samples(&[1.0, 1.0, 2.0]);
        assert_eq!(stats.average, 1.33);
    }

    #[test]
    fn test_percentile_low_rank_clamps() {
        assert_eq!(percentile(&[5.0, 1.0, 3.0], 0.01), 1.0);
        assert_eq!(percentile(&[5.0, 1.0, 3.0], 1.0), 5.0);
    }

    proptest! {
        #[test]
        fn prop_average_within_bounds(values in prop::collection::vec(0.0f64..10_000.0, 1..64)) {
            let stats = AggregateStatistics::from_samples(&values);
            // average is rounded to two decimals, allow for that
            prop_assert!(stats.minimum <= stats.average + 0.005);
            prop_assert!(stats.average <= stats.maximum + 0.005);
        }

        #[test]
        fn prop_percentiles_are_members(values in prop::collection::vec(0.0f64..10_000.0, 1..64)) {
            let stats = AggregateStatistics::from_samples(&values);
            prop_assert!(values.contains(&stats.p90));
            prop_assert!(values.contains(&stats.p95));
            prop_assert!(stats.p90 <= stats.p95);
            prop_assert!(stats.minimum <= stats.p90 && stats.p95 <= stats.maximum);
        }

        #[test]
        fn prop_idempotent(values in prop::collection::vec(0.0f64..10_000.0, 0..32)) {
            prop_assert_eq!(
                AggregateStatistics::from_samples(&values),
                AggregateStatistics::from_samples(&values)
            );
        }
    }
}
