//! Human-readable durations

/// Format a millisecond duration with a unit that fits its magnitude
pub fn format_duration(ms: f64) -> String {
    if ms < 1.0 {
        format!("{:.2}µs", ms * 1000.0)
    } else if ms < 1000.0 {
        format!("{:.2}ms", ms)
    } else {
        format!("{:.2}s", ms / 1000.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unit_boundaries() {
        assert_eq!(format_duration(0.5), "500.00µs");
        assert_eq!(format_duration(1.0), "1.00ms");
        assert_eq!(format_duration(999.99), "999.99ms");
        assert_eq!(format_duration(1000.0), "1.00s");
        assert_eq!(format_duration(1500.0), "1.50s");
    }

    #[test]
    fn test_total() {
        assert_eq!(format_duration(0.0), "0.00µs");
        assert_eq!(format_duration(3_600_000.0), "3600.00s");
    }

    #[test]
    fn test_idempotent() {
        assert_eq!(format_duration(12.345), format_duration(12.345));
    }
}
