//! Benchmark module
//! Timing, formatting, percentile reduction and paired comparison

pub mod compare;
pub mod format;
pub mod stats;
pub mod timer;

pub use compare::{compare, Comparison, Scoreboard};
pub use format::format_duration;
pub use stats::percentile;
pub use timer::{measure, round2};
