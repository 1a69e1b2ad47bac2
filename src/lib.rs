//! ORM Bench Core
//!
//! Paired benchmark engine: two competing implementations of the same named
//! operation are timed one after the other and compared.
//!
//! ## Architecture
//! - Bench: timer, duration formatting, percentile reduction, comparison
//! - Operation: provider trait that external ORM code implements
//! - Orchestrator: single runs, run-all batches, deep runs
//! - Report: text tables and JSON export

pub mod bench;
pub mod config;
pub mod error;
pub mod operation;
pub mod orchestrator;
pub mod report;
pub mod types;

pub use bench::{compare, format_duration, measure, Comparison, Scoreboard};
pub use config::Config;
pub use error::{OrchestratorError, OrchestratorResult};
pub use operation::{FnOperation, Operation, OperationPair, SimulatedOperation};
pub use orchestrator::{BatchReport, RunOrchestrator};
pub use types::{
    AggregateStatistics, DeepRunSummary, OperationState, PairedResult, RunStatus, TimedSample,
    Winner,
};

use std::sync::Arc;
use std::time::Duration;

/// Build an orchestrator whose sides are simulated from the config's latency
/// profiles. Operations without a profile are skipped.
pub fn simulated_orchestrator(config: &Config) -> RunOrchestrator {
    let pairs = config
        .operations
        .iter()
        .filter_map(|op| {
            let profile = config.profile(&op.id)?;
            let side_a =
                SimulatedOperation::new(&config.sides.a, Duration::from_millis(profile.side_a_ms))
                    .failing_every(profile.side_a_fail_every.unwrap_or(0));
            let side_b =
                SimulatedOperation::new(&config.sides.b, Duration::from_millis(profile.side_b_ms))
                    .failing_every(profile.side_b_fail_every.unwrap_or(0));
            Some(OperationPair::new(op.clone(), Arc::new(side_a), Arc::new(side_b)))
        })
        .collect();

    RunOrchestrator::new(pairs).with_repetitions(config.run.deep_run_repetitions)
}
