//! Run orchestrator
//!
//! Sequences single runs, run-all batches and deep runs over the registered
//! operation pairs. Side A always settles before side B starts, and operation
//! K settles before operation K+1 starts. Only one run of any kind may be
//! active at a time.

use std::sync::atomic::{AtomicBool, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};

use dashmap::DashMap;
use parking_lot::Mutex;
use serde::Serialize;
use tracing::{debug, info, warn};

use crate::bench::{measure, Scoreboard};
use crate::error::{OrchestratorError, OrchestratorResult};
use crate::operation::OperationPair;
use crate::types::{
    AggregateStatistics, DeepRunSummary, OperationState, PairedResult, RunStatus, Side,
    TimedSample,
};

/// Repetitions per deep run unless configured otherwise
pub const DEFAULT_REPETITIONS: usize = 10;

/// Outcome of a run-all batch
#[derive(Debug, Clone, Default, Serialize)]
pub struct BatchReport {
    pub succeeded: Vec<String>,
    pub failed: Vec<(String, String)>,
}

/// Holds the active flag for the lifetime of a sequence
struct SequenceGuard<'a>(&'a AtomicBool);

impl Drop for SequenceGuard<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

/// Drives paired runs and keeps the latest results in memory
pub struct RunOrchestrator {
    operations: Vec<OperationPair>,
    repetitions: usize,
    results: DashMap<String, PairedResult>,
    deep_results: DashMap<String, DeepRunSummary>,
    states: DashMap<String, OperationState>,
    current: Mutex<Option<String>>,
    active: AtomicBool,
}

impl RunOrchestrator {
    pub fn new(operations: Vec<OperationPair>) -> Self {
        let states = DashMap::new();
        for pair in &operations {
            states.insert(pair.id().to_string(), OperationState::default());
        }

        Self {
            operations,
            repetitions: DEFAULT_REPETITIONS,
            results: DashMap::new(),
            deep_results: DashMap::new(),
            states,
            current: Mutex::new(None),
            active: AtomicBool::new(false),
        }
    }

    /// Set how many repetitions a deep run performs
    pub fn with_repetitions(mut self, repetitions: usize) -> Self {
        self.repetitions = repetitions;
        self
    }

    pub fn repetitions(&self) -> usize {
        self.repetitions
    }

    pub fn operations(&self) -> &[OperationPair] {
        &self.operations
    }

    /// True while any run is active
    pub fn is_busy(&self) -> bool {
        self.active.load(Ordering::Acquire)
    }

    /// Id of the operation currently executing, if any
    pub fn current_operation(&self) -> Option<String> {
        self.current.lock().clone()
    }

    pub fn status(&self, id: &str) -> OperationState {
        self.states
            .get(id)
            .map(|s| s.value().clone())
            .unwrap_or_default()
    }

    /// Latest paired result for an operation
    pub fn result(&self, id: &str) -> Option<PairedResult> {
        self.results.get(id).map(|r| r.value().clone())
    }

    /// Latest paired results, in registration order
    pub fn results(&self) -> Vec<PairedResult> {
        self.operations
            .iter()
            .filter_map(|pair| self.result(pair.id()))
            .collect()
    }

    pub fn deep_summary(&self, id: &str) -> Option<DeepRunSummary> {
        self.deep_results.get(id).map(|r| r.value().clone())
    }

    /// Deep-run summaries, in registration order
    pub fn deep_summaries(&self) -> Vec<DeepRunSummary> {
        self.operations
            .iter()
            .filter_map(|pair| self.deep_summary(pair.id()))
            .collect()
    }

    /// Totals and win counts over the latest results
    pub fn scoreboard(&self) -> Option<Scoreboard> {
        Scoreboard::from_results(&self.results())
    }

    /// Run one operation once. Rejected while another run is active.
    pub async fn run_single(&self, id: &str) -> OrchestratorResult<PairedResult> {
        let pair = self.find(id)?;
        let _guard = self.begin_sequence()?;

        self.set_current(Some(pair.id()));
        let outcome = self.execute(pair).await;
        self.set_current(None);
        outcome
    }

    /// Run every registered operation once, in order. Failures are recorded
    /// and the batch moves on to the next operation.
    pub async fn run_all(&self) -> OrchestratorResult<BatchReport> {
        let _guard = self.begin_sequence()?;
        self.results.clear();

        info!("Running all {} operations", self.operations.len());
        let mut report = BatchReport::default();

        for pair in &self.operations {
            self.set_current(Some(pair.id()));
            match self.execute(pair).await {
                Ok(_) => report.succeeded.push(pair.id().to_string()),
                Err(e) => {
                    warn!("Failed to run {}: {}", pair.config.name, e);
                    report.failed.push((pair.id().to_string(), e.to_string()));
                }
            }
        }

        self.set_current(None);
        info!(
            "Run-all finished | ok: {} | failed: {}",
            report.succeeded.len(),
            report.failed.len()
        );
        Ok(report)
    }

    /// Repeat one operation and reduce the samples
    pub async fn deep_run(&self, id: &str) -> OrchestratorResult<DeepRunSummary> {
        let pair = self.find(id)?;
        let _guard = self.begin_sequence()?;

        let summary = self.sample(pair).await;
        self.set_current(None);
        Ok(summary)
    }

    /// Deep-run every registered operation in turn
    pub async fn deep_run_all(&self) -> OrchestratorResult<Vec<DeepRunSummary>> {
        let _guard = self.begin_sequence()?;
        self.deep_results.clear();

        let mut summaries = Vec::with_capacity(self.operations.len());
        for pair in &self.operations {
            summaries.push(self.sample(pair).await);
        }

        self.set_current(None);
        Ok(summaries)
    }

    fn find(&self, id: &str) -> OrchestratorResult<&OperationPair> {
        self.operations
            .iter()
            .find(|pair| pair.id() == id)
            .ok_or_else(|| OrchestratorError::UnknownOperation(id.to_string()))
    }

    fn begin_sequence(&self) -> OrchestratorResult<SequenceGuard<'_>> {
        self.active
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .map(|_| SequenceGuard(&self.active))
            .map_err(|_| OrchestratorError::Busy)
    }

    fn set_current(&self, id: Option<&str>) {
        *self.current.lock() = id.map(str::to_string);
    }

    fn set_state(&self, id: &str, status: RunStatus, error: Option<String>) {
        self.states
            .insert(id.to_string(), OperationState { status, error });
    }

    async fn sample(&self, pair: &OperationPair) -> DeepRunSummary {
        let id = pair.id();
        info!("Deep run: {} x{}", pair.config.name, self.repetitions);
        self.set_current(Some(id));

        let mut side_a = Vec::with_capacity(self.repetitions);
        let mut side_b = Vec::with_capacity(self.repetitions);

        for i in 0..self.repetitions {
            match self.execute(pair).await {
                Ok(result) => {
                    side_a.push(result.side_a.time_ms);
                    side_b.push(result.side_b.time_ms);
                }
                Err(e) => warn!("Deep run {} repetition {} dropped: {}", id, i + 1, e),
            }
        }

        let summary = DeepRunSummary {
            operation: pair.config.name.clone(),
            side_a: AggregateStatistics::from_samples(&side_a),
            side_b: AggregateStatistics::from_samples(&side_b),
            runs: side_a.len(),
            requested: self.repetitions,
        };

        self.deep_results.insert(id.to_string(), summary.clone());
        summary
    }

    /// Time side A to completion, then side B, and store the pair
    async fn execute(&self, pair: &OperationPair) -> OrchestratorResult<PairedResult> {
        let id = pair.id().to_string();
        self.set_state(&id, RunStatus::Running, None);

        let outcome = self.time_pair(pair).await;

        match outcome {
            Ok(result) => {
                debug!(
                    "{} | a: {:.2}ms | b: {:.2}ms",
                    id, result.side_a.time_ms, result.side_b.time_ms
                );
                self.results.insert(id.clone(), result.clone());
                self.set_state(&id, RunStatus::Completed, None);
                Ok(result)
            }
            Err(source) => {
                warn!("Operation {} failed: {:#}", id, source);
                metrics::counter!("ormbench_operation_failures_total", "operation" => id.clone())
                    .increment(1);
                self.set_state(&id, RunStatus::Error, Some(source.to_string()));
                Err(OrchestratorError::Operation { id, source })
            }
        }
    }

    async fn time_pair(&self, pair: &OperationPair) -> anyhow::Result<PairedResult> {
        let side_a = measure(pair.side_a.invoke()).await?;
        record_sample(pair.id(), Side::A, &side_a);

        let side_b = measure(pair.side_b.invoke()).await?;
        record_sample(pair.id(), Side::B, &side_b);

        Ok(PairedResult {
            operation: pair.config.name.clone(),
            side_a,
            side_b,
            captured_at_ms: epoch_ms(),
        })
    }
}

fn record_sample<T>(id: &str, side: Side, sample: &TimedSample<T>) {
    metrics::histogram!(
        "ormbench_side_elapsed_ms",
        "operation" => id.to_string(),
        "side" => side.as_str()
    )
    .record(sample.time_ms);
}

fn epoch_ms() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0)
}
