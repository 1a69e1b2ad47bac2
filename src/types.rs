//! Core types for the benchmark engine

use serde::{Deserialize, Serialize};

/// Opaque result returned by an operation provider
pub type Payload = serde_json::Value;

/// Operation categories
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Crud,
    Joins,
    Aggregations,
    Subqueries,
    Transactions,
    Bulk,
}

/// One of the two competing implementations
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Side {
    A,
    B,
}

impl Side {
    pub fn as_str(&self) -> &'static str {
        match self {
            Side::A => "a",
            Side::B => "b",
        }
    }
}

/// Outcome of comparing two timings
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Winner {
    SideA,
    SideB,
    Tie,
}

/// Run status of a named operation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RunStatus {
    #[default]
    Idle,
    Running,
    Completed,
    Error,
}

/// Status plus the last failure message, if any
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct OperationState {
    pub status: RunStatus,
    pub error: Option<String>,
}

/// Static description of a named operation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OperationConfig {
    pub id: String,
    pub name: String,
    pub description: String,
    pub category: Category,
}

/// Result of one timed invocation
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TimedSample<T> {
    pub data: T,
    /// Elapsed wall-clock time, rounded to two decimals
    pub time_ms: f64,
}

/// One comparative run of a named operation
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PairedResult {
    pub operation: String,
    pub side_a: TimedSample<Payload>,
    pub side_b: TimedSample<Payload>,
    pub captured_at_ms: u64,
}

/// Reduced statistics over repeated samples of one side
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct AggregateStatistics {
    pub p95: f64,
    pub p90: f64,
    pub average: f64,
    pub minimum: f64,
    pub maximum: f64,
}

/// Per-operation output of a deep run
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DeepRunSummary {
    pub operation: String,
    pub side_a: AggregateStatistics,
    pub side_b: AggregateStatistics,
    /// Successful repetitions only
    pub runs: usize,
    pub requested: usize,
}
