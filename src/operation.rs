//! Operation providers
//!
//! An operation is one side of a comparison: a repeatable unit of async work
//! that resolves to an opaque payload or fails. The engine never looks inside.
//! Providers own whatever client or connection they need; nothing here knows
//! about databases.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use futures::future::BoxFuture;
use serde_json::json;

use crate::types::{OperationConfig, Payload};

/// One competing implementation of a named operation
#[async_trait]
pub trait Operation: Send + Sync {
    async fn invoke(&self) -> anyhow::Result<Payload>;
}

/// Closure-backed operation, the usual way external code plugs in
pub struct FnOperation {
    f: Box<dyn Fn() -> BoxFuture<'static, anyhow::Result<Payload>> + Send + Sync>,
}

impl FnOperation {
    pub fn new<F>(f: F) -> Self
    where
        F: Fn() -> BoxFuture<'static, anyhow::Result<Payload>> + Send + Sync + 'static,
    {
        Self { f: Box::new(f) }
    }
}

#[async_trait]
impl Operation for FnOperation {
    async fn invoke(&self) -> anyhow::Result<Payload> {
        (self.f)().await
    }
}

/// Sleeps for a fixed latency; optionally fails on every N-th call
pub struct SimulatedOperation {
    label: String,
    latency: Duration,
    fail_every: Option<u64>,
    calls: AtomicU64,
}

impl SimulatedOperation {
    pub fn new(label: impl Into<String>, latency: Duration) -> Self {
        Self {
            label: label.into(),
            latency,
            fail_every: None,
            calls: AtomicU64::new(0),
        }
    }

    /// Fail on calls N, 2N, 3N, ... (1-based). Zero disables failures.
    pub fn failing_every(mut self, n: u64) -> Self {
        self.fail_every = (n > 0).then_some(n);
        self
    }

    pub fn calls(&self) -> u64 {
        self.calls.load(Ordering::Relaxed)
    }
}

#[async_trait]
impl Operation for SimulatedOperation {
    async fn invoke(&self) -> anyhow::Result<Payload> {
        let call = self.calls.fetch_add(1, Ordering::Relaxed) + 1;

        tokio::time::sleep(self.latency).await;

        if let Some(n) = self.fail_every {
            if call % n == 0 {
                anyhow::bail!("{}: simulated failure on call {}", self.label, call);
            }
        }

        Ok(json!({ "label": self.label, "call": call }))
    }
}

/// A named operation with its two competing implementations
#[derive(Clone)]
pub struct OperationPair {
    pub config: OperationConfig,
    pub side_a: Arc<dyn Operation>,
    pub side_b: Arc<dyn Operation>,
}

impl OperationPair {
    pub fn new(
        config: OperationConfig,
        side_a: Arc<dyn Operation>,
        side_b: Arc<dyn Operation>,
    ) -> Self {
        Self { config, side_a, side_b }
    }

    pub fn id(&self) -> &str {
        &self.config.id
    }
}
