//! Wall-clock timing of a single async operation

use std::future::Future;
use std::time::Instant;

use crate::types::TimedSample;

/// Round to two decimal places
#[inline]
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Time one async operation.
///
/// The clock starts immediately before the future is first polled and stops
/// as soon as it settles. Errors are returned exactly as the operation
/// produced them and no sample is recorded for a failed run.
pub async fn measure<F, T, E>(operation: F) -> Result<TimedSample<T>, E>
where
    F: Future<Output = Result<T, E>>,
{
    let start = Instant::now();
    let outcome = operation.await;
    let elapsed_ms = start.elapsed().as_secs_f64() * 1000.0;

    let data = outcome?;
    Ok(TimedSample {
        data,
        time_ms: round2(elapsed_ms),
    })
}
