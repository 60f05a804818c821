//! FPTAS weight rescaling.
//!
//! Every weight is divided by the factor `k` and rounded down before the table is
//! built, which shrinks the weight axis by roughly `k`. The profit found on the
//! rescaled instance is multiplied back by `k`; rounding down means the result
//! never overestimates the exact optimum.

use tracing::debug;

use crate::config::SolverConfig;
use crate::error::SchedulerError;
use crate::job::TaskSet;

/// Rescaled job set and the accuracy it was produced with.
#[derive(Debug, Clone, PartialEq)]
pub struct Rescaled {
    pub jobs: TaskSet,
    pub epsilon: f64,
}

/// `k / (max_weight / n)`.
pub fn epsilon(k: f64, n: usize, max_weight: u64) -> f64 {
    k / (max_weight as f64 / n as f64)
}

/// Rejects factors that cannot be applied to a set whose heaviest job weighs `max_weight`.
pub fn validate_factor(k: f64, max_weight: u64) -> Result<(), SchedulerError> {
    let reason = if !k.is_finite() {
        "factor must be finite"
    } else if k <= 0.0 {
        "factor must be positive"
    } else if k > max_weight as f64 {
        "factor exceeds the maximum job weight"
    } else {
        return Ok(());
    };
    Err(SchedulerError::ApproximationParameter { k, reason })
}

/// Weight of a job after dividing by `k`.
pub fn scaled_weight(w: u64, k: f64) -> u64 {
    (w as f64 / k).floor() as u64
}

/// Divides every weight by `k`.
///
/// `k == 1` returns the set unchanged.
///
/// # Errors
///
/// - `InputFormat` if `jobs` is empty
/// - `ApproximationParameter` if `k` is rejected by [`validate_factor`]
pub fn rescale(jobs: &TaskSet, k: f64, config: &SolverConfig) -> Result<Rescaled, SchedulerError> {
    if jobs.is_empty() {
        return Err(SchedulerError::InputFormat(
            "cannot rescale an empty job set".to_string(),
        ));
    }
    let max_weight = jobs.max_weight();
    validate_factor(k, max_weight)?;

    let epsilon = epsilon(k, jobs.len(), max_weight);
    debug!(k, epsilon, "FPTAS accuracy");

    let jobs = if k == 1.0 {
        jobs.clone()
    } else {
        jobs.map_jobs(|j| j.with_weight(scaled_weight(j.w(), k)))
    };

    if config.verbose {
        debug!(
            k,
            total_weight = %jobs.total_weight(),
            max_weight = jobs.max_weight(),
            "rescaled weights"
        );
    }

    Ok(Rescaled { jobs, epsilon })
}
