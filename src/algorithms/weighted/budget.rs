//! Weight axis bound for the profit table.

use tracing::debug;

use crate::config::SolverConfig;
use crate::error::SchedulerError;
use crate::job::TaskSet;

/// Sum of the `on_time` largest weights.
///
/// No on-time subset holds more than `on_time` jobs, so no on-time subset can
/// weigh more than this. The set is sorted by weight to pick the jobs and left in
/// EDD order on return.
///
/// # Errors
///
/// - `InvariantViolation` if `on_time` exceeds the number of jobs
/// - `InputFormat` if the weights overflow `u64`
pub fn weight_budget(
    jobs: &mut TaskSet,
    on_time: usize,
    config: &SolverConfig,
) -> Result<u64, SchedulerError> {
    if on_time > jobs.len() {
        return Err(SchedulerError::InvariantViolation(format!(
            "on-time count {} exceeds job count {}",
            on_time,
            jobs.len()
        )));
    }

    jobs.sort_by_weight_desc();
    let budget = jobs
        .iter()
        .take(on_time)
        .try_fold(0u64, |acc, j| acc.checked_add(j.w()));
    jobs.sort_edd();

    let budget = budget.ok_or_else(|| {
        SchedulerError::InputFormat("sum of job weights overflows".to_string())
    })?;

    if config.verbose {
        debug!("WI: {}", budget);
    }
    Ok(budget)
}
