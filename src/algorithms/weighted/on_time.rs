//! Moore-Hodgson bound on the number of jobs that can finish on time.

use tracing::{debug, trace};

use crate::config::SolverConfig;
use crate::error::SchedulerError;
use crate::job::{Job, TaskSet};
use crate::Id;

/// Returns the maximum number of jobs that can all meet their deadlines.
///
/// Jobs are scanned in EDD order while a running completion time is kept. Whenever
/// the job just scanned would finish late, the longest job scanned so far (first
/// one on ties) is evicted and its processing time given back. Only the count of
/// the surviving candidates is returned.
///
/// # Errors
///
/// `InvariantViolation` if `jobs` is not in EDD order.
pub fn on_time_count(jobs: &TaskSet, config: &SolverConfig) -> Result<usize, SchedulerError> {
    if !jobs.is_edd_ordered() {
        return Err(SchedulerError::InvariantViolation(
            "on-time filter requires jobs in EDD order".to_string(),
        ));
    }

    let mut remaining = jobs.len();
    let mut on_time: Vec<&Job> = Vec::with_capacity(jobs.len());
    let mut late: Vec<Id> = Vec::new();
    let mut elapsed: u64 = 0;

    for job in jobs {
        if remaining == 0 {
            return Ok(0);
        }

        elapsed += u64::from(job.p());
        on_time.push(job);

        if elapsed > u64::from(job.d()) {
            let idx = longest_position(&on_time).ok_or_else(|| {
                SchedulerError::InvariantViolation("no candidate left to evict".to_string())
            })?;
            let evicted = on_time.remove(idx);
            elapsed -= u64::from(evicted.p());
            remaining -= 1;
            late.push(evicted.id());

            trace!(late_at = job.id(), evicted = evicted.id(), elapsed, "evicted longest job");
            if config.verbose {
                debug!(
                    on_time = ?on_time.iter().map(|j| j.id()).collect::<Vec<_>>(),
                    late = ?late,
                    "job {} would be late",
                    job.id()
                );
            }
        }
    }

    debug!(on_time = remaining, n = jobs.len(), "moore-hodgson bound");
    Ok(remaining)
}

/// Index of the job with the largest processing time, first one on ties.
fn longest_position(jobs: &[&Job]) -> Option<usize> {
    jobs.iter()
        .enumerate()
        .fold(None, |best: Option<(usize, u32)>, (i, j)| match best {
            Some((_, p)) if p >= j.p() => best,
            _ => Some((i, j.p())),
        })
        .map(|(i, _)| i)
}
