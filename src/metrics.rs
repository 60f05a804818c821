//! Metrics of a job sequence run back to back from time zero.

use crate::job::Job;

/// Completion time of every job when the sequence runs without idle time.
pub fn completion_times<'a>(jobs: impl IntoIterator<Item = &'a Job>) -> Vec<u64> {
    jobs.into_iter()
        .scan(0u64, |elapsed, job| {
            *elapsed += u64::from(job.p());
            Some(*elapsed)
        })
        .collect()
}

/// Largest `C_j - d_j` over the sequence, `None` for an empty sequence.
pub fn max_lateness(jobs: &[Job]) -> Option<i64> {
    completion_times(jobs)
        .into_iter()
        .zip(jobs)
        .map(|(c, job)| c as i64 - i64::from(job.d()))
        .max()
}

/// True when every job of the sequence meets its deadline.
pub fn is_on_time(jobs: &[Job]) -> bool {
    max_lateness(jobs).map_or(true, |l| l <= 0)
}

/// Sum of job weights, widened so that any number of `u64` weights fits.
pub fn total_weight<'a>(jobs: impl IntoIterator<Item = &'a Job>) -> u128 {
    jobs.into_iter().map(|j| u128::from(j.w())).sum()
}
