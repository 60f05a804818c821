//! Backtracking from a filled [`ProfitTable`] to a concrete job subset.

use tracing::{debug, trace};

use crate::config::SolverConfig;
use crate::error::SchedulerError;
use crate::job::{Job, TaskSet};

use super::table::ProfitTable;

/// Job subset recovered from the table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selection {
    /// Selected jobs in discovery order (reverse EDD).
    pub jobs: Vec<Job>,
    /// Sum of the selected weights, in table units.
    pub profit: u64,
}

/// Walks the table from the last row back to the first.
///
/// Starts at the largest feasible column of the last row with the last job's
/// deadline as slack `dd`. At every row the job is skipped when the row above
/// already realizes the same weight within `dd`; otherwise the cell could only
/// come from including the job, which is selected, and `dd` shrinks to the time
/// left before it starts. Equal-value ties resolve towards exclusion.
///
/// # Errors
///
/// `InvariantViolation` if the table does not match `jobs` or a cell that must be
/// feasible is not.
pub fn reconstruct(
    table: &ProfitTable,
    jobs: &TaskSet,
    config: &SolverConfig,
) -> Result<Selection, SchedulerError> {
    if table.rows() != jobs.len() || jobs.is_empty() {
        return Err(SchedulerError::InvariantViolation(format!(
            "table has {} rows for {} jobs",
            table.rows(),
            jobs.len()
        )));
    }

    let broken = |row: usize, w: u64| {
        SchedulerError::InvariantViolation(format!(
            "cell ({}, {}) was expected to be feasible",
            row, w
        ))
    };

    let mut row = jobs.len() - 1;
    let mut w = table
        .best_column()
        .ok_or_else(|| broken(row, 0))?;
    let mut dd = u64::from(jobs[row].d());
    if table.get(row, w).map_or(true, |t| t > dd) {
        return Err(broken(row, w));
    }

    let mut selected = Vec::new();
    let mut profit = 0u64;

    while w > 0 && dd > 0 {
        let job = jobs[row];
        let p = u64::from(job.p());

        if row == 0 {
            let fits = table.get(0, w).is_some_and(|t| t <= dd);
            if w != job.w() || !fits {
                return Err(broken(0, w));
            }
            selected.push(job);
            profit += job.w();
            w = 0;
            break;
        }

        if table.get(row - 1, w).is_some_and(|t| t <= dd) {
            row -= 1;
            continue;
        }

        let v = w.checked_sub(job.w()).ok_or_else(|| broken(row - 1, w))?;
        let limit = dd.min(u64::from(job.d()));
        let before = table
            .get(row - 1, v)
            .filter(|&t| t + p <= limit)
            .ok_or_else(|| broken(row - 1, v))?;

        trace!(job = job.id(), row, w, dd, before, "selected");
        selected.push(job);
        profit += job.w();
        dd = limit - p;
        w = v;
        row -= 1;
    }

    if w != 0 {
        return Err(broken(row, w));
    }
    if profit > table.budget() {
        return Err(SchedulerError::InvariantViolation(format!(
            "profit {} exceeds weight budget {}",
            profit,
            table.budget()
        )));
    }

    if config.verbose {
        debug!(
            selected = ?selected.iter().map(|j| j.id()).collect::<Vec<_>>(),
            profit,
            "solution"
        );
    }

    Ok(Selection {
        jobs: selected,
        profit,
    })
}
