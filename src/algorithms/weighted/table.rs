//! Pseudo-polynomial DP table over (job prefix, total weight).

use std::fmt::Display;

use tracing::debug;

use crate::config::SolverConfig;
use crate::error::SchedulerError;
use crate::job::TaskSet;

/// Dense DP table.
///
/// `get(i, w)` is the smallest total processing time of a subset of the first
/// `i + 1` EDD-ordered jobs weighing exactly `w` in which every job, run in EDD
/// order, meets its own deadline. `None` marks an infeasible cell.
///
/// # Invariants
///
/// - `rows() == jobs.len()` and columns span `0..=budget()`
/// - column 0 of every row holds `Some(0)`: the empty schedule
/// - a feasible cell never exceeds the deadline of the last job it includes
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProfitTable {
    rows: usize,
    columns: usize,
    cells: Vec<Option<u64>>,
}

impl ProfitTable {
    /// Fills the table for `jobs` (EDD order) with weights in `0..=budget`.
    ///
    /// A job is added only when the prefix it extends finishes early enough for it
    /// to meet its deadline, so infeasible partial schedules never propagate.
    ///
    /// # Errors
    ///
    /// - `InvariantViolation` if `jobs` is empty or not in EDD order
    /// - `InputFormat` if the table would exceed `config.max_table_cells`
    pub fn build(
        jobs: &TaskSet,
        budget: u64,
        config: &SolverConfig,
    ) -> Result<Self, SchedulerError> {
        if jobs.is_empty() {
            return Err(SchedulerError::InvariantViolation(
                "profit table needs at least one job".to_string(),
            ));
        }
        if !jobs.is_edd_ordered() {
            return Err(SchedulerError::InvariantViolation(
                "profit table requires jobs in EDD order".to_string(),
            ));
        }

        let rows = jobs.len();
        let too_large = || {
            SchedulerError::InputFormat(format!(
                "weight budget {} needs more than {} table cells; use an FPTAS factor",
                budget, config.max_table_cells
            ))
        };
        let columns = usize::try_from(budget)
            .ok()
            .and_then(|b| b.checked_add(1))
            .ok_or_else(too_large)?;
        let size = rows.checked_mul(columns).ok_or_else(too_large)?;
        if size > config.max_table_cells {
            return Err(too_large());
        }

        let mut cells = vec![None; size];

        let first = jobs[0];
        cells[0] = Some(0);
        if first.w() <= budget && first.p() <= first.d() {
            let w = first.w() as usize;
            let p = u64::from(first.p());
            cells[w] = Some(cells[w].map_or(p, |t| t.min(p)));
        }

        for i in 1..rows {
            let job = jobs[i];
            let wi = job.w();
            let p = u64::from(job.p());
            let d = u64::from(job.d());

            let (done, rest) = cells.split_at_mut(i * columns);
            let prev = &done[(i - 1) * columns..];
            let cur = &mut rest[..columns];

            for (w, cell) in cur.iter_mut().enumerate() {
                let exclude = prev[w];
                let include = (w as u64)
                    .checked_sub(wi)
                    .and_then(|v| prev[v as usize])
                    .map(|t| t + p)
                    .filter(|&t| t <= d);

                *cell = match (exclude, include) {
                    (Some(a), Some(b)) => Some(a.min(b)),
                    (a, None) => a,
                    (None, b) => b,
                };
            }
        }

        let table = Self {
            rows,
            columns,
            cells,
        };
        debug!(
            rows,
            columns,
            best = ?table.best_column(),
            "profit table built"
        );
        if config.verbose {
            debug!("profit table:\n{}", table);
        }
        Ok(table)
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Largest column index (the weight budget WI).
    pub fn budget(&self) -> u64 {
        (self.columns - 1) as u64
    }

    /// Cell `(row, w)`. Out-of-range coordinates read as infeasible.
    pub fn get(&self, row: usize, w: u64) -> Option<u64> {
        if row >= self.rows || w >= self.columns as u64 {
            return None;
        }
        self.cells[row * self.columns + w as usize]
    }

    pub fn row(&self, row: usize) -> &[Option<u64>] {
        &self.cells[row * self.columns..(row + 1) * self.columns]
    }

    /// Largest weight reachable by a feasible subset of all jobs.
    pub fn best_column(&self) -> Option<u64> {
        self.row(self.rows - 1)
            .iter()
            .rposition(Option::is_some)
            .map(|w| w as u64)
    }
}

impl Display for ProfitTable {
    /// One row per job, tab-separated, `∞` for infeasible cells.
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for row in 0..self.rows {
            let line = self
                .row(row)
                .iter()
                .map(|cell| match cell {
                    Some(t) => t.to_string(),
                    None => "∞".to_string(),
                })
                .collect::<Vec<_>>()
                .join("\t");
            writeln!(f, "{}", line)?;
        }
        Ok(())
    }
}
