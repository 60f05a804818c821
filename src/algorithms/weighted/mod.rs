//! Maximum weight of on-time jobs on a single machine.
//!
//! The pipeline runs in this order:
//!
//! 1. **EDD sort**: jobs are ordered by non-decreasing deadline (ties by id).
//! 2. **FPTAS rescale** (optional): weights are divided by `k` and rounded down.
//! 3. **On-time bound** ([`on_time`]): Moore-Hodgson gives the largest number of
//!    jobs that can all be on time.
//! 4. **Weight budget** ([`budget`]): the sum of that many heaviest weights caps
//!    the weight axis of the table.
//! 5. **Profit table** ([`table`]): `table[i][w]` holds the least processing time
//!    of a deadline-feasible subset of the first `i + 1` jobs weighing `w`.
//! 6. **Reconstruction** ([`reconstruct`]): the table is walked backwards into a
//!    concrete subset. The table is dropped afterwards.
//!
//! Time is `O(n · WI)`, pseudo-polynomial in the weights; the FPTAS factor trades
//! exactness for a narrower table.
//!
//! # Module Structure
//!
//! - [`on_time`] - Moore-Hodgson cardinality bound
//! - [`budget`] - weight budget WI
//! - [`table`] - DP table construction
//! - [`reconstruct`] - backtracking to a job subset
//! - [`fptas`] - weight rescaling

pub mod budget;
pub mod fptas;
pub mod on_time;
pub mod reconstruct;
pub mod table;

#[cfg(test)]
mod tests;

use tracing::{debug, info, instrument};

use crate::config::SolverConfig;
use crate::error::SchedulerError;
use crate::job::TaskSet;
use crate::solution::{ScheduleReport, Solution};

use budget::weight_budget;
use on_time::on_time_count;
use reconstruct::reconstruct;
use table::ProfitTable;

/// Maximizes the total weight of on-time jobs.
#[derive(Debug, Clone, Default)]
pub struct WeightedOnTimeScheduler {
    config: SolverConfig,
}

impl WeightedOnTimeScheduler {
    pub fn new(config: SolverConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &SolverConfig {
        &self.config
    }

    /// Runs the full pipeline on `jobs`. The input set is left untouched.
    ///
    /// # Errors
    ///
    /// - `InputFormat` for an empty or inconsistent job set, or a table too large
    ///   for `max_table_cells`
    /// - `ApproximationParameter` for an unusable FPTAS factor
    /// - `InvariantViolation` if internal state is found corrupted
    #[instrument(level = "debug", skip_all, fields(n = jobs.len()))]
    pub fn solve(&self, jobs: &TaskSet) -> Result<ScheduleReport, SchedulerError> {
        let config = &self.config;
        jobs.validate()?;

        let mut working = jobs.clone();
        working.sort_edd();

        if config.verbose {
            debug!(
                n = working.len(),
                max_weight = working.max_weight(),
                "loaded jobs"
            );
            for job in &working {
                debug!("{}", job);
            }
        }

        let (mut working, epsilon) = match config.fptas_factor {
            Some(k) => {
                let rescaled = fptas::rescale(&working, k, config)?;
                (rescaled.jobs, Some(rescaled.epsilon))
            }
            None => (working, None),
        };

        let on_time_bound = on_time_count(&working, config)?;
        let weight_budget = weight_budget(&mut working, on_time_bound, config)?;

        let table = ProfitTable::build(&working, weight_budget, config)?;
        let rendered = config.verbose.then(|| table.to_string());
        let selection = reconstruct(&table, &working, config)?;
        drop(table);

        let ids: Vec<_> = selection.jobs.iter().map(|j| j.id()).collect();
        let solution = Solution::from_selection(jobs, &ids, selection.profit, config.scale())?;

        info!(
            on_time = solution.len(),
            profit = solution.reported_profit(),
            tardy_weight = %solution.tardy_weight(),
            sum_completion_time = solution.sum_completion_time(),
            "schedule found"
        );

        Ok(ScheduleReport {
            on_time_bound,
            weight_budget,
            epsilon,
            solution,
            table: rendered,
        })
    }
}

impl crate::algorithms::SchedulingAlgorithm for WeightedOnTimeScheduler {
    fn schedule(&self, jobs: &TaskSet) -> Result<ScheduleReport, SchedulerError> {
        self.solve(jobs)
    }
}
