//! Results of a scheduling run.

use std::collections::HashMap;
use std::fmt::Display;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::SchedulerError;
use crate::job::{Job, TaskSet};
use crate::metrics;
use crate::Id;

/// An on-time job placed on the machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ScheduledJob {
    pub job: Job,
    pub start: u64,
    pub completion: u64,
}

/// Selected on-time jobs and the profit they earn.
///
/// Jobs carry their original (unscaled) weights. `profit` is in the units the
/// table was built with; [`reported_profit`](Self::reported_profit) scales it
/// back when an FPTAS factor was applied.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Solution {
    scheduled: Vec<ScheduledJob>,
    tardy: Vec<Job>,
    profit: u64,
    scale: f64,
}

impl Solution {
    /// Builds a solution from the ids picked by reconstruction.
    ///
    /// `jobs` is the unscaled input. Picked jobs are laid out in EDD order from
    /// time zero; everything else is tardy.
    ///
    /// # Errors
    ///
    /// `InvariantViolation` if an id is unknown or the layout misses a deadline.
    pub fn from_selection(
        jobs: &TaskSet,
        selected: &[Id],
        profit: u64,
        scale: f64,
    ) -> Result<Self, SchedulerError> {
        let by_id: HashMap<Id, Job> = jobs.iter().map(|j| (j.id(), *j)).collect();

        let mut on_time = selected
            .iter()
            .map(|id| {
                by_id
                    .get(id)
                    .copied()
                    .ok_or_else(|| SchedulerError::missing_job(*id))
            })
            .collect::<Result<Vec<_>, _>>()?;
        on_time.sort_by_key(|j| (j.d(), j.id()));

        if !metrics::is_on_time(&on_time) {
            return Err(SchedulerError::InvariantViolation(
                "selected jobs do not all meet their deadlines".to_string(),
            ));
        }

        let scheduled = on_time
            .iter()
            .zip(metrics::completion_times(&on_time))
            .map(|(job, completion)| ScheduledJob {
                job: *job,
                start: completion - u64::from(job.p()),
                completion,
            })
            .collect();

        let mut tardy: Vec<Job> = jobs
            .iter()
            .filter(|j| !selected.contains(&j.id()))
            .copied()
            .collect();
        tardy.sort_by_key(|j| (j.d(), j.id()));

        Ok(Self {
            scheduled,
            tardy,
            profit,
            scale,
        })
    }

    /// On-time jobs in execution order.
    pub fn scheduled(&self) -> &[ScheduledJob] {
        &self.scheduled
    }

    pub fn selected_ids(&self) -> Vec<Id> {
        self.scheduled.iter().map(|s| s.job.id()).collect()
    }

    /// Jobs left out of the schedule, EDD order.
    pub fn tardy(&self) -> &[Job] {
        &self.tardy
    }

    pub fn len(&self) -> usize {
        self.scheduled.len()
    }

    pub fn is_empty(&self) -> bool {
        self.scheduled.is_empty()
    }

    /// Profit in table units.
    pub fn profit(&self) -> u64 {
        self.profit
    }

    /// FPTAS factor the weights were divided by (1 for exact runs).
    pub fn scale(&self) -> f64 {
        self.scale
    }

    /// `profit × scale`: the approximate true profit.
    pub fn reported_profit(&self) -> f64 {
        self.profit as f64 * self.scale
    }

    /// On-time jobs in execution order, without their times.
    pub fn on_time_jobs(&self) -> Vec<Job> {
        self.scheduled.iter().map(|s| s.job).collect()
    }

    /// Sum of the original weights of the on-time jobs.
    pub fn true_profit(&self) -> u128 {
        metrics::total_weight(self.scheduled.iter().map(|s| &s.job))
    }

    /// Sum of the original weights of the tardy jobs.
    pub fn tardy_weight(&self) -> u128 {
        metrics::total_weight(&self.tardy)
    }

    pub fn sum_completion_time(&self) -> u64 {
        self.scheduled.iter().map(|s| s.completion).sum()
    }

    /// Largest lateness among on-time jobs (never positive), `None` when nothing runs.
    pub fn max_lateness(&self) -> Option<i64> {
        metrics::max_lateness(&self.on_time_jobs())
    }
}

impl Display for Solution {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Profit: {}", self.reported_profit())?;
        writeln!(f, "On-time jobs: {}", self.scheduled.len())?;
        writeln!(f, "Sum of completion times: {}", self.sum_completion_time())?;
        if let Some(lmax) = self.max_lateness() {
            writeln!(f, "Max lateness: {}", lmax)?;
        }
        for s in &self.scheduled {
            writeln!(f, "  {} [{}, {}]", s.job, s.start, s.completion)?;
        }
        writeln!(f, "Tardy jobs: {} (weight {})", self.tardy.len(), self.tardy_weight())?;
        for job in &self.tardy {
            writeln!(f, "  {}", job)?;
        }
        Ok(())
    }
}

/// Everything a run produced, including stage results.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ScheduleReport {
    /// Moore-Hodgson bound on the on-time cardinality.
    pub on_time_bound: usize,
    /// Weight budget WI (table units).
    pub weight_budget: u64,
    /// FPTAS accuracy, when a factor was applied.
    pub epsilon: Option<f64>,
    pub solution: Solution,
    /// Rendered DP table, kept only for verbose runs.
    pub table: Option<String>,
}
