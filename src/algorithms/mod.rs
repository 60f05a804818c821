pub mod weighted;

pub use weighted::WeightedOnTimeScheduler;

use crate::error::SchedulerError;
use crate::job::TaskSet;
use crate::solution::ScheduleReport;

/// Algorithm that selects the on-time jobs of a single-machine instance.
pub trait SchedulingAlgorithm {
    /// Schedule `jobs` and report the on-time subset.
    ///
    /// # Arguments
    ///
    /// * `jobs` - The full, static job set; implementations must not modify it
    ///
    /// # Returns
    ///
    /// A [`ScheduleReport`] with the selected jobs and the achieved profit
    fn schedule(&self, jobs: &TaskSet) -> Result<ScheduleReport, SchedulerError>;
}
