use std::collections::HashSet;
use std::ops::Index;

use crate::error::SchedulerError;
use crate::metrics;
use crate::Id;

use super::job::Job;

/// Order most recently applied to a [`TaskSet`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskOrder {
    /// Insertion order, or an order disturbed by `push`.
    Insertion,
    /// Earliest due date: non-decreasing `d`, ties by id.
    Edd,
    /// Non-increasing `w`, ties by id.
    WeightDesc,
}

/// Ordered, growable collection of jobs with stable identity.
///
/// # Complexity
/// - `push`: amortized O(1)
/// - `remove_at`: O(n) (shifts the tail)
/// - `remove_by_id`: O(n) linear scan, fine for the job counts this crate targets
/// - sorts: O(n log n), stable
#[derive(Debug, Clone, PartialEq)]
pub struct TaskSet {
    jobs: Vec<Job>,
    order: TaskOrder,
}

impl Default for TaskSet {
    fn default() -> Self {
        Self::new()
    }
}

impl TaskSet {
    pub fn new() -> Self {
        Self {
            jobs: Vec::new(),
            order: TaskOrder::Insertion,
        }
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            jobs: Vec::with_capacity(capacity),
            order: TaskOrder::Insertion,
        }
    }

    /// Builds a set from `(p, w, d)` triples, numbering jobs from 1 in input order.
    pub fn from_triples(triples: impl IntoIterator<Item = (u32, u64, u32)>) -> Self {
        let jobs = triples
            .into_iter()
            .enumerate()
            .map(|(i, (p, w, d))| Job::new(i as Id + 1, p, w, d))
            .collect();
        Self {
            jobs,
            order: TaskOrder::Insertion,
        }
    }

    pub fn len(&self) -> usize {
        self.jobs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.jobs.is_empty()
    }

    pub fn order(&self) -> TaskOrder {
        self.order
    }

    pub fn jobs(&self) -> &[Job] {
        &self.jobs
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Job> {
        self.jobs.iter()
    }

    pub fn get(&self, index: usize) -> Option<&Job> {
        self.jobs.get(index)
    }

    /// Appends a job at the end.
    pub fn push(&mut self, job: Job) {
        self.jobs.push(job);
        self.order = TaskOrder::Insertion;
    }

    /// Removes and returns the job at `index`, or `None` when out of bounds.
    pub fn remove_at(&mut self, index: usize) -> Option<Job> {
        if index >= self.jobs.len() {
            return None;
        }
        Some(self.jobs.remove(index))
    }

    /// Removes and returns the job with the given id.
    ///
    /// # Errors
    ///
    /// `InvariantViolation` if no job carries `id`.
    pub fn remove_by_id(&mut self, id: Id) -> Result<Job, SchedulerError> {
        let index = self
            .jobs
            .iter()
            .position(|j| j.id() == id)
            .ok_or_else(|| SchedulerError::missing_job(id))?;
        Ok(self.jobs.remove(index))
    }

    /// Sorts into earliest-due-date order.
    pub fn sort_edd(&mut self) {
        self.jobs.sort_by_key(|j| (j.d(), j.id()));
        self.order = TaskOrder::Edd;
    }

    /// Sorts by non-increasing weight.
    pub fn sort_by_weight_desc(&mut self) {
        self.jobs
            .sort_by(|a, b| b.w().cmp(&a.w()).then_with(|| a.id().cmp(&b.id())));
        self.order = TaskOrder::WeightDesc;
    }

    /// True when the jobs are in non-decreasing deadline order, whatever the recorded order.
    pub fn is_edd_ordered(&self) -> bool {
        self.jobs.windows(2).all(|w| w[0].d() <= w[1].d())
    }

    pub fn max_weight(&self) -> u64 {
        self.jobs.iter().map(|j| j.w()).max().unwrap_or(0)
    }

    /// Sum of all weights; `u128` so that no set of `u64` weights can overflow it.
    pub fn total_weight(&self) -> u128 {
        metrics::total_weight(&self.jobs)
    }

    pub fn total_processing_time(&self) -> u64 {
        self.jobs.iter().map(|j| u64::from(j.p())).sum()
    }

    /// Checks that the set can be scheduled at all.
    ///
    /// # Errors
    ///
    /// `InputFormat` when the set is empty, a job has zero processing time or
    /// zero weight, or two jobs share an id.
    pub fn validate(&self) -> Result<(), SchedulerError> {
        if self.jobs.is_empty() {
            return Err(SchedulerError::InputFormat(
                "the job set is empty".to_string(),
            ));
        }

        let mut seen = HashSet::with_capacity(self.jobs.len());
        for job in &self.jobs {
            if job.p() == 0 {
                return Err(SchedulerError::InputFormat(format!(
                    "job {} has zero processing time",
                    job.id()
                )));
            }
            if job.w() == 0 {
                return Err(SchedulerError::InputFormat(format!(
                    "job {} has zero weight",
                    job.id()
                )));
            }
            if !seen.insert(job.id()) {
                return Err(SchedulerError::InputFormat(format!(
                    "job id {} appears more than once",
                    job.id()
                )));
            }
        }
        Ok(())
    }

    /// Replaces every job with `f(job)`, keeping the current order.
    pub(crate) fn map_jobs(&self, f: impl Fn(&Job) -> Job) -> Self {
        Self {
            jobs: self.jobs.iter().map(f).collect(),
            order: self.order,
        }
    }
}

impl Index<usize> for TaskSet {
    type Output = Job;

    fn index(&self, index: usize) -> &Job {
        &self.jobs[index]
    }
}

impl FromIterator<Job> for TaskSet {
    fn from_iter<I: IntoIterator<Item = Job>>(iter: I) -> Self {
        Self {
            jobs: iter.into_iter().collect(),
            order: TaskOrder::Insertion,
        }
    }
}

impl<'a> IntoIterator for &'a TaskSet {
    type Item = &'a Job;
    type IntoIter = std::slice::Iter<'a, Job>;

    fn into_iter(self) -> Self::IntoIter {
        self.jobs.iter()
    }
}
