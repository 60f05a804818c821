//! tardy - weighted on-time scheduling on a single machine
//!
//! Selects the subset of a fixed job set that maximizes the total weight of jobs
//! finishing by their deadlines (equivalently, minimizes the weight of tardy
//! jobs). The exact solver bounds a pseudo-polynomial DP with the Moore-Hodgson
//! on-time count; an FPTAS factor rescales weights for large instances.

pub mod algorithms;
pub mod config;
pub mod error;
pub mod generate;
pub mod job;
pub mod loader;
pub mod metrics;
pub mod solution;

pub use algorithms::{SchedulingAlgorithm, WeightedOnTimeScheduler};
pub use config::SolverConfig;
pub use error::{ErrorKind, SchedulerError};
pub use job::{Job, TaskOrder, TaskSet};
pub use solution::{ScheduleReport, ScheduledJob, Solution};

/// Job identifier: the 1-based position of the job in the input.
pub type Id = u32;
