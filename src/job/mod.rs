//! Jobs and the ordered collection the pipeline reorders in place.

mod job;
mod task_set;

pub use job::Job;
pub use task_set::{TaskOrder, TaskSet};
