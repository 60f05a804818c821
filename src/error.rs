use thiserror::Error;

use crate::Id;

/// Failure of a single scheduling run.
///
/// Every variant is fatal for the invocation that produced it; nothing is retried.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum SchedulerError {
    /// The job set is missing, empty, or internally inconsistent.
    #[error("Invalid input: {0}")]
    InputFormat(String),

    /// Internal state that must hold did not hold.
    #[error("Invariant violated: {0}")]
    InvariantViolation(String),

    /// The FPTAS factor cannot produce a meaningful rescaling.
    #[error("Invalid approximation factor {k}: {reason}")]
    ApproximationParameter { k: f64, reason: &'static str },
}

/// Closed classification of [`SchedulerError`] variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    InputFormat,
    InvariantViolation,
    ApproximationParameter,
}

impl SchedulerError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            SchedulerError::InputFormat(_) => ErrorKind::InputFormat,
            SchedulerError::InvariantViolation(_) => ErrorKind::InvariantViolation,
            SchedulerError::ApproximationParameter { .. } => ErrorKind::ApproximationParameter,
        }
    }

    pub(crate) fn missing_job(id: Id) -> Self {
        SchedulerError::InvariantViolation(format!("job {} is not present in the task set", id))
    }
}
