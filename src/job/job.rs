use std::fmt::Display;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::Id;

/// A single job for the one-machine scheduling problem.
///
/// # Invariants
///
/// - `id` is the 1-based input position and never changes when the set is reordered
/// - `p` and `w` are positive for loaded jobs; an FPTAS rescale may round `w` down to zero
/// - weights have no setter: a rescaled job is a new value, frozen for the rest of the run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Job {
    id: Id,
    p: u32,
    w: u64,
    d: u32,
}

impl Job {
    /// Creates a job with processing time `p`, weight `w` and deadline `d`.
    pub const fn new(id: Id, p: u32, w: u64, d: u32) -> Self {
        Self { id, p, w, d }
    }

    pub const fn id(&self) -> Id {
        self.id
    }

    /// Processing time.
    pub const fn p(&self) -> u32 {
        self.p
    }

    /// Weight credited when the job finishes on time.
    pub const fn w(&self) -> u64 {
        self.w
    }

    /// Deadline.
    pub const fn d(&self) -> u32 {
        self.d
    }

    /// Returns a copy carrying `w` as its weight.
    pub(crate) fn with_weight(&self, w: u64) -> Self {
        Self { w, ..*self }
    }
}

impl Display for Job {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "J{} (p: {}, w: {}, d: {})", self.id, self.p, self.w, self.d)
    }
}
