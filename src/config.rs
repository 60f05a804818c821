//! Run configuration threaded explicitly through every pipeline stage.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Configuration for one scheduling run.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SolverConfig {
    /// Emit stage dumps (job list, WI, DP table) and keep a rendered table in the report.
    pub verbose: bool,
    /// FPTAS factor `k`. `None` or `Some(1.0)` runs the exact pipeline.
    pub fptas_factor: Option<f64>,
    /// Upper bound on `rows × columns` of the DP table.
    pub max_table_cells: usize,
}

impl SolverConfig {
    /// Default limit on DP table cells (256 Mi cells).
    pub const DEFAULT_MAX_TABLE_CELLS: usize = 1 << 28;

    pub fn new() -> Self {
        Self::default()
    }

    pub fn verbose(mut self, yes: bool) -> Self {
        self.verbose = yes;
        self
    }

    pub fn fptas(mut self, k: f64) -> Self {
        self.fptas_factor = Some(k);
        self
    }

    pub fn max_table_cells(mut self, cells: usize) -> Self {
        self.max_table_cells = cells;
        self
    }

    /// The factor the reported profit is multiplied by.
    pub fn scale(&self) -> f64 {
        self.fptas_factor.unwrap_or(1.0)
    }

    /// True when weights are left untouched.
    pub fn is_exact(&self) -> bool {
        self.fptas_factor.map_or(true, |k| k == 1.0)
    }
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            verbose: false,
            fptas_factor: None,
            max_table_cells: Self::DEFAULT_MAX_TABLE_CELLS,
        }
    }
}
