//! Error taxonomy for the layout engine.

use thiserror::Error;

use crate::table::Axis;

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, LayoutError>;

/// Failures reported by the LP solver itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum SolverError {
    /// No pivot column exists for a violated constraint: the program has no
    /// feasible solution.
    #[error("constraint {constraint} cannot be satisfied (infeasible program)")]
    Infeasible { constraint: usize },

    /// The iteration budget ran out before the tableau became feasible.
    #[error("no convergence after {limit} iterations")]
    IterationLimit { limit: usize },
}

/// Failures surfaced by [`TableLayout`](crate::TableLayout) operations.
///
/// A `Solver` error is recoverable: prior child geometry is left untouched
/// and the caller may retry after adjusting constraints. The other variants
/// are precondition violations rejected at the call boundary.
#[derive(Debug, Error)]
pub enum LayoutError {
    /// The per-axis linear program did not produce a solution.
    #[error("{axis} solve failed: {source}")]
    Solver {
        axis: Axis,
        #[source]
        source: SolverError,
    },

    /// A placement with a zero span. Spans must be at least 1.
    #[error("invalid placement: spans must be >= 1 (got {row_span} x {col_span})")]
    InvalidSpan { row_span: usize, col_span: usize },

    /// `index + span` does not fit in a `usize`. Programmer error; never
    /// silently truncated.
    #[error("{axis} index overflow: {index} + {span}")]
    GridOverflow {
        axis: Axis,
        index: usize,
        span: usize,
    },
}
