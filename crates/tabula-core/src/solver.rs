//! Bounded dual-simplex solver for the per-axis sizing programs.
//!
//! Each axis of a table is sized by the same linear program: minimize the
//! total extent `Σ x[i]` of the axis tracks, subject to one constraint per
//! child saying the tracks it spans must sum to at least its minimum extent,
//! with all `x[i] >= 0`. In ≤-form every constraint reads `-Σ x[span] <= -min`.
//!
//! With the slack variables as the initial basis the tableau is dual
//! feasible (every objective coefficient is +1), so the dual simplex method
//! applies without a phase-one pass: repeatedly pick the row with the most
//! negative right-hand side, choose the entering column by the dual ratio
//! test, and pivot until the basis is feasible or the iteration budget runs
//! out. Pivoting is deterministic (first most-negative row, lowest-index
//! minimum-ratio column), so identical inputs always resolve to the same
//! vertex.

use log::debug;

use crate::error::SolverError;

// ---------------------------------------------------------------------------
// Configuration
// ---------------------------------------------------------------------------

/// Tuning knobs for the simplex solver.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SolverConfig {
    /// Hard cap on pivot iterations before the solve is abandoned.
    pub max_iterations: usize,
    /// Numeric feasibility tolerance: a constraint violated by less than
    /// this is considered satisfied.
    pub tolerance: f32,
}

impl SolverConfig {
    pub const DEFAULT_MAX_ITERATIONS: usize = 1000;
    pub const DEFAULT_TOLERANCE: f32 = 0.01;
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            max_iterations: Self::DEFAULT_MAX_ITERATIONS,
            tolerance: Self::DEFAULT_TOLERANCE,
        }
    }
}

// ---------------------------------------------------------------------------
// Problem statement
// ---------------------------------------------------------------------------

/// One child's demand on one axis: the tracks in `[start, start + len)` must
/// sum to at least `min`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct SpanConstraint {
    pub start: usize,
    pub len: usize,
    pub min: f32,
}

// ---------------------------------------------------------------------------
// Solver
// ---------------------------------------------------------------------------

/// Minimize `Σ x[i]` over `tracks` non-negative variables subject to
/// `constraints`. Returns one extent per track.
pub(crate) fn solve_min_total(
    tracks: usize,
    constraints: &[SpanConstraint],
    config: &SolverConfig,
) -> Result<Vec<f32>, SolverError> {
    let n = tracks;
    let m = constraints.len();
    if m == 0 {
        // Nothing demands space; the tightest sizing is all zeros.
        return Ok(vec![0.0; n]);
    }

    let tol = config.tolerance;
    let cols = n + m;

    // Constraint rows in ≤-form with a slack identity block appended; the
    // last entry of each row is its right-hand side.
    let mut tableau: Vec<Vec<f32>> = Vec::with_capacity(m);
    for (j, c) in constraints.iter().enumerate() {
        let mut row = vec![0.0; cols + 1];
        for i in c.start..c.start + c.len {
            row[i] = -1.0;
        }
        row[n + j] = 1.0;
        row[cols] = -c.min;
        tableau.push(row);
    }

    // Reduced-cost row (`z_j - c_j`); +1 for every track variable means the
    // slack basis is already dual feasible.
    let mut objective = vec![0.0; cols];
    for entry in objective.iter_mut().take(n) {
        *entry = 1.0;
    }

    let mut basis: Vec<usize> = (n..n + m).collect();
    let mut iterations = 0;

    loop {
        // Leaving row: most negative right-hand side, first wins on ties.
        let mut leaving = None;
        let mut worst = -tol;
        for (j, row) in tableau.iter().enumerate() {
            if row[cols] < worst {
                worst = row[cols];
                leaving = Some(j);
            }
        }
        let Some(r) = leaving else {
            break; // primal feasible, and the objective row stayed optimal
        };

        if iterations >= config.max_iterations {
            return Err(SolverError::IterationLimit {
                limit: config.max_iterations,
            });
        }
        iterations += 1;

        // Entering column: dual ratio test over the negative coefficients of
        // the leaving row, lowest index on ties.
        let mut entering = None;
        let mut best_ratio = f32::INFINITY;
        for (i, &a) in tableau[r].iter().take(cols).enumerate() {
            if a < -tol {
                let ratio = objective[i] / -a;
                if ratio < best_ratio {
                    best_ratio = ratio;
                    entering = Some(i);
                }
            }
        }
        let Some(c) = entering else {
            return Err(SolverError::Infeasible { constraint: r });
        };

        pivot(&mut tableau, &mut objective, r, c);
        basis[r] = c;
    }

    debug!("simplex solved {n} tracks / {m} constraints in {iterations} iterations");

    let mut solution = vec![0.0; n];
    for (j, &b) in basis.iter().enumerate() {
        if b < n {
            solution[b] = tableau[j][cols].max(0.0);
        }
    }
    Ok(solution)
}

/// Gauss-Jordan pivot on `(r, c)`, keeping the reduced-cost row in step.
fn pivot(tableau: &mut [Vec<f32>], objective: &mut [f32], r: usize, c: usize) {
    let p = tableau[r][c];
    for v in tableau[r].iter_mut() {
        *v /= p;
    }
    let pivot_row = tableau[r].clone();

    for (j, row) in tableau.iter_mut().enumerate() {
        if j == r {
            continue;
        }
        let f = row[c];
        if f == 0.0 {
            continue;
        }
        for (v, pv) in row.iter_mut().zip(pivot_row.iter()) {
            *v -= f * pv;
        }
    }

    let f = objective[c];
    if f != 0.0 {
        for (v, pv) in objective.iter_mut().zip(pivot_row.iter()) {
            *v -= f * pv;
        }
    }
}
