//! [`TableLayout`] — the retained-mode grid layout engine.
//!
//! A `TableLayout` owns a set of row/column sizing policies and a list of
//! child components placed on the grid. Geometry is resolved lazily by
//! formulating one linear program per axis (rows for vertical extents,
//! columns for horizontal extents — the axes never mix) and solving it with
//! the bounded simplex solver in [`crate::solver`]. Because `TableLayout`
//! itself implements [`Component`], layouts nest.

use std::fmt;

use log::debug;

use crate::bounds::Bounds;
use crate::canvas::Canvas;
use crate::component::Component;
use crate::error::{LayoutError, Result};
use crate::solver::{SolverConfig, SpanConstraint, solve_min_total};

// ---------------------------------------------------------------------------
// Axis / SizingPolicy / Placement
// ---------------------------------------------------------------------------

/// Which axis of the grid a diagnostic refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    Rows,
    Cols,
}

impl fmt::Display for Axis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Axis::Rows => f.write_str("row"),
            Axis::Cols => f.write_str("column"),
        }
    }
}

/// Sizing rule for a single row or column.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SizingPolicy {
    /// Exact pixel extent. The track still participates in the solve, but
    /// the solved value is replaced by this one when offsets are computed —
    /// a spanning child whose minimum exceeds it is clipped, not an error.
    Absolute(f32),

    /// Shrink to the smallest extent satisfying every spanning child.
    #[default]
    ShrinkToFit,

    /// Declared weight for distributing leftover space. Accepted, but
    /// currently sized exactly like `ShrinkToFit`; the weight is carried so
    /// true distribution can be added later without an API break.
    Proportional(f32),
}

/// A child component and the grid cell range it occupies: rows
/// `[row, row + row_span)` and columns `[col, col + col_span)`.
pub struct Placement {
    pub component: Box<dyn Component>,
    pub row: usize,
    pub col: usize,
    pub row_span: usize,
    pub col_span: usize,
}

/// A child's measured minimum, captured once per solve.
struct Demand {
    row: usize,
    col: usize,
    row_span: usize,
    col_span: usize,
    min_width: f32,
    min_height: f32,
}

// ---------------------------------------------------------------------------
// TableLayout
// ---------------------------------------------------------------------------

/// A component that lays out its children on a grid.
///
/// Created empty (zero rows, columns, and children) and dirty. The policy
/// arrays grow on demand as children and sizing rules are added; entries are
/// never removed, so track indices are stable once assigned.
pub struct TableLayout {
    bounds: Bounds,
    rows: Vec<SizingPolicy>,
    cols: Vec<SizingPolicy>,
    children: Vec<Placement>,
    needs_layout: bool,
    needs_min_calc: bool,
    cached_min_size: Bounds,
    solver: SolverConfig,
}

impl TableLayout {
    /// Create an empty layout with default solver settings.
    pub fn new() -> Self {
        Self::with_solver_config(SolverConfig::default())
    }

    /// Create an empty layout with explicit solver settings.
    pub fn with_solver_config(solver: SolverConfig) -> Self {
        Self {
            bounds: Bounds::ZERO,
            rows: Vec::new(),
            cols: Vec::new(),
            children: Vec::new(),
            needs_layout: true,
            needs_min_calc: true,
            cached_min_size: Bounds::SENTINEL,
            solver,
        }
    }

    /// Row sizing policies, in track order.
    #[inline]
    pub fn rows(&self) -> &[SizingPolicy] {
        &self.rows
    }

    /// Column sizing policies, in track order.
    #[inline]
    pub fn cols(&self) -> &[SizingPolicy] {
        &self.cols
    }

    /// Children in insertion order.
    #[inline]
    pub fn children(&self) -> &[Placement] {
        &self.children
    }

    /// Whether geometry must be re-solved before the next render.
    #[inline]
    pub fn needs_layout(&self) -> bool {
        self.needs_layout
    }

    /// Whether the cached minimum size is stale.
    #[inline]
    pub fn needs_min_calc(&self) -> bool {
        self.needs_min_calc
    }

    /// Replace the solver settings. Counts as a mutation: the next layout
    /// and minimum-size query re-solve.
    pub fn set_solver_config(&mut self, solver: SolverConfig) {
        self.solver = solver;
        self.mark_dirty();
    }

    /// Add `component` to the grid at `(row, col)`, spanning
    /// `row_span` x `col_span` cells (both at least 1). The layout takes
    /// ownership of the component; the policy arrays grow with
    /// [`SizingPolicy::ShrinkToFit`] filler if the spanned range runs past
    /// their current length.
    pub fn add<C: Component + 'static>(
        &mut self,
        component: C,
        row: usize,
        col: usize,
        row_span: usize,
        col_span: usize,
    ) -> Result<()> {
        if row_span == 0 || col_span == 0 {
            return Err(LayoutError::InvalidSpan { row_span, col_span });
        }
        let row_end = checked_end(Axis::Rows, row, row_span)?;
        let col_end = checked_end(Axis::Cols, col, col_span)?;

        grow(&mut self.rows, row_end);
        grow(&mut self.cols, col_end);
        self.children.push(Placement {
            component: Box::new(component),
            row,
            col,
            row_span,
            col_span,
        });
        self.mark_dirty();
        Ok(())
    }

    /// Constrain the size of row `row`, growing the row array if needed.
    pub fn set_row_size(&mut self, row: usize, policy: SizingPolicy) -> Result<()> {
        let end = checked_end(Axis::Rows, row, 1)?;
        grow(&mut self.rows, end);
        self.rows[row] = policy;
        self.mark_dirty();
        Ok(())
    }

    /// Constrain the size of column `col`, growing the column array if
    /// needed.
    pub fn set_col_size(&mut self, col: usize, policy: SizingPolicy) -> Result<()> {
        let end = checked_end(Axis::Cols, col, 1)?;
        grow(&mut self.cols, end);
        self.cols[col] = policy;
        self.mark_dirty();
        Ok(())
    }

    /// Recalculate the positions and sizes of all children.
    ///
    /// Runs the sizing program once per axis. Geometry is assigned only
    /// after *both* axes solve: on any failure the children keep whatever
    /// bounds they already had.
    pub fn layout(&mut self) -> Result<()> {
        let demands = self.collect_demands()?;
        let row_extents = self.solve_axis(Axis::Rows, &demands)?;
        let col_extents = self.solve_axis(Axis::Cols, &demands)?;

        let row_offsets = offsets(&self.rows, &row_extents);
        let col_offsets = offsets(&self.cols, &col_extents);
        debug!(
            "layout: {} rows x {} cols -> {} x {} px",
            self.rows.len(),
            self.cols.len(),
            col_offsets.last().copied().unwrap_or(0.0),
            row_offsets.last().copied().unwrap_or(0.0),
        );

        for child in &mut self.children {
            let x = col_offsets[child.col];
            let y = row_offsets[child.row];
            let w = col_offsets[child.col + child.col_span] - x;
            let h = row_offsets[child.row + child.row_span] - y;
            child.component.set_bounds(Bounds::new(x, y, w, h));
        }

        self.needs_layout = false;
        Ok(())
    }

    fn mark_dirty(&mut self) {
        self.needs_layout = true;
        self.needs_min_calc = true;
    }

    /// Measure every child once. Child measurement is itself fallible (a
    /// nested layout has to solve to answer).
    fn collect_demands(&mut self) -> Result<Vec<Demand>> {
        let mut demands = Vec::with_capacity(self.children.len());
        for child in &mut self.children {
            let min = child.component.minimum_size()?;
            demands.push(Demand {
                row: child.row,
                col: child.col,
                row_span: child.row_span,
                col_span: child.col_span,
                min_width: min.width,
                min_height: min.height,
            });
        }
        Ok(demands)
    }

    fn solve_axis(&self, axis: Axis, demands: &[Demand]) -> Result<Vec<f32>> {
        let (tracks, constraints): (usize, Vec<SpanConstraint>) = match axis {
            Axis::Rows => (
                self.rows.len(),
                demands
                    .iter()
                    .map(|d| SpanConstraint {
                        start: d.row,
                        len: d.row_span,
                        min: d.min_height,
                    })
                    .collect(),
            ),
            Axis::Cols => (
                self.cols.len(),
                demands
                    .iter()
                    .map(|d| SpanConstraint {
                        start: d.col,
                        len: d.col_span,
                        min: d.min_width,
                    })
                    .collect(),
            ),
        };
        solve_min_total(tracks, &constraints, &self.solver)
            .map_err(|source| LayoutError::Solver { axis, source })
    }
}

impl Default for TableLayout {
    fn default() -> Self {
        Self::new()
    }
}

impl Component for TableLayout {
    fn bounds(&self) -> Bounds {
        self.bounds
    }

    /// Stores the rectangle. The shrink-to-fit solve never reads the
    /// layout's own bounds, and child positions are relative to the layout's
    /// origin, so assigning bounds does not invalidate solved geometry.
    fn set_bounds(&mut self, bounds: Bounds) {
        self.bounds = bounds;
    }

    /// The smallest whole-grid extent satisfying every child's demand:
    /// the sum of the solved track extents per axis, with no `Absolute`
    /// substitution. Lazy and cached; recomputed only after a mutation.
    fn minimum_size(&mut self) -> Result<Bounds> {
        if self.needs_min_calc {
            let demands = self.collect_demands()?;
            let row_extents = self.solve_axis(Axis::Rows, &demands)?;
            let col_extents = self.solve_axis(Axis::Cols, &demands)?;
            self.cached_min_size = Bounds::size(
                col_extents.iter().sum::<f32>(),
                row_extents.iter().sum::<f32>(),
            );
            self.needs_min_calc = false;
        }
        Ok(self.cached_min_size)
    }

    /// Re-layout if pending, then render every child in insertion order,
    /// each into the canvas slice covering its bounds.
    fn render(&mut self, canvas: &Canvas) -> Result<()> {
        if self.needs_layout {
            self.layout()?;
        }
        for child in &mut self.children {
            let view = canvas.slice(child.component.bounds());
            child.component.render(&view)?;
        }
        Ok(())
    }
}

/// `index + span` with overflow reported instead of wrapped.
fn checked_end(axis: Axis, index: usize, span: usize) -> Result<usize> {
    index
        .checked_add(span)
        .ok_or(LayoutError::GridOverflow { axis, index, span })
}

/// Append `ShrinkToFit` filler until the array covers `required` tracks.
/// Existing entries are never touched; the array never shrinks.
fn grow(policies: &mut Vec<SizingPolicy>, required: usize) {
    if required > policies.len() {
        policies.resize(required, SizingPolicy::ShrinkToFit);
    }
}

/// Cumulative track offsets. Each track contributes its `Absolute` value if
/// it has one, otherwise the solved extent; `offsets[n]` is the total axis
/// extent.
fn offsets(policies: &[SizingPolicy], extents: &[f32]) -> Vec<f32> {
    let mut out = Vec::with_capacity(policies.len() + 1);
    let mut acc = 0.0;
    out.push(acc);
    for (policy, &extent) in policies.iter().zip(extents) {
        acc += match policy {
            SizingPolicy::Absolute(v) => *v,
            SizingPolicy::ShrinkToFit | SizingPolicy::Proportional(_) => extent,
        };
        out.push(acc);
    }
    out
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;

    use super::*;
    use crate::box_::RenderableBox;
    use crate::canvas::Color;
    use crate::error::SolverError;

    /// Bounds-recording test double. The layout owns the component, so the
    /// test keeps a shared handle to the recorded bounds.
    struct Probe {
        bounds: Rc<RefCell<Bounds>>,
        minimum: Bounds,
    }

    impl Probe {
        fn new(width: f32, height: f32) -> (Self, Rc<RefCell<Bounds>>) {
            let handle = Rc::new(RefCell::new(Bounds::SENTINEL));
            let probe = Self {
                bounds: Rc::clone(&handle),
                minimum: Bounds::size(width, height),
            };
            (probe, handle)
        }
    }

    impl Component for Probe {
        fn bounds(&self) -> Bounds {
            *self.bounds.borrow()
        }

        fn set_bounds(&mut self, bounds: Bounds) {
            *self.bounds.borrow_mut() = bounds;
        }

        fn minimum_size(&mut self) -> Result<Bounds> {
            Ok(self.minimum)
        }

        fn render(&mut self, _canvas: &Canvas) -> Result<()> {
            Ok(())
        }
    }

    fn probe_in(
        layout: &mut TableLayout,
        width: f32,
        height: f32,
        row: usize,
        col: usize,
        row_span: usize,
        col_span: usize,
    ) -> Rc<RefCell<Bounds>> {
        let (probe, handle) = Probe::new(width, height);
        layout.add(probe, row, col, row_span, col_span).unwrap();
        handle
    }

    fn assert_bounds(handle: &Rc<RefCell<Bounds>>, x: f32, y: f32, width: f32, height: f32) {
        assert_eq!(*handle.borrow(), Bounds::new(x, y, width, height));
    }

    /// Builds the 3x3 reference grid and returns the child handles in
    /// insertion order.
    fn reference_grid(layout: &mut TableLayout) -> Vec<Rc<RefCell<Bounds>>> {
        vec![
            probe_in(layout, 20.0, 10.0, 0, 0, 1, 1),
            probe_in(layout, 15.0, 10.0, 0, 1, 1, 1),
            probe_in(layout, 10.0, 10.0, 0, 2, 1, 1),
            probe_in(layout, 60.0, 10.0, 1, 0, 1, 2),
            probe_in(layout, 20.0, 10.0, 1, 2, 1, 1),
            probe_in(layout, 10.0, 10.0, 2, 0, 1, 1),
            probe_in(layout, 80.0, 10.0, 2, 1, 1, 2),
        ]
    }

    #[test]
    fn simple_layout() {
        let mut layout = TableLayout::new();
        let boxes = reference_grid(&mut layout);
        layout.layout().unwrap();
        assert_bounds(&boxes[0], 0.0, 0.0, 20.0, 10.0);
        assert_bounds(&boxes[1], 20.0, 0.0, 60.0, 10.0);
        assert_bounds(&boxes[2], 80.0, 0.0, 20.0, 10.0);
        assert_bounds(&boxes[3], 0.0, 10.0, 80.0, 10.0);
        assert_bounds(&boxes[4], 80.0, 10.0, 20.0, 10.0);
        assert_bounds(&boxes[5], 0.0, 20.0, 20.0, 10.0);
        assert_bounds(&boxes[6], 20.0, 20.0, 80.0, 10.0);
    }

    #[test]
    fn layout_is_idempotent() {
        let mut layout = TableLayout::new();
        let boxes = reference_grid(&mut layout);
        layout.layout().unwrap();
        let first: Vec<Bounds> = boxes.iter().map(|h| *h.borrow()).collect();
        layout.layout().unwrap();
        let second: Vec<Bounds> = boxes.iter().map(|h| *h.borrow()).collect();
        assert_eq!(first, second);
    }

    #[test]
    fn children_tile_without_gaps() {
        let mut layout = TableLayout::new();
        let boxes = reference_grid(&mut layout);
        layout.layout().unwrap();
        // Row 0 tiles left to right.
        assert_eq!(boxes[0].borrow().right(), boxes[1].borrow().x);
        assert_eq!(boxes[1].borrow().right(), boxes[2].borrow().x);
        // Rows stack top to bottom.
        assert_eq!(boxes[0].borrow().bottom(), boxes[3].borrow().y);
        assert_eq!(boxes[3].borrow().bottom(), boxes[5].borrow().y);
    }

    #[test]
    fn minimum_satisfaction() {
        let mut layout = TableLayout::new();
        let boxes = reference_grid(&mut layout);
        layout.layout().unwrap();
        let mins = [
            (20.0, 10.0),
            (15.0, 10.0),
            (10.0, 10.0),
            (60.0, 10.0),
            (20.0, 10.0),
            (10.0, 10.0),
            (80.0, 10.0),
        ];
        for (handle, (mw, mh)) in boxes.iter().zip(mins) {
            let b = *handle.borrow();
            assert!(b.width >= mw, "{b} narrower than minimum {mw}");
            assert!(b.height >= mh, "{b} shorter than minimum {mh}");
        }
    }

    #[test]
    fn add_grows_tracks_with_shrink_to_fit_filler() {
        let mut layout = TableLayout::new();
        probe_in(&mut layout, 5.0, 5.0, 4, 5, 1, 1);
        assert_eq!(layout.rows().len(), 5);
        assert_eq!(layout.cols().len(), 6);
        assert!(
            layout
                .rows()
                .iter()
                .all(|p| *p == SizingPolicy::ShrinkToFit)
        );
    }

    #[test]
    fn growth_preserves_existing_policies() {
        let mut layout = TableLayout::new();
        layout.set_col_size(0, SizingPolicy::Absolute(50.0)).unwrap();
        probe_in(&mut layout, 5.0, 5.0, 0, 2, 1, 1);
        assert_eq!(layout.cols().len(), 3);
        assert_eq!(layout.cols()[0], SizingPolicy::Absolute(50.0));
        assert_eq!(layout.cols()[1], SizingPolicy::ShrinkToFit);
        assert_eq!(layout.cols()[2], SizingPolicy::ShrinkToFit);
    }

    #[test]
    fn set_row_size_grows_and_overwrites() {
        let mut layout = TableLayout::new();
        layout.set_row_size(3, SizingPolicy::Absolute(12.0)).unwrap();
        assert_eq!(layout.rows().len(), 4);
        assert_eq!(layout.rows()[2], SizingPolicy::ShrinkToFit);
        assert_eq!(layout.rows()[3], SizingPolicy::Absolute(12.0));
        layout.set_row_size(3, SizingPolicy::Proportional(2.0)).unwrap();
        assert_eq!(layout.rows()[3], SizingPolicy::Proportional(2.0));
        assert_eq!(layout.rows().len(), 4);
    }

    #[test]
    fn zero_span_is_rejected() {
        let mut layout = TableLayout::new();
        let (probe, _) = Probe::new(5.0, 5.0);
        let err = layout.add(probe, 0, 0, 0, 1).unwrap_err();
        assert!(matches!(
            err,
            LayoutError::InvalidSpan {
                row_span: 0,
                col_span: 1
            }
        ));
        assert!(layout.children().is_empty());
        assert_eq!(layout.rows().len(), 0);
    }

    #[test]
    fn index_overflow_is_rejected() {
        let mut layout = TableLayout::new();
        let (probe, _) = Probe::new(5.0, 5.0);
        let err = layout.add(probe, usize::MAX, 0, 2, 1).unwrap_err();
        assert!(matches!(
            err,
            LayoutError::GridOverflow {
                axis: Axis::Rows,
                ..
            }
        ));
        assert!(layout.children().is_empty());
    }

    #[test]
    fn absolute_column_overrides_solved_extent() {
        let mut layout = TableLayout::new();
        layout.set_col_size(0, SizingPolicy::Absolute(50.0)).unwrap();
        // The child demands 80 but the column is pinned at 50; the child is
        // clipped to the track, which is accepted behavior, not an error.
        let a = probe_in(&mut layout, 80.0, 10.0, 0, 0, 1, 1);
        let b = probe_in(&mut layout, 20.0, 10.0, 0, 1, 1, 1);
        layout.layout().unwrap();
        assert_bounds(&a, 0.0, 0.0, 50.0, 10.0);
        assert_bounds(&b, 50.0, 0.0, 20.0, 10.0);
    }

    #[test]
    fn minimum_size_ignores_absolute_override() {
        let mut layout = TableLayout::new();
        layout.set_col_size(0, SizingPolicy::Absolute(50.0)).unwrap();
        probe_in(&mut layout, 80.0, 10.0, 0, 0, 1, 1);
        let min = layout.minimum_size().unwrap();
        assert_eq!(min.width, 80.0);
        assert_eq!(min.height, 10.0);
    }

    #[test]
    fn minimum_size_is_cached_and_invalidated() {
        let mut layout = TableLayout::new();
        reference_grid(&mut layout);
        let first = layout.minimum_size().unwrap();
        assert_eq!((first.width, first.height), (100.0, 30.0));
        assert!(!layout.needs_min_calc());
        // Layout flag is independent and still pending.
        assert!(layout.needs_layout());

        let again = layout.minimum_size().unwrap();
        assert_eq!(first, again);

        // Any mutation re-dirties both flags.
        probe_in(&mut layout, 200.0, 10.0, 0, 0, 1, 3);
        assert!(layout.needs_min_calc());
        let grown = layout.minimum_size().unwrap();
        assert_eq!(grown.width, 200.0);
    }

    #[test]
    fn proportional_currently_solves_like_shrink_to_fit() {
        let mut shrink = TableLayout::new();
        let a = reference_grid(&mut shrink);
        shrink.layout().unwrap();

        let mut proportional = TableLayout::new();
        let b = reference_grid(&mut proportional);
        for col in 0..3 {
            proportional
                .set_col_size(col, SizingPolicy::Proportional(1.0))
                .unwrap();
        }
        proportional.layout().unwrap();

        for (x, y) in a.iter().zip(&b) {
            assert_eq!(*x.borrow(), *y.borrow());
        }
    }

    #[test]
    fn failed_solve_preserves_geometry() {
        let mut layout = TableLayout::new();
        let a = probe_in(&mut layout, 30.0, 10.0, 0, 0, 1, 1);
        layout.layout().unwrap();
        assert_bounds(&a, 0.0, 0.0, 30.0, 10.0);

        layout.set_solver_config(SolverConfig {
            max_iterations: 0,
            ..SolverConfig::default()
        });
        let err = layout.layout().unwrap_err();
        assert!(matches!(
            err,
            LayoutError::Solver {
                source: SolverError::IterationLimit { limit: 0 },
                ..
            }
        ));
        // Prior geometry untouched; flags still dirty for a retry.
        assert_bounds(&a, 0.0, 0.0, 30.0, 10.0);
        assert!(layout.needs_layout());
    }

    #[test]
    fn empty_layout_trivially_resolves() {
        let mut layout = TableLayout::new();
        layout.layout().unwrap();
        assert!(!layout.needs_layout());
        let min = layout.minimum_size().unwrap();
        assert_eq!((min.width, min.height), (0.0, 0.0));
        let canvas = Canvas::new(4, 4);
        layout.render(&canvas).unwrap();
    }

    #[test]
    fn nested_layouts_compose() {
        let mut inner = TableLayout::new();
        let inner_probe = probe_in(&mut inner, 30.0, 10.0, 0, 0, 1, 1);

        let mut outer = TableLayout::new();
        outer.add(inner, 0, 0, 1, 1).unwrap();
        let sibling = probe_in(&mut outer, 20.0, 10.0, 0, 1, 1, 1);

        let canvas = Canvas::new(50, 10);
        outer.render(&canvas).unwrap();

        // The inner layout was measured through its own solve and placed as
        // a 30x10 child; its probe's bounds are relative to the inner
        // layout's origin.
        assert_eq!(outer.children()[0].component.bounds(), Bounds::new(0.0, 0.0, 30.0, 10.0));
        assert_bounds(&inner_probe, 0.0, 0.0, 30.0, 10.0);
        assert_bounds(&sibling, 30.0, 0.0, 20.0, 10.0);
    }

    #[test]
    fn render_lays_out_lazily_and_draws() {
        let red = Color::from_rgb(255, 0, 0);
        let green = Color::from_rgb(0, 255, 0);
        let mut layout = TableLayout::new();
        layout.add(RenderableBox::new(2.0, 2.0, red), 0, 0, 1, 1).unwrap();
        layout.add(RenderableBox::new(2.0, 2.0, green), 0, 1, 1, 1).unwrap();
        assert!(layout.needs_layout());

        let canvas = Canvas::new(4, 2);
        layout.render(&canvas).unwrap();
        assert!(!layout.needs_layout());
        assert_eq!(canvas.pixel(0, 0), red);
        assert_eq!(canvas.pixel(1, 1), red);
        assert_eq!(canvas.pixel(2, 0), green);
        assert_eq!(canvas.pixel(3, 1), green);
    }
}
