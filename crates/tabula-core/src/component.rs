//! The [`Component`] trait — the contract every node of the tree satisfies.

use crate::bounds::Bounds;
use crate::canvas::Canvas;
use crate::error::Result;

/// A node that can be measured, positioned, and drawn.
///
/// `set_bounds` is the *only* channel by which a layout communicates
/// computed geometry to a child, and `minimum_size` the only channel by
/// which a child communicates its intrinsic demand back. Implementations
/// must treat `set_bounds` as authoritative and idempotent: the given
/// rectangle replaces any prior bounds entirely.
///
/// `minimum_size` and `render` are fallible because a composite node may
/// have to run its solver to answer; leaves simply return `Ok`.
pub trait Component {
    /// Current bounds. [`Bounds::SENTINEL`] before first layout.
    fn bounds(&self) -> Bounds;

    /// Replace the component's bounds.
    fn set_bounds(&mut self, bounds: Bounds);

    /// The smallest extent this component is willing to occupy. Only the
    /// `width`/`height` fields are meaningful.
    fn minimum_size(&mut self) -> Result<Bounds>;

    /// Draw into `canvas`, a view covering exactly this component's bounds.
    /// Drawing is in local coordinates: `(0, 0)` is the component's own
    /// top-left corner.
    fn render(&mut self, canvas: &Canvas) -> Result<()>;
}
