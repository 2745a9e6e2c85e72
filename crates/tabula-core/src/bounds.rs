//! The [`Bounds`] rectangle value type.
//!
//! Pixel units, top-left origin, X grows right, Y grows down.

use std::fmt;

/// A rectangle in pixel coordinates.
///
/// Width and height are non-negative in any *resolved* state. Before a
/// component's first layout its bounds may be [`Bounds::SENTINEL`].
#[derive(Copy, Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Bounds {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Bounds {
    /// The empty rectangle at the origin.
    pub const ZERO: Self = Self {
        x: 0.0,
        y: 0.0,
        width: 0.0,
        height: 0.0,
    };

    /// Placeholder for bounds that have not been resolved yet.
    pub const SENTINEL: Self = Self {
        x: -1.0,
        y: -1.0,
        width: -1.0,
        height: -1.0,
    };

    /// Create a new rectangle.
    #[inline]
    pub const fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// A size-only rectangle at the origin. Used for minimum-size demands,
    /// where the position fields carry no meaning.
    #[inline]
    pub const fn size(width: f32, height: f32) -> Self {
        Self::new(0.0, 0.0, width, height)
    }

    /// One past the right edge.
    #[inline]
    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    /// One past the bottom edge.
    #[inline]
    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }
}

impl fmt::Display for Bounds {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "({}, {}) - <{}, {}>",
            self.x, self.y, self.width, self.height
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_format() {
        let b = Bounds::new(1.0, 2.0, 30.0, 40.0);
        assert_eq!(b.to_string(), "(1, 2) - <30, 40>");
    }

    #[test]
    fn edges() {
        let b = Bounds::new(10.0, 20.0, 5.0, 15.0);
        assert_eq!(b.right(), 15.0);
        assert_eq!(b.bottom(), 35.0);
    }

    #[test]
    fn size_only() {
        let b = Bounds::size(7.0, 9.0);
        assert_eq!(b.x, 0.0);
        assert_eq!(b.y, 0.0);
        assert_eq!(b.width, 7.0);
        assert_eq!(b.height, 9.0);
    }
}
