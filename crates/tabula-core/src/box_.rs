//! A leaf component: a solid-colour box with a fixed minimum size.

use crate::bounds::Bounds;
use crate::canvas::{Canvas, Color};
use crate::component::Component;
use crate::error::Result;

/// A renderable box. Demands a fixed minimum size from its layout and fills
/// whatever rectangle it is finally given with its colour.
#[derive(Debug, Clone)]
pub struct RenderableBox {
    bounds: Bounds,
    minimum_size: Bounds,
    color: Color,
}

impl RenderableBox {
    /// Create a box demanding at least `width` x `height` pixels.
    pub fn new(width: f32, height: f32, color: Color) -> Self {
        Self {
            bounds: Bounds::SENTINEL,
            minimum_size: Bounds::size(width, height),
            color,
        }
    }

    /// The fill colour.
    #[inline]
    pub fn color(&self) -> Color {
        self.color
    }
}

impl Component for RenderableBox {
    fn bounds(&self) -> Bounds {
        self.bounds
    }

    fn set_bounds(&mut self, bounds: Bounds) {
        self.bounds = bounds;
    }

    fn minimum_size(&mut self) -> Result<Bounds> {
        Ok(self.minimum_size)
    }

    fn render(&mut self, canvas: &Canvas) -> Result<()> {
        // The view already covers exactly our bounds; fill all of it.
        canvas.fill(self.color);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reports_minimum_size() {
        let mut b = RenderableBox::new(20.0, 10.0, Color::WHITE);
        let min = b.minimum_size().unwrap();
        assert_eq!(min.width, 20.0);
        assert_eq!(min.height, 10.0);
        assert_eq!(b.bounds(), Bounds::SENTINEL);
        assert_eq!(b.color(), Color::WHITE);
    }

    #[test]
    fn set_bounds_replaces_entirely() {
        let mut b = RenderableBox::new(20.0, 10.0, Color::WHITE);
        b.set_bounds(Bounds::new(1.0, 2.0, 3.0, 4.0));
        b.set_bounds(Bounds::new(5.0, 6.0, 7.0, 8.0));
        assert_eq!(b.bounds(), Bounds::new(5.0, 6.0, 7.0, 8.0));
    }

    #[test]
    fn render_fills_view() {
        let red = Color::from_rgb(255, 0, 0);
        let mut b = RenderableBox::new(2.0, 2.0, red);
        b.set_bounds(Bounds::new(1.0, 1.0, 2.0, 2.0));
        let canvas = Canvas::new(4, 4);
        let view = canvas.slice(b.bounds());
        b.render(&view).unwrap();
        assert_eq!(canvas.pixel(1, 1), red);
        assert_eq!(canvas.pixel(2, 2), red);
        assert_eq!(canvas.pixel(0, 0), Color::BLACK);
        assert_eq!(canvas.pixel(3, 3), Color::BLACK);
    }
}
