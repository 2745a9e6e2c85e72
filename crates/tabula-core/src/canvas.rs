//! The [`Canvas`] pixel draw target and [`Color`].
//!
//! A `Canvas` is a *view* into a shared ARGB pixel buffer. Cloning a canvas
//! yields another view of the **same** storage; [`slice`](Canvas::slice)
//! returns a clipped, translated sub-view. Components always draw in local
//! coordinates: a leaf handed the slice covering its own bounds fills
//! `(0, 0)..(width, height)` and lands exactly where the layout put it, so
//! the view plays the role a transformation-matrix push would in a GL host.
//!
//! The backing storage is single-thread shared (`Rc<RefCell>`); the engine
//! assumes one owning render thread throughout.

use std::cell::RefCell;
use std::rc::Rc;

use crate::bounds::Bounds;

// ---------------------------------------------------------------------------
// Color
// ---------------------------------------------------------------------------

/// A colour packed into a `u32` (0xAARRGGBB), matching the surface pixel
/// format so no conversion happens on the fill path.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Color(pub u32);

impl Color {
    pub const BLACK: Self = Self(0xFF00_0000);
    pub const WHITE: Self = Self(0xFFFF_FFFF);

    /// Construct an opaque colour from RGB components.
    #[inline]
    pub const fn from_rgb(r: u8, g: u8, b: u8) -> Self {
        Self(0xFF00_0000 | ((r as u32) << 16) | ((g as u32) << 8) | (b as u32))
    }

    /// Construct from RGBA components.
    #[inline]
    pub const fn from_rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self(((a as u32) << 24) | ((r as u32) << 16) | ((g as u32) << 8) | (b as u32))
    }

    /// Red component.
    #[inline]
    pub const fn r(self) -> u8 {
        ((self.0 >> 16) & 0xFF) as u8
    }

    /// Green component.
    #[inline]
    pub const fn g(self) -> u8 {
        ((self.0 >> 8) & 0xFF) as u8
    }

    /// Blue component.
    #[inline]
    pub const fn b(self) -> u8 {
        (self.0 & 0xFF) as u8
    }

    /// Alpha component.
    #[inline]
    pub const fn a(self) -> u8 {
        ((self.0 >> 24) & 0xFF) as u8
    }
}

// ---------------------------------------------------------------------------
// Internal shared buffer
// ---------------------------------------------------------------------------

#[derive(Debug)]
struct PixelBuffer {
    pixels: Vec<u32>,
    width: usize,
    height: usize,
}

impl PixelBuffer {
    fn new(width: usize, height: usize) -> Self {
        Self {
            pixels: vec![Color::BLACK.0; width * height],
            width,
            height,
        }
    }

    #[inline]
    fn index(&self, x: i32, y: i32) -> Option<usize> {
        if x >= 0 && y >= 0 && (x as usize) < self.width && (y as usize) < self.height {
            Some((y as usize) * self.width + (x as usize))
        } else {
            None
        }
    }
}

// ---------------------------------------------------------------------------
// Viewport
// ---------------------------------------------------------------------------

/// Half-open integer rectangle in buffer coordinates.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
struct Viewport {
    x0: i32,
    y0: i32,
    x1: i32,
    y1: i32,
}

impl Viewport {
    #[inline]
    fn width(&self) -> i32 {
        (self.x1 - self.x0).max(0)
    }

    #[inline]
    fn height(&self) -> i32 {
        (self.y1 - self.y0).max(0)
    }

    fn intersect(&self, other: Viewport) -> Viewport {
        let v = Viewport {
            x0: self.x0.max(other.x0),
            y0: self.y0.max(other.y0),
            x1: self.x1.min(other.x1),
            y1: self.y1.min(other.y1),
        };
        if v.x0 >= v.x1 || v.y0 >= v.y1 {
            Viewport {
                x0: v.x0,
                y0: v.y0,
                x1: v.x0,
                y1: v.y0,
            }
        } else {
            v
        }
    }
}

// ---------------------------------------------------------------------------
// Canvas
// ---------------------------------------------------------------------------

/// A view into a shared pixel buffer.
///
/// Cloning produces another view of the same buffer (slice semantics).
#[derive(Debug, Clone)]
pub struct Canvas {
    buffer: Rc<RefCell<PixelBuffer>>,
    viewport: Viewport,
}

impl Canvas {
    /// Create a new canvas of the given pixel dimensions, filled with opaque
    /// black.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            buffer: Rc::new(RefCell::new(PixelBuffer::new(
                width as usize,
                height as usize,
            ))),
            viewport: Viewport {
                x0: 0,
                y0: 0,
                x1: width as i32,
                y1: height as i32,
            },
        }
    }

    /// View width in pixels.
    #[inline]
    pub fn width(&self) -> i32 {
        self.viewport.width()
    }

    /// View height in pixels.
    #[inline]
    pub fn height(&self) -> i32 {
        self.viewport.height()
    }

    /// Get a sub-view covering `bounds` (local coordinates, rounded to whole
    /// pixels, clipped against this view). The returned canvas shares the
    /// same backing buffer.
    pub fn slice(&self, bounds: Bounds) -> Canvas {
        let x0 = self.viewport.x0 + bounds.x.round() as i32;
        let y0 = self.viewport.y0 + bounds.y.round() as i32;
        let requested = Viewport {
            x0,
            y0,
            x1: x0 + bounds.width.round().max(0.0) as i32,
            y1: y0 + bounds.height.round().max(0.0) as i32,
        };
        Canvas {
            buffer: Rc::clone(&self.buffer),
            viewport: self.viewport.intersect(requested),
        }
    }

    /// Fill the whole view with `color`.
    pub fn fill(&self, color: Color) {
        self.fill_rect(
            Bounds::new(0.0, 0.0, self.width() as f32, self.height() as f32),
            color,
        );
    }

    /// Fill a rectangle (local coordinates) with `color`, clipped to the
    /// view.
    pub fn fill_rect(&self, rect: Bounds, color: Color) {
        let target = self.slice(rect).viewport;
        let mut buf = self.buffer.borrow_mut();
        for y in target.y0..target.y1 {
            for x in target.x0..target.x1 {
                if let Some(i) = buf.index(x, y) {
                    buf.pixels[i] = color.0;
                }
            }
        }
    }

    /// Read the pixel at local `(x, y)`. Returns opaque black outside the
    /// view.
    pub fn pixel(&self, x: i32, y: i32) -> Color {
        let bx = self.viewport.x0 + x;
        let by = self.viewport.y0 + y;
        if bx >= self.viewport.x1 || by >= self.viewport.y1 || x < 0 || y < 0 {
            return Color::BLACK;
        }
        let buf = self.buffer.borrow();
        buf.index(bx, by)
            .map(|i| Color(buf.pixels[i]))
            .unwrap_or(Color::BLACK)
    }

    /// Copy the view's pixels into `dst` (row-major, `dst_width` pixels per
    /// row). Areas of `dst` outside the view are cleared to opaque black.
    pub fn copy_into(&self, dst: &mut [u32], dst_width: usize, dst_height: usize) {
        let src_w = self.width() as usize;
        let src_h = self.height() as usize;
        let copy_w = src_w.min(dst_width);
        let copy_h = src_h.min(dst_height);

        if dst_width > src_w || dst_height > src_h {
            dst.fill(Color::BLACK.0);
        }

        let buf = self.buffer.borrow();
        for y in 0..copy_h {
            let sy = self.viewport.y0 as usize + y;
            let src_start = sy * buf.width + self.viewport.x0 as usize;
            let dst_start = y * dst_width;
            let src_end = src_start + copy_w;
            let dst_end = dst_start + copy_w;
            if src_end <= buf.pixels.len() && dst_end <= dst.len() {
                dst[dst_start..dst_end].copy_from_slice(&buf.pixels[src_start..src_end]);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn color_components() {
        let c = Color::from_rgba(0xAB, 0xCD, 0xEF, 0x7F);
        assert_eq!(c.r(), 0xAB);
        assert_eq!(c.g(), 0xCD);
        assert_eq!(c.b(), 0xEF);
        assert_eq!(c.a(), 0x7F);
        assert_eq!(Color::from_rgb(1, 2, 3).a(), 0xFF);
    }

    #[test]
    fn new_canvas_is_black() {
        let c = Canvas::new(4, 3);
        assert_eq!(c.width(), 4);
        assert_eq!(c.height(), 3);
        assert_eq!(c.pixel(2, 1), Color::BLACK);
    }

    #[test]
    fn slice_shares_buffer() {
        let c = Canvas::new(4, 4);
        let red = Color::from_rgb(255, 0, 0);
        let view = c.slice(Bounds::new(1.0, 1.0, 2.0, 2.0));
        view.fill(red);
        assert_eq!(c.pixel(1, 1), red);
        assert_eq!(c.pixel(2, 2), red);
        assert_eq!(c.pixel(0, 0), Color::BLACK);
        assert_eq!(c.pixel(3, 3), Color::BLACK);
    }

    #[test]
    fn slice_clips_to_parent() {
        let c = Canvas::new(4, 4);
        let view = c.slice(Bounds::new(2.0, 2.0, 10.0, 10.0));
        assert_eq!(view.width(), 2);
        assert_eq!(view.height(), 2);
    }

    #[test]
    fn nested_slices_translate() {
        let c = Canvas::new(8, 8);
        let white = Color::WHITE;
        let outer = c.slice(Bounds::new(2.0, 2.0, 4.0, 4.0));
        let inner = outer.slice(Bounds::new(1.0, 1.0, 1.0, 1.0));
        inner.fill(white);
        assert_eq!(c.pixel(3, 3), white);
        assert_eq!(c.pixel(2, 2), Color::BLACK);
    }

    #[test]
    fn fill_rect_out_of_view_is_noop() {
        let c = Canvas::new(2, 2);
        c.fill_rect(Bounds::new(5.0, 5.0, 3.0, 3.0), Color::WHITE);
        for y in 0..2 {
            for x in 0..2 {
                assert_eq!(c.pixel(x, y), Color::BLACK);
            }
        }
    }

    #[test]
    fn copy_into_blits_view() {
        let c = Canvas::new(2, 2);
        let red = Color::from_rgb(255, 0, 0);
        c.fill(red);
        let mut dst = vec![0u32; 9];
        c.copy_into(&mut dst, 3, 3);
        assert_eq!(dst[0], red.0);
        assert_eq!(dst[1], red.0);
        assert_eq!(dst[2], Color::BLACK.0); // outside the view, cleared
        assert_eq!(dst[3], red.0);
        assert_eq!(dst[4], red.0);
    }
}
