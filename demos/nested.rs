//! A table layout embedded as a child of another, plus a pinned column.
//!
//! Run with: `cargo run --bin nested`

use tabula_core::{Color, RenderableBox, SizingPolicy, TableLayout};
use tabula_winit::{WinitConfig, WinitDriver};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Inner grid: a 2x2 checker of red and blue.
    let red = Color::from_rgb(220, 60, 60);
    let blue = Color::from_rgb(60, 60, 220);
    let mut inner = TableLayout::new();
    inner.add(RenderableBox::new(120.0, 80.0, red), 0, 0, 1, 1)?;
    inner.add(RenderableBox::new(120.0, 80.0, blue), 0, 1, 1, 1)?;
    inner.add(RenderableBox::new(120.0, 80.0, blue), 1, 0, 1, 1)?;
    inner.add(RenderableBox::new(120.0, 80.0, red), 1, 1, 1, 1)?;

    // Outer grid: a gray sidebar pinned to 80px wide next to the inner
    // checker. The sidebar box asks for 200px but the Absolute column wins.
    let gray = Color::from_rgb(120, 120, 120);
    let mut outer = TableLayout::new();
    outer.set_col_size(0, SizingPolicy::Absolute(80.0))?;
    outer.add(RenderableBox::new(200.0, 160.0, gray), 0, 0, 1, 1)?;
    outer.add(inner, 0, 1, 1, 1)?;

    let driver = WinitDriver::new(WinitConfig {
        title: "tabula - nested".into(),
        width: 320,
        height: 160,
    });
    driver.run(Box::new(outer))
}
