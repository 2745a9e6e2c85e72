//! Seven colored boxes on a 3x3 grid with spanning cells.
//!
//! Run with: `cargo run --bin table`

use tabula_core::{Color, RenderableBox, TableLayout};
use tabula_winit::{WinitConfig, WinitDriver};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let white = Color::from_rgb(255, 255, 255);
    let yellow = Color::from_rgb(255, 255, 0);
    let magenta = Color::from_rgb(255, 0, 255);
    let red = Color::from_rgb(255, 0, 0);
    let cyan = Color::from_rgb(0, 255, 255);
    let green = Color::from_rgb(0, 255, 0);
    let blue = Color::from_rgb(0, 0, 255);

    let mut layout = TableLayout::new();
    layout.add(RenderableBox::new(200.0, 100.0, white), 0, 0, 1, 1)?;
    layout.add(RenderableBox::new(150.0, 100.0, yellow), 0, 1, 1, 1)?;
    layout.add(RenderableBox::new(100.0, 100.0, magenta), 0, 2, 1, 1)?;
    layout.add(RenderableBox::new(600.0, 100.0, red), 1, 0, 1, 2)?;
    layout.add(RenderableBox::new(200.0, 100.0, cyan), 1, 2, 1, 1)?;
    layout.add(RenderableBox::new(100.0, 100.0, green), 2, 0, 1, 1)?;
    layout.add(RenderableBox::new(800.0, 100.0, blue), 2, 1, 1, 2)?;

    let driver = WinitDriver::new(WinitConfig {
        title: "tabula - table".into(),
        width: 1000,
        height: 300,
    });
    driver.run(Box::new(layout))
}
