//! Winit desktop host for tabula.
//!
//! Owns the native window and event loop and drives a root [`Component`]:
//! - [`winit`] for window creation and events
//! - [`softbuffer`] for CPU-based pixel presentation
//!
//! All geometry logic lives in `tabula-core`; this crate only assigns the
//! root's bounds from the window size, asks it to render into a [`Canvas`],
//! and blits the result to the surface.
//!
//! # Usage
//!
//! ```rust,no_run
//! use tabula_core::{Color, RenderableBox, TableLayout};
//! use tabula_winit::{WinitConfig, WinitDriver};
//!
//! let mut layout = TableLayout::new();
//! layout
//!     .add(RenderableBox::new(200.0, 100.0, Color::WHITE), 0, 0, 1, 1)
//!     .unwrap();
//! let driver = WinitDriver::new(WinitConfig::default());
//! // driver.run(Box::new(layout)).unwrap();
//! ```

use std::num::NonZeroU32;
use std::sync::Arc;

use log::warn;
use winit::{
    application::ApplicationHandler,
    dpi::{LogicalSize, PhysicalSize},
    event::WindowEvent,
    event_loop::{ActiveEventLoop, EventLoop},
    window::{Window, WindowId},
};

use tabula_core::{Bounds, Canvas, Color, Component};

// ---------------------------------------------------------------------------
// Configuration
// ---------------------------------------------------------------------------

/// Configuration for the winit host.
pub struct WinitConfig {
    /// Window title.
    pub title: String,
    /// Initial window width in pixels.
    pub width: u32,
    /// Initial window height in pixels.
    pub height: u32,
}

impl Default for WinitConfig {
    fn default() -> Self {
        Self {
            title: "tabula".into(),
            width: 640,
            height: 480,
        }
    }
}

// ---------------------------------------------------------------------------
// WinitDriver
// ---------------------------------------------------------------------------

/// Winit-based host driver. Owns the main-thread event loop and drives a
/// root component tree.
pub struct WinitDriver {
    config: WinitConfig,
}

impl WinitDriver {
    pub fn new(config: WinitConfig) -> Self {
        Self { config }
    }

    /// Run the event loop until the window closes.
    pub fn run(self, root: Box<dyn Component>) -> Result<(), Box<dyn std::error::Error>> {
        let event_loop = EventLoop::new()?;
        let mut app = SandboxApp::new(self.config, root);
        event_loop.run_app(&mut app)?;
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// SandboxApp — ApplicationHandler
// ---------------------------------------------------------------------------

struct SandboxApp {
    config: WinitConfig,
    root: Box<dyn Component>,
    state: Option<SurfaceState>,
}

struct SurfaceState {
    window: Arc<Window>,
    surface: softbuffer::Surface<Arc<Window>, Arc<Window>>,
    canvas: Canvas,
    width: u32,
    height: u32,
}

impl SandboxApp {
    fn new(config: WinitConfig, root: Box<dyn Component>) -> Self {
        Self {
            config,
            root,
            state: None,
        }
    }

    fn render(&mut self) {
        let state = match self.state.as_mut() {
            Some(s) => s,
            None => return,
        };
        if state.width == 0 || state.height == 0 {
            return;
        }

        state.canvas.fill(Color::BLACK);
        if let Err(err) = self.root.render(&state.canvas) {
            // Child geometry is preserved on a failed re-solve; keep showing
            // the previous frame and let the host mutate and retry.
            warn!("frame skipped, layout failed: {err}");
            return;
        }

        let mut buf = match state.surface.buffer_mut() {
            Ok(b) => b,
            Err(_) => return,
        };
        state
            .canvas
            .copy_into(&mut buf, state.width as usize, state.height as usize);
        buf.present().ok();
    }

    /// Resize the surface and canvas and hand the root its new bounds.
    fn resize(&mut self, width: u32, height: u32) {
        let Some(state) = self.state.as_mut() else {
            return;
        };
        state.width = width;
        state.height = height;
        state
            .surface
            .resize(
                NonZeroU32::new(width).unwrap_or(NonZeroU32::new(1).unwrap()),
                NonZeroU32::new(height).unwrap_or(NonZeroU32::new(1).unwrap()),
            )
            .ok();
        state.canvas = Canvas::new(width, height);
        self.root
            .set_bounds(Bounds::new(0.0, 0.0, width as f32, height as f32));
    }
}

impl ApplicationHandler for SandboxApp {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.state.is_some() {
            return; // already initialized
        }

        let window_attrs = Window::default_attributes()
            .with_title(&self.config.title)
            .with_inner_size(LogicalSize::new(self.config.width, self.config.height))
            .with_resizable(true);

        let window = Arc::new(
            event_loop
                .create_window(window_attrs)
                .expect("failed to create window"),
        );

        let context =
            softbuffer::Context::new(window.clone()).expect("failed to create softbuffer context");
        let mut surface = softbuffer::Surface::new(&context, window.clone())
            .expect("failed to create softbuffer surface");

        let size = window.inner_size();
        let width = size.width.max(1);
        let height = size.height.max(1);
        surface
            .resize(
                NonZeroU32::new(width).unwrap_or(NonZeroU32::new(1).unwrap()),
                NonZeroU32::new(height).unwrap_or(NonZeroU32::new(1).unwrap()),
            )
            .ok();

        self.root
            .set_bounds(Bounds::new(0.0, 0.0, width as f32, height as f32));
        self.state = Some(SurfaceState {
            window,
            surface,
            canvas: Canvas::new(width, height),
            width,
            height,
        });

        self.render();
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        match event {
            WindowEvent::CloseRequested => {
                event_loop.exit();
            }

            WindowEvent::Resized(PhysicalSize { width, height }) => {
                self.resize(width, height);
                self.render();
                if let Some(state) = self.state.as_ref() {
                    state.window.request_redraw();
                }
            }

            WindowEvent::RedrawRequested => {
                self.render();
            }

            _ => {}
        }
    }
}
