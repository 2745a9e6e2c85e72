//! **tabula-core** — a retained-mode table layout engine (core types).
//!
//! This crate provides the foundational pieces of the *tabula* rendering
//! sandbox: the [`Bounds`] rectangle, the [`Component`] tree contract, the
//! [`Canvas`] pixel draw target, and [`TableLayout`] — a grid layout that
//! sizes its rows and columns by solving a linear program per axis with a
//! bounded simplex solver.

pub mod bounds;
pub mod box_;
pub mod canvas;
pub mod component;
pub mod error;
pub mod solver;
pub mod table;

pub use bounds::Bounds;
pub use box_::RenderableBox;
pub use canvas::{Canvas, Color};
pub use component::Component;
pub use error::{LayoutError, Result, SolverError};
pub use solver::SolverConfig;
pub use table::{Axis, Placement, SizingPolicy, TableLayout};
