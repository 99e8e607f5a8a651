//! Retained-mode 2D drawing for beginners.
//!
//! Drawing calls add elements to a persistent scene that a backend repaints
//! continuously; later calls move, restyle, hide or remove those elements by
//! id. See [`Canvas`] for the drawing API.
//!
//! ```no_run
//! use easel::{Canvas, ShapeStyle};
//!
//! let mut canvas = Canvas::new()?;
//! let ball = canvas.draw_circle(100, 500, 40, ShapeStyle::new().fill("tomato"))?;
//! for x in 100..900 {
//!     canvas.update_position_x(ball, x)?;
//! }
//! # Ok::<(), easel::EaselError>(())
//! ```

pub mod backend;
pub mod canvas;
pub mod config;
pub mod draw;
pub mod engine;
pub mod error;
pub mod input;
pub mod loader;
pub mod scene;
pub mod style;
pub mod util;

pub use canvas::Canvas;
pub use config::Config;
pub use error::{BackendError, EaselError, StyleError};
pub use scene::{ElementId, ShapeStyle};
