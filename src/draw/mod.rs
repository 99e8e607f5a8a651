//! Color engine and Cairo rendering.
//!
//! - [`css`]: CSS color text to packed `0xAARRGGBB` pixels
//! - [`Color`]: floating-point RGBA as consumed by Cairo
//! - [`FontDescriptor`]: painter font state as a Pango description
//! - [`CairoPainter`]: the [`crate::backend::Painter`] used by the headless backend

pub mod color;
pub mod css;
pub mod font;
pub mod named;
pub mod render;

// Re-export commonly used types at module level
pub use color::Color;
pub use css::to_pixel;
pub use font::FontDescriptor;
pub use render::CairoPainter;
pub use color::{BLACK, TRANSPARENT, WHITE};
