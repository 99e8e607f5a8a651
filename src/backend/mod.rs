//! Rendering-backend contract and backend selection.
//!
//! A backend is split along the thread boundary it straddles:
//! - [`Backend`] is the handle owned by the caller's thread: lifecycle,
//!   frame scheduling, aspect ratio and keyboard polling.
//! - [`Painter`] is the drawing capability the backend hands to frame
//!   callbacks on its own render thread: the state stack, style setters,
//!   primitives and the raster image cache.

pub mod headless;
pub mod state;
#[cfg(test)]
pub(crate) mod testing;

pub use headless::HeadlessBackend;
pub use state::GraphicsState;

use crate::config::Config;
use crate::error::{BackendError, EaselError};
use crate::input::Key;
use crate::scene::ElementId;
use crate::style::{FontStyle, FontWeight, TextAlign};
use std::str::FromStr;

/// Callback run once per frame on the backend's render thread.
pub type FrameCallback = Box<dyn FnMut(&mut dyn Painter) + Send + 'static>;

/// Callback run once on the next frame.
pub type FrameRequest = Box<dyn FnOnce(&mut dyn Painter) + Send + 'static>;

/// Drawing capability of a backend surface.
///
/// Setters mirror their value into the painter's [`GraphicsState`] so that a
/// later [`Painter::save_state`] reflects it. Polygon operations take parallel
/// coordinate slices of equal length.
pub trait Painter {
    /// Clears the whole surface.
    fn clear(&mut self);

    /// Returns a snapshot of the current state.
    fn save_state(&self) -> GraphicsState;
    /// Overwrites the current state from a snapshot.
    fn restore_state(&mut self, state: &GraphicsState);
    /// Returns to the fixed defaults (black fill/stroke, no line, Arial 12, left).
    fn reset_state(&mut self);

    fn set_fill(&mut self, color: &str);
    fn set_stroke(&mut self, color: &str);
    fn set_line_width(&mut self, width: u32);
    fn set_text_align(&mut self, align: TextAlign);
    fn set_font_family(&mut self, family: &str);
    fn set_font_size(&mut self, size: i32);
    fn set_font_weight(&mut self, weight: FontWeight);
    fn set_font_style(&mut self, style: FontStyle);

    fn fill_rect(&mut self, x: i32, y: i32, width: i32, height: i32);
    fn fill_oval(&mut self, x: i32, y: i32, width: i32, height: i32);
    fn fill_polygon(&mut self, xs: &[i32], ys: &[i32]);
    fn fill_text(&mut self, x: i32, y: i32, text: &str);

    fn stroke_rect(&mut self, x: i32, y: i32, width: i32, height: i32);
    fn stroke_oval(&mut self, x: i32, y: i32, width: i32, height: i32);
    fn stroke_polygon(&mut self, xs: &[i32], ys: &[i32]);
    fn stroke_line(&mut self, x1: i32, y1: i32, x2: i32, y2: i32);
    fn stroke_text(&mut self, x: i32, y: i32, text: &str);

    /// Draws encoded image bytes, decoding once and caching under `id`.
    ///
    /// A non-positive width or height draws at the image's natural size.
    fn draw_raster_image(
        &mut self,
        id: ElementId,
        data: &[u8],
        x: i32,
        y: i32,
        width: i32,
        height: i32,
    );
    /// Drops the cached decode for `id`.
    fn purge_raster_image(&mut self, id: ElementId);
}

/// Lifecycle, scheduling and input side of a backend.
pub trait Backend {
    /// Short name used for selection and logging.
    fn name(&self) -> &'static str;

    /// Creates the surface. Calling it twice is a no-op.
    ///
    /// # Errors
    /// Fails when the surface or its render thread cannot be created.
    fn init(&mut self) -> Result<(), BackendError>;
    /// Stops rendering and releases the surface.
    fn dispose(&mut self);
    /// Returns `true` once the surface has been closed.
    fn is_finished(&self) -> bool;

    /// Runs `callback` at `frames_per_second` until disposed.
    fn schedule_frame_updates(&mut self, callback: FrameCallback, frames_per_second: u32);
    /// Runs `callback` once on the next frame.
    fn request_animation_frame(&mut self, callback: FrameRequest);

    /// Reshapes the logical 1000x1000 canvas to `width:height`.
    fn set_aspect_ratio(&mut self, width: u32, height: u32);

    fn is_key_pressed(&self, key: Key) -> bool;
    /// Held keys in press order.
    fn pressed_keys(&self) -> Vec<Key>;
}

/// The fixed, enumerable set of compiled-in backends.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BackendKind {
    /// Offscreen Cairo surface driven by its own render thread
    Headless,
}

impl BackendKind {
    pub const ALL: [BackendKind; 1] = [BackendKind::Headless];

    pub fn name(self) -> &'static str {
        match self {
            BackendKind::Headless => "headless",
        }
    }
}

impl FromStr for BackendKind {
    type Err = EaselError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        BackendKind::ALL
            .into_iter()
            .find(|kind| kind.name().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| EaselError::UnknownBackend(s.to_string()))
    }
}

/// Creates the backend named by `name`.
///
/// # Errors
/// Returns [`BackendError::NoBackendAvailable`] for a blank name and
/// [`EaselError::UnknownBackend`] for names outside [`BackendKind::ALL`].
pub fn select(name: &str, config: &Config) -> Result<Box<dyn Backend>, EaselError> {
    if name.trim().is_empty() {
        return Err(BackendError::NoBackendAvailable.into());
    }
    let kind: BackendKind = name.parse()?;
    log::debug!("Selected '{}' backend", kind.name());
    Ok(match kind {
        BackendKind::Headless => Box::new(HeadlessBackend::from_config(config)),
    })
}
