//! Test doubles for the backend contract.

use super::{Backend, FrameCallback, FrameRequest, GraphicsState, Painter};
use crate::error::BackendError;
use crate::input::{Key, KeyboardState};
use crate::scene::ElementId;
use crate::style::{FontStyle, FontWeight, TextAlign};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

/// One recorded painter call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    Clear,
    ResetState,
    RestoreState,
    SetFill(String),
    SetStroke(String),
    SetLineWidth(u32),
    SetTextAlign(TextAlign),
    SetFontFamily(String),
    SetFontSize(i32),
    SetFontWeight(FontWeight),
    SetFontStyle(FontStyle),
    FillRect(i32, i32, i32, i32),
    FillOval(i32, i32, i32, i32),
    FillPolygon(Vec<i32>, Vec<i32>),
    FillText(i32, i32, String),
    StrokeRect(i32, i32, i32, i32),
    StrokeOval(i32, i32, i32, i32),
    StrokePolygon(Vec<i32>, Vec<i32>),
    StrokeLine(i32, i32, i32, i32),
    StrokeText(i32, i32, String),
    DrawImage(ElementId, usize, i32, i32, i32, i32),
    PurgeImage(ElementId),
}

/// Painter that records every call and mirrors setters into its state.
#[derive(Debug, Default)]
pub struct RecordingPainter {
    pub calls: Vec<Call>,
    pub state: GraphicsState,
}

impl RecordingPainter {
    /// Calls other than state resets, for asserting on a draw sequence.
    pub fn drawing_calls(&self) -> Vec<Call> {
        self.calls
            .iter()
            .filter(|call| !matches!(call, Call::ResetState))
            .cloned()
            .collect()
    }
}

impl Painter for RecordingPainter {
    fn clear(&mut self) {
        self.calls.push(Call::Clear);
    }

    fn save_state(&self) -> GraphicsState {
        self.state.clone()
    }

    fn restore_state(&mut self, state: &GraphicsState) {
        self.calls.push(Call::RestoreState);
        self.state.restore(state);
    }

    fn reset_state(&mut self) {
        self.calls.push(Call::ResetState);
        self.state.reset();
    }

    fn set_fill(&mut self, color: &str) {
        self.calls.push(Call::SetFill(color.to_string()));
        self.state.fill_color = color.to_string();
    }

    fn set_stroke(&mut self, color: &str) {
        self.calls.push(Call::SetStroke(color.to_string()));
        self.state.stroke_color = color.to_string();
    }

    fn set_line_width(&mut self, width: u32) {
        self.calls.push(Call::SetLineWidth(width));
        self.state.line_width = width;
    }

    fn set_text_align(&mut self, align: TextAlign) {
        self.calls.push(Call::SetTextAlign(align));
        self.state.text_align = align;
    }

    fn set_font_family(&mut self, family: &str) {
        self.calls.push(Call::SetFontFamily(family.to_string()));
        self.state.font_family = family.to_string();
    }

    fn set_font_size(&mut self, size: i32) {
        self.calls.push(Call::SetFontSize(size));
        self.state.font_size = size;
    }

    fn set_font_weight(&mut self, weight: FontWeight) {
        self.calls.push(Call::SetFontWeight(weight));
        self.state.font_weight = weight;
    }

    fn set_font_style(&mut self, style: FontStyle) {
        self.calls.push(Call::SetFontStyle(style));
        self.state.font_style = style;
    }

    fn fill_rect(&mut self, x: i32, y: i32, width: i32, height: i32) {
        self.calls.push(Call::FillRect(x, y, width, height));
    }

    fn fill_oval(&mut self, x: i32, y: i32, width: i32, height: i32) {
        self.calls.push(Call::FillOval(x, y, width, height));
    }

    fn fill_polygon(&mut self, xs: &[i32], ys: &[i32]) {
        self.calls.push(Call::FillPolygon(xs.to_vec(), ys.to_vec()));
    }

    fn fill_text(&mut self, x: i32, y: i32, text: &str) {
        self.calls.push(Call::FillText(x, y, text.to_string()));
    }

    fn stroke_rect(&mut self, x: i32, y: i32, width: i32, height: i32) {
        self.calls.push(Call::StrokeRect(x, y, width, height));
    }

    fn stroke_oval(&mut self, x: i32, y: i32, width: i32, height: i32) {
        self.calls.push(Call::StrokeOval(x, y, width, height));
    }

    fn stroke_polygon(&mut self, xs: &[i32], ys: &[i32]) {
        self.calls.push(Call::StrokePolygon(xs.to_vec(), ys.to_vec()));
    }

    fn stroke_line(&mut self, x1: i32, y1: i32, x2: i32, y2: i32) {
        self.calls.push(Call::StrokeLine(x1, y1, x2, y2));
    }

    fn stroke_text(&mut self, x: i32, y: i32, text: &str) {
        self.calls.push(Call::StrokeText(x, y, text.to_string()));
    }

    fn draw_raster_image(
        &mut self,
        id: ElementId,
        data: &[u8],
        x: i32,
        y: i32,
        width: i32,
        height: i32,
    ) {
        self.calls
            .push(Call::DrawImage(id, data.len(), x, y, width, height));
    }

    fn purge_raster_image(&mut self, id: ElementId) {
        self.calls.push(Call::PurgeImage(id));
    }
}

/// Backend without a render thread; tests drive frames by hand.
#[derive(Clone, Default)]
pub struct FakeBackend {
    pub inner: Arc<FakeBackendInner>,
}

#[derive(Default)]
pub struct FakeBackendInner {
    pub initialized: AtomicBool,
    pub disposed: AtomicBool,
    pub closed: AtomicBool,
    pub init_calls: AtomicUsize,
    pub callback: Mutex<Option<FrameCallback>>,
    pub frames_per_second: Mutex<Option<u32>>,
    pub requests: Mutex<Vec<FrameRequest>>,
    pub aspect: Mutex<Option<(u32, u32)>>,
    pub keyboard: KeyboardState,
}

impl FakeBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Runs one frame the way a real backend would: the scheduled callback,
    /// then any one-shot requests.
    pub fn render_frame(&self) -> RecordingPainter {
        let mut painter = RecordingPainter::default();
        if let Some(callback) = self.inner.callback.lock().unwrap().as_mut() {
            callback(&mut painter);
        }
        for request in self.inner.requests.lock().unwrap().drain(..) {
            request(&mut painter);
        }
        painter
    }

    /// Simulates the user closing the surface.
    pub fn close(&self) {
        self.inner.closed.store(true, Ordering::SeqCst);
    }
}

impl Backend for FakeBackend {
    fn name(&self) -> &'static str {
        "fake"
    }

    fn init(&mut self) -> Result<(), BackendError> {
        self.inner.init_calls.fetch_add(1, Ordering::SeqCst);
        self.inner.initialized.store(true, Ordering::SeqCst);
        Ok(())
    }

    fn dispose(&mut self) {
        self.inner.disposed.store(true, Ordering::SeqCst);
    }

    fn is_finished(&self) -> bool {
        self.inner.initialized.load(Ordering::SeqCst) && self.inner.closed.load(Ordering::SeqCst)
    }

    fn schedule_frame_updates(&mut self, callback: FrameCallback, frames_per_second: u32) {
        *self.inner.callback.lock().unwrap() = Some(callback);
        *self.inner.frames_per_second.lock().unwrap() = Some(frames_per_second);
    }

    fn request_animation_frame(&mut self, callback: FrameRequest) {
        self.inner.requests.lock().unwrap().push(callback);
    }

    fn set_aspect_ratio(&mut self, width: u32, height: u32) {
        *self.inner.aspect.lock().unwrap() = Some((width, height));
    }

    fn is_key_pressed(&self, key: Key) -> bool {
        self.inner.keyboard.is_pressed(key)
    }

    fn pressed_keys(&self) -> Vec<Key> {
        self.inner.keyboard.pressed()
    }
}
