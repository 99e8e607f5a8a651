//! Cairo-based implementation of the [`Painter`] contract.

use super::color::{self, Color};
use super::font::FontDescriptor;
use crate::backend::{GraphicsState, Painter};
use crate::error::BackendError;
use crate::scene::ElementId;
use crate::style::{FontStyle, FontWeight, TextAlign};
use std::collections::HashMap;
use std::fs::File;
use std::path::Path;

/// Paints onto an offscreen ARGB32 Cairo surface.
///
/// One surface pixel per logical canvas unit. Cairo objects are not `Send`,
/// so a painter is created on, and never leaves, the render thread.
pub struct CairoPainter {
    surface: cairo::ImageSurface,
    ctx: cairo::Context,
    state: GraphicsState,
    background: Color,
    /// Decoded images by element id; `None` marks bytes that failed to decode.
    images: HashMap<ElementId, Option<cairo::ImageSurface>>,
}

impl CairoPainter {
    /// Creates a painter over a fresh `width` x `height` surface.
    ///
    /// # Errors
    /// Fails when Cairo cannot allocate the surface or its context.
    pub fn new(width: i32, height: i32) -> Result<Self, BackendError> {
        let (surface, ctx) = create_surface(width, height)?;
        let mut painter = Self {
            surface,
            ctx,
            state: GraphicsState::default(),
            background: color::WHITE,
            images: HashMap::new(),
        };
        painter.clear();
        Ok(painter)
    }

    /// Sets the color used by [`Painter::clear`].
    pub fn set_background(&mut self, color: Color) {
        self.background = color;
    }

    pub fn size(&self) -> (i32, i32) {
        (self.surface.width(), self.surface.height())
    }

    /// Replaces the surface with one of the new size; state and image cache survive.
    ///
    /// # Errors
    /// Fails when Cairo cannot allocate the new surface.
    pub fn resize(&mut self, width: i32, height: i32) -> Result<(), BackendError> {
        if self.size() == (width, height) {
            return Ok(());
        }
        let (surface, ctx) = create_surface(width, height)?;
        log::debug!("Resized drawing surface to {}x{}", width, height);
        self.surface = surface;
        self.ctx = ctx;
        self.clear();
        Ok(())
    }

    pub fn surface(&self) -> &cairo::ImageSurface {
        &self.surface
    }

    /// Reads one pixel as `0xAARRGGBB` (premultiplied).
    pub fn pixel(&self, x: i32, y: i32) -> Option<u32> {
        let (width, height) = self.size();
        if x < 0 || y < 0 || x >= width || y >= height {
            return None;
        }
        self.surface.flush();
        let offset = y as usize * self.surface.stride() as usize + x as usize * 4;
        let mut pixel = None;
        self.surface
            .with_data(|data| {
                pixel = data
                    .get(offset..offset + 4)
                    .and_then(|bytes| bytes.try_into().ok())
                    .map(u32::from_ne_bytes);
            })
            .ok()?;
        pixel
    }

    /// Writes the current surface contents as PNG.
    ///
    /// # Errors
    /// Fails when the file cannot be created or encoding fails.
    pub fn write_png(&self, path: &Path) -> Result<(), BackendError> {
        let output_error = |reason: String| BackendError::Output {
            path: path.display().to_string(),
            reason,
        };
        self.surface.flush();
        let mut file = File::create(path).map_err(|e| output_error(e.to_string()))?;
        self.surface
            .write_to_png(&mut file)
            .map_err(|e| output_error(e.to_string()))?;
        log::info!("Wrote frame to {}", path.display());
        Ok(())
    }

    fn set_source(&self, color: &str) {
        let color = Color::parse(color);
        self.ctx.set_source_rgba(color.r, color.g, color.b, color.a);
    }

    fn prepare_fill(&self) {
        self.set_source(&self.state.fill_color);
    }

    fn prepare_stroke(&self) {
        self.set_source(&self.state.stroke_color);
        self.ctx.set_line_width(f64::from(self.state.line_width));
        self.ctx.set_line_join(cairo::LineJoin::Miter);
    }

    fn oval_path(&self, x: i32, y: i32, width: i32, height: i32) -> bool {
        if width <= 0 || height <= 0 {
            return false;
        }
        let rx = f64::from(width) / 2.0;
        let ry = f64::from(height) / 2.0;
        self.ctx.save().ok();
        self.ctx.translate(f64::from(x) + rx, f64::from(y) + ry);
        self.ctx.scale(rx, ry);
        self.ctx.new_path();
        self.ctx.arc(0.0, 0.0, 1.0, 0.0, 2.0 * std::f64::consts::PI);
        self.ctx.restore().ok();
        true
    }

    fn polygon_path(&self, xs: &[i32], ys: &[i32]) -> bool {
        let mut points = xs.iter().zip(ys);
        let Some((&x0, &y0)) = points.next() else {
            return false;
        };
        self.ctx.new_path();
        self.ctx.move_to(f64::from(x0), f64::from(y0));
        for (&x, &y) in points {
            self.ctx.line_to(f64::from(x), f64::from(y));
        }
        self.ctx.close_path();
        true
    }

    /// Builds a Pango layout for `text` in the current font, positioned so its
    /// baseline sits at `y + font_size / 2` and it is anchored per text-align.
    fn text_layout(&self, x: i32, y: i32, text: &str) -> pango::Layout {
        let layout = pangocairo::functions::create_layout(&self.ctx);
        let font = FontDescriptor::new(
            self.state.font_family.clone(),
            self.state.font_size,
            self.state.font_weight,
            self.state.font_style,
        );
        let font_desc = pango::FontDescription::from_string(&font.to_pango_string());
        layout.set_font_description(Some(&font_desc));

        let attrs = pango::AttrList::new();
        match self.state.font_style {
            FontStyle::Underline => {
                attrs.insert(pango::AttrInt::new_underline(pango::Underline::Single));
            }
            FontStyle::Strikethrough => attrs.insert(pango::AttrInt::new_strikethrough(true)),
            _ => {}
        }
        layout.set_attributes(Some(&attrs));
        layout.set_text(text);

        let (width, _height) = layout.pixel_size();
        let left = match self.state.text_align {
            TextAlign::Left => f64::from(x),
            TextAlign::Center => f64::from(x) - f64::from(width) / 2.0,
            TextAlign::Right => f64::from(x) - f64::from(width),
        };
        let baseline = f64::from(layout.baseline()) / f64::from(pango::SCALE);
        let top = f64::from(y) + f64::from(self.state.font_size / 2) - baseline;
        self.ctx.move_to(left, top);
        layout
    }
}

fn create_surface(
    width: i32,
    height: i32,
) -> Result<(cairo::ImageSurface, cairo::Context), BackendError> {
    let surface = cairo::ImageSurface::create(cairo::Format::ARgb32, width.max(1), height.max(1))
        .map_err(|e| BackendError::SurfaceCreation(e.to_string()))?;
    let ctx = cairo::Context::new(&surface)
        .map_err(|e| BackendError::SurfaceCreation(e.to_string()))?;
    Ok((surface, ctx))
}

/// Decodes encoded image bytes into a premultiplied ARGB32 surface.
fn decode_surface(data: &[u8]) -> Option<cairo::ImageSurface> {
    let image = match image::load_from_memory(data) {
        Ok(image) => image.to_rgba8(),
        Err(err) => {
            log::warn!("Could not decode image data: {}", err);
            return None;
        }
    };
    let (width, height) = image.dimensions();
    let stride = cairo::Format::ARgb32.stride_for_width(width).ok()?;
    let mut buffer = vec![0u8; stride as usize * height as usize];

    for (x, y, pixel) in image.enumerate_pixels() {
        let [r, g, b, a] = pixel.0;
        let premultiply = |c: u8| ((u16::from(c) * u16::from(a) + 127) / 255) as u32;
        let argb = (u32::from(a) << 24) | (premultiply(r) << 16) | (premultiply(g) << 8) | premultiply(b);
        let offset = y as usize * stride as usize + x as usize * 4;
        buffer[offset..offset + 4].copy_from_slice(&argb.to_ne_bytes());
    }

    cairo::ImageSurface::create_for_data(
        buffer,
        cairo::Format::ARgb32,
        width as i32,
        height as i32,
        stride,
    )
    .map_err(|err| log::warn!("Could not wrap decoded image: {}", err))
    .ok()
}

impl Painter for CairoPainter {
    fn clear(&mut self) {
        let bg = self.background;
        self.ctx.save().ok();
        self.ctx.set_operator(cairo::Operator::Source);
        self.ctx.set_source_rgba(bg.r, bg.g, bg.b, bg.a);
        let _ = self.ctx.paint();
        self.ctx.restore().ok();
    }

    fn save_state(&self) -> GraphicsState {
        self.state.clone()
    }

    fn restore_state(&mut self, state: &GraphicsState) {
        self.state.restore(state);
    }

    fn reset_state(&mut self) {
        self.state.reset();
    }

    fn set_fill(&mut self, color: &str) {
        self.state.fill_color = color.to_string();
    }

    fn set_stroke(&mut self, color: &str) {
        self.state.stroke_color = color.to_string();
    }

    fn set_line_width(&mut self, width: u32) {
        self.state.line_width = width;
    }

    fn set_text_align(&mut self, align: TextAlign) {
        self.state.text_align = align;
    }

    fn set_font_family(&mut self, family: &str) {
        self.state.font_family = family.to_string();
    }

    fn set_font_size(&mut self, size: i32) {
        self.state.font_size = size;
    }

    fn set_font_weight(&mut self, weight: FontWeight) {
        self.state.font_weight = weight;
    }

    fn set_font_style(&mut self, style: FontStyle) {
        self.state.font_style = style;
    }

    fn fill_rect(&mut self, x: i32, y: i32, width: i32, height: i32) {
        self.prepare_fill();
        self.ctx.rectangle(
            f64::from(x),
            f64::from(y),
            f64::from(width),
            f64::from(height),
        );
        let _ = self.ctx.fill();
    }

    fn fill_oval(&mut self, x: i32, y: i32, width: i32, height: i32) {
        if self.oval_path(x, y, width, height) {
            self.prepare_fill();
            let _ = self.ctx.fill();
        }
    }

    fn fill_polygon(&mut self, xs: &[i32], ys: &[i32]) {
        if self.polygon_path(xs, ys) {
            self.prepare_fill();
            let _ = self.ctx.fill();
        }
    }

    fn fill_text(&mut self, x: i32, y: i32, text: &str) {
        self.ctx.save().ok();
        let layout = self.text_layout(x, y, text);
        self.prepare_fill();
        pangocairo::functions::show_layout(&self.ctx, &layout);
        self.ctx.restore().ok();
    }

    fn stroke_rect(&mut self, x: i32, y: i32, width: i32, height: i32) {
        self.prepare_stroke();
        self.ctx.rectangle(
            f64::from(x),
            f64::from(y),
            f64::from(width),
            f64::from(height),
        );
        let _ = self.ctx.stroke();
    }

    fn stroke_oval(&mut self, x: i32, y: i32, width: i32, height: i32) {
        if self.oval_path(x, y, width, height) {
            self.prepare_stroke();
            let _ = self.ctx.stroke();
        }
    }

    fn stroke_polygon(&mut self, xs: &[i32], ys: &[i32]) {
        if self.polygon_path(xs, ys) {
            self.prepare_stroke();
            let _ = self.ctx.stroke();
        }
    }

    fn stroke_line(&mut self, x1: i32, y1: i32, x2: i32, y2: i32) {
        self.prepare_stroke();
        self.ctx.set_line_cap(cairo::LineCap::Butt);
        self.ctx.new_path();
        self.ctx.move_to(f64::from(x1), f64::from(y1));
        self.ctx.line_to(f64::from(x2), f64::from(y2));
        let _ = self.ctx.stroke();
    }

    fn stroke_text(&mut self, x: i32, y: i32, text: &str) {
        self.ctx.save().ok();
        let layout = self.text_layout(x, y, text);
        pangocairo::functions::layout_path(&self.ctx, &layout);
        self.prepare_stroke();
        self.ctx.set_line_join(cairo::LineJoin::Round);
        let _ = self.ctx.stroke();
        self.ctx.restore().ok();
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
        let Some(image) = self
            .images
            .entry(id)
            .or_insert_with(|| decode_surface(data))
            .as_ref()
        else {
            return;
        };

        let natural = (image.width(), image.height());
        if natural.0 == 0 || natural.1 == 0 {
            return;
        }
        let (width, height) = if width <= 0 || height <= 0 {
            natural
        } else {
            (width, height)
        };

        self.ctx.save().ok();
        self.ctx.translate(f64::from(x), f64::from(y));
        self.ctx.scale(
            f64::from(width) / f64::from(natural.0),
            f64::from(height) / f64::from(natural.1),
        );
        if self.ctx.set_source_surface(image, 0.0, 0.0).is_ok() {
            self.ctx.source().set_filter(cairo::Filter::Nearest);
            let _ = self.ctx.paint();
        }
        self.ctx.restore().ok();
    }

    fn purge_raster_image(&mut self, id: ElementId) {
        if self.images.remove(&id).is_some() {
            log::debug!("Purged cached image for {}", id);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clear_paints_background() {
        let mut painter = CairoPainter::new(4, 4).unwrap();
        assert_eq!(painter.pixel(0, 0), Some(0xFFFF_FFFF));
        painter.set_background(color::BLACK);
        painter.clear();
        assert_eq!(painter.pixel(3, 3), Some(0xFF00_0000));
        assert_eq!(painter.pixel(4, 0), None);
    }

    #[test]
    fn setters_are_mirrored_into_state() {
        let mut painter = CairoPainter::new(4, 4).unwrap();
        painter.set_fill("red");
        painter.set_font_size(20);
        painter.set_text_align(TextAlign::Right);
        let saved = painter.save_state();
        assert_eq!(saved.fill_color, "red");
        assert_eq!(saved.font_size, 20);

        painter.reset_state();
        assert_eq!(painter.save_state(), GraphicsState::default());
        painter.restore_state(&saved);
        assert_eq!(painter.save_state().text_align, TextAlign::Right);
    }

    #[test]
    fn zero_sized_ovals_are_skipped() {
        let mut painter = CairoPainter::new(4, 4).unwrap();
        painter.set_fill("red");
        painter.fill_oval(0, 0, 0, 4);
        assert_eq!(painter.pixel(0, 2), Some(0xFFFF_FFFF));
    }

    #[test]
    fn undecodable_image_is_cached_as_missing() {
        let mut painter = CairoPainter::new(4, 4).unwrap();
        let id = ElementId::next();
        painter.draw_raster_image(id, b"not an image", 0, 0, 4, 4);
        assert!(matches!(painter.images.get(&id), Some(None)));
        painter.purge_raster_image(id);
        assert!(painter.images.is_empty());
    }

    #[test]
    fn resize_keeps_state() {
        let mut painter = CairoPainter::new(10, 10).unwrap();
        painter.set_stroke("blue");
        painter.resize(20, 5).unwrap();
        assert_eq!(painter.size(), (20, 5));
        assert_eq!(painter.save_state().stroke_color, "blue");
    }
}
