//! Drawable shape variants and their capability traits.

use crate::backend::Painter;
use crate::error::StyleError;
use crate::style::{Style, apply_style};
use std::sync::Arc;

/// Color used when a shape is created without an explicit fill or stroke.
pub const DEFAULT_PAINT_COLOR: &str = "black";

/// Shapes that carry a movable `(x, y)` origin.
pub trait Positionable {
    fn x(&self) -> i32;
    fn y(&self) -> i32;
    fn set_x(&mut self, x: i32);
    fn set_y(&mut self, y: i32);
}

/// Shapes that carry a width and height on top of their origin.
pub trait Resizable: Positionable {
    fn width(&self) -> i32;
    fn height(&self) -> i32;
    fn set_width(&mut self, width: i32);
    fn set_height(&mut self, height: i32);
}

/// Optional fill/stroke settings supplied by the caller.
///
/// Unset fields fall back to black fill, black stroke and no outline.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ShapeStyle {
    pub fill: Option<String>,
    pub stroke: Option<String>,
    pub stroke_width: Option<u32>,
}

impl ShapeStyle {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn fill(mut self, color: impl Into<String>) -> Self {
        self.fill = Some(color.into());
        self
    }

    pub fn stroke(mut self, color: impl Into<String>) -> Self {
        self.stroke = Some(color.into());
        self
    }

    pub fn stroke_width(mut self, width: u32) -> Self {
        self.stroke_width = Some(width);
        self
    }

    /// Fills in defaults; `default_width` applies when no stroke width was given.
    pub fn resolve(&self, default_width: u32) -> Paint {
        Paint {
            fill: self
                .fill
                .clone()
                .unwrap_or_else(|| DEFAULT_PAINT_COLOR.to_string()),
            stroke: self
                .stroke
                .clone()
                .unwrap_or_else(|| DEFAULT_PAINT_COLOR.to_string()),
            stroke_width: self.stroke_width.unwrap_or(default_width),
        }
    }
}

/// Resolved fill/stroke settings stored on a shape.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Paint {
    pub fill: String,
    pub stroke: String,
    pub stroke_width: u32,
}

impl Default for Paint {
    fn default() -> Self {
        ShapeStyle::default().resolve(0)
    }
}

impl Paint {
    /// Sets the outline style when the outline is visible.
    fn begin_stroke(&self, painter: &mut dyn Painter) -> bool {
        if self.stroke_width == 0 {
            return false;
        }
        painter.set_stroke(&self.stroke);
        painter.set_line_width(self.stroke_width);
        true
    }
}

/// Axis-aligned rectangle anchored at its top-left corner.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rectangle {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
    pub paint: Paint,
}

impl Rectangle {
    fn draw(&self, painter: &mut dyn Painter) {
        painter.set_fill(&self.paint.fill);
        painter.fill_rect(self.x, self.y, self.width, self.height);
        if self.paint.begin_stroke(painter) {
            painter.stroke_rect(self.x, self.y, self.width, self.height);
        }
    }
}

/// Circle anchored at its center.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Circle {
    pub x: i32,
    pub y: i32,
    pub radius: i32,
    pub paint: Paint,
}

impl Circle {
    /// Bounding box as `(x, y, width, height)`, saturating at the `i32` range.
    pub fn bounds(&self) -> (i32, i32, i32, i32) {
        let diameter = self.radius.saturating_mul(2);
        (
            self.x.saturating_sub(self.radius),
            self.y.saturating_sub(self.radius),
            diameter,
            diameter,
        )
    }

    fn draw(&self, painter: &mut dyn Painter) {
        let (x, y, w, h) = self.bounds();
        painter.set_fill(&self.paint.fill);
        painter.fill_oval(x, y, w, h);
        if self.paint.begin_stroke(painter) {
            painter.stroke_oval(x, y, w, h);
        }
    }
}

/// Straight segment; its origin is the first endpoint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Line {
    pub x1: i32,
    pub y1: i32,
    pub x2: i32,
    pub y2: i32,
    pub stroke: String,
    pub width: u32,
}

impl Line {
    fn draw(&self, painter: &mut dyn Painter) {
        painter.set_stroke(&self.stroke);
        painter.set_line_width(self.width);
        painter.stroke_line(self.x1, self.y1, self.x2, self.y2);
    }
}

/// Closed polygon with parallel coordinate lists of equal length.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Polygon {
    pub xs: Vec<i32>,
    pub ys: Vec<i32>,
    pub paint: Paint,
}

impl Polygon {
    pub fn from_points(points: &[(i32, i32)], paint: Paint) -> Self {
        let (xs, ys) = points.iter().copied().unzip();
        Self { xs, ys, paint }
    }

    fn draw(&self, painter: &mut dyn Painter) {
        painter.set_fill(&self.paint.fill);
        painter.fill_polygon(&self.xs, &self.ys);
        if self.paint.begin_stroke(painter) {
            painter.stroke_polygon(&self.xs, &self.ys);
        }
    }
}

/// Text run styled by a parsed [`Style`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Text {
    pub x: i32,
    pub y: i32,
    pub text: String,
    pub style: Style,
}

impl Text {
    fn draw(&self, painter: &mut dyn Painter) -> Result<(), StyleError> {
        apply_style(painter, &self.style)?;
        painter.fill_text(self.x, self.y, &self.text);
        Ok(())
    }
}

/// Encoded raster image.
///
/// `data` is `None` when loading failed; such an image draws nothing.
/// `invalidated` is raised whenever the data is replaced so the painter's
/// cached decode is purged before the next draw.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Image {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
    pub data: Option<Arc<[u8]>>,
    pub invalidated: bool,
}

impl Image {
    pub fn new(data: Option<Vec<u8>>, x: i32, y: i32, width: i32, height: i32) -> Self {
        Self {
            x,
            y,
            width,
            height,
            data: data.map(Arc::from),
            invalidated: false,
        }
    }

    /// Replaces the encoded bytes and marks the cached decode stale.
    pub fn set_data(&mut self, data: Option<Vec<u8>>) {
        self.data = data.map(Arc::from);
        self.invalidated = true;
    }

    fn draw(&self, painter: &mut dyn Painter, id: super::ElementId) {
        if self.invalidated {
            painter.purge_raster_image(id);
        }
        if let Some(data) = &self.data {
            painter.draw_raster_image(id, data, self.x, self.y, self.width, self.height);
        }
    }
}

macro_rules! positionable {
    ($ty:ty, $x:ident, $y:ident) => {
        impl Positionable for $ty {
            fn x(&self) -> i32 {
                self.$x
            }
            fn y(&self) -> i32 {
                self.$y
            }
            fn set_x(&mut self, x: i32) {
                self.$x = x;
            }
            fn set_y(&mut self, y: i32) {
                self.$y = y;
            }
        }
    };
}

macro_rules! resizable {
    ($ty:ty) => {
        impl Resizable for $ty {
            fn width(&self) -> i32 {
                self.width
            }
            fn height(&self) -> i32 {
                self.height
            }
            fn set_width(&mut self, width: i32) {
                self.width = width;
            }
            fn set_height(&mut self, height: i32) {
                self.height = height;
            }
        }
    };
}

positionable!(Rectangle, x, y);
positionable!(Circle, x, y);
positionable!(Line, x1, y1);
positionable!(Text, x, y);
positionable!(Image, x, y);
resizable!(Rectangle);
resizable!(Image);

/// Closed set of drawable shapes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Shape {
    Rectangle(Rectangle),
    Circle(Circle),
    Line(Line),
    Polygon(Polygon),
    Text(Text),
    Image(Image),
}

impl Shape {
    /// Lowercase variant name for diagnostics.
    pub fn kind(&self) -> &'static str {
        match self {
            Shape::Rectangle(_) => "rectangle",
            Shape::Circle(_) => "circle",
            Shape::Line(_) => "line",
            Shape::Polygon(_) => "polygon",
            Shape::Text(_) => "text",
            Shape::Image(_) => "image",
        }
    }

    pub fn as_positionable_mut(&mut self) -> Option<&mut dyn Positionable> {
        match self {
            Shape::Rectangle(s) => Some(s),
            Shape::Circle(s) => Some(s),
            Shape::Line(s) => Some(s),
            Shape::Text(s) => Some(s),
            Shape::Image(s) => Some(s),
            Shape::Polygon(_) => None,
        }
    }

    pub fn as_resizable_mut(&mut self) -> Option<&mut dyn Resizable> {
        match self {
            Shape::Rectangle(s) => Some(s),
            Shape::Image(s) => Some(s),
            _ => None,
        }
    }

    /// Runs the variant's drawing sequence against an already reset painter.
    pub(crate) fn draw(
        &self,
        painter: &mut dyn Painter,
        id: super::ElementId,
    ) -> Result<(), StyleError> {
        match self {
            Shape::Rectangle(s) => s.draw(painter),
            Shape::Circle(s) => s.draw(painter),
            Shape::Line(s) => s.draw(painter),
            Shape::Polygon(s) => s.draw(painter),
            Shape::Text(s) => s.draw(painter)?,
            Shape::Image(s) => s.draw(painter, id),
        }
        Ok(())
    }
}

macro_rules! from_variant {
    ($($ty:ident),*) => {
        $(impl From<$ty> for Shape {
            fn from(shape: $ty) -> Self {
                Shape::$ty(shape)
            }
        })*
    };
}

from_variant!(Rectangle, Circle, Line, Polygon, Text, Image);
