//! Scene elements: an identified, show/hide-able shape.

use super::shape::Shape;
use crate::backend::Painter;
use crate::error::StyleError;
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

static NEXT_ID: AtomicU64 = AtomicU64::new(1);

/// Opaque element identifier.
///
/// Allocated from a process-wide counter, so an id is never handed out twice,
/// not even after its element has been removed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ElementId(u64);

impl ElementId {
    pub fn next() -> Self {
        Self(NEXT_ID.fetch_add(1, Ordering::Relaxed))
    }
}

impl fmt::Display for ElementId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A shape placed in the scene.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Element {
    id: ElementId,
    visible: bool,
    pub shape: Shape,
}

impl Element {
    /// Wraps `shape` with a fresh id; new elements are visible.
    pub fn new(shape: impl Into<Shape>) -> Self {
        Self {
            id: ElementId::next(),
            visible: true,
            shape: shape.into(),
        }
    }

    pub fn id(&self) -> ElementId {
        self.id
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn show(&mut self) {
        self.visible = true;
    }

    pub fn hide(&mut self) {
        self.visible = false;
    }

    pub fn toggle(&mut self) {
        self.visible = !self.visible;
    }

    /// Draws the element from a clean painter state; hidden elements draw nothing.
    ///
    /// # Errors
    /// Returns [`StyleError`] when a text element carries an unparseable font size.
    pub fn draw(&self, painter: &mut dyn Painter) -> Result<(), StyleError> {
        if !self.visible {
            return Ok(());
        }
        painter.reset_state();
        self.shape.draw(painter, self.id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::testing::{Call, RecordingPainter};
    use crate::scene::shape::{Circle, Image, Line, Rectangle, ShapeStyle, Text};
    use crate::style::{self, TextAlign};

    fn rectangle(style: ShapeStyle) -> Element {
        Element::new(Rectangle {
            x: 10,
            y: 10,
            width: 20,
            height: 20,
            paint: style.resolve(0),
        })
    }

    #[test]
    fn ids_are_unique() {
        let a = Element::new(Image::new(None, 0, 0, 0, 0));
        let b = Element::new(Image::new(None, 0, 0, 0, 0));
        assert_ne!(a.id(), b.id());
    }

    #[test]
    fn rectangle_without_outline_only_fills() {
        let mut painter = RecordingPainter::default();
        rectangle(ShapeStyle::new()).draw(&mut painter).unwrap();
        assert_eq!(
            painter.calls,
            vec![
                Call::ResetState,
                Call::SetFill("black".into()),
                Call::FillRect(10, 10, 20, 20),
            ]
        );
    }

    #[test]
    fn rectangle_with_outline_strokes_after_fill() {
        let mut painter = RecordingPainter::default();
        rectangle(ShapeStyle::new().fill("red").stroke("blue").stroke_width(2))
            .draw(&mut painter)
            .unwrap();
        assert_eq!(
            painter.drawing_calls(),
            vec![
                Call::SetFill("red".into()),
                Call::FillRect(10, 10, 20, 20),
                Call::SetStroke("blue".into()),
                Call::SetLineWidth(2),
                Call::StrokeRect(10, 10, 20, 20),
            ]
        );
    }

    #[test]
    fn hidden_element_draws_nothing() {
        let mut painter = RecordingPainter::default();
        let mut element = rectangle(ShapeStyle::new());
        element.hide();
        element.draw(&mut painter).unwrap();
        assert!(painter.calls.is_empty());

        element.toggle();
        assert!(element.is_visible());
    }

    #[test]
    fn circle_draws_its_bounding_box() {
        let mut painter = RecordingPainter::default();
        Element::new(Circle {
            x: 100,
            y: 100,
            radius: 25,
            paint: ShapeStyle::new().stroke_width(1).resolve(0),
        })
        .draw(&mut painter)
        .unwrap();
        assert!(painter.calls.contains(&Call::FillOval(75, 75, 50, 50)));
        assert!(painter.calls.contains(&Call::StrokeOval(75, 75, 50, 50)));
    }

    #[test]
    fn line_always_strokes() {
        let mut painter = RecordingPainter::default();
        Element::new(Line {
            x1: 0,
            y1: 0,
            x2: 10,
            y2: 20,
            stroke: "green".into(),
            width: 1,
        })
        .draw(&mut painter)
        .unwrap();
        assert_eq!(
            painter.drawing_calls(),
            vec![
                Call::SetStroke("green".into()),
                Call::SetLineWidth(1),
                Call::StrokeLine(0, 0, 10, 20),
            ]
        );
    }

    #[test]
    fn text_applies_style_before_drawing() {
        let mut painter = RecordingPainter::default();
        Element::new(Text {
            x: 5,
            y: 6,
            text: "hi".into(),
            style: style::parse(Some("color: red; text-align: center")),
        })
        .draw(&mut painter)
        .unwrap();
        assert_eq!(
            painter.drawing_calls(),
            vec![
                Call::SetFill("red".into()),
                Call::SetTextAlign(TextAlign::Center),
                Call::FillText(5, 6, "hi".into()),
            ]
        );
    }

    #[test]
    fn text_with_bad_font_size_fails_without_drawing() {
        let mut painter = RecordingPainter::default();
        let result = Element::new(Text {
            x: 0,
            y: 0,
            text: "hi".into(),
            style: style::parse(Some("font-size: 2rem")),
        })
        .draw(&mut painter);
        assert_eq!(result, Err(StyleError::NumberFormat("2rem".into())));
        assert!(!painter.calls.iter().any(|c| matches!(c, Call::FillText(..))));
    }

    #[test]
    fn invalidated_image_purges_before_drawing() {
        let mut painter = RecordingPainter::default();
        let mut image = Image::new(Some(vec![0; 4]), 1, 2, 3, 4);
        image.set_data(Some(vec![0; 8]));
        let element = Element::new(image);
        element.draw(&mut painter).unwrap();
        let id = element.id();
        assert_eq!(
            painter.drawing_calls(),
            vec![Call::PurgeImage(id), Call::DrawImage(id, 8, 1, 2, 3, 4)]
        );
    }

    #[test]
    fn image_without_data_draws_nothing() {
        let mut painter = RecordingPainter::default();
        Element::new(Image::new(None, 0, 0, 10, 10))
            .draw(&mut painter)
            .unwrap();
        assert!(painter.drawing_calls().is_empty());
    }
}
