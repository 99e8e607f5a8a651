//! Public drawing API.
//!
//! A [`Canvas`] bundles the scene registry, the frame-sync engine and an
//! image loader. Every drawing or update call follows the same sequence:
//! start the backend on first use, mutate the registry, then yield to the
//! engine, which pauses the caller until the next tick. A call that fails
//! returns before yielding and leaves the registry as it was.


use crate::backend::{self, Backend};
use crate::config::Config;
use crate::engine::{Engine, EngineOptions, EngineState};
use crate::error::EaselError;
use crate::input::Key;
use crate::loader::{self, ImageLoader, WebImageLoader};
use crate::scene::{
    Circle, Element, ElementId, Image, Line, Polygon, Rectangle, Scene, Shape, ShapeStyle,
    SharedScene, Text, registry,
};
use crate::style;
use crate::util;
use std::sync::Arc;
use std::thread;
use std::time::Duration;

/// Playing cards are this much taller than they are wide.
const CARD_ASPECT: f64 = 1.45;

/// Drawing context: a scene, the backend that shows it and the pacing
/// between the caller and the redraw.
pub struct Canvas {
    scene: SharedScene,
    engine: Engine,
    loader: Box<dyn ImageLoader>,
    card_base_url: String,
}

impl Canvas {
    /// Creates a canvas from the user's config file, or defaults if it
    /// cannot be loaded.
    ///
    /// # Errors
    /// Returns [`EaselError::UnknownBackend`] if the configured backend name
    /// is not compiled in.
    pub fn new() -> Result<Self, EaselError> {
        let config = Config::load().unwrap_or_else(|err| {
            log::warn!("Failed to load config, using defaults: {:#}", err);
            Config::default()
        });
        Self::with_config(config)
    }

    /// Creates a canvas using the backend named in `config`.
    ///
    /// # Errors
    /// Returns [`EaselError::UnknownBackend`] for an unknown backend name.
    pub fn with_config(config: Config) -> Result<Self, EaselError> {
        let backend = backend::select(&config.canvas.backend, &config)?;
        Ok(Self::with_backend(backend, &config))
    }

    /// Creates a canvas around an already constructed backend.
    pub fn with_backend(backend: Box<dyn Backend>, config: &Config) -> Self {
        let scene = Scene::shared();
        let engine = Engine::new(backend, Arc::clone(&scene), EngineOptions::from(config));
        Self {
            scene,
            engine,
            loader: Box::new(WebImageLoader::new(&config.images)),
            card_base_url: config.images.card_base_url.clone(),
        }
    }

    /// Replaces the image loader used by sprite and card calls.
    pub fn with_loader(mut self, loader: impl ImageLoader + 'static) -> Self {
        self.loader = Box::new(loader);
        self
    }

    /// Shared handle to the scene registry.
    pub fn scene(&self) -> &SharedScene {
        &self.scene
    }

    pub fn state(&self) -> EngineState {
        self.engine.state()
    }

    pub fn backend(&self) -> &dyn Backend {
        self.engine.backend()
    }

    // ------------------------------------------------------------------
    // Drawing
    // ------------------------------------------------------------------

    /// Draws a rectangle with its top-left corner at `(x, y)`.
    pub fn draw_rectangle(
        &mut self,
        x: i32,
        y: i32,
        width: i32,
        height: i32,
        style: ShapeStyle,
    ) -> Result<ElementId, EaselError> {
        self.add(Rectangle {
            x,
            y,
            width,
            height,
            paint: style.resolve(0),
        })
    }

    /// Draws a circle centred on `(x, y)`.
    pub fn draw_circle(
        &mut self,
        x: i32,
        y: i32,
        radius: i32,
        style: ShapeStyle,
    ) -> Result<ElementId, EaselError> {
        self.add(Circle {
            x,
            y,
            radius,
            paint: style.resolve(0),
        })
    }

    /// Draws a line. Only the stroke colour and width of `style` apply; the
    /// width defaults to 1.
    pub fn draw_line(
        &mut self,
        x1: i32,
        y1: i32,
        x2: i32,
        y2: i32,
        style: ShapeStyle,
    ) -> Result<ElementId, EaselError> {
        let paint = style.resolve(1);
        self.add(Line {
            x1,
            y1,
            x2,
            y2,
            stroke: paint.stroke,
            width: paint.stroke_width,
        })
    }

    /// Draws a polygon from a point list such as `"10,50 30,90 50,50"`.
    ///
    /// # Errors
    /// Returns [`EaselError::InvalidPoints`] for a malformed point list.
    pub fn draw_polygon(&mut self, points: &str, style: ShapeStyle) -> Result<ElementId, EaselError> {
        self.engine.ensure_started()?;
        let points = util::parse_points(points)?;
        self.draw_polygon_points(&points, style)
    }

    /// Draws a polygon through `points`.
    pub fn draw_polygon_points(
        &mut self,
        points: &[(i32, i32)],
        style: ShapeStyle,
    ) -> Result<ElementId, EaselError> {
        self.add(Polygon::from_points(points, style.resolve(0)))
    }

    /// Draws `text` with an optional style string such as
    /// `"color: red; font-size: 24px"`.
    pub fn draw_text(
        &mut self,
        x: i32,
        y: i32,
        text: &str,
        style: Option<&str>,
    ) -> Result<ElementId, EaselError> {
        self.add(Text {
            x,
            y,
            text: text.to_string(),
            style: style::parse(style),
        })
    }

    /// Draws an image fetched from `url`. SVG sources are rasterized at the
    /// requested size; non-positive sizes draw the image at natural size.
    ///
    /// An image that cannot be fetched or decoded still gets an element,
    /// which draws nothing.
    pub fn draw_web_sprite(
        &mut self,
        x: i32,
        y: i32,
        url: &str,
        width: i32,
        height: i32,
    ) -> Result<ElementId, EaselError> {
        self.engine.ensure_started()?;
        let data = self.loader.load(url, width, height);
        self.add(Image::new(data, x, y, width, height))
    }

    /// Draws a sprite built from rows of CSS colour strings, scaled to
    /// `width` x `height`.
    ///
    /// # Errors
    /// Returns [`EaselError::Sprite`] when the grid is empty.
    pub fn draw_sprite<R, S>(
        &mut self,
        x: i32,
        y: i32,
        rows: &[R],
        width: i32,
        height: i32,
    ) -> Result<ElementId, EaselError>
    where
        R: AsRef<[S]>,
        S: AsRef<str>,
    {
        self.engine.ensure_started()?;
        let png = loader::sprite_to_png(rows)?;
        self.add(Image::new(Some(png), x, y, width, height))
    }

    /// Draws a playing card, e.g. `("ace", "spades")` or `("10", "hearts")`.
    /// The height follows from the width.
    pub fn draw_playing_card(
        &mut self,
        card: &str,
        suit: &str,
        x: i32,
        y: i32,
        width: i32,
    ) -> Result<ElementId, EaselError> {
        let url = card_url(&self.card_base_url, card, suit);
        let height = card_height(width);
        self.draw_web_sprite(x, y, &url, width, height)
    }

    // ------------------------------------------------------------------
    // Updates
    // ------------------------------------------------------------------

    /// Replaces the content of a text element.
    pub fn update_text(&mut self, id: ElementId, text: &str) -> Result<(), EaselError> {
        self.update(id, "text updates", |shape| match shape {
            Shape::Text(t) => {
                t.text = text.to_string();
                true
            }
            _ => false,
        })
    }

    /// Replaces the style of a text element.
    pub fn update_text_style(&mut self, id: ElementId, style: &str) -> Result<(), EaselError> {
        let style = style::parse(Some(style));
        self.update(id, "text style updates", move |shape| match shape {
            Shape::Text(t) => {
                t.style = style;
                true
            }
            _ => false,
        })
    }

    /// Reloads an image element from `url` at its current size.
    pub fn update_image_source(&mut self, id: ElementId, url: &str) -> Result<(), EaselError> {
        const OPERATION: &str = "image source updates";
        self.engine.ensure_started()?;
        let size = match registry::lock(&self.scene).find(id).map(|e| &e.shape) {
            Some(Shape::Image(image)) => (image.width, image.height),
            _ => return Err(EaselError::InvalidElementType { id, operation: OPERATION }),
        };
        let data = self.loader.load(url, size.0, size.1);
        self.update(id, OPERATION, move |shape| match shape {
            Shape::Image(image) => {
                image.set_data(data);
                true
            }
            _ => false,
        })
    }

    /// Moves an element's origin to `(x, y)`.
    pub fn update_position(&mut self, id: ElementId, x: i32, y: i32) -> Result<(), EaselError> {
        self.reposition(id, Some(x), Some(y))
    }

    /// Moves an element horizontally, keeping its y coordinate.
    pub fn update_position_x(&mut self, id: ElementId, x: i32) -> Result<(), EaselError> {
        self.reposition(id, Some(x), None)
    }

    /// Moves an element vertically, keeping its x coordinate.
    pub fn update_position_y(&mut self, id: ElementId, y: i32) -> Result<(), EaselError> {
        self.reposition(id, None, Some(y))
    }

    fn reposition(&mut self, id: ElementId, x: Option<i32>, y: Option<i32>) -> Result<(), EaselError> {
        self.update(id, "repositioning", |shape| {
            let Some(origin) = shape.as_positionable_mut() else {
                return false;
            };
            if let Some(x) = x {
                origin.set_x(x);
            }
            if let Some(y) = y {
                origin.set_y(y);
            }
            true
        })
    }

    /// Resizes a rectangle or image. On a circle `width` becomes the radius
    /// and `height` is ignored.
    pub fn resize(&mut self, id: ElementId, width: i32, height: i32) -> Result<(), EaselError> {
        self.resize_with(id, width, Some(height))
    }

    /// Changes only the width of a rectangle or image, or a circle's radius.
    pub fn resize_width(&mut self, id: ElementId, width: i32) -> Result<(), EaselError> {
        self.resize_with(id, width, None)
    }

    fn resize_with(&mut self, id: ElementId, width: i32, height: Option<i32>) -> Result<(), EaselError> {
        self.update(id, "resizing", |shape| {
            if let Shape::Circle(circle) = shape {
                circle.radius = width;
                return true;
            }
            let Some(bounds) = shape.as_resizable_mut() else {
                return false;
            };
            bounds.set_width(width);
            if let Some(height) = height {
                bounds.set_height(height);
            }
            true
        })
    }

    // ------------------------------------------------------------------
    // Visibility and removal
    // ------------------------------------------------------------------

    /// Removes an element for good. Unknown ids are ignored.
    pub fn remove(&mut self, id: ElementId) -> Result<(), EaselError> {
        self.mutate(|scene| {
            scene.remove(id);
            Ok(())
        })
    }

    /// Makes a hidden element visible. Unknown ids are ignored.
    pub fn show(&mut self, id: ElementId) -> Result<(), EaselError> {
        self.set_visibility(id, Element::show)
    }

    /// Hides an element without removing it. Unknown ids are ignored.
    pub fn hide(&mut self, id: ElementId) -> Result<(), EaselError> {
        self.set_visibility(id, Element::hide)
    }

    /// Flips an element's visibility. Unknown ids are ignored.
    pub fn toggle(&mut self, id: ElementId) -> Result<(), EaselError> {
        self.set_visibility(id, Element::toggle)
    }

    /// Removes every element.
    pub fn wipe(&mut self) -> Result<(), EaselError> {
        self.mutate(|scene| {
            scene.clear();
            Ok(())
        })
    }

    fn set_visibility(&mut self, id: ElementId, change: fn(&mut Element)) -> Result<(), EaselError> {
        self.mutate(|scene| {
            if let Some(element) = scene.find_mut(id) {
                change(element);
            }
            Ok(())
        })
    }

    // ------------------------------------------------------------------
    // Utilities
    // ------------------------------------------------------------------

    /// Pauses the caller for `millis` milliseconds.
    pub fn sleep(&self, millis: u64) {
        thread::sleep(Duration::from_millis(millis));
    }

    /// Returns whether the named key (`"up"`, `"space"`, `"a"`, ...) is held.
    ///
    /// # Errors
    /// Returns [`EaselError::UnknownKey`] for names that are not keys.
    pub fn is_key_pressed(&self, name: &str) -> Result<bool, EaselError> {
        let key: Key = name
            .parse()
            .map_err(|_| EaselError::UnknownKey(name.to_string()))?;
        Ok(self.engine.backend().is_key_pressed(key))
    }

    /// Held keys as lowercase names separated by spaces, in press order.
    pub fn which_keys_pressed(&self) -> String {
        self.engine
            .backend()
            .pressed_keys()
            .into_iter()
            .map(Key::name)
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// Reshapes the canvas to `width:height`; the longer side stays 1000
    /// units.
    pub fn set_aspect_ratio(&mut self, width: u32, height: u32) -> Result<(), EaselError> {
        self.engine.ensure_started()?;
        self.engine.backend_mut().set_aspect_ratio(width, height);
        self.engine.yield_now()
    }

    /// Stops the redraw and releases the backend. Further drawing calls
    /// start it again.
    pub fn shutdown(&mut self) {
        self.engine.shutdown();
    }

    // ------------------------------------------------------------------
    // Call sequencing
    // ------------------------------------------------------------------

    fn add(&mut self, shape: impl Into<Shape>) -> Result<ElementId, EaselError> {
        let element = Element::new(shape);
        self.mutate(move |scene| Ok(scene.add(element)))
    }

    /// Applies `apply` to element `id`, failing when the element is missing
    /// or `apply` reports the shape does not support `operation`.
    fn update<F>(&mut self, id: ElementId, operation: &'static str, apply: F) -> Result<(), EaselError>
    where
        F: FnOnce(&mut Shape) -> bool,
    {
        self.mutate(|scene| {
            let supported = scene
                .find_mut(id)
                .is_some_and(|element| apply(&mut element.shape));
            if supported {
                Ok(())
            } else {
                Err(EaselError::InvalidElementType { id, operation })
            }
        })
    }

    fn mutate<T, F>(&mut self, change: F) -> Result<T, EaselError>
    where
        F: FnOnce(&mut Scene) -> Result<T, EaselError>,
    {
        self.engine.ensure_started()?;
        let value = {
            let mut scene = registry::lock(&self.scene);
            change(&mut scene)?
        };
        self.engine.yield_now()?;
        Ok(value)
    }
}

fn card_url(base: &str, card: &str, suit: &str) -> String {
    format!("{base}{card}_of_{suit}.svg")
}

fn card_height(width: i32) -> i32 {
    (f64::from(width) * CARD_ASPECT).floor() as i32
}
