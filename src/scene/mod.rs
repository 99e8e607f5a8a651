//! Scene graph: element model and the registry that orders it.

pub mod element;
pub mod registry;
pub mod shape;

pub use element::{Element, ElementId};
pub use registry::{Frame, Scene, SharedScene};
pub use shape::{
    Circle, Image, Line, Paint, Polygon, Positionable, Rectangle, Resizable, Shape, ShapeStyle,
    Text,
};
