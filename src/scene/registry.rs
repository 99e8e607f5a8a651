//! Ordered, id-addressable collection of scene elements.
//!
//! The registry is shared between the caller's thread, which mutates it, and
//! the backend's render thread, which draws it. The render thread never
//! iterates the live collection: it takes a [`Frame`] snapshot under the lock
//! and draws that after the lock is released.

use super::element::{Element, ElementId};
use super::shape::Shape;
use crate::backend::Painter;
use std::sync::{Arc, Mutex, MutexGuard};

/// Registry handle shared with the render thread.
pub type SharedScene = Arc<Mutex<Scene>>;

/// Locks a shared scene, recovering the data if a previous holder panicked.
pub fn lock(scene: &SharedScene) -> MutexGuard<'_, Scene> {
    scene.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

/// Elements in draw order plus the image cache entries awaiting purge.
#[derive(Debug, Default)]
pub struct Scene {
    elements: Vec<Element>,
    pending_purges: Vec<ElementId>,
}

impl Scene {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn shared() -> SharedScene {
        Arc::new(Mutex::new(Self::new()))
    }

    /// Appends `element` on top of everything drawn so far.
    pub fn add(&mut self, element: Element) -> ElementId {
        let id = element.id();
        log::debug!("Adding {} {}", element.shape.kind(), id);
        self.elements.push(element);
        id
    }

    pub fn find(&self, id: ElementId) -> Option<&Element> {
        self.elements.iter().find(|element| element.id() == id)
    }

    pub fn find_mut(&mut self, id: ElementId) -> Option<&mut Element> {
        self.elements.iter_mut().find(|element| element.id() == id)
    }

    /// Removes the element with `id`; absent ids are ignored.
    pub fn remove(&mut self, id: ElementId) -> Option<Element> {
        let index = self.elements.iter().position(|element| element.id() == id)?;
        let element = self.elements.remove(index);
        log::debug!("Removed {} {}", element.shape.kind(), id);
        self.queue_purge(&element);
        Some(element)
    }

    /// Removes every element.
    pub fn clear(&mut self) {
        let elements = std::mem::take(&mut self.elements);
        log::debug!("Wiping {} elements", elements.len());
        for element in &elements {
            self.queue_purge(element);
        }
    }

    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    /// Elements in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &Element> {
        self.elements.iter()
    }

    /// Copies the scene for one redraw.
    ///
    /// Queued purges and invalidated images, hidden ones included, move into
    /// the frame's purge list, so each stale cache entry is purged exactly once.
    pub fn snapshot(&mut self) -> Frame {
        let mut purges = std::mem::take(&mut self.pending_purges);
        for element in &mut self.elements {
            let id = element.id();
            if let Shape::Image(image) = &mut element.shape {
                if image.invalidated {
                    purges.push(id);
                    image.invalidated = false;
                }
            }
        }
        Frame {
            elements: self.elements.clone(),
            purges,
        }
    }

    fn queue_purge(&mut self, element: &Element) {
        if matches!(element.shape, Shape::Image(_)) {
            self.pending_purges.push(element.id());
        }
    }
}

/// A consistent copy of the scene, drawn without holding the registry lock.
#[derive(Debug, Default)]
pub struct Frame {
    pub elements: Vec<Element>,
    pub purges: Vec<ElementId>,
}

impl Frame {
    /// Clears the surface and repaints every element in draw order.
    ///
    /// An element that fails to draw is logged and skipped for this frame.
    pub fn paint(&self, painter: &mut dyn Painter) {
        painter.clear();
        for id in &self.purges {
            painter.purge_raster_image(*id);
        }
        for element in &self.elements {
            if let Err(err) = element.draw(painter) {
                log::warn!("Skipping {} in this frame: {}", element.id(), err);
            }
        }
    }
}
