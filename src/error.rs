//! Error types surfaced by the drawing API.

use crate::scene::ElementId;
use thiserror::Error;

/// Errors returned by [`crate::Canvas`] operations.
#[derive(Debug, Error)]
pub enum EaselError {
    #[error("Element {id} does not support {operation}")]
    InvalidElementType {
        id: ElementId,
        operation: &'static str,
    },

    #[error("Invalid polygon points: {0}")]
    InvalidPoints(String),

    #[error("Unknown backend '{0}'")]
    UnknownBackend(String),

    #[error("Unknown key name '{0}'")]
    UnknownKey(String),

    #[error("Style error: {0}")]
    Style(#[from] StyleError),

    #[error("Backend error: {0}")]
    Backend(#[from] BackendError),

    #[error("Could not build sprite: {0}")]
    Sprite(String),

    #[error("Drawing surface was closed")]
    Finished,
}

/// Errors raised while applying a text style.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum StyleError {
    #[error("'{0}' is not a valid font size")]
    NumberFormat(String),
}

/// Errors raised by a rendering backend.
#[derive(Debug, Error)]
pub enum BackendError {
    #[error("No suitable rendering backend is available")]
    NoBackendAvailable,

    #[error("Failed to create drawing surface: {0}")]
    SurfaceCreation(String),

    #[error("Failed to start render thread: {0}")]
    Thread(#[from] std::io::Error),

    #[error("Failed to write frame to {path}: {reason}")]
    Output { path: String, reason: String },
}
