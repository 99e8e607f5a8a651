//! Keyboard input polling.
//!
//! Backends translate native key events into [`Key`] values and record them
//! in a [`KeyboardState`]; scripts poll that state by key name.

pub mod events;
pub mod keyboard;

// Re-export commonly used types at module level
pub use events::Key;
pub use keyboard::KeyboardState;
