//! Pressed-key bookkeeping shared between a backend's event source and pollers.

use super::Key;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

/// Thread-safe set of currently held keys, kept in press order.
///
/// Cloning yields another handle to the same set, so a host event loop can
/// press and release keys while the caller thread polls.
#[derive(Debug, Clone, Default)]
pub struct KeyboardState {
    pressed: Arc<Mutex<Vec<Key>>>,
}

impl KeyboardState {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, Vec<Key>> {
        self.pressed.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Records a key press. Repeated presses of a held key are ignored.
    pub fn press(&self, key: Key) {
        let mut pressed = self.lock();
        if !pressed.contains(&key) {
            pressed.push(key);
        }
    }

    /// Records a key release.
    pub fn release(&self, key: Key) {
        self.lock().retain(|k| *k != key);
    }

    /// Releases every key, e.g. when the surface loses focus.
    pub fn release_all(&self) {
        self.lock().clear();
    }

    pub fn is_pressed(&self, key: Key) -> bool {
        self.lock().contains(&key)
    }

    /// Snapshot of held keys in the order they were pressed.
    pub fn pressed(&self) -> Vec<Key> {
        self.lock().clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn press_order_is_preserved_without_duplicates() {
        let keyboard = KeyboardState::new();
        keyboard.press(Key::Up);
        keyboard.press(Key::Left);
        keyboard.press(Key::Up);
        assert_eq!(keyboard.pressed(), vec![Key::Up, Key::Left]);
    }

    #[test]
    fn clones_share_state() {
        let keyboard = KeyboardState::new();
        let host = keyboard.clone();
        host.press(Key::Space);
        assert!(keyboard.is_pressed(Key::Space));
        host.release(Key::Space);
        assert!(!keyboard.is_pressed(Key::Space));
    }
}
