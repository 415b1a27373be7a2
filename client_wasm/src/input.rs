//! Keyboard input handling

use std::collections::HashSet;

use game_core::Controls;
use web_sys::KeyboardEvent;

/// Keys currently held, fed by keydown/keyup listeners
#[derive(Debug, Clone, Default)]
pub struct KeyState {
    held: HashSet<String>,
}

impl KeyState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Handle key down event
    pub fn key_down(&mut self, key: &str) {
        self.held.insert(key.to_lowercase());
    }

    /// Handle key up event
    pub fn key_up(&mut self, key: &str) {
        self.held.remove(&key.to_lowercase());
    }

    /// Drop everything, e.g. when the page loses focus
    pub fn clear(&mut self) {
        self.held.clear();
    }

    pub fn is_held(&self, key: &str) -> bool {
        self.held.contains(&key.to_lowercase())
    }

    fn any_held(&self, keys: &[&str]) -> bool {
        keys.iter().any(|key| self.is_held(key))
    }

    /// Sample the held keys as rider controls for this frame
    pub fn snapshot(&self) -> Controls {
        Controls {
            accelerate: self.any_held(&["w", "arrowup"]),
            reverse: self.any_held(&["s", "arrowdown"]),
            brake: self.is_held(" "),
            turn_left: self.any_held(&["a", "arrowleft"]),
            turn_right: self.any_held(&["d", "arrowright"]),
        }
    }
}

/// Extract key from keyboard event
pub fn get_key_from_event(event: &KeyboardEvent) -> String {
    event.key()
}
