use std::collections::HashSet;
use serde::{Deserialize, Serialize};

use crate::input::queue::InputEvent;

/// Movement actions a key can be bound to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Left,
    Right,
    Jump,
}

/// Key-to-action bindings. Names are compared lowercased, so `"ArrowLeft"`
/// and `"arrowleft"` are the same key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct KeyBindings {
    pub left: Vec<String>,
    pub right: Vec<String>,
    pub jump: Vec<String>,
}

impl Default for KeyBindings {
    fn default() -> Self {
        Self {
            left: vec!["arrowleft".into()],
            right: vec!["arrowright".into()],
            // Browsers report the space bar as " ".
            jump: vec![" ".into(), "space".into()],
        }
    }
}

impl KeyBindings {
    pub fn action_for(&self, key: &str) -> Option<Action> {
        let key = key.to_lowercase();
        let bound = |keys: &[String]| keys.iter().any(|k| k.to_lowercase() == key);
        if bound(&self.left) {
            Some(Action::Left)
        } else if bound(&self.right) {
            Some(Action::Right)
        } else if bound(&self.jump) {
            Some(Action::Jump)
        } else {
            None
        }
    }
}

/// Which movement actions are held this frame.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ControlFrame {
    pub left: bool,
    pub right: bool,
    pub jump: bool,
}

/// Set of currently held keys, owned by the host loop.
#[derive(Debug, Clone, Default)]
pub struct KeyState {
    pressed: HashSet<String>,
}

impl KeyState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn apply(&mut self, event: &InputEvent) {
        match event {
            InputEvent::KeyDown { key } => self.press(key),
            InputEvent::KeyUp { key } => self.release(key),
            InputEvent::Blur => self.clear(),
        }
    }

    pub fn press(&mut self, key: &str) {
        self.pressed.insert(key.to_lowercase());
    }

    pub fn release(&mut self, key: &str) {
        self.pressed.remove(&key.to_lowercase());
    }

    pub fn clear(&mut self) {
        self.pressed.clear();
    }

    pub fn is_pressed(&self, key: &str) -> bool {
        self.pressed.contains(&key.to_lowercase())
    }

    /// Resolve held keys into actions.
    pub fn sample(&self, bindings: &KeyBindings) -> ControlFrame {
        let mut controls = ControlFrame::default();
        for key in &self.pressed {
            match bindings.action_for(key) {
                Some(Action::Left) => controls.left = true,
                Some(Action::Right) => controls.right = true,
                Some(Action::Jump) => controls.jump = true,
                None => {}
            }
        }
        controls
    }
}
