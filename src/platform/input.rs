//! Keyboard and touch input
//!
//! Tracks which physical keys are down and folds them into the held-direction
//! set the simulation reads once per step. Touch buttons press the same keys
//! as the arrow keys, so holding a touch arrow and a keyboard arrow together
//! behaves like one key.

use std::collections::{HashMap, HashSet};

use crate::sim::{Direction, HeldDirections};

/// Map from key codes (`KeyboardEvent.code` style) to directions
#[derive(Debug, Clone)]
pub struct KeyBindings {
    keys: HashMap<String, Direction>,
}

impl Default for KeyBindings {
    fn default() -> Self {
        let mut bindings = Self {
            keys: HashMap::new(),
        };
        for (code, dir) in [
            ("ArrowUp", Direction::Up),
            ("KeyW", Direction::Up),
            ("ArrowDown", Direction::Down),
            ("KeyS", Direction::Down),
            ("ArrowLeft", Direction::Left),
            ("KeyA", Direction::Left),
            ("ArrowRight", Direction::Right),
            ("KeyD", Direction::Right),
        ] {
            bindings.bind(code, dir);
        }
        bindings
    }
}

impl KeyBindings {
    pub fn bind(&mut self, code: &str, dir: Direction) {
        self.keys.insert(code.to_string(), dir);
    }

    pub fn direction(&self, code: &str) -> Option<Direction> {
        self.keys.get(code).copied()
    }

    /// Key code a touch arrow stands in for
    pub fn touch_code(dir: Direction) -> &'static str {
        match dir {
            Direction::Up => "ArrowUp",
            Direction::Down => "ArrowDown",
            Direction::Left => "ArrowLeft",
            Direction::Right => "ArrowRight",
        }
    }

    /// Parse a touch button's `data-dir` value
    pub fn touch_direction(name: &str) -> Option<Direction> {
        match name {
            "up" => Some(Direction::Up),
            "down" => Some(Direction::Down),
            "left" => Some(Direction::Left),
            "right" => Some(Direction::Right),
            _ => None,
        }
    }
}

/// Currently pressed keys
#[derive(Debug, Clone, Default)]
pub struct InputState {
    bindings: KeyBindings,
    pressed: HashSet<String>,
}

impl InputState {
    pub fn new(bindings: KeyBindings) -> Self {
        Self {
            bindings,
            pressed: HashSet::new(),
        }
    }

    pub fn key_down(&mut self, code: &str) {
        self.pressed.insert(code.to_string());
    }

    pub fn key_up(&mut self, code: &str) {
        self.pressed.remove(code);
    }

    /// Touch start/end/cancel on a direction button; unknown names are ignored
    pub fn touch(&mut self, dir_name: &str, pressed: bool) {
        let Some(dir) = KeyBindings::touch_direction(dir_name) else {
            log::trace!("Ignoring touch on unknown button {dir_name:?}");
            return;
        };
        let code = KeyBindings::touch_code(dir);
        if pressed {
            self.key_down(code);
        } else {
            self.key_up(code);
        }
    }

    /// Release everything (e.g. on focus loss)
    pub fn clear(&mut self) {
        self.pressed.clear();
    }

    /// Fold pressed keys into logical directions
    pub fn held(&self) -> HeldDirections {
        self.pressed
            .iter()
            .filter_map(|code| self.bindings.direction(code))
            .collect()
    }
}
