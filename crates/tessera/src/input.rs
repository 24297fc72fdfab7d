//! Keyboard input state.
//!
//! The [`Input`] resource tracks which keys are currently pressed, just
//! pressed this frame, or just released this frame. Components never see it
//! directly; they poll through the [`InputSource`] trait so a test or a
//! replay can stand in for the real keyboard.
//!
//! Updated by the platform layer each frame, cleared by the game loop after
//! rendering.

use std::collections::HashSet;
use std::hash::Hash;

pub use winit::keyboard::KeyCode;

/// Read-only keyboard polling, as consumed by components.
pub trait InputSource {
    /// `true` while the key is held.
    fn is_down(&self, key: KeyCode) -> bool;
    /// `true` on the frame the key went down.
    fn was_pressed(&self, key: KeyCode) -> bool;
    /// `true` on the frame the key went up.
    fn was_released(&self, key: KeyCode) -> bool;
}

/// Tracks the state of a set of inputs.
///
/// - `pressed`: currently held down
/// - `just_pressed`: pressed this frame (not held last frame)
/// - `just_released`: released this frame
#[derive(Debug, Clone)]
pub struct Input<T: Eq + Hash + Copy> {
    pressed: HashSet<T>,
    just_pressed: HashSet<T>,
    just_released: HashSet<T>,
}

impl<T: Eq + Hash + Copy> Input<T> {
    pub fn new() -> Self {
        Self {
            pressed: HashSet::new(),
            just_pressed: HashSet::new(),
            just_released: HashSet::new(),
        }
    }

    /// Returns `true` if the input is currently held down.
    pub fn pressed(&self, input: T) -> bool {
        self.pressed.contains(&input)
    }

    /// Returns `true` if the input was pressed this frame.
    pub fn just_pressed(&self, input: T) -> bool {
        self.just_pressed.contains(&input)
    }

    /// Returns `true` if the input was released this frame.
    pub fn just_released(&self, input: T) -> bool {
        self.just_released.contains(&input)
    }

    /// Call when an input is pressed (from the platform event handler).
    pub fn press(&mut self, input: T) {
        if self.pressed.insert(input) {
            self.just_pressed.insert(input);
        }
    }

    /// Call when an input is released (from the platform event handler).
    pub fn release(&mut self, input: T) {
        if self.pressed.remove(&input) {
            self.just_released.insert(input);
        }
    }

    /// Clear per-frame state. Called once the frame has been rendered.
    pub fn clear_just(&mut self) {
        self.just_pressed.clear();
        self.just_released.clear();
    }
}

impl<T: Eq + Hash + Copy> Default for Input<T> {
    fn default() -> Self {
        Self::new()
    }
}

/// Keyboard state keyed by physical key code.
pub type InputState = Input<KeyCode>;

impl InputSource for Input<KeyCode> {
    fn is_down(&self, key: KeyCode) -> bool {
        self.pressed(key)
    }

    fn was_pressed(&self, key: KeyCode) -> bool {
        self.just_pressed(key)
    }

    fn was_released(&self, key: KeyCode) -> bool {
        self.just_released(key)
    }
}

/// Resolve a key name as written in level files (`"up"`, `"space"`, `"w"`).
///
/// Case-insensitive. Returns `None` for names we don't know.
pub fn key_from_name(name: &str) -> Option<KeyCode> {
    let lower = name.trim().to_ascii_lowercase();
    let key = match lower.as_str() {
        "up" => KeyCode::ArrowUp,
        "down" => KeyCode::ArrowDown,
        "left" => KeyCode::ArrowLeft,
        "right" => KeyCode::ArrowRight,
        "space" => KeyCode::Space,
        "enter" | "return" => KeyCode::Enter,
        "escape" | "esc" => KeyCode::Escape,
        "tab" => KeyCode::Tab,
        "shift" => KeyCode::ShiftLeft,
        "ctrl" | "control" => KeyCode::ControlLeft,
        _ => {
            let mut chars = lower.chars();
            match (chars.next(), chars.next()) {
                (Some(c), None) => letter_or_digit(c)?,
                _ => return None,
            }
        }
    };
    Some(key)
}

fn letter_or_digit(c: char) -> Option<KeyCode> {
    const LETTERS: [KeyCode; 26] = [
        KeyCode::KeyA,
        KeyCode::KeyB,
        KeyCode::KeyC,
        KeyCode::KeyD,
        KeyCode::KeyE,
        KeyCode::KeyF,
        KeyCode::KeyG,
        KeyCode::KeyH,
        KeyCode::KeyI,
        KeyCode::KeyJ,
        KeyCode::KeyK,
        KeyCode::KeyL,
        KeyCode::KeyM,
        KeyCode::KeyN,
        KeyCode::KeyO,
        KeyCode::KeyP,
        KeyCode::KeyQ,
        KeyCode::KeyR,
        KeyCode::KeyS,
        KeyCode::KeyT,
        KeyCode::KeyU,
        KeyCode::KeyV,
        KeyCode::KeyW,
        KeyCode::KeyX,
        KeyCode::KeyY,
        KeyCode::KeyZ,
    ];
    const DIGITS: [KeyCode; 10] = [
        KeyCode::Digit0,
        KeyCode::Digit1,
        KeyCode::Digit2,
        KeyCode::Digit3,
        KeyCode::Digit4,
        KeyCode::Digit5,
        KeyCode::Digit6,
        KeyCode::Digit7,
        KeyCode::Digit8,
        KeyCode::Digit9,
    ];
    match c {
        'a'..='z' => Some(LETTERS[(c as u8 - b'a') as usize]),
        '0'..='9' => Some(DIGITS[(c as u8 - b'0') as usize]),
        _ => None,
    }
}
