/// Keyboard state reduced to the three intents the core understands.
use std::collections::HashMap;

use crossterm::event::KeyCode;

/// What the player is holding this frame.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Intents {
    pub left: bool,
    pub right: bool,
    pub fire: bool,
}

impl Intents {
    pub fn any_direction(&self) -> bool {
        self.left || self.right
    }
}

/// Everything an `update` call samples at the start of a frame.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct FrameInput {
    pub intents: Intents,
    /// Monotonic clock reading, in milliseconds.
    pub now_ms: u64,
}

impl FrameInput {
    pub fn new(intents: Intents, now_ms: u64) -> Self {
        FrameInput { intents, now_ms }
    }
}

/// A key counts as held if its last press/repeat arrived within this many
/// frames. Terminals without key-release events keep re-sending presses
/// while a key is down, so this window expires soon after it is let go.
pub const HOLD_WINDOW: u64 = 4;

/// Tracks the frame each key was last seen on.
#[derive(Clone, Debug, Default)]
pub struct KeyTracker {
    key_frame: HashMap<KeyCode, u64>,
}

impl KeyTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Press or repeat.
    pub fn press(&mut self, code: KeyCode, frame: u64) {
        self.key_frame.insert(normalize(code), frame);
    }

    pub fn release(&mut self, code: KeyCode) {
        self.key_frame.remove(&normalize(code));
    }

    pub fn is_held(&self, code: KeyCode, frame: u64) -> bool {
        self.key_frame
            .get(&normalize(code))
            .map(|&last| frame.saturating_sub(last) <= HOLD_WINDOW)
            .unwrap_or(false)
    }

    pub fn intents(&self, frame: u64) -> Intents {
        Intents {
            left: self.is_held(KeyCode::Left, frame),
            right: self.is_held(KeyCode::Right, frame),
            fire: self.is_held(KeyCode::Char(' '), frame),
        }
    }
}

/// Fold the alternative bindings (A/D) onto the arrow keys.
fn normalize(code: KeyCode) -> KeyCode {
    match code {
        KeyCode::Char('a') | KeyCode::Char('A') => KeyCode::Left,
        KeyCode::Char('d') | KeyCode::Char('D') => KeyCode::Right,
        other => other,
    }
}
