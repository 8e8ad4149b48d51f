//! Per-frame input signals and the terminal key tracker that produces them.
//!
//! Terminals report key presses, not key state. [`KeyTracker`] records the
//! frame each key was last seen (press or repeat) and treats a key as held
//! while that frame is recent. Terminals with the keyboard-enhancement
//! protocol also send release events, which drop the key immediately.

use std::collections::{HashMap, HashSet};

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::geometry::Vector2;

/// A key counts as held if its last press/repeat arrived within this many
/// frames. Classic terminals repeat at 15 Hz or faster, which refreshes the
/// key well inside the window at 60 FPS.
pub const HOLD_WINDOW: u64 = 6;

/// Everything the simulation reads from the player in one frame.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct InputState {
    pub up: bool,
    pub down: bool,
    pub left: bool,
    pub right: bool,
    /// Level-triggered: holding fire keeps firing, gated by cooldown.
    pub fire: bool,
    /// Pressed this frame.
    pub confirm: bool,
    /// Pressed this frame.
    pub cancel: bool,
    pub quit: bool,
    /// Left click this frame, in window pixels.
    pub click: Option<Vector2>,
}

impl InputState {
    /// Unnormalized movement direction (`y` grows downward).
    pub fn direction(&self) -> Vector2 {
        let mut dir = Vector2::ZERO;
        if self.up {
            dir.y -= 1.0;
        }
        if self.down {
            dir.y += 1.0;
        }
        if self.left {
            dir.x -= 1.0;
        }
        if self.right {
            dir.x += 1.0;
        }
        dir
    }
}

/// Maps each held key to the frame it was last seen.
#[derive(Debug, Default)]
pub struct KeyTracker {
    frame: u64,
    key_frame: HashMap<KeyCode, u64>,
    pressed: HashSet<KeyCode>,
    quit: bool,
    click: Option<Vector2>,
}

impl KeyTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Advance to the next frame, forgetting last frame's one-shot presses.
    pub fn begin_frame(&mut self) {
        self.frame += 1;
        self.pressed.clear();
        self.click = None;
    }

    pub fn handle_key(&mut self, event: KeyEvent) {
        let code = normalize_key(event.code);
        match event.kind {
            KeyEventKind::Press => {
                if code == KeyCode::Char('c') && event.modifiers.contains(KeyModifiers::CONTROL) {
                    self.quit = true;
                    return;
                }
                self.key_frame.insert(code, self.frame);
                self.pressed.insert(code);
            }
            KeyEventKind::Repeat => {
                self.key_frame.insert(code, self.frame);
            }
            KeyEventKind::Release => {
                self.key_frame.remove(&code);
            }
        }
    }

    /// Record a left click, already converted to window pixels.
    pub fn handle_click(&mut self, at: Vector2) {
        self.click = Some(at);
    }

    pub fn is_held(&self, key: KeyCode) -> bool {
        self.key_frame
            .get(&key)
            .map(|&last| self.frame.saturating_sub(last) <= HOLD_WINDOW)
            .unwrap_or(false)
    }

    fn was_pressed(&self, key: KeyCode) -> bool {
        self.pressed.contains(&key)
    }

    /// Snapshot the signals for the current frame.
    pub fn sample(&self) -> InputState {
        InputState {
            up: self.is_held(KeyCode::Up) || self.is_held(KeyCode::Char('w')),
            down: self.is_held(KeyCode::Down) || self.is_held(KeyCode::Char('s')),
            left: self.is_held(KeyCode::Left) || self.is_held(KeyCode::Char('a')),
            right: self.is_held(KeyCode::Right) || self.is_held(KeyCode::Char('d')),
            fire: self.is_held(KeyCode::Char(' ')),
            confirm: self.was_pressed(KeyCode::Enter),
            cancel: self.was_pressed(KeyCode::Esc),
            quit: self.quit || self.was_pressed(KeyCode::Char('q')),
            click: self.click,
        }
    }
}

/// Letter keys are tracked case-insensitively so Shift or Caps Lock don't
/// strand a held key.
fn normalize_key(code: KeyCode) -> KeyCode {
    match code {
        KeyCode::Char(c) => KeyCode::Char(c.to_ascii_lowercase()),
        other => other,
    }
}
