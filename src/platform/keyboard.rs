//! Keyboard state from DOM key events
//!
//! Held keys become the left/right flags of every tick; action keys fire once
//! per physical press (auto-repeat is ignored) and are drained on poll.

use std::collections::HashSet;

use super::{Action, InputSource};
use crate::sim::{Session, TickInput};

/// Map a DOM `KeyboardEvent.key` to an action
pub fn action_for_key(key: &str) -> Option<Action> {
    match key {
        "Enter" => Some(Action::Start),
        " " | "Spacebar" => Some(Action::TogglePause),
        "r" | "R" => Some(Action::Restart),
        "Escape" => Some(Action::Quit),
        _ => None,
    }
}

fn is_left(key: &str) -> bool {
    matches!(key, "ArrowLeft" | "Left")
}

fn is_right(key: &str) -> bool {
    matches!(key, "ArrowRight" | "Right")
}

#[derive(Debug, Clone, Default)]
pub struct Keyboard {
    held: HashSet<String>,
    pending: Vec<Action>,
}

impl Keyboard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a key press. Returns true if the key is one the game uses.
    pub fn key_down(&mut self, key: &str) -> bool {
        let action = action_for_key(key);
        let used = action.is_some() || is_left(key) || is_right(key);
        if !used {
            return false;
        }

        // Auto-repeat: already held, nothing new to report
        if !self.held.insert(key.to_string()) {
            return true;
        }

        if let Some(action) = action {
            self.pending.push(action);
        }
        true
    }

    /// Record a key release
    pub fn key_up(&mut self, key: &str) {
        self.held.remove(key);
    }

    /// Forget held keys (window lost focus, key-up events will not arrive)
    pub fn blur(&mut self) {
        self.held.clear();
    }

    pub fn left_held(&self) -> bool {
        self.held.iter().any(|k| is_left(k))
    }

    pub fn right_held(&self) -> bool {
        self.held.iter().any(|k| is_right(k))
    }

    /// Drain and return actions pressed since the last call
    pub fn take_actions(&mut self) -> Vec<Action> {
        std::mem::take(&mut self.pending)
    }
}

impl InputSource for Keyboard {
    fn poll(&mut self, _session: &Session) -> TickInput {
        let mut input = TickInput {
            left: self.left_held(),
            right: self.right_held(),
            ..Default::default()
        };
        for action in self.take_actions() {
            match action {
                Action::Start => input.start = true,
                Action::TogglePause => input.toggle_pause = true,
                Action::Restart => input.restart = true,
                Action::Quit => input.quit = true,
            }
        }
        input
    }
}
