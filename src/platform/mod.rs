//! Platform abstraction layer
//!
//! Input sources feed the frame loop one [`TickInput`] per tick:
//! - `keyboard`: DOM key events folded into held state and pressed actions
//! - `autopilot`: demo player that reads the session and steers the paddle

pub mod autopilot;
pub mod keyboard;

pub use autopilot::Autopilot;
pub use keyboard::Keyboard;

use crate::sim::{Session, TickInput};

/// Discrete, edge-triggered player actions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    Start,
    TogglePause,
    Restart,
    Quit,
}

/// Something that can drive the paddle and press buttons
pub trait InputSource {
    /// Sample held directions and drain actions pressed since the last poll
    fn poll(&mut self, session: &Session) -> TickInput;
}
