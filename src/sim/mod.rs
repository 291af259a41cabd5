//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - One fixed step per tick, no internal timing
//! - Seeded RNG only
//! - Stable brick order (row-major, survivors keep their order)
//! - No rendering or platform dependencies

pub mod collision;
pub mod controls;
pub mod grid;
pub mod phase;
pub mod rect;
pub mod state;
pub mod tick;

pub use collision::{CollisionResult, resolve_bricks, resolve_collisions, resolve_paddle, resolve_walls};
pub use controls::apply_paddle_input;
pub use grid::build_grid;
pub use phase::{GamePhase, PhaseAction, PhaseError, PhaseMachine};
pub use rect::Rect;
pub use state::{Axis, Ball, Brick, Paddle, Session, random_serve_velocity};
pub use tick::{GameEvent, TickInput, tick};
