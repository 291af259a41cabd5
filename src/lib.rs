//! Breakout - a classic brick-breaking arcade game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (entities, collisions, game phase machine)
//! - `renderer`: Phase-to-screen dispatch, tessellation and WebGPU pipeline
//! - `platform`: Input sources (keyboard, autopilot)
//! - `settings`: Startup configuration

pub mod platform;
pub mod renderer;
pub mod settings;
pub mod sim;

pub use settings::{Settings, SettingsError};

/// Linear RGBA color
pub type Color = [f32; 4];

/// Reference layout constants (the values `Settings::default()` uses)
pub mod consts {
    use crate::Color;

    /// Play-field dimensions in pixels
    pub const SCREEN_WIDTH: i32 = 800;
    pub const SCREEN_HEIGHT: i32 = 600;

    /// Paddle defaults
    pub const PADDLE_WIDTH: i32 = 100;
    pub const PADDLE_HEIGHT: i32 = 10;
    pub const PADDLE_SPEED: i32 = 8;
    pub const PADDLE_Y: i32 = SCREEN_HEIGHT - 40;

    /// Ball defaults
    pub const BALL_SIZE: i32 = 10;
    /// Base horizontal speed (pixels per frame)
    pub const BALL_SPEED_X: i32 = 5;
    /// Base vertical speed (pixels per frame)
    pub const BALL_SPEED_Y: i32 = 5;

    /// Brick grid layout
    pub const BRICK_ROWS: usize = 8;
    pub const BRICK_COLUMNS: usize = 10;
    pub const BRICK_WIDTH: i32 = 70;
    pub const BRICK_HEIGHT: i32 = 20;
    pub const BRICK_SPACING: i32 = 5;
    pub const BRICK_LEFT_MARGIN: i32 = 27;
    pub const BRICK_TOP_MARGIN: i32 = 60;

    /// Points per brick row, top to bottom
    pub const BRICK_POINTS: [u32; BRICK_ROWS] = [8, 8, 5, 5, 3, 3, 1, 1];

    /// Brick colors, cycled by row
    pub const BRICK_PALETTE: [Color; 4] = [
        [0.86, 0.20, 0.18, 1.0], // Red
        [0.95, 0.55, 0.15, 1.0], // Orange
        [0.25, 0.75, 0.30, 1.0], // Green
        [0.95, 0.85, 0.20, 1.0], // Yellow
    ];

    /// Session defaults
    pub const INITIAL_LIVES: u32 = 3;
    pub const TARGET_FPS: u32 = 60;
}
