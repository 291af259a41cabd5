//! Game configuration
//!
//! Read once when a session is created and never mutated afterwards.
//! Every group falls back to the reference layout in [`crate::consts`], so a
//! settings file only needs the keys it wants to override.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::Color;
use crate::consts::*;

/// Errors raised while loading or validating settings
#[derive(Debug, Error)]
pub enum SettingsError {
    /// The settings file could not be read
    #[error("failed to read settings: {0}")]
    Io(#[from] std::io::Error),

    /// The settings file is not valid JSON for [`Settings`]
    #[error("failed to parse settings: {0}")]
    Parse(#[from] serde_json::Error),

    /// The values parse but describe an unplayable layout
    #[error("invalid settings: {0}")]
    Invalid(String),
}

/// Play-field dimensions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FieldSettings {
    pub width: i32,
    pub height: i32,
}

impl Default for FieldSettings {
    fn default() -> Self {
        Self {
            width: SCREEN_WIDTH,
            height: SCREEN_HEIGHT,
        }
    }
}

/// Paddle geometry and movement
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PaddleSettings {
    pub width: i32,
    pub height: i32,
    /// Pixels moved per frame while a direction is held
    pub speed: i32,
    /// Top edge of the paddle row
    pub y: i32,
}

impl Default for PaddleSettings {
    fn default() -> Self {
        Self {
            width: PADDLE_WIDTH,
            height: PADDLE_HEIGHT,
            speed: PADDLE_SPEED,
            y: PADDLE_Y,
        }
    }
}

/// Ball geometry and base speeds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BallSettings {
    /// Width and height of the ball's bounding square
    pub size: i32,
    pub speed_x: i32,
    pub speed_y: i32,
}

impl Default for BallSettings {
    fn default() -> Self {
        Self {
            size: BALL_SIZE,
            speed_x: BALL_SPEED_X,
            speed_y: BALL_SPEED_Y,
        }
    }
}

/// Brick grid layout
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BrickSettings {
    pub rows: usize,
    pub columns: usize,
    pub width: i32,
    pub height: i32,
    pub left_margin: i32,
    pub top_margin: i32,
    pub spacing: i32,
    /// Colors cycled by row index
    pub palette: Vec<Color>,
    /// Point value for each row, top to bottom (one entry per row)
    pub points: Vec<u32>,
}

impl Default for BrickSettings {
    fn default() -> Self {
        Self {
            rows: BRICK_ROWS,
            columns: BRICK_COLUMNS,
            width: BRICK_WIDTH,
            height: BRICK_HEIGHT,
            left_margin: BRICK_LEFT_MARGIN,
            top_margin: BRICK_TOP_MARGIN,
            spacing: BRICK_SPACING,
            palette: BRICK_PALETTE.to_vec(),
            points: BRICK_POINTS.to_vec(),
        }
    }
}

/// Complete game configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub field: FieldSettings,
    pub paddle: PaddleSettings,
    pub ball: BallSettings,
    pub bricks: BrickSettings,
    pub initial_lives: u32,
    /// Simulation ticks per second
    pub target_fps: u32,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            field: FieldSettings::default(),
            paddle: PaddleSettings::default(),
            ball: BallSettings::default(),
            bricks: BrickSettings::default(),
            initial_lives: INITIAL_LIVES,
            target_fps: TARGET_FPS,
        }
    }
}

impl Settings {
    /// Parse settings from JSON and validate them
    pub fn from_json(json: &str) -> Result<Self, SettingsError> {
        let settings: Settings = serde_json::from_str(json)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Load settings from a JSON file (native only)
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load(path: impl AsRef<std::path::Path>) -> Result<Self, SettingsError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)?;
        let settings = Self::from_json(&json)?;
        log::info!("Loaded settings from {}", path.display());
        Ok(settings)
    }

    /// Fixed simulation timestep in seconds
    pub fn tick_seconds(&self) -> f32 {
        1.0 / self.target_fps.max(1) as f32
    }

    /// Check startup preconditions the simulation relies on
    pub fn validate(&self) -> Result<(), SettingsError> {
        let invalid = |msg: String| Err(SettingsError::Invalid(msg));

        let field = &self.field;
        if field.width <= 0 || field.height <= 0 {
            return invalid(format!("field must be non-empty, got {}x{}", field.width, field.height));
        }

        let paddle = &self.paddle;
        if paddle.width <= 0 || paddle.height <= 0 {
            return invalid(format!("paddle must be non-empty, got {}x{}", paddle.width, paddle.height));
        }
        if paddle.width > field.width {
            return invalid(format!(
                "paddle width {} exceeds field width {}",
                paddle.width, field.width
            ));
        }
        match paddle.y.checked_add(paddle.height) {
            Some(bottom) if paddle.y >= 0 && bottom <= field.height => {}
            _ => return invalid(format!("paddle row {} lies outside the field", paddle.y)),
        }
        if paddle.speed < 0 {
            return invalid(format!("paddle speed must not be negative, got {}", paddle.speed));
        }

        let ball = &self.ball;
        if ball.size <= 0 || ball.size > field.width || ball.size > field.height {
            return invalid(format!("ball size {} does not fit the field", ball.size));
        }
        // The serve table uses speed_x - 2, which must stay non-zero
        if ball.speed_x < 3 {
            return invalid(format!("ball speed_x must be at least 3, got {}", ball.speed_x));
        }
        if ball.speed_y < 1 {
            return invalid(format!("ball speed_y must be at least 1, got {}", ball.speed_y));
        }

        let bricks = &self.bricks;
        if bricks.width <= 0 || bricks.height <= 0 {
            return invalid(format!("bricks must be non-empty, got {}x{}", bricks.width, bricks.height));
        }
        if bricks.rows == 0 || bricks.columns == 0 {
            return invalid("brick grid must have at least one row and column".to_string());
        }
        if bricks.palette.is_empty() {
            return invalid("brick palette is empty".to_string());
        }
        if bricks.points.len() != bricks.rows {
            return invalid(format!(
                "point table has {} entries for {} rows",
                bricks.points.len(),
                bricks.rows
            ));
        }
        if bricks.left_margin < 0 || bricks.top_margin < 0 || bricks.spacing < 0 {
            return invalid("brick margins and spacing must not be negative".to_string());
        }

        // Every brick must be reachable by the ball, or the game cannot be won
        match lattice_extent(bricks.left_margin, bricks.columns, bricks.width, bricks.spacing) {
            Some(right) if right <= field.width => {}
            _ => {
                return invalid(format!(
                    "{} brick columns do not fit the field width {}",
                    bricks.columns, field.width
                ));
            }
        }
        match lattice_extent(bricks.top_margin, bricks.rows, bricks.height, bricks.spacing) {
            Some(bottom) if bottom < paddle.y => {}
            _ => {
                return invalid(format!(
                    "{} brick rows reach the paddle row {}",
                    bricks.rows, paddle.y
                ));
            }
        }

        if self.initial_lives == 0 {
            return invalid("initial lives must be positive".to_string());
        }
        if self.target_fps == 0 {
            return invalid("target fps must be positive".to_string());
        }

        Ok(())
    }
}

/// Far edge of `count` cells of `size` separated by `gap`, or `None` on overflow
fn lattice_extent(start: i32, count: usize, size: i32, gap: i32) -> Option<i32> {
    let count = i32::try_from(count).ok()?;
    let cells = count.checked_mul(size)?;
    let gaps = count.checked_sub(1)?.checked_mul(gap)?;
    start.checked_add(cells)?.checked_add(gaps)
}
