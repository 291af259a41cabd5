//! Entities and the session context
//!
//! Entities only mutate themselves; everything that spans entities (collision,
//! scoring, phase changes) lives in the other `sim` modules and works on an
//! explicit [`Session`].

use glam::IVec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use super::grid::build_grid;
use super::phase::{GamePhase, PhaseError, PhaseMachine};
use super::rect::Rect;
use crate::Color;
use crate::settings::{BallSettings, PaddleSettings, Settings};

/// Velocity axis to reflect
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    /// Negates the x velocity (side walls)
    Horizontal,
    /// Negates the y velocity (ceiling, paddle, bricks)
    Vertical,
}

/// The player's paddle
#[derive(Debug, Clone, PartialEq)]
pub struct Paddle {
    pub rect: Rect,
    /// Pixels per frame while a direction is held
    pub speed: i32,
    /// Width of the field the paddle is confined to
    field_width: i32,
}

impl Paddle {
    /// Paddle centred horizontally on its row
    pub fn new(settings: &PaddleSettings, field_width: i32) -> Self {
        let x = (field_width - settings.width) / 2;
        Self {
            rect: Rect::new(x, settings.y, settings.width, settings.height),
            speed: settings.speed,
            field_width,
        }
    }

    /// Largest legal left edge
    pub fn max_x(&self) -> i32 {
        (self.field_width - self.rect.width()).max(0)
    }

    /// Shift horizontally by `delta`, clamped to `[0, field_width - width]`
    pub fn move_by(&mut self, delta: i32) {
        let x = self.rect.left().saturating_add(delta).clamp(0, self.max_x());
        self.rect.set_left(x);
    }

    /// Horizontally centre the paddle
    pub fn recenter(&mut self) {
        self.rect.set_left(self.max_x() / 2);
    }
}

/// The ball
#[derive(Debug, Clone, PartialEq)]
pub struct Ball {
    pub rect: Rect,
    /// Pixels per frame
    pub vel: IVec2,
}

impl Ball {
    pub fn new(size: i32) -> Self {
        Self {
            rect: Rect::new(0, 0, size, size),
            vel: IVec2::ZERO,
        }
    }

    /// Integrate one frame of motion
    pub fn advance(&mut self) {
        self.rect.pos += self.vel;
    }

    /// Negate the velocity component on `axis`
    pub fn reflect(&mut self, axis: Axis) {
        match axis {
            Axis::Horizontal => self.vel.x = -self.vel.x,
            Axis::Vertical => self.vel.y = -self.vel.y,
        }
    }

    /// Place at `center` with a new velocity
    pub fn serve(&mut self, center: IVec2, vel: IVec2) {
        self.rect.set_center(center);
        self.vel = vel;
    }
}

/// A destructible brick
#[derive(Debug, Clone, PartialEq)]
pub struct Brick {
    pub rect: Rect,
    pub color: Color,
    pub points: u32,
}

/// Velocity for a randomized serve
///
/// Horizontal speed comes from `±{sx, sx-1, sx-2}`; vertical is always
/// upward at `sy`, `sy+1` or `sy+2`.
pub fn random_serve_velocity<R: Rng>(rng: &mut R, ball: &BallSettings) -> IVec2 {
    let sx = ball.speed_x;
    let sy = ball.speed_y;
    let horizontal = [-sx, -sx + 1, -sx + 2, sx - 2, sx - 1, sx];
    let vertical = [-sy, -sy - 1, -sy - 2];
    IVec2::new(
        horizontal[rng.random_range(0..horizontal.len())],
        vertical[rng.random_range(0..vertical.len())],
    )
}

/// Everything one play session owns
#[derive(Debug, Clone)]
pub struct Session {
    pub settings: Settings,
    /// Seed the session RNG was created from
    pub seed: u64,
    rng: Pcg32,
    pub phase: PhaseMachine,
    pub score: u32,
    pub lives: u32,
    pub paddle: Paddle,
    pub ball: Ball,
    /// Active bricks in grid order (row-major)
    pub bricks: Vec<Brick>,
    /// Simulated (playing) ticks since the session was created
    pub time_ticks: u64,
}

impl Session {
    /// Create a session on the start screen.
    ///
    /// The first serve uses the base velocity (down and to the right);
    /// later serves are randomized.
    pub fn new(settings: Settings, seed: u64) -> Self {
        let paddle = Paddle::new(&settings.paddle, settings.field.width);
        let mut ball = Ball::new(settings.ball.size);
        ball.serve(
            field_center(&settings),
            IVec2::new(settings.ball.speed_x, settings.ball.speed_y),
        );
        let bricks = build_grid(&settings.bricks);

        Self {
            lives: settings.initial_lives,
            seed,
            rng: Pcg32::seed_from_u64(seed),
            phase: PhaseMachine::new(),
            score: 0,
            paddle,
            ball,
            bricks,
            time_ticks: 0,
            settings,
        }
    }

    pub fn current_phase(&self) -> GamePhase {
        self.phase.current()
    }

    /// Recentre the ball with a randomized serve
    pub fn reset_ball(&mut self) {
        let vel = random_serve_velocity(&mut self.rng, &self.settings.ball);
        self.ball.serve(field_center(&self.settings), vel);
    }

    /// Full reset into a fresh game, only legal after game over or victory
    pub fn restart(&mut self) -> Result<(), PhaseError> {
        self.phase.restart()?;
        self.score = 0;
        self.lives = self.settings.initial_lives;
        self.paddle.recenter();
        self.bricks = build_grid(&self.settings.bricks);
        self.reset_ball();
        log::info!("Session restarted ({} bricks)", self.bricks.len());
        Ok(())
    }

    /// True when no active bricks remain
    pub fn is_cleared(&self) -> bool {
        self.bricks.is_empty()
    }
}

fn field_center(settings: &Settings) -> IVec2 {
    IVec2::new(settings.field.width / 2, settings.field.height / 2)
}
