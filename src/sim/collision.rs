//! Collision detection and response
//!
//! Resolution runs once per simulated frame in a fixed order: walls first
//! (so the ball is clamped back into the field), then the paddle, then bricks.

use super::rect::Rect;
use super::state::{Axis, Ball, Brick, Paddle};

/// What happened during one resolution pass
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CollisionResult {
    /// Ball bounced off a side wall or the ceiling
    pub hit_wall: bool,
    /// Ball bounced off the paddle
    pub hit_paddle: bool,
    /// Bricks destroyed this frame
    pub bricks_destroyed: usize,
    /// Score earned this frame (sum of destroyed brick values)
    pub points: u32,
}

/// Bounce off the left, right and top walls.
///
/// The bottom edge is open; losing the ball there is handled by the tick.
pub fn resolve_walls(ball: &mut Ball, field_width: i32) -> bool {
    let mut hit = false;

    if ball.rect.left() <= 0 {
        ball.rect.set_left(0);
        ball.reflect(Axis::Horizontal);
        hit = true;
    } else if ball.rect.right() >= field_width {
        ball.rect.set_right(field_width);
        ball.reflect(Axis::Horizontal);
        hit = true;
    }

    if ball.rect.top() <= 0 {
        ball.rect.set_top(0);
        ball.reflect(Axis::Vertical);
        hit = true;
    }

    hit
}

/// Bounce off the paddle.
///
/// Only a ball travelling downward is deflected, so a ball still inside the
/// paddle after bouncing is not flipped back down.
pub fn resolve_paddle(ball: &mut Ball, paddle: &Paddle) -> bool {
    if ball.vel.y > 0 && ball.rect.intersects(&paddle.rect) {
        ball.rect.set_bottom(paddle.rect.top());
        ball.reflect(Axis::Vertical);
        return true;
    }
    false
}

/// Destroy every brick the ball overlaps.
///
/// The vertical velocity is reflected once no matter how many bricks were
/// hit. Returns `(destroyed, points)`.
pub fn resolve_bricks(ball: &mut Ball, bricks: &mut Vec<Brick>) -> (usize, u32) {
    let hitbox: Rect = ball.rect;
    let before = bricks.len();
    let mut points = 0u32;

    bricks.retain(|brick| {
        if brick.rect.intersects(&hitbox) {
            points = points.saturating_add(brick.points);
            false
        } else {
            true
        }
    });

    let destroyed = before - bricks.len();
    if destroyed > 0 {
        ball.reflect(Axis::Vertical);
        log::trace!("Ball destroyed {} brick(s) for {} points", destroyed, points);
    }
    (destroyed, points)
}

/// Run the full wall → paddle → brick pass for one frame
pub fn resolve_collisions(
    ball: &mut Ball,
    paddle: &Paddle,
    bricks: &mut Vec<Brick>,
    field_width: i32,
) -> CollisionResult {
    let hit_wall = resolve_walls(ball, field_width);
    let hit_paddle = resolve_paddle(ball, paddle);
    let (bricks_destroyed, points) = resolve_bricks(ball, bricks);

    CollisionResult {
        hit_wall,
        hit_paddle,
        bricks_destroyed,
        points,
    }
}
