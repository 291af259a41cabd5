//! Demo player
//!
//! Predicts where a falling ball will cross the paddle row (folding the path
//! at the side walls) and holds left/right until the paddle is under it.

use super::InputSource;
use crate::sim::{Session, TickInput};

#[derive(Debug, Clone)]
pub struct Autopilot {
    /// Press restart automatically after game over or victory
    pub auto_restart: bool,
    /// Dead zone around the target, in pixels
    pub tolerance: i32,
}

impl Default for Autopilot {
    fn default() -> Self {
        Self {
            auto_restart: false,
            tolerance: 4,
        }
    }
}

impl Autopilot {
    pub fn new(auto_restart: bool) -> Self {
        Self {
            auto_restart,
            ..Default::default()
        }
    }

    /// X coordinate the paddle centre should move toward
    pub fn target_x(session: &Session) -> i32 {
        let ball = &session.ball;
        let paddle = &session.paddle;
        let center = ball.rect.center();

        if ball.vel.y <= 0 {
            // Rising: drift under the ball
            return center.x;
        }

        let frames = ((paddle.rect.top() - ball.rect.bottom()) / ball.vel.y).max(0);
        let raw = center.x + ball.vel.x * frames;

        // Fold the straight-line prediction back into the field
        let half = ball.rect.width() / 2;
        let lo = half;
        let hi = session.settings.field.width - half;
        let span = hi - lo;
        if span <= 0 {
            return center.x;
        }
        let period = 2 * span;
        let mut t = (raw - lo).rem_euclid(period);
        if t > span {
            t = period - t;
        }
        lo + t
    }
}

impl InputSource for Autopilot {
    fn poll(&mut self, session: &Session) -> TickInput {
        let phase = &session.phase;
        let mut input = TickInput {
            start: phase.is_start_screen(),
            restart: self.auto_restart && phase.can_restart(),
            ..Default::default()
        };

        if phase.is_playing() {
            let diff = Self::target_x(session) - session.paddle.rect.center().x;
            input.left = diff < -self.tolerance;
            input.right = diff > self.tolerance;
        }

        input
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Settings;
    use crate::sim::tick;
    use glam::IVec2;

    fn playing() -> Session {
        let mut session = Session::new(Settings::default(), 3);
        session.phase.start().unwrap();
        session
    }

    #[test]
    fn test_presses_start() {
        let session = Session::new(Settings::default(), 3);
        let input = Autopilot::default().poll(&session);
        assert!(input.start);
        assert!(!input.left && !input.right);
    }

    #[test]
    fn test_steers_toward_falling_ball() {
        let mut session = playing();
        session.ball.rect.pos = IVec2::new(100, 500);
        session.ball.vel = IVec2::new(0, 5);
        let input = Autopilot::default().poll(&session);
        assert!(input.left);
        assert!(!input.right);
    }

    #[test]
    fn test_prediction_folds_at_walls() {
        let mut session = playing();
        // Heading right fast enough to bounce off the right wall first
        session.ball.rect.pos = IVec2::new(760, 300);
        session.ball.vel = IVec2::new(5, 5);
        let x = Autopilot::target_x(&session);
        assert!(x > 0 && x < 800);
        assert!(x < 765);
    }

    #[test]
    fn test_restart_only_when_enabled() {
        let mut session = playing();
        session.phase.set_named("game_over").unwrap();
        assert!(!Autopilot::new(false).poll(&session).restart);
        assert!(Autopilot::new(true).poll(&session).restart);
    }

    #[test]
    fn test_keeps_ball_in_play() {
        let mut session = Session::new(Settings::default(), 11);
        let mut pilot = Autopilot::default();
        for _ in 0..3000 {
            let input = pilot.poll(&session);
            tick(&mut session, &input);
        }
        assert_eq!(session.lives, session.settings.initial_lives);
        assert!(session.score > 0);
    }
}
