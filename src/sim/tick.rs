//! Per-frame simulation step
//!
//! One call to [`tick`] is one frame: actions first, then (only while
//! playing) input → motion → collisions → scoring → life and victory checks.

use super::collision::resolve_collisions;
use super::controls::apply_paddle_input;
use super::phase::{GamePhase, PhaseAction, PhaseError};
use super::state::Session;

/// Input for a single tick
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickInput {
    /// Left held
    pub left: bool,
    /// Right held
    pub right: bool,
    /// Start pressed this frame
    pub start: bool,
    /// Pause/resume pressed this frame
    pub toggle_pause: bool,
    /// Restart pressed this frame
    pub restart: bool,
    /// Quit requested. Never consumed by [`tick`]; the frame loop stops on it.
    pub quit: bool,
}

impl TickInput {
    /// True if any edge-triggered action is set
    pub fn has_action(&self) -> bool {
        self.start || self.toggle_pause || self.restart
    }
}

/// Notable things that happened during a tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameEvent {
    Started,
    Paused,
    Resumed,
    Restarted,
    BricksDestroyed { count: usize, points: u32 },
    LifeLost { remaining: u32 },
    GameOver { score: u32 },
    Victory { score: u32 },
}

/// Advance the session by one frame
pub fn tick(session: &mut Session, input: &TickInput) -> Vec<GameEvent> {
    let mut events = Vec::new();

    if input.has_action() {
        apply_actions(session, input, &mut events);
    }

    // Simulation only runs while playing
    if !session.phase.is_playing() {
        return events;
    }

    session.time_ticks += 1;

    apply_paddle_input(&mut session.paddle, input.left, input.right);
    session.ball.advance();

    let field = session.settings.field;
    let result = resolve_collisions(
        &mut session.ball,
        &session.paddle,
        &mut session.bricks,
        field.width,
    );
    if result.bricks_destroyed > 0 {
        session.score = session.score.saturating_add(result.points);
        events.push(GameEvent::BricksDestroyed {
            count: result.bricks_destroyed,
            points: result.points,
        });
    }

    if session.ball.rect.bottom() >= field.height {
        lose_life(session, &mut events);
    }

    // Game over wins a tie with clearing the last brick
    if session.phase.is_playing() && session.is_cleared() {
        if let Err(e) = session.phase.apply(PhaseAction::BricksCleared) {
            log::debug!("Victory check ignored: {e}");
        } else {
            log::info!("All bricks cleared, final score {}", session.score);
            events.push(GameEvent::Victory {
                score: session.score,
            });
        }
    }

    events
}

fn apply_actions(session: &mut Session, input: &TickInput, events: &mut Vec<GameEvent>) {
    if input.start {
        match session.phase.start() {
            Ok(_) => events.push(GameEvent::Started),
            Err(e) => ignored(e),
        }
    }

    if input.toggle_pause {
        match session.phase.toggle_pause() {
            Ok(GamePhase::Paused) => events.push(GameEvent::Paused),
            Ok(_) => events.push(GameEvent::Resumed),
            Err(e) => ignored(e),
        }
    }

    if input.restart {
        match session.restart() {
            Ok(()) => events.push(GameEvent::Restarted),
            Err(e) => ignored(e),
        }
    }
}

fn lose_life(session: &mut Session, events: &mut Vec<GameEvent>) {
    session.lives = session.lives.saturating_sub(1);
    events.push(GameEvent::LifeLost {
        remaining: session.lives,
    });

    if session.lives == 0 {
        if let Err(e) = session.phase.apply(PhaseAction::LivesExhausted) {
            log::debug!("Game over ignored: {e}");
            return;
        }
        log::info!("Out of lives, final score {}", session.score);
        events.push(GameEvent::GameOver {
            score: session.score,
        });
    } else {
        log::info!("Ball lost, {} lives left", session.lives);
        session.reset_ball();
    }
}

fn ignored(err: PhaseError) {
    log::debug!("Ignoring action: {err}");
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Settings;
    use crate::sim::rect::Rect;
    use crate::sim::state::Brick;
    use glam::IVec2;

    fn press_start() -> TickInput {
        TickInput {
            start: true,
            ..Default::default()
        }
    }

    fn press_pause() -> TickInput {
        TickInput {
            toggle_pause: true,
            ..Default::default()
        }
    }

    fn press_restart() -> TickInput {
        TickInput {
            restart: true,
            ..Default::default()
        }
    }

    fn playing_session() -> Session {
        let mut session = Session::new(Settings::default(), 12345);
        tick(&mut session, &press_start());
        assert!(session.phase.is_playing());
        session
    }

    /// Ball just above the floor, far from the paddle, falling
    fn drop_ball(session: &mut Session) {
        session.ball.rect.pos = IVec2::new(20, 588);
        session.ball.vel = IVec2::new(1, 5);
    }

    #[test]
    fn test_start_screen_does_not_simulate() {
        let mut session = Session::new(Settings::default(), 1);
        let before = session.ball.clone();
        let events = tick(&mut session, &TickInput::default());
        assert!(events.is_empty());
        assert_eq!(session.ball, before);
        assert_eq!(session.time_ticks, 0);
    }

    #[test]
    fn test_start_begins_simulation_same_frame() {
        let mut session = Session::new(Settings::default(), 1);
        let start_pos = session.ball.rect.pos;
        let events = tick(&mut session, &press_start());
        assert_eq!(events, vec![GameEvent::Started]);
        assert_eq!(session.ball.rect.pos, start_pos + IVec2::new(5, 5));
        assert_eq!(session.time_ticks, 1);
    }

    #[test]
    fn test_pause_freezes_everything() {
        let mut session = playing_session();
        assert_eq!(tick(&mut session, &press_pause()), vec![GameEvent::Paused]);

        let ball = session.ball.clone();
        let paddle = session.paddle.clone();
        let held = TickInput {
            left: true,
            ..Default::default()
        };
        for _ in 0..10 {
            assert!(tick(&mut session, &held).is_empty());
        }
        assert_eq!(session.ball, ball);
        assert_eq!(session.paddle, paddle);

        let events = tick(&mut session, &press_pause());
        assert_eq!(events, vec![GameEvent::Resumed]);
        assert!(session.phase.is_playing());
    }

    #[test]
    fn test_pause_on_start_screen_ignored() {
        let mut session = Session::new(Settings::default(), 1);
        assert!(tick(&mut session, &press_pause()).is_empty());
        assert!(session.phase.is_start_screen());
    }

    #[test]
    fn test_paddle_follows_input() {
        let mut session = playing_session();
        let x = session.paddle.rect.left();
        tick(
            &mut session,
            &TickInput {
                right: true,
                ..Default::default()
            },
        );
        assert_eq!(session.paddle.rect.left(), x + session.paddle.speed);
    }

    #[test]
    fn test_brick_hit_scores() {
        let mut session = playing_session();
        session.bricks = vec![
            Brick {
                rect: Rect::new(100, 100, 70, 20),
                color: [1.0; 4],
                points: 5,
            },
            Brick {
                rect: Rect::new(175, 100, 70, 20),
                color: [1.0; 4],
                points: 3,
            },
            Brick {
                rect: Rect::new(600, 100, 70, 20),
                color: [1.0; 4],
                points: 1,
            },
        ];
        session.ball.rect.pos = IVec2::new(168, 124);
        session.ball.vel = IVec2::new(0, -5);

        let events = tick(&mut session, &TickInput::default());
        assert_eq!(
            events,
            vec![GameEvent::BricksDestroyed {
                count: 2,
                points: 8
            }]
        );
        assert_eq!(session.score, 8);
        assert_eq!(session.ball.vel, IVec2::new(0, 5));
        assert!(session.phase.is_playing());
    }

    #[test]
    fn test_victory_fires_once() {
        let mut session = playing_session();
        session.bricks = vec![Brick {
            rect: Rect::new(100, 100, 70, 20),
            color: [1.0; 4],
            points: 3,
        }];
        session.ball.rect.pos = IVec2::new(120, 124);
        session.ball.vel = IVec2::new(0, -5);

        let events = tick(&mut session, &TickInput::default());
        assert_eq!(
            events,
            vec![
                GameEvent::BricksDestroyed {
                    count: 1,
                    points: 3
                },
                GameEvent::Victory { score: session.score }
            ]
        );
        assert!(session.phase.is_victory());

        let ball = session.ball.clone();
        let ticks = session.time_ticks;
        for _ in 0..5 {
            assert!(tick(&mut session, &TickInput::default()).is_empty());
        }
        assert_eq!(session.ball, ball);
        assert_eq!(session.time_ticks, ticks);
    }

    #[test]
    fn test_life_lost_reserves_ball() {
        let mut session = playing_session();
        drop_ball(&mut session);

        let events = tick(&mut session, &TickInput::default());
        assert_eq!(events, vec![GameEvent::LifeLost { remaining: 2 }]);
        assert_eq!(session.lives, 2);
        assert!(session.phase.is_playing());
        assert_eq!(session.ball.rect.center(), IVec2::new(400, 300));
        assert!(session.ball.vel.y < 0);
    }

    #[test]
    fn test_last_life_ends_game() {
        let mut session = playing_session();
        session.lives = 1;
        session.score = 17;
        drop_ball(&mut session);

        let events = tick(&mut session, &TickInput::default());
        assert_eq!(
            events,
            vec![
                GameEvent::LifeLost { remaining: 0 },
                GameEvent::GameOver { score: 17 }
            ]
        );
        assert_eq!(session.lives, 0);
        assert_eq!(session.current_phase(), GamePhase::GameOver);

        // Nothing decrements further while over
        for _ in 0..5 {
            tick(&mut session, &TickInput::default());
        }
        assert_eq!(session.lives, 0);
    }

    #[test]
    fn test_game_over_beats_victory_on_same_frame() {
        let mut session = playing_session();
        session.lives = 1;
        session.bricks.clear();
        session.bricks.push(Brick {
            rect: Rect::new(0, 580, 40, 20),
            color: [1.0; 4],
            points: 1,
        });
        drop_ball(&mut session);

        tick(&mut session, &TickInput::default());
        assert!(session.phase.is_over());
    }

    #[test]
    fn test_restart_resets_session() {
        let mut session = playing_session();
        session.lives = 1;
        session.score = 250;
        session.bricks.truncate(4);
        drop_ball(&mut session);
        tick(&mut session, &TickInput::default());
        assert!(session.phase.is_over());

        let events = tick(&mut session, &press_restart());
        assert_eq!(events, vec![GameEvent::Restarted]);
        assert!(session.phase.is_playing());
        assert_eq!(session.score, 0);
        assert_eq!(session.lives, 3);
        assert_eq!(session.bricks.len(), 80);
        assert_eq!(session.paddle.rect.left(), 350);
    }

    #[test]
    fn test_restart_from_victory() {
        let mut session = playing_session();
        session.phase.set_named("victory").unwrap();
        session.score = 99;

        let events = tick(&mut session, &press_restart());
        assert_eq!(events, vec![GameEvent::Restarted]);
        assert_eq!(session.score, 0);
        assert_eq!(session.bricks.len(), 80);
    }

    #[test]
    fn test_restart_while_playing_ignored() {
        let mut session = playing_session();
        session.score = 10;
        let events = tick(&mut session, &press_restart());
        assert!(!events.contains(&GameEvent::Restarted));
        assert_eq!(session.score, 10);
    }

    #[test]
    fn test_determinism() {
        let mut a = Session::new(Settings::default(), 4242);
        let mut b = Session::new(Settings::default(), 4242);
        let inputs = [
            press_start(),
            TickInput {
                left: true,
                ..Default::default()
            },
            TickInput::default(),
            TickInput {
                right: true,
                ..Default::default()
            },
        ];

        for i in 0..2000 {
            let input = inputs[i % inputs.len()];
            assert_eq!(tick(&mut a, &input), tick(&mut b, &input));
        }
        assert_eq!(a.ball, b.ball);
        assert_eq!(a.score, b.score);
        assert_eq!(a.bricks, b.bricks);
    }
}
