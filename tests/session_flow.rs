//! Whole-game flows through the public API: keyboard in, draw calls out.

use breakout::Settings;
use breakout::platform::{Autopilot, InputSource, Keyboard};
use breakout::renderer::{FrameBatch, draw_frame};
use breakout::sim::{GameEvent, GamePhase, Session, TickInput, tick};

fn step(session: &mut Session, keyboard: &mut Keyboard) -> Vec<GameEvent> {
    let input = keyboard.poll(session);
    tick(session, &input)
}

#[test]
fn keyboard_drives_phases() {
    let mut session = Session::new(Settings::default(), 7);
    let mut keyboard = Keyboard::new();
    let mut batch = FrameBatch::new(800, 600);

    draw_frame(&session, &mut batch);
    assert!(batch.has_text("BREAKOUT"));

    keyboard.key_down("Enter");
    assert_eq!(step(&mut session, &mut keyboard), vec![GameEvent::Started]);
    keyboard.key_up("Enter");
    assert_eq!(session.current_phase(), GamePhase::Playing);

    keyboard.key_down(" ");
    assert_eq!(step(&mut session, &mut keyboard), vec![GameEvent::Paused]);
    keyboard.key_up(" ");

    draw_frame(&session, &mut batch);
    assert!(batch.has_text("PAUSED"));

    // Held arrows do nothing while paused
    let paddle_x = session.paddle.rect.left();
    keyboard.key_down("ArrowLeft");
    step(&mut session, &mut keyboard);
    assert_eq!(session.paddle.rect.left(), paddle_x);

    keyboard.key_down(" ");
    assert_eq!(step(&mut session, &mut keyboard), vec![GameEvent::Resumed]);
    assert_eq!(session.paddle.rect.left(), paddle_x - session.paddle.speed);
}

#[test]
fn losing_every_life_then_restarting() {
    let mut session = Session::new(Settings::default(), 99);
    let mut keyboard = Keyboard::new();
    keyboard.key_down("Enter");
    step(&mut session, &mut keyboard);
    keyboard.key_up("Enter");

    // Paddle parked on the right, ball dropped at the far left each life
    keyboard.key_down("ArrowRight");
    let mut lost = 0;
    while !session.phase.is_over() {
        session.ball.rect.pos = glam::IVec2::new(20, 588);
        session.ball.vel = glam::IVec2::new(1, 5);
        for event in step(&mut session, &mut keyboard) {
            if matches!(event, GameEvent::LifeLost { .. }) {
                lost += 1;
            }
        }
        assert!(lost <= 3);
    }
    keyboard.key_up("ArrowRight");

    assert_eq!(lost, 3);
    assert_eq!(session.lives, 0);
    assert_eq!(session.bricks.len(), 80);

    let mut batch = FrameBatch::new(800, 600);
    draw_frame(&session, &mut batch);
    assert!(batch.has_text(&format!("Final Score: {}", session.score)));

    keyboard.key_down("r");
    assert_eq!(step(&mut session, &mut keyboard), vec![GameEvent::Restarted]);
    assert_eq!(session.current_phase(), GamePhase::Playing);
    assert_eq!(session.score, 0);
    assert_eq!(session.lives, 3);
    assert_eq!(session.bricks.len(), 80);
}

#[test]
fn autopilot_clears_the_wall() {
    let mut session = Session::new(Settings::default(), 11);
    let mut pilot = Autopilot::default();
    let mut victory = None;

    for _ in 0..60 * 300 {
        let input = pilot.poll(&session);
        for event in tick(&mut session, &input) {
            if let GameEvent::Victory { score } = event {
                victory = Some(score);
            }
        }
        if !session.phase.is_playing() && session.time_ticks > 0 {
            break;
        }
    }

    assert!(session.phase.is_victory());
    assert_eq!(victory, Some(session.score));
    // Every brick scored exactly once
    assert_eq!(session.score, 10 * (8 + 8 + 5 + 5 + 3 + 3 + 1 + 1));
}

#[test]
fn quit_is_reported_but_not_consumed() {
    let mut session = Session::new(Settings::default(), 1);
    let mut keyboard = Keyboard::new();
    keyboard.key_down("Escape");
    let input = keyboard.poll(&session);
    assert!(input.quit);
    assert!(!input.has_action());
    assert!(tick(&mut session, &input).is_empty());
    assert_eq!(input, TickInput { quit: true, ..Default::default() });
}

#[test]
fn custom_settings_from_json() {
    let json = r#"{
        "field": { "width": 400, "height": 300 },
        "paddle": { "width": 60, "y": 280 },
        "bricks": { "rows": 2, "columns": 4, "left_margin": 10, "points": [2, 1] },
        "initial_lives": 1
    }"#;
    let settings = Settings::from_json(json).unwrap();
    let session = Session::new(settings, 5);

    assert_eq!(session.bricks.len(), 8);
    assert_eq!(session.lives, 1);
    assert_eq!(session.paddle.rect.left(), (400 - 60) / 2);
    assert_eq!(session.ball.rect.center(), glam::IVec2::new(200, 150));
}
