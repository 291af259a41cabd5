//! Phase-to-screen dispatch
//!
//! Every phase maps to exactly one [`DrawPlan`]; [`draw_frame`] executes it as
//! explicit passes: clear, entities, HUD, overlay.

use glam::Vec2;

use super::vertex::colors;
use super::{Align, RenderBackend, TextSize, TextStyle};
use crate::sim::{GamePhase, Session};

/// Text drawn over (or instead of) the playfield
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Overlay {
    /// Title and instructions
    Title,
    /// Small "press space to pause" hint
    PauseHint,
    /// Pause banner and resume instructions
    PauseMenu,
    /// Game over banner with final score
    GameOver,
    /// Victory banner with final score
    Victory,
}

/// What a frame shows
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DrawPlan {
    /// Bricks, paddle and ball
    pub entities: bool,
    /// Score and lives
    pub hud: bool,
    pub overlay: Overlay,
}

/// The draw plan for a phase
pub fn plan_for(phase: GamePhase) -> DrawPlan {
    match phase {
        GamePhase::StartScreen => DrawPlan {
            entities: false,
            hud: false,
            overlay: Overlay::Title,
        },
        GamePhase::Playing => DrawPlan {
            entities: true,
            hud: true,
            overlay: Overlay::PauseHint,
        },
        GamePhase::Paused => DrawPlan {
            entities: true,
            hud: true,
            overlay: Overlay::PauseMenu,
        },
        GamePhase::GameOver => DrawPlan {
            entities: false,
            hud: false,
            overlay: Overlay::GameOver,
        },
        GamePhase::Victory => DrawPlan {
            entities: false,
            hud: false,
            overlay: Overlay::Victory,
        },
    }
}

const HUD_MARGIN: f32 = 10.0;
/// Lives readout starts this far from the right edge
const LIVES_OFFSET: f32 = 150.0;

fn style(size: TextSize, align: Align) -> TextStyle {
    TextStyle {
        size,
        color: colors::TEXT,
        align,
    }
}

/// Draw one frame of `session` into `backend`
pub fn draw_frame<B: RenderBackend>(session: &Session, backend: &mut B) {
    let plan = plan_for(session.current_phase());

    backend.clear(colors::BACKGROUND);
    if plan.entities {
        draw_entities(session, backend);
    }
    if plan.hud {
        draw_hud(session, backend);
    }
    draw_overlay(session, plan.overlay, backend);
}

fn draw_entities<B: RenderBackend>(session: &Session, backend: &mut B) {
    for brick in &session.bricks {
        backend.fill_rect(brick.rect, brick.color);
    }

    backend.fill_rect(session.paddle.rect, colors::PADDLE);

    let ball = &session.ball.rect;
    let center = ball.pos.as_vec2() + ball.size.as_vec2() / 2.0;
    backend.fill_circle(center, ball.width() as f32 / 2.0, colors::BALL);
}

fn draw_hud<B: RenderBackend>(session: &Session, backend: &mut B) {
    let (width, _) = backend.screen_size();
    backend.draw_text(
        &format!("Score: {}", session.score),
        Vec2::new(HUD_MARGIN, HUD_MARGIN),
        style(TextSize::Body, Align::Left),
    );
    backend.draw_text(
        &format!("Lives: {}", session.lives),
        Vec2::new(width as f32 - LIVES_OFFSET, HUD_MARGIN),
        style(TextSize::Body, Align::Left),
    );
}

fn draw_overlay<B: RenderBackend>(session: &Session, overlay: Overlay, backend: &mut B) {
    let (width, height) = backend.screen_size();
    let center_x = width as f32 / 2.0;
    let third = height as f32 / 3.0;
    let title = style(TextSize::Title, Align::Center);
    let body = style(TextSize::Body, Align::Center);

    match overlay {
        Overlay::Title => {
            backend.draw_text("BREAKOUT", Vec2::new(center_x, third - 50.0), title);
            backend.draw_text("Press ENTER to Play", Vec2::new(center_x, third + 50.0), body);
            backend.draw_text(
                "Use LEFT and RIGHT arrows to move paddle",
                Vec2::new(center_x, third + 100.0),
                body,
            );
        }
        Overlay::PauseHint => {
            backend.draw_text(
                "Press SPACE to Pause",
                Vec2::new(width as f32 - HUD_MARGIN, height as f32 - 30.0),
                TextStyle {
                    size: TextSize::Hint,
                    color: colors::HINT,
                    align: Align::Right,
                },
            );
        }
        Overlay::PauseMenu => {
            backend.draw_text("PAUSED", Vec2::new(center_x, third), title);
            backend.draw_text("Press SPACE to Resume", Vec2::new(center_x, third + 80.0), body);
        }
        Overlay::GameOver | Overlay::Victory => {
            let banner = if overlay == Overlay::GameOver {
                "GAME OVER"
            } else {
                "YOU WIN!"
            };
            backend.draw_text(banner, Vec2::new(center_x, third), title);
            backend.draw_text(
                &format!("Final Score: {}", session.score),
                Vec2::new(center_x, third + 50.0),
                body,
            );
            backend.draw_text("Press R to restart", Vec2::new(center_x, third + 100.0), body);
        }
    }
}
