//! Game phase state machine
//!
//! Owns the current presentation phase and the only legal ways to change it.
//! Simulation runs only while the phase is [`GamePhase::Playing`].

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Current phase of the game
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GamePhase {
    /// Title screen, waiting for the start action
    #[default]
    StartScreen,
    /// Active gameplay
    Playing,
    /// Gameplay frozen, overlay shown
    Paused,
    /// All lives lost
    GameOver,
    /// Every brick destroyed
    Victory,
}

impl GamePhase {
    pub const ALL: [GamePhase; 5] = [
        GamePhase::StartScreen,
        GamePhase::Playing,
        GamePhase::Paused,
        GamePhase::GameOver,
        GamePhase::Victory,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            GamePhase::StartScreen => "start_screen",
            GamePhase::Playing => "playing",
            GamePhase::Paused => "paused",
            GamePhase::GameOver => "game_over",
            GamePhase::Victory => "victory",
        }
    }
}

impl fmt::Display for GamePhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for GamePhase {
    type Err = PhaseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        GamePhase::ALL
            .into_iter()
            .find(|phase| phase.as_str() == s)
            .ok_or_else(|| PhaseError::InvalidValue(s.to_string()))
    }
}

impl TryFrom<u8> for GamePhase {
    type Error = PhaseError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        GamePhase::ALL
            .get(value as usize)
            .copied()
            .ok_or_else(|| PhaseError::InvalidValue(value.to_string()))
    }
}

/// Things that can move the machine between phases
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PhaseAction {
    /// Leave the start screen
    Start,
    /// Pause while playing, resume while paused
    TogglePause,
    /// Last life lost
    LivesExhausted,
    /// Active brick set became empty
    BricksCleared,
    /// Begin a fresh session after game over or victory
    Restart,
}

impl fmt::Display for PhaseAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            PhaseAction::Start => "start",
            PhaseAction::TogglePause => "toggle pause",
            PhaseAction::LivesExhausted => "lives exhausted",
            PhaseAction::BricksCleared => "bricks cleared",
            PhaseAction::Restart => "restart",
        };
        f.write_str(name)
    }
}

/// Rejected phase changes
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PhaseError {
    /// The action is not legal from the current phase
    #[error("cannot {action} from {from}")]
    InvalidTransition { from: GamePhase, action: PhaseAction },

    /// The value does not name one of the five phases
    #[error("invalid game phase: {0:?}")]
    InvalidValue(String),
}

/// Holds the current phase and applies transitions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PhaseMachine {
    current: GamePhase,
}

impl PhaseMachine {
    /// A machine sitting on the start screen
    pub fn new() -> Self {
        Self::default()
    }

    pub fn current(&self) -> GamePhase {
        self.current
    }

    /// Target phase for `action`, without changing anything
    pub fn next(&self, action: PhaseAction) -> Result<GamePhase, PhaseError> {
        use GamePhase::*;
        use PhaseAction::*;

        match (self.current, action) {
            (StartScreen, Start) => Ok(Playing),
            (Playing, TogglePause) => Ok(Paused),
            (Paused, TogglePause) => Ok(Playing),
            (Playing, LivesExhausted) => Ok(GameOver),
            (Playing, BricksCleared) => Ok(Victory),
            (GameOver | Victory, Restart) => Ok(Playing),
            (from, action) => Err(PhaseError::InvalidTransition { from, action }),
        }
    }

    /// Apply `action`. On error the phase is left untouched.
    pub fn apply(&mut self, action: PhaseAction) -> Result<GamePhase, PhaseError> {
        let next = self.next(action)?;
        log::info!("Phase {} -> {} ({})", self.current, next, action);
        self.current = next;
        Ok(next)
    }

    pub fn start(&mut self) -> Result<GamePhase, PhaseError> {
        self.apply(PhaseAction::Start)
    }

    pub fn toggle_pause(&mut self) -> Result<GamePhase, PhaseError> {
        self.apply(PhaseAction::TogglePause)
    }

    pub fn restart(&mut self) -> Result<GamePhase, PhaseError> {
        self.apply(PhaseAction::Restart)
    }

    /// Jump to a phase given by name, bypassing transition rules.
    ///
    /// Only names of the five phases are accepted; anything else is rejected
    /// and the current phase is kept.
    pub fn set_named(&mut self, name: &str) -> Result<GamePhase, PhaseError> {
        let phase = name.parse::<GamePhase>()?;
        self.current = phase;
        Ok(phase)
    }

    pub fn is_playing(&self) -> bool {
        self.current == GamePhase::Playing
    }

    pub fn is_paused(&self) -> bool {
        self.current == GamePhase::Paused
    }

    pub fn is_start_screen(&self) -> bool {
        self.current == GamePhase::StartScreen
    }

    pub fn is_over(&self) -> bool {
        self.current == GamePhase::GameOver
    }

    pub fn is_victory(&self) -> bool {
        self.current == GamePhase::Victory
    }

    pub fn can_restart(&self) -> bool {
        matches!(self.current, GamePhase::GameOver | GamePhase::Victory)
    }

    pub fn can_pause(&self) -> bool {
        self.is_playing()
    }

    pub fn can_resume(&self) -> bool {
        self.is_paused()
    }
}
