//! Game state and core simulation types
//!
//! Plain data only: no render handles, no identity. The step engine
//! replaces the whole `GameState` every tick.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::config::PongConfig;

/// Current phase of a match
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum GamePhase {
    /// Fresh app start, promoted to `Playing` on the first tick
    NotStarted,
    /// Ball in motion
    Playing,
    /// Short pause after a point, ball already re-served
    RoundOver,
    /// A side reached the win score; waits for restart
    GameOver,
}

/// Board side. The left paddle is the AI, the right paddle the player.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Side {
    Left,
    Right,
}

impl Side {
    /// Who controls the paddle on this side
    pub fn label(self) -> &'static str {
        match self {
            Side::Left => "AI",
            Side::Right => "Player",
        }
    }
}

/// Points per side (`left` = AI, `right` = player)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Score {
    pub left: u32,
    pub right: u32,
}

impl Score {
    pub fn get(&self, side: Side) -> u32 {
        match side {
            Side::Left => self.left,
            Side::Right => self.right,
        }
    }

    /// Copy with one point added to `side`
    pub fn with_point(self, side: Side) -> Self {
        match side {
            Side::Left => Self {
                left: self.left + 1,
                ..self
            },
            Side::Right => Self {
                right: self.right + 1,
                ..self
            },
        }
    }
}

/// Paddle centers on the Y axis
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Paddles {
    pub left_y: f32,
    pub right_y: f32,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BallState {
    pub position: Vec2,
    /// Unit vector once the engine has touched it
    pub direction: Vec2,
    pub speed: f32,
}

impl BallState {
    /// Ball at center with the configured serve
    pub fn serve(config: &PongConfig) -> Self {
        Self {
            position: Vec2::ZERO,
            direction: config
                .ball
                .initial_direction
                .try_normalize()
                .unwrap_or(Vec2::X),
            speed: config.ball.initial_speed,
        }
    }
}

/// AI aiming error
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct AiState {
    pub error_offset_y: f32,
    /// Counts down; the offset is re-rolled when it reaches 0
    pub next_error_change_in_sec: f32,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RoundState {
    pub phase: GamePhase,
    /// Only meaningful in `RoundOver`
    pub round_over_timer_ms: f32,
}

impl RoundState {
    pub fn in_phase(phase: GamePhase) -> Self {
        Self {
            phase,
            round_over_timer_ms: 0.0,
        }
    }
}

/// Complete game state (deterministic, serializable)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GameState {
    pub score: Score,
    pub paddles: Paddles,
    pub ball: BallState,
    pub ai: AiState,
    pub round: RoundState,
}

impl GameState {
    /// State at app start
    pub fn new(config: &PongConfig) -> Self {
        Self {
            score: Score::default(),
            paddles: Paddles::default(),
            ball: BallState::serve(config),
            ai: AiState::default(),
            round: RoundState::in_phase(GamePhase::NotStarted),
        }
    }

    /// Fresh match: scores zeroed, paddles centered, already playing
    pub fn new_match(config: &PongConfig) -> Self {
        Self {
            round: RoundState::in_phase(GamePhase::Playing),
            ..Self::new(config)
        }
    }

    /// Re-serve after a point: keeps score and paddles, resets ball and AI,
    /// and starts the round-over pause
    pub fn next_round(&self, config: &PongConfig) -> Self {
        Self {
            ball: BallState::serve(config),
            ai: AiState::default(),
            round: RoundState {
                phase: GamePhase::RoundOver,
                round_over_timer_ms: config.scoring.round_reset_delay_ms,
            },
            ..*self
        }
    }

    pub fn phase(&self) -> GamePhase {
        self.round.phase
    }

    /// Side that reached the win score, if any
    pub fn winner(&self, config: &PongConfig) -> Option<Side> {
        let win = config.scoring.win_score;
        if self.score.left >= win {
            Some(Side::Left)
        } else if self.score.right >= win {
            Some(Side::Right)
        } else {
            None
        }
    }
}

/// Clamp a paddle center to the field
#[inline]
pub fn clamp_paddle_y(y: f32, config: &PongConfig) -> f32 {
    let limit = config.paddle_limit();
    y.clamp(-limit, limit)
}
