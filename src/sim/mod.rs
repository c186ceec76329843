//! Deterministic simulation module
//!
//! All gameplay rules live here. This module must stay pure:
//! - State is plain data, replaced wholesale every tick
//! - Randomness only through an injected `RandomSource`
//! - No rendering, audio or platform dependencies

pub mod rng;
pub mod state;
pub mod step;

#[cfg(test)]
mod properties;

pub use rng::{FixedUnit, GameRng, RandomSource};
pub use state::{
    AiState, BallState, GamePhase, GameState, Paddles, RoundState, Score, Side, clamp_paddle_y,
};
pub use step::{PongEvent, SoundName, StepInput, StepResult, step_pong};
