//! Cyber Pong - Pong on a floating board, playable on desktop, touch and XR
//!
//! Core modules:
//! - `config`: Every tunable number, loaded once
//! - `sim`: Deterministic game state and the per-tick step engine
//! - `input`: Desktop, touch and XR samplers plus the router
//! - `present`: HUD model, ball trail, scene transforms, sound cues
//! - `session`: Frame driver tying the above together
//! - `relay`: Multiplayer pose relay protocol and roster
//! - `platform`: Browser event wiring

pub mod config;
pub mod input;
pub mod platform;
pub mod present;
pub mod relay;
pub mod session;
pub mod sim;

#[cfg(target_arch = "wasm32")]
pub mod audio;

pub use config::{ConfigError, PongConfig};
pub use session::{FrameReport, PongSession};
