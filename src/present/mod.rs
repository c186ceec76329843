//! Presentation adapter
//!
//! Everything between a fresh `GameState` and the screen/speakers that is
//! still pure logic: transform copies, the ball trail, HUD text timing and
//! the sound cue table. Actual drawing and audio output are external.

pub mod hud;
pub mod scene;
pub mod sound;
pub mod trail;

pub use hud::Hud;
pub use scene::{SceneHandles, Transform};
pub use sound::{SoundSink, Tone};
pub use trail::Trail;
