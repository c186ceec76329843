//! Input layer
//!
//! Three samplers (desktop keyboard, touch drag, XR controller) each produce
//! the same normalized `InputSample`; the router picks exactly one per tick.
//! Samplers are plain state machines fed by platform events, so they run and
//! test the same on native and wasm.

pub mod desktop;
pub mod edge;
pub mod placement;
pub mod router;
pub mod touch;
pub mod xr;

use serde::{Deserialize, Serialize};

pub use desktop::{DesktopInput, KeyAction, PlacementActions};
pub use edge::{EdgeDetector, PressLatch};
pub use placement::BoardPlacementMode;
pub use router::{RouterFlags, SourceSamples, pick_input, select_source};
pub use touch::{TouchInput, Viewport};
pub use xr::{BoardPose, Handedness, XrController, XrFrame, XrInput};

/// Edge-detected discrete actions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct DiscreteActions {
    pub calibrate_pressed: bool,
    pub restart_pressed: bool,
}

/// Normalized per-tick input from one source
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct InputSample {
    /// Vertical axis in `[-1, 1]`, up positive; `None` = no input
    pub move_y: Option<f32>,
    pub actions: DiscreteActions,
}

impl InputSample {
    /// Zero axis, no actions
    pub fn neutral() -> Self {
        Self {
            move_y: Some(0.0),
            actions: DiscreteActions::default(),
        }
    }

    /// Axis only, clamped to `[-1, 1]`
    pub fn axis(value: f32) -> Self {
        Self {
            move_y: Some(value.clamp(-1.0, 1.0)),
            actions: DiscreteActions::default(),
        }
    }
}

impl Default for InputSample {
    fn default() -> Self {
        Self::neutral()
    }
}

/// Which sampler produced the routed sample
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InputSource {
    Desktop,
    Touch,
    Xr,
}
