//! Board placement mode
//!
//! While enabled, holding the grab button on the primary XR controller drags
//! the board root along with the controller. Position and yaw offsets are
//! captured at the moment of the grab so the board keeps its relative pose
//! instead of snapping onto the hand. The result can be printed in config
//! form and pasted into the `placement` section.

use glam::{Quat, Vec3};

use super::xr::{BoardPose, XrFrame};
use crate::config::PlacementConfig;

/// Round to millimetres / milliradians for config output
fn round3(v: f32) -> f32 {
    (v * 1000.0).round() / 1000.0
}

#[derive(Debug, Clone)]
pub struct BoardPlacementMode {
    enabled: bool,
    grabbing: bool,
    grab_button: usize,
    position: Vec3,
    rotation_y: f32,
    scale: f32,
    /// Board position minus controller position at grab time
    grab_offset: Vec3,
    /// Board yaw minus controller yaw at grab time
    yaw_offset: f32,
}

impl BoardPlacementMode {
    pub fn new(placement: &PlacementConfig, grab_button: usize) -> Self {
        Self {
            enabled: false,
            grabbing: false,
            grab_button,
            position: placement.position,
            rotation_y: placement.rotation_y,
            scale: placement.scale,
            grab_offset: Vec3::ZERO,
            yaw_offset: 0.0,
        }
    }

    /// Flip the mode; returns the new state. Turning off drops any grab.
    pub fn toggle(&mut self) -> bool {
        self.enabled = !self.enabled;
        self.grabbing = false;
        log::info!(
            "Board placement {}",
            if self.enabled { "enabled" } else { "disabled" }
        );
        self.enabled
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn is_grabbing(&self) -> bool {
        self.grabbing
    }

    /// Track the controller for one frame.
    ///
    /// Returns true if the board moved.
    pub fn update(&mut self, frame: Option<&XrFrame>) -> bool {
        if !self.enabled {
            return false;
        }
        let Some(controller) = frame
            .filter(|f| f.presenting)
            .and_then(XrFrame::primary_controller)
        else {
            return false;
        };

        let held = controller.pressed(self.grab_button);
        let yaw = controller.yaw();
        if held && !self.grabbing {
            self.grabbing = true;
            self.grab_offset = self.position - controller.world_position;
            self.yaw_offset = self.rotation_y - yaw;
            log::debug!("Board grabbed");
        } else if !held && self.grabbing {
            self.grabbing = false;
            log::info!(
                "Board released at {:?}, yaw {:.3}",
                self.position,
                self.rotation_y
            );
        }

        if !self.grabbing {
            return false;
        }
        self.position = controller.world_position + self.grab_offset;
        self.rotation_y = yaw + self.yaw_offset;
        true
    }

    pub fn board_pose(&self) -> BoardPose {
        BoardPose::new(
            self.position,
            Quat::from_rotation_y(self.rotation_y),
            self.scale,
        )
    }

    /// Current placement rounded to three decimals
    pub fn placement_for_config(&self) -> PlacementConfig {
        PlacementConfig {
            position: Vec3::new(
                round3(self.position.x),
                round3(self.position.y),
                round3(self.position.z),
            ),
            rotation_y: round3(self.rotation_y),
            scale: round3(self.scale),
        }
    }
}
