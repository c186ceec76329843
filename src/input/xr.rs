//! XR controller sampler
//!
//! Reads the right-hand controller (or the first one if handedness is not
//! reported), projects its world position into board-local space and turns
//! the resulting desired paddle Y into an axis value. Gamepad buttons are
//! edge-detected per tick.

use glam::{Affine3A, EulerRot, Quat, Vec3};
use serde::{Deserialize, Serialize};

use super::edge::EdgeDetector;
use super::{DiscreteActions, InputSample};
use crate::config::{PlacementConfig, XrConfig};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Handedness {
    Left,
    Right,
    #[default]
    None,
}

/// Pose and button state of one tracked controller
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct XrController {
    #[serde(default)]
    pub handedness: Handedness,
    pub world_position: Vec3,
    #[serde(default)]
    pub world_rotation: Quat,
    /// Pressed flag per gamepad button index
    #[serde(default)]
    pub buttons: Vec<bool>,
}

impl XrController {
    pub fn pressed(&self, index: usize) -> bool {
        self.buttons.get(index).copied().unwrap_or(false)
    }

    /// Heading around world +Y, in radians
    pub fn yaw(&self) -> f32 {
        self.world_rotation.to_euler(EulerRot::YXZ).0
    }
}

/// What the XR runtime reported this frame
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct XrFrame {
    pub presenting: bool,
    #[serde(default)]
    pub controllers: Vec<XrController>,
}

impl XrFrame {
    /// Right-hand controller, else the first available
    pub fn primary_controller(&self) -> Option<&XrController> {
        self.controllers
            .iter()
            .rev()
            .find(|c| c.handedness == Handedness::Right)
            .or_else(|| self.controllers.first())
    }
}

/// World transform of the board root
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoardPose {
    world_from_board: Affine3A,
    board_from_world: Affine3A,
}

impl BoardPose {
    pub fn new(translation: Vec3, rotation: Quat, scale: f32) -> Self {
        Self::from_affine(Affine3A::from_scale_rotation_translation(
            Vec3::splat(scale),
            rotation,
            translation,
        ))
    }

    pub fn from_affine(world_from_board: Affine3A) -> Self {
        Self {
            world_from_board,
            board_from_world: world_from_board.inverse(),
        }
    }

    /// Yaw-only pose as stored in the config
    pub fn from_placement(placement: &PlacementConfig) -> Self {
        Self::new(
            placement.position,
            Quat::from_rotation_y(placement.rotation_y),
            placement.scale,
        )
    }

    pub fn identity() -> Self {
        Self::from_affine(Affine3A::IDENTITY)
    }

    pub fn world_to_local(&self, world: Vec3) -> Vec3 {
        self.board_from_world.transform_point3(world)
    }

    pub fn local_to_world(&self, local: Vec3) -> Vec3 {
        self.world_from_board.transform_point3(local)
    }
}

impl Default for BoardPose {
    fn default() -> Self {
        Self::identity()
    }
}

#[derive(Debug, Clone)]
pub struct XrInput {
    vr_y_scale: f32,
    soft_limit: f32,
    calibrate_button: usize,
    restart_button: usize,
    /// Added to the scaled local Y; set by calibration
    center_offset: f32,
    calibrate_edge: EdgeDetector,
    restart_edge: EdgeDetector,
}

impl XrInput {
    pub fn new(config: &XrConfig) -> Self {
        Self {
            vr_y_scale: config.vr_y_scale,
            soft_limit: config.axis_soft_limit,
            calibrate_button: config.calibrate_button,
            restart_button: config.restart_button,
            center_offset: 0.0,
            calibrate_edge: EdgeDetector::default(),
            restart_edge: EdgeDetector::default(),
        }
    }

    pub fn center_offset(&self) -> f32 {
        self.center_offset
    }

    fn scaled_local_y(&self, controller: &XrController, board: &BoardPose) -> f32 {
        board.world_to_local(controller.world_position).y * self.vr_y_scale
    }

    /// Absolute paddle Y the controller points at
    pub fn desired_y(&self, controller: &XrController, board: &BoardPose) -> f32 {
        self.scaled_local_y(controller, board) + self.center_offset
    }

    /// Per-tick sample; neutral when not presenting or no controller
    pub fn sample(&mut self, frame: Option<&XrFrame>, board: &BoardPose) -> InputSample {
        let Some(frame) = frame.filter(|f| f.presenting) else {
            return InputSample::neutral();
        };
        let Some(controller) = frame.primary_controller() else {
            return InputSample::neutral();
        };

        let desired_y = self.desired_y(controller, board);
        let axis = (desired_y / self.soft_limit).clamp(-1.0, 1.0);

        let calibrate_pressed = self
            .calibrate_edge
            .update(controller.pressed(self.calibrate_button));
        let restart_pressed = self
            .restart_edge
            .update(controller.pressed(self.restart_button));

        InputSample {
            move_y: Some(axis),
            actions: DiscreteActions {
                calibrate_pressed,
                restart_pressed,
            },
        }
    }

    /// Make the controller's current height map to board Y = 0.
    ///
    /// Returns false (and keeps the old offset) if no controller is tracked.
    pub fn calibrate_at_current_pose(&mut self, frame: Option<&XrFrame>, board: &BoardPose) -> bool {
        let Some(controller) = frame.and_then(XrFrame::primary_controller) else {
            log::warn!("XR calibration skipped: no controller");
            return false;
        };
        self.center_offset = -self.scaled_local_y(controller, board);
        log::info!("XR calibrated, center offset {:.3}", self.center_offset);
        true
    }
}
