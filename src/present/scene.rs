//! Renderable transforms owned by the presentation layer
//!
//! The renderer reads these; only `apply` writes them, by copying scalar
//! fields out of the latest `GameState`. Sizes are full extents in board
//! units, meant for unit meshes.

use glam::Vec3;

use super::trail::Trail;
use crate::config::PongConfig;
use crate::sim::{GamePhase, GameState};

/// Paddle thickness along board Z
const PADDLE_DEPTH: f32 = 0.1;
/// Trail spheres relative to the ball
const TRAIL_RADIUS_FACTOR: f32 = 0.6;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform {
    pub position: Vec3,
    pub size: Vec3,
}

#[derive(Debug, Clone)]
pub struct SceneHandles {
    pub left_paddle: Transform,
    pub right_paddle: Transform,
    pub ball: Transform,
    pub trail: Trail,
    trail_z: f32,
    /// Diameter of the head trail segment
    trail_diameter: f32,
}

impl SceneHandles {
    pub fn new(config: &PongConfig) -> Self {
        let paddle_size = Vec3::new(config.paddle.width, config.paddle.height, PADDLE_DEPTH);
        let diameter = config.ball.radius * 2.0;
        Self {
            left_paddle: Transform {
                position: Vec3::new(config.left_paddle_x(), 0.0, config.paddle.z),
                size: paddle_size,
            },
            right_paddle: Transform {
                position: Vec3::new(config.right_paddle_x(), 0.0, config.paddle.z),
                size: paddle_size,
            },
            ball: Transform {
                position: Vec3::new(0.0, 0.0, config.ball.z),
                size: Vec3::splat(diameter),
            },
            trail: Trail::new(config.trail.segments),
            trail_z: config.ball.z,
            trail_diameter: diameter * TRAIL_RADIUS_FACTOR,
        }
    }

    /// Copy the new state onto the transforms
    pub fn apply(&mut self, state: &GameState) {
        self.left_paddle.position.y = state.paddles.left_y;
        self.right_paddle.position.y = state.paddles.right_y;

        let ball = state.ball.position;
        self.ball.position.x = ball.x;
        self.ball.position.y = ball.y;

        if state.phase() == GamePhase::Playing {
            self.trail.record(ball);
        } else {
            self.trail.reset(ball);
        }
    }

    /// Trail segments as transforms at the ball's depth, tapering in size
    pub fn trail_transforms(&self) -> impl Iterator<Item = Transform> + '_ {
        let z = self.trail_z;
        let diameter = self.trail_diameter;
        self.trail.segments().map(move |(p, scale)| Transform {
            position: p.extend(z),
            size: Vec3::splat(diameter * scale),
        })
    }
}
