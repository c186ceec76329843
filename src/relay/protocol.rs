//! Pose relay wire messages
//!
//! Every message is a JSON object `{ "event": <name>, "data": <payload> }`.

use glam::{Quat, Vec3};
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub type PlayerId = String;

#[derive(Debug, Error)]
pub enum RelayError {
    #[error("failed to decode relay message: {0}")]
    Decode(#[source] serde_json::Error),
    #[error("failed to encode relay message: {0}")]
    Encode(#[source] serde_json::Error),
    #[error("unknown player: {0}")]
    UnknownPlayer(PlayerId),
}

/// `{x, y, z}` on the wire
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WireVec3 {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl From<Vec3> for WireVec3 {
    fn from(v: Vec3) -> Self {
        Self {
            x: v.x,
            y: v.y,
            z: v.z,
        }
    }
}

impl From<WireVec3> for Vec3 {
    fn from(v: WireVec3) -> Self {
        Vec3::new(v.x, v.y, v.z)
    }
}

/// `{x, y, z, w}` on the wire
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WireQuat {
    pub x: f32,
    pub y: f32,
    pub z: f32,
    pub w: f32,
}

impl From<Quat> for WireQuat {
    fn from(q: Quat) -> Self {
        Self {
            x: q.x,
            y: q.y,
            z: q.z,
            w: q.w,
        }
    }
}

impl From<WireQuat> for Quat {
    fn from(q: WireQuat) -> Self {
        Quat::from_xyzw(q.x, q.y, q.z, q.w)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ControllerPose {
    pub position: WireVec3,
    pub rotation: WireQuat,
}

/// Full pose of one connected player
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerPose {
    pub id: PlayerId,
    pub position: WireVec3,
    pub rotation: WireQuat,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub controller: Option<ControllerPose>,
}

impl PlayerPose {
    /// Pose a player starts with before their first update
    pub fn spawn(id: impl Into<PlayerId>) -> Self {
        Self {
            id: id.into(),
            position: Vec3::new(0.0, 1.6, 2.0).into(),
            rotation: Quat::IDENTITY.into(),
            controller: Some(ControllerPose {
                position: Vec3::new(0.15, 1.4, -0.4).into(),
                rotation: Quat::IDENTITY.into(),
            }),
        }
    }

    /// Overwrite the fields present in `update`
    pub fn merge(&mut self, update: &PlayerUpdate) {
        if let Some(position) = update.position {
            self.position = position;
        }
        if let Some(rotation) = update.rotation {
            self.rotation = rotation;
        }
        if let Some(controller) = update.controller {
            self.controller = Some(controller);
        }
    }
}

/// Partial pose; absent fields keep their previous value
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct PlayerUpdate {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub position: Option<WireVec3>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rotation: Option<WireQuat>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub controller: Option<ControllerPose>,
}

impl PlayerUpdate {
    pub fn head(position: Vec3) -> Self {
        Self {
            position: Some(position.into()),
            ..Default::default()
        }
    }

    pub fn controller(position: Vec3, rotation: Quat) -> Self {
        Self {
            controller: Some(ControllerPose {
                position: position.into(),
                rotation: rotation.into(),
            }),
            ..Default::default()
        }
    }
}

/// A `PlayerUpdate` tagged with its sender
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerMoved {
    pub id: PlayerId,
    #[serde(flatten)]
    pub update: PlayerUpdate,
}

/// Client -> server
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "event", content = "data", rename_all = "kebab-case")]
pub enum ClientMessage {
    PlayerUpdate(PlayerUpdate),
}

/// Server -> client
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "event", content = "data", rename_all = "kebab-case")]
pub enum ServerMessage {
    PlayersList(Vec<PlayerPose>),
    PlayerJoined(PlayerPose),
    PlayerLeft(PlayerId),
    PlayerMoved(PlayerMoved),
}

impl ClientMessage {
    pub fn to_json(&self) -> Result<String, RelayError> {
        serde_json::to_string(self).map_err(RelayError::Encode)
    }

    pub fn from_json(text: &str) -> Result<Self, RelayError> {
        serde_json::from_str(text).map_err(RelayError::Decode)
    }
}

impl ServerMessage {
    pub fn to_json(&self) -> Result<String, RelayError> {
        serde_json::to_string(self).map_err(RelayError::Encode)
    }

    pub fn from_json(text: &str) -> Result<Self, RelayError> {
        serde_json::from_str(text).map_err(RelayError::Decode)
    }
}
