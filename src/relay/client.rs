//! Client-side view of the other players, plus send rate limiting

use std::collections::BTreeMap;

use super::protocol::{PlayerId, PlayerPose, ServerMessage};

/// Head pose send interval
pub const HEAD_POSE_INTERVAL_MS: f64 = 200.0;
/// Controller pose send interval
pub const CONTROLLER_INTERVAL_MS: f64 = 100.0;

/// Everyone connected except us
#[derive(Debug, Default)]
pub struct RemotePlayers {
    own_id: Option<PlayerId>,
    players: BTreeMap<PlayerId, PlayerPose>,
}

impl RemotePlayers {
    pub fn new() -> Self {
        Self::default()
    }

    /// Call on connect with the id the server assigned
    pub fn set_own_id(&mut self, id: impl Into<PlayerId>) {
        self.own_id = Some(id.into());
    }

    fn is_own(&self, id: &str) -> bool {
        self.own_id.as_deref() == Some(id)
    }

    pub fn apply(&mut self, message: ServerMessage) {
        match message {
            ServerMessage::PlayersList(list) => {
                self.players = list
                    .into_iter()
                    .filter(|p| !self.is_own(&p.id))
                    .map(|p| (p.id.clone(), p))
                    .collect();
                log::debug!("Received players list ({} remote)", self.players.len());
            }
            ServerMessage::PlayerJoined(pose) => {
                if !self.is_own(&pose.id) {
                    log::debug!("Player joined: {}", pose.id);
                    self.players.insert(pose.id.clone(), pose);
                }
            }
            ServerMessage::PlayerLeft(id) => {
                if self.players.remove(&id).is_some() {
                    log::debug!("Player left: {}", id);
                }
            }
            ServerMessage::PlayerMoved(moved) => {
                if let Some(pose) = self.players.get_mut(&moved.id) {
                    pose.merge(&moved.update);
                }
            }
        }
    }

    /// Forget everyone (on disconnect)
    pub fn clear(&mut self) {
        self.players.clear();
        self.own_id = None;
    }

    pub fn get(&self, id: &str) -> Option<&PlayerPose> {
        self.players.get(id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &PlayerPose> {
        self.players.values()
    }

    pub fn len(&self) -> usize {
        self.players.len()
    }

    pub fn is_empty(&self) -> bool {
        self.players.is_empty()
    }
}

/// Lets a send through at most once per interval
#[derive(Debug, Clone)]
pub struct SendThrottle {
    interval_ms: f64,
    last_ms: Option<f64>,
}

impl SendThrottle {
    pub fn new(interval_ms: f64) -> Self {
        Self {
            interval_ms,
            last_ms: None,
        }
    }

    pub fn head_pose() -> Self {
        Self::new(HEAD_POSE_INTERVAL_MS)
    }

    pub fn controller() -> Self {
        Self::new(CONTROLLER_INTERVAL_MS)
    }

    /// True if a send is due at `now_ms`; a send restarts the window
    pub fn ready(&mut self, now_ms: f64) -> bool {
        match self.last_ms {
            Some(last) if now_ms - last <= self.interval_ms => false,
            _ => {
                self.last_ms = Some(now_ms);
                true
            }
        }
    }
}
