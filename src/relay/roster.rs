//! Server-side player roster
//!
//! Transport-agnostic: every call returns the messages to send and who
//! should receive them. The socket layer just delivers them.

use std::collections::BTreeMap;

use super::protocol::{
    ClientMessage, PlayerId, PlayerMoved, PlayerPose, PlayerUpdate, RelayError, ServerMessage,
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Recipient {
    /// Only this player
    Player(PlayerId),
    /// Every connected player except this one
    AllExcept(PlayerId),
}

#[derive(Debug, Clone, PartialEq)]
pub struct Outbound {
    pub recipient: Recipient,
    pub message: ServerMessage,
}

/// Connected players keyed by id
#[derive(Debug, Default)]
pub struct Roster {
    players: BTreeMap<PlayerId, PlayerPose>,
}

impl Roster {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a connection: full list to the joiner, announce to the rest
    pub fn join(&mut self, id: &str) -> Vec<Outbound> {
        if self.players.contains_key(id) {
            log::warn!("Player {} joined twice, resetting pose", id);
        }
        let pose = PlayerPose::spawn(id);
        self.players.insert(id.to_string(), pose.clone());
        log::info!("Player connected: {} (total {})", id, self.players.len());

        vec![
            Outbound {
                recipient: Recipient::Player(id.to_string()),
                message: ServerMessage::PlayersList(self.players.values().cloned().collect()),
            },
            Outbound {
                recipient: Recipient::AllExcept(id.to_string()),
                message: ServerMessage::PlayerJoined(pose),
            },
        ]
    }

    /// Merge a pose update and relay it to everyone else
    pub fn update(&mut self, id: &str, update: PlayerUpdate) -> Result<Outbound, RelayError> {
        let pose = self
            .players
            .get_mut(id)
            .ok_or_else(|| RelayError::UnknownPlayer(id.to_string()))?;
        pose.merge(&update);
        log::trace!("Player {} moved", id);

        Ok(Outbound {
            recipient: Recipient::AllExcept(id.to_string()),
            message: ServerMessage::PlayerMoved(PlayerMoved {
                id: id.to_string(),
                update,
            }),
        })
    }

    /// Dispatch a decoded client message
    pub fn handle(&mut self, id: &str, message: ClientMessage) -> Result<Vec<Outbound>, RelayError> {
        match message {
            ClientMessage::PlayerUpdate(update) => Ok(vec![self.update(id, update)?]),
        }
    }

    /// Remove a connection; `None` if it was never registered
    pub fn leave(&mut self, id: &str) -> Option<Outbound> {
        self.players.remove(id)?;
        log::info!("Player disconnected: {} (total {})", id, self.players.len());
        Some(Outbound {
            recipient: Recipient::AllExcept(id.to_string()),
            message: ServerMessage::PlayerLeft(id.to_string()),
        })
    }

    pub fn get(&self, id: &str) -> Option<&PlayerPose> {
        self.players.get(id)
    }

    pub fn len(&self) -> usize {
        self.players.len()
    }

    pub fn is_empty(&self) -> bool {
        self.players.is_empty()
    }
}
