//! Multiplayer pose relay
//!
//! Players share head and controller poses through a relay server. This
//! module holds the wire format, the server roster and the client's view of
//! remote players; binding them to a socket is left to the caller.

pub mod client;
pub mod protocol;
pub mod roster;

pub use client::{RemotePlayers, SendThrottle};
pub use protocol::{
    ClientMessage, ControllerPose, PlayerId, PlayerMoved, PlayerPose, PlayerUpdate, RelayError,
    ServerMessage, WireQuat, WireVec3,
};
pub use roster::{Outbound, Recipient, Roster};
