//! # atlas_net
//!
//! [`NetContext`] — the mode-switchable, loopback-by-default messaging
//! substrate with integrated snapshot/rollback hooks, plus the wire value
//! types it moves.

pub mod context;
pub mod types;

pub use context::NetContext;
pub use types::{InputFrame, NetMode, NetPeer, Packet, QueuedPacket, WorldSnapshot};
