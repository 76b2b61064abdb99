//! Value types exchanged through [`crate::context::NetContext`].

/// The networking role a [`crate::context::NetContext`] is operating under.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NetMode {
    /// No peers; packets still loop back locally.
    Standalone,
    /// A non-authoritative client of a `Server`.
    Client,
    /// The authoritative host of a dedicated session.
    Server,
    /// The authoritative peer in a peer-to-peer session.
    P2pHost,
    /// A non-authoritative peer in a peer-to-peer session.
    P2pPeer,
}

/// A wire packet. `size` is advisory; `payload.len()` is authoritative.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Packet {
    /// Application-defined packet kind.
    pub packet_type: u16,
    /// Advisory payload size. Not validated against `payload.len()`.
    pub size: u16,
    /// The scheduler tick this packet was sent during.
    pub tick: u32,
    /// The packet body.
    pub payload: Vec<u8>,
}

/// A connected peer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NetPeer {
    /// Allocated monotonically starting at 1; 0 is reserved for broadcast.
    pub id: u32,
    /// Round-trip time estimate, in seconds. Never populated by the core
    /// itself — a transport collaborator's responsibility.
    pub rtt: f32,
    /// Connection liveness.
    pub connected: bool,
}

/// A per-player input sample. Carried in packet payloads; not interpreted
/// by the core.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct InputFrame {
    /// The tick this input applies to.
    pub tick: u32,
    /// The originating player.
    pub player_id: u32,
    /// Horizontal input axis.
    pub move_x: f32,
    /// Vertical input axis.
    pub move_y: f32,
}

/// An opaque ECS state capture keyed by tick. The byte buffer is the
/// integration seam between [`atlas_ecs`] and the networking layer — the
/// core treats it as opaque.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WorldSnapshot {
    /// The tick this snapshot was captured at.
    pub tick: u32,
    /// Opaque serialized ECS state. Empty unless a caller uses
    /// [`crate::context::NetContext::save_snapshot_with_state`].
    pub ecs_state: Vec<u8>,
}

/// An outbound packet paired with its destination. `dest_peer_id == 0`
/// means broadcast.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueuedPacket {
    /// `0` means broadcast to all peers.
    pub dest_peer_id: u32,
    /// The packet body.
    pub packet: Packet,
}
