//! [`NetContext`] — the mode-switchable messaging substrate with
//! integrated snapshot/rollback hooks.

use std::collections::VecDeque;

use crate::types::{NetMode, NetPeer, Packet, QueuedPacket, WorldSnapshot};

/// Mode-switchable messaging substrate.
///
/// The default transport is loopback: [`NetContext::poll`] moves every
/// queued outbound packet straight to the inbound queue, which makes the
/// core testable headless with zero mocking. A real transport collaborator
/// becomes a drop-in replacement for `poll`/`flush` so long as it preserves
/// the FIFO-across-`poll` ordering contract.
#[derive(Debug)]
pub struct NetContext {
    mode: NetMode,
    peers: Vec<NetPeer>,
    snapshots: Vec<WorldSnapshot>,
    next_peer_id: u32,
    outgoing: VecDeque<QueuedPacket>,
    incoming: VecDeque<Packet>,
}

impl NetContext {
    /// Creates a context in [`NetMode::Standalone`] with no peers or queued
    /// state. Equivalent to `NetContext::new()` then `init(Standalone)`.
    #[must_use]
    pub fn new() -> Self {
        Self {
            mode: NetMode::Standalone,
            peers: Vec::new(),
            snapshots: Vec::new(),
            next_peer_id: 1,
            outgoing: VecDeque::new(),
            incoming: VecDeque::new(),
        }
    }

    /// Resets all state: mode, peers, both queues, the snapshot ring, and
    /// the peer-id counter.
    pub fn init(&mut self, mode: NetMode) {
        self.mode = mode;
        self.peers.clear();
        self.snapshots.clear();
        self.next_peer_id = 1;
        self.outgoing.clear();
        self.incoming.clear();
    }

    /// Clears all state and returns the mode to [`NetMode::Standalone`].
    pub fn shutdown(&mut self) {
        self.peers.clear();
        self.snapshots.clear();
        self.outgoing.clear();
        self.incoming.clear();
        self.mode = NetMode::Standalone;
    }

    /// Drains the outbound queue into the inbound queue in FIFO order
    /// (loopback transport). A real transport collaborator replaces this
    /// with socket reads while preserving the ordering contract: packets
    /// sent since the previous `poll` become receivable after this call.
    pub fn poll(&mut self) {
        while let Some(queued) = self.outgoing.pop_front() {
            self.incoming.push_back(queued.packet);
        }
    }

    /// Enqueues `packet` for delivery to `peer_id`.
    pub fn send(&mut self, peer_id: u32, packet: Packet) {
        self.outgoing.push_back(QueuedPacket {
            dest_peer_id: peer_id,
            packet,
        });
    }

    /// Enqueues `packet` for delivery to every peer (`dest_peer_id == 0`).
    pub fn broadcast(&mut self, packet: Packet) {
        self.outgoing.push_back(QueuedPacket {
            dest_peer_id: 0,
            packet,
        });
    }

    /// Sync point for a real transport. A no-op in the loopback default —
    /// `poll` already performs the transfer.
    pub fn flush(&mut self) {}

    /// Returns the current net mode.
    #[must_use]
    pub fn mode(&self) -> NetMode {
        self.mode
    }

    /// Returns the current peer list.
    #[must_use]
    pub fn peers(&self) -> &[NetPeer] {
        &self.peers
    }

    /// `true` for [`NetMode::Server`] and [`NetMode::P2pHost`]; `false`
    /// otherwise.
    #[must_use]
    pub fn is_authority(&self) -> bool {
        matches!(self.mode, NetMode::Server | NetMode::P2pHost)
    }

    /// Allocates the next peer id, appends a connected peer with `rtt = 0`,
    /// and returns its id.
    pub fn add_peer(&mut self) -> u32 {
        let id = self.next_peer_id;
        self.next_peer_id += 1;
        self.peers.push(NetPeer {
            id,
            rtt: 0.0,
            connected: true,
        });
        id
    }

    /// Removes the peer with id `peer_id`, if present.
    pub fn remove_peer(&mut self, peer_id: u32) {
        self.peers.retain(|p| p.id != peer_id);
    }

    /// Pops the front of the inbound queue, or `None` if empty.
    pub fn receive(&mut self) -> Option<Packet> {
        self.incoming.pop_front()
    }

    /// Appends an empty-payload snapshot keyed by `tick`. The byte payload
    /// is a reserved hook — see [`Self::save_snapshot_with_state`] for a
    /// host that wants to actually persist ECS state.
    pub fn save_snapshot(&mut self, tick: u32) {
        self.snapshots.push(WorldSnapshot {
            tick,
            ecs_state: Vec::new(),
        });
    }

    /// Appends a snapshot keyed by `tick` carrying `ecs_state` as its
    /// opaque payload. Layered on top of the core contract, not part of
    /// it: a host typically supplies `ecs_state` from
    /// `atlas_ecs::snapshot::snapshot`.
    pub fn save_snapshot_with_state(&mut self, tick: u32, ecs_state: Vec<u8>) {
        self.snapshots.push(WorldSnapshot { tick, ecs_state });
    }

    /// Discards snapshots with `tick > target` from the ring. The
    /// last-remaining snapshot becomes the authoritative one.
    pub fn rollback_to(&mut self, target: u32) {
        while self.snapshots.last().is_some_and(|s| s.tick > target) {
            self.snapshots.pop();
        }
    }

    /// Reserved hook for applying queued input frames from `tick` up to the
    /// current tick. The core does not define a replay policy; a host
    /// layering input-frame queues and reconciliation on top of this API
    /// owns that behavior.
    pub fn replay_from(&mut self, _tick: u32) {}

    /// Returns the snapshot ring, oldest first. Exposed for hosts and tests
    /// inspecting rollback state; the core never reads this itself.
    #[must_use]
    pub fn snapshots(&self) -> &[WorldSnapshot] {
        &self.snapshots
    }
}

impl Default for NetContext {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn loopback_fifo_after_poll() {
        let mut net = NetContext::new();
        net.init(NetMode::Server);
        let peer = net.add_peer();

        net.send(
            peer,
            Packet {
                packet_type: 42,
                size: 4,
                tick: 10,
                payload: vec![1, 2, 3, 4],
            },
        );
        assert!(net.receive().is_none());

        net.poll();
        let received = net.receive().unwrap();
        assert_eq!(received.packet_type, 42);
        assert_eq!(received.tick, 10);
        assert_eq!(received.payload, vec![1, 2, 3, 4]);
        assert!(net.receive().is_none());
    }

    #[test]
    fn broadcast_produces_one_inbound_packet_in_loopback() {
        let mut net = NetContext::new();
        net.init(NetMode::Server);
        net.broadcast(Packet::default());
        net.poll();
        assert!(net.receive().is_some());
        assert!(net.receive().is_none());
    }

    #[test]
    fn send_order_is_preserved_across_poll() {
        let mut net = NetContext::new();
        net.init(NetMode::Standalone);
        for tick in 0..5 {
            net.send(0, Packet { tick, ..Packet::default() });
        }
        net.poll();
        let order: Vec<u32> = std::iter::from_fn(|| net.receive()).map(|p| p.tick).collect();
        assert_eq!(order, vec![0, 1, 2, 3, 4]);
    }

    #[test]
    fn authority_table_matches_spec() {
        let cases = [
            (NetMode::Standalone, false),
            (NetMode::Client, false),
            (NetMode::Server, true),
            (NetMode::P2pHost, true),
            (NetMode::P2pPeer, false),
        ];
        for (mode, expected) in cases {
            let mut net = NetContext::new();
            net.init(mode);
            assert_eq!(net.is_authority(), expected, "mode {mode:?}");
        }
    }

    #[test]
    fn shutdown_resets_to_standalone_with_empty_state() {
        let mut net = NetContext::new();
        net.init(NetMode::Server);
        net.add_peer();
        net.send(0, Packet::default());
        net.shutdown();
        assert_eq!(net.mode(), NetMode::Standalone);
        assert!(net.peers().is_empty());
        net.poll();
        assert!(net.receive().is_none());
    }

    #[test]
    fn rollback_discards_snapshots_past_target() {
        let mut net = NetContext::new();
        net.save_snapshot(1);
        net.save_snapshot(2);
        net.save_snapshot(3);
        net.rollback_to(1);
        assert_eq!(net.snapshots().len(), 1);
        assert_eq!(net.snapshots()[0].tick, 1);
    }

    #[test]
    fn save_snapshot_default_payload_is_empty() {
        let mut net = NetContext::new();
        net.save_snapshot(5);
        assert!(net.snapshots()[0].ecs_state.is_empty());
    }

    #[test]
    fn remove_peer_drops_it_from_the_list() {
        let mut net = NetContext::new();
        let p1 = net.add_peer();
        let _p2 = net.add_peer();
        net.remove_peer(p1);
        assert_eq!(net.peers().len(), 1);
        assert!(net.peers().iter().all(|p| p.id != p1));
    }
}
