use std::collections::HashSet;

use axum::extract::ws::Message as WsMessage;
use tokio::sync::mpsc::UnboundedSender;

pub type PeerId = String;

/// Represents a connected WebSocket peer in the signaling hub.
///
/// Each peer is uniquely identified by an `id` and has a channel (`sender`)
/// for enqueueing outbound frames; its outbound pump drains that channel onto
/// the wire. `topics` is the set of topic names the peer has joined, kept
/// symmetric with the hub's topic member sets.
#[derive(Debug)]
pub struct Peer {
    /// Unique identifier for the peer (UUID).
    pub id: PeerId,

    /// Channel to enqueue outbound WebSocket frames for this peer.
    pub sender: UnboundedSender<WsMessage>,

    /// Topics this peer is currently subscribed to.
    pub topics: HashSet<String>,
}

impl Peer {
    pub fn new(sender: UnboundedSender<WsMessage>) -> Self {
        Self {
            id: format!("peer-{}", uuid::Uuid::new_v4()),
            sender,
            topics: HashSet::new(),
        }
    }
}
