use std::collections::{HashMap, HashSet};
use std::sync::{Arc, RwLock};

use axum::extract::ws::Message as WsMessage;
use serde_json::Value;
use tracing::{debug, error};

use crate::client::peer::{Peer, PeerId};
use crate::hub::message::ServerMessage;
use crate::hub::topic::Topic;

/// Shared handle to the hub. Mutations take the write lock; publish and relay
/// enumeration take the read lock. The lock is never held across an await and
/// every cross-peer send inside it is a non-blocking channel push, so critical
/// sections stay bounded no matter how slowly an individual peer drains.
pub type SharedHub = Arc<RwLock<Hub>>;

/// The topic registry: maps topic names to member sets and peer ids to live
/// peers, and owns leader election.
///
/// Membership is kept symmetric under the lock: a peer id appears in a
/// topic's member set exactly when that topic name appears in the peer's
/// topic set. A topic with no members is removed immediately.
#[derive(Debug, Default)]
pub struct Hub {
    topics: HashMap<String, Topic>,
    peers: HashMap<PeerId, Peer>,
}

impl Hub {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a newly connected peer.
    pub fn register(&mut self, peer: Peer) -> PeerId {
        let id = peer.id.clone();
        debug!("registered {}", id);
        self.peers.insert(id.clone(), peer);
        id
    }

    /// Subscribes a peer to each named topic, lazily creating topics, and
    /// broadcasts the leader state to every member of each topic touched.
    /// Re-subscribing to a joined topic has no membership effect.
    pub fn subscribe(&mut self, peer_id: &str, names: Vec<String>) {
        for name in names {
            let Some(peer) = self.peers.get_mut(peer_id) else {
                return;
            };
            peer.topics.insert(name.clone());
            self.topics
                .entry(name.clone())
                .or_insert_with(|| Topic::new(&name))
                .join(peer_id.to_string());
            self.broadcast_leader(&name);
        }
    }

    /// Removes a peer from each named topic without closing its connection.
    /// Emptied topics are dropped; survivors get a fresh leader broadcast.
    /// Names the peer never joined are ignored.
    pub fn unsubscribe(&mut self, peer_id: &str, names: &[String]) {
        for name in names {
            if let Some(peer) = self.peers.get_mut(peer_id) {
                peer.topics.remove(name);
            }
            self.drop_member(name, peer_id);
        }
    }

    /// Removes a disconnected peer from the registry and from every topic it
    /// had joined. Dropping the peer closes its outbound queue, which is what
    /// ends its send pump.
    pub fn unregister(&mut self, peer_id: &str) {
        let Some(peer) = self.peers.remove(peer_id) else {
            return;
        };
        for name in &peer.topics {
            self.drop_member(name, peer_id);
        }
        debug!("unregistered {}", peer_id);
    }

    /// Forwards a publish envelope to every member of `topic_name` except the
    /// sender, annotated with the member count. Unknown topics are a no-op:
    /// a publish with no recipients is not an error.
    pub fn publish(&self, sender_id: &str, topic_name: &str, data: Value) {
        let Some(topic) = self.topics.get(topic_name) else {
            return;
        };
        let msg = ServerMessage::Publish {
            topic: topic_name.to_string(),
            data,
            clients: topic.len(),
        };
        let Some(frame) = encode(&msg) else { return };
        for id in topic.member_ids() {
            if id != sender_id {
                self.send_to(id, frame.clone());
            }
        }
    }

    /// Relays an opaque binary frame to every peer that shares at least one
    /// topic with the sender. The recipient set is the union across all of
    /// the sender's topics, deduplicated so overlapping memberships deliver
    /// a single copy.
    pub fn relay_binary(&self, sender_id: &str, payload: Vec<u8>) {
        let Some(sender) = self.peers.get(sender_id) else {
            return;
        };
        let mut recipients: HashSet<&PeerId> = HashSet::new();
        for name in &sender.topics {
            if let Some(topic) = self.topics.get(name) {
                recipients.extend(topic.member_ids().filter(|id| *id != sender_id));
            }
        }
        for id in recipients {
            self.send_to(id, WsMessage::Binary(payload.clone()));
        }
    }

    /// Sends every member of `topic_name` a leader notification carrying
    /// whether that member is the current leader. Idempotent; unknown topics
    /// are a no-op.
    pub fn broadcast_leader(&self, topic_name: &str) {
        let Some(topic) = self.topics.get(topic_name) else {
            return;
        };
        let Some(leader) = topic.leader() else {
            return;
        };
        for id in topic.member_ids() {
            let msg = ServerMessage::Leader {
                topic: topic_name.to_string(),
                is_leader: id == leader,
            };
            if let Some(frame) = encode(&msg) {
                self.send_to(id, frame);
            }
        }
    }

    pub fn contains_topic(&self, name: &str) -> bool {
        self.topics.contains_key(name)
    }

    pub fn member_count(&self, name: &str) -> usize {
        self.topics.get(name).map(|t| t.len()).unwrap_or(0)
    }

    pub fn is_member(&self, name: &str, peer_id: &str) -> bool {
        self.topics.get(name).is_some_and(|t| t.contains(peer_id))
    }

    pub fn peer_topics(&self, peer_id: &str) -> Option<&HashSet<String>> {
        self.peers.get(peer_id).map(|p| &p.topics)
    }

    pub fn peer_count(&self) -> usize {
        self.peers.len()
    }

    /// Removes `peer_id` from one topic's member set, garbage-collecting the
    /// topic if it empties and re-running the leader broadcast otherwise.
    fn drop_member(&mut self, topic_name: &str, peer_id: &str) {
        let emptied = match self.topics.get_mut(topic_name) {
            Some(topic) => {
                if !topic.leave(peer_id) {
                    return;
                }
                topic.is_empty()
            }
            None => return,
        };
        if emptied {
            self.topics.remove(topic_name);
            debug!("removed empty topic {}", topic_name);
        } else {
            self.broadcast_leader(topic_name);
        }
    }

    /// Non-blocking push onto a peer's outbound queue. A closed queue just
    /// means the peer is mid-teardown; its unregister will follow.
    fn send_to(&self, peer_id: &str, frame: WsMessage) {
        if let Some(peer) = self.peers.get(peer_id) {
            let _ = peer.sender.send(frame);
        }
    }
}

fn encode(msg: &ServerMessage) -> Option<WsMessage> {
    match serde_json::to_string(msg) {
        Ok(text) => Some(WsMessage::Text(text)),
        Err(e) => {
            error!("failed to serialize message: {:?}", e);
            None
        }
    }
}
