use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Outbound control messages sent by the hub to peers.
///
/// Serialized as JSON text frames, tagged by `type`. Field names mirror the
/// signaling protocol the browser peers speak (`isLeader`, `clients`).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum ServerMessage {
    /// Tells one member of `topic` whether it is the current leader. Sent to
    /// every member on each membership change, so followers also learn about
    /// demotions.
    #[serde(rename = "leader")]
    Leader {
        topic: String,
        #[serde(rename = "isLeader")]
        is_leader: bool,
    },

    /// A relayed publish, annotated with the topic's member count at send
    /// time (the sender included).
    #[serde(rename = "publish")]
    Publish {
        topic: String,
        #[serde(default, skip_serializing_if = "Value::is_null")]
        data: Value,
        clients: usize,
    },

    /// Liveness reply to a `ping`.
    #[serde(rename = "pong")]
    Pong,
}
