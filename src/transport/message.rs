use serde::Deserialize;
use serde_json::Value;

/// Inbound control envelope sent by peers as JSON text frames.
///
/// Binary frames carry no envelope and never reach this type. An unknown
/// `type` tag or malformed JSON fails deserialization and the frame is
/// dropped by the dispatcher.
#[derive(Debug, Deserialize)]
#[serde(tag = "type")]
pub enum ClientMessage {
    #[serde(rename = "subscribe")]
    Subscribe { topics: Vec<String> },

    #[serde(rename = "unsubscribe")]
    Unsubscribe { topics: Vec<String> },

    #[serde(rename = "publish")]
    Publish {
        topic: String,
        #[serde(default)]
        data: Value,
    },

    /// Asks the hub to re-broadcast the leader state for one topic.
    #[serde(rename = "amIleader")]
    LeaderQuery { topic: String },

    #[serde(rename = "ping")]
    Ping,
}
