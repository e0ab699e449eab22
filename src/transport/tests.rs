use std::sync::{Arc, RwLock};

use axum::extract::ws::Message as WsMessage;
use serde_json::{Value, json};
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};

use crate::client::Peer;
use crate::hub::{Hub, SharedHub};
use crate::transport::websocket::dispatch;

fn shared_hub() -> SharedHub {
    Arc::new(RwLock::new(Hub::new()))
}

fn register(hub: &SharedHub) -> (String, UnboundedSender<WsMessage>, UnboundedReceiver<WsMessage>) {
    let (tx, rx) = mpsc::unbounded_channel();
    let id = hub.write().unwrap().register(Peer::new(tx.clone()));
    (id, tx, rx)
}

fn drain(rx: &mut UnboundedReceiver<WsMessage>) -> Vec<Value> {
    let mut out = Vec::new();
    while let Ok(frame) = rx.try_recv() {
        if let WsMessage::Text(text) = frame {
            out.push(serde_json::from_str(&text).unwrap());
        }
    }
    out
}

#[test]
fn test_subscribe_envelope_joins_topics() {
    let hub = shared_hub();
    let (id, tx, mut rx) = register(&hub);

    let text = json!({ "type": "subscribe", "topics": ["doc-1", "doc-2"] }).to_string();
    dispatch(&hub, &id, &tx, &text);

    let guard = hub.read().unwrap();
    assert!(guard.is_member("doc-1", &id));
    assert!(guard.is_member("doc-2", &id));
    drop(guard);

    // one leader notification per joined topic
    let received = drain(&mut rx);
    assert_eq!(received.len(), 2);
    assert!(received.iter().all(|m| m["type"] == "leader"));
}

#[test]
fn test_unsubscribe_envelope_leaves_topic() {
    let hub = shared_hub();
    let (id, tx, mut rx) = register(&hub);

    dispatch(
        &hub,
        &id,
        &tx,
        &json!({ "type": "subscribe", "topics": ["doc-1"] }).to_string(),
    );
    dispatch(
        &hub,
        &id,
        &tx,
        &json!({ "type": "unsubscribe", "topics": ["doc-1"] }).to_string(),
    );

    assert!(!hub.read().unwrap().contains_topic("doc-1"));
    drain(&mut rx);
}

#[test]
fn test_publish_envelope_reaches_other_members_only() {
    let hub = shared_hub();
    let (a, tx_a, mut rx_a) = register(&hub);
    let (b, tx_b, mut rx_b) = register(&hub);

    let subscribe = json!({ "type": "subscribe", "topics": ["doc-1"] }).to_string();
    dispatch(&hub, &a, &tx_a, &subscribe);
    dispatch(&hub, &b, &tx_b, &subscribe);
    drain(&mut rx_a);
    drain(&mut rx_b);

    let publish = json!({ "type": "publish", "topic": "doc-1", "data": "hello" }).to_string();
    dispatch(&hub, &a, &tx_a, &publish);

    assert!(drain(&mut rx_a).is_empty());
    let received = drain(&mut rx_b);
    assert_eq!(received.len(), 1);
    assert_eq!(received[0]["type"], "publish");
    assert_eq!(received[0]["data"], "hello");
    assert_eq!(received[0]["clients"], 2);
}

#[test]
fn test_leader_query_envelope_rebroadcasts() {
    let hub = shared_hub();
    let (a, tx_a, mut rx_a) = register(&hub);
    let (b, tx_b, mut rx_b) = register(&hub);

    let subscribe = json!({ "type": "subscribe", "topics": ["doc-1"] }).to_string();
    dispatch(&hub, &a, &tx_a, &subscribe);
    dispatch(&hub, &b, &tx_b, &subscribe);
    drain(&mut rx_a);
    drain(&mut rx_b);

    dispatch(
        &hub,
        &b,
        &tx_b,
        &json!({ "type": "amIleader", "topic": "doc-1" }).to_string(),
    );

    let to_a = drain(&mut rx_a);
    let to_b = drain(&mut rx_b);
    assert_eq!(to_a.len(), 1);
    assert_eq!(to_b.len(), 1);
    assert_eq!(to_a[0]["isLeader"], true);
    assert_eq!(to_b[0]["isLeader"], false);
}

#[test]
fn test_ping_envelope_answers_pong_to_sender_only() {
    let hub = shared_hub();
    let (a, tx_a, mut rx_a) = register(&hub);
    let (_b, _tx_b, mut rx_b) = register(&hub);

    dispatch(&hub, &a, &tx_a, &json!({ "type": "ping" }).to_string());

    let received = drain(&mut rx_a);
    assert_eq!(received.len(), 1);
    assert_eq!(received[0]["type"], "pong");
    assert!(drain(&mut rx_b).is_empty());
}

#[test]
fn test_malformed_envelopes_are_dropped_silently() {
    let hub = shared_hub();
    let (id, tx, mut rx) = register(&hub);

    dispatch(&hub, &id, &tx, "{ not json");
    dispatch(&hub, &id, &tx, &json!({ "type": "launch" }).to_string());
    dispatch(&hub, &id, &tx, &json!({ "type": "subscribe" }).to_string());

    assert!(drain(&mut rx).is_empty());
    assert_eq!(hub.read().unwrap().peer_count(), 1);
}
