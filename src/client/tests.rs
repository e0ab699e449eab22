use super::peer::Peer;
use axum::extract::ws::Message as WsMessage;
use tokio::sync::mpsc;

#[test]
fn test_peer_new() {
    let (tx, _) = mpsc::unbounded_channel::<WsMessage>();
    let peer = Peer::new(tx);
    assert!(!peer.id.is_empty());
    assert!(peer.topics.is_empty());
}

#[test]
fn test_peer_ids_are_unique() {
    let (tx, _) = mpsc::unbounded_channel::<WsMessage>();
    let a = Peer::new(tx.clone());
    let b = Peer::new(tx);
    assert_ne!(a.id, b.id);
}
