use std::sync::Arc;

use axum::{
    Router,
    extract::{
        State,
        ws::{Message as WsMessage, WebSocket, WebSocketUpgrade},
    },
    http::{HeaderMap, StatusCode, header},
    response::{IntoResponse, Response},
    routing::get,
};
use futures_util::{SinkExt, StreamExt};
use tokio::net::TcpListener;
use tokio::sync::mpsc::{self, UnboundedSender};
use tracing::{debug, info, warn};

use crate::auth::{OriginPolicy, SessionGate};
use crate::client::Peer;
use crate::hub::SharedHub;
use crate::hub::message::ServerMessage;
use crate::transport::message::ClientMessage;

/// Shared state for the HTTP layer.
pub struct AppState {
    pub hub: SharedHub,
    pub gate: SessionGate,
    pub origins: OriginPolicy,
}

/// Builds the HTTP router: an unauthenticated liveness route and the gated
/// WebSocket upgrade route.
pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(health))
        .route("/ws", get(ws_handler))
        .with_state(state)
}

/// Binds `addr` and serves the hub until the listener fails.
pub async fn serve(addr: &str, state: Arc<AppState>) -> std::io::Result<()> {
    let listener = TcpListener::bind(addr).await?;
    info!("signaling hub listening on http://{}", addr);
    axum::serve(listener, router(state)).await
}

async fn health() -> &'static str {
    "ok"
}

/// Entry point for WebSocket connections.
///
/// The origin policy and the session gate both run before the upgrade
/// completes, so a rejected caller never creates any hub state.
async fn ws_handler(
    ws: WebSocketUpgrade,
    headers: HeaderMap,
    State(state): State<Arc<AppState>>,
) -> Response {
    // An Origin header that fails to parse is treated as present-but-unknown,
    // so it can never slip past the allow-list.
    let origin = headers.get(header::ORIGIN).map(|v| v.to_str().unwrap_or(""));
    if !state.origins.allows(origin) {
        warn!(
            "rejected upgrade from disallowed origin {:?}",
            origin.unwrap_or_default()
        );
        return StatusCode::FORBIDDEN.into_response();
    }

    // Forward every cookie from the upgrade request to the auth server.
    let cookies = headers
        .get_all(header::COOKIE)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .collect::<Vec<_>>()
        .join("; ");
    if !state.gate.validate(&cookies).await {
        return StatusCode::UNAUTHORIZED.into_response();
    }

    let hub = state.hub.clone();
    ws.on_upgrade(move |socket| handle_socket(socket, hub))
}

/// Runs the two pump loops for one accepted connection.
///
/// The inbound loop runs here; the outbound pump is a spawned task draining
/// the peer's queue onto the sink in enqueue order. The inbound loop is the
/// sole owner of teardown: any read error or close falls out of the loop into
/// the single `unregister` call, and dropping the queue senders ends the
/// outbound pump.
async fn handle_socket(socket: WebSocket, hub: SharedHub) {
    let (mut ws_sender, mut ws_receiver) = socket.split();

    let (tx, mut rx) = mpsc::unbounded_channel::<WsMessage>();

    let peer_id = hub.write().unwrap().register(Peer::new(tx.clone()));
    info!("{} connected", peer_id);

    let send_peer_id = peer_id.clone();
    tokio::spawn(async move {
        while let Some(frame) = rx.recv().await {
            if let Err(e) = ws_sender.send(frame).await {
                debug!("send loop for {} closed: {}", send_peer_id, e);
                break;
            }
        }
    });

    while let Some(Ok(frame)) = ws_receiver.next().await {
        match frame {
            WsMessage::Binary(payload) => {
                hub.read().unwrap().relay_binary(&peer_id, payload);
            }
            WsMessage::Text(text) => dispatch(&hub, &peer_id, &tx, &text),
            WsMessage::Close(_) => break,
            // axum answers protocol-level pings on its own
            WsMessage::Ping(_) | WsMessage::Pong(_) => {}
        }
    }

    hub.write().unwrap().unregister(&peer_id);
    info!("{} disconnected", peer_id);
}

/// Decodes one text frame and routes it into the hub.
///
/// Malformed or unrecognized envelopes are dropped without a reply; `ping`
/// answers straight into the sender's own queue, bypassing the registry.
pub(crate) fn dispatch(
    hub: &SharedHub,
    peer_id: &str,
    tx: &UnboundedSender<WsMessage>,
    text: &str,
) {
    let msg = match serde_json::from_str::<ClientMessage>(text) {
        Ok(msg) => msg,
        Err(e) => {
            debug!("dropping malformed envelope from {}: {}", peer_id, e);
            return;
        }
    };

    match msg {
        ClientMessage::Subscribe { topics } => {
            hub.write().unwrap().subscribe(peer_id, topics);
        }
        ClientMessage::Unsubscribe { topics } => {
            hub.write().unwrap().unsubscribe(peer_id, &topics);
        }
        ClientMessage::Publish { topic, data } => {
            hub.read().unwrap().publish(peer_id, &topic, data);
        }
        ClientMessage::LeaderQuery { topic } => {
            hub.read().unwrap().broadcast_leader(&topic);
        }
        ClientMessage::Ping => {
            if let Ok(text) = serde_json::to_string(&ServerMessage::Pong) {
                let _ = tx.send(WsMessage::Text(text));
            }
        }
    }
}
