//! # signalhub
//!
//! `signalhub` is an in-memory WebSocket signaling hub for peer-to-peer
//! collaborative sessions. Peers subscribe to named topics, exchange small JSON
//! control messages, and relay opaque binary update payloads to each other;
//! the hub elects exactly one leader per topic so peers can coordinate initial
//! state sync. It carries no document content and stores nothing.
//!
//! ## Core Modules
//!
//! - `hub`: the topic registry: membership, leader election, and message fan-out.
//! - `client`: represents one connected peer and its outbound queue.
//! - `transport`: the HTTP/WebSocket server, connection pumps, and the inbound
//!   message envelope.
//! - `auth`: the pre-upgrade session gate and origin allow-list.
//! - `config`: layered server configuration.
//! - `utils`: logging setup and startup error types.

pub mod auth;
pub mod client;
pub mod config;
pub mod hub;
pub mod transport;
pub mod utils;
