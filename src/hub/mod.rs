//! The `hub` module is the single source of truth for topic membership.
//!
//! It maps topic names to member peers, elects one leader per topic, and fans
//! out published envelopes and relayed binary frames to topic members. All of
//! its state is in-memory and guarded by one reader/writer lock; it owns no
//! sockets and never blocks while holding that lock.

pub mod message;
pub mod registry;
pub mod topic;

pub use registry::{Hub, SharedHub};
