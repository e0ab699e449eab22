//! The `auth` module is the hub's delegation boundary for authentication.
//!
//! It contains no credential logic of its own: the session gate forwards the
//! upgrade request's cookies to an external auth server and trusts its
//! verdict, and the origin policy checks the `Origin` header against a
//! configured allow-list. Both run before the WebSocket handshake completes.

pub mod origin;
pub mod session;

pub use origin::OriginPolicy;
pub use session::SessionGate;

#[cfg(test)]
mod tests;
