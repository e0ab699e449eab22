//! Error types for the server's startup path.
//!
//! Once a connection is accepted, failures stay local to that connection
//! (teardown, never propagation), so the only errors worth typing are the
//! ones that stop the process: configuration loading and socket binding.

use thiserror::Error;

/// Errors that can stop the server before or while it is serving.
#[derive(Debug, Error)]
pub enum ServerError {
    #[error("configuration error: {0}")]
    Config(#[from] config::ConfigError),

    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),
}
