use serde::Deserialize;

/// Top-level configuration settings for the application.
///
/// Includes settings for the server bind address and the pre-upgrade checks.
#[derive(Debug, Deserialize, Clone)]
pub struct Settings {
    pub server: ServerSettings,
    pub auth: AuthSettings,
}

/// Configuration settings for the server.
///
/// Defines the host and port the server will bind to.
#[derive(Debug, Deserialize, Clone)]
pub struct ServerSettings {
    pub host: String,
    pub port: u16,
}

/// Configuration for the pre-upgrade checks.
///
/// `server_url` is the base URL of the external auth server; while it is
/// unset, every upgrade attempt is rejected. `allowed_origins` is the
/// explicit origin allow-list for browser peers.
#[derive(Debug, Deserialize, Clone)]
pub struct AuthSettings {
    pub server_url: Option<String>,
    pub allowed_origins: Vec<String>,
}

/// Partial configuration settings loaded from files or environment.
///
/// Allows partial specification of settings. Missing values can be filled
/// using defaults.
#[derive(Debug, Deserialize)]
pub struct PartialSettings {
    pub server: Option<PartialServerSettings>,
    pub auth: Option<PartialAuthSettings>,
}

/// Partial server settings.
#[derive(Debug, Deserialize)]
pub struct PartialServerSettings {
    pub host: Option<String>,
    pub port: Option<u16>,
}

/// Partial auth settings.
#[derive(Debug, Deserialize)]
pub struct PartialAuthSettings {
    pub server_url: Option<String>,
    pub allowed_origins: Option<Vec<String>>,
}

/// Provides default values for `Settings`.
///
/// Ensures the application has sensible defaults if no configuration is
/// provided. The auth server URL has no default on purpose.
impl Default for Settings {
    fn default() -> Self {
        Self {
            server: ServerSettings {
                host: "127.0.0.1".to_string(),
                port: 8080,
            },
            auth: AuthSettings {
                server_url: None,
                allowed_origins: Vec::new(),
            },
        }
    }
}
