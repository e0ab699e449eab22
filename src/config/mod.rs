mod settings;

use crate::config::settings::PartialSettings;
use config::{Config, ConfigError, Environment, File};

pub use settings::{AuthSettings, ServerSettings, Settings};

/// Loads the configuration from the default file and environment variables
/// and merges it with default values.
///
/// `AUTH_SERVER_URL` and `ALLOWED_ORIGINS` are read directly from the
/// environment afterwards and win over file values; the auth server URL in
/// particular is deployment-specific and is expected to arrive that way.
pub fn load_config() -> Result<Settings, ConfigError> {
    let builder = Config::builder()
        .add_source(File::with_name("config/default").required(false))
        .add_source(Environment::default().separator("_"));

    let config = builder.build()?;

    // Try to deserialize what is available
    let partial: PartialSettings = config.try_deserialize()?;

    // Merge with defaults
    let default = Settings::default();

    let server_url = std::env::var("AUTH_SERVER_URL")
        .ok()
        .or_else(|| partial.auth.as_ref().and_then(|a| a.server_url.clone()));

    let allowed_origins = std::env::var("ALLOWED_ORIGINS")
        .ok()
        .map(|raw| {
            raw.split(',')
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
                .collect()
        })
        .or_else(|| partial.auth.as_ref().and_then(|a| a.allowed_origins.clone()))
        .unwrap_or(default.auth.allowed_origins);

    Ok(Settings {
        server: ServerSettings {
            host: partial
                .server
                .as_ref()
                .and_then(|s| s.host.clone())
                .unwrap_or(default.server.host),
            port: partial
                .server
                .as_ref()
                .and_then(|s| s.port)
                .unwrap_or(default.server.port),
        },
        auth: AuthSettings {
            server_url,
            allowed_origins,
        },
    })
}
