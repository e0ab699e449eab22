use std::time::Duration;

use tracing::warn;

/// Path on the auth server that reports whether the caller's session cookies
/// belong to an authenticated session.
const AUTHENTICATED_PATH: &str = "/api/v1/authenticated";

/// Pre-upgrade session check, delegated to an external auth server.
///
/// The gate holds no keys and decodes nothing itself: it forwards the upgrade
/// request's cookies to the server that already has them configured and
/// accepts only a 200 response. While no server URL is configured, every
/// upgrade attempt is rejected.
#[derive(Debug, Clone)]
pub struct SessionGate {
    http: reqwest::Client,
    server_url: Option<String>,
}

impl SessionGate {
    pub fn new(server_url: Option<String>) -> Self {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(5))
            .build()
            .expect("Failed to create HTTP client");

        if server_url.is_none() {
            warn!("AUTH_SERVER_URL not configured; all upgrades will be rejected");
        }

        Self { http, server_url }
    }

    /// Returns true only when the auth server answers 200 for these cookies.
    /// Missing configuration, transport failures, and non-200 statuses all
    /// reject.
    pub async fn validate(&self, cookie_header: &str) -> bool {
        let Some(base) = &self.server_url else {
            return false;
        };

        let mut request = self.http.get(format!("{}{}", base, AUTHENTICATED_PATH));
        if !cookie_header.is_empty() {
            request = request.header(reqwest::header::COOKIE, cookie_header);
        }

        match request.send().await {
            Ok(response) => response.status() == reqwest::StatusCode::OK,
            Err(e) => {
                warn!("session validation request failed: {}", e);
                false
            }
        }
    }
}
