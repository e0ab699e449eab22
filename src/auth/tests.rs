use axum::{Router, http::StatusCode, routing::get};

use super::origin::OriginPolicy;
use super::session::SessionGate;

#[test]
fn test_origin_policy_allows_missing_header() {
    let policy = OriginPolicy::new(vec!["https://app.example.com".to_string()]);
    assert!(policy.allows(None));
}

#[test]
fn test_origin_policy_matches_exactly() {
    let policy = OriginPolicy::new(vec!["https://app.example.com".to_string()]);
    assert!(policy.allows(Some("https://app.example.com")));
    assert!(!policy.allows(Some("http://app.example.com")));
    assert!(!policy.allows(Some("https://app.example.com.evil.net")));
}

#[test]
fn test_empty_allow_list_rejects_any_browser_origin() {
    let policy = OriginPolicy::new(Vec::new());
    assert!(policy.allows(None));
    assert!(!policy.allows(Some("https://anything.example.com")));
}

/// Answers 200 only when the expected session cookie was forwarded.
async fn spawn_auth_stub() -> std::net::SocketAddr {
    let app = Router::new().route(
        "/api/v1/authenticated",
        get(|headers: axum::http::HeaderMap| async move {
            let ok = headers
                .get(axum::http::header::COOKIE)
                .and_then(|v| v.to_str().ok())
                .is_some_and(|v| v.contains("session=good"));
            if ok {
                StatusCode::OK
            } else {
                StatusCode::UNAUTHORIZED
            }
        }),
    );
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    addr
}

#[tokio::test]
async fn test_gate_rejects_without_configuration() {
    let gate = SessionGate::new(None);
    assert!(!gate.validate("session=good").await);
}

#[tokio::test]
async fn test_gate_forwards_cookies_and_trusts_the_verdict() {
    let addr = spawn_auth_stub().await;
    let gate = SessionGate::new(Some(format!("http://{}", addr)));

    assert!(gate.validate("session=good").await);
    assert!(!gate.validate("session=bad").await);
    assert!(!gate.validate("").await);
}

#[tokio::test]
async fn test_gate_rejects_on_transport_failure() {
    // nothing is listening here
    let gate = SessionGate::new(Some("http://127.0.0.1:9".to_string()));
    assert!(!gate.validate("session=good").await);
}
