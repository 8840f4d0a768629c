use ipgeo_core::auth::{AuthClient, Session, User};
use ipgeo_core::geo::{GeoClient, GeoRecord};
use ipgeo_core::store::LogStore;
use serde_json::json;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use super::*;
use crate::events::{AuthUiEvent, GeoUiEvent, UiEvent};

fn geo_client(server: &MockServer) -> GeoClient {
    GeoClient::new(
        reqwest::Client::new(),
        server.uri(),
        Some("tok".to_string()),
    )
}

fn session() -> Session {
    Session {
        access_token: "user-access".to_string(),
        refresh_token: "refresh".to_string(),
        expires_at: i64::MAX,
        user: User {
            id: "user-1".to_string(),
            email: Some("a@b.co".to_string()),
        },
    }
}

#[tokio::test]
async fn test_lookup_self_hits_self_endpoint() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/json"))
        .and(query_param("token", "tok"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({"ip": "8.8.8.8", "country": "US"})),
        )
        .expect(1)
        .mount(&server)
        .await;

    let event = lookup_self(geo_client(&server)).await;
    let UiEvent::Geo(GeoUiEvent::SelfLoaded(Ok(record))) = event else {
        panic!("expected self record, got {event:?}");
    };
    assert_eq!(record.ip, "8.8.8.8");
    assert_eq!(record.country.as_deref(), Some("US"));
}

#[tokio::test]
async fn test_lookup_self_provider_error_uses_fixed_message() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/json"))
        .respond_with(ResponseTemplate::new(429).set_body_string("Too many requests"))
        .mount(&server)
        .await;

    let event = lookup_self(geo_client(&server)).await;
    let UiEvent::Geo(GeoUiEvent::SelfLoaded(Err(message))) = event else {
        panic!("expected self lookup error, got {event:?}");
    };
    assert_eq!(message, SELF_LOOKUP_FAILED);
}

#[tokio::test]
async fn test_lookup_ip_error_carries_provider_message() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/999.1.1.1"))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({
            "status": 404,
            "error": {"title": "Wrong ip", "message": "Please provide a valid IP address"}
        })))
        .mount(&server)
        .await;

    let event = lookup_ip(geo_client(&server), "999.1.1.1".to_string()).await;
    let UiEvent::Geo(GeoUiEvent::SearchLoaded(Err(message))) = event else {
        panic!("expected search error, got {event:?}");
    };
    assert_eq!(message, "Please provide a valid IP address");
}

#[tokio::test]
async fn test_check_session_without_cache_reports_none() {
    let dir = tempfile::tempdir().unwrap();
    let server = MockServer::start().await;
    let auth = AuthClient::new(
        reqwest::Client::new(),
        server.uri(),
        "anon",
        dir.path().join("session.json"),
    );

    let event = check_session(auth).await;
    assert!(matches!(
        event,
        UiEvent::Auth(AuthUiEvent::SessionChecked(Ok(None)))
    ));
}

#[tokio::test]
async fn test_append_log_failure_is_returned_not_raised() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/rest/v1/user_ip_logs"))
        .respond_with(ResponseTemplate::new(500).set_body_json(json!({"message": "boom"})))
        .expect(1)
        .mount(&server)
        .await;

    let store = LogStore::new(reqwest::Client::new(), server.uri(), "anon", "user_ip_logs");
    let record = GeoRecord {
        ip: "8.8.8.8".to_string(),
        ..GeoRecord::default()
    };

    let result = append_log(store, session(), record).await;
    assert!(result.is_err());
}
