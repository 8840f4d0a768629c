use chrono::TimeZone;
use ipgeo_core::auth::{Session, User};
use ipgeo_core::geo::GeoRecord;
use ipgeo_core::store::{LogEntry, LogStore, StoreError};
use serde_json::json;
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn session() -> Session {
    Session {
        access_token: "user-access".to_string(),
        refresh_token: "r".to_string(),
        expires_at: chrono::Utc::now().timestamp() + 3600,
        user: User {
            id: "user-1".to_string(),
            email: Some("a@b.co".to_string()),
        },
    }
}

fn entry() -> LogEntry {
    let record = GeoRecord {
        ip: "8.8.8.8".to_string(),
        city: Some("Mountain View".to_string()),
        region: Some("California".to_string()),
        country: Some("US".to_string()),
        loc: Some("37.4056,-122.0775".to_string()),
        timezone: Some("America/Los_Angeles".to_string()),
        org: Some("AS15169 Google LLC".to_string()),
        ..GeoRecord::default()
    };
    let at = chrono::Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap();
    LogEntry::from_record("user-1", &record, at)
}

#[tokio::test]
async fn test_append_inserts_row_with_user_token() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/rest/v1/user_ip_logs"))
        .and(header("apikey", "anon"))
        .and(header("authorization", "Bearer user-access"))
        .and(header("prefer", "return=minimal"))
        .and(body_json(json!({
            "user_id": "user-1",
            "ip_address": "8.8.8.8",
            "city": "Mountain View",
            "region": "California",
            "country": "US",
            "location": "37.4056,-122.0775",
            "timezone": "America/Los_Angeles",
            "org": "AS15169 Google LLC",
            "logged_at": "2024-05-01T12:00:00.000Z"
        })))
        .respond_with(ResponseTemplate::new(201))
        .expect(1)
        .mount(&server)
        .await;

    let store = LogStore::new(reqwest::Client::new(), server.uri(), "anon", "user_ip_logs");
    store.append(&session(), &entry()).await.unwrap();
}

#[tokio::test]
async fn test_append_rejected_by_policy() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/rest/v1/user_ip_logs"))
        .respond_with(ResponseTemplate::new(403).set_body_json(json!({
            "code": "42501",
            "message": "new row violates row-level security policy for table \"user_ip_logs\""
        })))
        .mount(&server)
        .await;

    let store = LogStore::new(reqwest::Client::new(), server.uri(), "anon", "user_ip_logs");
    let err = store.append(&session(), &entry()).await.unwrap_err();
    assert!(matches!(err, StoreError::Rejected { status: 403, ref message } if message.contains("row-level security")));
}
