use ipgeo_core::geo::{GENERIC_LOOKUP_ERROR, GeoClient, LookupError};
use serde_json::json;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// URL of a local port with nothing listening on it.
fn closed_port_url() -> String {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    format!("http://{addr}")
}

fn client(server: &MockServer) -> GeoClient {
    GeoClient::new(reqwest::Client::new(), server.uri(), Some("test-token".to_string()))
}

#[tokio::test]
async fn test_empty_input_looks_up_self() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/json"))
        .and(query_param("token", "test-token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "ip": "8.8.8.8",
            "city": "Mountain View",
            "country": "US",
            "loc": "37.4056,-122.0775"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let record = client(&server).lookup("").await.unwrap();
    assert_eq!(record.ip, "8.8.8.8");
    assert_eq!(record.country.as_deref(), Some("US"));
}

#[tokio::test]
async fn test_explicit_ip_is_trimmed_into_path() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/1.1.1.1"))
        .and(query_param("token", "test-token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "ip": "1.1.1.1",
            "hostname": "one.one.one.one",
            "city": "Brisbane",
            "country": "AU"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let record = client(&server).lookup("  1.1.1.1  ").await.unwrap();
    assert_eq!(record.country.as_deref(), Some("AU"));
}

#[tokio::test]
async fn test_whitespace_input_sends_no_request() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let err = client(&server).lookup("   ").await.unwrap_err();
    assert!(matches!(err, LookupError::InvalidInput));
    assert_eq!(err.to_string(), "Please enter a valid IP address");
}

#[tokio::test]
async fn test_provider_error_message_is_surfaced() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/999.1.1.1"))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({
            "status": 404,
            "error": {"title": "Wrong ip", "message": "Please provide a valid IP address"}
        })))
        .mount(&server)
        .await;

    let err = client(&server).lookup("999.1.1.1").await.unwrap_err();
    assert!(matches!(err, LookupError::Provider { status: 404, .. }));
    assert_eq!(err.to_string(), "Please provide a valid IP address");
}

#[tokio::test]
async fn test_server_error_without_body_uses_generic_message() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    let err = client(&server).lookup("1.1.1.1").await.unwrap_err();
    assert_eq!(err.to_string(), GENERIC_LOOKUP_ERROR);
}

#[tokio::test]
async fn test_missing_token_sends_no_request() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let geo = GeoClient::new(reqwest::Client::new(), server.uri(), None);
    assert!(matches!(
        geo.lookup("").await,
        Err(LookupError::MissingToken)
    ));
}

#[tokio::test]
async fn test_unreachable_provider_is_network_error() {
    let geo = GeoClient::new(
        reqwest::Client::new(),
        closed_port_url(),
        Some("t".to_string()),
    );
    let err = geo.lookup("").await.unwrap_err();
    assert!(matches!(err, LookupError::Network(_)));
    assert!(err.to_string().starts_with("Network error: "));
}
