#![allow(clippy::unwrap_used)]
// Integration tests for `RestClient` using wiremock.

use std::time::Duration;

use pretty_assertions::assert_eq;
use serde_json::json;
use url::Url;
use wiremock::matchers::{body_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use airgrid_api::types::{CreateNetworkRequest, UpdateClientRequest, UpdateNetworkRequest};
use airgrid_api::{Error, RestClient};

// ── Helpers ─────────────────────────────────────────────────────────

async fn setup() -> (MockServer, RestClient) {
    let server = MockServer::start().await;
    let base_url = Url::parse(&server.uri()).unwrap();
    let client = RestClient::with_client(
        reqwest::Client::new(),
        base_url,
        Duration::from_secs(5),
    );
    (server, client)
}

// ── List / get ──────────────────────────────────────────────────────

#[tokio::test]
async fn test_list_networks() {
    let (server, client) = setup().await;

    let body = json!([
        {
            "id": "net-main",
            "name": "Ocean-Guest",
            "ssid": "Ocean-Guest",
            "security": "WPA2",
            "vlan": 20,
            "enabled": true,
            "createdAt": "2024-06-15T10:30:00Z"
        },
        {
            // snake_case variant backend
            "id": "net-staff",
            "ssid": "Ocean-Staff",
            "security": "WPA3",
            "vlan": 10,
            "status": "active",
            "created_at": "2024-06-15T10:30:00Z"
        }
    ]);

    Mock::given(method("GET"))
        .and(path("/networks"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&body))
        .mount(&server)
        .await;

    let networks = client.list_networks().await.unwrap();

    assert_eq!(networks.len(), 2);
    assert_eq!(networks[0].id, "net-main");
    assert_eq!(networks[0].name.as_deref(), Some("Ocean-Guest"));
    assert_eq!(networks[0].enabled, Some(true));
    assert_eq!(networks[1].enabled, None);
    assert_eq!(networks[1].status.as_deref(), Some("active"));
    assert!(networks[1].created_at.is_some());
}

#[tokio::test]
async fn test_get_client_field_aliases() {
    let (server, client) = setup().await;

    let body = json!({
        "id": "cl-1",
        "name": "Laptop",
        "mac": "AA:BB:CC:01:07:13",
        "ip": "192.168.1.23",
        "signal": -48,
        "network_id": "net-staff",
        "blocked": false
    });

    Mock::given(method("GET"))
        .and(path("/clients/cl-1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&body))
        .mount(&server)
        .await;

    let wire = client.get_client("cl-1").await.unwrap();
    assert_eq!(wire.rssi, Some(-48));
    assert_eq!(wire.network_id.as_deref(), Some("net-staff"));
    assert_eq!(wire.blocked, Some(false));
}

// ── Error normalization ─────────────────────────────────────────────

#[tokio::test]
async fn test_not_found_with_structured_body() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/networks/missing"))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({
            "message": "Network not found",
            "code": "NOT_FOUND"
        })))
        .mount(&server)
        .await;

    let err = client.get_network("missing").await.unwrap_err();

    assert!(err.is_not_found());
    assert_eq!(err.status(), Some(404));
    assert_eq!(err.api_error_code(), Some("NOT_FOUND"));
    match err {
        Error::Api { message, .. } => assert_eq!(message, "Network not found"),
        other => panic!("expected Api error, got: {other:?}"),
    }
}

#[tokio::test]
async fn test_error_field_variant() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/networks"))
        .respond_with(ResponseTemplate::new(409).set_body_json(json!({
            "error": "SSID already exists"
        })))
        .mount(&server)
        .await;

    let err = client.list_networks().await.unwrap_err();
    match err {
        Error::Api {
            status, message, ..
        } => {
            assert_eq!(status, 409);
            assert_eq!(message, "SSID already exists");
        }
        other => panic!("expected Api error, got: {other:?}"),
    }
}

#[tokio::test]
async fn test_bodiless_error_synthesizes_message() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/networks"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let err = client.list_networks().await.unwrap_err();
    match err {
        Error::Api { message, .. } => assert_eq!(message, "Request failed (500)"),
        other => panic!("expected Api error, got: {other:?}"),
    }
}

#[tokio::test]
async fn test_timeout_is_distinct_error() {
    let server = MockServer::start().await;
    let base_url = Url::parse(&server.uri()).unwrap();

    let http = reqwest::Client::builder()
        .timeout(Duration::from_millis(50))
        .build()
        .unwrap();
    let client = RestClient::with_client(http, base_url, Duration::from_millis(50));

    Mock::given(method("GET"))
        .and(path("/health"))
        .respond_with(ResponseTemplate::new(200).set_delay(Duration::from_secs(2)))
        .mount(&server)
        .await;

    let err = client.health().await.unwrap_err();
    assert!(err.is_timeout(), "expected Timeout, got: {err:?}");
    match err {
        Error::Timeout { timeout_ms } => assert_eq!(timeout_ms, 50),
        other => panic!("expected Timeout error, got: {other:?}"),
    }
}

#[tokio::test]
async fn test_invalid_json_body_reports_deserialization() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/networks"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>nope</html>"))
        .mount(&server)
        .await;

    let err = client.list_networks().await.unwrap_err();
    assert!(matches!(err, Error::Deserialization { .. }));
}

// ── Mutations ───────────────────────────────────────────────────────

#[tokio::test]
async fn test_create_network_posts_body() {
    let (server, client) = setup().await;

    let expected = json!({
        "name": "Ocean-Lab",
        "ssid": "Ocean-Lab",
        "security": "WPA3",
        "vlan": 42,
        "enabled": true
    });

    Mock::given(method("POST"))
        .and(path("/networks"))
        .and(body_json(&expected))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({
            "id": "net-lab",
            "name": "Ocean-Lab",
            "ssid": "Ocean-Lab",
            "security": "WPA3",
            "vlan": 42,
            "enabled": true
        })))
        .mount(&server)
        .await;

    let req = CreateNetworkRequest {
        name: "Ocean-Lab".into(),
        ssid: "Ocean-Lab".into(),
        security: "WPA3".into(),
        band: None,
        vlan: 42,
        enabled: true,
    };
    let created = client.create_network(&req).await.unwrap();
    assert_eq!(created.id, "net-lab");
}

#[tokio::test]
async fn test_patch_serializes_only_set_fields() {
    let (server, client) = setup().await;

    // A patch that only flips `blocked` must not carry a `name` key.
    Mock::given(method("PATCH"))
        .and(path("/clients/cl-3"))
        .and(body_json(json!({ "blocked": true })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": "cl-3",
            "blocked": true
        })))
        .mount(&server)
        .await;

    let req = UpdateClientRequest {
        blocked: Some(true),
        ..UpdateClientRequest::default()
    };
    let updated = client.update_client("cl-3", &req).await.unwrap();
    assert_eq!(updated.blocked, Some(true));
}

#[tokio::test]
async fn test_update_network_patch() {
    let (server, client) = setup().await;

    Mock::given(method("PATCH"))
        .and(path("/networks/net-iot"))
        .and(body_json(json!({ "enabled": false })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": "net-iot",
            "ssid": "Ocean-IoT",
            "enabled": false
        })))
        .mount(&server)
        .await;

    let req = UpdateNetworkRequest {
        enabled: Some(false),
        ..UpdateNetworkRequest::default()
    };
    let updated = client.update_network("net-iot", &req).await.unwrap();
    assert_eq!(updated.enabled, Some(false));
}

#[tokio::test]
async fn test_delete_network_accepts_empty_body() {
    let (server, client) = setup().await;

    Mock::given(method("DELETE"))
        .and(path("/networks/net-iot"))
        .respond_with(ResponseTemplate::new(204))
        .mount(&server)
        .await;

    client.delete_network("net-iot").await.unwrap();
}

#[tokio::test]
async fn test_health() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/health"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "status": "ok",
            "version": "1.4.2"
        })))
        .mount(&server)
        .await;

    let health = client.health().await.unwrap();
    assert_eq!(health.status, "ok");
    assert_eq!(health.version.as_deref(), Some("1.4.2"));
}
