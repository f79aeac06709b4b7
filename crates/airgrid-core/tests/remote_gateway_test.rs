#![allow(clippy::unwrap_used)]
// The remote gateway against a wiremock backend: wire payload variants
// must come out as the same normalized records the mock layer produces.

use std::time::Duration;

use pretty_assertions::assert_eq;
use serde_json::json;
use url::Url;
use wiremock::matchers::{body_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use airgrid_api::RestClient;
use airgrid_core::{
    ClientPatch, Gateway, NetworkPatch, RemoteGateway, SecurityMode,
};

async fn setup() -> (MockServer, Gateway) {
    let server = MockServer::start().await;
    let rest = RestClient::with_client(
        reqwest::Client::new(),
        Url::parse(&server.uri()).unwrap(),
        Duration::from_secs(5),
    );
    (server, Gateway::Remote(RemoteGateway::from_rest(rest)))
}

#[tokio::test]
async fn list_networks_normalizes_wire_variants() {
    let (server, gw) = setup().await;

    Mock::given(method("GET"))
        .and(path("/networks"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {
                "id": "net-a",
                "ssid": "Lobby",
                "security": "WPA3",
                "vlan": 7,
                "enabled": true
            },
            {
                // name-only + status-string backend
                "id": "net-b",
                "name": "Warehouse",
                "status": "disabled"
            }
        ])))
        .mount(&server)
        .await;

    let networks = gw.list_networks().await.unwrap();
    assert_eq!(networks.len(), 2);

    assert_eq!(networks[0].security, SecurityMode::Wpa3);
    assert_eq!(networks[1].ssid, "Warehouse", "ssid falls back to name");
    assert!(!networks[1].enabled, "status string normalized to enabled");
    assert_eq!(networks[1].security, SecurityMode::Wpa2, "default security");
}

#[tokio::test]
async fn update_client_sends_canonical_blocked_field() {
    let (server, gw) = setup().await;

    Mock::given(method("PATCH"))
        .and(path("/clients/cl-7"))
        .and(body_json(json!({ "blocked": true })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": "cl-7",
            "mac": "aa:bb:cc:07:49:91",
            "status": "blocked"
        })))
        .mount(&server)
        .await;

    let client = gw
        .update_client("cl-7", ClientPatch::blocked(true))
        .await
        .unwrap();
    assert!(client.blocked, "status-string response normalized");
}

#[tokio::test]
async fn backend_error_shape_reaches_the_report() {
    let (server, gw) = setup().await;

    Mock::given(method("PATCH"))
        .and(path("/networks/net-a"))
        .respond_with(ResponseTemplate::new(409).set_body_json(json!({
            "message": "VLAN already in use",
            "code": "CONFLICT",
            "details": { "vlan": 7 }
        })))
        .mount(&server)
        .await;

    let err = gw
        .update_network("net-a", NetworkPatch::enabled(false))
        .await
        .unwrap_err();
    let report = err.report();
    assert_eq!(report.status, Some(409));
    assert_eq!(report.code.as_deref(), Some("CONFLICT"));
    assert_eq!(report.message, "VLAN already in use");
    assert_eq!(report.details, Some(json!({ "vlan": 7 })));
}
