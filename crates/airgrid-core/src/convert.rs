// ── Wire-to-domain normalizers ──
//
// Bridges the loose `airgrid_api` response DTOs into canonical domain
// records. Each normalizer has an explicit fallback order over the
// field-name variants backends are known to emit; payloads that are
// unusable even after fallbacks become `CoreError::Validation`.
//
// Fallback orders (first hit wins):
//   network.ssid     ssid → name
//   network.enabled  enabled → status ∈ {active, enabled, up} → true
//   client.blocked   blocked → status == "blocked" → false
//   client.name      name → mac suffix → id
//   user.name        name → email local part

use std::net::IpAddr;
use std::str::FromStr;

use airgrid_api::types::{
    WireAccessPoint, WireAlert, WireClient, WireNetwork, WireSettings, WireUser,
};

use crate::error::CoreError;
use crate::model::{
    AccessPoint, Alert, ApStatus, Band, Client, MacAddress, Network, Role, SecurityMode, Settings,
    Severity, User,
};

// ── Helpers ────────────────────────────────────────────────────────

fn parse_ip(raw: Option<&str>) -> Option<IpAddr> {
    raw.and_then(|s| s.parse().ok())
}

/// Parse a closed enum, falling back to `default` on unknown spellings.
fn parse_or<T: FromStr + Copy>(raw: Option<&str>, default: T) -> T {
    raw.and_then(|s| s.trim().parse().ok()).unwrap_or(default)
}

fn missing(resource: &'static str, field: &'static str) -> CoreError {
    CoreError::Validation {
        field: Some(field),
        message: format!("{resource} payload is missing {field}"),
    }
}

// ── Network ────────────────────────────────────────────────────────

pub fn network_from_wire(w: WireNetwork) -> Result<Network, CoreError> {
    let ssid = w
        .ssid
        .clone()
        .or_else(|| w.name.clone())
        .ok_or_else(|| missing("network", "ssid"))?;
    let name = w.name.unwrap_or_else(|| ssid.clone());

    let enabled = w.enabled.unwrap_or_else(|| {
        w.status
            .as_deref()
            .map_or(true, |s| matches!(s, "active" | "enabled" | "up"))
    });

    Ok(Network {
        id: w.id,
        name,
        ssid,
        security: parse_or(w.security.as_deref(), SecurityMode::Wpa2),
        band: w.band.as_deref().and_then(|b| b.parse::<Band>().ok()),
        vlan: w.vlan.unwrap_or(1),
        enabled,
        created_at: w.created_at,
    })
}

// ── Access point ───────────────────────────────────────────────────

pub fn access_point_from_wire(w: WireAccessPoint) -> Result<AccessPoint, CoreError> {
    let name = w.name.unwrap_or_else(|| w.id.clone());

    Ok(AccessPoint {
        name,
        site: w.site.unwrap_or_else(|| "default".into()),
        status: parse_or(w.status.as_deref(), ApStatus::Offline),
        channel: w.channel.unwrap_or(0),
        throughput_mbps: w.throughput_mbps.unwrap_or(0),
        uplink: w.uplink,
        network_id: w.network_id,
        last_seen_at: w.last_seen_at,
        id: w.id,
    })
}

// ── Client ─────────────────────────────────────────────────────────

pub fn client_from_wire(w: WireClient) -> Result<Client, CoreError> {
    let mac = MacAddress::new(w.mac.as_deref().unwrap_or(&w.id));

    let name = w
        .name
        .filter(|n| !n.is_empty())
        .unwrap_or_else(|| mac.suffix().to_owned());

    // blocked is canonical; status-string backends are normalized here
    // and the string never survives past this boundary.
    let blocked = w
        .blocked
        .unwrap_or_else(|| w.status.as_deref() == Some("blocked"));

    Ok(Client {
        name,
        mac,
        ip: parse_ip(w.ip.as_deref()),
        signal_dbm: w.rssi,
        quality: w.quality,
        blocked,
        network_id: w.network_id,
        ap_id: w.ap_id,
        rx_mbps: w.rx_mbps.unwrap_or(0),
        tx_mbps: w.tx_mbps.unwrap_or(0),
        last_seen_at: w.last_seen_at,
        id: w.id,
    })
}

// ── Alert ──────────────────────────────────────────────────────────

pub fn alert_from_wire(w: WireAlert) -> Result<Alert, CoreError> {
    let title = w.title.ok_or_else(|| missing("alert", "title"))?;
    let created_at = w.created_at.ok_or_else(|| missing("alert", "createdAt"))?;

    Ok(Alert {
        id: w.id,
        severity: parse_or(w.severity.as_deref(), Severity::Info),
        title,
        description: w.description.unwrap_or_default(),
        acknowledged: w.acknowledged.unwrap_or(false),
        created_at,
    })
}

// ── User ───────────────────────────────────────────────────────────

pub fn user_from_wire(w: WireUser) -> Result<User, CoreError> {
    let email = w.email.ok_or_else(|| missing("user", "email"))?;
    let name = w
        .name
        .filter(|n| !n.is_empty())
        .unwrap_or_else(|| email.split('@').next().unwrap_or(&email).to_owned());

    Ok(User {
        id: w.id,
        name,
        email,
        // Unknown roles degrade to read-only rather than erroring.
        role: parse_or(w.role.as_deref(), Role::Viewer),
        enabled: w.enabled.unwrap_or(true),
    })
}

// ── Settings ───────────────────────────────────────────────────────

pub fn settings_from_wire(w: WireSettings) -> Result<Settings, CoreError> {
    let defaults = Settings::default();

    Ok(Settings {
        country_code: w.country_code.unwrap_or(defaults.country_code),
        channel_plan: w
            .channel_plan
            .as_deref()
            .and_then(|p| p.parse().ok())
            .unwrap_or(defaults.channel_plan),
        allow_guest_isolation: w
            .allow_guest_isolation
            .unwrap_or(defaults.allow_guest_isolation),
        tx_power: parse_or(w.tx_power.as_deref(), defaults.tx_power),
    })
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn wire_network(json: serde_json::Value) -> WireNetwork {
        serde_json::from_value(json).unwrap()
    }

    fn wire_client(json: serde_json::Value) -> WireClient {
        serde_json::from_value(json).unwrap()
    }

    #[test]
    fn network_ssid_falls_back_to_name() {
        let n = network_from_wire(wire_network(serde_json::json!({
            "id": "net-1",
            "name": "Lobby"
        })))
        .unwrap();
        assert_eq!(n.ssid, "Lobby");
        assert_eq!(n.name, "Lobby");
    }

    #[test]
    fn network_without_ssid_or_name_is_rejected() {
        let err = network_from_wire(wire_network(serde_json::json!({ "id": "net-1" })));
        assert!(matches!(
            err,
            Err(CoreError::Validation {
                field: Some("ssid"),
                ..
            })
        ));
    }

    #[test]
    fn network_enabled_falls_back_to_status_string() {
        let n = network_from_wire(wire_network(serde_json::json!({
            "id": "net-1",
            "ssid": "Lobby",
            "status": "disabled"
        })))
        .unwrap();
        assert!(!n.enabled);

        let n = network_from_wire(wire_network(serde_json::json!({
            "id": "net-2",
            "ssid": "Lobby",
            "status": "active"
        })))
        .unwrap();
        assert!(n.enabled);
    }

    #[test]
    fn network_unknown_security_defaults_to_wpa2() {
        let n = network_from_wire(wire_network(serde_json::json!({
            "id": "net-1",
            "ssid": "Lobby",
            "security": "WEP-ANCIENT"
        })))
        .unwrap();
        assert_eq!(n.security, SecurityMode::Wpa2);
    }

    #[test]
    fn client_blocked_falls_back_to_status_string() {
        let c = client_from_wire(wire_client(serde_json::json!({
            "id": "cl-1",
            "mac": "AA:BB:CC:01:02:03",
            "status": "blocked"
        })))
        .unwrap();
        assert!(c.blocked);

        // explicit boolean wins over the status string
        let c = client_from_wire(wire_client(serde_json::json!({
            "id": "cl-2",
            "mac": "AA:BB:CC:01:02:04",
            "status": "blocked",
            "blocked": false
        })))
        .unwrap();
        assert!(!c.blocked);
    }

    #[test]
    fn client_name_falls_back_to_mac_suffix() {
        let c = client_from_wire(wire_client(serde_json::json!({
            "id": "cl-1",
            "mac": "AA:BB:CC:01:02:03"
        })))
        .unwrap();
        assert_eq!(c.name, "01:02:03");
    }

    #[test]
    fn user_name_falls_back_to_email_local_part() {
        let u = user_from_wire(
            serde_json::from_value(serde_json::json!({
                "id": "u-9",
                "email": "casey@ocean.local"
            }))
            .unwrap(),
        )
        .unwrap();
        assert_eq!(u.name, "casey");
        assert_eq!(u.role, Role::Viewer);
    }

    #[test]
    fn user_without_email_is_rejected() {
        let err = user_from_wire(
            serde_json::from_value::<WireUser>(serde_json::json!({ "id": "u-9" })).unwrap(),
        );
        assert!(matches!(err, Err(CoreError::Validation { .. })));
    }
}
