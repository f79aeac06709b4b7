//! Wire-level payload types.
//!
//! Response DTOs are deliberately loose: every field except `id` is
//! optional and common field-name variants are accepted via aliases.
//! `airgrid-core::convert` turns these into strict domain records with a
//! documented fallback order; nothing duck-typed escapes that boundary.
//!
//! Request bodies are strict and typed. Patch requests serialize only
//! the fields they set, so a partial update never clobbers siblings.

use serde::{Deserialize, Serialize};

// ── Response DTOs ───────────────────────────────────────────────────

/// An SSID network as the backend sends it.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WireNetwork {
    pub id: String,
    pub name: Option<String>,
    pub ssid: Option<String>,
    pub security: Option<String>,
    pub band: Option<String>,
    pub vlan: Option<u16>,
    pub enabled: Option<bool>,
    /// Some backends report `status: "active" | "disabled"` instead of
    /// the `enabled` boolean.
    pub status: Option<String>,
    #[serde(alias = "created_at")]
    pub created_at: Option<chrono::DateTime<chrono::Utc>>,
}

/// An access point as the backend sends it.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WireAccessPoint {
    pub id: String,
    pub name: Option<String>,
    pub site: Option<String>,
    pub status: Option<String>,
    pub channel: Option<u16>,
    #[serde(alias = "throughput_mbps", alias = "throughput")]
    pub throughput_mbps: Option<u32>,
    pub uplink: Option<String>,
    #[serde(alias = "network_id")]
    pub network_id: Option<String>,
    #[serde(alias = "last_seen_at")]
    pub last_seen_at: Option<chrono::DateTime<chrono::Utc>>,
}

/// A connected (or known) client as the backend sends it.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WireClient {
    pub id: String,
    pub name: Option<String>,
    pub mac: Option<String>,
    pub ip: Option<String>,
    /// `status: "online" | "offline" | "blocked"` on backends that do
    /// not send the `blocked` boolean.
    pub status: Option<String>,
    pub blocked: Option<bool>,
    #[serde(alias = "signal_dbm", alias = "signal")]
    pub rssi: Option<i32>,
    pub quality: Option<u8>,
    #[serde(alias = "network_id")]
    pub network_id: Option<String>,
    #[serde(alias = "ap_id")]
    pub ap_id: Option<String>,
    #[serde(alias = "rx_mbps")]
    pub rx_mbps: Option<u32>,
    #[serde(alias = "tx_mbps")]
    pub tx_mbps: Option<u32>,
    #[serde(alias = "last_seen_at")]
    pub last_seen_at: Option<chrono::DateTime<chrono::Utc>>,
}

/// An alert as the backend sends it.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WireAlert {
    pub id: String,
    pub severity: Option<String>,
    pub title: Option<String>,
    #[serde(alias = "message", alias = "msg")]
    pub description: Option<String>,
    pub acknowledged: Option<bool>,
    #[serde(alias = "created_at")]
    pub created_at: Option<chrono::DateTime<chrono::Utc>>,
}

/// An admin user as the backend sends it.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WireUser {
    pub id: String,
    pub name: Option<String>,
    pub email: Option<String>,
    pub role: Option<String>,
    pub enabled: Option<bool>,
}

/// Site-wide radio settings (singleton resource).
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WireSettings {
    #[serde(alias = "country_code")]
    pub country_code: Option<String>,
    #[serde(alias = "channel_plan")]
    pub channel_plan: Option<String>,
    #[serde(alias = "allow_guest_isolation")]
    pub allow_guest_isolation: Option<bool>,
    #[serde(alias = "tx_power")]
    pub tx_power: Option<String>,
}

/// `/health` response.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WireHealth {
    pub status: String,
    pub version: Option<String>,
}

// ── Request bodies ──────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateNetworkRequest {
    pub name: String,
    pub ssid: String,
    pub security: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub band: Option<String>,
    pub vlan: u16,
    pub enabled: bool,
}

#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateNetworkRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ssid: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub security: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub band: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vlan: Option<u16>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub enabled: Option<bool>,
}

#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateAccessPointRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub channel: Option<u16>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub network_id: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateClientRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub blocked: Option<bool>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AcknowledgeAlertRequest {
    pub acknowledged: bool,
}

#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateUserRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub enabled: Option<bool>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateSettingsRequest {
    pub country_code: String,
    pub channel_plan: String,
    pub allow_guest_isolation: bool,
    pub tx_power: String,
}
