// ── SSID network domain types ──

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

use super::common::Entity;

/// WiFi security mode. Closed enumeration.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, EnumString, Default,
)]
#[strum(ascii_case_insensitive)]
pub enum SecurityMode {
    #[default]
    #[serde(rename = "WPA2")]
    #[strum(serialize = "WPA2")]
    Wpa2,
    #[serde(rename = "WPA3")]
    #[strum(serialize = "WPA3")]
    Wpa3,
    #[serde(rename = "Open")]
    #[strum(serialize = "Open")]
    Open,
}

/// Radio band an SSID broadcasts on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, EnumString)]
#[strum(ascii_case_insensitive)]
pub enum Band {
    #[serde(rename = "2.4GHz")]
    #[strum(serialize = "2.4GHz")]
    Ghz24,
    #[serde(rename = "5GHz")]
    #[strum(serialize = "5GHz")]
    Ghz5,
    #[serde(rename = "Dual-band")]
    #[strum(serialize = "Dual-band")]
    Dual,
}

/// An SSID network.
///
/// `id` is immutable once created; everything else mutates via
/// patch-style updates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Network {
    pub id: String,
    pub name: String,
    pub ssid: String,
    pub security: SecurityMode,
    pub band: Option<Band>,
    pub vlan: u16,
    pub enabled: bool,
    pub created_at: Option<DateTime<Utc>>,
}

impl Entity for Network {
    fn id(&self) -> &str {
        &self.id
    }
}
