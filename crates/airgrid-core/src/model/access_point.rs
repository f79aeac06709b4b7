// ── Access point domain types ──

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

use super::common::Entity;

/// Access point health. Closed enumeration.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, EnumString, Default,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum ApStatus {
    Online,
    Degraded,
    #[default]
    Offline,
}

/// A managed access point.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AccessPoint {
    pub id: String,
    pub name: String,
    pub site: String,
    pub status: ApStatus,
    pub channel: u16,
    pub throughput_mbps: u32,
    pub uplink: Option<String>,
    /// Weak reference to a Network; no cascade on delete.
    pub network_id: Option<String>,
    pub last_seen_at: Option<DateTime<Utc>>,
}

impl AccessPoint {
    /// Minutes since the AP last checked in, if it ever did.
    pub fn minutes_since_seen(&self, now: DateTime<Utc>) -> Option<i64> {
        self.last_seen_at.map(|t| (now - t).num_minutes().max(0))
    }
}

impl Entity for AccessPoint {
    fn id(&self) -> &str {
        &self.id
    }
}
