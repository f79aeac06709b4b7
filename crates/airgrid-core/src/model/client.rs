// ── Client domain types ──

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::net::IpAddr;
use strum::Display;

use super::common::{Entity, MacAddress};

/// Display-only presence projection.
///
/// `blocked` is the single canonical stored field; presence derives
/// from it plus signal visibility. Never stored, never transferred.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
#[strum(serialize_all = "lowercase")]
pub enum ClientPresence {
    Online,
    Offline,
    Blocked,
}

/// A known client device (connected now or seen recently).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Client {
    pub id: String,
    pub name: String,
    pub mac: MacAddress,
    pub ip: Option<IpAddr>,
    /// RSSI in dBm; `None` when the client is not currently associated.
    pub signal_dbm: Option<i32>,
    /// Connection quality 0-100 as reported by the AP.
    pub quality: Option<u8>,
    pub blocked: bool,
    /// Weak references; no cascade on delete.
    pub network_id: Option<String>,
    pub ap_id: Option<String>,
    pub rx_mbps: u32,
    pub tx_mbps: u32,
    pub last_seen_at: Option<DateTime<Utc>>,
}

impl Client {
    /// Derive the display presence: blocked wins, then signal presence.
    pub fn presence(&self) -> ClientPresence {
        if self.blocked {
            ClientPresence::Blocked
        } else if self.signal_dbm.is_some() {
            ClientPresence::Online
        } else {
            ClientPresence::Offline
        }
    }
}

impl Entity for Client {
    fn id(&self) -> &str {
        &self.id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Client {
        Client {
            id: "cl-1".into(),
            name: "Laptop".into(),
            mac: MacAddress::new("aa:bb:cc:01:07:13"),
            ip: "192.168.1.23".parse().ok(),
            signal_dbm: Some(-48),
            quality: Some(87),
            blocked: false,
            network_id: Some("net-staff".into()),
            ap_id: Some("ap-hq-1".into()),
            rx_mbps: 12,
            tx_mbps: 7,
            last_seen_at: None,
        }
    }

    #[test]
    fn presence_prefers_blocked() {
        let mut c = sample();
        c.blocked = true;
        assert_eq!(c.presence(), ClientPresence::Blocked);
    }

    #[test]
    fn presence_offline_without_signal() {
        let mut c = sample();
        c.signal_dbm = None;
        assert_eq!(c.presence(), ClientPresence::Offline);
    }

    #[test]
    fn presence_online_with_signal() {
        assert_eq!(sample().presence(), ClientPresence::Online);
    }
}
