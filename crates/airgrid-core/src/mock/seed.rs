// ── Deterministic seed dataset ──
//
// The same fleet every run: three SSIDs, three APs across two sites,
// 22 generated clients, three alerts, three users. Only timestamps
// move (they anchor to "now" so age displays stay sensible).

use chrono::{Duration, Utc};

use crate::model::{
    AccessPoint, Alert, ApStatus, Band, Client, MacAddress, Network, Role, SecurityMode, Settings,
    Severity, User,
};

pub(crate) fn networks() -> Vec<Network> {
    let now = Utc::now();
    vec![
        Network {
            id: "net-main".into(),
            name: "Ocean-Guest".into(),
            ssid: "Ocean-Guest".into(),
            security: SecurityMode::Wpa2,
            band: Some(Band::Dual),
            vlan: 20,
            enabled: true,
            created_at: Some(now),
        },
        Network {
            id: "net-staff".into(),
            name: "Ocean-Staff".into(),
            ssid: "Ocean-Staff".into(),
            security: SecurityMode::Wpa3,
            band: Some(Band::Ghz5),
            vlan: 10,
            enabled: true,
            created_at: Some(now),
        },
        Network {
            id: "net-iot".into(),
            name: "Ocean-IoT".into(),
            ssid: "Ocean-IoT".into(),
            security: SecurityMode::Wpa2,
            band: Some(Band::Ghz24),
            vlan: 30,
            enabled: false,
            created_at: Some(now),
        },
    ]
}

pub(crate) fn access_points() -> Vec<AccessPoint> {
    let now = Utc::now();
    vec![
        AccessPoint {
            id: "ap-hq-1".into(),
            name: "HQ-AP-1".into(),
            site: "HQ".into(),
            status: ApStatus::Online,
            channel: 36,
            throughput_mbps: 220,
            uplink: Some("1G".into()),
            network_id: Some("net-staff".into()),
            last_seen_at: Some(now),
        },
        AccessPoint {
            id: "ap-hq-2".into(),
            name: "HQ-AP-2".into(),
            site: "HQ".into(),
            status: ApStatus::Degraded,
            channel: 6,
            throughput_mbps: 95,
            uplink: Some("1G".into()),
            network_id: Some("net-main".into()),
            last_seen_at: Some(now),
        },
        AccessPoint {
            id: "ap-branch-1".into(),
            name: "Branch-AP-1".into(),
            site: "Branch".into(),
            status: ApStatus::Offline,
            channel: 11,
            throughput_mbps: 0,
            uplink: Some("100M".into()),
            network_id: Some("net-main".into()),
            last_seen_at: Some(now - Duration::minutes(55)),
        },
    ]
}

fn mk_mac(i: u32) -> MacAddress {
    MacAddress::new(format!(
        "aa:bb:cc:{:02}:{:02}:{:02}",
        i % 100,
        (i * 7) % 100,
        (i * 13) % 100
    ))
}

pub(crate) fn clients() -> Vec<Client> {
    let now = Utc::now();
    (1u32..=22)
        .map(|idx| {
            let ap_id = if idx % 3 == 0 { "ap-hq-2" } else { "ap-hq-1" };
            let network_id = if idx % 4 == 0 { "net-main" } else { "net-staff" };
            let quality = u8::try_from((40 + (idx * 9) % 60).min(100)).unwrap_or(100);
            let signal = -40 - i32::try_from((idx * 3) % 35).unwrap_or(0);
            // every sixth device dropped off the network
            let online = idx % 6 != 5;
            let name = if idx % 5 == 0 {
                format!("Device-{idx}")
            } else {
                format!("Client-{idx}")
            };

            Client {
                id: format!("cl-{idx}"),
                name,
                mac: mk_mac(idx),
                ip: format!("192.168.1.{}", (20 + idx) % 250).parse().ok(),
                signal_dbm: online.then_some(signal),
                quality: online.then_some(quality),
                blocked: idx % 9 == 0,
                network_id: Some(network_id.into()),
                ap_id: Some(ap_id.into()),
                rx_mbps: 5 + (idx % 8) * 3,
                tx_mbps: 3 + (idx % 6) * 4,
                last_seen_at: Some(if online {
                    now
                } else {
                    now - Duration::minutes(40)
                }),
            }
        })
        .collect()
}

pub(crate) fn alerts() -> Vec<Alert> {
    let now = Utc::now();
    vec![
        Alert {
            id: "al-1".into(),
            severity: Severity::Critical,
            title: "AP offline".into(),
            description: "Branch-AP-1 has not checked in for 55 minutes.".into(),
            acknowledged: false,
            created_at: now - Duration::minutes(55),
        },
        Alert {
            id: "al-2".into(),
            severity: Severity::Warning,
            title: "High interference detected".into(),
            description: "Channel utilization is high near HQ-AP-2.".into(),
            acknowledged: false,
            created_at: now - Duration::minutes(20),
        },
        Alert {
            id: "al-3".into(),
            severity: Severity::Info,
            title: "New client connected".into(),
            description: "Client-7 connected to HQ-AP-1.".into(),
            acknowledged: true,
            created_at: now - Duration::minutes(5),
        },
    ]
}

pub(crate) fn users() -> Vec<User> {
    vec![
        User {
            id: "u-1".into(),
            name: "Avery Admin".into(),
            email: "admin@ocean.local".into(),
            role: Role::Admin,
            enabled: true,
        },
        User {
            id: "u-2".into(),
            name: "Noah Operator".into(),
            email: "ops@ocean.local".into(),
            role: Role::Operator,
            enabled: true,
        },
        User {
            id: "u-3".into(),
            name: "Riley Viewer".into(),
            email: "viewer@ocean.local".into(),
            role: Role::Viewer,
            enabled: true,
        },
    ]
}

pub(crate) fn settings() -> Settings {
    Settings::default()
}
