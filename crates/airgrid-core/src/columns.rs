// ── Table columns for the domain entities ──
//
// The column set doubles as the filter allow-list: free-text search
// only sees what is declared here.

use crate::model::{AccessPoint, Alert, ApStatus, Client, Network, Severity, User};
use crate::table::{CellValue, Column, Tabular};

fn text(value: impl Into<String>) -> CellValue {
    CellValue::Text(value.into())
}

fn opt_text(value: Option<&str>) -> CellValue {
    value.map_or(CellValue::Null, text)
}

fn status_cell(status: ApStatus) -> CellValue {
    let rank = match status {
        ApStatus::Online => 0.0,
        ApStatus::Degraded => 1.0,
        ApStatus::Offline => 2.0,
    };
    CellValue::Ordinal {
        rank,
        label: status.to_string(),
    }
}

fn severity_cell(severity: Severity) -> CellValue {
    CellValue::Ordinal {
        rank: f64::from(severity.rank()),
        label: severity.to_string(),
    }
}

fn time_cell(at: Option<chrono::DateTime<chrono::Utc>>) -> CellValue {
    at.map_or(CellValue::Null, |t| {
        #[allow(clippy::cast_precision_loss, clippy::as_conversions)]
        let rank = t.timestamp() as f64;
        CellValue::Ordinal {
            rank,
            label: t.format("%Y-%m-%d %H:%M").to_string(),
        }
    })
}

impl Tabular for Network {
    fn columns() -> &'static [Column] {
        const COLS: &[Column] = &[
            Column { key: "name", label: "Name", sortable: true },
            Column { key: "ssid", label: "SSID", sortable: true },
            Column { key: "security", label: "Security", sortable: true },
            Column { key: "band", label: "Band", sortable: true },
            Column { key: "vlan", label: "VLAN", sortable: true },
            Column { key: "enabled", label: "Status", sortable: true },
        ];
        COLS
    }

    fn cell(&self, key: &str) -> CellValue {
        match key {
            "name" => text(&self.name),
            "ssid" => text(&self.ssid),
            "security" => text(self.security.to_string()),
            "band" => self
                .band
                .map_or(CellValue::Null, |b| text(b.to_string())),
            "vlan" => CellValue::Number(f64::from(self.vlan)),
            "enabled" => CellValue::Bool(self.enabled),
            _ => CellValue::Null,
        }
    }
}

impl Tabular for AccessPoint {
    fn columns() -> &'static [Column] {
        const COLS: &[Column] = &[
            Column { key: "name", label: "Name", sortable: true },
            Column { key: "site", label: "Site", sortable: true },
            Column { key: "status", label: "Status", sortable: true },
            Column { key: "channel", label: "Ch", sortable: true },
            Column { key: "throughput", label: "Throughput", sortable: true },
            Column { key: "uplink", label: "Uplink", sortable: false },
            Column { key: "last_seen", label: "Last seen", sortable: true },
        ];
        COLS
    }

    fn cell(&self, key: &str) -> CellValue {
        match key {
            "name" => text(&self.name),
            "site" => text(&self.site),
            "status" => status_cell(self.status),
            "channel" => CellValue::Number(f64::from(self.channel)),
            "throughput" => CellValue::Number(f64::from(self.throughput_mbps)),
            "uplink" => opt_text(self.uplink.as_deref()),
            "last_seen" => time_cell(self.last_seen_at),
            _ => CellValue::Null,
        }
    }
}

impl Tabular for Client {
    fn columns() -> &'static [Column] {
        const COLS: &[Column] = &[
            Column { key: "name", label: "Name", sortable: true },
            Column { key: "mac", label: "MAC", sortable: false },
            Column { key: "ip", label: "IP Address", sortable: true },
            Column { key: "presence", label: "Status", sortable: true },
            Column { key: "signal", label: "Signal", sortable: true },
            Column { key: "quality", label: "Quality", sortable: true },
            Column { key: "rx", label: "Rx", sortable: true },
            Column { key: "tx", label: "Tx", sortable: true },
        ];
        COLS
    }

    fn cell(&self, key: &str) -> CellValue {
        match key {
            "name" => text(&self.name),
            "mac" => text(self.mac.as_str()),
            "ip" => self
                .ip
                .map_or(CellValue::Null, |ip| text(ip.to_string())),
            "presence" => text(self.presence().to_string()),
            "signal" => self
                .signal_dbm
                .map_or(CellValue::Null, |s| CellValue::Number(f64::from(s))),
            "quality" => self
                .quality
                .map_or(CellValue::Null, |q| CellValue::Number(f64::from(q))),
            "rx" => CellValue::Number(f64::from(self.rx_mbps)),
            "tx" => CellValue::Number(f64::from(self.tx_mbps)),
            _ => CellValue::Null,
        }
    }
}

impl Tabular for Alert {
    fn columns() -> &'static [Column] {
        const COLS: &[Column] = &[
            Column { key: "severity", label: "Severity", sortable: true },
            Column { key: "title", label: "Title", sortable: true },
            Column { key: "description", label: "Description", sortable: false },
            Column { key: "acknowledged", label: "Ack", sortable: true },
            Column { key: "created", label: "Raised", sortable: true },
        ];
        COLS
    }

    fn cell(&self, key: &str) -> CellValue {
        match key {
            "severity" => severity_cell(self.severity),
            "title" => text(&self.title),
            "description" => text(&self.description),
            "acknowledged" => CellValue::Bool(self.acknowledged),
            "created" => time_cell(Some(self.created_at)),
            _ => CellValue::Null,
        }
    }
}

impl Tabular for User {
    fn columns() -> &'static [Column] {
        const COLS: &[Column] = &[
            Column { key: "name", label: "Name", sortable: true },
            Column { key: "email", label: "Email", sortable: true },
            Column { key: "role", label: "Role", sortable: true },
            Column { key: "enabled", label: "Enabled", sortable: true },
        ];
        COLS
    }

    fn cell(&self, key: &str) -> CellValue {
        match key {
            "name" => text(&self.name),
            "email" => text(&self.email),
            "role" => text(self.role.to_string()),
            "enabled" => CellValue::Bool(self.enabled),
            _ => CellValue::Null,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::table::{SortDir, TableQuery, compute};

    #[test]
    fn alerts_sort_by_severity_rank_not_alphabetically() {
        let mut alerts = crate::mock::MockStore::seeded().alerts.list();
        alerts.reverse();

        let q = TableQuery::new(10).with_sort("severity", SortDir::Asc);
        let view = compute(&alerts, &q);
        let severities: Vec<Severity> = view.rows.iter().map(|a| a.severity).collect();
        assert_eq!(
            severities,
            vec![Severity::Critical, Severity::Warning, Severity::Info]
        );
    }

    #[test]
    fn client_signal_none_sorts_last() {
        let clients = crate::mock::MockStore::seeded().clients.list();
        let q = TableQuery::new(100).with_sort("signal", SortDir::Desc);
        let view = compute(&clients, &q);
        let last = view.rows.last().expect("fleet is not empty");
        assert!(last.signal_dbm.is_none());
    }
}
