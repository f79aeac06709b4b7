//! Small display formatting helpers.

use chrono::{DateTime, Utc};

/// Format a megabit rate as "220 Mbps" (or "1.2 Gbps").
pub fn fmt_mbps(mbps: u32) -> String {
    if mbps >= 1000 {
        format!("{:.1} Gbps", f64::from(mbps) / 1000.0)
    } else {
        format!("{mbps} Mbps")
    }
}

/// Format an RSSI value as "-48 dBm", or a dash when absent.
pub fn fmt_signal(signal_dbm: Option<i32>) -> String {
    signal_dbm.map_or_else(|| "─".into(), |dbm| format!("{dbm} dBm"))
}

/// Relative age of a timestamp: "just now", "5m ago", "2h ago", "3d ago".
pub fn fmt_ago(at: Option<DateTime<Utc>>, now: DateTime<Utc>) -> String {
    let Some(at) = at else {
        return "─".into();
    };
    let secs = (now - at).num_seconds().max(0);
    if secs < 30 {
        "just now".into()
    } else if secs < 3600 {
        format!("{}m ago", (secs / 60).max(1))
    } else if secs < 86_400 {
        format!("{}h ago", secs / 3600)
    } else {
        format!("{}d ago", secs / 86_400)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;
    use pretty_assertions::assert_eq;

    #[test]
    fn mbps_scales_to_gbps() {
        assert_eq!(fmt_mbps(95), "95 Mbps");
        assert_eq!(fmt_mbps(1250), "1.2 Gbps");
    }

    #[test]
    fn signal_dash_when_absent() {
        assert_eq!(fmt_signal(None), "─");
        assert_eq!(fmt_signal(Some(-48)), "-48 dBm");
    }

    #[test]
    fn ago_buckets() {
        let now = Utc::now();
        assert_eq!(fmt_ago(Some(now), now), "just now");
        assert_eq!(fmt_ago(Some(now - Duration::minutes(55)), now), "55m ago");
        assert_eq!(fmt_ago(Some(now - Duration::hours(3)), now), "3h ago");
        assert_eq!(fmt_ago(None, now), "─");
    }
}
