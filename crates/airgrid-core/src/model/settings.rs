// ── Site-wide radio settings (singleton resource) ──

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use strum::{Display, EnumString};

/// 2.4/5 GHz channels a fixed plan may pin.
pub const ALLOWED_CHANNELS: &[u16] = &[1, 6, 11, 36, 40, 44, 48, 149, 153, 157, 161];

/// Channel selection plan: automatic or pinned to one channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub enum ChannelPlan {
    Auto,
    Fixed(u16),
}

impl fmt::Display for ChannelPlan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Auto => f.write_str("Auto"),
            Self::Fixed(ch) => write!(f, "{ch}"),
        }
    }
}

impl FromStr for ChannelPlan {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.eq_ignore_ascii_case("auto") {
            return Ok(Self::Auto);
        }
        let ch: u16 = trimmed
            .parse()
            .map_err(|_| format!("expected \"Auto\" or a channel number, got {trimmed:?}"))?;
        if ALLOWED_CHANNELS.contains(&ch) {
            Ok(Self::Fixed(ch))
        } else {
            Err(format!("channel {ch} is not in the allowed set"))
        }
    }
}

impl From<ChannelPlan> for String {
    fn from(plan: ChannelPlan) -> Self {
        plan.to_string()
    }
}

impl TryFrom<String> for ChannelPlan {
    type Error = String;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

/// Transmit power preset.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, EnumString, Default,
)]
#[strum(ascii_case_insensitive)]
pub enum TxPower {
    #[default]
    Auto,
    Low,
    Medium,
    High,
}

/// Site-wide radio settings. Singleton: no id, fetched and replaced whole.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    pub country_code: String,
    pub channel_plan: ChannelPlan,
    pub allow_guest_isolation: bool,
    pub tx_power: TxPower,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            country_code: "US".into(),
            channel_plan: ChannelPlan::Auto,
            allow_guest_isolation: true,
            tx_power: TxPower::Auto,
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn channel_plan_parses_auto_case_insensitively() {
        assert_eq!("AUTO".parse::<ChannelPlan>().unwrap(), ChannelPlan::Auto);
    }

    #[test]
    fn channel_plan_accepts_allowed_channels() {
        assert_eq!("36".parse::<ChannelPlan>().unwrap(), ChannelPlan::Fixed(36));
    }

    #[test]
    fn channel_plan_rejects_unknown_channels() {
        assert!("13".parse::<ChannelPlan>().is_err());
        assert!("bogus".parse::<ChannelPlan>().is_err());
    }

    #[test]
    fn tx_power_parses_case_insensitively() {
        assert_eq!("medium".parse::<TxPower>().unwrap(), TxPower::Medium);
    }
}
