// ── Settings form validation ──
//
// Runs entirely client-side and never reaches the network: a form that
// fails validation blocks submission with one message per offending
// field.

use crate::model::{ChannelPlan, Settings, TxPower};

/// A per-field validation failure, surfaced next to the field itself.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    pub field: &'static str,
    pub message: String,
}

/// The settings form as the user typed it (text until validated).
#[derive(Debug, Clone, Default)]
pub struct SettingsForm {
    pub country_code: String,
    pub channel_plan: String,
    pub tx_power: String,
    pub allow_guest_isolation: bool,
}

impl SettingsForm {
    pub fn from_settings(settings: &Settings) -> Self {
        Self {
            country_code: settings.country_code.clone(),
            channel_plan: settings.channel_plan.to_string(),
            tx_power: settings.tx_power.to_string(),
            allow_guest_isolation: settings.allow_guest_isolation,
        }
    }

    /// Validate every field, collecting all failures rather than
    /// stopping at the first.
    pub fn validate(&self) -> Result<Settings, Vec<FieldError>> {
        let mut errors = Vec::new();

        let country = self.country_code.trim().to_uppercase();
        if country.len() != 2 || !country.chars().all(|c| c.is_ascii_alphabetic()) {
            errors.push(FieldError {
                field: "country_code",
                message: "country code must be two letters (e.g. US)".into(),
            });
        }

        let channel_plan = match self.channel_plan.parse::<ChannelPlan>() {
            Ok(plan) => Some(plan),
            Err(reason) => {
                errors.push(FieldError {
                    field: "channel_plan",
                    message: reason,
                });
                None
            }
        };

        let tx_power = match self.tx_power.trim().parse::<TxPower>() {
            Ok(power) => Some(power),
            Err(_) => {
                errors.push(FieldError {
                    field: "tx_power",
                    message: "expected Auto, Low, Medium, or High".into(),
                });
                None
            }
        };

        if errors.is_empty() {
            Ok(Settings {
                country_code: country,
                channel_plan: channel_plan.unwrap_or(ChannelPlan::Auto),
                allow_guest_isolation: self.allow_guest_isolation,
                tx_power: tx_power.unwrap_or(TxPower::Auto),
            })
        } else {
            Err(errors)
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn valid_form_normalizes_country_case() {
        let form = SettingsForm {
            country_code: "de".into(),
            channel_plan: "Auto".into(),
            tx_power: "high".into(),
            allow_guest_isolation: false,
        };
        let settings = form.validate().unwrap();
        assert_eq!(settings.country_code, "DE");
        assert_eq!(settings.tx_power, TxPower::High);
        assert!(!settings.allow_guest_isolation);
    }

    #[test]
    fn each_invalid_field_gets_its_own_error() {
        let form = SettingsForm {
            country_code: "USA".into(),
            channel_plan: "13".into(),
            tx_power: "max".into(),
            allow_guest_isolation: true,
        };
        let errors = form.validate().unwrap_err();
        let fields: Vec<&str> = errors.iter().map(|e| e.field).collect();
        assert_eq!(fields, vec!["country_code", "channel_plan", "tx_power"]);
    }

    #[test]
    fn round_trip_through_form_is_lossless() {
        let settings = Settings {
            country_code: "GB".into(),
            channel_plan: ChannelPlan::Fixed(44),
            allow_guest_isolation: true,
            tx_power: TxPower::Low,
        };
        let form = SettingsForm::from_settings(&settings);
        assert_eq!(form.validate().unwrap(), settings);
    }
}
