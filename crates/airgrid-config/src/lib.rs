//! Shared configuration for the airgrid console.
//!
//! TOML file + `AIRGRID_*` environment variables, a feature-flag
//! payload parser, and the two persisted UI preferences. Resolution
//! ends in a [`GatewaySettings`] value — the runtime choice between
//! the remote backend and the mock layer is made here, injected into
//! the app, and displayed read-only in the Settings screen.

pub mod flags;
pub mod prefs;

use std::path::PathBuf;
use std::time::Duration;

use directories::ProjectDirs;
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use airgrid_core::{GatewayMode, GatewaySettings};

use crate::flags::FlagMap;

// ── Error ───────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("config loading failed: {0}")]
    Figment(Box<figment::Error>),

    #[error("failed to serialize config: {0}")]
    Serialization(#[from] toml::ser::Error),

    #[error("failed to parse config: {0}")]
    Deserialization(#[from] toml::de::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<figment::Error> for ConfigError {
    fn from(err: figment::Error) -> Self {
        Self::Figment(Box::new(err))
    }
}

// ── Config ──────────────────────────────────────────────────────────

/// Top-level configuration, merged from defaults, the TOML file, and
/// `AIRGRID_*` environment variables (env wins).
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Config {
    /// REST backend base URL (e.g. "https://wifi.ocean.local/api").
    pub api_base: Option<String>,

    /// Websocket URL. Parsed and displayed, not consumed — kept for
    /// parity with the deployment environment.
    pub ws_url: Option<String>,

    /// Force the mock data layer even when an api_base is configured.
    pub mock: Option<bool>,

    /// Request timeout in seconds.
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,

    /// Rows per table page.
    #[serde(default = "default_page_size")]
    pub page_size: usize,

    /// Raw feature-flag payload: JSON object, JSON array, or CSV.
    pub feature_flags: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_base: None,
            ws_url: None,
            mock: None,
            timeout_secs: default_timeout(),
            page_size: default_page_size(),
            feature_flags: None,
        }
    }
}

fn default_timeout() -> u64 {
    15
}
fn default_page_size() -> usize {
    10
}

impl Config {
    /// Parse the feature-flag payload into its normalized map.
    pub fn flags(&self) -> FlagMap {
        flags::parse_flags(self.feature_flags.as_deref().unwrap_or_default())
    }

    /// Decide which gateway implementation serves this run.
    ///
    /// Mock wins when asked for (flag or config) or when no backend is
    /// configured at all; there is nothing else to talk to.
    pub fn resolve_gateway(&self) -> GatewaySettings {
        let flag_mock = {
            let flags = self.flags();
            flags::flag_enabled(&flags, "use_mocks", false)
                || flags::flag_enabled(&flags, "useMocks", false)
        };
        let mode = if flag_mock || self.mock.unwrap_or(false) || self.api_base.is_none() {
            GatewayMode::Mock
        } else {
            GatewayMode::Remote
        };

        GatewaySettings {
            mode,
            api_base: self.api_base.clone(),
            timeout: Duration::from_secs(self.timeout_secs),
        }
    }
}

// ── Config file path ────────────────────────────────────────────────

/// Resolve the config file path via XDG / platform conventions.
pub fn config_path() -> PathBuf {
    ProjectDirs::from("local", "ocean", "airgrid").map_or_else(
        || PathBuf::from(".airgrid/config.toml"),
        |dirs| dirs.config_dir().join("config.toml"),
    )
}

// ── Config loading ──────────────────────────────────────────────────

/// Load the full Config from defaults + file + environment.
pub fn load_config() -> Result<Config, ConfigError> {
    load_config_from(&config_path())
}

/// Same merge order against an explicit file path (used by tests).
pub fn load_config_from(path: &std::path::Path) -> Result<Config, ConfigError> {
    let figment = Figment::new()
        .merge(Serialized::defaults(Config::default()))
        .merge(Toml::file(path))
        .merge(Env::prefixed("AIRGRID_"));

    let config: Config = figment.extract()?;
    Ok(config)
}

/// Load config, falling back to defaults when nothing is readable.
pub fn load_config_or_default() -> Config {
    load_config().unwrap_or_default()
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn defaults_select_mock_mode() {
        let cfg = Config::default();
        let gw = cfg.resolve_gateway();
        assert_eq!(gw.mode, GatewayMode::Mock);
        assert_eq!(gw.timeout, Duration::from_secs(15));
    }

    #[test]
    fn api_base_selects_remote_mode() {
        let cfg = Config {
            api_base: Some("https://wifi.ocean.local/api".into()),
            ..Config::default()
        };
        assert_eq!(cfg.resolve_gateway().mode, GatewayMode::Remote);
    }

    #[test]
    fn mock_flag_overrides_api_base() {
        let cfg = Config {
            api_base: Some("https://wifi.ocean.local/api".into()),
            feature_flags: Some("useMocks".into()),
            ..Config::default()
        };
        assert_eq!(cfg.resolve_gateway().mode, GatewayMode::Mock);
    }

    #[test]
    fn explicit_mock_config_wins_too() {
        let cfg = Config {
            api_base: Some("https://wifi.ocean.local/api".into()),
            mock: Some(true),
            ..Config::default()
        };
        assert_eq!(cfg.resolve_gateway().mode, GatewayMode::Mock);
    }

    #[test]
    fn toml_file_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(
            &path,
            "api_base = \"http://127.0.0.1:4000\"\ntimeout_secs = 3\npage_size = 25\n",
        )
        .unwrap();

        let cfg = load_config_from(&path).unwrap();
        assert_eq!(cfg.api_base.as_deref(), Some("http://127.0.0.1:4000"));
        assert_eq!(cfg.timeout_secs, 3);
        assert_eq!(cfg.page_size, 25);
    }

    #[test]
    fn missing_file_yields_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let cfg = load_config_from(&dir.path().join("nope.toml")).unwrap();
        assert_eq!(cfg.page_size, 10);
    }
}
