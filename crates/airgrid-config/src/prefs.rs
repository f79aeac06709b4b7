//! Persisted UI preferences.
//!
//! Exactly two things survive a restart: the theme and the last
//! selected network/AP. Everything else is in-memory and resets.
//! Stored as a small TOML file under the platform data directory.

use std::path::{Path, PathBuf};

use directories::ProjectDirs;
use serde::{Deserialize, Serialize};

use crate::ConfigError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Dark,
    Light,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UiPrefs {
    #[serde(default)]
    pub theme: Theme,
    pub last_network_id: Option<String>,
    pub last_ap_id: Option<String>,
}

/// Resolve the prefs file path via XDG / platform conventions.
pub fn prefs_path() -> PathBuf {
    ProjectDirs::from("local", "ocean", "airgrid").map_or_else(
        || PathBuf::from(".airgrid/prefs.toml"),
        |dirs| dirs.data_dir().join("prefs.toml"),
    )
}

/// Load prefs from an explicit path. A missing or unreadable file is
/// not an error — preferences always have a sensible default.
pub fn load_prefs_from(path: &Path) -> UiPrefs {
    std::fs::read_to_string(path)
        .ok()
        .and_then(|raw| toml::from_str(&raw).ok())
        .unwrap_or_default()
}

pub fn load_prefs() -> UiPrefs {
    load_prefs_from(&prefs_path())
}

/// Persist prefs to an explicit path, creating parent directories.
pub fn save_prefs_to(path: &Path, prefs: &UiPrefs) -> Result<(), ConfigError> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let raw = toml::to_string_pretty(prefs)?;
    std::fs::write(path, raw)?;
    Ok(())
}

pub fn save_prefs(prefs: &UiPrefs) -> Result<(), ConfigError> {
    save_prefs_to(&prefs_path(), prefs)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn round_trip_preserves_everything() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("prefs.toml");

        let prefs = UiPrefs {
            theme: Theme::Light,
            last_network_id: Some("net-staff".into()),
            last_ap_id: None,
        };
        save_prefs_to(&path, &prefs).unwrap();

        assert_eq!(load_prefs_from(&path), prefs);
    }

    #[test]
    fn missing_file_yields_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let prefs = load_prefs_from(&dir.path().join("absent.toml"));
        assert_eq!(prefs, UiPrefs::default());
        assert_eq!(prefs.theme, Theme::Dark);
    }

    #[test]
    fn corrupt_file_yields_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("prefs.toml");
        std::fs::write(&path, "not = [valid").unwrap();
        assert_eq!(load_prefs_from(&path), UiPrefs::default());
    }
}
