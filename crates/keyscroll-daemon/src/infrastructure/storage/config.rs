//! TOML-based configuration for the `keyscroll` daemon.
//!
//! The file lives at `$XDG_CONFIG_HOME/keyscroll/config.toml`, or
//! `~/.config/keyscroll/config.toml` when `XDG_CONFIG_HOME` is unset.  The
//! `--config` flag points at any other file.
//!
//! ```toml
//! [general]
//! log_level = "info"
//!
//! [action]
//! variant = "key_chord"
//! settings = "SPEED=5:MOD=Control:UP=Up:DOWN=Down"
//! speed_curve = { base = 220, step = 20 }
//! ```
//!
//! # Serde default values
//!
//! Every field has a `#[serde(default)]`, so a missing file, a missing
//! section and a missing key all mean "use the default".  `speed_curve` is
//! optional; when absent the built-in curve of `variant` applies.

use std::path::{Path, PathBuf};

use keyscroll_core::{ScrollVariant, SpeedCurve};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::application::scroll_action::ScrollActionConfig;

/// Error type for configuration file operations.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Neither `XDG_CONFIG_HOME` nor `HOME` is set.
    #[error("could not determine config directory (XDG_CONFIG_HOME and HOME are unset)")]
    NoPlatformConfigDir,

    #[error("I/O error accessing config at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("failed to serialize config: {0}")]
    Serialize(#[from] toml::ser::Error),
}

// ── Config schema types ───────────────────────────────────────────────────────

/// Top-level daemon configuration stored on disk.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct DaemonConfig {
    #[serde(default)]
    pub general: GeneralConfig,
    #[serde(default)]
    pub action: ActionConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct GeneralConfig {
    /// `tracing` filter directive, e.g. `"info"` or `"keyscroll_daemon=debug"`.
    #[serde(default = "default_log_level")]
    pub log_level: String,
    /// X display to connect to; `$DISPLAY` when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display: Option<String>,
}

/// How gestures are turned into scrolling.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ActionConfig {
    #[serde(default)]
    pub variant: ScrollVariant,
    /// Settings string in the grammar of `variant`.
    #[serde(default = "default_settings")]
    pub settings: String,
    /// Overrides the built-in speed curve of `variant`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub speed_curve: Option<SpeedCurve>,
}

// ── Default helpers ───────────────────────────────────────────────────────────

fn default_log_level() -> String {
    "info".to_string()
}
fn default_settings() -> String {
    "SPEED=5:UP=Up:DOWN=Down:LEFT=Left:RIGHT=Right".to_string()
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            display: None,
        }
    }
}

impl Default for ActionConfig {
    fn default() -> Self {
        Self {
            variant: ScrollVariant::default(),
            settings: default_settings(),
            speed_curve: None,
        }
    }
}

impl ActionConfig {
    /// Builds the action configuration, applying the curve override if set.
    pub fn to_action_config(&self) -> ScrollActionConfig {
        let config = ScrollActionConfig::new(self.variant, self.settings.clone());
        match self.speed_curve {
            Some(curve) => config.with_curve(curve),
            None => config,
        }
    }
}

// ── Config repository ─────────────────────────────────────────────────────────

/// Directory holding the config file.
///
/// # Errors
///
/// Returns [`ConfigError::NoPlatformConfigDir`] when neither
/// `XDG_CONFIG_HOME` nor `HOME` is set.
pub fn config_dir() -> Result<PathBuf, ConfigError> {
    xdg_config_home()
        .map(|base| base.join("keyscroll"))
        .ok_or(ConfigError::NoPlatformConfigDir)
}

/// Default path of the config file.
///
/// # Errors
///
/// Returns [`ConfigError::NoPlatformConfigDir`] if the base directory cannot be
/// determined.
pub fn config_file_path() -> Result<PathBuf, ConfigError> {
    Ok(config_dir()?.join("config.toml"))
}

/// Loads the config from `path`, or from [`config_file_path`] when `None`.
///
/// A missing file yields `DaemonConfig::default()`.
///
/// # Errors
///
/// Returns [`ConfigError::Io`] for file-system errors other than "not found",
/// and [`ConfigError::Parse`] if the TOML is malformed.
pub fn load_config(path: Option<&Path>) -> Result<DaemonConfig, ConfigError> {
    let path = match path {
        Some(p) => p.to_path_buf(),
        None => config_file_path()?,
    };

    match std::fs::read_to_string(&path) {
        Ok(content) => Ok(toml::from_str(&content)?),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(DaemonConfig::default()),
        Err(source) => Err(ConfigError::Io { path, source }),
    }
}

/// Writes `config` to `path`, or to [`config_file_path`] when `None`, and
/// returns the path written.
///
/// Creates the parent directory if needed.
///
/// # Errors
///
/// Returns [`ConfigError::Io`] for file-system failures or
/// [`ConfigError::Serialize`] if serialization fails.
pub fn save_config(config: &DaemonConfig, path: Option<&Path>) -> Result<PathBuf, ConfigError> {
    let path = match path {
        Some(p) => p.to_path_buf(),
        None => config_file_path()?,
    };

    if let Some(dir) = path.parent().filter(|d| !d.as_os_str().is_empty()) {
        std::fs::create_dir_all(dir).map_err(|source| ConfigError::Io {
            path: dir.to_path_buf(),
            source,
        })?;
    }

    let content = toml::to_string_pretty(config)?;
    std::fs::write(&path, content).map_err(|source| ConfigError::Io {
        path: path.clone(),
        source,
    })?;
    Ok(path)
}

fn xdg_config_home() -> Option<PathBuf> {
    std::env::var_os("XDG_CONFIG_HOME")
        .filter(|p| !p.is_empty())
        .map(PathBuf::from)
        .or_else(|| std::env::var_os("HOME").map(|h| PathBuf::from(h).join(".config")))
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    fn scratch_dir(name: &str) -> PathBuf {
        std::env::temp_dir().join(format!("keyscroll_test_{}_{name}", std::process::id()))
    }

    #[test]
    fn test_default_config_uses_key_chord_and_info() {
        // Arrange / Act
        let cfg = DaemonConfig::default();

        // Assert
        assert_eq!(cfg.general.log_level, "info");
        assert_eq!(cfg.general.display, None);
        assert_eq!(cfg.action.variant, ScrollVariant::KeyChord);
        assert_eq!(cfg.action.speed_curve, None);
    }

    #[test]
    fn test_empty_toml_yields_defaults() {
        let cfg: DaemonConfig = toml::from_str("").expect("deserialize empty");
        assert_eq!(cfg, DaemonConfig::default());
    }

    #[test]
    fn test_partial_action_section_keeps_other_defaults() {
        // Arrange
        let toml_str = r#"
[action]
variant = "mouse_wheel"
"#;

        // Act
        let cfg: DaemonConfig = toml::from_str(toml_str).expect("deserialize partial");

        // Assert
        assert_eq!(cfg.action.variant, ScrollVariant::MouseWheel);
        assert_eq!(cfg.action.settings, default_settings());
        assert_eq!(cfg.general.log_level, "info");
    }

    #[test]
    fn test_speed_curve_override_reaches_action_config() {
        let toml_str = r#"
[action]
variant = "positional"
settings = "SPEED=3:Control+Up+Down"
speed_curve = { base = 50, step = 4 }
"#;

        let cfg: DaemonConfig = toml::from_str(toml_str).expect("deserialize");
        let action = cfg.action.to_action_config();

        assert_eq!(action.variant, ScrollVariant::Positional);
        assert_eq!(action.curve, SpeedCurve { base: 50, step: 4 });
        assert_eq!(action.settings, "SPEED=3:Control+Up+Down");
    }

    #[test]
    fn test_action_config_without_override_uses_variant_curve() {
        let action = ActionConfig {
            variant: ScrollVariant::MouseWheel,
            settings: "SPEED=2".into(),
            speed_curve: None,
        }
        .to_action_config();

        assert_eq!(action.curve, SpeedCurve::MOUSE_WHEEL);
    }

    #[test]
    fn test_unknown_variant_is_a_parse_error() {
        let result: Result<DaemonConfig, toml::de::Error> =
            toml::from_str("[action]\nvariant = \"trackpad\"\n");
        assert!(result.is_err());
    }

    #[test]
    fn test_unset_display_is_omitted_from_toml() {
        let toml_str = toml::to_string_pretty(&DaemonConfig::default()).expect("serialize");
        assert!(!toml_str.contains("display"));
        assert!(!toml_str.contains("speed_curve"));
    }

    #[test]
    fn test_load_config_returns_default_when_file_absent() {
        let path = PathBuf::from("/nonexistent/path/that/cannot/exist/config.toml");

        let cfg = load_config(Some(&path)).expect("missing file means defaults");

        assert_eq!(cfg, DaemonConfig::default());
    }

    #[test]
    fn test_load_config_reports_malformed_toml() {
        // Arrange
        let dir = scratch_dir("malformed");
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("config.toml");
        std::fs::write(&path, "[[[ not valid toml").unwrap();

        // Act
        let result = load_config(Some(&path));

        // Assert
        assert!(matches!(result, Err(ConfigError::Parse(_))));
        std::fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn test_save_and_load_config_round_trip_via_temp_dir() {
        // Arrange
        let dir = scratch_dir("round_trip");
        let path = dir.join("nested").join("config.toml");
        let mut cfg = DaemonConfig::default();
        cfg.general.log_level = "debug".to_string();
        cfg.general.display = Some(":1".to_string());
        cfg.action.speed_curve = Some(SpeedCurve { base: 60, step: 5 });

        // Act
        let written = save_config(&cfg, Some(&path)).unwrap();
        let loaded = load_config(Some(&written)).unwrap();

        // Assert
        assert_eq!(written, path);
        assert_eq!(loaded, cfg);
        std::fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn test_config_file_path_ends_with_keyscroll_config_toml() {
        if let Ok(path) = config_file_path() {
            assert!(
                path.ends_with("keyscroll/config.toml"),
                "unexpected config path {path:?}"
            );
        }
        // NoPlatformConfigDir is acceptable in a stripped environment.
    }
}
