use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::shared::constants::{
    BLINK_THRESHOLD_RATIO, CLICK_COOLDOWN_SECS, PROCESS_EVERY_N_FRAMES, REOPEN_GRACE_SECS,
    SCREENSHOT_HOLD_SECS, SETTINGS_DIR_NAME, ZOOM_COOLDOWN_SECS, ZOOM_SENSITIVITY,
};

#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    #[error("failed to read settings file {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("failed to parse settings file {path}: {source}")]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },
    #[error("failed to write settings file {path}: {source}")]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("invalid setting {field}: {reason}")]
    Invalid { field: &'static str, reason: String },
}

/// Tunables for gesture interpretation. Durations are seconds in JSON.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GestureConfig {
    pub blink_ratio: f64,
    pub click_cooldown_secs: f64,
    pub zoom_cooldown_secs: f64,
    pub zoom_sensitivity: f64,
    pub screenshot_hold_secs: f64,
    pub reopen_grace_secs: f64,
    pub process_every: usize,
}

impl Default for GestureConfig {
    fn default() -> Self {
        Self {
            blink_ratio: BLINK_THRESHOLD_RATIO,
            click_cooldown_secs: CLICK_COOLDOWN_SECS,
            zoom_cooldown_secs: ZOOM_COOLDOWN_SECS,
            zoom_sensitivity: ZOOM_SENSITIVITY,
            screenshot_hold_secs: SCREENSHOT_HOLD_SECS,
            reopen_grace_secs: REOPEN_GRACE_SECS,
            process_every: PROCESS_EVERY_N_FRAMES,
        }
    }
}

impl GestureConfig {
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|d| d.join(SETTINGS_DIR_NAME).join("settings.json"))
    }

    /// Reads settings from `path`. A missing file yields the defaults, as do
    /// fields absent from the file. Malformed JSON is an error.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let json = match fs::read_to_string(path) {
            Ok(json) => json,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                log::debug!("No settings at {}, using defaults", path.display());
                return Ok(Self::default());
            }
            Err(source) => {
                return Err(ConfigError::Read {
                    path: path.to_path_buf(),
                    source,
                })
            }
        };
        serde_json::from_str(&json).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn save(&self, path: &Path) -> Result<(), ConfigError> {
        let write_err = |source| ConfigError::Write {
            path: path.to_path_buf(),
            source,
        };
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(write_err)?;
        }
        let json = serde_json::to_string_pretty(self).map_err(|e| ConfigError::Write {
            path: path.to_path_buf(),
            source: e.into(),
        })?;
        fs::write(path, json).map_err(write_err)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        fn invalid(field: &'static str, reason: &str) -> ConfigError {
            ConfigError::Invalid {
                field,
                reason: reason.to_string(),
            }
        }

        if !(self.blink_ratio > 0.0 && self.blink_ratio < 1.0) {
            return Err(invalid("blink_ratio", "must be in (0, 1)"));
        }
        if !self.zoom_sensitivity.is_finite() || self.zoom_sensitivity < 0.0 {
            return Err(invalid("zoom_sensitivity", "must be a finite non-negative number"));
        }
        let durations = [
            ("click_cooldown_secs", self.click_cooldown_secs),
            ("zoom_cooldown_secs", self.zoom_cooldown_secs),
            ("screenshot_hold_secs", self.screenshot_hold_secs),
            ("reopen_grace_secs", self.reopen_grace_secs),
        ];
        for (field, value) in durations {
            if Duration::try_from_secs_f64(value).is_err() {
                return Err(invalid(field, "must be a non-negative number of seconds in range"));
            }
        }
        if self.screenshot_hold_secs <= 0.0 {
            return Err(invalid("screenshot_hold_secs", "must be positive"));
        }
        if self.process_every == 0 {
            return Err(invalid("process_every", "must be at least 1"));
        }
        Ok(())
    }

    pub fn click_cooldown(&self) -> Duration {
        secs(self.click_cooldown_secs)
    }

    pub fn zoom_cooldown(&self) -> Duration {
        secs(self.zoom_cooldown_secs)
    }

    pub fn screenshot_hold(&self) -> Duration {
        secs(self.screenshot_hold_secs)
    }

    pub fn reopen_grace(&self) -> Duration {
        secs(self.reopen_grace_secs)
    }
}

/// Saturating conversion for values that skipped `validate()`.
fn secs(value: f64) -> Duration {
    Duration::try_from_secs_f64(value.max(0.0)).unwrap_or(Duration::MAX)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use rstest::rstest;

    #[test]
    fn test_defaults_match_constants() {
        let cfg = GestureConfig::default();
        assert_relative_eq!(cfg.blink_ratio, 0.015);
        assert_eq!(cfg.click_cooldown(), Duration::from_secs(1));
        assert_eq!(cfg.zoom_cooldown(), Duration::from_secs(1));
        assert_relative_eq!(cfg.zoom_sensitivity, 8.0);
        assert_eq!(cfg.screenshot_hold(), Duration::from_millis(2500));
        assert_eq!(cfg.reopen_grace(), Duration::from_millis(500));
        assert_eq!(cfg.process_every, 5);
        assert!(cfg.validate().is_ok());
    }

    #[test]
    fn test_load_missing_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let cfg = GestureConfig::load(&dir.path().join("nope.json")).unwrap();
        assert_eq!(cfg, GestureConfig::default());
    }

    #[test]
    fn test_load_partial_file_fills_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");
        fs::write(&path, r#"{ "zoom_sensitivity": 12.5, "process_every": 2 }"#).unwrap();

        let cfg = GestureConfig::load(&path).unwrap();
        assert_relative_eq!(cfg.zoom_sensitivity, 12.5);
        assert_eq!(cfg.process_every, 2);
        assert_relative_eq!(cfg.blink_ratio, BLINK_THRESHOLD_RATIO);
    }

    #[test]
    fn test_load_malformed_file_errors() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");
        fs::write(&path, "{ not json").unwrap();
        assert!(matches!(
            GestureConfig::load(&path),
            Err(ConfigError::Parse { .. })
        ));
    }

    #[test]
    fn test_save_then_load_preserves_values() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("settings.json");
        let cfg = GestureConfig {
            screenshot_hold_secs: 4.0,
            ..GestureConfig::default()
        };
        cfg.save(&path).unwrap();
        assert_eq!(GestureConfig::load(&path).unwrap(), cfg);
    }

    #[test]
    fn test_default_path_ends_with_settings_json() {
        if let Some(path) = GestureConfig::default_path() {
            assert!(path.ends_with("BlinkPoint/settings.json"));
        }
    }

    #[test]
    fn test_duration_helpers_saturate_instead_of_panicking() {
        let cfg = GestureConfig {
            click_cooldown_secs: 1e20,
            zoom_cooldown_secs: -3.0,
            screenshot_hold_secs: f64::NAN,
            ..GestureConfig::default()
        };
        assert_eq!(cfg.click_cooldown(), Duration::MAX);
        assert_eq!(cfg.zoom_cooldown(), Duration::ZERO);
        assert_eq!(cfg.screenshot_hold(), Duration::ZERO);
    }

    #[rstest]
    #[case::zero_ratio(GestureConfig { blink_ratio: 0.0, ..GestureConfig::default() }, "blink_ratio")]
    #[case::negative_cooldown(GestureConfig { click_cooldown_secs: -1.0, ..GestureConfig::default() }, "click_cooldown_secs")]
    #[case::nan_sensitivity(GestureConfig { zoom_sensitivity: f64::NAN, ..GestureConfig::default() }, "zoom_sensitivity")]
    #[case::zero_hold(GestureConfig { screenshot_hold_secs: 0.0, ..GestureConfig::default() }, "screenshot_hold_secs")]
    #[case::overflowing_cooldown(GestureConfig { click_cooldown_secs: 1e20, ..GestureConfig::default() }, "click_cooldown_secs")]
    #[case::infinite_grace(GestureConfig { reopen_grace_secs: f64::INFINITY, ..GestureConfig::default() }, "reopen_grace_secs")]
    #[case::zero_process_every(GestureConfig { process_every: 0, ..GestureConfig::default() }, "process_every")]
    fn test_validate_rejects(#[case] cfg: GestureConfig, #[case] expected_field: &str) {
        match cfg.validate() {
            Err(ConfigError::Invalid { field, .. }) => assert_eq!(field, expected_field),
            other => panic!("expected Invalid, got {other:?}"),
        }
    }
}
