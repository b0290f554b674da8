use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::Deserialize;
use thiserror::Error;
use tracing::{info, warn};

use crate::player::{DEFAULT_INVENTORY_CAPACITY, DEFAULT_PLAYER_SPEED};

pub const CONFIG_ENV_VAR: &str = "KINGDOM_QUEST_CONFIG";

/// Time base for the enemy attack cadence.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AttackClock {
    /// Monotonic real time, independent of frame pacing.
    #[default]
    WallClock,
    /// Sum of tick Δt.
    Simulation,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ViewportConfig {
    pub width: u32,
    pub height: u32,
}

impl Default for ViewportConfig {
    fn default() -> Self {
        Self {
            width: 800,
            height: 600,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct WindowConfig {
    pub title: String,
    pub max_frame_delta_ms: u64,
    pub max_render_fps: Option<u32>,
    pub metrics_log_interval_ms: u64,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            title: "Kingdom Quest".to_string(),
            max_frame_delta_ms: 100,
            max_render_fps: Some(60),
            metrics_log_interval_ms: 5000,
        }
    }
}

impl WindowConfig {
    pub fn max_frame_delta(&self) -> Duration {
        Duration::from_millis(self.max_frame_delta_ms)
    }

    pub fn metrics_log_interval(&self) -> Duration {
        Duration::from_millis(self.metrics_log_interval_ms)
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GameConfig {
    /// Fixed seed for zone generation and combat rolls; random when absent.
    pub seed: Option<u64>,
    pub viewport: ViewportConfig,
    pub inventory_capacity: usize,
    pub player_speed: f32,
    pub attack_clock: AttackClock,
    pub window: WindowConfig,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            seed: None,
            viewport: ViewportConfig::default(),
            inventory_capacity: DEFAULT_INVENTORY_CAPACITY,
            player_speed: DEFAULT_PLAYER_SPEED,
            attack_clock: AttackClock::default(),
            window: WindowConfig::default(),
        }
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("read config '{}': {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("{message}")]
    Parse { message: String },
    #[error("validation failed at {field}: {message}")]
    Invalid {
        field: &'static str,
        message: String,
    },
}

impl GameConfig {
    /// Loads the file named by `KINGDOM_QUEST_CONFIG`, or defaults when the
    /// variable is unset.
    pub fn from_env() -> Result<Self, ConfigError> {
        match env::var(CONFIG_ENV_VAR) {
            Ok(path) => Self::load_from_path(Path::new(&path)),
            Err(env::VarError::NotPresent) => {
                let config = Self::default();
                config.validate()?;
                Ok(config)
            }
            Err(err) => {
                warn!(
                    env_var = CONFIG_ENV_VAR,
                    error = %err,
                    "unable to read config env var; falling back to defaults"
                );
                Ok(Self::default())
            }
        }
    }

    pub fn load_from_path(path: &Path) -> Result<Self, ConfigError> {
        let raw = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::parse_json(&raw)?;
        config.validate()?;
        info!(path = %path.display(), "config_loaded");
        Ok(config)
    }

    pub fn parse_json(raw: &str) -> Result<Self, ConfigError> {
        let mut deserializer = serde_json::Deserializer::from_str(raw);
        match serde_path_to_error::deserialize::<_, GameConfig>(&mut deserializer) {
            Ok(config) => Ok(config),
            Err(error) => {
                let path = error.path().to_string();
                let source = error.into_inner();
                let message = if path.is_empty() || path == "." {
                    format!("parse config json: {source}")
                } else {
                    format!("parse config json at {path}: {source}")
                };
                Err(ConfigError::Parse { message })
            }
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.viewport.width == 0 || self.viewport.height == 0 {
            return Err(invalid(
                "viewport",
                format!(
                    "expected non-zero size, got {}x{}",
                    self.viewport.width, self.viewport.height
                ),
            ));
        }
        if self.inventory_capacity == 0 {
            return Err(invalid("inventory_capacity", "expected at least one slot"));
        }
        if !self.player_speed.is_finite() || self.player_speed < 0.0 {
            return Err(invalid(
                "player_speed",
                format!("expected finite non-negative speed, got {}", self.player_speed),
            ));
        }
        if self.window.max_frame_delta_ms == 0 {
            return Err(invalid("window.max_frame_delta_ms", "expected > 0"));
        }
        Ok(())
    }
}

fn invalid(field: &'static str, message: impl Into<String>) -> ConfigError {
    ConfigError::Invalid {
        field,
        message: message.into(),
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    #[test]
    fn empty_object_yields_defaults() {
        let config = GameConfig::parse_json("{}").expect("parse");

        assert_eq!(config, GameConfig::default());
        assert_eq!(config.viewport.width, 800);
        assert_eq!(config.inventory_capacity, 20);
        assert_eq!(config.attack_clock, AttackClock::WallClock);
    }

    #[test]
    fn partial_config_overrides_named_fields() {
        let config = GameConfig::parse_json(
            r#"{ "seed": 42, "attack_clock": "simulation", "window": { "max_render_fps": null } }"#,
        )
        .expect("parse");

        assert_eq!(config.seed, Some(42));
        assert_eq!(config.attack_clock, AttackClock::Simulation);
        assert_eq!(config.window.max_render_fps, None);
        assert_eq!(config.window.title, "Kingdom Quest");
    }

    #[test]
    fn parse_error_names_the_field_path() {
        let error = GameConfig::parse_json(r#"{ "viewport": { "width": "wide" } }"#)
            .expect_err("bad width");

        let message = error.to_string();
        assert!(message.starts_with("parse config json at viewport.width:"), "{message}");
    }

    #[test]
    fn unknown_field_is_rejected() {
        let error = GameConfig::parse_json(r#"{ "gravity": 9.8 }"#).expect_err("unknown");

        assert!(matches!(error, ConfigError::Parse { .. }));
    }

    #[test]
    fn validation_rejects_zero_capacity_and_bad_speed() {
        let zero_capacity = GameConfig {
            inventory_capacity: 0,
            ..GameConfig::default()
        };
        let negative_speed = GameConfig {
            player_speed: -1.0,
            ..GameConfig::default()
        };

        assert!(matches!(
            zero_capacity.validate(),
            Err(ConfigError::Invalid {
                field: "inventory_capacity",
                ..
            })
        ));
        assert!(matches!(
            negative_speed.validate(),
            Err(ConfigError::Invalid {
                field: "player_speed",
                ..
            })
        ));
    }

    #[test]
    fn loads_and_validates_file() {
        let mut file = tempfile::NamedTempFile::new().expect("temp file");
        write!(file, r#"{{ "viewport": {{ "width": 1024, "height": 768 }} }}"#).expect("write");

        let config = GameConfig::load_from_path(file.path()).expect("load");

        assert_eq!(config.viewport.width, 1024);
        assert_eq!(config.viewport.height, 768);
    }

    #[test]
    fn invalid_file_contents_fail_validation() {
        let mut file = tempfile::NamedTempFile::new().expect("temp file");
        write!(file, r#"{{ "viewport": {{ "width": 0 }} }}"#).expect("write");

        let error = GameConfig::load_from_path(file.path()).expect_err("zero width");

        assert!(matches!(error, ConfigError::Invalid { field: "viewport", .. }));
    }

    #[test]
    fn missing_file_reports_path() {
        let dir = tempfile::tempdir().expect("temp dir");
        let path = dir.path().join("absent.json");

        let error = GameConfig::load_from_path(&path).expect_err("missing");

        assert!(matches!(error, ConfigError::Io { .. }));
        assert!(error.to_string().contains("absent.json"));
    }
}
