//! Gameplay tuning loaded from JSON.
//!
//! Resolution order: `$LOST_SEAS_CONFIG`, then `<root>/config/lost_seas.json`,
//! then built-in defaults. Every field is optional in the file.

use std::collections::BTreeMap;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::info;

use crate::app::gameplay::Archetype;

pub(crate) const CONFIG_ENV_VAR: &str = "LOST_SEAS_CONFIG";
pub(crate) const CONFIG_FILE_NAME: &str = "lost_seas.json";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub(crate) struct GameConfig {
    pub(crate) tile_width: f32,
    pub(crate) entity_selection_radius: f32,
    pub(crate) player_pickup_radius: f32,
    pub(crate) reef_health: i32,
    pub(crate) loot_health: i32,
    pub(crate) reef_count: u32,
    pub(crate) loot_count: u32,
    pub(crate) spawn_extent: f32,
    pub(crate) camera_follow_rate: f32,
    pub(crate) camera_zoom: f32,
    pub(crate) player_speed: f32,
    pub(crate) item_bob_rate: f32,
    pub(crate) item_bob_amplitude: f32,
    pub(crate) grid_radius_x: i32,
    pub(crate) grid_radius_y: i32,
    pub(crate) seed: Option<u64>,
    pub(crate) starting_inventory: BTreeMap<Archetype, u32>,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            tile_width: engine::DEFAULT_TILE_WIDTH,
            entity_selection_radius: 16.0,
            player_pickup_radius: 6.0,
            reef_health: 3,
            loot_health: 1,
            reef_count: 10,
            loot_count: 10,
            spawn_extent: 100.0,
            camera_follow_rate: 30.0,
            camera_zoom: 5.3,
            player_speed: 105.0,
            item_bob_rate: 10.0,
            item_bob_amplitude: 1.0,
            grid_radius_x: 40,
            grid_radius_y: 30,
            seed: None,
            starting_inventory: BTreeMap::from([(Archetype::ItemFloatwood, 5)]),
        }
    }
}

#[derive(Debug, Error)]
pub(crate) enum ConfigError {
    #[error("failed to read environment variable {var}: {source}")]
    EnvVar {
        var: &'static str,
        #[source]
        source: env::VarError,
    },
    #[error("failed to read config file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse config file {path}{location}: {source}")]
    Parse {
        path: PathBuf,
        location: String,
        #[source]
        source: serde_json::Error,
    },
    #[error("invalid config value at {field}: {message}")]
    Invalid {
        field: &'static str,
        message: String,
    },
}

impl GameConfig {
    pub(crate) fn validate(&self) -> Result<(), ConfigError> {
        require_positive("tile_width", self.tile_width)?;
        require_positive("camera_zoom", self.camera_zoom)?;
        require_at_least_one("reef_health", self.reef_health)?;
        require_at_least_one("loot_health", self.loot_health)?;
        require_non_negative("entity_selection_radius", self.entity_selection_radius)?;
        require_non_negative("player_pickup_radius", self.player_pickup_radius)?;
        require_non_negative("spawn_extent", self.spawn_extent)?;
        require_non_negative("camera_follow_rate", self.camera_follow_rate)?;
        require_non_negative("player_speed", self.player_speed)?;
        require_non_negative("item_bob_rate", self.item_bob_rate)?;
        require_non_negative("item_bob_amplitude", self.item_bob_amplitude)?;
        if self.grid_radius_x < 0 || self.grid_radius_y < 0 {
            return Err(ConfigError::Invalid {
                field: "grid_radius",
                message: format!(
                    "expected non-negative radii, got {}x{}",
                    self.grid_radius_x, self.grid_radius_y
                ),
            });
        }
        Ok(())
    }
}

fn require_positive(field: &'static str, value: f32) -> Result<(), ConfigError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(ConfigError::Invalid {
            field,
            message: format!("expected a finite value > 0, got {value}"),
        })
    }
}

fn require_at_least_one(field: &'static str, value: i32) -> Result<(), ConfigError> {
    if value >= 1 {
        Ok(())
    } else {
        Err(ConfigError::Invalid {
            field,
            message: format!("expected a value >= 1, got {value}"),
        })
    }
}

fn require_non_negative(field: &'static str, value: f32) -> Result<(), ConfigError> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(ConfigError::Invalid {
            field,
            message: format!("expected a finite value >= 0, got {value}"),
        })
    }
}

pub(crate) fn parse_game_config_json(path: &Path, raw: &str) -> Result<GameConfig, ConfigError> {
    let mut deserializer = serde_json::Deserializer::from_str(raw);
    let config = serde_path_to_error::deserialize::<_, GameConfig>(&mut deserializer).map_err(
        |error| {
            let json_path = error.path().to_string();
            let location = if json_path.is_empty() || json_path == "." {
                String::new()
            } else {
                format!(" at {json_path}")
            };
            ConfigError::Parse {
                path: path.to_path_buf(),
                location,
                source: error.into_inner(),
            }
        },
    )?;
    config.validate()?;
    Ok(config)
}

pub(crate) fn load_game_config_file(path: &Path) -> Result<GameConfig, ConfigError> {
    let raw = fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    parse_game_config_json(path, &raw)
}

/// An explicit override must exist; the default location is optional.
fn resolve_config_path(override_path: Option<PathBuf>, config_dir: &Path) -> Option<PathBuf> {
    if override_path.is_some() {
        return override_path;
    }
    let default_path = config_dir.join(CONFIG_FILE_NAME);
    default_path.is_file().then_some(default_path)
}

pub(crate) fn load_game_config(config_dir: &Path) -> Result<GameConfig, ConfigError> {
    let override_path = match env::var(CONFIG_ENV_VAR) {
        Ok(value) => Some(PathBuf::from(value)),
        Err(env::VarError::NotPresent) => None,
        Err(source) => {
            return Err(ConfigError::EnvVar {
                var: CONFIG_ENV_VAR,
                source,
            })
        }
    };

    match resolve_config_path(override_path, config_dir) {
        Some(path) => {
            let config = load_game_config_file(&path)?;
            info!(path = %path.display(), "config_loaded");
            Ok(config)
        }
        None => {
            info!(config_dir = %config_dir.display(), "config_defaults_used");
            Ok(GameConfig::default())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn empty_object_yields_defaults() {
        let config = parse_game_config_json(Path::new("test.json"), "{}").expect("parse");
        assert_eq!(config, GameConfig::default());
    }

    #[test]
    fn partial_file_overrides_named_fields_only() {
        let raw = r#"{ "reef_health": 5, "seed": 42, "starting_inventory": { "item_seaweed": 2 } }"#;
        let config = parse_game_config_json(Path::new("test.json"), raw).expect("parse");

        assert_eq!(config.reef_health, 5);
        assert_eq!(config.seed, Some(42));
        assert_eq!(config.starting_inventory.get(&Archetype::ItemSeaweed), Some(&2));
        assert_eq!(config.starting_inventory.get(&Archetype::ItemFloatwood), None);
        assert_eq!(config.loot_health, 1);
    }

    #[test]
    fn parse_error_reports_json_path() {
        let raw = r#"{ "camera_zoom": "close" }"#;
        let error = parse_game_config_json(Path::new("cfg.json"), raw).expect_err("type error");
        let message = error.to_string();
        assert!(message.contains("at camera_zoom"), "{message}");
        assert!(message.contains("cfg.json"), "{message}");
    }

    #[test]
    fn unknown_fields_are_rejected() {
        let raw = r#"{ "tile_widht": 16.0 }"#;
        let error = parse_game_config_json(Path::new("cfg.json"), raw).expect_err("unknown");
        assert!(matches!(error, ConfigError::Parse { .. }));
    }

    #[test]
    fn unknown_inventory_archetype_is_rejected() {
        let raw = r#"{ "starting_inventory": { "gold": 1 } }"#;
        let error = parse_game_config_json(Path::new("cfg.json"), raw).expect_err("unknown");
        assert!(error.to_string().contains("starting_inventory"), "{error}");
    }

    #[test]
    fn validation_rejects_non_positive_tile_width() {
        let raw = r#"{ "tile_width": 0.0 }"#;
        let error = parse_game_config_json(Path::new("cfg.json"), raw).expect_err("invalid");
        assert!(matches!(
            error,
            ConfigError::Invalid {
                field: "tile_width",
                ..
            }
        ));
    }

    #[test]
    fn validation_rejects_non_positive_health() {
        let raw = r#"{ "reef_health": -2147483648 }"#;
        let error = parse_game_config_json(Path::new("cfg.json"), raw).expect_err("invalid");
        assert!(matches!(
            error,
            ConfigError::Invalid {
                field: "reef_health",
                ..
            }
        ));

        let config = GameConfig {
            loot_health: 0,
            ..GameConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::Invalid {
                field: "loot_health",
                ..
            })
        ));
    }

    #[test]
    fn validation_rejects_negative_radius() {
        let config = GameConfig {
            player_pickup_radius: -1.0,
            ..GameConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::Invalid {
                field: "player_pickup_radius",
                ..
            })
        ));
    }

    #[test]
    fn default_location_is_optional() {
        let dir = TempDir::new().expect("tempdir");
        assert_eq!(resolve_config_path(None, dir.path()), None);

        let path = dir.path().join(CONFIG_FILE_NAME);
        fs::write(&path, r#"{ "loot_count": 3 }"#).expect("write config");
        assert_eq!(resolve_config_path(None, dir.path()), Some(path.clone()));

        let config = load_game_config_file(&path).expect("load");
        assert_eq!(config.loot_count, 3);
    }

    #[test]
    fn explicit_override_wins_and_must_exist() {
        let dir = TempDir::new().expect("tempdir");
        fs::write(dir.path().join(CONFIG_FILE_NAME), "{}").expect("write config");
        let missing = dir.path().join("elsewhere.json");

        let resolved = resolve_config_path(Some(missing.clone()), dir.path());
        assert_eq!(resolved, Some(missing.clone()));
        assert!(matches!(
            load_game_config_file(&missing),
            Err(ConfigError::Read { .. })
        ));
    }

    #[test]
    fn default_config_round_trips_through_json() {
        let json = serde_json::to_string(&GameConfig::default()).expect("serialize");
        let parsed = parse_game_config_json(Path::new("x.json"), &json).expect("parse");
        assert_eq!(parsed, GameConfig::default());
    }
}
