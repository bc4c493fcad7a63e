//! Game configuration
//!
//! Everything tunable about a round lives here. A config is read once when a
//! round starts and stays fixed for its whole duration. Configs load from JSON
//! where every field is optional; missing fields take the skies-edition value.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::error::ConfigError;
use crate::sim::{Balloon, ObstacleKind};

/// Named configuration presets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum Edition {
    /// Balloon-silhouette obstacles, thrust/wrap flight, endless
    Classic,
    /// Birds, planes, jets and saucers, eased climb, fixed goal
    #[default]
    Skies,
}

impl Edition {
    pub fn as_str(&self) -> &'static str {
        match self {
            Edition::Classic => "classic",
            Edition::Skies => "skies",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "classic" => Some(Edition::Classic),
            "skies" | "sky" => Some(Edition::Skies),
            _ => None,
        }
    }
}

/// How the balloon moves vertically
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "model", rename_all = "snake_case")]
pub enum PhysicsModel {
    /// Timed climbs eased over a half-cosine, constant sink otherwise.
    /// Leaving the play-field loses the round.
    EasedClimb {
        /// px/ms
        sink_speed: f32,
        /// px/ms
        climb_speed: f32,
        climb_duration_ms: f32,
    },
    /// Burner held = upward acceleration against gravity (px/s²).
    /// The balloon wraps around vertically instead of leaving the field.
    ThrustWrap { gravity: f32, thrust: f32 },
}

impl PhysicsModel {
    pub fn eased_default() -> Self {
        PhysicsModel::EasedClimb {
            sink_speed: SINK_SPEED,
            climb_speed: CLIMB_SPEED,
            climb_duration_ms: CLIMB_DURATION_MS,
        }
    }

    pub fn thrust_default() -> Self {
        PhysicsModel::ThrustWrap {
            gravity: GRAVITY,
            thrust: BURNER_THRUST,
        }
    }

    /// Climb duration an ascend event resets to (eased model only)
    pub fn climb_duration_ms(&self) -> Option<f32> {
        match self {
            PhysicsModel::EasedClimb {
                climb_duration_ms, ..
            } => Some(*climb_duration_ms),
            PhysicsModel::ThrustWrap { .. } => None,
        }
    }

    /// Whether leaving the play-field ends the round
    pub fn loses_out_of_bounds(&self) -> bool {
        matches!(self, PhysicsModel::EasedClimb { .. })
    }
}

impl Default for PhysicsModel {
    fn default() -> Self {
        Self::eased_default()
    }
}

/// Background cloud settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CloudConfig {
    pub enabled: bool,
    /// px/ms
    pub speed: f32,
    pub interval_ms: f32,
}

impl Default for CloudConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            speed: CLOUD_SPEED,
            interval_ms: CLOUD_INTERVAL_MS,
        }
    }
}

/// Complete round configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub edition: Edition,

    // === Play-field ===
    pub field_width: f32,
    pub field_height: f32,
    /// Target frames per second (also sets the spawn cadence)
    pub frame_rate: u32,

    // === Obstacles ===
    pub spawn_interval_ms: f32,
    /// px/ms, shared by every obstacle kind
    pub scroll_speed: f32,
    /// Extra distance past the left edge before an obstacle is dropped
    pub retire_margin: f32,
    /// Spawn pool, drawn uniformly (repeat a kind to weight it)
    pub obstacle_kinds: Vec<ObstacleKind>,
    /// Obstacles to pass to win; `None` plays endlessly
    pub obstacle_goal: Option<u32>,
    pub bird_flap_ms: f32,

    // === Player ===
    pub physics: PhysicsModel,
    pub start_x: f32,
    /// Defaults to vertically centred
    pub start_y: Option<f32>,

    // === Scenery ===
    pub clouds: CloudConfig,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self::skies()
    }
}

impl GameConfig {
    /// Aircraft obstacles, eased climb, goal of 10
    pub fn skies() -> Self {
        Self {
            edition: Edition::Skies,
            field_width: FIELD_WIDTH,
            field_height: FIELD_HEIGHT,
            frame_rate: FPS,
            spawn_interval_ms: ADD_INTERVAL_MS,
            scroll_speed: SCROLL_SPEED,
            retire_margin: 0.0,
            obstacle_kinds: ObstacleKind::AIRCRAFT.to_vec(),
            obstacle_goal: Some(OBSTACLE_GOAL),
            bird_flap_ms: BIRD_FLAP_MS,
            physics: PhysicsModel::eased_default(),
            start_x: START_X,
            start_y: None,
            clouds: CloudConfig::default(),
        }
    }

    /// Balloon obstacles, thrust/wrap flight, endless
    pub fn classic() -> Self {
        Self {
            edition: Edition::Classic,
            obstacle_kinds: vec![ObstacleKind::Balloon],
            obstacle_goal: None,
            physics: PhysicsModel::thrust_default(),
            clouds: CloudConfig {
                enabled: false,
                ..CloudConfig::default()
            },
            ..Self::skies()
        }
    }

    pub fn for_edition(edition: Edition) -> Self {
        match edition {
            Edition::Classic => Self::classic(),
            Edition::Skies => Self::skies(),
        }
    }

    /// Parse and validate a JSON config over the skies preset
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        Self::from_json_over(Edition::default(), json)
    }

    /// Parse and validate a JSON config. Fields the JSON leaves out come from
    /// the preset named by its `edition` field, or from `fallback`.
    pub fn from_json_over(fallback: Edition, json: &str) -> Result<Self, ConfigError> {
        let overrides: serde_json::Value = serde_json::from_str(json)?;
        let edition = match overrides.get("edition") {
            Some(value) => serde_json::from_value(value.clone())?,
            None => fallback,
        };
        let mut merged = serde_json::to_value(Self::for_edition(edition))?;
        merge_json(&mut merged, overrides);
        let config: Self = serde_json::from_value(merged)?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a JSON config file
    pub fn load(path: &Path, fallback: Edition) -> Result<Self, ConfigError> {
        let json = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_json_over(fallback, &json)?;
        log::info!("Loaded {} config from {}", config.edition.as_str(), path.display());
        Ok(config)
    }

    pub fn to_json(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Where the balloon starts
    pub fn start_position(&self) -> glam::Vec2 {
        let y = self
            .start_y
            .unwrap_or((self.field_height / 2.0 - Balloon::HEIGHT / 2.0).floor());
        glam::Vec2::new(self.start_x, y)
    }

    /// Reject configurations that cannot produce a playable round
    pub fn validate(&self) -> Result<(), ConfigError> {
        let positive = |field: &'static str, value: f64| {
            if value > 0.0 && value.is_finite() {
                Ok(())
            } else {
                Err(ConfigError::NonPositive { field, value })
            }
        };

        positive("field_width", self.field_width as f64)?;
        positive("field_height", self.field_height as f64)?;
        positive("frame_rate", self.frame_rate as f64)?;
        positive("spawn_interval_ms", self.spawn_interval_ms as f64)?;
        positive("scroll_speed", self.scroll_speed as f64)?;
        positive("bird_flap_ms", self.bird_flap_ms as f64)?;

        match self.physics {
            PhysicsModel::EasedClimb {
                sink_speed,
                climb_speed,
                climb_duration_ms,
            } => {
                positive("physics.sink_speed", sink_speed as f64)?;
                positive("physics.climb_speed", climb_speed as f64)?;
                positive("physics.climb_duration_ms", climb_duration_ms as f64)?;
            }
            PhysicsModel::ThrustWrap { gravity, thrust } => {
                positive("physics.gravity", gravity as f64)?;
                positive("physics.thrust", thrust as f64)?;
            }
        }

        if self.clouds.enabled {
            positive("clouds.speed", self.clouds.speed as f64)?;
            positive("clouds.interval_ms", self.clouds.interval_ms as f64)?;
        }

        if self.retire_margin < 0.0 || self.retire_margin.is_nan() {
            return Err(ConfigError::NegativeMargin(self.retire_margin));
        }

        if self.obstacle_goal == Some(0) {
            return Err(ConfigError::ZeroGoal);
        }

        if self.obstacle_kinds.is_empty() {
            return Err(ConfigError::NoObstacleKinds);
        }
        for &kind in &self.obstacle_kinds {
            if kind.spawn_range(self.field_height).is_empty() {
                return Err(ConfigError::SpawnRangeEmpty {
                    kind,
                    kind_height: kind.height(),
                    field_height: self.field_height,
                });
            }
        }

        if self.field_height < Balloon::HEIGHT {
            return Err(ConfigError::PlayerOutOfField {
                reason: format!(
                    "balloon height {} exceeds field height {}",
                    Balloon::HEIGHT,
                    self.field_height
                ),
            });
        }
        let start = self.start_position();
        if !(0.0..self.field_width).contains(&start.x) {
            return Err(ConfigError::PlayerOutOfField {
                reason: format!("start_x {} outside [0, {})", start.x, self.field_width),
            });
        }
        if self.physics.loses_out_of_bounds()
            && !(0.0..=self.field_height - Balloon::HEIGHT).contains(&start.y)
        {
            return Err(ConfigError::PlayerOutOfField {
                reason: format!("start_y {} would lose immediately", start.y),
            });
        }

        Ok(())
    }
}

/// Overlay `overrides` onto `base`, recursing into objects. An object whose
/// `model` tag changes is replaced whole.
fn merge_json(base: &mut serde_json::Value, overrides: serde_json::Value) {
    use serde_json::Value;

    match (base, overrides) {
        (Value::Object(base), Value::Object(overrides)) => {
            let retagged = matches!(
                (base.get("model"), overrides.get("model")),
                (Some(a), Some(b)) if a != b
            );
            if retagged {
                *base = overrides;
                return;
            }
            for (key, value) in overrides {
                match base.get_mut(&key) {
                    Some(slot) if slot.is_object() && value.is_object() => merge_json(slot, value),
                    _ => {
                        base.insert(key, value);
                    }
                }
            }
        }
        (base, overrides) => *base = overrides,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_editions_validate() {
        assert!(GameConfig::skies().validate().is_ok());
        assert!(GameConfig::classic().validate().is_ok());
    }

    #[test]
    fn test_edition_names() {
        assert_eq!(Edition::from_str("Classic"), Some(Edition::Classic));
        assert_eq!(Edition::from_str("sky"), Some(Edition::Skies));
        assert_eq!(Edition::from_str("arcade"), None);
        assert_eq!(Edition::Skies.as_str(), "skies");
    }

    #[test]
    fn test_default_start_is_centred() {
        let cfg = GameConfig::default();
        assert_eq!(cfg.start_position(), glam::Vec2::new(50.0, 365.0));
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let cfg = GameConfig::from_json(r#"{ "obstacle_goal": 3, "scroll_speed": 0.5 }"#).unwrap();
        assert_eq!(cfg.obstacle_goal, Some(3));
        assert_eq!(cfg.scroll_speed, 0.5);
        assert_eq!(cfg.field_width, 1820.0);
        assert_eq!(cfg.obstacle_kinds, ObstacleKind::AIRCRAFT.to_vec());
    }

    #[test]
    fn test_json_layers_over_named_edition() {
        let cfg = GameConfig::from_json(r#"{ "edition": "classic", "obstacle_goal": 5 }"#).unwrap();
        assert_eq!(cfg.edition, Edition::Classic);
        assert_eq!(cfg.physics, PhysicsModel::thrust_default());
        assert_eq!(cfg.obstacle_kinds, vec![ObstacleKind::Balloon]);
        assert_eq!(cfg.obstacle_goal, Some(5));

        let cfg = GameConfig::from_json_over(Edition::Classic, "{}").unwrap();
        assert_eq!(cfg, GameConfig::classic());
    }

    #[test]
    fn test_partial_physics_keeps_model_defaults() {
        let cfg = GameConfig::from_json(r#"{ "physics": { "sink_speed": 0.25 } }"#).unwrap();
        assert_eq!(
            cfg.physics,
            PhysicsModel::EasedClimb {
                sink_speed: 0.25,
                climb_speed: 0.3,
                climb_duration_ms: 333.3,
            }
        );
    }

    #[test]
    fn test_physics_json_tagged() {
        let cfg = GameConfig::from_json(
            r#"{ "physics": { "model": "thrust_wrap", "gravity": 100.0, "thrust": 400.0 },
                 "obstacle_goal": null }"#,
        )
        .unwrap();
        assert_eq!(
            cfg.physics,
            PhysicsModel::ThrustWrap {
                gravity: 100.0,
                thrust: 400.0
            }
        );
        assert_eq!(cfg.obstacle_goal, None);
    }

    #[test]
    fn test_json_survives_serialization() {
        let cfg = GameConfig::classic();
        let back = GameConfig::from_json(&cfg.to_json().unwrap()).unwrap();
        assert_eq!(back, cfg);
    }

    #[test]
    fn test_rejects_non_positive() {
        let cfg = GameConfig {
            scroll_speed: 0.0,
            ..GameConfig::default()
        };
        assert!(matches!(
            cfg.validate(),
            Err(ConfigError::NonPositive {
                field: "scroll_speed",
                ..
            })
        ));

        let cfg = GameConfig {
            spawn_interval_ms: -5.0,
            ..GameConfig::default()
        };
        assert!(matches!(
            cfg.validate(),
            Err(ConfigError::NonPositive {
                field: "spawn_interval_ms",
                ..
            })
        ));

        let cfg = GameConfig {
            physics: PhysicsModel::EasedClimb {
                sink_speed: 0.18,
                climb_speed: 0.3,
                climb_duration_ms: 0.0,
            },
            ..GameConfig::default()
        };
        assert!(matches!(
            cfg.validate(),
            Err(ConfigError::NonPositive {
                field: "physics.climb_duration_ms",
                ..
            })
        ));
    }

    #[test]
    fn test_rejects_zero_goal() {
        let cfg = GameConfig {
            obstacle_goal: Some(0),
            ..GameConfig::default()
        };
        assert!(matches!(cfg.validate(), Err(ConfigError::ZeroGoal)));
    }

    #[test]
    fn test_rejects_empty_kinds() {
        let cfg = GameConfig {
            obstacle_kinds: vec![],
            ..GameConfig::default()
        };
        assert!(matches!(cfg.validate(), Err(ConfigError::NoObstacleKinds)));
    }

    #[test]
    fn test_rejects_small_field() {
        let cfg = GameConfig {
            field_height: 500.0,
            ..GameConfig::default()
        };
        assert!(matches!(
            cfg.validate(),
            Err(ConfigError::SpawnRangeEmpty {
                kind: ObstacleKind::Bird,
                ..
            })
        ));
    }

    #[test]
    fn test_rejects_bad_start() {
        let cfg = GameConfig {
            start_y: Some(900.0),
            ..GameConfig::default()
        };
        assert!(matches!(
            cfg.validate(),
            Err(ConfigError::PlayerOutOfField { .. })
        ));

        // Wrap model tolerates any start height
        let cfg = GameConfig {
            start_y: Some(900.0),
            ..GameConfig::classic()
        };
        assert!(cfg.validate().is_ok());
    }

    #[test]
    fn test_rejects_negative_margin() {
        let cfg = GameConfig {
            retire_margin: -1.0,
            ..GameConfig::default()
        };
        assert!(matches!(cfg.validate(), Err(ConfigError::NegativeMargin(_))));
    }

    #[test]
    fn test_malformed_json() {
        assert!(matches!(
            GameConfig::from_json("{ not json"),
            Err(ConfigError::Json(_))
        ));
    }
}
