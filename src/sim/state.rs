//! Round state
//!
//! A `Round` owns everything one play-through needs: its configuration, the
//! balloon, the obstacle stream, scenery and the seeded RNG. Rounds never
//! share state; a new one is built for every replay.

use std::sync::Arc;

use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::balloon::Balloon;
use super::obstacle::ObstacleKind;
use super::scenery::Scenery;
use super::sprites::SpriteSheet;
use super::stream::ObstacleStream;
use crate::config::GameConfig;
use crate::error::ConfigError;

/// How the round ended, if it has
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum Outcome {
    #[default]
    InProgress,
    Won,
    Lost,
}

impl Outcome {
    #[inline]
    pub fn is_terminal(self) -> bool {
        self != Outcome::InProgress
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Outcome::InProgress => "in_progress",
            Outcome::Won => "won",
            Outcome::Lost => "lost",
        }
    }
}

/// Scoring and termination
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoundState {
    /// Counts down to zero; `None` in endless mode
    pub obstacles_remaining: Option<u32>,
    /// Obstacles passed so far
    pub passed: u32,
    pub outcome: Outcome,
}

impl RoundState {
    pub fn new(goal: Option<u32>) -> Self {
        Self {
            obstacles_remaining: goal,
            passed: 0,
            outcome: Outcome::InProgress,
        }
    }

    /// Count one pass. Returns true if that completed the goal.
    pub fn record_pass(&mut self) -> bool {
        self.passed += 1;
        match &mut self.obstacles_remaining {
            Some(remaining) => {
                *remaining = remaining.saturating_sub(1);
                *remaining == 0
            }
            None => false,
        }
    }
}

/// Things that happened during a tick, for sounds and logging
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum GameEvent {
    ObstacleSpawned { id: u32, kind: ObstacleKind },
    ObstaclePassed { id: u32, remaining: Option<u32> },
    ObstacleRetired { id: u32 },
    Collision { obstacle_id: u32 },
    OutOfBounds { y: f32 },
    BurnerIgnited,
    BurnerExtinguished,
    Paused,
    Resumed,
    RoundWon { passed: u32 },
    RoundLost { passed: u32 },
}

/// One play-through
#[derive(Debug, Clone)]
pub struct Round {
    /// Fixed for the lifetime of the round
    pub config: GameConfig,
    pub sprites: Arc<SpriteSheet>,
    pub balloon: Balloon,
    pub obstacles: ObstacleStream,
    pub scenery: Scenery,
    pub state: RoundState,
    pub paused: bool,
    pub quit_requested: bool,
    /// Ticks simulated (paused ticks excluded)
    pub frame_index: u64,
    /// Simulated time (paused time excluded)
    pub elapsed_ms: f64,
    pub seed: u64,
    pub(crate) rng: Pcg32,
}

impl Round {
    /// Start a round, rejecting a configuration that cannot be played
    pub fn new(
        config: GameConfig,
        sprites: Arc<SpriteSheet>,
        seed: u64,
    ) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self::from_validated(config, sprites, seed))
    }

    /// Start a round with a configuration that has already passed `validate`
    pub(crate) fn from_validated(config: GameConfig, sprites: Arc<SpriteSheet>, seed: u64) -> Self {
        let balloon = Balloon::new(config.start_position());
        let state = RoundState::new(config.obstacle_goal);
        log::info!(
            "Round starting: {} edition, seed {}, goal {}",
            config.edition.as_str(),
            seed,
            config
                .obstacle_goal
                .map_or_else(|| "endless".to_string(), |g| g.to_string())
        );
        Self {
            config,
            sprites,
            balloon,
            obstacles: ObstacleStream::new(),
            scenery: Scenery::new(),
            state,
            paused: false,
            quit_requested: false,
            frame_index: 0,
            elapsed_ms: 0.0,
            seed,
            rng: Pcg32::seed_from_u64(seed),
        }
    }

    #[inline]
    pub fn outcome(&self) -> Outcome {
        self.state.outcome
    }

    /// Won or lost
    #[inline]
    pub fn is_over(&self) -> bool {
        self.state.outcome.is_terminal()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_pass_counts_down() {
        let mut state = RoundState::new(Some(2));
        assert!(!state.record_pass());
        assert_eq!(state.obstacles_remaining, Some(1));
        assert!(state.record_pass());
        assert_eq!(state.obstacles_remaining, Some(0));
        assert_eq!(state.passed, 2);
    }

    #[test]
    fn test_endless_never_completes() {
        let mut state = RoundState::new(None);
        for _ in 0..100 {
            assert!(!state.record_pass());
        }
        assert_eq!(state.passed, 100);
        assert_eq!(state.obstacles_remaining, None);
    }

    #[test]
    fn test_new_round_places_balloon() {
        let sprites = Arc::new(SpriteSheet::procedural().unwrap());
        let round = Round::new(GameConfig::default(), sprites, 42).unwrap();
        assert_eq!(round.balloon.pos, glam::Vec2::new(50.0, 365.0));
        assert_eq!(round.state.obstacles_remaining, Some(10));
        assert!(round.obstacles.is_empty());
        assert!(!round.is_over());
    }

    #[test]
    fn test_invalid_config_never_becomes_a_round() {
        let sprites = Arc::new(SpriteSheet::procedural().unwrap());
        // Too short for a bird's spawn range
        let cfg = GameConfig {
            field_height: 500.0,
            ..GameConfig::default()
        };
        assert!(matches!(
            Round::new(cfg, Arc::clone(&sprites), 1),
            Err(ConfigError::SpawnRangeEmpty { .. })
        ));

        let cfg = GameConfig {
            obstacle_kinds: vec![],
            ..GameConfig::default()
        };
        assert!(matches!(
            Round::new(cfg, sprites, 1),
            Err(ConfigError::NoObstacleKinds)
        ));
    }

    #[test]
    fn test_event_json_tagged() {
        let json = serde_json::to_string(&GameEvent::ObstacleRetired { id: 3 }).unwrap();
        assert_eq!(json, r#"{"event":"obstacle_retired","id":3}"#);
    }
}
