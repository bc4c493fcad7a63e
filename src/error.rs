//! Error types
//!
//! Everything that can fail in this crate fails before a round starts:
//! loading/validating configuration and building collision masks.
//! The per-frame tick is total and never returns an error.

use std::path::PathBuf;

use thiserror::Error;

use crate::sim::{ObstacleKind, SpriteId};

/// Configuration was unreadable or describes an unplayable game
#[derive(Error, Debug)]
pub enum ConfigError {
    /// A speed, interval, size or rate that must be strictly positive is not
    #[error("{field} must be positive (got {value})")]
    NonPositive {
        /// Offending field name
        field: &'static str,
        /// Value that was rejected
        value: f64,
    },

    /// A win goal of zero obstacles would end the round before it starts
    #[error("obstacle goal must be at least 1 (use null for endless mode)")]
    ZeroGoal,

    /// No obstacle kinds to spawn from
    #[error("at least one obstacle kind must be configured")]
    NoObstacleKinds,

    /// Obstacle spawn range `[height, field_height - height]` is empty
    #[error("play-field height {field_height} too small to spawn {kind:?} (height {kind_height})")]
    SpawnRangeEmpty {
        /// Obstacle kind that cannot be placed
        kind: ObstacleKind,
        /// Height of that obstacle
        kind_height: f32,
        /// Configured play-field height
        field_height: f32,
    },

    /// The player sprite is taller than the play-field, or starts outside it
    #[error("player does not fit in the play-field: {reason}")]
    PlayerOutOfField {
        /// Why the placement was rejected
        reason: String,
    },

    /// Margin must not be negative
    #[error("retire margin must not be negative (got {0})")]
    NegativeMargin(f32),

    /// Unknown edition name
    #[error("unknown edition {0:?} (expected \"classic\" or \"skies\")")]
    UnknownEdition(String),

    /// Config file could not be read
    #[error("failed to read config {path}: {source}")]
    Io {
        /// File that failed
        path: PathBuf,
        /// Underlying IO error
        #[source]
        source: std::io::Error,
    },

    /// Config JSON is malformed
    #[error("invalid config JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// A collision mask could not be built
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ShapeError {
    /// Alpha buffer length does not match `width * height`
    #[error("alpha buffer has {got} bytes, expected {expected} ({width}x{height})")]
    AlphaLength {
        /// Bytes received
        got: usize,
        /// Bytes needed
        expected: usize,
        /// Mask width
        width: u32,
        /// Mask height
        height: u32,
    },

    /// Replacement mask does not match the sprite it stands in for
    #[error("{sprite:?} mask must be {expected_width}x{expected_height} (got {width}x{height})")]
    SizeMismatch {
        /// Sprite being replaced
        sprite: SpriteId,
        /// Size of the sprite
        expected_width: u32,
        /// Size of the sprite
        expected_height: u32,
        /// Size of the supplied mask
        width: u32,
        /// Size of the supplied mask
        height: u32,
    },

    /// Zero-sized masks cannot represent a sprite
    #[error("mask dimensions must be non-zero (got {width}x{height})")]
    ZeroSize {
        /// Requested width
        width: u32,
        /// Requested height
        height: u32,
    },
}

/// Anything that stops the game from starting
#[derive(Error, Debug)]
pub enum StartupError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Shape(#[from] ShapeError),
}
