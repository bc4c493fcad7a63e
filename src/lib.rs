//! Flappy Balloon - A side-scrolling balloon arcade game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (balloon physics, obstacles, mask collision, round state)
//! - `config`: Data-driven game configuration and editions
//! - `frame`: Render snapshots handed to a presentation layer
//! - `session`: Outer loop over rounds, frame clocks and the presenter seam
//! - `error`: Typed errors for everything that can fail before a round starts

pub mod config;
pub mod error;
pub mod frame;
pub mod session;
pub mod sim;

pub use config::{CloudConfig, Edition, GameConfig, PhysicsModel};
pub use error::{ConfigError, ShapeError, StartupError};
pub use frame::RenderFrame;
pub use session::{FixedClock, FrameClock, Presenter, RealtimeClock, RoundSummary, Session};

/// Game configuration constants
pub mod consts {
    /// Target frame rate
    pub const FPS: u32 = 60;

    /// Play-field dimensions
    pub const FIELD_WIDTH: f32 = 1820.0;
    pub const FIELD_HEIGHT: f32 = 980.0;

    /// Balloon start column
    pub const START_X: f32 = 50.0;

    /// Eased climb defaults (px/ms, ms)
    pub const SINK_SPEED: f32 = 0.18;
    pub const CLIMB_SPEED: f32 = 0.3;
    pub const CLIMB_DURATION_MS: f32 = 333.3;

    /// Thrust/wrap defaults (px/s²): 2.81 and 10.0 px/frame² at 60 Hz
    pub const GRAVITY: f32 = 168.6;
    pub const BURNER_THRUST: f32 = 600.0;

    /// Obstacle stream
    pub const SCROLL_SPEED: f32 = 0.30;
    pub const ADD_INTERVAL_MS: f32 = 7000.0;
    pub const OBSTACLE_GOAL: u32 = 10;
    /// Delay between bird wing flaps
    pub const BIRD_FLAP_MS: f32 = 100.0;
    /// Birds are drawn (and collide) this far below their position
    pub const BIRD_SPRITE_OFFSET_Y: f32 = 40.0;

    /// Sprite sizes in pixels
    pub const BALLOON_WIDTH: u32 = 177;
    pub const BALLOON_HEIGHT: u32 = 250;
    pub const BIRD_WIDTH: u32 = 237;
    pub const BIRD_HEIGHT: u32 = 280;
    pub const PLANE_WIDTH: u32 = 235;
    pub const PLANE_HEIGHT: u32 = 144;
    pub const JET_WIDTH: u32 = 292;
    pub const JET_HEIGHT: u32 = 160;
    pub const SAUCER_WIDTH: u32 = 200;
    pub const SAUCER_HEIGHT: u32 = 160;

    /// Clouds
    pub const CLOUD_WIDTH: u32 = 206;
    pub const CLOUD_HEIGHT: u32 = 130;
    pub const CLOUD_VARIANTS: u8 = 6;
    pub const CLOUD_SPEED: f32 = 0.10;
    pub const CLOUD_INTERVAL_MS: f32 = 5000.0;
}
