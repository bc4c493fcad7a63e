//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must stay pure and deterministic:
//! - Elapsed time is an input, never read from a clock
//! - Seeded RNG only
//! - Obstacles iterate in spawn order
//! - No rendering, audio or platform dependencies

pub mod balloon;
pub mod collision;
pub mod mask;
pub mod obstacle;
pub mod scenery;
pub mod sdf;
pub mod sprites;
pub mod state;
pub mod stream;
pub mod tick;

pub use balloon::Balloon;
pub use collision::{any_collision, collides, first_collision};
pub use mask::Mask;
pub use obstacle::{Obstacle, ObstacleKind, WingPose};
pub use scenery::{Cloud, Scenery};
pub use sprites::{SpriteId, SpriteSheet};
pub use state::{GameEvent, Outcome, Round, RoundState};
pub use stream::{ObstacleStream, StreamReport};
pub use tick::{TickInput, tick};
