//! Render snapshots
//!
//! A `RenderFrame` is everything a presentation layer needs to draw one frame.
//! It is a plain copy, so presenters never hold a borrow on the round.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::sim::{Cloud, ObstacleKind, Outcome, Round, SpriteId};

/// A sprite placed in the world
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Placed {
    pub sprite: SpriteId,
    /// Top-left corner
    pub pos: Vec2,
}

/// An obstacle as drawn
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ObstacleFrame {
    pub id: u32,
    pub kind: ObstacleKind,
    pub sprite: SpriteId,
    /// Top-left corner of the sprite
    pub pos: Vec2,
}

/// Snapshot of a round for drawing
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RenderFrame {
    pub frame_index: u64,
    pub field: Vec2,
    pub player: Placed,
    /// Back to front
    pub clouds: Vec<Cloud>,
    /// Oldest (leftmost) first
    pub obstacles: Vec<ObstacleFrame>,
    pub obstacles_remaining: Option<u32>,
    pub passed: u32,
    pub paused: bool,
    pub outcome: Outcome,
}

impl RenderFrame {
    pub fn capture(round: &Round) -> Self {
        Self {
            frame_index: round.frame_index,
            field: Vec2::new(round.config.field_width, round.config.field_height),
            player: Placed {
                sprite: round.balloon.sprite(),
                pos: round.balloon.pos,
            },
            clouds: round
                .scenery
                .clouds
                .iter()
                .filter(|c| c.visible(round.config.field_width))
                .cloned()
                .collect(),
            obstacles: round
                .obstacles
                .iter()
                .map(|o| ObstacleFrame {
                    id: o.id,
                    kind: o.kind,
                    sprite: o.sprite(),
                    pos: o.sprite_pos(),
                })
                .collect(),
            obstacles_remaining: round.state.obstacles_remaining,
            passed: round.state.passed,
            paused: round.paused,
            outcome: round.state.outcome,
        }
    }
}
