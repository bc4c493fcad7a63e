//! The player's balloon
//!
//! Two flight models are supported (see `PhysicsModel`):
//! - eased climb: each ascend starts a timed climb whose speed follows a
//!   half-cosine curve; otherwise the balloon sinks at a constant rate
//! - thrust/wrap: holding ascend fires the burner against constant gravity,
//!   and the balloon wraps around the top/bottom of the play-field

use std::f32::consts::PI;

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::sprites::SpriteId;
use crate::config::PhysicsModel;
use crate::consts::{BALLOON_HEIGHT, BALLOON_WIDTH};

/// The player entity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Balloon {
    /// Top-left corner
    pub pos: Vec2,
    /// Remaining time of the current climb (eased model)
    pub climb_remaining_ms: f32,
    /// Vertical velocity in px/s, positive = down (thrust model)
    pub velocity: f32,
    /// Flame sprite selector
    pub burner_on: bool,
}

impl Balloon {
    pub const WIDTH: f32 = BALLOON_WIDTH as f32;
    pub const HEIGHT: f32 = BALLOON_HEIGHT as f32;

    pub fn new(pos: Vec2) -> Self {
        Self {
            pos,
            climb_remaining_ms: 0.0,
            velocity: 0.0,
            burner_on: false,
        }
    }

    /// Start (or restart) a climb. Never stacks.
    pub fn ascend(&mut self, climb_duration_ms: f32) {
        self.climb_remaining_ms = climb_duration_ms;
        self.burner_on = true;
    }

    #[inline]
    pub fn is_climbing(&self) -> bool {
        self.climb_remaining_ms > 0.0
    }

    /// Advance vertical motion by one frame
    pub fn update(
        &mut self,
        elapsed_ms: f32,
        physics: &PhysicsModel,
        ascend_held: bool,
        field_height: f32,
    ) {
        match *physics {
            PhysicsModel::EasedClimb {
                sink_speed,
                climb_speed,
                climb_duration_ms,
            } => {
                if self.is_climbing() {
                    let progress = 1.0 - self.climb_remaining_ms / climb_duration_ms;
                    self.pos.y -= climb_speed * elapsed_ms * (1.0 - (progress * PI).cos());
                    self.climb_remaining_ms = (self.climb_remaining_ms - elapsed_ms).max(0.0);
                } else {
                    self.pos.y += sink_speed * elapsed_ms;
                }
                self.burner_on = self.is_climbing();
            }
            PhysicsModel::ThrustWrap { gravity, thrust } => {
                let dt = elapsed_ms / 1000.0;
                let accel = if ascend_held { gravity - thrust } else { gravity };
                self.velocity += accel * dt;
                self.pos.y += self.velocity * dt;
                self.burner_on = ascend_held;
                self.wrap(field_height);
            }
        }
    }

    /// Wrap vertically: off the top re-enters at the bottom and vice versa
    pub fn wrap(&mut self, field_height: f32) {
        if self.pos.y < -Self::HEIGHT {
            self.pos.y = field_height;
        } else if self.pos.y > field_height {
            self.pos.y = -Self::HEIGHT;
        }
    }

    /// Whether the whole balloon is inside `[0, field_height]` vertically
    pub fn in_bounds(&self, field_height: f32) -> bool {
        self.pos.y >= 0.0 && self.pos.y <= field_height - Self::HEIGHT
    }

    /// Active sprite (also selects the collision mask)
    pub fn sprite(&self) -> SpriteId {
        if self.burner_on {
            SpriteId::BalloonFlameOn
        } else {
            SpriteId::BalloonFlameOff
        }
    }
}
