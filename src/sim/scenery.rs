//! Background clouds
//!
//! Purely decorative: clouds drift slower than obstacles, never collide and
//! never count toward the goal. They use their own spawn interval.

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::config::CloudConfig;
use crate::consts::{CLOUD_HEIGHT, CLOUD_VARIANTS};

/// Clouds are dropped once their left edge is this far off-screen
pub const CLOUD_CULL_X: f32 = -300.0;

/// A drifting cloud
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Cloud {
    pub pos: Vec2,
    /// Which of the cloud images to draw
    pub variant: u8,
}

impl Cloud {
    pub fn visible(&self, field_width: f32) -> bool {
        CLOUD_CULL_X < self.pos.x && self.pos.x < field_width + 2.0
    }
}

/// All clouds on screen, oldest first
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Scenery {
    pub clouds: Vec<Cloud>,
}

impl Scenery {
    pub fn new() -> Self {
        Self::default()
    }

    /// Cull, spawn on interval, then drift every cloud
    pub fn tick<R: Rng>(
        &mut self,
        config: &CloudConfig,
        elapsed_ms: f32,
        frame_index: u64,
        frame_rate: u32,
        field: Vec2,
        rng: &mut R,
    ) {
        if !config.enabled {
            return;
        }

        self.clouds.retain(|c| c.visible(field.x));

        if frame_index % frames_per_interval(frame_rate, config.interval_ms) == 0 {
            let top = CLOUD_HEIGHT as i32;
            let bottom = (field.y as i32 - top).max(top);
            self.clouds.push(Cloud {
                pos: Vec2::new(field.x - 1.0, rng.random_range(top..=bottom) as f32),
                variant: rng.random_range(0..CLOUD_VARIANTS),
            });
        }

        for cloud in &mut self.clouds {
            cloud.pos.x -= config.speed * elapsed_ms;
        }
    }
}

/// Number of frames between spawns at `frame_rate` (at least 1)
pub fn frames_per_interval(frame_rate: u32, interval_ms: f32) -> u64 {
    ((frame_rate as f32 * interval_ms / 1000.0).round() as u64).max(1)
}
