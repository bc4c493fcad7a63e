//! Obstacle stream
//!
//! Obstacles spawn at the right edge on a fixed frame interval and scroll left
//! at one shared speed, so spawn order is also left-to-right screen order and
//! the oldest obstacle is always at the front of the queue.

use std::collections::VecDeque;

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::obstacle::{Obstacle, ObstacleKind};
use super::scenery::frames_per_interval;
use crate::config::GameConfig;

/// What one stream update did
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StreamReport {
    /// Ids of obstacles removed off the left edge
    pub retired: Vec<u32>,
    /// Kind and id of the obstacle spawned this frame
    pub spawned: Option<(u32, ObstacleKind)>,
    /// Ids of obstacles the player got past this frame
    pub passed: Vec<u32>,
}

/// Active obstacles, oldest (leftmost) first
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ObstacleStream {
    obstacles: VecDeque<Obstacle>,
    next_id: u32,
}

impl ObstacleStream {
    pub fn new() -> Self {
        Self::default()
    }

    /// Active obstacles, oldest first
    pub fn iter(&self) -> impl Iterator<Item = &Obstacle> {
        self.obstacles.iter()
    }

    pub fn len(&self) -> usize {
        self.obstacles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.obstacles.is_empty()
    }

    /// Total obstacles spawned so far
    pub fn spawned_count(&self) -> u32 {
        self.next_id
    }

    /// Add an obstacle of `kind` at the right edge with a random height
    pub fn spawn<R: Rng>(&mut self, kind: ObstacleKind, config: &GameConfig, rng: &mut R) -> u32 {
        let range = kind.spawn_range(config.field_height);
        let y = rng.random_range(range) as f32;
        self.push(kind, Vec2::new(config.field_width - 1.0, y), config.bird_flap_ms)
    }

    /// Add an obstacle at an explicit position
    pub fn push(&mut self, kind: ObstacleKind, pos: Vec2, flap_period_ms: f32) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        self.obstacles
            .push_back(Obstacle::new(id, kind, pos, flap_period_ms));
        id
    }

    /// One frame: retire, spawn, scroll, detect passes
    pub fn tick<R: Rng>(
        &mut self,
        config: &GameConfig,
        elapsed_ms: f32,
        frame_index: u64,
        player_x: f32,
        rng: &mut R,
    ) -> StreamReport {
        let mut report = StreamReport::default();

        while self
            .obstacles
            .front()
            .is_some_and(|o| o.is_retired(config.retire_margin))
        {
            if let Some(old) = self.obstacles.pop_front() {
                log::debug!("Retired {} #{} (passed: {})", old.kind.as_str(), old.id, old.passed);
                report.retired.push(old.id);
            }
        }

        let spawn_every = frames_per_interval(config.frame_rate, config.spawn_interval_ms);
        if frame_index % spawn_every == 0 && !config.obstacle_kinds.is_empty() {
            let kind = config.obstacle_kinds[rng.random_range(0..config.obstacle_kinds.len())];
            let id = self.spawn(kind, config, rng);
            log::debug!("Spawned {} #{} at frame {}", kind.as_str(), id, frame_index);
            report.spawned = Some((id, kind));
        }

        for obstacle in &mut self.obstacles {
            obstacle.update(elapsed_ms, config.scroll_speed);
        }

        for obstacle in &mut self.obstacles {
            if obstacle.mark_passed(player_x) {
                report.passed.push(obstacle.id);
            }
        }

        report
    }
}
