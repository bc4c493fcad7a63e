//! Scrolling obstacles
//!
//! Every obstacle kind shares one behaviour (scroll left at a constant rate,
//! report when it has been passed); kinds differ only in size, vertical spawn
//! range and sprite. Birds also flap their wings, which is purely cosmetic.

use std::ops::RangeInclusive;

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::sprites::SpriteId;
use crate::consts::BIRD_SPRITE_OFFSET_Y;

/// Obstacle variants
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ObstacleKind {
    Bird,
    Plane,
    Jet,
    Saucer,
    /// Plain balloon silhouette (classic edition)
    Balloon,
}

impl ObstacleKind {
    /// The aircraft line-up of the skies edition
    pub const AIRCRAFT: [ObstacleKind; 4] = [
        ObstacleKind::Bird,
        ObstacleKind::Plane,
        ObstacleKind::Jet,
        ObstacleKind::Saucer,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ObstacleKind::Bird => "bird",
            ObstacleKind::Plane => "plane",
            ObstacleKind::Jet => "jet",
            ObstacleKind::Saucer => "saucer",
            ObstacleKind::Balloon => "balloon",
        }
    }

    /// Sprite whose mask is used for collision
    pub fn collision_sprite(&self) -> SpriteId {
        match self {
            ObstacleKind::Bird => SpriteId::BirdWingsUp,
            ObstacleKind::Plane => SpriteId::Plane,
            ObstacleKind::Jet => SpriteId::Jet,
            ObstacleKind::Saucer => SpriteId::Saucer,
            ObstacleKind::Balloon => SpriteId::BalloonObstacle,
        }
    }

    /// Pixel size (width, height)
    pub fn size(&self) -> Vec2 {
        let (w, h) = self.collision_sprite().size();
        Vec2::new(w as f32, h as f32)
    }

    #[inline]
    pub fn width(&self) -> f32 {
        self.size().x
    }

    #[inline]
    pub fn height(&self) -> f32 {
        self.size().y
    }

    /// Where the sprite sits relative to the obstacle's position
    pub fn sprite_offset(&self) -> Vec2 {
        match self {
            ObstacleKind::Bird => Vec2::new(0.0, BIRD_SPRITE_OFFSET_Y),
            _ => Vec2::ZERO,
        }
    }

    /// Vertical spawn range `[height, field_height - height]`, empty if the
    /// field is too small
    pub fn spawn_range(&self, field_height: f32) -> RangeInclusive<i32> {
        let h = self.height() as i32;
        h..=(field_height as i32 - h)
    }

    fn animates(&self) -> bool {
        matches!(self, ObstacleKind::Bird)
    }
}

/// Wing position of an animated obstacle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum WingPose {
    Up,
    Down,
}

/// Cosmetic wing-flap timer (does not affect motion or collision)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FlapAnimation {
    pub pose: WingPose,
    /// Time since the last pose change
    pub elapsed_ms: f32,
    /// Time between pose changes
    pub period_ms: f32,
}

impl FlapAnimation {
    pub fn new(period_ms: f32) -> Self {
        Self {
            pose: WingPose::Up,
            elapsed_ms: 0.0,
            period_ms,
        }
    }

    /// Advance the timer; flips at most once per call, like a sprite that is
    /// re-evaluated once per drawn frame
    pub fn advance(&mut self, elapsed_ms: f32) {
        self.elapsed_ms += elapsed_ms;
        if self.elapsed_ms > self.period_ms {
            self.elapsed_ms = 0.0;
            self.pose = match self.pose {
                WingPose::Up => WingPose::Down,
                WingPose::Down => WingPose::Up,
            };
        }
    }
}

/// A scrolling obstacle
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Obstacle {
    /// Spawn sequence number within the round
    pub id: u32,
    pub kind: ObstacleKind,
    /// Top-left corner
    pub pos: Vec2,
    /// Set once the player has got past this obstacle
    pub passed: bool,
    pub flap: Option<FlapAnimation>,
}

impl Obstacle {
    pub fn new(id: u32, kind: ObstacleKind, pos: Vec2, flap_period_ms: f32) -> Self {
        Self {
            id,
            kind,
            pos,
            passed: false,
            flap: kind.animates().then(|| FlapAnimation::new(flap_period_ms)),
        }
    }

    /// Scroll left and advance any animation
    pub fn update(&mut self, elapsed_ms: f32, scroll_speed: f32) {
        self.pos.x -= scroll_speed * elapsed_ms;
        if let Some(flap) = &mut self.flap {
            flap.advance(elapsed_ms);
        }
    }

    /// Right edge in world space
    #[inline]
    pub fn right(&self) -> f32 {
        self.pos.x + self.kind.width()
    }

    /// True once the obstacle is fully past the left edge by more than `margin`
    pub fn is_retired(&self, margin: f32) -> bool {
        self.right() < -margin
    }

    /// Whether the obstacle has fallen behind horizontal position `x`
    #[inline]
    pub fn is_behind(&self, x: f32) -> bool {
        self.pos.x < x
    }

    /// Flag as passed if it is behind `player_x` and not yet counted.
    /// Returns true exactly once per obstacle.
    pub fn mark_passed(&mut self, player_x: f32) -> bool {
        if self.passed || !self.is_behind(player_x) {
            return false;
        }
        self.passed = true;
        true
    }

    /// Top-left corner of the drawn and colliding sprite
    #[inline]
    pub fn sprite_pos(&self) -> Vec2 {
        self.pos + self.kind.sprite_offset()
    }

    /// Sprite to draw this frame
    pub fn sprite(&self) -> SpriteId {
        match (&self.kind, &self.flap) {
            (ObstacleKind::Bird, Some(flap)) if flap.pose == WingPose::Down => {
                SpriteId::BirdWingsDown
            }
            _ => self.kind.collision_sprite(),
        }
    }

    /// Sprite whose mask is tested for collision
    #[inline]
    pub fn collision_sprite(&self) -> SpriteId {
        self.kind.collision_sprite()
    }
}
