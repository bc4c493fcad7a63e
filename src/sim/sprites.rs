//! Sprite identifiers and their collision masks
//!
//! The simulation never touches image files. Every sprite it can select has a
//! `Mask` in a `SpriteSheet`; by default the masks are rasterized from
//! signed-distance silhouettes, and a presentation layer that has real images
//! can swap in masks built from their alpha channel.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::mask::Mask;
use super::sdf::{sd_box, sd_capsule, sd_circle, sd_ellipse, sd_triangle, union};
use crate::consts::*;
use crate::error::ShapeError;

/// Every sprite the simulation can select
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SpriteId {
    BalloonFlameOff,
    BalloonFlameOn,
    BirdWingsUp,
    BirdWingsDown,
    Plane,
    Jet,
    Saucer,
    /// Plain balloon silhouette used as an obstacle in the classic edition
    BalloonObstacle,
}

impl SpriteId {
    pub const ALL: [SpriteId; 8] = [
        SpriteId::BalloonFlameOff,
        SpriteId::BalloonFlameOn,
        SpriteId::BirdWingsUp,
        SpriteId::BirdWingsDown,
        SpriteId::Plane,
        SpriteId::Jet,
        SpriteId::Saucer,
        SpriteId::BalloonObstacle,
    ];

    fn index(self) -> usize {
        self as usize
    }

    /// Pixel size (width, height)
    pub fn size(self) -> (u32, u32) {
        match self {
            SpriteId::BalloonFlameOff | SpriteId::BalloonFlameOn | SpriteId::BalloonObstacle => {
                (BALLOON_WIDTH, BALLOON_HEIGHT)
            }
            SpriteId::BirdWingsUp | SpriteId::BirdWingsDown => (BIRD_WIDTH, BIRD_HEIGHT),
            SpriteId::Plane => (PLANE_WIDTH, PLANE_HEIGHT),
            SpriteId::Jet => (JET_WIDTH, JET_HEIGHT),
            SpriteId::Saucer => (SAUCER_WIDTH, SAUCER_HEIGHT),
        }
    }
}

/// Collision masks for every sprite
#[derive(Debug, Clone)]
pub struct SpriteSheet {
    masks: Vec<Mask>,
}

impl SpriteSheet {
    /// Masks generated from built-in silhouettes
    pub fn procedural() -> Result<Self, ShapeError> {
        let masks = SpriteId::ALL
            .iter()
            .map(|&id| {
                let (w, h) = id.size();
                Mask::from_sdf(w, h, |p| silhouette(id, p))
            })
            .collect::<Result<Vec<_>, _>>()?;
        log::debug!("Rasterized {} procedural sprite masks", masks.len());
        Ok(Self { masks })
    }

    /// Replace one sprite's mask (e.g. with one built from image alpha).
    /// The mask must be exactly the sprite's size.
    pub fn with_mask(mut self, id: SpriteId, mask: Mask) -> Result<Self, ShapeError> {
        let (w, h) = id.size();
        if (mask.width(), mask.height()) != (w, h) {
            return Err(ShapeError::SizeMismatch {
                sprite: id,
                expected_width: w,
                expected_height: h,
                width: mask.width(),
                height: mask.height(),
            });
        }
        log::debug!("Replaced {:?} mask ({} opaque pixels)", id, mask.count());
        self.masks[id.index()] = mask;
        Ok(self)
    }

    /// Collision mask for a sprite
    pub fn mask(&self, id: SpriteId) -> &Mask {
        &self.masks[id.index()]
    }
}

/// Signed distance of the built-in silhouette for `id` at local point `p`
fn silhouette(id: SpriteId, p: Vec2) -> f32 {
    let v = Vec2::new;
    match id {
        SpriteId::BalloonFlameOff | SpriteId::BalloonObstacle => balloon(p),
        SpriteId::BalloonFlameOn => {
            let flame = sd_ellipse(p, v(88.5, 196.0), v(10.0, 18.0));
            balloon(p).min(flame)
        }
        SpriteId::BirdWingsUp => {
            let wing = sd_triangle(p, v(80.0, 140.0), v(150.0, 140.0), v(100.0, 20.0));
            bird_body(p).min(wing)
        }
        SpriteId::BirdWingsDown => {
            let wing = sd_triangle(p, v(80.0, 160.0), v(150.0, 160.0), v(100.0, 275.0));
            bird_body(p).min(wing)
        }
        SpriteId::Plane => union(&[
            sd_capsule(p, v(22.0, 80.0), v(212.0, 80.0), 16.0),
            sd_box(p, v(120.0, 80.0), v(22.0, 62.0)),
            sd_triangle(p, v(10.0, 80.0), v(40.0, 80.0), v(12.0, 20.0)),
            sd_box(p, v(30.0, 80.0), v(12.0, 26.0)),
        ]),
        SpriteId::Jet => union(&[
            sd_capsule(p, v(20.0, 80.0), v(270.0, 80.0), 14.0),
            sd_triangle(p, v(270.0, 68.0), v(291.0, 80.0), v(270.0, 92.0)),
            sd_triangle(p, v(110.0, 80.0), v(190.0, 80.0), v(120.0, 5.0)),
            sd_triangle(p, v(110.0, 80.0), v(190.0, 80.0), v(120.0, 155.0)),
            sd_triangle(p, v(20.0, 80.0), v(60.0, 80.0), v(25.0, 30.0)),
        ]),
        SpriteId::Saucer => union(&[
            sd_ellipse(p, v(100.0, 62.0), v(42.0, 38.0)),
            sd_ellipse(p, v(100.0, 100.0), v(98.0, 30.0)),
            sd_capsule(p, v(55.0, 115.0), v(40.0, 155.0), 4.0),
            sd_capsule(p, v(145.0, 115.0), v(160.0, 155.0), 4.0),
        ]),
    }
}

/// Envelope, neck, ropes and basket
fn balloon(p: Vec2) -> f32 {
    let v = Vec2::new;
    union(&[
        sd_ellipse(p, v(88.5, 92.0), v(86.0, 90.0)),
        sd_triangle(p, v(30.0, 140.0), v(147.0, 140.0), v(88.5, 180.0)),
        sd_capsule(p, v(60.0, 185.0), v(72.0, 212.0), 2.0),
        sd_capsule(p, v(117.0, 185.0), v(105.0, 212.0), 2.0),
        sd_box(p, v(88.5, 228.0), v(20.0, 20.0)),
    ])
}

fn bird_body(p: Vec2) -> f32 {
    let v = Vec2::new;
    union(&[
        sd_ellipse(p, v(115.0, 150.0), v(75.0, 32.0)),
        sd_circle(p, v(195.0, 135.0), 24.0),
        sd_triangle(p, v(215.0, 128.0), v(236.0, 138.0), v(215.0, 145.0)),
        sd_triangle(p, v(45.0, 150.0), v(5.0, 125.0), v(5.0, 175.0)),
    ])
}
