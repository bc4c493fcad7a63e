//! Mask collision between the balloon and obstacles
//!
//! Sprites are placed at integer pixel positions (floored top-left corners),
//! then their opacity masks are intersected. Touching bounding boxes are not
//! enough: at least one pair of opaque pixels has to land on the same spot.

use glam::{IVec2, Vec2};

use super::balloon::Balloon;
use super::obstacle::Obstacle;
use super::sprites::{SpriteId, SpriteSheet};

/// Integer pixel position of a sprite's top-left corner
#[inline]
pub fn pixel_pos(pos: Vec2) -> IVec2 {
    pos.floor().as_ivec2()
}

/// Whether two sprites at world positions `a_pos`/`b_pos` overlap on opaque pixels
pub fn sprites_collide(
    sheet: &SpriteSheet,
    a: SpriteId,
    a_pos: Vec2,
    b: SpriteId,
    b_pos: Vec2,
) -> bool {
    let offset = pixel_pos(b_pos) - pixel_pos(a_pos);
    sheet.mask(a).overlaps(sheet.mask(b), offset)
}

/// Whether the balloon (with its current sprite) collides with this obstacle
pub fn collides(sheet: &SpriteSheet, balloon: &Balloon, obstacle: &Obstacle) -> bool {
    sprites_collide(
        sheet,
        balloon.sprite(),
        balloon.pos,
        obstacle.collision_sprite(),
        obstacle.sprite_pos(),
    )
}

/// First obstacle the balloon collides with, if any
pub fn first_collision<'a, I>(
    sheet: &SpriteSheet,
    balloon: &Balloon,
    obstacles: I,
) -> Option<&'a Obstacle>
where
    I: IntoIterator<Item = &'a Obstacle>,
{
    obstacles.into_iter().find(|o| collides(sheet, balloon, o))
}

/// Whether the balloon collides with any obstacle (stops at the first hit)
pub fn any_collision<'a, I>(sheet: &SpriteSheet, balloon: &Balloon, obstacles: I) -> bool
where
    I: IntoIterator<Item = &'a Obstacle>,
{
    first_collision(sheet, balloon, obstacles).is_some()
}
