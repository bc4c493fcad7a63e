//! Signed distance functions for sprite silhouettes
//!
//! Procedural sprites are described as unions of simple primitives in local
//! sprite coordinates (origin top-left, y down). Negative distance = inside.

use glam::Vec2;

/// Signed distance to a circle
#[inline]
pub fn sd_circle(p: Vec2, center: Vec2, radius: f32) -> f32 {
    (p - center).length() - radius
}

/// Approximate signed distance to an axis-aligned ellipse
///
/// Exact on the axes and sign-correct everywhere, which is all rasterizing
/// needs.
pub fn sd_ellipse(p: Vec2, center: Vec2, radii: Vec2) -> f32 {
    let q = (p - center) / radii;
    (q.length() - 1.0) * radii.min_element()
}

/// Signed distance to an axis-aligned box given its half extents
pub fn sd_box(p: Vec2, center: Vec2, half: Vec2) -> f32 {
    let d = (p - center).abs() - half;
    d.max(Vec2::ZERO).length() + d.x.max(d.y).min(0.0)
}

/// Signed distance to a capsule (segment `a`-`b` thickened by `radius`)
pub fn sd_capsule(p: Vec2, a: Vec2, b: Vec2, radius: f32) -> f32 {
    let pa = p - a;
    let ba = b - a;
    let len_sq = ba.length_squared();
    if len_sq < f32::EPSILON {
        return pa.length() - radius;
    }
    let h = (pa.dot(ba) / len_sq).clamp(0.0, 1.0);
    (pa - ba * h).length() - radius
}

/// Signed distance to a triangle
pub fn sd_triangle(p: Vec2, a: Vec2, b: Vec2, c: Vec2) -> f32 {
    let edges = [(a, b), (b, c), (c, a)];

    let mut dist_sq = f32::MAX;
    for (start, end) in edges {
        let e = end - start;
        let w = p - start;
        let t = (w.dot(e) / e.length_squared()).clamp(0.0, 1.0);
        dist_sq = dist_sq.min((w - e * t).length_squared());
    }

    // Inside when p lies on the same side of every edge
    let side = |s: Vec2, e: Vec2| (e - s).perp_dot(p - s);
    let (s0, s1, s2) = (side(a, b), side(b, c), side(c, a));
    let inside = (s0 >= 0.0 && s1 >= 0.0 && s2 >= 0.0) || (s0 <= 0.0 && s1 <= 0.0 && s2 <= 0.0);

    if inside { -dist_sq.sqrt() } else { dist_sq.sqrt() }
}

/// Union of several distances
#[inline]
pub fn union(distances: &[f32]) -> f32 {
    distances.iter().copied().fold(f32::MAX, f32::min)
}
