//! Final-position constraints: trigger boundaries and actor-relative limits.

use glam::Vec2;
use strata_math::Rect;

/// Clamp the camera center into `boundary` shrunk by the viewport
/// half-extents, so the viewport never shows outside the rectangle.
/// Axes clamp independently; a boundary smaller than the viewport on an
/// axis pins the camera to the rectangle's center on that axis.
pub fn clamp_to_boundary(position: Vec2, boundary: &Rect, half_extents: Vec2) -> Vec2 {
    boundary.shrink(half_extents).clamp_point(position)
}

/// Keep the camera within a fixed reach of the live actor position.
/// Always on when no trigger boundary is active, so the actor can never
/// leave the frame regardless of accumulated bias.
pub fn clamp_to_actor(position: Vec2, actor: Vec2, max_offset_x: f32, max_offset_y: f32) -> Vec2 {
    Vec2::new(
        position.x.clamp(actor.x - max_offset_x, actor.x + max_offset_x),
        position.y.clamp(actor.y - max_offset_y, actor.y + max_offset_y),
    )
}
