//! Per-frame actor state consumed by the camera.

use glam::Vec2;

/// Horizontal facing direction of the tracked actor.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Facing {
    Left,
    #[default]
    Right,
}

impl Facing {
    /// Sign multiplier for horizontal biases: +1 right, -1 left.
    pub fn sign(self) -> f32 {
        match self {
            Facing::Right => 1.0,
            Facing::Left => -1.0,
        }
    }
}

/// Movement-state flags reported by the movement system.
///
/// Flags are not mutually exclusive (an actor can be running and grounded
/// at once); precedence between them is applied by the offset and zoom
/// calculators, not here.
#[derive(Clone, Copy, Debug, Default)]
pub struct MovementFlags {
    pub grounded: bool,
    pub falling: bool,
    pub fast_falling: bool,
    pub wall_sliding: bool,
    pub jumping: bool,
    pub running: bool,
    pub teleporting: bool,
    pub frozen: bool,
    pub facing: Facing,
}

/// Read-only copy of the tracked actor's pose for one frame.
/// Produced by the physics pass and discarded after the camera update.
#[derive(Clone, Copy, Debug)]
pub struct TargetSnapshot {
    /// Actor position in world units.
    pub position: Vec2,
    /// Actor velocity in world units per second.
    pub velocity: Vec2,
    /// Movement-state flags for this frame.
    pub flags: MovementFlags,
}

impl TargetSnapshot {
    pub fn new(position: Vec2, velocity: Vec2, flags: MovementFlags) -> Self {
        Self {
            position,
            velocity,
            flags,
        }
    }

    /// True when both pose vectors contain only finite components.
    pub fn is_finite(&self) -> bool {
        self.position.is_finite() && self.velocity.is_finite()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_facing_sign() {
        assert_eq!(Facing::Right.sign(), 1.0);
        assert_eq!(Facing::Left.sign(), -1.0);
    }

    #[test]
    fn test_default_flags_are_clear() {
        let flags = MovementFlags::default();
        assert!(!flags.grounded);
        assert!(!flags.running);
        assert!(!flags.frozen);
        assert_eq!(flags.facing, Facing::Right);
    }

    #[test]
    fn test_snapshot_finite() {
        let ok = TargetSnapshot::new(Vec2::new(1.0, 2.0), Vec2::ZERO, MovementFlags::default());
        assert!(ok.is_finite());

        let bad = TargetSnapshot::new(
            Vec2::new(f32::NAN, 2.0),
            Vec2::ZERO,
            MovementFlags::default(),
        );
        assert!(!bad.is_finite());

        let bad_vel = TargetSnapshot::new(
            Vec2::ZERO,
            Vec2::new(0.0, f32::INFINITY),
            MovementFlags::default(),
        );
        assert!(!bad_vel.is_finite());
    }
}
