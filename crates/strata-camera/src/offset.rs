//! Movement-state positional bias: look-ahead in the facing direction,
//! vertical bias for ground contact and descent.

use glam::Vec2;
use strata_config::FollowConfig;

use crate::snapshot::TargetSnapshot;

/// Compute the positional bias added to the actor's raw position before
/// smoothing. Pure: the same snapshot and config always yield the same bias.
///
/// Flags are checked in precedence order since they are not mutually
/// exclusive: `frozen` wins over everything, `running` over the walk
/// look-ahead, ground contact over descent states.
pub fn follow_offset(snapshot: &TargetSnapshot, config: &FollowConfig) -> Vec2 {
    let flags = &snapshot.flags;

    if flags.frozen {
        return Vec2::ZERO;
    }

    let sign = flags.facing.sign();
    let x = if flags.running {
        // Fixed run look-ahead; velocity deliberately ignored.
        config.run_offset * sign
    } else {
        config.base_offset * sign + snapshot.velocity.x / config.horizontal_divisor
    };

    let y = if flags.grounded || flags.jumping {
        config.ground_offset
    } else if flags.fast_falling || flags.wall_sliding {
        // velocity.y is negative during descent, so the term pushes further down.
        -config.descend_offset + snapshot.velocity.y / config.vertical_divisor
    } else if flags.falling {
        -config.fall_offset
    } else {
        0.0
    };

    Vec2::new(x, y)
}
