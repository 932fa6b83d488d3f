//! Movement-state zoom delta: wider view while running, tighter while
//! teleporting.

use strata_config::ZoomConfig;

use crate::snapshot::TargetSnapshot;

/// Signed delta added to the base zoom level. First match wins:
/// running zooms out, teleporting zooms in, otherwise no delta.
pub fn zoom_delta(snapshot: &TargetSnapshot, config: &ZoomConfig) -> f32 {
    let flags = &snapshot.flags;
    if flags.running {
        config.run_zoom_out
    } else if flags.teleporting {
        -config.teleport_zoom_in
    } else {
        0.0
    }
}
