//! Camera-control core for a 2D side-scroller.
//!
//! Tracks a moving actor with critically-damped smoothing, lets spatial
//! trigger volumes override offset, zoom, and boundary while the actor
//! overlaps them, and layers a time-bounded shake on top. Single-threaded
//! and frame-synchronous: the caller invokes [`CameraCore::update`] once
//! per frame between the physics pass and rendering.

pub mod bounds;
pub mod camera;
pub mod offset;
pub mod shake;
pub mod smooth;
pub mod snapshot;
pub mod trigger;
pub mod zoom;

pub use bounds::{clamp_to_actor, clamp_to_boundary};
pub use camera::{ActorId, CameraCore, CameraEvent, CameraPose, TrackedTarget};
pub use offset::follow_offset;
pub use shake::{ShakeController, ShakeRequest};
pub use smooth::{Channel, smooth_damp};
pub use snapshot::{Facing, MovementFlags, TargetSnapshot};
pub use trigger::{EffectiveOverride, TriggerError, TriggerId, TriggerRegistry, TriggerVolume};
pub use zoom::zoom_delta;
