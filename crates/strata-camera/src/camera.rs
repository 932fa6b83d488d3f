//! Per-frame camera orchestration.
//!
//! `CameraCore` is the explicit camera context owned by the caller: it
//! ingests the frame's snapshot and queued collision events, composes the
//! offset/zoom/trigger/shake stages, and publishes the final pose. One
//! update per render frame, after physics and before rendering.

use std::collections::VecDeque;
use std::fmt::Write;

use glam::Vec2;
use strata_config::{CameraConfig, ConfigError};
use strata_math::Rect;

use crate::bounds::{clamp_to_actor, clamp_to_boundary};
use crate::offset::follow_offset;
use crate::shake::{ShakeController, ShakeRequest};
use crate::smooth::Channel;
use crate::snapshot::TargetSnapshot;
use crate::trigger::{TriggerError, TriggerId, TriggerRegistry, TriggerVolume};
use crate::zoom::zoom_delta;

/// Identifier of an actor as reported by the collision system.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ActorId(pub u64);

/// The actor the camera is following.
#[derive(Clone, Debug)]
pub struct TrackedTarget {
    pub id: ActorId,
    /// Display name for diagnostics and the debug overlay.
    pub name: String,
}

/// Discrete notifications from external systems, drained at the start of
/// each update so ordering within a frame is deterministic.
#[derive(Clone, Debug)]
pub enum CameraEvent {
    /// The collision system saw an actor begin overlapping a volume.
    TriggerEntered { actor: ActorId, trigger: TriggerId },
    /// The collision system saw an actor stop overlapping a volume.
    TriggerExited { actor: ActorId, trigger: TriggerId },
    /// The scene changed; all overlap state is stale.
    SceneChanged,
}

/// Final camera pose published each frame.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CameraPose {
    pub position: Vec2,
    pub zoom: f32,
}

/// Manual per-kind overrides set through the public commands. They
/// supersede registry-resolved values; resetting one returns that kind
/// to the registry/default baseline regardless of current state.
#[derive(Clone, Copy, Debug, Default)]
struct ManualOverrides {
    offset: Option<Vec2>,
    zoom: Option<f32>,
    boundary: Option<Rect>,
}

/// Where this frame's winning boundary came from, for the debug overlay.
#[derive(Clone, Debug, Default, PartialEq)]
enum BoundarySource {
    #[default]
    None,
    Command,
    Volume(String),
}

/// Intermediate values of the last update, kept for the debug overlay.
#[derive(Clone, Debug, Default)]
struct FrameBreakdown {
    bias: Vec2,
    bias_overridden: bool,
    delta: f32,
    delta_overridden: bool,
    target_zoom: f32,
    boundary: Option<Rect>,
    boundary_source: BoundarySource,
}

/// The camera-control core. Owns all camera state; mutated only inside
/// [`CameraCore::update`].
#[derive(Debug)]
pub struct CameraCore {
    config: CameraConfig,
    registry: TriggerRegistry,
    shake: ShakeController,
    events: VecDeque<CameraEvent>,
    manual: ManualOverrides,
    target: Option<TrackedTarget>,
    /// Viewport size in world units at zoom 1.0.
    viewport: Option<Vec2>,
    pos_x: Channel,
    pos_y: Channel,
    zoom: Channel,
    /// Accumulated scroll input, bounded so base + input stays in range.
    zoom_input: f32,
    shake_offset: Vec2,
    last_snapshot: Option<TargetSnapshot>,
    breakdown: FrameBreakdown,
    warned_no_target: bool,
    warned_no_viewport: bool,
    warned_bad_snapshot: bool,
}

impl CameraCore {
    /// Build a camera from a validated config. Malformed tuning values are
    /// rejected here so the per-frame path never sees them.
    pub fn new(config: CameraConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let base_zoom = config.zoom.base_zoom;
        Ok(Self {
            config,
            registry: TriggerRegistry::new(),
            shake: ShakeController::new(),
            events: VecDeque::new(),
            manual: ManualOverrides::default(),
            target: None,
            viewport: None,
            pos_x: Channel::at(0.0),
            pos_y: Channel::at(0.0),
            zoom: Channel::at(base_zoom),
            zoom_input: 0.0,
            shake_offset: Vec2::ZERO,
            last_snapshot: None,
            breakdown: FrameBreakdown::default(),
            warned_no_target: false,
            warned_no_viewport: false,
            warned_bad_snapshot: false,
        })
    }

    /// Deterministic shake sampling, for tests and replays.
    pub fn with_shake_seed(mut self, seed: u64) -> Self {
        self.shake = ShakeController::seeded(seed);
        self
    }

    // --- Level / scene setup ---

    /// Register a trigger volume at level load.
    pub fn register_trigger(&mut self, volume: TriggerVolume) -> Result<TriggerId, TriggerError> {
        self.registry.register(volume)
    }

    /// Read access to the registry for queries and tooling.
    pub fn triggers(&self) -> &TriggerRegistry {
        &self.registry
    }

    /// Set the viewport size in world units at zoom 1.0. Half-extents are
    /// recomputed from the current zoom every frame.
    pub fn set_viewport(&mut self, width: f32, height: f32) {
        if !width.is_finite() || !height.is_finite() || width <= 0.0 || height <= 0.0 {
            tracing::warn!(width, height, "ignoring malformed viewport size");
            return;
        }
        self.viewport = Some(Vec2::new(width, height));
        self.warned_no_viewport = false;
    }

    // --- Public commands (§ external interface) ---

    /// Switch the tracked actor. Takes effect on the next frame; the
    /// smoothing channels carry over, so the camera glides to the new
    /// target instead of cutting.
    pub fn set_target(&mut self, id: ActorId, name: impl Into<String>) {
        self.target = Some(TrackedTarget {
            id,
            name: name.into(),
        });
        self.warned_no_target = false;
    }

    /// Stop tracking. Subsequent frames hold the last pose.
    pub fn clear_target(&mut self) {
        self.target = None;
        self.last_snapshot = None;
    }

    pub fn target(&self) -> Option<&TrackedTarget> {
        self.target.as_ref()
    }

    /// Force a positional offset, superseding movement-derived bias and
    /// any volume-supplied offset.
    pub fn set_offset_override(&mut self, offset: Vec2) {
        if !offset.is_finite() {
            tracing::warn!(?offset, "ignoring non-finite offset override");
            return;
        }
        self.manual.offset = Some(offset);
    }

    /// Return the offset to the no-override baseline.
    pub fn reset_offset_override(&mut self) {
        self.manual.offset = None;
    }

    /// Force a zoom delta (added to base zoom), superseding movement and
    /// volume deltas.
    pub fn set_zoom_override(&mut self, delta: f32) {
        if !delta.is_finite() {
            tracing::warn!(delta, "ignoring non-finite zoom override");
            return;
        }
        self.manual.zoom = Some(delta);
    }

    /// Return the zoom delta to the no-override baseline.
    pub fn reset_zoom_override(&mut self) {
        self.manual.zoom = None;
    }

    /// Force a boundary rectangle, superseding any volume boundary.
    pub fn set_boundary_override(&mut self, boundary: Rect) {
        if !boundary.is_finite() || boundary.is_degenerate() {
            tracing::warn!(?boundary, "ignoring malformed boundary override");
            return;
        }
        self.manual.boundary = Some(boundary);
    }

    /// Return the boundary to the no-override baseline.
    pub fn reset_boundary_override(&mut self) {
        self.manual.boundary = None;
    }

    /// Start (or restart) a shake on top of the settled position.
    pub fn start_shake(&mut self, request: ShakeRequest) {
        self.shake.start(request);
    }

    /// Cancel any running shake immediately.
    pub fn stop_shake(&mut self) {
        self.shake.stop();
        self.shake_offset = Vec2::ZERO;
    }

    /// Scroll-wheel zoom adjustment, added to the base zoom before
    /// clamping. Accumulation is bounded by the configured zoom range.
    pub fn add_zoom_input(&mut self, delta: f32) {
        if !delta.is_finite() {
            return;
        }
        let zoom = &self.config.zoom;
        self.zoom_input = (self.zoom_input + delta)
            .clamp(zoom.min_zoom - zoom.base_zoom, zoom.max_zoom - zoom.base_zoom);
    }

    /// Queue a collision/scene event for the next update.
    pub fn push_event(&mut self, event: CameraEvent) {
        self.events.push_back(event);
    }

    // --- Per-frame update ---

    /// Advance the camera one frame. `snapshot` is this frame's actor
    /// state, or `None` when the actor is gone; `dt` is the frame's
    /// elapsed time in seconds. Never fails: every degraded condition
    /// holds the last valid pose.
    pub fn update(&mut self, snapshot: Option<&TargetSnapshot>, dt: f32) -> CameraPose {
        self.drain_events();

        if self.target.is_none() {
            if !self.warned_no_target {
                tracing::warn!("camera update with no tracked target, holding pose");
                self.warned_no_target = true;
            }
            return self.pose();
        }
        let Some(viewport) = self.viewport else {
            if !self.warned_no_viewport {
                tracing::warn!("camera update with no viewport set, holding pose");
                self.warned_no_viewport = true;
            }
            return self.pose();
        };

        let snapshot = match snapshot {
            Some(snapshot) if snapshot.is_finite() => {
                self.warned_bad_snapshot = false;
                self.last_snapshot = Some(*snapshot);
                *snapshot
            }
            Some(bad) => {
                // A single bad frame must not corrupt the following ones.
                if !self.warned_bad_snapshot {
                    tracing::warn!(?bad, "non-finite snapshot rejected, holding pose");
                    self.warned_bad_snapshot = true;
                }
                match self.last_snapshot {
                    Some(last) => last,
                    None => return self.pose(),
                }
            }
            None => match self.last_snapshot {
                Some(last) => last,
                None => return self.pose(),
            },
        };

        // Instantaneous targets from movement state.
        let bias = follow_offset(&snapshot, &self.config.follow);
        let delta = zoom_delta(&snapshot, &self.config.zoom);

        // Trigger volumes supersede the calculators; manual commands
        // supersede both, each kind independently.
        let effective = self.registry.effective();
        let bias_override = self.manual.offset.or(effective.offset);
        let delta_override = self.manual.zoom.or(effective.zoom);
        let (boundary, boundary_source) = if let Some(rect) = self.manual.boundary {
            (Some(rect), BoundarySource::Command)
        } else if let Some((id, rect)) = effective.boundary {
            let name = self
                .registry
                .volume(id)
                .map(|v| v.name.clone())
                .unwrap_or_default();
            (Some(rect), BoundarySource::Volume(name))
        } else {
            (None, BoundarySource::None)
        };

        let final_bias = bias_override.unwrap_or(bias);
        let final_delta = delta_override.unwrap_or(delta);

        let zoom_cfg = &self.config.zoom;
        let target_pos = snapshot.position + final_bias;
        let target_zoom = (zoom_cfg.base_zoom + self.zoom_input + final_delta)
            .clamp(zoom_cfg.min_zoom, zoom_cfg.max_zoom);

        // Smoothing.
        let smooth_pos = self.config.follow.position_smooth_time;
        self.pos_x.advance(target_pos.x, smooth_pos, dt);
        self.pos_y.advance(target_pos.y, smooth_pos, dt);
        self.zoom.advance(target_zoom, zoom_cfg.zoom_smooth_time, dt);
        // The target is clamped before smoothing; clamping the channel too
        // keeps the published zoom inside the range on every frame of the
        // transition.
        self.zoom.value = self.zoom.value.clamp(zoom_cfg.min_zoom, zoom_cfg.max_zoom);

        // Constrain position: trigger boundary when active, otherwise the
        // always-on actor-relative bounds.
        let smoothed = Vec2::new(self.pos_x.value, self.pos_y.value);
        let clamped = match boundary {
            Some(rect) => {
                let half_extents = viewport * 0.5 / self.zoom.value;
                clamp_to_boundary(smoothed, &rect, half_extents)
            }
            None => clamp_to_actor(
                smoothed,
                snapshot.position,
                self.config.follow.max_offset_x,
                self.config.follow.max_offset_y,
            ),
        };
        // Feed the constraint back so internal state stays bounded too.
        self.pos_x.value = clamped.x;
        self.pos_y.value = clamped.y;

        // Shake rides on top of the settled position; it never feeds back
        // into smoothing or clamping.
        self.shake_offset = self.shake.advance(dt);

        self.breakdown = FrameBreakdown {
            bias: final_bias,
            bias_overridden: bias_override.is_some(),
            delta: final_delta,
            delta_overridden: delta_override.is_some(),
            target_zoom,
            boundary,
            boundary_source,
        };

        self.pose()
    }

    /// The most recently published pose.
    pub fn pose(&self) -> CameraPose {
        CameraPose {
            position: Vec2::new(self.pos_x.value, self.pos_y.value) + self.shake_offset,
            zoom: self.zoom.value,
        }
    }

    fn drain_events(&mut self) {
        while let Some(event) = self.events.pop_front() {
            match event {
                CameraEvent::TriggerEntered { actor, trigger } => {
                    if self.is_tracked(actor) {
                        self.registry.on_enter(trigger);
                    } else {
                        tracing::debug!(?actor, ?trigger, "enter event for untracked actor");
                    }
                }
                CameraEvent::TriggerExited { actor, trigger } => {
                    if self.is_tracked(actor) {
                        self.registry.on_exit(trigger);
                    } else {
                        tracing::debug!(?actor, ?trigger, "exit event for untracked actor");
                    }
                }
                CameraEvent::SceneChanged => {
                    self.registry.clear_active();
                    self.manual = ManualOverrides::default();
                    self.stop_shake();
                }
            }
        }
    }

    fn is_tracked(&self, actor: ActorId) -> bool {
        self.target.as_ref().is_some_and(|t| t.id == actor)
    }

    /// Format a multi-line diagnostic snapshot of the last update for an
    /// external overlay renderer. Built on demand only.
    pub fn debug_overlay(&self) -> String {
        let mut text = String::new();
        match &self.target {
            Some(target) => {
                let _ = writeln!(text, "Target: {} (#{})", target.name, target.id.0);
            }
            None => {
                let _ = writeln!(text, "Target: none");
            }
        }

        let b = &self.breakdown;
        let _ = writeln!(
            text,
            "Offset: ({:.2}, {:.2}){}",
            b.bias.x,
            b.bias.y,
            if b.bias_overridden { " [override]" } else { "" },
        );
        let _ = writeln!(
            text,
            "Zoom: base={:.2} input={:+.2} delta={:+.2}{} target={:.2} current={:.2}",
            self.config.zoom.base_zoom,
            self.zoom_input,
            b.delta,
            if b.delta_overridden { " [override]" } else { "" },
            b.target_zoom,
            self.zoom.value,
        );
        match (&b.boundary_source, b.boundary) {
            (BoundarySource::Command, Some(rect)) => {
                let _ = writeln!(
                    text,
                    "Boundary: command [{:.1},{:.1}]x[{:.1},{:.1}]",
                    rect.min.x, rect.max.x, rect.min.y, rect.max.y,
                );
            }
            (BoundarySource::Volume(name), Some(rect)) => {
                let _ = writeln!(
                    text,
                    "Boundary: '{}' [{:.1},{:.1}]x[{:.1},{:.1}]",
                    name, rect.min.x, rect.max.x, rect.min.y, rect.max.y,
                );
            }
            _ => {
                let _ = writeln!(text, "Boundary: none");
            }
        }
        if self.shake.is_active() {
            let _ = writeln!(
                text,
                "Shake: {:.2}s remaining, offset ({:.2}, {:.2})",
                self.shake.remaining(),
                self.shake_offset.x,
                self.shake_offset.y,
            );
        } else {
            let _ = writeln!(text, "Shake: idle");
        }
        let pose = self.pose();
        let _ = write!(
            text,
            "Pose: ({:.2}, {:.2}) zoom={:.2}",
            pose.position.x, pose.position.y, pose.zoom,
        );
        text
    }
}
