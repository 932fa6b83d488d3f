//! Spatial override volumes and the active-overlap registry.
//!
//! Volumes are registered once at level load and persist for the scene.
//! The collision system reports enter/exit as the actor crosses them; the
//! registry keeps the active set in entry order and resolves the effective
//! override per kind (boundary, offset, zoom) each frame.

use glam::Vec2;
use serde::{Deserialize, Serialize};
use strata_math::Rect;

/// Identifier of a registered trigger volume.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TriggerId(u32);

/// Errors produced when registering a trigger volume.
#[derive(Debug, thiserror::Error)]
pub enum TriggerError {
    /// The volume's spatial extent contains NaN or infinity.
    #[error("trigger volume '{0}' has a non-finite extent")]
    NonFiniteExtent(String),

    /// The volume's spatial extent has zero area.
    #[error("trigger volume '{0}' has a degenerate extent")]
    DegenerateExtent(String),

    /// The boundary payload contains NaN or infinity, or has zero area.
    #[error("trigger volume '{0}' has a malformed boundary override")]
    MalformedBoundary(String),

    /// The offset payload contains NaN or infinity.
    #[error("trigger volume '{0}' has a non-finite offset override")]
    NonFiniteOffset(String),

    /// The zoom payload is NaN or infinity.
    #[error("trigger volume '{0}' has a non-finite zoom override")]
    NonFiniteZoom(String),
}

/// An axis-aligned level region that overrides camera behavior while the
/// tracked actor overlaps it. Each payload is independently optional; a
/// volume may pin the boundary without touching offset or zoom.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct TriggerVolume {
    /// Author-facing name, used in diagnostics and the debug overlay.
    pub name: String,
    /// Spatial extent the actor must overlap.
    pub rect: Rect,
    /// Fixed rectangle the camera center is confined to while active.
    pub boundary: Option<Rect>,
    /// Positional bias replacing the movement-derived offset while active.
    pub offset: Option<Vec2>,
    /// Zoom delta (added to base zoom) replacing the movement-derived
    /// delta while active.
    pub zoom: Option<f32>,
}

impl TriggerVolume {
    pub fn new(name: impl Into<String>, rect: Rect) -> Self {
        Self {
            name: name.into(),
            rect,
            boundary: None,
            offset: None,
            zoom: None,
        }
    }

    /// Confine the camera to `boundary` while this volume is active.
    pub fn with_boundary(mut self, boundary: Rect) -> Self {
        self.boundary = Some(boundary);
        self
    }

    /// Replace the movement-derived offset while this volume is active.
    pub fn with_offset(mut self, offset: Vec2) -> Self {
        self.offset = Some(offset);
        self
    }

    /// Replace the movement-derived zoom delta while this volume is active.
    pub fn with_zoom(mut self, zoom: f32) -> Self {
        self.zoom = Some(zoom);
        self
    }

    /// Check the invariants a volume must satisfy before it may be
    /// registered. `Rect::new` already normalizes swapped corners, so the
    /// only rejected rectangles are non-finite or zero-area ones.
    pub fn validate(&self) -> Result<(), TriggerError> {
        if !self.rect.is_finite() {
            return Err(TriggerError::NonFiniteExtent(self.name.clone()));
        }
        if self.rect.is_degenerate() {
            return Err(TriggerError::DegenerateExtent(self.name.clone()));
        }
        if let Some(boundary) = &self.boundary
            && (!boundary.is_finite() || boundary.is_degenerate())
        {
            return Err(TriggerError::MalformedBoundary(self.name.clone()));
        }
        if let Some(offset) = &self.offset
            && !offset.is_finite()
        {
            return Err(TriggerError::NonFiniteOffset(self.name.clone()));
        }
        if let Some(zoom) = self.zoom
            && !zoom.is_finite()
        {
            return Err(TriggerError::NonFiniteZoom(self.name.clone()));
        }
        Ok(())
    }
}

/// The override values in force this frame, resolved per kind from the
/// active set. A total function of the registry state; "none" everywhere
/// when no volume is active.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct EffectiveOverride {
    /// Winning boundary and the volume that supplied it.
    pub boundary: Option<(TriggerId, Rect)>,
    /// Winning offset replacement.
    pub offset: Option<Vec2>,
    /// Winning zoom-delta replacement.
    pub zoom: Option<f32>,
}

impl EffectiveOverride {
    pub fn is_none(&self) -> bool {
        self.boundary.is_none() && self.offset.is_none() && self.zoom.is_none()
    }
}

/// Tracks registered volumes and the subset the actor currently overlaps.
///
/// The active set is an explicit list in entry order; resolution walks it
/// from the most recent entry backwards, independently per override kind,
/// so one volume may supply the boundary while a later one supplies the
/// zoom. Duplicate enters and unmatched exits are absorbed as no-ops.
#[derive(Debug, Default)]
pub struct TriggerRegistry {
    volumes: Vec<TriggerVolume>,
    active: Vec<TriggerId>,
}

impl TriggerRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a volume at level load. Malformed volumes are rejected
    /// here with a diagnostic so they can never reach frame evaluation.
    pub fn register(&mut self, volume: TriggerVolume) -> Result<TriggerId, TriggerError> {
        volume.validate()?;
        let id = TriggerId(self.volumes.len() as u32);
        tracing::debug!(name = %volume.name, ?id, "registered trigger volume");
        self.volumes.push(volume);
        Ok(id)
    }

    /// Look up a registered volume.
    pub fn volume(&self, id: TriggerId) -> Option<&TriggerVolume> {
        self.volumes.get(id.0 as usize)
    }

    /// Number of registered volumes.
    pub fn len(&self) -> usize {
        self.volumes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.volumes.is_empty()
    }

    /// Ids of all registered volumes whose extent contains `point`.
    /// Overlap detection belongs to the collision system; this point query
    /// exists for tools and headless harnesses that stand in for it.
    pub fn ids_overlapping(&self, point: Vec2) -> Vec<TriggerId> {
        self.volumes
            .iter()
            .enumerate()
            .filter(|(_, v)| v.rect.contains_point(point))
            .map(|(i, _)| TriggerId(i as u32))
            .collect()
    }

    /// The actor entered a volume. Appends to the active set, preserving
    /// entry order. A duplicate enter or an unknown id is a no-op.
    pub fn on_enter(&mut self, id: TriggerId) {
        if self.volume(id).is_none() {
            tracing::warn!(?id, "enter event for unregistered trigger volume");
            return;
        }
        if self.active.contains(&id) {
            tracing::debug!(?id, "duplicate enter event ignored");
            return;
        }
        self.active.push(id);
    }

    /// The actor left a volume. Removing an id that is not active is a
    /// no-op, not an error: late or duplicate exit events are expected
    /// from fast-moving actors.
    pub fn on_exit(&mut self, id: TriggerId) {
        match self.active.iter().position(|&a| a == id) {
            Some(index) => {
                self.active.remove(index);
            }
            None => {
                tracing::debug!(?id, "exit event without matching enter ignored");
            }
        }
    }

    /// Drop the whole active set (scene transition). Registered volumes
    /// are kept; they belong to the level, not to the overlap state.
    pub fn clear_active(&mut self) {
        self.active.clear();
    }

    /// Currently active volume ids in entry order.
    pub fn active(&self) -> &[TriggerId] {
        &self.active
    }

    pub fn is_active(&self, id: TriggerId) -> bool {
        self.active.contains(&id)
    }

    /// Resolve the override in force this frame. Per kind, the most
    /// recently entered active volume declaring that kind wins; exiting
    /// the winner falls back to the next-most-recent declarer still in
    /// the set, or to none. Never fails.
    pub fn effective(&self) -> EffectiveOverride {
        let mut resolved = EffectiveOverride::default();
        for &id in self.active.iter().rev() {
            let Some(volume) = self.volume(id) else {
                continue;
            };
            if resolved.boundary.is_none()
                && let Some(boundary) = volume.boundary
            {
                resolved.boundary = Some((id, boundary));
            }
            if resolved.offset.is_none() {
                resolved.offset = volume.offset;
            }
            if resolved.zoom.is_none() {
                resolved.zoom = volume.zoom;
            }
        }
        resolved
    }
}
