//! Time-bounded random camera perturbation.
//!
//! The shake is an explicit per-frame-advanceable timer, polled once per
//! tick by the orchestrator. Starting a new shake while one is active
//! restarts it; cancellation takes effect immediately with no residue.

use glam::Vec2;
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use strata_config::ShakeConfig;

/// Parameters for one shake: total duration in seconds, overall strength,
/// and the per-axis sampling ranges in world units.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ShakeRequest {
    pub duration: f32,
    pub magnitude: f32,
    pub x_range: f32,
    pub y_range: f32,
}

impl From<&ShakeConfig> for ShakeRequest {
    fn from(config: &ShakeConfig) -> Self {
        Self {
            duration: config.duration,
            magnitude: config.magnitude,
            x_range: config.x_range,
            y_range: config.y_range,
        }
    }
}

#[derive(Clone, Copy, Debug)]
struct ActiveShake {
    request: ShakeRequest,
    elapsed: f32,
}

/// Samples a fresh random offset every frame while a shake is running,
/// and holds exactly zero otherwise.
#[derive(Debug)]
pub struct ShakeController {
    rng: SmallRng,
    active: Option<ActiveShake>,
    offset: Vec2,
}

impl ShakeController {
    pub fn new() -> Self {
        Self::from_rng(SmallRng::from_os_rng())
    }

    /// Deterministic controller for tests and replays.
    pub fn seeded(seed: u64) -> Self {
        Self::from_rng(SmallRng::seed_from_u64(seed))
    }

    fn from_rng(rng: SmallRng) -> Self {
        Self {
            rng,
            active: None,
            offset: Vec2::ZERO,
        }
    }

    /// Begin a shake, replacing any shake already running (no stacking).
    /// Requests with a non-positive or non-finite duration are ignored.
    pub fn start(&mut self, request: ShakeRequest) {
        if !request.duration.is_finite()
            || request.duration <= 0.0
            || !request.magnitude.is_finite()
            || !request.x_range.is_finite()
            || !request.y_range.is_finite()
        {
            tracing::warn!(?request, "ignoring malformed shake request");
            return;
        }
        self.active = Some(ActiveShake {
            request,
            elapsed: 0.0,
        });
    }

    /// Cancel immediately. The offset is zero from this call onward.
    pub fn stop(&mut self) {
        self.active = None;
        self.offset = Vec2::ZERO;
    }

    pub fn is_active(&self) -> bool {
        self.active.is_some()
    }

    /// Seconds left on the running shake, zero when idle.
    pub fn remaining(&self) -> f32 {
        self.active
            .map(|shake| (shake.request.duration - shake.elapsed).max(0.0))
            .unwrap_or(0.0)
    }

    /// The offset sampled by the last `advance` call.
    pub fn offset(&self) -> Vec2 {
        self.offset
    }

    /// Advance the timer by one frame and sample a new offset. On the
    /// frame the duration elapses the offset is exactly zero, and stays
    /// zero until a new shake starts.
    pub fn advance(&mut self, dt: f32) -> Vec2 {
        let Some(shake) = &mut self.active else {
            return Vec2::ZERO;
        };

        shake.elapsed += dt;
        if shake.elapsed >= shake.request.duration {
            self.stop();
            return Vec2::ZERO;
        }

        let request = shake.request;
        let x = self.rng.random_range(-request.x_range..=request.x_range);
        let y = self.rng.random_range(-request.y_range..=request.y_range);
        self.offset = Vec2::new(x, y) * request.magnitude;
        self.offset
    }
}

impl Default for ShakeController {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(duration: f32) -> ShakeRequest {
        ShakeRequest {
            duration,
            magnitude: 1.0,
            x_range: 0.5,
            y_range: 0.5,
        }
    }

    #[test]
    fn test_idle_controller_returns_zero() {
        let mut shake = ShakeController::seeded(1);
        assert_eq!(shake.advance(1.0 / 60.0), Vec2::ZERO);
        assert!(!shake.is_active());
    }

    #[test]
    fn test_offset_bounded_by_range_and_magnitude() {
        let mut shake = ShakeController::seeded(7);
        shake.start(ShakeRequest {
            duration: 10.0,
            magnitude: 2.0,
            x_range: 0.5,
            y_range: 0.25,
        });
        for _ in 0..200 {
            let offset = shake.advance(1.0 / 60.0);
            assert!(offset.x.abs() <= 1.0 + 1e-6);
            assert!(offset.y.abs() <= 0.5 + 1e-6);
        }
    }

    #[test]
    fn test_offset_zero_on_frame_duration_elapses() {
        let mut shake = ShakeController::seeded(3);
        shake.start(request(1.0));
        // 0.25 is exactly representable, so four frames sum to exactly 1.0.
        for _ in 0..3 {
            shake.advance(0.25);
        }
        assert!(shake.is_active());
        assert_eq!(shake.advance(0.25), Vec2::ZERO);
        assert!(!shake.is_active());
        assert_eq!(shake.offset(), Vec2::ZERO);

        // And stays zero on subsequent frames.
        assert_eq!(shake.advance(0.25), Vec2::ZERO);
    }

    #[test]
    fn test_shake_actually_perturbs() {
        let mut shake = ShakeController::seeded(11);
        shake.start(request(1.0));
        let mut moved = false;
        for _ in 0..30 {
            if shake.advance(1.0 / 60.0) != Vec2::ZERO {
                moved = true;
            }
        }
        assert!(moved, "a whole shake sampled only zero offsets");
    }

    #[test]
    fn test_stop_cancels_immediately() {
        let mut shake = ShakeController::seeded(5);
        shake.start(request(10.0));
        shake.advance(1.0 / 60.0);
        shake.stop();
        assert!(!shake.is_active());
        assert_eq!(shake.offset(), Vec2::ZERO);
        assert_eq!(shake.advance(1.0 / 60.0), Vec2::ZERO);
    }

    #[test]
    fn test_restart_replaces_running_shake() {
        let mut shake = ShakeController::seeded(9);
        shake.start(request(0.5));
        shake.advance(0.25);
        // Restart with a fresh duration; the old elapsed time is discarded.
        shake.start(request(1.0));
        assert!((shake.remaining() - 1.0).abs() < 1e-6);
        shake.advance(0.5);
        assert!(shake.is_active());
    }

    #[test]
    fn test_seeded_controllers_are_deterministic() {
        let mut a = ShakeController::seeded(42);
        let mut b = ShakeController::seeded(42);
        a.start(request(1.0));
        b.start(request(1.0));
        for _ in 0..30 {
            assert_eq!(a.advance(1.0 / 60.0), b.advance(1.0 / 60.0));
        }
    }

    #[test]
    fn test_malformed_request_ignored() {
        let mut shake = ShakeController::seeded(1);
        shake.start(request(0.0));
        assert!(!shake.is_active());
        shake.start(request(f32::NAN));
        assert!(!shake.is_active());
        shake.start(ShakeRequest {
            magnitude: f32::INFINITY,
            ..request(1.0)
        });
        assert!(!shake.is_active());
    }

    #[test]
    fn test_request_from_config() {
        let config = ShakeConfig::default();
        let request = ShakeRequest::from(&config);
        assert_eq!(request.duration, config.duration);
        assert_eq!(request.magnitude, config.magnitude);
    }
}
