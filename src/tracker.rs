use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::arm_constants::{
    DEFAULT_IDLE_AMPLITUDE, DEFAULT_IDLE_CENTER, DEFAULT_IDLE_FREQUENCY, DEFAULT_REST_FRACTION,
    DEFAULT_TARGET_EASE,
};
use crate::frame::{PointerState, Viewport};
use crate::math::{ease_toward, Vec2Ext};

/// Fallback motion used until the pointer is first seen.
///
/// A Lissajous-like path: `center * viewport + (sin(fx t), cos(fy t)) * amplitude`.
/// A zero amplitude parks the target at `center`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct IdleMotion {
    /// Fraction of the viewport
    pub center: Vec2,
    /// Pixels
    pub amplitude: Vec2,
    /// Angular frequency per axis (rad/s)
    pub frequency: Vec2,
}

impl Default for IdleMotion {
    fn default() -> Self {
        Self {
            center: Vec2::from_array(DEFAULT_IDLE_CENTER),
            amplitude: Vec2::from_array(DEFAULT_IDLE_AMPLITUDE),
            frequency: Vec2::from_array(DEFAULT_IDLE_FREQUENCY),
        }
    }
}

impl IdleMotion {
    /// Motionless target at a viewport fraction
    pub fn parked(center: Vec2) -> Self {
        Self {
            center,
            amplitude: Vec2::ZERO,
            frequency: Vec2::ZERO,
        }
    }

    pub fn sample(&self, now: f64, viewport: Viewport) -> Vec2 {
        let wobble = Vec2::new(
            (now * f64::from(self.frequency.x)).sin() as f32,
            (now * f64::from(self.frequency.y)).cos() as f32,
        );
        viewport.at_fraction(self.center) + wobble * self.amplitude
    }
}

/// Keeps an active pointer target this many pixels inside each viewport edge
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClampMargins {
    pub left: f32,
    pub top: f32,
    pub right: f32,
    pub bottom: f32,
}

impl ClampMargins {
    pub fn apply(&self, point: Vec2, viewport: Viewport) -> Vec2 {
        let min = Vec2::new(self.left, self.top);
        let max = viewport.size() - Vec2::new(self.right, self.bottom);
        point.clamp_to_rect(min, max)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrackerConfig {
    /// Fraction of the remaining gap closed per frame; lower is heavier
    pub ease: f32,
    pub idle: IdleMotion,
    /// Where the smoothed target is parked on layout while the pointer is inactive
    pub rest_fraction: Vec2,
    pub clamp: Option<ClampMargins>,
}

impl Default for TrackerConfig {
    fn default() -> Self {
        Self {
            ease: DEFAULT_TARGET_EASE,
            idle: IdleMotion::default(),
            rest_fraction: Vec2::from_array(DEFAULT_REST_FRACTION),
            clamp: None,
        }
    }
}

/// Raw chase target for this frame: the pointer when active (optionally
/// clamped), otherwise the idle motion.
pub fn compute_raw_target(
    config: &TrackerConfig,
    now: f64,
    viewport: Viewport,
    pointer: &PointerState,
) -> Vec2 {
    if !pointer.active {
        return config.idle.sample(now, viewport);
    }
    match config.clamp {
        Some(margins) => margins.apply(pointer.position, viewport),
        None => pointer.position,
    }
}

/// Exponential smoothing step: `current + (raw - current) * ease`
#[inline]
pub fn advance_smoothed_target(current: Vec2, raw: Vec2, ease: f32) -> Vec2 {
    ease_toward(current, raw, ease)
}

/// Owns the inertial (smoothed) target the solver chases.
///
/// Call [`TargetTracker::update`] exactly once per frame, before the solver.
#[derive(Debug, Clone)]
pub struct TargetTracker {
    config: TrackerConfig,
    smoothed: Vec2,
    raw: Vec2,
}

impl TargetTracker {
    pub fn new(config: TrackerConfig) -> Self {
        Self {
            config,
            smoothed: Vec2::ZERO,
            raw: Vec2::ZERO,
        }
    }

    pub fn config(&self) -> &TrackerConfig {
        &self.config
    }

    #[inline]
    pub fn smoothed(&self) -> Vec2 {
        self.smoothed
    }

    /// Raw target computed by the last update
    #[inline]
    pub fn raw(&self) -> Vec2 {
        self.raw
    }

    /// Park the smoothed target at the rest point for this viewport
    pub fn reset_to_rest(&mut self, viewport: Viewport) {
        self.smoothed = viewport.at_fraction(self.config.rest_fraction);
    }

    /// Compute this frame's raw target and advance the smoothed one toward it
    pub fn update(&mut self, now: f64, viewport: Viewport, pointer: &PointerState) -> Vec2 {
        self.raw = compute_raw_target(&self.config, now, viewport, pointer);
        self.smoothed = advance_smoothed_target(self.smoothed, self.raw, self.config.ease);
        self.smoothed
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wasm_bindgen_test::*;

    const VIEWPORT: Viewport = Viewport::new(1000.0, 800.0);

    #[test]
    #[wasm_bindgen_test]
    fn test_idle_target_when_pointer_inactive() {
        let config = TrackerConfig::default();
        let pointer = PointerState {
            position: Vec2::new(5.0, 5.0),
            active: false,
            pressed: false,
        };

        // At t=0: (0.3w + sin 0 * 60, 0.45h + cos 0 * 40)
        let raw = compute_raw_target(&config, 0.0, VIEWPORT, &pointer);
        assert!(raw.distance(Vec2::new(300.0, 400.0)) < 1e-3, "{:?}", raw);

        // The idle path stays inside its amplitude box
        for i in 0..500 {
            let raw = compute_raw_target(&config, i as f64 * 0.1, VIEWPORT, &pointer);
            assert!((raw.x - 300.0).abs() <= 60.0 + 1e-3);
            assert!((raw.y - 360.0).abs() <= 40.0 + 1e-3);
        }
    }

    #[test]
    #[wasm_bindgen_test]
    fn test_idle_target_moves_over_time() {
        let config = TrackerConfig::default();
        let pointer = PointerState::default();
        let a = compute_raw_target(&config, 0.0, VIEWPORT, &pointer);
        let b = compute_raw_target(&config, 1.0, VIEWPORT, &pointer);
        assert!(a.distance(b) > 1.0);
    }

    #[test]
    #[wasm_bindgen_test]
    fn test_active_pointer_is_raw_target() {
        let config = TrackerConfig::default();
        let pointer = PointerState::at(Vec2::new(-50.0, 2000.0));
        let raw = compute_raw_target(&config, 3.0, VIEWPORT, &pointer);
        assert_eq!(raw, Vec2::new(-50.0, 2000.0));
    }

    #[test]
    #[wasm_bindgen_test]
    fn test_clamp_margins_keep_target_visible() {
        let config = TrackerConfig {
            clamp: Some(ClampMargins {
                left: 0.0,
                top: 80.0,
                right: 0.0,
                bottom: 40.0,
            }),
            ..TrackerConfig::default()
        };

        let above = compute_raw_target(&config, 0.0, VIEWPORT, &PointerState::at(Vec2::new(10.0, 5.0)));
        assert_eq!(above, Vec2::new(10.0, 80.0));

        let below = compute_raw_target(
            &config,
            0.0,
            VIEWPORT,
            &PointerState::at(Vec2::new(1200.0, 900.0)),
        );
        assert_eq!(below, Vec2::new(1000.0, 760.0));
    }

    #[test]
    #[wasm_bindgen_test]
    fn test_smoothing_converges_and_stays() {
        let raw = Vec2::new(500.0, 200.0);
        let mut current = Vec2::new(-300.0, 900.0);

        for _ in 0..400 {
            current = advance_smoothed_target(current, raw, 0.05);
        }
        assert!(current.distance(raw) < 1e-2);

        // Fixed point: further frames do not drift away
        for _ in 0..100 {
            let next = advance_smoothed_target(current, raw, 0.05);
            assert!(next.distance(raw) <= current.distance(raw) + 1e-4);
            current = next;
        }
        assert!(current.distance(raw) < 1e-2);
    }

    #[test]
    #[wasm_bindgen_test]
    fn test_tracker_lags_behind_pointer() {
        let mut tracker = TargetTracker::new(TrackerConfig::default());
        tracker.reset_to_rest(VIEWPORT);
        assert!(tracker.smoothed().distance(Vec2::new(300.0, 320.0)) < 1e-3);

        let pointer = PointerState::at(Vec2::new(700.0, 320.0));
        let first = tracker.update(0.0, VIEWPORT, &pointer);

        // 5% of the 400px gap
        assert!((first.x - 320.0).abs() < 1e-3);
        assert_eq!(tracker.raw(), pointer.position);
    }
}
