//! 2D geometry helpers on top of glam.

use std::f32::consts::{PI, TAU};

pub use glam::Vec2;

/// Squared length under which a vector has no usable direction.
pub const EPSILON: f32 = 1e-6;

/// Wrap an angle into (-PI, PI].
pub fn normalize_angle(angle: f32) -> f32 {
    if !angle.is_finite() {
        return 0.0;
    }
    let mut wrapped = angle.rem_euclid(TAU);
    if wrapped > PI {
        wrapped -= TAU;
    }
    // rem_euclid can land exactly on -PI after the shift above
    if wrapped <= -PI {
        wrapped += TAU;
    }
    wrapped
}

#[inline]
pub fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}

/// One exponential-smoothing step: move `current` by `ease` of the remaining gap.
#[inline]
pub fn ease_toward(current: Vec2, target: Vec2, ease: f32) -> Vec2 {
    current + (target - current) * ease
}

/// Extension trait for the handful of 2D operations glam does not provide.
pub trait Vec2Ext {
    /// Direction of the vector, or None if it is too short to have one
    fn heading(self) -> Option<f32>;

    /// Clamp each axis into `[min, max]`; if a range is inverted the upper bound wins
    fn clamp_to_rect(self, min: Vec2, max: Vec2) -> Vec2;

    /// Unit vector for an absolute angle
    fn from_heading(angle: f32) -> Vec2;
}

impl Vec2Ext for Vec2 {
    #[inline]
    fn heading(self) -> Option<f32> {
        if self.length_squared() <= EPSILON || !self.is_finite() {
            None
        } else {
            Some(self.y.atan2(self.x))
        }
    }

    fn clamp_to_rect(self, min: Vec2, max: Vec2) -> Vec2 {
        // f32::clamp panics on min > max, which a tiny viewport can produce
        Vec2::new(self.x.max(min.x).min(max.x), self.y.max(min.y).min(max.y))
    }

    #[inline]
    fn from_heading(angle: f32) -> Vec2 {
        let (sin, cos) = angle.sin_cos();
        Vec2::new(cos, sin)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wasm_bindgen_test::*;

    #[test]
    #[wasm_bindgen_test]
    fn test_normalize_angle_range() {
        assert!((normalize_angle(3.0 * PI).abs() - PI).abs() < 1e-5);
        assert!((normalize_angle(-PI) - PI).abs() < 1e-5);
        assert!((normalize_angle(0.25) - 0.25).abs() < 1e-6);
        assert!((normalize_angle(-0.25 - TAU) + 0.25).abs() < 1e-5);

        for i in -200..200 {
            let a = normalize_angle(i as f32 * 0.37);
            assert!(a > -PI && a <= PI, "{} out of range", a);
        }
    }

    #[test]
    #[wasm_bindgen_test]
    fn test_normalize_angle_non_finite() {
        assert_eq!(normalize_angle(f32::NAN), 0.0);
        assert_eq!(normalize_angle(f32::INFINITY), 0.0);
    }

    #[test]
    #[wasm_bindgen_test]
    fn test_heading_degenerate() {
        assert_eq!(Vec2::ZERO.heading(), None);
        assert_eq!(Vec2::new(1e-4, 0.0).heading(), None);
        let h = Vec2::new(0.0, 2.0).heading().unwrap();
        assert!((h - PI / 2.0).abs() < 1e-6);
    }

    #[test]
    #[wasm_bindgen_test]
    fn test_clamp_to_rect_inverted_range() {
        let p = Vec2::new(50.0, 50.0);
        let clamped = p.clamp_to_rect(Vec2::new(0.0, 80.0), Vec2::new(100.0, 20.0));
        assert_eq!(clamped, Vec2::new(50.0, 20.0));
    }

    #[test]
    #[wasm_bindgen_test]
    fn test_ease_toward() {
        let p = ease_toward(Vec2::ZERO, Vec2::new(10.0, -10.0), 0.5);
        assert_eq!(p, Vec2::new(5.0, -5.0));
        assert!((lerp(-0.6, -0.1, 1.0) + 0.1).abs() < 1e-6);
    }
}
