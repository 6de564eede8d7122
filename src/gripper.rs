use serde::{Deserialize, Serialize};

use crate::arm_constants::{DEFAULT_FINGER_CLOSED, DEFAULT_FINGER_OPEN, DEFAULT_GRIPPER_EASE};
use crate::math::lerp;

/// One finger of the claw, posed by the shared gripper value.
///
/// `pivot_side` is +1 or -1 and tells the renderer which side of the hub the
/// finger hinges on.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FingerSpec {
    pub pivot_side: f32,
    pub open_angle: f32,
    pub closed_angle: f32,
}

impl FingerSpec {
    /// The opposing finger: other side of the hub, angles negated
    pub fn mirrored(&self) -> Self {
        Self {
            pivot_side: -self.pivot_side,
            open_angle: -self.open_angle,
            closed_angle: -self.closed_angle,
        }
    }

    #[inline]
    pub fn angle(&self, gripper_value: f32) -> f32 {
        lerp(self.open_angle, self.closed_angle, gripper_value)
    }
}

/// Upper finger of the default claw plus its mirror
pub fn default_fingers() -> Vec<FingerSpec> {
    let upper = FingerSpec {
        pivot_side: -1.0,
        open_angle: DEFAULT_FINGER_OPEN,
        closed_angle: DEFAULT_FINGER_CLOSED,
    };
    vec![upper, upper.mirrored()]
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GripperConfig {
    pub ease: f32,
    pub fingers: Vec<FingerSpec>,
}

impl Default for GripperConfig {
    fn default() -> Self {
        Self {
            ease: DEFAULT_GRIPPER_EASE,
            fingers: default_fingers(),
        }
    }
}

/// One easing step toward fully closed (engaged) or fully open.
///
/// The result is clamped to [0, 1] so float error can never push it out.
#[inline]
pub fn advance_gripper(current: f32, engaged: bool, ease: f32) -> f32 {
    let setpoint = if engaged { 1.0 } else { 0.0 };
    (current + (setpoint - current) * ease).clamp(0.0, 1.0)
}

/// Continuous open/closed actuation of the claw
#[derive(Debug, Clone)]
pub struct Gripper {
    config: GripperConfig,
    value: f32,
}

impl Gripper {
    /// Starts fully open
    pub fn new(config: GripperConfig) -> Self {
        Self { config, value: 0.0 }
    }

    #[inline]
    pub fn value(&self) -> f32 {
        self.value
    }

    pub fn update(&mut self, engaged: bool) -> f32 {
        self.value = advance_gripper(self.value, engaged, self.config.ease);
        self.value
    }

    pub fn finger_angles(&self) -> Vec<f32> {
        self.config
            .fingers
            .iter()
            .map(|finger| finger.angle(self.value))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};
    use wasm_bindgen_test::*;

    #[test]
    #[wasm_bindgen_test]
    fn test_gripper_stays_in_bounds() {
        let mut rng = StdRng::seed_from_u64(42);

        for _ in 0..50 {
            // Any ease in (0, 1], including exactly 1
            let ease = if rng.random_bool(0.1) {
                1.0
            } else {
                rng.random_range(f32::EPSILON..=1.0)
            };
            let mut value = 0.0;
            for _ in 0..200 {
                value = advance_gripper(value, rng.random_bool(0.5), ease);
                assert!((0.0..=1.0).contains(&value), "value {} ease {}", value, ease);
            }
        }
    }

    #[test]
    #[wasm_bindgen_test]
    fn test_gripper_closes_and_reopens() {
        let mut gripper = Gripper::new(GripperConfig::default());
        assert_eq!(gripper.value(), 0.0);

        for _ in 0..60 {
            gripper.update(true);
        }
        assert!(gripper.value() > 0.99);

        for _ in 0..60 {
            gripper.update(false);
        }
        assert!(gripper.value() < 0.01);
    }

    #[test]
    #[wasm_bindgen_test]
    fn test_finger_angles_interpolate_and_mirror() {
        let mut gripper = Gripper::new(GripperConfig {
            ease: 1.0,
            ..GripperConfig::default()
        });

        let open = gripper.finger_angles();
        assert!((open[0] - DEFAULT_FINGER_OPEN).abs() < 1e-6);
        assert!((open[1] + DEFAULT_FINGER_OPEN).abs() < 1e-6);

        gripper.update(true);
        let closed = gripper.finger_angles();
        assert!((closed[0] - DEFAULT_FINGER_CLOSED).abs() < 1e-6);
        assert!((closed[1] + DEFAULT_FINGER_CLOSED).abs() < 1e-6);
    }

    #[test]
    #[wasm_bindgen_test]
    fn test_half_closed_finger() {
        let finger = FingerSpec {
            pivot_side: 1.0,
            open_angle: 0.6,
            closed_angle: 0.1,
        };
        assert!((finger.angle(0.5) - 0.35).abs() < 1e-6);
        assert_eq!(finger.mirrored().pivot_side, -1.0);
    }
}
