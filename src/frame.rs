//! Per-frame input/output contract between the host and the engines.

use std::rc::Rc;

use glam::Vec2;
use serde::{Deserialize, Serialize};
use static_assertions::assert_eq_size;

use crate::palette::Palette;

/// Drawing surface size in device-independent pixels
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
}

impl Viewport {
    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    #[inline]
    pub fn size(&self) -> Vec2 {
        Vec2::new(self.width, self.height)
    }

    /// Point at the given fraction of the surface
    #[inline]
    pub fn at_fraction(&self, fraction: Vec2) -> Vec2 {
        self.size() * fraction
    }

    #[inline]
    pub fn center(&self) -> Vec2 {
        self.at_fraction(Vec2::splat(0.5))
    }
}

/// Last known pointer state in surface-local coordinates.
///
/// `active` stays false until the first pointer event; idle motion is used
/// until then.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct PointerState {
    pub position: Vec2,
    pub active: bool,
    pub pressed: bool,
}

impl PointerState {
    pub fn at(position: Vec2) -> Self {
        Self {
            position,
            active: true,
            pressed: false,
        }
    }

    pub fn pressed(self, pressed: bool) -> Self {
        Self { pressed, ..self }
    }
}

/// Everything the arm engine reads in one tick
#[derive(Debug, Clone, Default)]
pub struct FrameInput {
    /// Monotonic time in seconds (drives the idle motion phase)
    pub now: f64,
    pub viewport: Viewport,
    pub pointer: PointerState,
    /// Handed to the renderer untouched; shared, not copied, per frame
    pub palette: Rc<Palette>,
}

// The flat joint buffer handed to the host relies on this layout
assert_eq_size!(Vec2, [f32; 2]);

/// Joints as interleaved `x, y` pairs, without copying
pub fn flatten_joints(joints: &[Vec2]) -> &[f32] {
    bytemuck::cast_slice(joints)
}

/// Everything the renderer needs after one tick
#[derive(Debug, Clone, Serialize)]
pub struct FrameOutput {
    /// `segment count + 1` points, base first
    pub joints: Vec<Vec2>,
    /// Orientation of the last segment
    pub tip_orientation: f32,
    /// 0 = open, 1 = closed
    pub gripper_value: f32,
    /// One angle per configured finger
    pub finger_angles: Vec<f32>,
    /// Smoothed target the solver chased this frame
    pub target: Vec2,
    pub palette: Rc<Palette>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use wasm_bindgen_test::*;

    #[test]
    #[wasm_bindgen_test]
    fn test_flatten_joints_interleaves() {
        let joints = [Vec2::new(1.0, 2.0), Vec2::new(3.0, 4.0)];
        assert_eq!(flatten_joints(&joints), &[1.0, 2.0, 3.0, 4.0]);
    }

    #[test]
    #[wasm_bindgen_test]
    fn test_viewport_fractions() {
        let viewport = Viewport::new(800.0, 600.0);
        assert_eq!(viewport.center(), Vec2::new(400.0, 300.0));
        assert_eq!(viewport.at_fraction(Vec2::new(0.5, 1.0)), Vec2::new(400.0, 600.0));
    }

    #[test]
    #[wasm_bindgen_test]
    fn test_pointer_state_builders() {
        let pointer = PointerState::at(Vec2::new(5.0, 6.0)).pressed(true);
        assert!(pointer.active);
        assert!(pointer.pressed);
        assert!(!PointerState::default().active);
    }
}
