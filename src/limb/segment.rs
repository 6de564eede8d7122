use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::math::Vec2Ext;

/// A rigid link of the limb.
///
/// `orientation` is absolute (world space), not relative to the parent
/// segment. Length and thickness are fixed after construction.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Segment {
    length: f32,
    orientation: f32,
    /// Rendering hint only, the solver never reads it
    thickness: f32,
}

impl Segment {
    /// Create a segment. Validity is checked when it joins a [`Chain`](super::Chain).
    pub const fn new(length: f32, thickness: f32, orientation: f32) -> Self {
        Self {
            length,
            orientation,
            thickness,
        }
    }

    #[inline]
    pub fn length(&self) -> f32 {
        self.length
    }

    #[inline]
    pub fn thickness(&self) -> f32 {
        self.thickness
    }

    #[inline]
    pub fn orientation(&self) -> f32 {
        self.orientation
    }

    /// Vector from this segment's start joint to its end joint
    #[inline]
    pub fn offset(&self) -> Vec2 {
        Vec2::from_heading(self.orientation) * self.length
    }

    pub(crate) fn set_orientation(&mut self, orientation: f32) {
        self.orientation = orientation;
    }
}
