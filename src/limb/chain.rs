use glam::Vec2;

use super::segment::Segment;
use crate::error::{ArmError, Result};

/// Ordered kinematic chain, base to tip, anchored at a fixed base point.
///
/// Joint positions are derived on demand and never stored. Only the solver
/// rotates segments; only the host moves the base.
#[derive(Debug, Clone, PartialEq)]
pub struct Chain {
    base: Vec2,
    segments: Vec<Segment>,
}

impl Chain {
    /// Build a chain, rejecting an empty segment list and any non-positive
    /// (or non-finite) length or thickness.
    pub fn new(base: Vec2, segments: Vec<Segment>) -> Result<Self> {
        if segments.is_empty() {
            return Err(ArmError::EmptyChain);
        }
        for (index, segment) in segments.iter().enumerate() {
            if !(segment.length().is_finite() && segment.length() > 0.0) {
                return Err(ArmError::InvalidSegment {
                    index,
                    field: "length",
                    value: segment.length(),
                });
            }
            if !(segment.thickness().is_finite() && segment.thickness() > 0.0) {
                return Err(ArmError::InvalidSegment {
                    index,
                    field: "thickness",
                    value: segment.thickness(),
                });
            }
            if !segment.orientation().is_finite() {
                return Err(ArmError::InvalidSegment {
                    index,
                    field: "orientation",
                    value: segment.orientation(),
                });
            }
        }
        Ok(Self { base, segments })
    }

    #[inline]
    pub fn base(&self) -> Vec2 {
        self.base
    }

    /// Move the anchor (layout/resize). Segment orientations are untouched.
    pub fn set_base(&mut self, base: Vec2) {
        self.base = base;
    }

    #[inline]
    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.segments.len()
    }

    /// Always false: construction rejects empty chains
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// Maximum distance the tip can be from the base
    pub fn reach(&self) -> f32 {
        self.segments.iter().map(Segment::length).sum()
    }

    /// Forward kinematics: `len() + 1` joints, `joints[0]` is the base
    pub fn forward_kinematics(&self) -> Vec<Vec2> {
        let mut joints = Vec::with_capacity(self.segments.len() + 1);
        self.forward_kinematics_into(&mut joints);
        joints
    }

    /// Forward kinematics into a reused buffer
    pub fn forward_kinematics_into(&self, joints: &mut Vec<Vec2>) {
        joints.clear();
        let mut current = self.base;
        joints.push(current);
        for segment in &self.segments {
            current += segment.offset();
            joints.push(current);
        }
    }

    /// Recompute joints `start + 1 ..` from `joints[start]` after segment
    /// `start` (or any later one) changed orientation.
    pub(crate) fn refresh_joints_from(&self, joints: &mut [Vec2], start: usize) {
        debug_assert_eq!(joints.len(), self.segments.len() + 1);
        for k in start..self.segments.len() {
            joints[k + 1] = joints[k] + self.segments[k].offset();
        }
    }

    pub fn tip(&self) -> Vec2 {
        self.base + self.segments.iter().map(Segment::offset).sum::<Vec2>()
    }

    /// Orientation of the last segment (orients the gripper drawing)
    pub fn tip_orientation(&self) -> f32 {
        // Non-empty by construction
        self.segments
            .last()
            .map(Segment::orientation)
            .unwrap_or_default()
    }

    pub(crate) fn segment_mut(&mut self, index: usize) -> &mut Segment {
        &mut self.segments[index]
    }
}

/// Free-function form of [`Chain::forward_kinematics`]
pub fn forward_kinematics(chain: &Chain) -> Vec<Vec2> {
    chain.forward_kinematics()
}
