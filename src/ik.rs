use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::arm_constants::DEFAULT_STIFFNESS;
use crate::limb::Chain;
use crate::math::{normalize_angle, Vec2Ext};

/// How much of each CCD correction is applied per pass.
///
/// `Stiffness` is the canonical policy: the wrapped angular error is scaled,
/// giving exponential settling. `MaxRotation` applies the full correction
/// but never more than the given angle per pass, giving linear settling.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DampingPolicy {
    Stiffness(f32),
    MaxRotation(f32),
}

impl Default for DampingPolicy {
    fn default() -> Self {
        DampingPolicy::Stiffness(DEFAULT_STIFFNESS)
    }
}

impl DampingPolicy {
    /// Turn a raw angular error in (-PI, PI] into the rotation actually applied
    #[inline]
    pub fn apply(self, delta: f32) -> f32 {
        match self {
            DampingPolicy::Stiffness(stiffness) => delta * stiffness,
            DampingPolicy::MaxRotation(max) => delta.clamp(-max, max),
        }
    }
}

/// One frame of damped cyclic coordinate descent.
///
/// Runs `iterations` sweeps from tip to base. Each segment is rotated about
/// its start joint so the tip swings toward `target`, scaled by `stiffness`.
/// Downstream joints are refreshed immediately so later segments in the
/// same sweep see the update.
///
/// # Returns
/// * `Vec<Vec2>` - joint positions after the step (base first)
pub fn solve_step(chain: &mut Chain, target: Vec2, iterations: u32, stiffness: f32) -> Vec<Vec2> {
    solve_step_with(chain, target, iterations, DampingPolicy::Stiffness(stiffness))
}

/// [`solve_step`] with an explicit damping policy
pub fn solve_step_with(
    chain: &mut Chain,
    target: Vec2,
    iterations: u32,
    policy: DampingPolicy,
) -> Vec<Vec2> {
    let mut joints = chain.forward_kinematics();
    let last = joints.len() - 1;

    for _ in 0..iterations {
        for i in (0..chain.len()).rev() {
            let pivot = joints[i];

            // Pivot on the tip or on the target: no direction, skip this pass
            let (Some(to_tip), Some(to_target)) =
                ((joints[last] - pivot).heading(), (target - pivot).heading())
            else {
                continue;
            };

            let delta = policy.apply(normalize_angle(to_target - to_tip));
            let segment = chain.segment_mut(i);
            let orientation = normalize_angle(segment.orientation() + delta);
            segment.set_orientation(orientation);

            chain.refresh_joints_from(&mut joints, i);
        }
    }
    joints
}

/// Distance between the chain tip and `target`
pub fn tip_error(chain: &Chain, target: Vec2) -> f32 {
    chain.tip().distance(target)
}
