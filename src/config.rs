//! Arm configuration: every tunable of the engine, loadable from JSON.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::arm_constants::{
    DEFAULT_BASE_NARROW, DEFAULT_BASE_OFFSET, DEFAULT_BASE_WIDE, DEFAULT_BREAKPOINT,
    DEFAULT_ITERATIONS, DEFAULT_SEGMENT_LENGTHS, DEFAULT_SEGMENT_ORIENTATIONS,
    DEFAULT_SEGMENT_THICKNESS, MAX_FACTOR,
};
use crate::error::{ArmError, Result};
use crate::frame::Viewport;
use crate::gripper::GripperConfig;
use crate::ik::DampingPolicy;
use crate::limb::{Chain, Segment};
use crate::tracker::TrackerConfig;

/// Hero-page arm preset
pub const HERO_ARM_JSON: &str = include_str!("../presets/hero_arm.json");
/// Larger arm with the two-finger claw
pub const CLAW_ARM_JSON: &str = include_str!("../presets/claw_arm.json");

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SegmentConfig {
    pub length: f32,
    pub thickness: f32,
    /// Initial absolute orientation (radians)
    #[serde(default)]
    pub orientation: f32,
}

impl From<SegmentConfig> for Segment {
    fn from(config: SegmentConfig) -> Self {
        Segment::new(config.length, config.thickness, config.orientation)
    }
}

/// Where the chain base sits for a given viewport
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum BasePlacement {
    /// `viewport * fraction + offset`, using `wide` when the viewport is
    /// wider than `breakpoint` and `narrow` otherwise
    ViewportFraction {
        wide: Vec2,
        narrow: Vec2,
        breakpoint: f32,
        offset: Vec2,
    },
    Fixed { point: Vec2 },
}

impl Default for BasePlacement {
    fn default() -> Self {
        BasePlacement::ViewportFraction {
            wide: Vec2::from_array(DEFAULT_BASE_WIDE),
            narrow: Vec2::from_array(DEFAULT_BASE_NARROW),
            breakpoint: DEFAULT_BREAKPOINT,
            offset: Vec2::from_array(DEFAULT_BASE_OFFSET),
        }
    }
}

impl BasePlacement {
    pub fn resolve(&self, viewport: Viewport) -> Vec2 {
        match *self {
            BasePlacement::ViewportFraction {
                wide,
                narrow,
                breakpoint,
                offset,
            } => {
                let fraction = if viewport.width > breakpoint { wide } else { narrow };
                viewport.at_fraction(fraction) + offset
            }
            BasePlacement::Fixed { point } => point,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SolverConfig {
    /// CCD sweeps per frame
    pub iterations: u32,
    pub damping: DampingPolicy,
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            iterations: DEFAULT_ITERATIONS,
            damping: DampingPolicy::default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ArmConfig {
    pub segments: Vec<SegmentConfig>,
    pub base: BasePlacement,
    pub solver: SolverConfig,
    pub tracker: TrackerConfig,
    pub gripper: GripperConfig,
}

impl Default for ArmConfig {
    fn default() -> Self {
        let segments = DEFAULT_SEGMENT_LENGTHS
            .iter()
            .zip(DEFAULT_SEGMENT_THICKNESS)
            .zip(DEFAULT_SEGMENT_ORIENTATIONS)
            .map(|((&length, thickness), orientation)| SegmentConfig {
                length,
                thickness,
                orientation,
            })
            .collect();

        Self {
            segments,
            base: BasePlacement::default(),
            solver: SolverConfig::default(),
            tracker: TrackerConfig::default(),
            gripper: GripperConfig::default(),
        }
    }
}

fn check_factor(name: &'static str, value: f32) -> Result<()> {
    if value.is_finite() && value > 0.0 && value <= MAX_FACTOR {
        Ok(())
    } else {
        Err(ArmError::InvalidParameter { name, value })
    }
}

pub(crate) fn check_finite(name: &'static str, values: &[f32]) -> Result<()> {
    match values.iter().find(|v| !v.is_finite()) {
        Some(&value) => Err(ArmError::InvalidParameter { name, value }),
        None => Ok(()),
    }
}

impl ArmConfig {
    /// Parse and validate a JSON configuration. Missing fields take defaults.
    pub fn from_json(json: &str) -> Result<Self> {
        let config: ArmConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_json_string(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Reject anything that would make the engine misbehave at runtime
    pub fn validate(&self) -> Result<()> {
        self.build_chain(Vec2::ZERO)?;

        if self.solver.iterations == 0 {
            return Err(ArmError::InvalidParameter {
                name: "solver.iterations",
                value: 0.0,
            });
        }
        match self.solver.damping {
            DampingPolicy::Stiffness(stiffness) => check_factor("solver.stiffness", stiffness)?,
            DampingPolicy::MaxRotation(max) => {
                if !(max.is_finite() && max > 0.0) {
                    return Err(ArmError::InvalidParameter {
                        name: "solver.max_rotation",
                        value: max,
                    });
                }
            }
        }

        check_factor("tracker.ease", self.tracker.ease)?;
        check_factor("gripper.ease", self.gripper.ease)?;

        let idle = &self.tracker.idle;
        check_finite(
            "tracker.idle",
            &[
                idle.center.x,
                idle.center.y,
                idle.amplitude.x,
                idle.amplitude.y,
                idle.frequency.x,
                idle.frequency.y,
            ],
        )?;
        check_finite("tracker.rest_fraction", &self.tracker.rest_fraction.to_array())?;
        if let Some(margins) = self.tracker.clamp {
            check_finite(
                "tracker.clamp",
                &[margins.left, margins.top, margins.right, margins.bottom],
            )?;
        }

        match self.base {
            BasePlacement::ViewportFraction {
                wide,
                narrow,
                breakpoint,
                offset,
            } => check_finite(
                "base",
                &[wide.x, wide.y, narrow.x, narrow.y, breakpoint, offset.x, offset.y],
            )?,
            BasePlacement::Fixed { point } => check_finite("base.point", &point.to_array())?,
        }

        for finger in &self.gripper.fingers {
            check_finite(
                "gripper.fingers",
                &[finger.pivot_side, finger.open_angle, finger.closed_angle],
            )?;
            if finger.pivot_side.abs() != 1.0 {
                return Err(ArmError::InvalidParameter {
                    name: "gripper.fingers.pivot_side",
                    value: finger.pivot_side,
                });
            }
        }
        Ok(())
    }

    /// Build the kinematic chain in its initial pose
    pub fn build_chain(&self, base: Vec2) -> Result<Chain> {
        let segments = self.segments.iter().copied().map(Segment::from).collect();
        Chain::new(base, segments)
    }
}

/// Shipped arm configurations
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArmPreset {
    Hero,
    Claw,
}

impl ArmPreset {
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "hero" => Some(ArmPreset::Hero),
            "claw" => Some(ArmPreset::Claw),
            _ => None,
        }
    }

    pub fn json(self) -> &'static str {
        match self {
            ArmPreset::Hero => HERO_ARM_JSON,
            ArmPreset::Claw => CLAW_ARM_JSON,
        }
    }

    pub fn load(self) -> Result<ArmConfig> {
        ArmConfig::from_json(self.json())
    }
}
