//! Road variant: a small vehicle formation that follows the pointer and
//! snaps onto the lane centre line when close to it.
//!
//! Same chase idea as the arm without a chain: every vehicle eases toward
//! the (clamped) pointer plus its formation offset.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::config::check_finite;
use crate::error::{ArmError, Result};
use crate::frame::{PointerState, Viewport};
use crate::math::{ease_toward, lerp, Vec2Ext};
use crate::tracker::{compute_raw_target, IdleMotion, TrackerConfig};

/// Minimum per-axis displacement (px) before a vehicle turns to face its motion
const HEADING_DEADBAND: f32 = 0.5;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct VehicleSpec {
    /// Offset from the shared target in the formation
    pub offset: Vec2,
    /// Offset from the viewport centre when the layout changes
    pub spawn_offset: Vec2,
    /// Fraction of the remaining gap closed per frame
    pub ease: f32,
}

/// Magnetic lane keeping: targets near the lane are pulled onto it
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LaneConfig {
    /// Lane centre as a fraction of the viewport height
    pub y_fraction: f32,
    /// Vertical distance (px) inside which the magnet engages
    pub threshold: f32,
    /// 0 = no pull, 1 = exactly onto the lane
    pub pull: f32,
}

impl Default for LaneConfig {
    fn default() -> Self {
        Self {
            y_fraction: 0.25,
            threshold: 60.0,
            pull: 0.9,
        }
    }
}

/// Keeps the shared target on the visible part of the road. Only the vertical
/// axis is bounded; the formation may run off either side.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RoadMargins {
    pub top: f32,
    pub bottom: f32,
}

impl Default for RoadMargins {
    fn default() -> Self {
        Self {
            top: 80.0,
            bottom: 40.0,
        }
    }
}

impl RoadMargins {
    /// Clamp `y` into `[top, height - bottom]`; on a surface too short for both
    /// margins the top one wins
    pub fn apply(&self, y: f32, height: f32) -> f32 {
        y.min(height - self.bottom).max(self.top)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConvoyConfig {
    /// First vehicle leads
    pub vehicles: Vec<VehicleSpec>,
    pub lane: LaneConfig,
    pub margins: RoadMargins,
}

impl Default for ConvoyConfig {
    fn default() -> Self {
        let leader = VehicleSpec {
            offset: Vec2::ZERO,
            spawn_offset: Vec2::ZERO,
            ease: 0.08,
        };
        let wing = |side: f32| VehicleSpec {
            offset: Vec2::new(-60.0, 50.0 * side),
            spawn_offset: Vec2::new(-40.0, 40.0 * side),
            ease: 0.05,
        };
        Self {
            vehicles: vec![leader, wing(-1.0), wing(1.0)],
            lane: LaneConfig::default(),
            margins: RoadMargins::default(),
        }
    }
}

impl ConvoyConfig {
    pub fn from_json(json: &str) -> Result<Self> {
        let config: ConvoyConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.vehicles.is_empty() {
            return Err(ArmError::InvalidParameter {
                name: "convoy.vehicles",
                value: 0.0,
            });
        }
        for vehicle in &self.vehicles {
            if !(vehicle.ease.is_finite() && vehicle.ease > 0.0 && vehicle.ease <= 1.0) {
                return Err(ArmError::InvalidParameter {
                    name: "convoy.vehicle.ease",
                    value: vehicle.ease,
                });
            }
        }
        check_finite("convoy.margins", &[self.margins.top, self.margins.bottom])?;
        check_finite("convoy.lane.y_fraction", &[self.lane.y_fraction])?;
        if !(self.lane.threshold.is_finite() && self.lane.threshold >= 0.0) {
            return Err(ArmError::InvalidParameter {
                name: "convoy.lane.threshold",
                value: self.lane.threshold,
            });
        }
        if !(0.0..=1.0).contains(&self.lane.pull) {
            return Err(ArmError::InvalidParameter {
                name: "convoy.lane.pull",
                value: self.lane.pull,
            });
        }
        Ok(())
    }

    /// Idle when no pointer: park at the viewport centre
    fn tracker_config(&self) -> TrackerConfig {
        TrackerConfig {
            idle: IdleMotion::parked(Vec2::splat(0.5)),
            clamp: None,
            ..TrackerConfig::default()
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct VehiclePose {
    pub position: Vec2,
    /// Radians, 0 faces +x (along the road)
    pub heading: f32,
}

#[derive(Debug, Clone, Serialize)]
pub struct ConvoyOutput {
    pub vehicles: Vec<VehiclePose>,
    /// The leader is being held on the lane centre line
    pub lane_keeping: bool,
    pub target: Vec2,
}

pub struct Convoy {
    config: ConvoyConfig,
    tracker: TrackerConfig,
    poses: Vec<VehiclePose>,
    viewport: Option<Viewport>,
}

impl Convoy {
    pub fn new(config: ConvoyConfig) -> Result<Self> {
        config.validate()?;
        let poses = vec![
            VehiclePose {
                position: Vec2::ZERO,
                heading: 0.0,
            };
            config.vehicles.len()
        ];
        log::info!("Convoy created with {} vehicles", poses.len());
        Ok(Self {
            tracker: config.tracker_config(),
            config,
            poses,
            viewport: None,
        })
    }

    /// Regroup the formation around the viewport centre
    pub fn resize(&mut self, viewport: Viewport) {
        let center = viewport.center();
        for (pose, spec) in self.poses.iter_mut().zip(&self.config.vehicles) {
            pose.position = center + spec.spawn_offset;
        }
        self.viewport = Some(viewport);
        log::debug!("Convoy regrouped at ({:.1}, {:.1})", center.x, center.y);
    }

    /// Target after clamping and lane magnetism, plus whether the magnet engaged.
    /// The road margins apply to the idle target as well as the pointer.
    pub fn steer_target(&self, viewport: Viewport, pointer: &PointerState) -> (Vec2, bool) {
        let mut target = compute_raw_target(&self.tracker, 0.0, viewport, pointer);
        target.y = self.config.margins.apply(target.y, viewport.height);
        let lane_y = viewport.height * self.config.lane.y_fraction;

        let magnetized = (target.y - lane_y).abs() < self.config.lane.threshold;
        if magnetized {
            target.y = lerp(target.y, lane_y, self.config.lane.pull);
        }
        (target, magnetized)
    }

    pub fn tick(&mut self, viewport: Viewport, pointer: &PointerState) -> ConvoyOutput {
        if self.viewport != Some(viewport) {
            self.resize(viewport);
        }
        let (target, lane_keeping) = self.steer_target(viewport, pointer);

        for (pose, spec) in self.poses.iter_mut().zip(&self.config.vehicles) {
            let destination = target + spec.offset;
            let remaining = destination - pose.position;
            pose.position = ease_toward(pose.position, destination, spec.ease);

            // Hold the last heading when nearly stopped
            if remaining.x.abs() > HEADING_DEADBAND || remaining.y.abs() > HEADING_DEADBAND {
                if let Some(heading) = remaining.heading() {
                    pose.heading = heading;
                }
            }
        }

        ConvoyOutput {
            vehicles: self.poses.clone(),
            lane_keeping,
            target,
        }
    }

    pub fn poses(&self) -> &[VehiclePose] {
        &self.poses
    }
}
