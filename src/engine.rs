//! Arm animation engine: one instance per widget.
//!
//! Owns the chain, the chase target and the gripper, and advances them in a
//! fixed order each frame:
//! 1. apply a pending viewport change (base placement, rest target)
//! 2. tracker: raw target -> smoothed target
//! 3. solver: damped CCD toward the smoothed target
//! 4. gripper: ease toward the pressed state
//!
//! Instances share nothing, so any number can run side by side.

use glam::Vec2;

use crate::config::{ArmConfig, BasePlacement, SolverConfig};
use crate::error::Result;
use crate::frame::{FrameInput, FrameOutput, PointerState, Viewport};
use crate::gripper::Gripper;
use crate::ik::solve_step_with;
use crate::limb::Chain;
use crate::tracker::TargetTracker;

pub struct ArmEngine {
    chain: Chain,
    base: BasePlacement,
    solver: SolverConfig,
    tracker: TargetTracker,
    gripper: Gripper,
    /// Last viewport applied to the base; None until the first layout
    viewport: Option<Viewport>,
    /// Becomes true at the first active pointer and never resets
    pointer_seen: bool,
}

impl ArmEngine {
    /// Validate the configuration and build the engine in its initial pose.
    ///
    /// The base stays at the origin until the first [`resize`](Self::resize)
    /// or [`tick`](Self::tick).
    pub fn new(config: ArmConfig) -> Result<Self> {
        config.validate()?;
        let chain = config.build_chain(Vec2::ZERO)?;

        log::info!(
            "Arm engine created: {} segments, reach {:.0}px",
            chain.len(),
            chain.reach()
        );

        Ok(Self {
            chain,
            base: config.base,
            solver: config.solver,
            tracker: TargetTracker::new(config.tracker),
            gripper: Gripper::new(config.gripper),
            viewport: None,
            pointer_seen: false,
        })
    }

    /// Apply a layout change: move the base and, while the pointer has never
    /// been seen, park the chase target at its rest point.
    pub fn resize(&mut self, viewport: Viewport) {
        let base = self.base.resolve(viewport);
        self.chain.set_base(base);
        if !self.pointer_seen {
            self.tracker.reset_to_rest(viewport);
        }
        self.viewport = Some(viewport);
        log::debug!(
            "Arm resized to {}x{}, base at ({:.1}, {:.1})",
            viewport.width,
            viewport.height,
            base.x,
            base.y
        );
    }

    /// Advance one frame
    pub fn tick(&mut self, input: FrameInput) -> FrameOutput {
        let FrameInput {
            now,
            viewport,
            pointer,
            palette,
        } = input;

        if self.viewport != Some(viewport) {
            self.resize(viewport);
        }
        self.observe_pointer(&pointer);

        let target = self.tracker.update(now, viewport, &pointer);
        let joints = solve_step_with(
            &mut self.chain,
            target,
            self.solver.iterations,
            self.solver.damping,
        );
        let gripper_value = self.gripper.update(pointer.pressed);

        FrameOutput {
            joints,
            tip_orientation: self.chain.tip_orientation(),
            gripper_value,
            finger_angles: self.gripper.finger_angles(),
            target,
            palette,
        }
    }

    fn observe_pointer(&mut self, pointer: &PointerState) {
        if pointer.active && !self.pointer_seen {
            log::debug!("Arm switched from idle motion to pointer tracking");
            self.pointer_seen = true;
        }
    }

    pub fn chain(&self) -> &Chain {
        &self.chain
    }

    pub fn joints(&self) -> Vec<Vec2> {
        self.chain.forward_kinematics()
    }

    pub fn tip(&self) -> Vec2 {
        self.chain.tip()
    }

    pub fn gripper_value(&self) -> f32 {
        self.gripper.value()
    }

    /// Smoothed target the solver is chasing
    pub fn target(&self) -> Vec2 {
        self.tracker.smoothed()
    }

    pub fn viewport(&self) -> Option<Viewport> {
        self.viewport
    }
}
