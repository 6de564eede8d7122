//! Reach Arm - Wasm Core
//!
//! Pointer-following robot arm (damped CCD inverse kinematics) and the
//! lane-keeping convoy animation, driven one frame at a time by the page.

mod arm_constants;
#[cfg(target_arch = "wasm32")]
mod bindings;
pub mod config;
pub mod convoy;
pub mod engine;
pub mod error;
pub mod frame;
pub mod gripper;
pub mod ik;
pub mod limb;
mod math;
pub mod palette;
pub mod session;
pub mod tracker;

use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
pub use bindings::{
    arm_joint_buffer, arm_pointer_button, arm_pointer_leave, arm_pointer_move, arm_resize,
    arm_set_palette, arm_set_theme, arm_tick, convoy_pointer_move, convoy_resize, convoy_tick,
    create_arm, create_arm_preset, create_convoy, destroy_arm, destroy_convoy,
};

pub use config::{ArmConfig, ArmPreset, BasePlacement, SegmentConfig, SolverConfig};
pub use convoy::{Convoy, ConvoyConfig, ConvoyOutput};
pub use engine::ArmEngine;
pub use error::{ArmError, Result};
pub use frame::{FrameInput, FrameOutput, PointerState, Viewport};
pub use glam::Vec2;
pub use gripper::{advance_gripper, FingerSpec, Gripper, GripperConfig};
pub use ik::{solve_step, solve_step_with, DampingPolicy};
pub use limb::{forward_kinematics, Chain, Segment};
pub use math::normalize_angle;
pub use palette::{Palette, Theme};
pub use tracker::{advance_smoothed_target, compute_raw_target, TargetTracker, TrackerConfig};

/// Set up logging and panic reporting. Runs automatically when the module loads.
#[wasm_bindgen(start)]
pub fn init() {
    cfg_if::cfg_if! {
        if #[cfg(target_arch = "wasm32")] {
            console_error_panic_hook::set_once();
            console_log::init_with_level(log::Level::Info).ok();
            log::info!("Reach arm core loaded");
        }
    }
}

/// Log to browser console
#[wasm_bindgen]
pub fn log(msg: &str) {
    log::info!("{}", msg);
}
