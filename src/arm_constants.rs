//! Shared arm constants used by both build.rs and runtime code.
//!
//! This module is included by both the build script and the config module
//! so that compile-time preset validation and runtime validation agree.

// Some constants are only used by build.rs for validation
#![allow(dead_code)]

use std::f32::consts::FRAC_PI_2;

/// Hero arm segment lengths, base to tip (pixels).
pub const DEFAULT_SEGMENT_LENGTHS: [f32; 3] = [400.0, 320.0, 160.0];

/// Hero arm segment thicknesses (rendering hint only).
pub const DEFAULT_SEGMENT_THICKNESS: [f32; 3] = [70.0, 50.0, 35.0];

/// Initial absolute orientation of each segment (radians).
pub const DEFAULT_SEGMENT_ORIENTATIONS: [f32; 3] = [-FRAC_PI_2, 0.5, -0.5];

/// Base anchor as a fraction of the viewport on wide layouts.
pub const DEFAULT_BASE_WIDE: [f32; 2] = [0.85, 1.0];
/// Base anchor as a fraction of the viewport on narrow layouts.
pub const DEFAULT_BASE_NARROW: [f32; 2] = [0.5, 1.0];
/// Pixel offset added to the base anchor (pushes the base just off-screen).
pub const DEFAULT_BASE_OFFSET: [f32; 2] = [0.0, 50.0];
/// Viewport width above which the wide anchor applies.
pub const DEFAULT_BREAKPOINT: f32 = 768.0;

/// CCD passes per frame.
pub const DEFAULT_ITERATIONS: u32 = 4;
/// Fraction of each angular correction applied per pass ("heavy" feel).
pub const DEFAULT_STIFFNESS: f32 = 0.04;

/// Inertia of the chase target.
pub const DEFAULT_TARGET_EASE: f32 = 0.05;
/// Speed of the gripper open/close transition.
pub const DEFAULT_GRIPPER_EASE: f32 = 0.2;

/// Idle motion centre as a viewport fraction.
pub const DEFAULT_IDLE_CENTER: [f32; 2] = [0.3, 0.45];
/// Idle motion amplitude (pixels).
pub const DEFAULT_IDLE_AMPLITUDE: [f32; 2] = [60.0, 40.0];
/// Idle motion angular frequency (rad/s).
pub const DEFAULT_IDLE_FREQUENCY: [f32; 2] = [0.6, 0.48];
/// Where the chase target is parked after a layout change without pointer input.
pub const DEFAULT_REST_FRACTION: [f32; 2] = [0.3, 0.4];

/// Upper finger: open and closed angle (radians). The lower finger mirrors it.
pub const DEFAULT_FINGER_OPEN: f32 = -0.6;
pub const DEFAULT_FINGER_CLOSED: f32 = -0.1;

/// Upper bound for every ease/stiffness factor.
pub const MAX_FACTOR: f32 = 1.0;
