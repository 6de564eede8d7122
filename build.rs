//! Build script for arm preset validation
//!
//! This script runs at compile time and validates every arm preset JSON so a
//! broken preset fails the build instead of failing `ArmPreset::load` at runtime.

// Include the shared arm constants
#[path = "src/arm_constants.rs"]
mod arm_constants;

use serde::Deserialize;
use std::fs;
use std::path::Path;

/// Only the fields that can make a preset invalid; the rest may be omitted
#[derive(Debug, Deserialize)]
struct Segment {
    length: f32,
    thickness: f32,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct Solver {
    iterations: Option<u32>,
    damping: Option<serde_json::Value>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct Eased {
    ease: Option<f32>,
}

#[derive(Debug, Deserialize)]
struct Preset {
    #[serde(default)]
    segments: Option<Vec<Segment>>,
    #[serde(default)]
    solver: Solver,
    #[serde(default)]
    tracker: Eased,
    #[serde(default)]
    gripper: Eased,
}

fn check_factor(errors: &mut Vec<String>, name: &str, value: Option<f32>) {
    if let Some(value) = value {
        if !(value > 0.0 && value <= arm_constants::MAX_FACTOR) {
            errors.push(format!("  {} must be in (0, 1], got {}", name, value));
        }
    }
}

/// Validate a single preset, returning human-readable problems
fn validate_preset(preset: &Preset) -> Vec<String> {
    let mut errors = Vec::new();

    if let Some(segments) = &preset.segments {
        if segments.is_empty() {
            errors.push("  segments: chain must not be empty".to_string());
        }
        for (i, segment) in segments.iter().enumerate() {
            if !(segment.length > 0.0) {
                errors.push(format!("  segment {} length: {}", i, segment.length));
            }
            if !(segment.thickness > 0.0) {
                errors.push(format!("  segment {} thickness: {}", i, segment.thickness));
            }
        }
    }

    if preset.solver.iterations == Some(0) {
        errors.push("  solver.iterations must be at least 1".to_string());
    }
    if let Some(damping) = &preset.solver.damping {
        let stiffness = damping.get("stiffness").and_then(|v| v.as_f64());
        let max_rotation = damping.get("max_rotation").and_then(|v| v.as_f64());
        match (stiffness, max_rotation) {
            (Some(s), None) => check_factor(&mut errors, "solver.stiffness", Some(s as f32)),
            (None, Some(m)) if m > 0.0 => {}
            _ => errors.push(format!("  solver.damping invalid: {}", damping)),
        }
    }

    check_factor(&mut errors, "tracker.ease", preset.tracker.ease);
    check_factor(&mut errors, "gripper.ease", preset.gripper.ease);

    errors
}

/// Validate a preset file
fn validate_preset_file(path: &Path) -> Result<(), String> {
    let contents = fs::read_to_string(path)
        .map_err(|e| format!("Failed to read {}: {}", path.display(), e))?;

    let preset: Preset = serde_json::from_str(&contents)
        .map_err(|e| format!("Failed to parse {}: {}", path.display(), e))?;

    let errors = validate_preset(&preset);
    if errors.is_empty() {
        Ok(())
    } else {
        Err(format!(
            "Preset '{}' is invalid:\n{}",
            path.display(),
            errors.join("\n")
        ))
    }
}

fn main() {
    let preset_dir = Path::new("presets");

    if !preset_dir.exists() {
        println!("cargo:warning=Preset directory not found, skipping validation");
        return;
    }

    // Rerun if shared constants change
    println!("cargo:rerun-if-changed=src/arm_constants.rs");

    let mut has_errors = false;

    if let Ok(entries) = fs::read_dir(preset_dir) {
        for entry in entries.flatten() {
            let path = entry.path();
            if path.extension().is_some_and(|ext| ext == "json") {
                println!("cargo:rerun-if-changed={}", path.display());

                if let Err(e) = validate_preset_file(&path) {
                    println!("cargo:warning=VALIDATION ERROR: {}", e);
                    has_errors = true;
                }
            }
        }
    }

    if has_errors {
        panic!("Arm preset validation failed! Fix the files under presets/.");
    }

    println!("cargo:rerun-if-changed={}", preset_dir.display());
}
