//! wasm-bindgen surface: thin wrappers over the session registry.
//!
//! The page keeps its own `requestAnimationFrame` loop and DOM listeners.
//! Listeners call the `*_pointer_*` / `*_resize` functions, the frame
//! callback calls `*_tick`, and unmount calls `destroy_*`.

use std::rc::Rc;

use glam::Vec2;
use serde::Serialize;
use wasm_bindgen::prelude::*;

use crate::config::{ArmConfig, ArmPreset};
use crate::convoy::ConvoyConfig;
use crate::error::ArmError;
use crate::frame::{flatten_joints, Viewport};
use crate::palette::{Palette, Theme};
use crate::session::{self, HostInput, SessionHandle};

fn to_js_error(err: ArmError) -> JsValue {
    JsValue::from_str(&err.to_string())
}

/// Maps become plain objects rather than ES `Map`s
fn to_js<T: Serialize>(value: &T) -> Result<JsValue, JsValue> {
    value
        .serialize(&serde_wasm_bindgen::Serializer::json_compatible())
        .map_err(|e| JsValue::from_str(&format!("Failed to serialize frame: {}", e)))
}

/// Record host input for an arm; unknown handles are logged and ignored
fn record_arm_input(handle: SessionHandle, f: impl FnOnce(&mut HostInput)) {
    if let Err(e) = session::with_arm_session(handle, |s| f(&mut s.input)) {
        log::warn!("{}", e);
    }
}

fn record_convoy_input(handle: SessionHandle, f: impl FnOnce(&mut HostInput)) {
    if let Err(e) = session::with_convoy_session(handle, |s| f(&mut s.input)) {
        log::warn!("{}", e);
    }
}

// --- Arm ---

/// Create an arm from a JSON configuration (missing fields take defaults)
#[wasm_bindgen]
pub fn create_arm(config_json: &str) -> Result<SessionHandle, JsValue> {
    let config = ArmConfig::from_json(config_json).map_err(|e| {
        log::warn!("Rejected arm configuration: {}", e);
        to_js_error(e)
    })?;
    session::create_arm_session(config).map_err(to_js_error)
}

/// Create an arm from a shipped preset ("hero" or "claw")
#[wasm_bindgen]
pub fn create_arm_preset(name: &str) -> Result<SessionHandle, JsValue> {
    let preset = ArmPreset::from_name(name)
        .ok_or_else(|| JsValue::from_str(&format!("Unknown arm preset: {}", name)))?;
    let config = preset.load().map_err(to_js_error)?;
    session::create_arm_session(config).map_err(to_js_error)
}

#[wasm_bindgen]
pub fn destroy_arm(handle: SessionHandle) -> bool {
    session::destroy_arm_session(handle)
}

/// Pointer position in canvas-local CSS pixels
#[wasm_bindgen]
pub fn arm_pointer_move(handle: SessionHandle, x: f32, y: f32) {
    record_arm_input(handle, |input| input.pointer_moved(Vec2::new(x, y)));
}

#[wasm_bindgen]
pub fn arm_pointer_button(handle: SessionHandle, pressed: bool) {
    record_arm_input(handle, |input| input.pointer_button(pressed));
}

#[wasm_bindgen]
pub fn arm_pointer_leave(handle: SessionHandle) {
    record_arm_input(handle, HostInput::pointer_left);
}

#[wasm_bindgen]
pub fn arm_resize(handle: SessionHandle, width: f32, height: f32) {
    record_arm_input(handle, |input| input.resized(Viewport::new(width, height)));
}

/// Replace the palette with a JSON object of role -> CSS colour
#[wasm_bindgen]
pub fn arm_set_palette(handle: SessionHandle, palette_json: &str) -> Result<(), JsValue> {
    let palette = Palette::from_json(palette_json)
        .map_err(|e| JsValue::from_str(&format!("Failed to parse palette: {}", e)))?;
    session::with_arm_session(handle, |s| s.palette = Rc::new(palette)).map_err(to_js_error)
}

#[wasm_bindgen]
pub fn arm_set_theme(handle: SessionHandle, dark: bool) -> Result<(), JsValue> {
    let theme = if dark { Theme::Dark } else { Theme::Light };
    session::with_arm_session(handle, |s| s.palette = Rc::new(Palette::for_theme(theme)))
        .map_err(to_js_error)
}

/// Advance one frame. `now_ms` is the `requestAnimationFrame` timestamp.
#[wasm_bindgen]
pub fn arm_tick(handle: SessionHandle, now_ms: f64) -> Result<JsValue, JsValue> {
    let output = session::with_arm_session(handle, |s| s.tick(now_ms / 1000.0))
        .map_err(to_js_error)?;
    to_js(&output)
}

/// Current joints as a flat `[x0, y0, x1, y1, ...]` buffer (Float32Array on the JS side)
#[wasm_bindgen]
pub fn arm_joint_buffer(handle: SessionHandle) -> Result<Vec<f32>, JsValue> {
    session::with_arm_session(handle, |s| flatten_joints(&s.engine.joints()).to_vec())
        .map_err(to_js_error)
}

// --- Convoy ---

#[wasm_bindgen]
pub fn create_convoy(config_json: &str) -> Result<SessionHandle, JsValue> {
    let config = if config_json.trim().is_empty() {
        ConvoyConfig::default()
    } else {
        ConvoyConfig::from_json(config_json).map_err(to_js_error)?
    };
    session::create_convoy_session(config).map_err(to_js_error)
}

#[wasm_bindgen]
pub fn destroy_convoy(handle: SessionHandle) -> bool {
    session::destroy_convoy_session(handle)
}

#[wasm_bindgen]
pub fn convoy_pointer_move(handle: SessionHandle, x: f32, y: f32) {
    record_convoy_input(handle, |input| input.pointer_moved(Vec2::new(x, y)));
}

#[wasm_bindgen]
pub fn convoy_resize(handle: SessionHandle, width: f32, height: f32) {
    record_convoy_input(handle, |input| input.resized(Viewport::new(width, height)));
}

#[wasm_bindgen]
pub fn convoy_tick(handle: SessionHandle) -> Result<JsValue, JsValue> {
    let output = session::with_convoy_session(handle, |s| s.tick()).map_err(to_js_error)?;
    to_js(&output)
}
