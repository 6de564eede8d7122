//! Host-facing session registry with handle-based access
//!
//! Each widget on the page owns one session, addressed by a `u32` handle.
//! Event entry points only record the latest pointer/viewport/palette
//! (last value wins); the solver runs only inside `tick`, once per frame.
//! The wasm bindings are thin wrappers over the functions here.

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use glam::Vec2;

use crate::config::ArmConfig;
use crate::convoy::{Convoy, ConvoyConfig, ConvoyOutput};
use crate::engine::ArmEngine;
use crate::error::{ArmError, Result};
use crate::frame::{FrameInput, FrameOutput, PointerState, Viewport};
use crate::palette::Palette;

pub type SessionHandle = u32;

/// Input captured from host events between frames
#[derive(Debug, Clone, Default)]
pub struct HostInput {
    pub viewport: Viewport,
    pub pointer: PointerState,
}

impl HostInput {
    pub fn pointer_moved(&mut self, position: Vec2) {
        self.pointer.position = position;
        self.pointer.active = true;
    }

    pub fn pointer_button(&mut self, pressed: bool) {
        self.pointer.pressed = pressed;
    }

    /// Pointer left the page: a held button can no longer be released here
    pub fn pointer_left(&mut self) {
        self.pointer.pressed = false;
    }

    pub fn resized(&mut self, viewport: Viewport) {
        self.viewport = viewport;
    }
}

pub struct ArmSession {
    pub engine: ArmEngine,
    pub input: HostInput,
    pub palette: Rc<Palette>,
}

impl ArmSession {
    pub fn new(engine: ArmEngine) -> Self {
        Self {
            engine,
            input: HostInput::default(),
            palette: Rc::default(),
        }
    }

    pub fn tick(&mut self, now: f64) -> FrameOutput {
        self.engine.tick(FrameInput {
            now,
            viewport: self.input.viewport,
            pointer: self.input.pointer,
            palette: Rc::clone(&self.palette),
        })
    }
}

pub struct ConvoySession {
    pub convoy: Convoy,
    pub input: HostInput,
}

impl ConvoySession {
    pub fn tick(&mut self) -> ConvoyOutput {
        self.convoy.tick(self.input.viewport, &self.input.pointer)
    }
}

/// Handle table for one kind of session
pub struct Registry<T> {
    sessions: HashMap<SessionHandle, T>,
    next_handle: SessionHandle,
}

impl<T> Default for Registry<T> {
    fn default() -> Self {
        Self {
            sessions: HashMap::new(),
            // 0 is never handed out so hosts can use it as "none"
            next_handle: 1,
        }
    }
}

impl<T> Registry<T> {
    pub fn insert(&mut self, session: T) -> SessionHandle {
        let handle = self.next_handle;
        self.next_handle = self.next_handle.wrapping_add(1).max(1);
        self.sessions.insert(handle, session);
        handle
    }

    pub fn remove(&mut self, handle: SessionHandle) -> Option<T> {
        self.sessions.remove(&handle)
    }

    pub fn get_mut(&mut self, handle: SessionHandle) -> Result<&mut T> {
        self.sessions
            .get_mut(&handle)
            .ok_or(ArmError::UnknownSession(handle))
    }

    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }
}

thread_local! {
    static ARM_SESSIONS: RefCell<Registry<ArmSession>> = RefCell::new(Registry::default());
    static CONVOY_SESSIONS: RefCell<Registry<ConvoySession>> = RefCell::new(Registry::default());
}

/// Create an arm session and return its handle
pub fn create_arm_session(config: ArmConfig) -> Result<SessionHandle> {
    let engine = ArmEngine::new(config)?;
    let handle = ARM_SESSIONS.with(|sessions| sessions.borrow_mut().insert(ArmSession::new(engine)));
    log::info!("Arm session {} created", handle);
    Ok(handle)
}

/// Tear down an arm session. Returns false if the handle was unknown.
pub fn destroy_arm_session(handle: SessionHandle) -> bool {
    let removed = ARM_SESSIONS.with(|sessions| sessions.borrow_mut().remove(handle).is_some());
    if removed {
        log::info!("Arm session {} destroyed", handle);
    } else {
        log::warn!("Destroy requested for unknown arm session {}", handle);
    }
    removed
}

/// Execute a closure with mutable access to an arm session
pub fn with_arm_session<F, R>(handle: SessionHandle, f: F) -> Result<R>
where
    F: FnOnce(&mut ArmSession) -> R,
{
    ARM_SESSIONS.with(|sessions| sessions.borrow_mut().get_mut(handle).map(f))
}

pub fn create_convoy_session(config: ConvoyConfig) -> Result<SessionHandle> {
    let convoy = Convoy::new(config)?;
    let session = ConvoySession {
        convoy,
        input: HostInput::default(),
    };
    let handle = CONVOY_SESSIONS.with(|sessions| sessions.borrow_mut().insert(session));
    log::info!("Convoy session {} created", handle);
    Ok(handle)
}

pub fn destroy_convoy_session(handle: SessionHandle) -> bool {
    let removed = CONVOY_SESSIONS.with(|sessions| sessions.borrow_mut().remove(handle).is_some());
    if !removed {
        log::warn!("Destroy requested for unknown convoy session {}", handle);
    }
    removed
}

/// Execute a closure with mutable access to a convoy session
pub fn with_convoy_session<F, R>(handle: SessionHandle, f: F) -> Result<R>
where
    F: FnOnce(&mut ConvoySession) -> R,
{
    CONVOY_SESSIONS.with(|sessions| sessions.borrow_mut().get_mut(handle).map(f))
}

#[cfg(test)]
mod tests {
    use super::*;
    use wasm_bindgen_test::*;

    #[test]
    #[wasm_bindgen_test]
    fn test_events_only_record_state() {
        let handle = create_arm_session(ArmConfig::default()).unwrap();

        let tip_before = with_arm_session(handle, |s| s.engine.tip()).unwrap();
        with_arm_session(handle, |s| {
            s.input.resized(Viewport::new(1000.0, 800.0));
            s.input.pointer_moved(Vec2::new(10.0, 10.0));
            s.input.pointer_moved(Vec2::new(400.0, 300.0));
            s.input.pointer_button(true);
        })
        .unwrap();

        // Nothing solved until tick
        let tip_after = with_arm_session(handle, |s| s.engine.tip()).unwrap();
        assert_eq!(tip_before, tip_after);

        let output = with_arm_session(handle, |s| s.tick(0.0)).unwrap();
        // Last pointer position wins
        let pointer = with_arm_session(handle, |s| s.input.pointer).unwrap();
        assert_eq!(pointer.position, Vec2::new(400.0, 300.0));
        assert!(output.gripper_value > 0.0);
        assert_eq!(output.joints.len(), 4);

        assert!(destroy_arm_session(handle));
    }

    #[test]
    #[wasm_bindgen_test]
    fn test_destroyed_handle_is_unknown() {
        let handle = create_arm_session(ArmConfig::default()).unwrap();
        assert!(destroy_arm_session(handle));
        assert!(!destroy_arm_session(handle));

        let result = with_arm_session(handle, |s| s.tick(0.0));
        assert!(matches!(result, Err(ArmError::UnknownSession(h)) if h == handle));
    }

    #[test]
    #[wasm_bindgen_test]
    fn test_sessions_get_distinct_handles() {
        let a = create_arm_session(ArmConfig::default()).unwrap();
        let b = create_arm_session(ArmConfig::default()).unwrap();
        assert_ne!(a, b);
        assert_ne!(a, 0);

        with_arm_session(a, |s| s.input.pointer_moved(Vec2::new(1.0, 1.0))).unwrap();
        let b_pointer = with_arm_session(b, |s| s.input.pointer).unwrap();
        assert!(!b_pointer.active);

        destroy_arm_session(a);
        destroy_arm_session(b);
    }

    #[test]
    #[wasm_bindgen_test]
    fn test_pointer_left_releases_button() {
        let mut input = HostInput::default();
        input.pointer_moved(Vec2::new(3.0, 4.0));
        input.pointer_button(true);
        input.pointer_left();

        assert!(!input.pointer.pressed);
        assert!(input.pointer.active);
    }

    #[test]
    #[wasm_bindgen_test]
    fn test_convoy_session_ticks() {
        let handle = create_convoy_session(ConvoyConfig::default()).unwrap();
        let output = with_convoy_session(handle, |s| {
            s.input.resized(Viewport::new(800.0, 600.0));
            s.tick()
        })
        .unwrap();

        assert_eq!(output.vehicles.len(), 3);
        assert!(destroy_convoy_session(handle));
    }

    #[test]
    #[wasm_bindgen_test]
    fn test_invalid_config_creates_no_session() {
        let config = ArmConfig {
            segments: vec![],
            ..ArmConfig::default()
        };
        assert!(create_arm_session(config).is_err());
    }

    #[test]
    #[wasm_bindgen_test]
    fn test_palette_shared_across_frames() {
        let handle = create_arm_session(ArmConfig::default()).unwrap();
        let (first, second, stored) = with_arm_session(handle, |s| {
            s.palette = Rc::new(Palette::for_theme(crate::palette::Theme::Light));
            (s.tick(0.0).palette, s.tick(0.016).palette, Rc::clone(&s.palette))
        })
        .unwrap();

        assert!(Rc::ptr_eq(&first, &stored));
        assert!(Rc::ptr_eq(&second, &stored));
        assert!(destroy_arm_session(handle));
    }

    #[test]
    #[wasm_bindgen_test]
    fn test_registry_skips_zero_on_wrap() {
        let mut registry: Registry<()> = Registry::default();
        registry.next_handle = u32::MAX;
        assert_eq!(registry.insert(()), u32::MAX);
        assert_eq!(registry.insert(()), 1);
        assert_eq!(registry.len(), 2);
    }
}
