use std::collections::HashSet;

use winit::event::{DeviceEvent, ElementState, WindowEvent};
use winit::keyboard::PhysicalKey;

use crate::gamepad::GamepadState;

/// Re-exported key and mouse enums from `winit` for convenience.
// winit 0.30 renamed its keyboard module; `KeyCode` now lives under
// `winit::keyboard`.  We keep the simple alias so callers don't need to
// know about the upstream change.
pub use winit::event::MouseButton;
pub use winit::keyboard::KeyCode;

/// How the mouse reports motion.
///
/// In `Relative` mode the cursor is captured and only motion deltas are
/// meaningful; in `Absolute` mode the cursor is free and deltas are ignored
/// for camera look.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MouseMode {
    #[default]
    Absolute,
    Relative,
}

/// Keys held down at the moment the snapshot was taken.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct KeyboardState {
    keys_down: HashSet<KeyCode>,
}

impl KeyboardState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a snapshot with the given keys held.
    pub fn with_keys(keys: impl IntoIterator<Item = KeyCode>) -> Self {
        Self {
            keys_down: keys.into_iter().collect(),
        }
    }

    pub fn is_down(&self, key: KeyCode) -> bool {
        self.keys_down.contains(&key)
    }

    pub fn any_down(&self) -> bool {
        !self.keys_down.is_empty()
    }
}

/// Mouse buttons and accumulated motion for one frame.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct MouseState {
    pub left: bool,
    pub middle: bool,
    pub right: bool,
    /// Motion since the previous snapshot, in device counts.
    pub delta: (f32, f32),
    pub mode: MouseMode,
}

impl MouseState {
    pub fn any_button(&self) -> bool {
        self.left || self.middle || self.right
    }
}

/// Per-frame query surface the controller reads its input from.
///
/// Each device is queried independently.  A device that is not present
/// simply reports its neutral state (`GamepadState::default()` has
/// `connected == false`).
pub trait InputProvider {
    /// Snapshot of the pad in the given player slot.
    fn gamepad_state(&mut self, player: usize) -> GamepadState;

    fn keyboard_state(&mut self) -> KeyboardState;

    /// Snapshot of the mouse.  Implementations reset their motion
    /// accumulator on every call.
    fn mouse_state(&mut self) -> MouseState;

    /// Requests a mouse mode for subsequent frames.
    fn set_mouse_mode(&mut self, mode: MouseMode);
}

/// Edge detector for keyboard snapshots.
///
/// Feed it one [`KeyboardState`] per frame with [`update`](Self::update);
/// [`pressed`](Self::pressed) then reports keys that went down this frame.
#[derive(Debug, Clone, Default)]
pub struct KeyTracker {
    last: HashSet<KeyCode>,
    pressed: HashSet<KeyCode>,
}

impl KeyTracker {
    pub fn update(&mut self, state: &KeyboardState) {
        self.pressed = state.keys_down.difference(&self.last).copied().collect();
        self.last = state.keys_down.clone();
    }

    /// True if `key` transitioned from up to down on the last update.
    pub fn pressed(&self, key: KeyCode) -> bool {
        self.pressed.contains(&key)
    }

    pub fn reset(&mut self) {
        self.last.clear();
        self.pressed.clear();
    }
}

/// State of the keyboard and mouse at a given moment.
///
/// The host template is responsible for driving this structure by feeding
/// it the events coming from `winit`.  Once populated it serves as the
/// keyboard/mouse half of an [`InputProvider`]; gamepad snapshots are pushed
/// in with [`set_gamepad`](Self::set_gamepad) by whatever polls the pad.
#[derive(Default)]
pub struct InputState {
    keys_down: HashSet<KeyCode>,
    mouse_buttons: HashSet<MouseButton>,
    mouse_pos: (f64, f64),
    /// movement since last time `consume_mouse_delta` was called
    mouse_delta: (f32, f32),
    mouse_mode: MouseMode,
    gamepad: GamepadState,
}

impl InputState {
    /// Creates a fresh, empty input state.
    pub fn new() -> Self {
        Default::default()
    }

    /// Called by the event loop when a keyboard event arrives.
    pub fn update_key(&mut self, key: KeyCode, pressed: bool) {
        if pressed {
            self.keys_down.insert(key);
        } else {
            self.keys_down.remove(&key);
        }
    }

    /// Returns true if the given key is currently pressed down.
    pub fn is_key_pressed(&self, key: KeyCode) -> bool {
        self.keys_down.contains(&key)
    }

    /// Called by the event loop when a mouse button event arrives.
    pub fn update_mouse_button(&mut self, button: MouseButton, pressed: bool) {
        if pressed {
            self.mouse_buttons.insert(button);
        } else {
            self.mouse_buttons.remove(&button);
        }
    }

    /// Returns true if the given mouse button is currently held.
    pub fn is_button_down(&self, button: MouseButton) -> bool {
        self.mouse_buttons.contains(&button)
    }

    /// Update the current mouse cursor position (window coordinates).
    pub fn set_mouse_position(&mut self, x: f64, y: f64) {
        let (px, py) = self.mouse_pos;
        self.mouse_pos = (x, y);
        self.accumulate_motion((x - px) as f32, (y - py) as f32);
    }

    /// Adds raw device motion.  Used in relative mode where the cursor
    /// position is pinned and only deltas arrive.
    pub fn accumulate_motion(&mut self, dx: f32, dy: f32) {
        self.mouse_delta.0 += dx;
        self.mouse_delta.1 += dy;
    }

    /// Retrieve the last recorded mouse position.
    pub fn mouse_position(&self) -> (f64, f64) {
        self.mouse_pos
    }

    /// Retrieve and reset the mouse movement delta (in pixels) since the
    /// last call. This is useful for applying camera rotations.
    pub fn consume_mouse_delta(&mut self) -> (f32, f32) {
        let d = self.mouse_delta;
        self.mouse_delta = (0.0, 0.0);
        d
    }

    pub fn mouse_mode(&self) -> MouseMode {
        self.mouse_mode
    }

    /// Stores the latest pad snapshot; returned by `gamepad_state(0)`.
    pub fn set_gamepad(&mut self, state: GamepadState) {
        self.gamepad = state;
    }

    /// Feeds a `winit` window event into the state.
    ///
    /// Returns `true` when the event was an input event this structure
    /// tracks.
    pub fn handle_window_event(&mut self, event: &WindowEvent) -> bool {
        match event {
            WindowEvent::KeyboardInput { event, .. } => {
                if let PhysicalKey::Code(code) = event.physical_key {
                    self.update_key(code, event.state == ElementState::Pressed);
                }
                true
            }
            WindowEvent::MouseInput { state, button, .. } => {
                self.update_mouse_button(*button, *state == ElementState::Pressed);
                true
            }
            WindowEvent::CursorMoved { position, .. } => {
                if self.mouse_mode == MouseMode::Absolute {
                    self.set_mouse_position(position.x, position.y);
                }
                true
            }
            WindowEvent::Focused(false) => {
                // keys released while unfocused never report a release
                self.keys_down.clear();
                self.mouse_buttons.clear();
                true
            }
            _ => false,
        }
    }

    /// Feeds a raw `winit` device event.  Only mouse motion is used, and
    /// only while the mouse is in relative mode.
    pub fn handle_device_event(&mut self, event: &DeviceEvent) {
        if let DeviceEvent::MouseMotion { delta } = event {
            if self.mouse_mode == MouseMode::Relative {
                self.accumulate_motion(delta.0 as f32, delta.1 as f32);
            }
        }
    }
}

impl InputProvider for InputState {
    fn gamepad_state(&mut self, player: usize) -> GamepadState {
        if player == 0 {
            self.gamepad.clone()
        } else {
            GamepadState::default()
        }
    }

    fn keyboard_state(&mut self) -> KeyboardState {
        KeyboardState {
            keys_down: self.keys_down.clone(),
        }
    }

    fn mouse_state(&mut self) -> MouseState {
        MouseState {
            left: self.is_button_down(MouseButton::Left),
            middle: self.is_button_down(MouseButton::Middle),
            right: self.is_button_down(MouseButton::Right),
            delta: self.consume_mouse_delta(),
            mode: self.mouse_mode,
        }
    }

    fn set_mouse_mode(&mut self, mode: MouseMode) {
        if self.mouse_mode != mode {
            // deltas gathered under the old mode are meaningless now
            self.mouse_delta = (0.0, 0.0);
            self.mouse_mode = mode;
        }
    }
}

// simple unit tests for the input state implementation
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn key_tracking() {
        let mut state = InputState::new();
        assert!(!state.is_key_pressed(KeyCode::KeyA));
        state.update_key(KeyCode::KeyA, true);
        assert!(state.is_key_pressed(KeyCode::KeyA));
        state.update_key(KeyCode::KeyA, false);
        assert!(!state.is_key_pressed(KeyCode::KeyA));
    }

    #[test]
    fn mouse_tracking() {
        let mut state = InputState::new();
        assert!(!state.is_button_down(MouseButton::Left));
        state.update_mouse_button(MouseButton::Left, true);
        assert!(state.is_button_down(MouseButton::Left));
        state.update_mouse_button(MouseButton::Left, false);
        assert!(!state.is_button_down(MouseButton::Left));
        state.set_mouse_position(10.0, 20.0);
        assert_eq!(state.mouse_position(), (10.0, 20.0));
        let _ = state.consume_mouse_delta();
        // delta should reflect movement
        state.set_mouse_position(15.0, 25.0);
        assert_eq!(state.consume_mouse_delta(), (5.0, 5.0));
        // consumption resets
        assert_eq!(state.consume_mouse_delta(), (0.0, 0.0));
    }

    #[test]
    fn mouse_snapshot_consumes_motion() {
        let mut state = InputState::new();
        state.set_mouse_mode(MouseMode::Relative);
        state.update_mouse_button(MouseButton::Right, true);
        state.accumulate_motion(3.0, -2.0);
        state.accumulate_motion(1.0, 1.0);
        let snap = state.mouse_state();
        assert!(snap.right && !snap.left);
        assert_eq!(snap.delta, (4.0, -1.0));
        assert_eq!(snap.mode, MouseMode::Relative);
        assert_eq!(state.mouse_state().delta, (0.0, 0.0));
    }

    #[test]
    fn relative_motion_ignored_in_absolute_mode() {
        let mut state = InputState::new();
        state.handle_device_event(&DeviceEvent::MouseMotion { delta: (5.0, 5.0) });
        assert_eq!(state.consume_mouse_delta(), (0.0, 0.0));
        state.set_mouse_mode(MouseMode::Relative);
        state.handle_device_event(&DeviceEvent::MouseMotion { delta: (5.0, -2.0) });
        assert_eq!(state.consume_mouse_delta(), (5.0, -2.0));
    }

    #[test]
    fn tracker_reports_only_new_presses() {
        let mut tracker = KeyTracker::default();
        tracker.update(&KeyboardState::with_keys([KeyCode::Tab]));
        assert!(tracker.pressed(KeyCode::Tab));
        tracker.update(&KeyboardState::with_keys([KeyCode::Tab]));
        assert!(!tracker.pressed(KeyCode::Tab));
        tracker.update(&KeyboardState::new());
        tracker.update(&KeyboardState::with_keys([KeyCode::Tab, KeyCode::ShiftLeft]));
        assert!(tracker.pressed(KeyCode::Tab));
        assert!(tracker.pressed(KeyCode::ShiftLeft));
        tracker.reset();
        assert!(!tracker.pressed(KeyCode::Tab));
    }

    #[test]
    fn only_first_player_slot_is_populated() {
        let mut state = InputState::new();
        state.set_gamepad(GamepadState {
            connected: true,
            ..Default::default()
        });
        assert!(state.gamepad_state(0).connected);
        assert!(!state.gamepad_state(1).connected);
    }
}
