//! Folding the three input devices into one first-person intent.

use glam::Vec3;
use log::debug;

use crate::gamepad::{ButtonTracker, GamepadButton};
use crate::input::{InputProvider, KeyTracker, MouseMode};
use crate::scene::controller::Controller;

/// Squared length below which a movement vector counts as standing still.
const MOVE_EPSILON: f32 = 1e-6;

/// Which device the player is currently using.
///
/// Any keyboard/mouse activity switches to `KeyboardMouse`, any stick or
/// trigger activity switches to `Gamepad`.  Within a frame the device read
/// last wins; pads are read first, then the mouse, then the keyboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ActiveDevice {
    #[default]
    Gamepad,
    KeyboardMouse,
}

/// What the player asked for this frame.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Intent {
    /// Local-space movement: `x` strafe (positive left), `z` forward.
    /// Length is at most 1.
    pub movement: Vec3,
    /// Radians, already scaled by the frame delta.
    pub yaw_delta: f32,
    pub pitch_delta: f32,
    pub aiming: bool,
    pub sprinting: bool,
    pub device: ActiveDevice,
    pub exit_requested: bool,
    pub cycle_room_color: bool,
}

impl Intent {
    pub fn is_moving(&self) -> bool {
        self.movement.length_squared() > MOVE_EPSILON
    }
}

/// Reads pad, mouse and keyboard every frame and keeps the mode flags
/// (aiming, sprinting, active device) that persist between frames.
#[derive(Debug, Clone, Default)]
pub struct InputAggregator {
    player: usize,
    device: ActiveDevice,
    aiming: bool,
    sprinting: bool,
    keys: KeyTracker,
    buttons: ButtonTracker,
}

impl InputAggregator {
    /// Aggregator reading the pad in player slot `player`.
    pub fn new(player: usize) -> Self {
        Self {
            player,
            ..Default::default()
        }
    }

    pub fn device(&self) -> ActiveDevice {
        self.device
    }

    pub fn is_aiming(&self) -> bool {
        self.aiming
    }

    pub fn is_sprinting(&self) -> bool {
        self.sprinting
    }

    /// Forget edge-tracking history so keys held across a focus change do
    /// not register as fresh presses.
    pub fn reset_trackers(&mut self) {
        self.keys.reset();
        self.buttons.reset();
    }

    /// Reads every device once and produces this frame's [`Intent`].
    pub fn gather<P>(&mut self, input: &mut P, controller: &Controller, dt: f32) -> Intent
    where
        P: InputProvider + ?Sized,
    {
        let tuning = &controller.tuning;
        let before = (self.device, self.aiming, self.sprinting);

        let mut movement = Vec3::ZERO;
        let mut yaw_delta = 0.0;
        let mut pitch_delta = 0.0;
        let mut exit_requested = false;
        let mut cycle_room_color = false;
        let mut toggle_sprint = false;

        // ── Gamepad ───────────────────────────────────────────────────────
        let pad = input.gamepad_state(self.player);
        if pad.connected {
            let pad = pad.with_dead_zone(tuning.stick_dead_zone);
            self.buttons.update(&pad);

            if self.buttons.pressed(GamepadButton::Menu) {
                exit_requested = true;
            }

            if pad.left_trigger > tuning.trigger_threshold {
                self.aiming = true;
                self.device = ActiveDevice::Gamepad;
            } else {
                self.aiming = false;
            }

            if pad.is_left_stick_left() || pad.is_left_stick_right() {
                movement.x = -pad.left_stick.x;
                self.device = ActiveDevice::Gamepad;
            }
            if pad.is_left_stick_up() || pad.is_left_stick_down() {
                movement.z = pad.left_stick.y;
                self.device = ActiveDevice::Gamepad;
            }

            if pad.is_right_stick_pushed() {
                self.device = ActiveDevice::Gamepad;
            }
            let gain = if self.aiming {
                tuning.aiming_rotation_gain
            } else {
                tuning.rotation_gain
            };
            yaw_delta -= pad.right_stick.x * gain * dt;
            pitch_delta += pad.right_stick.y * gain * dt;

            if self.buttons.pressed(GamepadButton::LeftStick)
                || self.buttons.pressed(GamepadButton::B)
            {
                toggle_sprint = true;
                self.device = ActiveDevice::Gamepad;
            }
            if self.buttons.pressed(GamepadButton::A) {
                cycle_room_color = true;
            }
        } else {
            self.buttons.reset();
            // a missing pad is a centred pad with the trigger released
            self.aiming = false;
        }

        // ── Mouse ─────────────────────────────────────────────────────────
        let mouse = input.mouse_state();
        if self.device == ActiveDevice::KeyboardMouse {
            self.aiming = mouse.right;
        }
        if mouse.any_button() {
            self.device = ActiveDevice::KeyboardMouse;
        }
        if mouse.mode == MouseMode::Relative {
            let gain = if self.aiming {
                tuning.mouse_aiming_rotation_gain
            } else {
                tuning.mouse_rotation_gain
            };
            yaw_delta -= mouse.delta.0 * gain * dt;
            pitch_delta -= mouse.delta.1 * gain * dt;
        }
        input.set_mouse_mode(MouseMode::Relative);

        // ── Keyboard ──────────────────────────────────────────────────────
        let keyboard = input.keyboard_state();
        self.keys.update(&keyboard);

        if controller.exit_keys.iter().any(|k| keyboard.is_down(*k)) {
            exit_requested = true;
            self.device = ActiveDevice::KeyboardMouse;
        }
        if let Some(dir) = controller.direction(&keyboard, movement) {
            movement = dir;
            self.device = ActiveDevice::KeyboardMouse;
        }
        if controller.sprint_keys.iter().any(|k| self.keys.pressed(*k)) {
            toggle_sprint = true;
            self.device = ActiveDevice::KeyboardMouse;
        }
        if controller.cycle_color_keys.iter().any(|k| self.keys.pressed(*k)) {
            cycle_room_color = true;
        }

        // ── Modes ─────────────────────────────────────────────────────────
        let movement = movement.clamp_length_max(1.0);
        if toggle_sprint {
            self.sprinting = !self.sprinting;
        }
        if movement.length_squared() <= MOVE_EPSILON || self.aiming {
            self.sprinting = false;
        }

        if before != (self.device, self.aiming, self.sprinting) {
            debug!(
                "input mode: device={:?} aiming={} sprinting={}",
                self.device, self.aiming, self.sprinting
            );
        }

        Intent {
            movement,
            yaw_delta,
            pitch_delta,
            aiming: self.aiming,
            sprinting: self.sprinting,
            device: self.device,
            exit_requested,
            cycle_room_color,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gamepad::GamepadState;
    use crate::input::{KeyCode, KeyboardState, MouseState};
    use glam::Vec2;

    /// Provider returning canned snapshots.
    #[derive(Default)]
    struct Canned {
        pad: GamepadState,
        keyboard: KeyboardState,
        mouse: MouseState,
        requested_mode: Option<MouseMode>,
    }

    impl InputProvider for Canned {
        fn gamepad_state(&mut self, _player: usize) -> GamepadState {
            self.pad.clone()
        }
        fn keyboard_state(&mut self) -> KeyboardState {
            self.keyboard.clone()
        }
        fn mouse_state(&mut self) -> MouseState {
            self.mouse
        }
        fn set_mouse_mode(&mut self, mode: MouseMode) {
            self.requested_mode = Some(mode);
        }
    }

    fn connected_pad() -> GamepadState {
        GamepadState {
            connected: true,
            ..Default::default()
        }
    }

    #[test]
    fn no_input_is_neutral() {
        let mut agg = InputAggregator::default();
        let mut input = Canned::default();
        let intent = agg.gather(&mut input, &Controller::default(), 0.016);
        assert_eq!(intent.movement, Vec3::ZERO);
        assert_eq!(intent.yaw_delta, 0.0);
        assert_eq!(intent.pitch_delta, 0.0);
        assert!(!intent.aiming && !intent.sprinting && !intent.exit_requested);
        assert_eq!(input.requested_mode, Some(MouseMode::Relative));
    }

    #[test]
    fn keyboard_overrides_stick_axis() {
        let mut agg = InputAggregator::default();
        let mut input = Canned {
            pad: GamepadState {
                left_stick: Vec2::new(0.0, -1.0),
                ..connected_pad()
            },
            keyboard: KeyboardState::with_keys([KeyCode::KeyW]),
            ..Default::default()
        };
        let intent = agg.gather(&mut input, &Controller::default(), 0.016);
        assert_eq!(intent.movement, Vec3::Z);
        assert_eq!(intent.device, ActiveDevice::KeyboardMouse);
    }

    #[test]
    fn stick_switches_back_to_gamepad() {
        let mut agg = InputAggregator::default();
        let mut input = Canned {
            keyboard: KeyboardState::with_keys([KeyCode::KeyD]),
            ..Default::default()
        };
        let ctl = Controller::default();
        assert_eq!(agg.gather(&mut input, &ctl, 0.016).device, ActiveDevice::KeyboardMouse);

        input.keyboard = KeyboardState::new();
        input.pad = GamepadState {
            left_stick: Vec2::new(1.0, 0.0),
            ..connected_pad()
        };
        let intent = agg.gather(&mut input, &ctl, 0.016);
        assert_eq!(intent.device, ActiveDevice::Gamepad);
        // stick right strafes towards -X
        assert!((intent.movement.x + 1.0).abs() < 1e-6);
    }

    #[test]
    fn diagonal_keys_are_normalised() {
        let mut agg = InputAggregator::default();
        let mut input = Canned {
            keyboard: KeyboardState::with_keys([KeyCode::KeyW, KeyCode::KeyA]),
            ..Default::default()
        };
        let intent = agg.gather(&mut input, &Controller::default(), 0.016);
        assert!((intent.movement.length() - 1.0).abs() < 1e-6);
    }

    #[test]
    fn trigger_aims_and_slows_the_stick() {
        let ctl = Controller::default();
        let mut agg = InputAggregator::default();
        let mut input = Canned {
            pad: GamepadState {
                right_stick: Vec2::new(1.0, 0.0),
                ..connected_pad()
            },
            ..Default::default()
        };
        let hip = agg.gather(&mut input, &ctl, 0.1);
        assert!(!hip.aiming);
        assert!((hip.yaw_delta + ctl.tuning.rotation_gain * 0.1).abs() < 1e-5);

        input.pad.left_trigger = 0.9;
        let aim = agg.gather(&mut input, &ctl, 0.1);
        assert!(aim.aiming);
        assert!((aim.yaw_delta + ctl.tuning.aiming_rotation_gain * 0.1).abs() < 1e-5);
    }

    #[test]
    fn right_mouse_aims_only_in_keyboard_mode() {
        let ctl = Controller::default();
        let mut agg = InputAggregator::default();
        let mut input = Canned {
            mouse: MouseState {
                right: true,
                ..Default::default()
            },
            ..Default::default()
        };
        // first click switches device, aiming follows from the next frame
        assert!(!agg.gather(&mut input, &ctl, 0.016).aiming);
        assert!(agg.gather(&mut input, &ctl, 0.016).aiming);
        input.mouse.right = false;
        assert!(!agg.gather(&mut input, &ctl, 0.016).aiming);
    }

    #[test]
    fn relative_mouse_turns_the_camera() {
        let ctl = Controller::default();
        let mut agg = InputAggregator::default();
        let mut input = Canned {
            mouse: MouseState {
                delta: (10.0, -4.0),
                mode: MouseMode::Relative,
                ..Default::default()
            },
            ..Default::default()
        };
        let intent = agg.gather(&mut input, &ctl, 0.5);
        let g = ctl.tuning.mouse_rotation_gain;
        assert!((intent.yaw_delta + 10.0 * g * 0.5).abs() < 1e-5);
        assert!((intent.pitch_delta - 4.0 * g * 0.5).abs() < 1e-5);

        input.mouse.mode = MouseMode::Absolute;
        assert_eq!(agg.gather(&mut input, &ctl, 0.5).yaw_delta, 0.0);
    }

    #[test]
    fn shift_toggles_sprint_while_moving() {
        let ctl = Controller::default();
        let mut agg = InputAggregator::default();
        let mut input = Canned {
            keyboard: KeyboardState::with_keys([KeyCode::KeyW, KeyCode::ShiftLeft]),
            ..Default::default()
        };
        assert!(agg.gather(&mut input, &ctl, 0.016).sprinting);
        // holding shift does not toggle again
        assert!(agg.gather(&mut input, &ctl, 0.016).sprinting);

        // stopping ends the sprint
        input.keyboard = KeyboardState::new();
        assert!(!agg.gather(&mut input, &ctl, 0.016).sprinting);
        input.keyboard = KeyboardState::with_keys([KeyCode::KeyW]);
        assert!(!agg.gather(&mut input, &ctl, 0.016).sprinting);
    }

    #[test]
    fn stick_click_toggles_sprint() {
        let ctl = Controller::default();
        let mut agg = InputAggregator::default();
        let mut pad = GamepadState {
            left_stick: Vec2::new(0.0, 1.0),
            ..connected_pad()
        };
        pad.buttons.insert(GamepadButton::LeftStick);
        let mut input = Canned {
            pad,
            ..Default::default()
        };
        assert!(agg.gather(&mut input, &ctl, 0.016).sprinting);
        input.pad.buttons.clear();
        assert!(agg.gather(&mut input, &ctl, 0.016).sprinting);
        input.pad.buttons.insert(GamepadButton::B);
        assert!(!agg.gather(&mut input, &ctl, 0.016).sprinting);
    }

    #[test]
    fn aiming_cancels_sprint() {
        let ctl = Controller::default();
        let mut agg = InputAggregator::default();
        let mut pad = GamepadState {
            left_stick: Vec2::new(0.0, 1.0),
            ..connected_pad()
        };
        pad.buttons.insert(GamepadButton::LeftStick);
        let mut input = Canned {
            pad,
            ..Default::default()
        };
        assert!(agg.gather(&mut input, &ctl, 0.016).sprinting);
        input.pad.left_trigger = 1.0;
        let intent = agg.gather(&mut input, &ctl, 0.016);
        assert!(intent.aiming && !intent.sprinting);
    }

    #[test]
    fn menu_and_escape_request_exit() {
        let ctl = Controller::default();
        let mut agg = InputAggregator::default();
        let mut pad = connected_pad();
        pad.buttons.insert(GamepadButton::Menu);
        let mut input = Canned {
            pad,
            ..Default::default()
        };
        assert!(agg.gather(&mut input, &ctl, 0.016).exit_requested);

        let mut agg = InputAggregator::default();
        let mut input = Canned {
            keyboard: KeyboardState::with_keys([KeyCode::Escape]),
            ..Default::default()
        };
        let intent = agg.gather(&mut input, &ctl, 0.016);
        assert!(intent.exit_requested);
        assert_eq!(intent.device, ActiveDevice::KeyboardMouse);
    }

    #[test]
    fn color_cycle_is_edge_triggered() {
        let ctl = Controller::default();
        let mut agg = InputAggregator::default();
        let mut input = Canned {
            keyboard: KeyboardState::with_keys([KeyCode::Tab]),
            ..Default::default()
        };
        assert!(agg.gather(&mut input, &ctl, 0.016).cycle_room_color);
        assert!(!agg.gather(&mut input, &ctl, 0.016).cycle_room_color);
        agg.reset_trackers();
        assert!(agg.gather(&mut input, &ctl, 0.016).cycle_room_color);
    }
}
