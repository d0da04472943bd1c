//! Gamepad snapshots.
//!
//! The pad itself is polled by the host (XInput, `gilrs`, a replay file...);
//! this module only defines the shape of one poll and the helpers the
//! controller reads it through.

use std::collections::HashSet;

use glam::Vec2;

/// Stick deflection past which a direction counts as "pushed".
pub const STICK_THRESHOLD: f32 = 0.5;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GamepadButton {
    A,
    B,
    X,
    Y,
    LeftStick,
    RightStick,
    LeftShoulder,
    RightShoulder,
    Menu,
    View,
    DPadUp,
    DPadDown,
    DPadLeft,
    DPadRight,
}

/// One poll of a pad.  `Default` is a disconnected, centred pad.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GamepadState {
    pub connected: bool,
    /// `x` right, `y` up, each in `[-1, 1]`.
    pub left_stick: Vec2,
    pub right_stick: Vec2,
    /// `[0, 1]`
    pub left_trigger: f32,
    pub right_trigger: f32,
    pub buttons: HashSet<GamepadButton>,
}

impl GamepadState {
    pub fn is_down(&self, button: GamepadButton) -> bool {
        self.buttons.contains(&button)
    }

    pub fn is_left_stick_left(&self) -> bool {
        self.left_stick.x < -STICK_THRESHOLD
    }

    pub fn is_left_stick_right(&self) -> bool {
        self.left_stick.x > STICK_THRESHOLD
    }

    pub fn is_left_stick_up(&self) -> bool {
        self.left_stick.y > STICK_THRESHOLD
    }

    pub fn is_left_stick_down(&self) -> bool {
        self.left_stick.y < -STICK_THRESHOLD
    }

    /// True when the right stick is pushed past the threshold on any axis.
    pub fn is_right_stick_pushed(&self) -> bool {
        self.right_stick.x.abs() > STICK_THRESHOLD || self.right_stick.y.abs() > STICK_THRESHOLD
    }

    /// Zeroes each stick axis whose magnitude is below `dead_zone` and
    /// rescales the remainder back to `[-1, 1]`.
    pub fn with_dead_zone(mut self, dead_zone: f32) -> Self {
        self.left_stick = apply_dead_zone(self.left_stick, dead_zone);
        self.right_stick = apply_dead_zone(self.right_stick, dead_zone);
        self
    }
}

fn apply_dead_zone(stick: Vec2, dead_zone: f32) -> Vec2 {
    let axis = |v: f32| {
        let mag = v.abs();
        if mag <= dead_zone || dead_zone >= 1.0 {
            0.0
        } else {
            v.signum() * ((mag - dead_zone) / (1.0 - dead_zone)).min(1.0)
        }
    };
    Vec2::new(axis(stick.x), axis(stick.y))
}

/// Edge detector for pad buttons, same contract as
/// [`KeyTracker`](crate::input::KeyTracker).
#[derive(Debug, Clone, Default)]
pub struct ButtonTracker {
    last: HashSet<GamepadButton>,
    pressed: HashSet<GamepadButton>,
}

impl ButtonTracker {
    pub fn update(&mut self, state: &GamepadState) {
        self.pressed = state.buttons.difference(&self.last).copied().collect();
        self.last = state.buttons.clone();
    }

    pub fn pressed(&self, button: GamepadButton) -> bool {
        self.pressed.contains(&button)
    }

    pub fn reset(&mut self) {
        self.last.clear();
        self.pressed.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stick_directions_need_half_deflection() {
        let pad = GamepadState {
            connected: true,
            left_stick: Vec2::new(-0.6, 0.4),
            ..Default::default()
        };
        assert!(pad.is_left_stick_left());
        assert!(!pad.is_left_stick_right());
        assert!(!pad.is_left_stick_up());
        assert!(!pad.is_right_stick_pushed());
    }

    #[test]
    fn dead_zone_rescales() {
        let pad = GamepadState {
            left_stick: Vec2::new(0.2, 1.0),
            right_stick: Vec2::new(-0.62, 0.0),
            ..Default::default()
        }
        .with_dead_zone(0.24);
        assert_eq!(pad.left_stick.x, 0.0);
        assert!((pad.left_stick.y - 1.0).abs() < 1e-6);
        assert!((pad.right_stick.x + 0.5).abs() < 1e-5);
    }

    #[test]
    fn button_tracker_edges() {
        let mut tracker = ButtonTracker::default();
        let mut pad = GamepadState::default();
        pad.buttons.insert(GamepadButton::A);
        tracker.update(&pad);
        assert!(tracker.pressed(GamepadButton::A));
        tracker.update(&pad);
        assert!(!tracker.pressed(GamepadButton::A));
    }
}
