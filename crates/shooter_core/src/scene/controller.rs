use glam::Vec3;

use crate::config::MovementConfig;
use crate::input::{KeyCode, KeyboardState};

/// Maps keys to movement directions and stores all camera-motion parameters.
///
/// Bindings are kept in insertion order.  When several bound keys are held
/// the later binding overwrites every axis it sets, so holding `W` and `S`
/// together walks backwards, exactly like reading the keys one after the
/// other.
///
/// # Example
/// ```rust,ignore
/// use shooter_core::scene::Controller;
/// use shooter_core::input::KeyCode;
/// use glam::Vec3;
///
/// let mut controller = Controller::new();
/// // ESDF layout
/// controller.bind(KeyCode::KeyE, Vec3::new( 0.0, 0.0,  1.0));
/// controller.bind(KeyCode::KeyD, Vec3::new( 0.0, 0.0, -1.0));
/// controller.bind(KeyCode::KeyS, Vec3::new( 1.0, 0.0,  0.0));
/// controller.bind(KeyCode::KeyF, Vec3::new(-1.0, 0.0,  0.0));
/// controller.tuning.sprint_gain = 9.0;
/// ```
#[derive(Debug, Clone)]
pub struct Controller {
    /// Key → local-space unit direction mappings.
    mappings: Vec<(KeyCode, Vec3)>,

    /// Keys that toggle sprint when pressed.
    pub sprint_keys: Vec<KeyCode>,

    /// Keys that request exit when held.
    pub exit_keys: Vec<KeyCode>,

    /// Keys that cycle the debug room colour when pressed.
    pub cycle_color_keys: Vec<KeyCode>,

    /// Gains and thresholds.
    pub tuning: MovementConfig,
}

impl Default for Controller {
    fn default() -> Self {
        Self::with_default_bindings(MovementConfig::default())
    }
}

impl Controller {
    /// Creates an empty controller with no key bindings and default tuning.
    pub fn new() -> Self {
        Self {
            mappings:         Vec::new(),
            sprint_keys:      Vec::new(),
            exit_keys:        Vec::new(),
            cycle_color_keys: Vec::new(),
            tuning:           MovementConfig::default(),
        }
    }

    /// WASD plus arrow keys, Shift to sprint, Escape to quit, Tab to cycle
    /// the room colour.
    ///
    /// Positive `x` strafes left: the view is right-handed and looks down
    /// `+Z` at yaw 0, so camera-right is `-X`.
    pub fn with_default_bindings(tuning: MovementConfig) -> Self {
        let mut ctl = Self::new();
        ctl.tuning = tuning;
        ctl.bind(KeyCode::ArrowUp,    Vec3::new( 0.0, 0.0,  1.0));
        ctl.bind(KeyCode::KeyW,       Vec3::new( 0.0, 0.0,  1.0));
        ctl.bind(KeyCode::ArrowDown,  Vec3::new( 0.0, 0.0, -1.0));
        ctl.bind(KeyCode::KeyS,       Vec3::new( 0.0, 0.0, -1.0));
        ctl.bind(KeyCode::ArrowLeft,  Vec3::new( 1.0, 0.0,  0.0));
        ctl.bind(KeyCode::KeyA,       Vec3::new( 1.0, 0.0,  0.0));
        ctl.bind(KeyCode::ArrowRight, Vec3::new(-1.0, 0.0,  0.0));
        ctl.bind(KeyCode::KeyD,       Vec3::new(-1.0, 0.0,  0.0));
        ctl.sprint_keys      = vec![KeyCode::ShiftLeft, KeyCode::ShiftRight];
        ctl.exit_keys        = vec![KeyCode::Escape];
        ctl.cycle_color_keys = vec![KeyCode::Tab];
        ctl
    }

    /// Binds `key` to a local-space direction vector.
    ///
    /// Use positive Z for "forward", positive X for "left".
    /// Binding the same key twice replaces the old direction in place.
    pub fn bind(&mut self, key: KeyCode, dir: Vec3) {
        match self.mappings.iter_mut().find(|(k, _)| *k == key) {
            Some(slot) => slot.1 = dir,
            None => self.mappings.push((key, dir)),
        }
    }

    /// Removes the binding for `key`, if any.
    pub fn unbind(&mut self, key: KeyCode) {
        self.mappings.retain(|(k, _)| *k != key);
    }

    /// Removes all key bindings.
    pub fn clear_bindings(&mut self) {
        self.mappings.clear();
    }

    pub fn is_bound(&self, key: KeyCode) -> bool {
        self.mappings.iter().any(|(k, _)| *k == key)
    }

    /// Returns the movement vector for the keys currently held, or `None`
    /// when no bound key is down.
    ///
    /// Each held binding writes the non-zero axes of its direction into
    /// `base`, later bindings winning.  Axes no held key touches keep the
    /// value from `base`, which is how keyboard input layers on top of the
    /// stick.
    pub fn direction(&self, keyboard: &KeyboardState, base: Vec3) -> Option<Vec3> {
        let mut out = base;
        let mut any = false;
        for (key, dir) in &self.mappings {
            if !keyboard.is_down(*key) {
                continue;
            }
            any = true;
            if dir.x != 0.0 {
                out.x = dir.x;
            }
            if dir.y != 0.0 {
                out.y = dir.y;
            }
            if dir.z != 0.0 {
                out.z = dir.z;
            }
        }
        any.then_some(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_keys_no_direction() {
        let ctl = Controller::default();
        assert_eq!(ctl.direction(&KeyboardState::new(), Vec3::ZERO), None);
    }

    #[test]
    fn later_binding_wins_on_conflict() {
        let ctl = Controller::default();
        let kb = KeyboardState::with_keys([KeyCode::KeyW, KeyCode::KeyS]);
        assert_eq!(ctl.direction(&kb, Vec3::ZERO), Some(Vec3::new(0.0, 0.0, -1.0)));
    }

    #[test]
    fn keys_overwrite_only_their_axes() {
        let ctl = Controller::default();
        let kb = KeyboardState::with_keys([KeyCode::KeyA]);
        let stick = Vec3::new(-0.4, 0.0, 0.8);
        assert_eq!(ctl.direction(&kb, stick), Some(Vec3::new(1.0, 0.0, 0.8)));
    }

    #[test]
    fn rebinding_replaces_in_place() {
        let mut ctl = Controller::new();
        ctl.bind(KeyCode::KeyW, Vec3::Z);
        ctl.bind(KeyCode::KeyS, Vec3::NEG_Z);
        ctl.bind(KeyCode::KeyW, Vec3::X);
        let kb = KeyboardState::with_keys([KeyCode::KeyW]);
        assert_eq!(ctl.direction(&kb, Vec3::ZERO), Some(Vec3::X));
        ctl.unbind(KeyCode::KeyW);
        assert!(!ctl.is_bound(KeyCode::KeyW));
        assert_eq!(ctl.direction(&kb, Vec3::ZERO), None);
        ctl.clear_bindings();
        assert!(!ctl.is_bound(KeyCode::KeyS));
    }
}
