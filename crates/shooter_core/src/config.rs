//! Tuning values for the controller, the animation and the room.
//!
//! Every field has a default, so a TOML file only needs to list what it
//! overrides:
//!
//! ```toml
//! [movement]
//! sprint_gain = 8.0
//!
//! [room]
//! bounds = [10.0, 6.0, 14.0]
//! clamp_to_bounds = false
//! ```

use serde::Deserialize;
use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("{field} must be a finite, non-negative number (got {value})")]
    NegativeOrNonFinite { field: &'static str, value: f32 },
    #[error("{field} must lie strictly between 0 and 180 degrees (got {value})")]
    FovOutOfRange { field: &'static str, value: f32 },
    #[error("{field} must lie in [0, 1] (got {value})")]
    ThresholdOutOfRange { field: &'static str, value: f32 },
    #[error("projection needs 0 < near < far (got near {near}, far {far})")]
    ClipPlanes { near: f32, far: f32 },
    #[error("room bounds must be positive and larger than twice the margin")]
    RoomBounds,
    #[error("start position {position:?} lies outside the clamped room")]
    StartOutsideRoom { position: [f32; 3] },
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct MovementConfig {
    /// World units per second while walking.
    pub movement_gain: f32,
    /// World units per second while sprinting.
    pub sprint_gain: f32,
    /// Right-stick turn rate, radians per second at full deflection.
    pub rotation_gain: f32,
    pub aiming_rotation_gain: f32,
    /// Mouse turn rate, radians per count per second.
    pub mouse_rotation_gain: f32,
    pub mouse_aiming_rotation_gain: f32,
    /// Left trigger value above which the pad aims.
    pub trigger_threshold: f32,
    /// Radial dead zone applied to both sticks before anything else.
    pub stick_dead_zone: f32,
}

impl Default for MovementConfig {
    fn default() -> Self {
        Self {
            movement_gain: 3.7,
            sprint_gain: 6.5,
            rotation_gain: 3.2,
            aiming_rotation_gain: 1.8,
            mouse_rotation_gain: 0.3,
            mouse_aiming_rotation_gain: 0.1,
            trigger_threshold: 0.2,
            stick_dead_zone: 0.24,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct AnimationConfig {
    /// Degrees.
    pub hipfire_fov: f32,
    pub aiming_fov: f32,
    /// Degrees per second.
    pub fov_rate: f32,

    pub hipfire_weapon_offset: [f32; 3],
    pub aiming_weapon_offset: [f32; 3],
    /// World units per second, per axis.
    pub weapon_rate: f32,
    /// Vertical amplitude of the walking bob.
    pub weapon_bob: f32,

    pub hipfire_spread: f32,
    pub aiming_spread: f32,
    pub sprint_spread: f32,
    /// Spread units per second.
    pub spread_rate: f32,
    /// Extra spread at the peak of each step.
    pub spread_bob: f32,

    /// Bob phase advance per second while walking / sprinting.
    pub step_rate: f32,
    pub sprint_step_rate: f32,
}

impl Default for AnimationConfig {
    fn default() -> Self {
        Self {
            hipfire_fov: 100.0,
            aiming_fov: 70.0,
            fov_rate: 400.0,
            hipfire_weapon_offset: [0.25, -0.3, 0.5],
            aiming_weapon_offset: [0.0, -0.18, 0.35],
            weapon_rate: 2.0,
            weapon_bob: 0.015,
            hipfire_spread: 1.0,
            aiming_spread: 0.25,
            sprint_spread: 2.5,
            spread_rate: 8.0,
            spread_bob: 0.2,
            step_rate: 8.0,
            sprint_step_rate: 12.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct RoomConfig {
    pub start_position: [f32; 3],
    /// Full extent of the room box.
    pub bounds: [f32; 3],
    /// Keep the camera inside `bounds`.  When off, movement is unbounded.
    pub clamp_to_bounds: bool,
    /// Distance kept between the camera and each wall.
    pub margin: f32,
}

impl Default for RoomConfig {
    fn default() -> Self {
        Self {
            start_position: [0.0, -1.5, 0.0],
            bounds: [8.0, 6.0, 12.0],
            clamp_to_bounds: true,
            margin: 0.1,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct ProjectionConfig {
    pub near: f32,
    pub far: f32,
}

impl Default for ProjectionConfig {
    fn default() -> Self {
        Self {
            near: 0.01,
            far: 5000.0,
        }
    }
}

/// Root of the configuration file.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct ShooterConfig {
    pub movement: MovementConfig,
    pub animation: AnimationConfig,
    pub room: RoomConfig,
    pub projection: ProjectionConfig,
}

fn non_negative(field: &'static str, value: f32) -> Result<(), ConfigError> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(ConfigError::NegativeOrNonFinite { field, value })
    }
}

fn fov(field: &'static str, value: f32) -> Result<(), ConfigError> {
    if value > 0.0 && value < 180.0 {
        Ok(())
    } else {
        Err(ConfigError::FovOutOfRange { field, value })
    }
}

fn unit(field: &'static str, value: f32) -> Result<(), ConfigError> {
    if (0.0..=1.0).contains(&value) {
        Ok(())
    } else {
        Err(ConfigError::ThresholdOutOfRange { field, value })
    }
}

impl ShooterConfig {
    /// Checks every value the controller relies on being sane.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let m = &self.movement;
        non_negative("movement.movement_gain", m.movement_gain)?;
        non_negative("movement.sprint_gain", m.sprint_gain)?;
        non_negative("movement.rotation_gain", m.rotation_gain)?;
        non_negative("movement.aiming_rotation_gain", m.aiming_rotation_gain)?;
        non_negative("movement.mouse_rotation_gain", m.mouse_rotation_gain)?;
        non_negative("movement.mouse_aiming_rotation_gain", m.mouse_aiming_rotation_gain)?;
        unit("movement.trigger_threshold", m.trigger_threshold)?;
        unit("movement.stick_dead_zone", m.stick_dead_zone)?;

        let a = &self.animation;
        fov("animation.hipfire_fov", a.hipfire_fov)?;
        fov("animation.aiming_fov", a.aiming_fov)?;
        non_negative("animation.fov_rate", a.fov_rate)?;
        non_negative("animation.weapon_rate", a.weapon_rate)?;
        non_negative("animation.weapon_bob", a.weapon_bob)?;
        non_negative("animation.hipfire_spread", a.hipfire_spread)?;
        non_negative("animation.aiming_spread", a.aiming_spread)?;
        non_negative("animation.sprint_spread", a.sprint_spread)?;
        non_negative("animation.spread_rate", a.spread_rate)?;
        non_negative("animation.spread_bob", a.spread_bob)?;
        non_negative("animation.step_rate", a.step_rate)?;
        non_negative("animation.sprint_step_rate", a.sprint_step_rate)?;

        let p = &self.projection;
        if !(p.near > 0.0 && p.near < p.far && p.far.is_finite()) {
            return Err(ConfigError::ClipPlanes { near: p.near, far: p.far });
        }

        let r = &self.room;
        non_negative("room.margin", r.margin)?;
        if r.bounds.iter().any(|&b| !b.is_finite() || b <= 2.0 * r.margin) {
            return Err(ConfigError::RoomBounds);
        }
        // the first tick would snap an outside start onto the wall
        let start = r.start_position;
        let outside = start
            .iter()
            .zip(r.bounds)
            .any(|(&p, b)| !p.is_finite() || (r.clamp_to_bounds && p.abs() > b / 2.0 - r.margin));
        if outside {
            return Err(ConfigError::StartOutsideRoom { position: start });
        }
        Ok(())
    }
}
