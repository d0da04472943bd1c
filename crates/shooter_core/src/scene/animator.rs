//! FOV zoom, weapon sway and crosshair bloom.
//!
//! Every value follows its target with [`lerp`](crate::lerp::lerp) at a
//! flat rate, so toggling aim mid-transition simply turns the follower
//! around.

use glam::Vec3;

use crate::config::AnimationConfig;
use crate::lerp::{lerp, lerp_vec3};

/// Current cosmetic state; advanced once per tick by [`AnimationState::advance`].
#[derive(Debug, Clone, PartialEq)]
pub struct AnimationState {
    /// Degrees.
    pub fov: f32,
    /// Weapon model offset in camera space (`x` right, `y` up, `z` forward).
    pub weapon_offset: Vec3,
    pub crosshair_spread: f32,
    /// Walking bob phase.  Grows while moving, back to 0 when standing.
    pub steps: f32,
}

impl AnimationState {
    /// Resting hipfire pose.
    pub fn new(config: &AnimationConfig) -> Self {
        Self {
            fov: config.hipfire_fov,
            weapon_offset: Vec3::from(config.hipfire_weapon_offset),
            crosshair_spread: config.hipfire_spread,
            steps: 0.0,
        }
    }

    /// Moves every value one frame towards the target picked by the flags.
    pub fn advance(
        &mut self,
        config: &AnimationConfig,
        aiming: bool,
        sprinting: bool,
        moving: bool,
        dt: f32,
    ) {
        // bob phase
        if moving {
            let rate = if sprinting { config.sprint_step_rate } else { config.step_rate };
            self.steps += rate * dt;
        } else {
            self.steps = 0.0;
        }

        // field of view
        self.fov = if aiming {
            lerp(config.hipfire_fov, config.aiming_fov, self.fov, config.fov_rate * dt)
        } else {
            lerp(config.aiming_fov, config.hipfire_fov, self.fov, config.fov_rate * dt)
        };

        // weapon
        let hip = Vec3::from(config.hipfire_weapon_offset);
        let aim = Vec3::from(config.aiming_weapon_offset);
        let mut target = if aiming { aim } else { hip };
        let start = if aiming { hip } else { aim };
        if moving && !aiming {
            target.y += (self.steps * 2.0).sin() * config.weapon_bob;
        }
        self.weapon_offset = lerp_vec3(start, target, self.weapon_offset, config.weapon_rate * dt);

        // crosshair
        let base = if aiming {
            config.aiming_spread
        } else if sprinting {
            config.sprint_spread
        } else {
            config.hipfire_spread
        };
        let bob = if moving { self.steps.sin().abs() * config.spread_bob } else { 0.0 };
        let target = base + bob;
        // start from the far side so the direction is always towards `target`
        let start = if self.crosshair_spread < target { f32::MIN } else { f32::MAX };
        self.crosshair_spread =
            lerp(start, target, self.crosshair_spread, config.spread_rate * dt).max(0.0);
    }
}
