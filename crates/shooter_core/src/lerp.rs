//! Fixed-rate followers used by the cosmetic animation.
//!
//! These do not take an interpolation factor.  Each call moves `current` a
//! flat `increment` towards `end` and stops there, so the time to settle
//! depends on the distance, not on the frame rate.
//!
//! # Example
//! ```rust
//! use shooter_core::lerp::lerp;
//!
//! let mut fov = 100.0;
//! // zoom from 100° down to 70° at 400°/s, 16 ms per frame
//! fov = lerp(100.0, 70.0, fov, 400.0 * 0.016);
//! assert!((fov - 93.6).abs() < 1e-4);
//! ```

use glam::Vec3;

/// Moves `current` towards `end` by `increment`, clamping on arrival.
///
/// The direction is taken from `start → end`.  When `current` is already
/// past `end` in that direction it is snapped back onto `end`.  A negative
/// `increment` counts as zero.
pub fn lerp(start: f32, end: f32, current: f32, increment: f32) -> f32 {
    let increment = increment.max(0.0);
    let mut current = current;
    if start < end {
        if current < end {
            current += increment;
        }
        if current > end {
            current = end;
        }
    } else {
        if current > end {
            current -= increment;
        }
        if current < end {
            current = end;
        }
    }
    current
}

/// Component-wise [`lerp`].
pub fn lerp_vec3(start: Vec3, end: Vec3, current: Vec3, increment: f32) -> Vec3 {
    Vec3::new(
        lerp(start.x, end.x, current.x, increment),
        lerp(start.y, end.y, current.y, increment),
        lerp(start.z, end.z, current.z, increment),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn steps_up_and_clamps() {
        assert_eq!(lerp(0.0, 1.0, 0.0, 0.25), 0.25);
        assert_eq!(lerp(0.0, 1.0, 0.9, 0.25), 1.0);
        assert_eq!(lerp(0.0, 1.0, 1.0, 0.25), 1.0);
    }

    #[test]
    fn steps_down_and_clamps() {
        assert_eq!(lerp(100.0, 70.0, 100.0, 10.0), 90.0);
        assert_eq!(lerp(100.0, 70.0, 75.0, 10.0), 70.0);
    }

    #[test]
    fn never_overshoots_or_retreats() {
        let increments = [-2.0, 0.0, 0.001, 0.5, 3.0, 50.0, 1.0e6];
        let cases = [(0.0, 10.0), (10.0, 0.0), (-5.0, 5.0), (3.0, 3.0)];
        for &(start, end) in &cases {
            for &inc in &increments {
                let mut current: f32 = start;
                for _ in 0..64 {
                    let before = (end - current).abs();
                    current = lerp(start, end, current, inc);
                    let after = (end - current).abs();
                    assert!(after <= before + 1e-5, "moved away: {start}->{end} inc {inc}");
                    if start < end {
                        assert!(current <= end);
                    } else {
                        assert!(current >= end);
                    }
                }
            }
        }
    }

    #[test]
    fn negative_increment_holds_position() {
        assert_eq!(lerp(0.0, 10.0, 5.0, -1.0), 5.0);
        assert_eq!(lerp(10.0, 0.0, 5.0, -1.0), 5.0);
        assert_eq!(lerp(0.0, 10.0, 12.0, -1.0), 10.0);
    }

    #[test]
    fn value_past_target_snaps_back() {
        // aiming started while the fov was above the hipfire value
        assert_eq!(lerp(70.0, 100.0, 120.0, 1.0), 100.0);
        assert_eq!(lerp(100.0, 70.0, 60.0, 1.0), 70.0);
    }

    #[test]
    fn vector_moves_each_axis_independently() {
        let start = Vec3::new(0.25, -0.3, 0.5);
        let end = Vec3::new(0.0, -0.2, 0.4);
        let v = lerp_vec3(start, end, start, 0.05);
        assert!((v - Vec3::new(0.2, -0.25, 0.45)).length() < 1e-6);
        let v = lerp_vec3(start, end, v, 1.0);
        assert_eq!(v, end);
    }
}
