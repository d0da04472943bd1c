//! Frame timing utilities.
//!
//! `Time` is produced once per frame by the runner and handed to
//! `Game::tick`.  All fields are read-only from game code; the runner owns
//! the `TimeClock` that produces snapshots.
//!
//! # Example
//! ```rust,ignore
//! fn tick(&mut self, time: Time, input: &mut impl InputProvider) {
//!     // Turn at 90°/s regardless of frame rate
//!     self.camera.yaw += std::f32::consts::FRAC_PI_2 * time.delta;
//! }
//! ```

use std::time::Instant;

/// Upper bound on a single frame's delta, in seconds.
pub const MAX_DELTA: f32 = 0.1;

/// A snapshot of timing information for the current frame.
///
/// Since it is `Copy` you can store a copy locally if needed.
#[derive(Debug, Clone, Copy)]
pub struct Time {
    /// Seconds elapsed since the previous frame.  Typical values are in the
    /// range 0.008 – 0.033.  Clamped to a maximum of [`MAX_DELTA`] so a
    /// stalled frame does not teleport the camera.
    pub delta: f32,

    /// Total seconds elapsed since the clock started.
    pub elapsed: f64,

    /// Number of frames ticked so far (starts at 0 for the first frame).
    pub frame_count: u64,

    /// Instantaneous frames-per-second derived from `delta`.
    pub fps: f32,
}

impl Default for Time {
    fn default() -> Self {
        Self {
            delta: 0.0,
            elapsed: 0.0,
            frame_count: 0,
            fps: 0.0,
        }
    }
}

impl Time {
    /// Snapshot with a given delta; used by tests and replay drivers.
    pub fn from_delta(delta: f32) -> Self {
        Self {
            delta,
            fps: if delta > 0.0 { 1.0 / delta } else { 0.0 },
            ..Default::default()
        }
    }

    /// Returns the delta time clamped to `[0, max_dt]`.
    #[inline]
    pub fn clamped_delta(&self, max_dt: f32) -> f32 {
        self.delta.clamp(0.0, max_dt)
    }
}

// ─── Clock (lives in the runner) ───────────────────────────────────────────

/// Stateful timer that accumulates time and produces [`Time`] snapshots.
///
/// A variable-step clock reads the wall clock on every `tick()`.  A
/// fixed-step clock ignores the wall clock and advances by the same amount
/// every frame, which keeps headless replays deterministic.
pub struct TimeClock {
    start:       Instant,
    last_tick:   Instant,
    frame_count: u64,
    fixed_step:  Option<f32>,
    /// accumulated simulated time for the fixed-step mode
    simulated:   f64,
}

impl TimeClock {
    /// Create a new variable-step clock, starting the epoch now.
    pub fn new() -> Self {
        let now = Instant::now();
        Self {
            start:       now,
            last_tick:   now,
            frame_count: 0,
            fixed_step:  None,
            simulated:   0.0,
        }
    }

    /// Create a clock that advances by exactly `step` seconds per tick.
    pub fn fixed(step: f32) -> Self {
        Self {
            fixed_step: Some(step.clamp(0.0, MAX_DELTA)),
            ..Self::new()
        }
    }

    pub fn is_fixed(&self) -> bool {
        self.fixed_step.is_some()
    }

    /// Return the current [`Time`] snapshot without advancing the clock.
    ///
    /// Useful for callbacks (like `initialize` or `on_window_size_changed`)
    /// that are not on the hot frame path.
    pub fn peek(&self) -> Time {
        match self.fixed_step {
            Some(step) => Time {
                delta: step,
                elapsed: self.simulated,
                frame_count: self.frame_count,
                fps: if step > 0.0 { 1.0 / step } else { 0.0 },
            },
            None => {
                let now     = Instant::now();
                let raw_dt  = (now - self.last_tick).as_secs_f32();
                let delta   = raw_dt.min(MAX_DELTA);
                let elapsed = (now - self.start).as_secs_f64();
                let fps     = if delta > 0.0 { 1.0 / delta } else { 0.0 };
                Time { delta, elapsed, frame_count: self.frame_count, fps }
            }
        }
    }

    /// Advance by one frame.  Returns the [`Time`] snapshot for this frame.
    pub fn tick(&mut self) -> Time {
        let count = self.frame_count;
        self.frame_count += 1;

        if let Some(step) = self.fixed_step {
            self.simulated += step as f64;
            let fps = if step > 0.0 { 1.0 / step } else { 0.0 };
            return Time { delta: step, elapsed: self.simulated, frame_count: count, fps };
        }

        let now     = Instant::now();
        let raw_dt  = (now - self.last_tick).as_secs_f32();
        let delta   = raw_dt.min(MAX_DELTA);
        let elapsed = (now - self.start).as_secs_f64();
        let fps     = if delta > 0.0 { 1.0 / delta } else { 0.0 };

        self.last_tick = now;

        Time { delta, elapsed, frame_count: count, fps }
    }

    /// Forget the time spent since the last tick.
    ///
    /// Called when the process resumes from suspension so the first frame
    /// after resume does not see the whole suspended period as its delta.
    pub fn reset_elapsed(&mut self) {
        self.last_tick = Instant::now();
    }
}

impl Default for TimeClock {
    fn default() -> Self {
        Self::new()
    }
}
