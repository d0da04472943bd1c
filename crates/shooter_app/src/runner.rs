use log::{debug, info};
use shooter_core::{InputProvider, Time, TimeClock};

use crate::game::{Game, TickOutcome};
use crate::traits::{DeviceNotify, RenderTarget};

/// Why [`Runner::run`] returned.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunEnd {
    /// The game asked to quit.
    ExitRequested,
    /// The frame limit passed to `run` was reached.
    FrameLimit,
}

/// Single-threaded frame loop around a [`Game`].
///
/// Every frame: advance the clock, `tick`, then `render`.  Lifecycle
/// notifications from the host are forwarded synchronously between frames.
pub struct Runner {
    game: Game,
    clock: TimeClock,
    frames: u64,
}

impl Runner {
    pub fn new(game: Game, clock: TimeClock) -> Self {
        Self {
            game,
            clock,
            frames: 0,
        }
    }

    pub fn game(&self) -> &Game {
        &self.game
    }

    pub fn game_mut(&mut self) -> &mut Game {
        &mut self.game
    }

    /// Frames run so far.
    pub fn frames(&self) -> u64 {
        self.frames
    }

    /// Runs a single frame.
    pub fn frame<P, R>(&mut self, input: &mut P, target: &mut R) -> anyhow::Result<TickOutcome>
    where
        P: InputProvider + ?Sized,
        R: RenderTarget + ?Sized,
    {
        let time: Time = self.clock.tick();
        let outcome = self.game.tick(time, input);
        self.frames += 1;
        if outcome == TickOutcome::Exit {
            return Ok(outcome);
        }

        // keep the projection in step with the back buffer; a minimised
        // window reports 0 and keeps the last aspect
        let (w, h) = target.output_size();
        if w > 0 && h > 0 {
            self.game.on_window_size_changed(w, h);
        }

        self.game.render(target)?;
        Ok(outcome)
    }

    /// Runs frames until the game exits or `max_frames` frames have run.
    ///
    /// A render target error stops the loop and is returned.
    pub fn run<P, R>(
        &mut self,
        input: &mut P,
        target: &mut R,
        max_frames: Option<u64>,
    ) -> anyhow::Result<RunEnd>
    where
        P: InputProvider + ?Sized,
        R: RenderTarget + ?Sized,
    {
        info!(
            "runner starting ({} clock, limit {:?})",
            if self.clock.is_fixed() { "fixed-step" } else { "variable-step" },
            max_frames
        );
        loop {
            if max_frames.is_some_and(|max| self.frames >= max) {
                info!("frame limit reached after {} frames", self.frames);
                return Ok(RunEnd::FrameLimit);
            }
            if self.frame(input, target)? == TickOutcome::Exit {
                return Ok(RunEnd::ExitRequested);
            }
        }
    }

    // ── Host notifications ─────────────────────────────────────────────────

    pub fn activated(&mut self) {
        debug!("activated");
        self.game.on_activated();
    }

    pub fn deactivated(&mut self) {
        self.game.on_deactivated();
    }

    pub fn suspending(&mut self) {
        self.game.on_suspending();
    }

    pub fn resuming(&mut self) {
        self.clock.reset_elapsed();
        self.game.on_resuming();
    }

    pub fn device_lost(&mut self) {
        self.game.on_device_lost();
    }

    pub fn device_restored(&mut self) {
        self.game.on_device_restored();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::frame::FrameOutput;
    use shooter_core::{InputState, KeyCode, ShooterConfig};

    #[derive(Default)]
    struct Counting {
        presented: usize,
        fail_after: Option<usize>,
    }

    impl RenderTarget for Counting {
        fn output_size(&self) -> (u32, u32) {
            (640, 480)
        }
        fn present(&mut self, _frame: &FrameOutput) -> anyhow::Result<()> {
            if self.fail_after.is_some_and(|n| self.presented >= n) {
                anyhow::bail!("swapchain gone");
            }
            self.presented += 1;
            Ok(())
        }
    }

    fn runner() -> Runner {
        let mut game = Game::new(ShooterConfig::default());
        game.initialize(640, 480);
        Runner::new(game, TimeClock::fixed(1.0 / 60.0))
    }

    #[test]
    fn stops_at_frame_limit() {
        let mut runner = runner();
        let mut target = Counting::default();
        let end = runner.run(&mut InputState::new(), &mut target, Some(30)).unwrap();
        assert_eq!(end, RunEnd::FrameLimit);
        assert_eq!(runner.frames(), 30);
        assert_eq!(target.presented, 30);
    }

    #[test]
    fn stops_on_exit_request() {
        let mut runner = runner();
        let mut input = InputState::new();
        input.update_key(KeyCode::Escape, true);
        let end = runner.run(&mut input, &mut Counting::default(), None).unwrap();
        assert_eq!(end, RunEnd::ExitRequested);
        assert_eq!(runner.frames(), 1);
    }

    #[test]
    fn render_errors_abort_the_loop() {
        let mut runner = runner();
        let mut target = Counting {
            fail_after: Some(3),
            ..Default::default()
        };
        let err = runner.run(&mut InputState::new(), &mut target, Some(100)).unwrap_err();
        assert!(err.to_string().contains("swapchain"));
        assert_eq!(runner.frames(), 4);
    }

    #[test]
    fn lost_device_skips_presents() {
        let mut runner = runner();
        let mut target = Counting::default();
        let mut input = InputState::new();
        runner.device_lost();
        runner.run(&mut input, &mut target, Some(5)).unwrap();
        assert_eq!(target.presented, 0);
        runner.device_restored();
        runner.run(&mut input, &mut target, Some(10)).unwrap();
        assert_eq!(target.presented, 5);
    }
}
