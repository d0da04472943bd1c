use log::info;
use shooter_core::{InputProvider, ShooterConfig, TimeClock};

use crate::config::AppConfig;
use crate::game::Game;
use crate::runner::{RunEnd, Runner};
use crate::traits::RenderTarget;

/// The main entry point.  Uses the builder pattern to configure the game.
///
/// ```rust,ignore
/// let end = App::new()
///     .with_config(AppConfig::load(Path::new("shooter.toml"))?)
///     .with_fixed_step(1.0 / 60.0)
///     .with_frame_limit(600)
///     .run(&mut input, &mut swapchain)?;
/// ```
pub struct App {
    config: AppConfig,
    fixed_step: Option<f32>,
    frame_limit: Option<u64>,
}

impl Default for App {
    fn default() -> Self {
        Self::new()
    }
}

impl App {
    pub fn new() -> Self {
        Self {
            config: AppConfig::default(),
            fixed_step: None,
            frame_limit: None,
        }
    }

    pub fn with_config(mut self, config: AppConfig) -> Self {
        self.config = config;
        self
    }

    pub fn with_tuning(mut self, tuning: ShooterConfig) -> Self {
        self.config.shooter = tuning;
        self
    }

    pub fn with_title(mut self, title: &str) -> Self {
        self.config.window.title = title.to_string();
        self
    }

    pub fn with_size(mut self, width: u32, height: u32) -> Self {
        self.config.window.width = width;
        self.config.window.height = height;
        self
    }

    /// Advance the clock by exactly `step` seconds per frame instead of
    /// reading the wall clock.
    pub fn with_fixed_step(mut self, step: f32) -> Self {
        self.fixed_step = Some(step);
        self
    }

    pub fn with_frame_limit(mut self, frames: u64) -> Self {
        self.frame_limit = Some(frames);
        self
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// Builds the game and a runner without starting the loop.
    ///
    /// The game is initialised at the render target's current size, or the
    /// configured window size when the target reports zero.
    pub fn build<R>(&self, target: &R) -> Runner
    where
        R: RenderTarget + ?Sized,
    {
        let (mut w, mut h) = target.output_size();
        if w == 0 || h == 0 {
            (w, h) = (self.config.window.width, self.config.window.height);
        }
        let mut game = Game::new(self.config.shooter.clone());
        game.initialize(w, h);

        let clock = match self.fixed_step {
            Some(step) => TimeClock::fixed(step),
            None => TimeClock::new(),
        };
        Runner::new(game, clock)
    }

    /// Runs the main loop of the game.
    pub fn run<P, R>(self, input: &mut P, target: &mut R) -> anyhow::Result<RunEnd>
    where
        P: InputProvider + ?Sized,
        R: RenderTarget + ?Sized,
    {
        info!("starting {:?}", self.config.window.title);
        let mut runner = self.build(target);
        runner.run(input, target, self.frame_limit)
    }
}
