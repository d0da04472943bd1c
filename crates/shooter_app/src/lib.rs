//! Host-side glue for the first-person demo.
//!
//! # Quick-start
//!
//! ```rust,ignore
//! use shooter_app::{App, AppConfig, FrameOutput, RenderTarget};
//! use shooter_core::InputState;
//!
//! struct Swapchain;
//!
//! impl RenderTarget for Swapchain {
//!     fn output_size(&self) -> (u32, u32) { (1280, 720) }
//!     fn present(&mut self, frame: &FrameOutput) -> anyhow::Result<()> {
//!         // upload frame.uniform, draw the room and the weapon...
//!         Ok(())
//!     }
//! }
//!
//! fn main() -> anyhow::Result<()> {
//!     shooter_app::logging::init(log::LevelFilter::Info)?;
//!     let config = AppConfig::load("shooter.toml".as_ref())?;
//!     shooter_app::logging::set_level(config.log.level_filter()?);
//!     let mut input = InputState::new(); // fed from winit events by the host
//!     App::new().with_config(config).run(&mut input, &mut Swapchain)?;
//!     Ok(())
//! }
//! ```

pub mod builder;
pub mod config;
pub mod frame;
pub mod game;
pub mod logging;
pub mod runner;
pub mod traits;

pub use builder::App;
pub use config::AppConfig;
pub use frame::{FrameOutput, RoomResources};
pub use game::{Game, TickOutcome};
pub use runner::{RunEnd, Runner};
pub use traits::{DeviceNotify, RenderTarget};

// ── Re-export the most-used shooter_core primitives ────────────────────────
// Users can do `use shooter_app::{Time, InputState, Vec3};` without adding
// shooter_core as a direct dependency.
pub use shooter_core::{
    Color,
    GamepadButton,
    GamepadState,
    InputProvider,
    InputState,
    KeyCode,
    MouseButton,
    ShooterConfig,
    Time,
    TimeClock,
};

// glam math types, re-exported for convenience
pub use shooter_core::glam::{Mat4, Quat, Vec2, Vec3};
