// shooter_core: first-person camera, input folding and weapon-view animation

pub mod color;
pub mod config;

// input helpers for keyboard / mouse / pad state
pub mod gamepad;
pub mod input;

pub mod lerp;
pub mod scene;
pub mod time;

pub use color::Color;
pub use config::{ConfigError, ShooterConfig};
pub use time::{Time, TimeClock};

// re-export common input types so callers don't need to depend on winit
pub use gamepad::{GamepadButton, GamepadState};
pub use input::{InputProvider, InputState, KeyCode, KeyboardState, MouseButton, MouseMode, MouseState};

pub use glam;
