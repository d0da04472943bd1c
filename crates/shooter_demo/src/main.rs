// Headless walk-through of the first-person controller.
//
// Replays a fixed input script (walk, sprint, aim, pad look, colour cycle,
// device loss) through the runner and logs what the renderer would receive.
//
//     shooter_demo [config.toml] [frames]

use std::path::PathBuf;

use log::info;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use shooter_app::{App, AppConfig, FrameOutput, RenderTarget, TickOutcome};
use shooter_core::glam::Vec2;
use shooter_core::{GamepadButton, GamepadState, InputState, KeyCode, MouseButton};

const DEFAULT_FRAMES: u64 = 720;
const LOG_EVERY: u64 = 60;

/// Input script keyed on the frame number.
struct Script {
    input: InputState,
    rng: StdRng,
}

impl Script {
    fn new(seed: u64) -> Self {
        Self {
            input: InputState::new(),
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Sets up the devices for `frame`.
    fn apply(&mut self, frame: u64) {
        let input = &mut self.input;
        match frame {
            // stand still
            0..=59 => {}
            // walk forward, looking around a little
            60..=179 => {
                input.update_key(KeyCode::KeyW, true);
                let dx = self.rng.gen_range(-4.0..4.0);
                let dy = self.rng.gen_range(-1.0..1.0);
                input.accumulate_motion(dx, dy);
            }
            // tap shift to sprint
            180 => input.update_key(KeyCode::ShiftLeft, true),
            181..=299 => input.update_key(KeyCode::ShiftLeft, false),
            // stop, then aim down sights while strafing
            300 => {
                input.update_key(KeyCode::KeyW, false);
                input.update_mouse_button(MouseButton::Right, true);
                input.update_key(KeyCode::KeyA, true);
            }
            301..=419 => {}
            // hand over to the pad: walk and turn with the sticks
            420 => {
                input.update_mouse_button(MouseButton::Right, false);
                input.update_key(KeyCode::KeyA, false);
                input.set_gamepad(pad(Vec2::new(0.0, 1.0), Vec2::new(0.6, 0.0), 0.0));
            }
            // pull the trigger to aim
            480 => input.set_gamepad(pad(Vec2::new(0.0, 1.0), Vec2::new(0.6, 0.0), 1.0)),
            // release everything and cycle the room tint
            540 => {
                let mut idle = pad(Vec2::ZERO, Vec2::ZERO, 0.0);
                idle.buttons.insert(GamepadButton::A);
                input.set_gamepad(idle);
            }
            541 => input.set_gamepad(pad(Vec2::ZERO, Vec2::ZERO, 0.0)),
            // quit
            f if f >= 700 => input.update_key(KeyCode::Escape, true),
            _ => {}
        }
    }
}

fn pad(left: Vec2, right: Vec2, trigger: f32) -> GamepadState {
    GamepadState {
        connected: true,
        left_stick: left,
        right_stick: right,
        left_trigger: trigger,
        ..Default::default()
    }
}

/// Render target that logs a summary of every `LOG_EVERY`th frame.
struct LogTarget {
    size: (u32, u32),
    presented: u64,
}

impl RenderTarget for LogTarget {
    fn output_size(&self) -> (u32, u32) {
        self.size
    }

    fn present(&mut self, frame: &FrameOutput) -> anyhow::Result<()> {
        if frame.time.frame_count % LOG_EVERY == 0 {
            let p = frame.camera_position;
            info!(
                "frame {:>4}: pos=({:+.2}, {:+.2}, {:+.2}) fov={:.1} spread={:.2} device={:?} aim={} sprint={} tint={:?}",
                frame.time.frame_count,
                p.x,
                p.y,
                p.z,
                frame.fov,
                frame.crosshair_spread,
                frame.device,
                frame.aiming,
                frame.sprinting,
                frame.room_color.to_array(),
            );
        }
        self.presented += 1;
        Ok(())
    }
}

fn main() -> anyhow::Result<()> {
    let mut args = std::env::args().skip(1);
    let config_path = PathBuf::from(args.next().unwrap_or_else(|| "shooter.toml".to_string()));
    let frames: u64 = match args.next() {
        Some(s) => s.parse()?,
        None => DEFAULT_FRAMES,
    };

    // install first so config loading is logged, then apply the configured level
    shooter_app::logging::init(log::LevelFilter::Info)?;
    let config = AppConfig::load(&config_path)?;
    shooter_app::logging::set_level(config.log.level_filter()?);

    let app = App::new().with_config(config).with_fixed_step(1.0 / 60.0);
    let mut target = LogTarget {
        size: (app.config().window.width, app.config().window.height),
        presented: 0,
    };
    let mut runner = app.build(&target);
    let mut script = Script::new(7);

    for frame in 0..frames {
        script.apply(frame);

        // simulate a device reset half way through the sprint
        if frame == 240 {
            runner.device_lost();
            runner.device_restored();
        }

        if runner.frame(&mut script.input, &mut target)? == TickOutcome::Exit {
            break;
        }
    }

    let cam = runner.game().camera();
    info!(
        "done after {} frames ({} presented); final yaw={:.3} pitch={:.3}",
        runner.frames(),
        target.presented,
        cam.yaw(),
        cam.pitch()
    );
    Ok(())
}
