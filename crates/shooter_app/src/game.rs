use log::{debug, info};
use shooter_core::glam::{Mat4, Vec3};
use shooter_core::scene::{
    AnimationState, CameraUniform, Controller, FirstPersonCamera, InputAggregator, Intent,
    Projection, RoomBounds,
};
use shooter_core::{Color, InputProvider, MouseMode, ShooterConfig, Time};

use crate::frame::{FrameOutput, RoomResources, ROOM_TEXTURE};
use crate::traits::{DeviceNotify, RenderTarget};

/// Window size used when the host has no preference.
pub const DEFAULT_SIZE: (u32, u32) = (800, 600);

/// What the host loop should do after a tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    Continue,
    /// Menu or Escape was pressed.
    Exit,
}

/// The first-person demo: camera, weapon view and the debug room.
///
/// Owns all per-frame state.  The host drives it with
/// [`tick`](Self::tick) then [`render`](Self::render) once per frame and
/// forwards lifecycle notifications to the `on_*` methods.
pub struct Game {
    config: ShooterConfig,
    controller: Controller,
    aggregator: InputAggregator,
    camera: FirstPersonCamera,
    bounds: Option<RoomBounds>,
    animation: AnimationState,
    projection: Projection,
    output_size: (u32, u32),
    room_color: Color,
    room: Option<RoomResources>,
    last_intent: Intent,
    last_time: Time,
    updates: u64,
    /// applied to the input provider at the start of the next tick
    pending_mouse_mode: Option<MouseMode>,
}

impl Game {
    pub fn new(config: ShooterConfig) -> Self {
        let controller = Controller::with_default_bindings(config.movement.clone());
        let bounds = RoomBounds::from_config(&config.room);
        // an unvalidated config may start outside the room
        let start = Vec3::from(config.room.start_position);
        let camera = FirstPersonCamera::new(bounds.map_or(start, |b| b.clamp(start)));
        let animation = AnimationState::new(&config.animation);
        let projection = Projection::new(animation.fov, &config.projection);
        Self {
            config,
            controller,
            aggregator: InputAggregator::new(0),
            camera,
            bounds,
            animation,
            projection,
            output_size: (0, 0),
            room_color: Color::WHITE,
            room: None,
            last_intent: Intent::default(),
            last_time: Time::default(),
            updates: 0,
            pending_mouse_mode: None,
        }
    }

    /// Creates device- and size-dependent state for a `width × height`
    /// output.
    pub fn initialize(&mut self, width: u32, height: u32) {
        self.create_device_dependent_resources();
        self.output_size = (width, height);
        self.create_window_size_dependent_resources();
        info!("game initialised at {}x{}", width, height);
    }

    /// Window size to request when the host has no saved preference.
    pub fn default_size(&self) -> (u32, u32) {
        DEFAULT_SIZE
    }

    // ── Frame update ───────────────────────────────────────────────────────

    /// Advances the world by one frame.
    pub fn tick<P>(&mut self, time: Time, input: &mut P) -> TickOutcome
    where
        P: InputProvider + ?Sized,
    {
        let dt = time.delta;

        if let Some(mode) = self.pending_mouse_mode.take() {
            input.set_mouse_mode(mode);
        }

        let intent = self.aggregator.gather(input, &self.controller, dt);

        self.camera.rotate(intent.yaw_delta, intent.pitch_delta);
        let gain = if intent.sprinting {
            self.config.movement.sprint_gain
        } else {
            self.config.movement.movement_gain
        };
        self.camera.integrate(intent.movement, gain, dt, self.bounds.as_ref());

        self.animation.advance(
            &self.config.animation,
            intent.aiming,
            intent.sprinting,
            intent.is_moving(),
            dt,
        );
        if self.animation.fov != self.projection.fov {
            self.projection.fov = self.animation.fov;
        }

        if intent.cycle_room_color {
            self.room_color = self.room_color.next_room_tint();
            debug!("room colour -> {:?}", self.room_color);
        }

        self.last_intent = intent;
        self.last_time = time;
        self.updates += 1;

        if intent.exit_requested {
            info!("exit requested after {} frames", self.updates);
            TickOutcome::Exit
        } else {
            TickOutcome::Continue
        }
    }

    // ── Frame render ───────────────────────────────────────────────────────

    /// Hands the frame to `target`.
    ///
    /// Returns `Ok(false)` without touching the target before the first
    /// update or while device resources are lost.
    pub fn render<R>(&mut self, target: &mut R) -> anyhow::Result<bool>
    where
        R: RenderTarget + ?Sized,
    {
        // Don't try to render anything before the first update.
        if self.updates == 0 {
            return Ok(false);
        }
        let Some(frame) = self.frame() else {
            return Ok(false);
        };
        target.present(&frame)?;
        Ok(true)
    }

    /// The frame that [`render`](Self::render) would present, if any.
    pub fn frame(&self) -> Option<FrameOutput> {
        let room = self.room?;
        let view = self.camera.view_matrix();
        let projection = self.projection.matrix();
        let mut uniform = CameraUniform::new();
        uniform.update_view_proj(&self.camera, &self.projection);

        // camera space looks down -Z; the offset's `z` is "in front"
        let o = self.animation.weapon_offset;
        let weapon = self.camera.world_matrix() * Mat4::from_translation(Vec3::new(o.x, o.y, -o.z));

        Some(FrameOutput {
            time: self.last_time,
            view,
            projection,
            uniform,
            camera_position: self.camera.position,
            look_direction: self.camera.look_direction(),
            fov: self.animation.fov,
            weapon,
            crosshair_spread: self.animation.crosshair_spread,
            room,
            room_color: self.room_color,
            clear_color: Color::CORNFLOWER_BLUE,
            device: self.last_intent.device,
            aiming: self.last_intent.aiming,
            sprinting: self.last_intent.sprinting,
        })
    }

    // ── Message handlers ───────────────────────────────────────────────────

    /// The window became the active window.
    pub fn on_activated(&mut self) {
        self.aggregator.reset_trackers();
    }

    pub fn on_deactivated(&mut self) {
        debug!("game deactivated");
    }

    pub fn on_suspending(&mut self) {
        debug!("game suspending");
    }

    /// Resumed after suspension.  The host also resets its clock.
    pub fn on_resuming(&mut self) {
        self.aggregator.reset_trackers();
    }

    /// Returns `false` when the size did not actually change.
    pub fn on_window_size_changed(&mut self, width: u32, height: u32) -> bool {
        if self.output_size == (width, height) {
            return false;
        }
        self.output_size = (width, height);
        self.create_window_size_dependent_resources();
        debug!("output resized to {}x{}", width, height);
        true
    }

    // ── Accessors ──────────────────────────────────────────────────────────

    pub fn camera(&self) -> &FirstPersonCamera {
        &self.camera
    }

    pub fn camera_mut(&mut self) -> &mut FirstPersonCamera {
        &mut self.camera
    }

    pub fn animation(&self) -> &AnimationState {
        &self.animation
    }

    pub fn projection(&self) -> &Projection {
        &self.projection
    }

    pub fn controller_mut(&mut self) -> &mut Controller {
        &mut self.controller
    }

    pub fn last_intent(&self) -> &Intent {
        &self.last_intent
    }

    pub fn room_color(&self) -> Color {
        self.room_color
    }

    pub fn has_device_resources(&self) -> bool {
        self.room.is_some()
    }

    pub fn config(&self) -> &ShooterConfig {
        &self.config
    }

    // ── Resources ──────────────────────────────────────────────────────────

    fn create_device_dependent_resources(&mut self) {
        self.room = Some(RoomResources {
            extent: Vec3::from(self.config.room.bounds),
            texture_path: ROOM_TEXTURE,
        });
    }

    fn create_window_size_dependent_resources(&mut self) {
        let (w, h) = self.output_size;
        self.projection.set_output_size(w, h);
        self.projection.fov = self.animation.fov;
    }
}

impl DeviceNotify for Game {
    fn on_device_lost(&mut self) {
        info!("device lost; releasing room resources");
        self.room = None;
        self.pending_mouse_mode = Some(MouseMode::Absolute);
    }

    fn on_device_restored(&mut self) {
        info!("device restored");
        self.create_device_dependent_resources();
        self.create_window_size_dependent_resources();
    }
}
