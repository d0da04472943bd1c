use shooter_core::glam::{Mat4, Vec3};
use shooter_core::scene::{ActiveDevice, CameraUniform};
use shooter_core::{Color, Time};

/// Texture the room box is drawn with; loaded by the host's resource loader.
pub const ROOM_TEXTURE: &str = "Assets/roomtexture.dds";

/// Device-dependent description of the room.
///
/// Created in `Game::initialize` / `on_device_restored` and dropped on
/// device loss, mirroring the GPU objects the host builds from it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RoomResources {
    /// Full box extent in world units.
    pub extent: Vec3,
    pub texture_path: &'static str,
}

/// Everything the render target needs for one frame.
///
/// Built by `Game::render` after the frame's update has run.
#[derive(Debug, Clone, Copy)]
pub struct FrameOutput {
    // ── Timing ─────────────────────────────────────────────────────────────
    pub time: Time,

    // ── Camera ─────────────────────────────────────────────────────────────
    pub view: Mat4,
    pub projection: Mat4,
    /// `projection * view`, packed for upload.
    pub uniform: CameraUniform,
    pub camera_position: Vec3,
    pub look_direction: Vec3,
    /// Animated vertical field of view, degrees.
    pub fov: f32,

    // ── Weapon view ────────────────────────────────────────────────────────
    /// World transform of the weapon model.
    pub weapon: Mat4,
    pub crosshair_spread: f32,

    // ── Room ───────────────────────────────────────────────────────────────
    pub room: RoomResources,
    pub room_color: Color,
    pub clear_color: Color,

    // ── Modes (for HUD hints) ──────────────────────────────────────────────
    pub device: ActiveDevice,
    pub aiming: bool,
    pub sprinting: bool,
}

impl FrameOutput {
    /// Model-view-projection for the weapon, ready for a vertex shader.
    pub fn weapon_mvp(&self) -> Mat4 {
        self.projection * self.view * self.weapon
    }
}
