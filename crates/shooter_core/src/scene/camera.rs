use std::f32::consts::{FRAC_PI_2, PI, TAU};

use glam::{Mat4, Quat, Vec3};

use crate::config::{ProjectionConfig, RoomConfig};

/// Distance kept between the pitch and straight up/down.
pub const PITCH_MARGIN: f32 = 0.01;
/// Largest pitch magnitude the camera accepts.
pub const PITCH_LIMIT: f32 = FRAC_PI_2 - PITCH_MARGIN;

/// Clamps a pitch angle into `[-PITCH_LIMIT, PITCH_LIMIT]`.
#[inline]
pub fn clamp_pitch(pitch: f32) -> f32 {
    pitch.clamp(-PITCH_LIMIT, PITCH_LIMIT)
}

/// Wraps any finite angle into `(-π, π]`.
pub fn wrap_yaw(yaw: f32) -> f32 {
    if yaw > -PI && yaw <= PI {
        return yaw;
    }
    let mut wrapped = (yaw + PI).rem_euclid(TAU) - PI;
    if wrapped <= -PI {
        wrapped += TAU;
    }
    wrapped
}

/// Axis-aligned box the camera is kept inside.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RoomBounds {
    /// Half extent minus the wall margin.
    pub half: Vec3,
}

impl RoomBounds {
    /// Bounds for a room of full size `extent`, keeping `margin` from each wall.
    pub fn new(extent: Vec3, margin: f32) -> Self {
        Self {
            half: (extent / 2.0 - Vec3::splat(margin)).max(Vec3::ZERO),
        }
    }

    /// `None` when the room config disables clamping.
    pub fn from_config(room: &RoomConfig) -> Option<Self> {
        room.clamp_to_bounds
            .then(|| Self::new(Vec3::from(room.bounds), room.margin))
    }

    pub fn clamp(&self, p: Vec3) -> Vec3 {
        p.clamp(-self.half, self.half)
    }

    pub fn contains(&self, p: Vec3) -> bool {
        p.cmpge(-self.half).all() && p.cmple(self.half).all()
    }
}

/// First-person camera: an eye position plus yaw/pitch.
///
/// Yaw 0 looks down `+Z`; positive yaw turns towards `+X`.  Positive pitch
/// looks up.  The view is right-handed with `+Y` up.
#[derive(Debug, Clone, PartialEq)]
pub struct FirstPersonCamera {
    pub position: Vec3,
    yaw: f32,
    pitch: f32,
}

impl Default for FirstPersonCamera {
    fn default() -> Self {
        Self::new(Vec3::ZERO)
    }
}

impl FirstPersonCamera {
    pub fn new(position: Vec3) -> Self {
        Self {
            position,
            yaw: 0.0,
            pitch: 0.0,
        }
    }

    #[inline]
    pub fn yaw(&self) -> f32 {
        self.yaw
    }

    #[inline]
    pub fn pitch(&self) -> f32 {
        self.pitch
    }

    /// Set both angles, normalising them the same way [`rotate`](Self::rotate) does.
    pub fn set_angles(&mut self, yaw: f32, pitch: f32) {
        self.yaw = wrap_yaw(yaw);
        self.pitch = clamp_pitch(pitch);
    }

    /// Adds a yaw/pitch delta (radians), then clamps pitch and wraps yaw.
    pub fn rotate(&mut self, yaw_delta: f32, pitch_delta: f32) {
        self.set_angles(self.yaw + yaw_delta, self.pitch + pitch_delta);
    }

    /// Moves by a local-space `movement` vector scaled by `gain * dt`.
    ///
    /// Only yaw is applied to the vector, so looking up and walking forward
    /// never lifts the camera off the floor plane.  With `bounds` the new
    /// position is clamped into the room.
    pub fn integrate(&mut self, movement: Vec3, gain: f32, dt: f32, bounds: Option<&RoomBounds>) {
        let world = Quat::from_rotation_y(self.yaw) * movement;
        self.position += world * gain * dt;
        if let Some(bounds) = bounds {
            self.position = bounds.clamp(self.position);
        }
    }

    /// Unit look direction from the spherical angles.
    pub fn look_direction(&self) -> Vec3 {
        let y = self.pitch.sin();
        let r = self.pitch.cos();
        Vec3::new(r * self.yaw.sin(), y, r * self.yaw.cos())
    }

    pub fn target(&self) -> Vec3 {
        self.position + self.look_direction()
    }

    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.position, self.target(), Vec3::Y)
    }

    /// Camera-to-world transform: the inverse of [`view_matrix`](Self::view_matrix).
    pub fn world_matrix(&self) -> Mat4 {
        self.view_matrix().inverse()
    }
}

/// Perspective projection parameters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Projection {
    /// Vertical field of view, degrees.
    pub fov: f32,
    pub aspect: f32,
    pub znear: f32,
    pub zfar: f32,
}

impl Projection {
    pub fn new(fov: f32, config: &ProjectionConfig) -> Self {
        Self {
            fov,
            aspect: 1.0,
            znear: config.near,
            zfar: config.far,
        }
    }

    /// Update the aspect ratio from an output size.  A zero height keeps
    /// the matrix finite by falling back to `1.0`.
    pub fn set_output_size(&mut self, width: u32, height: u32) {
        self.aspect = if height == 0 { 1.0 } else { width as f32 / height as f32 };
    }

    pub fn matrix(&self) -> Mat4 {
        Mat4::perspective_rh(self.fov.to_radians(), self.aspect, self.znear, self.zfar)
    }
}

/// Uniform data that will be uploaded to the GPU. The shader only needs the
/// 4x4 view-projection matrix.
#[repr(C)]
#[derive(Debug, Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
pub struct CameraUniform {
    pub view_proj: [[f32; 4]; 4],
}

impl Default for CameraUniform {
    fn default() -> Self {
        Self::new()
    }
}

impl CameraUniform {
    pub fn new() -> Self {
        Self {
            view_proj: Mat4::IDENTITY.to_cols_array_2d(),
        }
    }

    pub fn update_view_proj(&mut self, camera: &FirstPersonCamera, projection: &Projection) {
        self.view_proj = (projection.matrix() * camera.view_matrix()).to_cols_array_2d();
    }
}
