//! First-person scene state: camera, input folding and cosmetic animation.

pub mod animator;
pub mod camera;
pub mod controller;
pub mod intent;

pub use animator::AnimationState;
pub use camera::{CameraUniform, FirstPersonCamera, Projection, RoomBounds};
pub use controller::Controller;
// also expose the device enum so callers don't need to reach into the
// submodule.
pub use intent::{ActiveDevice, InputAggregator, Intent};
