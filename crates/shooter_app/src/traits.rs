use crate::frame::FrameOutput;

/// The swapchain side of the host template.
///
/// The game never touches GPU objects.  Once a frame's state is final it is
/// handed over through [`present`](Self::present); what gets drawn with it
/// (room box, weapon model, crosshair sprites) is up to the implementor.
///
/// ```rust,ignore
/// struct Swapchain { /* device, views, sprite batch... */ }
///
/// impl RenderTarget for Swapchain {
///     fn output_size(&self) -> (u32, u32) { (self.width, self.height) }
///
///     fn present(&mut self, frame: &FrameOutput) -> anyhow::Result<()> {
///         self.clear(frame.clear_color);
///         self.draw_room(frame.room, frame.uniform, frame.room_color);
///         self.draw_weapon(frame.weapon);
///         self.draw_crosshair(frame.crosshair_spread);
///         self.swap()
///     }
/// }
/// ```
pub trait RenderTarget {
    /// Current back-buffer size in physical pixels.
    fn output_size(&self) -> (u32, u32);

    /// Called once per rendered frame when the render target is ready.
    ///
    /// An error here is fatal: the runner stops and propagates it.
    fn present(&mut self, frame: &FrameOutput) -> anyhow::Result<()>;
}

/// Device lifecycle callbacks.
///
/// The host calls these synchronously on the frame thread; the loop does
/// not advance until they return.
pub trait DeviceNotify {
    /// The graphics device went away; drop everything created from it.
    fn on_device_lost(&mut self);

    /// A new device is available; recreate what `on_device_lost` dropped.
    fn on_device_restored(&mut self);
}
