//! RGBA colour handed to the renderer for the room tint and the clear.
//!
//! Stored as four `f32` values in linear light (0.0 – 1.0).
//!
//! # Example
//! ```rust,ignore
//! use shooter_core::Color;
//!
//! let tint = Color::WHITE.next_room_tint(); // red
//! let [r, g, b, a] = tint.to_array();
//! ```

/// Linear-space RGBA colour.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Default for Color {
    fn default() -> Self {
        Self::WHITE
    }
}

impl Color {
    /// Opaque colour from red, green, blue components.
    #[inline]
    pub const fn rgb(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b, a: 1.0 }
    }

    /// Returns `[r, g, b, a]`.
    #[inline]
    pub fn to_array(self) -> [f32; 4] {
        [self.r, self.g, self.b, self.a]
    }

    pub const WHITE:           Self = Self::rgb(1.0, 1.0, 1.0);
    pub const BLACK:           Self = Self::rgb(0.0, 0.0, 0.0);
    pub const RED:             Self = Self::rgb(1.0, 0.0, 0.0);
    pub const GREEN:           Self = Self::rgb(0.0, 0.5, 0.0);
    pub const BLUE:            Self = Self::rgb(0.0, 0.0, 1.0);
    pub const CORNFLOWER_BLUE: Self = Self::rgb(0.392, 0.584, 0.929);

    /// Next tint in the debug room cycle: white → red → green → blue → white.
    ///
    /// Any colour outside the cycle restarts it at red.
    pub fn next_room_tint(self) -> Self {
        if self == Self::RED {
            Self::GREEN
        } else if self == Self::GREEN {
            Self::BLUE
        } else if self == Self::BLUE {
            Self::WHITE
        } else {
            Self::RED
        }
    }
}

impl From<Color> for [f32; 4] {
    fn from(c: Color) -> Self {
        c.to_array()
    }
}
