//! RGBA color type and predefined color constants.

use super::css;

/// Represents an RGBA color with floating-point components.
///
/// All components are in the range 0.0 (minimum) to 1.0 (maximum). This is
/// the form Cairo consumes; CSS text is converted through [`css::to_pixel`]
/// first and then unpacked with [`Color::from_argb`].
///
/// # Examples
///
/// ```
/// use easel::draw::Color;
/// let red = Color { r: 1.0, g: 0.0, b: 0.0, a: 1.0 };
/// assert_eq!(Color::from_argb(0xFFFF0000), red);
/// ```
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Color {
    /// Red component (0.0 = no red, 1.0 = full red)
    pub r: f64,
    /// Green component (0.0 = no green, 1.0 = full green)
    pub g: f64,
    /// Blue component (0.0 = no blue, 1.0 = full blue)
    pub b: f64,
    /// Alpha/transparency (0.0 = fully transparent, 1.0 = fully opaque)
    pub a: f64,
}

impl Color {
    /// Creates a new color from RGBA components.
    pub fn new(r: f64, g: f64, b: f64, a: f64) -> Self {
        Self { r, g, b, a }
    }

    /// Unpacks a 32-bit `0xAARRGGBB` pixel value.
    pub fn from_argb(pixel: u32) -> Self {
        let channel = |shift: u32| f64::from((pixel >> shift) & 0xFF) / 255.0;
        Self {
            r: channel(16),
            g: channel(8),
            b: channel(0),
            a: channel(24),
        }
    }

    /// Parses any CSS color text accepted by the color engine.
    ///
    /// Unknown or malformed text yields [`TRANSPARENT`].
    pub fn parse(text: &str) -> Self {
        Self::from_argb(css::to_pixel(text))
    }

    /// Packs the color back into a `0xAARRGGBB` pixel value.
    pub fn to_argb(self) -> u32 {
        let channel = |v: f64| (v.clamp(0.0, 1.0) * 255.0).round() as u32;
        (channel(self.a) << 24) | (channel(self.r) << 16) | (channel(self.g) << 8) | channel(self.b)
    }
}

/// Predefined black color, the default fill and stroke
pub const BLACK: Color = Color {
    r: 0.0,
    g: 0.0,
    b: 0.0,
    a: 1.0,
};

/// Predefined white color
pub const WHITE: Color = Color {
    r: 1.0,
    g: 1.0,
    b: 1.0,
    a: 1.0,
};

/// Fully transparent color, the result of unrecognized color text
pub const TRANSPARENT: Color = Color {
    r: 0.0,
    g: 0.0,
    b: 0.0,
    a: 0.0,
};
