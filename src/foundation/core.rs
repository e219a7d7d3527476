use std::str::FromStr;

use crate::foundation::error::{StrokecastError, StrokecastResult};

pub use kurbo::Point;

/// RGBA value of every uncovered pixel in a finished frame.
///
/// Encoders treat this exact color as the transparency key.
pub const TRANSPARENT_KEY: [u8; 4] = [255, 255, 255, 0];

/// Output surface dimensions in pixels.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Canvas {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
}

impl Canvas {
    /// Reject empty canvases and sizes the CPU rasterizer cannot address.
    pub fn validate(self) -> StrokecastResult<()> {
        if self.width == 0 || self.height == 0 {
            return Err(StrokecastError::validation(
                "canvas width/height must be non-zero",
            ));
        }
        if self.width > u32::from(u16::MAX) || self.height > u32::from(u16::MAX) {
            return Err(StrokecastError::validation(format!(
                "canvas {}x{} exceeds {} pixels per side",
                self.width,
                self.height,
                u16::MAX
            )));
        }
        Ok(())
    }

    /// Geometric center of the canvas.
    pub fn center(self) -> Point {
        Point::new(f64::from(self.width) / 2.0, f64::from(self.height) / 2.0)
    }
}

/// Straight (non-premultiplied) RGBA8 color.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Rgba8 {
    /// Red.
    pub r: u8,
    /// Green.
    pub g: u8,
    /// Blue.
    pub b: u8,
    /// Alpha; 255 is opaque.
    pub a: u8,
}

impl Rgba8 {
    /// Green used for the confirmation shapes.
    pub const CONFIRM_GREEN: Self = Self::new(36, 181, 92, 255);
    /// Red used for the cancel-mark.
    pub const CANCEL_RED: Self = Self::new(247, 25, 25, 255);

    /// Create a color from straight channel values.
    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Channels as `[r, g, b, a]`.
    pub fn to_array(self) -> [u8; 4] {
        [self.r, self.g, self.b, self.a]
    }
}

impl FromStr for Rgba8 {
    type Err = StrokecastError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_hex(s).map_err(StrokecastError::validation)
    }
}

impl std::fmt::Display for Rgba8 {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "#{:02x}{:02x}{:02x}{:02x}",
            self.r, self.g, self.b, self.a
        )
    }
}

impl serde::Serialize for Rgba8 {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.collect_str(self)
    }
}

impl<'de> serde::Deserialize<'de> for Rgba8 {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        #[derive(serde::Deserialize)]
        #[serde(untagged)]
        enum Repr {
            Hex(String),
            Arr(Vec<u8>),
        }

        match <Repr as serde::Deserialize>::deserialize(deserializer)? {
            Repr::Hex(s) => parse_hex(&s).map_err(serde::de::Error::custom),
            Repr::Arr(v) => match v.as_slice() {
                [r, g, b] => Ok(Self::new(*r, *g, *b, 255)),
                [r, g, b, a] => Ok(Self::new(*r, *g, *b, *a)),
                _ => Err(serde::de::Error::custom(
                    "rgba array must have len 3 ([r,g,b]) or 4 ([r,g,b,a])",
                )),
            },
        }
    }
}

fn parse_hex(s: &str) -> Result<Rgba8, String> {
    let hex = s.trim().trim_start_matches('#');
    if !hex.is_ascii() || !(hex.len() == 6 || hex.len() == 8) {
        return Err(format!(
            "color '{s}' must be #rrggbb or #rrggbbaa hex"
        ));
    }
    let channel = |i: usize| -> Result<u8, String> {
        u8::from_str_radix(&hex[i..i + 2], 16).map_err(|e| format!("color '{s}': {e}"))
    };
    let a = if hex.len() == 8 { channel(6)? } else { 255 };
    Ok(Rgba8::new(channel(0)?, channel(2)?, channel(4)?, a))
}

/// Stroke width and color shared by every segment, arc and cap of an animation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct StrokeStyle {
    /// Stroke width in pixels.
    pub width: u32,
    /// Paint for strokes and caps alike.
    pub color: Rgba8,
}

impl StrokeStyle {
    /// Reject zero-width strokes.
    pub fn validate(self) -> StrokecastResult<()> {
        if self.width == 0 {
            return Err(StrokecastError::validation("stroke width must be > 0"));
        }
        Ok(())
    }

    /// Distance from the stroke centerline to its edge.
    pub fn half_width(self) -> f64 {
        f64::from(self.width) / 2.0
    }

    /// Radius of the filled circle drawn at path endpoints and joints.
    ///
    /// One pixel inside the stroke edge so caps never bleed past it.
    pub fn cap_radius(self) -> f64 {
        (self.half_width() - 1.0).max(0.5)
    }
}

/// Fraction of a shape's path (or sweep) that appears drawn, in `[0, 1]`.
#[derive(Clone, Copy, Debug, PartialEq, PartialOrd, serde::Serialize)]
pub struct Progress(f64);

impl Progress {
    /// Nothing drawn yet.
    pub const START: Self = Self(0.0);
    /// The whole shape is drawn.
    pub const DONE: Self = Self(1.0);

    /// Fails with [`StrokecastError::InvalidProgress`] outside `[0, 1]`.
    pub fn new(value: f64) -> StrokecastResult<Self> {
        if !(0.0..=1.0).contains(&value) {
            return Err(StrokecastError::InvalidProgress(value));
        }
        Ok(Self(value))
    }

    /// Progress of sample `index` out of `frame_count` evenly spaced steps.
    pub fn sample(index: u32, frame_count: u32) -> StrokecastResult<Self> {
        if frame_count == 0 {
            return Err(StrokecastError::validation("frame_count must be > 0"));
        }
        Self::new(f64::from(index) / f64::from(frame_count))
    }

    /// The raw fraction.
    pub fn get(self) -> f64 {
        self.0
    }

    /// `true` once the shape is complete.
    pub fn is_done(self) -> bool {
        self.0 >= 1.0
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
