use crate::foundation::{
    core::TRANSPARENT_KEY,
    error::{StrokecastError, StrokecastResult},
    math::unpremul_u8,
};

/// A rendered frame as straight-alpha RGBA8 pixels.
///
/// Frames are never mutated after the rasterizer hands them over. Every pixel the stroke did
/// not touch holds exactly [`TRANSPARENT_KEY`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FrameRGBA {
    /// Frame width in pixels.
    pub width: u32,
    /// Frame height in pixels.
    pub height: u32,
    /// RGBA8 bytes, tightly packed, row-major.
    pub data: Vec<u8>,
}

impl FrameRGBA {
    /// Convert premultiplied RGBA8 (as produced by the CPU rasterizer) into a frame.
    pub fn from_premul(width: u32, height: u32, premul: &[u8]) -> StrokecastResult<Self> {
        if premul.len() != width as usize * height as usize * 4 {
            return Err(StrokecastError::validation(format!(
                "frame byte length {} does not match {width}x{height}",
                premul.len()
            )));
        }

        let mut data = Vec::with_capacity(premul.len());
        for px in premul.chunks_exact(4) {
            let a = px[3];
            if a == 0 {
                data.extend_from_slice(&TRANSPARENT_KEY);
            } else {
                data.extend_from_slice(&[
                    unpremul_u8(px[0], a),
                    unpremul_u8(px[1], a),
                    unpremul_u8(px[2], a),
                    a,
                ]);
            }
        }
        Ok(Self {
            width,
            height,
            data,
        })
    }

    /// RGBA at `(x, y)`, or `None` when out of bounds.
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let i = (y as usize * self.width as usize + x as usize) * 4;
        let px = self.data.get(i..i + 4)?;
        Some([px[0], px[1], px[2], px[3]])
    }

    /// Number of pixels with any coverage.
    pub fn covered_pixels(&self) -> usize {
        self.data.chunks_exact(4).filter(|px| px[3] != 0).count()
    }

    /// Copy into an [`image::RgbaImage`].
    pub fn to_rgba_image(&self) -> StrokecastResult<image::RgbaImage> {
        image::RgbaImage::from_raw(self.width, self.height, self.data.clone())
            .ok_or_else(|| StrokecastError::validation("frame buffer size mismatch"))
    }
}
