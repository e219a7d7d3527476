use std::{
    fs::File,
    io::BufReader,
    path::{Path, PathBuf},
};

use crate::{
    foundation::{
        core::{Canvas, Rgba8, StrokeStyle},
        error::{StrokecastError, StrokecastResult},
    },
    shape::descriptor::{ShapeDescriptor, ShapeKind},
};

/// Progress steps when the JSON omits `frame_count`.
pub const DEFAULT_FRAME_COUNT: u32 = 60;
/// Finished-shape frames when the JSON omits `hold_frames`.
pub const DEFAULT_HOLD_FRAMES: u32 = 20;
/// Per-frame display time when the JSON omits `frame_delay_ms`.
pub const DEFAULT_FRAME_DELAY_MS: u32 = 50;

/// JSON-facing description of one animation.
///
/// Validated and turned into an [`AnimationSpec`] before any frame is rendered.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AnimationDef {
    /// Output surface size.
    pub canvas: Canvas,
    /// Which shape to draw.
    pub shape: ShapeKind,
    /// Radius for circles, side length (or width) for everything else.
    pub size: f64,
    /// Cancel-mark height; defaults to `size`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub height: Option<f64>,
    /// Stroke width and color.
    pub stroke: StrokeStyle,
    /// Progress steps; `frame_count + 1` frames are sampled.
    #[serde(default = "default_frame_count")]
    pub frame_count: u32,
    /// Copies of the finished frame appended after the last sample.
    #[serde(default = "default_hold_frames")]
    pub hold_frames: u32,
    /// Display time of every frame.
    #[serde(default = "default_frame_delay_ms")]
    pub frame_delay_ms: u32,
    /// Output file.
    pub out: PathBuf,
}

fn default_frame_count() -> u32 {
    DEFAULT_FRAME_COUNT
}

fn default_hold_frames() -> u32 {
    DEFAULT_HOLD_FRAMES
}

fn default_frame_delay_ms() -> u32 {
    DEFAULT_FRAME_DELAY_MS
}

impl AnimationDef {
    /// Parse an animation from JSON.
    pub fn from_reader<R: std::io::Read>(r: R) -> StrokecastResult<Self> {
        serde_json::from_reader(r)
            .map_err(|e| StrokecastError::serde(format!("parse animation JSON: {e}")))
    }

    /// Read and parse an animation JSON file.
    pub fn from_path(path: impl AsRef<Path>) -> StrokecastResult<Self> {
        let path = path.as_ref();
        let f = File::open(path).map_err(|e| {
            StrokecastError::validation(format!("open animation JSON '{}': {e}", path.display()))
        })?;
        Self::from_reader(BufReader::new(f))
    }

    /// Serialize back to indented JSON.
    pub fn to_json_pretty(&self) -> StrokecastResult<String> {
        serde_json::to_string_pretty(self).map_err(|e| StrokecastError::serde(e.to_string()))
    }

    /// The four stock animations: green circle, square and triangle plus a red cancel-mark,
    /// each on a 400x400 canvas with a 30 px stroke.
    pub fn reference_set(out_dir: impl AsRef<Path>) -> Vec<Self> {
        let out_dir = out_dir.as_ref();
        [
            (ShapeKind::Circle, 200.0, Rgba8::CONFIRM_GREEN),
            (ShapeKind::Square, 350.0, Rgba8::CONFIRM_GREEN),
            (ShapeKind::Triangle, 350.0, Rgba8::CONFIRM_GREEN),
            (ShapeKind::Cancel, 350.0, Rgba8::CANCEL_RED),
        ]
        .into_iter()
        .map(|(shape, size, color)| Self {
            canvas: Canvas {
                width: 400,
                height: 400,
            },
            shape,
            size,
            height: None,
            stroke: StrokeStyle { width: 30, color },
            frame_count: DEFAULT_FRAME_COUNT,
            hold_frames: DEFAULT_HOLD_FRAMES,
            frame_delay_ms: DEFAULT_FRAME_DELAY_MS,
            out: out_dir.join(format!("{}.gif", shape.name())),
        })
        .collect()
    }
}

/// Validated animation parameters with the shape geometry already computed.
///
/// Fully determines the frame sequence: the same spec always yields identical frames.
#[derive(Clone, Debug, PartialEq)]
pub struct AnimationSpec {
    /// Output surface size.
    pub canvas: Canvas,
    /// Shape the descriptor was built from.
    pub kind: ShapeKind,
    /// Precomputed geometry.
    pub shape: ShapeDescriptor,
    /// Stroke width and color.
    pub stroke: StrokeStyle,
    /// Progress steps, always > 0.
    pub frame_count: u32,
    /// Copies of the finished frame.
    pub hold_frames: u32,
    /// Display time of every frame, always > 0.
    pub frame_delay_ms: u32,
    /// Output file.
    pub out: PathBuf,
}

impl AnimationSpec {
    /// Validate `def` and compute the shape geometry.
    pub fn from_def(def: &AnimationDef) -> StrokecastResult<Self> {
        def.canvas.validate()?;
        def.stroke.validate()?;
        if def.frame_count == 0 {
            return Err(StrokecastError::validation("frame_count must be > 0"));
        }
        if def.frame_delay_ms == 0 {
            return Err(StrokecastError::validation("frame_delay_ms must be > 0"));
        }
        if def.height.is_some() && def.shape != ShapeKind::Cancel {
            return Err(StrokecastError::validation(format!(
                "height only applies to the cancel shape, not {}",
                def.shape.name()
            )));
        }
        let shape = ShapeDescriptor::new(def.shape, def.canvas, def.size, def.height)?;
        if f64::from(def.stroke.width) >= def.size {
            tracing::warn!(
                stroke = def.stroke.width,
                size = def.size,
                "stroke width exceeds shape size; output will overlap itself"
            );
        }

        Ok(Self {
            canvas: def.canvas,
            kind: def.shape,
            shape,
            stroke: def.stroke,
            frame_count: def.frame_count,
            hold_frames: def.hold_frames,
            frame_delay_ms: def.frame_delay_ms,
            out: def.out.clone(),
        })
    }

    /// Load and validate an animation JSON file.
    pub fn from_path(path: impl AsRef<Path>) -> StrokecastResult<Self> {
        Self::from_def(&AnimationDef::from_path(path)?)
    }

    /// Number of rasterized samples (`frame_count + 1`).
    pub fn sample_count(&self) -> u64 {
        u64::from(self.frame_count) + 1
    }

    /// Length of the emitted sequence, hold frames included.
    pub fn total_frames(&self) -> u64 {
        self.sample_count() + u64::from(self.hold_frames)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/config/animation.rs"]
mod tests;
