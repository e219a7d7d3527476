//! Strokecast renders short looping "being drawn" animations of simple shapes.
//!
//! A circle, square, triangle or cancel-mark is drawn stroke by stroke across an evenly spaced
//! set of progress samples, held on its finished state for a few frames, and handed to a
//! [`FrameSink`] (normally [`GifSink`]) as a looping animation.
//!
//! # Pipeline overview
//!
//! 1. **Configure**: `AnimationDef -> AnimationSpec` (validation, shape geometry computed once)
//! 2. **Map**: `ShapeDescriptor + Progress -> StrokeGeometry` (arc sweep or perimeter walk)
//! 3. **Rasterize**: `StrokeGeometry -> FrameRGBA` (CPU, `vello_cpu`, round caps as filled circles)
//! 4. **Sequence**: samples `0..=frame_count`, plus hold frames sharing the final frame
//! 5. **Encode**: stream the sequence into a sink (GIF with infinite loop and fixed delay)
//!
//! Everything up to encoding is deterministic: the same spec yields identical frames.
#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod config;
mod encode;
mod foundation;
mod render;
mod shape;

pub use config::animation::{
    AnimationDef, AnimationSpec, DEFAULT_FRAME_COUNT, DEFAULT_FRAME_DELAY_MS, DEFAULT_HOLD_FRAMES,
};
pub use encode::gif::{GifSink, GifSinkOpts, ensure_parent_dir};
pub use encode::sink::{FrameSink, InMemorySink, SinkConfig};
pub use foundation::core::{Canvas, Point, Progress, Rgba8, StrokeStyle, TRANSPARENT_KEY};
pub use foundation::error::{StrokecastError, StrokecastResult};
pub use render::cpu::{CpuRasterizer, blank_canvas};
pub use render::frame::FrameRGBA;
pub use render::pipeline::{
    FrameSequence, RenderStats, RenderThreading, generate_frames, generate_frames_with,
    render_frame, render_sample, render_to_gif, render_to_sink,
};
pub use shape::descriptor::{Segment, ShapeDescriptor, ShapeKind};
pub use shape::mapper::{ArcSweep, PathProgress, StrokeGeometry, map_progress, walk_perimeter};
