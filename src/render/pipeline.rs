use std::sync::Arc;

use rayon::prelude::*;

use crate::{
    config::animation::AnimationSpec,
    encode::{
        gif::{GifSink, GifSinkOpts},
        sink::{FrameSink, SinkConfig},
    },
    foundation::{
        core::Progress,
        error::{StrokecastError, StrokecastResult},
    },
    render::{cpu::CpuRasterizer, frame::FrameRGBA},
    shape::mapper::map_progress,
};

/// Map + rasterize a single progress value.
pub fn render_frame(spec: &AnimationSpec, progress: Progress) -> StrokecastResult<FrameRGBA> {
    let rasterizer = CpuRasterizer::new(spec.canvas)?;
    let geometry = map_progress(&spec.shape, progress);
    rasterizer.render(&geometry, &spec.stroke)
}

/// Render sample `index` (`0..=frame_count`) of the sequence.
pub fn render_sample(spec: &AnimationSpec, index: u32) -> StrokecastResult<FrameRGBA> {
    render_frame(spec, Progress::sample(index, spec.frame_count)?)
}

/// Threading controls for multi-frame rendering.
#[derive(Clone, Debug, Default)]
pub struct RenderThreading {
    /// Rasterize samples on a rayon pool when `true`.
    pub parallel: bool,
    /// Worker thread override (parallel mode only).
    pub threads: Option<usize>,
}

/// Frame counts reported after a sequence is generated.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RenderStats {
    /// Frames in the emitted sequence.
    pub frames_total: u64,
    /// Frames actually rasterized (`frame_count + 1`).
    pub frames_rendered: u64,
    /// Hold frames sharing the last rasterized frame.
    pub frames_held: u64,
}

/// The complete, materialized frame sequence of one animation.
///
/// Hold frames share the final sampled frame rather than copying it.
#[derive(Clone, Debug)]
pub struct FrameSequence {
    frames: Vec<Arc<FrameRGBA>>,
    stats: RenderStats,
}

impl FrameSequence {
    /// Number of frames, hold frames included.
    pub fn len(&self) -> usize {
        self.frames.len()
    }

    /// `true` if the sequence has no frames.
    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    /// Shared frame handles in display order.
    pub fn frames(&self) -> &[Arc<FrameRGBA>] {
        &self.frames
    }

    /// Frames in display order.
    pub fn iter(&self) -> impl Iterator<Item = &FrameRGBA> {
        self.frames.iter().map(|f| f.as_ref())
    }

    /// Counts gathered while generating.
    pub fn stats(&self) -> RenderStats {
        self.stats
    }
}

/// Render every sample serially and append the hold frames.
pub fn generate_frames(spec: &AnimationSpec) -> StrokecastResult<FrameSequence> {
    generate_frames_with(spec, &RenderThreading::default())
}

/// Render every sample and append the hold frames.
///
/// The output order is always increasing progress, whatever the threading mode.
#[tracing::instrument(skip(spec), fields(shape = spec.kind.name(), samples = spec.sample_count()))]
pub fn generate_frames_with(
    spec: &AnimationSpec,
    threading: &RenderThreading,
) -> StrokecastResult<FrameSequence> {
    let rasterizer = CpuRasterizer::new(spec.canvas)?;
    let render_one = |i: u32| -> StrokecastResult<Arc<FrameRGBA>> {
        let progress = Progress::sample(i, spec.frame_count)?;
        let geometry = map_progress(&spec.shape, progress);
        let frame = rasterizer.render(&geometry, &spec.stroke)?;
        tracing::debug!(sample = i, progress = progress.get(), "rasterized frame");
        Ok(Arc::new(frame))
    };

    let mut frames: Vec<Arc<FrameRGBA>> = if threading.parallel {
        let pool = build_thread_pool(threading.threads)?;
        pool.install(|| {
            (0..=spec.frame_count)
                .into_par_iter()
                .map(render_one)
                .collect::<StrokecastResult<Vec<_>>>()
        })?
    } else {
        (0..=spec.frame_count)
            .map(render_one)
            .collect::<StrokecastResult<Vec<_>>>()?
    };

    let last = frames
        .last()
        .cloned()
        .ok_or_else(|| StrokecastError::validation("animation produced no frames"))?;
    let rendered = frames.len() as u64;
    frames.extend(std::iter::repeat_n(last, spec.hold_frames as usize));

    let stats = RenderStats {
        frames_total: frames.len() as u64,
        frames_rendered: rendered,
        frames_held: u64::from(spec.hold_frames),
    };
    Ok(FrameSequence { frames, stats })
}

/// Generate the sequence and stream it into `sink` in order.
#[tracing::instrument(skip(spec, sink), fields(shape = spec.kind.name()))]
pub fn render_to_sink(
    spec: &AnimationSpec,
    sink: &mut dyn FrameSink,
    threading: &RenderThreading,
) -> StrokecastResult<RenderStats> {
    let sequence = generate_frames_with(spec, threading)?;

    sink.begin(SinkConfig {
        width: spec.canvas.width,
        height: spec.canvas.height,
        frame_delay_ms: spec.frame_delay_ms,
    })?;
    for (i, frame) in sequence.iter().enumerate() {
        sink.push_frame(i as u64, frame)?;
    }
    sink.end()?;

    let stats = sequence.stats();
    tracing::info!(
        frames_total = stats.frames_total,
        frames_rendered = stats.frames_rendered,
        frames_held = stats.frames_held,
        "animation complete"
    );
    Ok(stats)
}

/// Render `spec` to a looping GIF described by `opts`.
pub fn render_to_gif(
    spec: &AnimationSpec,
    opts: &GifSinkOpts,
    threading: &RenderThreading,
) -> StrokecastResult<RenderStats> {
    let mut sink = GifSink::new(opts.clone());
    render_to_sink(spec, &mut sink, threading)
}

fn build_thread_pool(threads: Option<usize>) -> StrokecastResult<rayon::ThreadPool> {
    if let Some(n) = threads
        && n == 0
    {
        return Err(StrokecastError::validation(
            "render threading 'threads' must be >= 1 when set",
        ));
    }

    let mut builder = rayon::ThreadPoolBuilder::new();
    if let Some(n) = threads {
        builder = builder.num_threads(n);
    }
    builder.build().map_err(|e| {
        StrokecastError::validation(format!("failed to build rayon thread pool: {e}"))
    })
}
