use std::{
    fs::File,
    io::{BufWriter, Write},
    path::{Path, PathBuf},
    sync::{Arc, Mutex},
};

use image::codecs::gif::{GifEncoder, Repeat};

use crate::{
    encode::sink::{FrameSink, SinkConfig},
    foundation::error::{StrokecastError, StrokecastResult},
    render::frame::FrameRGBA,
};

/// NeuQuant speed passed to the GIF encoder (1 = slowest, 30 = fastest).
const QUANTIZE_SPEED: i32 = 10;

/// Options for [`GifSink`].
#[derive(Debug, Clone)]
pub struct GifSinkOpts {
    /// Output GIF path.
    pub out_path: PathBuf,
    /// Overwrite an existing file at `out_path`.
    pub overwrite: bool,
}

/// Writes frames as an infinitely looping GIF.
///
/// Pixels with zero alpha (the frame background) become the GIF's transparent color.
pub struct GifSink {
    opts: GifSinkOpts,
    cfg: Option<SinkConfig>,
    file: Option<BufWriter<File>>,
    encoder: Option<GifEncoder<SharedBuf>>,
    buf: SharedBuf,
    frames_written: u64,
}

/// Encoder output buffer that stays reachable after the encoder is dropped.
///
/// The GIF trailer is only written on drop, so the bytes are collected here and copied to
/// the file in `end`, where write errors can still be reported.
#[derive(Clone, Default)]
struct SharedBuf(Arc<Mutex<Vec<u8>>>);

impl SharedBuf {
    fn take(&self) -> StrokecastResult<Vec<u8>> {
        let mut guard = self
            .0
            .lock()
            .map_err(|_| StrokecastError::encode("gif buffer lock poisoned"))?;
        Ok(std::mem::take(&mut *guard))
    }
}

impl Write for SharedBuf {
    fn write(&mut self, data: &[u8]) -> std::io::Result<usize> {
        let mut guard = self
            .0
            .lock()
            .map_err(|_| std::io::Error::other("gif buffer lock poisoned"))?;
        guard.extend_from_slice(data);
        Ok(data.len())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        Ok(())
    }
}

impl GifSink {
    /// Create a sink; nothing touches the filesystem until `begin`.
    pub fn new(opts: GifSinkOpts) -> Self {
        Self {
            opts,
            cfg: None,
            file: None,
            encoder: None,
            buf: SharedBuf::default(),
            frames_written: 0,
        }
    }

    /// Frames encoded since the last `begin`.
    pub fn frames_written(&self) -> u64 {
        self.frames_written
    }
}

/// Create the parent directory of `path` if it does not exist yet.
pub fn ensure_parent_dir(path: &Path) -> StrokecastResult<()> {
    if let Some(parent) = path.parent() {
        use anyhow::Context as _;
        std::fs::create_dir_all(parent)
            .with_context(|| format!("failed to create output directory '{}'", parent.display()))?;
    }
    Ok(())
}

impl FrameSink for GifSink {
    #[tracing::instrument(skip(self), fields(out = %self.opts.out_path.display()))]
    fn begin(&mut self, cfg: SinkConfig) -> StrokecastResult<()> {
        if cfg.width == 0 || cfg.height == 0 {
            return Err(StrokecastError::validation(
                "gif width/height must be non-zero",
            ));
        }
        if cfg.width > u32::from(u16::MAX) || cfg.height > u32::from(u16::MAX) {
            return Err(StrokecastError::validation(
                "gif width/height must fit in 16 bits",
            ));
        }
        if !self.opts.overwrite && self.opts.out_path.exists() {
            return Err(StrokecastError::validation(format!(
                "output file '{}' already exists",
                self.opts.out_path.display()
            )));
        }
        ensure_parent_dir(&self.opts.out_path)?;

        let file = File::create(&self.opts.out_path).map_err(|e| {
            StrokecastError::encode(format!(
                "create '{}': {e}",
                self.opts.out_path.display()
            ))
        })?;
        self.buf = SharedBuf::default();
        let mut encoder = GifEncoder::new_with_speed(self.buf.clone(), QUANTIZE_SPEED);
        encoder
            .set_repeat(Repeat::Infinite)
            .map_err(|e| StrokecastError::encode(format!("set gif repeat: {e}")))?;

        self.file = Some(BufWriter::new(file));
        self.encoder = Some(encoder);
        self.cfg = Some(cfg);
        self.frames_written = 0;
        Ok(())
    }

    fn push_frame(&mut self, idx: u64, frame: &FrameRGBA) -> StrokecastResult<()> {
        let cfg = self
            .cfg
            .ok_or_else(|| StrokecastError::encode("push_frame called before begin"))?;
        cfg.check_frame(frame)?;
        let encoder = self
            .encoder
            .as_mut()
            .ok_or_else(|| StrokecastError::encode("gif encoder already finished"))?;

        let delay = image::Delay::from_numer_denom_ms(cfg.frame_delay_ms, 1);
        let gif_frame = image::Frame::from_parts(frame.to_rgba_image()?, 0, 0, delay);
        encoder
            .encode_frame(gif_frame)
            .map_err(|e| StrokecastError::encode(format!("encode gif frame {idx}: {e}")))?;
        self.frames_written += 1;
        Ok(())
    }

    fn end(&mut self) -> StrokecastResult<()> {
        let encoder = self
            .encoder
            .take()
            .ok_or_else(|| StrokecastError::encode("end called before begin"))?;
        // Dropping the encoder writes the trailer into the buffer.
        drop(encoder);
        let mut file = self
            .file
            .take()
            .ok_or_else(|| StrokecastError::encode("gif output file missing"))?;
        let bytes = self.buf.take()?;
        let out = self.opts.out_path.display();
        file.write_all(&bytes)
            .map_err(|e| StrokecastError::encode(format!("write '{out}': {e}")))?;
        file.flush()
            .map_err(|e| StrokecastError::encode(format!("flush '{out}': {e}")))?;
        tracing::debug!(
            frames = self.frames_written,
            out = %self.opts.out_path.display(),
            "gif written"
        );
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/encode/gif.rs"]
mod tests;
