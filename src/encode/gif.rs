use std::io::Write as _;
use std::path::{Path, PathBuf};

use image::codecs::gif::{GifEncoder, Repeat};

use crate::encode::sink::{FrameSink, SinkConfig, check_frame_delay};
use crate::foundation::core::Iteration;
use crate::foundation::error::{GossipError, GossipResult};
use crate::render::frame::FrameRGBA;

/// Turns an ordered frame list into the bytes of one animated image.
pub trait AnimationEncoder {
    /// Encode `frames` in order, each shown for `frame_delay_ms`, looping forever.
    ///
    /// Frames are consumed so their pixel buffers can be released as soon as each is encoded.
    fn encode(&self, frames: Vec<FrameRGBA>, frame_delay_ms: u32) -> GossipResult<Vec<u8>>;
}

/// Looping GIF encoder backed by the `image` crate.
#[derive(Clone, Copy, Debug)]
pub struct GifAnimation {
    /// Palette quantization speed, `1` (best) ..= `30` (fastest).
    pub speed: i32,
}

impl Default for GifAnimation {
    fn default() -> Self {
        Self { speed: 10 }
    }
}

impl AnimationEncoder for GifAnimation {
    fn encode(&self, frames: Vec<FrameRGBA>, frame_delay_ms: u32) -> GossipResult<Vec<u8>> {
        if frames.is_empty() {
            return Err(GossipError::encoding("no frames to encode"));
        }
        check_frame_delay(frame_delay_ms)?;
        if !(1..=30).contains(&self.speed) {
            return Err(GossipError::encoding(format!(
                "gif speed must be in 1..=30, got {}",
                self.speed
            )));
        }

        let mut out = Vec::new();
        {
            let mut enc = GifEncoder::new_with_speed(&mut out, self.speed);
            enc.set_repeat(Repeat::Infinite)
                .map_err(|e| GossipError::encoding(format!("set gif loop: {e}")))?;
            for (i, f) in frames.into_iter().enumerate() {
                let img = image::RgbaImage::from_raw(f.width, f.height, f.data)
                    .ok_or_else(|| {
                        GossipError::encoding(format!("frame {i} buffer does not match its size"))
                    })?;
                let delay = image::Delay::from_numer_denom_ms(frame_delay_ms, 1);
                enc.encode_frame(image::Frame::from_parts(img, 0, 0, delay))
                    .map_err(|e| GossipError::encoding(format!("encode frame {i}: {e}")))?;
            }
        }
        Ok(out)
    }
}

/// Options for [`FileSink`] output.
#[derive(Clone, Debug)]
pub struct FileSinkOpts {
    /// Output file path.
    pub out_path: PathBuf,
    /// Overwrite the output file if it already exists.
    pub overwrite: bool,
}

impl FileSinkOpts {
    /// Create options for writing to `out_path`.
    pub fn new(out_path: impl Into<PathBuf>) -> Self {
        Self {
            out_path: out_path.into(),
            overwrite: true,
        }
    }
}

/// Sink that buffers frames and writes one encoded animation file on `end`.
///
/// The file is written to a temporary sibling and renamed into place, so a failed run never
/// leaves a partial animation behind.
pub struct FileSink<E: AnimationEncoder> {
    encoder: E,
    opts: FileSinkOpts,
    cfg: Option<SinkConfig>,
    frames: Vec<FrameRGBA>,
    last_idx: Option<Iteration>,
}

/// [`FileSink`] producing a looping GIF.
pub type GifSink = FileSink<GifAnimation>;

impl GifSink {
    /// GIF sink with the default encoder settings.
    pub fn gif(opts: FileSinkOpts) -> Self {
        Self::new(GifAnimation::default(), opts)
    }
}

impl<E: AnimationEncoder> FileSink<E> {
    /// Create a sink writing `encoder`'s output to `opts.out_path`.
    pub fn new(encoder: E, opts: FileSinkOpts) -> Self {
        Self {
            encoder,
            opts,
            cfg: None,
            frames: Vec::new(),
            last_idx: None,
        }
    }

    /// Output path.
    pub fn out_path(&self) -> &Path {
        &self.opts.out_path
    }
}

impl<E: AnimationEncoder> FrameSink for FileSink<E> {
    fn begin(&mut self, cfg: SinkConfig) -> GossipResult<()> {
        cfg.validate()?;
        if !self.opts.overwrite && self.opts.out_path.exists() {
            return Err(GossipError::encoding(format!(
                "output file '{}' already exists",
                self.opts.out_path.display()
            )));
        }
        self.cfg = Some(cfg);
        self.frames.clear();
        self.last_idx = None;
        Ok(())
    }

    fn push_frame(&mut self, idx: Iteration, frame: &FrameRGBA) -> GossipResult<()> {
        let cfg = self
            .cfg
            .as_ref()
            .ok_or_else(|| GossipError::encoding("sink not started"))?;
        if let Some(last) = self.last_idx
            && idx <= last
        {
            return Err(GossipError::encoding(
                "sink received out-of-order frame index",
            ));
        }
        self.last_idx = Some(idx);

        if frame.width != cfg.canvas.width || frame.height != cfg.canvas.height {
            return Err(GossipError::encoding(format!(
                "frame size mismatch: got {}x{}, expected {}x{}",
                frame.width, frame.height, cfg.canvas.width, cfg.canvas.height
            )));
        }
        self.frames.push(frame.clone());
        Ok(())
    }

    fn end(&mut self) -> GossipResult<()> {
        let cfg = self
            .cfg
            .take()
            .ok_or_else(|| GossipError::encoding("sink not started"))?;
        let frames = std::mem::take(&mut self.frames);
        let frame_count = frames.len();
        let bytes = self.encoder.encode(frames, cfg.frame_delay_ms)?;
        write_atomically(&self.opts.out_path, &bytes, self.opts.overwrite)?;
        tracing::info!(
            path = %self.opts.out_path.display(),
            frames = frame_count,
            bytes = bytes.len(),
            "animation written"
        );
        Ok(())
    }
}

/// Write `bytes` to `path` through a temporary file in the same directory.
pub fn write_atomically(path: &Path, bytes: &[u8], overwrite: bool) -> GossipResult<()> {
    let dir = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };
    std::fs::create_dir_all(dir).map_err(|e| {
        GossipError::encoding(format!("create output directory '{}': {e}", dir.display()))
    })?;

    let mut tmp = tempfile::NamedTempFile::new_in(dir).map_err(|e| {
        GossipError::encoding(format!("create temporary output in '{}': {e}", dir.display()))
    })?;
    tmp.write_all(bytes)
        .and_then(|()| tmp.flush())
        .map_err(|e| GossipError::encoding(format!("write temporary output: {e}")))?;

    let persisted = if overwrite {
        tmp.persist(path).map(|_| ())
    } else {
        tmp.persist_noclobber(path).map(|_| ())
    };
    persisted.map_err(|e| {
        GossipError::encoding(format!("write output '{}': {}", path.display(), e.error))
    })
}

#[cfg(test)]
#[path = "../../tests/unit/encode/gif.rs"]
mod tests;
