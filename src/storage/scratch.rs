//! Scoped storage for intermediate frames.
//!
//! Every frame rendered during a run is written as a PNG into a private temporary directory
//! owned by a [`ScratchStore`]. The directory and everything in it is removed when the store is
//! released or dropped, so intermediates never outlive the run, whether it succeeds or aborts.

use std::fs::OpenOptions;
use std::path::{Path, PathBuf};

use crate::foundation::core::{Canvas, Iteration};
use crate::foundation::error::{GossipError, GossipResult};
use crate::render::frame::FrameRGBA;

/// Where the scratch directory is created.
#[derive(Clone, Debug, Default)]
pub struct ScratchOpts {
    /// Parent directory for the run's scratch directory. Defaults to the system temp dir.
    pub root: Option<PathBuf>,
}

/// Handle to one stored intermediate frame.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StoredFrame {
    iteration: Iteration,
    path: PathBuf,
}

impl StoredFrame {
    /// Round shown by the frame.
    pub fn iteration(&self) -> Iteration {
        self.iteration
    }

    /// Location of the PNG.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

/// Owner of every intermediate file of a run.
pub struct ScratchStore {
    dir: Option<tempfile::TempDir>,
    files: Vec<PathBuf>,
}

impl ScratchStore {
    /// Create a fresh, empty scratch directory.
    pub fn new(opts: &ScratchOpts) -> GossipResult<Self> {
        let root = opts.root.clone().unwrap_or_else(std::env::temp_dir);
        std::fs::create_dir_all(&root).map_err(|e| {
            GossipError::storage(format!("create scratch root '{}': {e}", root.display()))
        })?;
        let dir = tempfile::Builder::new()
            .prefix("gossip-viz-")
            .tempdir_in(&root)
            .map_err(|e| {
                GossipError::storage(format!(
                    "create scratch directory in '{}': {e}",
                    root.display()
                ))
            })?;
        tracing::debug!(dir = %dir.path().display(), "scratch directory created");
        Ok(Self {
            dir: Some(dir),
            files: Vec::new(),
        })
    }

    /// The scratch directory.
    pub fn dir(&self) -> &Path {
        match &self.dir {
            Some(d) => d.path(),
            None => Path::new(""),
        }
    }

    /// Paths of every file acquired so far.
    pub fn files(&self) -> &[PathBuf] {
        &self.files
    }

    /// Reserve a new, unique file for the frame of round `t`.
    ///
    /// The file is created empty; acquiring the same round twice fails.
    pub fn acquire(&mut self, t: Iteration) -> GossipResult<PathBuf> {
        let path = self.dir().join(format!("frame-{:06}.png", t.0));
        OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&path)
            .map_err(|e| GossipError::storage(format!("reserve '{}': {e}", path.display())))?;
        self.files.push(path.clone());
        Ok(path)
    }

    /// Write `frame` as a PNG into a newly acquired file.
    pub fn store_frame(&mut self, t: Iteration, frame: &FrameRGBA) -> GossipResult<StoredFrame> {
        let path = self.acquire(t)?;
        image::save_buffer_with_format(
            &path,
            &frame.data,
            frame.width,
            frame.height,
            image::ColorType::Rgba8,
            image::ImageFormat::Png,
        )
        .map_err(|e| GossipError::storage(format!("write png '{}': {e}", path.display())))?;
        Ok(StoredFrame { iteration: t, path })
    }

    /// Read a stored frame back into memory.
    pub fn load_frame(&self, frame: &StoredFrame) -> GossipResult<FrameRGBA> {
        let img = image::open(&frame.path)
            .map_err(|e| {
                GossipError::storage(format!("read png '{}': {e}", frame.path.display()))
            })?
            .into_rgba8();
        let canvas = Canvas::new(img.width(), img.height())?;
        FrameRGBA::from_parts(canvas, img.into_raw())
    }

    /// Delete every intermediate file and the directory itself.
    ///
    /// All deletions are attempted; the first failure is returned.
    pub fn release(mut self) -> GossipResult<()> {
        self.release_inner()
    }

    fn release_inner(&mut self) -> GossipResult<()> {
        let mut first_err = None;
        for path in self.files.drain(..) {
            match std::fs::remove_file(&path) {
                Ok(()) => {}
                Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
                Err(e) => {
                    first_err.get_or_insert_with(|| {
                        GossipError::storage(format!("delete '{}': {e}", path.display()))
                    });
                }
            }
        }
        if let Some(dir) = self.dir.take() {
            let shown = dir.path().display().to_string();
            if let Err(e) = dir.close() {
                first_err.get_or_insert_with(|| {
                    GossipError::storage(format!("delete scratch directory '{shown}': {e}"))
                });
            }
        }
        match first_err {
            Some(e) => Err(e),
            None => Ok(()),
        }
    }
}

impl Drop for ScratchStore {
    fn drop(&mut self) {
        if self.dir.is_none() {
            return;
        }
        if let Err(e) = self.release_inner() {
            tracing::warn!(error = %e, "scratch cleanup incomplete");
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/storage/scratch.rs"]
mod tests;
