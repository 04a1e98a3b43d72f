use std::path::{Path, PathBuf};

use crate::encode::gif::{FileSinkOpts, GifSink};
use crate::encode::sink::{FrameSink, SinkConfig};
use crate::foundation::core::Iteration;
use crate::foundation::error::{GossipError, GossipResult};
use crate::graph::load::load_graph_path;
use crate::graph::model::Graph;
use crate::layout::engine::LayoutGraph;
use crate::layout::force::LayoutOpts;
use crate::layout::style::Style;
use crate::render::backend::{BackendKind, RenderBackend, create_backend};
use crate::render::frame::{FrameRGBA, HighlightSet};
use crate::storage::scratch::{ScratchOpts, ScratchStore, StoredFrame};

/// Every knob of one visualization run.
#[derive(Clone, Debug)]
pub struct VisualizeOpts {
    /// Layout tuning.
    pub layout: LayoutOpts,
    /// Colors and stroke width.
    pub style: Style,
    /// How long each frame is shown, in milliseconds.
    pub frame_delay_ms: u32,
    /// Where intermediate frames are kept while the run is in progress.
    pub scratch: ScratchOpts,
}

impl Default for VisualizeOpts {
    fn default() -> Self {
        Self {
            layout: LayoutOpts::default(),
            style: Style::default(),
            frame_delay_ms: 1000,
            scratch: ScratchOpts::default(),
        }
    }
}

/// Progress notifications emitted while a run proceeds.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PipelineEvent {
    /// The frame for `iteration` was written to intermediate storage.
    FrameStored {
        /// Round shown by the frame.
        iteration: Iteration,
        /// Location of the intermediate file. Deleted before the run returns.
        path: PathBuf,
    },
    /// The final animation was persisted.
    AnimationWritten {
        /// Output path.
        path: PathBuf,
    },
}

/// Summary of a successful run.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RenderStats {
    /// Number of frames encoded, always `max_iteration + 1`.
    pub frames: u64,
    /// Canvas width in pixels.
    pub width: u32,
    /// Canvas height in pixels.
    pub height: u32,
    /// Highest round found in the graph.
    pub max_iteration: Iteration,
}

/// Draw the frame for round `t`.
///
/// The highlight set is recomputed from scratch, so frames can be produced in any order.
pub fn render_frame(
    layout: &LayoutGraph,
    t: Iteration,
    backend: &mut dyn RenderBackend,
) -> GossipResult<FrameRGBA> {
    let highlights = HighlightSet::cumulative(layout.graph(), t);
    backend.rasterize(layout, &highlights)
}

/// Draw the frame for round `t` and persist it in `scratch`.
pub fn render_frame_to_scratch(
    layout: &LayoutGraph,
    t: Iteration,
    backend: &mut dyn RenderBackend,
    scratch: &mut ScratchStore,
) -> GossipResult<StoredFrame> {
    let frame = render_frame(layout, t, backend)?;
    let stored = scratch.store_frame(t, &frame)?;
    tracing::debug!(iteration = %t, path = %stored.path().display(), "frame stored");
    Ok(stored)
}

/// Render one frame per round, `0..=max_iteration`, in ascending order.
#[tracing::instrument(skip_all, fields(nodes = layout.graph().node_count()))]
pub fn render_frames_to_scratch(
    layout: &LayoutGraph,
    backend: &mut dyn RenderBackend,
    scratch: &mut ScratchStore,
    on_event: &mut dyn FnMut(&PipelineEvent),
) -> GossipResult<Vec<StoredFrame>> {
    let mut stored = Vec::new();
    for t in layout.graph().max_iteration().up_to_inclusive() {
        let frame = render_frame_to_scratch(layout, t, backend, scratch)?;
        on_event(&PipelineEvent::FrameStored {
            iteration: t,
            path: frame.path().to_path_buf(),
        });
        stored.push(frame);
    }
    Ok(stored)
}

/// Read every stored frame back, in order, and feed it to `sink`.
///
/// A frame that cannot be read back is an encoding failure.
#[tracing::instrument(skip_all, fields(frames = stored.len()))]
pub fn encode_stored_frames(
    scratch: &ScratchStore,
    stored: &[StoredFrame],
    sink: &mut dyn FrameSink,
    cfg: SinkConfig,
) -> GossipResult<()> {
    if stored.is_empty() {
        return Err(GossipError::encoding("no frames to encode"));
    }
    sink.begin(cfg)?;
    for frame in stored {
        let pixels = scratch.load_frame(frame).map_err(|e| {
            GossipError::encoding(format!("read back frame {}: {e}", frame.iteration()))
        })?;
        sink.push_frame(frame.iteration(), &pixels)?;
    }
    sink.end()
}

/// Run the whole pipeline for an already loaded graph and hand the frames to `sink`.
///
/// Intermediates are removed before this returns, on success and on every error path.
#[tracing::instrument(skip_all, fields(nodes = graph.node_count()))]
pub fn render_graph(
    graph: Graph,
    opts: &VisualizeOpts,
    sink: &mut dyn FrameSink,
    on_event: &mut dyn FnMut(&PipelineEvent),
) -> GossipResult<RenderStats> {
    let max_iteration = graph.max_iteration();
    let layout = LayoutGraph::compute(graph, &opts.layout, opts.style)?;
    let canvas = layout.canvas();
    let cfg = SinkConfig {
        canvas,
        frame_delay_ms: opts.frame_delay_ms,
    };
    cfg.validate()?;

    let mut scratch = ScratchStore::new(&opts.scratch)?;
    let mut backend = create_backend(BackendKind::Cpu);
    let stored = render_frames_to_scratch(&layout, backend.as_mut(), &mut scratch, on_event)?;
    encode_stored_frames(&scratch, &stored, sink, cfg)?;
    scratch.release()?;

    Ok(RenderStats {
        frames: stored.len() as u64,
        width: canvas.width,
        height: canvas.height,
        max_iteration,
    })
}

/// Run the whole pipeline and write a looping GIF to `out`.
pub fn render_to_gif(
    graph: Graph,
    out: &Path,
    opts: &VisualizeOpts,
    on_event: &mut dyn FnMut(&PipelineEvent),
) -> GossipResult<RenderStats> {
    let mut sink = GifSink::gif(FileSinkOpts::new(out));
    let stats = render_graph(graph, opts, &mut sink, on_event)?;
    on_event(&PipelineEvent::AnimationWritten {
        path: out.to_path_buf(),
    });
    Ok(stats)
}

/// Load a node-link document from `json` and render it to `gif`.
pub fn visualize_path(
    json: &Path,
    gif: &Path,
    opts: &VisualizeOpts,
    on_event: &mut dyn FnMut(&PipelineEvent),
) -> GossipResult<RenderStats> {
    let graph = load_graph_path(json)?;
    render_to_gif(graph, gif, opts, on_event)
}

#[cfg(test)]
#[path = "../../tests/unit/render/pipeline.rs"]
mod tests;
