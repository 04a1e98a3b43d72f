//! gossip-viz renders the spread of a gossip message over a graph as a looping animated GIF.
//!
//! The pipeline is strictly sequential:
//!
//! - Load a node-link document into a [`Graph`] (every node carries the round it was reached in)
//! - Compute one fixed layout for the whole run ([`LayoutGraph`])
//! - Render one frame per round, highlighting every node reached so far
//! - Encode the frames, in round order, into a [`FrameSink`] such as [`GifSink`]
//!
//! Intermediate frames live in a [`ScratchStore`] that is emptied on every exit path.
#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod foundation;

pub(crate) mod encode;
pub(crate) mod graph;
pub(crate) mod layout;
pub(crate) mod probe;
pub(crate) mod render;
pub(crate) mod storage;

pub use crate::foundation::color::Rgba8;
pub use crate::foundation::core::{Canvas, Iteration, Point};
pub use crate::foundation::error::{GossipError, GossipResult};

pub use crate::graph::load::{MAX_ITERATION, load_graph_path, load_graph_reader, load_graph_str};
pub use crate::graph::model::{Edge, Graph, Link, Node};

pub use crate::layout::engine::LayoutGraph;
pub use crate::layout::force::{ForceLayout, LayoutOpts, LayoutProvider};
pub use crate::layout::style::Style;

pub use crate::render::backend::{BackendKind, RenderBackend, create_backend};
pub use crate::render::cpu::CpuBackend;
pub use crate::render::frame::{FrameRGBA, HighlightSet};
pub use crate::render::pipeline::{
    PipelineEvent, RenderStats, VisualizeOpts, encode_stored_frames, render_frame,
    render_frame_to_scratch, render_frames_to_scratch, render_graph, render_to_gif,
    visualize_path,
};

pub use crate::storage::scratch::{ScratchOpts, ScratchStore, StoredFrame};

pub use crate::encode::gif::{
    AnimationEncoder, FileSink, FileSinkOpts, GifAnimation, GifSink, write_atomically,
};
pub use crate::encode::sink::{
    FRAME_DELAY_STEP_MS, FrameSink, InMemorySink, MAX_FRAME_DELAY_MS, SinkConfig,
};

pub use crate::probe::{DEFAULT_PROBE_MESSAGE, ProbeOpts, ProbeReport, send_probes};
