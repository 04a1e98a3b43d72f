use crate::foundation::error::GossipResult;
use crate::layout::engine::LayoutGraph;
use crate::render::frame::{FrameRGBA, HighlightSet};

/// A rasterizer turning a laid-out graph plus one frame's highlight set into pixels.
///
/// Implementations must read positions and base styling from the [`LayoutGraph`] only, and take
/// per-frame styling from `highlights` only; no state from a previous call may leak into the next.
pub trait RenderBackend {
    /// Draw one frame.
    fn rasterize(
        &mut self,
        layout: &LayoutGraph,
        highlights: &HighlightSet,
    ) -> GossipResult<FrameRGBA>;
}

/// Available backend kinds.
#[derive(Clone, Copy, Debug, Default)]
pub enum BackendKind {
    /// CPU raster backend powered by `vello_cpu`.
    #[default]
    Cpu,
}

/// Create a rendering backend implementation.
pub fn create_backend(kind: BackendKind) -> Box<dyn RenderBackend> {
    match kind {
        BackendKind::Cpu => Box::new(crate::render::cpu::CpuBackend::new()),
    }
}
