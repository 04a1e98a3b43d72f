use crate::foundation::core::{Canvas, Iteration};
use crate::foundation::error::{GossipError, GossipResult};
use crate::graph::model::Graph;

/// A rendered frame as opaque, straight-alpha RGBA8 pixels.
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
    /// Wrap raw pixels, checking the buffer length against the canvas.
    pub fn from_parts(canvas: Canvas, data: Vec<u8>) -> GossipResult<Self> {
        if data.len() != canvas.rgba_len() {
            return Err(GossipError::render(format!(
                "frame buffer holds {} bytes, expected {} for {}x{}",
                data.len(),
                canvas.rgba_len(),
                canvas.width,
                canvas.height
            )));
        }
        Ok(Self {
            width: canvas.width,
            height: canvas.height,
            data,
        })
    }

    /// Pixel at `(x, y)`, or `None` outside the frame.
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let i = ((y as usize) * (self.width as usize) + (x as usize)) * 4;
        let px = self.data.get(i..i + 4)?;
        Some([px[0], px[1], px[2], px[3]])
    }
}

/// Nodes shown highlighted in the frame for one round.
///
/// Computed from the immutable `iteration` of every node: a node reached in round `i` is
/// highlighted in frame `t` exactly when `i <= t`. Nothing carries over between frames.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HighlightSet {
    iteration: Iteration,
    mask: Vec<bool>,
}

impl HighlightSet {
    /// Nodes reached in any round up to and including `t`.
    pub fn cumulative(graph: &Graph, t: Iteration) -> Self {
        Self {
            iteration: t,
            mask: graph.nodes().iter().map(|n| n.iteration <= t).collect(),
        }
    }

    /// The frame's round.
    pub fn iteration(&self) -> Iteration {
        self.iteration
    }

    /// Whether the node at `index` is highlighted.
    pub fn is_highlighted(&self, index: usize) -> bool {
        self.mask.get(index).copied().unwrap_or(false)
    }

    /// Whether the node with `id` is highlighted.
    ///
    /// Asking about an id the graph does not contain is a [`GossipError::Render`].
    pub fn contains_id(&self, graph: &Graph, id: &str) -> GossipResult<bool> {
        let index = graph.index_of(id).ok_or_else(|| {
            GossipError::render(format!("cannot style unknown node id \"{id}\""))
        })?;
        Ok(self.is_highlighted(index))
    }

    /// Ids of highlighted nodes, in node order.
    pub fn ids<'g>(&'g self, graph: &'g Graph) -> impl Iterator<Item = &'g str> + 'g {
        graph
            .nodes()
            .iter()
            .zip(&self.mask)
            .filter(|(_, hit)| **hit)
            .map(|(n, _)| n.id.as_str())
    }

    /// Number of highlighted nodes.
    pub fn len(&self) -> usize {
        self.mask.iter().filter(|hit| **hit).count()
    }

    /// `true` when no node is highlighted.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/frame.rs"]
mod tests;
