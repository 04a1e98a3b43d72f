use crate::foundation::error::{GossipError, GossipResult};

pub use kurbo::{Point, Rect, Vec2};

/// Gossip round at which a message first reached a node.
///
/// Frames are indexed by the same type: frame `t` shows the state after round `t`.
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    serde::Serialize,
    serde::Deserialize,
)]
#[serde(transparent)]
pub struct Iteration(pub u32);

impl Iteration {
    /// All rounds from `0` up to and including `self`, ascending.
    pub fn up_to_inclusive(self) -> impl DoubleEndedIterator<Item = Iteration> {
        (0..=self.0).map(Iteration)
    }

    /// Number of frames needed to show every round up to `self`.
    pub fn frame_count(self) -> u64 {
        u64::from(self.0) + 1
    }
}

impl std::fmt::Display for Iteration {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Output canvas dimensions in pixels.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Canvas {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
}

impl Canvas {
    /// Create a canvas the rasterizer can address (both sides in `1..=u16::MAX`).
    pub fn new(width: u32, height: u32) -> GossipResult<Self> {
        if width == 0 || height == 0 {
            return Err(GossipError::render("canvas width/height must be non-zero"));
        }
        if width > u32::from(u16::MAX) || height > u32::from(u16::MAX) {
            return Err(GossipError::render(format!(
                "canvas {width}x{height} exceeds the {} px limit",
                u16::MAX
            )));
        }
        Ok(Self { width, height })
    }

    /// Bytes needed for one tightly packed RGBA8 frame.
    pub fn rgba_len(self) -> usize {
        (self.width as usize) * (self.height as usize) * 4
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
