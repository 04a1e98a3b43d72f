use crate::foundation::color::Rgba8;

/// Visual defaults fixed once per run, independent of highlight state.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Style {
    /// Fill of nodes not yet reached.
    pub base_fill: Rgba8,
    /// Fill of nodes reached at or before the frame's round.
    pub highlight_fill: Rgba8,
    /// Edge stroke color.
    pub edge_color: Rgba8,
    /// Edge stroke width in pixels.
    pub edge_width: f64,
    /// Canvas background. Alpha is ignored; frames are always opaque.
    pub background: Rgba8,
}

impl Default for Style {
    fn default() -> Self {
        Self {
            base_fill: Rgba8::rgb(0x5a, 0xa4, 0x69),
            highlight_fill: Rgba8::rgb(0xd3, 0x5d, 0x6e),
            edge_color: Rgba8::rgb(0, 0, 0),
            edge_width: 0.5,
            background: Rgba8::rgb(0xff, 0xff, 0xff),
        }
    }
}
