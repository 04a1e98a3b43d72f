use kurbo::Shape;

use crate::foundation::color::Rgba8;
use crate::foundation::core::{Canvas, Point};
use crate::foundation::error::{GossipError, GossipResult};
use crate::foundation::math::flatten_premul_over_bg;
use crate::layout::engine::LayoutGraph;
use crate::render::backend::RenderBackend;
use crate::render::frame::{FrameRGBA, HighlightSet};

const CIRCLE_TOLERANCE: f64 = 0.05;

/// CPU backend powered by `vello_cpu`.
///
/// Draws edges first as thin strokes, then one filled circle per node on top.
#[derive(Default)]
pub struct CpuBackend {
    ctx: Option<vello_cpu::RenderContext>,
}

impl CpuBackend {
    /// Create a backend. The render context is allocated lazily on first use.
    pub fn new() -> Self {
        Self::default()
    }

    fn with_ctx_mut<R>(
        &mut self,
        width: u16,
        height: u16,
        f: impl FnOnce(&mut vello_cpu::RenderContext) -> GossipResult<R>,
    ) -> GossipResult<R> {
        let mut ctx = match self.ctx.take() {
            Some(ctx) if ctx.width() == width && ctx.height() == height => ctx,
            _ => vello_cpu::RenderContext::new(width, height),
        };
        ctx.reset();
        let out = f(&mut ctx)?;
        self.ctx = Some(ctx);
        Ok(out)
    }
}

impl RenderBackend for CpuBackend {
    fn rasterize(
        &mut self,
        layout: &LayoutGraph,
        highlights: &HighlightSet,
    ) -> GossipResult<FrameRGBA> {
        let canvas = layout.canvas();
        let (width, height) = canvas_u16(canvas)?;
        let style = *layout.style();
        let positions = layout.positions();
        let radius = layout.node_radius();

        let premul = self.with_ctx_mut(width, height, |ctx| {
            ctx.set_transform(vello_cpu::kurbo::Affine::IDENTITY);
            ctx.set_paint(paint(Rgba8 {
                a: 255,
                ..style.background
            }));
            ctx.fill_rect(&vello_cpu::kurbo::Rect::new(
                0.0,
                0.0,
                f64::from(width),
                f64::from(height),
            ));

            if style.edge_width > 0.0 && !layout.edges().is_empty() {
                ctx.set_stroke(vello_cpu::kurbo::Stroke::new(style.edge_width));
                ctx.set_paint(paint(style.edge_color));
                for &(a, b) in layout.edges() {
                    ctx.stroke_path(&segment(positions[a], positions[b]));
                }
            }

            for (i, &center) in positions.iter().enumerate() {
                let fill = if highlights.is_highlighted(i) {
                    style.highlight_fill
                } else {
                    style.base_fill
                };
                ctx.set_paint(paint(fill));
                ctx.fill_path(&circle(center, radius));
            }

            ctx.flush();
            let mut pixmap = vello_cpu::Pixmap::new(width, height);
            ctx.render_to_pixmap(&mut pixmap);
            Ok(pixmap.data_as_u8_slice().to_vec())
        })?;

        let mut data = vec![0u8; canvas.rgba_len()];
        let bg = style.background;
        flatten_premul_over_bg(&mut data, &premul, [bg.r, bg.g, bg.b])?;
        FrameRGBA::from_parts(canvas, data)
    }
}

fn canvas_u16(canvas: Canvas) -> GossipResult<(u16, u16)> {
    let width: u16 = canvas
        .width
        .try_into()
        .map_err(|_| GossipError::render("canvas width exceeds u16"))?;
    let height: u16 = canvas
        .height
        .try_into()
        .map_err(|_| GossipError::render("canvas height exceeds u16"))?;
    Ok((width, height))
}

fn paint(c: Rgba8) -> vello_cpu::peniko::Color {
    vello_cpu::peniko::Color::from_rgba8(c.r, c.g, c.b, c.a)
}

fn segment(a: Point, b: Point) -> vello_cpu::kurbo::BezPath {
    let mut out = vello_cpu::kurbo::BezPath::new();
    out.move_to(vello_cpu::kurbo::Point::new(a.x, a.y));
    out.line_to(vello_cpu::kurbo::Point::new(b.x, b.y));
    out
}

fn circle(center: Point, radius: f64) -> vello_cpu::kurbo::BezPath {
    bezpath_to_cpu(&kurbo::Circle::new(center, radius).to_path(CIRCLE_TOLERANCE))
}

fn bezpath_to_cpu(path: &kurbo::BezPath) -> vello_cpu::kurbo::BezPath {
    use kurbo::PathEl;

    let mut out = vello_cpu::kurbo::BezPath::new();
    for &el in path.elements() {
        match el {
            PathEl::MoveTo(p) => out.move_to(vello_cpu::kurbo::Point::new(p.x, p.y)),
            PathEl::LineTo(p) => out.line_to(vello_cpu::kurbo::Point::new(p.x, p.y)),
            PathEl::QuadTo(p1, p2) => out.quad_to(
                vello_cpu::kurbo::Point::new(p1.x, p1.y),
                vello_cpu::kurbo::Point::new(p2.x, p2.y),
            ),
            PathEl::CurveTo(p1, p2, p3) => out.curve_to(
                vello_cpu::kurbo::Point::new(p1.x, p1.y),
                vello_cpu::kurbo::Point::new(p2.x, p2.y),
                vello_cpu::kurbo::Point::new(p3.x, p3.y),
            ),
            PathEl::ClosePath => out.close_path(),
        }
    }
    out
}

#[cfg(test)]
#[path = "../../tests/unit/render/cpu.rs"]
mod tests;
