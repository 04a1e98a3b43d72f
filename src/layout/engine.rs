use crate::foundation::core::{Canvas, Point, Rect, Vec2};
use crate::foundation::error::{GossipError, GossipResult};
use crate::graph::model::Graph;
use crate::layout::force::{ForceLayout, LayoutOpts, LayoutProvider};
use crate::layout::style::Style;

/// A graph with one fixed canvas position per node plus the run's visual defaults.
///
/// Built once per run and never mutated: there are no setters, so every frame rendered from the
/// same `LayoutGraph` sees identical positions and base styling.
#[derive(Clone, Debug)]
pub struct LayoutGraph {
    graph: Graph,
    positions: Vec<Point>,
    edges: Vec<(usize, usize)>,
    canvas: Canvas,
    node_radius: f64,
    style: Style,
}

impl LayoutGraph {
    /// Lay out `graph` with the built-in [`ForceLayout`].
    pub fn compute(graph: Graph, opts: &LayoutOpts, style: Style) -> GossipResult<Self> {
        Self::with_provider(graph, &ForceLayout::new(*opts), opts, style)
    }

    /// Lay out `graph` with any position source, then fit the result onto a canvas.
    #[tracing::instrument(skip_all, fields(nodes = graph.node_count()))]
    pub fn with_provider(
        graph: Graph,
        provider: &dyn LayoutProvider,
        opts: &LayoutOpts,
        style: Style,
    ) -> GossipResult<Self> {
        opts.validate()?;
        if !style.edge_width.is_finite() || style.edge_width < 0.0 {
            return Err(GossipError::render(format!(
                "edge width must be >= 0, got {}",
                style.edge_width
            )));
        }

        let raw = provider.compute_positions(&graph)?;
        if raw.len() != graph.node_count() {
            return Err(GossipError::render(format!(
                "layout returned {} positions for {} nodes",
                raw.len(),
                graph.node_count()
            )));
        }
        if raw.iter().any(|p| !p.x.is_finite() || !p.y.is_finite()) {
            return Err(GossipError::render("layout returned a non-finite position"));
        }

        let (positions, canvas) = fit_to_canvas(&raw, opts)?;
        let edges = graph.drawn_edges();
        tracing::debug!(
            width = canvas.width,
            height = canvas.height,
            edges = edges.len(),
            "layout fixed"
        );

        Ok(Self {
            graph,
            positions,
            edges,
            canvas,
            node_radius: opts.node_radius,
            style,
        })
    }

    /// The underlying graph.
    pub fn graph(&self) -> &Graph {
        &self.graph
    }

    /// Canvas position of every node, in node order.
    pub fn positions(&self) -> &[Point] {
        &self.positions
    }

    /// Canvas position of the node with `id`.
    pub fn position_of(&self, id: &str) -> Option<Point> {
        self.graph.index_of(id).map(|i| self.positions[i])
    }

    /// Endpoint pairs to draw, see [`Graph::drawn_edges`].
    pub fn edges(&self) -> &[(usize, usize)] {
        &self.edges
    }

    /// Output canvas size.
    pub fn canvas(&self) -> Canvas {
        self.canvas
    }

    /// Radius of every node marker.
    pub fn node_radius(&self) -> f64 {
        self.node_radius
    }

    /// Visual defaults.
    pub fn style(&self) -> &Style {
        &self.style
    }
}

fn fit_to_canvas(raw: &[Point], opts: &LayoutOpts) -> GossipResult<(Vec<Point>, Canvas)> {
    let mut bounds = Rect::from_points(raw[0], raw[0]);
    for p in &raw[1..] {
        bounds = bounds.union_pt(*p);
    }

    let pad = opts.node_radius + opts.margin;
    let max_span = f64::from(opts.max_side) - 2.0 * pad;
    let span = bounds.width().max(bounds.height());
    let scale = if span > max_span {
        tracing::warn!(span, max_span, "layout exceeds max_side, scaling positions down");
        max_span / span
    } else {
        1.0
    };

    let origin = Vec2::new(pad, pad);
    let positions = raw
        .iter()
        .map(|p| ((*p - bounds.origin()) * scale + origin).to_point())
        .collect();

    let width = (bounds.width() * scale + 2.0 * pad).ceil() as u32;
    let height = (bounds.height() * scale + 2.0 * pad).ceil() as u32;
    let canvas = Canvas::new(width.min(opts.max_side), height.min(opts.max_side))?;
    Ok((positions, canvas))
}

#[cfg(test)]
#[path = "../../tests/unit/layout/engine.rs"]
mod tests;
