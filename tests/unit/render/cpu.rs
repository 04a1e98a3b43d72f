use super::*;
use crate::foundation::core::Iteration;
use crate::graph::model::{Graph, Link, Node};
use crate::layout::force::{LayoutOpts, LayoutProvider};
use crate::layout::style::Style;

struct Fixed(Vec<Point>);

impl LayoutProvider for Fixed {
    fn compute_positions(&self, _graph: &Graph) -> GossipResult<Vec<Point>> {
        Ok(self.0.clone())
    }
}

fn layout(style: Style) -> LayoutGraph {
    let graph = Graph::new(
        vec![Node::new("A", 0), Node::new("B", 1), Node::new("C", 1)],
        vec![Link::new("A", "B"), Link::new("A", "C")],
        false,
        Default::default(),
    )
    .unwrap();
    let provider = Fixed(vec![
        Point::new(0.0, 0.0),
        Point::new(80.0, 0.0),
        Point::new(0.0, 80.0),
    ]);
    LayoutGraph::with_provider(graph, &provider, &LayoutOpts::default(), style).unwrap()
}

fn center_pixel(frame: &FrameRGBA, p: Point) -> [u8; 4] {
    frame.pixel(p.x as u32, p.y as u32).unwrap()
}

fn close_to(px: [u8; 4], c: Rgba8) -> bool {
    let want = [c.r, c.g, c.b, 255];
    px.iter().zip(want).all(|(a, b)| a.abs_diff(b) <= 2)
}

#[test]
fn nodes_use_base_or_highlight_fill() {
    let style = Style::default();
    let lg = layout(style);
    let mut backend = CpuBackend::new();

    let f0 = backend
        .rasterize(&lg, &HighlightSet::cumulative(lg.graph(), Iteration(0)))
        .unwrap();
    assert_eq!((f0.width, f0.height), (lg.canvas().width, lg.canvas().height));
    assert!(close_to(center_pixel(&f0, lg.position_of("A").unwrap()), style.highlight_fill));
    assert!(close_to(center_pixel(&f0, lg.position_of("B").unwrap()), style.base_fill));
    assert!(close_to(center_pixel(&f0, lg.position_of("C").unwrap()), style.base_fill));

    let f1 = backend
        .rasterize(&lg, &HighlightSet::cumulative(lg.graph(), Iteration(1)))
        .unwrap();
    for id in ["A", "B", "C"] {
        assert!(close_to(center_pixel(&f1, lg.position_of(id).unwrap()), style.highlight_fill));
    }
}

#[test]
fn background_fills_empty_space_and_frames_are_opaque() {
    let style = Style::default();
    let lg = layout(style);
    let f = CpuBackend::new()
        .rasterize(&lg, &HighlightSet::cumulative(lg.graph(), Iteration(0)))
        .unwrap();
    assert!(close_to(f.pixel(0, 0).unwrap(), style.background));
    let far = (f.width - 1, f.height - 1);
    assert!(close_to(f.pixel(far.0, far.1).unwrap(), style.background));
    assert!(f.data.chunks_exact(4).all(|px| px[3] == 255));
}

#[test]
fn edges_are_stroked_between_nodes() {
    let style = Style {
        edge_width: 2.0,
        ..Style::default()
    };
    let lg = layout(style);
    let f = CpuBackend::new()
        .rasterize(&lg, &HighlightSet::cumulative(lg.graph(), Iteration(0)))
        .unwrap();
    let a = lg.position_of("A").unwrap();
    let b = lg.position_of("B").unwrap();
    let mid = a.midpoint(b);
    let px = f.pixel(mid.x as u32, mid.y as u32).unwrap();
    assert!(!close_to(px, style.background), "edge pixel {px:?}");
}

#[test]
fn previous_frames_leave_no_trace() {
    let lg = layout(Style::default());
    let mut reused = CpuBackend::new();
    let _ = reused
        .rasterize(&lg, &HighlightSet::cumulative(lg.graph(), Iteration(1)))
        .unwrap();
    let after = reused
        .rasterize(&lg, &HighlightSet::cumulative(lg.graph(), Iteration(0)))
        .unwrap();
    let fresh = CpuBackend::new()
        .rasterize(&lg, &HighlightSet::cumulative(lg.graph(), Iteration(0)))
        .unwrap();
    assert_eq!(after, fresh);
}
