use super::*;
use crate::graph::model::{Link, Node};

fn scenario() -> Graph {
    Graph::new(
        vec![Node::new("A", 0), Node::new("B", 1), Node::new("C", 1)],
        vec![Link::new("A", "B"), Link::new("A", "C")],
        false,
        Default::default(),
    )
    .unwrap()
}

#[test]
fn cumulative_sets_grow_by_round() {
    let g = scenario();
    let f0 = HighlightSet::cumulative(&g, Iteration(0));
    let f1 = HighlightSet::cumulative(&g, Iteration(1));
    assert_eq!(f0.ids(&g).collect::<Vec<_>>(), vec!["A"]);
    assert_eq!(f1.ids(&g).collect::<Vec<_>>(), vec!["A", "B", "C"]);
    assert_eq!(f1.len(), 3);
    assert_eq!(f1.iteration(), Iteration(1));
}

#[test]
fn highlight_iff_round_reached() {
    let g = Graph::new(
        (0..6).map(|i| Node::new(format!("n{i}"), (i * 7) % 5)).collect(),
        vec![],
        false,
        Default::default(),
    )
    .unwrap();
    for t in g.max_iteration().up_to_inclusive() {
        let set = HighlightSet::cumulative(&g, t);
        for (i, n) in g.nodes().iter().enumerate() {
            assert_eq!(set.is_highlighted(i), n.iteration <= t, "node {} frame {t}", n.id);
        }
    }
}

#[test]
fn sets_are_independent_of_evaluation_order() {
    let g = scenario();
    let forward: Vec<_> = (0..=1).map(|t| HighlightSet::cumulative(&g, Iteration(t))).collect();
    let mut backward: Vec<_> = (0..=1)
        .rev()
        .map(|t| HighlightSet::cumulative(&g, Iteration(t)))
        .collect();
    backward.reverse();
    assert_eq!(forward, backward);
}

#[test]
fn unknown_id_is_a_render_error() {
    let g = scenario();
    let set = HighlightSet::cumulative(&g, Iteration(0));
    assert!(set.contains_id(&g, "A").unwrap());
    assert!(!set.contains_id(&g, "B").unwrap());
    assert!(matches!(
        set.contains_id(&g, "Z"),
        Err(GossipError::Render(_))
    ));
}

#[test]
fn frame_buffer_length_is_checked() {
    let canvas = Canvas::new(2, 2).unwrap();
    assert!(FrameRGBA::from_parts(canvas, vec![0; 15]).is_err());
    let mut data = vec![0; 16];
    data[12..16].copy_from_slice(&[1, 2, 3, 255]);
    let f = FrameRGBA::from_parts(canvas, data).unwrap();
    assert_eq!(f.pixel(1, 1), Some([1, 2, 3, 255]));
    assert_eq!(f.pixel(2, 0), None);
}
