use super::*;
use crate::encode::sink::InMemorySink;
use crate::graph::model::{Link, Node};

fn scenario_one() -> Graph {
    Graph::new(
        vec![Node::new("A", 0), Node::new("B", 1), Node::new("C", 1)],
        vec![Link::new("A", "B"), Link::new("A", "C")],
        false,
        Default::default(),
    )
    .unwrap()
}

fn opts_in(root: &Path) -> VisualizeOpts {
    VisualizeOpts {
        scratch: ScratchOpts {
            root: Some(root.to_path_buf()),
        },
        ..VisualizeOpts::default()
    }
}

fn scratch_is_empty(root: &Path) -> bool {
    std::fs::read_dir(root).unwrap().next().is_none()
}

#[test]
fn default_delay_is_one_second() {
    assert_eq!(VisualizeOpts::default().frame_delay_ms, 1000);
}

#[test]
fn render_graph_emits_one_frame_per_round_in_order() {
    let root = tempfile::tempdir().unwrap();
    let mut sink = InMemorySink::new();
    let mut events = Vec::new();
    let stats = render_graph(scenario_one(), &opts_in(root.path()), &mut sink, &mut |e| {
        events.push(e.clone())
    })
    .unwrap();

    assert_eq!(stats.frames, 2);
    assert_eq!(stats.max_iteration, Iteration(1));
    assert!(sink.is_finished());
    let idx: Vec<_> = sink.frames().iter().map(|(t, _)| *t).collect();
    assert_eq!(idx, vec![Iteration(0), Iteration(1)]);
    for (_, f) in sink.frames() {
        assert_eq!((f.width, f.height), (stats.width, stats.height));
    }

    let stored: Vec<_> = events
        .iter()
        .filter_map(|e| match e {
            PipelineEvent::FrameStored { iteration, path } => Some((*iteration, path.clone())),
            PipelineEvent::AnimationWritten { .. } => None,
        })
        .collect();
    assert_eq!(stored.len(), 2);
    assert!(stored.iter().all(|(_, p)| !p.exists()));
    assert!(scratch_is_empty(root.path()));
}

#[test]
fn frames_differ_only_where_highlight_changes() {
    let root = tempfile::tempdir().unwrap();
    let mut sink = InMemorySink::new();
    render_graph(scenario_one(), &opts_in(root.path()), &mut sink, &mut |_| {}).unwrap();
    let frames = sink.frames();
    assert_ne!(frames[0].1, frames[1].1);
}

struct FailingSink;

impl FrameSink for FailingSink {
    fn begin(&mut self, _cfg: SinkConfig) -> GossipResult<()> {
        Ok(())
    }

    fn push_frame(&mut self, _idx: Iteration, _frame: &FrameRGBA) -> GossipResult<()> {
        Err(GossipError::encoding("sink refused frame"))
    }

    fn end(&mut self) -> GossipResult<()> {
        Ok(())
    }
}

#[test]
fn aborted_run_leaves_no_intermediates() {
    let root = tempfile::tempdir().unwrap();
    let err = render_graph(
        scenario_one(),
        &opts_in(root.path()),
        &mut FailingSink,
        &mut |_| {},
    )
    .unwrap_err();
    assert!(matches!(err, GossipError::Encoding(_)));
    assert!(scratch_is_empty(root.path()));
}

#[test]
fn zero_delay_fails_before_any_frame_is_stored() {
    let root = tempfile::tempdir().unwrap();
    let opts = VisualizeOpts {
        frame_delay_ms: 0,
        ..opts_in(root.path())
    };
    let mut events = 0;
    let err = render_graph(scenario_one(), &opts, &mut InMemorySink::new(), &mut |_| {
        events += 1
    })
    .unwrap_err();
    assert!(matches!(err, GossipError::Encoding(_)));
    assert_eq!(events, 0);
}

#[test]
fn encode_without_frames_is_an_encoding_error() {
    let root = tempfile::tempdir().unwrap();
    let scratch = ScratchStore::new(&ScratchOpts {
        root: Some(root.path().to_path_buf()),
    })
    .unwrap();
    let cfg = SinkConfig {
        canvas: crate::foundation::core::Canvas::new(4, 4).unwrap(),
        frame_delay_ms: 1000,
    };
    let err = encode_stored_frames(&scratch, &[], &mut InMemorySink::new(), cfg).unwrap_err();
    assert!(matches!(err, GossipError::Encoding(_)));
}

#[test]
fn unreadable_intermediate_is_an_encoding_error() {
    let root = tempfile::tempdir().unwrap();
    let mut scratch = ScratchStore::new(&ScratchOpts {
        root: Some(root.path().to_path_buf()),
    })
    .unwrap();
    let layout = LayoutGraph::compute(scenario_one(), &LayoutOpts::default(), Style::default())
        .unwrap();
    let mut backend = create_backend(BackendKind::Cpu);
    let stored =
        render_frames_to_scratch(&layout, backend.as_mut(), &mut scratch, &mut |_| {}).unwrap();
    std::fs::write(stored[1].path(), b"not a png").unwrap();

    let cfg = SinkConfig {
        canvas: layout.canvas(),
        frame_delay_ms: 1000,
    };
    let err =
        encode_stored_frames(&scratch, &stored, &mut InMemorySink::new(), cfg).unwrap_err();
    assert!(matches!(err, GossipError::Encoding(_)));
}
