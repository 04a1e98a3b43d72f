//! Node-link JSON loading.
//!
//! The accepted document is the node-link form written by the gossip simulator:
//!
//! ```json
//! {
//!   "directed": false,
//!   "nodes": [{ "id": "A", "iterations": 0 }, { "id": "B", "iterations": 1 }],
//!   "links": [{ "source": "A", "target": "B" }]
//! }
//! ```
//!
//! Ids may be strings or integers; integers are normalized to their decimal string.
//! Rounds above [`MAX_ITERATION`] are rejected, since every round up to the highest one becomes
//! a frame.

use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use serde::Deserialize;
use serde_json::{Map, Value};

use crate::foundation::error::{GossipError, GossipResult};
use crate::graph::model::{Graph, Link, Node};

/// Highest accepted `iterations` round.
pub const MAX_ITERATION: u32 = 10_000;

#[derive(Deserialize)]
struct NodeLinkDef {
    #[serde(default)]
    directed: bool,
    nodes: Vec<NodeDef>,
    #[serde(default, alias = "edges")]
    links: Vec<LinkDef>,
    #[serde(flatten)]
    extra: Map<String, Value>,
}

#[derive(Deserialize)]
struct NodeDef {
    #[serde(default)]
    id: Option<IdDef>,
    #[serde(default, alias = "iteration")]
    iterations: Option<u32>,
    #[serde(flatten)]
    attrs: Map<String, Value>,
}

#[derive(Deserialize)]
struct LinkDef {
    source: IdDef,
    target: IdDef,
    #[serde(flatten)]
    attrs: Map<String, Value>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum IdDef {
    Str(String),
    Int(i64),
}

impl IdDef {
    fn into_string(self) -> String {
        match self {
            IdDef::Str(s) => s,
            IdDef::Int(i) => i.to_string(),
        }
    }
}

/// Parse a node-link JSON document held in memory.
pub fn load_graph_str(json: &str) -> GossipResult<Graph> {
    let def: NodeLinkDef = serde_json::from_str(json)
        .map_err(|e| GossipError::malformed(format!("parse node-link JSON: {e}")))?;
    graph_from_def(def)
}

/// Parse a node-link JSON document from a reader.
pub fn load_graph_reader(reader: impl Read) -> GossipResult<Graph> {
    let def: NodeLinkDef = serde_json::from_reader(reader)
        .map_err(|e| GossipError::malformed(format!("parse node-link JSON: {e}")))?;
    graph_from_def(def)
}

/// Open and parse a node-link JSON file.
#[tracing::instrument]
pub fn load_graph_path(path: &Path) -> GossipResult<Graph> {
    let f = File::open(path)
        .map_err(|e| GossipError::malformed(format!("open graph '{}': {e}", path.display())))?;
    let graph = load_graph_reader(BufReader::new(f))?;
    tracing::debug!(
        nodes = graph.node_count(),
        edges = graph.edges().len(),
        max_iteration = graph.max_iteration().0,
        "loaded graph"
    );
    Ok(graph)
}

fn graph_from_def(def: NodeLinkDef) -> GossipResult<Graph> {
    if def.nodes.is_empty() {
        return Err(GossipError::EmptyGraph);
    }

    let mut nodes = Vec::with_capacity(def.nodes.len());
    for (i, n) in def.nodes.into_iter().enumerate() {
        let id = n
            .id
            .ok_or_else(|| GossipError::malformed(format!("node #{i} has no \"id\"")))?
            .into_string();
        let iteration = n.iterations.ok_or_else(|| {
            GossipError::malformed(format!("node \"{id}\" has no \"iterations\" round"))
        })?;
        if iteration > MAX_ITERATION {
            return Err(GossipError::malformed(format!(
                "node \"{id}\" round {iteration} exceeds the limit of {MAX_ITERATION}"
            )));
        }
        let mut node = Node::new(id, iteration);
        node.attrs = n.attrs;
        nodes.push(node);
    }

    let links = def
        .links
        .into_iter()
        .map(|l| Link {
            source: l.source.into_string(),
            target: l.target.into_string(),
            attrs: l.attrs,
        })
        .collect();

    Graph::new(nodes, links, def.directed, def.extra)
}

#[cfg(test)]
#[path = "../../tests/unit/graph/load.rs"]
mod tests;
