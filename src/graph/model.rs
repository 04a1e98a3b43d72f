use std::collections::{BTreeSet, HashMap};

use serde_json::{Map, Value};

use crate::foundation::core::Iteration;
use crate::foundation::error::{GossipError, GossipResult};

/// A graph vertex: unique id plus the round at which it was reached.
#[derive(Clone, Debug, PartialEq)]
pub struct Node {
    /// Unique node id.
    pub id: String,
    /// Round at which the message first reached this node.
    pub iteration: Iteration,
    /// Extra attributes from the input, carried through untouched.
    pub attrs: Map<String, Value>,
}

impl Node {
    /// Node without extra attributes.
    pub fn new(id: impl Into<String>, iteration: u32) -> Self {
        Self {
            id: id.into(),
            iteration: Iteration(iteration),
            attrs: Map::new(),
        }
    }
}

/// A link between two node ids, as written in the input.
#[derive(Clone, Debug, PartialEq)]
pub struct Link {
    /// Source node id.
    pub source: String,
    /// Target node id.
    pub target: String,
    /// Extra attributes from the input, carried through untouched.
    pub attrs: Map<String, Value>,
}

impl Link {
    /// Link without extra attributes.
    pub fn new(source: impl Into<String>, target: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            target: target.into(),
            attrs: Map::new(),
        }
    }
}

/// A resolved edge: endpoints are indices into [`Graph::nodes`].
#[derive(Clone, Debug, PartialEq)]
pub struct Edge {
    /// Index of the source node.
    pub source: usize,
    /// Index of the target node.
    pub target: usize,
    /// Extra attributes from the input.
    pub attrs: Map<String, Value>,
}

/// Validated, non-empty graph.
///
/// Construction guarantees unique node ids and that every edge endpoint names an existing node.
/// Node order is the input order and is the order used by layout and rendering.
#[derive(Clone, Debug)]
pub struct Graph {
    nodes: Vec<Node>,
    edges: Vec<Edge>,
    directed: bool,
    metadata: Map<String, Value>,
    index: HashMap<String, usize>,
}

impl Graph {
    /// Validate nodes and links into a graph.
    ///
    /// Fails with [`GossipError::EmptyGraph`] when `nodes` is empty, and with
    /// [`GossipError::MalformedInput`] on duplicate ids or links to unknown ids.
    pub fn new(
        nodes: Vec<Node>,
        links: Vec<Link>,
        directed: bool,
        metadata: Map<String, Value>,
    ) -> GossipResult<Self> {
        if nodes.is_empty() {
            return Err(GossipError::EmptyGraph);
        }

        let mut index = HashMap::with_capacity(nodes.len());
        for (i, node) in nodes.iter().enumerate() {
            if index.insert(node.id.clone(), i).is_some() {
                return Err(GossipError::malformed(format!(
                    "duplicate node id \"{}\"",
                    node.id
                )));
            }
        }

        let mut edges = Vec::with_capacity(links.len());
        for (i, link) in links.into_iter().enumerate() {
            let resolve = |id: &str, end: &str| {
                index.get(id).copied().ok_or_else(|| {
                    GossipError::malformed(format!(
                        "link #{i} {end} references unknown node id \"{id}\""
                    ))
                })
            };
            let source = resolve(&link.source, "source")?;
            let target = resolve(&link.target, "target")?;
            edges.push(Edge {
                source,
                target,
                attrs: link.attrs,
            });
        }

        Ok(Self {
            nodes,
            edges,
            directed,
            metadata,
            index,
        })
    }

    /// Nodes in input order.
    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    /// Edges in input order, including duplicates and self-loops.
    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    /// Whether links are ordered pairs.
    pub fn is_directed(&self) -> bool {
        self.directed
    }

    /// Top-level fields of the input other than `directed`, `nodes` and `links`.
    pub fn metadata(&self) -> &Map<String, Value> {
        &self.metadata
    }

    /// Number of nodes (always at least one).
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Index of the node with `id`.
    pub fn index_of(&self, id: &str) -> Option<usize> {
        self.index.get(id).copied()
    }

    /// Node with `id`.
    pub fn node(&self, id: &str) -> Option<&Node> {
        self.index_of(id).map(|i| &self.nodes[i])
    }

    /// Highest round reached by any node.
    pub fn max_iteration(&self) -> Iteration {
        // Non-empty by construction.
        self.nodes
            .iter()
            .map(|n| n.iteration)
            .fold(Iteration(0), Iteration::max)
    }

    /// Distinct endpoint pairs to draw.
    ///
    /// Undirected graphs collapse `a-b` and `b-a` into one pair. Self-loops are skipped.
    pub fn drawn_edges(&self) -> Vec<(usize, usize)> {
        let mut seen = BTreeSet::new();
        let mut out = Vec::with_capacity(self.edges.len());
        for e in &self.edges {
            if e.source == e.target {
                continue;
            }
            let key = if self.directed {
                (e.source, e.target)
            } else {
                (e.source.min(e.target), e.source.max(e.target))
            };
            if seen.insert(key) {
                out.push((e.source, e.target));
            }
        }
        out
    }
}

#[cfg(test)]
#[path = "../../tests/unit/graph/model.rs"]
mod tests;
