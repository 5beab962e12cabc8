use crate::PlanError;
use petgraph::graph::{NodeIndex, UnGraph};
use petgraph::visit::EdgeRef;
use std::collections::HashMap;
use tracing::debug;

/// How adjacency lines that do not parse are treated
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ParseMode {
    /// Malformed lines contribute no edge and raise no error
    #[default]
    Lenient,
    /// The first malformed line is reported; blank lines are still skipped
    Strict,
}

/// Undirected room adjacency graph keyed by room name.
///
/// Edges are set-like: adding an existing pair (in either direction) or a
/// self-loop leaves the graph unchanged. Edge enumeration follows insertion
/// order.
#[derive(Debug, Clone, Default)]
pub struct AdjacencyGraph {
    graph: UnGraph<String, ()>,
    name_to_node: HashMap<String, NodeIndex>,
}

impl AdjacencyGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Get or create the node for a room name
    pub fn add_room(&mut self, name: &str) -> NodeIndex {
        if let Some(&node) = self.name_to_node.get(name) {
            return node;
        }
        let node = self.graph.add_node(name.to_string());
        self.name_to_node.insert(name.to_string(), node);
        node
    }

    /// Add an undirected edge, creating unknown rooms on the way.
    /// Returns false when the edge was a self-loop or already present.
    pub fn add_adjacency(&mut self, a: &str, b: &str) -> bool {
        if a == b {
            return false;
        }
        let node_a = self.add_room(a);
        let node_b = self.add_room(b);
        if self.graph.find_edge(node_a, node_b).is_some() {
            return false;
        }
        self.graph.add_edge(node_a, node_b, ());
        true
    }

    pub fn contains_room(&self, name: &str) -> bool {
        self.name_to_node.contains_key(name)
    }

    /// Direction-free membership test
    pub fn has_edge(&self, a: &str, b: &str) -> bool {
        match (self.name_to_node.get(a), self.name_to_node.get(b)) {
            (Some(&node_a), Some(&node_b)) => self.graph.find_edge(node_a, node_b).is_some(),
            _ => false,
        }
    }

    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    /// Room names in insertion order
    pub fn rooms(&self) -> impl Iterator<Item = &str> + '_ {
        self.graph.node_weights().map(String::as_str)
    }

    /// Edges in insertion order, endpoints as they were first given
    pub fn edges(&self) -> impl Iterator<Item = (&str, &str)> + '_ {
        self.graph.edge_references().map(move |edge| {
            (
                self.graph[edge.source()].as_str(),
                self.graph[edge.target()].as_str(),
            )
        })
    }
}

/// Build the adjacency graph from room names and free-form text, skipping
/// lines that do not parse.
pub fn build_graph<I, S>(room_names: I, adjacency_text: &str) -> AdjacencyGraph
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut graph = graph_with_rooms(room_names);
    for (line_number, line) in adjacency_text.lines().enumerate() {
        match parse_adjacency_line(line) {
            Some((a, b)) => {
                graph.add_adjacency(a, b);
            }
            None => debug!("Skipping adjacency line {}: {:?}", line_number + 1, line),
        }
    }
    graph
}

/// Build the adjacency graph under the given parse mode
///
/// # Arguments
/// * `room_names` - Rooms added as nodes even when no edge touches them
/// * `adjacency_text` - One `RoomA, RoomB` pair per line
/// * `mode` - Whether malformed lines are skipped or reported
///
/// # Returns
/// The graph, or the first malformed line (1-based) in strict mode
pub fn build_graph_with_mode<I, S>(
    room_names: I,
    adjacency_text: &str,
    mode: ParseMode,
) -> Result<AdjacencyGraph, PlanError>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    if mode == ParseMode::Lenient {
        return Ok(build_graph(room_names, adjacency_text));
    }

    let mut graph = graph_with_rooms(room_names);
    for (line_number, line) in adjacency_text.lines().enumerate() {
        if line.trim().is_empty() {
            continue;
        }
        let (a, b) = parse_adjacency_line(line).ok_or_else(|| PlanError::MalformedAdjacency {
            line_number: line_number + 1,
            line: line.to_string(),
        })?;
        graph.add_adjacency(a, b);
    }
    Ok(graph)
}

/// Build a graph from already-split pairs
pub fn build_graph_from_pairs<'p, I, S, P>(room_names: I, pairs: P) -> AdjacencyGraph
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
    P: IntoIterator<Item = (&'p str, &'p str)>,
{
    let mut graph = graph_with_rooms(room_names);
    for (a, b) in pairs {
        graph.add_adjacency(a, b);
    }
    graph
}

/// Parse a `RoomA, RoomB` line into two trimmed, non-empty names
pub fn parse_adjacency_line(line: &str) -> Option<(&str, &str)> {
    let mut parts = line.split(',');
    let a = parts.next()?.trim();
    let b = parts.next()?.trim();
    if parts.next().is_some() || a.is_empty() || b.is_empty() {
        return None;
    }
    Some((a, b))
}

fn graph_with_rooms<I, S>(room_names: I) -> AdjacencyGraph
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut graph = AdjacencyGraph::new();
    for name in room_names {
        graph.add_room(name.as_ref());
    }
    graph
}
