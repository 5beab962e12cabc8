use crate::graph_builder::AdjacencyGraph;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Visual weight of a node that has no size entry
pub const DEFAULT_VISUAL_WEIGHT: f64 = 10.0;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ViewNode {
    pub id: String,
    pub label: String,
    /// Visual weight, the room area in m²
    pub value: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ViewEdge {
    pub from: String,
    pub to: String,
}

/// Renderer-agnostic view of an adjacency graph
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GraphView {
    pub nodes: Vec<ViewNode>,
    pub edges: Vec<ViewEdge>,
}

impl GraphView {
    pub fn from_graph(graph: &AdjacencyGraph, sizes: &HashMap<String, f64>) -> Self {
        let nodes = graph
            .rooms()
            .map(|room| ViewNode {
                id: room.to_string(),
                label: room.to_string(),
                value: sizes.get(room).copied().unwrap_or(DEFAULT_VISUAL_WEIGHT),
            })
            .collect();

        let edges = graph
            .edges()
            .map(|(from, to)| ViewEdge {
                from: from.to_string(),
                to: to.to_string(),
            })
            .collect();

        Self { nodes, edges }
    }

    pub fn node(&self, id: &str) -> Option<&ViewNode> {
        self.nodes.iter().find(|node| node.id == id)
    }

    /// Largest visual weight, used to normalize node radii
    pub fn max_value(&self) -> f64 {
        self.nodes
            .iter()
            .map(|node| node.value)
            .fold(0.0, f64::max)
    }

    /// Self-contained vis-network page; vis scales node circles by `value`
    pub fn to_html(&self, title: &str) -> String {
        let nodes = script_json(&self.nodes);
        let edges = script_json(&self.edges);

        format!(
            r#"<!DOCTYPE html>
<html>
<head>
<meta charset="utf-8">
<title>{title}</title>
<script src="https://unpkg.com/vis-network/standalone/umd/vis-network.min.js"></script>
<style>
  body {{ margin: 0; background: #ffffff; color: black; font-family: sans-serif; }}
  #graph {{ width: 100%; height: 500px; }}
</style>
</head>
<body>
<h3>{title}</h3>
<div id="graph"></div>
<script>
  var nodes = new vis.DataSet({nodes});
  var edges = new vis.DataSet({edges});
  new vis.Network(document.getElementById("graph"), {{ nodes: nodes, edges: edges }}, {{
    nodes: {{ shape: "dot", scaling: {{ min: 10, max: 40 }} }}
  }});
</script>
</body>
</html>
"#,
            title = escape_html(title),
            nodes = nodes,
            edges = edges,
        )
    }
}

/// JSON that is safe inside an inline `<script>`: room names come from user
/// text, so `<`, `>` and `&` are written as unicode escapes.
fn script_json<T: Serialize>(value: &T) -> String {
    serde_json::to_string(value)
        .unwrap_or_else(|_| "[]".to_string())
        .replace('<', "\\u003c")
        .replace('>', "\\u003e")
        .replace('&', "\\u0026")
}

fn escape_html(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}
