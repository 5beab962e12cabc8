use crate::catalog::IdealRoom;
use crate::graph_builder::AdjacencyGraph;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

/// Relative size deviation above which a resize is suggested
pub const SIZE_TOLERANCE: f64 = 0.2;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Suggestion {
    AddConnection { from: String, to: String },
    IncreaseSize { room: String, current: f64 },
    ReduceSize { room: String, current: f64 },
}

impl fmt::Display for Suggestion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Suggestion::AddConnection { from, to } => {
                write!(f, "Add connection between {} and {}.", from, to)
            }
            Suggestion::IncreaseSize { room, current } => write!(
                f,
                "Increase size of {} (currently {} m²).",
                room,
                format_area(*current)
            ),
            Suggestion::ReduceSize { room, current } => write!(
                f,
                "Reduce size of {} (currently {} m²).",
                room,
                format_area(*current)
            ),
        }
    }
}

/// Areas always carry a decimal point, so 8 prints as `8.0`
fn format_area(area: f64) -> String {
    format!("{:?}", area)
}

/// Diff a candidate layout against the ideal one.
///
/// Connectivity suggestions come first, one per ideal edge missing from the
/// candidate in ideal edge order. Size suggestions follow in catalog order for
/// rooms deviating by more than [`SIZE_TOLERANCE`]. Rooms with no candidate
/// size are not reported here.
pub fn suggest_improvements(
    ideal_graph: &AdjacencyGraph,
    candidate_graph: &AdjacencyGraph,
    ideal_sizes: &[IdealRoom],
    candidate_sizes: &HashMap<String, f64>,
) -> Vec<Suggestion> {
    let mut suggestions: Vec<Suggestion> = ideal_graph
        .edges()
        .filter(|(a, b)| !candidate_graph.has_edge(a, b))
        .map(|(a, b)| Suggestion::AddConnection {
            from: a.to_string(),
            to: b.to_string(),
        })
        .collect();

    for room in ideal_sizes {
        let Some(&current) = candidate_sizes.get(room.name) else {
            continue;
        };
        let size_diff = room.size - current;
        if size_diff.abs() / room.size <= SIZE_TOLERANCE {
            continue;
        }
        let room_name = room.name.to_string();
        suggestions.push(if size_diff > 0.0 {
            Suggestion::IncreaseSize {
                room: room_name,
                current,
            }
        } else {
            Suggestion::ReduceSize {
                room: room_name,
                current,
            }
        });
    }

    suggestions
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph_builder::build_graph;

    fn sizes(entries: &[(&str, f64)]) -> HashMap<String, f64> {
        entries
            .iter()
            .map(|(name, size)| (name.to_string(), *size))
            .collect()
    }

    #[test]
    fn test_missing_edge_suggested() {
        let ideal = build_graph(["A", "B", "C"], "A, B\nB, C");
        let candidate = build_graph(["A", "B", "C"], "A, B");

        let suggestions = suggest_improvements(&ideal, &candidate, &[], &HashMap::new());

        assert_eq!(
            suggestions,
            vec![Suggestion::AddConnection {
                from: "B".to_string(),
                to: "C".to_string(),
            }]
        );
        assert_eq!(suggestions[0].to_string(), "Add connection between B and C.");
    }

    #[test]
    fn test_size_tolerance_boundary() {
        let ideal = build_graph(["A"], "");
        let rooms = [IdealRoom { name: "A", size: 10.0 }];

        let at_boundary = suggest_improvements(&ideal, &ideal, &rooms, &sizes(&[("A", 8.0)]));
        assert!(at_boundary.is_empty());

        let too_small = suggest_improvements(&ideal, &ideal, &rooms, &sizes(&[("A", 7.9)]));
        assert_eq!(
            too_small,
            vec![Suggestion::IncreaseSize {
                room: "A".to_string(),
                current: 7.9,
            }]
        );
        assert_eq!(too_small[0].to_string(), "Increase size of A (currently 7.9 m²).");

        let too_large = suggest_improvements(&ideal, &ideal, &rooms, &sizes(&[("A", 12.1)]));
        assert_eq!(
            too_large,
            vec![Suggestion::ReduceSize {
                room: "A".to_string(),
                current: 12.1,
            }]
        );
    }

    #[test]
    fn test_whole_area_keeps_decimal_point() {
        let suggestion = Suggestion::ReduceSize {
            room: "Living".to_string(),
            current: 30.0,
        };
        assert_eq!(suggestion.to_string(), "Reduce size of Living (currently 30.0 m²).");
    }

    #[test]
    fn test_connectivity_before_size() {
        let ideal = build_graph(["A", "B"], "A, B");
        let candidate = build_graph(["A", "B"], "");
        let rooms = [
            IdealRoom { name: "A", size: 10.0 },
            IdealRoom { name: "B", size: 10.0 },
        ];

        let suggestions =
            suggest_improvements(&ideal, &candidate, &rooms, &sizes(&[("A", 2.0), ("B", 20.0)]));

        assert_eq!(suggestions.len(), 3);
        assert!(matches!(suggestions[0], Suggestion::AddConnection { .. }));
        assert!(matches!(suggestions[1], Suggestion::IncreaseSize { ref room, .. } if room == "A"));
        assert!(matches!(suggestions[2], Suggestion::ReduceSize { ref room, .. } if room == "B"));
    }

    #[test]
    fn test_room_without_candidate_size_is_skipped() {
        let ideal = build_graph(["A"], "");
        let rooms = [IdealRoom { name: "A", size: 10.0 }];

        assert!(suggest_improvements(&ideal, &ideal, &rooms, &HashMap::new()).is_empty());
    }

    #[test]
    fn test_serializes_with_kind_tag() {
        let suggestion = Suggestion::AddConnection {
            from: "Living".to_string(),
            to: "Dining".to_string(),
        };
        let json = serde_json::to_value(&suggestion).unwrap();

        assert_eq!(json["kind"], "add_connection");
        assert_eq!(json["from"], "Living");
    }
}
