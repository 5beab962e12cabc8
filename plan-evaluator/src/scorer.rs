use crate::catalog::ReferenceCatalog;
use crate::graph_builder::AdjacencyGraph;
use crate::PlanError;
use std::collections::HashMap;

pub const SIZE_WEIGHT: f64 = 0.5;
pub const ADJACENCY_WEIGHT: f64 = 0.5;

/// Linear closeness of a candidate area to the ideal one, normalized by the
/// ideal size and floored at 0 once the deviation reaches 100%.
pub fn score_room_size(ideal_size: f64, candidate_size: f64) -> f64 {
    (1.0 - (ideal_size - candidate_size).abs() / ideal_size).max(0.0)
}

/// Mean room-size score over every catalog room.
///
/// Candidate rooms outside the catalog are ignored. A catalog room without a
/// candidate size is an error rather than a default.
pub fn size_score(
    catalog: &ReferenceCatalog<'_>,
    candidate_sizes: &HashMap<String, f64>,
) -> Result<f64, PlanError> {
    let rooms = catalog.rooms();
    if rooms.is_empty() {
        return Ok(0.0);
    }

    let mut total = 0.0;
    for room in rooms {
        let candidate = candidate_sizes
            .get(room.name)
            .ok_or_else(|| PlanError::MissingCandidateSize(room.name.to_string()))?;
        total += score_room_size(room.size, *candidate);
    }

    Ok(total / rooms.len() as f64)
}

/// Fraction of ideal edges also present in the candidate (0 when the ideal
/// has no edges)
pub fn score_adjacency(ideal: &AdjacencyGraph, candidate: &AdjacencyGraph) -> f64 {
    let total = ideal.edge_count();
    if total == 0 {
        return 0.0;
    }

    let matched = ideal
        .edges()
        .filter(|(a, b)| candidate.has_edge(a, b))
        .count();

    matched as f64 / total as f64
}

pub fn final_score(size_score: f64, adjacency_score: f64) -> f64 {
    SIZE_WEIGHT * size_score + ADJACENCY_WEIGHT * adjacency_score
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::IdealRoom;
    use crate::graph_builder::build_graph;

    const EPSILON: f64 = 1e-12;

    #[test]
    fn test_room_size_exact_match() {
        assert_eq!(score_room_size(10.0, 10.0), 1.0);
    }

    #[test]
    fn test_room_size_linear_penalty() {
        assert!((score_room_size(10.0, 15.0) - 0.5).abs() < EPSILON);
        assert!((score_room_size(10.0, 5.0) - 0.5).abs() < EPSILON);
    }

    #[test]
    fn test_room_size_floors_at_zero() {
        assert_eq!(score_room_size(10.0, 20.0), 0.0);
        assert_eq!(score_room_size(10.0, 0.0), 0.0);
        assert_eq!(score_room_size(10.0, 35.0), 0.0);
    }

    #[test]
    fn test_size_score_is_mean_over_catalog() {
        let rooms = [
            IdealRoom { name: "A", size: 10.0 },
            IdealRoom { name: "B", size: 10.0 },
        ];
        let catalog = ReferenceCatalog::new(&rooms, &[]);

        let mut sizes = HashMap::new();
        sizes.insert("A".to_string(), 10.0);
        sizes.insert("B".to_string(), 15.0);
        sizes.insert("Extra".to_string(), 100.0);

        let score = size_score(&catalog, &sizes).unwrap();
        assert!((score - 0.75).abs() < EPSILON);
    }

    #[test]
    fn test_size_score_fails_on_missing_room() {
        let catalog = ReferenceCatalog::standard();
        let mut sizes = catalog.default_candidate_sizes();
        sizes.remove("Dining");

        assert_eq!(
            size_score(&catalog, &sizes),
            Err(PlanError::MissingCandidateSize("Dining".to_string()))
        );
    }

    #[test]
    fn test_adjacency_half_matched() {
        let ideal = build_graph(["A", "B", "C"], "A, B\nB, C");
        let candidate = build_graph(["A", "B", "C"], "B, A");

        assert_eq!(score_adjacency(&ideal, &candidate), 0.5);
    }

    #[test]
    fn test_adjacency_with_empty_ideal_is_zero() {
        let ideal = build_graph(["A", "B"], "");
        let candidate = build_graph(["A", "B"], "A, B");

        assert_eq!(score_adjacency(&ideal, &candidate), 0.0);
    }

    #[test]
    fn test_extra_candidate_edges_do_not_count() {
        let ideal = build_graph(["A", "B", "C"], "A, B");
        let candidate = build_graph(["A", "B", "C"], "A, B\nA, C\nB, C");

        assert_eq!(score_adjacency(&ideal, &candidate), 1.0);
    }

    #[test]
    fn test_final_score_is_midpoint() {
        assert!((final_score(1.0, 0.3) - 0.65).abs() < EPSILON);
        assert_eq!(final_score(0.0, 0.0), 0.0);
        assert_eq!(final_score(1.0, 1.0), 1.0);
    }
}
