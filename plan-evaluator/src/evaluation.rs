use crate::advisor::{suggest_improvements, Suggestion};
use crate::catalog::ReferenceCatalog;
use crate::graph_builder::{build_graph, AdjacencyGraph};
use crate::render::GraphView;
use crate::scorer::{final_score, score_adjacency, size_score};
use crate::PlanError;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tracing::info;

/// Result of one evaluation run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreReport {
    pub size_score: f64,
    pub adjacency_score: f64,
    pub final_score: f64,
    pub suggestions: Vec<Suggestion>,
}

impl ScoreReport {
    pub fn suggestion_messages(&self) -> Vec<String> {
        self.suggestions.iter().map(ToString::to_string).collect()
    }

    /// No connectivity or size discrepancy was found
    pub fn matches_ideal(&self) -> bool {
        self.suggestions.is_empty()
    }
}

/// A report together with the two graphs it was computed from
#[derive(Debug, Clone)]
pub struct Evaluation {
    pub report: ScoreReport,
    pub ideal_graph: AdjacencyGraph,
    pub candidate_graph: AdjacencyGraph,
}

impl Evaluation {
    pub fn ideal_view(&self, catalog: &ReferenceCatalog<'_>) -> GraphView {
        GraphView::from_graph(&self.ideal_graph, &catalog.ideal_sizes())
    }

    pub fn candidate_view(&self, candidate_sizes: &HashMap<String, f64>) -> GraphView {
        GraphView::from_graph(&self.candidate_graph, candidate_sizes)
    }
}

/// Run one build, score and advise cycle.
///
/// The candidate graph shares the catalog's room set; adjacency lines that do
/// not parse are skipped. Fails only when a catalog room has no candidate size.
pub fn evaluate(
    catalog: &ReferenceCatalog<'_>,
    candidate_sizes: &HashMap<String, f64>,
    adjacency_text: &str,
) -> Result<Evaluation, PlanError> {
    let ideal_graph = catalog.ideal_graph();
    let candidate_graph = build_graph(catalog.room_names(), adjacency_text);

    let size_score = size_score(catalog, candidate_sizes)?;
    let adjacency_score = score_adjacency(&ideal_graph, &candidate_graph);
    let final_score = final_score(size_score, adjacency_score);

    let suggestions = suggest_improvements(
        &ideal_graph,
        &candidate_graph,
        catalog.rooms(),
        candidate_sizes,
    );

    info!(
        "Evaluated plan: final {:.2}, size {:.2}, adjacency {:.2}, {} suggestions",
        final_score,
        size_score,
        adjacency_score,
        suggestions.len()
    );

    Ok(Evaluation {
        report: ScoreReport {
            size_score,
            adjacency_score,
            final_score,
            suggestions,
        },
        ideal_graph,
        candidate_graph,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{DEFAULT_ADJACENCY_TEXT, IDEAL_EDGES};

    fn ideal_adjacency_text() -> String {
        IDEAL_EDGES
            .iter()
            .map(|(a, b)| format!("{}, {}", a, b))
            .collect::<Vec<_>>()
            .join("\n")
    }

    #[test]
    fn test_exact_plan_scores_one() {
        let catalog = ReferenceCatalog::standard();
        let sizes = catalog.default_candidate_sizes();

        let evaluation = evaluate(&catalog, &sizes, &ideal_adjacency_text()).unwrap();
        let report = evaluation.report;

        assert_eq!(report.size_score, 1.0);
        assert_eq!(report.adjacency_score, 1.0);
        assert_eq!(report.final_score, 1.0);
        assert!(report.suggestions.is_empty());
        assert!(report.matches_ideal());
    }

    #[test]
    fn test_reversed_pairs_still_match() {
        let catalog = ReferenceCatalog::standard();
        let sizes = catalog.default_candidate_sizes();
        let reversed = IDEAL_EDGES
            .iter()
            .map(|(a, b)| format!("{},{}", b, a))
            .collect::<Vec<_>>()
            .join("\n");

        let report = evaluate(&catalog, &sizes, &reversed).unwrap().report;

        assert_eq!(report.adjacency_score, 1.0);
    }

    #[test]
    fn test_default_form_state() {
        let catalog = ReferenceCatalog::standard();
        let sizes = catalog.default_candidate_sizes();

        let report = evaluate(&catalog, &sizes, DEFAULT_ADJACENCY_TEXT)
            .unwrap()
            .report;

        assert_eq!(report.size_score, 1.0);
        assert!((report.adjacency_score - 0.3).abs() < 1e-12);
        assert!((report.final_score - 0.65).abs() < 1e-12);

        let messages = report.suggestion_messages();
        assert_eq!(
            messages,
            vec![
                "Add connection between Dining and Toilet1.",
                "Add connection between Living and Bedroom1.",
                "Add connection between Bedroom1 and Bath1.",
                "Add connection between Living and Bedroom2.",
                "Add connection between Bedroom2 and Toilet1.",
                "Add connection between Living and Bedroom3.",
                "Add connection between Bedroom3 and Toilet1.",
            ]
        );
    }

    #[test]
    fn test_final_score_is_weighted_midpoint() {
        let catalog = ReferenceCatalog::standard();
        let mut sizes = catalog.default_candidate_sizes();
        sizes.insert("Living".to_string(), 40.0);
        sizes.insert("Store".to_string(), 1.0);

        let report = evaluate(&catalog, &sizes, "Living, Dining\nnonsense").unwrap().report;

        let expected = 0.5 * report.size_score + 0.5 * report.adjacency_score;
        assert!((report.final_score - expected).abs() < f64::EPSILON);
        assert!(report.size_score < 1.0);
        assert_eq!(report.adjacency_score, 0.1);
    }

    #[test]
    fn test_size_suggestions_follow_catalog_order() {
        let catalog = ReferenceCatalog::standard();
        let mut sizes = catalog.default_candidate_sizes();
        sizes.insert("Bedroom3".to_string(), 15.0);
        sizes.insert("Living".to_string(), 10.0);

        let report = evaluate(&catalog, &sizes, &ideal_adjacency_text())
            .unwrap()
            .report;

        assert_eq!(
            report.suggestion_messages(),
            vec![
                "Increase size of Living (currently 10.0 m²).",
                "Reduce size of Bedroom3 (currently 15.0 m²).",
            ]
        );
    }

    #[test]
    fn test_missing_size_fails_fast() {
        let catalog = ReferenceCatalog::standard();
        let mut sizes = catalog.default_candidate_sizes();
        sizes.remove("Kitchen");

        let err = evaluate(&catalog, &sizes, "").unwrap_err();

        assert_eq!(err, PlanError::MissingCandidateSize("Kitchen".to_string()));
    }

    #[test]
    fn test_views_cover_both_graphs() {
        let catalog = ReferenceCatalog::standard();
        let sizes = catalog.default_candidate_sizes();

        let evaluation = evaluate(&catalog, &sizes, DEFAULT_ADJACENCY_TEXT).unwrap();
        let ideal = evaluation.ideal_view(&catalog);
        let candidate = evaluation.candidate_view(&sizes);

        assert_eq!(ideal.nodes.len(), 9);
        assert_eq!(ideal.edges.len(), 10);
        assert_eq!(candidate.nodes.len(), 9);
        assert_eq!(candidate.edges.len(), 4);
        assert_eq!(ideal.node("Living").map(|n| n.value), Some(22.0));
    }
}
