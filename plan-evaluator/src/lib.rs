//! Scores a candidate floor plan against a fixed reference layout.
//!
//! A plan is a set of room areas plus room adjacencies. The size score is the
//! mean linear closeness of each room's area to its ideal, the adjacency score
//! is the fraction of ideal connections the candidate reproduces, and the final
//! score weighs both equally. The advisor turns the differences into
//! suggestions.

pub mod advisor;
pub mod catalog;
mod error;
pub mod evaluation;
pub mod graph_builder;
pub mod render;
pub mod scorer;

pub use advisor::{suggest_improvements, Suggestion, SIZE_TOLERANCE};
pub use catalog::{
    IdealRoom, ReferenceCatalog, DEFAULT_ADJACENCY_TEXT, IDEAL_EDGES, IDEAL_ROOMS, MIN_ROOM_SIZE,
};
pub use error::PlanError;
pub use evaluation::{evaluate, Evaluation, ScoreReport};
pub use graph_builder::{build_graph, build_graph_with_mode, AdjacencyGraph, ParseMode};
pub use render::{GraphView, ViewEdge, ViewNode, DEFAULT_VISUAL_WEIGHT};
pub use scorer::{final_score, score_adjacency, score_room_size, size_score};
