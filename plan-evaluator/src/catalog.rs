use crate::graph_builder::{build_graph_from_pairs, AdjacencyGraph};
use crate::PlanError;
use serde::Serialize;
use std::collections::HashMap;

/// Smallest room size the input form accepts (m²)
pub const MIN_ROOM_SIZE: f64 = 1.0;

/// Sample partial layout used to pre-populate the adjacency input
pub const DEFAULT_ADJACENCY_TEXT: &str = "Living, Dining\nDining, Kitchen\nKitchen, Store\nStore, Toilet1";

/// A room of the reference layout with its ideal area in square meters
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct IdealRoom {
    pub name: &'static str,
    pub size: f64,
}

pub static IDEAL_ROOMS: [IdealRoom; 9] = [
    IdealRoom { name: "Living", size: 22.0 },
    IdealRoom { name: "Dining", size: 12.0 },
    IdealRoom { name: "Kitchen", size: 10.0 },
    IdealRoom { name: "Store", size: 2.5 },
    IdealRoom { name: "Toilet1", size: 2.5 },
    IdealRoom { name: "Bedroom1", size: 13.0 },
    IdealRoom { name: "Bath1", size: 4.0 },
    IdealRoom { name: "Bedroom2", size: 10.0 },
    IdealRoom { name: "Bedroom3", size: 10.0 },
];

// Order matters: connectivity suggestions follow it.
pub static IDEAL_EDGES: [(&str, &str); 10] = [
    ("Living", "Dining"),
    ("Dining", "Toilet1"),
    ("Dining", "Kitchen"),
    ("Kitchen", "Store"),
    ("Living", "Bedroom1"),
    ("Bedroom1", "Bath1"),
    ("Living", "Bedroom2"),
    ("Bedroom2", "Toilet1"),
    ("Living", "Bedroom3"),
    ("Bedroom3", "Toilet1"),
];

/// The reference layout candidates are scored against.
///
/// Borrowed slices keep the catalog `Copy`, so it can be handed to the
/// builder, scorer and advisor without any shared mutable state.
#[derive(Debug, Clone, Copy)]
pub struct ReferenceCatalog<'a> {
    rooms: &'a [IdealRoom],
    edges: &'a [(&'a str, &'a str)],
}

impl ReferenceCatalog<'static> {
    /// The fixed 9-room, 10-adjacency reference layout
    pub fn standard() -> Self {
        Self {
            rooms: &IDEAL_ROOMS,
            edges: &IDEAL_EDGES,
        }
    }
}

impl<'a> ReferenceCatalog<'a> {
    pub fn new(rooms: &'a [IdealRoom], edges: &'a [(&'a str, &'a str)]) -> Self {
        Self { rooms, edges }
    }

    pub fn rooms(&self) -> &'a [IdealRoom] {
        self.rooms
    }

    pub fn edges(&self) -> &'a [(&'a str, &'a str)] {
        self.edges
    }

    pub fn room_names(&self) -> impl Iterator<Item = &'a str> + 'a {
        let rooms = self.rooms;
        rooms.iter().map(|room| room.name)
    }

    pub fn ideal_size(&self, name: &str) -> Option<f64> {
        self.rooms
            .iter()
            .find(|room| room.name == name)
            .map(|room| room.size)
    }

    /// Ideal sizes keyed by room name, for rendering
    pub fn ideal_sizes(&self) -> HashMap<String, f64> {
        self.rooms
            .iter()
            .map(|room| (room.name.to_string(), room.size))
            .collect()
    }

    /// Candidate sizes seeded from the ideal ones, as the input form starts out
    pub fn default_candidate_sizes(&self) -> HashMap<String, f64> {
        self.ideal_sizes()
    }

    pub fn ideal_graph(&self) -> AdjacencyGraph {
        build_graph_from_pairs(self.room_names(), self.edges.iter().copied())
    }

    /// Check that every catalog room has a finite candidate size of at least
    /// [`MIN_ROOM_SIZE`]. Extra rooms are checked for range as well.
    pub fn validate_candidate_sizes(
        &self,
        candidate_sizes: &HashMap<String, f64>,
    ) -> Result<(), PlanError> {
        for name in self.room_names() {
            if !candidate_sizes.contains_key(name) {
                return Err(PlanError::MissingCandidateSize(name.to_string()));
            }
        }

        // Sorted so the reported room does not depend on hash order
        let mut entries: Vec<_> = candidate_sizes.iter().collect();
        entries.sort_by(|a, b| a.0.cmp(b.0));

        for (room, &size) in entries {
            if !size.is_finite() || size < MIN_ROOM_SIZE {
                return Err(PlanError::InvalidSize {
                    room: room.clone(),
                    size,
                });
            }
        }

        Ok(())
    }
}

impl Default for ReferenceCatalog<'static> {
    fn default() -> Self {
        Self::standard()
    }
}
