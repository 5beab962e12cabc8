/// Error types for plan evaluation
#[derive(Debug, Clone, PartialEq)]
pub enum PlanError {
    /// A catalog room has no candidate size. The size score is a mean over
    /// the full catalog, so this is never defaulted.
    MissingCandidateSize(String),
    InvalidSize { room: String, size: f64 },
    MalformedAdjacency { line_number: usize, line: String },
}

impl std::fmt::Display for PlanError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PlanError::MissingCandidateSize(room) => {
                write!(f, "Missing candidate size for room: {}", room)
            }
            PlanError::InvalidSize { room, size } => {
                write!(f, "Invalid size for room {}: {}", room, size)
            }
            PlanError::MalformedAdjacency { line_number, line } => {
                write!(f, "Malformed adjacency on line {}: {:?}", line_number, line)
            }
        }
    }
}

impl std::error::Error for PlanError {}
