use thiserror::Error;

/// Convenient result alias for the Pet Detective library.
pub type Result<T> = std::result::Result<T, Error>;

/// Top-level library error type.
///
/// Only structural problems surface here. Unreachable pets and exhausted fuel
/// are reported through [`crate::SearchOutcome`] instead.
#[derive(Debug, Error)]
pub enum Error {
    /// Raised when a non-blank line is not of the form `A <--> B`.
    #[error("malformed edge on line {line_number}: {line:?} (expected `A <--> B`)")]
    MalformedEdge { line_number: usize, line: String },

    /// Raised when no node name starts with `car`.
    #[error("graph has no vehicle start node (a node whose name starts with \"car\")")]
    MissingVehicleStart,

    /// Raised when more than one node name starts with `car`.
    #[error("graph has more than one vehicle start node: {}", .names.join(", "))]
    MultipleVehicleStarts { names: Vec<String> },

    /// Raised when the puzzle has more pets than a pickup set can track.
    #[error("puzzle has {count} pickups; at most {max} are supported")]
    TooManyPickups { count: usize, max: usize },

    /// Raised when the vehicle capacity is zero.
    #[error("vehicle capacity must be at least 1")]
    InvalidCapacity,

    /// Wrapper for IO errors.
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// Wrapper for JSON serialisation errors.
    #[error(transparent)]
    Json(#[from] serde_json::Error),
}
