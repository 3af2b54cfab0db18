//! Pet Detective library entry points.
//!
//! This crate loads a puzzle graph from an edge list, precomputes hop
//! distances, and runs a fuel-bounded best-first search for a pickup and
//! delivery sequence. Higher-level consumers (the CLI) should only depend on
//! the items exported here instead of reimplementing behavior.
//!

#![deny(warnings)]

pub mod distance;
pub mod error;
pub mod graph;
pub mod heuristic;
pub mod output;
pub mod problem;
pub mod search;
pub mod state;

pub use distance::{DistanceOracle, UNREACHABLE_DISTANCE};
pub use error::{Error, Result};
pub use graph::{load_graph, parse_edge_list, Graph, NodeId, NodeRole};
pub use heuristic::{DeliveryDistance, Heuristic, NoEstimate};
pub use output::{DeliveryReport, ReportRenderMode};
pub use problem::{Pickup, Problem, DEFAULT_CAPACITY};
pub use search::{
    solve, SearchConfig, SearchOutcome, SearchStats, Solver, Termination,
    DEFAULT_PROGRESS_INTERVAL,
};
pub use state::{PickupSet, SearchState, StateKey, MAX_PICKUPS};
