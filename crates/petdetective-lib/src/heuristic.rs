//! Remaining-work estimates that order the search frontier.
//!
//! The search engine is generic over [`Heuristic`] so alternative estimates can
//! be plugged in without touching the expansion loop. [`DeliveryDistance`] is
//! the default and the one the CLI uses.

use crate::problem::Problem;
use crate::state::SearchState;

/// Strategy for estimating the cost still ahead of a state.
pub trait Heuristic {
    /// Estimate remaining cost from `state`. Larger means further from done.
    fn estimate(&self, problem: &Problem, state: &SearchState) -> u32;
}

/// Sum of hop distances from the current location to every outstanding goal:
/// the house of each carried pet plus each pet still waiting to be collected.
///
/// Missing or unreachable goals count as
/// [`UNREACHABLE_DISTANCE`](crate::distance::UNREACHABLE_DISTANCE). The sum
/// double counts shared legs, so it is not admissible.
#[derive(Debug, Clone, Copy, Default)]
pub struct DeliveryDistance;

impl Heuristic for DeliveryDistance {
    fn estimate(&self, problem: &Problem, state: &SearchState) -> u32 {
        let oracle = problem.oracle();

        let carried: u32 = state
            .cargo
            .iter()
            .map(|pet| oracle.distance(state.location, problem.pickup(pet).target))
            .sum();

        let waiting: u32 = problem
            .all_pickups()
            .difference(state.cargo)
            .difference(state.delivered)
            .iter()
            .map(|pet| oracle.distance(state.location, Some(problem.pickup(pet).node)))
            .sum();

        carried + waiting
    }
}

/// Always zero, turning the search into uniform-cost order by trace length.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoEstimate;

impl Heuristic for NoEstimate {
    fn estimate(&self, _problem: &Problem, _state: &SearchState) -> u32 {
        0
    }
}
