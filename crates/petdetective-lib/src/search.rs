//! Best-first search over `(location, cargo, delivered, fuel)` states.
//!
//! Entries are ordered by `trace length + h`, where `h` is estimated once for
//! the state being expanded and shared by all of its children. A state is
//! discarded on pop when a state with the same `(location, cargo, delivered)`
//! was already expanded with at least as much fuel.
//!
//! Worst-case memory is proportional to the number of distinct keys visited,
//! bounded by `|V| * 2^P * 2^P` for `P` pets, so the engine is meant for
//! puzzle-sized graphs.

use std::cmp::Ordering;
use std::collections::{BinaryHeap, HashMap};

use serde::Serialize;
use tracing::{debug, info};

use crate::error::{Error, Result};
use crate::heuristic::{DeliveryDistance, Heuristic};
use crate::problem::{Problem, DEFAULT_CAPACITY};
use crate::state::{SearchState, StateKey};

/// Expansions between progress log lines when progress logging is on.
pub const DEFAULT_PROGRESS_INTERVAL: usize = 10_000;

/// Knobs for a single search run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchConfig {
    /// Edge traversals available to the vehicle.
    pub fuel_limit: u32,
    /// Pets the vehicle can carry at once.
    pub capacity: usize,
    /// Stop after this many expansions and report the best partial result.
    pub max_expansions: Option<usize>,
    /// Emit a `debug!` progress line every this many expansions.
    pub progress_interval: Option<usize>,
}

impl SearchConfig {
    pub fn new(fuel_limit: u32) -> Self {
        Self {
            fuel_limit,
            capacity: DEFAULT_CAPACITY,
            max_expansions: None,
            progress_interval: None,
        }
    }

    #[must_use]
    pub fn with_capacity(mut self, capacity: usize) -> Self {
        self.capacity = capacity;
        self
    }

    #[must_use]
    pub fn with_max_expansions(mut self, limit: Option<usize>) -> Self {
        self.max_expansions = limit;
        self
    }

    #[must_use]
    pub fn with_progress_interval(mut self, interval: Option<usize>) -> Self {
        self.progress_interval = interval;
        self
    }
}

/// Why the search stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Termination {
    /// Every pet was delivered.
    Delivered,
    /// The frontier ran dry before every pet was delivered.
    QueueExhausted,
    /// `max_expansions` was reached first.
    ExpansionLimit,
}

/// Counters collected while searching.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct SearchStats {
    /// States popped and expanded.
    pub expansions: usize,
    /// States popped and discarded as dominated.
    pub pruned: usize,
    /// Child states pushed onto the frontier.
    pub generated: usize,
    /// Largest frontier size observed.
    pub peak_queue: usize,
}

/// Result of a search run.
#[derive(Debug, Clone)]
pub struct SearchOutcome {
    /// `true` when every pet was delivered.
    pub success: bool,
    pub termination: Termination,
    /// The solved state, or the first popped state with the most deliveries.
    pub best: SearchState,
    pub stats: SearchStats,
}

impl SearchOutcome {
    pub fn trace(&self) -> &[String] {
        &self.best.trace
    }

    pub fn delivered_count(&self) -> usize {
        self.best.delivered.len()
    }
}

/// Search engine bound to one problem and configuration.
#[derive(Debug, Clone)]
pub struct Solver<'a, H = DeliveryDistance> {
    problem: &'a Problem,
    config: SearchConfig,
    heuristic: H,
}

impl<'a> Solver<'a, DeliveryDistance> {
    /// Solver using the default [`DeliveryDistance`] heuristic.
    pub fn new(problem: &'a Problem, config: SearchConfig) -> Result<Self> {
        Self::with_heuristic(problem, config, DeliveryDistance)
    }
}

impl<'a, H: Heuristic> Solver<'a, H> {
    pub fn with_heuristic(problem: &'a Problem, config: SearchConfig, heuristic: H) -> Result<Self> {
        if config.capacity == 0 {
            return Err(Error::InvalidCapacity);
        }
        Ok(Self {
            problem,
            config,
            heuristic,
        })
    }

    pub fn config(&self) -> &SearchConfig {
        &self.config
    }

    /// Run the search to completion.
    pub fn run(&self) -> SearchOutcome {
        self.run_with(|_| {})
    }

    /// Run the search, calling `observer` with every state that gets
    /// expanded (popped and not dominated), in expansion order.
    pub fn run_with<F>(&self, mut observer: F) -> SearchOutcome
    where
        F: FnMut(&SearchState),
    {
        let problem = self.problem;
        let goal = problem.all_pickups();
        let initial = problem.initial_state(self.config.fuel_limit);

        info!(
            nodes = problem.graph().node_count(),
            pickups = problem.pickup_count(),
            fuel = self.config.fuel_limit,
            capacity = self.config.capacity,
            "starting delivery search"
        );

        let mut stats = SearchStats::default();
        let mut queue = BinaryHeap::new();
        let mut sequence = 0u64;
        let mut visited: HashMap<StateKey, u32> = HashMap::new();
        let mut best: Option<SearchState> = None;
        let mut termination = Termination::QueueExhausted;

        queue.push(QueueEntry::new(0, sequence, initial.clone()));
        stats.peak_queue = 1;

        while !queue.is_empty() {
            if self
                .config
                .max_expansions
                .is_some_and(|limit| stats.expansions >= limit)
            {
                termination = Termination::ExpansionLimit;
                break;
            }
            let Some(entry) = queue.pop() else {
                break;
            };
            let state = entry.state;

            let key = state.key();
            if visited.get(&key).is_some_and(|&fuel| fuel >= state.fuel) {
                stats.pruned += 1;
                continue;
            }
            visited.insert(key, state.fuel);

            stats.expansions += 1;
            observer(&state);

            if best
                .as_ref()
                .map_or(true, |current| state.delivered.len() > current.delivered.len())
            {
                best = Some(state.clone());
            }

            if state.delivered == goal {
                let outcome = SearchOutcome {
                    success: true,
                    termination: Termination::Delivered,
                    best: state,
                    stats,
                };
                log_outcome(&outcome);
                return outcome;
            }

            if let Some(interval) = self.config.progress_interval {
                if interval > 0 && stats.expansions % interval == 0 {
                    debug!(
                        expansions = stats.expansions,
                        queue = queue.len(),
                        delivered = best.as_ref().map_or(0, |b| b.delivered.len()),
                        "search progress"
                    );
                }
            }

            if state.fuel == 0 {
                continue;
            }

            let estimate = self.heuristic.estimate(problem, &state) as usize;
            for child in problem.successors(&state, self.config.capacity) {
                let priority = child.trace.len() + estimate;
                sequence += 1;
                queue.push(QueueEntry::new(priority, sequence, child));
                stats.generated += 1;
            }
            stats.peak_queue = stats.peak_queue.max(queue.len());
        }

        let outcome = SearchOutcome {
            success: false,
            termination,
            best: best.unwrap_or(initial),
            stats,
        };
        log_outcome(&outcome);
        outcome
    }
}

/// Build a default solver and run it.
pub fn solve(problem: &Problem, config: SearchConfig) -> Result<SearchOutcome> {
    Ok(Solver::new(problem, config)?.run())
}

fn log_outcome(outcome: &SearchOutcome) {
    info!(
        success = outcome.success,
        termination = ?outcome.termination,
        delivered = outcome.delivered_count(),
        expansions = outcome.stats.expansions,
        pruned = outcome.stats.pruned,
        "delivery search finished"
    );
}

/// Frontier entry. Lower priority pops first; equal priorities pop in
/// insertion order.
#[derive(Debug)]
struct QueueEntry {
    priority: usize,
    sequence: u64,
    state: SearchState,
}

impl QueueEntry {
    fn new(priority: usize, sequence: u64, state: SearchState) -> Self {
        Self {
            priority,
            sequence,
            state,
        }
    }
}

impl PartialEq for QueueEntry {
    fn eq(&self, other: &Self) -> bool {
        self.priority == other.priority && self.sequence == other.sequence
    }
}

impl Eq for QueueEntry {}

impl Ord for QueueEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reverse ordering so BinaryHeap becomes a min-heap by priority.
        other
            .priority
            .cmp(&self.priority)
            .then_with(|| other.sequence.cmp(&self.sequence))
    }
}

impl PartialOrd for QueueEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::parse_edge_list;
    use crate::state::PickupSet;

    fn problem(edges: &str) -> Problem {
        Problem::new(parse_edge_list(edges).unwrap()).unwrap()
    }

    fn entry(priority: usize, sequence: u64) -> QueueEntry {
        QueueEntry::new(
            priority,
            sequence,
            SearchState {
                location: 0,
                cargo: PickupSet::EMPTY,
                delivered: PickupSet::EMPTY,
                fuel: 0,
                trace: Vec::new(),
            },
        )
    }

    #[test]
    fn queue_pops_lowest_priority_then_oldest() {
        let mut heap = BinaryHeap::new();
        heap.push(entry(5, 0));
        heap.push(entry(3, 1));
        heap.push(entry(3, 2));
        heap.push(entry(4, 3));

        let order: Vec<_> = std::iter::from_fn(|| heap.pop())
            .map(|e| (e.priority, e.sequence))
            .collect();
        assert_eq!(order, vec![(3, 1), (3, 2), (4, 3), (5, 0)]);
    }

    #[test]
    fn zero_capacity_is_rejected() {
        let problem = problem("car <--> a\na <--> a_house");
        let err = Solver::new(&problem, SearchConfig::new(2).with_capacity(0)).unwrap_err();
        assert!(matches!(err, Error::InvalidCapacity));
    }

    #[test]
    fn no_pets_is_an_immediate_success() {
        let problem = problem("car <--> empty");
        let outcome = solve(&problem, SearchConfig::new(3)).unwrap();
        assert!(outcome.success);
        assert_eq!(outcome.trace(), &["Start at car".to_string()]);
        assert_eq!(outcome.stats.expansions, 1);
    }

    #[test]
    fn expansion_limit_returns_best_so_far() {
        let problem = problem("car <--> a\na <--> a_house");
        let outcome = solve(
            &problem,
            SearchConfig::new(10).with_max_expansions(Some(1)),
        )
        .unwrap();
        assert!(!outcome.success);
        assert_eq!(outcome.termination, Termination::ExpansionLimit);
        assert_eq!(outcome.trace(), &["Start at car".to_string()]);
    }

    #[test]
    fn zero_expansion_limit_falls_back_to_start() {
        let problem = problem("car <--> a\na <--> a_house");
        let outcome = solve(
            &problem,
            SearchConfig::new(10).with_max_expansions(Some(0)),
        )
        .unwrap();
        assert_eq!(outcome.stats.expansions, 0);
        assert_eq!(outcome.trace(), &["Start at car".to_string()]);
    }
}
