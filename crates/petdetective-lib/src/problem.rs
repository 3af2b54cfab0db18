//! Puzzle model layered over the graph: which pets exist, where their houses
//! are, and the rules for moving the vehicle one edge at a time.

use std::collections::HashMap;

use serde::Serialize;

use crate::distance::DistanceOracle;
use crate::error::{Error, Result};
use crate::graph::{target_name, Graph, NodeId, NodeRole};
use crate::state::{PickupSet, SearchState, MAX_PICKUPS};

/// Pets the vehicle can carry at once unless configured otherwise.
pub const DEFAULT_CAPACITY: usize = 4;

/// A pet together with the house it must be delivered to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Pickup {
    pub name: String,
    pub node: NodeId,
    /// `None` when `<name>_house` never appears in the graph.
    pub target: Option<NodeId>,
}

/// A loaded puzzle ready to search.
#[derive(Debug, Clone)]
pub struct Problem {
    graph: Graph,
    oracle: DistanceOracle,
    pickups: Vec<Pickup>,
    pickup_by_node: HashMap<NodeId, usize>,
    pickup_by_target: HashMap<NodeId, usize>,
}

impl Problem {
    /// Catalogue the pets of `graph` and precompute hop distances.
    pub fn new(graph: Graph) -> Result<Self> {
        let mut pickups: Vec<Pickup> = graph
            .nodes_with_role(NodeRole::Pickup)
            .into_iter()
            .map(|node| {
                let name = graph.name(node).to_string();
                let target = graph.node_id(&target_name(&name));
                Pickup { name, node, target }
            })
            .collect();

        if pickups.len() > MAX_PICKUPS {
            return Err(Error::TooManyPickups {
                count: pickups.len(),
                max: MAX_PICKUPS,
            });
        }
        pickups.sort_by(|a, b| a.name.cmp(&b.name));

        let pickup_by_node = pickups
            .iter()
            .enumerate()
            .map(|(index, pickup)| (pickup.node, index))
            .collect();
        let pickup_by_target = pickups
            .iter()
            .enumerate()
            .filter_map(|(index, pickup)| pickup.target.map(|target| (target, index)))
            .collect();

        let problem = Self {
            oracle: DistanceOracle::build(&graph),
            graph,
            pickups,
            pickup_by_node,
            pickup_by_target,
        };
        problem.warn_about_unreachable_pets();
        Ok(problem)
    }

    pub fn graph(&self) -> &Graph {
        &self.graph
    }

    pub fn oracle(&self) -> &DistanceOracle {
        &self.oracle
    }

    /// Every pet, sorted by name. Positions are the indices used in
    /// [`PickupSet`].
    pub fn pickups(&self) -> &[Pickup] {
        &self.pickups
    }

    pub fn pickup(&self, index: usize) -> &Pickup {
        &self.pickups[index]
    }

    pub fn pickup_count(&self) -> usize {
        self.pickups.len()
    }

    /// The set of every pet; a state is solved when it has delivered this.
    pub fn all_pickups(&self) -> PickupSet {
        PickupSet::first(self.pickups.len())
    }

    /// Pickup index of the pet standing on `node`.
    pub fn pickup_at(&self, node: NodeId) -> Option<usize> {
        self.pickup_by_node.get(&node).copied()
    }

    /// Pickup index of the pet that house `node` accepts.
    pub fn pickup_for_target(&self, node: NodeId) -> Option<usize> {
        self.pickup_by_target.get(&node).copied()
    }

    /// Pets whose house is missing from the graph.
    pub fn unmatched_pickups(&self) -> Vec<&str> {
        self.pickups
            .iter()
            .filter(|pickup| pickup.target.is_none())
            .map(|pickup| pickup.name.as_str())
            .collect()
    }

    /// Pets that cannot be delivered from the start no matter the fuel: the
    /// pet, or its house, is in another component or absent.
    pub fn undeliverable_pickups(&self) -> Vec<&str> {
        let start = self.graph.start();
        self.pickups
            .iter()
            .filter(|pickup| {
                !self.oracle.is_reachable(start, pickup.node)
                    || pickup
                        .target
                        .map_or(true, |target| !self.oracle.is_reachable(start, target))
            })
            .map(|pickup| pickup.name.as_str())
            .collect()
    }

    /// Names of the pets in `set`, in name order.
    pub fn names(&self, set: PickupSet) -> Vec<&str> {
        set.iter()
            .map(|index| self.pickups[index].name.as_str())
            .collect()
    }

    /// Root state: at the vehicle start, empty-handed, with a full tank.
    pub fn initial_state(&self, fuel: u32) -> SearchState {
        let start = self.graph.start();
        SearchState {
            location: start,
            cargo: PickupSet::EMPTY,
            delivered: PickupSet::EMPTY,
            fuel,
            trace: vec![format!("Start at {}", self.graph.name(start))],
        }
    }

    /// Every state reachable by moving one edge from `state`.
    ///
    /// Each move burns one unit of fuel and then applies at most one role
    /// transition at the arrival node. A state with no fuel has no successors.
    pub fn successors(&self, state: &SearchState, capacity: usize) -> Vec<SearchState> {
        if state.fuel == 0 {
            return Vec::new();
        }
        let fuel = state.fuel - 1;

        self.graph
            .neighbours(state.location)
            .iter()
            .map(|&next| self.move_to(state, next, fuel, capacity))
            .collect()
    }

    fn move_to(&self, state: &SearchState, next: NodeId, fuel: u32, capacity: usize) -> SearchState {
        let mut cargo = state.cargo;
        let mut delivered = state.delivered;
        let mut trace = Vec::with_capacity(state.trace.len() + 2);
        trace.extend_from_slice(&state.trace);

        let name = self.graph.name(next);
        push_step(
            &mut trace,
            format!(
                "Go to {name} (fuel: {fuel}, {})",
                self.snapshot(cargo, delivered)
            ),
        );

        let action = match self.graph.role(next) {
            NodeRole::Pickup => match self.pickup_at(next) {
                Some(pet) if !cargo.contains(pet) && !delivered.contains(pet) => {
                    if cargo.len() < capacity {
                        cargo = cargo.with(pet);
                        format!("Pick up the {name} ({})", self.snapshot(cargo, delivered))
                    } else {
                        format!("Visit the {name} (car full)")
                    }
                }
                _ => format!("Visit the {name}"),
            },
            NodeRole::Target => match self.pickup_for_target(next) {
                Some(pet) if cargo.contains(pet) => {
                    cargo = cargo.without(pet);
                    delivered = delivered.with(pet);
                    format!(
                        "Drop off the {} ({})",
                        self.pickups[pet].name,
                        self.snapshot(cargo, delivered)
                    )
                }
                _ => format!("Visit the {name}"),
            },
            NodeRole::Neutral | NodeRole::VehicleStart => format!("Visit the {name}"),
        };
        push_step(&mut trace, action);

        SearchState {
            location: next,
            cargo,
            delivered,
            fuel,
            trace,
        }
    }

    fn snapshot(&self, cargo: PickupSet, delivered: PickupSet) -> String {
        let pending = self.all_pickups().difference(cargo).difference(delivered);
        format!(
            "cargo: [{}], pending: [{}]",
            self.names(cargo).join(", "),
            self.names(pending).join(", ")
        )
    }

    fn warn_about_unreachable_pets(&self) {
        for name in self.unmatched_pickups() {
            tracing::warn!(pet = name, "no house for pet in graph; it cannot be delivered");
        }
        for name in self.undeliverable_pickups() {
            tracing::warn!(pet = name, "pet or its house is unreachable from the vehicle start");
        }
    }
}

fn push_step(trace: &mut Vec<String>, action: String) {
    let step = trace.len();
    trace.push(format!("Step {step} : {action}"));
}
