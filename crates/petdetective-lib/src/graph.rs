use std::collections::{BTreeSet, HashMap};
use std::fs;
use std::path::Path;

use serde::Serialize;

use crate::error::{Error, Result};

/// Dense identifier assigned to each node in first-seen order.
pub type NodeId = usize;

/// Separator between the two endpoints of an edge line.
pub const EDGE_CONNECTOR: &str = "<-->";

/// Suffix that marks a drop-off node; the pet's name is the stripped form.
pub const TARGET_SUFFIX: &str = "_house";

const VEHICLE_PREFIX: &str = "car";
const NEUTRAL_NAME: &str = "empty";

/// Role of a node, derived once from its name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum NodeRole {
    /// Where the vehicle starts. Exactly one per graph.
    VehicleStart,
    /// A pet waiting to be collected.
    Pickup,
    /// A house accepting the pet whose name prefixes it.
    Target,
    /// An empty junction.
    Neutral,
}

impl NodeRole {
    /// Classify a node from its name.
    ///
    /// Rules are checked in order: `car*` is the vehicle start, `*_house` is a
    /// target, `empty` or `empty<digits>` is neutral, and every other name is a
    /// pickup.
    pub fn classify(name: &str) -> Self {
        if name.starts_with(VEHICLE_PREFIX) {
            NodeRole::VehicleStart
        } else if name.ends_with(TARGET_SUFFIX) {
            NodeRole::Target
        } else if is_neutral(name) {
            NodeRole::Neutral
        } else {
            NodeRole::Pickup
        }
    }
}

fn is_neutral(name: &str) -> bool {
    name.strip_prefix(NEUTRAL_NAME)
        .is_some_and(|rest| rest.chars().all(|c| c.is_ascii_digit()))
}

/// Name of the house that accepts `pickup`.
pub fn target_name(pickup: &str) -> String {
    format!("{pickup}{TARGET_SUFFIX}")
}

/// Name of the pet a house accepts, if `target` carries the house suffix.
pub fn pickup_name(target: &str) -> Option<&str> {
    target.strip_suffix(TARGET_SUFFIX)
}

/// Undirected, unweighted puzzle graph.
///
/// Neighbour lists are sorted by [`NodeId`] and free of duplicates, so every
/// traversal over the graph is deterministic.
#[derive(Debug, Clone)]
pub struct Graph {
    names: Vec<String>,
    roles: Vec<NodeRole>,
    index: HashMap<String, NodeId>,
    adjacency: Vec<Vec<NodeId>>,
    start: NodeId,
}

impl Graph {
    /// Number of distinct nodes.
    pub fn node_count(&self) -> usize {
        self.names.len()
    }

    /// Number of undirected edges (a self-loop counts once).
    pub fn edge_count(&self) -> usize {
        let mut doubled = 0;
        let mut loops = 0;
        for (node, neighbours) in self.adjacency.iter().enumerate() {
            doubled += neighbours.len();
            if neighbours.binary_search(&node).is_ok() {
                loops += 1;
            }
        }
        (doubled - loops) / 2 + loops
    }

    /// Iterate over every node identifier.
    pub fn nodes(&self) -> impl Iterator<Item = NodeId> {
        0..self.names.len()
    }

    /// Name of a node.
    pub fn name(&self, node: NodeId) -> &str {
        &self.names[node]
    }

    /// Role of a node.
    pub fn role(&self, node: NodeId) -> NodeRole {
        self.roles[node]
    }

    /// Look up a node by name.
    pub fn node_id(&self, name: &str) -> Option<NodeId> {
        self.index.get(name).copied()
    }

    /// Return the neighbours for a given node.
    pub fn neighbours(&self, node: NodeId) -> &[NodeId] {
        self.adjacency
            .get(node)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// The vehicle start node.
    pub fn start(&self) -> NodeId {
        self.start
    }

    /// Nodes carrying the given role, in identifier order.
    pub fn nodes_with_role(&self, role: NodeRole) -> Vec<NodeId> {
        self.nodes().filter(|&node| self.roles[node] == role).collect()
    }
}

#[derive(Debug, Default)]
struct GraphBuilder {
    names: Vec<String>,
    roles: Vec<NodeRole>,
    index: HashMap<String, NodeId>,
    adjacency: Vec<BTreeSet<NodeId>>,
}

impl GraphBuilder {
    fn intern(&mut self, name: &str) -> NodeId {
        if let Some(&node) = self.index.get(name) {
            return node;
        }
        let node = self.names.len();
        self.names.push(name.to_string());
        self.roles.push(NodeRole::classify(name));
        self.index.insert(name.to_string(), node);
        self.adjacency.push(BTreeSet::new());
        node
    }

    fn connect(&mut self, a: &str, b: &str) {
        let a = self.intern(a);
        let b = self.intern(b);
        self.adjacency[a].insert(b);
        self.adjacency[b].insert(a);
    }

    fn finish(self) -> Result<Graph> {
        let starts: Vec<NodeId> = (0..self.names.len())
            .filter(|&node| self.roles[node] == NodeRole::VehicleStart)
            .collect();

        let start = match starts.as_slice() {
            [] => return Err(Error::MissingVehicleStart),
            [start] => *start,
            _ => {
                return Err(Error::MultipleVehicleStarts {
                    names: starts
                        .iter()
                        .map(|&node| self.names[node].clone())
                        .collect(),
                })
            }
        };

        Ok(Graph {
            names: self.names,
            roles: self.roles,
            index: self.index,
            adjacency: self
                .adjacency
                .into_iter()
                .map(|set| set.into_iter().collect())
                .collect(),
            start,
        })
    }
}

/// Parse an edge list (`A <--> B` per line, blank lines ignored).
pub fn parse_edge_list(input: &str) -> Result<Graph> {
    let mut builder = GraphBuilder::default();

    for (index, raw) in input.lines().enumerate() {
        let line = raw.trim();
        if line.is_empty() {
            continue;
        }
        let (a, b) = split_edge(line).ok_or_else(|| Error::MalformedEdge {
            line_number: index + 1,
            line: raw.to_string(),
        })?;
        builder.connect(a, b);
    }

    builder.finish()
}

/// Read and parse an edge list file.
pub fn load_graph(path: &Path) -> Result<Graph> {
    let contents = fs::read_to_string(path)?;
    let graph = parse_edge_list(&contents)?;
    tracing::debug!(
        path = %path.display(),
        nodes = graph.node_count(),
        edges = graph.edge_count(),
        "loaded puzzle graph"
    );
    Ok(graph)
}

fn split_edge(line: &str) -> Option<(&str, &str)> {
    let mut parts = line.split(EDGE_CONNECTOR);
    let a = parts.next()?.trim();
    let b = parts.next()?.trim();
    if parts.next().is_some() || !is_token(a) || !is_token(b) {
        return None;
    }
    Some((a, b))
}

fn is_token(value: &str) -> bool {
    !value.is_empty() && !value.chars().any(char::is_whitespace)
}
