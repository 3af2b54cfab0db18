#![allow(dead_code)]

use std::path::PathBuf;

use petdetective_lib::{load_graph, parse_edge_list, Problem, SearchState};

pub fn fixtures_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../../docs/fixtures")
}

pub fn fixture_problem(name: &str) -> Problem {
    let path = fixtures_dir().join(name);
    let graph = load_graph(&path).expect("fixture graph loads");
    Problem::new(graph).expect("fixture problem builds")
}

pub fn problem_from(edges: &str) -> Problem {
    Problem::new(parse_edge_list(edges).expect("edges parse")).expect("problem builds")
}

/// Fuel values printed on each `Go to` line of a trace.
pub fn fuel_annotations(trace: &[String]) -> Vec<u32> {
    trace
        .iter()
        .filter_map(|line| {
            let (_, rest) = line.split_once("(fuel: ")?;
            let (fuel, _) = rest.split_once(',')?;
            fuel.parse().ok()
        })
        .collect()
}

pub fn location_name<'a>(problem: &'a Problem, state: &SearchState) -> &'a str {
    problem.graph().name(state.location)
}
