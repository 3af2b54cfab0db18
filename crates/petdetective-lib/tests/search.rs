mod common;

use std::collections::HashMap;

use petdetective_lib::{
    solve, DeliveryDistance, Heuristic, NoEstimate, SearchConfig, Solver, StateKey, Termination,
    UNREACHABLE_DISTANCE,
};

use common::{fixture_problem, fuel_annotations, location_name, problem_from};

#[test]
fn single_delivery_uses_two_moves() {
    let problem = fixture_problem("single_delivery.txt");
    let outcome = solve(&problem, SearchConfig::new(2)).expect("search runs");

    assert!(outcome.success);
    assert_eq!(outcome.termination, Termination::Delivered);
    assert_eq!(
        outcome.trace(),
        &[
            "Start at car",
            "Step 1 : Go to a (fuel: 1, cargo: [], pending: [a])",
            "Step 2 : Pick up the a (cargo: [a], pending: [])",
            "Step 3 : Go to a_house (fuel: 0, cargo: [a], pending: [])",
            "Step 4 : Drop off the a (cargo: [], pending: [])",
        ]
    );
    assert_eq!(outcome.best.fuel, 0);
    assert_eq!(outcome.best.delivered, problem.all_pickups());
}

#[test]
fn zero_fuel_reports_only_the_start() {
    let problem = fixture_problem("single_delivery.txt");
    let outcome = solve(&problem, SearchConfig::new(0)).expect("search runs");

    assert!(!outcome.success);
    assert_eq!(outcome.termination, Termination::QueueExhausted);
    assert_eq!(outcome.trace(), &["Start at car".to_string()]);
    assert_eq!(outcome.delivered_count(), 0);
    assert_eq!(outcome.stats.expansions, 1);
}

#[test]
fn disconnected_pets_are_never_delivered() {
    let problem = fixture_problem("disconnected.txt");
    let start = problem.initial_state(5);
    assert_eq!(
        DeliveryDistance.estimate(&problem, &start),
        2 * UNREACHABLE_DISTANCE
    );

    for fuel in [0, 3, 12] {
        let outcome = solve(&problem, SearchConfig::new(fuel)).expect("search runs");
        assert!(!outcome.success, "fuel {fuel} must not succeed");
        assert!(outcome.best.delivered.is_empty());
        assert_eq!(outcome.trace(), &["Start at car".to_string()]);
    }
}

#[test]
fn five_pets_with_capacity_four_cycle_through_start() {
    let problem = fixture_problem("five_spokes.txt");
    let outcome = solve(&problem, SearchConfig::new(25)).expect("search runs");

    assert!(outcome.success);
    assert_eq!(outcome.delivered_count(), 5);
    let drop_offs = outcome
        .trace()
        .iter()
        .filter(|line| line.contains("Drop off the"))
        .count();
    assert_eq!(drop_offs, 5);
}

#[test]
fn five_pets_need_nineteen_moves() {
    let problem = fixture_problem("five_spokes.txt");

    let tight = solve(&problem, SearchConfig::new(19)).expect("search runs");
    assert!(tight.success);
    assert_eq!(tight.best.fuel, 0);

    let short = solve(&problem, SearchConfig::new(18)).expect("search runs");
    assert!(!short.success);
    assert_eq!(short.delivered_count(), 4);
}

#[test]
fn sample_puzzle_delivers_every_pet() {
    let problem = fixture_problem("sample_puzzle.txt");
    let outcome = solve(&problem, SearchConfig::new(40)).expect("search runs");

    assert!(outcome.success);
    assert_eq!(outcome.delivered_count(), problem.pickup_count());
    assert!(location_name(&problem, &outcome.best).ends_with("_house"));
    assert!(outcome
        .trace()
        .last()
        .is_some_and(|line| line.contains("Drop off the")));
}

#[test]
fn fuel_counts_down_one_per_move() {
    let problem = fixture_problem("sample_puzzle.txt");
    let fuel_limit = 40;
    let outcome = solve(&problem, SearchConfig::new(fuel_limit)).expect("search runs");

    let fuels = fuel_annotations(outcome.trace());
    assert!(!fuels.is_empty());
    for (index, fuel) in fuels.iter().enumerate() {
        assert_eq!(*fuel, fuel_limit - 1 - index as u32);
    }
    assert_eq!(*fuels.last().unwrap(), outcome.best.fuel);
}

#[test]
fn step_numbers_match_trace_positions() {
    let problem = fixture_problem("sample_puzzle.txt");
    let outcome = solve(&problem, SearchConfig::new(40)).expect("search runs");

    for (index, line) in outcome.trace().iter().enumerate().skip(1) {
        assert!(
            line.starts_with(&format!("Step {index} : ")),
            "line {index} was {line:?}"
        );
    }
}

#[test]
fn dominated_states_are_never_expanded() {
    let problem = fixture_problem("five_spokes.txt");
    let solver = Solver::new(&problem, SearchConfig::new(12)).expect("valid config");

    let mut best_fuel: HashMap<StateKey, u32> = HashMap::new();
    let outcome = solver.run_with(|state| {
        if let Some(previous) = best_fuel.get(&state.key()) {
            assert!(
                state.fuel > *previous,
                "expanded a dominated state at fuel {}",
                state.fuel
            );
        }
        best_fuel.insert(state.key(), state.fuel);
    });

    assert_eq!(outcome.stats.expansions, {
        // Every expansion was observed exactly once.
        let mut count = 0;
        solver.run_with(|_| count += 1);
        count
    });
    assert!(outcome.stats.pruned > 0);
}

#[test]
fn partial_result_keeps_first_state_with_most_deliveries() {
    // Two pets on opposite sides; three moves deliver one of them.
    let problem = problem_from("a_house <--> a\na <--> car\ncar <--> b\nb <--> b_house");
    let outcome = solve(&problem, SearchConfig::new(3)).expect("search runs");

    assert!(!outcome.success);
    assert_eq!(outcome.delivered_count(), 1);
    assert!(outcome
        .trace()
        .last()
        .is_some_and(|line| line.starts_with("Step 4 : Drop off the")));
}

#[test]
fn uniform_cost_order_finds_the_same_deliveries() {
    let problem = fixture_problem("five_spokes.txt");
    let config = SearchConfig::new(19);

    let guided = Solver::new(&problem, config).expect("valid").run();
    let blind = Solver::with_heuristic(&problem, config, NoEstimate)
        .expect("valid")
        .run();

    assert!(guided.success);
    assert!(blind.success);
    assert_eq!(guided.best.delivered, blind.best.delivered);
}

#[test]
fn capacity_one_forces_single_trips() {
    let problem = problem_from("car <--> a\ncar <--> b\ncar <--> a_house\ncar <--> b_house");
    let config = SearchConfig::new(7).with_capacity(1);
    let outcome = solve(&problem, config).expect("search runs");

    assert!(outcome.success);
    assert!(outcome
        .trace()
        .iter()
        .filter(|line| line.contains("Pick up"))
        .all(|line| line.contains("cargo: [a]") || line.contains("cargo: [b]")));
}
