//! Shared scenario builders for the planner benchmarks.
//!
//! Each builder returns `(domain, initial state, agenda)` ready to hand to
//! `find_plan` or `run_lazy_lookahead`. Scenario sizes scale the interesting
//! dimension: goal fan-out for the rooms fleets, refinement depth for the
//! blocks towers.

#![forbid(unsafe_code)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]

use wayfinder_harness::worlds::{blocks, rooms};
use wayfinder_kernel::domain::Domain;
use wayfinder_kernel::multigoal::Multigoal;
use wayfinder_kernel::state::State;
use wayfinder_kernel::todo::TodoItem;

/// `object_count` objects in `room1`, each with a unigoal to reach `room2`.
#[must_use]
pub fn fleet_scenario(object_count: usize) -> (Domain, State, Vec<TodoItem>) {
    let domain = rooms::domain().expect("rooms domain assembles");
    let names: Vec<String> = (0..object_count).map(|i| format!("obj{i:03}")).collect();
    let locs: Vec<(&str, &str)> = names.iter().map(|n| (n.as_str(), "room1")).collect();
    let state = rooms::initial_state(&locs);
    let todo = names
        .iter()
        .map(|n| TodoItem::unigoal("loc", n.as_str(), "room2"))
        .collect();
    (domain, state, todo)
}

/// The same fleet expressed as one conjunctive multigoal, exercising the
/// split-and-reappend loop.
#[must_use]
pub fn fleet_multigoal_scenario(object_count: usize) -> (Domain, State, Vec<TodoItem>) {
    let domain = rooms::domain().expect("rooms domain assembles");
    let names: Vec<String> = (0..object_count).map(|i| format!("obj{i:03}")).collect();
    let locs: Vec<(&str, &str)> = names.iter().map(|n| (n.as_str(), "room1")).collect();
    let state = rooms::initial_state(&locs);
    let mut goal = Multigoal::new("fleet");
    for name in &names {
        goal.require("loc", name.as_str(), "room2");
    }
    (domain, state, vec![TodoItem::Multigoal(goal)])
}

/// `block_count` blocks on the table with a multigoal stacking them into one
/// tower, bottom up. Zero-padded names keep map order aligned with stacking
/// order.
#[must_use]
pub fn tower_scenario(block_count: usize) -> (Domain, State, Vec<TodoItem>) {
    let domain = blocks::domain().expect("blocks domain assembles");
    let names: Vec<String> = (0..block_count).map(|i| format!("b{i:03}")).collect();
    let on: Vec<(&str, &str)> = names.iter().map(|n| (n.as_str(), "table")).collect();
    let state = blocks::initial_state(&on);
    let mut goal = Multigoal::new("tower");
    for pair in names.windows(2) {
        goal.require("pos", pair[1].as_str(), pair[0].as_str());
    }
    (domain, state, vec![TodoItem::Multigoal(goal)])
}
