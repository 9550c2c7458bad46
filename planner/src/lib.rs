//! Wayfinder Planner: depth-first task/goal refinement with backtracking.
//!
//! This crate provides the engine layer for Wayfinder. It depends only on
//! `wayfinder_kernel` — it does NOT depend on `wayfinder_harness`.
//!
//! # Crate dependency graph
//!
//! ```text
//! wayfinder_kernel  ←  wayfinder_planner  ←  wayfinder_harness
//! (data, registries)   (engine, actor)       (worlds, suites)
//! ```
//!
//! # Key entry points
//!
//! - [`search::find_plan`] — plan a heterogeneous agenda into a linear
//!   sequence of primitive actions, or report that the search is exhausted
//! - [`actor::run_lazy_lookahead`] — interleave planning with command
//!   execution, re-planning on command failure
//! - [`split::split_multigoal`] — the opt-in baseline multigoal method
//! - [`policy::PlanPolicy`] — verbosity, goal verification, depth budget

#![forbid(unsafe_code)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]

pub mod actor;
pub mod error;
pub mod policy;
pub mod search;
pub mod split;
