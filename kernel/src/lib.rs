//! Wayfinder Kernel: the data model of the Wayfinder planner.
//!
//! # API Surface
//!
//! - [`term::Term`] -- opaque symbolic values (symbols, integers, tuples)
//! - [`state::State`] -- a named snapshot of world variable bindings
//! - [`multigoal::Multigoal`] -- a conjunctive desired state fragment
//! - [`todo::TodoItem`] -- the heterogeneous agenda item (action / task /
//!   unigoal / multigoal / verification check)
//! - [`domain::Domain`] -- the registry of actions, commands, and methods
//!
//! # Module Dependency Direction
//!
//! `term` ← `state` ← `multigoal` ← `todo` ← `domain`
//!
//! One-way only. No cycles. The kernel holds data and registries; the
//! recursive engine lives in `wayfinder_planner` and depends on this crate.

#![forbid(unsafe_code)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]

pub mod domain;
pub mod multigoal;
pub mod state;
pub mod term;
pub mod todo;
