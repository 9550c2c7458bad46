//! Wayfinder Harness: example worlds for the planner and actor.
//!
//! Worlds provide domain data only — actions, commands, methods, and state
//! builders. They implement no search logic; the engine crate owns that.
//! The integration, property, and benchmark suites all run against these
//! worlds.

#![forbid(unsafe_code)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]

pub mod worlds;
