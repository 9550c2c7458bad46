//! Example worlds.

pub mod blocks;
pub mod rooms;
