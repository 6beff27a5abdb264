//! Core types and definitions for the IMPERIUM simulation.
//!
//! This crate defines the vocabulary shared across all other crates:
//! enums, unit and building stats, resource ledgers, events, constants and configuration.
//! It has no dependency on an engine or any runtime framework.

pub mod buildings;
pub mod config;
pub mod constants;
pub mod enums;
pub mod error;
pub mod events;
pub mod resources;
pub mod units;

pub use error::{Error, Result};

#[cfg(test)]
mod tests;
