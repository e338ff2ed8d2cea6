//! Core types and definitions for the hex survival simulation.
//!
//! This crate defines the vocabulary shared across all other crates:
//! value types, components, commands, state snapshots, events, constants
//! and the tunable configuration. It has no dependency on any engine.

pub mod commands;
pub mod components;
pub mod config;
pub mod constants;
pub mod enums;
pub mod events;
pub mod state;
pub mod types;

#[cfg(test)]
mod tests;
