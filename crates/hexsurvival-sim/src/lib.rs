//! Simulation engine for the hex survival game.
//!
//! Owns the hecs ECS world, the per-hex content manager and the wave
//! scheduler, runs systems once per host frame, and produces `SimSnapshot`s
//! for the rendering layer.

pub mod cells;
pub mod engine;
pub mod systems;
pub mod waves;
pub mod world_setup;

pub use hexsurvival_core as core;
pub use cells::{CellContentManager, CellState, EntityDescriptor};
pub use engine::{SimConfig, SimulationEngine};
pub use waves::{WaveScheduler, WaveState, WaveTick, WaveTransition};
