//! Movement for the hex survival simulation.
//!
//! Local avoidance, the shared steering integrator with pushback and
//! direction damping, and the wander/chase behavior state machine.

pub mod avoidance;
pub mod behavior;
pub mod steering;

pub use hexsurvival_core as core;

pub use avoidance::{neighbors_within, Neighbor};
pub use steering::{apply_pushback, ActorBody, Intent, SteeringModel, StepResult};
