//! ECS components for hecs entities.
//!
//! Components are plain data structs with no methods.
//! Game logic lives in systems, not components.

use glam::DVec2;
use serde::{Deserialize, Serialize};

use crate::enums::*;
use crate::types::{AxialHex, WorldPoint};

/// Identifies a mobile actor and its role.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Actor {
    pub kind: ActorKind,
}

/// Steering capability record. One per actor; defaults per kind come from
/// [`crate::config::ActorProfiles`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Steering {
    /// Top speed (units/s).
    pub speed: f64,
    /// Body radius (units).
    pub radius: f64,
    /// Neighbors closer than this push the actor away.
    pub avoidance_radius: f64,
    /// Scale applied to the summed avoidance vector.
    pub avoidance_weight: f64,
    /// Scale applied to the intent vector.
    pub forward_weight: f64,
    /// 0 = facing never slows movement, 1 = full damping when moving backwards.
    pub direction_damp: f64,
}

/// Mutable per-tick motion state.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Motion {
    /// Facing angle in radians (0 = East, counter-clockwise).
    pub facing: f64,
    /// Decaying knockback velocity (units/s).
    pub pushback: DVec2,
}

/// Autonomous behavior state for zombies and vehicles.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct Behavior {
    pub state: BehaviorState,
    /// Seconds until the next wander heading change.
    pub wander_timer: f64,
}

/// Point the actor steers toward (player GPS target).
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Destination(pub WorldPoint);

/// Marks the player actor.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct Player {
    /// Elapsed seconds of the last enemy contact, if any.
    pub last_hit_at: Option<f64>,
}

/// Marks an enemy actor.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Enemy;

/// A collectible sitting in a cell.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Pickup {
    pub kind: PickupKind,
}

/// Content placed by the cell manager. The cell keeps the back-reference;
/// this copy lets snapshots show where content came from.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct CellOwned {
    pub hex: AxialHex,
}

/// Flags an entity for removal at the end of the tick.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub enum Removal {
    Killed,
    Collected,
    Strayed,
}
