//! Enumeration types used throughout the simulation.

use serde::{Deserialize, Serialize};

/// What kind of mobile actor an entity is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ActorKind {
    Player,
    /// Pursues the player once within aggro range.
    Zombie,
    /// Autonomous wanderer; never pursues.
    Vehicle,
}

impl ActorKind {
    pub fn is_enemy(self) -> bool {
        matches!(self, ActorKind::Zombie | ActorKind::Vehicle)
    }
}

/// Collectible item categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PickupKind {
    Health,
    Ammo,
    Weapon,
}

/// Outcome of a cell content roll.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ContentKind {
    Enemy,
    Pickup(PickupKind),
}

/// Portion of the wave timeline.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum WavePhase {
    /// Quiet interval before a wave.
    #[default]
    Gap,
    /// Spawning interval.
    Active,
}

/// Autonomous behavior state for non-player actors.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum BehaviorState {
    /// Standing still.
    Idle,
    /// Walking along the facing direction with occasional turns.
    #[default]
    Wander,
    /// Pursuing the player.
    Chase,
}

/// Session lifecycle.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    #[default]
    Idle,
    Active,
    Paused,
}

/// Occupancy of a discovered hex cell.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum CellStatus {
    /// No live content and no pending respawn.
    #[default]
    Empty,
    /// Holds a live entity.
    Occupied,
    /// Respawn timer armed: content was consumed, or the cell was found too
    /// close to the player to fill.
    AwaitingRespawn,
}
