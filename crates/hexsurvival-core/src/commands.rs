//! Commands sent from the host application to the simulation.
//!
//! Commands are queued and processed at the next tick boundary.

use serde::{Deserialize, Serialize};

use crate::enums::ActorKind;

/// All possible host actions.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum PlayerCommand {
    // --- Session control ---
    /// Start a session with the player at the origin.
    StartSession,
    /// Clear the world and start over (wave clock and cells reset).
    RestartSession,
    /// Pause the simulation.
    Pause,
    /// Resume the simulation.
    Resume,
    /// Set time scale (1.0 = normal, 0.0 = frozen).
    SetTimeScale { scale: f64 },

    // --- Location ---
    /// Anchor the geo projection. The anchor maps to the world origin.
    AnchorGeo { lat: f64, lon: f64 },
    /// A GPS fix. The player walks toward it; the first fix anchors the projection.
    SetPlayerGeo { lat: f64, lon: f64 },
    /// Teleport the player.
    SetPlayerPosition { x: f64, y: f64 },
    /// Walk the player toward a world point.
    MovePlayerTo { x: f64, y: f64 },

    // --- Actors ---
    /// Knock an actor back along (dx, dy) with the given strength (units/s).
    ApplyPushback {
        actor_id: u64,
        dx: f64,
        dy: f64,
        strength: f64,
    },
    /// Kill an enemy (e.g. shot by the player).
    KillActor { actor_id: u64 },
    /// Collect a pickup regardless of distance.
    CollectPickup { entity_id: u64 },
    /// Spawn an actor outside the cell and wave systems.
    SpawnActor {
        kind: ActorKind,
        x: f64,
        y: f64,
        facing: f64,
    },
}
