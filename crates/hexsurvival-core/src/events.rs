//! Events emitted by the simulation for the rendering/audio layer.

use serde::{Deserialize, Serialize};

use crate::enums::*;
use crate::types::{AxialHex, WorldPoint};

/// Something the consumer should react to. Drained into each snapshot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum SimEvent {
    /// A new session began (or was restarted).
    SessionStarted,
    /// The active portion of a wave began.
    WaveStarted { wave_index: u32 },
    /// A wave's active portion ended and the following gap began.
    WaveEnded { wave_index: u32 },
    /// The wave scheduler placed an enemy on the spawn ring.
    EnemySpawned {
        actor_id: u64,
        kind: ActorKind,
        position: WorldPoint,
    },
    /// A cell rolled and placed content.
    ContentSpawned {
        hex: AxialHex,
        entity_id: u64,
        content: ContentKind,
        position: WorldPoint,
    },
    /// A cell's content was consumed; the respawn timer is armed.
    ContentConsumed { hex: AxialHex, respawn_at: f64 },
    /// The player picked something up.
    PickupCollected { entity_id: u64, kind: PickupKind },
    /// An enemy touched the player.
    PlayerHit { enemy_id: u64 },
    /// An actor or pickup left the world.
    ActorRemoved { actor_id: u64 },
    /// The player crossed into another hex.
    PlayerCellChanged { from: Option<AxialHex>, to: AxialHex },
}
