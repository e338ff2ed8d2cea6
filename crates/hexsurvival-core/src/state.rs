//! Simulation snapshot: the visible state handed to the host after each tick.

use serde::{Deserialize, Serialize};

use crate::enums::*;
use crate::events::SimEvent;
use crate::types::{AxialHex, SimTime, WorldPoint};

/// Complete state broadcast to the host after each tick.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SimSnapshot {
    pub time: SimTime,
    pub phase: GamePhase,
    pub wave: WaveView,
    pub player: Option<PlayerView>,
    pub actors: Vec<ActorView>,
    pub pickups: Vec<PickupView>,
    pub cells: Vec<CellView>,
    pub events: Vec<SimEvent>,
}

/// Wave timeline status.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct WaveView {
    pub wave_index: u32,
    pub phase: WavePhase,
    /// Seconds left in the current gap or active portion.
    pub phase_remaining_secs: f64,
    /// Current spawn cadence.
    pub spawn_gap_secs: f64,
}

/// The player actor.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PlayerView {
    pub actor_id: u64,
    pub position: WorldPoint,
    pub facing: f64,
    pub cell: AxialHex,
    pub destination: Option<WorldPoint>,
}

/// A non-player mobile actor.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActorView {
    pub actor_id: u64,
    pub kind: ActorKind,
    pub position: WorldPoint,
    pub facing: f64,
    pub radius: f64,
    pub behavior: BehaviorState,
    /// Owning cell, for content placed by the cell manager.
    pub cell: Option<AxialHex>,
}

/// A collectible.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PickupView {
    pub entity_id: u64,
    pub kind: PickupKind,
    pub position: WorldPoint,
    pub cell: AxialHex,
}

/// A discovered hex cell.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CellView {
    pub hex: AxialHex,
    pub center: WorldPoint,
    pub status: CellStatus,
    /// Elapsed seconds at which a consumed cell may spawn again.
    pub respawn_at: Option<f64>,
}
