//! Snapshot system: queries the ECS world and builds a complete SimSnapshot.
//!
//! This system is read-only; it never modifies the world.

use hecs::{Entity, World};

use hexsurvival_core::components::*;
use hexsurvival_core::enums::GamePhase;
use hexsurvival_core::events::SimEvent;
use hexsurvival_core::state::*;
use hexsurvival_core::types::{SimTime, WorldPoint};
use hexsurvival_grid::HexLayout;

use crate::cells::CellContentManager;
use crate::waves::WaveScheduler;

use super::entity_id;

/// Build a complete SimSnapshot from the current world state.
pub fn build_snapshot(
    world: &World,
    time: &SimTime,
    phase: GamePhase,
    player: Option<Entity>,
    waves: &WaveScheduler,
    cells: &CellContentManager<Entity>,
    events: Vec<SimEvent>,
) -> SimSnapshot {
    SimSnapshot {
        time: *time,
        phase,
        wave: build_wave(waves),
        player: build_player(world, player, cells.layout()),
        actors: build_actors(world),
        pickups: build_pickups(world),
        cells: build_cells(cells),
        events,
    }
}

fn build_wave(waves: &WaveScheduler) -> WaveView {
    let state = waves.state();
    WaveView {
        wave_index: state.wave_index,
        phase: state.phase(),
        phase_remaining_secs: waves.phase_remaining_secs(),
        spawn_gap_secs: waves.spawn_gap_secs(state.wave_index),
    }
}

fn build_player(world: &World, player: Option<Entity>, layout: &HexLayout) -> Option<PlayerView> {
    let player = player?;
    let mut query = world
        .query_one::<(&WorldPoint, &Motion, Option<&Destination>)>(player)
        .ok()?;
    let (pos, motion, destination) = query.get()?;
    Some(PlayerView {
        actor_id: entity_id(player),
        position: *pos,
        facing: motion.facing,
        cell: layout.world_to_hex(*pos),
        destination: destination.map(|d| d.0),
    })
}

/// Non-player actors, sorted by id.
fn build_actors(world: &World) -> Vec<ActorView> {
    let mut actors: Vec<ActorView> = world
        .query::<(&Actor, &Enemy, &WorldPoint, &Motion, &Steering, &Behavior, Option<&CellOwned>)>()
        .iter()
        .map(|(entity, (actor, _enemy, pos, motion, steering, behavior, owned))| ActorView {
            actor_id: entity_id(entity),
            kind: actor.kind,
            position: *pos,
            facing: motion.facing,
            radius: steering.radius,
            behavior: behavior.state,
            cell: owned.map(|o| o.hex),
        })
        .collect();

    actors.sort_by_key(|a| a.actor_id);
    actors
}

fn build_pickups(world: &World) -> Vec<PickupView> {
    let mut pickups: Vec<PickupView> = world
        .query::<(&Pickup, &WorldPoint, &CellOwned)>()
        .iter()
        .map(|(entity, (pickup, pos, owned))| PickupView {
            entity_id: entity_id(entity),
            kind: pickup.kind,
            position: *pos,
            cell: owned.hex,
        })
        .collect();

    pickups.sort_by_key(|p| p.entity_id);
    pickups
}

/// Discovered cells in hex order.
fn build_cells(cells: &CellContentManager<Entity>) -> Vec<CellView> {
    cells
        .cells()
        .map(|(hex, state)| CellView {
            hex: *hex,
            center: cells.layout().hex_to_world(*hex),
            status: state.status(),
            respawn_at: state.respawn_at,
        })
        .collect()
}
