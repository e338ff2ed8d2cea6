//! Cleanup system: despawns flagged and stray entities.
//!
//! Cell-owned content notifies its cell through the reverse lookup so the
//! respawn timer is armed. Wave zombies that drift too far from the player
//! have no cell and are simply removed.

use hecs::{Entity, World};

use hexsurvival_core::components::{CellOwned, Enemy, Removal};
use hexsurvival_core::events::SimEvent;
use hexsurvival_core::types::WorldPoint;

use crate::cells::CellContentManager;

use super::entity_id;

/// Remove every entity flagged with `Removal` plus uncelled enemies beyond
/// `stray_distance` of the player. Uses a caller-owned buffer to avoid
/// per-tick allocation.
pub fn run(
    world: &mut World,
    cells: &mut CellContentManager<Entity>,
    player: Option<WorldPoint>,
    stray_distance: f64,
    now: f64,
    despawn_buffer: &mut Vec<Entity>,
    events: &mut Vec<SimEvent>,
) {
    despawn_buffer.clear();

    for (entity, _removal) in world.query_mut::<&Removal>() {
        despawn_buffer.push(entity);
    }

    if let Some(player) = player {
        let stray_sq = stray_distance * stray_distance;
        for (entity, (_enemy, pos, owned, removal)) in
            world.query_mut::<(&Enemy, &WorldPoint, Option<&CellOwned>, Option<&Removal>)>()
        {
            if owned.is_none() && removal.is_none() && pos.distance_sq_to(&player) > stray_sq {
                tracing::trace!("Stray {:?} despawned", entity);
                despawn_buffer.push(entity);
            }
        }
    }

    for entity in despawn_buffer.drain(..) {
        if let Some(hex) = cells.find_cell_for_entity(&entity) {
            if let Some(respawn_at) = cells.on_consumed(hex, now) {
                events.push(SimEvent::ContentConsumed { hex, respawn_at });
            }
        }
        if world.despawn(entity).is_ok() {
            events.push(SimEvent::ActorRemoved {
                actor_id: entity_id(entity),
            });
        }
    }
}
