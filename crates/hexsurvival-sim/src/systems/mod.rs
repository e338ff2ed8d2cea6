//! ECS systems that operate on the simulation world each tick.
//!
//! Systems are free functions over `&mut World` (or `&World` for read-only).
//! They do not own state; engine-level state is passed in explicitly.

pub mod behavior;
pub mod cleanup;
pub mod contact;
pub mod movement;
pub mod snapshot;
pub mod wave_spawner;

use hecs::{Entity, World};

use hexsurvival_core::types::WorldPoint;

/// Stable external id for an entity.
pub fn entity_id(entity: Entity) -> u64 {
    entity.to_bits().get()
}

/// Resolve an external id to a live entity.
pub fn resolve_id(world: &World, id: u64) -> Option<Entity> {
    Entity::from_bits(id).filter(|entity| world.contains(*entity))
}

/// Position of the player entity, if it is alive.
pub fn player_position(world: &World, player: Option<Entity>) -> Option<WorldPoint> {
    let player = player?;
    world.get::<&WorldPoint>(player).ok().map(|pos| *pos)
}
