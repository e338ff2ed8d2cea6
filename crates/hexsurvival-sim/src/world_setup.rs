//! Entity spawn factories.
//!
//! Creates the player, enemies and cell content with their component bundles.
//! Steering capability records come from the configured actor profiles.

use hecs::{Entity, World};

use hexsurvival_core::components::*;
use hexsurvival_core::config::{ActorProfiles, BehaviorTuning};
use hexsurvival_core::enums::*;
use hexsurvival_core::types::WorldPoint;

use crate::cells::EntityDescriptor;

/// Spawn the player at `position`, facing east.
pub fn spawn_player(world: &mut World, profiles: &ActorProfiles, position: WorldPoint) -> Entity {
    world.spawn((
        Actor {
            kind: ActorKind::Player,
        },
        Player::default(),
        position,
        Motion::default(),
        profiles.player,
    ))
}

/// Spawn a zombie or vehicle.
pub fn spawn_enemy(
    world: &mut World,
    profiles: &ActorProfiles,
    kind: ActorKind,
    position: WorldPoint,
    facing: f64,
    state: BehaviorState,
    behavior: &BehaviorTuning,
) -> Entity {
    debug_assert!(kind.is_enemy(), "spawn_enemy called with {kind:?}");
    world.spawn((
        Actor { kind },
        Enemy,
        position,
        Motion {
            facing,
            ..Default::default()
        },
        profiles.for_kind(kind),
        Behavior {
            state,
            wander_timer: behavior.wander_interval_secs,
        },
    ))
}

/// Spawn what a cell rolled. Cell zombies idle until the player comes close.
pub fn spawn_content(
    world: &mut World,
    profiles: &ActorProfiles,
    behavior: &BehaviorTuning,
    descriptor: &EntityDescriptor,
) -> Entity {
    let owned = CellOwned {
        hex: descriptor.hex,
    };
    match descriptor.content {
        ContentKind::Enemy => {
            let entity = spawn_enemy(
                world,
                profiles,
                ActorKind::Zombie,
                descriptor.position,
                0.0,
                BehaviorState::Idle,
                behavior,
            );
            // Entity was just spawned; insertion cannot miss.
            let _ = world.insert_one(entity, owned);
            entity
        }
        ContentKind::Pickup(kind) => world.spawn((Pickup { kind }, descriptor.position, owned)),
    }
}

/// Spawn a wave zombie on the ring, already chasing and facing the player.
pub fn spawn_wave_zombie(
    world: &mut World,
    profiles: &ActorProfiles,
    behavior: &BehaviorTuning,
    position: WorldPoint,
    player: WorldPoint,
) -> Entity {
    spawn_enemy(
        world,
        profiles,
        ActorKind::Zombie,
        position,
        position.angle_to(&player),
        BehaviorState::Chase,
        behavior,
    )
}
