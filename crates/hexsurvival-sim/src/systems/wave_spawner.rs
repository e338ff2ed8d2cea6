//! Wave spawning system: advances the wave timeline and places ring spawns.

use hecs::World;
use rand_chacha::ChaCha8Rng;

use hexsurvival_core::config::{ActorProfiles, BehaviorTuning};
use hexsurvival_core::enums::ActorKind;
use hexsurvival_core::events::SimEvent;
use hexsurvival_core::types::WorldPoint;

use crate::waves::{WaveScheduler, WaveTransition};
use crate::world_setup;

use super::entity_id;

/// Advance the scheduler by `dt` and spawn a chasing zombie on the ring
/// around the player when one is due. Nothing spawns without a player.
#[allow(clippy::too_many_arguments)]
pub fn run(
    world: &mut World,
    waves: &mut WaveScheduler,
    rng: &mut ChaCha8Rng,
    player: Option<WorldPoint>,
    profiles: &ActorProfiles,
    behavior: &BehaviorTuning,
    dt: f64,
    events: &mut Vec<SimEvent>,
) {
    let tick = waves.advance(dt);

    match tick.transition {
        Some(WaveTransition::Started(wave_index)) => {
            events.push(SimEvent::WaveStarted { wave_index });
        }
        Some(WaveTransition::Ended(wave_index)) => {
            events.push(SimEvent::WaveEnded { wave_index });
        }
        None => {}
    }

    let Some(player) = player else {
        return;
    };
    if tick.spawn_due {
        let position = waves.ring_spawn_point(player, rng);
        let entity = world_setup::spawn_wave_zombie(world, profiles, behavior, position, player);
        events.push(SimEvent::EnemySpawned {
            actor_id: entity_id(entity),
            kind: ActorKind::Zombie,
            position,
        });
    }
}
