//! Movement system: one steering step for every mobile actor.
//!
//! Neighbor positions are snapshotted at the start of the pass and bucketed by
//! hex, so every actor steers against the same population regardless of the
//! order in which actors are visited.

use std::collections::HashMap;

use hecs::{Entity, World};

use hexsurvival_core::components::{Actor, Behavior, Destination, Motion, Removal, Steering};
use hexsurvival_core::types::WorldPoint;
use hexsurvival_grid::HexBuckets;
use hexsurvival_steering::avoidance::{neighbors_within, Neighbor};
use hexsurvival_steering::behavior::intent_for;
use hexsurvival_steering::steering::{ActorBody, Intent, SteeringModel};

use super::entity_id;

/// Step every actor by `dt` seconds.
///
/// `buckets` is cleared and refilled each call so its allocations are reused
/// across ticks.
pub fn run(
    world: &mut World,
    model: &SteeringModel,
    buckets: &mut HexBuckets<usize>,
    player: Option<WorldPoint>,
    dt: f64,
) {
    buckets.clear();

    let mut population: Vec<Neighbor> = Vec::new();
    let mut index: HashMap<Entity, usize> = HashMap::new();
    {
        let mut query = world.query::<(&Actor, &WorldPoint, &Steering, Option<&Removal>)>();
        for (entity, (_actor, pos, steering, removal)) in query.iter() {
            let slot = population.len();
            population.push(Neighbor {
                id: entity_id(entity),
                position: *pos,
                radius: steering.radius,
                active: removal.is_none(),
            });
            buckets.insert(slot, *pos);
            index.insert(entity, slot);
        }
    }

    let mut candidates: Vec<Neighbor> = Vec::new();
    for (entity, (_actor, pos, motion, steering, behavior, destination, removal)) in
        world.query_mut::<(
            &Actor,
            &mut WorldPoint,
            &mut Motion,
            &Steering,
            Option<&Behavior>,
            Option<&Destination>,
            Option<&Removal>,
        )>()
    {
        if removal.is_some() {
            continue;
        }
        let Some(&slot) = index.get(&entity) else {
            continue;
        };

        let intent = match (behavior, destination) {
            (Some(behavior), _) => intent_for(behavior.state, player),
            (None, Some(Destination(target))) => Intent::Seek(*target),
            (None, None) => Intent::Hold,
        };

        candidates.clear();
        candidates.extend(
            buckets
                .query_radius(*pos, steering.avoidance_radius, Some(slot))
                .into_iter()
                .map(|(other, _)| population[other]),
        );
        let neighbors = neighbors_within(
            population[slot].id,
            *pos,
            &candidates,
            steering.avoidance_radius,
        );

        model.step(
            ActorBody {
                position: pos,
                motion,
                steering,
            },
            intent,
            &neighbors,
            dt,
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hexsurvival_core::config::Tuning;
    use hexsurvival_grid::HexLayout;

    use crate::world_setup;

    #[test]
    fn test_crowded_zombies_spread_apart() {
        let tuning = Tuning::default();
        let mut world = World::new();
        let a = world_setup::spawn_enemy(
            &mut world,
            &tuning.actors,
            hexsurvival_core::enums::ActorKind::Zombie,
            WorldPoint::new(-5.0, 0.0),
            0.0,
            hexsurvival_core::enums::BehaviorState::Wander,
            &tuning.behavior,
        );
        let b = world_setup::spawn_enemy(
            &mut world,
            &tuning.actors,
            hexsurvival_core::enums::ActorKind::Zombie,
            WorldPoint::new(5.0, 0.0),
            0.0,
            hexsurvival_core::enums::BehaviorState::Wander,
            &tuning.behavior,
        );

        let model = SteeringModel::new(tuning.steering.clone());
        let mut buckets = HexBuckets::new(HexLayout::from_tuning(&tuning.hex));
        let gap_before = 10.0;
        for _ in 0..30 {
            run(&mut world, &model, &mut buckets, None, 1.0 / 60.0);
        }
        let pa = *world.get::<&WorldPoint>(a).unwrap();
        let pb = *world.get::<&WorldPoint>(b).unwrap();
        assert!(
            pb.x - pa.x > gap_before,
            "avoidance should widen the gap: {pa:?} {pb:?}"
        );
    }

    #[test]
    fn test_player_seeks_destination() {
        let tuning = Tuning::default();
        let mut world = World::new();
        let player = world_setup::spawn_player(&mut world, &tuning.actors, WorldPoint::ORIGIN);
        world
            .insert_one(player, Destination(WorldPoint::new(0.0, 1000.0)))
            .unwrap();

        let model = SteeringModel::new(tuning.steering.clone());
        let mut buckets = HexBuckets::new(HexLayout::from_tuning(&tuning.hex));
        for _ in 0..60 {
            run(&mut world, &model, &mut buckets, None, 1.0 / 60.0);
        }
        let pos = *world.get::<&WorldPoint>(player).unwrap();
        assert!(pos.y > 0.0, "player should walk north, at {pos:?}");
        assert!(pos.y <= tuning.actors.player.speed + 1e-9);
    }

    #[test]
    fn test_removed_actor_does_not_move() {
        let tuning = Tuning::default();
        let mut world = World::new();
        let e = world_setup::spawn_enemy(
            &mut world,
            &tuning.actors,
            hexsurvival_core::enums::ActorKind::Vehicle,
            WorldPoint::ORIGIN,
            0.0,
            hexsurvival_core::enums::BehaviorState::Wander,
            &tuning.behavior,
        );
        world.insert_one(e, Removal::Killed).unwrap();

        let model = SteeringModel::new(tuning.steering.clone());
        let mut buckets = HexBuckets::new(HexLayout::from_tuning(&tuning.hex));
        run(&mut world, &model, &mut buckets, None, 1.0 / 60.0);
        assert_eq!(*world.get::<&WorldPoint>(e).unwrap(), WorldPoint::ORIGIN);
    }
}
