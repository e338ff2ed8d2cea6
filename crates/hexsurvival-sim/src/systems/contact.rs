//! Contact system: enemy/player touches and pickup collection.
//!
//! Enemies touching the player are knocked back through the pushback impulse
//! API; the player is hit at most once per cooldown. Pickups within reach are
//! flagged for removal and reported.

use glam::DVec2;
use hecs::{Entity, World};

use hexsurvival_core::components::{Enemy, Motion, Pickup, Player, Removal, Steering};
use hexsurvival_core::config::ContactTuning;
use hexsurvival_core::events::SimEvent;
use hexsurvival_core::types::WorldPoint;
use hexsurvival_steering::steering::apply_pushback;

use super::entity_id;

/// Resolve contacts against the player.
pub fn run(
    world: &mut World,
    player: Option<Entity>,
    tuning: &ContactTuning,
    now: f64,
    events: &mut Vec<SimEvent>,
) {
    let Some(player) = player else {
        return;
    };
    let (player_pos, player_radius) = {
        let Ok(mut query) = world.query_one::<(&WorldPoint, &Steering)>(player) else {
            return;
        };
        let Some((pos, steering)) = query.get() else {
            return;
        };
        (*pos, steering.radius)
    };

    // Enemies in contact, with the direction from the player to each.
    let mut touching: Vec<(Entity, DVec2)> = Vec::new();
    {
        let mut query = world.query::<(&Enemy, &WorldPoint, &Steering, Option<&Removal>)>();
        for (entity, (_enemy, pos, steering, removal)) in query.iter() {
            if removal.is_some() {
                continue;
            }
            let reach = player_radius + steering.radius;
            if player_pos.distance_sq_to(pos) <= reach * reach {
                touching.push((entity, *pos - player_pos));
            }
        }
    }

    for &(enemy, away) in &touching {
        if let Ok(mut motion) = world.get::<&mut Motion>(enemy) {
            apply_pushback(&mut motion, away, tuning.pushback_strength);
        }
    }

    if let Some(&(enemy, away)) = touching.first() {
        let can_hit = world
            .get::<&Player>(player)
            .map(|p| {
                p.last_hit_at
                    .is_none_or(|at| now - at >= tuning.hit_cooldown_secs)
            })
            .unwrap_or(false);
        if can_hit {
            if let Ok(mut p) = world.get::<&mut Player>(player) {
                p.last_hit_at = Some(now);
            }
            if let Ok(mut motion) = world.get::<&mut Motion>(player) {
                apply_pushback(&mut motion, -away, tuning.pushback_strength);
            }
            events.push(SimEvent::PlayerHit {
                enemy_id: entity_id(enemy),
            });
        }
    }

    // Pickups within reach.
    let mut collected: Vec<(Entity, Pickup)> = Vec::new();
    {
        let reach = player_radius + tuning.pickup_collect_radius;
        let reach_sq = reach * reach;
        let mut query = world.query::<(&Pickup, &WorldPoint, Option<&Removal>)>();
        for (entity, (pickup, pos, removal)) in query.iter() {
            if removal.is_none() && player_pos.distance_sq_to(pos) <= reach_sq {
                collected.push((entity, *pickup));
            }
        }
    }
    for (entity, pickup) in collected {
        mark_collected(world, entity, pickup, events);
    }
}

/// Flag a pickup for removal and report the collection.
pub fn mark_collected(
    world: &mut World,
    entity: Entity,
    pickup: Pickup,
    events: &mut Vec<SimEvent>,
) {
    if world.insert_one(entity, Removal::Collected).is_ok() {
        events.push(SimEvent::PickupCollected {
            entity_id: entity_id(entity),
            kind: pickup.kind,
        });
    }
}
