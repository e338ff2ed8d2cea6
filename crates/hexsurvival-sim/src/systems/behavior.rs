//! Behavior system: runs the wander/chase FSM for every enemy.
//!
//! Calls the pure FSM from hexsurvival-steering and writes the result back
//! into `Behavior` and `Motion`.

use hecs::World;
use rand_chacha::ChaCha8Rng;

use hexsurvival_core::components::{Actor, Behavior, Enemy, Motion};
use hexsurvival_core::config::BehaviorTuning;
use hexsurvival_core::enums::BehaviorState;
use hexsurvival_core::types::WorldPoint;

use hexsurvival_steering::behavior::{evaluate, wander_tick, BehaviorContext};

/// Evaluate every enemy's behavior for this tick.
pub fn run(
    world: &mut World,
    player: Option<WorldPoint>,
    tuning: &BehaviorTuning,
    rng: &mut ChaCha8Rng,
    dt: f64,
) {
    for (entity, (actor, _enemy, pos, behavior, motion)) in
        world.query_mut::<(&Actor, &Enemy, &WorldPoint, &mut Behavior, &mut Motion)>()
    {
        let ctx = BehaviorContext {
            kind: actor.kind,
            state: behavior.state,
            distance_to_player: player.map(|p| pos.distance_to(&p)),
        };
        let update = evaluate(&ctx, tuning);
        if update.state_changed {
            tracing::trace!(
                "{:?} {:?}: {:?} -> {:?}",
                actor.kind,
                entity,
                behavior.state,
                update.new_state
            );
            behavior.state = update.new_state;
            behavior.wander_timer = tuning.wander_interval_secs;
        }

        if behavior.state == BehaviorState::Wander {
            let (facing, timer) =
                wander_tick(motion.facing, behavior.wander_timer, dt, tuning, rng);
            motion.facing = facing;
            behavior.wander_timer = timer;
        }
    }
}
