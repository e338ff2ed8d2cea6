//! Autonomous behavior state machine for zombies and vehicles.
//!
//! Pure functions that compute state transitions and steering intent from an
//! actor's kind, current state, and distance to the player.
//! No ECS dependency; operates on plain data.

use rand::Rng;

use hexsurvival_core::config::BehaviorTuning;
use hexsurvival_core::enums::{ActorKind, BehaviorState};
use hexsurvival_core::types::WorldPoint;

use crate::steering::{wrap_angle, Intent};

/// Input to the behavior FSM for a single actor.
pub struct BehaviorContext {
    pub kind: ActorKind,
    pub state: BehaviorState,
    /// None when there is no player in the world.
    pub distance_to_player: Option<f64>,
}

/// Output from the behavior FSM.
pub struct BehaviorUpdate {
    pub new_state: BehaviorState,
    pub state_changed: bool,
}

/// Evaluate the FSM for one actor.
pub fn evaluate(ctx: &BehaviorContext, tuning: &BehaviorTuning) -> BehaviorUpdate {
    let new_state = match ctx.kind {
        ActorKind::Player => BehaviorState::Idle,
        // Vehicles never pursue.
        ActorKind::Vehicle => BehaviorState::Wander,
        ActorKind::Zombie => evaluate_zombie(ctx, tuning),
    };
    BehaviorUpdate {
        new_state,
        state_changed: new_state != ctx.state,
    }
}

fn evaluate_zombie(ctx: &BehaviorContext, tuning: &BehaviorTuning) -> BehaviorState {
    let Some(distance) = ctx.distance_to_player else {
        return match ctx.state {
            BehaviorState::Chase => BehaviorState::Wander,
            other => other,
        };
    };

    match ctx.state {
        BehaviorState::Idle | BehaviorState::Wander if distance <= tuning.aggro_radius => {
            BehaviorState::Chase
        }
        BehaviorState::Chase if distance > tuning.leash_radius => BehaviorState::Wander,
        other => other,
    }
}

/// Steering intent for a behavior state.
pub fn intent_for(state: BehaviorState, player: Option<WorldPoint>) -> Intent {
    match (state, player) {
        (BehaviorState::Chase, Some(target)) => Intent::Seek(target),
        (BehaviorState::Chase, None) | (BehaviorState::Wander, _) => Intent::Forward,
        (BehaviorState::Idle, _) => Intent::Hold,
    }
}

/// Count down the wander timer; on expiry re-roll the heading.
///
/// Returns the (possibly new) facing and the updated timer.
pub fn wander_tick(
    facing: f64,
    timer: f64,
    dt: f64,
    tuning: &BehaviorTuning,
    rng: &mut impl Rng,
) -> (f64, f64) {
    let timer = timer - dt;
    if timer > 0.0 {
        return (facing, timer);
    }
    let turn = if tuning.wander_turn_max > 0.0 {
        rng.gen_range(-tuning.wander_turn_max..=tuning.wander_turn_max)
    } else {
        0.0
    };
    (wrap_angle(facing + turn), tuning.wander_interval_secs)
}
