//! Steering model shared by every mobile actor.
//!
//! One integrator for player, zombies and vehicles. Each tick it blends a
//! weighted avoidance vector with the actor's intent, damps speed by how far
//! the intent strays from the facing direction, integrates position, and
//! layers a decaying pushback velocity on top.
//!
//! All rates are continuous-time: per-tick constants are interpreted against
//! `reference_tick_secs` and raised to `dt / reference_tick_secs`, so results
//! do not depend on the caller's frame rate.

use glam::DVec2;

use hexsurvival_core::components::{Motion, Steering};
use hexsurvival_core::config::SteeringTuning;
use hexsurvival_core::types::WorldPoint;

use crate::avoidance::{avoidance_vector, Neighbor};

/// What the actor wants to do this tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Intent {
    /// No directional movement; pushback still integrates.
    Hold,
    /// Walk along the current facing.
    Forward,
    /// Walk toward a point.
    Seek(WorldPoint),
}

/// Mutable view of one actor for a single step.
pub struct ActorBody<'a> {
    pub position: &'a mut WorldPoint,
    pub motion: &'a mut Motion,
    pub steering: &'a Steering,
}

/// What a step did, for callers that care.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct StepResult {
    /// Unit movement direction (zero if the actor did not steer).
    pub direction: DVec2,
    /// Speed multiplier from direction damping.
    pub damp: f64,
    /// Total displacement this step, pushback included.
    pub displacement: DVec2,
}

/// Normalize, returning zero for zero-length input instead of NaN.
pub fn normalize_or_zero(v: DVec2) -> DVec2 {
    let out = v.normalize_or_zero();
    debug_assert!(out.is_finite(), "normalize produced non-finite {out:?} from {v:?}");
    out
}

/// Unit vector for a facing angle.
pub fn facing_vector(facing: f64) -> DVec2 {
    DVec2::new(facing.cos(), facing.sin())
}

/// Wrap an angle into [-PI, PI).
pub fn wrap_angle(angle: f64) -> f64 {
    use std::f64::consts::{PI, TAU};
    (angle + PI).rem_euclid(TAU) - PI
}

/// Add an impulse along `direction`. Impulses within a tick are additive.
pub fn apply_pushback(motion: &mut Motion, direction: DVec2, strength: f64) {
    motion.pushback += normalize_or_zero(direction) * strength;
}

/// The per-actor integrator, parameterized by shared tuning.
#[derive(Debug, Clone)]
pub struct SteeringModel {
    tuning: SteeringTuning,
}

impl SteeringModel {
    pub fn new(tuning: SteeringTuning) -> Self {
        Self { tuning }
    }

    pub fn tuning(&self) -> &SteeringTuning {
        &self.tuning
    }

    /// Scale a per-reference-tick rate to an arbitrary `dt`.
    fn per_dt(&self, rate_per_tick: f64, dt: f64) -> f64 {
        rate_per_tick.powf(dt / self.tuning.reference_tick_secs)
    }

    /// Intent vector before weighting.
    pub fn intent_vector(&self, position: WorldPoint, facing: f64, intent: Intent) -> DVec2 {
        match intent {
            Intent::Hold => DVec2::ZERO,
            Intent::Forward => facing_vector(facing),
            Intent::Seek(target) => {
                let to_target = target - position;
                if to_target.length() <= self.tuning.arrival_threshold {
                    DVec2::ZERO
                } else {
                    normalize_or_zero(to_target)
                }
            }
        }
    }

    /// `max(0, 1 - damp * (1 - dot(forward, dir)) / 2) ^ exponent`.
    ///
    /// 1 when the intent lies along the facing; smallest when directly behind.
    pub fn damp_factor(&self, facing: f64, direction: DVec2, direction_damp: f64) -> f64 {
        let dot = facing_vector(facing).dot(direction).clamp(-1.0, 1.0);
        let base = (1.0 - direction_damp * (1.0 - dot) / 2.0).max(0.0);
        base.powf(self.tuning.damp_exponent)
    }

    /// Decay a pushback velocity over `dt`, snapping slow residue to zero.
    pub fn decay_pushback(&self, pushback: DVec2, dt: f64) -> DVec2 {
        let decayed = pushback * self.per_dt(self.tuning.pushback_decay_per_tick, dt);
        if decayed.length() < self.tuning.pushback_snap_speed {
            DVec2::ZERO
        } else {
            decayed
        }
    }

    /// Rotate `facing` toward `target` by the frame-rate independent lerp.
    pub fn turn_toward(&self, facing: f64, target: f64, dt: f64) -> f64 {
        let remaining = self.per_dt(1.0 - self.tuning.turn_lerp_per_tick, dt);
        let diff = wrap_angle(target - facing);
        wrap_angle(facing + diff * (1.0 - remaining))
    }

    /// Advance one actor by `dt` seconds.
    pub fn step(
        &self,
        body: ActorBody<'_>,
        intent: Intent,
        neighbors: &[&Neighbor],
        dt: f64,
    ) -> StepResult {
        let ActorBody {
            position,
            motion,
            steering,
        } = body;
        let start = *position;

        let mut result = StepResult {
            damp: 1.0,
            ..Default::default()
        };

        if intent != Intent::Hold {
            let avoidance = avoidance_vector(*position, neighbors, steering.avoidance_radius)
                * steering.avoidance_weight;
            let to_target = self.intent_vector(*position, motion.facing, intent);
            let direction = normalize_or_zero(avoidance + to_target * steering.forward_weight);

            if direction != DVec2::ZERO {
                // Damp follows the intent, not the avoidance-bent direction.
                let damp = if to_target == DVec2::ZERO {
                    1.0
                } else {
                    self.damp_factor(motion.facing, to_target, steering.direction_damp)
                };
                *position = *position + direction * (steering.speed * dt * damp);
                motion.facing =
                    self.turn_toward(motion.facing, direction.y.atan2(direction.x), dt);
                result.direction = direction;
                result.damp = damp;
            }
        }

        *position = *position + motion.pushback * dt;
        motion.pushback = self.decay_pushback(motion.pushback, dt);

        debug_assert!(
            position.is_finite(),
            "steering produced non-finite position {position:?}"
        );
        result.displacement = *position - start;
        result
    }
}
