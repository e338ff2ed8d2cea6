//! Tunable configuration.
//!
//! `Tuning` groups every named tunable. Defaults come from [`crate::constants`];
//! a JSON file may override any subset of fields.

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::components::Steering;
use crate::constants::*;
use crate::enums::ActorKind;

/// Errors raised while loading or validating a configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("invalid value for `{field}`: {reason}")]
    Invalid { field: &'static str, reason: String },
}

fn invalid(field: &'static str, reason: impl Into<String>) -> ConfigError {
    ConfigError::Invalid {
        field,
        reason: reason.into(),
    }
}

fn require_positive(field: &'static str, value: f64) -> Result<(), ConfigError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(invalid(field, format!("must be positive, got {value}")))
    }
}

fn require_non_negative(field: &'static str, value: f64) -> Result<(), ConfigError> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(invalid(field, format!("must be non-negative, got {value}")))
    }
}

/// Hex grid geometry.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct HexTuning {
    pub hex_radius: f64,
    pub scale: f64,
}

impl Default for HexTuning {
    fn default() -> Self {
        Self {
            hex_radius: HEX_RADIUS,
            scale: HEX_SCALE,
        }
    }
}

/// Rates shared by every steering actor.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SteeringTuning {
    pub reference_tick_secs: f64,
    pub pushback_decay_per_tick: f64,
    pub pushback_snap_speed: f64,
    pub damp_exponent: f64,
    pub turn_lerp_per_tick: f64,
    pub arrival_threshold: f64,
}

impl Default for SteeringTuning {
    fn default() -> Self {
        Self {
            reference_tick_secs: REFERENCE_TICK_SECS,
            pushback_decay_per_tick: PUSHBACK_DECAY_PER_TICK,
            pushback_snap_speed: PUSHBACK_SNAP_SPEED,
            damp_exponent: DIRECTION_DAMP_EXPONENT,
            turn_lerp_per_tick: TURN_LERP_PER_TICK,
            arrival_threshold: ARRIVAL_THRESHOLD,
        }
    }
}

/// Steering capability records per actor kind.
///
/// Deserializes field by field: any profile field left out of the JSON keeps
/// that kind's default.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(from = "ProfileOverrides")]
pub struct ActorProfiles {
    pub player: Steering,
    pub zombie: Steering,
    pub vehicle: Steering,
}

/// Partial `Steering` as it appears in a config file.
#[derive(Debug, Clone, Copy, Default, Deserialize)]
#[serde(default)]
struct SteeringOverride {
    speed: Option<f64>,
    radius: Option<f64>,
    avoidance_radius: Option<f64>,
    avoidance_weight: Option<f64>,
    forward_weight: Option<f64>,
    direction_damp: Option<f64>,
}

impl SteeringOverride {
    fn apply(self, base: Steering) -> Steering {
        Steering {
            speed: self.speed.unwrap_or(base.speed),
            radius: self.radius.unwrap_or(base.radius),
            avoidance_radius: self.avoidance_radius.unwrap_or(base.avoidance_radius),
            avoidance_weight: self.avoidance_weight.unwrap_or(base.avoidance_weight),
            forward_weight: self.forward_weight.unwrap_or(base.forward_weight),
            direction_damp: self.direction_damp.unwrap_or(base.direction_damp),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, Deserialize)]
#[serde(default)]
struct ProfileOverrides {
    player: SteeringOverride,
    zombie: SteeringOverride,
    vehicle: SteeringOverride,
}

impl From<ProfileOverrides> for ActorProfiles {
    fn from(overrides: ProfileOverrides) -> Self {
        let base = ActorProfiles::default();
        Self {
            player: overrides.player.apply(base.player),
            zombie: overrides.zombie.apply(base.zombie),
            vehicle: overrides.vehicle.apply(base.vehicle),
        }
    }
}

impl ActorProfiles {
    pub fn for_kind(&self, kind: ActorKind) -> Steering {
        match kind {
            ActorKind::Player => self.player,
            ActorKind::Zombie => self.zombie,
            ActorKind::Vehicle => self.vehicle,
        }
    }
}

impl Default for ActorProfiles {
    fn default() -> Self {
        Self {
            player: Steering {
                speed: PLAYER_SPEED,
                radius: PLAYER_RADIUS,
                avoidance_radius: PLAYER_AVOIDANCE_RADIUS,
                avoidance_weight: PLAYER_AVOIDANCE_WEIGHT,
                forward_weight: PLAYER_FORWARD_WEIGHT,
                direction_damp: PLAYER_DIRECTION_DAMP,
            },
            zombie: Steering {
                speed: ZOMBIE_SPEED,
                radius: ZOMBIE_RADIUS,
                avoidance_radius: ZOMBIE_AVOIDANCE_RADIUS,
                avoidance_weight: ZOMBIE_AVOIDANCE_WEIGHT,
                forward_weight: ZOMBIE_FORWARD_WEIGHT,
                direction_damp: ZOMBIE_DIRECTION_DAMP,
            },
            vehicle: Steering {
                speed: VEHICLE_SPEED,
                radius: VEHICLE_RADIUS,
                avoidance_radius: VEHICLE_AVOIDANCE_RADIUS,
                avoidance_weight: VEHICLE_AVOIDANCE_WEIGHT,
                forward_weight: VEHICLE_FORWARD_WEIGHT,
                direction_damp: VEHICLE_DIRECTION_DAMP,
            },
        }
    }
}

/// Wander/chase behavior.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BehaviorTuning {
    pub aggro_radius: f64,
    pub leash_radius: f64,
    pub wander_interval_secs: f64,
    pub wander_turn_max: f64,
}

impl Default for BehaviorTuning {
    fn default() -> Self {
        Self {
            aggro_radius: AGGRO_RADIUS,
            leash_radius: LEASH_RADIUS,
            wander_interval_secs: WANDER_INTERVAL_SECS,
            wander_turn_max: WANDER_TURN_MAX,
        }
    }
}

/// Wave timeline and spawn cadence.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct WaveTuning {
    pub gap_secs: f64,
    pub wave_secs: f64,
    pub spawn_gap_base_secs: f64,
    pub spawn_gap_decrement_secs: f64,
    pub spawn_gap_floor_secs: f64,
    pub ring_spawn_distance: f64,
}

impl Default for WaveTuning {
    fn default() -> Self {
        Self {
            gap_secs: WAVE_GAP_SECS,
            wave_secs: WAVE_DURATION_SECS,
            spawn_gap_base_secs: SPAWN_GAP_BASE_SECS,
            spawn_gap_decrement_secs: SPAWN_GAP_DECREMENT_SECS,
            spawn_gap_floor_secs: SPAWN_GAP_FLOOR_SECS,
            ring_spawn_distance: RING_SPAWN_DISTANCE,
        }
    }
}

/// Per-cell content spawning.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ContentTuning {
    pub respawn_delay_secs: f64,
    pub min_spawn_distance: f64,
    pub discovery_range: i32,
    pub weight_enemy: f64,
    pub weight_health: f64,
    pub weight_ammo: f64,
    pub weight_weapon: f64,
}

impl ContentTuning {
    pub fn total_weight(&self) -> f64 {
        self.weight_enemy + self.weight_health + self.weight_ammo + self.weight_weapon
    }
}

impl Default for ContentTuning {
    fn default() -> Self {
        Self {
            respawn_delay_secs: RESPAWN_DELAY_SECS,
            min_spawn_distance: MIN_SPAWN_DISTANCE,
            discovery_range: DISCOVERY_RANGE,
            weight_enemy: CONTENT_WEIGHT_ENEMY,
            weight_health: CONTENT_WEIGHT_HEALTH,
            weight_ammo: CONTENT_WEIGHT_AMMO,
            weight_weapon: CONTENT_WEIGHT_WEAPON,
        }
    }
}

/// Contacts, pickups and cleanup.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ContactTuning {
    pub pushback_strength: f64,
    pub hit_cooldown_secs: f64,
    pub pickup_collect_radius: f64,
    pub stray_despawn_distance: f64,
}

impl Default for ContactTuning {
    fn default() -> Self {
        Self {
            pushback_strength: CONTACT_PUSHBACK_STRENGTH,
            hit_cooldown_secs: HIT_COOLDOWN_SECS,
            pickup_collect_radius: PICKUP_COLLECT_RADIUS,
            stray_despawn_distance: STRAY_DESPAWN_DISTANCE,
        }
    }
}

/// Every tunable of the simulation.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    pub hex: HexTuning,
    pub steering: SteeringTuning,
    pub actors: ActorProfiles,
    pub behavior: BehaviorTuning,
    pub waves: WaveTuning,
    pub content: ContentTuning,
    pub contact: ContactTuning,
}

impl Tuning {
    /// Parse and validate a JSON document. Missing fields keep their defaults.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let tuning: Tuning = serde_json::from_str(json)?;
        tuning.validate()?;
        Ok(tuning)
    }

    /// Read, parse and validate a JSON file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        let tuning = Self::from_json_str(&contents)?;
        tracing::info!("Loaded tuning from {}", path.display());
        Ok(tuning)
    }

    /// Check every field for values the simulation cannot run with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        require_positive("hex.hex_radius", self.hex.hex_radius)?;
        require_positive("hex.scale", self.hex.scale)?;

        let s = &self.steering;
        require_positive("steering.reference_tick_secs", s.reference_tick_secs)?;
        if !(s.pushback_decay_per_tick > 0.0 && s.pushback_decay_per_tick < 1.0) {
            return Err(invalid(
                "steering.pushback_decay_per_tick",
                format!("must be in (0, 1), got {}", s.pushback_decay_per_tick),
            ));
        }
        require_positive("steering.pushback_snap_speed", s.pushback_snap_speed)?;
        require_positive("steering.damp_exponent", s.damp_exponent)?;
        if !(s.turn_lerp_per_tick > 0.0 && s.turn_lerp_per_tick <= 1.0) {
            return Err(invalid(
                "steering.turn_lerp_per_tick",
                format!("must be in (0, 1], got {}", s.turn_lerp_per_tick),
            ));
        }
        require_non_negative("steering.arrival_threshold", s.arrival_threshold)?;

        for (field, profile) in [
            ("actors.player", &self.actors.player),
            ("actors.zombie", &self.actors.zombie),
            ("actors.vehicle", &self.actors.vehicle),
        ] {
            validate_profile(field, profile)?;
        }

        let b = &self.behavior;
        require_positive("behavior.aggro_radius", b.aggro_radius)?;
        if b.leash_radius < b.aggro_radius {
            return Err(invalid(
                "behavior.leash_radius",
                "must not be smaller than aggro_radius",
            ));
        }
        require_positive("behavior.wander_interval_secs", b.wander_interval_secs)?;
        require_non_negative("behavior.wander_turn_max", b.wander_turn_max)?;

        let w = &self.waves;
        require_non_negative("waves.gap_secs", w.gap_secs)?;
        require_non_negative("waves.wave_secs", w.wave_secs)?;
        if w.gap_secs + w.wave_secs <= 0.0 {
            return Err(invalid("waves", "gap_secs + wave_secs must be positive"));
        }
        require_positive("waves.spawn_gap_floor_secs", w.spawn_gap_floor_secs)?;
        require_non_negative("waves.spawn_gap_decrement_secs", w.spawn_gap_decrement_secs)?;
        if w.spawn_gap_base_secs < w.spawn_gap_floor_secs {
            return Err(invalid(
                "waves.spawn_gap_base_secs",
                "must not be below spawn_gap_floor_secs",
            ));
        }
        require_positive("waves.ring_spawn_distance", w.ring_spawn_distance)?;

        let c = &self.content;
        require_non_negative("content.respawn_delay_secs", c.respawn_delay_secs)?;
        require_non_negative("content.min_spawn_distance", c.min_spawn_distance)?;
        if c.discovery_range < 0 {
            return Err(invalid("content.discovery_range", "must be non-negative"));
        }
        for (field, weight) in [
            ("content.weight_enemy", c.weight_enemy),
            ("content.weight_health", c.weight_health),
            ("content.weight_ammo", c.weight_ammo),
            ("content.weight_weapon", c.weight_weapon),
        ] {
            require_non_negative(field, weight)?;
        }
        if c.total_weight() <= 0.0 {
            return Err(invalid("content", "weights must sum to a positive total"));
        }

        let k = &self.contact;
        require_non_negative("contact.pushback_strength", k.pushback_strength)?;
        require_non_negative("contact.hit_cooldown_secs", k.hit_cooldown_secs)?;
        require_non_negative("contact.pickup_collect_radius", k.pickup_collect_radius)?;
        require_positive("contact.stray_despawn_distance", k.stray_despawn_distance)?;

        Ok(())
    }
}

fn validate_profile(field: &'static str, p: &Steering) -> Result<(), ConfigError> {
    require_non_negative(field, p.speed)?;
    require_positive(field, p.radius)?;
    require_positive(field, p.avoidance_radius)?;
    require_non_negative(field, p.avoidance_weight)?;
    require_non_negative(field, p.forward_weight)?;
    if !(0.0..=1.0).contains(&p.direction_damp) {
        return Err(invalid(
            field,
            format!("direction_damp must be in [0, 1], got {}", p.direction_damp),
        ));
    }
    Ok(())
}
