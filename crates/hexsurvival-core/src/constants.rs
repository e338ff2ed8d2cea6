//! Simulation constants and tuning defaults.
//!
//! Every value here is the default for a named field in [`crate::config::Tuning`].

// --- Hex grid ---

/// Base hex radius (center to corner) in world units, before scaling.
pub const HEX_RADIUS: f64 = 22.0;

/// Scale applied to `HEX_RADIUS`. Effective radius = 22 * 8 = 176.
pub const HEX_SCALE: f64 = 8.0;

// --- Steering ---

/// Tick length the per-tick rates below were tuned against (60 Hz).
pub const REFERENCE_TICK_SECS: f64 = 1.0 / 60.0;

/// Fraction of pushback velocity kept after one reference tick.
pub const PUSHBACK_DECAY_PER_TICK: f64 = 0.88;

/// Pushback below this speed (units/s) snaps to zero.
pub const PUSHBACK_SNAP_SPEED: f64 = 1.0;

/// Exponent sharpening the direction-damp falloff.
pub const DIRECTION_DAMP_EXPONENT: f64 = 4.0;

/// Fraction of the remaining facing error closed per reference tick.
pub const TURN_LERP_PER_TICK: f64 = 0.15;

/// Seek intent goes to zero inside this distance of the target.
pub const ARRIVAL_THRESHOLD: f64 = 4.0;

// --- Player profile ---

pub const PLAYER_SPEED: f64 = 120.0;
pub const PLAYER_RADIUS: f64 = 16.0;
pub const PLAYER_AVOIDANCE_RADIUS: f64 = 32.0;
pub const PLAYER_AVOIDANCE_WEIGHT: f64 = 0.0;
pub const PLAYER_FORWARD_WEIGHT: f64 = 1.0;
pub const PLAYER_DIRECTION_DAMP: f64 = 0.0;

// --- Zombie profile ---

pub const ZOMBIE_SPEED: f64 = 45.0;
pub const ZOMBIE_RADIUS: f64 = 14.0;
pub const ZOMBIE_AVOIDANCE_RADIUS: f64 = 48.0;
pub const ZOMBIE_AVOIDANCE_WEIGHT: f64 = 1.5;
pub const ZOMBIE_FORWARD_WEIGHT: f64 = 1.0;
/// Zombies walking away from where they face slow to (1 - 0.6)^4 ≈ 2.5%.
pub const ZOMBIE_DIRECTION_DAMP: f64 = 0.6;

// --- Vehicle profile ---

pub const VEHICLE_SPEED: f64 = 140.0;
pub const VEHICLE_RADIUS: f64 = 28.0;
pub const VEHICLE_AVOIDANCE_RADIUS: f64 = 96.0;
pub const VEHICLE_AVOIDANCE_WEIGHT: f64 = 2.0;
pub const VEHICLE_FORWARD_WEIGHT: f64 = 1.0;
pub const VEHICLE_DIRECTION_DAMP: f64 = 0.3;

// --- Behavior ---

/// Zombies start chasing the player inside this distance.
pub const AGGRO_RADIUS: f64 = 400.0;

/// Chasing zombies give up beyond this distance.
pub const LEASH_RADIUS: f64 = 700.0;

/// Seconds between wander heading changes.
pub const WANDER_INTERVAL_SECS: f64 = 3.0;

/// Largest heading change per wander re-roll (radians).
pub const WANDER_TURN_MAX: f64 = std::f64::consts::FRAC_PI_2;

// --- Waves ---

/// Gap before each wave (seconds).
pub const WAVE_GAP_SECS: f64 = 60.0;

/// Active spawning portion of each wave (seconds).
pub const WAVE_DURATION_SECS: f64 = 30.0;

/// Spawn cadence during wave 0 (seconds between spawns).
pub const SPAWN_GAP_BASE_SECS: f64 = 4.0;

/// Cadence reduction per wave index.
pub const SPAWN_GAP_DECREMENT_SECS: f64 = 0.5;

/// Cadence never drops below this.
pub const SPAWN_GAP_FLOOR_SECS: f64 = 0.75;

/// Wave spawns appear on a ring this far from the player.
pub const RING_SPAWN_DISTANCE: f64 = 600.0;

// --- Cell content ---

/// Delay before a consumed cell becomes eligible again (seconds).
pub const RESPAWN_DELAY_SECS: f64 = 120.0;

/// Cells whose center is closer than this to the player never spawn.
pub const MIN_SPAWN_DISTANCE: f64 = 300.0;

/// Hex rings around the player's cell that get discovered.
pub const DISCOVERY_RANGE: i32 = 2;

/// Relative weight of an enemy outcome in the content roll.
pub const CONTENT_WEIGHT_ENEMY: f64 = 0.80;
pub const CONTENT_WEIGHT_HEALTH: f64 = 0.10;
pub const CONTENT_WEIGHT_AMMO: f64 = 0.07;
pub const CONTENT_WEIGHT_WEAPON: f64 = 0.03;

// --- Contacts ---

/// Knockback applied to the player per enemy contact (units/s).
pub const CONTACT_PUSHBACK_STRENGTH: f64 = 300.0;

/// Minimum seconds between two hits on the player.
pub const HIT_COOLDOWN_SECS: f64 = 0.5;

/// Player collects a pickup inside this distance (added to the player radius).
pub const PICKUP_COLLECT_RADIUS: f64 = 24.0;

// --- Cleanup ---

/// Wave-spawned enemies farther than this from the player are removed.
pub const STRAY_DESPAWN_DISTANCE: f64 = 1800.0;

// --- Engine ---

/// Frame deltas are clamped to this many seconds before reaching the systems.
pub const MAX_FRAME_SECS: f64 = 0.25;

/// World units per meter for GPS projection.
pub const UNITS_PER_METER: f64 = 1.0;
