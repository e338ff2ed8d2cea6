//! Simulation engine, the orchestrator of the spatial core.
//!
//! `SimulationEngine` owns the hecs ECS world, the cell content manager and
//! the wave scheduler, processes host commands, runs all systems, and produces
//! `SimSnapshot`s. Completely headless, enabling deterministic testing.

use std::collections::VecDeque;

use hecs::{Entity, World};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use hexsurvival_core::commands::PlayerCommand;
use hexsurvival_core::components::{Destination, Enemy, Motion, Pickup, Removal};
use hexsurvival_core::config::{ConfigError, Tuning};
use hexsurvival_core::constants::{MAX_FRAME_SECS, UNITS_PER_METER};
use hexsurvival_core::enums::{ActorKind, BehaviorState, GamePhase};
use hexsurvival_core::events::SimEvent;
use hexsurvival_core::state::SimSnapshot;
use hexsurvival_core::types::{AxialHex, SimTime, WorldPoint};
use hexsurvival_grid::{GeoProjection, HexBuckets, HexLayout};
use hexsurvival_steering::steering::{apply_pushback, SteeringModel};

use glam::DVec2;

use crate::cells::{CellContentManager, EntityDescriptor};
use crate::systems;
use crate::systems::{entity_id, player_position, resolve_id};
use crate::waves::WaveScheduler;
use crate::world_setup;

/// Configuration for starting a new simulation.
#[derive(Debug, Clone)]
pub struct SimConfig {
    /// RNG seed for determinism. Same seed = same simulation.
    pub seed: u64,
    /// Initial time scale (1.0 = normal).
    pub time_scale: f64,
    /// Longest frame the engine will simulate in one tick; stalls are clamped.
    pub max_frame_secs: f64,
    pub tuning: Tuning,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            seed: 42,
            time_scale: 1.0,
            max_frame_secs: MAX_FRAME_SECS,
            tuning: Tuning::default(),
        }
    }
}

/// The simulation engine. Owns the ECS world and all sim state.
pub struct SimulationEngine {
    world: World,
    time: SimTime,
    phase: GamePhase,
    time_scale: f64,
    max_frame_secs: f64,
    rng: ChaCha8Rng,
    tuning: Tuning,
    command_queue: VecDeque<PlayerCommand>,
    despawn_buffer: Vec<Entity>,
    events: Vec<SimEvent>,

    layout: HexLayout,
    steering: SteeringModel,
    buckets: HexBuckets<usize>,
    cells: CellContentManager<Entity>,
    waves: WaveScheduler,

    player: Option<Entity>,
    player_cell: Option<AxialHex>,
    projection: Option<GeoProjection>,
}

impl SimulationEngine {
    /// Create a new simulation engine with the given config.
    ///
    /// A tuning that fails validation is logged and replaced by the defaults;
    /// use [`SimulationEngine::try_new`] to surface the error instead.
    pub fn new(mut config: SimConfig) -> Self {
        if let Err(err) = config.tuning.validate() {
            tracing::warn!("Rejected tuning ({err}), falling back to defaults");
            config.tuning = Tuning::default();
        }
        Self::build(config)
    }

    /// Create a new simulation engine, failing on an invalid tuning.
    pub fn try_new(config: SimConfig) -> Result<Self, ConfigError> {
        config.tuning.validate()?;
        Ok(Self::build(config))
    }

    fn build(config: SimConfig) -> Self {
        let tuning = config.tuning;
        let layout = HexLayout::from_tuning(&tuning.hex);
        Self {
            world: World::new(),
            time: SimTime::default(),
            phase: GamePhase::default(),
            time_scale: config.time_scale,
            max_frame_secs: config.max_frame_secs,
            rng: ChaCha8Rng::seed_from_u64(config.seed),
            command_queue: VecDeque::new(),
            despawn_buffer: Vec::new(),
            events: Vec::new(),
            layout,
            steering: SteeringModel::new(tuning.steering.clone()),
            buckets: HexBuckets::new(layout),
            cells: CellContentManager::new(layout, tuning.content.clone()),
            waves: WaveScheduler::new(tuning.waves.clone()),
            player: None,
            player_cell: None,
            projection: None,
            tuning,
        }
    }

    /// Queue a host command for processing at the next tick boundary.
    pub fn queue_command(&mut self, command: PlayerCommand) {
        self.command_queue.push_back(command);
    }

    /// Queue multiple commands.
    pub fn queue_commands(&mut self, commands: impl IntoIterator<Item = PlayerCommand>) {
        self.command_queue.extend(commands);
    }

    /// Advance the simulation by a frame of `delta_ms` wall-clock milliseconds
    /// and return the resulting snapshot.
    pub fn tick(&mut self, delta_ms: f64) -> SimSnapshot {
        self.process_commands();

        if self.phase == GamePhase::Active {
            let frame_secs = (delta_ms / 1000.0).clamp(0.0, self.max_frame_secs);
            let dt = frame_secs * self.time_scale;
            self.time.advance(dt);
            self.run_systems(dt);
        }

        let events = std::mem::take(&mut self.events);
        systems::snapshot::build_snapshot(
            &self.world,
            &self.time,
            self.phase,
            self.player,
            &self.waves,
            &self.cells,
            events,
        )
    }

    /// Get the current game phase.
    pub fn phase(&self) -> GamePhase {
        self.phase
    }

    /// Get the current simulation time.
    pub fn time(&self) -> SimTime {
        self.time
    }

    /// Get the current time scale.
    pub fn time_scale(&self) -> f64 {
        self.time_scale
    }

    pub fn tuning(&self) -> &Tuning {
        &self.tuning
    }

    /// Get a read-only reference to the ECS world.
    pub fn world(&self) -> &World {
        &self.world
    }

    /// The player entity, once a session has started.
    pub fn player(&self) -> Option<Entity> {
        self.player
    }

    pub fn player_position(&self) -> Option<WorldPoint> {
        player_position(&self.world, self.player)
    }

    pub fn cells(&self) -> &CellContentManager<Entity> {
        &self.cells
    }

    pub fn waves(&self) -> &WaveScheduler {
        &self.waves
    }

    /// Mutable access for registering wave callbacks.
    pub fn waves_mut(&mut self) -> &mut WaveScheduler {
        &mut self.waves
    }

    pub fn projection(&self) -> Option<&GeoProjection> {
        self.projection.as_ref()
    }

    /// Process all queued commands.
    fn process_commands(&mut self) {
        while let Some(command) = self.command_queue.pop_front() {
            self.handle_command(command);
        }
    }

    /// Handle a single host command.
    fn handle_command(&mut self, command: PlayerCommand) {
        match command {
            PlayerCommand::StartSession => {
                if self.phase == GamePhase::Idle {
                    self.start_session();
                }
            }
            PlayerCommand::RestartSession => {
                self.world.clear();
                self.cells.clear();
                self.start_session();
            }
            PlayerCommand::Pause => {
                if self.phase == GamePhase::Active {
                    self.phase = GamePhase::Paused;
                }
            }
            PlayerCommand::Resume => {
                if self.phase == GamePhase::Paused {
                    self.phase = GamePhase::Active;
                }
            }
            PlayerCommand::SetTimeScale { scale } => {
                self.time_scale = scale.clamp(0.0, 4.0);
            }
            PlayerCommand::AnchorGeo { lat, lon } => {
                self.anchor(lat, lon);
            }
            PlayerCommand::SetPlayerGeo { lat, lon } => {
                let projection = match self.projection {
                    Some(projection) => projection,
                    None => self.anchor(lat, lon),
                };
                let target = projection.to_world(lat, lon);
                self.set_destination(target);
            }
            PlayerCommand::SetPlayerPosition { x, y } => {
                let Some(player) = self.live_player() else {
                    return;
                };
                if let Ok(mut pos) = self.world.get::<&mut WorldPoint>(player) {
                    *pos = WorldPoint::new(x, y);
                }
                let _ = self.world.remove_one::<Destination>(player);
            }
            PlayerCommand::MovePlayerTo { x, y } => {
                self.set_destination(WorldPoint::new(x, y));
            }
            PlayerCommand::ApplyPushback {
                actor_id,
                dx,
                dy,
                strength,
            } => {
                let Some(entity) = resolve_id(&self.world, actor_id) else {
                    tracing::warn!("ApplyPushback: unknown actor {}", actor_id);
                    return;
                };
                if let Ok(mut motion) = self.world.get::<&mut Motion>(entity) {
                    apply_pushback(&mut motion, DVec2::new(dx, dy), strength);
                }
            }
            PlayerCommand::KillActor { actor_id } => {
                let entity = resolve_id(&self.world, actor_id)
                    .filter(|e| self.world.get::<&Enemy>(*e).is_ok());
                match entity {
                    Some(entity) => {
                        let _ = self.world.insert_one(entity, Removal::Killed);
                    }
                    None => tracing::warn!("KillActor: unknown enemy {}", actor_id),
                }
            }
            PlayerCommand::CollectPickup { entity_id } => {
                let found = resolve_id(&self.world, entity_id).and_then(|e| {
                    let pickup = *self.world.get::<&Pickup>(e).ok()?;
                    let pending = self.world.get::<&Removal>(e).is_ok();
                    (!pending).then_some((e, pickup))
                });
                match found {
                    Some((entity, pickup)) => systems::contact::mark_collected(
                        &mut self.world,
                        entity,
                        pickup,
                        &mut self.events,
                    ),
                    None => tracing::warn!("CollectPickup: unknown pickup {}", entity_id),
                }
            }
            PlayerCommand::SpawnActor { kind, x, y, facing } => {
                if !kind.is_enemy() {
                    tracing::warn!("SpawnActor: {:?} cannot be spawned directly", kind);
                    return;
                }
                let state = match kind {
                    ActorKind::Zombie => BehaviorState::Idle,
                    _ => BehaviorState::Wander,
                };
                world_setup::spawn_enemy(
                    &mut self.world,
                    &self.tuning.actors,
                    kind,
                    WorldPoint::new(x, y),
                    facing,
                    state,
                    &self.tuning.behavior,
                );
            }
        }
    }

    /// Reset clocks and spawn the player at the origin.
    fn start_session(&mut self) {
        self.time = SimTime::default();
        self.waves.reset();
        self.player_cell = None;
        self.player = Some(world_setup::spawn_player(
            &mut self.world,
            &self.tuning.actors,
            WorldPoint::ORIGIN,
        ));
        self.phase = GamePhase::Active;
        self.events.push(SimEvent::SessionStarted);
        tracing::info!("Session started");
    }

    fn anchor(&mut self, lat: f64, lon: f64) -> GeoProjection {
        let projection = GeoProjection::new(lat, lon, UNITS_PER_METER);
        self.projection = Some(projection);
        tracing::info!("Geo anchor set to ({:.6}, {:.6})", lat, lon);
        projection
    }

    fn live_player(&self) -> Option<Entity> {
        let player = self.player.filter(|p| self.world.contains(*p));
        if player.is_none() {
            tracing::warn!("No player in the world; command ignored");
        }
        player
    }

    fn set_destination(&mut self, target: WorldPoint) {
        let Some(player) = self.live_player() else {
            return;
        };
        let _ = self.world.insert_one(player, Destination(target));
    }

    /// Track the player's cell and discover content around it on a crossing.
    fn track_player_cell(&mut self, player: WorldPoint) {
        let cell = self.layout.world_to_hex(player);
        if self.player_cell == Some(cell) {
            return;
        }
        self.events.push(SimEvent::PlayerCellChanged {
            from: self.player_cell,
            to: cell,
        });
        tracing::debug!("Player entered cell {}", cell);
        self.player_cell = Some(cell);

        let now = self.time.elapsed_secs;
        let world = &mut self.world;
        let actors = &self.tuning.actors;
        let behavior = &self.tuning.behavior;
        let spawned = self.cells.on_player_moved(cell, player, now, &mut self.rng, |d| {
            world_setup::spawn_content(world, actors, behavior, d)
        });
        self.report_spawns(&spawned);
    }

    /// Retry cells whose respawn timer has elapsed.
    fn respawn_cells(&mut self, player: WorldPoint) {
        let now = self.time.elapsed_secs;
        let world = &mut self.world;
        let actors = &self.tuning.actors;
        let behavior = &self.tuning.behavior;
        let spawned = self.cells.tick(now, player, &mut self.rng, |d| {
            world_setup::spawn_content(world, actors, behavior, d)
        });
        self.report_spawns(&spawned);
    }

    fn report_spawns(&mut self, spawned: &[EntityDescriptor]) {
        for descriptor in spawned {
            let Some(entity) = self.cells.cell(descriptor.hex).and_then(|c| c.content) else {
                continue;
            };
            self.events.push(SimEvent::ContentSpawned {
                hex: descriptor.hex,
                entity_id: entity_id(entity),
                content: descriptor.content,
                position: descriptor.position,
            });
        }
    }

    /// Run all systems in order.
    fn run_systems(&mut self, dt: f64) {
        let player = player_position(&self.world, self.player);

        // 1. Player cell tracking + discovery
        // 2. Cell respawns
        if let Some(pos) = player {
            self.track_player_cell(pos);
            self.respawn_cells(pos);
        }
        // 3. Wave timeline and ring spawns
        systems::wave_spawner::run(
            &mut self.world,
            &mut self.waves,
            &mut self.rng,
            player,
            &self.tuning.actors,
            &self.tuning.behavior,
            dt,
            &mut self.events,
        );
        // 4. Behavior FSM
        systems::behavior::run(&mut self.world, player, &self.tuning.behavior, &mut self.rng, dt);
        // 5. Steering
        systems::movement::run(&mut self.world, &self.steering, &mut self.buckets, player, dt);
        // 6. Contacts
        systems::contact::run(
            &mut self.world,
            self.player,
            &self.tuning.contact,
            self.time.elapsed_secs,
            &mut self.events,
        );
        // 7. Cleanup (killed, collected, strays)
        let player = player_position(&self.world, self.player);
        systems::cleanup::run(
            &mut self.world,
            &mut self.cells,
            player,
            self.tuning.contact.stray_despawn_distance,
            self.time.elapsed_secs,
            &mut self.despawn_buffer,
            &mut self.events,
        );
    }

    /// Spawn an enemy directly (for tests).
    #[cfg(test)]
    pub(crate) fn spawn_test_enemy(
        &mut self,
        kind: ActorKind,
        position: WorldPoint,
        state: BehaviorState,
    ) -> Entity {
        world_setup::spawn_enemy(
            &mut self.world,
            &self.tuning.actors,
            kind,
            position,
            0.0,
            state,
            &self.tuning.behavior,
        )
    }
}
