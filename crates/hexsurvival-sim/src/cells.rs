//! Per-hex content lifecycle.
//!
//! Every discovered hex owns a [`CellState`]: empty, occupied by one piece of
//! content (an enemy or a pickup), or waiting out a respawn delay after its
//! content was consumed. The manager holds entity references as plain keys and
//! never owns the entities themselves; the caller spawns and despawns them.
//!
//! Cells are kept in a `BTreeMap` so respawn sweeps visit them in a fixed
//! order and consume random numbers deterministically.

use std::collections::{BTreeMap, HashMap};
use std::hash::Hash;

use rand::Rng;

use hexsurvival_core::config::ContentTuning;
use hexsurvival_core::enums::{CellStatus, ContentKind, PickupKind};
use hexsurvival_core::types::{AxialHex, WorldPoint};
use hexsurvival_grid::{hexes_in_range, HexLayout};

/// What a successful spawn asks the caller to create.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EntityDescriptor {
    pub hex: AxialHex,
    pub content: ContentKind,
    /// World center of the owning hex.
    pub position: WorldPoint,
}

/// Occupancy of one hex.
#[derive(Debug, Clone, PartialEq)]
pub struct CellState<E> {
    /// Live content, if any.
    pub content: Option<E>,
    /// Kind of the live content.
    pub kind: Option<ContentKind>,
    /// Elapsed seconds when content was last consumed.
    pub last_consumed_at: Option<f64>,
    /// Armed respawn time. Left in place while the player blocks the spawn.
    pub respawn_at: Option<f64>,
}

impl<E> Default for CellState<E> {
    fn default() -> Self {
        Self {
            content: None,
            kind: None,
            last_consumed_at: None,
            respawn_at: None,
        }
    }
}

impl<E> CellState<E> {
    pub fn status(&self) -> CellStatus {
        if self.content.is_some() {
            CellStatus::Occupied
        } else if self.respawn_at.is_some() {
            CellStatus::AwaitingRespawn
        } else {
            CellStatus::Empty
        }
    }

    pub fn is_empty(&self) -> bool {
        self.content.is_none()
    }
}

/// Roll a content kind from the configured weights.
pub fn roll_content(tuning: &ContentTuning, rng: &mut impl Rng) -> ContentKind {
    let total = tuning.total_weight();
    let mut roll = rng.gen::<f64>() * total;
    let table = [
        (tuning.weight_enemy, ContentKind::Enemy),
        (tuning.weight_health, ContentKind::Pickup(PickupKind::Health)),
        (tuning.weight_ammo, ContentKind::Pickup(PickupKind::Ammo)),
        (tuning.weight_weapon, ContentKind::Pickup(PickupKind::Weapon)),
    ];
    for (weight, kind) in table {
        if roll < weight {
            return kind;
        }
        roll -= weight;
    }
    // Float residue at the very top of the range.
    table
        .iter()
        .rev()
        .find(|(weight, _)| *weight > 0.0)
        .map(|(_, kind)| *kind)
        .unwrap_or(ContentKind::Enemy)
}

/// Tracks content per discovered hex and drives delayed respawns.
#[derive(Debug, Clone)]
pub struct CellContentManager<E> {
    layout: HexLayout,
    tuning: ContentTuning,
    cells: BTreeMap<AxialHex, CellState<E>>,
    owners: HashMap<E, AxialHex>,
}

impl<E: Copy + Eq + Hash> CellContentManager<E> {
    pub fn new(layout: HexLayout, tuning: ContentTuning) -> Self {
        Self {
            layout,
            tuning,
            cells: BTreeMap::new(),
            owners: HashMap::new(),
        }
    }

    pub fn layout(&self) -> &HexLayout {
        &self.layout
    }

    pub fn tuning(&self) -> &ContentTuning {
        &self.tuning
    }

    /// Number of discovered cells.
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn cell(&self, hex: AxialHex) -> Option<&CellState<E>> {
        self.cells.get(&hex)
    }

    /// Discovered cells in hex order.
    pub fn cells(&self) -> impl Iterator<Item = (&AxialHex, &CellState<E>)> {
        self.cells.iter()
    }

    /// Forget every cell (session restart).
    pub fn clear(&mut self) {
        self.cells.clear();
        self.owners.clear();
    }

    /// Ensure `hex` has a cell. Returns true if it was newly created.
    pub fn register_hex(&mut self, hex: AxialHex) -> bool {
        if self.cells.contains_key(&hex) {
            return false;
        }
        self.cells.insert(hex, CellState::default());
        true
    }

    /// True iff the cell exists, holds no live content, and its center is at
    /// least the minimum spawn distance from the player.
    pub fn can_spawn_in(&self, hex: AxialHex, player_pos: WorldPoint) -> bool {
        let Some(cell) = self.cells.get(&hex) else {
            return false;
        };
        if !cell.is_empty() {
            return false;
        }
        let center = self.layout.hex_to_world(hex);
        center.distance_to(&player_pos) >= self.tuning.min_spawn_distance
    }

    /// Roll and place content in `hex` if it is eligible.
    ///
    /// `spawn` creates the entity and returns its reference; it is only
    /// called when the spawn goes ahead. No state changes otherwise.
    pub fn try_spawn(
        &mut self,
        hex: AxialHex,
        player_pos: WorldPoint,
        rng: &mut impl Rng,
        spawn: impl FnOnce(&EntityDescriptor) -> E,
    ) -> Option<EntityDescriptor> {
        if !self.can_spawn_in(hex, player_pos) {
            return None;
        }
        let descriptor = EntityDescriptor {
            hex,
            content: roll_content(&self.tuning, rng),
            position: self.layout.hex_to_world(hex),
        };
        let entity = spawn(&descriptor);

        let cell = self.cells.entry(hex).or_default();
        cell.content = Some(entity);
        cell.kind = Some(descriptor.content);
        cell.respawn_at = None;
        self.owners.insert(entity, hex);

        tracing::debug!("Cell {} spawned {:?}", hex, descriptor.content);
        Some(descriptor)
    }

    /// Content in `hex` was killed or collected. Empties the cell and arms the
    /// respawn timer; returns the respawn time, or `None` if the cell held
    /// nothing.
    pub fn on_consumed(&mut self, hex: AxialHex, now: f64) -> Option<f64> {
        let cell = self.cells.get_mut(&hex)?;
        let entity = cell.content.take()?;
        self.owners.remove(&entity);

        let respawn_at = now + self.tuning.respawn_delay_secs;
        cell.kind = None;
        cell.last_consumed_at = Some(now);
        cell.respawn_at = Some(respawn_at);
        Some(respawn_at)
    }

    /// Reverse lookup from a live entity to the hex that owns it.
    pub fn find_cell_for_entity(&self, entity: &E) -> Option<AxialHex> {
        self.owners.get(entity).copied()
    }

    /// Retry every cell whose respawn time has passed. Cells the player is
    /// still too close to keep their timer and are retried next call.
    pub fn tick(
        &mut self,
        now: f64,
        player_pos: WorldPoint,
        rng: &mut impl Rng,
        mut spawn: impl FnMut(&EntityDescriptor) -> E,
    ) -> Vec<EntityDescriptor> {
        let due: Vec<AxialHex> = self
            .cells
            .iter()
            .filter(|(_, cell)| cell.is_empty() && cell.respawn_at.is_some_and(|at| at <= now))
            .map(|(hex, _)| *hex)
            .collect();

        let mut spawned = Vec::new();
        for hex in due {
            if let Some(descriptor) = self.try_spawn(hex, player_pos, rng, &mut spawn) {
                tracing::trace!("Cell {} respawned", hex);
                spawned.push(descriptor);
            }
        }
        spawned
    }

    /// The player entered `cell`. Registers every hex within the discovery
    /// range and attempts a first spawn in each newly discovered one. New
    /// cells the player is too close to are armed at `now` so the respawn
    /// sweep fills them once the player walks away.
    pub fn on_player_moved(
        &mut self,
        cell: AxialHex,
        player_pos: WorldPoint,
        now: f64,
        rng: &mut impl Rng,
        mut spawn: impl FnMut(&EntityDescriptor) -> E,
    ) -> Vec<EntityDescriptor> {
        let discovered: Vec<AxialHex> = hexes_in_range(cell, self.tuning.discovery_range)
            .into_iter()
            .filter(|hex| self.register_hex(*hex))
            .collect();

        let mut spawned = Vec::new();
        for hex in discovered {
            match self.try_spawn(hex, player_pos, rng, &mut spawn) {
                Some(descriptor) => spawned.push(descriptor),
                None => {
                    if let Some(state) = self.cells.get_mut(&hex) {
                        state.respawn_at = Some(now);
                    }
                }
            }
        }
        spawned
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    use hexsurvival_core::config::Tuning;

    fn manager() -> CellContentManager<u32> {
        let tuning = Tuning::default();
        CellContentManager::new(HexLayout::from_tuning(&tuning.hex), tuning.content)
    }

    fn far_away() -> WorldPoint {
        WorldPoint::new(1.0e6, 1.0e6)
    }

    #[test]
    fn test_register_is_idempotent() {
        let mut m = manager();
        assert!(m.register_hex(AxialHex::new(2, -1)));
        assert!(!m.register_hex(AxialHex::new(2, -1)));
        assert_eq!(m.len(), 1);
        assert_eq!(
            m.cell(AxialHex::new(2, -1)).map(|c| c.status()),
            Some(CellStatus::Empty)
        );
    }

    #[test]
    fn test_can_spawn_respects_min_distance() {
        let mut m = manager();
        let hex = AxialHex::new(3, 0);
        m.register_hex(hex);
        let center = m.layout().hex_to_world(hex);
        let min = m.tuning().min_spawn_distance;

        let too_close = WorldPoint::new(center.x, center.y + min - 1.0);
        let exactly = WorldPoint::new(center.x, center.y + min);
        assert!(!m.can_spawn_in(hex, too_close));
        assert!(m.can_spawn_in(hex, exactly), "boundary distance is allowed");
        assert!(m.can_spawn_in(hex, far_away()));
    }

    #[test]
    fn test_can_spawn_false_for_unknown_or_occupied() {
        let mut m = manager();
        let hex = AxialHex::new(5, 5);
        assert!(!m.can_spawn_in(hex, far_away()), "unregistered");

        m.register_hex(hex);
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        assert!(m.try_spawn(hex, far_away(), &mut rng, |_| 1).is_some());
        assert!(!m.can_spawn_in(hex, far_away()), "occupied");
    }

    #[test]
    fn test_try_spawn_ineligible_does_not_mutate() {
        let mut m = manager();
        let hex = AxialHex::ZERO;
        m.register_hex(hex);
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        let mut called = false;
        let result = m.try_spawn(hex, WorldPoint::ORIGIN, &mut rng, |_| {
            called = true;
            1
        });
        assert!(result.is_none());
        assert!(!called, "spawn callback must not run");
        assert_eq!(m.cell(hex).map(|c| c.status()), Some(CellStatus::Empty));
    }

    #[test]
    fn test_spawn_consume_respawn_cycle() {
        let mut m = manager();
        let hex = AxialHex::new(4, -2);
        m.register_hex(hex);
        let mut rng = ChaCha8Rng::seed_from_u64(3);

        let descriptor = m.try_spawn(hex, far_away(), &mut rng, |_| 10).expect("spawn");
        assert_eq!(descriptor.position, m.layout().hex_to_world(hex));
        assert_eq!(m.find_cell_for_entity(&10), Some(hex));

        let delay = m.tuning().respawn_delay_secs;
        assert_eq!(m.on_consumed(hex, 5.0), Some(5.0 + delay));
        assert_eq!(m.find_cell_for_entity(&10), None);
        let cell = m.cell(hex).expect("cell");
        assert_eq!(cell.status(), CellStatus::AwaitingRespawn);
        assert_eq!(cell.last_consumed_at, Some(5.0));

        // Not yet due.
        assert!(m.tick(5.0 + delay - 0.1, far_away(), &mut rng, |_| 11).is_empty());
        // Due.
        let spawned = m.tick(5.0 + delay, far_away(), &mut rng, |_| 11);
        assert_eq!(spawned.len(), 1);
        assert_eq!(m.find_cell_for_entity(&11), Some(hex));
        assert_eq!(m.cell(hex).map(|c| c.status()), Some(CellStatus::Occupied));
    }

    #[test]
    fn test_on_consumed_empty_cell_is_noop() {
        let mut m = manager();
        let hex = AxialHex::new(1, 1);
        m.register_hex(hex);
        assert_eq!(m.on_consumed(hex, 1.0), None);
        assert_eq!(m.on_consumed(AxialHex::new(9, 9), 1.0), None);
        assert_eq!(m.cell(hex).map(|c| c.status()), Some(CellStatus::Empty));
    }

    #[test]
    fn test_blocked_respawn_keeps_timer() {
        let mut m = manager();
        let hex = AxialHex::new(4, 0);
        m.register_hex(hex);
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        m.try_spawn(hex, far_away(), &mut rng, |_| 1);
        let respawn_at = m.on_consumed(hex, 0.0).expect("armed");

        // Player stands on the cell when the timer elapses.
        let on_top = m.layout().hex_to_world(hex);
        assert!(m.tick(respawn_at + 10.0, on_top, &mut rng, |_| 2).is_empty());
        assert_eq!(m.cell(hex).and_then(|c| c.respawn_at), Some(respawn_at), "timer not reset");

        // As soon as the player leaves, it spawns.
        let spawned = m.tick(respawn_at + 10.5, far_away(), &mut rng, |_| 2);
        assert_eq!(spawned.len(), 1);
    }

    #[test]
    fn test_on_player_moved_discovers_range() {
        let mut m = manager();
        let mut rng = ChaCha8Rng::seed_from_u64(11);
        let mut next = 0u32;
        let range = m.tuning().discovery_range;
        let spawned = m.on_player_moved(AxialHex::ZERO, WorldPoint::ORIGIN, 0.0, &mut rng, |_| {
            next += 1;
            next
        });

        let expected = (3 * range * range + 3 * range + 1) as usize;
        assert_eq!(m.len(), expected);
        // Spawned cells all satisfy the distance rule.
        for d in &spawned {
            assert!(d.position.distance_to(&WorldPoint::ORIGIN) >= m.tuning().min_spawn_distance);
        }
        // The player's own cell is too close and waits.
        assert_eq!(
            m.cell(AxialHex::ZERO).map(|c| c.status()),
            Some(CellStatus::AwaitingRespawn)
        );

        // Moving within the same area discovers nothing new.
        let again = m.on_player_moved(AxialHex::ZERO, WorldPoint::ORIGIN, 1.0, &mut rng, |_| 99);
        assert!(again.is_empty());
        assert_eq!(m.len(), expected);
    }

    #[test]
    fn test_roll_distribution_follows_weights() {
        let tuning = Tuning::default().content;
        let mut rng = ChaCha8Rng::seed_from_u64(42);
        let n = 20_000;
        let enemies = (0..n)
            .filter(|_| roll_content(&tuning, &mut rng) == ContentKind::Enemy)
            .count();
        let ratio = enemies as f64 / n as f64;
        assert!((ratio - 0.8).abs() < 0.02, "enemy ratio {ratio}");
    }

    #[test]
    fn test_roll_single_weight() {
        let mut tuning = Tuning::default().content;
        tuning.weight_enemy = 0.0;
        tuning.weight_health = 0.0;
        tuning.weight_ammo = 1.0;
        tuning.weight_weapon = 0.0;
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        for _ in 0..100 {
            assert_eq!(
                roll_content(&tuning, &mut rng),
                ContentKind::Pickup(PickupKind::Ammo)
            );
        }
    }
}
