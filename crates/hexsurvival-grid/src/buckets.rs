//! Hex-keyed spatial hash for proximity queries.
//!
//! Entries are bucketed by the hex containing them. A radius query visits only
//! the buckets whose hexes can intersect the query disk, so the cost scales
//! with local density rather than population size.
//!
//! Buckets keep their allocations across `clear` so a per-tick rebuild does not
//! reallocate.

use std::collections::HashMap;

use hexsurvival_core::types::{AxialHex, WorldPoint};

use crate::hex::{hexes_in_range, HexLayout};

/// Spatial hash keyed by [`AxialHex`].
#[derive(Debug, Clone)]
pub struct HexBuckets<K> {
    layout: HexLayout,
    buckets: HashMap<AxialHex, Vec<(K, WorldPoint)>>,
    len: usize,
}

impl<K: Copy + PartialEq> HexBuckets<K> {
    pub fn new(layout: HexLayout) -> Self {
        Self {
            layout,
            buckets: HashMap::new(),
            len: 0,
        }
    }

    pub fn layout(&self) -> &HexLayout {
        &self.layout
    }

    /// Total number of entries.
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Number of hexes holding at least one entry.
    pub fn occupied_hexes(&self) -> usize {
        self.buckets.values().filter(|b| !b.is_empty()).count()
    }

    /// Empty every bucket, keeping allocations.
    pub fn clear(&mut self) {
        for bucket in self.buckets.values_mut() {
            bucket.clear();
        }
        self.len = 0;
    }

    pub fn insert(&mut self, key: K, pos: WorldPoint) {
        let hex = self.layout.world_to_hex(pos);
        self.buckets.entry(hex).or_default().push((key, pos));
        self.len += 1;
    }

    /// Entries stored in a single hex.
    pub fn bucket(&self, hex: AxialHex) -> &[(K, WorldPoint)] {
        self.buckets.get(&hex).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Candidates that may lie within `radius` of `pos`, excluding `exclude`.
    ///
    /// Every entry within the radius is returned; entries slightly outside it
    /// may be returned too. Callers apply the exact distance test.
    pub fn query_radius(
        &self,
        pos: WorldPoint,
        radius: f64,
        exclude: Option<K>,
    ) -> Vec<(K, WorldPoint)> {
        let mut result = Vec::new();
        if radius < 0.0 || self.len == 0 {
            return result;
        }

        let center = self.layout.world_to_hex(pos);
        for hex in hexes_in_range(center, self.search_range(radius)) {
            if let Some(bucket) = self.buckets.get(&hex) {
                result.extend(
                    bucket
                        .iter()
                        .filter(|(key, _)| Some(*key) != exclude)
                        .copied(),
                );
            }
        }
        result
    }

    /// Hex steps needed to cover a disk of `radius` around any point.
    ///
    /// The query point and each candidate are at most one radius from their
    /// hex centers, and centers `n` steps apart are at least `1.5 * R * n`
    /// apart.
    fn search_range(&self, radius: f64) -> i32 {
        let r = self.layout.radius();
        ((radius + 2.0 * r) / (1.5 * r)).ceil() as i32
    }
}
