//! HexLayout: axial hex coordinate math on a pointy-top grid.
//!
//! Conversions between world points and [`AxialHex`] cells, neighbor and ring
//! enumeration, and hex distance. Everything here is stateless apart from the
//! layout's radius.

use hexsurvival_core::config::HexTuning;
use hexsurvival_core::types::{AxialHex, WorldPoint};

const SQRT_3: f64 = 1.732_050_807_568_877_2;

/// Neighbor offsets, east first, then counter-clockwise (y up).
pub const DIRECTIONS: [AxialHex; 6] = [
    AxialHex::new(1, 0),  // E
    AxialHex::new(0, 1),  // NE
    AxialHex::new(-1, 1), // NW
    AxialHex::new(-1, 0), // W
    AxialHex::new(0, -1), // SW
    AxialHex::new(1, -1), // SE
];

/// Pointy-top hex layout with the origin hex centered on the world origin.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HexLayout {
    /// Center-to-corner distance in world units.
    radius: f64,
}

impl HexLayout {
    /// Layout with an effective radius of `hex_radius * scale`.
    pub fn new(hex_radius: f64, scale: f64) -> Self {
        let radius = hex_radius * scale;
        debug_assert!(radius > 0.0, "hex radius must be positive, got {radius}");
        Self { radius }
    }

    pub fn from_tuning(tuning: &HexTuning) -> Self {
        Self::new(tuning.hex_radius, tuning.scale)
    }

    /// Effective center-to-corner radius.
    pub fn radius(&self) -> f64 {
        self.radius
    }

    /// Distance between the centers of two adjacent hexes.
    pub fn spacing(&self) -> f64 {
        SQRT_3 * self.radius
    }

    /// Hex containing a world point.
    pub fn world_to_hex(&self, p: WorldPoint) -> AxialHex {
        let fq = (SQRT_3 / 3.0 * p.x - p.y / 3.0) / self.radius;
        let fr = (2.0 / 3.0 * p.y) / self.radius;
        round_axial(fq, fr)
    }

    /// Canonical center of a hex.
    pub fn hex_to_world(&self, hex: AxialHex) -> WorldPoint {
        let q = hex.q as f64;
        let r = hex.r as f64;
        WorldPoint::new(
            self.radius * (SQRT_3 * q + SQRT_3 / 2.0 * r),
            self.radius * (1.5 * r),
        )
    }
}

/// Round fractional axial coordinates to the containing hex.
///
/// Each cube component is rounded independently; the one with the largest
/// rounding error is then rebuilt from the other two. Ties resolve q, then r,
/// then s.
pub fn round_axial(fq: f64, fr: f64) -> AxialHex {
    let fs = -fq - fr;
    let mut q = fq.round();
    let mut r = fr.round();
    let s = fs.round();

    let dq = (q - fq).abs();
    let dr = (r - fr).abs();
    let ds = (s - fs).abs();

    if dq >= dr && dq >= ds {
        q = -r - s;
    } else if dr >= ds {
        r = -q - s;
    }
    // Otherwise s absorbs the error; it is implicit in axial form.

    AxialHex::new(q as i32, r as i32)
}

/// The six neighbors of `hex` in [`DIRECTIONS`] order.
pub fn neighbors(hex: AxialHex) -> [AxialHex; 6] {
    DIRECTIONS.map(|d| hex + d)
}

/// Hex-step distance between two cells.
pub fn ring_distance(a: AxialHex, b: AxialHex) -> i32 {
    let d = a - b;
    (d.q.abs() + (d.q + d.r).abs() + d.r.abs()) / 2
}

pub fn is_in_range(center: AxialHex, target: AxialHex, range: i32) -> bool {
    range >= 0 && ring_distance(center, target) <= range
}

/// Every hex within `range` steps of `center`, `3n² + 3n + 1` of them.
/// A negative range yields an empty list.
pub fn hexes_in_range(center: AxialHex, range: i32) -> Vec<AxialHex> {
    if range < 0 {
        return Vec::new();
    }
    let n = range;
    let mut result = Vec::with_capacity((3 * n * n + 3 * n + 1) as usize);
    for dq in -n..=n {
        let r_min = (-n).max(-dq - n);
        let r_max = n.min(-dq + n);
        for dr in r_min..=r_max {
            result.push(center + AxialHex::new(dq, dr));
        }
    }
    result
}

/// Hexes exactly `radius` steps from `center`, walking counter-clockwise.
/// Radius 0 yields the center alone; negative yields nothing.
pub fn ring(center: AxialHex, radius: i32) -> Vec<AxialHex> {
    if radius < 0 {
        return Vec::new();
    }
    if radius == 0 {
        return vec![center];
    }
    let mut result = Vec::with_capacity(6 * radius as usize);
    let sw = DIRECTIONS[4];
    let mut hex = center + AxialHex::new(sw.q * radius, sw.r * radius);
    for dir in DIRECTIONS {
        for _ in 0..radius {
            result.push(hex);
            hex = hex + dir;
        }
    }
    result
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;

    fn layout() -> HexLayout {
        HexLayout::new(22.0, 8.0)
    }

    #[test]
    fn test_effective_radius() {
        assert_eq!(layout().radius(), 176.0);
    }

    #[test]
    fn test_origin_maps_to_zero_hex() {
        assert_eq!(layout().world_to_hex(WorldPoint::new(0.0, 0.0)), AxialHex::ZERO);
    }

    #[test]
    fn test_hex_center_round_trip() {
        let layout = layout();
        for hex in hexes_in_range(AxialHex::new(3, -2), 6) {
            let center = layout.hex_to_world(hex);
            assert_eq!(layout.world_to_hex(center), hex, "round trip failed for {hex}");
        }
    }

    #[test]
    fn test_round_trip_with_odd_layouts() {
        for (radius, scale) in [(1.0, 1.0), (0.37, 3.0), (1000.0, 0.5)] {
            let layout = HexLayout::new(radius, scale);
            for hex in hexes_in_range(AxialHex::new(-40, 17), 3) {
                assert_eq!(layout.world_to_hex(layout.hex_to_world(hex)), hex);
            }
        }
    }

    #[test]
    fn test_points_near_center_stay_in_hex() {
        let layout = layout();
        let hex = AxialHex::new(2, 1);
        let c = layout.hex_to_world(hex);
        // Inradius is sqrt(3)/2 * R; stay inside it.
        let inner = 0.8 * SQRT_3 / 2.0 * layout.radius();
        for i in 0..12 {
            let a = i as f64 * std::f64::consts::TAU / 12.0;
            let p = WorldPoint::new(c.x + inner * a.cos(), c.y + inner * a.sin());
            assert_eq!(layout.world_to_hex(p), hex);
        }
    }

    #[test]
    fn test_world_to_hex_cube_invariant() {
        let layout = layout();
        for i in -20..20 {
            let p = WorldPoint::new(i as f64 * 37.3, i as f64 * -91.7 + 5.0);
            let hex = layout.world_to_hex(p);
            assert_eq!(hex.q + hex.r + hex.s(), 0);
        }
    }

    #[test]
    fn test_round_axial_tie_corrects_q_first() {
        // q and r both sit exactly on .5; s is exact.
        // q rounds to 1, r to -1 (away from zero), s = 0. dq == dr == 0.5 > ds.
        // q is rebuilt: q = -r - s = 1.
        let hex = round_axial(0.5, -0.5);
        assert_eq!(hex, AxialHex::new(1, -1));
        assert_eq!(hex.q + hex.r + hex.s(), 0);
    }

    #[test]
    fn test_round_axial_largest_error_component_corrected() {
        // fq=0.4 → 0 (err .4), fr=0.4 → 0 (err .4), fs=-0.8 → -1 (err .2).
        // q and r tie on error; q is corrected: q = -r - s = 1.
        assert_eq!(round_axial(0.4, 0.4), AxialHex::new(1, 0));
        // fq=0.125, fr=0.4375 → fs=-0.5625: q err .125, r and s err .4375.
        // r beats s on the tie: r = -q - s = 1.
        assert_eq!(round_axial(0.125, 0.4375), AxialHex::new(0, 1));
    }

    #[test]
    fn test_neighbors_are_distance_one() {
        for center in [AxialHex::ZERO, AxialHex::new(5, -9)] {
            let ns = neighbors(center);
            let unique: HashSet<_> = ns.iter().copied().collect();
            assert_eq!(unique.len(), 6);
            for n in ns {
                assert_eq!(ring_distance(center, n), 1);
            }
        }
    }

    #[test]
    fn test_neighbor_order_starts_east_counter_clockwise() {
        let layout = layout();
        let ns = neighbors(AxialHex::ZERO);
        let angles: Vec<f64> = ns
            .iter()
            .map(|&h| WorldPoint::ORIGIN.angle_to(&layout.hex_to_world(h)))
            .map(|a| a.rem_euclid(std::f64::consts::TAU))
            .collect();
        assert!(angles[0].abs() < 1e-9, "first neighbor should be east");
        for pair in angles.windows(2) {
            assert!(pair[1] > pair[0], "angles should increase: {angles:?}");
        }
    }

    #[test]
    fn test_ring_distance_formula() {
        assert_eq!(ring_distance(AxialHex::ZERO, AxialHex::ZERO), 0);
        assert_eq!(ring_distance(AxialHex::ZERO, AxialHex::new(3, -1)), 3);
        assert_eq!(ring_distance(AxialHex::new(-2, 4), AxialHex::new(1, 0)), 4);
        assert_eq!(
            ring_distance(AxialHex::new(1, 2), AxialHex::new(-3, 5)),
            ring_distance(AxialHex::new(-3, 5), AxialHex::new(1, 2))
        );
    }

    #[test]
    fn test_hexes_in_range_cardinality() {
        for n in 0..=3 {
            let hexes = hexes_in_range(AxialHex::new(4, 4), n);
            assert_eq!(hexes.len() as i32, 3 * n * n + 3 * n + 1);
            let unique: HashSet<_> = hexes.iter().copied().collect();
            assert_eq!(unique.len(), hexes.len(), "no duplicates for n={n}");
        }
        assert_eq!(hexes_in_range(AxialHex::ZERO, 2).len(), 19);
    }

    #[test]
    fn test_hexes_in_range_respects_distance() {
        let center = AxialHex::new(-1, 2);
        for hex in hexes_in_range(center, 3) {
            assert!(is_in_range(center, hex, 3));
        }
    }

    #[test]
    fn test_negative_range_is_empty() {
        assert!(hexes_in_range(AxialHex::ZERO, -1).is_empty());
        assert!(ring(AxialHex::ZERO, -2).is_empty());
        assert!(!is_in_range(AxialHex::ZERO, AxialHex::ZERO, -1));
    }

    #[test]
    fn test_ring_membership() {
        let center = AxialHex::new(2, -3);
        assert_eq!(ring(center, 0), vec![center]);
        for n in 1..=4 {
            let hexes = ring(center, n);
            assert_eq!(hexes.len() as i32, 6 * n);
            let unique: HashSet<_> = hexes.iter().copied().collect();
            assert_eq!(unique.len(), hexes.len());
            for hex in hexes {
                assert_eq!(ring_distance(center, hex), n);
            }
        }
    }
}
