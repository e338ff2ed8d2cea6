//! Neighbor queries and the local-avoidance vector.

use glam::DVec2;

use hexsurvival_core::types::WorldPoint;

/// A body other actors steer around.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Neighbor {
    /// Caller-defined id; the querying actor is excluded by id.
    pub id: u64,
    pub position: WorldPoint,
    pub radius: f64,
    /// Dead or despawning bodies are skipped.
    pub active: bool,
}

/// Active bodies other than `id` within `radius` of `position`.
///
/// Linear scan with a squared-distance test; callers with large populations
/// narrow `population` first (see `HexBuckets`).
pub fn neighbors_within<'a>(
    id: u64,
    position: WorldPoint,
    population: &'a [Neighbor],
    radius: f64,
) -> Vec<&'a Neighbor> {
    if radius < 0.0 {
        return Vec::new();
    }
    let radius_sq = radius * radius;
    population
        .iter()
        .filter(|n| n.id != id && n.active)
        .filter(|n| position.distance_sq_to(&n.position) <= radius_sq)
        .collect()
}

/// Linear falloff: 1 at distance 0, 0 at (and beyond) the radius.
pub fn avoidance_falloff(distance: f64, radius: f64) -> f64 {
    if radius <= 0.0 {
        return 0.0;
    }
    ((radius - distance) / radius).clamp(0.0, 1.0)
}

/// Sum of unit vectors pointing away from each neighbor, weighted by falloff.
/// Not yet scaled by the actor's avoidance weight.
///
/// A neighbor at exactly the same position has no defined "away" and
/// contributes nothing.
pub fn avoidance_vector(position: WorldPoint, neighbors: &[&Neighbor], radius: f64) -> DVec2 {
    let mut sum = DVec2::ZERO;
    for n in neighbors {
        let away = position - n.position;
        let distance = away.length();
        if distance <= f64::EPSILON {
            continue;
        }
        sum += away / distance * avoidance_falloff(distance, radius);
    }
    sum
}
