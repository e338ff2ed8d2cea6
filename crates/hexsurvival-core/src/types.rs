//! Fundamental geometric and simulation types.

use std::ops::{Add, Sub};

use glam::DVec2;
use serde::{Deserialize, Serialize};

/// Planar position in world units.
/// x = East, y = North.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct WorldPoint {
    pub x: f64,
    pub y: f64,
}

/// Axial hex coordinate. The cube coordinate `s = -q - r` is implicit.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct AxialHex {
    pub q: i32,
    pub r: i32,
}

/// Simulation time tracking.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct SimTime {
    /// Current tick number (increments by 1 each tick).
    pub tick: u64,
    /// Elapsed simulation time in seconds.
    pub elapsed_secs: f64,
}

impl WorldPoint {
    pub const ORIGIN: Self = Self { x: 0.0, y: 0.0 };

    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Distance to another point.
    pub fn distance_to(&self, other: &WorldPoint) -> f64 {
        self.distance_sq_to(other).sqrt()
    }

    /// Squared distance, for comparisons that can skip the sqrt.
    pub fn distance_sq_to(&self, other: &WorldPoint) -> f64 {
        let dx = other.x - self.x;
        let dy = other.y - self.y;
        dx * dx + dy * dy
    }

    /// Bearing to another point in radians (0 = East, counter-clockwise).
    pub fn angle_to(&self, other: &WorldPoint) -> f64 {
        (other.y - self.y).atan2(other.x - self.x)
    }

    pub fn to_vec(self) -> DVec2 {
        DVec2::new(self.x, self.y)
    }

    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

impl From<DVec2> for WorldPoint {
    fn from(v: DVec2) -> Self {
        Self { x: v.x, y: v.y }
    }
}

impl From<WorldPoint> for DVec2 {
    fn from(p: WorldPoint) -> Self {
        p.to_vec()
    }
}

impl Add<DVec2> for WorldPoint {
    type Output = WorldPoint;
    fn add(self, rhs: DVec2) -> WorldPoint {
        WorldPoint::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub for WorldPoint {
    type Output = DVec2;
    fn sub(self, rhs: WorldPoint) -> DVec2 {
        DVec2::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl AxialHex {
    pub const ZERO: Self = Self { q: 0, r: 0 };

    pub const fn new(q: i32, r: i32) -> Self {
        Self { q, r }
    }

    /// Third cube coordinate.
    pub const fn s(&self) -> i32 {
        -self.q - self.r
    }
}

impl Add for AxialHex {
    type Output = AxialHex;
    fn add(self, rhs: AxialHex) -> AxialHex {
        AxialHex::new(self.q + rhs.q, self.r + rhs.r)
    }
}

impl Sub for AxialHex {
    type Output = AxialHex;
    fn sub(self, rhs: AxialHex) -> AxialHex {
        AxialHex::new(self.q - rhs.q, self.r - rhs.r)
    }
}

impl std::fmt::Display for AxialHex {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.q, self.r)
    }
}

impl SimTime {
    /// Advance by one tick of `dt` seconds.
    pub fn advance(&mut self, dt: f64) {
        self.tick += 1;
        self.elapsed_secs += dt;
    }
}
