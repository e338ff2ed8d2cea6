//! Spatial partitioning for the hex survival simulation.
//!
//! Axial hex math, a hex-bucketed spatial hash, and GPS projection.

pub use hexsurvival_core as core;

pub mod buckets;
pub mod hex;
pub mod projection;

// Re-export key types for convenience.
pub use buckets::HexBuckets;
pub use hex::{hexes_in_range, is_in_range, neighbors, ring, ring_distance, HexLayout};
pub use projection::GeoProjection;
