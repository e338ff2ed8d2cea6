//! Geographic projection: converts GPS fixes to world points.
//!
//! Uses an equirectangular projection centered on an anchor point.
//! Accurate to <0.1% within a few hundred kilometers of the anchor, far beyond
//! any walking session.

use glam::DVec2;
use hexsurvival_core::types::WorldPoint;

/// Meters per degree of latitude (nearly constant across the globe).
const METERS_PER_DEGREE: f64 = 111_320.0;

/// Geographic projection anchored at a reference fix.
///
/// The anchor maps to the world origin. x = East, y = North, in meters
/// multiplied by `units_per_meter`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GeoProjection {
    /// Anchor latitude in degrees.
    ref_lat: f64,
    /// Anchor longitude in degrees.
    ref_lon: f64,
    /// World units per meter.
    units_per_meter: f64,
    /// Cached cos(ref_lat) for longitude scaling.
    cos_ref_lat: f64,
}

impl GeoProjection {
    /// Create a projection anchored at the given lat/lon (degrees).
    pub fn new(ref_lat: f64, ref_lon: f64, units_per_meter: f64) -> Self {
        Self {
            ref_lat,
            ref_lon,
            units_per_meter,
            cos_ref_lat: ref_lat.to_radians().cos(),
        }
    }

    /// Planar offset for a geo delta (degrees) near the anchor.
    pub fn offset(&self, d_lat: f64, d_lon: f64) -> DVec2 {
        DVec2::new(
            d_lon * self.lon_scale() * self.units_per_meter,
            d_lat * self.lat_scale() * self.units_per_meter,
        )
    }

    /// Convert lat/lon (degrees) to a world point.
    pub fn to_world(&self, lat: f64, lon: f64) -> WorldPoint {
        WorldPoint::ORIGIN + self.offset(lat - self.ref_lat, lon - self.ref_lon)
    }

    /// Convert a world point back to (lat, lon) in degrees.
    pub fn to_geo(&self, point: &WorldPoint) -> (f64, f64) {
        let lon = self.ref_lon + point.x / (self.lon_scale() * self.units_per_meter);
        let lat = self.ref_lat + point.y / (self.lat_scale() * self.units_per_meter);
        (lat, lon)
    }

    pub fn ref_lat(&self) -> f64 {
        self.ref_lat
    }

    pub fn ref_lon(&self) -> f64 {
        self.ref_lon
    }

    /// Meters per degree of longitude at the anchor latitude.
    pub fn lon_scale(&self) -> f64 {
        METERS_PER_DEGREE * self.cos_ref_lat
    }

    /// Meters per degree of latitude.
    pub fn lat_scale(&self) -> f64 {
        METERS_PER_DEGREE
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_geo_projection_roundtrip() {
        let proj = GeoProjection::new(52.52, 13.405, 1.0);
        let lat = 52.53;
        let lon = 13.39;

        let pos = proj.to_world(lat, lon);
        let (lat2, lon2) = proj.to_geo(&pos);

        assert!((lat - lat2).abs() < 1e-10, "lat roundtrip: {lat} vs {lat2}");
        assert!((lon - lon2).abs() < 1e-10, "lon roundtrip: {lon} vs {lon2}");
    }

    #[test]
    fn test_geo_projection_distances() {
        let proj = GeoProjection::new(0.0, 0.0, 1.0);

        let pos = proj.to_world(1.0, 0.0);
        assert!((pos.y - 111_320.0).abs() < 1.0, "1 degree lat at equator: {}", pos.y);
        assert!(pos.x.abs() < 1e-6, "no east offset");

        let pos = proj.to_world(0.0, 1.0);
        assert!((pos.x - 111_320.0).abs() < 1.0, "1 degree lon at equator: {}", pos.x);

        // At 60°N a degree of longitude is half as long.
        let proj60 = GeoProjection::new(60.0, 0.0, 1.0);
        let pos = proj60.to_world(60.0, 1.0);
        let expected = 111_320.0 * 60.0_f64.to_radians().cos();
        assert!((pos.x - expected).abs() < 1.0, "1 degree lon at 60N: {} vs {expected}", pos.x);
    }

    #[test]
    fn test_anchor_maps_to_origin() {
        let proj = GeoProjection::new(26.5, 56.2, 1.0);
        let pos = proj.to_world(26.5, 56.2);
        assert!(pos.x.abs() < 1e-6);
        assert!(pos.y.abs() < 1e-6);
    }

    #[test]
    fn test_units_per_meter_scales_offset() {
        let meters = GeoProjection::new(10.0, 10.0, 1.0).offset(0.001, 0.001);
        let scaled = GeoProjection::new(10.0, 10.0, 8.0).offset(0.001, 0.001);
        assert!((scaled.x - meters.x * 8.0).abs() < 1e-9);
        assert!((scaled.y - meters.y * 8.0).abs() < 1e-9);
    }
}
