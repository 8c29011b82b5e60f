//! Field-of-view cone on a spherical Earth.

use serde::{Deserialize, Serialize};

use crate::error::{GeoError, finite};
use crate::point::{GeoPoint, Heading, wrap_180, wrap_360};

/// Mean Earth radius used for all spherical computations (meters).
pub const EARTH_RADIUS_M: f64 = 6_371_000.0;
pub const DEFAULT_CONE_RADIUS_M: f64 = 100.0;
pub const DEFAULT_FIELD_OF_VIEW_DEG: f64 = 60.0;

#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConeOptions {
    pub radius_m: f64,
    /// Full opening angle, split evenly around the heading.
    pub field_of_view_deg: f64,
}

impl Default for ConeOptions {
    fn default() -> Self {
        Self {
            radius_m: DEFAULT_CONE_RADIUS_M,
            field_of_view_deg: DEFAULT_FIELD_OF_VIEW_DEG,
        }
    }
}

impl ConeOptions {
    pub fn with_radius(radius_m: f64) -> Self {
        Self {
            radius_m,
            ..Self::default()
        }
    }

    pub fn validate(&self) -> Result<(), GeoError> {
        let r = finite("radius", self.radius_m)?;
        if r < 0.0 {
            return Err(GeoError::invalid("radius", r));
        }
        let fov = finite("field of view", self.field_of_view_deg)?;
        if !(0.0..=360.0).contains(&fov) {
            return Err(GeoError::invalid("field of view", fov));
        }
        Ok(())
    }
}

/// Closed triangle ring: apex, left edge, right edge, apex.
#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ConePolygon {
    points: [GeoPoint; 4],
}

impl ConePolygon {
    pub fn new(apex: GeoPoint, left: GeoPoint, right: GeoPoint) -> Self {
        Self {
            points: [apex, left, right, apex],
        }
    }

    pub fn points(&self) -> &[GeoPoint; 4] {
        &self.points
    }

    pub fn apex(&self) -> GeoPoint {
        self.points[0]
    }

    pub fn left(&self) -> GeoPoint {
        self.points[1]
    }

    pub fn right(&self) -> GeoPoint {
        self.points[2]
    }

    /// Positions in GeoJSON `[lon, lat]` order.
    pub fn ring_lon_lat(&self) -> Vec<[f64; 2]> {
        self.points.iter().map(GeoPoint::lon_lat).collect()
    }
}

/// Point reached by travelling `distance_m` from `origin` along the great
/// circle with initial bearing `bearing_deg`.
pub fn destination_point(origin: GeoPoint, bearing_deg: f64, distance_m: f64) -> GeoPoint {
    let d = distance_m / EARTH_RADIUS_M;
    let brng = bearing_deg.to_radians();
    let lat1 = origin.lat_rad();
    let lon1 = origin.lon_rad();

    let (sin_lat1, cos_lat1) = lat1.sin_cos();
    let (sin_d, cos_d) = d.sin_cos();

    let lat2 = (sin_lat1 * cos_d + cos_lat1 * sin_d * brng.cos()).asin();
    let lon2 = lon1 + (brng.sin() * sin_d * cos_lat1).atan2(cos_d - sin_lat1 * lat2.sin());

    GeoPoint::new(lat2.to_degrees(), wrap_180(lon2.to_degrees()))
}

/// Great-circle distance in meters (haversine).
pub fn haversine_distance_m(a: GeoPoint, b: GeoPoint) -> f64 {
    let delta_lat = (b.latitude - a.latitude).to_radians();
    let delta_lon = (b.longitude - a.longitude).to_radians();

    let h = (delta_lat / 2.0).sin().powi(2)
        + a.lat_rad().cos() * b.lat_rad().cos() * (delta_lon / 2.0).sin().powi(2);
    2.0 * EARTH_RADIUS_M * h.sqrt().min(1.0).asin()
}

/// Initial great-circle bearing from `from` to `to`, in [0, 360).
pub fn initial_bearing_deg(from: GeoPoint, to: GeoPoint) -> f64 {
    let lat1 = from.lat_rad();
    let lat2 = to.lat_rad();
    let delta_lon = (to.longitude - from.longitude).to_radians();

    let x = delta_lon.sin() * lat2.cos();
    let y = lat1.cos() * lat2.sin() - lat1.sin() * lat2.cos() * delta_lon.cos();
    wrap_360(x.atan2(y).to_degrees())
}

/// Cone with the default 60 degree field of view.
pub fn compute_cone(
    center: GeoPoint,
    heading: Heading,
    radius_m: f64,
) -> Result<ConePolygon, GeoError> {
    compute_cone_with(center, heading, &ConeOptions::with_radius(radius_m))
}

pub fn compute_cone_with(
    center: GeoPoint,
    heading: Heading,
    options: &ConeOptions,
) -> Result<ConePolygon, GeoError> {
    center.validate()?;
    options.validate()?;
    if center.latitude.abs() == 90.0 {
        return Err(GeoError::PolarDegeneracy {
            latitude: center.latitude,
        });
    }

    let half = options.field_of_view_deg / 2.0;
    let left = destination_point(center, heading.offset(-half), options.radius_m);
    let right = destination_point(center, heading.offset(half), options.radius_m);
    Ok(ConePolygon::new(center, left, right))
}
