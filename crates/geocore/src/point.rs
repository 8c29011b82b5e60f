use serde::{Deserialize, Serialize};

use crate::error::{GeoError, finite};

/// A WGS84 position in decimal degrees.
#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    #[serde(alias = "lat")]
    pub latitude: f64,
    #[serde(alias = "lon")]
    pub longitude: f64,
}

impl GeoPoint {
    /// Unchecked constructor; see [`GeoPoint::try_new`].
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }

    pub fn try_new(latitude: f64, longitude: f64) -> Result<Self, GeoError> {
        let p = Self::new(latitude, longitude);
        p.validate()?;
        Ok(p)
    }

    /// Latitude must lie in [-90, 90] and longitude in [-180, 180].
    pub fn validate(&self) -> Result<(), GeoError> {
        let lat = finite("latitude", self.latitude)?;
        let lon = finite("longitude", self.longitude)?;
        if !(-90.0..=90.0).contains(&lat) {
            return Err(GeoError::invalid("latitude", lat));
        }
        if !(-180.0..=180.0).contains(&lon) {
            return Err(GeoError::invalid("longitude", lon));
        }
        Ok(())
    }

    pub fn lat_rad(&self) -> f64 {
        self.latitude.to_radians()
    }

    pub fn lon_rad(&self) -> f64 {
        self.longitude.to_radians()
    }

    /// GeoJSON position order.
    pub fn lon_lat(&self) -> [f64; 2] {
        [self.longitude, self.latitude]
    }
}

/// Compass heading in degrees clockwise from true north, kept in [0, 360).
#[derive(Debug, Copy, Clone, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(try_from = "f64", into = "f64")]
pub struct Heading(f64);

impl Heading {
    pub const NORTH: Heading = Heading(0.0);

    /// Any finite angle is accepted and reduced modulo 360.
    pub fn new(degrees: f64) -> Result<Self, GeoError> {
        let degrees = finite("heading", degrees)?;
        Ok(Self(wrap_360(degrees)))
    }

    pub fn degrees(self) -> f64 {
        self.0
    }

    pub fn radians(self) -> f64 {
        self.0.to_radians()
    }

    /// Heading rotated by `delta` degrees (negative turns counter-clockwise).
    pub fn offset(self, delta: f64) -> f64 {
        self.0 + delta
    }
}

impl TryFrom<f64> for Heading {
    type Error = GeoError;

    fn try_from(value: f64) -> Result<Self, Self::Error> {
        Heading::new(value)
    }
}

impl From<Heading> for f64 {
    fn from(value: Heading) -> Self {
        value.0
    }
}

/// Reduce an angle to [0, 360).
pub fn wrap_360(degrees: f64) -> f64 {
    let d = degrees.rem_euclid(360.0);
    // rem_euclid can round up to exactly 360 for tiny negative inputs.
    if d >= 360.0 { 0.0 } else { d }
}

/// Reduce a longitude to [-180, 180]. In-range values are returned as is.
pub fn wrap_180(degrees: f64) -> f64 {
    if (-180.0..=180.0).contains(&degrees) {
        degrees
    } else {
        (degrees + 180.0).rem_euclid(360.0) - 180.0
    }
}

#[cfg(test)]
mod tests {
    use super::{GeoPoint, Heading, wrap_180, wrap_360};
    use crate::GeoError;

    #[test]
    fn try_new_rejects_out_of_range() {
        assert!(GeoPoint::try_new(45.0, 9.0).is_ok());
        assert!(GeoPoint::try_new(90.0, 180.0).is_ok());
        assert_eq!(
            GeoPoint::try_new(90.5, 0.0),
            Err(GeoError::invalid("latitude", 90.5))
        );
        assert_eq!(
            GeoPoint::try_new(0.0, -180.25),
            Err(GeoError::invalid("longitude", -180.25))
        );
        assert!(GeoPoint::try_new(f64::NAN, 0.0).is_err());
        assert!(GeoPoint::try_new(0.0, f64::INFINITY).is_err());
    }

    #[test]
    fn heading_normalizes_modulo_360() {
        assert_eq!(Heading::new(370.0).unwrap().degrees(), 10.0);
        assert_eq!(Heading::new(-90.0).unwrap().degrees(), 270.0);
        assert_eq!(Heading::new(360.0).unwrap(), Heading::NORTH);
        assert!(Heading::new(f64::NAN).is_err());
        assert!(Heading::new(f64::NEG_INFINITY).is_err());
    }

    #[test]
    fn wrap_helpers() {
        assert_eq!(wrap_360(-1e-20), 0.0);
        assert_eq!(wrap_360(725.0), 5.0);
        assert_eq!(wrap_180(180.0), 180.0);
        assert_eq!(wrap_180(-180.0), -180.0);
        assert_eq!(wrap_180(190.0), -170.0);
        assert_eq!(wrap_180(-190.0), 170.0);
    }

    #[test]
    fn serde_shapes() {
        let p: GeoPoint = serde_json::from_str(r#"{"lat": 1.5, "lon": -2.0}"#).unwrap();
        assert_eq!(p, GeoPoint::new(1.5, -2.0));
        let json = serde_json::to_string(&p).unwrap();
        assert_eq!(json, r#"{"latitude":1.5,"longitude":-2.0}"#);

        let h: Heading = serde_json::from_str("450.0").unwrap();
        assert_eq!(h.degrees(), 90.0);
    }
}
