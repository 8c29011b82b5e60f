use crate::math::{Ellipsoid, Geodetic, Helmert};
use crate::point::GeoPoint;

/// A geodetic datum: an ellipsoid plus its shift to WGS84.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Datum {
    pub name: &'static str,
    pub ellipsoid: Ellipsoid,
    pub to_wgs84: Helmert,
}

impl Datum {
    pub const WGS84: Datum = Datum {
        name: "WGS84",
        ellipsoid: Ellipsoid::WGS84,
        to_wgs84: Helmert::IDENTITY,
    };

    /// European Datum 1950, single-shift approximation for continental Europe.
    pub const ED50: Datum = Datum {
        name: "ED50",
        ellipsoid: Ellipsoid::INTERNATIONAL_1924,
        to_wgs84: Helmert::new([-87.0, -98.0, -121.0, 0.0, 0.0, 0.0, 0.0]),
    };

    pub fn is_wgs84(&self) -> bool {
        self.ellipsoid == Ellipsoid::WGS84 && self.to_wgs84.is_identity()
    }

    /// Express a WGS84 point on this datum's ellipsoid.
    pub fn wgs84_to_local(&self, point: GeoPoint) -> Geodetic {
        let geo = Geodetic::from_degrees(point.latitude, point.longitude, 0.0);
        if self.is_wgs84() {
            return geo;
        }
        let ecef = Ellipsoid::WGS84.geodetic_to_ecef(geo);
        self.ellipsoid.ecef_to_geodetic(self.to_wgs84.inverse(ecef))
    }

    /// Map geodetic coordinates on this datum back to a WGS84 point.
    pub fn local_to_wgs84(&self, geo: Geodetic) -> GeoPoint {
        let wgs = if self.is_wgs84() {
            geo
        } else {
            let ecef = self.ellipsoid.geodetic_to_ecef(geo);
            Ellipsoid::WGS84.ecef_to_geodetic(self.to_wgs84.forward(ecef))
        };
        GeoPoint::new(wgs.lat_rad.to_degrees(), wgs.lon_rad.to_degrees())
    }
}

#[cfg(test)]
mod tests {
    use super::Datum;
    use crate::point::GeoPoint;

    fn assert_close(a: f64, b: f64, eps: f64) {
        let diff = (a - b).abs();
        assert!(diff <= eps, "expected {a} ~= {b} (diff {diff})");
    }

    #[test]
    fn wgs84_is_a_pass_through() {
        let p = GeoPoint::new(41.9028, 12.4964);
        let geo = Datum::WGS84.wgs84_to_local(p);
        assert_eq!(geo.alt_m, 0.0);
        let back = Datum::WGS84.local_to_wgs84(geo);
        assert_close(back.latitude, p.latitude, 1e-12);
        assert_close(back.longitude, p.longitude, 1e-12);
    }

    #[test]
    fn ed50_shift_in_rome() {
        let geo = Datum::ED50.wgs84_to_local(GeoPoint::new(41.9028, 12.4964));
        // ED50 coordinates sit roughly 110 m north and 77 m east of WGS84 here.
        assert_close(geo.lat_rad.to_degrees(), 41.903_790_05, 1e-7);
        assert_close(geo.lon_rad.to_degrees(), 12.497_326_18, 1e-7);
    }

    #[test]
    fn ed50_round_trip() {
        let p = GeoPoint::new(48.8566, 2.3522);
        let back = Datum::ED50.local_to_wgs84(Datum::ED50.wgs84_to_local(p));
        assert_close(back.latitude, p.latitude, 1e-7);
        assert_close(back.longitude, p.longitude, 1e-7);
    }
}
