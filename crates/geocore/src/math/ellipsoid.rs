use super::{Ecef, Geodetic};

/// WGS84 semi-major axis (meters).
pub const WGS84_A: f64 = 6_378_137.0;
/// WGS84 flattening.
pub const WGS84_F: f64 = 1.0 / 298.257_223_563;
/// International 1924 (Hayford) semi-major axis (meters).
pub const INTL_A: f64 = 6_378_388.0;
/// International 1924 flattening.
pub const INTL_F: f64 = 1.0 / 297.0;

/// Reference ellipsoid of revolution.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Ellipsoid {
    pub name: &'static str,
    /// Semi-major axis (meters).
    pub a: f64,
    /// Flattening.
    pub f: f64,
}

impl Ellipsoid {
    pub const WGS84: Ellipsoid = Ellipsoid::new("WGS84", WGS84_A, WGS84_F);
    /// Used by ED50. PROJ calls it `intl`.
    pub const INTERNATIONAL_1924: Ellipsoid = Ellipsoid::new("intl", INTL_A, INTL_F);

    pub const fn new(name: &'static str, a: f64, f: f64) -> Self {
        Self { name, a, f }
    }

    /// Semi-minor axis (meters).
    pub fn b(&self) -> f64 {
        self.a * (1.0 - self.f)
    }

    /// First eccentricity squared.
    pub fn e2(&self) -> f64 {
        self.f * (2.0 - self.f)
    }

    /// Second eccentricity squared.
    pub fn ep2(&self) -> f64 {
        let b = self.b();
        (self.a * self.a - b * b) / (b * b)
    }

    /// Third flattening.
    pub fn n(&self) -> f64 {
        self.f / (2.0 - self.f)
    }

    /// Prime vertical radius of curvature.
    fn prime_vertical(&self, sin_lat: f64) -> f64 {
        self.a / (1.0 - self.e2() * sin_lat * sin_lat).sqrt()
    }

    pub fn geodetic_to_ecef(&self, geo: Geodetic) -> Ecef {
        let sin_lat = geo.lat_rad.sin();
        let cos_lat = geo.lat_rad.cos();
        let sin_lon = geo.lon_rad.sin();
        let cos_lon = geo.lon_rad.cos();

        let n = self.prime_vertical(sin_lat);
        let x = (n + geo.alt_m) * cos_lat * cos_lon;
        let y = (n + geo.alt_m) * cos_lat * sin_lon;
        let z = (n * (1.0 - self.e2()) + geo.alt_m) * sin_lat;

        Ecef::new(x, y, z)
    }

    /// Bowring's closed form; sub-millimeter for terrestrial heights.
    pub fn ecef_to_geodetic(&self, ecef: Ecef) -> Geodetic {
        let a = self.a;
        let b = self.b();
        let e2 = self.e2();

        let p = (ecef.x * ecef.x + ecef.y * ecef.y).sqrt();
        let lon = ecef.y.atan2(ecef.x);

        let theta = (ecef.z * a).atan2(p * b);
        let sin_theta = theta.sin();
        let cos_theta = theta.cos();

        let lat = (ecef.z + self.ep2() * b * sin_theta * sin_theta * sin_theta)
            .atan2(p - e2 * a * cos_theta * cos_theta * cos_theta);

        let sin_lat = lat.sin();
        let cos_lat = lat.cos();
        let n = self.prime_vertical(sin_lat);
        // p / cos(lat) blows up on the polar axis; use the z form there.
        let alt = if cos_lat.abs() > 1e-10 {
            p / cos_lat - n
        } else {
            ecef.z.abs() - b
        };

        Geodetic::new(lat, lon, alt)
    }
}
