use super::Ecef;

const ARCSEC_TO_RAD: f64 = std::f64::consts::PI / (180.0 * 3600.0);

/// Seven-parameter similarity transform from a local datum frame to WGS84.
///
/// Parameters follow the PROJ `+towgs84` convention: translations in meters,
/// rotations in arc-seconds (position vector), scale in parts per million.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Helmert {
    pub dx: f64,
    pub dy: f64,
    pub dz: f64,
    pub rx: f64,
    pub ry: f64,
    pub rz: f64,
    pub scale_ppm: f64,
}

impl Helmert {
    pub const IDENTITY: Helmert = Helmert::new([0.0; 7]);

    /// `[dx, dy, dz, rx, ry, rz, scale]`, the `+towgs84` ordering.
    pub const fn new(params: [f64; 7]) -> Self {
        Self {
            dx: params[0],
            dy: params[1],
            dz: params[2],
            rx: params[3],
            ry: params[4],
            rz: params[5],
            scale_ppm: params[6],
        }
    }

    pub fn params(&self) -> [f64; 7] {
        [
            self.dx,
            self.dy,
            self.dz,
            self.rx,
            self.ry,
            self.rz,
            self.scale_ppm,
        ]
    }

    pub fn is_identity(&self) -> bool {
        self.params().iter().all(|p| *p == 0.0)
    }

    fn rotations_rad(&self) -> (f64, f64, f64) {
        (
            self.rx * ARCSEC_TO_RAD,
            self.ry * ARCSEC_TO_RAD,
            self.rz * ARCSEC_TO_RAD,
        )
    }

    fn scale(&self) -> f64 {
        1.0 + self.scale_ppm * 1e-6
    }

    /// Local datum frame -> WGS84 frame.
    pub fn forward(&self, p: Ecef) -> Ecef {
        let (rx, ry, rz) = self.rotations_rad();
        let m = self.scale();
        Ecef::new(
            m * (p.x - rz * p.y + ry * p.z) + self.dx,
            m * (rz * p.x + p.y - rx * p.z) + self.dy,
            m * (-ry * p.x + rx * p.y + p.z) + self.dz,
        )
    }

    /// WGS84 frame -> local datum frame. Exact inverse when rotations are zero,
    /// first order in the rotation angles otherwise.
    pub fn inverse(&self, p: Ecef) -> Ecef {
        let (rx, ry, rz) = self.rotations_rad();
        let m = self.scale();
        let x = (p.x - self.dx) / m;
        let y = (p.y - self.dy) / m;
        let z = (p.z - self.dz) / m;
        Ecef::new(
            x + rz * y - ry * z,
            -rz * x + y + rx * z,
            ry * x - rx * y + z,
        )
    }
}

impl Default for Helmert {
    fn default() -> Self {
        Self::IDENTITY
    }
}

#[cfg(test)]
mod tests {
    use super::Helmert;
    use crate::math::Ecef;

    fn assert_close(a: f64, b: f64, eps: f64) {
        let diff = (a - b).abs();
        assert!(diff <= eps, "expected {a} ~= {b} (diff {diff})");
    }

    #[test]
    fn translation_only_shift() {
        let h = Helmert::new([-87.0, -98.0, -121.0, 0.0, 0.0, 0.0, 0.0]);
        let p = Ecef::new(4_000_000.0, 1_000_000.0, 4_800_000.0);
        let w = h.forward(p);
        assert_eq!(w, Ecef::new(3_999_913.0, 999_902.0, 4_799_879.0));
        assert_eq!(h.inverse(w), p);
    }

    #[test]
    fn seven_parameter_round_trip() {
        // OSGB36 -> WGS84 style magnitudes.
        let h = Helmert::new([446.448, -125.157, 542.06, 0.15, 0.247, 0.842, -20.489]);
        let p = Ecef::new(3_909_833.0, -147_097.0, 5_020_322.0);
        let back = h.inverse(h.forward(p));
        // First-order rotation inverse leaves a residual well under a millimeter.
        assert_close(back.x, p.x, 1e-3);
        assert_close(back.y, p.y, 1e-3);
        assert_close(back.z, p.z, 1e-3);
    }

    #[test]
    fn identity() {
        assert!(Helmert::IDENTITY.is_identity());
        assert!(!Helmert::new([0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 1.0]).is_identity());
        let p = Ecef::new(1.0, 2.0, 3.0);
        assert_eq!(Helmert::default().forward(p), p);
    }
}
