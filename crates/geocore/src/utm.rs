//! UTM zone selection and datum-aware UTM conversion.

use serde::{Deserialize, Serialize};

use crate::datum::Datum;
use crate::error::{GeoError, finite};
use crate::math::{Geodetic, TransverseMercator};
use crate::point::{GeoPoint, wrap_180};

pub const UTM_SCALE_FACTOR: f64 = 0.9996;
pub const UTM_FALSE_EASTING: f64 = 500_000.0;
pub const UTM_FALSE_NORTHING_SOUTH: f64 = 10_000_000.0;
pub const UTM_ZONE_COUNT: u8 = 60;
pub const UTM_ZONE_WIDTH_DEG: f64 = 6.0;

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Hemisphere {
    #[serde(rename = "N")]
    North,
    #[serde(rename = "S")]
    South,
}

impl Hemisphere {
    /// The equator belongs to the northern hemisphere.
    pub fn for_latitude(latitude: f64) -> Self {
        if latitude < 0.0 {
            Hemisphere::South
        } else {
            Hemisphere::North
        }
    }

    pub fn is_south(self) -> bool {
        self == Hemisphere::South
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Hemisphere::North => "N",
            Hemisphere::South => "S",
        }
    }
}

impl std::fmt::Display for Hemisphere {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Hemisphere {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "N" | "n" | "north" => Ok(Hemisphere::North),
            "S" | "s" | "south" => Ok(Hemisphere::South),
            other => Err(format!("unknown hemisphere: {other}")),
        }
    }
}

/// Zone number for a longitude. Longitude 180 falls in zone 60.
pub fn zone_for_longitude(longitude: f64) -> u8 {
    let zone = ((longitude + 180.0) / UTM_ZONE_WIDTH_DEG).floor() + 1.0;
    zone.clamp(1.0, UTM_ZONE_COUNT as f64) as u8
}

pub fn central_meridian_deg(zone: u8) -> f64 {
    zone as f64 * UTM_ZONE_WIDTH_DEG - 183.0
}

fn check_zone(zone: u8) -> Result<u8, GeoError> {
    if (1..=UTM_ZONE_COUNT).contains(&zone) {
        Ok(zone)
    } else {
        Err(GeoError::invalid("zone", zone as f64))
    }
}

/// A UTM projection definition in structured form.
///
/// `Display` renders the equivalent PROJ.4 string, e.g.
/// `+proj=utm +zone=33 +ellps=intl +towgs84=-87,-98,-121,0,0,0,0 +units=m +no_defs`.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct UtmProjection {
    pub zone: u8,
    pub hemisphere: Hemisphere,
    pub datum: Datum,
}

impl UtmProjection {
    pub fn new(zone: u8, hemisphere: Hemisphere, datum: Datum) -> Result<Self, GeoError> {
        Ok(Self {
            zone: check_zone(zone)?,
            hemisphere,
            datum,
        })
    }

    /// Zone and hemisphere containing `point`.
    pub fn for_point(point: GeoPoint, datum: Datum) -> Self {
        Self {
            zone: zone_for_longitude(point.longitude),
            hemisphere: Hemisphere::for_latitude(point.latitude),
            datum,
        }
    }

    pub fn transverse_mercator(&self) -> TransverseMercator {
        let false_northing = if self.hemisphere.is_south() {
            UTM_FALSE_NORTHING_SOUTH
        } else {
            0.0
        };
        TransverseMercator::new(
            self.datum.ellipsoid,
            central_meridian_deg(self.zone),
            UTM_SCALE_FACTOR,
            UTM_FALSE_EASTING,
            false_northing,
        )
    }
}

impl std::fmt::Display for UtmProjection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "+proj=utm +zone={}", self.zone)?;
        if self.hemisphere.is_south() {
            write!(f, " +south")?;
        }
        if self.datum.is_wgs84() {
            write!(f, " +datum=WGS84")?;
        } else {
            let params = self.datum.to_wgs84.params().map(|p| p.to_string());
            write!(
                f,
                " +ellps={} +towgs84={}",
                self.datum.ellipsoid.name,
                params.join(",")
            )?;
        }
        write!(f, " +units=m +no_defs")
    }
}

/// A UTM position. Values keep full precision; see [`UtmCoordinate::rounded`].
#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize)]
pub struct UtmCoordinate {
    pub easting: f64,
    pub northing: f64,
    pub zone: u8,
    pub hemisphere: Hemisphere,
}

impl UtmCoordinate {
    /// Easting and northing rounded to centimeters, for display.
    pub fn rounded(&self) -> Self {
        Self {
            easting: round_cm(self.easting),
            northing: round_cm(self.northing),
            ..*self
        }
    }
}

impl std::fmt::Display for UtmCoordinate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}{} {:.2}E {:.2}N",
            self.zone, self.hemisphere, self.easting, self.northing
        )
    }
}

fn round_cm(v: f64) -> f64 {
    (v * 100.0).round() / 100.0
}

/// Project a WGS84 point into the UTM grid of `datum`.
pub fn to_utm(point: GeoPoint, datum: &Datum) -> Result<UtmCoordinate, GeoError> {
    point.validate()?;
    let projection = UtmProjection::for_point(point, *datum);
    let local = datum.wgs84_to_local(point);
    let projected = projection
        .transverse_mercator()
        .forward(local.lat_rad, local.lon_rad);
    Ok(UtmCoordinate {
        easting: projected.easting,
        northing: projected.northing,
        zone: projection.zone,
        hemisphere: projection.hemisphere,
    })
}

/// WGS84 point -> UTM on the ED50 datum.
pub fn to_utm_ed50(point: GeoPoint) -> Result<UtmCoordinate, GeoError> {
    to_utm(point, &Datum::ED50)
}

/// Inverse of [`to_utm`]: a UTM position on `datum` back to a WGS84 point.
pub fn from_utm(coord: UtmCoordinate, datum: &Datum) -> Result<GeoPoint, GeoError> {
    finite("easting", coord.easting)?;
    finite("northing", coord.northing)?;
    let projection = UtmProjection::new(coord.zone, coord.hemisphere, *datum)?;
    let (lat_rad, lon_rad) = projection
        .transverse_mercator()
        .inverse(coord.easting, coord.northing);
    let point = datum.local_to_wgs84(Geodetic::new(lat_rad, lon_rad, 0.0));
    Ok(GeoPoint::new(point.latitude, wrap_180(point.longitude)))
}

pub fn from_utm_ed50(coord: UtmCoordinate) -> Result<GeoPoint, GeoError> {
    from_utm(coord, &Datum::ED50)
}
