use geocore::{ConePolygon, GeoError, GeoPoint, Heading, UtmCoordinate};
use serde::{Deserialize, Serialize};

/// A position fix from the platform location service.
#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize)]
pub struct LocationFix {
    pub latitude: f64,
    pub longitude: f64,
    /// Horizontal accuracy radius in meters, when reported.
    #[serde(default)]
    pub accuracy: Option<f64>,
    /// Milliseconds since the Unix epoch.
    pub timestamp: u64,
}

impl LocationFix {
    pub fn point(&self) -> GeoPoint {
        GeoPoint::new(self.latitude, self.longitude)
    }
}

/// A compass sample. Platforms report a negative heading when true north is
/// not available.
#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompassReading {
    #[serde(rename = "trueHeading")]
    pub true_heading: f64,
}

/// A tap on the map widget.
#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize)]
pub struct TapEvent {
    pub latitude: f64,
    pub longitude: f64,
}

impl TapEvent {
    pub fn point(&self) -> GeoPoint {
        GeoPoint::new(self.latitude, self.longitude)
    }
}

/// Any input the session consumes, in the JSON-lines replay format:
/// `{"type":"location","latitude":..,"longitude":..,"timestamp":..}`.
#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum SessionEvent {
    Location(LocationFix),
    Heading(CompassReading),
    Tap(TapEvent),
}

impl SessionEvent {
    pub fn kind(&self) -> &'static str {
        match self {
            SessionEvent::Location(_) => "location",
            SessionEvent::Heading(_) => "heading",
            SessionEvent::Tap(_) => "tap",
        }
    }
}

/// Why an input was not applied.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Rejection {
    Invalid(GeoError),
    /// Timestamp not newer than the current fix.
    Stale { timestamp: u64, current: u64 },
    /// Reported accuracy worse than the configured limit.
    Inaccurate { accuracy: f64, limit: f64 },
    /// Not enough time elapsed or distance covered since the current fix.
    BelowThreshold { elapsed_ms: u64, moved_m: f64 },
    HeadingUnavailable,
}

impl std::fmt::Display for Rejection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Rejection::Invalid(e) => write!(f, "{e}"),
            Rejection::Stale { timestamp, current } => {
                write!(f, "stale fix at {timestamp} (current {current})")
            }
            Rejection::Inaccurate { accuracy, limit } => {
                write!(f, "accuracy {accuracy} m exceeds limit {limit} m")
            }
            Rejection::BelowThreshold {
                elapsed_ms,
                moved_m,
            } => write!(
                f,
                "below update threshold ({elapsed_ms} ms, {moved_m:.1} m)"
            ),
            Rejection::HeadingUnavailable => write!(f, "true heading unavailable"),
        }
    }
}

impl From<GeoError> for Rejection {
    fn from(value: GeoError) -> Self {
        Rejection::Invalid(value)
    }
}

/// What changed after applying a [`SessionEvent`].
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum SessionUpdate {
    Position {
        position: GeoPoint,
        cone: Option<ConePolygon>,
    },
    Heading {
        heading: Heading,
        cone: Option<ConePolygon>,
    },
    Selection {
        point: GeoPoint,
        utm: UtmCoordinate,
        cached: bool,
    },
    Rejected {
        event: &'static str,
        reason: String,
    },
}

#[cfg(test)]
mod tests {
    use super::{CompassReading, LocationFix, SessionEvent, TapEvent};
    use pretty_assertions::assert_eq;

    #[test]
    fn parses_replay_lines() {
        let ev: SessionEvent = serde_json::from_str(
            r#"{"type":"location","latitude":41.9,"longitude":12.5,"accuracy":4.0,"timestamp":1000}"#,
        )
        .unwrap();
        assert_eq!(
            ev,
            SessionEvent::Location(LocationFix {
                latitude: 41.9,
                longitude: 12.5,
                accuracy: Some(4.0),
                timestamp: 1000,
            })
        );

        let ev: SessionEvent =
            serde_json::from_str(r#"{"type":"heading","trueHeading":271.5}"#).unwrap();
        assert_eq!(
            ev,
            SessionEvent::Heading(CompassReading { true_heading: 271.5 })
        );
        assert_eq!(ev.kind(), "heading");

        let ev: SessionEvent =
            serde_json::from_str(r#"{"type":"tap","latitude":-1.0,"longitude":2.0}"#).unwrap();
        assert_eq!(
            ev,
            SessionEvent::Tap(TapEvent {
                latitude: -1.0,
                longitude: 2.0
            })
        );
    }

    #[test]
    fn accuracy_is_optional() {
        let ev: SessionEvent = serde_json::from_str(
            r#"{"type":"location","latitude":0.0,"longitude":0.0,"timestamp":5}"#,
        )
        .unwrap();
        let SessionEvent::Location(fix) = ev else {
            panic!("expected location, got {ev:?}");
        };
        assert_eq!(fix.accuracy, None);
    }

    #[test]
    fn unknown_type_is_an_error() {
        assert!(serde_json::from_str::<SessionEvent>(r#"{"type":"battery"}"#).is_err());
    }
}
