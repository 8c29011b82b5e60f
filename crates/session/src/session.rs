//! App-side view state fed by location, compass and tap inputs.
//!
//! Each input replaces the previous one of its kind; the cone is derived
//! from whatever position and heading are current.

use std::collections::HashMap;

use geocore::{
    ConeOptions, ConePolygon, GeoError, GeoPoint, Heading, UtmCoordinate, compute_cone_with,
    to_utm_ed50,
};
use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::event::{CompassReading, LocationFix, Rejection, SessionEvent, SessionUpdate, TapEvent};
use crate::event_log::{EventLog, LogEntry};
use crate::policy::LocationPolicy;

const TAP_CACHE_CAPACITY: usize = 256;

#[derive(Debug, Copy, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    pub cone: ConeOptions,
    pub location: LocationPolicy,
}

/// The most recent tapped point and its grid reference.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Selection {
    pub point: GeoPoint,
    pub utm: UtmCoordinate,
}

#[derive(Debug)]
pub struct FieldSession {
    config: SessionConfig,
    fix: Option<LocationFix>,
    heading: Option<Heading>,
    selection: Option<Selection>,
    /// Keyed by the exact bit pattern of (latitude, longitude).
    tap_cache: HashMap<(u64, u64), UtmCoordinate>,
    log: EventLog,
}

impl FieldSession {
    pub fn new(config: SessionConfig) -> Result<Self, GeoError> {
        config.cone.validate()?;
        Ok(Self {
            config,
            fix: None,
            heading: None,
            selection: None,
            tap_cache: HashMap::new(),
            log: EventLog::new(),
        })
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    pub fn fix(&self) -> Option<&LocationFix> {
        self.fix.as_ref()
    }

    pub fn position(&self) -> Option<GeoPoint> {
        self.fix.map(|f| f.point())
    }

    pub fn heading(&self) -> Option<Heading> {
        self.heading
    }

    pub fn selection(&self) -> Option<Selection> {
        self.selection
    }

    pub fn log(&self) -> &EventLog {
        &self.log
    }

    pub fn drain_log(&mut self) -> Vec<LogEntry> {
        self.log.drain()
    }

    fn reject(&mut self, kind: &'static str, rejection: Rejection) -> Rejection {
        debug!(kind, %rejection, "input rejected");
        self.log.record("rejected", format!("{kind}: {rejection}"));
        rejection
    }

    pub fn on_location(&mut self, fix: LocationFix) -> Result<(), Rejection> {
        if let Err(r) = self.config.location.admit(self.fix.as_ref(), &fix) {
            return Err(self.reject("location", r));
        }
        trace!(
            latitude = fix.latitude,
            longitude = fix.longitude,
            timestamp = fix.timestamp,
            "position updated"
        );
        let accuracy = fix
            .accuracy
            .map(|a| format!(" ±{a:.1}m"))
            .unwrap_or_default();
        self.log.record(
            "location",
            format!(
                "{:.6},{:.6}{accuracy} @{}",
                fix.latitude, fix.longitude, fix.timestamp
            ),
        );
        self.fix = Some(fix);
        Ok(())
    }

    pub fn on_heading(&mut self, reading: CompassReading) -> Result<Heading, Rejection> {
        if reading.true_heading < 0.0 {
            return Err(self.reject("heading", Rejection::HeadingUnavailable));
        }
        let heading = match Heading::new(reading.true_heading) {
            Ok(h) => h,
            Err(e) => return Err(self.reject("heading", e.into())),
        };
        trace!(heading = heading.degrees(), "heading updated");
        self.log.record("heading", format!("{:.1}", heading.degrees()));
        self.heading = Some(heading);
        Ok(heading)
    }

    /// Convert a tapped point to UTM ED50 and make it the current selection.
    /// The flag is true when the result came from the cache.
    pub fn on_tap(&mut self, tap: TapEvent) -> Result<(UtmCoordinate, bool), Rejection> {
        let point = match GeoPoint::try_new(tap.latitude, tap.longitude) {
            Ok(p) => p,
            Err(e) => return Err(self.reject("tap", e.into())),
        };

        let key = (point.latitude.to_bits(), point.longitude.to_bits());
        let (utm, cached) = match self.tap_cache.get(&key).copied() {
            Some(utm) => (utm, true),
            None => {
                let utm = match to_utm_ed50(point) {
                    Ok(u) => u,
                    Err(e) => return Err(self.reject("tap", e.into())),
                };
                if self.tap_cache.len() >= TAP_CACHE_CAPACITY {
                    self.tap_cache.clear();
                }
                self.tap_cache.insert(key, utm);
                (utm, false)
            }
        };

        self.log.record("tap", utm.to_string());
        self.selection = Some(Selection { point, utm });
        Ok((utm, cached))
    }

    /// Direction cone for the current position and heading, when both are
    /// known. None at the poles, where a heading has no direction.
    pub fn cone(&self) -> Option<ConePolygon> {
        let center = self.position()?;
        let heading = self.heading?;
        match compute_cone_with(center, heading, &self.config.cone) {
            Ok(cone) => Some(cone),
            Err(e) => {
                debug!(error = %e, "no cone for current position");
                None
            }
        }
    }

    pub fn apply(&mut self, event: SessionEvent) -> SessionUpdate {
        let kind = event.kind();
        let result = match event {
            SessionEvent::Location(fix) => {
                self.on_location(fix).map(|()| SessionUpdate::Position {
                    position: fix.point(),
                    cone: self.cone(),
                })
            }
            SessionEvent::Heading(reading) => {
                self.on_heading(reading).map(|heading| SessionUpdate::Heading {
                    heading,
                    cone: self.cone(),
                })
            }
            SessionEvent::Tap(tap) => {
                self.on_tap(tap).map(|(utm, cached)| SessionUpdate::Selection {
                    point: tap.point(),
                    utm,
                    cached,
                })
            }
        };
        result.unwrap_or_else(|rejection| SessionUpdate::Rejected {
            event: kind,
            reason: rejection.to_string(),
        })
    }
}
