use geocore::{GeoError, GeoPoint, haversine_distance_m};
use serde::{Deserialize, Serialize};

use crate::event::{LocationFix, Rejection};

/// Filter applied to incoming location fixes, mirroring the time and
/// distance thresholds a platform location watcher is configured with.
#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LocationPolicy {
    /// Minimum time between accepted fixes.
    pub min_interval_ms: u64,
    /// Minimum movement between accepted fixes.
    pub min_distance_m: f64,
    /// Fixes reporting a worse accuracy radius are dropped.
    pub max_accuracy_m: Option<f64>,
}

impl Default for LocationPolicy {
    fn default() -> Self {
        Self {
            min_interval_ms: 1000,
            min_distance_m: 1.0,
            max_accuracy_m: None,
        }
    }
}

impl LocationPolicy {
    /// Accept every fix that is newer than the current one.
    pub fn every_fix() -> Self {
        Self {
            min_interval_ms: 0,
            min_distance_m: 0.0,
            max_accuracy_m: None,
        }
    }

    /// Decide whether `next` replaces `current`.
    pub fn admit(&self, current: Option<&LocationFix>, next: &LocationFix) -> Result<(), Rejection> {
        let point = GeoPoint::try_new(next.latitude, next.longitude)?;

        if let Some(accuracy) = next.accuracy {
            if !accuracy.is_finite() || accuracy < 0.0 {
                return Err(GeoError::invalid("accuracy", accuracy).into());
            }
            if let Some(limit) = self.max_accuracy_m {
                if accuracy > limit {
                    return Err(Rejection::Inaccurate { accuracy, limit });
                }
            }
        }

        let Some(current) = current else {
            return Ok(());
        };
        if next.timestamp <= current.timestamp {
            return Err(Rejection::Stale {
                timestamp: next.timestamp,
                current: current.timestamp,
            });
        }

        let elapsed_ms = next.timestamp - current.timestamp;
        let moved_m = haversine_distance_m(current.point(), point);
        if elapsed_ms < self.min_interval_ms || moved_m < self.min_distance_m {
            return Err(Rejection::BelowThreshold {
                elapsed_ms,
                moved_m,
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::LocationPolicy;
    use crate::event::{LocationFix, Rejection};

    fn fix(latitude: f64, longitude: f64, timestamp: u64) -> LocationFix {
        LocationFix {
            latitude,
            longitude,
            accuracy: None,
            timestamp,
        }
    }

    #[test]
    fn first_fix_is_always_admitted() {
        let policy = LocationPolicy::default();
        assert_eq!(policy.admit(None, &fix(41.9, 12.5, 0)), Ok(()));
    }

    #[test]
    fn older_or_equal_timestamps_are_stale() {
        let policy = LocationPolicy::every_fix();
        let current = fix(41.9, 12.5, 2000);
        assert_eq!(
            policy.admit(Some(&current), &fix(41.9, 12.5, 2000)),
            Err(Rejection::Stale {
                timestamp: 2000,
                current: 2000
            })
        );
        assert!(policy.admit(Some(&current), &fix(41.9, 12.5, 1999)).is_err());
        assert_eq!(policy.admit(Some(&current), &fix(41.9, 12.5, 2001)), Ok(()));
    }

    #[test]
    fn thresholds_need_both_time_and_distance() {
        let policy = LocationPolicy {
            min_interval_ms: 1000,
            min_distance_m: 5.0,
            max_accuracy_m: None,
        };
        let current = fix(0.0, 0.0, 0);
        // ~11 m north but too soon.
        assert!(matches!(
            policy.admit(Some(&current), &fix(0.0001, 0.0, 500)),
            Err(Rejection::BelowThreshold { elapsed_ms: 500, .. })
        ));
        // Late enough but barely moved.
        assert!(policy.admit(Some(&current), &fix(0.000_01, 0.0, 5000)).is_err());
        assert_eq!(policy.admit(Some(&current), &fix(0.0001, 0.0, 1000)), Ok(()));
    }

    #[test]
    fn accuracy_limit() {
        let policy = LocationPolicy {
            max_accuracy_m: Some(20.0),
            ..LocationPolicy::every_fix()
        };
        let mut next = fix(1.0, 1.0, 10);
        next.accuracy = Some(35.0);
        assert_eq!(
            policy.admit(None, &next),
            Err(Rejection::Inaccurate {
                accuracy: 35.0,
                limit: 20.0
            })
        );
        next.accuracy = Some(-1.0);
        assert!(matches!(
            policy.admit(None, &next),
            Err(Rejection::Invalid(_))
        ));
        next.accuracy = Some(5.0);
        assert_eq!(policy.admit(None, &next), Ok(()));
    }

    #[test]
    fn invalid_coordinates_are_rejected() {
        let policy = LocationPolicy::every_fix();
        assert!(matches!(
            policy.admit(None, &fix(f64::NAN, 0.0, 1)),
            Err(Rejection::Invalid(_))
        ));
    }
}
