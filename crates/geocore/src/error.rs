/// Failures of the geodesy core. Both arise only from malformed input.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GeoError {
    /// A non-finite or out-of-range input value.
    InvalidInput { field: &'static str, value: f64 },
    /// Bearing is undefined when the origin sits exactly on a pole.
    PolarDegeneracy { latitude: f64 },
}

impl GeoError {
    pub fn invalid(field: &'static str, value: f64) -> Self {
        GeoError::InvalidInput { field, value }
    }
}

impl std::fmt::Display for GeoError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GeoError::InvalidInput { field, value } => {
                write!(f, "invalid {field}: {value}")
            }
            GeoError::PolarDegeneracy { latitude } => {
                write!(f, "bearing undefined at pole (latitude {latitude})")
            }
        }
    }
}

impl std::error::Error for GeoError {}

/// Reject NaN and infinities.
pub(crate) fn finite(field: &'static str, value: f64) -> Result<f64, GeoError> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(GeoError::invalid(field, value))
    }
}
