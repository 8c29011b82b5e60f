use std::env;

use geocore::{ConeOptions, DEFAULT_CONE_RADIUS_M, DEFAULT_FIELD_OF_VIEW_DEG};

pub const RADIUS_ENV: &str = "FIELDVIEW_RADIUS_M";
pub const FOV_ENV: &str = "FIELDVIEW_FOV_DEG";

/// Parse an optional numeric environment variable.
pub fn env_f64(name: &str) -> Result<Option<f64>, String> {
    match env::var(name) {
        Ok(raw) => raw
            .trim()
            .parse::<f64>()
            .map(Some)
            .map_err(|e| format!("{name}={raw:?}: {e}")),
        Err(env::VarError::NotPresent) => Ok(None),
        Err(e) => Err(format!("{name}: {e}")),
    }
}

/// Cone options from flags, then environment, then built-in defaults.
pub fn cone_options(radius: Option<f64>, fov: Option<f64>) -> Result<ConeOptions, String> {
    let radius_m = match radius {
        Some(r) => r,
        None => env_f64(RADIUS_ENV)?.unwrap_or(DEFAULT_CONE_RADIUS_M),
    };
    let field_of_view_deg = match fov {
        Some(f) => f,
        None => env_f64(FOV_ENV)?.unwrap_or(DEFAULT_FIELD_OF_VIEW_DEG),
    };
    let options = ConeOptions {
        radius_m,
        field_of_view_deg,
    };
    options.validate().map_err(|e| e.to_string())?;
    Ok(options)
}

#[cfg(test)]
mod tests {
    use super::cone_options;

    #[test]
    fn flags_take_precedence() {
        let options = cone_options(Some(250.0), Some(45.0)).unwrap();
        assert_eq!(options.radius_m, 250.0);
        assert_eq!(options.field_of_view_deg, 45.0);
    }

    #[test]
    fn invalid_values_are_reported() {
        let err = cone_options(Some(-3.0), Some(60.0)).unwrap_err();
        assert!(err.contains("radius"), "{err}");
    }
}
