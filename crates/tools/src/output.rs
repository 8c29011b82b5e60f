use geocore::{ConeOptions, ConePolygon, GeoPoint, Heading, UtmCoordinate, UtmProjection};
use serde_json::{Value, json};

/// Cone as a GeoJSON Feature with a single-ring Polygon.
pub fn cone_feature(cone: &ConePolygon, heading: Heading, options: &ConeOptions) -> Value {
    json!({
        "type": "Feature",
        "geometry": {
            "type": "Polygon",
            "coordinates": [cone.ring_lon_lat()],
        },
        "properties": {
            "heading": heading.degrees(),
            "radius_m": options.radius_m,
            "field_of_view_deg": options.field_of_view_deg,
        },
    })
}

pub fn cone_record(cone: &ConePolygon, heading: Heading, options: &ConeOptions) -> Value {
    json!({
        "center": cone.apex(),
        "heading": heading.degrees(),
        "radius_m": options.radius_m,
        "polygon": cone.points(),
    })
}

/// Full-precision values plus the two-decimal display form.
pub fn utm_record(point: GeoPoint, utm: &UtmCoordinate, projection: &UtmProjection) -> Value {
    let rounded = utm.rounded();
    json!({
        "point": point,
        "utm": utm,
        "display": {
            "easting": format!("{:.2}", rounded.easting),
            "northing": format!("{:.2}", rounded.northing),
            "text": utm.to_string(),
        },
        "projection": projection.to_string(),
    })
}

pub fn inverse_record(utm: &UtmCoordinate, point: GeoPoint) -> Value {
    json!({
        "utm": utm,
        "point": point,
    })
}

pub fn to_json_line(value: &Value, pretty: bool) -> Result<String, serde_json::Error> {
    if pretty {
        serde_json::to_string_pretty(value)
    } else {
        serde_json::to_string(value)
    }
}

#[cfg(test)]
mod tests {
    use super::{cone_feature, utm_record};
    use geocore::{
        ConeOptions, Datum, GeoPoint, Heading, UtmProjection, compute_cone_with, to_utm_ed50,
    };
    use pretty_assertions::assert_eq;

    #[test]
    fn cone_feature_is_closed_geojson_ring() {
        let center = GeoPoint::new(41.9028, 12.4964);
        let heading = Heading::new(30.0).unwrap();
        let options = ConeOptions::default();
        let cone = compute_cone_with(center, heading, &options).unwrap();
        let feature = cone_feature(&cone, heading, &options);

        assert_eq!(feature["geometry"]["type"], "Polygon");
        let ring = feature["geometry"]["coordinates"][0].as_array().unwrap();
        assert_eq!(ring.len(), 4);
        assert_eq!(ring[0], ring[3]);
        assert_eq!(ring[0][0], 12.4964);
        assert_eq!(ring[0][1], 41.9028);
        assert_eq!(feature["properties"]["radius_m"], 100.0);
    }

    #[test]
    fn utm_record_carries_display_strings() {
        let point = GeoPoint::new(41.9028, 12.4964);
        let utm = to_utm_ed50(point).unwrap();
        let projection = UtmProjection::for_point(point, Datum::ED50);
        let record = utm_record(point, &utm, &projection);
        assert_eq!(record["display"]["easting"], "292405.87");
        assert_eq!(record["display"]["northing"], "4642205.39");
        assert_eq!(record["utm"]["zone"], 33);
        assert_eq!(
            record["projection"],
            "+proj=utm +zone=33 +ellps=intl +towgs84=-87,-98,-121,0,0,0,0 +units=m +no_defs"
        );
    }
}
