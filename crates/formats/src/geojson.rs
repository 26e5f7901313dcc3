use foundation::LatLng;
use scene::{Polygon, Ring};
use serde_json::{Map, Value};

/// One areal GeoJSON feature: its properties and polygon parts.
#[derive(Debug, Clone, PartialEq)]
pub struct AreaFeature {
    /// Index of the feature in the source `features` array.
    pub index: usize,
    pub properties: Map<String, Value>,
    pub polygons: Vec<Polygon>,
}

/// Areal features of a FeatureCollection.
///
/// Features that are malformed, carry no geometry, or are not (Multi)Polygons
/// are counted in `skipped` rather than failing the whole document; a world
/// dataset with one bad shape still renders everything else.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AreaCollection {
    pub features: Vec<AreaFeature>,
    pub skipped: usize,
}

#[derive(Debug)]
pub enum GeoJsonError {
    InvalidJson(String),
    NotAFeatureCollection,
}

impl std::fmt::Display for GeoJsonError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GeoJsonError::InvalidJson(msg) => write!(f, "JSON parse error: {msg}"),
            GeoJsonError::NotAFeatureCollection => {
                write!(f, "expected GeoJSON FeatureCollection")
            }
        }
    }
}

impl std::error::Error for GeoJsonError {}

impl AreaCollection {
    pub fn from_geojson_str(payload: &str) -> Result<Self, GeoJsonError> {
        let value: Value =
            serde_json::from_str(payload).map_err(|e| GeoJsonError::InvalidJson(e.to_string()))?;
        Self::from_geojson_value(&value)
    }

    pub fn from_geojson_value(value: &Value) -> Result<Self, GeoJsonError> {
        let obj = value.as_object().ok_or(GeoJsonError::NotAFeatureCollection)?;
        let ty = obj
            .get("type")
            .and_then(|v| v.as_str())
            .ok_or(GeoJsonError::NotAFeatureCollection)?;
        if ty != "FeatureCollection" {
            return Err(GeoJsonError::NotAFeatureCollection);
        }
        let features_val = obj
            .get("features")
            .and_then(|v| v.as_array())
            .ok_or(GeoJsonError::NotAFeatureCollection)?;

        let mut out = AreaCollection {
            features: Vec::with_capacity(features_val.len()),
            skipped: 0,
        };
        for (index, feat_val) in features_val.iter().enumerate() {
            match parse_area_feature(index, feat_val) {
                Some(feature) => out.features.push(feature),
                None => out.skipped += 1,
            }
        }
        Ok(out)
    }
}

fn parse_area_feature(index: usize, value: &Value) -> Option<AreaFeature> {
    let obj = value.as_object()?;
    if obj.get("type").and_then(|v| v.as_str()) != Some("Feature") {
        return None;
    }
    let properties = obj
        .get("properties")
        .and_then(|v| v.as_object())
        .cloned()
        .unwrap_or_default();
    let polygons = parse_area_geometry(obj.get("geometry")?).ok()?;
    Some(AreaFeature {
        index,
        properties,
        polygons,
    })
}

fn parse_area_geometry(value: &Value) -> Result<Vec<Polygon>, String> {
    let obj = value
        .as_object()
        .ok_or("geometry must be an object".to_string())?;
    let ty = obj
        .get("type")
        .and_then(|v| v.as_str())
        .ok_or("geometry missing type".to_string())?;
    let coords = obj
        .get("coordinates")
        .ok_or("geometry missing coordinates".to_string())?;

    match ty {
        "Polygon" => Ok(vec![parse_polygon(coords)?]),
        "MultiPolygon" => parse_multi_polygon(coords),
        other => Err(format!("unsupported geometry type: {other}")),
    }
}

fn parse_position(coords: &Value) -> Result<LatLng, String> {
    let arr = coords
        .as_array()
        .ok_or("position must be an array".to_string())?;
    if arr.len() < 2 {
        return Err("position must have [lng, lat]".to_string());
    }
    let lng = arr[0].as_f64().ok_or("lng must be a number".to_string())?;
    let lat = arr[1].as_f64().ok_or("lat must be a number".to_string())?;
    Ok(LatLng::from_lng_lat(lng, lat))
}

fn parse_ring(coords: &Value) -> Result<Ring, String> {
    let arr = coords
        .as_array()
        .ok_or("ring must be an array of positions".to_string())?;
    arr.iter().map(parse_position).collect()
}

fn parse_polygon(coords: &Value) -> Result<Polygon, String> {
    let rings = coords
        .as_array()
        .ok_or("Polygon coordinates must be an array of rings".to_string())?;
    rings.iter().map(parse_ring).collect()
}

fn parse_multi_polygon(coords: &Value) -> Result<Vec<Polygon>, String> {
    let polys = coords
        .as_array()
        .ok_or("MultiPolygon coordinates must be an array of polygons".to_string())?;
    polys.iter().map(parse_polygon).collect()
}

#[cfg(test)]
mod tests {
    use super::{AreaCollection, GeoJsonError};
    use foundation::LatLng;

    #[test]
    fn parses_polygon_and_multipolygon() {
        let payload = r#"{
            "type": "FeatureCollection",
            "features": [
                {"type": "Feature", "properties": {"name": "A"},
                 "geometry": {"type": "Polygon", "coordinates": [[[-10,5],[-10,15],[0,15],[0,5],[-10,5]]]}},
                {"type": "Feature", "properties": {"name": "B"},
                 "geometry": {"type": "MultiPolygon", "coordinates": [
                    [[[1,1],[2,1],[2,2],[1,1]]],
                    [[[3,3],[4,3],[4,4],[3,3]]]
                 ]}}
            ]
        }"#;
        let c = AreaCollection::from_geojson_str(payload).expect("parse");
        assert_eq!(c.features.len(), 2);
        assert_eq!(c.skipped, 0);
        assert_eq!(c.features[0].polygons[0][0][0], LatLng::new(5.0, -10.0));
        assert_eq!(c.features[1].polygons.len(), 2);
        assert_eq!(c.features[1].index, 1);
    }

    #[test]
    fn skips_points_nulls_and_garbage() {
        let payload = r#"{
            "type": "FeatureCollection",
            "features": [
                {"type": "Feature", "properties": {}, "geometry": {"type": "Point", "coordinates": [1, 2]}},
                {"type": "Feature", "properties": {}, "geometry": null},
                {"type": "Feature", "properties": {}, "geometry": {"type": "Polygon", "coordinates": [[["x", 1]]]}},
                42,
                {"type": "Feature", "geometry": {"type": "Polygon", "coordinates": [[[0,0],[1,0],[1,1],[0,0]]]}}
            ]
        }"#;
        let c = AreaCollection::from_geojson_str(payload).expect("parse");
        assert_eq!(c.features.len(), 1);
        assert_eq!(c.skipped, 4);
        assert!(c.features[0].properties.is_empty());
        assert_eq!(c.features[0].index, 4);
    }

    #[test]
    fn rejects_non_collections() {
        let err = AreaCollection::from_geojson_str(r#"{"type": "Feature"}"#).unwrap_err();
        assert!(matches!(err, GeoJsonError::NotAFeatureCollection));
        let err = AreaCollection::from_geojson_str("not json").unwrap_err();
        assert!(matches!(err, GeoJsonError::InvalidJson(_)));
    }
}
