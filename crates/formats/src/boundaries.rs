use scene::BoundaryFeature;
use serde_json::{Map, Value};

use crate::geojson::{AreaCollection, AreaFeature, GeoJsonError};

/// Property names tried, in order, for a feature's display name.
pub const NAME_PROPERTIES: &[&str] = &["name", "NAME", "name_en", "ADMIN", "admin"];

/// Property names tried, in order, for a country's ISO 3166-1 alpha-2 code.
pub const ISO_A2_PROPERTIES: &[&str] = &["iso_a2", "ISO_A2", "ISO_A2_EH", "iso_3166_1_alpha_2"];

/// Decoded boundary features plus the count of source features dropped
/// (non-areal, malformed, or unnamed).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BoundaryDocument {
    pub features: Vec<BoundaryFeature>,
    pub skipped: usize,
}

/// Decodes a world country-boundary FeatureCollection.
pub fn decode_countries(payload: &str) -> Result<BoundaryDocument, GeoJsonError> {
    let areas = AreaCollection::from_geojson_str(payload)?;
    let mut doc = BoundaryDocument {
        features: Vec::with_capacity(areas.features.len()),
        skipped: areas.skipped,
    };
    for area in areas.features {
        let Some(name) = first_string(&area.properties, NAME_PROPERTIES) else {
            doc.skipped += 1;
            continue;
        };
        let iso_a2 = iso_code(&area.properties, ISO_A2_PROPERTIES);
        doc.features.push(BoundaryFeature::country(
            name,
            ordinal(&area),
            iso_a2,
            area.polygons,
        ));
    }
    Ok(doc)
}

/// Decodes an admin-1 FeatureCollection, tagging each region with the
/// parent-country code found under `join_property`. Regions without a
/// usable code cannot be joined to a country and are skipped.
pub fn decode_regions(payload: &str, join_property: &str) -> Result<BoundaryDocument, GeoJsonError> {
    let areas = AreaCollection::from_geojson_str(payload)?;
    let mut doc = BoundaryDocument {
        features: Vec::with_capacity(areas.features.len()),
        skipped: areas.skipped,
    };
    for area in areas.features {
        let name = first_string(&area.properties, NAME_PROPERTIES);
        let code = iso_code(&area.properties, &[join_property]);
        let (Some(name), Some(code)) = (name, code) else {
            doc.skipped += 1;
            continue;
        };
        doc.features.push(BoundaryFeature::region(
            code,
            name,
            ordinal(&area),
            area.polygons,
        ));
    }
    Ok(doc)
}

fn ordinal(area: &AreaFeature) -> u32 {
    u32::try_from(area.index).unwrap_or(u32::MAX)
}

fn first_string(props: &Map<String, Value>, keys: &[&str]) -> Option<String> {
    keys.iter()
        .filter_map(|k| props.get(*k).and_then(|v| v.as_str()))
        .map(str::trim)
        .find(|s| !s.is_empty())
        .map(str::to_string)
}

/// Normalized two-letter code; Natural Earth uses "-99" for "no code".
fn iso_code(props: &Map<String, Value>, keys: &[&str]) -> Option<String> {
    keys.iter()
        .filter_map(|k| props.get(*k).and_then(|v| v.as_str()))
        .map(str::trim)
        .find(|s| s.len() == 2 && s.chars().all(|c| c.is_ascii_alphabetic()))
        .map(|s| s.to_ascii_uppercase())
}
