use std::collections::BTreeMap;

use serde::Deserialize;

use crate::features::model::{ElementKind, MapData, TaggedElement, build_map_data};
use crate::features::tags::TagMap;
use crate::foundation::core::{Bounds, GeoPoint};
use crate::foundation::error::{PosterError, PosterResult};

/// Highway classes requested from the provider.
pub const HIGHWAY_FILTER: &str = "motorway|motorway_link|trunk|trunk_link|primary|primary_link|secondary|secondary_link|tertiary|tertiary_link|residential|living_street|unclassified";

/// Top-level response. `elements` is kept loose so a `null` or non-array value reads as empty.
#[derive(Debug, Default, Deserialize)]
struct OverpassPayload {
    #[serde(default)]
    elements: Option<serde_json::Value>,
}

#[derive(Debug, Deserialize)]
struct OverpassElement {
    #[serde(rename = "type", default)]
    kind: Option<String>,
    #[serde(default)]
    tags: Option<BTreeMap<String, serde_json::Value>>,
    #[serde(default)]
    geometry: Option<serde_json::Value>,
}

impl OverpassPayload {
    /// Decodable elements; array entries that are not element objects are skipped.
    fn into_elements(self) -> Vec<TaggedElement> {
        let Some(serde_json::Value::Array(items)) = self.elements else {
            return Vec::new();
        };
        let total = items.len();
        let elements: Vec<TaggedElement> = items
            .into_iter()
            .filter_map(|v| OverpassElement::deserialize(v).ok())
            .map(TaggedElement::from)
            .collect();
        if elements.len() < total {
            tracing::debug!(
                skipped = total - elements.len(),
                "dropped malformed overpass elements"
            );
        }
        elements
    }
}

/// Coordinates arrive as numbers but numeric strings are tolerated; anything else is `NaN`
/// and gets filtered during classification.
fn coord(v: Option<&serde_json::Value>) -> f64 {
    match v {
        Some(serde_json::Value::Number(n)) => n.as_f64().unwrap_or(f64::NAN),
        Some(serde_json::Value::String(s)) => s.trim().parse().unwrap_or(f64::NAN),
        _ => f64::NAN,
    }
}

fn tag_value(v: serde_json::Value) -> String {
    match v {
        serde_json::Value::String(s) => s,
        serde_json::Value::Null => String::new(),
        other => other.to_string(),
    }
}

fn geometry_points(geometry: Option<serde_json::Value>) -> Vec<GeoPoint> {
    let Some(serde_json::Value::Array(points)) = geometry else {
        return Vec::new();
    };
    points
        .iter()
        .map(|p| GeoPoint::new(coord(p.get("lat")), coord(p.get("lon"))))
        .collect()
}

impl From<OverpassElement> for TaggedElement {
    fn from(e: OverpassElement) -> Self {
        TaggedElement {
            kind: ElementKind::parse(e.kind.as_deref().unwrap_or_default()),
            tags: e
                .tags
                .unwrap_or_default()
                .into_iter()
                .map(|(k, v)| (k, tag_value(v)))
                .collect::<TagMap>(),
            geometry: geometry_points(e.geometry),
        }
    }
}

/// Decode an Overpass `out geom` JSON response into tagged elements.
///
/// Only unparsable JSON is an error; malformed elements are dropped.
pub fn parse_overpass_elements(json: &str) -> PosterResult<Vec<TaggedElement>> {
    let value: serde_json::Value = serde_json::from_str(json)
        .map_err(|e| PosterError::serde(format!("overpass payload: {e}")))?;
    Ok(payload_from_value(value)?.into_elements())
}

/// Non-object payloads carry no elements.
fn payload_from_value(value: serde_json::Value) -> PosterResult<OverpassPayload> {
    if !value.is_object() {
        return Ok(OverpassPayload::default());
    }
    OverpassPayload::deserialize(value)
        .map_err(|e| PosterError::serde(format!("overpass payload: {e}")))
}

/// Decode an Overpass response and classify it into [`MapData`].
///
/// A payload without `elements` yields empty map data.
#[tracing::instrument(skip(json), fields(bytes = json.len()))]
pub fn parse_overpass_payload(json: &str) -> PosterResult<MapData> {
    let elements = parse_overpass_elements(json)?;
    Ok(build_map_data(&elements))
}

/// Same as [`parse_overpass_payload`] for an already-parsed JSON value.
pub fn parse_overpass_value(value: serde_json::Value) -> PosterResult<MapData> {
    Ok(build_map_data(&payload_from_value(value)?.into_elements()))
}

fn bbox(b: &Bounds) -> String {
    format!(
        "{:.6},{:.6},{:.6},{:.6}",
        b.south, b.west, b.north, b.east
    )
}

/// Overpass QL request for everything the poster draws.
///
/// Buildings are requested over `building_bounds`, which callers usually keep tighter than the
/// road/water/park area.
pub fn build_overpass_query(bounds: &Bounds, building_bounds: &Bounds) -> String {
    let area = bbox(bounds);
    let buildings = bbox(building_bounds);
    format!(
        "[out:json][timeout:25];\n\
         (\n  \
         way[\"highway\"~\"{HIGHWAY_FILTER}\"]({area});\n  \
         way[\"natural\"~\"water|bay|strait\"]({area});\n  \
         way[\"waterway\"=\"riverbank\"]({area});\n  \
         way[\"leisure\"=\"park\"]({area});\n  \
         way[\"landuse\"=\"grass\"]({area});\n  \
         way[\"building\"]({buildings});\n  \
         relation[\"building\"]({buildings});\n\
         );\n\
         out geom qt;"
    )
}

#[cfg(test)]
#[path = "../../tests/unit/features/overpass.rs"]
mod tests;
