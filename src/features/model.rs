use crate::features::simplify::{downsample, is_closed_polygon, limit_collection};
use crate::features::tags::TagMap;
use crate::foundation::core::GeoPoint;

pub const MAX_POINTS_PER_LINE: usize = 120;
pub const MAX_POINTS_PER_POLYGON: usize = 180;
pub const MAX_POINTS_PER_BUILDING: usize = 32;
pub const MAX_BUILDING_POLYGONS: usize = 4200;

/// Closed ring of coordinates (first point repeated as last).
pub type Polygon = Vec<GeoPoint>;

/// Road polyline with its normalized `highway` value.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct RoadWay {
    pub highway: String,
    pub points: Vec<GeoPoint>,
}

/// Geometry bundle consumed by the compositor.
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct MapData {
    pub roads: Vec<RoadWay>,
    pub water_polygons: Vec<Polygon>,
    pub park_polygons: Vec<Polygon>,
    pub building_polygons: Vec<Polygon>,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize)]
pub struct MapStats {
    pub roads: usize,
    pub water: usize,
    pub parks: usize,
    pub buildings: usize,
}

impl MapData {
    pub fn stats(&self) -> MapStats {
        MapStats {
            roads: self.roads.len(),
            water: self.water_polygons.len(),
            parks: self.park_polygons.len(),
            buildings: self.building_polygons.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.roads.is_empty()
            && self.water_polygons.is_empty()
            && self.park_polygons.is_empty()
            && self.building_polygons.is_empty()
    }
}

/// OSM element type as reported by the vector-data provider.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ElementKind {
    Node,
    Way,
    Relation,
    Other,
}

impl ElementKind {
    pub fn parse(s: &str) -> Self {
        match s {
            "node" => Self::Node,
            "way" => Self::Way,
            "relation" => Self::Relation,
            _ => Self::Other,
        }
    }
}

/// Raw element: tags plus geometry, before classification.
#[derive(Clone, Debug, PartialEq)]
pub struct TaggedElement {
    pub kind: ElementKind,
    pub tags: TagMap,
    pub geometry: Vec<GeoPoint>,
}

/// Classified element, already downsampled to its per-kind vertex cap.
#[derive(Clone, Debug, PartialEq)]
pub enum Feature {
    Road(RoadWay),
    Building(Polygon),
    Water(Polygon),
    Park(Polygon),
}

/// Classify one element, or `None` when it is discarded.
///
/// Non-finite coordinates are dropped first; fewer than two remaining points discards the
/// element. Roads need no closure; buildings, water and parks must be closed rings.
pub fn classify_element(element: &TaggedElement) -> Option<Feature> {
    if !matches!(element.kind, ElementKind::Way | ElementKind::Relation) {
        return None;
    }

    let points: Vec<GeoPoint> = element
        .geometry
        .iter()
        .copied()
        .filter(|p| p.is_finite())
        .collect();
    if points.len() < 2 {
        return None;
    }

    let tags = &element.tags;
    if let Some(highway) = tags.highway() {
        return Some(Feature::Road(RoadWay {
            highway,
            points: downsample(&points, MAX_POINTS_PER_LINE),
        }));
    }

    let closed = is_closed_polygon(&points);
    if tags.has_building_tag() && closed {
        return Some(Feature::Building(downsample(
            &points,
            MAX_POINTS_PER_BUILDING,
        )));
    }
    if tags.has_water_tags() && closed {
        return Some(Feature::Water(downsample(&points, MAX_POINTS_PER_POLYGON)));
    }
    if tags.has_park_tags() && closed {
        return Some(Feature::Park(downsample(&points, MAX_POINTS_PER_POLYGON)));
    }
    None
}

/// Classify every element and cap the building collection.
#[tracing::instrument(skip(elements), fields(elements = elements.len()))]
pub fn build_map_data(elements: &[TaggedElement]) -> MapData {
    let mut data = MapData::default();
    let mut discarded = 0usize;
    for element in elements {
        match classify_element(element) {
            Some(Feature::Road(road)) => data.roads.push(road),
            Some(Feature::Building(p)) => data.building_polygons.push(p),
            Some(Feature::Water(p)) => data.water_polygons.push(p),
            Some(Feature::Park(p)) => data.park_polygons.push(p),
            None => discarded += 1,
        }
    }
    let buildings_before = data.building_polygons.len();
    data.building_polygons = limit_collection(data.building_polygons, MAX_BUILDING_POLYGONS);

    tracing::debug!(
        roads = data.roads.len(),
        water = data.water_polygons.len(),
        parks = data.park_polygons.len(),
        buildings = data.building_polygons.len(),
        buildings_before,
        discarded,
        "classified map features"
    );
    data
}

#[cfg(test)]
#[path = "../../tests/unit/features/model.rs"]
mod tests;
