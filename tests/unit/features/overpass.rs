use super::*;

#[test]
fn parses_and_classifies_payload() {
    let json = r#"{
      "elements": [
        {"type": "way", "tags": {"highway": "residential"},
         "geometry": [{"lat": 52.37, "lon": 9.73}, {"lat": "52.38", "lon": "9.74"}]},
        {"type": "way", "tags": {"leisure": "park"},
         "geometry": [{"lat": 1, "lon": 1}, {"lat": 1, "lon": 2}, {"lat": 2, "lon": 2}, {"lat": 1, "lon": 1}]},
        {"type": "node", "tags": {"highway": "primary"}, "lat": 1.0, "lon": 1.0},
        {"type": "way", "tags": {"highway": "primary"},
         "geometry": [{"lat": null, "lon": 1}, {"lat": 1, "lon": 2}]},
        {"type": "way", "tags": {"amenity": "bench"},
         "geometry": [{"lat": 1, "lon": 1}, {"lat": 1, "lon": 2}]}
      ]
    }"#;
    let data = parse_overpass_payload(json).unwrap();
    assert_eq!(data.roads.len(), 1);
    assert_eq!(data.roads[0].highway, "residential");
    assert_eq!(data.roads[0].points[1], GeoPoint::new(52.38, 9.74));
    assert_eq!(data.park_polygons.len(), 1);
    assert!(data.water_polygons.is_empty());
    assert!(data.building_polygons.is_empty());
}

#[test]
fn missing_elements_yield_empty_data() {
    assert!(parse_overpass_payload("{}").unwrap().is_empty());
    assert!(parse_overpass_value(serde_json::json!(null)).unwrap().is_empty());
}

#[test]
fn malformed_json_is_a_serde_error() {
    let err = parse_overpass_payload("{not json").unwrap_err();
    assert!(err.to_string().contains("serialization error:"));
}

#[test]
fn query_uses_six_decimals_and_separate_building_box() {
    let area = Bounds::new(52.1, 9.5, 52.6, 9.9);
    let buildings = Bounds::new(52.3, 9.7, 52.4, 9.8);
    let q = build_overpass_query(&area, &buildings);
    assert!(q.starts_with("[out:json][timeout:25];\n(\n"));
    assert!(q.ends_with(");\nout geom qt;"));
    assert!(q.contains(&format!(
        "way[\"highway\"~\"{HIGHWAY_FILTER}\"](52.100000,9.500000,52.600000,9.900000);"
    )));
    assert!(q.contains("relation[\"building\"](52.300000,9.700000,52.400000,9.800000);"));
    assert_eq!(q.lines().count(), 11);
}

#[test]
fn null_or_non_array_elements_yield_empty_data() {
    assert!(parse_overpass_payload(r#"{"elements": null}"#).unwrap().is_empty());
    assert!(parse_overpass_payload(r#"{"elements": {"type": "way"}}"#).unwrap().is_empty());
    assert!(parse_overpass_payload("null").unwrap().is_empty());
}

#[test]
fn malformed_elements_are_dropped_and_the_rest_kept() {
    let json = r#"{
      "elements": [
        {"type": "way", "tags": {"highway": "primary"}, "geometry": null},
        {"type": "way", "tags": null, "geometry": [{"lat": 1, "lon": 1}, {"lat": 1, "lon": 2}]},
        {"type": "way", "tags": "building", "geometry": []},
        42,
        null,
        {"type": "way", "tags": {"highway": "secondary"},
         "geometry": [null, {"lat": 1, "lon": 1}, {"lat": 1, "lon": 2}]},
        {"type": "way", "tags": {"highway": "residential"},
         "geometry": [{"lat": 52.37, "lon": 9.73}, {"lat": 52.38, "lon": 9.74}]}
      ]
    }"#;
    let elements = parse_overpass_elements(json).unwrap();
    assert_eq!(elements.len(), 4);
    assert!(elements[0].geometry.is_empty());
    assert!(elements[1].tags.is_empty());
    assert!(!elements[2].geometry[0].is_finite());

    let data = parse_overpass_payload(json).unwrap();
    let highways: Vec<&str> = data.roads.iter().map(|r| r.highway.as_str()).collect();
    assert_eq!(highways, vec!["secondary", "residential"]);
}
