use super::*;

fn ring(n: usize) -> Vec<GeoPoint> {
    let mut pts: Vec<GeoPoint> = (0..n - 1)
        .map(|i| {
            let t = i as f64 / (n - 1) as f64 * std::f64::consts::TAU;
            GeoPoint::new(52.0 + 0.01 * t.sin(), 9.0 + 0.01 * t.cos())
        })
        .collect();
    pts.push(pts[0]);
    pts
}

fn element(kind: ElementKind, tags: &[(&str, &str)], geometry: Vec<GeoPoint>) -> TaggedElement {
    TaggedElement {
        kind,
        tags: tags.iter().copied().collect(),
        geometry,
    }
}

#[test]
fn nodes_are_discarded() {
    let e = element(ElementKind::Node, &[("highway", "primary")], ring(5));
    assert_eq!(classify_element(&e), None);
}

#[test]
fn non_finite_points_are_filtered_before_length_check() {
    let e = element(
        ElementKind::Way,
        &[("highway", "primary")],
        vec![GeoPoint::new(f64::NAN, 1.0), GeoPoint::new(1.0, 1.0)],
    );
    assert_eq!(classify_element(&e), None);
}

#[test]
fn highway_wins_over_area_tags_and_needs_no_closure() {
    let e = element(
        ElementKind::Way,
        &[("highway", "trunk;primary"), ("building", "yes")],
        vec![GeoPoint::new(1.0, 1.0), GeoPoint::new(1.0, 2.0)],
    );
    match classify_element(&e) {
        Some(Feature::Road(r)) => {
            assert_eq!(r.highway, "trunk");
            assert_eq!(r.points.len(), 2);
        }
        other => panic!("expected road, got {other:?}"),
    }
}

#[test]
fn building_precedes_water_and_park() {
    let e = element(
        ElementKind::Relation,
        &[("building", "yes"), ("natural", "water"), ("leisure", "park")],
        ring(5),
    );
    assert!(matches!(classify_element(&e), Some(Feature::Building(_))));

    let e = element(
        ElementKind::Way,
        &[("natural", "water"), ("leisure", "park")],
        ring(5),
    );
    assert!(matches!(classify_element(&e), Some(Feature::Water(_))));
}

#[test]
fn open_areas_are_discarded() {
    let mut open = ring(6);
    open.pop();
    let e = element(ElementKind::Way, &[("leisure", "park")], open);
    assert_eq!(classify_element(&e), None);
}

#[test]
fn per_kind_vertex_caps_apply() {
    let b = element(ElementKind::Way, &[("building", "yes")], ring(200));
    let Some(Feature::Building(p)) = classify_element(&b) else {
        panic!("expected building");
    };
    assert!(p.len() <= MAX_POINTS_PER_BUILDING);
    assert_eq!(p.first(), p.last());

    let w = element(ElementKind::Way, &[("natural", "water")], ring(400));
    let Some(Feature::Water(p)) = classify_element(&w) else {
        panic!("expected water");
    };
    assert!(p.len() <= MAX_POINTS_PER_POLYGON);
}

#[test]
fn building_collection_is_capped() {
    let one = element(ElementKind::Way, &[("building", "yes")], ring(5));
    let elements = vec![one; MAX_BUILDING_POLYGONS * 2 + 1];
    let data = build_map_data(&elements);
    assert!(data.building_polygons.len() <= MAX_BUILDING_POLYGONS);
    assert_eq!(data.stats().buildings, data.building_polygons.len());
    assert!(!data.is_empty());
}
