use super::*;

#[test]
fn mercator_is_zero_at_equator_and_clamped() {
    assert!(mercator_y(0.0).abs() < 1e-12);
    assert_eq!(mercator_y(89.0), mercator_y(85.0));
    assert!((mercator_y(-30.0) + mercator_y(30.0)).abs() < 1e-12);
}

#[test]
fn corners_project_to_canvas_corners() {
    let cases = [
        (Bounds::new(52.34, 9.67, 52.41, 9.79), 1600.0, 1200.0),
        (Bounds::new(-34.0, 151.0, -33.7, 151.4), 600.0, 900.0),
        (Bounds::new(70.0, -25.0, 84.0, 10.0), 4096.0, 2000.0),
    ];
    for (b, w, h) in cases {
        let p = Projector::new(&b, w, h);
        let corners = [
            (GeoPoint::new(b.north, b.west), Point::new(0.0, 0.0)),
            (GeoPoint::new(b.north, b.east), Point::new(w, 0.0)),
            (GeoPoint::new(b.south, b.west), Point::new(0.0, h)),
            (GeoPoint::new(b.south, b.east), Point::new(w, h)),
        ];
        for (geo, expected) in corners {
            let got = p.project(geo);
            assert!(
                (got.x - expected.x).abs() <= 0.5 && (got.y - expected.y).abs() <= 0.5,
                "{geo:?} -> {got:?}, expected {expected:?}"
            );
        }
    }
}

#[test]
fn degenerate_bounds_do_not_divide_by_zero() {
    let b = Bounds::new(10.0, 10.0, 10.0, 10.0);
    let p = Projector::new(&b, 100.0, 100.0).project(GeoPoint::new(10.0, 10.0));
    assert!(p.x.is_finite() && p.y.is_finite());
}

#[test]
fn culling_uses_bounding_box_overlap() {
    let b = Bounds::new(0.0, 0.0, 1.0, 1.0);
    let crossing = [GeoPoint::new(-1.0, 0.5), GeoPoint::new(2.0, 0.5)];
    let outside = [GeoPoint::new(2.0, 2.0), GeoPoint::new(3.0, 3.0)];
    assert!(points_intersect_bounds(&crossing, &b));
    assert!(!points_intersect_bounds(&outside, &b));
    assert!(!points_intersect_bounds(&[], &b));
}
