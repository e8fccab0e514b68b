use super::*;

#[test]
fn checked_point_rejects_non_finite_and_out_of_range() {
    for (lat, lon) in [(f64::NAN, 0.0), (0.0, f64::INFINITY), (90.5, 0.0)] {
        let err = GeoPoint::checked(lat, lon).unwrap_err();
        assert!(matches!(err, PosterError::InvalidGeometry(_)), "{err}");
    }
    assert_eq!(
        GeoPoint::checked(-90.0, 720.0).unwrap(),
        GeoPoint::new(-90.0, 720.0)
    );
}

#[test]
fn bounds_new_orders_latitudes() {
    let b = Bounds::new(10.0, 1.0, -10.0, 2.0);
    assert_eq!(b.south, -10.0);
    assert_eq!(b.north, 10.0);
    assert!((b.lat_span() - 20.0).abs() < 1e-12);
}

#[test]
fn bounds_intersection_and_containment() {
    let a = Bounds::new(0.0, 0.0, 1.0, 1.0);
    let inner = Bounds::new(0.25, 0.25, 0.75, 0.75);
    let touching = Bounds::new(1.0, 1.0, 2.0, 2.0);
    let outside = Bounds::new(1.5, 1.5, 2.0, 2.0);

    assert!(a.contains_bounds(&inner));
    assert!(!inner.contains_bounds(&a));
    assert!(a.intersects(&touching));
    assert!(!a.intersects(&outside));
    assert!(a.contains(GeoPoint::new(0.5, 1.0)));
}

#[test]
fn enclosing_skips_non_finite_points() {
    let pts = [
        GeoPoint::new(f64::NAN, 3.0),
        GeoPoint::new(1.0, 2.0),
        GeoPoint::new(-1.0, 5.0),
    ];
    let b = Bounds::enclosing(&pts).unwrap();
    assert_eq!(b, Bounds::new(-1.0, 2.0, 1.0, 5.0));
    assert!(Bounds::enclosing(&[GeoPoint::new(f64::NAN, f64::NAN)]).is_none());
}

#[test]
fn premul_from_straight_rounds() {
    let c = Rgba8Premul::from_straight_rgba(255, 128, 0, 128);
    assert_eq!(c.to_array(), [128, 64, 0, 128]);
    assert_eq!(c.with_opacity(0.0), Rgba8Premul::transparent());
    assert_eq!(c.with_opacity(1.0), c);
}

#[test]
fn canvas_helpers() {
    let c = CanvasSize::exact(400, 300);
    assert_eq!(c.min_side(), 300);
    assert_eq!(c.rgba_len(), 400 * 300 * 4);
    assert!((c.aspect_ratio() - 4.0 / 3.0).abs() < 1e-12);
}
