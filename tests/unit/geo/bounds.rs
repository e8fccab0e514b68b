use super::*;

const HANOVER: GeoPoint = GeoPoint::new(52.3759, 9.7320);

#[test]
fn create_bounds_clamps_latitude_only() {
    let b = create_bounds(GeoPoint::new(84.9, 179.9), 50_000.0, 50_000.0);
    assert_eq!(b.north, 85.0);
    assert!(b.south < 84.9);
    assert!(b.east > 180.0);
}

#[test]
fn landscape_aspect_keeps_distance_on_x() {
    let r = compute_poster_and_fetch_bounds(HANOVER, 4000.0, 2.0, DEFAULT_FETCH_PADDING);
    assert_eq!(r.half_meters_x, 4000.0);
    assert_eq!(r.half_meters_y, 2000.0);
    assert!((r.fetch_half_meters - 5400.0).abs() < 1e-9);
}

#[test]
fn portrait_aspect_keeps_distance_on_y() {
    let r = compute_poster_and_fetch_bounds(HANOVER, 4000.0, 0.5, DEFAULT_FETCH_PADDING);
    assert_eq!(r.half_meters_x, 2000.0);
    assert_eq!(r.half_meters_y, 4000.0);
}

#[test]
fn distance_and_aspect_are_floored() {
    let r = compute_poster_and_fetch_bounds(HANOVER, 10.0, 0.01, DEFAULT_FETCH_PADDING);
    assert_eq!(r.half_meters_y, 1000.0);
    assert!((r.half_meters_x - 200.0).abs() < 1e-9);
}

#[test]
fn is_bit_reproducible() {
    let a = compute_poster_and_fetch_bounds(HANOVER, 4321.5, 1.33, DEFAULT_FETCH_PADDING);
    let b = compute_poster_and_fetch_bounds(HANOVER, 4321.5, 1.33, DEFAULT_FETCH_PADDING);
    assert_eq!(a, b);
}

#[test]
fn fetch_box_contains_poster_box_over_parameter_grid() {
    let centers = [
        HANOVER,
        GeoPoint::new(-33.86, 151.21),
        GeoPoint::new(0.0, 0.0),
        GeoPoint::new(70.0, -20.0),
    ];
    for center in centers {
        let mut aspect = 0.2;
        while aspect <= 5.0 {
            let mut distance = 1000.0;
            while distance <= 50_000.0 {
                let r = compute_poster_and_fetch_bounds(
                    center,
                    distance,
                    aspect,
                    DEFAULT_FETCH_PADDING,
                );
                assert!(
                    r.fetch_bounds.contains_bounds(&r.poster_bounds),
                    "center={center:?} aspect={aspect} distance={distance}"
                );
                distance += 3500.0;
            }
            aspect += 0.3;
        }
    }
}

#[test]
fn coordinates_use_hemisphere_letters() {
    assert_eq!(format_coordinates(HANOVER), "52.3759° N / 9.7320° E");
    assert_eq!(
        format_coordinates(GeoPoint::new(-33.86882, -151.20929)),
        "33.8688° S / 151.2093° W"
    );
}
