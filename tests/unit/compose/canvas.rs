use super::*;

#[test]
fn default_poster_fits_without_downscale() {
    let c = resolve_canvas_size(20.0 / CM_PER_INCH, 30.0 / CM_PER_INCH);
    assert_eq!((c.width, c.height), (1732, 2598));
    assert_eq!((c.requested_width, c.requested_height), (1732, 2598));
    assert_eq!(c.downscale_factor, 1.0);
}

#[test]
fn large_posters_are_capped_by_area() {
    let c = resolve_canvas_size(45.0 / CM_PER_INCH, 45.0 / CM_PER_INCH);
    assert!(c.downscale_factor < 1.0);
    let area = f64::from(c.width) * f64::from(c.height);
    assert!(area <= MAX_PIXELS * 1.001, "area {area}");
    assert_eq!(c.width, c.height);
}

#[test]
fn long_side_is_capped() {
    let c = resolve_canvas_size(5.0 / CM_PER_INCH, 50.0 / CM_PER_INCH);
    assert_eq!(c.height, 4096);
    assert_eq!(c.width, MIN_SIDE);
    assert!((c.downscale_factor - 4096.0 / f64::from(c.requested_height)).abs() < 1e-12);
}

#[test]
fn aspect_ratio_is_preserved_when_downscaling() {
    let c = resolve_canvas_size(40.0 / CM_PER_INCH, 30.0 / CM_PER_INCH);
    assert!(c.downscale_factor < 1.0);
    let ratio = f64::from(c.width) / f64::from(c.height);
    assert!((ratio / (4.0 / 3.0) - 1.0).abs() < 0.01, "ratio {ratio}");
}

#[test]
fn tiny_and_invalid_sizes_hit_the_floor() {
    let c = resolve_canvas_size(0.1, 0.1);
    assert_eq!((c.width, c.height), (MIN_SIDE, MIN_SIDE));
    let c = resolve_canvas_size(f64::NAN, -3.0);
    assert_eq!((c.width, c.height), (MIN_SIDE, MIN_SIDE));
}

#[test]
fn poster_size_converts_to_inches() {
    let s = PosterSize {
        width_cm: 25.4,
        height_cm: 50.8,
    };
    assert!((s.width_in() - 10.0).abs() < 1e-12);
    assert!((s.height_in() - 20.0).abs() < 1e-12);
    assert!((s.aspect_ratio() - 0.5).abs() < 1e-12);
}
