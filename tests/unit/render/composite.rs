use super::*;

#[test]
fn over_respects_alpha_and_opacity() {
    let dst = [0, 0, 255, 255];
    assert_eq!(over(dst, [255, 0, 0, 255], 1.0), [255, 0, 0, 255]);
    assert_eq!(over(dst, [255, 0, 0, 255], 0.0), dst);
    assert_eq!(over(dst, [0, 0, 0, 0], 1.0), dst);

    let half = over(dst, [128, 0, 0, 128], 1.0);
    assert_eq!(half[3], 255);
    assert_eq!(half[0], 128);
    assert_eq!(half[2], 127);
}

#[test]
fn over_in_place_checks_lengths() {
    let mut dst = vec![0u8; 8];
    assert!(over_in_place(&mut dst, &[0u8; 4], 1.0).is_err());
    over_in_place(&mut dst, &[9, 9, 9, 255, 0, 0, 0, 0], 1.0).unwrap();
    assert_eq!(dst, vec![9, 9, 9, 255, 0, 0, 0, 0]);
}

#[test]
fn band_opacity_ramps_linearly() {
    let top = FadeBand {
        y_opaque: 0.0,
        y_clear: 100.0,
    };
    assert!((band_opacity(&top, 0) - 0.995).abs() < 1e-6);
    assert!((band_opacity(&top, 49) - 0.505).abs() < 1e-6);
    assert_eq!(band_opacity(&top, 100), 0.0);

    let bottom = FadeBand {
        y_opaque: 100.0,
        y_clear: 0.0,
    };
    assert!((band_opacity(&bottom, 99) - 0.995).abs() < 1e-6);
    assert!(band_opacity(&bottom, 0) < 0.01);
}

#[test]
fn fade_touches_only_band_rows() {
    let (w, h) = (2u32, 8u32);
    let mut buf = vec![0u8; (w * h * 4) as usize];
    fill_in_place(&mut buf, [0, 0, 0, 255]);
    let band = FadeBand {
        y_opaque: 0.0,
        y_clear: 2.0,
    };
    let white = Rgba8Premul::from_straight_rgba(255, 255, 255, 255);
    fade_band_in_place(&mut buf, w, h, white, &band).unwrap();

    let row = |y: usize| &buf[y * 8..y * 8 + 4];
    assert!(row(0)[0] > row(1)[0]);
    assert!(row(1)[0] > 0);
    assert_eq!(row(2), &[0, 0, 0, 255]);
    assert_eq!(row(7), &[0, 0, 0, 255]);
    assert!(fade_band_in_place(&mut buf, 3, h, white, &band).is_err());
}
