use super::*;

fn opts(city: &str, country: &str) -> TypographyOptions {
    TypographyOptions {
        city: city.to_owned(),
        country: country.to_owned(),
        ..TypographyOptions::default()
    }
}

fn texts(ops: &[DrawOp]) -> Vec<(TextRole, &TextOp)> {
    ops.iter()
        .filter_map(|op| match op {
            DrawOp::Text(t) => Some((t.role, t)),
            _ => None,
        })
        .collect()
}

#[test]
fn latin_detection() {
    assert!(is_latin_script("München"));
    assert!(is_latin_script("São Paulo"));
    assert!(is_latin_script(""));
    assert!(is_latin_script("1234 -"));
    assert!(!is_latin_script("東京"));
    assert!(!is_latin_script("Москва"));
}

#[test]
fn city_label_is_spaced_only_for_latin() {
    assert_eq!(format_city_label("Paris"), "P  A  R  I  S");
    assert_eq!(format_city_label("東京"), "東京");
}

#[test]
fn long_city_names_shrink_to_a_floor() {
    assert_eq!(city_font_size("Hanover", 1.0), 250.0);
    assert_eq!(city_font_size("Frankfurt!", 1.0), 250.0);
    let mid = city_font_size("Frankfurt am Main", 1.0);
    assert!((mid - 250.0 * 10.0 / 17.0).abs() < 1e-9);
    assert_eq!(city_font_size(&"x".repeat(40), 2.0), 220.0);
}

#[test]
fn dim_scale_has_floor() {
    assert_eq!(dim_scale(&CanvasSize::exact(600, 900)), 0.45);
    assert!((dim_scale(&CanvasSize::exact(3600, 7200)) - 1.0).abs() < 1e-12);
}

#[test]
fn full_text_block_layout() {
    let canvas = CanvasSize::exact(2000, 3000);
    let mut o = opts("Hanover", "Germany");
    o.font_family = Some("Inter".to_owned());
    let ops = text_block_ops(&canvas, "#d4af37", GeoPoint::new(52.3759, 9.732), &o);

    let layers: Vec<Layer> = ops.iter().map(DrawOp::layer).collect();
    assert_eq!(
        layers,
        vec![
            Layer::Text(TextRole::City),
            Layer::Divider,
            Layer::Text(TextRole::Country),
            Layer::Text(TextRole::Coordinates),
            Layer::Text(TextRole::Attribution),
            Layer::Text(TextRole::Credit),
        ]
    );

    let t = texts(&ops);
    let city = t[0].1;
    assert_eq!(city.text, "H  A  N  O  V  E  R");
    assert_eq!(city.families, vec!["Inter", TITLE_FALLBACK_FAMILY]);
    assert_eq!(city.weight, 700.0);
    assert_eq!(city.anchor, Point::new(1000.0, 3000.0 * CITY_Y_RATIO));
    assert_eq!(city.align, TextAlign::Center);

    let country = t[1].1;
    assert_eq!(country.text, "GERMANY");
    assert_eq!(country.weight, 300.0);

    let coords = t[2].1;
    assert_eq!(coords.text, "52.3759° N / 9.7320° E");
    assert_eq!(coords.families, vec!["Inter", BODY_FALLBACK_FAMILY]);
    assert!(coords.color.a < 255);

    let attribution = t[3].1;
    assert_eq!(attribution.text, ATTRIBUTION_TEXT);
    assert_eq!(attribution.align, TextAlign::Right);
    assert_eq!(attribution.baseline, TextBaseline::Bottom);
    assert_eq!(attribution.anchor, Point::new(1960.0, 2940.0));
    assert_eq!(attribution.color.a, 140);

    let credit = t[4].1;
    assert_eq!(credit.text, DEFAULT_CREDIT_TEXT);
    assert_eq!(credit.anchor, Point::new(40.0, 2940.0));
}

#[test]
fn flags_hide_title_block_and_credit_independently() {
    let canvas = CanvasSize::exact(1000, 1000);
    let mut o = opts("Oslo", "Norway");
    o.show_poster_text = false;
    let ops = text_block_ops(&canvas, "", GeoPoint::new(0.0, 0.0), &o);
    let roles: Vec<TextRole> = texts(&ops).into_iter().map(|(r, _)| r).collect();
    assert_eq!(roles, vec![TextRole::Attribution, TextRole::Credit]);

    o.include_credits = false;
    o.credit_text = Some("ignored".to_owned());
    let ops = text_block_ops(&canvas, "", GeoPoint::new(0.0, 0.0), &o);
    assert_eq!(ops.len(), 1);
    assert_eq!(ops[0].layer(), Layer::Text(TextRole::Attribution));
}

#[test]
fn default_families_without_requested_font() {
    let ops = text_block_ops(
        &CanvasSize::exact(1000, 1000),
        "#000000",
        GeoPoint::new(0.0, 0.0),
        &opts("A", "B"),
    );
    let t = texts(&ops);
    assert_eq!(t[0].1.families, vec![TITLE_FALLBACK_FAMILY]);
    assert_eq!(t[2].1.families, vec![BODY_FALLBACK_FAMILY]);
}
