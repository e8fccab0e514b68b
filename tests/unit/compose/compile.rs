use super::*;
use crate::compose::plan::{DrawOp, TextRole};
use crate::compose::road::RoadClass;
use crate::features::model::RoadWay;

fn hanover_request(map_data: MapData) -> RenderRequest {
    let center = GeoPoint::new(52.3759, 9.7320);
    let bounds = crate::geo::bounds::compute_poster_and_fetch_bounds(
        center,
        4000.0,
        40.0 / 30.0,
        crate::geo::bounds::DEFAULT_FETCH_PADDING,
    )
    .poster_bounds;
    RenderRequest {
        theme: ResolvedTheme::fallback(),
        map_data,
        bounds,
        center,
        display_name: "Hanover, Lower Saxony, Germany".to_owned(),
        size: PosterSize {
            width_cm: 40.0,
            height_cm: 30.0,
        },
        typography: TypographyOptions {
            city: "Hanover".to_owned(),
            country: "Germany".to_owned(),
            ..TypographyOptions::default()
        },
    }
}

fn road(highway: &str, center: GeoPoint) -> RoadWay {
    RoadWay {
        highway: highway.to_owned(),
        points: vec![
            GeoPoint::new(center.lat - 0.005, center.lon - 0.005),
            GeoPoint::new(center.lat + 0.005, center.lon + 0.005),
        ],
    }
}

#[test]
fn empty_map_compiles_background_fade_and_text() {
    let plan = compile_poster(&hanover_request(MapData::default())).unwrap();
    assert_eq!(plan.passes.len(), 3);
    assert!(matches!(&plan.passes[0], Pass::Scene(s) if !s.composite_over));
    assert!(matches!(&plan.passes[1], Pass::Fade(_)));
    assert!(matches!(&plan.passes[2], Pass::Scene(s) if s.composite_over));

    let layers = plan.layer_sequence();
    assert_eq!(layers[0], Layer::Background);
    assert_eq!(layers[1], Layer::Text(TextRole::City));
}

#[test]
fn canvas_matches_requested_aspect() {
    let plan = compile_poster(&hanover_request(MapData::default())).unwrap();
    let ratio = plan.canvas.aspect_ratio();
    assert!((ratio / (40.0 / 30.0) - 1.0).abs() < 0.01);
    assert!(plan.canvas.downscale_factor <= 1.0);
}

#[test]
fn layers_follow_fixed_stacking_order() {
    let req = hanover_request(MapData::default());
    let c = req.center;
    let ring = |d: f64| {
        vec![
            GeoPoint::new(c.lat - d, c.lon - d),
            GeoPoint::new(c.lat - d, c.lon + d),
            GeoPoint::new(c.lat + d, c.lon + d),
            GeoPoint::new(c.lat + d, c.lon - d),
            GeoPoint::new(c.lat - d, c.lon - d),
        ]
    };
    let data = MapData {
        roads: vec![road("motorway", c), road("residential", c)],
        water_polygons: vec![ring(0.01)],
        park_polygons: vec![ring(0.005)],
        building_polygons: vec![ring(0.001)],
    };
    let plan = compile_poster(&RenderRequest {
        map_data: data,
        ..req
    })
    .unwrap();
    let map_layers: Vec<Layer> = plan
        .layer_sequence()
        .into_iter()
        .take_while(|l| !matches!(l, Layer::Text(_) | Layer::Divider))
        .collect();
    assert_eq!(
        map_layers,
        vec![
            Layer::Background,
            Layer::Water,
            Layer::Parks,
            Layer::Buildings,
            Layer::Road(RoadClass::Residential),
            Layer::Road(RoadClass::Motorway),
        ]
    );
}

#[test]
fn invalid_size_is_rejected() {
    let mut req = hanover_request(MapData::default());
    req.size.width_cm = 0.0;
    assert!(compile_poster(&req).is_err());
    req.size.width_cm = f64::NAN;
    assert!(compile_poster(&req).is_err());
}

#[test]
fn text_can_be_fully_hidden_except_attribution() {
    let mut req = hanover_request(MapData::default());
    req.typography.show_poster_text = false;
    req.typography.include_credits = false;
    let plan = compile_poster(&req).unwrap();
    let texts: Vec<&DrawOp> = plan
        .draw_ops()
        .filter(|op| matches!(op, DrawOp::Text(_)))
        .collect();
    assert_eq!(texts.len(), 1);
}
