use crate::compose::plan::{DrawOp, FadeBand, FadePass, Layer, StrokeStyle};
use crate::compose::road::RoadClass;
use crate::features::model::{Polygon, RoadWay};
use crate::foundation::core::{BezPath, Bounds, CanvasSize, Point, Rect};
use crate::foundation::math::polygon_area;
use crate::geo::projection::{Projector, points_intersect_bounds};
use crate::theme::color::{blend_hex, hex_to_premul};
use crate::theme::resolve::ResolvedTheme;

/// Projected area (px²) below which a building is treated as a sliver and skipped.
pub const MIN_BUILDING_AREA_PX: f64 = 5.0;
/// Fraction of the frame height covered by each edge fade.
pub const FADE_FRACTION: f64 = 0.25;

const DEFAULT_BG: &str = "#ffffff";
const DEFAULT_TEXT: &str = "#111111";
const BUILDING_FILL_MIX: f64 = 0.14;
const BUILDING_STROKE_MIX: f64 = 0.26;

/// Shared inputs for compiling map layers.
pub(crate) struct MapLayerContext<'a> {
    pub(crate) projector: &'a Projector,
    pub(crate) bounds: &'a Bounds,
    pub(crate) theme: &'a ResolvedTheme,
    pub(crate) width_scale: f64,
}

fn non_empty<'a>(v: &'a str, default: &'a str) -> &'a str {
    if v.is_empty() { default } else { v }
}

fn closed_path(points: &[Point]) -> BezPath {
    let mut path = polyline_path(points);
    path.close_path();
    path
}

fn polyline_path(points: &[Point]) -> BezPath {
    let mut path = BezPath::new();
    let mut it = points.iter();
    if let Some(&first) = it.next() {
        path.move_to(first);
        for &p in it {
            path.line_to(p);
        }
    }
    path
}

pub(crate) fn background_op(canvas: &CanvasSize, theme: &ResolvedTheme) -> DrawOp {
    DrawOp::FillRect {
        layer: Layer::Background,
        rect: Rect::new(0.0, 0.0, f64::from(canvas.width), f64::from(canvas.height)),
        color: hex_to_premul(&theme.bg),
    }
}

/// Flat-filled polygons (water, parks), culled by bounding-box overlap with the poster frame.
pub(crate) fn polygon_ops(
    ctx: &MapLayerContext<'_>,
    layer: Layer,
    polygons: &[Polygon],
    color: &str,
) -> Vec<DrawOp> {
    let fill = hex_to_premul(color);
    let ops: Vec<DrawOp> = polygons
        .iter()
        .filter(|p| p.len() >= 3 && points_intersect_bounds(p, ctx.bounds))
        .map(|p| DrawOp::Polygon {
            layer,
            path: closed_path(&ctx.projector.project_all(p)),
            fill,
            stroke: None,
        })
        .collect();
    tracing::debug!(?layer, input = polygons.len(), drawn = ops.len(), "polygon layer");
    ops
}

/// Filled and outlined buildings, in input order.
pub(crate) fn building_ops(ctx: &MapLayerContext<'_>, polygons: &[Polygon]) -> Vec<DrawOp> {
    let bg = non_empty(&ctx.theme.bg, DEFAULT_BG);
    let text = non_empty(&ctx.theme.text, DEFAULT_TEXT);
    let fill_hex = ctx
        .theme
        .building
        .clone()
        .unwrap_or_else(|| blend_hex(bg, text, BUILDING_FILL_MIX));
    let stroke_hex = ctx
        .theme
        .building_stroke
        .clone()
        .unwrap_or_else(|| blend_hex(bg, text, BUILDING_STROKE_MIX));

    let fill = hex_to_premul(&fill_hex);
    let stroke = StrokeStyle {
        color: hex_to_premul(&stroke_hex),
        width: (0.8 * ctx.width_scale).max(0.45),
        round_caps: false,
    };

    let mut slivers = 0usize;
    let mut ops = Vec::new();
    for polygon in polygons {
        if polygon.len() < 3 || !points_intersect_bounds(polygon, ctx.bounds) {
            continue;
        }
        let projected = ctx.projector.project_all(polygon);
        if polygon_area(&projected) < MIN_BUILDING_AREA_PX {
            slivers += 1;
            continue;
        }
        ops.push(DrawOp::Polygon {
            layer: Layer::Buildings,
            path: closed_path(&projected),
            fill,
            stroke: Some(stroke),
        });
    }
    tracing::debug!(
        input = polygons.len(),
        drawn = ops.len(),
        slivers,
        "building layer"
    );
    ops
}

/// Road strokes, stably sorted so higher-priority classes paint last.
pub(crate) fn road_ops(ctx: &MapLayerContext<'_>, roads: &[RoadWay]) -> Vec<DrawOp> {
    let mut styled: Vec<(RoadClass, &RoadWay)> = roads
        .iter()
        .map(|r| (RoadClass::from_highway(&r.highway), r))
        .collect();
    styled.sort_by_key(|(class, _)| class.priority());

    let ops: Vec<DrawOp> = styled
        .into_iter()
        .filter(|(_, r)| r.points.len() >= 2 && points_intersect_bounds(&r.points, ctx.bounds))
        .map(|(class, r)| {
            let style = class.style(ctx.theme, ctx.width_scale);
            DrawOp::Stroke {
                layer: Layer::Road(class),
                path: polyline_path(&ctx.projector.project_all(&r.points)),
                style: StrokeStyle {
                    color: hex_to_premul(&style.color),
                    width: style.width,
                    round_caps: true,
                },
            }
        })
        .collect();
    tracing::debug!(input = roads.len(), drawn = ops.len(), "road layer");
    ops
}

/// Top and bottom fades toward `gradient_color`.
pub(crate) fn fade_pass(canvas: &CanvasSize, theme: &ResolvedTheme) -> FadePass {
    let h = f64::from(canvas.height);
    FadePass {
        color: hex_to_premul(non_empty(&theme.gradient_color, &theme.bg)),
        bands: vec![
            FadeBand {
                y_opaque: 0.0,
                y_clear: h * FADE_FRACTION,
            },
            FadeBand {
                y_opaque: h,
                y_clear: h * (1.0 - FADE_FRACTION),
            },
        ],
    }
}

#[cfg(test)]
#[path = "../../tests/unit/compose/layers.rs"]
mod tests;
