//! Pure compilation of a [`RenderRequest`] into a backend-agnostic [`plan::PosterPlan`].

pub(crate) mod canvas;
pub(crate) mod layers;
pub(crate) mod plan;
pub(crate) mod road;
pub(crate) mod typography;

use crate::compose::canvas::{PosterSize, resolve_canvas_size};
use crate::compose::layers::{
    MapLayerContext, background_op, building_ops, fade_pass, polygon_ops, road_ops,
};
use crate::compose::plan::{Layer, Pass, PosterPlan, ScenePass};
use crate::compose::road::stroke_width_scale;
use crate::compose::typography::{TypographyOptions, text_block_ops};
use crate::features::model::MapData;
use crate::foundation::core::{Bounds, GeoPoint};
use crate::foundation::error::{PosterError, PosterResult};
use crate::geo::projection::Projector;
use crate::theme::resolve::ResolvedTheme;

/// Everything one poster render needs. Built once per call and never mutated.
#[derive(Clone, Debug)]
pub struct RenderRequest {
    pub theme: ResolvedTheme,
    pub map_data: MapData,
    /// Visible frame; the projector maps exactly this box onto the canvas.
    pub bounds: Bounds,
    pub center: GeoPoint,
    pub display_name: String,
    pub size: PosterSize,
    pub typography: TypographyOptions,
}

/// Compile `req` into an ordered plan: map scene, edge fades, then the text overlay.
#[tracing::instrument(skip(req), fields(theme = %req.theme.name))]
pub fn compile_poster(req: &RenderRequest) -> PosterResult<PosterPlan> {
    let size = req.size;
    if !(size.width_cm.is_finite() && size.height_cm.is_finite())
        || size.width_cm <= 0.0
        || size.height_cm <= 0.0
    {
        return Err(PosterError::validation(format!(
            "poster size must be positive and finite (got {} x {} cm)",
            size.width_cm, size.height_cm
        )));
    }

    let canvas = resolve_canvas_size(size.width_in(), size.height_in());
    tracing::debug!(
        width = canvas.width,
        height = canvas.height,
        requested_width = canvas.requested_width,
        requested_height = canvas.requested_height,
        factor = canvas.downscale_factor,
        "resolved canvas"
    );

    let projector = Projector::new(
        &req.bounds,
        f64::from(canvas.width),
        f64::from(canvas.height),
    );
    let ctx = MapLayerContext {
        projector: &projector,
        bounds: &req.bounds,
        theme: &req.theme,
        width_scale: stroke_width_scale(canvas.width, canvas.height),
    };

    let data = &req.map_data;
    let mut map_ops = vec![background_op(&canvas, &req.theme)];
    map_ops.extend(polygon_ops(
        &ctx,
        Layer::Water,
        &data.water_polygons,
        &req.theme.water,
    ));
    map_ops.extend(polygon_ops(
        &ctx,
        Layer::Parks,
        &data.park_polygons,
        &req.theme.parks,
    ));
    map_ops.extend(building_ops(&ctx, &data.building_polygons));
    map_ops.extend(road_ops(&ctx, &data.roads));

    let mut passes = vec![
        Pass::Scene(ScenePass {
            ops: map_ops,
            composite_over: false,
        }),
        Pass::Fade(fade_pass(&canvas, &req.theme)),
    ];

    let overlay = text_block_ops(&canvas, &req.theme.text, req.center, &req.typography);
    if !overlay.is_empty() {
        passes.push(Pass::Scene(ScenePass {
            ops: overlay,
            composite_over: true,
        }));
    }

    Ok(PosterPlan { canvas, passes })
}

#[cfg(test)]
#[path = "../../tests/unit/compose/compile.rs"]
mod tests;
