use crate::compose::road::RoadClass;
use crate::foundation::core::{BezPath, CanvasSize, Point, Rect, Rgba8Premul};

/// Which poster element an op belongs to; used for z-order inspection and logging.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Layer {
    Background,
    Water,
    Parks,
    Buildings,
    Road(RoadClass),
    Divider,
    Text(TextRole),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TextRole {
    City,
    Country,
    Coordinates,
    Attribution,
    Credit,
}

/// Stroke parameters; joins and caps are always round on posters.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct StrokeStyle {
    pub color: Rgba8Premul,
    pub width: f64,
    pub round_caps: bool,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TextAlign {
    Left,
    Center,
    Right,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TextBaseline {
    Middle,
    Bottom,
}

/// A single line of text anchored at a pixel position.
#[derive(Clone, Debug, PartialEq)]
pub struct TextOp {
    pub role: TextRole,
    pub text: String,
    /// Font families in preference order.
    pub families: Vec<String>,
    pub size_px: f32,
    pub weight: f32,
    pub color: Rgba8Premul,
    pub anchor: Point,
    pub align: TextAlign,
    pub baseline: TextBaseline,
}

#[derive(Clone, Debug, PartialEq)]
pub enum DrawOp {
    FillRect {
        layer: Layer,
        rect: Rect,
        color: Rgba8Premul,
    },
    Polygon {
        layer: Layer,
        path: BezPath,
        fill: Rgba8Premul,
        stroke: Option<StrokeStyle>,
    },
    Stroke {
        layer: Layer,
        path: BezPath,
        style: StrokeStyle,
    },
    Text(TextOp),
}

impl DrawOp {
    pub fn layer(&self) -> Layer {
        match self {
            DrawOp::FillRect { layer, .. }
            | DrawOp::Polygon { layer, .. }
            | DrawOp::Stroke { layer, .. } => *layer,
            DrawOp::Text(t) => Layer::Text(t.role),
        }
    }
}

/// Ops drawn in order onto the canvas.
///
/// With `composite_over` the ops are rasterized on a transparent layer that is then composited
/// over the canvas; otherwise they draw directly into it.
#[derive(Clone, Debug, PartialEq)]
pub struct ScenePass {
    pub ops: Vec<DrawOp>,
    pub composite_over: bool,
}

/// Vertical linear fade from fully opaque at `y_opaque` to transparent at `y_clear`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FadeBand {
    pub y_opaque: f64,
    pub y_clear: f64,
}

#[derive(Clone, Debug, PartialEq)]
pub struct FadePass {
    pub color: Rgba8Premul,
    pub bands: Vec<FadeBand>,
}

#[derive(Clone, Debug, PartialEq)]
pub enum Pass {
    Scene(ScenePass),
    Fade(FadePass),
}

/// Backend-agnostic description of a whole poster.
#[derive(Clone, Debug, PartialEq)]
pub struct PosterPlan {
    pub canvas: CanvasSize,
    pub passes: Vec<Pass>,
}

impl PosterPlan {
    /// All draw ops across scene passes, in paint order.
    pub fn draw_ops(&self) -> impl Iterator<Item = &DrawOp> {
        self.passes.iter().flat_map(|p| -> &[DrawOp] {
            match p {
                Pass::Scene(s) => &s.ops,
                Pass::Fade(_) => &[],
            }
        })
    }

    /// Layer of each draw op, in paint order.
    pub fn layer_sequence(&self) -> Vec<Layer> {
        self.draw_ops().map(DrawOp::layer).collect()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/compose/plan.rs"]
mod tests;
