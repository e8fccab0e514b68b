use super::*;

fn rect_op(layer: Layer) -> DrawOp {
    DrawOp::FillRect {
        layer,
        rect: Rect::new(0.0, 0.0, 1.0, 1.0),
        color: Rgba8Premul::transparent(),
    }
}

#[test]
fn layer_sequence_skips_fades_and_keeps_order() {
    let plan = PosterPlan {
        canvas: CanvasSize::exact(4, 4),
        passes: vec![
            Pass::Scene(ScenePass {
                ops: vec![rect_op(Layer::Background), rect_op(Layer::Water)],
                composite_over: false,
            }),
            Pass::Fade(FadePass {
                color: Rgba8Premul::transparent(),
                bands: vec![],
            }),
            Pass::Scene(ScenePass {
                ops: vec![rect_op(Layer::Divider)],
                composite_over: true,
            }),
        ],
    };
    assert_eq!(
        plan.layer_sequence(),
        vec![Layer::Background, Layer::Water, Layer::Divider]
    );
}

#[test]
fn text_ops_report_their_role_as_layer() {
    let op = DrawOp::Text(TextOp {
        role: TextRole::Credit,
        text: "x".to_owned(),
        families: vec![],
        size_px: 10.0,
        weight: 300.0,
        color: Rgba8Premul::transparent(),
        anchor: Point::ZERO,
        align: TextAlign::Left,
        baseline: TextBaseline::Bottom,
    });
    assert_eq!(op.layer(), Layer::Text(TextRole::Credit));
}
