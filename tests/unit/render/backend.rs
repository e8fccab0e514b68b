use super::*;
use crate::compose::plan::{FadeBand, Layer};
use crate::foundation::core::{Rect, Rgba8Premul};

#[derive(Default)]
struct RecordingBackend {
    calls: Vec<&'static str>,
    canvas: Option<CanvasSize>,
}

impl PosterBackend for RecordingBackend {
    fn begin(&mut self, canvas: &CanvasSize) -> PosterResult<()> {
        self.calls.push("begin");
        self.canvas = Some(*canvas);
        Ok(())
    }

    fn exec_scene(&mut self, _pass: &ScenePass) -> PosterResult<()> {
        self.calls.push("exec_scene");
        Ok(())
    }

    fn exec_fade(&mut self, _pass: &FadePass) -> PosterResult<()> {
        self.calls.push("exec_fade");
        Ok(())
    }

    fn readback(&mut self) -> PosterResult<FrameRGBA> {
        self.calls.push("readback");
        let c = self.canvas.ok_or_else(|| PosterError::surface("no canvas"))?;
        Ok(FrameRGBA {
            width: c.width,
            height: c.height,
            data: vec![0; c.rgba_len()],
            premultiplied: true,
        })
    }
}

fn scene(composite_over: bool) -> Pass {
    Pass::Scene(ScenePass {
        ops: vec![crate::compose::plan::DrawOp::FillRect {
            layer: Layer::Background,
            rect: Rect::new(0.0, 0.0, 4.0, 3.0),
            color: Rgba8Premul::transparent(),
        }],
        composite_over,
    })
}

#[test]
fn execute_plan_calls_in_expected_order() {
    let plan = PosterPlan {
        canvas: CanvasSize::exact(4, 3),
        passes: vec![
            scene(false),
            Pass::Fade(FadePass {
                color: Rgba8Premul::transparent(),
                bands: vec![FadeBand {
                    y_opaque: 0.0,
                    y_clear: 1.0,
                }],
            }),
            scene(true),
        ],
    };
    let mut backend = RecordingBackend::default();
    let frame = execute_plan(&mut backend, &plan).unwrap();
    assert_eq!(
        backend.calls,
        vec!["begin", "exec_scene", "exec_fade", "exec_scene", "readback"]
    );
    assert_eq!((frame.width, frame.height), (4, 3));
    assert_eq!(frame.data.len(), 48);
}

#[test]
fn straight_conversion_unpremultiplies() {
    let frame = FrameRGBA {
        width: 2,
        height: 1,
        data: vec![128, 0, 0, 128, 10, 20, 30, 255],
        premultiplied: true,
    };
    let straight = frame.to_straight_rgba8().unwrap();
    assert_eq!(&straight[..4], &[255, 0, 0, 128]);
    assert_eq!(&straight[4..], &[10, 20, 30, 255]);
    assert_eq!(frame.pixel(1, 0), Some([10, 20, 30, 255]));
    assert_eq!(frame.pixel(2, 0), None);
}

#[test]
fn straight_conversion_rejects_bad_buffers() {
    let frame = FrameRGBA {
        width: 2,
        height: 2,
        data: vec![0; 8],
        premultiplied: true,
    };
    assert!(matches!(
        frame.to_straight_rgba8(),
        Err(PosterError::Encoding(_))
    ));
}
