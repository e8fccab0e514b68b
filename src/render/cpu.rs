use std::collections::HashMap;
use std::sync::Arc;

use vello_cpu::kurbo::{Cap, Join, Stroke};

use crate::compose::plan::{
    DrawOp, FadePass, ScenePass, StrokeStyle, TextAlign, TextBaseline, TextOp,
};
use crate::foundation::core::{BezPath, CanvasSize, Point, Rgba8Premul};
use crate::foundation::error::{PosterError, PosterResult};
use crate::foundation::math::unpremul_rgba8;
use crate::render::backend::{FrameRGBA, PosterBackend};
use crate::render::composite::{fade_band_in_place, fill_in_place, over_in_place};
use crate::render::text::{FontBook, TextBrushRgba8, TextLayoutEngine};

/// CPU raster backend powered by `vello_cpu`.
pub struct CpuBackend {
    fonts: FontBook,
    text_engine: TextLayoutEngine,
    font_cache: HashMap<String, vello_cpu::peniko::FontData>,
    surface: Option<CpuSurface>,
}

struct CpuSurface {
    width: u16,
    height: u16,
    pixmap: vello_cpu::Pixmap,
}

impl CpuBackend {
    pub fn new(fonts: FontBook) -> Self {
        Self {
            fonts,
            text_engine: TextLayoutEngine::new(),
            font_cache: HashMap::new(),
            surface: None,
        }
    }

    pub fn fonts(&self) -> &FontBook {
        &self.fonts
    }

    fn surface_mut(&mut self) -> PosterResult<&mut CpuSurface> {
        self.surface
            .as_mut()
            .ok_or_else(|| PosterError::surface("backend used before begin()"))
    }

    fn font_data(&mut self, family: &str, bytes: &[u8]) -> vello_cpu::peniko::FontData {
        self.font_cache
            .entry(family.to_owned())
            .or_insert_with(|| {
                vello_cpu::peniko::FontData::new(
                    vello_cpu::peniko::Blob::from(bytes.to_vec()),
                    0,
                )
            })
            .clone()
    }

    fn draw_text(&mut self, ctx: &mut vello_cpu::RenderContext, op: &TextOp) -> PosterResult<()> {
        if op.text.trim().is_empty() {
            return Ok(());
        }
        let candidates: Vec<(String, Arc<Vec<u8>>)> = self
            .fonts
            .candidates(&op.families)
            .into_iter()
            .map(|(f, b)| (f.to_owned(), Arc::clone(b)))
            .collect();
        let mut usable = None;
        for (family, bytes) in candidates {
            match self.text_engine.family_name(&family, &bytes) {
                Ok(_) => {
                    usable = Some((family, bytes));
                    break;
                }
                Err(err) => {
                    tracing::warn!(
                        role = ?op.role,
                        family = %family,
                        error = %err,
                        "font unusable, trying next family"
                    );
                }
            }
        }
        let Some((family, bytes)) = usable else {
            tracing::warn!(role = ?op.role, requested = ?op.families, "no font available, skipping text");
            return Ok(());
        };

        let [r, g, b, a] = unpremul_rgba8(op.color.to_array());
        let layout = self.text_engine.layout_line(
            &family,
            &bytes,
            &op.text,
            op.size_px,
            op.weight,
            TextBrushRgba8 { r, g, b, a },
        )?;
        let font = self.font_data(&family, &bytes);

        let origin = text_origin(
            op.anchor,
            f64::from(layout.width()),
            f64::from(layout.height()),
            op.align,
            op.baseline,
        );
        ctx.set_transform(vello_cpu::kurbo::Affine::translate((origin.x, origin.y)));

        for line in layout.lines() {
            for item in line.items() {
                let parley::layout::PositionedLayoutItem::GlyphRun(run) = item else {
                    continue;
                };

                let brush = run.style().brush;
                ctx.set_paint(vello_cpu::peniko::Color::from_rgba8(
                    brush.r, brush.g, brush.b, brush.a,
                ));

                let mut x = run.offset();
                let baseline = run.baseline();
                let glyphs: Vec<vello_cpu::Glyph> = run
                    .glyphs()
                    .map(|g| {
                        let glyph = vello_cpu::Glyph {
                            id: g.id,
                            x: x + g.x,
                            y: baseline - g.y,
                        };
                        x += g.advance;
                        glyph
                    })
                    .collect();
                ctx.glyph_run(&font)
                    .font_size(run.run().font_size())
                    .fill_glyphs(glyphs.into_iter());
            }
        }
        Ok(())
    }

    fn draw_op(&mut self, ctx: &mut vello_cpu::RenderContext, op: &DrawOp) -> PosterResult<()> {
        ctx.set_transform(vello_cpu::kurbo::Affine::IDENTITY);
        ctx.set_paint_transform(vello_cpu::kurbo::Affine::IDENTITY);

        match op {
            DrawOp::FillRect { rect, color, .. } => {
                ctx.set_paint(paint_color(*color));
                ctx.fill_rect(&vello_cpu::kurbo::Rect::new(rect.x0, rect.y0, rect.x1, rect.y1));
            }
            DrawOp::Polygon {
                path, fill, stroke, ..
            } => {
                let cpu_path = bezpath_to_cpu(path);
                ctx.set_paint(paint_color(*fill));
                ctx.fill_path(&cpu_path);
                if let Some(style) = stroke {
                    ctx.set_stroke(cpu_stroke(style));
                    ctx.set_paint(paint_color(style.color));
                    ctx.stroke_path(&cpu_path);
                }
            }
            DrawOp::Stroke { path, style, .. } => {
                ctx.set_stroke(cpu_stroke(style));
                ctx.set_paint(paint_color(style.color));
                ctx.stroke_path(&bezpath_to_cpu(path));
            }
            DrawOp::Text(text) => self.draw_text(ctx, text)?,
        }
        Ok(())
    }
}

impl PosterBackend for CpuBackend {
    fn begin(&mut self, canvas: &CanvasSize) -> PosterResult<()> {
        if canvas.width == 0 || canvas.height == 0 {
            return Err(PosterError::surface(format!(
                "canvas must be non-empty (got {}x{})",
                canvas.width, canvas.height
            )));
        }
        let width: u16 = canvas
            .width
            .try_into()
            .map_err(|_| PosterError::surface("surface width exceeds u16"))?;
        let height: u16 = canvas
            .height
            .try_into()
            .map_err(|_| PosterError::surface("surface height exceeds u16"))?;

        match self.surface.as_mut() {
            Some(s) if s.width == width && s.height == height => {
                fill_in_place(s.pixmap.data_as_u8_slice_mut(), [0, 0, 0, 0]);
            }
            _ => {
                self.surface = Some(CpuSurface {
                    width,
                    height,
                    pixmap: vello_cpu::Pixmap::new(width, height),
                });
            }
        }
        Ok(())
    }

    fn exec_scene(&mut self, pass: &ScenePass) -> PosterResult<()> {
        let (width, height) = {
            let s = self.surface_mut()?;
            (s.width, s.height)
        };

        let mut ctx = vello_cpu::RenderContext::new(width, height);
        for op in &pass.ops {
            self.draw_op(&mut ctx, op)?;
        }
        ctx.flush();
        let mut layer = vello_cpu::Pixmap::new(width, height);
        ctx.render_to_pixmap(&mut layer);

        let surface = self.surface_mut()?;
        if pass.composite_over {
            over_in_place(
                surface.pixmap.data_as_u8_slice_mut(),
                layer.data_as_u8_slice(),
                1.0,
            )?;
        } else {
            surface
                .pixmap
                .data_as_u8_slice_mut()
                .copy_from_slice(layer.data_as_u8_slice());
        }
        tracing::debug!(
            ops = pass.ops.len(),
            composite_over = pass.composite_over,
            "scene pass"
        );
        Ok(())
    }

    fn exec_fade(&mut self, pass: &FadePass) -> PosterResult<()> {
        let surface = self.surface_mut()?;
        let (w, h) = (u32::from(surface.width), u32::from(surface.height));
        for band in &pass.bands {
            fade_band_in_place(
                surface.pixmap.data_as_u8_slice_mut(),
                w,
                h,
                pass.color,
                band,
            )?;
        }
        Ok(())
    }

    fn readback(&mut self) -> PosterResult<FrameRGBA> {
        let surface = self
            .surface
            .as_ref()
            .ok_or_else(|| PosterError::surface("readback before begin()"))?;
        Ok(FrameRGBA {
            width: u32::from(surface.width),
            height: u32::from(surface.height),
            data: surface.pixmap.data_as_u8_slice().to_vec(),
            premultiplied: true,
        })
    }
}

/// Top-left corner of a text box of `width` x `height` anchored at `anchor`.
pub(crate) fn text_origin(
    anchor: Point,
    width: f64,
    height: f64,
    align: TextAlign,
    baseline: TextBaseline,
) -> Point {
    let x = match align {
        TextAlign::Left => anchor.x,
        TextAlign::Center => anchor.x - width * 0.5,
        TextAlign::Right => anchor.x - width,
    };
    let y = match baseline {
        TextBaseline::Middle => anchor.y - height * 0.5,
        TextBaseline::Bottom => anchor.y - height,
    };
    Point::new(x, y)
}

fn paint_color(c: Rgba8Premul) -> vello_cpu::peniko::Color {
    let [r, g, b, a] = unpremul_rgba8(c.to_array());
    vello_cpu::peniko::Color::from_rgba8(r, g, b, a)
}

fn cpu_stroke(style: &StrokeStyle) -> Stroke {
    let cap = if style.round_caps { Cap::Round } else { Cap::Butt };
    Stroke::new(style.width).with_caps(cap).with_join(Join::Round)
}

fn point_to_cpu(p: Point) -> vello_cpu::kurbo::Point {
    vello_cpu::kurbo::Point::new(p.x, p.y)
}

fn bezpath_to_cpu(path: &BezPath) -> vello_cpu::kurbo::BezPath {
    use kurbo::PathEl;

    let mut out = vello_cpu::kurbo::BezPath::new();
    for &el in path.elements() {
        match el {
            PathEl::MoveTo(p) => out.move_to(point_to_cpu(p)),
            PathEl::LineTo(p) => out.line_to(point_to_cpu(p)),
            PathEl::QuadTo(p1, p2) => out.quad_to(point_to_cpu(p1), point_to_cpu(p2)),
            PathEl::CurveTo(p1, p2, p3) => {
                out.curve_to(point_to_cpu(p1), point_to_cpu(p2), point_to_cpu(p3));
            }
            PathEl::ClosePath => out.close_path(),
        }
    }
    out
}

#[cfg(test)]
#[path = "../../tests/unit/render/cpu.rs"]
mod tests;
