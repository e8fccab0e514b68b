use crate::compose::plan::{FadePass, Pass, PosterPlan, ScenePass};
use crate::foundation::core::CanvasSize;
use crate::foundation::error::{PosterError, PosterResult};
use crate::foundation::math::unpremul_rgba8;

/// A rendered poster as RGBA8 pixels.
///
/// Backends return **premultiplied** alpha; the flag makes that explicit at API boundaries.
#[derive(Clone, Debug)]
pub struct FrameRGBA {
    /// Frame width in pixels.
    pub width: u32,
    /// Frame height in pixels.
    pub height: u32,
    /// RGBA8 bytes, tightly packed, row-major.
    pub data: Vec<u8>,
    /// Whether `data` is premultiplied alpha.
    pub premultiplied: bool,
}

impl FrameRGBA {
    /// Pixel at `(x, y)` as stored.
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let i = (y as usize * self.width as usize + x as usize) * 4;
        let px = self.data.get(i..i + 4)?;
        Some([px[0], px[1], px[2], px[3]])
    }

    /// Straight-alpha copy of the pixel data, as encoders expect.
    pub fn to_straight_rgba8(&self) -> PosterResult<Vec<u8>> {
        let expected = CanvasSize::exact(self.width, self.height).rgba_len();
        if self.width == 0 || self.height == 0 || self.data.len() != expected {
            return Err(PosterError::encoding(format!(
                "frame buffer is {} bytes, expected {expected} for {}x{}",
                self.data.len(),
                self.width,
                self.height
            )));
        }
        if !self.premultiplied {
            return Ok(self.data.clone());
        }
        let mut out = Vec::with_capacity(self.data.len());
        for px in self.data.chunks_exact(4) {
            out.extend_from_slice(&unpremul_rgba8([px[0], px[1], px[2], px[3]]));
        }
        Ok(out)
    }
}

/// A rasterizer that can execute a compiled [`PosterPlan`].
///
/// Backends own a single target surface per call sequence; [`execute_plan`] drives them in plan
/// order.
pub trait PosterBackend {
    /// Allocate (or reset) the target surface. Zero or unsupported sizes are fatal.
    fn begin(&mut self, canvas: &CanvasSize) -> PosterResult<()>;

    fn exec_scene(&mut self, pass: &ScenePass) -> PosterResult<()>;

    fn exec_fade(&mut self, pass: &FadePass) -> PosterResult<()>;

    fn readback(&mut self) -> PosterResult<FrameRGBA>;
}

/// Run every pass of `plan` on `backend` and read back the final frame.
pub fn execute_plan<B: PosterBackend + ?Sized>(
    backend: &mut B,
    plan: &PosterPlan,
) -> PosterResult<FrameRGBA> {
    backend.begin(&plan.canvas)?;
    for pass in &plan.passes {
        match pass {
            Pass::Scene(p) => backend.exec_scene(p)?,
            Pass::Fade(p) => backend.exec_fade(p)?,
        }
    }
    backend.readback()
}

#[cfg(test)]
#[path = "../../tests/unit/render/backend.rs"]
mod tests;
