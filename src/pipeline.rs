use crate::compose::{RenderRequest, compile_poster};
use crate::export::pdf::{PageSize, encode_pdf};
use crate::export::raster::{PngRasterEncoder, RasterEncoder};
use crate::export::{DocumentFormat, PosterDocument};
use crate::features::model::MapStats;
use crate::foundation::core::CanvasSize;
use crate::foundation::error::PosterResult;
use crate::render::backend::{FrameRGBA, PosterBackend, execute_plan};

/// Pixels of a finished poster plus what went into them.
#[derive(Clone, Debug)]
pub struct RenderedPoster {
    /// Premultiplied RGBA8 frame.
    pub frame: FrameRGBA,
    pub canvas: CanvasSize,
    pub stats: MapStats,
}

/// Compile `req` and rasterize it with `backend`.
///
/// Pipeline:
/// 1. [`compile_poster`](crate::compile_poster)
/// 2. [`execute_plan`](crate::execute_plan)
#[tracing::instrument(skip_all, fields(theme = %req.theme.name))]
pub fn render_poster<B: PosterBackend + ?Sized>(
    req: &RenderRequest,
    backend: &mut B,
) -> PosterResult<RenderedPoster> {
    let plan = compile_poster(req)?;
    let frame = execute_plan(backend, &plan)?;
    let stats = req.map_data.stats();
    tracing::debug!(
        width = frame.width,
        height = frame.height,
        roads = stats.roads,
        buildings = stats.buildings,
        "rendered poster"
    );
    Ok(RenderedPoster {
        frame,
        canvas: plan.canvas,
        stats,
    })
}

/// Lossless PNG of the rendered poster.
#[tracing::instrument(skip_all)]
pub fn export_png(poster: &RenderedPoster) -> PosterResult<PosterDocument> {
    Ok(PosterDocument {
        bytes: PngRasterEncoder.encode(&poster.frame)?,
        format: DocumentFormat::Png,
        size: poster.canvas,
    })
}

/// Single-page PDF of `page` size holding the poster as a JPEG.
#[tracing::instrument(skip_all, fields(width_cm = page.width_cm, height_cm = page.height_cm))]
pub fn export_pdf(poster: &RenderedPoster, page: PageSize) -> PosterResult<PosterDocument> {
    Ok(PosterDocument {
        bytes: encode_pdf(&poster.frame, page)?,
        format: DocumentFormat::Pdf,
        size: poster.canvas,
    })
}

/// [`export_png`] or [`export_pdf`] by `format`.
pub fn export_document(
    poster: &RenderedPoster,
    format: DocumentFormat,
    page: PageSize,
) -> PosterResult<PosterDocument> {
    match format {
        DocumentFormat::Png => export_png(poster),
        DocumentFormat::Pdf => export_pdf(poster, page),
    }
}
