use crate::compose::plan::FadeBand;
use crate::foundation::core::Rgba8Premul;
use crate::foundation::error::{PosterError, PosterResult};
use crate::foundation::math::mul_div255_u16;

pub type PremulRgba8 = [u8; 4];

fn add_sat_u8(a: u16, b: u16) -> u8 {
    (a + b).min(255) as u8
}

/// Source-over for premultiplied pixels, with `src` scaled by `opacity`.
pub fn over(dst: PremulRgba8, src: PremulRgba8, opacity: f32) -> PremulRgba8 {
    let opacity = opacity.clamp(0.0, 1.0);
    if opacity <= 0.0 || src[3] == 0 {
        return dst;
    }

    let op = ((opacity * 255.0).round() as i32).clamp(0, 255) as u16;
    let sa = mul_div255_u16(u16::from(src[3]), op);
    if sa == 0 {
        return dst;
    }

    let inv = 255u16 - sa;

    let mut out = [0u8; 4];
    out[3] = add_sat_u8(sa, mul_div255_u16(u16::from(dst[3]), inv));

    for i in 0..3 {
        let sc = mul_div255_u16(u16::from(src[i]), op);
        let dc = mul_div255_u16(u16::from(dst[i]), inv);
        out[i] = add_sat_u8(sc, dc);
    }
    out
}

pub fn over_in_place(dst: &mut [u8], src: &[u8], opacity: f32) -> PosterResult<()> {
    if dst.len() != src.len() || !dst.len().is_multiple_of(4) {
        return Err(PosterError::surface(
            "over_in_place expects equal-length rgba8 buffers",
        ));
    }
    for (d, s) in dst.chunks_exact_mut(4).zip(src.chunks_exact(4)) {
        let out = over([d[0], d[1], d[2], d[3]], [s[0], s[1], s[2], s[3]], opacity);
        d.copy_from_slice(&out);
    }
    Ok(())
}

pub fn fill_in_place(dst: &mut [u8], rgba: PremulRgba8) {
    for px in dst.chunks_exact_mut(4) {
        px.copy_from_slice(&rgba);
    }
}

/// Coverage of a fade band at pixel row `y`: 1 at `y_opaque`, 0 at `y_clear`, linear between.
pub fn band_opacity(band: &FadeBand, y: u32) -> f32 {
    let span = band.y_clear - band.y_opaque;
    if span.abs() < f64::EPSILON {
        return 0.0;
    }
    let center = f64::from(y) + 0.5;
    (1.0 - (center - band.y_opaque) / span).clamp(0.0, 1.0) as f32
}

/// Blend `color` over every row the band covers.
pub fn fade_band_in_place(
    dst: &mut [u8],
    width: u32,
    height: u32,
    color: Rgba8Premul,
    band: &FadeBand,
) -> PosterResult<()> {
    let row_len = width as usize * 4;
    if dst.len() != row_len * height as usize {
        return Err(PosterError::surface(
            "fade expects a buffer matching width*height*4",
        ));
    }
    let lo = band.y_opaque.min(band.y_clear).floor().max(0.0) as u32;
    let hi = (band.y_opaque.max(band.y_clear).ceil().max(0.0) as u32).min(height);
    let src = color.to_array();
    for y in lo..hi {
        let opacity = band_opacity(band, y);
        if opacity <= 0.0 {
            continue;
        }
        let start = y as usize * row_len;
        for px in dst[start..start + row_len].chunks_exact_mut(4) {
            let out = over([px[0], px[1], px[2], px[3]], src, opacity);
            px.copy_from_slice(&out);
        }
    }
    Ok(())
}

#[cfg(test)]
#[path = "../../tests/unit/render/composite.rs"]
mod tests;
