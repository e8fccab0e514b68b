use crate::foundation::core::CanvasSize;

pub const OUTPUT_DPI: f64 = 220.0;
pub const MAX_PIXELS: f64 = 8_500_000.0;
pub const MAX_SIDE: f64 = 4096.0;
pub const MIN_SIDE: u32 = 600;
pub const CM_PER_INCH: f64 = 2.54;

/// Physical poster size.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct PosterSize {
    pub width_cm: f64,
    pub height_cm: f64,
}

impl PosterSize {
    pub fn width_in(&self) -> f64 {
        self.width_cm / CM_PER_INCH
    }

    pub fn height_in(&self) -> f64 {
        self.height_cm / CM_PER_INCH
    }

    pub fn aspect_ratio(&self) -> f64 {
        self.width_cm / self.height_cm
    }
}

fn side_px(v: f64) -> u32 {
    if !v.is_finite() {
        return MIN_SIDE;
    }
    (v.round().clamp(0.0, f64::from(u32::MAX)) as u32).max(MIN_SIDE)
}

/// Pixel size for a poster of `width_in` x `height_in` inches at [`OUTPUT_DPI`].
///
/// The request is scaled down uniformly so the area stays within [`MAX_PIXELS`] and the longer
/// side within [`MAX_SIDE`]; neither side goes below [`MIN_SIDE`].
pub fn resolve_canvas_size(width_in: f64, height_in: f64) -> CanvasSize {
    let requested_width = side_px(width_in * OUTPUT_DPI);
    let requested_height = side_px(height_in * OUTPUT_DPI);
    let total = f64::from(requested_width) * f64::from(requested_height);
    let longest = f64::from(requested_width.max(requested_height));

    let area_factor = if total > MAX_PIXELS {
        (MAX_PIXELS / total).sqrt()
    } else {
        1.0
    };
    let side_factor = if longest > MAX_SIDE {
        MAX_SIDE / longest
    } else {
        1.0
    };
    let factor = area_factor.min(side_factor).min(1.0);

    CanvasSize {
        width: side_px(f64::from(requested_width) * factor),
        height: side_px(f64::from(requested_height) * factor),
        requested_width,
        requested_height,
        downscale_factor: factor,
    }
}

#[cfg(test)]
#[path = "../../tests/unit/compose/canvas.rs"]
mod tests;
