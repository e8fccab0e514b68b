/// Meters spanned by one degree of latitude (and of longitude at the equator).
pub const METERS_PER_DEGREE: f64 = 111_320.0;

/// Floor applied to `|cos(lat)|` so longitude deltas stay bounded near the poles.
pub const MIN_COSINE: f64 = 0.1;

pub fn to_radians(degrees: f64) -> f64 {
    degrees * std::f64::consts::PI / 180.0
}

pub fn to_degrees(radians: f64) -> f64 {
    radians * 180.0 / std::f64::consts::PI
}

/// Clamp `v` into `[lo, hi]`; `NaN` maps to `lo`.
pub fn clamp(v: f64, lo: f64, hi: f64) -> f64 {
    if v.is_nan() {
        return lo;
    }
    v.max(lo).min(hi)
}

pub fn meters_to_lat_delta(meters: f64) -> f64 {
    meters / METERS_PER_DEGREE
}

pub fn meters_to_lon_delta(meters: f64, lat: f64) -> f64 {
    let cosine = to_radians(lat).cos().abs().max(MIN_COSINE);
    meters / (METERS_PER_DEGREE * cosine)
}

#[cfg(test)]
#[path = "../../tests/unit/geo/math.rs"]
mod tests;
