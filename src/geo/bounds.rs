use crate::foundation::core::{Bounds, GeoPoint};
use crate::geo::math::{clamp, meters_to_lat_delta, meters_to_lon_delta};

/// Latitude limit of the Web-Mercator frame.
pub const MAX_MERCATOR_LAT: f64 = 85.0;
pub const MIN_DISTANCE_METERS: f64 = 1000.0;
pub const MIN_ASPECT_RATIO: f64 = 0.2;
pub const DEFAULT_FETCH_PADDING: f64 = 1.35;

/// Visible poster frame plus the padded area that should be fetched for it.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
pub struct PosterBoundsResult {
    pub poster_bounds: Bounds,
    pub fetch_bounds: Bounds,
    pub half_meters_x: f64,
    pub half_meters_y: f64,
    pub fetch_half_meters: f64,
}

/// Box of `half_meters_x` by `half_meters_y` around `center`; latitude is clamped to the
/// Mercator range, longitude is not.
pub fn create_bounds(center: GeoPoint, half_meters_x: f64, half_meters_y: f64) -> Bounds {
    let lat_delta = meters_to_lat_delta(half_meters_y);
    let lon_delta = meters_to_lon_delta(half_meters_x, center.lat);
    Bounds {
        south: clamp(center.lat - lat_delta, -MAX_MERCATOR_LAT, MAX_MERCATOR_LAT),
        west: center.lon - lon_delta,
        north: clamp(center.lat + lat_delta, -MAX_MERCATOR_LAT, MAX_MERCATOR_LAT),
        east: center.lon + lon_delta,
    }
}

/// Size the poster frame so its longer side spans `distance_meters` (half-extent), and derive a
/// square fetch frame padded by `fetch_padding`.
///
/// Pure and deterministic: data providers rely on this to decide what to request.
pub fn compute_poster_and_fetch_bounds(
    center: GeoPoint,
    distance_meters: f64,
    aspect_ratio: f64,
    fetch_padding: f64,
) -> PosterBoundsResult {
    let distance = if distance_meters.is_finite() {
        distance_meters.max(MIN_DISTANCE_METERS)
    } else {
        MIN_DISTANCE_METERS
    };
    let aspect = if aspect_ratio.is_finite() {
        aspect_ratio.max(MIN_ASPECT_RATIO)
    } else {
        1.0
    };

    let (half_meters_x, half_meters_y) = if aspect > 1.0 {
        (distance, distance / aspect)
    } else {
        (distance * aspect, distance)
    };

    let fetch_half_meters = half_meters_x.max(half_meters_y) * fetch_padding.max(1.0);

    PosterBoundsResult {
        poster_bounds: create_bounds(center, half_meters_x, half_meters_y),
        fetch_bounds: create_bounds(center, fetch_half_meters, fetch_half_meters),
        half_meters_x,
        half_meters_y,
        fetch_half_meters,
    }
}

/// `"52.3759° N / 9.7320° E"` style coordinate label.
pub fn format_coordinates(point: GeoPoint) -> String {
    let ns = if point.lat >= 0.0 { 'N' } else { 'S' };
    let ew = if point.lon >= 0.0 { 'E' } else { 'W' };
    format!(
        "{:.4}° {ns} / {:.4}° {ew}",
        point.lat.abs(),
        point.lon.abs()
    )
}

#[cfg(test)]
#[path = "../../tests/unit/geo/bounds.rs"]
mod tests;
