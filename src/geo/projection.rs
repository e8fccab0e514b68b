use crate::foundation::core::{Bounds, GeoPoint, Point};
use crate::geo::bounds::MAX_MERCATOR_LAT;
use crate::geo::math::{clamp, to_radians};

const MIN_SPAN: f64 = 1e-9;

/// Log-tangent Mercator ordinate for `lat` (degrees), clamped to `±85°`.
pub fn mercator_y(lat: f64) -> f64 {
    let rad = to_radians(clamp(lat, -MAX_MERCATOR_LAT, MAX_MERCATOR_LAT));
    (std::f64::consts::FRAC_PI_4 + rad / 2.0).tan().ln()
}

/// Maps geographic coordinates onto a `width` x `height` raster covering `bounds`.
///
/// Every layer of a poster must go through the same projector so features stay registered.
#[derive(Clone, Copy, Debug)]
pub struct Projector {
    west: f64,
    lon_span: f64,
    north_merc: f64,
    merc_span: f64,
    width: f64,
    height: f64,
}

impl Projector {
    pub fn new(bounds: &Bounds, width: f64, height: f64) -> Self {
        let north_merc = mercator_y(bounds.north);
        let south_merc = mercator_y(bounds.south);
        let lon_span = bounds.east - bounds.west;
        let merc_span = north_merc - south_merc;
        Self {
            west: bounds.west,
            lon_span: if lon_span == 0.0 { MIN_SPAN } else { lon_span },
            north_merc,
            merc_span: if merc_span == 0.0 { MIN_SPAN } else { merc_span },
            width,
            height,
        }
    }

    pub fn project(&self, p: GeoPoint) -> Point {
        Point::new(
            (p.lon - self.west) / self.lon_span * self.width,
            (self.north_merc - mercator_y(p.lat)) / self.merc_span * self.height,
        )
    }

    /// Project every point in order.
    pub fn project_all(&self, points: &[GeoPoint]) -> Vec<Point> {
        points.iter().map(|&p| self.project(p)).collect()
    }
}

/// Cheap culling test: does the bounding box of the finite points in `points` overlap `bounds`?
pub fn points_intersect_bounds(points: &[GeoPoint], bounds: &Bounds) -> bool {
    Bounds::enclosing(points).is_some_and(|b| b.intersects(bounds))
}

#[cfg(test)]
#[path = "../../tests/unit/geo/projection.rs"]
mod tests;
