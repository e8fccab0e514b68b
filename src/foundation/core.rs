use crate::foundation::error::{PosterError, PosterResult};

pub use kurbo::{Affine, BezPath, Point, Rect, Vec2};

/// WGS84 coordinate in degrees.
///
/// Latitude is expected in `[-90, 90]`; longitude is left to callers to normalize.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct GeoPoint {
    /// Latitude in degrees.
    pub lat: f64,
    /// Longitude in degrees.
    pub lon: f64,
}

impl GeoPoint {
    /// Build a point without validation.
    pub const fn new(lat: f64, lon: f64) -> Self {
        Self { lat, lon }
    }

    /// Build a point, rejecting non-finite values and latitudes outside `[-90, 90]`.
    pub fn checked(lat: f64, lon: f64) -> PosterResult<Self> {
        if !lat.is_finite() || !lon.is_finite() {
            return Err(PosterError::invalid_geometry(format!(
                "coordinate must be finite (lat={lat}, lon={lon})"
            )));
        }
        if !(-90.0..=90.0).contains(&lat) {
            return Err(PosterError::invalid_geometry(format!(
                "latitude {lat} is outside [-90, 90]"
            )));
        }
        Ok(Self { lat, lon })
    }

    /// Return `true` when both components are finite.
    pub fn is_finite(self) -> bool {
        self.lat.is_finite() && self.lon.is_finite()
    }
}

/// Geographic bounding box in degrees.
///
/// `south <= north` holds for every box produced by this crate. `west`/`east` are not
/// normalized and may lie outside `[-180, 180]`.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Bounds {
    /// Southern latitude.
    pub south: f64,
    /// Western longitude.
    pub west: f64,
    /// Northern latitude.
    pub north: f64,
    /// Eastern longitude.
    pub east: f64,
}

impl Bounds {
    /// Build a box, swapping latitudes if they arrive inverted.
    pub fn new(south: f64, west: f64, north: f64, east: f64) -> Self {
        if south > north {
            return Self {
                south: north,
                west,
                north: south,
                east,
            };
        }
        Self {
            south,
            west,
            north,
            east,
        }
    }

    /// Latitude span in degrees.
    pub fn lat_span(&self) -> f64 {
        self.north - self.south
    }

    /// Longitude span in degrees.
    pub fn lon_span(&self) -> f64 {
        self.east - self.west
    }

    /// Geometric center of the box.
    pub fn center(&self) -> GeoPoint {
        GeoPoint::new(
            (self.south + self.north) * 0.5,
            (self.west + self.east) * 0.5,
        )
    }

    /// Return `true` when `p` lies inside or on the edge of the box.
    pub fn contains(&self, p: GeoPoint) -> bool {
        p.lat >= self.south && p.lat <= self.north && p.lon >= self.west && p.lon <= self.east
    }

    /// Return `true` when `other` lies entirely within this box.
    pub fn contains_bounds(&self, other: &Bounds) -> bool {
        other.south >= self.south
            && other.north <= self.north
            && other.west >= self.west
            && other.east <= self.east
    }

    /// Axis-aligned overlap test; touching edges count as intersecting.
    pub fn intersects(&self, other: &Bounds) -> bool {
        !(other.east < self.west
            || other.west > self.east
            || other.north < self.south
            || other.south > self.north)
    }

    /// Smallest box around the finite points in `points`, or `None` if there are none.
    pub fn enclosing(points: &[GeoPoint]) -> Option<Self> {
        let mut it = points.iter().copied().filter(|p| p.is_finite());
        let first = it.next()?;
        let mut b = Self {
            south: first.lat,
            west: first.lon,
            north: first.lat,
            east: first.lon,
        };
        for p in it {
            b.south = b.south.min(p.lat);
            b.north = b.north.max(p.lat);
            b.west = b.west.min(p.lon);
            b.east = b.east.max(p.lon);
        }
        Some(b)
    }
}

/// Output raster dimensions after device-limit clamping.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct CanvasSize {
    /// Final width in pixels.
    pub width: u32,
    /// Final height in pixels.
    pub height: u32,
    /// Width requested from the physical size at the nominal DPI.
    pub requested_width: u32,
    /// Height requested from the physical size at the nominal DPI.
    pub requested_height: u32,
    /// Uniform scale applied to the requested size, in `(0, 1]`.
    pub downscale_factor: f64,
}

impl CanvasSize {
    /// Canvas with no downscaling applied.
    pub fn exact(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            requested_width: width,
            requested_height: height,
            downscale_factor: 1.0,
        }
    }

    /// Width divided by height.
    pub fn aspect_ratio(&self) -> f64 {
        f64::from(self.width) / f64::from(self.height.max(1))
    }

    /// Shorter side in pixels.
    pub fn min_side(&self) -> u32 {
        self.width.min(self.height)
    }

    /// Number of bytes in a tightly packed RGBA8 buffer of this size.
    pub fn rgba_len(&self) -> usize {
        self.width as usize * self.height as usize * 4
    }
}

/// Premultiplied RGBA8 (r,g,b already multiplied by a).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub struct Rgba8Premul {
    /// Red channel premultiplied by alpha.
    pub r: u8,
    /// Green channel premultiplied by alpha.
    pub g: u8,
    /// Blue channel premultiplied by alpha.
    pub b: u8,
    /// Alpha channel.
    pub a: u8,
}

impl Rgba8Premul {
    /// Fully transparent black.
    pub fn transparent() -> Self {
        Self {
            r: 0,
            g: 0,
            b: 0,
            a: 0,
        }
    }

    /// Convert straight-alpha RGBA8 into premultiplied RGBA8.
    pub fn from_straight_rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self {
            r: crate::foundation::math::mul_div255_u8(u16::from(r), u16::from(a)),
            g: crate::foundation::math::mul_div255_u8(u16::from(g), u16::from(a)),
            b: crate::foundation::math::mul_div255_u8(u16::from(b), u16::from(a)),
            a,
        }
    }

    /// Same color with alpha scaled by `opacity` in `[0, 1]`.
    pub fn with_opacity(self, opacity: f64) -> Self {
        let op = ((opacity.clamp(0.0, 1.0) * 255.0).round()) as u16;
        Self {
            r: crate::foundation::math::mul_div255_u8(u16::from(self.r), op),
            g: crate::foundation::math::mul_div255_u8(u16::from(self.g), op),
            b: crate::foundation::math::mul_div255_u8(u16::from(self.b), op),
            a: crate::foundation::math::mul_div255_u8(u16::from(self.a), op),
        }
    }

    /// Return the channels as `[r, g, b, a]`.
    pub fn to_array(self) -> [u8; 4] {
        [self.r, self.g, self.b, self.a]
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
