//! JSON poster specification and its validated, clamped form.

use std::collections::BTreeMap;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::compose::RenderRequest;
use crate::compose::canvas::PosterSize;
use crate::compose::typography::TypographyOptions;
use crate::features::model::MapData;
use crate::features::overpass::build_overpass_query;
use crate::foundation::core::GeoPoint;
use crate::foundation::error::{PosterError, PosterResult};
use crate::geo::bounds::{
    DEFAULT_FETCH_PADDING, MAX_MERCATOR_LAT, MIN_DISTANCE_METERS, PosterBoundsResult,
    compute_poster_and_fetch_bounds,
};
use crate::theme::registry::{DEFAULT_THEME_ID, ThemeRegistry};

pub const MIN_POSTER_CM: f64 = 4.0;
pub const MAX_POSTER_CM: f64 = 45.0;
pub const DEFAULT_POSTER_WIDTH_CM: f64 = 20.0;
pub const DEFAULT_POSTER_HEIGHT_CM: f64 = 30.0;
pub const MAX_DISTANCE_METERS: f64 = 20_000_000.0;
pub const DEFAULT_DISTANCE_METERS: f64 = 4000.0;
pub const DEFAULT_CENTER: GeoPoint = GeoPoint::new(52.3759, 9.7320);
pub const DEFAULT_LOCATION_LABEL: &str = "Hanover, Lower Saxony, Germany";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LocationSpec {
    pub lat: f64,
    pub lon: f64,
    /// Free-form place name, e.g. `"Hanover, Lower Saxony, Germany"`.
    #[serde(default)]
    pub label: Option<String>,
    #[serde(default)]
    pub city: Option<String>,
    #[serde(default)]
    pub country: Option<String>,
}

impl Default for LocationSpec {
    fn default() -> Self {
        Self {
            lat: DEFAULT_CENTER.lat,
            lon: DEFAULT_CENTER.lon,
            label: Some(DEFAULT_LOCATION_LABEL.to_owned()),
            city: None,
            country: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TypographySpec {
    /// Overrides the city parsed from the location.
    #[serde(default)]
    pub display_city: Option<String>,
    #[serde(default)]
    pub display_country: Option<String>,
    #[serde(default)]
    pub font_family: Option<String>,
    #[serde(default = "default_true")]
    pub show_poster_text: bool,
    #[serde(default = "default_true")]
    pub include_credits: bool,
    #[serde(default)]
    pub credit_text: Option<String>,
}

impl Default for TypographySpec {
    fn default() -> Self {
        Self {
            display_city: None,
            display_country: None,
            font_family: None,
            show_poster_text: true,
            include_credits: true,
            credit_text: None,
        }
    }
}

/// A font face to load before rendering. Paths are resolved by the caller.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FontSpec {
    pub family: String,
    pub path: PathBuf,
}

/// User-facing poster description, as read from JSON.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PosterSpec {
    #[serde(default)]
    pub location: LocationSpec,
    #[serde(default = "default_theme")]
    pub theme: String,
    /// Color key -> hex literal or `$alias`.
    #[serde(default)]
    pub theme_overrides: BTreeMap<String, String>,
    #[serde(default = "default_width_cm")]
    pub width_cm: f64,
    #[serde(default = "default_height_cm")]
    pub height_cm: f64,
    #[serde(default = "default_distance_m")]
    pub distance_m: f64,
    #[serde(default)]
    pub typography: TypographySpec,
    #[serde(default)]
    pub fonts: Vec<FontSpec>,
}

fn default_true() -> bool {
    true
}

fn default_theme() -> String {
    DEFAULT_THEME_ID.to_owned()
}

fn default_width_cm() -> f64 {
    DEFAULT_POSTER_WIDTH_CM
}

fn default_height_cm() -> f64 {
    DEFAULT_POSTER_HEIGHT_CM
}

fn default_distance_m() -> f64 {
    DEFAULT_DISTANCE_METERS
}

impl Default for PosterSpec {
    fn default() -> Self {
        Self {
            location: LocationSpec::default(),
            theme: default_theme(),
            theme_overrides: BTreeMap::new(),
            width_cm: DEFAULT_POSTER_WIDTH_CM,
            height_cm: DEFAULT_POSTER_HEIGHT_CM,
            distance_m: DEFAULT_DISTANCE_METERS,
            typography: TypographySpec::default(),
            fonts: Vec::new(),
        }
    }
}

/// City and country split out of a place label.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LocationParts {
    pub city: String,
    pub country: String,
}

/// First comma-separated part is the city, the last one the country.
pub fn parse_location_parts(label: &str) -> LocationParts {
    let parts: Vec<&str> = label
        .split(',')
        .map(str::trim)
        .filter(|p| !p.is_empty())
        .collect();
    match parts.as_slice() {
        [] => LocationParts::default(),
        [city] => LocationParts {
            city: (*city).to_owned(),
            country: String::new(),
        },
        [city, .., country] => LocationParts {
            city: (*city).to_owned(),
            country: (*country).to_owned(),
        },
    }
}

fn finite(name: &str, v: f64) -> PosterResult<f64> {
    if v.is_finite() {
        Ok(v)
    } else {
        Err(PosterError::validation(format!("{name} must be finite")))
    }
}

fn non_blank(v: Option<&str>) -> Option<String> {
    v.map(str::trim).filter(|s| !s.is_empty()).map(str::to_owned)
}

impl PosterSpec {
    pub fn from_json(json: &str) -> PosterResult<Self> {
        serde_json::from_str(json).map_err(|e| PosterError::serde(format!("poster spec: {e}")))
    }

    /// Check coordinates and clamp sizes and distance into their supported ranges.
    pub fn validate(&self) -> PosterResult<ValidatedSpec> {
        let lat = finite("location.lat", self.location.lat)?;
        let lon = finite("location.lon", self.location.lon)?;
        if lat.abs() > MAX_MERCATOR_LAT {
            return Err(PosterError::validation(format!(
                "location.lat must be within ±{MAX_MERCATOR_LAT}° (got {lat})"
            )));
        }
        if lon.abs() > 180.0 {
            return Err(PosterError::validation(format!(
                "location.lon must be within ±180° (got {lon})"
            )));
        }
        let width_cm = finite("width_cm", self.width_cm)?.clamp(MIN_POSTER_CM, MAX_POSTER_CM);
        let height_cm = finite("height_cm", self.height_cm)?.clamp(MIN_POSTER_CM, MAX_POSTER_CM);
        let distance_m =
            finite("distance_m", self.distance_m)?.clamp(MIN_DISTANCE_METERS, MAX_DISTANCE_METERS);

        let label = non_blank(self.location.label.as_deref()).unwrap_or_default();
        let parsed = parse_location_parts(&label);
        let city = non_blank(self.typography.display_city.as_deref())
            .or_else(|| non_blank(self.location.city.as_deref()))
            .unwrap_or(parsed.city);
        let country = non_blank(self.typography.display_country.as_deref())
            .or_else(|| non_blank(self.location.country.as_deref()))
            .unwrap_or(parsed.country);

        let theme_id = match self.theme.trim() {
            "" => DEFAULT_THEME_ID.to_owned(),
            id => id.to_owned(),
        };

        Ok(ValidatedSpec {
            center: GeoPoint::new(lat, lon),
            display_name: label,
            theme_id,
            theme_overrides: self.theme_overrides.clone(),
            size: PosterSize {
                width_cm,
                height_cm,
            },
            distance_m,
            typography: TypographyOptions {
                city,
                country,
                font_family: non_blank(self.typography.font_family.as_deref()),
                show_poster_text: self.typography.show_poster_text,
                include_credits: self.typography.include_credits,
                credit_text: non_blank(self.typography.credit_text.as_deref()),
            },
        })
    }
}

/// A [`PosterSpec`] whose numbers are finite and in range.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidatedSpec {
    pub center: GeoPoint,
    pub display_name: String,
    pub theme_id: String,
    pub theme_overrides: BTreeMap<String, String>,
    pub size: PosterSize,
    pub distance_m: f64,
    pub typography: TypographyOptions,
}

impl ValidatedSpec {
    pub fn aspect_ratio(&self) -> f64 {
        self.size.aspect_ratio()
    }

    pub fn poster_bounds(&self) -> PosterBoundsResult {
        compute_poster_and_fetch_bounds(
            self.center,
            self.distance_m,
            self.aspect_ratio(),
            DEFAULT_FETCH_PADDING,
        )
    }

    /// Overpass query for the padded fetch area, with buildings limited to the poster frame.
    pub fn overpass_query(&self) -> String {
        let b = self.poster_bounds();
        build_overpass_query(&b.fetch_bounds, &b.poster_bounds)
    }

    /// Resolve the theme (with overrides) and assemble the render request.
    pub fn render_request(
        &self,
        map_data: MapData,
        themes: &ThemeRegistry,
    ) -> PosterResult<RenderRequest> {
        if !themes.contains(&self.theme_id) {
            tracing::warn!(theme = %self.theme_id, fallback = %themes.default_id(), "unknown theme");
        }
        let theme = themes.get_with_overrides(&self.theme_id, &self.theme_overrides)?;
        Ok(RenderRequest {
            theme,
            map_data,
            bounds: self.poster_bounds().poster_bounds,
            center: self.center,
            display_name: self.display_name.clone(),
            size: self.size,
            typography: self.typography.clone(),
        })
    }
}

#[cfg(test)]
#[path = "../tests/unit/config.rs"]
mod tests;
