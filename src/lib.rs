//! Map poster rendering from OpenStreetMap geometry.
//!
//! The crate is a pure pipeline over in-memory inputs:
//!
//! - Decode Overpass JSON into classified [`MapData`] ([`parse_overpass_payload`])
//! - Resolve a [`ResolvedTheme`] from a [`ThemeRegistry`]
//! - Compile a [`RenderRequest`] into a [`PosterPlan`] and rasterize it with a [`PosterBackend`]
//!   (the [`CpuBackend`] uses `vello_cpu`)
//! - Encode the frame as PNG or as a single-page print PDF
//!
//! Fetching map data and loading font files are left to the caller.
#![forbid(unsafe_code)]

mod compose;
mod config;
mod export;
mod features;
mod foundation;
mod geo;
mod pipeline;
mod render;
mod theme;

pub use crate::foundation::core::{
    Affine, BezPath, Bounds, CanvasSize, GeoPoint, Point, Rect, Rgba8Premul, Vec2,
};
pub use crate::foundation::error::{PosterError, PosterResult};

pub use crate::geo::bounds::{
    DEFAULT_FETCH_PADDING, MAX_MERCATOR_LAT, MIN_ASPECT_RATIO, MIN_DISTANCE_METERS,
    PosterBoundsResult, compute_poster_and_fetch_bounds, create_bounds, format_coordinates,
};
pub use crate::geo::math::{
    METERS_PER_DEGREE, MIN_COSINE, clamp, meters_to_lat_delta, meters_to_lon_delta, to_degrees,
    to_radians,
};
pub use crate::geo::projection::{Projector, mercator_y, points_intersect_bounds};

pub use crate::features::model::{
    ElementKind, Feature, MAX_BUILDING_POLYGONS, MAX_POINTS_PER_BUILDING, MAX_POINTS_PER_LINE,
    MAX_POINTS_PER_POLYGON, MapData, MapStats, Polygon, RoadWay, TaggedElement, build_map_data,
    classify_element,
};
pub use crate::features::overpass::{
    HIGHWAY_FILTER, build_overpass_query, parse_overpass_elements, parse_overpass_payload,
    parse_overpass_value,
};
pub use crate::features::simplify::{
    CLOSURE_EPSILON_DEG, downsample, is_closed_polygon, limit_collection,
};
pub use crate::features::tags::{TagMap, normalize_highway};

pub use crate::theme::color::{
    Hsl, HslShift, Rgb, blend_hex, hex_to_premul, hsl_to_rgb, normalize_hex_color, parse_hex,
    parse_hex_rgba, rgb_to_hex, rgb_to_hsl, shift_hex_color, to_unique_hex_colors, with_alpha,
};
pub use crate::theme::registry::{
    DEFAULT_THEME_ID, DISPLAY_PALETTE_KEYS, PREFERRED_THEME_ORDER, ThemeOption, ThemeRegistry,
    theme_palette,
};
pub use crate::theme::resolve::{
    ColorKey, RawTheme, ResolvedTheme, resolve_theme, resolve_theme_color,
    resolve_theme_color_strict,
};
pub use crate::theme::suggest::{
    ColorChoices, MAX_MORE, MAX_SUGGESTED, build_dynamic_color_choices,
};

pub use crate::compose::canvas::{
    CM_PER_INCH, MAX_PIXELS, MAX_SIDE, MIN_SIDE, OUTPUT_DPI, PosterSize, resolve_canvas_size,
};
pub use crate::compose::layers::{FADE_FRACTION, MIN_BUILDING_AREA_PX};
pub use crate::compose::plan::{
    DrawOp, FadeBand, FadePass, Layer, Pass, PosterPlan, ScenePass, StrokeStyle, TextAlign,
    TextBaseline, TextOp, TextRole,
};
pub use crate::compose::road::{RoadClass, RoadStyle, stroke_width_scale};
pub use crate::compose::typography::{
    ATTRIBUTION_TEXT, BODY_FALLBACK_FAMILY, DEFAULT_CREDIT_TEXT, TITLE_FALLBACK_FAMILY,
    TypographyOptions, city_font_size, dim_scale, format_city_label, is_latin_script,
};
pub use crate::compose::{RenderRequest, compile_poster};

pub use crate::render::backend::{FrameRGBA, PosterBackend, execute_plan};
pub use crate::render::cpu::CpuBackend;
pub use crate::render::text::FontBook;

pub use crate::export::filename::{poster_filename, poster_filename_at, slugify};
pub use crate::export::pdf::{
    DEFAULT_PAGE_HEIGHT_CM, DEFAULT_PAGE_WIDTH_CM, PageSize, encode_pdf, encode_pdf_with_jpeg,
    format_pdf_number,
};
pub use crate::export::raster::{
    DEFAULT_JPEG_QUALITY, JpegRasterEncoder, PngRasterEncoder, RasterEncoder,
};
pub use crate::export::{DocumentFormat, PosterDocument};

pub use crate::config::{
    DEFAULT_CENTER, DEFAULT_DISTANCE_METERS, DEFAULT_POSTER_HEIGHT_CM, DEFAULT_POSTER_WIDTH_CM,
    FontSpec, LocationParts, LocationSpec, MAX_DISTANCE_METERS, MAX_POSTER_CM, MIN_POSTER_CM,
    PosterSpec, TypographySpec, ValidatedSpec, parse_location_parts,
};
pub use crate::pipeline::{
    RenderedPoster, export_document, export_pdf, export_png, render_poster,
};
