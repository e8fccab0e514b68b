use crate::compose::plan::{DrawOp, Layer, StrokeStyle, TextAlign, TextBaseline, TextOp, TextRole};
use crate::foundation::core::{BezPath, CanvasSize, GeoPoint, Point, Rgba8Premul};
use crate::geo::bounds::format_coordinates;
use crate::theme::color::hex_to_premul;

pub const DIMENSION_REFERENCE_PX: f64 = 3600.0;
pub const MIN_DIM_SCALE: f64 = 0.45;

pub const CITY_Y_RATIO: f64 = 0.845;
pub const DIVIDER_Y_RATIO: f64 = 0.875;
pub const COUNTRY_Y_RATIO: f64 = 0.9;
pub const COORDS_Y_RATIO: f64 = 0.93;
pub const EDGE_MARGIN_RATIO: f64 = 0.02;

pub const CITY_SHRINK_THRESHOLD: usize = 10;
pub const CITY_FONT_BASE_PX: f64 = 250.0;
pub const CITY_FONT_MIN_PX: f64 = 110.0;
pub const COUNTRY_FONT_BASE_PX: f64 = 92.0;
pub const COORDS_FONT_BASE_PX: f64 = 58.0;
pub const ATTRIBUTION_FONT_BASE_PX: f64 = 30.0;

pub const TITLE_FALLBACK_FAMILY: &str = "Space Grotesk";
pub const BODY_FALLBACK_FAMILY: &str = "IBM Plex Mono";

pub const ATTRIBUTION_TEXT: &str = "\u{a9} OpenStreetMap contributors";
pub const DEFAULT_CREDIT_TEXT: &str = "created with mapposter";

const DEFAULT_TEXT_COLOR: &str = "#111111";
const COORDS_OPACITY: f64 = 0.75;
const FOOTER_OPACITY: f64 = 0.55;
const LATIN_SHARE: f64 = 0.8;

/// Title-block inputs taken from the render request.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct TypographyOptions {
    pub city: String,
    pub country: String,
    pub font_family: Option<String>,
    pub show_poster_text: bool,
    pub include_credits: bool,
    pub credit_text: Option<String>,
}

impl Default for TypographyOptions {
    fn default() -> Self {
        Self {
            city: String::new(),
            country: String::new(),
            font_family: None,
            show_poster_text: true,
            include_credits: true,
            credit_text: None,
        }
    }
}

fn is_latin_letter(c: char) -> bool {
    c.is_ascii_alphabetic() || ('\u{c0}'..='\u{24f}').contains(&c)
}

/// More than 80% of the letters are Latin; text without letters counts as Latin.
pub fn is_latin_script(text: &str) -> bool {
    let (mut latin, mut letters) = (0usize, 0usize);
    for c in text.chars() {
        if is_latin_letter(c) {
            latin += 1;
            letters += 1;
        } else if c.is_alphabetic() {
            letters += 1;
        }
    }
    if letters == 0 {
        return true;
    }
    latin as f64 / letters as f64 > LATIN_SHARE
}

/// Latin labels are upper-cased and spaced out with two spaces between characters.
pub fn format_city_label(city: &str) -> String {
    if !is_latin_script(city) {
        return city.to_owned();
    }
    let upper: Vec<String> = city.to_uppercase().chars().map(String::from).collect();
    upper.join("  ")
}

/// `max(0.45, min(w, h) / 3600)`.
pub fn dim_scale(canvas: &CanvasSize) -> f64 {
    (f64::from(canvas.min_side()) / DIMENSION_REFERENCE_PX).max(MIN_DIM_SCALE)
}

/// City font size; long names shrink proportionally down to a floor.
pub fn city_font_size(city: &str, dim_scale: f64) -> f64 {
    let len = city.chars().count().max(1);
    let base = CITY_FONT_BASE_PX * dim_scale;
    if len <= CITY_SHRINK_THRESHOLD {
        return base;
    }
    (base * CITY_SHRINK_THRESHOLD as f64 / len as f64).max(CITY_FONT_MIN_PX * dim_scale)
}

fn family_stack(requested: Option<&str>, fallback: &str) -> Vec<String> {
    let mut families = Vec::with_capacity(2);
    if let Some(f) = requested.map(str::trim).filter(|f| !f.is_empty()) {
        families.push(f.to_owned());
    }
    if !families.iter().any(|f| f == fallback) {
        families.push(fallback.to_owned());
    }
    families
}

struct TextStyle<'a> {
    families: &'a [String],
    size_px: f64,
    weight: f32,
    color: Rgba8Premul,
}

fn text_op(
    role: TextRole,
    text: String,
    style: &TextStyle<'_>,
    anchor: Point,
    align: TextAlign,
    baseline: TextBaseline,
) -> DrawOp {
    DrawOp::Text(TextOp {
        role,
        text,
        families: style.families.to_vec(),
        size_px: style.size_px as f32,
        weight: style.weight,
        color: style.color,
        anchor,
        align,
        baseline,
    })
}

/// Divider and text ops for the title block and footer.
///
/// The attribution line is always present; the city/divider/country/coordinates group and the
/// credit line follow their flags.
pub(crate) fn text_block_ops(
    canvas: &CanvasSize,
    text_hex: &str,
    center: GeoPoint,
    opts: &TypographyOptions,
) -> Vec<DrawOp> {
    let w = f64::from(canvas.width);
    let h = f64::from(canvas.height);
    let scale = dim_scale(canvas);
    let color = hex_to_premul(if text_hex.is_empty() {
        DEFAULT_TEXT_COLOR
    } else {
        text_hex
    });
    let title = family_stack(opts.font_family.as_deref(), TITLE_FALLBACK_FAMILY);
    let body = family_stack(opts.font_family.as_deref(), BODY_FALLBACK_FAMILY);

    let mut ops = Vec::new();
    if opts.show_poster_text {
        let city = TextStyle {
            families: &title,
            size_px: city_font_size(&opts.city, scale),
            weight: 700.0,
            color,
        };
        ops.push(text_op(
            TextRole::City,
            format_city_label(&opts.city),
            &city,
            Point::new(w * 0.5, h * CITY_Y_RATIO),
            TextAlign::Center,
            TextBaseline::Middle,
        ));

        let mut divider = BezPath::new();
        divider.move_to(Point::new(w * 0.4, h * DIVIDER_Y_RATIO));
        divider.line_to(Point::new(w * 0.6, h * DIVIDER_Y_RATIO));
        ops.push(DrawOp::Stroke {
            layer: Layer::Divider,
            path: divider,
            style: StrokeStyle {
                color,
                width: 3.0 * scale,
                round_caps: false,
            },
        });

        let country = TextStyle {
            families: &title,
            size_px: COUNTRY_FONT_BASE_PX * scale,
            weight: 300.0,
            color,
        };
        ops.push(text_op(
            TextRole::Country,
            opts.country.to_uppercase(),
            &country,
            Point::new(w * 0.5, h * COUNTRY_Y_RATIO),
            TextAlign::Center,
            TextBaseline::Middle,
        ));

        let coords = TextStyle {
            families: &body,
            size_px: COORDS_FONT_BASE_PX * scale,
            weight: 400.0,
            color: color.with_opacity(COORDS_OPACITY),
        };
        ops.push(text_op(
            TextRole::Coordinates,
            format_coordinates(center),
            &coords,
            Point::new(w * 0.5, h * COORDS_Y_RATIO),
            TextAlign::Center,
            TextBaseline::Middle,
        ));
    }

    let footer = TextStyle {
        families: &body,
        size_px: ATTRIBUTION_FONT_BASE_PX * scale,
        weight: 300.0,
        color: color.with_opacity(FOOTER_OPACITY),
    };
    let footer_y = h * (1.0 - EDGE_MARGIN_RATIO);
    ops.push(text_op(
        TextRole::Attribution,
        ATTRIBUTION_TEXT.to_owned(),
        &footer,
        Point::new(w * (1.0 - EDGE_MARGIN_RATIO), footer_y),
        TextAlign::Right,
        TextBaseline::Bottom,
    ));
    if opts.include_credits {
        let credit = opts
            .credit_text
            .clone()
            .unwrap_or_else(|| DEFAULT_CREDIT_TEXT.to_owned());
        ops.push(text_op(
            TextRole::Credit,
            credit,
            &footer,
            Point::new(w * EDGE_MARGIN_RATIO, footer_y),
            TextAlign::Left,
            TextBaseline::Bottom,
        ));
    }
    ops
}

#[cfg(test)]
#[path = "../../tests/unit/compose/typography.rs"]
mod tests;
