use crate::foundation::core::Rgba8Premul;

/// Straight 8-bit RGB triple.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

/// HSL with every component in `[0, 1]` (hue as a fraction of a turn).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Hsl {
    pub h: f64,
    pub s: f64,
    pub l: f64,
}

/// Offsets applied in HSL space by [`shift_hex_color`].
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct HslShift {
    pub h: f64,
    pub s: f64,
    pub l: f64,
}

impl HslShift {
    pub const fn sl(s: f64, l: f64) -> Self {
        Self { h: 0.0, s, l }
    }
}

fn is_hex_digits(s: &str) -> bool {
    !s.is_empty() && s.bytes().all(|b| b.is_ascii_hexdigit())
}

fn expand_short(digits: &str) -> String {
    digits.chars().flat_map(|c| [c, c]).collect()
}

/// Lower-case `#rrggbb` for 6- or 3-digit input (leading `#` required), `None` otherwise.
pub fn normalize_hex_color(color: &str) -> Option<String> {
    let lowered = color.trim().to_ascii_lowercase();
    let digits = lowered.strip_prefix('#')?;
    if !is_hex_digits(digits) {
        return None;
    }
    match digits.len() {
        6 => Some(lowered),
        3 => Some(format!("#{}", expand_short(digits))),
        _ => None,
    }
}

/// Normalize every color, dropping invalid entries and repeats while keeping first-seen order.
pub fn to_unique_hex_colors<S: AsRef<str>>(colors: &[S]) -> Vec<String> {
    let mut seen = std::collections::HashSet::new();
    colors
        .iter()
        .filter_map(|c| normalize_hex_color(c.as_ref()))
        .filter(|c| seen.insert(c.clone()))
        .collect()
}

/// Parse `#rgb` / `#rrggbb` (the `#` is optional, case-insensitive).
pub fn parse_hex(hex: &str) -> Option<Rgb> {
    let trimmed = hex.trim();
    let digits = trimmed.strip_prefix('#').unwrap_or(trimmed);
    let full = match digits.len() {
        3 => expand_short(digits),
        6 => digits.to_owned(),
        _ => return None,
    };
    if !is_hex_digits(&full) {
        return None;
    }
    let value = u32::from_str_radix(&full, 16).ok()?;
    Some(Rgb {
        r: ((value >> 16) & 0xff) as u8,
        g: ((value >> 8) & 0xff) as u8,
        b: (value & 0xff) as u8,
    })
}

/// Parse a theme color (`#rgb`, `#rgba`, `#rrggbb`, `#rrggbbaa`) into straight RGBA8.
pub fn parse_hex_rgba(hex: &str) -> Option<[u8; 4]> {
    let digits = hex.trim().strip_prefix('#')?;
    if !is_hex_digits(digits) {
        return None;
    }
    let full = match digits.len() {
        3 | 4 => expand_short(digits),
        6 | 8 => digits.to_owned(),
        _ => return None,
    };
    let byte = |i: usize| u8::from_str_radix(&full[i..i + 2], 16).ok();
    let a = if full.len() == 8 { byte(6)? } else { 255 };
    Some([byte(0)?, byte(2)?, byte(4)?, a])
}

/// Theme color to premultiplied RGBA8; invalid input falls back to opaque black.
pub fn hex_to_premul(hex: &str) -> Rgba8Premul {
    let [r, g, b, a] = parse_hex_rgba(hex).unwrap_or([0, 0, 0, 255]);
    Rgba8Premul::from_straight_rgba(r, g, b, a)
}

pub fn rgb_to_hex(rgb: Rgb) -> String {
    format!("#{:02x}{:02x}{:02x}", rgb.r, rgb.g, rgb.b)
}

fn channel(v: f64) -> u8 {
    if v.is_nan() {
        return 0;
    }
    v.round().clamp(0.0, 255.0) as u8
}

pub fn rgb_to_hsl(rgb: Rgb) -> Hsl {
    let r = f64::from(rgb.r) / 255.0;
    let g = f64::from(rgb.g) / 255.0;
    let b = f64::from(rgb.b) / 255.0;
    let max = r.max(g).max(b);
    let min = r.min(g).min(b);
    let l = (max + min) / 2.0;
    let delta = max - min;
    if delta == 0.0 {
        return Hsl { h: 0.0, s: 0.0, l };
    }

    let s = if l > 0.5 {
        delta / (2.0 - max - min)
    } else {
        delta / (max + min)
    };
    let h = if max == r {
        (g - b) / delta + if g < b { 6.0 } else { 0.0 }
    } else if max == g {
        (b - r) / delta + 2.0
    } else {
        (r - g) / delta + 4.0
    };
    Hsl { h: h / 6.0, s, l }
}

fn hue_to_rgb(p: f64, q: f64, mut t: f64) -> f64 {
    if t < 0.0 {
        t += 1.0;
    }
    if t > 1.0 {
        t -= 1.0;
    }
    if t < 1.0 / 6.0 {
        return p + (q - p) * 6.0 * t;
    }
    if t < 1.0 / 2.0 {
        return q;
    }
    if t < 2.0 / 3.0 {
        return p + (q - p) * (2.0 / 3.0 - t) * 6.0;
    }
    p
}

/// Hue wraps around the turn; saturation and lightness are clamped to `[0, 1]`.
pub fn hsl_to_rgb(hsl: Hsl) -> Rgb {
    let h = hsl.h.rem_euclid(1.0);
    let s = hsl.s.clamp(0.0, 1.0);
    let l = hsl.l.clamp(0.0, 1.0);

    if s == 0.0 {
        let v = channel(l * 255.0);
        return Rgb { r: v, g: v, b: v };
    }

    let q = if l < 0.5 { l * (1.0 + s) } else { l + s - l * s };
    let p = 2.0 * l - q;
    Rgb {
        r: channel(hue_to_rgb(p, q, h + 1.0 / 3.0) * 255.0),
        g: channel(hue_to_rgb(p, q, h) * 255.0),
        b: channel(hue_to_rgb(p, q, h - 1.0 / 3.0) * 255.0),
    }
}

/// Move `color` in HSL space; `None` when `color` is not a 3/6-digit hex.
pub fn shift_hex_color(color: &str, shift: HslShift) -> Option<String> {
    let hsl = rgb_to_hsl(parse_hex(color)?);
    Some(rgb_to_hex(hsl_to_rgb(Hsl {
        h: hsl.h + shift.h,
        s: (hsl.s + shift.s).clamp(0.0, 1.0),
        l: (hsl.l + shift.l).clamp(0.0, 1.0),
    })))
}

/// CSS `rgba(r, g, b, a)` string; unparseable colors become black.
pub fn with_alpha(hex: &str, alpha: f64) -> String {
    let Rgb { r, g, b } = parse_hex(hex).unwrap_or(Rgb { r: 0, g: 0, b: 0 });
    format!("rgba({r}, {g}, {b}, {alpha})")
}

/// Linear RGB mix from `a` toward `b` by `weight` in `[0, 1]`.
///
/// If only one side parses it is returned unchanged; if neither does the result is `#888888`.
pub fn blend_hex(a: &str, b: &str, weight: f64) -> String {
    let (ca, cb) = match (parse_hex(a), parse_hex(b)) {
        (None, None) => return "#888888".to_owned(),
        (None, Some(_)) => return b.to_owned(),
        (Some(_), None) => return a.to_owned(),
        (Some(ca), Some(cb)) => (ca, cb),
    };
    let t = if weight.is_nan() {
        0.0
    } else {
        weight.clamp(0.0, 1.0)
    };
    let mix = |from: u8, to: u8| channel(f64::from(from) * (1.0 - t) + f64::from(to) * t);
    rgb_to_hex(Rgb {
        r: mix(ca.r, cb.r),
        g: mix(ca.g, cb.g),
        b: mix(ca.b, cb.b),
    })
}

#[cfg(test)]
#[path = "../../tests/unit/theme/color.rs"]
mod tests;
