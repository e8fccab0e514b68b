use std::collections::HashSet;

use crate::theme::color::{HslShift, normalize_hex_color, shift_hex_color, to_unique_hex_colors};

pub const MAX_SUGGESTED: usize = 10;
pub const MAX_MORE: usize = 15;

/// Darken-to-lighten sweep applied to the seed color.
const SUGGESTED_PROFILES: [HslShift; 10] = [
    HslShift::sl(-0.24, 0.33),
    HslShift::sl(-0.18, 0.25),
    HslShift::sl(-0.12, 0.18),
    HslShift::sl(-0.06, 0.1),
    HslShift::sl(0.0, 0.0),
    HslShift::sl(0.04, -0.08),
    HslShift::sl(0.08, -0.15),
    HslShift::sl(0.12, -0.22),
    HslShift::sl(0.16, -0.29),
    HslShift::sl(0.2, -0.36),
];

const HUE_OFFSETS: [f64; 5] = [-0.08, -0.04, 0.0, 0.04, 0.08];

const TONE_PROFILES: [HslShift; 3] = [
    HslShift::sl(-0.1, 0.2),
    HslShift::sl(0.0, 0.0),
    HslShift::sl(0.12, -0.2),
];

/// Swatches offered for a single theme slot.
#[derive(Clone, Debug, Default, PartialEq, Eq, serde::Serialize)]
pub struct ColorChoices {
    pub suggested: Vec<String>,
    pub more: Vec<String>,
}

#[derive(Default)]
struct Swatches {
    colors: Vec<String>,
    seen: HashSet<String>,
}

impl Swatches {
    fn push(&mut self, color: Option<String>, exclude: &HashSet<String>) {
        let Some(c) = color.as_deref().and_then(normalize_hex_color) else {
            return;
        };
        if exclude.contains(&c) || !self.seen.insert(c.clone()) {
            return;
        }
        self.colors.push(c);
    }
}

/// Build the suggested (up to 10) and extended (up to 15) swatches around `current`.
///
/// The seed is `current` when it is a valid hex color, else the first palette color. Duplicates
/// are removed by normalized value, and "more" never repeats a suggested swatch.
pub fn build_dynamic_color_choices<S: AsRef<str>>(current: &str, palette: &[S]) -> ColorChoices {
    let palette = to_unique_hex_colors(palette);
    let Some(base) = normalize_hex_color(current).or_else(|| palette.first().cloned()) else {
        return ColorChoices::default();
    };

    let none = HashSet::new();
    let mut suggested = Swatches::default();
    for profile in SUGGESTED_PROFILES {
        suggested.push(shift_hex_color(&base, profile), &none);
    }
    for color in &palette {
        if suggested.colors.len() >= MAX_SUGGESTED {
            break;
        }
        suggested.push(Some(color.clone()), &none);
    }

    let mut more = Swatches::default();
    for h in HUE_OFFSETS {
        for tone in TONE_PROFILES {
            more.push(
                shift_hex_color(&base, HslShift { h, ..tone }),
                &suggested.seen,
            );
        }
    }
    for color in &palette {
        if more.colors.len() >= MAX_MORE {
            break;
        }
        more.push(shift_hex_color(color, HslShift::sl(-0.08, 0.18)), &suggested.seen);
        more.push(Some(color.clone()), &suggested.seen);
        more.push(shift_hex_color(color, HslShift::sl(0.08, -0.2)), &suggested.seen);
    }

    suggested.colors.truncate(MAX_SUGGESTED);
    more.colors.truncate(MAX_MORE);
    ColorChoices {
        suggested: suggested.colors,
        more: more.colors,
    }
}

#[cfg(test)]
#[path = "../../tests/unit/theme/suggest.rs"]
mod tests;
