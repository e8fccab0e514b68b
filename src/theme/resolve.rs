use std::collections::{BTreeMap, BTreeSet};

use crate::foundation::error::{PosterError, PosterResult};
use crate::theme::color::parse_hex_rgba;

/// Color slots a theme can define.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ColorKey {
    Bg,
    Text,
    GradientColor,
    Water,
    Parks,
    Building,
    BuildingStroke,
    RoadMotorway,
    RoadPrimary,
    RoadSecondary,
    RoadTertiary,
    RoadResidential,
    RoadDefault,
}

impl ColorKey {
    pub const ALL: [ColorKey; 13] = [
        ColorKey::Bg,
        ColorKey::Text,
        ColorKey::GradientColor,
        ColorKey::Water,
        ColorKey::Parks,
        ColorKey::Building,
        ColorKey::BuildingStroke,
        ColorKey::RoadMotorway,
        ColorKey::RoadPrimary,
        ColorKey::RoadSecondary,
        ColorKey::RoadTertiary,
        ColorKey::RoadResidential,
        ColorKey::RoadDefault,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            ColorKey::Bg => "bg",
            ColorKey::Text => "text",
            ColorKey::GradientColor => "gradient_color",
            ColorKey::Water => "water",
            ColorKey::Parks => "parks",
            ColorKey::Building => "building",
            ColorKey::BuildingStroke => "building_stroke",
            ColorKey::RoadMotorway => "road_motorway",
            ColorKey::RoadPrimary => "road_primary",
            ColorKey::RoadSecondary => "road_secondary",
            ColorKey::RoadTertiary => "road_tertiary",
            ColorKey::RoadResidential => "road_residential",
            ColorKey::RoadDefault => "road_default",
        }
    }

    pub fn parse(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|k| k.as_str() == key)
    }

    /// Keys consulted, in order, when this key does not resolve on its own.
    pub fn fallback_chain(self) -> &'static [ColorKey] {
        use ColorKey::*;
        match self {
            RoadMotorway => &[RoadPrimary, Text],
            RoadPrimary => &[RoadSecondary, Text],
            RoadSecondary => &[RoadPrimary, RoadTertiary, Text],
            RoadTertiary => &[RoadSecondary, RoadResidential, Text],
            RoadResidential => &[RoadTertiary, RoadSecondary, Text],
            RoadDefault => &[RoadTertiary, RoadSecondary, RoadResidential, RoadPrimary, Text],
            GradientColor => &[Bg],
            _ => &[],
        }
    }
}

/// Theme record as authored: values are hex literals or `$key` aliases.
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(transparent)]
pub struct RawTheme(pub BTreeMap<String, String>);

impl RawTheme {
    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).map(String::as_str)
    }

    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.0.insert(key.into(), value.into());
    }

    pub fn name(&self) -> Option<&str> {
        self.get("name")
    }

    pub fn description(&self) -> Option<&str> {
        self.get("description")
    }
}

/// Lower-case hex with 3/4-digit forms expanded, for any valid theme literal.
fn canonical_hex(value: &str) -> Option<String> {
    let [r, g, b, a] = parse_hex_rgba(value)?;
    let digits = value.trim().len() - 1;
    if digits == 4 || digits == 8 {
        Some(format!("#{r:02x}{g:02x}{b:02x}{a:02x}"))
    } else {
        Some(format!("#{r:02x}{g:02x}{b:02x}"))
    }
}

fn alias_target(value: &str) -> Option<&str> {
    let name = value.strip_prefix('$')?;
    let valid = !name.is_empty() && name.bytes().all(|b| b.is_ascii_alphanumeric() || b == b'_');
    valid.then_some(name)
}

/// Follow `$alias` references from `key` until a hex literal is reached.
///
/// `visited` holds keys already on the current chain; revisiting one, pointing at a missing key,
/// or hitting a value that is neither hex nor alias all yield `None`.
pub fn resolve_theme_color(
    theme: &RawTheme,
    key: &str,
    visited: &mut BTreeSet<String>,
) -> Option<String> {
    let value = theme.get(key)?.trim();
    if let Some(hex) = canonical_hex(value) {
        return Some(hex);
    }
    let target = alias_target(value)?;
    if !visited.insert(target.to_owned()) {
        return None;
    }
    resolve_theme_color(theme, target, visited)
}

/// Strict single-key lookup, reporting keys that cannot be resolved.
pub fn resolve_theme_color_strict(theme: &RawTheme, key: &str) -> PosterResult<String> {
    let mut visited = BTreeSet::from([key.to_owned()]);
    resolve_theme_color(theme, key, &mut visited).ok_or_else(|| {
        PosterError::theme_color(format!(
            "'{key}' (value {:?})",
            theme.get(key).unwrap_or("<missing>")
        ))
    })
}

/// Concrete, alias-free color set.
///
/// `building` and `building_stroke` stay optional; the compositor derives them from `bg` and
/// `text` when absent.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct ResolvedTheme {
    pub name: String,
    pub description: String,
    pub bg: String,
    pub text: String,
    pub gradient_color: String,
    pub water: String,
    pub parks: String,
    pub building: Option<String>,
    pub building_stroke: Option<String>,
    pub road_motorway: String,
    pub road_primary: String,
    pub road_secondary: String,
    pub road_tertiary: String,
    pub road_residential: String,
    pub road_default: String,
}

impl ResolvedTheme {
    /// Terminal default: the warm terracotta palette.
    pub fn fallback() -> Self {
        Self {
            name: "Terracotta".to_owned(),
            description: "Mediterranean warmth - burnt orange and clay tones on cream".to_owned(),
            bg: "#f5ede4".to_owned(),
            text: "#8b4513".to_owned(),
            gradient_color: "#f5ede4".to_owned(),
            water: "#a8c4c4".to_owned(),
            parks: "#e8e0d0".to_owned(),
            building: None,
            building_stroke: None,
            road_motorway: "#a0522d".to_owned(),
            road_primary: "#b8653a".to_owned(),
            road_secondary: "#c9846a".to_owned(),
            road_tertiary: "#d9a08a".to_owned(),
            road_residential: "#e5c4b0".to_owned(),
            road_default: "#d9a08a".to_owned(),
        }
    }

    pub fn color(&self, key: ColorKey) -> Option<&str> {
        match key {
            ColorKey::Bg => Some(&self.bg),
            ColorKey::Text => Some(&self.text),
            ColorKey::GradientColor => Some(&self.gradient_color),
            ColorKey::Water => Some(&self.water),
            ColorKey::Parks => Some(&self.parks),
            ColorKey::Building => self.building.as_deref(),
            ColorKey::BuildingStroke => self.building_stroke.as_deref(),
            ColorKey::RoadMotorway => Some(&self.road_motorway),
            ColorKey::RoadPrimary => Some(&self.road_primary),
            ColorKey::RoadSecondary => Some(&self.road_secondary),
            ColorKey::RoadTertiary => Some(&self.road_tertiary),
            ColorKey::RoadResidential => Some(&self.road_residential),
            ColorKey::RoadDefault => Some(&self.road_default),
        }
    }
}

/// Resolve every slot of `raw`.
///
/// Order per key: its own alias chain, then its fallback chain over the theme's own resolved
/// values, then the same slot of `fallback`.
pub fn resolve_theme(raw: &RawTheme, fallback: &ResolvedTheme) -> ResolvedTheme {
    let own: BTreeMap<ColorKey, String> = ColorKey::ALL
        .into_iter()
        .filter_map(|key| {
            let mut visited = BTreeSet::from([key.as_str().to_owned()]);
            resolve_theme_color(raw, key.as_str(), &mut visited).map(|c| (key, c))
        })
        .collect();

    let pick = |key: ColorKey| -> Option<String> {
        own.get(&key).cloned().or_else(|| {
            key.fallback_chain()
                .iter()
                .find_map(|k| own.get(k).cloned())
        })
    };
    let required = |key: ColorKey| -> String {
        pick(key)
            .or_else(|| fallback.color(key).map(str::to_owned))
            .unwrap_or_else(|| fallback.text.clone())
    };

    ResolvedTheme {
        name: raw.name().unwrap_or(&fallback.name).to_owned(),
        description: raw.description().unwrap_or_default().to_owned(),
        bg: required(ColorKey::Bg),
        text: required(ColorKey::Text),
        gradient_color: required(ColorKey::GradientColor),
        water: required(ColorKey::Water),
        parks: required(ColorKey::Parks),
        building: pick(ColorKey::Building),
        building_stroke: pick(ColorKey::BuildingStroke),
        road_motorway: required(ColorKey::RoadMotorway),
        road_primary: required(ColorKey::RoadPrimary),
        road_secondary: required(ColorKey::RoadSecondary),
        road_tertiary: required(ColorKey::RoadTertiary),
        road_residential: required(ColorKey::RoadResidential),
        road_default: required(ColorKey::RoadDefault),
    }
}

#[cfg(test)]
#[path = "../../tests/unit/theme/resolve.rs"]
mod tests;
