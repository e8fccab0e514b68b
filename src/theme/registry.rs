use std::collections::BTreeMap;

use crate::foundation::error::{PosterError, PosterResult};
use crate::theme::color::parse_hex_rgba;
use crate::theme::resolve::{
    ColorKey, RawTheme, ResolvedTheme, resolve_theme, resolve_theme_color_strict,
};

const BUILTIN_THEMES_JSON: &str = include_str!("themes.json");

pub const DEFAULT_THEME_ID: &str = "midnight_blue";

/// Listing order for known theme ids; unlisted ids follow alphabetically.
pub const PREFERRED_THEME_ORDER: [&str; 9] = [
    "midnight_blue",
    "terracotta",
    "neon_cyberpunk",
    "coral",
    "heatwave",
    "ruby",
    "sage",
    "copper",
    "rustic",
];

/// Keys shown as a theme's swatch strip.
pub const DISPLAY_PALETTE_KEYS: [ColorKey; 8] = [
    ColorKey::Bg,
    ColorKey::Water,
    ColorKey::Parks,
    ColorKey::RoadMotorway,
    ColorKey::RoadPrimary,
    ColorKey::RoadSecondary,
    ColorKey::RoadTertiary,
    ColorKey::Text,
];

#[derive(Debug, serde::Deserialize)]
struct ThemesManifest {
    #[serde(default)]
    themes: BTreeMap<String, RawTheme>,
}

/// Listing entry for a theme.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct ThemeOption {
    pub id: String,
    pub name: String,
    pub description: String,
    pub palette: Vec<String>,
}

/// Immutable set of raw themes, passed explicitly to whoever needs theme lookups.
#[derive(Clone, Debug)]
pub struct ThemeRegistry {
    themes: BTreeMap<String, RawTheme>,
    order: Vec<String>,
    default_id: String,
    fallback: ResolvedTheme,
}

impl ThemeRegistry {
    /// Registry over the themes compiled into the crate.
    pub fn builtin() -> PosterResult<Self> {
        Self::from_json(BUILTIN_THEMES_JSON)
    }

    /// Parse a `{"themes": {id: {...}}}` manifest.
    pub fn from_json(json: &str) -> PosterResult<Self> {
        let manifest: ThemesManifest = serde_json::from_str(json)
            .map_err(|e| PosterError::serde(format!("theme manifest: {e}")))?;
        Ok(Self::from_themes(manifest.themes))
    }

    pub fn from_themes(themes: BTreeMap<String, RawTheme>) -> Self {
        let mut order: Vec<String> = PREFERRED_THEME_ORDER
            .iter()
            .filter(|id| themes.contains_key(**id))
            .map(|id| (*id).to_owned())
            .collect();
        order.extend(
            themes
                .keys()
                .filter(|id| !PREFERRED_THEME_ORDER.contains(&id.as_str()))
                .cloned(),
        );

        let default_id = if themes.contains_key(DEFAULT_THEME_ID) {
            DEFAULT_THEME_ID.to_owned()
        } else {
            order
                .first()
                .cloned()
                .unwrap_or_else(|| DEFAULT_THEME_ID.to_owned())
        };

        Self {
            themes,
            order,
            default_id,
            fallback: ResolvedTheme::fallback(),
        }
    }

    pub fn theme_ids(&self) -> &[String] {
        &self.order
    }

    pub fn default_id(&self) -> &str {
        &self.default_id
    }

    pub fn contains(&self, id: &str) -> bool {
        self.themes.contains_key(id)
    }

    pub fn raw(&self, id: &str) -> Option<&RawTheme> {
        self.themes.get(id)
    }

    /// Resolve `id`; unknown ids use the default theme, then the built-in fallback palette.
    pub fn get(&self, id: &str) -> ResolvedTheme {
        match self.themes.get(id).or_else(|| self.themes.get(&self.default_id)) {
            Some(raw) => resolve_theme(raw, &self.fallback),
            None => self.fallback.clone(),
        }
    }

    /// Resolve `id` with user color overrides layered over the raw theme.
    ///
    /// Override values may be hex literals or `$key` aliases into the same theme; unknown keys and
    /// values that do not resolve are rejected.
    pub fn get_with_overrides(
        &self,
        id: &str,
        overrides: &BTreeMap<String, String>,
    ) -> PosterResult<ResolvedTheme> {
        if overrides.is_empty() {
            return Ok(self.get(id));
        }
        let mut raw = self
            .themes
            .get(id)
            .or_else(|| self.themes.get(&self.default_id))
            .cloned()
            .unwrap_or_default();
        for (key, value) in overrides {
            if ColorKey::parse(key).is_none() {
                return Err(PosterError::validation(format!(
                    "unknown theme color key '{key}'"
                )));
            }
            raw.set(key.clone(), value.trim());
        }
        for key in overrides.keys() {
            resolve_theme_color_strict(&raw, key)?;
        }
        Ok(resolve_theme(&raw, &self.fallback))
    }

    /// Listing entries in display order.
    pub fn options(&self) -> Vec<ThemeOption> {
        self.order
            .iter()
            .filter_map(|id| {
                let raw = self.themes.get(id)?;
                Some(ThemeOption {
                    id: id.clone(),
                    name: raw.name().unwrap_or(id).to_owned(),
                    description: raw.description().unwrap_or_default().to_owned(),
                    palette: theme_palette(&resolve_theme(raw, &self.fallback)),
                })
            })
            .collect()
    }
}

/// Swatch colors for `theme` in [`DISPLAY_PALETTE_KEYS`] order.
pub fn theme_palette(theme: &ResolvedTheme) -> Vec<String> {
    DISPLAY_PALETTE_KEYS
        .iter()
        .filter_map(|&k| theme.color(k))
        .filter(|c| parse_hex_rgba(c).is_some())
        .map(str::to_owned)
        .collect()
}

#[cfg(test)]
#[path = "../../tests/unit/theme/registry.rs"]
mod tests;
