use std::collections::{BTreeMap, HashMap, HashSet};
use std::sync::Arc;

use crate::compose::typography::{BODY_FALLBACK_FAMILY, TITLE_FALLBACK_FAMILY};
use crate::foundation::error::{PosterError, PosterResult};

/// Straight-alpha RGBA8 brush color used by Parley text layout.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub(crate) struct TextBrushRgba8 {
    pub(crate) r: u8,
    pub(crate) g: u8,
    pub(crate) b: u8,
    pub(crate) a: u8,
}

/// Font bytes keyed by family name, supplied by whoever loads fonts.
///
/// Lookups are case-insensitive. One face per family; registering a family twice replaces it.
#[derive(Clone, Debug, Default)]
pub struct FontBook {
    fonts: BTreeMap<String, (String, Arc<Vec<u8>>)>,
}

impl FontBook {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, family: impl Into<String>, bytes: Vec<u8>) -> PosterResult<()> {
        let family = family.into();
        let name = family.trim();
        if name.is_empty() {
            return Err(PosterError::validation("font family name must be non-empty"));
        }
        if bytes.is_empty() {
            return Err(PosterError::validation(format!(
                "font '{name}' has no bytes"
            )));
        }
        self.fonts.insert(
            name.to_lowercase(),
            (name.to_owned(), Arc::new(bytes)),
        );
        Ok(())
    }

    /// Builder-style [`FontBook::insert`].
    pub fn with_font(mut self, family: impl Into<String>, bytes: Vec<u8>) -> PosterResult<Self> {
        self.insert(family, bytes)?;
        Ok(self)
    }

    pub fn contains(&self, family: &str) -> bool {
        self.fonts.contains_key(&family.trim().to_lowercase())
    }

    pub fn len(&self) -> usize {
        self.fonts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fonts.is_empty()
    }

    /// Registered family names, sorted case-insensitively.
    pub fn families(&self) -> Vec<&str> {
        self.fonts.values().map(|(name, _)| name.as_str()).collect()
    }

    /// First available face for `families`, then the title and body defaults, then any
    /// registered face.
    pub fn resolve(&self, families: &[String]) -> Option<(&str, &Arc<Vec<u8>>)> {
        self.candidates(families).into_iter().next()
    }

    /// Every registered face in resolution order, without repeats.
    pub(crate) fn candidates(&self, families: &[String]) -> Vec<(&str, &Arc<Vec<u8>>)> {
        let mut keys: Vec<String> = Vec::new();
        let requested = families
            .iter()
            .map(String::as_str)
            .chain([TITLE_FALLBACK_FAMILY, BODY_FALLBACK_FAMILY])
            .map(|f| f.trim().to_lowercase())
            .filter(|k| self.fonts.contains_key(k));
        for key in requested.chain(self.fonts.keys().cloned()) {
            if !keys.contains(&key) {
                keys.push(key);
            }
        }
        keys.iter()
            .filter_map(|k| self.fonts.get(k))
            .map(|(name, bytes)| (name.as_str(), bytes))
            .collect()
    }
}

/// Stateful helper for building Parley text layouts from registered font bytes.
pub(crate) struct TextLayoutEngine {
    font_ctx: parley::FontContext,
    layout_ctx: parley::LayoutContext<TextBrushRgba8>,
    /// Book family -> family name Parley registered for those bytes.
    registered: HashMap<String, String>,
    /// Book families whose bytes Parley could not load.
    rejected: HashSet<String>,
}

impl Default for TextLayoutEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl TextLayoutEngine {
    pub(crate) fn new() -> Self {
        Self {
            font_ctx: parley::FontContext::default(),
            layout_ctx: parley::LayoutContext::new(),
            registered: HashMap::new(),
            rejected: HashSet::new(),
        }
    }

    /// Parley family name for `family`, registering its bytes on first use.
    pub(crate) fn family_name(
        &mut self,
        family: &str,
        font_bytes: &[u8],
    ) -> PosterResult<String> {
        if let Some(name) = self.registered.get(family) {
            return Ok(name.clone());
        }
        let no_family =
            || PosterError::validation(format!("no font families registered for '{family}'"));
        if self.rejected.contains(family) {
            return Err(no_family());
        }
        let families = self
            .font_ctx
            .collection
            .register_fonts(parley::fontique::Blob::from(font_bytes.to_vec()), None);
        let Some(family_id) = families.first().map(|(id, _)| *id) else {
            self.rejected.insert(family.to_owned());
            return Err(no_family());
        };
        let name = self
            .font_ctx
            .collection
            .family_name(family_id)
            .ok_or_else(|| PosterError::validation("registered font family has no name"))?
            .to_string();
        self.registered.insert(family.to_owned(), name.clone());
        Ok(name)
    }

    /// Shape a single unwrapped line of text.
    pub(crate) fn layout_line(
        &mut self,
        family: &str,
        font_bytes: &[u8],
        text: &str,
        size_px: f32,
        weight: f32,
        brush: TextBrushRgba8,
    ) -> PosterResult<parley::Layout<TextBrushRgba8>> {
        if !size_px.is_finite() || size_px <= 0.0 {
            return Err(PosterError::validation(
                "text size_px must be finite and > 0",
            ));
        }
        let family_name = self.family_name(family, font_bytes)?;

        let mut builder = self
            .layout_ctx
            .ranged_builder(&mut self.font_ctx, text, 1.0, true);
        builder.push_default(parley::style::StyleProperty::FontStack(
            parley::style::FontStack::Source(std::borrow::Cow::Owned(family_name)),
        ));
        builder.push_default(parley::style::StyleProperty::FontSize(size_px));
        builder.push_default(parley::style::StyleProperty::FontWeight(
            parley::style::FontWeight::new(weight),
        ));
        builder.push_default(parley::style::StyleProperty::Brush(brush));

        let mut layout: parley::Layout<TextBrushRgba8> = builder.build(text);
        layout.break_all_lines(None);
        Ok(layout)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/text.rs"]
mod tests;
