use std::collections::BTreeMap;

const DEFAULT_HIGHWAY: &str = "unclassified";

/// Typed view over an element's OSM tags.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TagMap(BTreeMap<String, String>);

impl TagMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.0.insert(key.into(), value.into());
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).map(String::as_str)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Normalized `highway` value, or `None` when the tag is absent or empty.
    ///
    /// Multi-valued tags (`"primary;secondary"`) keep their first entry.
    pub fn highway(&self) -> Option<String> {
        let raw = self.get("highway")?;
        if raw.is_empty() {
            return None;
        }
        Some(normalize_highway(raw))
    }

    /// `building=*` with any value other than `no`.
    pub fn has_building_tag(&self) -> bool {
        self.get("building")
            .is_some_and(|v| !v.trim().eq_ignore_ascii_case("no"))
    }

    pub fn has_water_tags(&self) -> bool {
        matches!(self.get("natural"), Some("water" | "bay" | "strait"))
            || self.get("waterway") == Some("riverbank")
    }

    pub fn has_park_tags(&self) -> bool {
        self.get("leisure") == Some("park") || self.get("landuse") == Some("grass")
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for TagMap {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }
}

/// First entry of a `;`-separated highway value, trimmed; blank input yields `unclassified`.
pub fn normalize_highway(raw: &str) -> String {
    if raw.trim().is_empty() {
        return DEFAULT_HIGHWAY.to_owned();
    }
    raw.split(';').next().unwrap_or(raw).trim().to_owned()
}

#[cfg(test)]
#[path = "../../tests/unit/features/tags.rs"]
mod tests;
