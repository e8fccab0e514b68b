use crate::theme::resolve::ResolvedTheme;

/// Style bucket a `highway` value maps to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum RoadClass {
    Motorway,
    Primary,
    Secondary,
    Tertiary,
    Residential,
    Default,
}

/// Resolved stroke parameters for one road class.
#[derive(Clone, Debug, PartialEq)]
pub struct RoadStyle {
    pub color: String,
    pub width: f64,
    pub priority: u8,
}

impl RoadClass {
    /// Map an OSM `highway` value (case and surrounding whitespace ignored) onto a class.
    pub fn from_highway(highway: &str) -> Self {
        match highway.trim().to_ascii_lowercase().as_str() {
            "motorway" | "motorway_link" => Self::Motorway,
            "trunk" | "trunk_link" | "primary" | "primary_link" => Self::Primary,
            "secondary" | "secondary_link" => Self::Secondary,
            "tertiary" | "tertiary_link" => Self::Tertiary,
            "residential" | "living_street" | "unclassified" => Self::Residential,
            _ => Self::Default,
        }
    }

    /// Draw priority; higher paints later.
    pub fn priority(self) -> u8 {
        match self {
            Self::Motorway => 5,
            Self::Primary => 4,
            Self::Secondary => 3,
            Self::Tertiary => 2,
            Self::Residential | Self::Default => 1,
        }
    }

    /// Stroke width in pixels before zoom scaling.
    pub fn base_width(self) -> f64 {
        match self {
            Self::Motorway => 5.2,
            Self::Primary => 4.4,
            Self::Secondary => 3.5,
            Self::Tertiary => 2.7,
            Self::Residential => 2.1,
            Self::Default => 2.4,
        }
    }

    fn theme_color(self, theme: &ResolvedTheme) -> &str {
        match self {
            Self::Motorway => &theme.road_motorway,
            Self::Primary => &theme.road_primary,
            Self::Secondary => &theme.road_secondary,
            Self::Tertiary => &theme.road_tertiary,
            Self::Residential => &theme.road_residential,
            Self::Default => &theme.road_default,
        }
    }

    pub fn style(self, theme: &ResolvedTheme, width_scale: f64) -> RoadStyle {
        let color = [
            self.theme_color(theme),
            theme.road_default.as_str(),
            theme.text.as_str(),
        ]
        .into_iter()
        .find(|c| !c.is_empty())
        .unwrap_or("#111111")
        .to_owned();
        RoadStyle {
            color,
            width: self.base_width() * width_scale,
            priority: self.priority(),
        }
    }
}

/// Zoom factor shared by road and building strokes.
pub fn stroke_width_scale(width: u32, height: u32) -> f64 {
    (f64::from(width.min(height)) / 3600.0).max(0.7)
}

#[cfg(test)]
#[path = "../../tests/unit/compose/road.rs"]
mod tests;
