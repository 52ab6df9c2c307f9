//! Intensity color lookup and badge glyph rules.

use map_common::{Color, ColorScheme, IntensityColors, IntensityLevel};

/// Maps intensity levels to their resolved colors and badge glyphs.
///
/// Numeric comparison lives on [`IntensityLevel`]; everything about how
/// a level *looks* (colors, glyph layout, label suppression) lives here.
#[derive(Debug, Clone)]
pub struct IntensityColorModel {
    scheme: ColorScheme,
}

/// The glyph content of one badge: a digit plus an optional modifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Glyph {
    pub digit: char,
    pub modifier: Option<Modifier>,
}

/// Sub-level modifier rendering.
///
/// `+` draws as a small superscript glyph; `-` draws as a short
/// horizontal stroke, which stays legible at small icon sizes where a
/// literal minus sign would vanish.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Modifier {
    Plus,
    MinusStroke,
}

impl IntensityColorModel {
    pub fn new(scheme: ColorScheme) -> Self {
        Self { scheme }
    }

    pub fn scheme(&self) -> &ColorScheme {
        &self.scheme
    }

    /// The (fill, text, edge) triple for a level.
    pub fn colors_for(&self, level: IntensityLevel) -> IntensityColors {
        self.scheme.colors_for(level)
    }

    /// Badge border for a level: the bucket's own edge if it defines
    /// one, else the scheme-wide badge edge.
    pub fn edge_for(&self, level: IntensityLevel) -> Color {
        self.colors_for(level).edge.unwrap_or(self.scheme.badge_edge)
    }

    /// The badge glyph for a level. `Unknown` draws no glyph.
    pub fn glyph(&self, level: IntensityLevel) -> Option<Glyph> {
        let label = level.short_label()?;
        let mut chars = label.chars();
        let digit = chars.next()?;
        let modifier = match chars.next() {
            Some('+') => Some(Modifier::Plus),
            Some('-') => Some(Modifier::MinusStroke),
            _ => None,
        };
        Some(Glyph { digit, modifier })
    }

    /// Whether an area of severity `level` gets its display name drawn
    /// next to the badge. Only areas within one ordinal of the request's
    /// maximum are labeled; weaker areas stay unlabeled to avoid clutter.
    pub fn should_label_area(level: IntensityLevel, max: IntensityLevel) -> bool {
        level != IntensityLevel::Unknown && level.ordinal() + 1 >= max.ordinal()
    }
}

impl Default for IntensityColorModel {
    fn default() -> Self {
        Self::new(ColorScheme::dark())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_glyph_rules() {
        let model = IntensityColorModel::default();

        assert_eq!(
            model.glyph(IntensityLevel::Four),
            Some(Glyph {
                digit: '4',
                modifier: None
            })
        );
        assert_eq!(
            model.glyph(IntensityLevel::FiveUpper),
            Some(Glyph {
                digit: '5',
                modifier: Some(Modifier::Plus)
            })
        );
        assert_eq!(
            model.glyph(IntensityLevel::SixLower),
            Some(Glyph {
                digit: '6',
                modifier: Some(Modifier::MinusStroke)
            })
        );
        assert_eq!(model.glyph(IntensityLevel::Unknown), None);
    }

    #[test]
    fn test_label_suppression_within_one_of_max() {
        let max = IntensityLevel::Seven;
        assert!(IntensityColorModel::should_label_area(
            IntensityLevel::Seven,
            max
        ));
        assert!(IntensityColorModel::should_label_area(
            IntensityLevel::SixUpper,
            max
        ));
        assert!(!IntensityColorModel::should_label_area(
            IntensityLevel::SixLower,
            max
        ));
        assert!(!IntensityColorModel::should_label_area(
            IntensityLevel::One,
            max
        ));
    }

    #[test]
    fn test_unknown_never_labeled() {
        assert!(!IntensityColorModel::should_label_area(
            IntensityLevel::Unknown,
            IntensityLevel::One
        ));
    }
}
