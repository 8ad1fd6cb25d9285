//! Font metrics for the scratch workspace
//!
//! Icons are scaled into the em square on import and back out on export, so
//! the workspace only needs the vertical metrics.

use norad::Font;

/// Vertical metrics of the scratch font
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FontMetrics {
    pub units_per_em: f64,
    pub ascender: f64,
    pub descender: f64,
}

impl Default for FontMetrics {
    fn default() -> Self {
        Self {
            units_per_em: 1000.0,
            ascender: 800.0,
            descender: -200.0,
        }
    }
}

impl FontMetrics {
    /// Extract metrics from a norad Font, falling back to defaults
    pub fn from_norad_font(font: &Font) -> Self {
        let defaults = Self::default();
        let units_per_em = font
            .font_info
            .units_per_em
            .map(|v| v.as_f64())
            .unwrap_or(defaults.units_per_em);

        Self {
            units_per_em,
            ascender: font.font_info.ascender.unwrap_or(defaults.ascender),
            descender: font.font_info.descender.unwrap_or(defaults.descender),
        }
    }

    /// Convert to norad FontInfo
    pub fn to_norad_font_info(&self) -> norad::FontInfo {
        let mut info = norad::FontInfo::default();
        info.family_name = Some("outlinefix".to_string());
        info.style_name = Some("Regular".to_string());

        if let Some(units_per_em) =
            norad::fontinfo::NonNegativeIntegerOrFloat::new(self.units_per_em)
        {
            info.units_per_em = Some(units_per_em);
        }
        info.ascender = Some(self.ascender);
        info.descender = Some(self.descender);
        info
    }
}
