//! Font descriptor for text rendering.

use crate::style::{FontStyle, FontWeight};

/// Font configuration for text rendering.
///
/// Built from the painter's current state each time text is drawn and turned
/// into a Pango font description.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FontDescriptor {
    /// Font family name (e.g., "Arial", "Monospace")
    pub family: String,
    /// Size in pixels
    pub size: i32,
    pub weight: FontWeight,
    pub style: FontStyle,
}

impl FontDescriptor {
    pub fn new(family: impl Into<String>, size: i32, weight: FontWeight, style: FontStyle) -> Self {
        Self {
            family: family.into(),
            size,
            weight,
            style,
        }
    }

    /// Converts this font descriptor to a Pango font description string.
    ///
    /// Format: "Family, Style Weight Sizepx"
    /// Example: "Arial, Bold 12px" or "Monospace, Italic 24px"
    ///
    /// Underline and strikethrough are not part of the description; they are
    /// applied as layout attributes.
    pub fn to_pango_string(&self) -> String {
        let mut parts = vec![format!("{},", self.family)];

        match self.style {
            FontStyle::Italic => parts.push("Italic".to_string()),
            FontStyle::Oblique => parts.push("Oblique".to_string()),
            _ => {}
        }

        let weight = pango_weight_name(self.weight.numeric());
        if !weight.is_empty() {
            parts.push(weight.to_string());
        }

        parts.push(format!("{}px", self.size.max(1)));
        parts.join(" ")
    }
}

/// Pango keyword for a CSS numeric weight; empty for the regular weight.
fn pango_weight_name(weight: u16) -> &'static str {
    match weight {
        0..=149 => "Thin",
        150..=249 => "Ultra-Light",
        250..=349 => "Light",
        350..=449 => "",
        450..=549 => "Medium",
        550..=649 => "Semi-Bold",
        650..=749 => "Bold",
        750..=849 => "Ultra-Bold",
        _ => "Heavy",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pango_string_default() {
        let font = FontDescriptor::new("Arial", 12, FontWeight::Normal, FontStyle::Normal);
        assert_eq!(font.to_pango_string(), "Arial, 12px");
    }

    #[test]
    fn test_pango_string_italic_bold() {
        let font = FontDescriptor::new("Monospace", 24, FontWeight::Bold, FontStyle::Italic);
        assert_eq!(font.to_pango_string(), "Monospace, Italic Bold 24px");
    }

    #[test]
    fn test_pango_string_numeric_weight() {
        let font = FontDescriptor::new("Sans", 16, FontWeight::Numeric(300), FontStyle::Underline);
        assert_eq!(font.to_pango_string(), "Sans, Light 16px");
    }
}
