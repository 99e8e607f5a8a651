//! Pushing a parsed [`Style`] onto a painter.

use super::{FontStyle, FontWeight, Style, TextAlign};
use crate::backend::Painter;
use crate::error::StyleError;

/// Base size used when a font size is given as a percentage.
pub const BASE_FONT_SIZE: f64 = 16.0;

/// Applies every set field of `style` to the painter's matching setter.
///
/// Unset fields leave the painter state untouched, so an all-unset style makes
/// no setter calls at all. Keyword fields that do not name a known value
/// (e.g. `text-align: justify`) are skipped as if unset.
///
/// # Errors
/// Returns [`StyleError::NumberFormat`] when the font size is not a bare
/// integer, an integer with `px`, or a percentage. Setters for fields applied
/// before the font size have already run at that point.
pub fn apply_style(painter: &mut dyn Painter, style: &Style) -> Result<(), StyleError> {
    if let Some(color) = &style.color {
        painter.set_fill(color);
    }
    if let Some(align) = keyword::<TextAlign>(style.text_align.as_deref()) {
        painter.set_text_align(align);
    }
    if let Some(family) = &style.font_family {
        painter.set_font_family(family);
    }
    if let Some(size) = &style.font_size {
        painter.set_font_size(parse_font_size(size)?);
    }
    if let Some(weight) = keyword::<FontWeight>(style.font_weight.as_deref()) {
        painter.set_font_weight(weight);
    }
    if let Some(font_style) = keyword::<FontStyle>(style.font_style.as_deref()) {
        painter.set_font_style(font_style);
    }
    Ok(())
}

fn keyword<T: std::str::FromStr>(value: Option<&str>) -> Option<T> {
    let value = value?;
    match value.parse() {
        Ok(parsed) => Some(parsed),
        Err(_) => {
            log::debug!("Ignoring unrecognized style keyword '{}'", value);
            None
        }
    }
}

/// Converts a font size with optional unit to whole pixels.
///
/// - `"16px"` → 16
/// - `"50%"` → `round(0.5 * 16)` = 8
/// - `"16"` → 16
///
/// # Errors
/// Any other unit or non-numeric text fails with [`StyleError::NumberFormat`].
pub fn parse_font_size(text: &str) -> Result<i32, StyleError> {
    let trimmed = text.trim().to_ascii_lowercase();
    let number_format = || StyleError::NumberFormat(text.to_string());

    if let Some(pixels) = trimmed.strip_suffix("px") {
        return pixels.trim().parse::<i32>().map_err(|_| number_format());
    }

    if let Some(percent) = trimmed.strip_suffix('%') {
        let fraction = percent
            .trim()
            .parse::<f64>()
            .ok()
            .filter(|p| p.is_finite())
            .ok_or_else(number_format)?
            / 100.0;
        return Ok((fraction * BASE_FONT_SIZE).round() as i32);
    }

    trimmed.parse::<i32>().map_err(|_| number_format())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::testing::{Call, RecordingPainter};
    use crate::style::parse;

    #[test]
    fn font_size_units() {
        assert_eq!(parse_font_size("16px"), Ok(16));
        assert_eq!(parse_font_size(" 20 PX "), Ok(20));
        assert_eq!(parse_font_size("50%"), Ok(8));
        assert_eq!(parse_font_size("120%"), Ok(19));
        assert_eq!(parse_font_size("16"), Ok(16));
    }

    #[test]
    fn unsupported_font_size_units_fail() {
        assert_eq!(
            parse_font_size("16rem"),
            Err(StyleError::NumberFormat("16rem".to_string()))
        );
        assert!(parse_font_size("big").is_err());
        assert!(parse_font_size("px").is_err());
        assert!(parse_font_size("%").is_err());
    }

    #[test]
    fn unset_style_makes_no_setter_calls() {
        let mut painter = RecordingPainter::default();
        apply_style(&mut painter, &Style::default()).unwrap();
        assert!(painter.calls.is_empty());
    }

    #[test]
    fn full_style_calls_every_setter() {
        let mut painter = RecordingPainter::default();
        let style = parse(Some(
            "color: red; text-align: center; font-family: Arial; font-size: 16px; \
             font-weight: bold; font-style: italic",
        ));
        apply_style(&mut painter, &style).unwrap();

        assert_eq!(
            painter.calls,
            vec![
                Call::SetFill("red".to_string()),
                Call::SetTextAlign(TextAlign::Center),
                Call::SetFontFamily("Arial".to_string()),
                Call::SetFontSize(16),
                Call::SetFontWeight(FontWeight::Bold),
                Call::SetFontStyle(FontStyle::Italic),
            ]
        );
        assert_eq!(painter.state.font_size, 16);
        assert_eq!(painter.state.fill_color, "red");
    }

    #[test]
    fn bad_font_size_propagates() {
        let mut painter = RecordingPainter::default();
        let style = parse(Some("font-size: 16rem"));
        assert!(matches!(
            apply_style(&mut painter, &style),
            Err(StyleError::NumberFormat(_))
        ));
    }

    #[test]
    fn unknown_keywords_are_skipped() {
        let mut painter = RecordingPainter::default();
        let style = parse(Some("text-align: justify; font-weight: chunky"));
        apply_style(&mut painter, &style).unwrap();
        assert!(painter.calls.is_empty());
    }
}
