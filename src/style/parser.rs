//! CSS-like style string parsing.
//!
//! Style strings are loose `key: value` (or `key=value`) pairs separated by
//! `;` or newlines. Values may be single- or double-quoted. The scanner is
//! forgiving: junk between pairs is skipped and unknown keys are ignored.

use super::Style;

/// Parses a style string into a [`Style`] record.
///
/// Never fails: empty or missing input yields an all-unset record.
///
/// # Examples
///
/// ```
/// use easel::style::parse;
/// let style = parse(Some("unknown:value; color: blue;"));
/// assert_eq!(style.color.as_deref(), Some("blue"));
/// assert!(style.font_size.is_none());
/// ```
pub fn parse(text: Option<&str>) -> Style {
    let mut style = Style::default();
    let Some(text) = text.filter(|t| !t.trim().is_empty()) else {
        return style;
    };

    for (key, value) in Pairs::new(text) {
        let value = strip_quotes(value.trim()).to_string();
        match key.to_ascii_lowercase().as_str() {
            "color" | "colour" => style.color = Some(value),
            "font-size" => style.font_size = Some(value),
            "font-weight" => style.font_weight = Some(value),
            "font-family" => style.font_family = Some(value),
            "font-style" => style.font_style = Some(value),
            "text-align" => style.text_align = Some(value),
            other => log::trace!("Ignoring unknown style key '{}'", other),
        }
    }

    style
}

fn is_key_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '-'
}

fn strip_quotes(value: &str) -> &str {
    for quote in ['"', '\''] {
        if value.len() >= 2 && value.starts_with(quote) && value.ends_with(quote) {
            return &value[1..value.len() - 1];
        }
    }
    value
}

/// Iterator over raw `(key, value)` pairs in a style string.
struct Pairs<'a> {
    rest: &'a str,
}

impl<'a> Pairs<'a> {
    fn new(text: &'a str) -> Self {
        Self { rest: text }
    }

    /// Reads the value following a separator; quoted values may span `;`.
    fn take_value(&mut self) -> &'a str {
        let text = self.rest;
        for quote in ['"', '\''] {
            if let Some(after) = text.strip_prefix(quote) {
                if let Some(close) = after.find(quote) {
                    let end = close + 2;
                    self.rest = &text[end..];
                    return &text[..end];
                }
            }
        }
        let end = text.find([';', '\n']).unwrap_or(text.len());
        self.rest = &text[end..];
        &text[..end]
    }
}

impl<'a> Iterator for Pairs<'a> {
    type Item = (&'a str, &'a str);

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let start = self.rest.find(is_key_char)?;
            let text = &self.rest[start..];
            let key_len = text.find(|c: char| !is_key_char(c)).unwrap_or(text.len());
            let key = &text[..key_len];
            let after_key = text[key_len..].trim_start();

            match after_key.strip_prefix([':', '=']) {
                Some(after_sep) => {
                    self.rest = after_sep.trim_start();
                    let value = self.take_value();
                    return Some((key, value));
                }
                None => {
                    // Not a pair; resume scanning after this word.
                    self.rest = &text[key_len..];
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_or_missing_input_is_all_unset() {
        assert!(parse(None).is_unset());
        assert!(parse(Some("")).is_unset());
        assert!(parse(Some("   \n ")).is_unset());
    }

    #[test]
    fn unknown_keys_do_not_affect_the_record() {
        let style = parse(Some("unknown:value; color: blue;"));
        assert_eq!(
            style,
            Style {
                color: Some("blue".to_string()),
                ..Style::default()
            }
        );
    }

    #[test]
    fn equals_separator_and_quotes() {
        let style = parse(Some("colour=\"red\"; font-size: 120%"));
        assert_eq!(style.color.as_deref(), Some("red"));
        assert_eq!(style.font_size.as_deref(), Some("120%"));
    }

    #[test]
    fn single_quotes_and_newline_separators() {
        let style = parse(Some("font-family: 'Comic Sans MS'\ntext-align = center\nfont-weight:bold"));
        assert_eq!(style.font_family.as_deref(), Some("Comic Sans MS"));
        assert_eq!(style.text_align.as_deref(), Some("center"));
        assert_eq!(style.font_weight.as_deref(), Some("bold"));
    }

    #[test]
    fn quoted_values_may_contain_semicolons() {
        let style = parse(Some("font-family: \"a;b\"; font-style: italic"));
        assert_eq!(style.font_family.as_deref(), Some("a;b"));
        assert_eq!(style.font_style.as_deref(), Some("italic"));
    }

    #[test]
    fn values_are_trimmed() {
        let style = parse(Some("color :   green   ;font-size:16px"));
        assert_eq!(style.color.as_deref(), Some("green"));
        assert_eq!(style.font_size.as_deref(), Some("16px"));
    }

    #[test]
    fn later_pairs_override_earlier_ones() {
        let style = parse(Some("color: red; colour: blue"));
        assert_eq!(style.color.as_deref(), Some("blue"));
    }

    #[test]
    fn junk_between_pairs_is_skipped() {
        let style = parse(Some("hello there color: red"));
        assert_eq!(style.color.as_deref(), Some("red"));
    }
}
