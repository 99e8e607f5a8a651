//! Text attribute keywords understood by the style engine and backends.

use std::str::FromStr;
use thiserror::Error;

/// Horizontal anchoring of text relative to its x coordinate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TextAlign {
    /// Text starts at x (default)
    #[default]
    Left,
    /// Text is centred on x
    Center,
    /// Text ends at x
    Right,
}

/// CSS font weight keyword or numeric weight.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FontWeight {
    #[default]
    Normal,
    Bold,
    Bolder,
    Lighter,
    /// Numeric weight, one of 100, 200, ... 900
    Numeric(u16),
}

/// CSS-ish font style keyword.
///
/// `underline` and `strikethrough` are accepted here too because beginners
/// reach for `font-style` when they want decorated text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FontStyle {
    #[default]
    Normal,
    Italic,
    Oblique,
    Underline,
    Strikethrough,
}

/// Error returned when a keyword does not name a known text attribute.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown keyword '{0}'")]
pub struct UnknownKeyword(pub String);

impl FromStr for TextAlign {
    type Err = UnknownKeyword;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "left" => Ok(Self::Left),
            "center" | "centre" => Ok(Self::Center),
            "right" => Ok(Self::Right),
            _ => Err(UnknownKeyword(s.to_string())),
        }
    }
}

impl FromStr for FontWeight {
    type Err = UnknownKeyword;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let value = s.trim().to_ascii_lowercase();
        match value.as_str() {
            "normal" => Ok(Self::Normal),
            "bold" => Ok(Self::Bold),
            "bolder" => Ok(Self::Bolder),
            "lighter" => Ok(Self::Lighter),
            _ => match value.parse::<u16>() {
                Ok(weight) if (100..=900).contains(&weight) && weight % 100 == 0 => {
                    Ok(Self::Numeric(weight))
                }
                _ => Err(UnknownKeyword(s.to_string())),
            },
        }
    }
}

impl FromStr for FontStyle {
    type Err = UnknownKeyword;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "normal" => Ok(Self::Normal),
            "italic" => Ok(Self::Italic),
            "oblique" => Ok(Self::Oblique),
            "underline" => Ok(Self::Underline),
            "strikethrough" | "line-through" => Ok(Self::Strikethrough),
            _ => Err(UnknownKeyword(s.to_string())),
        }
    }
}

impl FontWeight {
    /// Numeric CSS weight; relative keywords resolve against normal (400).
    pub fn numeric(self) -> u16 {
        match self {
            Self::Normal => 400,
            Self::Bold | Self::Bolder => 700,
            Self::Lighter => 300,
            Self::Numeric(weight) => weight,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keywords_parse_case_insensitively() {
        assert_eq!("CENTER".parse::<TextAlign>(), Ok(TextAlign::Center));
        assert_eq!(" bold ".parse::<FontWeight>(), Ok(FontWeight::Bold));
        assert_eq!("Italic".parse::<FontStyle>(), Ok(FontStyle::Italic));
    }

    #[test]
    fn numeric_weights_must_be_hundreds() {
        assert_eq!("700".parse::<FontWeight>(), Ok(FontWeight::Numeric(700)));
        assert!("750".parse::<FontWeight>().is_err());
        assert!("1000".parse::<FontWeight>().is_err());
    }

    #[test]
    fn unknown_keywords_are_rejected() {
        assert!("justify".parse::<TextAlign>().is_err());
        assert!("heavy-ish".parse::<FontWeight>().is_err());
        assert!("wavy".parse::<FontStyle>().is_err());

        let err = "justify".parse::<TextAlign>().unwrap_err();
        assert_eq!(err, UnknownKeyword("justify".to_string()));
        assert_eq!(err.to_string(), "unknown keyword 'justify'");
    }
}
