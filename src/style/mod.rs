//! Style strings for text elements.
//!
//! A style string such as `color: red; font-size: 120%` is parsed into a
//! [`Style`] record of optional raw values. Values stay unparsed until they
//! are pushed onto a painter with [`apply_style`], so a bad font size only
//! surfaces when the text is drawn.

pub mod apply;
pub mod parser;
pub mod text;

pub use apply::{apply_style, parse_font_size};
pub use parser::parse;
pub use text::{FontStyle, FontWeight, TextAlign};

/// Parsed style record. `None` means "leave the backend state alone".
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Style {
    /// Text fill color (CSS color text)
    pub color: Option<String>,
    /// `left`, `center` or `right`
    pub text_align: Option<String>,
    /// Font family name
    pub font_family: Option<String>,
    /// Size with optional unit, e.g. `16px`, `120%`, `12`
    pub font_size: Option<String>,
    /// Weight keyword or number
    pub font_weight: Option<String>,
    /// Style keyword
    pub font_style: Option<String>,
}

impl Style {
    /// Returns `true` when no field is set.
    pub fn is_unset(&self) -> bool {
        self == &Self::default()
    }
}
