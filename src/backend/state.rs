//! Mirrored drawing state held by every painter.

use crate::style::{FontStyle, FontWeight, TextAlign};

/// Fill and stroke color applied after a reset
pub const DEFAULT_COLOR: &str = "black";
/// Font family applied after a reset
pub const DEFAULT_FONT_FAMILY: &str = "Arial";
/// Font size (pixels) applied after a reset
pub const DEFAULT_FONT_SIZE: i32 = 12;

/// Current style of a painter.
///
/// Every painter setter mirrors its value here, so [`GraphicsState::clone`]
/// is the save operation and assigning a saved copy back is the restore.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GraphicsState {
    pub fill_color: String,
    pub stroke_color: String,
    pub line_width: u32,
    pub font_family: String,
    pub font_size: i32,
    pub font_weight: FontWeight,
    pub font_style: FontStyle,
    pub text_align: TextAlign,
}

impl Default for GraphicsState {
    fn default() -> Self {
        Self {
            fill_color: DEFAULT_COLOR.to_string(),
            stroke_color: DEFAULT_COLOR.to_string(),
            line_width: 0,
            font_family: DEFAULT_FONT_FAMILY.to_string(),
            font_size: DEFAULT_FONT_SIZE,
            font_weight: FontWeight::Normal,
            font_style: FontStyle::Normal,
            text_align: TextAlign::Left,
        }
    }
}

impl GraphicsState {
    /// Overwrites this state with a previously saved snapshot.
    pub fn restore(&mut self, snapshot: &GraphicsState) {
        self.clone_from(snapshot);
    }

    /// Returns to the fixed defaults.
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_black_arial_left() {
        let state = GraphicsState::default();
        assert_eq!(state.fill_color, "black");
        assert_eq!(state.stroke_color, "black");
        assert_eq!(state.line_width, 0);
        assert_eq!(state.font_family, "Arial");
        assert_eq!(state.font_size, 12);
        assert_eq!(state.text_align, TextAlign::Left);
    }

    #[test]
    fn snapshot_is_independent_of_later_changes() {
        let mut state = GraphicsState::default();
        state.fill_color = "blue".to_string();
        state.font_size = 16;
        let snapshot = state.clone();

        state.fill_color = "red".to_string();
        state.text_align = TextAlign::Right;
        state.restore(&snapshot);

        assert_eq!(state.fill_color, "blue");
        assert_eq!(state.font_size, 16);
        assert_eq!(state.text_align, TextAlign::Left);
    }

    #[test]
    fn reset_restores_every_field() {
        let mut state = GraphicsState::default();
        state.fill_color = "blue".to_string();
        state.font_size = 16;
        state.font_weight = FontWeight::Bold;
        state.text_align = TextAlign::Center;
        state.reset();
        assert_eq!(state, GraphicsState::default());
    }
}
