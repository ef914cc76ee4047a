//! Engine configuration.
//!
//! Everything here has a sensible default; hosts usually override only a
//! couple of colors. The CLI reads it from a JSON file with `--config`.

use serde::{Deserialize, Serialize};

use crate::ColorValue;

/// Layout and presentation settings shared by every block of a document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
    /// Inset between the document edge and its top-level blocks.
    pub document_inset: f32,
    /// Vertical gap between top-level blocks.
    pub document_gap: f32,
    /// Font size used for labels and inline text.
    pub font_size: f32,
    /// Default text color.
    pub text_color: ColorValue,
    /// Text shown by a placeholder while its content is pending.
    pub loading_text: String,
    /// Color of the loading text.
    pub loading_color: ColorValue,
    /// Color of the error line a failed placeholder shows.
    pub error_color: ColorValue,
    /// Total height of a thematic break, line included.
    pub thematic_break_height: f32,
    /// Color of the thematic break line.
    pub thematic_break_color: ColorValue,
    /// Background of an occupied or empty item slot.
    pub slot_background: ColorValue,
    /// Background drawn for absent cells of a slot grid.
    pub empty_slot_background: ColorValue,
    /// Background behind an embedded scene.
    pub scene_background: ColorValue,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            document_inset: 5.0,
            document_gap: 0.0,
            font_size: 9.0,
            text_color: ColorValue::rgb(0xe0, 0xe0, 0xe0),
            loading_text: "Loading...".to_string(),
            loading_color: ColorValue::rgb(0xa0, 0xa0, 0xa0),
            error_color: ColorValue::rgb(0xff, 0x55, 0x55),
            thematic_break_height: 6.0,
            thematic_break_color: ColorValue::rgb(0x55, 0x55, 0x55),
            slot_background: ColorValue::rgb(0x8b, 0x8b, 0x8b),
            empty_slot_background: ColorValue::rgba(0x8b, 0x8b, 0x8b, 0x80),
            scene_background: ColorValue::rgba(0, 0, 0, 0x40),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_json_keeps_defaults() {
        let config: LayoutConfig =
            serde_json::from_str(r##"{ "document_inset": 8, "error_color": "red" }"##)
                .unwrap();
        assert!((config.document_inset - 8.0).abs() < f32::EPSILON);
        assert_eq!(config.error_color, ColorValue::rgb(255, 0, 0));
        assert_eq!(config.loading_text, LayoutConfig::default().loading_text);
    }
}
