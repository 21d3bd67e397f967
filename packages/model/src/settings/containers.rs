use super::style::{Border, Length, Sides};
use serde::{Deserialize, Serialize};

settings_record! {
    /// Full-width or boxed band that stacks its children vertically
    pub struct SectionSettings {
        /// `full` or `boxed`
        width: String,
        padding: Sides,
        gap: Length,
        /// `none`, `color` or `image`
        background_type: String,
        background_color: String,
        background_image_url: String,
        min_height: Length,
    }
}

settings_record! {
    /// Grid of `column` children; the child count follows `column_count`
    pub struct ColumnsSettings {
        #[serde(deserialize_with = "super::style::count")]
        column_count: u32,
        gap: Length,
        #[serde(deserialize_with = "super::style::flag")]
        stack_on_mobile: bool,
        padding: Sides,
    }
}

settings_record! {
    pub struct ColumnSettings {
        html_tag: String,
        vertical_align: String,
        horizontal_align: String,
        padding: Sides,
        margin: Sides,
        border: Border,
        box_shadow: String,
        /// `classic` (solid color) or `gradient`
        background_type: String,
        background_color: String,
        gradient: Gradient,
        order: Length,
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Gradient {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color1: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color2: Option<String>,
    /// `linear` or `radial`
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub angle: Option<Length>,
}
