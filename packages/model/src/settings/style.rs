//! Style primitives shared by block settings.
//!
//! Editors write form input straight into settings, so numeric values show up
//! both as JSON numbers and as strings (`16`, `"16"`, `"450px"`, `"100%"`).
//! These types accept either form and keep what they were given.

use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// A CSS length: bare numbers are pixels, text is used as written
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Length {
    Number(f64),
    Text(String),
}

impl Length {
    pub fn px(value: f64) -> Self {
        Length::Number(value)
    }

    /// CSS value, or `None` when the field was left blank
    pub fn to_css(&self) -> Option<String> {
        match self {
            Length::Number(n) => Some(format!("{}px", format_number(*n))),
            Length::Text(text) => {
                let text = text.trim();
                if text.is_empty() {
                    None
                } else if text.parse::<f64>().is_ok() {
                    Some(format!("{}px", text))
                } else {
                    Some(text.to_string())
                }
            }
        }
    }

    /// Unitless value, for properties like `line-height` or `opacity`
    pub fn to_plain(&self) -> Option<String> {
        match self {
            Length::Number(n) => Some(format_number(*n)),
            Length::Text(text) if !text.trim().is_empty() => Some(text.trim().to_string()),
            Length::Text(_) => None,
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Length::Number(n) => Some(*n),
            Length::Text(text) => text.trim().trim_end_matches("px").parse().ok(),
        }
    }
}

impl From<f64> for Length {
    fn from(value: f64) -> Self {
        Length::Number(value)
    }
}

impl From<&str> for Length {
    fn from(value: &str) -> Self {
        Length::Text(value.to_string())
    }
}

fn format_number(n: f64) -> String {
    if n.fract() == 0.0 && n.abs() < 1e15 {
        format!("{}", n as i64)
    } else {
        format!("{}", n)
    }
}

/// Per-side spacing (padding, margin, border widths)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Sides {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub top: Option<Length>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub right: Option<Length>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bottom: Option<Length>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub left: Option<Length>,
}

impl Sides {
    pub fn all(value: f64) -> Self {
        Self {
            top: Some(Length::px(value)),
            right: Some(Length::px(value)),
            bottom: Some(Length::px(value)),
            left: Some(Length::px(value)),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.top.is_none() && self.right.is_none() && self.bottom.is_none() && self.left.is_none()
    }
}

/// Per-corner radius: top-left, top-right, bottom-right, bottom-left
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Corners {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tl: Option<Length>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tr: Option<Length>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub br: Option<Length>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bl: Option<Length>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Border {
    /// `solid`, `dashed`, `dotted`, `double` or `none`
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub style: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub width: Option<Sides>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub radius: Option<Corners>,
}

/// Box shadow given either as a preset name (`sm`, `md`, `lg`) or in full
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Shadow {
    Preset(String),
    Custom(ShadowSpec),
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ShadowSpec {
    /// `outset` or `inset`
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub x: Option<Length>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub y: Option<Length>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub blur: Option<Length>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub spread: Option<Length>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Typography {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub font_family: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub font_size: Option<Length>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub font_weight: Option<Length>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub font_style: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text_transform: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text_decoration: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub line_height: Option<Length>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub letter_spacing: Option<Length>,
}

/// Per-device visibility; `Some(false)` hides the block on that device
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Visibility {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub desktop: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tablet: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mobile: Option<bool>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CustomAttribute {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default)]
    pub key: String,
    #[serde(default)]
    pub value: String,
}

/// The "Advanced" tab every block editor shares
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Advanced {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub css_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub css_classes: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub custom_css: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub custom_attributes: Option<Vec<CustomAttribute>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub animation: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub responsive_visibility: Option<Visibility>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub z_index: Option<Length>,
}

/// Lenient count: accepts `3`, `3.0` or `"3"`; `null` and `""` read as unset
pub fn count<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<u32>, D::Error> {
    let value = Option::<Value>::deserialize(deserializer)?;
    let parsed = match &value {
        None | Some(Value::Null) => return Ok(None),
        Some(Value::String(s)) if s.trim().is_empty() => return Ok(None),
        Some(Value::Number(n)) => n.as_u64().or_else(|| {
            n.as_f64()
                .filter(|f| *f >= 0.0 && f.fract() == 0.0)
                .map(|f| f as u64)
        }),
        Some(Value::String(s)) => s.trim().parse::<u64>().ok(),
        Some(_) => None,
    };
    parsed
        .and_then(|v| u32::try_from(v).ok())
        .map(Some)
        .ok_or_else(|| D::Error::custom(format!("invalid count: {}", value.unwrap_or_default())))
}

/// Lenient flag: accepts booleans and the strings `"true"` / `"false"`
pub fn flag<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<bool>, D::Error> {
    let value = Option::<Value>::deserialize(deserializer)?;
    match value {
        None | Some(Value::Null) => Ok(None),
        Some(Value::Bool(b)) => Ok(Some(b)),
        Some(Value::String(s)) if s.trim().is_empty() => Ok(None),
        Some(Value::String(s)) => s
            .trim()
            .parse()
            .map(Some)
            .map_err(|_| D::Error::custom(format!("invalid flag: {:?}", s))),
        Some(other) => Err(D::Error::custom(format!("invalid flag: {}", other))),
    }
}
