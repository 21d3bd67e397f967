//! One renderer per block type, grouped the way the editor's block palette
//! groups them.

pub(crate) mod commerce;
pub(crate) mod containers;
pub(crate) mod content;
pub(crate) mod interactive;

use crate::html::{Attrs, Context};
use pagecraft_model::settings::Length;

/// Trimmed text, or `default` when unset or blank
fn or<'a>(value: &'a Option<String>, default: &'a str) -> &'a str {
    value
        .as_deref()
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .unwrap_or(default)
}

/// Trimmed text, `None` when unset or blank
fn text(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|v| !v.is_empty())
}

/// CSS length, or `default` when unset
fn length_or(value: &Option<Length>, default: &str) -> String {
    value
        .as_ref()
        .and_then(Length::to_css)
        .unwrap_or_else(|| default.to_string())
}

/// Only the editor sees hints for blocks that have nothing to show yet
fn placeholder(editable: bool, message: &str, out: &mut Context) {
    if editable {
        out.element("div", &Attrs::new().set("class", "pc-placeholder"), message);
    }
}
