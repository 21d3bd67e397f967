//! Per-page stylesheet: rules that cannot live in inline `style` attributes
//! (hover states, media queries, user CSS), each scoped to one block.

use crate::declarations::{shadow_value, Declarations};
use pagecraft_model::settings::{Advanced, ButtonSettings, Visibility};
use pagecraft_model::{BlockId, BlockNode, BlockSettings};

pub const MOBILE_QUERY: &str = "(max-width: 767px)";
pub const TABLET_QUERY: &str = "(min-width: 768px) and (max-width: 1023px)";
pub const DESKTOP_QUERY: &str = "(min-width: 1024px)";

/// Rules every page needs regardless of its blocks
pub const BASE_CSS: &str = r#".pc-page { margin: 0; font-family: system-ui, -apple-system, "Segoe UI", Roboto, sans-serif; }
.pc-page img { max-width: 100%; }
.pc-unknown-block { padding: 16px; border: 2px dashed #dc2626; color: #dc2626; background: #fef2f2; }
.pc-selected { outline: 2px solid #2563eb; outline-offset: 2px; }
[data-block-id] { position: relative; }
.pc-hover-grow { transition: transform 0.3s; } .pc-hover-grow:hover { transform: scale(1.1); }
.pc-hover-shrink { transition: transform 0.3s; } .pc-hover-shrink:hover { transform: scale(0.9); }
.pc-hover-pulse:hover { animation: pc-pulse 1s infinite; }
@keyframes pc-pulse { 0%, 100% { transform: scale(1); } 50% { transform: scale(1.05); } }
.pc-animate-fadeIn { animation: pc-fade-in 0.6s ease both; }
.pc-animate-fadeInUp { animation: pc-fade-in-up 0.6s ease both; }
.pc-animate-zoomIn { animation: pc-zoom-in 0.6s ease both; }
@keyframes pc-fade-in { from { opacity: 0; } to { opacity: 1; } }
@keyframes pc-fade-in-up { from { opacity: 0; transform: translateY(24px); } to { opacity: 1; transform: none; } }
@keyframes pc-zoom-in { from { opacity: 0; transform: scale(0.9); } to { opacity: 1; transform: none; } }
.pc-accordion details > summary { cursor: pointer; list-style: none; }
.pc-tabs input[type="radio"] { display: none; }
"#;

/// CSS rule with selector and properties
#[derive(Debug, Clone, PartialEq)]
pub struct CssRule {
    pub selector: String,
    pub properties: Declarations,
    pub media_query: Option<String>,
}

/// Stylesheet in emit order
#[derive(Debug, Clone, Default)]
pub struct StyleSheet {
    pub rules: Vec<CssRule>,
    /// User CSS, already scoped
    pub raw: Vec<String>,
}

impl StyleSheet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_rule(&mut self, rule: CssRule) {
        if !rule.properties.is_empty() {
            self.rules.push(rule);
        }
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty() && self.raw.is_empty()
    }

    /// Convert to CSS text
    pub fn to_css(&self) -> String {
        let mut css = String::new();

        for rule in &self.rules {
            let indent = if rule.media_query.is_some() { "  " } else { "" };
            if let Some(query) = &rule.media_query {
                css.push_str("@media ");
                css.push_str(query);
                css.push_str(" {\n");
            }

            css.push_str(indent);
            css.push_str(&rule.selector);
            css.push_str(" {\n");
            for (key, value) in rule.properties.iter() {
                css.push_str(indent);
                css.push_str("  ");
                css.push_str(key);
                css.push_str(": ");
                css.push_str(value);
                css.push_str(";\n");
            }
            css.push_str(indent);
            css.push_str("}\n");

            if rule.media_query.is_some() {
                css.push_str("}\n");
            }
            css.push('\n');
        }

        for raw in &self.raw {
            css.push_str(raw.trim());
            css.push_str("\n\n");
        }

        css
    }
}

/// DOM id of a rendered block: its `cssId` if set, otherwise `pc-<id>`
pub fn block_anchor(id: &BlockId, advanced: Option<&Advanced>) -> String {
    advanced
        .and_then(|a| a.css_id.as_deref())
        .map(str::trim)
        .filter(|css_id| !css_id.is_empty())
        .map(str::to_string)
        .unwrap_or_else(|| format!("pc-{}", id))
}

/// Collect the scoped rules of every block in a layout
pub fn compile_blocks(blocks: &[BlockNode]) -> StyleSheet {
    let mut sheet = StyleSheet::new();
    for block in blocks {
        collect(block, &mut sheet);
    }
    tracing::debug!(rules = sheet.rules.len(), raw = sheet.raw.len(), "compiled stylesheet");
    sheet
}

/// Base rules plus the scoped rules of a layout
pub fn compile_to_css(blocks: &[BlockNode]) -> String {
    let mut css = String::from(BASE_CSS);
    let sheet = compile_blocks(blocks);
    if !sheet.is_empty() {
        css.push('\n');
        css.push_str(&sheet.to_css());
    }
    css
}

fn collect(block: &BlockNode, sheet: &mut StyleSheet) {
    let advanced = block.settings.advanced();
    let selector = format!("#{}", block_anchor(&block.id, advanced));

    match &block.settings {
        BlockSettings::Button(button) => hover_rules(&selector, button, sheet),
        BlockSettings::Columns(columns) => {
            if columns.stack_on_mobile.unwrap_or(true) {
                let mut props = Declarations::new();
                props.push("grid-template-columns", "1fr !important");
                sheet.add_rule(CssRule {
                    selector: selector.clone(),
                    properties: props,
                    media_query: Some(MOBILE_QUERY.to_string()),
                });
            }
        }
        _ => {}
    }

    if let Some(advanced) = advanced {
        if let Some(visibility) = &advanced.responsive_visibility {
            visibility_rules(&selector, visibility, sheet);
        }
        if let Some(custom) = advanced.custom_css.as_deref() {
            if !custom.trim().is_empty() {
                sheet.raw.push(scope_custom_css(&selector, custom));
            }
        }
    }

    for child in &block.children {
        collect(child, sheet);
    }
}

fn hover_rules(selector: &str, button: &ButtonSettings, sheet: &mut StyleSheet) {
    let Some(hover) = &button.hover else {
        return;
    };

    let mut props = Declarations::new();
    props
        .text("color", hover.color.as_deref())
        .text("background-color", hover.background_color.as_deref());
    if let Some(border) = &hover.border {
        props.text("border-color", border.color.as_deref());
    }
    props.push_opt("box-shadow", hover.box_shadow.as_ref().and_then(shadow_value));

    sheet.add_rule(CssRule {
        selector: format!("{}:hover", selector),
        properties: props,
        media_query: None,
    });
}

fn visibility_rules(selector: &str, visibility: &Visibility, sheet: &mut StyleSheet) {
    let hidden = [
        (visibility.desktop, DESKTOP_QUERY),
        (visibility.tablet, TABLET_QUERY),
        (visibility.mobile, MOBILE_QUERY),
    ];

    for (shown, query) in hidden {
        if shown == Some(false) {
            let mut props = Declarations::new();
            props.push("display", "none !important");
            sheet.add_rule(CssRule {
                selector: selector.to_string(),
                properties: props,
                media_query: Some(query.to_string()),
            });
        }
    }
}

/// `selector` in user CSS stands for the block; bare declarations are wrapped
fn scope_custom_css(selector: &str, custom: &str) -> String {
    if custom.contains("selector") {
        custom.replace("selector", selector)
    } else if custom.contains('{') {
        custom.to_string()
    } else {
        format!("{} {{ {} }}", selector, custom.trim())
    }
}
