//! CSS for Pagecraft pages: declaration helpers used for inline styles, and
//! the scoped stylesheet of a page.

mod declarations;
mod stylesheet;

pub use declarations::{
    corners_value, shadow, shadow_preset, shadow_value, sides_value, Declarations,
};
pub use stylesheet::{
    block_anchor, compile_blocks, compile_to_css, CssRule, StyleSheet, BASE_CSS, DESKTOP_QUERY,
    MOBILE_QUERY, TABLET_QUERY,
};
