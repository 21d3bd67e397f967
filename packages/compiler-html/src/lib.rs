//! # Pagecraft HTML compiler
//!
//! Renders a page layout to HTML. Every block is wrapped in a frame element
//! that carries its anchor id, `pc-*` classes and the user's custom
//! attributes; the renderer for the block's type writes the inside. Styles
//! that fit in a `style` attribute are written inline, the rest (hover
//! states, responsive visibility, custom CSS) come from
//! `pagecraft_compiler_css` and land in the document `<style>`.
//!
//! Blocks of unknown type render as a visible placeholder instead of failing
//! the page.

mod blocks;
mod compiler;
mod embeds;
mod html;

pub use compiler::{
    compile_site_page, compile_to_html, render_blocks, CompileError, CompileOptions,
    RenderContext, RenderedPage,
};
pub use embeds::{format_price, map_embed_url, platform_label, share_url, PlayerFlags, VideoSource};
pub use html::escape_html;
