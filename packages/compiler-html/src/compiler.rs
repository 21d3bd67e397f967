use crate::blocks;
use crate::html::{escape_html, Attrs, Context};
use chrono::{DateTime, Utc};
use pagecraft_compiler_css::{block_anchor, compile_to_css, Declarations};
use pagecraft_model::{BlockId, BlockNode, BlockSettings, Page, Product, SiteSnapshot};
use thiserror::Error;

/// Errors that can occur during HTML compilation
#[derive(Error, Debug)]
pub enum CompileError {
    #[error("Page not found: {0}")]
    PageNotFound(String),

    #[error("Site has no pages")]
    NoPages,
}

/// Options for HTML compilation
#[derive(Debug, Clone)]
pub struct CompileOptions {
    /// Pretty print HTML
    pub pretty: bool,
    /// Indentation string
    pub indent: String,
    /// Mark blocks with `data-block-id` and highlight the selection
    pub editable: bool,
    /// Document title; the page name when unset
    pub title: Option<String>,
    /// Put the page stylesheet in a `<style>` element
    pub embed_css: bool,
    /// Link an external stylesheet instead of, or as well as, the inline one
    pub stylesheet_href: Option<String>,
    /// Google Maps embed key for `map` blocks
    pub maps_api_key: Option<String>,
}

impl Default for CompileOptions {
    fn default() -> Self {
        Self {
            pretty: true,
            indent: "  ".to_string(),
            editable: false,
            title: None,
            embed_css: true,
            stylesheet_href: None,
            maps_api_key: None,
        }
    }
}

/// Per-render inputs that are not part of the layout itself
#[derive(Debug, Clone)]
pub struct RenderContext<'a> {
    pub editable: bool,
    pub selected: Option<&'a BlockId>,
    /// Product catalog `featuredProducts` blocks pick from
    pub products: &'a [Product],
    /// Site slug used in product links
    pub shop_slug: &'a str,
    /// Clock for countdown blocks
    pub now: DateTime<Utc>,
    pub maps_api_key: Option<&'a str>,
}

impl<'a> RenderContext<'a> {
    pub fn new(options: &'a CompileOptions, products: &'a [Product], shop_slug: &'a str) -> Self {
        Self {
            editable: options.editable,
            selected: None,
            products,
            shop_slug,
            now: Utc::now(),
            maps_api_key: options.maps_api_key.as_deref(),
        }
    }

    pub fn with_selected(mut self, selected: Option<&'a BlockId>) -> Self {
        self.selected = selected;
        self
    }

    pub fn at(mut self, now: DateTime<Utc>) -> Self {
        self.now = now;
        self
    }
}

/// A compiled page of a site
#[derive(Debug, Clone)]
pub struct RenderedPage {
    pub page_id: String,
    pub slug: String,
    pub html: String,
    pub css: String,
}

/// Render a layout as an HTML fragment, without the document shell
pub fn render_blocks(blocks: &[BlockNode], ctx: &RenderContext, options: &CompileOptions) -> String {
    let mut out = Context::new(options.pretty, &options.indent);
    for block in blocks {
        render_block(block, ctx, &mut out);
    }
    out.get_output()
}

/// Compile a page to a standalone HTML document
pub fn compile_to_html(page: &Page, ctx: &RenderContext, options: &CompileOptions) -> String {
    let mut out = Context::new(options.pretty, &options.indent);

    out.add_line("<!DOCTYPE html>");
    out.open("html", &Attrs::new().set("lang", "en"));

    compile_head(page, options, &mut out);

    out.open("body", &Attrs::new().set("class", "pc-page"));
    out.open("main", &Attrs::new());
    for block in &page.layout {
        render_block(block, ctx, &mut out);
    }
    out.close("main");
    out.close("body");
    out.close("html");

    let html = out.get_output();
    tracing::debug!(page = %page.id, blocks = page.layout.len(), bytes = html.len(), "compiled page");
    html
}

/// Compile one page of a site by slug, or its homepage when `slug` is `None`
pub fn compile_site_page(
    site: &SiteSnapshot,
    slug: Option<&str>,
    options: &CompileOptions,
) -> Result<RenderedPage, CompileError> {
    let page = match slug {
        Some(slug) => site
            .page_by_slug(slug)
            .or_else(|| site.page(slug))
            .ok_or_else(|| CompileError::PageNotFound(slug.to_string()))?,
        None => site.homepage().ok_or(CompileError::NoPages)?,
    };

    let ctx = RenderContext::new(options, &site.products, &site.slug);
    Ok(RenderedPage {
        page_id: page.id.clone(),
        slug: page.slug.clone(),
        html: compile_to_html(page, &ctx, options),
        css: compile_to_css(&page.layout),
    })
}

fn compile_head(page: &Page, options: &CompileOptions, out: &mut Context) {
    out.open("head", &Attrs::new());
    out.add_line("<meta charset=\"UTF-8\" />");
    out.add_line("<meta name=\"viewport\" content=\"width=device-width, initial-scale=1.0\" />");

    let title = options.title.as_deref().unwrap_or(&page.name);
    out.add_line(&format!("<title>{}</title>", escape_html(title)));

    if let Some(href) = &options.stylesheet_href {
        out.empty("link", &Attrs::new().set("rel", "stylesheet").set("href", href.as_str()));
    }
    if options.embed_css {
        out.open("style", &Attrs::new());
        out.raw(&compile_to_css(&page.layout));
        out.close("style");
    }
    out.close("head");
}

/// Render one block inside its frame: the element carrying the block's
/// anchor id, classes and attributes.
pub(crate) fn render_block(block: &BlockNode, ctx: &RenderContext, out: &mut Context) {
    let advanced = block.settings.advanced();
    let mut classes = vec!["pc-block".to_string(), format!("pc-{}", kebab(block.type_name()))];
    let mut style = Declarations::new();

    if let Some(advanced) = advanced {
        if let Some(extra) = &advanced.css_classes {
            classes.extend(extra.split_whitespace().map(str::to_string));
        }
        if let Some(animation) = advanced.animation.as_deref().filter(|a| !a.is_empty() && *a != "none") {
            classes.push(format!("pc-animate-{}", animation));
        }
        style.plain("z-index", advanced.z_index.as_ref());
    }
    if ctx.editable && ctx.selected == Some(&block.id) {
        classes.push("pc-selected".to_string());
    }

    let mut attrs = Attrs::new()
        .set("id", block_anchor(&block.id, advanced))
        .class(&classes)
        .style(&style);
    for attr in advanced.and_then(|a| a.custom_attributes.as_ref()).into_iter().flatten() {
        let key = attr.key.trim();
        if is_safe_attribute(key) {
            attrs = attrs.set(key, attr.value.as_str());
        }
    }
    if ctx.editable {
        attrs = attrs
            .set("data-block-id", block.id.as_str())
            .set("data-block-type", block.type_name());
    }

    out.open("div", &attrs);
    match &block.settings {
        BlockSettings::Section(s) => blocks::containers::section(s, &block.children, ctx, out),
        BlockSettings::Columns(s) => blocks::containers::columns(s, &block.children, ctx, out),
        BlockSettings::Column(s) => blocks::containers::column(s, &block.children, ctx, out),
        BlockSettings::Hero(s) => blocks::content::hero(s, out),
        BlockSettings::RichText(s) => blocks::content::rich_text(s, out),
        BlockSettings::Heading(s) => blocks::content::heading(s, out),
        BlockSettings::Image(s) => blocks::content::image(s, ctx, out),
        BlockSettings::Button(s) => blocks::content::button(s, out),
        BlockSettings::Video(s) => blocks::content::video(s, ctx, out),
        BlockSettings::Icon(s) => blocks::content::icon(s, out),
        BlockSettings::Spacer(s) => blocks::content::spacer(s, out),
        BlockSettings::ImageCarousel(s) => blocks::interactive::image_carousel(s, &block.id, ctx, out),
        BlockSettings::Tabs(s) => blocks::interactive::tabs(s, &block.id, out),
        BlockSettings::Accordion(s) => blocks::interactive::accordion(s, &block.id, out),
        BlockSettings::Form(s) => blocks::interactive::form(s, &block.id, out),
        BlockSettings::Map(s) => blocks::interactive::map(s, ctx, out),
        BlockSettings::Countdown(s) => blocks::interactive::countdown(s, ctx, out),
        BlockSettings::SocialShare(s) => blocks::interactive::social_share(s, out),
        BlockSettings::Repeater(s) => blocks::commerce::repeater(s, out),
        BlockSettings::Faq(s) => blocks::commerce::faq(s, out),
        BlockSettings::Testimonials(s) => blocks::commerce::testimonials(s, out),
        BlockSettings::FeaturedProducts(s) => blocks::commerce::featured_products(s, ctx, out),
        BlockSettings::CustomHtml(s) => blocks::commerce::custom_html(s, out),
        BlockSettings::Opaque { type_name, .. } => {
            tracing::debug!(block = %block.id, type_name, "rendering placeholder for unknown block");
            out.element(
                "div",
                &Attrs::new().set("class", "pc-unknown-block"),
                &format!("Unknown block type: {}", type_name),
            );
        }
    }
    out.close("div");
}

/// `richText` -> `rich-text`
fn kebab(name: &str) -> String {
    let mut out = String::with_capacity(name.len() + 4);
    for c in name.chars() {
        if c.is_ascii_uppercase() {
            out.push('-');
            out.push(c.to_ascii_lowercase());
        } else if c.is_ascii_alphanumeric() || c == '-' {
            out.push(c);
        } else {
            out.push('-');
        }
    }
    out
}

/// Attribute names users may set; the frame's own and event handlers are refused
fn is_safe_attribute(name: &str) -> bool {
    !name.is_empty()
        && name
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | ':' | '.'))
        && !name.to_ascii_lowercase().starts_with("on")
        && !matches!(name, "id" | "class" | "style")
}
