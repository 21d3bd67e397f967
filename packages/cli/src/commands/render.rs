use crate::config::Config;
use anyhow::{Context, Result};
use clap::Args;
use colored::Colorize;
use pagecraft_compiler_html::{compile_site_page, CompileOptions, RenderedPage};
use pagecraft_editor::JsonFileStore;
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Args)]
pub struct RenderArgs {
    /// Page slug (defaults to the homepage)
    #[arg(short, long, conflicts_with = "all")]
    pub page: Option<String>,

    /// Render every page of the site
    #[arg(long)]
    pub all: bool,

    /// Output directory (overrides config)
    #[arg(short, long)]
    pub out: Option<String>,

    /// Keep editor markers (block ids, selection outline)
    #[arg(long)]
    pub editable: bool,
}

pub fn render(args: RenderArgs, cwd: &Path) -> Result<()> {
    let config = Config::load(cwd)?;
    let store = JsonFileStore::new(config.site_path(cwd));
    let mut site = store
        .load()
        .with_context(|| format!("Cannot read site file {}", store.path().display()))?;
    if let Some(slug) = &config.shop_slug {
        site.slug = slug.clone();
    }

    let options = CompileOptions {
        pretty: config.pretty,
        editable: args.editable,
        maps_api_key: config.maps_api_key.clone(),
        ..Default::default()
    };
    let out_dir = match &args.out {
        Some(out) => cwd.join(out),
        None => config.out_path(cwd),
    };
    fs::create_dir_all(&out_dir)
        .with_context(|| format!("Cannot create {}", out_dir.display()))?;

    println!("{}", "Rendering pages...".bright_blue().bold());

    let slugs: Vec<Option<String>> = if args.all {
        site.pages.iter().map(|p| Some(p.slug.clone())).collect()
    } else {
        vec![args.page.clone()]
    };
    for slug in slugs {
        let rendered = compile_site_page(&site, slug.as_deref(), &options)?;
        let (html, css) = write_page(&rendered, &out_dir)?;
        println!("  {} /{} → {}, {}", "✓".green(), rendered.slug, html.display(), css.display());
    }

    Ok(())
}

/// Write `<slug>.html` and `<slug>.css`; a page without a slug is `index`
fn write_page(page: &RenderedPage, out_dir: &Path) -> Result<(PathBuf, PathBuf)> {
    let stem = if page.slug.is_empty() { "index" } else { page.slug.as_str() };
    let html = out_dir.join(format!("{}.html", stem));
    let css = out_dir.join(format!("{}.css", stem));

    fs::write(&html, &page.html).with_context(|| format!("Cannot write {}", html.display()))?;
    fs::write(&css, &page.css).with_context(|| format!("Cannot write {}", css.display()))?;
    Ok((html, css))
}
