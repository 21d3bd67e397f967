pub mod apply;
pub mod init;
pub mod inspect;
pub mod render;

pub use apply::{apply, ApplyArgs};
pub use init::{init, InitArgs};
pub use inspect::{inspect, InspectArgs};
pub use render::{render, RenderArgs};

use crate::config::Config;
use anyhow::{anyhow, Context, Result};
use pagecraft_editor::{JsonFileStore, SiteEditor};
use pagecraft_model::UuidGenerator;
use std::path::Path;

pub(crate) type Editor = SiteEditor<JsonFileStore, UuidGenerator>;

/// Open the configured site file, on its homepage or on the page with `slug`
pub(crate) fn open_editor(cwd: &Path, config: &Config, slug: Option<&str>) -> Result<Editor> {
    let store = JsonFileStore::new(config.site_path(cwd));
    let site = store
        .load()
        .with_context(|| format!("Cannot read site file {}", store.path().display()))?;

    let mut editor = SiteEditor::open(store, &site.site_id, UuidGenerator)?;
    if let Some(slug) = slug {
        let id = editor
            .page_by_slug(slug)
            .or_else(|| editor.page(slug))
            .map(|page| page.id.clone())
            .ok_or_else(|| anyhow!("Page not found: {}", slug))?;
        editor.switch_page(&id)?;
    }
    Ok(editor)
}
