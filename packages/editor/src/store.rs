//! # Page Persistence
//!
//! The builder only talks to storage through [`PageStore`]. Every save is a
//! wholesale, last-write-wins upsert of one page.

use pagecraft_model::{Page, PageId, SiteSnapshot};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use thiserror::Error;
use uuid::Uuid;

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Site not found: {0}")]
    SiteNotFound(String),

    #[error("Page not found: {0}")]
    PageNotFound(String),

    #[error("The homepage cannot be deleted")]
    CannotDeleteHomepage,

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Persistence collaborator for sites and their pages
pub trait PageStore {
    /// Pages and reference data of a site
    fn load_site(&self, site_id: &str) -> Result<SiteSnapshot, StoreError>;

    /// Insert a page that has no persisted id yet, otherwise replace it
    ///
    /// Returns the persisted id.
    fn save_page(&mut self, site_id: &str, page: &Page) -> Result<PageId, StoreError>;

    fn delete_page(&mut self, site_id: &str, page_id: &str) -> Result<(), StoreError>;

    /// Make `page_id` the only homepage of the site
    fn set_homepage(&mut self, site_id: &str, page_id: &str) -> Result<(), StoreError>;
}

fn needs_insert(page: &Page) -> bool {
    page.id.is_empty() || page.is_temporary()
}

fn upsert_page(site: &mut SiteSnapshot, page: &Page, new_id: impl FnOnce() -> PageId) -> Result<PageId, StoreError> {
    if needs_insert(page) {
        let mut stored = page.clone();
        stored.id = new_id();
        // The first page of a site becomes its homepage; otherwise `set_homepage` decides
        stored.is_homepage = site.pages.iter().all(|p| !p.is_homepage);
        let id = stored.id.clone();
        site.pages.push(stored);
        return Ok(id);
    }

    let existing = site
        .pages
        .iter_mut()
        .find(|p| p.id == page.id)
        .ok_or_else(|| StoreError::PageNotFound(page.id.clone()))?;
    // Homepage changes only go through `set_homepage`
    let is_homepage = existing.is_homepage;
    *existing = page.clone();
    existing.is_homepage = is_homepage;
    Ok(page.id.clone())
}

fn remove_page(site: &mut SiteSnapshot, page_id: &str) -> Result<(), StoreError> {
    let index = site
        .pages
        .iter()
        .position(|p| p.id == page_id)
        .ok_or_else(|| StoreError::PageNotFound(page_id.to_string()))?;
    if site.pages[index].is_homepage {
        return Err(StoreError::CannotDeleteHomepage);
    }
    site.pages.remove(index);
    Ok(())
}

fn mark_homepage(site: &mut SiteSnapshot, page_id: &str) -> Result<(), StoreError> {
    if site.page(page_id).is_none() {
        return Err(StoreError::PageNotFound(page_id.to_string()));
    }
    for page in &mut site.pages {
        page.is_homepage = page.id == page_id;
    }
    Ok(())
}

fn sorted(mut site: SiteSnapshot) -> SiteSnapshot {
    site.pages.sort_by(Page::listing_order);
    site
}

/// Sites held in memory; used by tests and previews
#[derive(Debug, Default)]
pub struct MemoryStore {
    sites: HashMap<String, SiteSnapshot>,
    next_id: u64,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_site(mut self, site: SiteSnapshot) -> Self {
        self.insert_site(site);
        self
    }

    pub fn insert_site(&mut self, site: SiteSnapshot) {
        self.sites.insert(site.site_id.clone(), site);
    }

    fn site_mut(&mut self, site_id: &str) -> Result<&mut SiteSnapshot, StoreError> {
        self.sites
            .get_mut(site_id)
            .ok_or_else(|| StoreError::SiteNotFound(site_id.to_string()))
    }
}

impl PageStore for MemoryStore {
    fn load_site(&self, site_id: &str) -> Result<SiteSnapshot, StoreError> {
        self.sites
            .get(site_id)
            .cloned()
            .map(sorted)
            .ok_or_else(|| StoreError::SiteNotFound(site_id.to_string()))
    }

    fn save_page(&mut self, site_id: &str, page: &Page) -> Result<PageId, StoreError> {
        self.next_id += 1;
        let next = self.next_id;
        let site = self.site_mut(site_id)?;
        upsert_page(site, page, || format!("page-{}", next))
    }

    fn delete_page(&mut self, site_id: &str, page_id: &str) -> Result<(), StoreError> {
        remove_page(self.site_mut(site_id)?, page_id)
    }

    fn set_homepage(&mut self, site_id: &str, page_id: &str) -> Result<(), StoreError> {
        mark_homepage(self.site_mut(site_id)?, page_id)
    }
}

/// One site stored as a JSON file
///
/// Each write goes to a sibling temp file first and is renamed over the
/// original, so a failed save never leaves a truncated site file behind.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
    pretty: bool,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            pretty: true,
        }
    }

    pub fn compact(mut self) -> Self {
        self.pretty = false;
        self
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Write a whole site, replacing the file
    pub fn create(&self, site: &SiteSnapshot) -> Result<(), StoreError> {
        self.write(site)
    }

    /// The stored site, whatever its id
    pub fn load(&self) -> Result<SiteSnapshot, StoreError> {
        let json = std::fs::read_to_string(&self.path)?;
        Ok(serde_json::from_str(&json)?)
    }

    fn read_site(&self, site_id: &str) -> Result<SiteSnapshot, StoreError> {
        let site = self.load()?;
        if site.site_id != site_id {
            return Err(StoreError::SiteNotFound(site_id.to_string()));
        }
        Ok(site)
    }

    fn write(&self, site: &SiteSnapshot) -> Result<(), StoreError> {
        let json = if self.pretty {
            serde_json::to_string_pretty(site)?
        } else {
            serde_json::to_string(site)?
        };

        let mut tmp = self.path.clone().into_os_string();
        tmp.push(".tmp");
        let tmp = PathBuf::from(tmp);

        std::fs::write(&tmp, json)?;
        std::fs::rename(&tmp, &self.path)?;
        tracing::info!(path = %self.path.display(), pages = site.pages.len(), "saved site");
        Ok(())
    }

    fn update<T>(
        &self,
        site_id: &str,
        change: impl FnOnce(&mut SiteSnapshot) -> Result<T, StoreError>,
    ) -> Result<T, StoreError> {
        let mut site = self.read_site(site_id)?;
        let out = change(&mut site)?;
        self.write(&site)?;
        Ok(out)
    }
}

impl PageStore for JsonFileStore {
    fn load_site(&self, site_id: &str) -> Result<SiteSnapshot, StoreError> {
        self.read_site(site_id).map(sorted)
    }

    fn save_page(&mut self, site_id: &str, page: &Page) -> Result<PageId, StoreError> {
        self.update(site_id, |site| {
            upsert_page(site, page, || Uuid::new_v4().simple().to_string())
        })
    }

    fn delete_page(&mut self, site_id: &str, page_id: &str) -> Result<(), StoreError> {
        self.update(site_id, |site| remove_page(site, page_id))
    }

    fn set_homepage(&mut self, site_id: &str, page_id: &str) -> Result<(), StoreError> {
        self.update(site_id, |site| mark_homepage(site, page_id))
    }
}
