//! Site pages and the reference data renderers read.

use crate::block::BlockNode;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

/// Prefix of ids handed out to pages that were never saved
pub const TEMP_PAGE_PREFIX: &str = "temp_";

pub type PageId = String;

/// One page of a site; `layout` is the canvas forest
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Page {
    pub id: PageId,
    pub name: String,
    pub slug: String,
    #[serde(default)]
    pub is_homepage: bool,
    #[serde(default)]
    pub layout: Vec<BlockNode>,
}

impl Page {
    pub fn new(id: impl Into<PageId>, name: impl Into<String>) -> Self {
        let name = name.into();
        Self {
            id: id.into(),
            slug: slugify(&name),
            name,
            is_homepage: false,
            layout: Vec::new(),
        }
    }

    /// Page that only exists in the editor so far
    pub fn temporary(suffix: &str, name: impl Into<String>) -> Self {
        Self::new(format!("{}{}", TEMP_PAGE_PREFIX, suffix), name)
    }

    pub fn is_temporary(&self) -> bool {
        self.id.starts_with(TEMP_PAGE_PREFIX)
    }

    /// Listing order: homepage first, then by name
    pub fn listing_order(a: &Page, b: &Page) -> Ordering {
        b.is_homepage
            .cmp(&a.is_homepage)
            .then_with(|| a.name.cmp(&b.name))
    }
}

/// Product record shown by `featuredProducts` blocks
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: String,
    pub name: String,
    pub price: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// Everything the builder needs from the persistence layer for one site
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SiteSnapshot {
    pub site_id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub slug: String,
    #[serde(default)]
    pub pages: Vec<Page>,
    #[serde(default)]
    pub products: Vec<Product>,
}

impl SiteSnapshot {
    pub fn homepage(&self) -> Option<&Page> {
        self.pages
            .iter()
            .find(|p| p.is_homepage)
            .or_else(|| self.pages.first())
    }

    pub fn page(&self, id: &str) -> Option<&Page> {
        self.pages.iter().find(|p| p.id == id)
    }

    pub fn page_by_slug(&self, slug: &str) -> Option<&Page> {
        self.pages.iter().find(|p| p.slug == slug)
    }
}

/// URL slug for a page name: lowercase ascii alphanumerics joined by `-`
pub fn slugify(name: &str) -> String {
    let mut slug = String::with_capacity(name.len());
    let mut pending_dash = false;

    for c in name.chars().flat_map(char::to_lowercase) {
        if c.is_ascii_lowercase() || c.is_ascii_digit() {
            if pending_dash && !slug.is_empty() {
                slug.push('-');
            }
            pending_dash = false;
            slug.push(c);
        } else {
            pending_dash = true;
        }
    }

    slug
}
