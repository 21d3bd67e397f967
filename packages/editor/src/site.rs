//! # Site Editing
//!
//! Page manager on top of [`Builder`]: one page is active at a time and its
//! forest lives in the builder; the other pages are kept as persisted
//! layouts until they are switched to.
//!
//! Pages created in the editor get a `temp_` id and are inserted into the
//! store on their first save.

use crate::builder::Builder;
use crate::errors::EditorError;
use crate::store::PageStore;
use pagecraft_model::{slugify, IdGenerator, Page, PageId, Product, SiteSnapshot};

pub struct SiteEditor<S: PageStore, G: IdGenerator + Clone> {
    store: S,
    site_id: String,
    name: String,
    slug: String,
    pages: Vec<Page>,
    active: PageId,
    builder: Builder<G>,
    ids: G,
}

impl<S: PageStore, G: IdGenerator + Clone> SiteEditor<S, G> {
    /// Load a site and activate its homepage
    ///
    /// A site without pages starts with an unsaved `Home` page.
    pub fn open(store: S, site_id: &str, mut ids: G) -> Result<Self, EditorError> {
        let snapshot = store.load_site(site_id)?;
        let SiteSnapshot {
            site_id,
            name,
            slug,
            mut pages,
            products,
        } = snapshot;

        if pages.is_empty() {
            let mut home = Page::temporary(ids.next_id().as_str(), "Home");
            home.is_homepage = true;
            pages.push(home);
        }

        let active_index = pages.iter().position(|p| p.is_homepage).unwrap_or(0);
        let active = pages[active_index].id.clone();
        let layout = std::mem::take(&mut pages[active_index].layout);
        let builder = Builder::from_layout(layout, products, ids.clone());

        tracing::debug!(site = %site_id, pages = pages.len(), active = %active, "opened site");
        Ok(Self {
            store,
            site_id,
            name,
            slug,
            pages,
            active,
            builder,
            ids,
        })
    }

    pub fn site_id(&self) -> &str {
        &self.site_id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn slug(&self) -> &str {
        &self.slug
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn builder(&self) -> &Builder<G> {
        &self.builder
    }

    pub fn builder_mut(&mut self) -> &mut Builder<G> {
        &mut self.builder
    }

    pub fn products(&self) -> &[Product] {
        self.builder.products()
    }

    /// Pages in listing order (homepage first, then by name)
    ///
    /// The active page's layout here is stale; use [`Self::active_page`].
    pub fn pages(&self) -> Vec<&Page> {
        let mut pages: Vec<&Page> = self.pages.iter().collect();
        pages.sort_by(|a, b| Page::listing_order(a, b));
        pages
    }

    pub fn active_id(&self) -> &str {
        &self.active
    }

    /// Active page with the builder's current layout
    pub fn active_page(&self) -> Page {
        let mut page = self
            .pages
            .iter()
            .find(|p| p.id == self.active)
            .cloned()
            .unwrap_or_else(|| Page::new(self.active.clone(), ""));
        page.layout = self.builder.layout();
        page
    }

    pub fn page(&self, id: &str) -> Option<&Page> {
        self.pages.iter().find(|p| p.id == id)
    }

    pub fn page_by_slug(&self, slug: &str) -> Option<&Page> {
        self.pages.iter().find(|p| p.slug == slug)
    }

    /// Make another page the active one
    ///
    /// The current page's edits are kept in memory, not saved.
    pub fn switch_page(&mut self, id: &str) -> Result<(), EditorError> {
        let index = self
            .pages
            .iter()
            .position(|p| p.id == id)
            .ok_or_else(|| EditorError::PageNotFound(id.to_string()))?;
        if self.active == id {
            return Ok(());
        }

        self.stash_active();
        let layout = std::mem::take(&mut self.pages[index].layout);
        let products = self.builder.products().to_vec();
        self.builder = Builder::from_layout(layout, products, self.ids.clone());
        self.active = id.to_string();
        tracing::debug!(page = %id, "switched page");
        Ok(())
    }

    /// Add an unsaved page and make it active
    pub fn create_page(&mut self, name: &str) -> PageId {
        let page = Page::temporary(self.ids.next_id().as_str(), name);
        let id = page.id.clone();
        self.pages.push(page);
        if let Err(err) = self.switch_page(&id) {
            tracing::warn!(%err, "could not activate new page");
        }
        id
    }

    pub fn rename_page(&mut self, id: &str, name: &str) -> Result<(), EditorError> {
        let page = self
            .pages
            .iter_mut()
            .find(|p| p.id == id)
            .ok_or_else(|| EditorError::PageNotFound(id.to_string()))?;
        page.name = name.to_string();
        page.slug = slugify(name);
        Ok(())
    }

    /// Delete a page; the homepage cannot be deleted
    ///
    /// Deleting the active page activates the homepage.
    pub fn delete_page(&mut self, id: &str) -> Result<(), EditorError> {
        let page = self
            .page(id)
            .ok_or_else(|| EditorError::PageNotFound(id.to_string()))?;
        if page.is_homepage {
            return Err(EditorError::CannotDeleteHomepage);
        }
        if !page.is_temporary() {
            self.store.delete_page(&self.site_id, id)?;
        }

        if self.active == id {
            let home = self
                .pages
                .iter()
                .find(|p| p.is_homepage)
                .or_else(|| self.pages.iter().find(|p| p.id != id))
                .map(|p| p.id.clone());
            if let Some(home) = home {
                self.switch_page(&home)?;
            }
        }
        self.pages.retain(|p| p.id != id);
        tracing::info!(site = %self.site_id, page = %id, "deleted page");
        Ok(())
    }

    /// Make `id` the only homepage, saving it first if it was never saved
    pub fn set_homepage(&mut self, id: &str) -> Result<(), EditorError> {
        let mut id = id.to_string();
        let page = self
            .page(&id)
            .ok_or_else(|| EditorError::PageNotFound(id.clone()))?;
        if page.is_temporary() {
            id = self.save_page(&id)?;
        }

        self.store.set_homepage(&self.site_id, &id)?;
        for page in &mut self.pages {
            page.is_homepage = page.id == id;
        }
        Ok(())
    }

    /// Save the active page; returns its persisted id
    pub fn save(&mut self) -> Result<PageId, EditorError> {
        let active = self.active.clone();
        self.save_page(&active)
    }

    /// Save every page
    pub fn save_all(&mut self) -> Result<(), EditorError> {
        let ids: Vec<PageId> = self.pages.iter().map(|p| p.id.clone()).collect();
        for id in ids {
            self.save_page(&id)?;
        }
        Ok(())
    }

    /// Snapshot of the whole site as currently edited
    pub fn snapshot(&self) -> SiteSnapshot {
        let mut pages: Vec<Page> = self
            .pages
            .iter()
            .map(|p| {
                if p.id == self.active {
                    self.active_page()
                } else {
                    p.clone()
                }
            })
            .collect();
        pages.sort_by(Page::listing_order);

        SiteSnapshot {
            site_id: self.site_id.clone(),
            name: self.name.clone(),
            slug: self.slug.clone(),
            pages,
            products: self.builder.products().to_vec(),
        }
    }

    /// Persist one page; on failure nothing in the editor changes
    fn save_page(&mut self, id: &str) -> Result<PageId, EditorError> {
        let page = if id == self.active {
            self.active_page()
        } else {
            self.page(id)
                .cloned()
                .ok_or_else(|| EditorError::PageNotFound(id.to_string()))?
        };

        let saved = self.store.save_page(&self.site_id, &page)?;
        tracing::info!(site = %self.site_id, page = %saved, name = %page.name, "saved page");

        if saved != page.id {
            for stored in &mut self.pages {
                if stored.id == page.id {
                    stored.id = saved.clone();
                }
            }
            if self.active == page.id {
                self.active = saved.clone();
            }
        }
        self.sync_homepage();
        Ok(saved)
    }

    /// Take the homepage flags from the store, which may have picked one on insert
    fn sync_homepage(&mut self) {
        let stored = match self.store.load_site(&self.site_id) {
            Ok(site) => site,
            Err(err) => {
                tracing::warn!(site = %self.site_id, %err, "could not reload homepage after save");
                return;
            }
        };
        let home = match stored.pages.iter().find(|p| p.is_homepage) {
            Some(page) => page.id.clone(),
            None => return,
        };
        for page in &mut self.pages {
            page.is_homepage = page.id == home;
        }
    }

    fn stash_active(&mut self) {
        let layout = self.builder.layout();
        if let Some(page) = self.pages.iter_mut().find(|p| p.id == self.active) {
            page.layout = layout;
        }
    }
}
