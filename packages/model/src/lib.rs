//! # Pagecraft Model
//!
//! Data model for the page builder: block nodes, their typed settings, ids,
//! and the site/page/product records the builder loads and saves.

pub mod block;
pub mod error;
pub mod ids;
pub mod page;
pub mod settings;

pub use block::{layout_to_json, parse_layout, BlockNode, BlockType};
pub use error::ModelError;
pub use ids::{
    BlockId, ContainerId, IdGenerator, SequentialIdGenerator, UuidGenerator, CANVAS_ID,
};
pub use page::{slugify, Page, PageId, Product, SiteSnapshot, TEMP_PAGE_PREFIX};
pub use settings::{BlockSettings, ColumnsSettings};
