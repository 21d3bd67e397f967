//! # Pagecraft Editor
//!
//! Editing engine for Pagecraft page layouts.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//! │ model: BlockNode JSON ↔ typed settings      │
//! └─────────────────────────────────────────────┘
//!                     ↓
//! ┌─────────────────────────────────────────────┐
//! │ editor: forest + builder + page manager     │
//! │  - Arena forest (locate/find/remove/move)   │
//! │  - Builder controller and selection         │
//! │  - Serializable mutations                   │
//! │  - Page manager over a PageStore            │
//! └─────────────────────────────────────────────┘
//!                     ↓
//! ┌─────────────────────────────────────────────┐
//! │ compiler-html / compiler-css: page → HTML   │
//! └─────────────────────────────────────────────┘
//! ```
//!
//! ## Core Principles
//!
//! 1. **The forest is the source of truth**: HTML is a derived view
//! 2. **Ids are injected**: tests run with [`SequentialIdGenerator`]
//! 3. **Stale input is a no-op**: the builder never fails on unknown ids
//! 4. **Saves are wholesale**: a page is always written in full
//!
//! ## Usage
//!
//! ```rust,ignore
//! use pagecraft_editor::{Builder, DragLocation, DropResult};
//! use pagecraft_model::{BlockType, ContainerId, SequentialIdGenerator};
//!
//! let mut builder = Builder::new(SequentialIdGenerator::from_seed("page"));
//! let hero = builder.add_block(BlockType::Hero);
//! let section = builder.add_block(BlockType::Section);
//!
//! // Drag the hero into the section
//! builder.reorder(&DropResult::new(
//!     DragLocation::new(ContainerId::Canvas, 0),
//!     Some(DragLocation::new(section.clone(), 0)),
//! ));
//!
//! let json = builder.serialize()?;
//! ```

mod builder;
mod errors;
mod forest;
mod mutations;
mod site;
mod store;

pub use builder::{Builder, DEFAULT_COLUMN_COUNT, MAX_COLUMN_COUNT};
pub use errors::EditorError;
pub use forest::{Forest, NodeRef};
pub use mutations::{DragLocation, DropResult, Mutation, MutationError, MutationResult};
pub use site::SiteEditor;
pub use store::{JsonFileStore, MemoryStore, PageStore, StoreError};

pub use pagecraft_model::SequentialIdGenerator;
