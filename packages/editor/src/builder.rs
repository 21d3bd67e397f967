//! # Builder Controller
//!
//! Owns the forest of the page being edited, the current selection and the
//! read-only product list. Every change to the tree goes through here.
//!
//! Tree-level failures (stale ids, bad drops) are silent no-ops: they are
//! logged at `debug` and reported as `changed: false`, never raised.

use crate::errors::EditorError;
use crate::forest::{Forest, NodeRef};
use crate::mutations::{DropResult, Mutation, MutationError, MutationResult};
use pagecraft_model::{
    layout_to_json, parse_layout, BlockId, BlockNode, BlockSettings, BlockType, ContainerId,
    IdGenerator, Product, UuidGenerator,
};

/// Columns a fresh `columns` block starts with
pub const DEFAULT_COLUMN_COUNT: u32 = 2;

/// Upper bound for `columnCount`; larger values are clamped
pub const MAX_COLUMN_COUNT: u32 = 6;

/// Editing state for one page
pub struct Builder<G: IdGenerator = UuidGenerator> {
    forest: Forest,
    selected: Option<BlockId>,
    products: Vec<Product>,
    ids: G,
    version: u64,
}

impl Builder<UuidGenerator> {
    /// Empty canvas with random ids
    pub fn with_uuids() -> Self {
        Self::new(UuidGenerator)
    }
}

impl<G: IdGenerator> Builder<G> {
    /// Empty canvas
    pub fn new(ids: G) -> Self {
        Self {
            forest: Forest::new(),
            selected: None,
            products: Vec::new(),
            ids,
            version: 0,
        }
    }

    /// Builder over a persisted layout
    pub fn from_layout(layout: Vec<BlockNode>, products: Vec<Product>, mut ids: G) -> Self {
        let forest = Forest::from_blocks(layout, &mut ids);
        Self {
            forest,
            selected: None,
            products,
            ids,
            version: 0,
        }
    }

    pub fn forest(&self) -> &Forest {
        &self.forest
    }

    /// Current layout as nested blocks
    pub fn layout(&self) -> Vec<BlockNode> {
        self.forest.to_blocks()
    }

    pub fn products(&self) -> &[Product] {
        &self.products
    }

    pub fn set_products(&mut self, products: Vec<Product>) {
        self.products = products;
    }

    /// Incremented on every mutation that changed something
    pub fn version(&self) -> u64 {
        self.version
    }

    pub fn selected(&self) -> Option<&BlockId> {
        self.selected.as_ref()
    }

    pub fn selected_block(&self) -> Option<NodeRef<'_>> {
        self.selected.as_ref().and_then(|id| self.forest.find(id))
    }

    /// Append a new block to the canvas and select it
    pub fn add_block(&mut self, block_type: BlockType) -> BlockId {
        let block = if block_type == BlockType::Columns {
            let mut ids = FreshIds {
                forest: &self.forest,
                ids: &mut self.ids,
            };
            BlockNode::columns(&mut ids, DEFAULT_COLUMN_COUNT)
        } else {
            BlockNode::empty(self.forest.fresh_id(&mut self.ids), block_type)
        };

        let id = self.forest.push_root(block, &mut self.ids);
        tracing::debug!(block = %id, %block_type, "added block");
        self.selected = Some(id.clone());
        self.bump();
        id
    }

    /// Replace the settings of `id` wholesale
    ///
    /// Returns whether the block was updated. Settings of another type are
    /// ignored.
    pub fn update_block(&mut self, id: &BlockId, settings: BlockSettings) -> bool {
        let changed = self.try_update_block(id, settings);
        self.settle(changed, "update_block")
    }

    /// Remove `id` and its subtree
    pub fn remove_block(&mut self, id: &BlockId) -> bool {
        let changed = self.try_remove_block(id);
        self.settle(changed, "remove_block")
    }

    /// Apply a completed drag gesture
    pub fn reorder(&mut self, drop: &DropResult) -> bool {
        let changed = self.try_reorder(drop);
        self.settle(changed, "reorder")
    }

    /// Insert a prepared subtree
    pub fn insert_block(&mut self, container: &ContainerId, index: usize, block: BlockNode) -> bool {
        let changed = self.forest.insert(container, index, block).map(|_| ());
        self.settle(changed, "insert_block")
    }

    /// Select `id`; unknown ids leave the selection alone
    pub fn select(&mut self, id: &BlockId) -> bool {
        if !self.forest.contains(id) {
            tracing::debug!(block = %id, "select: no such block");
            return false;
        }
        if self.selected.as_ref() == Some(id) {
            return false;
        }
        self.selected = Some(id.clone());
        self.bump();
        true
    }

    pub fn clear_selection(&mut self) -> bool {
        if self.selected.take().is_some() {
            self.bump();
            true
        } else {
            false
        }
    }

    /// Apply a serialized mutation
    pub fn apply(&mut self, mutation: Mutation) -> MutationResult {
        let changed = match mutation {
            Mutation::AddBlock { block_type } => {
                self.add_block(block_type);
                return self.result(true);
            }
            Mutation::InsertBlock {
                container_id,
                index,
                block,
            } => self.insert_block(&container_id, index, block),
            Mutation::UpdateBlock { block_id, settings } => {
                match self.forest.find(&block_id) {
                    Some(node) => {
                        let settings = BlockSettings::from_parts(node.type_name(), settings);
                        self.update_block(&block_id, settings)
                    }
                    None => {
                        tracing::debug!(block = %block_id, "update: no such block");
                        false
                    }
                }
            }
            Mutation::RemoveBlock { block_id } => self.remove_block(&block_id),
            Mutation::Reorder(drop) => self.reorder(&drop),
            Mutation::Select { block_id: Some(id) } => self.select(&id),
            Mutation::Select { block_id: None } => self.clear_selection(),
        };
        self.result(changed)
    }

    /// Canonical JSON of the whole canvas
    pub fn serialize(&self) -> Result<String, EditorError> {
        Ok(layout_to_json(&self.forest.to_blocks())?)
    }

    pub fn serialize_pretty(&self) -> Result<String, EditorError> {
        Ok(serde_json::to_string_pretty(&self.forest.to_blocks())?)
    }

    /// Replace the whole forest from persisted JSON
    ///
    /// On a parse error the current forest is kept.
    pub fn load(&mut self, json: &str) -> Result<(), EditorError> {
        let layout = parse_layout(json)?;
        self.forest = Forest::from_blocks(layout, &mut self.ids);
        self.selected = None;
        self.bump();
        Ok(())
    }

    fn try_update_block(
        &mut self,
        id: &BlockId,
        mut settings: BlockSettings,
    ) -> Result<(), MutationError> {
        if let BlockSettings::Columns(columns) = &mut settings {
            if let Some(count) = columns.column_count.filter(|c| *c > MAX_COLUMN_COUNT) {
                tracing::debug!(block = %id, requested = count, "clamping column count");
                columns.column_count = Some(MAX_COLUMN_COUNT);
            }
        }
        let previous = self.forest.set_settings(id, settings)?;

        let old_count = previous.column_count();
        let new_count = self.forest.find(id).and_then(|n| n.settings().column_count());
        if let (Some(old), Some(new)) = (old_count, new_count) {
            if old != new {
                self.forest.resize_columns(id, new as usize, &mut self.ids)?;
                tracing::debug!(block = %id, from = old, to = new, "resized columns");
            }
        }

        if let Some(selected) = &self.selected {
            if !self.forest.contains(selected) {
                self.selected = None;
            }
        }
        Ok(())
    }

    fn try_remove_block(&mut self, id: &BlockId) -> Result<(), MutationError> {
        let clears_selection = self
            .selected
            .as_ref()
            .map(|selected| self.forest.is_ancestor_or_self(id, selected))
            .unwrap_or(false);

        self.forest.remove(id)?;
        if clears_selection {
            self.selected = None;
        }
        Ok(())
    }

    fn try_reorder(&mut self, drop: &DropResult) -> Result<(), MutationError> {
        let destination = drop.destination.as_ref().ok_or(MutationError::NoDestination)?;
        let source = &drop.source;

        if let Some(dragged) = &drop.dragged_id {
            let at_source = self
                .forest
                .locate(&source.container_id)
                .and_then(|list| list.get(source.index));
            if at_source != Some(dragged) {
                return Err(MutationError::StaleDrag {
                    dragged: dragged.clone(),
                    container: source.container_id.clone(),
                    index: source.index,
                });
            }
        }

        self.forest
            .move_node(
                &source.container_id,
                source.index,
                &destination.container_id,
                destination.index,
            )
            .map(|_| ())
    }

    fn settle(&mut self, outcome: Result<(), MutationError>, op: &'static str) -> bool {
        match outcome {
            Ok(()) => {
                self.bump();
                true
            }
            Err(err) => {
                tracing::debug!(op, %err, "mutation ignored");
                false
            }
        }
    }

    fn result(&self, changed: bool) -> MutationResult {
        MutationResult {
            version: self.version,
            changed,
        }
    }

    fn bump(&mut self) {
        self.version += 1;
    }
}

/// Generator adapter that skips ids already used by the forest
struct FreshIds<'a, G: IdGenerator> {
    forest: &'a Forest,
    ids: &'a mut G,
}

impl<G: IdGenerator> IdGenerator for FreshIds<'_, G> {
    fn next_id(&mut self) -> BlockId {
        self.forest.fresh_id(&mut *self.ids)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pagecraft_model::SequentialIdGenerator;

    fn builder() -> Builder<SequentialIdGenerator> {
        Builder::new(SequentialIdGenerator::from_seed("b"))
    }

    #[test]
    fn test_add_block_selects_new_block() {
        let mut builder = builder();
        let id = builder.add_block(BlockType::Hero);

        assert_eq!(id.as_str(), "b-1");
        assert_eq!(builder.selected(), Some(&id));
        assert_eq!(builder.forest().canvas(), &[id]);
        assert_eq!(builder.version(), 1);
    }

    #[test]
    fn test_generated_ids_skip_loaded_ids() {
        let layout = vec![BlockNode::empty("b-1", BlockType::Hero)];
        let mut builder =
            Builder::from_layout(layout, Vec::new(), SequentialIdGenerator::from_seed("b"));

        let id = builder.add_block(BlockType::Columns);
        assert_eq!(id.as_str(), "b-2");
        assert_eq!(builder.forest().len(), 4);
    }

    #[test]
    fn test_update_with_other_type_is_ignored() {
        let mut builder = builder();
        let id = builder.add_block(BlockType::Heading);
        let version = builder.version();

        assert!(!builder.update_block(&id, BlockSettings::empty(BlockType::Image)));
        assert_eq!(builder.version(), version);
        assert_eq!(
            builder.forest().find(&id).unwrap().block_type(),
            Some(BlockType::Heading)
        );
    }

    #[test]
    fn test_select_unknown_is_noop() {
        let mut builder = builder();
        let id = builder.add_block(BlockType::Hero);

        assert!(!builder.select(&BlockId::from("ghost")));
        assert_eq!(builder.selected(), Some(&id));
        assert!(builder.clear_selection());
        assert!(builder.selected_block().is_none());
        assert!(!builder.clear_selection());
    }

    #[test]
    fn test_failed_load_keeps_forest() {
        let mut builder = builder();
        builder.add_block(BlockType::Hero);

        assert!(builder.load("{not json").is_err());
        assert_eq!(builder.forest().len(), 1);
    }
}
