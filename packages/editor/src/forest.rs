//! # Block Forest
//!
//! Arena representation of a page layout. Nodes live in a map keyed by id;
//! containers hold ordered lists of child ids and every node records its
//! parent, so removal and moves are list splices instead of tree rebuilds.
//!
//! ```text
//! canvas: [hero-1, section-2]
//! nodes:  hero-1    { settings, children: [],          parent: None }
//!         section-2 { settings, children: [heading-3], parent: None }
//!         heading-3 { settings, children: [],          parent: section-2 }
//! ```
//!
//! Invariants kept by every operation:
//! - ids are unique (a map key cannot repeat)
//! - only container blocks have children
//! - every id in a child list, or on the canvas, has a slot whose parent
//!   points back at that list

use crate::mutations::MutationError;
use pagecraft_model::{BlockId, BlockNode, BlockSettings, BlockType, ContainerId, IdGenerator};
use std::collections::{HashMap, HashSet};

#[derive(Debug, Clone, PartialEq)]
struct Slot {
    settings: BlockSettings,
    children: Vec<BlockId>,
    /// `None` for blocks placed directly on the canvas
    parent: Option<BlockId>,
}

/// Ordered forest of blocks addressed by id
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Forest {
    nodes: HashMap<BlockId, Slot>,
    canvas: Vec<BlockId>,
}

/// Borrowed view of a single block
#[derive(Debug, Clone, Copy)]
pub struct NodeRef<'a> {
    id: &'a BlockId,
    slot: &'a Slot,
}

impl<'a> NodeRef<'a> {
    pub fn id(&self) -> &'a BlockId {
        self.id
    }

    pub fn settings(&self) -> &'a BlockSettings {
        &self.slot.settings
    }

    pub fn block_type(&self) -> Option<BlockType> {
        self.slot.settings.block_type()
    }

    pub fn type_name(&self) -> &'a str {
        self.slot.settings.type_name()
    }

    pub fn children(&self) -> &'a [BlockId] {
        &self.slot.children
    }

    /// Container holding this block
    pub fn parent(&self) -> ContainerId {
        match &self.slot.parent {
            Some(parent) => ContainerId::Block(parent.clone()),
            None => ContainerId::Canvas,
        }
    }

    pub fn is_container(&self) -> bool {
        self.block_type().map(|t| t.is_container()).unwrap_or(false)
    }
}

impl Forest {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a forest from a persisted layout
    ///
    /// Loading never fails on structure: a repeated id is replaced with a
    /// fresh one from `ids`, and children found under leaf blocks are dropped.
    pub fn from_blocks(blocks: Vec<BlockNode>, ids: &mut dyn IdGenerator) -> Self {
        let mut forest = Self::new();
        for block in blocks {
            forest.push_root(block, ids);
        }
        forest
    }

    /// Append a subtree to the canvas, re-keying any id already in use
    pub fn push_root(&mut self, block: BlockNode, ids: &mut dyn IdGenerator) -> BlockId {
        let id = self.attach(block, None, Some(ids));
        self.canvas.push(id.clone());
        id
    }

    /// The forest as nested blocks, in canvas order
    pub fn to_blocks(&self) -> Vec<BlockNode> {
        self.canvas.iter().filter_map(|id| self.subtree(id)).collect()
    }

    /// Nested copy of the subtree rooted at `id`
    pub fn subtree(&self, id: &BlockId) -> Option<BlockNode> {
        let slot = self.nodes.get(id)?;
        let children = slot
            .children
            .iter()
            .filter_map(|child| self.subtree(child))
            .collect();
        Some(BlockNode {
            id: id.clone(),
            settings: slot.settings.clone(),
            children,
        })
    }

    /// Total number of blocks at every depth
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn contains(&self, id: &BlockId) -> bool {
        self.nodes.contains_key(id)
    }

    pub fn canvas(&self) -> &[BlockId] {
        &self.canvas
    }

    /// Find a block anywhere in the forest
    pub fn find(&self, id: &BlockId) -> Option<NodeRef<'_>> {
        self.nodes
            .get_key_value(id)
            .map(|(id, slot)| NodeRef { id, slot })
    }

    /// Resolve a container to its child sequence
    ///
    /// Returns `None` for ids that do not exist and for blocks that are not
    /// containers. A container that never had children resolves to an empty
    /// sequence.
    pub fn locate(&self, container: &ContainerId) -> Option<&[BlockId]> {
        match container {
            ContainerId::Canvas => Some(&self.canvas),
            ContainerId::Block(id) => {
                let slot = self.nodes.get(id)?;
                if is_container(&slot.settings) {
                    Some(&slot.children)
                } else {
                    None
                }
            }
        }
    }

    /// Live child sequence of a container, for splicing
    pub(crate) fn locate_mut(&mut self, container: &ContainerId) -> Option<&mut Vec<BlockId>> {
        match container {
            ContainerId::Canvas => Some(&mut self.canvas),
            ContainerId::Block(id) => {
                let slot = self.nodes.get_mut(id)?;
                if is_container(&slot.settings) {
                    Some(&mut slot.children)
                } else {
                    None
                }
            }
        }
    }

    /// Container currently holding `id`
    pub fn parent_of(&self, id: &BlockId) -> Option<ContainerId> {
        self.find(id).map(|node| node.parent())
    }

    /// Block ids in depth-first pre-order
    pub fn ids(&self) -> Vec<BlockId> {
        self.walk().into_iter().map(|(_, node)| node.id().clone()).collect()
    }

    /// Depth-first pre-order traversal with depth (canvas blocks are depth 0)
    pub fn walk(&self) -> Vec<(usize, NodeRef<'_>)> {
        let mut out = Vec::with_capacity(self.nodes.len());
        let mut stack: Vec<(usize, &BlockId)> =
            self.canvas.iter().rev().map(|id| (0, id)).collect();

        while let Some((depth, id)) = stack.pop() {
            if let Some(node) = self.find(id) {
                stack.extend(node.children().iter().rev().map(|c| (depth + 1, c)));
                out.push((depth, node));
            }
        }

        out
    }

    /// Whether `ancestor` is `id` itself or one of its ancestors
    pub fn is_ancestor_or_self(&self, ancestor: &BlockId, id: &BlockId) -> bool {
        let mut current = Some(id);
        while let Some(cursor) = current {
            if cursor == ancestor {
                return true;
            }
            current = self.nodes.get(cursor).and_then(|slot| slot.parent.as_ref());
        }
        false
    }

    /// Remove a block and its whole subtree, returning the removed subtree
    pub fn remove(&mut self, id: &BlockId) -> Result<BlockNode, MutationError> {
        let removed = self
            .subtree(id)
            .ok_or_else(|| MutationError::NodeNotFound(id.clone()))?;

        let parent = self.nodes.get(id).and_then(|slot| slot.parent.clone());
        let siblings = match parent {
            Some(parent) => self.nodes.get_mut(&parent).map(|slot| &mut slot.children),
            None => Some(&mut self.canvas),
        };
        if let Some(siblings) = siblings {
            siblings.retain(|sibling| sibling != id);
        }

        self.drop_subtree(id);
        Ok(removed)
    }

    /// Move the block at `source_index` of one container to `dest_index` of
    /// another (or the same) container
    ///
    /// The block is taken out first, then inserted; `dest_index` is clamped
    /// to the destination length. Nothing changes if a container does not
    /// resolve, the source index is out of range, or the destination lies
    /// inside the moved block.
    pub fn move_node(
        &mut self,
        source: &ContainerId,
        source_index: usize,
        dest: &ContainerId,
        dest_index: usize,
    ) -> Result<BlockId, MutationError> {
        let source_list = self
            .locate(source)
            .ok_or_else(|| MutationError::ContainerNotFound(source.clone()))?;
        let moved = source_list
            .get(source_index)
            .cloned()
            .ok_or(MutationError::IndexOutOfRange {
                container: source.clone(),
                index: source_index,
                len: source_list.len(),
            })?;

        if self.locate(dest).is_none() {
            return Err(MutationError::ContainerNotFound(dest.clone()));
        }
        if let ContainerId::Block(dest_id) = dest {
            if self.is_ancestor_or_self(&moved, dest_id) {
                return Err(MutationError::CycleDetected);
            }
        }

        if let Some(list) = self.locate_mut(source) {
            list.remove(source_index);
        }
        if let Some(list) = self.locate_mut(dest) {
            let index = dest_index.min(list.len());
            list.insert(index, moved.clone());
        }
        if let Some(slot) = self.nodes.get_mut(&moved) {
            slot.parent = match dest {
                ContainerId::Canvas => None,
                ContainerId::Block(id) => Some(id.clone()),
            };
        }

        Ok(moved)
    }

    /// Insert a whole subtree into a container at `index` (clamped)
    ///
    /// Fails without changes if any id of the subtree is already in use.
    pub fn insert(
        &mut self,
        container: &ContainerId,
        index: usize,
        block: BlockNode,
    ) -> Result<BlockId, MutationError> {
        if self.locate(container).is_none() {
            return Err(MutationError::ContainerNotFound(container.clone()));
        }

        let mut seen = HashSet::new();
        check_unique(&block, &mut seen, &self.nodes)?;

        let parent = match container {
            ContainerId::Canvas => None,
            ContainerId::Block(id) => Some(id.clone()),
        };
        let id = self.attach(block, parent, None);

        if let Some(list) = self.locate_mut(container) {
            let index = index.min(list.len());
            list.insert(index, id.clone());
        }
        Ok(id)
    }

    /// Replace the settings of a block, keeping its type
    ///
    /// Returns the previous settings.
    pub fn set_settings(
        &mut self,
        id: &BlockId,
        settings: BlockSettings,
    ) -> Result<BlockSettings, MutationError> {
        let slot = self
            .nodes
            .get_mut(id)
            .ok_or_else(|| MutationError::NodeNotFound(id.clone()))?;

        if !slot.settings.same_type(&settings) {
            return Err(MutationError::TypeMismatch {
                expected: slot.settings.type_name().to_string(),
                found: settings.type_name().to_string(),
            });
        }

        Ok(std::mem::replace(&mut slot.settings, settings))
    }

    /// Grow or shrink the columns of a `columns` block to `count`
    ///
    /// New empty columns are appended at the end; trailing columns are
    /// dropped together with everything inside them.
    pub fn resize_columns(
        &mut self,
        id: &BlockId,
        count: usize,
        ids: &mut dyn IdGenerator,
    ) -> Result<(), MutationError> {
        let slot = self
            .nodes
            .get(id)
            .ok_or_else(|| MutationError::NodeNotFound(id.clone()))?;
        if slot.settings.block_type() != Some(BlockType::Columns) {
            return Err(MutationError::NotColumns(id.clone()));
        }

        let current = slot.children.clone();
        if count < current.len() {
            for dropped in &current[count..] {
                self.drop_subtree(dropped);
            }
            if let Some(slot) = self.nodes.get_mut(id) {
                slot.children.truncate(count);
            }
        } else {
            for _ in current.len()..count {
                let column = BlockNode::empty(self.fresh_id(ids), BlockType::Column);
                let column_id = self.attach(column, Some(id.clone()), None);
                if let Some(slot) = self.nodes.get_mut(id) {
                    slot.children.push(column_id);
                }
            }
        }

        Ok(())
    }

    /// Next id from `ids` that is not already taken
    pub fn fresh_id(&self, ids: &mut dyn IdGenerator) -> BlockId {
        loop {
            let id = ids.next_id();
            if !self.nodes.contains_key(&id) {
                return id;
            }
        }
    }

    /// Add `block` and its descendants to the arena under `parent`
    ///
    /// With a generator, taken ids are replaced; without one the caller has
    /// already checked that the subtree's ids are free.
    fn attach(
        &mut self,
        block: BlockNode,
        parent: Option<BlockId>,
        mut ids: Option<&mut (dyn IdGenerator + '_)>,
    ) -> BlockId {
        let BlockNode {
            mut id,
            settings,
            children,
        } = block;

        if self.nodes.contains_key(&id) {
            if let Some(ids) = ids.as_deref_mut() {
                let fresh = self.fresh_id(ids);
                tracing::warn!(duplicate = %id, replacement = %fresh, "duplicate block id in layout");
                id = fresh;
            }
        }

        let keep_children = is_container(&settings) || settings.block_type().is_none();
        if !keep_children && !children.is_empty() {
            tracing::warn!(
                block = %id,
                block_type = settings.type_name(),
                dropped = children.len(),
                "dropping children of a non-container block"
            );
        }

        self.nodes.insert(
            id.clone(),
            Slot {
                settings,
                children: Vec::new(),
                parent: parent.clone(),
            },
        );

        if keep_children {
            let mut child_ids = Vec::with_capacity(children.len());
            for child in children {
                let ids = ids.as_deref_mut().map(|g| g as &mut dyn IdGenerator);
                child_ids.push(self.attach(child, Some(id.clone()), ids));
            }
            if let Some(slot) = self.nodes.get_mut(&id) {
                slot.children = child_ids;
            }
        }

        id
    }

    fn drop_subtree(&mut self, id: &BlockId) {
        if let Some(slot) = self.nodes.remove(id) {
            for child in &slot.children {
                self.drop_subtree(child);
            }
        }
    }
}

fn is_container(settings: &BlockSettings) -> bool {
    settings
        .block_type()
        .map(|t| t.is_container())
        .unwrap_or(false)
}

fn check_unique(
    block: &BlockNode,
    seen: &mut HashSet<BlockId>,
    existing: &HashMap<BlockId, Slot>,
) -> Result<(), MutationError> {
    if existing.contains_key(&block.id) || !seen.insert(block.id.clone()) {
        return Err(MutationError::DuplicateId(block.id.clone()));
    }
    for child in &block.children {
        check_unique(child, seen, existing)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pagecraft_model::SequentialIdGenerator;

    fn ids() -> SequentialIdGenerator {
        SequentialIdGenerator::from_seed("t")
    }

    fn block(id: &str, block_type: BlockType) -> BlockNode {
        BlockNode::empty(id, block_type)
    }

    fn sample() -> Forest {
        Forest::from_blocks(
            vec![
                block("hero", BlockType::Hero),
                block("section", BlockType::Section).with_children(vec![
                    block("heading", BlockType::Heading),
                    block("cols", BlockType::Columns).with_children(vec![
                        block("col-a", BlockType::Column)
                            .with_children(vec![block("img", BlockType::Image)]),
                        block("col-b", BlockType::Column),
                    ]),
                ]),
                block("spacer", BlockType::Spacer),
            ],
            &mut ids(),
        )
    }

    fn id(raw: &str) -> BlockId {
        BlockId::from(raw)
    }

    #[test]
    fn test_round_trip_through_blocks() {
        let forest = sample();
        assert_eq!(forest.len(), 8);

        let rebuilt = Forest::from_blocks(forest.to_blocks(), &mut ids());
        assert_eq!(rebuilt, forest);
    }

    #[test]
    fn test_walk_is_preorder() {
        let forest = sample();
        let order: Vec<_> = forest
            .walk()
            .into_iter()
            .map(|(depth, node)| format!("{}:{}", depth, node.id()))
            .collect();

        assert_eq!(
            order,
            vec![
                "0:hero", "0:section", "1:heading", "1:cols", "2:col-a", "3:img", "2:col-b",
                "0:spacer"
            ]
        );
    }

    #[test]
    fn test_locate() {
        let forest = sample();

        assert_eq!(forest.locate(&ContainerId::Canvas).unwrap().len(), 3);
        assert_eq!(
            forest.locate(&ContainerId::block("col-a")).unwrap(),
            &[id("img")]
        );
        assert!(forest.locate(&ContainerId::block("col-b")).unwrap().is_empty());
        assert!(forest.locate(&ContainerId::block("hero")).is_none());
        assert!(forest.locate(&ContainerId::block("missing")).is_none());
    }

    #[test]
    fn test_locate_is_stable_without_mutation() {
        let forest = sample();
        let first = forest.locate(&ContainerId::Canvas).unwrap().to_vec();
        let second = forest.locate(&ContainerId::Canvas).unwrap().to_vec();
        assert_eq!(first, second);
    }

    #[test]
    fn test_find_reports_parent() {
        let forest = sample();
        let img = forest.find(&id("img")).unwrap();
        assert_eq!(img.parent(), ContainerId::block("col-a"));
        assert_eq!(forest.find(&id("hero")).unwrap().parent(), ContainerId::Canvas);
        assert!(forest.find(&id("nope")).is_none());
    }

    #[test]
    fn test_remove_drops_subtree() {
        let mut forest = sample();
        let removed = forest.remove(&id("cols")).unwrap();

        assert_eq!(removed.count(), 4);
        assert_eq!(forest.len(), 4);
        for gone in ["cols", "col-a", "col-b", "img"] {
            assert!(forest.find(&id(gone)).is_none());
        }
        assert_eq!(
            forest.locate(&ContainerId::block("section")).unwrap(),
            &[id("heading")]
        );
    }

    #[test]
    fn test_remove_missing_is_error_and_no_change() {
        let mut forest = sample();
        let before = forest.clone();
        assert_eq!(
            forest.remove(&id("missing")),
            Err(MutationError::NodeNotFound(id("missing")))
        );
        assert_eq!(forest, before);
    }

    #[test]
    fn test_move_within_container() {
        let mut forest = sample();
        forest
            .move_node(&ContainerId::Canvas, 0, &ContainerId::Canvas, 2)
            .unwrap();
        assert_eq!(forest.canvas(), &[id("section"), id("spacer"), id("hero")]);
    }

    #[test]
    fn test_move_across_containers_updates_parent() {
        let mut forest = sample();
        forest
            .move_node(&ContainerId::Canvas, 0, &ContainerId::block("col-b"), 0)
            .unwrap();

        assert_eq!(forest.canvas(), &[id("section"), id("spacer")]);
        assert_eq!(forest.locate(&ContainerId::block("col-b")).unwrap(), &[id("hero")]);
        assert_eq!(forest.find(&id("hero")).unwrap().parent(), ContainerId::block("col-b"));
        assert_eq!(forest.len(), 8);
    }

    #[test]
    fn test_move_clamps_destination_index() {
        let mut forest = sample();
        forest
            .move_node(&ContainerId::Canvas, 2, &ContainerId::block("col-a"), 99)
            .unwrap();
        assert_eq!(
            forest.locate(&ContainerId::block("col-a")).unwrap(),
            &[id("img"), id("spacer")]
        );
    }

    #[test]
    fn test_move_rejects_bad_input_without_change() {
        let mut forest = sample();
        let before = forest.clone();

        assert!(forest
            .move_node(&ContainerId::block("missing"), 0, &ContainerId::Canvas, 0)
            .is_err());
        assert!(forest
            .move_node(&ContainerId::Canvas, 0, &ContainerId::block("hero"), 0)
            .is_err());
        assert!(forest
            .move_node(&ContainerId::Canvas, 7, &ContainerId::Canvas, 0)
            .is_err());
        assert_eq!(forest, before);
    }

    #[test]
    fn test_move_into_own_subtree_is_rejected() {
        let mut forest = sample();
        let before = forest.clone();

        let result = forest.move_node(&ContainerId::Canvas, 1, &ContainerId::block("col-a"), 0);
        assert_eq!(result, Err(MutationError::CycleDetected));

        let result = forest.move_node(&ContainerId::Canvas, 1, &ContainerId::block("section"), 0);
        assert_eq!(result, Err(MutationError::CycleDetected));
        assert_eq!(forest, before);
    }

    #[test]
    fn test_section_may_nest_in_column() {
        let mut forest = sample();
        forest
            .insert(&ContainerId::Canvas, 0, block("inner", BlockType::Section))
            .unwrap();
        forest
            .move_node(&ContainerId::Canvas, 0, &ContainerId::block("col-b"), 0)
            .unwrap();
        assert_eq!(
            forest.find(&id("inner")).unwrap().parent(),
            ContainerId::block("col-b")
        );
    }

    #[test]
    fn test_duplicate_ids_are_rekeyed_on_load() {
        let forest = Forest::from_blocks(
            vec![
                block("dup", BlockType::Section)
                    .with_children(vec![block("dup", BlockType::Heading)]),
                block("dup", BlockType::Spacer),
            ],
            &mut ids(),
        );

        assert_eq!(forest.len(), 3);
        assert_eq!(forest.canvas().len(), 2);
        assert_eq!(forest.canvas()[0], id("dup"));
        assert_eq!(forest.find(&id("dup")).unwrap().block_type(), Some(BlockType::Section));
    }

    #[test]
    fn test_leaf_children_dropped_on_load() {
        let forest = Forest::from_blocks(
            vec![block("hero", BlockType::Hero).with_children(vec![block("x", BlockType::Image)])],
            &mut ids(),
        );
        assert_eq!(forest.len(), 1);
        assert!(forest.find(&id("x")).is_none());
    }

    #[test]
    fn test_insert_rejects_taken_ids() {
        let mut forest = sample();
        let result = forest.insert(&ContainerId::Canvas, 0, block("img", BlockType::Image));
        assert_eq!(result, Err(MutationError::DuplicateId(id("img"))));
        assert_eq!(forest.len(), 8);
    }

    #[test]
    fn test_set_settings_keeps_type() {
        let mut forest = sample();
        let result = forest.set_settings(&id("hero"), BlockSettings::empty(BlockType::Image));
        assert!(matches!(result, Err(MutationError::TypeMismatch { .. })));
        assert!(forest
            .set_settings(&id("hero"), BlockSettings::empty(BlockType::Hero))
            .is_ok());
    }

    #[test]
    fn test_resize_columns() {
        let mut forest = sample();
        let mut gen = ids();

        forest.resize_columns(&id("cols"), 4, &mut gen).unwrap();
        let cols = forest.locate(&ContainerId::block("cols")).unwrap().to_vec();
        assert_eq!(cols.len(), 4);
        assert_eq!(&cols[..2], &[id("col-a"), id("col-b")]);

        forest.resize_columns(&id("cols"), 1, &mut gen).unwrap();
        assert_eq!(
            forest.locate(&ContainerId::block("cols")).unwrap(),
            &[id("col-a")]
        );
        assert!(forest.find(&cols[3]).is_none());
        assert!(forest.find(&id("img")).is_some());

        forest.resize_columns(&id("cols"), 0, &mut gen).unwrap();
        assert!(forest.find(&id("img")).is_none());

        assert_eq!(
            forest.resize_columns(&id("section"), 2, &mut gen),
            Err(MutationError::NotColumns(id("section")))
        );
    }
}
