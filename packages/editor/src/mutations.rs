//! # Builder Mutations
//!
//! Serializable edit operations on a page layout. The builder applies them
//! through the same methods the interactive editor calls, so a recorded list
//! of mutations replays to the same tree.
//!
//! ## Mutation Semantics
//!
//! ### AddBlock
//! - Appends to the canvas and selects the new block
//! - `columns` starts with two empty columns
//!
//! ### UpdateBlock
//! - Wholesale replacement of settings, never a merge
//! - Settings are read against the block's own type
//! - `columnCount` changes grow or truncate the column list
//!
//! ### RemoveBlock
//! - Removes the block and all descendants
//! - Clears a selection inside the removed subtree
//!
//! ### Reorder
//! - Remove from source, insert at destination (clamped)
//! - Dropped outside any container is a no-op
//! - Moving a block into its own subtree is rejected

use pagecraft_model::{BlockId, BlockNode, BlockType, ContainerId};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

/// Edit operations accepted by [`crate::Builder::apply`]
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum Mutation {
    /// Append a new block of `block_type` to the canvas
    #[serde(rename_all = "camelCase")]
    AddBlock { block_type: BlockType },

    /// Insert a prepared subtree into a container
    #[serde(rename_all = "camelCase")]
    InsertBlock {
        container_id: ContainerId,
        index: usize,
        block: BlockNode,
    },

    /// Replace the settings of a block
    #[serde(rename_all = "camelCase")]
    UpdateBlock { block_id: BlockId, settings: Value },

    /// Remove a block and its subtree
    #[serde(rename_all = "camelCase")]
    RemoveBlock { block_id: BlockId },

    /// Completed drag gesture
    Reorder(DropResult),

    /// Select a block, or clear the selection with `null`
    #[serde(rename_all = "camelCase")]
    Select { block_id: Option<BlockId> },
}

impl Mutation {
    /// Whether the mutation can change the layout; selection changes cannot
    pub fn edits_layout(&self) -> bool {
        !matches!(self, Mutation::Select { .. })
    }
}

/// One end of a drag gesture
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DragLocation {
    #[serde(alias = "droppableId")]
    pub container_id: ContainerId,
    pub index: usize,
}

impl DragLocation {
    pub fn new(container_id: impl Into<ContainerId>, index: usize) -> Self {
        Self {
            container_id: container_id.into(),
            index,
        }
    }
}

/// Result of a drag gesture as reported by the drag-and-drop layer
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DropResult {
    pub source: DragLocation,
    /// `None` when the block was dropped outside every container
    #[serde(default)]
    pub destination: Option<DragLocation>,
    #[serde(default, alias = "draggableId", skip_serializing_if = "Option::is_none")]
    pub dragged_id: Option<BlockId>,
}

impl DropResult {
    pub fn new(source: DragLocation, destination: Option<DragLocation>) -> Self {
        Self {
            source,
            destination,
            dragged_id: None,
        }
    }

    pub fn with_dragged_id(mut self, id: impl Into<BlockId>) -> Self {
        self.dragged_id = Some(id.into());
        self
    }
}

/// Outcome of applying a mutation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MutationResult {
    /// Builder version after the mutation
    pub version: u64,
    /// Whether the tree or the selection changed
    pub changed: bool,
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum MutationError {
    #[error("Block not found: {0}")]
    NodeNotFound(BlockId),

    #[error("Container not found: {0}")]
    ContainerNotFound(ContainerId),

    #[error("Index {index} out of range for {container} (length {len})")]
    IndexOutOfRange {
        container: ContainerId,
        index: usize,
        len: usize,
    },

    #[error("Would create cycle")]
    CycleDetected,

    #[error("Duplicate block id: {0}")]
    DuplicateId(BlockId),

    #[error("Settings for '{found}' cannot replace settings of a '{expected}' block")]
    TypeMismatch { expected: String, found: String },

    #[error("Block is not a columns block: {0}")]
    NotColumns(BlockId),

    #[error("Dragged block {dragged} is not at {container}[{index}]")]
    StaleDrag {
        dragged: BlockId,
        container: ContainerId,
        index: usize,
    },

    #[error("Dropped outside any container")]
    NoDestination,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_mutation_json_shape() {
        let mutation: Mutation = serde_json::from_value(json!({
            "type": "updateBlock",
            "blockId": "b1",
            "settings": { "title": "Hi" }
        }))
        .unwrap();

        assert_eq!(
            mutation,
            Mutation::UpdateBlock {
                block_id: BlockId::from("b1"),
                settings: json!({ "title": "Hi" }),
            }
        );

        let add = serde_json::to_value(Mutation::AddBlock {
            block_type: BlockType::FeaturedProducts,
        })
        .unwrap();
        assert_eq!(add, json!({ "type": "addBlock", "blockType": "featuredProducts" }));
    }

    #[test]
    fn test_drop_result_accepts_drag_library_names() {
        let mutation: Mutation = serde_json::from_value(json!({
            "type": "reorder",
            "source": { "droppableId": "canvas", "index": 0 },
            "destination": { "droppableId": "col-1", "index": 2 },
            "draggableId": "hero-1"
        }))
        .unwrap();

        match mutation {
            Mutation::Reorder(drop) => {
                assert_eq!(drop.source, DragLocation::new(ContainerId::Canvas, 0));
                assert_eq!(drop.destination, Some(DragLocation::new("col-1", 2)));
                assert_eq!(drop.dragged_id, Some(BlockId::from("hero-1")));
            }
            other => panic!("Expected Reorder, got {:?}", other),
        }
    }

    #[test]
    fn test_missing_destination_is_none() {
        let drop: DropResult = serde_json::from_value(json!({
            "source": { "containerId": "canvas", "index": 1 },
            "destination": null
        }))
        .unwrap();
        assert!(drop.destination.is_none());
        assert!(drop.dragged_id.is_none());
    }
}
