//! Integration tests for the builder

use pagecraft_editor::{Builder, DragLocation, DropResult, Forest};
use pagecraft_model::{
    parse_layout, BlockId, BlockNode, BlockSettings, BlockType, ColumnsSettings, ContainerId,
    SequentialIdGenerator,
};
use serde_json::json;
use std::collections::BTreeSet;

fn builder() -> Builder<SequentialIdGenerator> {
    Builder::new(SequentialIdGenerator::from_seed("page"))
}

fn columns(count: u32) -> BlockSettings {
    BlockSettings::Columns(ColumnsSettings {
        column_count: Some(count),
        ..Default::default()
    })
}

fn children(builder: &Builder<SequentialIdGenerator>, id: &BlockId) -> Vec<BlockId> {
    builder
        .forest()
        .locate(&ContainerId::Block(id.clone()))
        .unwrap()
        .to_vec()
}

fn sample_layout() -> Vec<BlockNode> {
    parse_layout(
        &json!([
            { "id": "hero", "type": "hero", "settings": { "title": "Welcome" } },
            { "id": "section", "type": "section", "settings": { "width": "boxed" }, "children": [
                { "id": "heading", "type": "heading", "settings": { "text": "About", "htmlTag": "h2" } },
                { "id": "cols", "type": "columns", "settings": { "columnCount": 2 }, "children": [
                    { "id": "col-a", "type": "column", "settings": {}, "children": [
                        { "id": "img", "type": "image", "settings": { "src": "/a.png" } }
                    ] },
                    { "id": "col-b", "type": "column", "settings": {}, "children": [] }
                ] }
            ] },
            { "id": "faq", "type": "faq", "settings": { "faqItems": [{ "id": "q1", "question": "Q?", "answer": "A." }] } }
        ])
        .to_string(),
    )
    .unwrap()
}

fn loaded() -> Builder<SequentialIdGenerator> {
    Builder::from_layout(
        sample_layout(),
        Vec::new(),
        SequentialIdGenerator::from_seed("page"),
    )
}

#[test]
fn test_removed_block_cannot_be_found() {
    for id in ["hero", "section", "heading", "cols", "col-a", "img", "faq"] {
        let mut builder = loaded();
        let id = BlockId::from(id);

        assert!(builder.remove_block(&id));
        assert!(builder.forest().find(&id).is_none());
    }
}

#[test]
fn test_column_resize_keeps_leading_columns() {
    for (from, to) in [(2, 4), (4, 1), (3, 3), (1, 0), (0, 2)] {
        let mut builder = builder();
        let id = builder.add_block(BlockType::Columns);
        builder.update_block(&id, columns(from));
        let before = children(&builder, &id);
        assert_eq!(before.len(), from as usize);

        builder.update_block(&id, columns(to));
        let after = children(&builder, &id);

        assert_eq!(after.len(), to as usize);
        let kept = from.min(to) as usize;
        assert_eq!(&after[..kept], &before[..kept]);
    }
}

#[test]
fn test_missing_column_count_counts_as_zero() {
    let mut builder = builder();
    let id = builder.add_block(BlockType::Columns);

    builder.update_block(&id, BlockSettings::empty(BlockType::Columns));
    assert!(children(&builder, &id).is_empty());
}

#[test]
fn test_reorder_within_container_only_changes_order() {
    let mut builder = loaded();
    let before: BTreeSet<_> = builder.forest().canvas().iter().cloned().collect();

    let moved = builder.forest().canvas()[0].clone();
    assert!(builder.reorder(&DropResult::new(
        DragLocation::new(ContainerId::Canvas, 0),
        Some(DragLocation::new(ContainerId::Canvas, 2)),
    )));

    let canvas = builder.forest().canvas();
    let after: BTreeSet<_> = canvas.iter().cloned().collect();
    assert_eq!(before, after);
    assert_eq!(canvas[2], moved);
}

#[test]
fn test_reorder_across_containers_moves_one_block() {
    let mut builder = loaded();
    let total = builder.forest().len();
    let canvas_len = builder.forest().canvas().len();
    let col_b = BlockId::from("col-b");

    assert!(builder.reorder(
        &DropResult::new(
            DragLocation::new(ContainerId::Canvas, 2),
            Some(DragLocation::new(col_b.clone(), 0)),
        )
        .with_dragged_id("faq"),
    ));

    assert_eq!(builder.forest().canvas().len(), canvas_len - 1);
    assert_eq!(children(&builder, &col_b), vec![BlockId::from("faq")]);
    assert_eq!(builder.forest().len(), total);
}

#[test]
fn test_drop_outside_is_noop() {
    let mut builder = loaded();
    let before = builder.serialize().unwrap();
    let version = builder.version();

    assert!(!builder.reorder(&DropResult::new(
        DragLocation::new(ContainerId::Canvas, 0),
        None,
    )));
    assert_eq!(builder.serialize().unwrap(), before);
    assert_eq!(builder.version(), version);
}

#[test]
fn test_stale_drag_is_noop() {
    let mut builder = loaded();
    let before = builder.serialize().unwrap();

    let drop = DropResult::new(
        DragLocation::new(ContainerId::Canvas, 0),
        Some(DragLocation::new(ContainerId::Canvas, 1)),
    )
    .with_dragged_id("faq");

    assert!(!builder.reorder(&drop));
    assert_eq!(builder.serialize().unwrap(), before);
}

#[test]
fn test_move_into_own_descendant_is_noop() {
    let mut builder = loaded();
    let before = builder.serialize().unwrap();

    assert!(!builder.reorder(&DropResult::new(
        DragLocation::new(ContainerId::Canvas, 1),
        Some(DragLocation::new("col-b", 0)),
    )));
    assert_eq!(builder.serialize().unwrap(), before);
}

#[test]
fn test_locate_canvas_is_idempotent() {
    let builder = loaded();
    let first = builder.forest().locate(&ContainerId::Canvas).unwrap().to_vec();
    let second = builder.forest().locate(&ContainerId::Canvas).unwrap().to_vec();
    assert_eq!(first, second);
}

#[test]
fn test_serialize_round_trip() {
    let builder = loaded();
    let json = builder.serialize().unwrap();

    let mut ids = SequentialIdGenerator::from_seed("other");
    let reloaded = Forest::from_blocks(parse_layout(&json).unwrap(), &mut ids);

    assert_eq!(&reloaded, builder.forest());
    assert_eq!(reloaded.to_blocks(), sample_layout());
}

#[test]
fn test_unknown_types_survive_round_trip() {
    let raw = json!([
        { "id": "a", "type": "productGallery", "settings": { "rows": 2, "deep": { "x": [1] } } },
        { "id": "b", "type": "legacyBox", "settings": {}, "children": [
            { "id": "c", "type": "heading", "settings": { "text": "Inside" } }
        ] }
    ]);

    let mut builder = builder();
    builder.load(&raw.to_string()).unwrap();

    let saved: serde_json::Value = serde_json::from_str(&builder.serialize().unwrap()).unwrap();
    assert_eq!(saved, raw);
    assert!(builder.forest().locate(&ContainerId::block("b")).is_none());
}

#[test]
fn test_duplicate_ids_do_not_crash_load() {
    let raw = json!([
        { "id": "x", "type": "hero", "settings": {} },
        { "id": "x", "type": "heading", "settings": {} }
    ]);

    let mut builder = builder();
    builder.load(&raw.to_string()).unwrap();

    let canvas = builder.forest().canvas();
    assert_eq!(canvas.len(), 2);
    assert_ne!(canvas[0], canvas[1]);
}

#[test]
fn test_columns_scenario() {
    let mut builder = builder();
    let id = builder.add_block(BlockType::Columns);

    let node = builder.forest().find(&id).unwrap();
    assert_eq!(node.block_type(), Some(BlockType::Columns));
    assert_eq!(node.settings().column_count(), Some(2));
    let first_column = node.children()[0].clone();
    for column in node.children() {
        let column = builder.forest().find(column).unwrap();
        assert_eq!(column.block_type(), Some(BlockType::Column));
        assert!(column.children().is_empty());
    }

    builder.update_block(&id, columns(4));
    assert_eq!(children(&builder, &id).len(), 4);

    builder.update_block(&id, columns(1));
    assert_eq!(children(&builder, &id), vec![first_column]);
}

#[test]
fn test_add_then_remove_scenario() {
    let mut builder = builder();
    let id = builder.add_block(BlockType::Hero);
    assert_eq!(builder.selected(), Some(&id));

    assert!(builder.remove_block(&id));
    assert!(builder.forest().canvas().is_empty());
    assert!(builder.selected().is_none());
}

#[test]
fn test_drag_leaf_into_section_scenario() {
    let mut builder = builder();
    let hero = builder.add_block(BlockType::Hero);
    let section = builder.add_block(BlockType::Section);
    let before: BTreeSet<_> = builder.forest().ids().into_iter().collect();

    assert!(builder.reorder(&DropResult::new(
        DragLocation::new(ContainerId::Canvas, 0),
        Some(DragLocation::new(section.clone(), 0)),
    )));

    assert!(!builder.forest().canvas().contains(&hero));
    assert_eq!(children(&builder, &section), vec![hero]);
    let after: BTreeSet<_> = builder.forest().ids().into_iter().collect();
    assert_eq!(before, after);
}

#[test]
fn test_removing_ancestor_clears_selection() {
    let mut builder = loaded();
    assert!(builder.select(&BlockId::from("img")));

    builder.remove_block(&BlockId::from("section"));
    assert!(builder.selected().is_none());
}

#[test]
fn test_shrinking_columns_clears_selection_inside() {
    let mut builder = loaded();
    builder.select(&BlockId::from("img"));

    builder.update_block(&BlockId::from("cols"), columns(0));
    assert!(builder.selected().is_none());
}

#[test]
fn test_stale_ids_are_silent_noops() {
    let mut builder = loaded();
    let ghost = BlockId::from("ghost");
    let version = builder.version();

    assert!(!builder.remove_block(&ghost));
    assert!(!builder.update_block(&ghost, BlockSettings::empty(BlockType::Hero)));
    assert_eq!(builder.version(), version);
}
