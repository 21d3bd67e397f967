use criterion::{black_box, criterion_group, criterion_main, Criterion};
use pagecraft_editor::{Builder, DragLocation, DropResult, Forest};
use pagecraft_model::{BlockNode, BlockType, ContainerId, IdGenerator, SequentialIdGenerator};

/// `sections` sections, each holding a columns block with `columns` columns
/// of three leaf blocks
fn layout(sections: usize, columns: u32) -> Vec<BlockNode> {
    let mut ids = SequentialIdGenerator::from_seed("bench");
    (0..sections)
        .map(|_| {
            let mut grid = BlockNode::columns(&mut ids, columns);
            for column in &mut grid.children {
                column.children = vec![
                    BlockNode::empty(ids.next_id(), BlockType::Heading),
                    BlockNode::empty(ids.next_id(), BlockType::RichText),
                    BlockNode::empty(ids.next_id(), BlockType::Button),
                ];
            }
            BlockNode::empty(ids.next_id(), BlockType::Section).with_children(vec![grid])
        })
        .collect()
}

fn load_forest(c: &mut Criterion) {
    let blocks = layout(50, 3);

    c.bench_function("load_forest", |b| {
        b.iter(|| {
            let mut ids = SequentialIdGenerator::from_seed("load");
            Forest::from_blocks(black_box(blocks.clone()), &mut ids)
        })
    });
}

fn move_between_sections(c: &mut Criterion) {
    let blocks = layout(50, 3);
    let mut ids = SequentialIdGenerator::from_seed("move");
    let mut forest = Forest::from_blocks(blocks, &mut ids);
    let canvas = forest.canvas().to_vec();
    let first = ContainerId::Block(canvas[0].clone());
    let last = ContainerId::Block(canvas[canvas.len() - 1].clone());

    c.bench_function("move_between_sections", |b| {
        b.iter(|| {
            forest
                .move_node(&first, 0, &last, 0)
                .and_then(|_| forest.move_node(&last, 0, &first, 0))
        })
    });
}

fn serialize_builder(c: &mut Criterion) {
    let builder = Builder::from_layout(
        layout(50, 3),
        Vec::new(),
        SequentialIdGenerator::from_seed("ser"),
    );

    c.bench_function("serialize_builder", |b| b.iter(|| builder.serialize()));
}

fn drag_reorder(c: &mut Criterion) {
    let mut builder = Builder::from_layout(
        layout(50, 3),
        Vec::new(),
        SequentialIdGenerator::from_seed("drag"),
    );
    let drop = DropResult::new(
        DragLocation::new(ContainerId::Canvas, 0),
        Some(DragLocation::new(ContainerId::Canvas, 49)),
    );

    c.bench_function("drag_reorder", |b| b.iter(|| builder.reorder(black_box(&drop))));
}

criterion_group!(
    benches,
    load_forest,
    move_between_sections,
    serialize_builder,
    drag_reorder
);
criterion_main!(benches);
