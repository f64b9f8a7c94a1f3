//! Randomized mutation sequences checked against a plain list model

use pagecraft_editor::{BlockType, IdGenerator, Mutation, PageStore};
use proptest::prelude::*;
use std::collections::HashSet;

#[derive(Debug, Clone)]
enum Op {
    Add(usize, Option<usize>),
    Remove(usize),
    Move(usize, usize),
    Duplicate(usize),
    Select(usize),
}

fn op() -> impl Strategy<Value = Op> {
    prop_oneof![
        (0..BlockType::ALL.len(), proptest::option::of(0usize..8)).prop_map(|(t, i)| Op::Add(t, i)),
        (0usize..8).prop_map(Op::Remove),
        (0usize..8, 0usize..8).prop_map(|(f, t)| Op::Move(f, t)),
        (0usize..8).prop_map(Op::Duplicate),
        (0usize..8).prop_map(Op::Select),
    ]
}

/// Block id at `slot`, or a missing id once past the end
fn id_at(model: &[(String, BlockType)], slot: usize) -> String {
    model
        .get(slot)
        .map(|(id, _)| id.clone())
        .unwrap_or_else(|| "missing".to_string())
}

proptest! {
    #[test]
    fn store_matches_list_model(ops in proptest::collection::vec(op(), 0..40)) {
        let mut store = PageStore::with_id_generator(IdGenerator::from_seed("p"));
        let mut model: Vec<(String, BlockType)> = Vec::new();

        for op in ops {
            match op {
                Op::Add(t, index) => {
                    let block_type = BlockType::ALL[t];
                    let id = store.add_block(block_type.as_str(), index).unwrap();
                    let at = index.filter(|i| *i <= model.len()).unwrap_or(model.len());
                    model.insert(at, (id.clone(), block_type));
                    prop_assert_eq!(store.selected_block_id(), Some(id.as_str()));
                }
                Op::Remove(slot) => {
                    let id = id_at(&model, slot);
                    store.remove_block(&id);
                    model.retain(|(existing, _)| *existing != id);
                }
                Op::Move(from, to) => {
                    store.apply(Mutation::MoveBlock { from_index: from, to_index: to }).unwrap();
                    if from < model.len() {
                        let entry = model.remove(from);
                        model.insert(to.min(model.len()), entry);
                    }
                }
                Op::Duplicate(slot) => {
                    let id = id_at(&model, slot);
                    match store.duplicate_block(&id) {
                        Some(copy) => {
                            let block_type = model[slot].1;
                            model.insert(slot + 1, (copy, block_type));
                        }
                        None => prop_assert!(slot >= model.len()),
                    }
                }
                Op::Select(slot) => {
                    let id = id_at(&model, slot);
                    store.select_block(Some(&id));
                }
            }

            let document = store.document();
            let actual: Vec<(String, BlockType)> = document
                .blocks
                .iter()
                .map(|b| (b.id.clone(), b.block_type().unwrap()))
                .collect();
            prop_assert_eq!(&actual, &model);

            let unique: HashSet<&str> = document.block_ids().collect();
            prop_assert_eq!(unique.len(), document.blocks.len());

            if let Some(selected) = store.selected_block_id() {
                prop_assert!(document.contains_block(selected));
            }

            let exported = store.export_page().unwrap();
            let mut reloaded = PageStore::with_id_generator(IdGenerator::from_seed("r"));
            reloaded.import_page(&exported).unwrap();
            prop_assert_eq!(reloaded.document(), document);
        }
    }
}
