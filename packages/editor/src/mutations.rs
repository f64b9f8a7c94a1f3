//! # Page Mutations
//!
//! Intent-preserving operations on a page document.
//!
//! ## Mutation Semantics
//!
//! ### AddBlock
//! - New id, registry default props for the type
//! - Inserted at `index` when `index <= len`, appended otherwise
//! - Unknown type tags are rejected before anything changes
//!
//! ### MoveBlock
//! - Splice out at `from_index`, splice in at `to_index`
//! - `to_index` is relative to the list *after* removal, the convention
//!   sortable drag-and-drop lists use
//! - `from_index` out of range is a no-op, `to_index` is clamped
//!
//! ### DuplicateBlock
//! - Deep copy under a fresh id, inserted right after the source
//!
//! ### UpdateBlockProps
//! - Shallow merge; `id` and `type` are never overwritten
//!
//! ### RemoveBlock
//! - Idempotent: removing a missing id is a no-op, not an error

use pagecraft_common::{registry, Block, BlockType, IdGenerator, PageDocument, Props};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use thiserror::Error;

/// Semantic mutations (intent-preserving operations)
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub enum Mutation {
    /// Insert a new block of a registry type
    AddBlock {
        block_type: String,
        index: Option<usize>,
    },

    RemoveBlock {
        block_id: String,
    },

    /// Reorder one block
    MoveBlock {
        from_index: usize,
        to_index: usize,
    },

    DuplicateBlock {
        block_id: String,
    },

    /// Shallow-merge properties into a block
    UpdateBlockProps {
        block_id: String,
        props: Props,
    },

    /// Edit page-level metadata; `None` fields are left alone
    UpdateMeta {
        title: Option<String>,
        description: Option<String>,
        slug: Option<String>,
    },
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum MutationError {
    #[error("Invalid block type: {0}")]
    InvalidBlockType(String),
}

/// What a mutation did to the document
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MutationEffect {
    Added { block_id: String, index: usize },
    Removed { block_id: String },
    Moved { from_index: usize, to_index: usize },
    Duplicated { source_id: String, block_id: String },
    Updated { block_id: String },
    MetaUpdated,
    /// Valid request that left the document as it was
    Unchanged,
}

impl Mutation {
    /// Reject the mutation without touching any document
    pub fn validate(&self) -> Result<(), MutationError> {
        if let Mutation::AddBlock { block_type, .. } = self {
            Self::parse_block_type(block_type)?;
        }
        Ok(())
    }

    /// Apply mutation to a working copy of the document
    pub fn apply(
        &self,
        doc: &mut PageDocument,
        ids: &mut IdGenerator,
    ) -> Result<MutationEffect, MutationError> {
        // Validate first
        self.validate()?;

        match self {
            Mutation::AddBlock { block_type, index } => {
                let block_type = Self::parse_block_type(block_type)?;
                Ok(Self::apply_add(doc, ids, block_type, *index))
            }

            Mutation::RemoveBlock { block_id } => Ok(Self::apply_remove(doc, block_id)),

            Mutation::MoveBlock { from_index, to_index } => {
                Ok(Self::apply_move(doc, *from_index, *to_index))
            }

            Mutation::DuplicateBlock { block_id } => Ok(Self::apply_duplicate(doc, ids, block_id)),

            Mutation::UpdateBlockProps { block_id, props } => {
                Ok(Self::apply_update_props(doc, block_id, props))
            }

            Mutation::UpdateMeta { title, description, slug } => Ok(Self::apply_update_meta(
                doc,
                title.as_deref(),
                description.as_deref(),
                slug.as_deref(),
            )),
        }
    }

    fn parse_block_type(tag: &str) -> Result<BlockType, MutationError> {
        tag.parse::<BlockType>()
            .map_err(|_| MutationError::InvalidBlockType(tag.to_string()))
    }

    fn apply_add(
        doc: &mut PageDocument,
        ids: &mut IdGenerator,
        block_type: BlockType,
        index: Option<usize>,
    ) -> MutationEffect {
        let block_id = ids.new_id_avoiding(|id| doc.contains_block(id));
        let block = Block::new(
            block_id.clone(),
            block_type,
            registry::entry(block_type).default_props(),
        );

        let index = match index {
            Some(index) if index <= doc.blocks.len() => index,
            _ => doc.blocks.len(),
        };
        doc.blocks.insert(index, Arc::new(block));

        MutationEffect::Added { block_id, index }
    }

    fn apply_remove(doc: &mut PageDocument, block_id: &str) -> MutationEffect {
        match doc.position(block_id) {
            Some(index) => {
                doc.blocks.remove(index);
                MutationEffect::Removed {
                    block_id: block_id.to_string(),
                }
            }
            None => MutationEffect::Unchanged,
        }
    }

    fn apply_move(doc: &mut PageDocument, from_index: usize, to_index: usize) -> MutationEffect {
        if from_index >= doc.blocks.len() {
            return MutationEffect::Unchanged;
        }

        let block = doc.blocks.remove(from_index);
        let to_index = to_index.min(doc.blocks.len());
        doc.blocks.insert(to_index, block);

        if to_index == from_index {
            MutationEffect::Unchanged
        } else {
            MutationEffect::Moved { from_index, to_index }
        }
    }

    fn apply_duplicate(doc: &mut PageDocument, ids: &mut IdGenerator, block_id: &str) -> MutationEffect {
        let Some(index) = doc.position(block_id) else {
            return MutationEffect::Unchanged;
        };

        let new_id = ids.new_id_avoiding(|id| doc.contains_block(id));
        let copy = doc.blocks[index].duplicate(new_id.clone());
        doc.blocks.insert(index + 1, Arc::new(copy));

        MutationEffect::Duplicated {
            source_id: block_id.to_string(),
            block_id: new_id,
        }
    }

    fn apply_update_props(doc: &mut PageDocument, block_id: &str, props: &Props) -> MutationEffect {
        // Only a block that actually changes gets copied
        let changes = doc
            .find_block(block_id)
            .is_some_and(|block| block.would_change(props));
        if !changes {
            return MutationEffect::Unchanged;
        }

        if let Some(block) = doc.block_mut(block_id) {
            block.merge_props(props);
        }

        MutationEffect::Updated {
            block_id: block_id.to_string(),
        }
    }

    fn apply_update_meta(
        doc: &mut PageDocument,
        title: Option<&str>,
        description: Option<&str>,
        slug: Option<&str>,
    ) -> MutationEffect {
        let before = (doc.meta.clone(), doc.slug.clone());

        if let Some(title) = title {
            doc.meta.title = title.to_string();
        }
        if let Some(description) = description {
            doc.meta.description = Some(description.to_string());
        }
        if let Some(slug) = slug {
            doc.slug = slug.to_string();
        }

        if before == (doc.meta.clone(), doc.slug.clone()) {
            MutationEffect::Unchanged
        } else {
            MutationEffect::MetaUpdated
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn page_with(types: &[BlockType]) -> (PageDocument, IdGenerator) {
        let mut doc = PageDocument::empty("page");
        let mut ids = IdGenerator::from_seed("t");
        for block_type in types {
            Mutation::AddBlock {
                block_type: block_type.as_str().to_string(),
                index: None,
            }
            .apply(&mut doc, &mut ids)
            .unwrap();
        }
        (doc, ids)
    }

    fn kinds(doc: &PageDocument) -> Vec<BlockType> {
        doc.blocks.iter().filter_map(|b| b.block_type()).collect()
    }

    #[test]
    fn test_add_uses_registry_defaults() {
        let (doc, _) = page_with(&[BlockType::FinalCta]);
        let block = &doc.blocks[0];

        assert_eq!(block.id, "t-1");
        assert_eq!(block.props["heading"], json!("Ready to get started?"));
        assert_eq!(block.props["backgroundStyle"], json!("gradient"));
    }

    #[test]
    fn test_add_at_index_and_out_of_range_index() {
        let (mut doc, mut ids) = page_with(&[BlockType::Navbar, BlockType::Footer]);

        let effect = Mutation::AddBlock {
            block_type: "heroSection".to_string(),
            index: Some(1),
        }
        .apply(&mut doc, &mut ids)
        .unwrap();
        assert!(matches!(effect, MutationEffect::Added { index: 1, .. }));

        Mutation::AddBlock {
            block_type: "faqAccordion".to_string(),
            index: Some(99),
        }
        .apply(&mut doc, &mut ids)
        .unwrap();

        assert_eq!(
            kinds(&doc),
            vec![
                BlockType::Navbar,
                BlockType::HeroSection,
                BlockType::Footer,
                BlockType::FaqAccordion,
            ]
        );
    }

    #[test]
    fn test_add_rejects_unknown_type_without_changes() {
        let (mut doc, mut ids) = page_with(&[BlockType::Navbar]);
        let before = doc.clone();

        let err = Mutation::AddBlock {
            block_type: "carousel".to_string(),
            index: None,
        }
        .apply(&mut doc, &mut ids)
        .unwrap_err();

        assert_eq!(err, MutationError::InvalidBlockType("carousel".to_string()));
        assert_eq!(doc, before);
    }

    #[test]
    fn test_move_forward_is_relative_to_list_after_removal() {
        let (mut doc, mut ids) =
            page_with(&[BlockType::Navbar, BlockType::HeroSection, BlockType::Footer]);

        Mutation::MoveBlock { from_index: 0, to_index: 2 }
            .apply(&mut doc, &mut ids)
            .unwrap();

        assert_eq!(
            kinds(&doc),
            vec![
                BlockType::HeroSection,
                BlockType::Footer,
                BlockType::Navbar,
            ]
        );
    }

    #[test]
    fn test_move_out_of_range() {
        let (mut doc, mut ids) = page_with(&[BlockType::Navbar, BlockType::Footer]);
        let before = doc.clone();

        let effect = Mutation::MoveBlock { from_index: 5, to_index: 0 }
            .apply(&mut doc, &mut ids)
            .unwrap();
        assert_eq!(effect, MutationEffect::Unchanged);
        assert_eq!(doc, before);

        let effect = Mutation::MoveBlock { from_index: 0, to_index: 40 }
            .apply(&mut doc, &mut ids)
            .unwrap();
        assert_eq!(effect, MutationEffect::Moved { from_index: 0, to_index: 1 });
        assert_eq!(kinds(&doc), vec![BlockType::Footer, BlockType::Navbar]);
    }

    #[test]
    fn test_duplicate_inserts_after_source() {
        let (mut doc, mut ids) = page_with(&[BlockType::Navbar, BlockType::Footer]);
        let source_id = doc.blocks[0].id.clone();

        let effect = Mutation::DuplicateBlock { block_id: source_id.clone() }
            .apply(&mut doc, &mut ids)
            .unwrap();

        let MutationEffect::Duplicated { block_id, .. } = effect else {
            panic!("expected duplicate effect");
        };
        assert_eq!(doc.blocks.len(), 3);
        assert_eq!(doc.blocks[1].id, block_id);
        assert_ne!(block_id, source_id);
        assert_eq!(doc.blocks[1].props, doc.blocks[0].props);
    }

    #[test]
    fn test_missing_ids_are_noops() {
        let (mut doc, mut ids) = page_with(&[BlockType::Navbar]);
        let before = doc.clone();

        for mutation in [
            Mutation::RemoveBlock { block_id: "nope".to_string() },
            Mutation::DuplicateBlock { block_id: "nope".to_string() },
            Mutation::UpdateBlockProps {
                block_id: "nope".to_string(),
                props: Props::new(),
            },
        ] {
            assert_eq!(mutation.apply(&mut doc, &mut ids).unwrap(), MutationEffect::Unchanged);
        }
        assert_eq!(doc, before);
    }

    #[test]
    fn test_update_meta() {
        let (mut doc, mut ids) = page_with(&[]);

        let effect = Mutation::UpdateMeta {
            title: Some("Launch".to_string()),
            description: None,
            slug: Some("launch".to_string()),
        }
        .apply(&mut doc, &mut ids)
        .unwrap();

        assert_eq!(effect, MutationEffect::MetaUpdated);
        assert_eq!(doc.meta.title, "Launch");
        assert_eq!(doc.slug, "launch");
        assert_eq!(doc.meta.description, Some(String::new()));
    }

    #[test]
    fn test_mutation_serializes() {
        let mutation = Mutation::MoveBlock { from_index: 1, to_index: 0 };
        let json = serde_json::to_string(&mutation).unwrap();
        let back: Mutation = serde_json::from_str(&json).unwrap();
        assert_eq!(back, mutation);
    }
}
