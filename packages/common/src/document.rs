//! # Page Schema
//!
//! The persisted shape of a landing page:
//!
//! ```text
//! PageDocument
//!  ├─ id, slug
//!  ├─ meta { title, description?, favicon?, ogImage?, theme? }
//!  └─ blocks: [ { id, type, ...props } ]   (rendered top to bottom)
//! ```
//!
//! A block's properties are an ordered, type-specific bag that only the
//! exporter inspects. Key order is insertion order, so the same document
//! always serializes the same way.
//!
//! Blocks sit behind `Arc`, so cloning a document copies the block list but
//! shares every block. Use [`PageDocument::block_mut`] to change one block;
//! it copies that block only while another snapshot still holds it.

use crate::block_type::BlockType;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::HashSet;
use std::fmt;
use std::sync::Arc;

/// Ordered property bag of a block
pub type Props = Map<String, Value>;

/// Keys owned by the block itself; never part of the property bag
pub const RESERVED_KEYS: [&str; 2] = ["id", "type"];

/// A block's `type` tag.
///
/// Documents written by a newer builder may carry tags this build does not
/// know. Those load as `Unknown` so the rest of the page stays editable.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum BlockKind {
    Known(BlockType),
    Unknown(String),
}

impl BlockKind {
    pub fn as_str(&self) -> &str {
        match self {
            BlockKind::Known(block_type) => block_type.as_str(),
            BlockKind::Unknown(tag) => tag,
        }
    }

    pub fn block_type(&self) -> Option<BlockType> {
        match self {
            BlockKind::Known(block_type) => Some(*block_type),
            BlockKind::Unknown(_) => None,
        }
    }
}

impl From<BlockType> for BlockKind {
    fn from(block_type: BlockType) -> Self {
        BlockKind::Known(block_type)
    }
}

impl fmt::Display for BlockKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One configured page section
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Block {
    /// Unique within the document, stable across moves and updates
    pub id: String,

    /// Never changes after creation
    #[serde(rename = "type")]
    pub kind: BlockKind,

    /// Type-specific properties (flattened next to `id` and `type`)
    #[serde(flatten)]
    pub props: Props,
}

impl Block {
    pub fn new(id: impl Into<String>, kind: impl Into<BlockKind>, props: Props) -> Self {
        let mut block = Self {
            id: id.into(),
            kind: kind.into(),
            props,
        };
        block.strip_reserved_keys();
        block
    }

    /// Drop `id`/`type` entries that leaked into the property bag
    pub fn strip_reserved_keys(&mut self) {
        for key in RESERVED_KEYS {
            self.props.shift_remove(key);
        }
    }

    pub fn block_type(&self) -> Option<BlockType> {
        self.kind.block_type()
    }

    /// Shallow-merge `partial` into the property bag.
    ///
    /// Existing keys are overwritten in place, new keys are appended.
    /// `id` and `type` in `partial` are ignored. Returns whether anything changed.
    pub fn merge_props(&mut self, partial: &Props) -> bool {
        let mut changed = false;

        for (key, value) in partial {
            if RESERVED_KEYS.contains(&key.as_str()) {
                continue;
            }
            if self.props.get(key) != Some(value) {
                self.props.insert(key.clone(), value.clone());
                changed = true;
            }
        }

        changed
    }

    /// Whether merging `partial` would change any property
    pub fn would_change(&self, partial: &Props) -> bool {
        partial
            .iter()
            .any(|(key, value)| !RESERVED_KEYS.contains(&key.as_str()) && self.props.get(key) != Some(value))
    }

    /// Recursive copy of this block under a new id
    pub fn duplicate(&self, new_id: impl Into<String>) -> Self {
        Self {
            id: new_id.into(),
            kind: self.kind.clone(),
            props: self.props.clone(),
        }
    }
}

/// Optional theme hints
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageTheme {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub primary_color: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub secondary_color: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub font_family: Option<String>,
}

/// Page-level metadata
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageMeta {
    pub title: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub favicon: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub og_image: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub theme: Option<PageTheme>,
}

impl Default for PageMeta {
    fn default() -> Self {
        Self {
            title: "New Page".to_string(),
            description: Some(String::new()),
            favicon: None,
            og_image: None,
            theme: None,
        }
    }
}

pub const DEFAULT_SLUG: &str = "new-page";

/// The unit of import and export
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageDocument {
    pub id: String,
    pub slug: String,
    pub meta: PageMeta,
    pub blocks: Vec<Arc<Block>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<String>,
}

impl PageDocument {
    /// Fresh page: zero blocks, default meta
    pub fn empty(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            slug: DEFAULT_SLUG.to_string(),
            meta: PageMeta::default(),
            blocks: Vec::new(),
            created_at: None,
            updated_at: None,
        }
    }

    pub fn position(&self, block_id: &str) -> Option<usize> {
        self.blocks.iter().position(|b| b.id == block_id)
    }

    pub fn find_block(&self, block_id: &str) -> Option<&Block> {
        self.blocks.iter().find(|b| b.id == block_id).map(|b| &**b)
    }

    /// Writable access to one block, copying it first if it is shared
    pub fn block_mut(&mut self, block_id: &str) -> Option<&mut Block> {
        self.blocks
            .iter_mut()
            .find(|b| b.id == block_id)
            .map(Arc::make_mut)
    }

    pub fn push_block(&mut self, block: Block) {
        self.blocks.push(Arc::new(block));
    }

    pub fn contains_block(&self, block_id: &str) -> bool {
        self.position(block_id).is_some()
    }

    pub fn block_ids(&self) -> impl Iterator<Item = &str> {
        self.blocks.iter().map(|b| b.id.as_str())
    }

    /// First block id that appears more than once, if any
    pub fn duplicate_block_id(&self) -> Option<&str> {
        let mut seen = HashSet::new();
        self.block_ids().find(|id| !seen.insert(*id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn props(value: Value) -> Props {
        match value {
            Value::Object(map) => map,
            _ => panic!("expected object"),
        }
    }

    #[test]
    fn test_block_flattens_props_next_to_id_and_type() {
        let block = Block::new(
            "b1",
            BlockType::HeroSection,
            props(json!({ "heading": "Hi", "overlay": true })),
        );

        let value = serde_json::to_value(&block).unwrap();
        assert_eq!(
            value,
            json!({ "id": "b1", "type": "heroSection", "heading": "Hi", "overlay": true })
        );
    }

    #[test]
    fn test_unknown_block_type_loads_as_unknown() {
        let block: Block = serde_json::from_value(json!({
            "id": "x",
            "type": "carousel",
            "slides": []
        }))
        .unwrap();

        assert_eq!(block.kind, BlockKind::Unknown("carousel".to_string()));
        assert_eq!(block.block_type(), None);
        assert!(block.props.contains_key("slides"));
    }

    #[test]
    fn test_new_strips_reserved_keys() {
        let block = Block::new(
            "b1",
            BlockType::Footer,
            props(json!({ "id": "other", "type": "navbar", "copyright": "c" })),
        );

        assert_eq!(block.props.len(), 1);
        assert_eq!(block.id, "b1");
        assert_eq!(block.block_type(), Some(BlockType::Footer));
    }

    #[test]
    fn test_merge_props_keeps_key_positions() {
        let mut block = Block::new(
            "b1",
            BlockType::HeroSection,
            props(json!({ "heading": "Old", "subtext": "s" })),
        );

        let changed = block.merge_props(&props(json!({
            "heading": "New",
            "alignment": "center",
            "id": "hijack",
            "type": "footer"
        })));

        assert!(changed);
        let keys: Vec<&str> = block.props.keys().map(|k| k.as_str()).collect();
        assert_eq!(keys, vec!["heading", "subtext", "alignment"]);
        assert_eq!(block.props["heading"], json!("New"));
        assert_eq!(block.id, "b1");
        assert_eq!(block.block_type(), Some(BlockType::HeroSection));
    }

    #[test]
    fn test_merge_identical_props_reports_no_change() {
        let mut block = Block::new("b1", BlockType::Footer, props(json!({ "copyright": "c" })));
        assert!(!block.merge_props(&props(json!({ "copyright": "c" }))));
    }

    #[test]
    fn test_duplicate_copies_nested_props() {
        let block = Block::new(
            "b1",
            BlockType::FaqAccordion,
            props(json!({ "items": [{ "question": "q", "answer": "a" }] })),
        );

        let mut copy = block.duplicate("b2");
        copy.props["items"][0]["answer"] = json!("changed");

        assert_eq!(block.props["items"][0]["answer"], json!("a"));
        assert_eq!(copy.id, "b2");
        assert_eq!(copy.kind, block.kind);
    }

    #[test]
    fn test_page_requires_title_and_blocks() {
        let missing_blocks = json!({ "id": "p", "slug": "s", "meta": { "title": "t" } });
        assert!(serde_json::from_value::<PageDocument>(missing_blocks).is_err());

        let missing_title = json!({ "id": "p", "slug": "s", "meta": {}, "blocks": [] });
        assert!(serde_json::from_value::<PageDocument>(missing_title).is_err());
    }

    #[test]
    fn test_duplicate_block_id_detection() {
        let mut page = PageDocument::empty("p");
        page.push_block(Block::new("a", BlockType::Navbar, Props::new()));
        page.push_block(Block::new("b", BlockType::Footer, Props::new()));
        assert_eq!(page.duplicate_block_id(), None);

        page.push_block(Block::new("a", BlockType::Footer, Props::new()));
        assert_eq!(page.duplicate_block_id(), Some("a"));
    }

    #[test]
    fn test_clone_shares_blocks_until_written() {
        let mut page = PageDocument::empty("p");
        page.push_block(Block::new("a", BlockType::Navbar, Props::new()));
        page.push_block(Block::new("b", BlockType::Footer, Props::new()));

        let mut next = page.clone();
        next.block_mut("b").unwrap().props.insert("copyright".to_string(), json!("c"));

        assert!(Arc::ptr_eq(&page.blocks[0], &next.blocks[0]));
        assert!(!Arc::ptr_eq(&page.blocks[1], &next.blocks[1]));
        assert!(page.blocks[1].props.is_empty());
        assert!(next.block_mut("missing").is_none());
    }

    mod merge_properties {
        use super::*;
        use proptest::prelude::*;

        fn key() -> impl Strategy<Value = String> {
            prop_oneof![
                Just("id".to_string()),
                Just("type".to_string()),
                "[a-e]".prop_map(String::from),
            ]
        }

        fn bag() -> impl Strategy<Value = Props> {
            proptest::collection::vec((key(), any::<i32>()), 0..6).prop_map(|pairs| {
                pairs
                    .into_iter()
                    .map(|(k, v)| (k, Value::from(v)))
                    .collect()
            })
        }

        proptest! {
            #[test]
            fn merge_keeps_existing_positions_and_reserved_keys_out(
                initial in bag(),
                partial in bag(),
            ) {
                let mut block = Block::new("b", BlockType::Footer, initial);
                let before: Vec<String> = block.props.keys().cloned().collect();

                block.merge_props(&partial);

                let after: Vec<String> = block.props.keys().cloned().collect();
                prop_assert_eq!(&after[..before.len()], &before[..]);
                prop_assert!(!block.props.contains_key("id"));
                prop_assert!(!block.props.contains_key("type"));
                prop_assert_eq!(block.id.as_str(), "b");

                for (k, v) in &partial {
                    if !RESERVED_KEYS.contains(&k.as_str()) {
                        prop_assert_eq!(&block.props[k], v);
                    }
                }
            }
        }
    }
}
