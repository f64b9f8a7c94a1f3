//! # Page Store
//!
//! Owns the one canonical page document and the editor session next to it.
//!
//! Every mutation works on a copy of the current document and, when the copy
//! differs, publishes it as a new immutable snapshot:
//!
//! ```text
//! intent → Mutation → copy → apply → Arc<PageDocument> snapshot → re-render
//! ```
//!
//! Readers hold `Arc` snapshots and never observe a half-applied change.

use crate::mutations::{Mutation, MutationEffect};
use crate::session::{EditorSession, Viewport};
use crate::EditorError;
use pagecraft_common::{IdGenerator, PageDocument, Props};
use std::sync::Arc;
use tracing::{debug, warn};

/// Result of a store mutation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MutationResult {
    /// Document version after the mutation
    pub version: u64,
    pub effect: MutationEffect,
}

/// Editable page with its session state
#[derive(Debug)]
pub struct PageStore {
    document: Arc<PageDocument>,
    session: EditorSession,
    ids: IdGenerator,
    /// Increments on every published snapshot
    version: u64,
}

impl PageStore {
    /// Empty page with randomly seeded ids
    #[cfg(feature = "random-ids")]
    pub fn new() -> Self {
        Self::with_id_generator(IdGenerator::random())
    }

    /// Empty page drawing ids from `ids`
    pub fn with_id_generator(mut ids: IdGenerator) -> Self {
        let document = PageDocument::empty(ids.new_id());

        Self {
            document: Arc::new(document),
            session: EditorSession::new(),
            ids,
            version: 0,
        }
    }

    /// Store seeded with an existing document
    pub fn from_document(document: PageDocument, ids: IdGenerator) -> Result<Self, EditorError> {
        let mut store = Self::with_id_generator(ids);
        store.set_page(document)?;
        store.version = 0;
        Ok(store)
    }

    /// Current document
    pub fn document(&self) -> &PageDocument {
        &self.document
    }

    /// Shared handle to the current snapshot
    pub fn snapshot(&self) -> Arc<PageDocument> {
        Arc::clone(&self.document)
    }

    pub fn session(&self) -> &EditorSession {
        &self.session
    }

    pub fn version(&self) -> u64 {
        self.version
    }

    pub fn selected_block_id(&self) -> Option<&str> {
        self.session.selected_block_id.as_deref()
    }

    /// Apply a mutation.
    ///
    /// On error the document and session are left exactly as they were.
    pub fn apply(&mut self, mutation: Mutation) -> Result<MutationResult, EditorError> {
        mutation.validate()?;

        let mut next = PageDocument::clone(&self.document);
        let effect = mutation.apply(&mut next, &mut self.ids)?;

        if effect != MutationEffect::Unchanged {
            self.publish(next);
        }

        match &effect {
            MutationEffect::Added { block_id, index } => {
                debug!(block_id = %block_id, index, "Added block");
                if !self.session.is_preview_mode {
                    self.session.selected_block_id = Some(block_id.clone());
                }
            }
            MutationEffect::Removed { block_id } => {
                debug!(block_id = %block_id, "Removed block");
                if self.session.is_selected(block_id) {
                    self.session.clear_selection();
                }
            }
            MutationEffect::Moved { from_index, to_index } => {
                debug!(from_index, to_index, "Moved block");
            }
            MutationEffect::Duplicated { source_id, block_id } => {
                debug!(source_id = %source_id, block_id = %block_id, "Duplicated block");
            }
            MutationEffect::Updated { block_id } => {
                debug!(block_id = %block_id, "Updated block props");
            }
            MutationEffect::MetaUpdated => debug!("Updated page meta"),
            MutationEffect::Unchanged => debug!(?mutation, "Mutation left document unchanged"),
        }

        Ok(MutationResult {
            version: self.version,
            effect,
        })
    }

    /// Add a block of `block_type` and select it (unless previewing);
    /// returns the new block id
    pub fn add_block(&mut self, block_type: &str, index: Option<usize>) -> Result<String, EditorError> {
        let result = self.apply(Mutation::AddBlock {
            block_type: block_type.to_string(),
            index,
        })?;

        let MutationEffect::Added { block_id, .. } = result.effect else {
            return Err(EditorError::BlockNotAdded(block_type.to_string()));
        };
        Ok(block_id)
    }

    pub fn remove_block(&mut self, block_id: &str) {
        self.apply_infallible(Mutation::RemoveBlock {
            block_id: block_id.to_string(),
        });
    }

    pub fn move_block(&mut self, from_index: usize, to_index: usize) {
        self.apply_infallible(Mutation::MoveBlock { from_index, to_index });
    }

    /// Duplicate a block; returns the copy's id, `None` if `block_id` is missing
    pub fn duplicate_block(&mut self, block_id: &str) -> Option<String> {
        match self.apply_infallible(Mutation::DuplicateBlock {
            block_id: block_id.to_string(),
        }) {
            MutationEffect::Duplicated { block_id, .. } => Some(block_id),
            _ => None,
        }
    }

    pub fn update_block_props(&mut self, block_id: &str, props: Props) {
        self.apply_infallible(Mutation::UpdateBlockProps {
            block_id: block_id.to_string(),
            props,
        });
    }

    /// Select a block, or clear the selection with `None`.
    ///
    /// Ids that are not in the document select nothing. Selection is ignored
    /// while previewing.
    pub fn select_block(&mut self, block_id: Option<&str>) {
        if self.session.is_preview_mode {
            return;
        }

        self.session.selected_block_id = block_id
            .filter(|id| self.document.contains_block(id))
            .map(str::to_string);
    }

    /// Flip preview mode; always clears the selection
    pub fn toggle_preview(&mut self) {
        self.session.is_preview_mode = !self.session.is_preview_mode;
        self.session.clear_selection();
    }

    pub fn set_viewport(&mut self, viewport: Viewport) {
        self.session.viewport = viewport;
    }

    pub fn set_dragging(&mut self, is_dragging: bool) {
        self.session.is_dragging = is_dragging;
    }

    /// Replace the document wholesale
    pub fn set_page(&mut self, mut document: PageDocument) -> Result<(), EditorError> {
        if let Some(id) = document.duplicate_block_id() {
            return Err(EditorError::MalformedDocument(format!(
                "duplicate block id: {}",
                id
            )));
        }

        for block in &mut document.blocks {
            Arc::make_mut(block).strip_reserved_keys();
        }

        self.publish(document);
        self.session.clear_selection();
        Ok(())
    }

    /// Reset to a fresh empty page
    pub fn clear_page(&mut self) {
        let document = PageDocument::empty(self.ids.new_id());
        self.publish(document);
        self.session.clear_selection();
    }

    /// Serialize the current document as JSON
    pub fn export_page(&self) -> Result<String, EditorError> {
        Ok(serde_json::to_string_pretty(&*self.document)?)
    }

    /// Replace the document with one parsed from JSON.
    ///
    /// Nothing changes unless the whole document parses and validates.
    pub fn import_page(&mut self, json: &str) -> Result<(), EditorError> {
        let result = serde_json::from_str::<PageDocument>(json)
            .map_err(|e| EditorError::MalformedDocument(e.to_string()))
            .and_then(|document| self.set_page(document));

        if let Err(err) = &result {
            warn!(error = %err, "Failed to import page");
        }

        result
    }

    fn apply_infallible(&mut self, mutation: Mutation) -> MutationEffect {
        match self.apply(mutation) {
            Ok(result) => result.effect,
            Err(err) => {
                warn!(error = %err, "Mutation rejected");
                MutationEffect::Unchanged
            }
        }
    }

    fn publish(&mut self, document: PageDocument) {
        self.document = Arc::new(document);
        self.version += 1;
    }
}

#[cfg(feature = "random-ids")]
impl Default for PageStore {
    fn default() -> Self {
        Self::new()
    }
}
