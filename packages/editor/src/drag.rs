//! # Drag and Drop
//!
//! Translates a finished drag gesture on the canvas into at most one store
//! mutation. Nothing changes while the gesture is in flight; only the
//! session's `is_dragging` flag tracks it.

use crate::mutations::Mutation;
use crate::store::{MutationResult, PageStore};
use crate::EditorError;
use serde::{Deserialize, Serialize};

/// What is being dragged
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum DragSource {
    /// A new block dragged in from the palette
    Palette { block_type: String },
    /// An existing block being reordered
    Block { block_id: String },
}

/// Where the gesture ended
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum DropTarget {
    /// The placeholder shown on an empty page
    EmptyCanvas,
    /// On top of an existing block
    Block { block_id: String },
}

impl PageStore {
    pub fn begin_drag(&mut self) {
        self.set_dragging(true);
    }

    /// Resolve a finished gesture. `target` is `None` when dropped outside
    /// the canvas.
    pub fn end_drag(
        &mut self,
        source: DragSource,
        target: Option<DropTarget>,
    ) -> Result<Option<MutationResult>, EditorError> {
        self.set_dragging(false);

        let Some(target) = target else {
            return Ok(None);
        };

        let mutation = match (source, target) {
            (DragSource::Palette { block_type }, DropTarget::EmptyCanvas) => {
                Mutation::AddBlock { block_type, index: None }
            }

            (DragSource::Palette { block_type }, DropTarget::Block { block_id }) => {
                // Dropping on a block inserts in front of it
                let index = self.document().position(&block_id);
                Mutation::AddBlock { block_type, index }
            }

            (DragSource::Block { .. }, DropTarget::EmptyCanvas) => return Ok(None),

            (DragSource::Block { block_id: active }, DropTarget::Block { block_id: over }) => {
                if active == over {
                    return Ok(None);
                }

                let document = self.document();
                match (document.position(&active), document.position(&over)) {
                    (Some(from_index), Some(to_index)) => Mutation::MoveBlock { from_index, to_index },
                    _ => return Ok(None),
                }
            }
        };

        self.apply(mutation).map(Some)
    }
}
