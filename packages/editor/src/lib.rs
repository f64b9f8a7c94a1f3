//! # Pagecraft Editor
//!
//! Page document editing engine for the landing page builder.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//! │ common: page schema + block registry        │
//! └─────────────────────────────────────────────┘
//!                     ↓
//! ┌─────────────────────────────────────────────┐
//! │ editor: PageStore                           │
//! │  - Apply mutations with validation          │
//! │  - Publish immutable snapshots              │
//! │  - Session state (selection, preview, drag) │
//! │  - JSON import / export                     │
//! └─────────────────────────────────────────────┘
//!                     ↓
//! ┌─────────────────────────────────────────────┐
//! │ compiler-react: PageDocument → page source  │
//! └─────────────────────────────────────────────┘
//! ```
//!
//! ## Core Principles
//!
//! 1. **Document is source of truth**: previews and exports are derived views
//! 2. **All-or-nothing mutations**: a rejected mutation changes nothing
//! 3. **Session is not persisted**: selection and viewport never reach JSON
//!
//! ## Usage
//!
//! ```rust,ignore
//! use pagecraft_editor::{Mutation, PageStore};
//!
//! let mut store = PageStore::new();
//! let hero = store.add_block("heroSection", None)?;
//! store.add_block("footer", None)?;
//!
//! store.apply(Mutation::MoveBlock { from_index: 1, to_index: 0 })?;
//!
//! let json = store.export_page()?;
//! ```

mod drag;
mod errors;
mod mutations;
mod session;
mod store;

pub use drag::{DragSource, DropTarget};
pub use errors::EditorError;
pub use mutations::{Mutation, MutationEffect, MutationError};
pub use session::{EditorSession, Viewport};
pub use store::{MutationResult, PageStore};

// Re-export common types for convenience
pub use pagecraft_common::{Block, BlockKind, BlockType, IdGenerator, PageDocument, Props};
